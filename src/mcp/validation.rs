//! Input validation for MCP tool arguments
//!
//! Range checks the JSON schema advertises but serde cannot enforce.
//! Enum membership is already checked during deserialization.

use anyhow::{bail, Result};

use crate::filter::{SearchParameters, MAX_PAGE_SIZE};

/// Maximum keywords length sent upstream
pub const MAX_KEYWORDS_LENGTH: usize = 8192;
/// Upper bound for quality and rarity thresholds
pub const MAX_SCORE: f64 = 5.0;

/// Validate a lookup key: reject empty/whitespace-only and enforce max length.
pub fn validate_keywords(keywords: &str) -> Result<()> {
    if keywords.trim().is_empty() {
        bail!("keywords is empty");
    }
    validate_keywords_length(keywords)
}

fn validate_keywords_length(keywords: &str) -> Result<()> {
    if keywords.len() > MAX_KEYWORDS_LENGTH {
        bail!(
            "keywords too long: {} bytes (max {})",
            keywords.len(),
            MAX_KEYWORDS_LENGTH
        );
    }
    Ok(())
}

/// Validate `search_findings` arguments against the advertised schema
pub fn validate_search_params(params: &SearchParameters) -> Result<()> {
    if let Some(keywords) = &params.keywords {
        validate_keywords_length(keywords)?;
    }
    if let Some(page) = params.page {
        if page < 1 {
            bail!("page must be >= 1, got {}", page);
        }
    }
    if let Some(size) = params.page_size {
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            bail!("pageSize must be between 1 and {}, got {}", MAX_PAGE_SIZE, size);
        }
    }
    validate_score("qualityScore", params.quality_score)?;
    validate_score("rarityScore", params.rarity_score)?;

    let min = parse_finder_bound("minFinders", params.min_finders.as_deref())?;
    let max = parse_finder_bound("maxFinders", params.max_finders.as_deref())?;
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            bail!("minFinders ({}) is greater than maxFinders ({})", min, max);
        }
    }
    Ok(())
}

fn validate_score(name: &str, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        if !v.is_finite() || !(0.0..=MAX_SCORE).contains(&v) {
            bail!("{} must be between 0 and {}, got {}", name, MAX_SCORE, v);
        }
    }
    Ok(())
}

/// Finder bounds travel as strings but must be plain non-negative integers
fn parse_finder_bound(name: &str, value: Option<&str>) -> Result<Option<u64>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        bail!("{} must be a non-negative integer string, got '{}'", name, raw);
    }
    let n = raw
        .parse::<u64>()
        .map_err(|_| anyhow::anyhow!("{} is out of range: '{}'", name, raw))?;
    Ok(Some(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(f: impl FnOnce(&mut SearchParameters)) -> SearchParameters {
        let mut p = SearchParameters::default();
        f(&mut p);
        p
    }

    // ===== validate_keywords tests =====

    #[test]
    fn test_validate_keywords_empty_rejected() {
        assert!(validate_keywords("").is_err());
        assert!(validate_keywords("   ").is_err());
        assert!(validate_keywords("\t\n").is_err());
    }

    #[test]
    fn test_validate_keywords_normal_accepted() {
        assert!(validate_keywords("h-01-reentrancy").is_ok());
    }

    #[test]
    fn test_validate_keywords_boundary_length() {
        let at_limit = "a".repeat(MAX_KEYWORDS_LENGTH);
        assert!(validate_keywords(&at_limit).is_ok());
        let over_limit = "a".repeat(MAX_KEYWORDS_LENGTH + 1);
        assert!(validate_keywords(&over_limit).is_err());
    }

    // ===== validate_search_params tests =====

    #[test]
    fn test_defaults_valid() {
        assert!(validate_search_params(&SearchParameters::default()).is_ok());
    }

    #[test]
    fn test_empty_search_keywords_allowed() {
        assert!(validate_search_params(&params(|p| p.keywords = Some(String::new()))).is_ok());
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(validate_search_params(&params(|p| p.page = Some(0))).is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(validate_search_params(&params(|p| p.page_size = Some(1))).is_ok());
        assert!(validate_search_params(&params(|p| p.page_size = Some(100))).is_ok());
        assert!(validate_search_params(&params(|p| p.page_size = Some(0))).is_err());
        assert!(validate_search_params(&params(|p| p.page_size = Some(101))).is_err());
    }

    #[test]
    fn test_score_bounds() {
        assert!(validate_search_params(&params(|p| p.quality_score = Some(0.0))).is_ok());
        assert!(validate_search_params(&params(|p| p.rarity_score = Some(5.0))).is_ok());
        assert!(validate_search_params(&params(|p| p.quality_score = Some(5.01))).is_err());
        assert!(validate_search_params(&params(|p| p.rarity_score = Some(-0.1))).is_err());
        assert!(validate_search_params(&params(|p| p.quality_score = Some(f64::NAN))).is_err());
    }

    #[test]
    fn test_finder_bounds_must_be_digits() {
        assert!(validate_search_params(&params(|p| p.min_finders = Some("0".into()))).is_ok());
        assert!(validate_search_params(&params(|p| p.min_finders = Some("".into()))).is_err());
        assert!(validate_search_params(&params(|p| p.max_finders = Some("-1".into()))).is_err());
        assert!(validate_search_params(&params(|p| p.max_finders = Some("2.5".into()))).is_err());
    }

    #[test]
    fn test_finder_bounds_ordering() {
        let ok = params(|p| {
            p.min_finders = Some("2".into());
            p.max_finders = Some("2".into());
        });
        assert!(validate_search_params(&ok).is_ok());

        let inverted = params(|p| {
            p.min_finders = Some("5".into());
            p.max_finders = Some("1".into());
        });
        let err = validate_search_params(&inverted).unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }
}
