//! Plain-text rendering of findings responses
//!
//! List mode prints a pagination/rate-limit summary followed by one block
//! per finding with a truncated body. Detail mode prints a single finding
//! with its full body. Both share [`render_finding`].

use serde_json::Value;

use crate::api::{Finding, SearchResponse};

/// Substituted for any absent or empty field
pub const PLACEHOLDER: &str = "N/A";
/// Body length (in chars) kept in list mode when there is no summary
pub const EXCERPT_CHARS: usize = 500;
/// Appended to a truncated body
pub const TRUNCATION_MARKER: &str = "...";

/// How much of a finding's body to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Summary if present, otherwise the first [`EXCERPT_CHARS`] chars of content
    Excerpt,
    /// Full content
    Full,
}

/// Render a search page: summary header, then one block per finding in API order
pub fn format_search_response(response: &SearchResponse) -> String {
    let summary = format_summary(response);
    if response.findings.is_empty() {
        return summary;
    }

    let blocks: Vec<String> = response
        .findings
        .iter()
        .map(|f| {
            let heading = format!("## [{}] {}", or_placeholder(&f.impact), f.title);
            render_finding(f, &heading, BodyPolicy::Excerpt)
        })
        .collect();

    format!("{}\n\n{}", summary, blocks.join("\n\n"))
}

/// Render a single-record lookup, or the not-found message when the page is empty
pub fn format_finding_detail(response: &SearchResponse, query: &str) -> String {
    match response.findings.first() {
        Some(finding) => {
            let heading = format!("# {}", finding.title);
            render_finding(finding, &heading, BodyPolicy::Full)
        }
        None => not_found_message(query),
    }
}

pub fn not_found_message(query: &str) -> String {
    format!("No finding found matching \"{}\".", query)
}

/// Heading, field table, blank line, body
pub fn render_finding(finding: &Finding, heading: &str, policy: BodyPolicy) -> String {
    let handles = finding.finder_handles();
    let tags = finding.tag_titles();

    let fields = [
        format!("- ID: {}", or_placeholder(&finding.id)),
        format!("- Slug: {}", or_placeholder(&finding.slug)),
        format!("- Protocol: {}", opt_or_placeholder(&finding.protocol_name)),
        format!("- Firm: {}", opt_or_placeholder(&finding.firm_name)),
        format!("- Quality Score: {}", score(finding.quality_score)),
        format!("- Rarity Score: {}", score(finding.general_score)),
        format!("- Report Date: {}", opt_or_placeholder(&finding.report_date)),
        format!(
            "- Finders: {} ({})",
            join_or_placeholder(&handles),
            finding.finders_count
        ),
        format!("- Tags: {}", join_or_placeholder(&tags)),
        format!("- Source: {}", opt_or_placeholder(&finding.source_link)),
    ];

    format!(
        "{}\n\n{}\n\n{}",
        heading,
        fields.join("\n"),
        body(finding, policy)
    )
}

fn format_summary(response: &SearchResponse) -> String {
    let meta = &response.metadata;
    let rate = &response.rate_limit;
    [
        "# Search Results".to_string(),
        String::new(),
        format!("Total Results: {}", meta.total_results),
        format!("Page: {} of {}", meta.current_page, meta.total_pages),
        format!("Results on this page: {}", response.findings.len()),
        format!("Query Time: {:.3}s", meta.elapsed),
        format!(
            "Rate Limit: {}/{} remaining (resets at {})",
            rate.remaining,
            rate.limit,
            reset_label(&rate.reset)
        ),
    ]
    .join("\n")
}

fn body(finding: &Finding, policy: BodyPolicy) -> String {
    let text = match policy {
        BodyPolicy::Full => finding.content.clone(),
        BodyPolicy::Excerpt => match finding.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary.to_string(),
            _ => excerpt(&finding.content),
        },
    };
    if text.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text
    }
}

/// First [`EXCERPT_CHARS`] chars plus the marker; shorter content is returned whole
fn excerpt(content: &str) -> String {
    if content.chars().count() < EXCERPT_CHARS {
        return content.to_string();
    }
    let end = content
        .char_indices()
        .nth(EXCERPT_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(content.len());
    format!("{}{}", &content[..end], TRUNCATION_MARKER)
}

fn score(value: Option<f64>) -> String {
    match value {
        Some(s) => format!("{}/5", s),
        None => PLACEHOLDER.to_string(),
    }
}

fn reset_label(reset: &Value) -> String {
    match reset {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) if s.is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn or_placeholder(s: &str) -> &str {
    if s.is_empty() {
        PLACEHOLDER
    } else {
        s
    }
}

fn opt_or_placeholder(s: &Option<String>) -> &str {
    or_placeholder(s.as_deref().unwrap_or(""))
}

fn join_or_placeholder(items: &[&str]) -> String {
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}
