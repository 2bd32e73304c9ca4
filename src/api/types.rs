//! Wire types for the remote findings API
//!
//! Request types serialize to the camelCase shape the API expects; response
//! types tolerate nulls and missing keys so a sparse record never fails to
//! decode.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Enumerated filter values
// ============================================================================

/// Severity classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Impact {
    High,
    Medium,
    Low,
    Gas,
}

impl Impact {
    pub const ALL: [Impact; 4] = [Impact::High, Impact::Medium, Impact::Low, Impact::Gas];

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "HIGH",
            Impact::Medium => "MEDIUM",
            Impact::Low => "LOW",
            Impact::Gas => "GAS",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Impact::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown impact '{}'. Expected one of: HIGH, MEDIUM, LOW, GAS", s))
    }
}

/// Lookback window on the report date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportedWindow {
    #[serde(rename = "30")]
    Days30,
    #[serde(rename = "60")]
    Days60,
    #[serde(rename = "90")]
    Days90,
    #[serde(rename = "alltime")]
    AllTime,
}

impl ReportedWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportedWindow::Days30 => "30",
            ReportedWindow::Days60 => "60",
            ReportedWindow::Days90 => "90",
            ReportedWindow::AllTime => "alltime",
        }
    }
}

impl FromStr for ReportedWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "30" => Ok(ReportedWindow::Days30),
            "60" => Ok(ReportedWindow::Days60),
            "90" => Ok(ReportedWindow::Days90),
            "alltime" | "all" => Ok(ReportedWindow::AllTime),
            _ => Err(format!(
                "Unknown reported window '{}'. Expected one of: 30, 60, 90, alltime",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Recency,
    Quality,
    Rarity,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recency" => Ok(SortField::Recency),
            "quality" => Ok(SortField::Quality),
            "rarity" => Ok(SortField::Rarity),
            _ => Err(format!(
                "Unknown sort field '{}'. Expected one of: Recency, Quality, Rarity",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Desc,
    Asc,
}

// ============================================================================
// Request
// ============================================================================

/// `{value, label?}` wrapper the API uses for list and select filters.
/// Only `value` is ever populated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue<T = String> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl<T> LabeledValue<T> {
    pub fn new(value: T) -> Self {
        Self { value, label: None }
    }
}

/// Nested filter object. Every field is skipped on the wire when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Vec<Impact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firms: Option<Vec<LabeledValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<LabeledValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_category: Option<Vec<LabeledValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LabeledValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_finders: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_finders: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported: Option<LabeledValue<ReportedWindow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl Filters {
    /// True when no filter field is set
    pub fn is_empty(&self) -> bool {
        *self == Filters::default()
    }
}

/// Body of `POST /findings`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
}

// ============================================================================
// Response
// ============================================================================

/// One audit finding as returned by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: String,
    #[serde(default)]
    pub quality_score: Option<f64>,
    /// Rarity score
    #[serde(default)]
    pub general_score: Option<f64>,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub firm_name: Option<String>,
    #[serde(default)]
    pub protocol_name: Option<String>,
    #[serde(default, deserialize_with = "count_from_string_or_number")]
    pub finders_count: u32,
    #[serde(default)]
    pub source_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues_issue_finders: Vec<FinderLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues_issuetagscore: Vec<TagLink>,
}

impl Finding {
    /// Finder handles in API order, skipping records without a handle
    pub fn finder_handles(&self) -> Vec<&str> {
        self.issues_issue_finders
            .iter()
            .filter_map(|link| link.wardens_warden.as_ref()?.handle.as_deref())
            .filter(|h| !h.is_empty())
            .collect()
    }

    /// Tag titles in API order, skipping records without a title
    pub fn tag_titles(&self) -> Vec<&str> {
        self.issues_issuetagscore
            .iter()
            .filter_map(|link| link.tags_tag.as_ref()?.title.as_deref())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderLink {
    #[serde(default)]
    pub wardens_warden: Option<Finder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finder {
    #[serde(default)]
    pub handle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagLink {
    #[serde(default)]
    pub tags_tag: Option<Tag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub title: Option<String>,
}

/// Pagination block, echoed verbatim in the summary header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_page: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub page_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u64,
    /// Query time in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub elapsed: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimit {
    #[serde(deserialize_with = "null_as_default")]
    pub limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub remaining: u64,
    /// Opaque reset marker (epoch seconds or timestamp string, depending on deployment)
    pub reset: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub findings: Vec<Finding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: SearchMetadata,
    #[serde(default, rename = "rateLimit", deserialize_with = "null_as_default")]
    pub rate_limit: RateLimit,
}

// ============================================================================
// Lenient deserializers
// ============================================================================

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string_or_number(deserializer)?.unwrap_or_default())
}

/// Count sent as `3`, `"3"`, or `null` (zero)
fn count_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_string_or_number(deserializer)? {
        None => Ok(0),
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a non-negative count, got {:?}", s))),
    }
}

/// Accept `"3"`, `3`, or `null`. Tool clients are inconsistent about
/// quoting numeric strings.
pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
