//! Filter builder: flat tool arguments to the nested API request
//!
//! Presence alone decides what is sent. A field the caller left out never
//! appears on the wire, and a field the caller set is sent as-is, including
//! zero scores and `"0"` finder bounds.

use serde::Deserialize;

use crate::api::{
    FilterRequest, Filters, Impact, LabeledValue, ReportedWindow, SortDirection, SortField,
};

/// Page used when the caller does not pick one
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound enforced by argument validation
pub const MAX_PAGE_SIZE: u32 = 100;

/// Caller-supplied search arguments (`search_findings` tool input)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub keywords: Option<String>,
    pub impact: Option<Vec<Impact>>,
    pub firms: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    /// Protocol name substring
    pub protocol: Option<String>,
    pub protocol_category: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    /// Finder handle substring
    pub user: Option<String>,
    #[serde(default, deserialize_with = "crate::api::optional_string_or_number")]
    pub min_finders: Option<String>,
    #[serde(default, deserialize_with = "crate::api::optional_string_or_number")]
    pub max_finders: Option<String>,
    pub reported_days: Option<ReportedWindow>,
    pub quality_score: Option<f64>,
    pub rarity_score: Option<f64>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchParameters {
    /// Build the request body for `POST /findings`
    pub fn to_request(&self) -> FilterRequest {
        let filters = Filters {
            keywords: self.keywords.clone(),
            impact: self.impact.clone(),
            firms: wrap_values(self.firms.as_deref()),
            tags: wrap_values(self.tags.as_deref()),
            protocol: self.protocol.clone(),
            protocol_category: wrap_values(self.protocol_category.as_deref()),
            languages: wrap_values(self.languages.as_deref()),
            user: self.user.clone(),
            min_finders: self.min_finders.clone(),
            max_finders: self.max_finders.clone(),
            reported: self.reported_days.map(LabeledValue::new),
            quality_score: self.quality_score,
            rarity_score: self.rarity_score,
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
        };

        FilterRequest {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            filters: (!filters.is_empty()).then_some(filters),
        }
    }
}

/// Single-record lookup by slug or keywords: first page, one result
pub fn lookup_request(keywords: &str) -> FilterRequest {
    FilterRequest {
        page: 1,
        page_size: 1,
        filters: Some(Filters {
            keywords: Some(keywords.to_string()),
            ..Default::default()
        }),
    }
}

fn wrap_values(values: Option<&[String]>) -> Option<Vec<LabeledValue>> {
    values.map(|vs| vs.iter().cloned().map(LabeledValue::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn wire(params: &SearchParameters) -> Value {
        serde_json::to_value(params.to_request()).unwrap()
    }

    #[test]
    fn test_defaults_without_filters() {
        let v = wire(&SearchParameters::default());
        assert_eq!(v, json!({"page": 1, "pageSize": 20}));
        assert!(v.get("filters").is_none());
    }

    #[test]
    fn test_pagination_copied() {
        let params = SearchParameters {
            page: Some(3),
            page_size: Some(50),
            ..Default::default()
        };
        assert_eq!(wire(&params), json!({"page": 3, "pageSize": 50}));
    }

    #[test]
    fn test_full_filter_shape() {
        let params = SearchParameters {
            keywords: Some("oracle manipulation".into()),
            impact: Some(vec![Impact::High, Impact::Medium]),
            firms: Some(vec!["Cyfrin".into(), "Sherlock".into()]),
            tags: Some(vec!["Oracle".into()]),
            protocol: Some("Aave".into()),
            protocol_category: Some(vec!["Lending".into()]),
            languages: Some(vec!["Solidity".into()]),
            user: Some("0xalice".into()),
            min_finders: Some("1".into()),
            max_finders: Some("5".into()),
            reported_days: Some(ReportedWindow::Days90),
            quality_score: Some(3.5),
            rarity_score: Some(2.0),
            sort_field: Some(SortField::Quality),
            sort_direction: Some(SortDirection::Asc),
            page: Some(2),
            page_size: Some(10),
        };

        assert_eq!(
            wire(&params),
            json!({
                "page": 2,
                "pageSize": 10,
                "filters": {
                    "keywords": "oracle manipulation",
                    "impact": ["HIGH", "MEDIUM"],
                    "firms": [{"value": "Cyfrin"}, {"value": "Sherlock"}],
                    "tags": [{"value": "Oracle"}],
                    "protocol": "Aave",
                    "protocolCategory": [{"value": "Lending"}],
                    "languages": [{"value": "Solidity"}],
                    "user": "0xalice",
                    "minFinders": "1",
                    "maxFinders": "5",
                    "reported": {"value": "90"},
                    "qualityScore": 3.5,
                    "rarityScore": 2.0,
                    "sortField": "Quality",
                    "sortDirection": "Asc"
                }
            })
        );
    }

    #[test]
    fn test_zero_values_are_sent() {
        let params = SearchParameters {
            quality_score: Some(0.0),
            min_finders: Some("0".into()),
            ..Default::default()
        };
        let v = wire(&params);
        assert_eq!(v["filters"]["qualityScore"], json!(0.0));
        assert_eq!(v["filters"]["minFinders"], json!("0"));
    }

    #[test]
    fn test_empty_list_is_still_present() {
        let params = SearchParameters {
            firms: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(wire(&params)["filters"], json!({"firms": []}));
    }

    #[test]
    fn test_lookup_request_shape() {
        let v = serde_json::to_value(lookup_request("h-01-slug")).unwrap();
        assert_eq!(
            v,
            json!({"page": 1, "pageSize": 1, "filters": {"keywords": "h-01-slug"}})
        );
    }

    #[test]
    fn test_deserialize_tool_arguments() {
        let params: SearchParameters = serde_json::from_value(json!({
            "keywords": "flash loan",
            "impact": ["HIGH"],
            "protocolCategory": ["DEX"],
            "minFinders": 2,
            "maxFinders": "4",
            "reportedDays": "alltime",
            "sortField": "Recency",
            "sortDirection": "Desc",
            "pageSize": 5
        }))
        .unwrap();
        assert_eq!(params.min_finders.as_deref(), Some("2"));
        assert_eq!(params.max_finders.as_deref(), Some("4"));
        assert_eq!(params.reported_days, Some(ReportedWindow::AllTime));
        assert_eq!(params.protocol_category, Some(vec!["DEX".to_string()]));
        assert_eq!(params.page_size, Some(5));
    }

    #[test]
    fn test_deserialize_rejects_unknown_impact() {
        let result = serde_json::from_value::<SearchParameters>(json!({"impact": ["CRITICAL"]}));
        assert!(result.is_err());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;
        use proptest::prelude::prop;

        fn impact() -> impl Strategy<Value = Impact> {
            prop_oneof![
                Just(Impact::High),
                Just(Impact::Medium),
                Just(Impact::Low),
                Just(Impact::Gas),
            ]
        }

        fn text_list() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(".{0,16}", 0..8)
        }

        fn params(f: impl Fn(&mut SearchParameters)) -> SearchParameters {
            let mut p = SearchParameters::default();
            f(&mut p);
            p
        }

        /// Parameters with exactly one filter field set, paired with its wire key
        fn single_field() -> impl Strategy<Value = (SearchParameters, &'static str)> {
            prop_oneof![
                ".{0,20}".prop_map(|s| (params(|p| p.keywords = Some(s.clone())), "keywords")),
                prop::collection::vec(impact(), 0..4)
                    .prop_map(|v| (params(|p| p.impact = Some(v.clone())), "impact")),
                text_list().prop_map(|v| (params(|p| p.firms = Some(v.clone())), "firms")),
                text_list().prop_map(|v| (params(|p| p.tags = Some(v.clone())), "tags")),
                ".{0,20}".prop_map(|s| (params(|p| p.protocol = Some(s.clone())), "protocol")),
                text_list().prop_map(|v| (
                    params(|p| p.protocol_category = Some(v.clone())),
                    "protocolCategory"
                )),
                text_list().prop_map(|v| (params(|p| p.languages = Some(v.clone())), "languages")),
                ".{0,20}".prop_map(|s| (params(|p| p.user = Some(s.clone())), "user")),
                "[0-9]{1,3}"
                    .prop_map(|s| (params(|p| p.min_finders = Some(s.clone())), "minFinders")),
                "[0-9]{1,3}"
                    .prop_map(|s| (params(|p| p.max_finders = Some(s.clone())), "maxFinders")),
                prop_oneof![
                    Just(ReportedWindow::Days30),
                    Just(ReportedWindow::Days60),
                    Just(ReportedWindow::Days90),
                    Just(ReportedWindow::AllTime),
                ]
                .prop_map(|w| (params(|p| p.reported_days = Some(w)), "reported")),
                (0.0f64..=5.0)
                    .prop_map(|s| (params(|p| p.quality_score = Some(s)), "qualityScore")),
                (0.0f64..=5.0)
                    .prop_map(|s| (params(|p| p.rarity_score = Some(s)), "rarityScore")),
                prop_oneof![
                    Just(SortField::Recency),
                    Just(SortField::Quality),
                    Just(SortField::Rarity),
                ]
                .prop_map(|f| (params(|p| p.sort_field = Some(f)), "sortField")),
                prop_oneof![Just(SortDirection::Desc), Just(SortDirection::Asc)]
                    .prop_map(|d| (params(|p| p.sort_direction = Some(d)), "sortDirection")),
            ]
        }

        proptest! {
            #[test]
            fn prop_no_filter_fields_omits_filters(
                page in prop::option::of(1u32..10_000),
                page_size in prop::option::of(1u32..=MAX_PAGE_SIZE),
            ) {
                let p = SearchParameters { page, page_size, ..Default::default() };
                let v = serde_json::to_value(p.to_request()).unwrap();
                prop_assert!(v.get("filters").is_none());
                prop_assert_eq!(v.as_object().unwrap().len(), 2);
            }

            #[test]
            fn prop_single_field_yields_single_key((p, key) in single_field()) {
                let v = serde_json::to_value(p.to_request()).unwrap();
                let filters = v["filters"].as_object().unwrap();
                prop_assert_eq!(filters.len(), 1);
                prop_assert!(filters.contains_key(key), "missing key {}", key);
            }

            #[test]
            fn prop_text_lists_wrap_each_value(
                values in text_list(),
                which in 0usize..4,
            ) {
                let (p, key) = match which {
                    0 => (params(|p| p.firms = Some(values.clone())), "firms"),
                    1 => (params(|p| p.tags = Some(values.clone())), "tags"),
                    2 => (params(|p| p.protocol_category = Some(values.clone())), "protocolCategory"),
                    _ => (params(|p| p.languages = Some(values.clone())), "languages"),
                };
                let v = serde_json::to_value(p.to_request()).unwrap();
                let wrapped = v["filters"][key].as_array().unwrap();
                prop_assert_eq!(wrapped.len(), values.len());
                for (item, original) in wrapped.iter().zip(&values) {
                    let obj = item.as_object().unwrap();
                    prop_assert!(obj.keys().all(|k| k == "value" || k == "label"));
                    prop_assert_eq!(obj["value"].as_str().unwrap(), original.as_str());
                }
            }
        }
    }
}
