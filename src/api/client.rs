//! Blocking HTTP client for the findings search endpoint

use std::time::Instant;

use serde::Deserialize;

use crate::config::{ApiConfig, API_KEY_ENV};

use super::error::ApiError;
use super::types::{FilterRequest, SearchResponse};

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "X-Cyfrin-API-Key";

/// Error body shape; anything else degrades to an empty message
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for `POST {base_url}/findings`
///
/// One call per invocation: no retry, no caching. The key is checked before
/// any network attempt so a missing key never produces an outbound request.
pub struct FindingsClient {
    http: reqwest::blocking::Client,
    config: ApiConfig,
}

impl FindingsClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("findings-mcp/", env!("CARGO_PKG_VERSION")))
            // reqwest's blocking client defaults to 30s; only time out when configured
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Run one search against the remote API
    pub fn search(&self, request: &FilterRequest) -> Result<SearchResponse, ApiError> {
        let api_key = self
            .config
            .api_key()
            .ok_or(ApiError::Authentication { env_var: API_KEY_ENV })?;

        let url = self.config.findings_url();
        tracing::debug!(
            url = %url,
            page = request.page,
            page_size = request.page_size,
            has_filters = request.filters.is_some(),
            "Querying findings API"
        );

        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            tracing::warn!(status = status.as_u16(), message = %message, "Findings API returned an error");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str::<SearchResponse>(&body) {
            Ok(parsed) => {
                tracing::info!(
                    findings = parsed.findings.len(),
                    total = parsed.metadata.total_results,
                    rate_limit_remaining = parsed.rate_limit.remaining,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Findings query completed"
                );
                Ok(parsed)
            }
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Undecodable findings response body");
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: String::new(),
                })
            }
        }
    }
}
