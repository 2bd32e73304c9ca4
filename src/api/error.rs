use thiserror::Error;

/// Failures surfaced by [`super::FindingsClient`]
///
/// An empty result page is not an error; callers render it like any other.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API key configured. Raised before any network attempt.
    #[error("API key not configured: set the {env_var} environment variable")]
    Authentication { env_var: &'static str },
    /// Remote returned a non-success status, or a body that could not be decoded.
    #[error("API request failed with status {status}{}", message_suffix(.message))]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}

impl ApiError {
    /// HTTP status carried by an `Api` error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_message() {
        let err = ApiError::Api {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "API request failed with status 429: rate limited");
    }

    #[test]
    fn test_api_error_display_without_message() {
        let err = ApiError::Api {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "API request failed with status 502");
    }

    #[test]
    fn test_authentication_names_env_var() {
        let err = ApiError::Authentication {
            env_var: "SOLODIT_API_KEY",
        };
        assert!(err.to_string().contains("SOLODIT_API_KEY"));
        assert_eq!(err.status(), None);
    }
}
