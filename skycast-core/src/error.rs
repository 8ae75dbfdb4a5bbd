use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single WeatherAPI.com request, from connection refusal up
/// to an undecodable body. Provider-reported errors keep their code so
/// callers can tell "no such place" (1006) from "bad key" (2006/2008).
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{message} (WeatherAPI error {code})")]
    Api { code: i32, message: String },

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// Short line suitable for the interactive panels.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Api { message, .. } => message.clone(),
            WeatherError::Status { status, .. } => {
                format!("WeatherAPI.com answered with HTTP {status}")
            }
            WeatherError::Network(_) => {
                "could not reach WeatherAPI.com, check your connection".to_string()
            }
            WeatherError::Decode { .. } => "unexpected response from WeatherAPI.com".to_string(),
        }
    }

    /// True for error 1006, "No matching location found".
    pub fn is_unknown_place(&self) -> bool {
        matches!(self, WeatherError::Api { code: 1006, .. })
    }
}
