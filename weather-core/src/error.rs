use reqwest::StatusCode;
use thiserror::Error;

/// Fallback text when the provider rejects a request without a message.
pub const CITY_NOT_FOUND: &str = "City not found";

/// Failures of a weather lookup.
///
/// The UI never sees these variants directly; every primary-path failure is
/// collapsed into a single string via [`WeatherError::user_message`].
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Blank or whitespace-only city input.
    #[error("Please enter a city name")]
    EmptyCity,

    /// Non-success HTTP status from the provider.
    #[error("{message}")]
    Provider { status: StatusCode, message: String },

    /// Network failure. The request URL is stripped, since it carries the API key.
    #[error("Failed to reach weather provider: {0}")]
    Transport(reqwest::Error),

    #[error("Failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    /// Text shown to the user after the error marker.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Build a provider error from a non-success response body.
    ///
    /// The body is expected to be `{"message": "..."}`; anything else yields
    /// [`CITY_NOT_FOUND`].
    pub fn from_error_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| CITY_NOT_FOUND.to_string());

        WeatherError::Provider { status, message }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.without_url())
    }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
