//! Unified error types for the greeting service.
//!
//! Each lookup stage has its own error enum; every variant maps to an
//! HTTP 500 with the variant's Display text as the response body's
//! `error` field, so the Display strings here are part of the API.

use thiserror::Error;

/// Top-level error for the binary.
///
/// Stage errors never reach this type: the handler converts them into
/// HTTP responses directly, so only startup failures live here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client IP resolution errors.
#[derive(Error, Debug)]
pub enum IpError {
    /// Neither the probe nor the header strategy produced an address.
    #[error("Failed to determine public IP address")]
    Undetermined,
}

/// Geolocation lookup errors.
///
/// `Rejected` carries the API's own message verbatim; every other
/// variant renders the fixed default message.
#[derive(Error, Debug)]
pub enum GeoError {
    /// The API answered but refused the lookup (status != "success").
    #[error("{0}")]
    Rejected(String),

    /// Non-success HTTP status from the geolocation API.
    #[error("Failed to fetch geolocation data")]
    BadStatus(reqwest::StatusCode),

    /// Transport failure, including timeouts.
    #[error("Failed to fetch geolocation data")]
    Request(#[source] reqwest::Error),

    /// Payload claimed success but was missing city or coordinates.
    #[error("Failed to fetch geolocation data")]
    Incomplete,
}

/// Weather lookup errors.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Non-success HTTP status; carries the error body's message field.
    #[error("Failed to fetch weather data: {0}")]
    Upstream(String),

    /// Transport failure, including timeouts.
    #[error("Failed to fetch weather data")]
    Request(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_error_display_is_exact() {
        assert_eq!(
            IpError::Undetermined.to_string(),
            "Failed to determine public IP address"
        );
    }

    #[test]
    fn geo_rejected_propagates_message_verbatim() {
        let err = GeoError::Rejected("private range".to_string());
        assert_eq!(err.to_string(), "private range");
    }

    #[test]
    fn geo_bad_status_uses_default_message() {
        let err = GeoError::BadStatus(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Failed to fetch geolocation data");
    }

    #[test]
    fn weather_upstream_uses_prefixed_template() {
        let err = WeatherError::Upstream("Invalid API key".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to fetch weather data: Invalid API key"
        );
    }
}
