//! HTTP client for the three upstream services.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{AppError, GeoError, WeatherError};

use super::types::GeoLocation;

/// Client for the IP-echo, geolocation, and weather APIs.
///
/// Holds a single `reqwest::Client` built once at startup; every
/// outbound call inherits its request and connect timeouts, so no
/// lookup can hang a request indefinitely.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    /// Shared HTTP client with timeouts applied.
    http: reqwest::Client,
    /// IP-echo service URL.
    ip_echo_url: String,
    /// Geolocation API base URL.
    geo_api_url: String,
    /// Weather API base URL.
    weather_api_url: String,
    /// OpenWeatherMap API key.
    weather_api_key: String,
}

/// IP-echo service response.
#[derive(Debug, Deserialize)]
struct IpEchoResponse {
    /// Origin address as reported by the echo service.
    origin: String,
}

/// Geolocation API response.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    /// "success" or "fail".
    status: String,
    /// City name, present on success.
    city: Option<String>,
    /// Latitude, present on success.
    lat: Option<f64>,
    /// Longitude, present on success.
    lon: Option<f64>,
    /// Failure reason, present on fail.
    message: Option<String>,
}

/// Weather API success response.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    /// Current conditions.
    main: WeatherMain,
}

/// `main` block of the weather response.
#[derive(Debug, Deserialize)]
struct WeatherMain {
    /// Current temperature in the requested units (Celsius).
    temp: f64,
}

/// Weather API error body.
#[derive(Debug, Deserialize)]
struct WeatherErrorBody {
    /// Human-readable failure reason.
    message: Option<String>,
}

impl UpstreamClient {
    /// Create a new client from config with timeouts applied.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(Duration::from_millis(config.http_timeout_ms.min(2000)))
            .build()?;

        Ok(Self {
            http,
            ip_echo_url: config.ip_echo_url.clone(),
            geo_api_url: config.geo_api_url.clone(),
            weather_api_url: config.weather_api_url.clone(),
            weather_api_key: config.openweathermap_api_key.clone(),
        })
    }

    /// Ask the IP-echo service for our public address.
    ///
    /// Never fails: any transport or parse error is logged and yields
    /// `None`, which the handler turns into a terminal 500 without
    /// attempting further lookups.
    #[instrument(skip(self))]
    pub async fn public_ip(&self) -> Option<String> {
        let result = async {
            let response = self.http.get(&self.ip_echo_url).send().await?;
            response.json::<IpEchoResponse>().await
        }
        .await;

        match result {
            Ok(body) => {
                debug!(origin = %body.origin, "resolved public IP");
                Some(body.origin)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch public IP");
                None
            }
        }
    }

    /// Resolve an IP address to city and coordinates.
    ///
    /// Single attempt, no retries. Fails when the HTTP status is not
    /// successful or the payload's `status` field is not `"success"`;
    /// in the latter case the API's `message` is propagated verbatim.
    #[instrument(skip(self), fields(ip = %ip))]
    pub async fn geolocate(&self, ip: &str) -> Result<GeoLocation, GeoError> {
        let url = format!("{}/json/{}", self.geo_api_url, ip);

        let response = self.http.get(&url).send().await.map_err(GeoError::Request)?;

        if !response.status().is_success() {
            return Err(GeoError::BadStatus(response.status()));
        }

        let body: GeoResponse = response.json().await.map_err(GeoError::Request)?;

        if body.status != "success" {
            return Err(GeoError::Rejected(body.message.unwrap_or_else(|| {
                "Failed to fetch geolocation data".to_string()
            })));
        }

        match (body.city, body.lat, body.lon) {
            (Some(city), Some(lat), Some(lon)) => {
                debug!(city = %city, lat, lon, "geolocation resolved");
                Ok(GeoLocation { city, lat, lon })
            }
            _ => Err(GeoError::Incomplete),
        }
    }

    /// Fetch the current temperature in Celsius for the coordinates.
    ///
    /// Single attempt, no retries. A non-success HTTP status fails with
    /// the error body's `message` field folded into a fixed template.
    #[instrument(skip(self))]
    pub async fn current_temperature(&self, lat: f64, lon: f64) -> Result<f64, WeatherError> {
        let url = format!("{}/weather", self.weather_api_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.weather_api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(WeatherError::Request)?;

        if !response.status().is_success() {
            let message = response
                .json::<WeatherErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "upstream error".to_string());
            return Err(WeatherError::Upstream(message));
        }

        let body: WeatherResponse = response.json().await.map_err(WeatherError::Request)?;

        debug!(temp = body.main.temp, "weather resolved");
        Ok(body.main.temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_response_parses_failure_payload() {
        let body: GeoResponse = serde_json::from_str(
            r#"{"status":"fail","message":"private range","query":"192.168.0.1"}"#,
        )
        .expect("valid json");

        assert_eq!(body.status, "fail");
        assert_eq!(body.message.as_deref(), Some("private range"));
        assert!(body.city.is_none());
    }

    #[test]
    fn geo_response_parses_success_payload() {
        let body: GeoResponse = serde_json::from_str(
            r#"{"status":"success","city":"Paris","lat":48.85,"lon":2.35}"#,
        )
        .expect("valid json");

        assert_eq!(body.status, "success");
        assert_eq!(body.city.as_deref(), Some("Paris"));
        assert_eq!(body.lat, Some(48.85));
        assert_eq!(body.lon, Some(2.35));
    }

    #[test]
    fn weather_response_parses_nested_temp() {
        let body: WeatherResponse =
            serde_json::from_str(r#"{"main":{"temp":15.2,"humidity":60},"name":"Paris"}"#)
                .expect("valid json");

        assert_eq!(body.main.temp, 15.2);
    }
}
