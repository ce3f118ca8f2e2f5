//! HTTP API handlers.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GeoError, IpError, WeatherError};
use crate::lookup::{ip, IpSource, UpstreamClient};

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client for the upstream lookups.
    pub client: UpstreamClient,
    /// Configured client-IP strategy.
    pub ip_source: IpSource,
}

impl AppState {
    /// Create new app state.
    pub fn new(client: UpstreamClient, ip_source: IpSource) -> Self {
        Self { client, ip_source }
    }
}

/// Query parameters for the hello endpoint.
#[derive(Debug, Deserialize)]
pub struct HelloParams {
    /// Name embedded verbatim into the greeting.
    pub visitor_name: Option<String>,
}

/// Successful hello response.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    /// Resolved public IP of the caller.
    pub client_ip: String,
    /// City the IP resolved to.
    pub location: String,
    /// Greeting embedding the visitor name, temperature, and city.
    pub greeting: String,
}

/// Uniform error envelope for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure reason.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Handler-level error: every lookup failure becomes a 500 whose body
/// carries the error's Display text.
#[derive(Debug)]
pub struct HandlerError(String);

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: self.0 }),
        )
            .into_response()
    }
}

impl From<IpError> for HandlerError {
    fn from(e: IpError) -> Self {
        Self(e.to_string())
    }
}

impl From<GeoError> for HandlerError {
    fn from(e: GeoError) -> Self {
        Self(e.to_string())
    }
}

impl From<WeatherError> for HandlerError {
    fn from(e: WeatherError) -> Self {
        Self(e.to_string())
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Greeting handler: resolve IP, geolocate, fetch weather, respond.
///
/// The chain is strictly linear and short-circuits to a single error
/// response at the first failing stage; no retries, no partial success.
pub async fn hello(
    State(state): State<AppState>,
    Query(params): Query<HelloParams>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<HelloResponse>, HandlerError> {
    let visitor_name = params.visitor_name.unwrap_or_default();

    let client_ip = match state.ip_source {
        IpSource::Probe => state.client.public_ip().await,
        IpSource::Header => {
            ip::from_forwarded_headers(&headers, connect_info.map(|ConnectInfo(addr)| addr))
        }
    };

    let client_ip = match client_ip.filter(|ip| !ip.is_empty()) {
        Some(ip) => ip,
        None => {
            warn!("client IP undeterminable, aborting request");
            return Err(IpError::Undetermined.into());
        }
    };

    let location = state.client.geolocate(&client_ip).await.map_err(|e| {
        warn!(error = ?e, ip = %client_ip, "geolocation lookup failed");
        HandlerError::from(e)
    })?;

    let temperature = state
        .client
        .current_temperature(location.lat, location.lon)
        .await
        .map_err(|e| {
            warn!(error = ?e, city = %location.city, "weather lookup failed");
            HandlerError::from(e)
        })?;

    debug!(ip = %client_ip, city = %location.city, temperature, "request resolved");

    Ok(Json(HelloResponse {
        client_ip,
        greeting: greeting(&visitor_name, temperature, &location.city),
        location: location.city,
    }))
}

/// Compose the greeting text. Deterministic for identical inputs.
fn greeting(visitor_name: &str, temperature: f64, city: &str) -> String {
    format!(
        "Hello, {}!, the temperature is {} degrees Celsius in {}",
        visitor_name, temperature, city
    )
}
