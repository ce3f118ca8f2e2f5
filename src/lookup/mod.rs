//! Upstream lookups: client IP, geolocation, and weather.

pub mod client;
pub mod ip;
pub mod types;

pub use client::UpstreamClient;
pub use ip::IpSource;
pub use types::GeoLocation;
