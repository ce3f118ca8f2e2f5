//! Shared lookup result types.

/// City and coordinates resolved from an IP address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    /// City name.
    pub city: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}
