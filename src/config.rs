//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::lookup::IpSource;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OpenWeatherMap API key used for the weather lookup.
    pub openweathermap_api_key: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// How to determine the client's public IP: external probe or
    /// forwarding header.
    #[serde(default)]
    pub ip_source: IpSource,

    /// IP-echo service URL (probe strategy only).
    #[serde(default = "default_ip_echo_url")]
    pub ip_echo_url: String,

    /// Geolocation API base URL.
    #[serde(default = "default_geo_api_url")]
    pub geo_api_url: String,

    /// Weather API base URL.
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// Timeout applied to every outbound call, in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    8080
}

fn default_ip_echo_url() -> String {
    "https://httpbin.org/ip".to_string()
}

fn default_geo_api_url() -> String {
    "http://ip-api.com".to_string()
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_http_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.openweathermap_api_key.is_empty() {
            return Err("OPENWEATHERMAP_API_KEY is required".to_string());
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            openweathermap_api_key: "test-key".to_string(),
            port: default_port(),
            ip_source: IpSource::default(),
            ip_echo_url: default_ip_echo_url(),
            geo_api_url: default_geo_api_url(),
            weather_api_url: default_weather_api_url(),
            http_timeout_ms: default_http_timeout_ms(),
            rust_log: default_log_level(),
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_port(), 8080);
        assert_eq!(default_http_timeout_ms(), 5000);
        assert_eq!(default_geo_api_url(), "http://ip-api.com");
        assert_eq!(IpSource::default(), IpSource::Probe);
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let config = Config {
            openweathermap_api_key: String::new(),
            ..test_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_ms: 0,
            ..test_config()
        };

        assert!(config.validate().is_err());
    }
}
