//! HTTP service that greets a visitor with the current weather at the
//! location their public IP resolves to.
//!
//! A single endpoint chains three upstream calls in strict sequence:
//!
//! ```text
//! client IP  →  geolocation (city, lat, lon)  →  current temperature
//! ```
//!
//! Any failure short-circuits to a uniform `{"error": ...}` response;
//! there is no cross-request state, no retries, and no caching.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`lookup`]: Upstream IP, geolocation, and weather clients
//! - [`api`]: HTTP routes and handlers
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod lookup;
pub mod utils;

pub use config::Config;
pub use error::AppError;
