//! Network URL constants for the Alpha dashboard gateway.

/// Default REST API base URL (the local dashboard backend).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the REST API base URL.
pub const API_URL_ENV: &str = "ALPHA_API_BASE";
