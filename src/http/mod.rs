//! HTTP client layer: `AlphaHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::AlphaHttp;
pub use retry::{RetryConfig, RetryPolicy};
