//! High-level client: `AlphaClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::calc::client::Calc;
use crate::domain::price::client::Prices;
use crate::domain::token::client::Tokens;
use crate::domain::token::Token;
use crate::error::SdkError;
use crate::http::{AlphaHttp, RetryPolicy};

use async_lock::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::calc::client::Calc as CalcClient;
pub use crate::domain::price::client::Prices as PricesClient;
pub use crate::domain::token::client::Tokens as TokensClient;

/// The primary entry point for the dashboard gateway.
///
/// Provides nested sub-client accessors: `client.tokens()`, `client.prices()`,
/// `client.calc()`. Cloning is cheap and shares the token cache.
#[derive(Clone)]
pub struct AlphaClient {
    pub(crate) http: AlphaHttp,
    pub(crate) price_retry: RetryPolicy,
    /// Token listing cache: (tokens, fetched_at)
    pub(crate) token_cache: Arc<RwLock<Option<(Vec<Token>, Instant)>>>,
    pub(crate) token_cache_ttl: Duration,
}

impl AlphaClient {
    pub fn builder() -> AlphaClientBuilder {
        AlphaClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { client: self }
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn calc(&self) -> Calc<'_> {
        Calc { client: self }
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.tokens().clear_cache().await;
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct AlphaClientBuilder {
    base_url: String,
    timeout: Duration,
    price_retry: RetryPolicy,
    token_cache_ttl: Duration,
}

impl Default for AlphaClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            price_retry: RetryPolicy::None,
            token_cache_ttl: Duration::from_secs(300),
        }
    }
}

impl AlphaClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout (native only).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry policy for price lookups. Defaults to a single attempt.
    pub fn price_retry(mut self, policy: RetryPolicy) -> Self {
        self.price_retry = policy;
        self
    }

    pub fn token_cache_ttl(mut self, ttl: Duration) -> Self {
        self.token_cache_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<AlphaClient, SdkError> {
        Ok(AlphaClient {
            http: AlphaHttp::with_timeout(&self.base_url, self.timeout)?,
            price_retry: self.price_retry,
            token_cache: Arc::new(RwLock::new(None)),
            token_cache_ttl: self.token_cache_ttl,
        })
    }
}
