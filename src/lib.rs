//! # alphawatch
//!
//! Client library for a live Alpha token price dashboard: token picker,
//! polled price history and a price-range calculator over one REST gateway.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Newtypes, domain models, history buffer, selection control (always available)
//! 2. **HTTP API**: `AlphaHttp` with per-endpoint retry policies
//! 3. **High-Level Client**: `AlphaClient` with nested sub-clients and a token cache
//! 4. **Polling**: `PollingController` with generation-stamped fetches (tokio)
//! 5. **Dashboard**: `Dashboard` tying the pieces together behind a [`gateway::Gateway`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use alphawatch::prelude::*;
//!
//! let config = DashboardConfig::from_env();
//! let mut dashboard = Dashboard::connect(&config)?;
//! dashboard.load_tokens().await;
//! dashboard.select("ALPHA_118");
//! dashboard.set_polling(true);
//!
//! while let Some(update) = dashboard.next_update().await {
//!     for row in dashboard.rows() {
//!         println!("{} {} {}", row.time, row.last, row.trend);
//!     }
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Searchable selection control.
pub mod select;

/// The gateway trait consumed by polling and the dashboard.
pub mod gateway;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `AlphaClient`: the HTTP gateway implementation.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Polling ─────────────────────────────────────────────────────────

/// Polling controller and session parameters.
#[cfg(feature = "poll")]
pub mod poll;

// ── Layer 5: Dashboard ───────────────────────────────────────────────────────

/// Dashboard configuration.
#[cfg(feature = "poll")]
pub mod config;

/// `Dashboard`: the coordinator.
#[cfg(feature = "poll")]
pub mod dashboard;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::AlphaId;

    // Domain types
    pub use crate::domain::calc::{Calculator, RangeField, RangeInputs, RangeRequest, RangeResult};
    pub use crate::domain::price::{HistoryBuffer, Observation, PriceRow, Trend};
    pub use crate::domain::token::Token;

    // Selection control
    pub use crate::select::{Candidate, Commit, Key, KeyOutcome, SearchableSelect};

    // Errors
    pub use crate::error::{HttpError, PollError, SdkError};

    // Gateway
    pub use crate::gateway::Gateway;

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AlphaClient, AlphaClientBuilder, CalcClient, PricesClient, TokensClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // Polling + dashboard
    #[cfg(feature = "poll")]
    pub use crate::config::DashboardConfig;
    #[cfg(feature = "poll")]
    pub use crate::dashboard::{Dashboard, DashboardUpdate};
    #[cfg(feature = "poll")]
    pub use crate::poll::{Frequency, Generation, PollEvent, PollUpdate, PollingController, Session};
}
