//! The gateway seam: the request/response operations the dashboard consumes.
//!
//! `AlphaClient` is the HTTP implementation; anything else that can answer
//! these three calls (a cache, a replay fixture, an in-process service) can
//! drive the polling controller and the dashboard.

use crate::domain::calc::{RangeRequest, RangeResult};
use crate::domain::price::Observation;
use crate::domain::token::Token;
use crate::error::SdkError;
use crate::shared::AlphaId;
use async_trait::async_trait;

/// Price and calculation gateway. Stateless and idempotent from the client's view.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Selectable tokens.
    async fn list_tokens(&self) -> Result<Vec<Token>, SdkError>;

    /// Latest price snapshot for `alpha_id`.
    async fn get_price(&self, alpha_id: &AlphaId) -> Result<Observation, SdkError>;

    /// Price-diff range for the given inputs. No retry.
    async fn compute_range(&self, request: &RangeRequest) -> Result<RangeResult, SdkError>;
}

#[cfg(feature = "http")]
#[async_trait]
impl Gateway for crate::client::AlphaClient {
    async fn list_tokens(&self) -> Result<Vec<Token>, SdkError> {
        self.tokens().list().await
    }

    async fn get_price(&self, alpha_id: &AlphaId) -> Result<Observation, SdkError> {
        self.prices().get(alpha_id.as_str()).await
    }

    async fn compute_range(&self, request: &RangeRequest) -> Result<RangeResult, SdkError> {
        self.calc().price_range(request).await
    }
}
