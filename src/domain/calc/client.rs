//! Calc sub-client: price range computation.

use crate::client::AlphaClient;
use crate::domain::calc::{RangeRequest, RangeResult};
use crate::error::SdkError;

/// Sub-client for range calculations.
pub struct Calc<'a> {
    pub(crate) client: &'a AlphaClient,
}

impl<'a> Calc<'a> {
    /// Single attempt; the request is validated before it is sent.
    pub async fn price_range(&self, request: &RangeRequest) -> Result<RangeResult, SdkError> {
        request.validate()?;
        Ok(self.client.http.compute_range(request).await?)
    }
}
