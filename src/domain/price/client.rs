//! Prices sub-client: single price snapshot lookups.

use crate::client::AlphaClient;
use crate::domain::price::Observation;
use crate::error::SdkError;

/// Sub-client for price lookups.
pub struct Prices<'a> {
    pub(crate) client: &'a AlphaClient,
}

impl<'a> Prices<'a> {
    /// Latest snapshot for a token id or symbol.
    pub async fn get(&self, alpha_id: &str) -> Result<Observation, SdkError> {
        let resp = self
            .client
            .http
            .get_price(alpha_id, &self.client.price_retry)
            .await?;
        Ok(Observation::try_from(resp)?)
    }
}
