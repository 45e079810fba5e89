//! Tokens sub-client: listing with a TTL cache.

use crate::client::AlphaClient;
use crate::domain::token::Token;
use crate::error::SdkError;
use std::time::Instant;

/// Sub-client for the token listing.
pub struct Tokens<'a> {
    pub(crate) client: &'a AlphaClient,
}

impl<'a> Tokens<'a> {
    /// List selectable tokens. Uses TTL cache.
    pub async fn list(&self) -> Result<Vec<Token>, SdkError> {
        {
            let cache = self.client.token_cache.read().await;
            if let Some((tokens, fetched_at)) = cache.as_ref() {
                if fetched_at.elapsed() < self.client.token_cache_ttl {
                    return Ok(tokens.clone());
                }
            }
        }
        self.refresh().await
    }

    /// Fetch the listing, bypassing and then repopulating the cache.
    pub async fn refresh(&self) -> Result<Vec<Token>, SdkError> {
        let resp = self.client.http.get_tokens().await?;
        let tokens: Vec<Token> = resp.into();
        tracing::debug!(count = tokens.len(), "Fetched token listing");
        *self.client.token_cache.write().await = Some((tokens.clone(), Instant::now()));
        Ok(tokens)
    }

    pub async fn clear_cache(&self) {
        *self.client.token_cache.write().await = None;
    }
}
