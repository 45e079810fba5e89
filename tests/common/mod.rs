//! Scripted in-process gateway shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use alphawatch::domain::calc::{RangeRequest, RangeResult};
use alphawatch::domain::price::Observation;
use alphawatch::domain::token::Token;
use alphawatch::error::{HttpError, SdkError};
use alphawatch::gateway::Gateway;
use alphawatch::shared::AlphaId;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn observation(symbol: &str, price: &str, timestamp_millis: i64) -> Observation {
    Observation {
        symbol: symbol.to_string(),
        price_now: dec(price),
        price_avg: dec(price),
        price_vwap: dec(price),
        timestamp_millis,
    }
}

/// How one target answers price lookups.
#[derive(Clone)]
struct Script {
    symbol: String,
    delay: Duration,
    /// Zero-based call indices that fail with a 502.
    failing_calls: Vec<usize>,
}

#[derive(Default)]
pub struct MockGateway {
    scripts: Mutex<HashMap<String, Script>>,
    price_calls: Mutex<Vec<String>>,
    calc_calls: AtomicUsize,
    calc_failure: Mutex<Option<String>>,
    tokens: Mutex<Option<Vec<Token>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups for `target` with `symbol` after `delay`.
    pub fn price(self, target: &str, symbol: &str, delay: Duration) -> Self {
        self.scripts.lock().unwrap().insert(
            target.to_string(),
            Script {
                symbol: symbol.to_string(),
                delay,
                failing_calls: Vec::new(),
            },
        );
        self
    }

    /// Fail the given lookups (zero-based, per target) with a 502.
    pub fn failing(self, target: &str, calls: &[usize]) -> Self {
        if let Some(script) = self.scripts.lock().unwrap().get_mut(target) {
            script.failing_calls = calls.to_vec();
        }
        self
    }

    pub fn tokens(self, tokens: Vec<Token>) -> Self {
        *self.tokens.lock().unwrap() = Some(tokens);
        self
    }

    pub fn calc_failure(self, body: &str) -> Self {
        *self.calc_failure.lock().unwrap() = Some(body.to_string());
        self
    }

    pub fn price_calls(&self) -> Vec<String> {
        self.price_calls.lock().unwrap().clone()
    }

    pub fn price_calls_for(&self, target: &str) -> usize {
        self.price_calls().iter().filter(|t| *t == target).count()
    }

    pub fn calc_calls(&self) -> usize {
        self.calc_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_tokens(&self) -> Result<Vec<Token>, SdkError> {
        let tokens = self.tokens.lock().unwrap().clone();
        tokens.ok_or_else(|| {
            HttpError::ServerError {
                status: 502,
                body: "token service unavailable".into(),
            }
            .into()
        })
    }

    async fn get_price(&self, alpha_id: &AlphaId) -> Result<Observation, SdkError> {
        let call = {
            let mut calls = self.price_calls.lock().unwrap();
            let call = calls.iter().filter(|t| *t == alpha_id.as_str()).count();
            calls.push(alpha_id.to_string());
            call
        };
        let script = self.scripts.lock().unwrap().get(alpha_id.as_str()).cloned();
        let Some(script) = script else {
            return Err(HttpError::BadRequest(format!(
                r#"{{"detail":"Unable to resolve symbol from alphaId: {alpha_id}"}}"#
            ))
            .into());
        };

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }

        if script.failing_calls.contains(&call) {
            return Err(HttpError::ServerError {
                status: 502,
                body: "upstream unavailable".into(),
            }
            .into());
        }
        // price encodes the call index so results are distinguishable
        let price = format!("{}.5", call + 1);
        Ok(observation(&script.symbol, &price, 1_700_000_000_000 + call as i64))
    }

    async fn compute_range(&self, request: &RangeRequest) -> Result<RangeResult, SdkError> {
        self.calc_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(body) = self.calc_failure.lock().unwrap().clone() {
            return Err(HttpError::BadRequest(body).into());
        }
        request.validate()?;
        Ok(RangeResult {
            diff_lower: request.waste_lower / request.per_volume * request.price_now,
            diff_upper: request.waste_upper / request.per_volume * request.price_now,
        })
    }
}
