//! Calculator panel state: app-owned, SDK-provided update logic.

use super::{RangeField, RangeInputs, RangeRequest, RangeResult};
use crate::error::SdkError;
use crate::shared::fmt::{decimal, time::PLACEHOLDER};
use rust_decimal::Decimal;

/// Fallback shown when a failed computation carries no usable message.
pub const COMPUTE_FAILED_FALLBACK: &str = "Compute failed";

/// Calculator panel: inputs, the head price it runs against, and the last result.
///
/// In auto mode every change to the price or an input asks for a recompute;
/// the owner runs the request and reports back through [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct Calculator {
    inputs: RangeInputs,
    auto: bool,
    price_now: Option<Decimal>,
    computing: bool,
    result: Option<RangeResult>,
    error: Option<String>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            inputs: RangeInputs::default(),
            auto: true,
            price_now: None,
            computing: false,
            result: None,
            error: None,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &RangeInputs {
        &self.inputs
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn is_computing(&self) -> bool {
        self.computing
    }

    pub fn price_now(&self) -> Option<Decimal> {
        self.price_now
    }

    pub fn result(&self) -> Option<&RangeResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Manual calculation is unavailable without a positive price or while computing.
    pub fn is_disabled(&self) -> bool {
        match self.price_now {
            Some(p) => p <= Decimal::ZERO || self.computing,
            None => true,
        }
    }

    /// Update the head price. Returns `true` when auto mode wants a recompute.
    pub fn set_price(&mut self, price_now: Option<Decimal>) -> bool {
        if self.price_now == price_now {
            return false;
        }
        self.price_now = price_now;
        self.auto && price_now.is_some()
    }

    /// Update one input. Returns `true` when auto mode wants a recompute.
    pub fn set_input(&mut self, field: RangeField, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.inputs.get(field) == value {
            return false;
        }
        self.inputs.set(field, value);
        self.auto && self.price_now.is_some()
    }

    /// Toggle auto mode. Returns `true` when switching on should recompute.
    pub fn set_auto(&mut self, auto: bool) -> bool {
        let turned_on = auto && !self.auto;
        self.auto = auto;
        turned_on && self.price_now.is_some()
    }

    /// Start a computation: validates the inputs and marks the panel busy.
    ///
    /// Returns `None` without a price, or when validation fails (the
    /// validation message becomes the panel error).
    pub fn begin(&mut self) -> Option<RangeRequest> {
        let price_now = self.price_now?;
        self.error = None;
        match RangeRequest::new(price_now, &self.inputs) {
            Ok(request) => {
                self.computing = true;
                Some(request)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    /// Record the outcome of the computation started by [`begin`](Self::begin).
    pub fn finish(&mut self, outcome: Result<RangeResult, SdkError>) {
        self.computing = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                let msg = e.user_message();
                self.error = Some(if msg.is_empty() {
                    COMPUTE_FAILED_FALLBACK.to_string()
                } else {
                    msg
                });
            }
        }
    }

    pub fn display_lower(&self) -> String {
        self.result
            .as_ref()
            .map(|r| decimal::fixed(&r.diff_lower))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn display_upper(&self) -> String {
        self.result
            .as_ref()
            .map(|r| decimal::fixed(&r.diff_upper))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}
