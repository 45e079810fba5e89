//! Dashboard coordinator: token picker, live price panel and calculator
//! wired to one [`Gateway`].
//!
//! The dashboard owns every piece of view state and is driven from a single
//! task: UI actions call its methods, and the owner loops on
//! [`next_update`](Dashboard::next_update) to fold completed fetches in.

use crate::config::DashboardConfig;
use crate::domain::calc::{Calculator, RangeField};
use crate::domain::price::{HistoryBuffer, Observation, PriceRow};
use crate::domain::token::{self, Token};
use crate::error::PollError;
use crate::gateway::Gateway;
use crate::poll::{Frequency, PollUpdate, PollingController, Session};
use crate::select::{Commit, Key, KeyOutcome, SearchableSelect};
use crate::shared::fmt::time::PLACEHOLDER;
use crate::shared::AlphaId;

use std::sync::Arc;

/// What changed after a fetch was folded in.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardUpdate {
    /// New head observation. `recalculated` is set when auto mode re-ran the calculator.
    Price {
        observation: Observation,
        recalculated: bool,
    },
    /// The latest lookup failed; polling continues.
    Failed(String),
}

pub struct Dashboard {
    gateway: Arc<dyn Gateway>,
    controller: PollingController,
    history: HistoryBuffer,
    latest: Option<Observation>,
    error: Option<String>,
    tokens: Vec<Token>,
    selector: SearchableSelect,
    loading_tokens: bool,
    custom_mode: bool,
    custom_text: String,
    calculator: Calculator,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn Gateway>, config: &DashboardConfig) -> Self {
        let mut controller = PollingController::new(Arc::clone(&gateway));
        controller.configure(Session::new("", config.frequency, config.polling));
        Self {
            gateway,
            controller,
            history: HistoryBuffer::new(config.history_capacity),
            latest: None,
            error: None,
            tokens: Vec::new(),
            selector: SearchableSelect::new(Vec::new())
                .placeholder("Search token (symbol / alphaId)"),
            loading_tokens: false,
            custom_mode: false,
            custom_text: String::new(),
            calculator: Calculator::new(),
        }
    }

    /// Dashboard over an [`AlphaClient`](crate::client::AlphaClient) built from `config`.
    #[cfg(feature = "http")]
    pub fn connect(config: &DashboardConfig) -> Result<Self, crate::error::SdkError> {
        let client = crate::client::AlphaClient::builder()
            .base_url(&config.api_url)
            .build()?;
        Ok(Self::new(Arc::new(client), config))
    }

    // ── Tokens ───────────────────────────────────────────────────────────

    /// Fetch the token listing into the selector. A failure leaves the list empty.
    pub async fn load_tokens(&mut self) {
        self.loading_tokens = true;
        self.sync_selector_disabled();

        self.tokens = match self.gateway.list_tokens().await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load token list");
                Vec::new()
            }
        };
        self.selector.set_options(token::candidates(&self.tokens));

        self.loading_tokens = false;
        self.sync_selector_disabled();
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_loading_tokens(&self) -> bool {
        self.loading_tokens
    }

    // ── Selector ─────────────────────────────────────────────────────────

    pub fn selector(&self) -> &SearchableSelect {
        &self.selector
    }

    /// Text the token input shows right now.
    pub fn selector_text(&self) -> &str {
        self.selector.display_text(self.target().as_str())
    }

    pub fn selector_focus(&mut self) {
        let committed = self.target().as_str().to_string();
        self.selector.focus(&committed);
    }

    pub fn selector_input(&mut self, text: impl Into<String>) {
        self.selector.input(text);
    }

    pub fn selector_key(&mut self, key: Key) -> bool {
        let committed = self.target().as_str().to_string();
        match self.selector.handle_key(key, &committed) {
            KeyOutcome::Committed(commit) => {
                self.apply_commit(commit);
                true
            }
            KeyOutcome::Handled => true,
            KeyOutcome::Ignored => false,
        }
    }

    pub fn selector_hover(&mut self, index: usize) {
        self.selector.hover(index);
    }

    pub fn selector_pick(&mut self, index: usize) {
        if let Some(commit) = self.selector.pick(index) {
            self.apply_commit(commit);
        }
    }

    pub fn selector_click_outside(&mut self) {
        self.selector.click_outside();
    }

    fn apply_commit(&mut self, commit: Commit) {
        self.select(commit.value);
    }

    fn sync_selector_disabled(&mut self) {
        self.selector
            .set_disabled(self.loading_tokens || self.custom_mode);
    }

    // ── Custom target ────────────────────────────────────────────────────

    pub fn is_custom_mode(&self) -> bool {
        self.custom_mode
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    /// Toggle free-text targeting. The selector is disabled while it is on.
    pub fn set_custom_mode(&mut self, on: bool) {
        self.custom_mode = on;
        self.sync_selector_disabled();
        self.select_custom();
    }

    /// Update the typed target (trimmed); selects it when custom mode is on.
    pub fn set_custom_text(&mut self, text: &str) {
        self.custom_text = text.trim().to_string();
        self.select_custom();
    }

    fn select_custom(&mut self) {
        if self.custom_mode && !self.custom_text.is_empty() {
            let target = self.custom_text.clone();
            self.select(target);
        }
    }

    // ── Session ──────────────────────────────────────────────────────────

    pub fn target(&self) -> &AlphaId {
        &self.controller.session().target
    }

    pub fn is_polling(&self) -> bool {
        self.controller.session().enabled
    }

    pub fn frequency(&self) -> Frequency {
        self.controller.session().frequency
    }

    /// Switch target: history and latest price are reset, and fetches issued
    /// before the switch are discarded even when the target is unchanged.
    /// With polling off a single lookup is issued.
    pub fn select(&mut self, target: impl Into<AlphaId>) {
        let target = target.into();
        self.history.clear();
        self.latest = None;
        self.error = None;
        self.calculator.set_price(None);

        let session = Session {
            target,
            ..self.controller.session().clone()
        };
        if !self.controller.configure(session) {
            self.controller.restart();
        }
        if !self.controller.session().is_live() {
            self.controller.fetch_now();
        }
    }

    /// One lookup for the current target. No-op without a target.
    pub fn query(&mut self) -> bool {
        self.controller.fetch_now()
    }

    pub fn set_polling(&mut self, enabled: bool) {
        let session = Session {
            enabled,
            ..self.controller.session().clone()
        };
        self.controller.configure(session);
    }

    pub fn set_frequency(&mut self, seconds: i64) {
        self.set_frequency_to(Frequency::clamped(seconds));
    }

    /// Frequency from raw input text; unparseable input becomes the minimum.
    pub fn set_frequency_text(&mut self, input: &str) {
        self.set_frequency_to(Frequency::parse_lenient(input));
    }

    fn set_frequency_to(&mut self, frequency: Frequency) {
        let session = Session {
            frequency,
            ..self.controller.session().clone()
        };
        self.controller.configure(session);
    }

    /// Whether any lookup is outstanding.
    pub fn is_loading(&self) -> bool {
        self.controller.in_flight() > 0
    }

    // ── Price panel ──────────────────────────────────────────────────────

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.latest.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Empty the history table. The latest price stays on display.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn rows(&self) -> Vec<PriceRow> {
        self.history.rows()
    }

    pub fn placeholders(&self) -> usize {
        self.history.placeholders()
    }

    /// Symbol of the latest observation, or `"—"`.
    pub fn symbol(&self) -> &str {
        self.latest
            .as_ref()
            .map(|o| o.symbol.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER)
    }

    /// Wait for the next current-session fetch and fold it in.
    ///
    /// Stale results are skipped. Pends forever while nothing is in flight
    /// and polling is off, so callers usually race it against UI input.
    pub async fn next_update(&mut self) -> Option<DashboardUpdate> {
        loop {
            let event = self.controller.next_event().await?;
            match self.controller.apply(event, &mut self.history) {
                Ok(update) => return Some(self.fold(update).await),
                Err(PollError::StaleResult { .. }) => continue,
                Err(PollError::FetchFailed(msg)) => return Some(self.fold(PollUpdate::Failed(msg)).await),
            }
        }
    }

    /// Fold in every fetch that has already completed, without waiting.
    pub async fn drain_updates(&mut self) -> Vec<DashboardUpdate> {
        let mut updates = Vec::new();
        while let Some(event) = self.controller.try_next_event() {
            if let Ok(update) = self.controller.apply(event, &mut self.history) {
                updates.push(self.fold(update).await);
            }
        }
        updates
    }

    async fn fold(&mut self, update: PollUpdate) -> DashboardUpdate {
        match update {
            PollUpdate::Observation(observation) => {
                self.error = None;
                self.latest = Some(observation.clone());
                let recalculated = if self.calculator.set_price(Some(observation.price_now)) {
                    self.recalculate().await
                } else {
                    false
                };
                DashboardUpdate::Price {
                    observation,
                    recalculated,
                }
            }
            PollUpdate::Failed(msg) => {
                self.error = Some(msg.clone());
                DashboardUpdate::Failed(msg)
            }
        }
    }

    // ── Calculator ───────────────────────────────────────────────────────

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Update a calculator input, recomputing in auto mode.
    pub async fn set_calc_input(&mut self, field: RangeField, value: impl Into<String>) -> bool {
        if self.calculator.set_input(field, value) {
            self.recalculate().await
        } else {
            false
        }
    }

    pub async fn set_calc_auto(&mut self, auto: bool) -> bool {
        if self.calculator.set_auto(auto) {
            self.recalculate().await
        } else {
            false
        }
    }

    /// Manual "Calculate". Ignored while the calculator is disabled.
    pub async fn calculate(&mut self) -> bool {
        if self.calculator.is_disabled() {
            return false;
        }
        self.recalculate().await
    }

    /// Run one computation against the gateway. Returns `false` when the
    /// inputs did not validate.
    async fn recalculate(&mut self) -> bool {
        let Some(request) = self.calculator.begin() else {
            return false;
        };
        let outcome = self.gateway.compute_range(&request).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "Price range computation failed");
        }
        self.calculator.finish(outcome);
        true
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Stop polling and invalidate outstanding fetches.
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    pub fn controller(&self) -> &PollingController {
        &self.controller
    }
}
