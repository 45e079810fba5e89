//! Searchable selection control: a combobox over a candidate list.
//!
//! The control owns only its open/closed state, the edit buffer and the
//! highlighted row. The committed value belongs to the caller: methods that
//! need it take it as an argument, and committing returns a [`Commit`] for the
//! caller to apply instead of storing anything.

mod filter;

pub use filter::{filter_candidates, Candidate, MAX_VISIBLE_CANDIDATES};

/// Keys the control reacts to. Text edits go through [`SearchableSelect::input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// A candidate chosen by the user. Route `value` to the owner's change handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub value: String,
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The control did not use the key.
    Ignored,
    /// The key changed the control's state (the host should suppress its default action).
    Handled,
    /// The key committed a candidate and closed the control.
    Committed(Commit),
}

impl KeyOutcome {
    pub fn commit(self) -> Option<Commit> {
        match self {
            KeyOutcome::Committed(c) => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchableSelect {
    options: Vec<Candidate>,
    open: bool,
    edit_text: String,
    highlighted: usize,
    disabled: bool,
    placeholder: String,
}

impl SearchableSelect {
    pub fn new(options: Vec<Candidate>) -> Self {
        Self {
            options,
            placeholder: "Select...".to_string(),
            ..Self::default()
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }

    pub fn options(&self) -> &[Candidate] {
        &self.options
    }

    /// Replace the candidate list; the highlight is clamped into the new view.
    pub fn set_options(&mut self, options: Vec<Candidate>) {
        self.options = options;
        self.clamp_highlight();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn edit_text(&self) -> &str {
        &self.edit_text
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    /// Disabling closes an open control.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    /// Label for a committed value, if it is one of the candidates.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label.as_str())
    }

    /// Text shown in the input.
    ///
    /// Open: the edit buffer. Closed: the committed value's label, or the raw
    /// value when it is not a known candidate.
    pub fn display_text<'a>(&'a self, committed: &'a str) -> &'a str {
        if self.open {
            &self.edit_text
        } else {
            self.label_for(committed).unwrap_or(committed)
        }
    }

    /// Candidates matching the edit buffer, capped at [`MAX_VISIBLE_CANDIDATES`].
    pub fn filtered(&self) -> Vec<&Candidate> {
        filter_candidates(&self.options, &self.edit_text)
    }

    pub fn highlighted(&self) -> Option<&Candidate> {
        self.filtered().get(self.highlighted).copied()
    }

    // ── Transitions ──────────────────────────────────────────────────────

    /// Focus gained: open with the edit buffer seeded from the committed label.
    pub fn focus(&mut self, committed: &str) {
        if self.disabled || self.open {
            return;
        }
        let seed = self.display_text(committed).to_string();
        self.open_with(seed);
    }

    /// An edit keystroke: the buffer becomes `text` and the control opens.
    pub fn input(&mut self, text: impl Into<String>) {
        if self.disabled {
            return;
        }
        self.open_with(text.into());
    }

    /// Keyboard navigation. Closed controls open on ArrowDown or Enter.
    pub fn handle_key(&mut self, key: Key, committed: &str) -> KeyOutcome {
        if self.disabled {
            return KeyOutcome::Ignored;
        }
        if !self.open {
            return match key {
                Key::ArrowDown | Key::Enter => {
                    self.focus(committed);
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            };
        }
        match key {
            Key::ArrowDown => {
                let last = self.filtered().len().saturating_sub(1);
                self.highlighted = (self.highlighted + 1).min(last);
                KeyOutcome::Handled
            }
            Key::ArrowUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                KeyOutcome::Handled
            }
            Key::Enter => match self.pick(self.highlighted) {
                Some(commit) => KeyOutcome::Committed(commit),
                None => KeyOutcome::Handled,
            },
            Key::Escape => {
                self.close();
                KeyOutcome::Handled
            }
        }
    }

    /// Pointer hover over a row of the filtered view.
    pub fn hover(&mut self, index: usize) {
        if self.open && index < self.filtered().len() {
            self.highlighted = index;
        }
    }

    /// Commit row `index` of the filtered view and close.
    pub fn pick(&mut self, index: usize) -> Option<Commit> {
        if self.disabled || !self.open {
            return None;
        }
        let value = self.filtered().get(index)?.value.clone();
        self.close();
        Some(Commit { value })
    }

    /// Pointer interaction outside the control: close without committing.
    pub fn click_outside(&mut self) {
        self.close();
    }

    fn open_with(&mut self, text: String) {
        self.edit_text = text;
        self.open = true;
        self.highlighted = 0;
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn clamp_highlight(&mut self) {
        let last = self.filtered().len().saturating_sub(1);
        self.highlighted = self.highlighted.min(last);
    }
}
