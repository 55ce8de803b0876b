//! Keyboard and dropdown state machine for the search input surface.
//!
//! Pure view-adapter logic: events go in, actions come out, and the caller
//! (the rendering layer) performs navigation, click tracking and focus
//! changes. The machine never touches the orchestrator directly.

use crate::orchestrator::SearchState;

/// Display phase of the search surface, derived from a session snapshot
/// plus the dropdown's open flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    /// Dropdown open, nothing to show yet.
    Typing,
    Loading,
    ShowingResults,
    ShowingSuggestions,
    /// Query executed successfully with zero matches. Distinct from
    /// `Loading`: the UI renders a "no results" state, not a spinner.
    ShowingEmpty,
}

/// Events delivered by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Any keystroke that edits the query text.
    Keystroke,
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    /// Document-level pointer press outside the dropdown.
    OutsideClick,
}

/// What the rendering layer must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Navigate to a selected result, tracking the click first.
    Navigate { url: String, click: ClickThrough },
    /// Replace the query text with the selected suggestion.
    AdoptSuggestion(String),
    /// Navigate to the catch-all search route for the raw query.
    SearchAll { url: String },
    /// Close the dropdown and blur the input; query text is kept.
    CloseAndBlur,
    /// Close the dropdown; all other state is kept.
    Close,
}

/// Click-through payload for [`InputAction::Navigate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickThrough {
    pub result_id: String,
    /// 0-based position in the result list.
    pub position: usize,
}

/// Dropdown open flag plus the keyboard selection index over the
/// concatenation of [results, suggestions]. `None` is "nothing selected".
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    open: bool,
    selection: Option<usize>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Derive the display phase for rendering.
    pub fn phase(&self, state: &SearchState) -> SearchPhase {
        if !self.open {
            return SearchPhase::Idle;
        }
        if state.loading {
            return SearchPhase::Loading;
        }
        if !state.results.is_empty() {
            return SearchPhase::ShowingResults;
        }
        if !state.suggestions.is_empty() {
            return SearchPhase::ShowingSuggestions;
        }
        if !state.query.trim().is_empty() {
            return SearchPhase::ShowingEmpty;
        }
        SearchPhase::Typing
    }

    /// Feed one event through the machine.
    pub fn on_event(&mut self, event: InputEvent, state: &SearchState) -> InputAction {
        match event {
            InputEvent::Keystroke => {
                self.open = true;
                self.selection = None;
                InputAction::None
            }
            InputEvent::ArrowDown => {
                self.step_selection(state, 1);
                InputAction::None
            }
            InputEvent::ArrowUp => {
                self.step_selection(state, -1);
                InputAction::None
            }
            InputEvent::Enter => self.activate(state),
            InputEvent::Escape => {
                self.open = false;
                self.selection = None;
                InputAction::CloseAndBlur
            }
            InputEvent::OutsideClick => {
                self.open = false;
                InputAction::Close
            }
        }
    }

    /// Cycle the selection through results then suggestions, wrapping at
    /// both ends.
    fn step_selection(&mut self, state: &SearchState, direction: i32) {
        let total = state.results.len() + state.suggestions.len();
        if total == 0 {
            self.selection = None;
            return;
        }
        self.selection = Some(match (self.selection, direction) {
            (None, d) if d > 0 => 0,
            (None, _) => total - 1,
            (Some(i), d) if d > 0 => (i + 1) % total,
            (Some(0), _) => total - 1,
            (Some(i), _) => i - 1,
        });
    }

    fn activate(&mut self, state: &SearchState) -> InputAction {
        match self.selection {
            Some(i) if i < state.results.len() => {
                let result = &state.results[i];
                self.open = false;
                InputAction::Navigate {
                    url: result.url.clone(),
                    click: ClickThrough {
                        result_id: result.id.clone(),
                        position: i,
                    },
                }
            }
            Some(i) => {
                let suggestion_idx = i - state.results.len();
                match state.suggestions.get(suggestion_idx) {
                    Some(suggestion) => {
                        self.selection = None;
                        InputAction::AdoptSuggestion(suggestion.clone())
                    }
                    None => InputAction::None,
                }
            }
            None if !state.query.trim().is_empty() => {
                self.open = false;
                InputAction::SearchAll {
                    url: format!("/search?q={}", urlencoding::encode(state.query.trim())),
                }
            }
            None => InputAction::None,
        }
    }
}
