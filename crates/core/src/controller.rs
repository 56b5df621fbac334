//! The autocomplete controller: the one unit external UI code talks to.
//!
//! Composes the value store, suggestion engine, selection cursor, commit
//! policy, and placement function. Every entry point executes synchronously
//! to completion and returns the effects the embedder should perform, in
//! order. The controller holds no locks; an embedder that shares one
//! controller between event sources is responsible for serializing calls.

use std::fmt;

use tracing::{debug, warn};

use chipline_types::{Effect, KeyInput, PlacementDecision, QueryToken, RegionGeometry};

use crate::config::AutocompleteConfig;
use crate::cursor::SelectionCursor;
use crate::placement;
use crate::policy::{self, KeyAction, TextChangeAction};
use crate::store::{ListenerId, ValueStore};
use crate::suggest::{SuggestionEngine, default_matcher};

/// Orchestrator for one chip input instance.
///
/// Raw-text commits construct values through `From<String>` unless a custom
/// constructor is configured; custom value types either implement
/// `From<String>` or supply [`AutocompleteConfig::value_from_text`].
pub struct AutocompleteController<T> {
    config: AutocompleteConfig<T>,
    store: ValueStore<T>,
    cursor: SelectionCursor,
    /// Current candidate list; for pool sources this always excludes
    /// committed values, for external sources it is whatever the source
    /// last delivered
    suggestions: Vec<T>,
    panel_open: bool,
    /// Mirror of the platform text field contents
    text: String,
    /// Exact string of an unobserved programmatic field write
    pending_echo: Option<String>,
    /// Token of the most recently issued external query
    latest_query: QueryToken,
    placement: Option<PlacementDecision>,
}

impl<T> AutocompleteController<T>
where
    T: Clone + PartialEq + fmt::Display + From<String>,
{
    pub fn new(mut config: AutocompleteConfig<T>) -> Self {
        let initial = std::mem::take(&mut config.initial_values);
        Self {
            config,
            store: ValueStore::new(initial),
            cursor: SelectionCursor::new(),
            suggestions: Vec::new(),
            panel_open: false,
            text: String::new(),
            pending_echo: None,
            latest_query: QueryToken::default(),
            placement: None,
        }
    }

    // ===== SELECTORS =====

    /// Committed values, in insertion order.
    pub fn values(&self) -> &[T] {
        self.store.items()
    }

    /// Current suggestion list for rendering.
    pub fn suggestions(&self) -> &[T] {
        &self.suggestions
    }

    /// Highlighted suggestion index, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// The controller's mirror of the text field contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Most recent placement decision, once geometry has been reported.
    pub fn placement(&self) -> Option<PlacementDecision> {
        self.placement
    }

    // ===== SUBSCRIPTIONS =====

    /// Subscribe to committed-value changes; fires once per store mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[T]) + 'static) -> ListenerId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.store.unsubscribe(id)
    }

    // ===== ENTRY POINTS =====

    /// Report the new full text of the field after any change, programmatic
    /// writes included.
    pub fn on_text_changed(&mut self, text: &str) -> Vec<Effect> {
        let action = policy::classify_text_change(text, self.pending_echo.as_deref(), &self.config.delimiters);
        match action {
            TextChangeAction::SwallowEcho => {
                self.pending_echo = None;
                self.text = text.to_string();
                Vec::new()
            }
            TextChangeAction::Cleared => {
                self.pending_echo = None;
                self.text.clear();
                self.suggestions.clear();
                self.cursor.reset();
                // An in-flight fetch for the erased query is now stale.
                self.latest_query = self.latest_query.next();
                self.close_panel_effects()
            }
            TextChangeAction::CommitDelimited { stripped } => {
                self.pending_echo = None;
                self.text = text.to_string();
                self.commit_delimited(&stripped)
            }
            TextChangeAction::Refresh => {
                self.pending_echo = None;
                self.text = text.to_string();
                self.refresh_suggestions()
            }
        }
    }

    /// Feed a classified key event. Key-up phases are ignored.
    pub fn on_key(&mut self, key: KeyInput) -> Vec<Effect> {
        let action = policy::classify_key(
            key,
            self.panel_open,
            self.cursor.selected().is_some(),
            self.text.is_empty(),
        );
        match action {
            KeyAction::CommitSuggestion => self.commit_suggestion(),
            KeyAction::CommitText => self.commit_text(),
            KeyAction::MoveDown => {
                self.cursor.move_down(self.suggestions.len());
                self.echo_highlighted()
            }
            KeyAction::MoveUp => {
                self.cursor.move_up(self.suggestions.len());
                self.echo_highlighted()
            }
            KeyAction::CancelHighlight => {
                self.cursor.cancel();
                vec![Effect::RedrawPanel]
            }
            KeyAction::ClosePanel => {
                self.cursor.reset();
                self.close_panel_effects()
            }
            KeyAction::RemoveLastValue => {
                if self.store.remove_last().is_some() {
                    vec![Effect::PlacementInvalidated]
                } else {
                    Vec::new()
                }
            }
            KeyAction::Noop => Vec::new(),
        }
    }

    /// Report fresh anchor/viewport geometry; placement is recomputed, never
    /// carried over.
    pub fn on_geometry_changed(&mut self, anchor: RegionGeometry) -> Vec<Effect> {
        self.placement = Some(placement::decide(
            anchor,
            self.config.min_panel_height,
            self.config.forced_direction,
        ));
        if self.panel_open {
            vec![Effect::RedrawPanel]
        } else {
            Vec::new()
        }
    }

    /// A pointer tap on the suggestion at `index`.
    ///
    /// The index comes from a rendered row, so out-of-range is a wiring bug:
    /// asserted in debug builds, logged and ignored in release.
    pub fn on_suggestion_tapped(&mut self, index: usize) -> Vec<Effect> {
        let Some(value) = self.suggestions.get(index).cloned() else {
            debug_assert!(false, "suggestion tap index {index} out of range");
            warn!(index, len = self.suggestions.len(), "ignoring out-of-range suggestion tap");
            return Vec::new();
        };
        self.commit(Some(value))
    }

    /// A pointer tap on the delete affordance of the chip at `index`.
    pub fn on_chip_delete_tapped(&mut self, index: usize) -> Vec<Effect> {
        match self.store.remove_at(index) {
            Ok(_) => vec![Effect::PlacementInvalidated],
            Err(err) => {
                debug_assert!(false, "chip delete index out of range: {err}");
                warn!(%err, "ignoring out-of-range chip delete");
                Vec::new()
            }
        }
    }

    /// The embedder reports the field lost focus.
    pub fn on_focus_lost(&mut self) -> Vec<Effect> {
        if self.config.auto_hide_on_focus_loss && self.panel_open {
            self.cursor.reset();
            self.close_panel_effects()
        } else {
            Vec::new()
        }
    }

    /// Deliver the outcome of an external suggestion fetch.
    ///
    /// The list is applied as-is (no committed-value filtering; see
    /// `chipline_core::suggest`). A result tagged with anything but the
    /// latest issued token is stale and is dropped silently.
    pub fn apply_external_suggestions(&mut self, token: QueryToken, items: Vec<T>) -> Vec<Effect> {
        if token != self.latest_query {
            debug!(?token, latest = ?self.latest_query, "discarding stale suggestion result");
            return Vec::new();
        }
        self.suggestions = items;
        self.cursor.reset();
        self.panel_transition()
    }

    // ===== INTERNALS =====

    fn matcher(&self) -> &dyn Fn(&str, &T) -> bool {
        match &self.config.matcher {
            Some(custom) => custom.as_ref(),
            None => &default_matcher,
        }
    }

    /// Recompute the suggestion list after a real edit.
    fn refresh_suggestions(&mut self) -> Vec<Effect> {
        self.cursor.reset();
        if self.config.external_source {
            self.suggestions.clear();
            self.latest_query = self.latest_query.next();
            let mut effects = self.close_panel_effects();
            effects.push(Effect::FetchSuggestions {
                query: self.text.clone(),
                token: self.latest_query,
            });
            return effects;
        }
        self.suggestions =
            SuggestionEngine::compute(&self.text, &self.config.source_pool, self.store.items(), self.matcher());
        self.panel_transition()
    }

    /// Open or close the panel to match the current suggestion list.
    fn panel_transition(&mut self) -> Vec<Effect> {
        if self.suggestions.is_empty() {
            return self.close_panel_effects();
        }
        if self.panel_open {
            vec![Effect::RedrawPanel, Effect::PlacementInvalidated]
        } else {
            self.panel_open = true;
            vec![Effect::OpenPanel, Effect::PlacementInvalidated]
        }
    }

    fn close_panel_effects(&mut self) -> Vec<Effect> {
        if self.panel_open {
            self.panel_open = false;
            vec![Effect::ClosePanel]
        } else {
            Vec::new()
        }
    }

    /// Write the highlighted suggestion's display string into the field with
    /// the caret at end-of-text, flagged so the resulting text-change event
    /// is swallowed instead of recomputing suggestions.
    fn echo_highlighted(&mut self) -> Vec<Effect> {
        let Some(index) = self.cursor.selected() else {
            return vec![Effect::RedrawPanel];
        };
        let Some(candidate) = self.suggestions.get(index) else {
            debug_assert!(false, "highlight index {index} out of range");
            return vec![Effect::RedrawPanel];
        };
        let display = candidate.to_string();
        self.text = display.clone();
        self.pending_echo = Some(display.clone());
        let caret = display.len();
        vec![Effect::SyncText { text: display, caret }, Effect::RedrawPanel]
    }

    /// Commit from the open panel: the highlighted suggestion, or the top
    /// one when nothing is highlighted yet.
    fn commit_suggestion(&mut self) -> Vec<Effect> {
        let index = self.cursor.selected().unwrap_or(0);
        let value = self.suggestions.get(index).cloned();
        if value.is_none() {
            debug_assert!(false, "panel open with no suggestion at {index}");
            warn!(index, "committing nothing: panel open with empty suggestion list");
        }
        self.commit(value)
    }

    /// Enter-style commit of the raw text buffer. Whitespace-only text is a
    /// complete no-op.
    fn commit_text(&mut self) -> Vec<Effect> {
        if self.text.trim().is_empty() {
            return Vec::new();
        }
        let value = match &self.config.value_from_text {
            Some(ctor) => ctor(&self.text),
            None => T::from(self.text.trim().to_string()),
        };
        self.commit(Some(value))
    }

    /// Delimiter-typed commit. The field clears and the panel closes even
    /// when the delimited text is blank; only the add is skipped then.
    fn commit_delimited(&mut self, stripped: &str) -> Vec<Effect> {
        if stripped.trim().is_empty() {
            return self.commit(None);
        }
        let value = match &self.config.value_from_text {
            Some(ctor) => ctor(&self.text),
            None => T::from(stripped.trim().to_string()),
        };
        self.commit(Some(value))
    }

    /// The atomic commit sequence: close panel, store the value, clear the
    /// text buffer, reset the cursor. Observers see exactly one store
    /// notification, and only when a value was actually added.
    fn commit(&mut self, value: Option<T>) -> Vec<Effect> {
        let mut effects = self.close_panel_effects();
        self.suggestions.clear();
        self.cursor.reset();
        self.text.clear();
        // An in-flight fetch for the pre-commit query is now stale.
        self.latest_query = self.latest_query.next();
        // The field write below echoes back as an empty text change.
        self.pending_echo = Some(String::new());
        if let Some(value) = value {
            self.store.add(value);
        }
        effects.push(Effect::SyncText {
            text: String::new(),
            caret: 0,
        });
        effects.push(Effect::PlacementInvalidated);
        effects
    }
}
