//! Input commit policy: classify raw input into actions.
//!
//! Text changes and key presses are classified here as pure functions, and
//! the controller executes the resulting action. Keeping the decision tables
//! free of state makes the whole Idle/SuggestionsOpen machine testable
//! without a controller.

use chipline_types::{KeyInput, KeyPhase, KeyPress};

/// What a whole-text change event should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextChangeAction {
    /// The change is the echo of a programmatic write; clear the echo flag
    /// and do nothing else (no suggestion recompute).
    SwallowEcho,
    /// Text became empty; close the panel and idle.
    Cleared,
    /// A trailing delimiter was typed; commit. `stripped` is the text with
    /// that delimiter removed (not yet trimmed).
    CommitDelimited { stripped: String },
    /// Ordinary edit; recompute suggestions.
    Refresh,
}

/// Classify a text-change event.
///
/// `pending_echo` is the exact string last written programmatically, if the
/// echo has not been observed yet. A change that does not match it byte for
/// byte is treated as a real edit (the user typed between the write and the
/// event).
pub fn classify_text_change(
    new_text: &str,
    pending_echo: Option<&str>,
    delimiters: &[char],
) -> TextChangeAction {
    if pending_echo == Some(new_text) {
        return TextChangeAction::SwallowEcho;
    }
    if new_text.is_empty() {
        return TextChangeAction::Cleared;
    }
    if let Some(last) = new_text.chars().last()
        && delimiters.contains(&last)
    {
        let stripped = new_text[..new_text.len() - last.len_utf8()].to_string();
        return TextChangeAction::CommitDelimited { stripped };
    }
    TextChangeAction::Refresh
}

/// What a classified key press should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Commit from the open panel: the highlighted suggestion, or the top
    /// one when nothing is highlighted.
    CommitSuggestion,
    /// Commit the raw text buffer.
    CommitText,
    MoveDown,
    MoveUp,
    /// Clear the highlight but keep the panel open.
    CancelHighlight,
    ClosePanel,
    /// Backspace on an empty buffer: drop the last committed value.
    RemoveLastValue,
    Noop,
}

/// Classify a key event against the current machine state.
///
/// Only key-down events act; key-up is always a no-op.
pub fn classify_key(key: KeyInput, panel_open: bool, highlighted: bool, text_empty: bool) -> KeyAction {
    if key.phase == KeyPhase::Up {
        return KeyAction::Noop;
    }
    match key.press {
        KeyPress::Enter => {
            // An open panel always has suggestions to commit; raw text
            // commits via Enter only once the panel is closed.
            if panel_open {
                KeyAction::CommitSuggestion
            } else if !text_empty {
                KeyAction::CommitText
            } else {
                KeyAction::Noop
            }
        }
        KeyPress::ArrowDown => {
            if panel_open {
                KeyAction::MoveDown
            } else {
                KeyAction::Noop
            }
        }
        KeyPress::ArrowUp => {
            if panel_open {
                KeyAction::MoveUp
            } else {
                KeyAction::Noop
            }
        }
        KeyPress::Escape => {
            if !panel_open {
                KeyAction::Noop
            } else if highlighted {
                KeyAction::CancelHighlight
            } else {
                KeyAction::ClosePanel
            }
        }
        KeyPress::Backspace => {
            if text_empty {
                KeyAction::RemoveLastValue
            } else {
                KeyAction::Noop
            }
        }
        KeyPress::Tab => {
            if panel_open && highlighted {
                KeyAction::CommitSuggestion
            } else {
                KeyAction::Noop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELIMS: [char; 3] = ['\n', ',', '，'];

    fn down(press: KeyPress) -> KeyInput {
        KeyInput::down(press)
    }

    #[test]
    fn echo_is_swallowed_only_on_exact_match() {
        let action = classify_text_change("Android", Some("Android"), &DELIMS);
        assert_eq!(action, TextChangeAction::SwallowEcho);
        // User typed on top of the echo before the event landed.
        let action = classify_text_change("Androids", Some("Android"), &DELIMS);
        assert_eq!(action, TextChangeAction::Refresh);
    }

    #[test]
    fn empty_text_clears() {
        assert_eq!(classify_text_change("", None, &DELIMS), TextChangeAction::Cleared);
    }

    #[test]
    fn trailing_comma_commits_with_delimiter_stripped() {
        let action = classify_text_change("iOS,", None, &DELIMS);
        assert_eq!(
            action,
            TextChangeAction::CommitDelimited {
                stripped: "iOS".to_string()
            }
        );
    }

    #[test]
    fn full_width_comma_is_a_delimiter() {
        let action = classify_text_change("iOS，", None, &DELIMS);
        assert_eq!(
            action,
            TextChangeAction::CommitDelimited {
                stripped: "iOS".to_string()
            }
        );
    }

    #[test]
    fn newline_is_a_delimiter() {
        let action = classify_text_change("go\n", None, &DELIMS);
        assert_eq!(
            action,
            TextChangeAction::CommitDelimited {
                stripped: "go".to_string()
            }
        );
    }

    #[test]
    fn interior_delimiter_does_not_commit() {
        assert_eq!(classify_text_change("a,b", None, &DELIMS), TextChangeAction::Refresh);
    }

    #[test]
    fn enter_commits_panel_else_text() {
        let key = down(KeyPress::Enter);
        assert_eq!(classify_key(key, true, true, false), KeyAction::CommitSuggestion);
        assert_eq!(classify_key(key, true, false, false), KeyAction::CommitSuggestion);
        assert_eq!(classify_key(key, false, false, false), KeyAction::CommitText);
        assert_eq!(classify_key(key, false, false, true), KeyAction::Noop);
    }

    #[test]
    fn arrows_only_act_when_panel_open() {
        assert_eq!(
            classify_key(down(KeyPress::ArrowDown), false, false, true),
            KeyAction::Noop
        );
        assert_eq!(
            classify_key(down(KeyPress::ArrowDown), true, false, true),
            KeyAction::MoveDown
        );
        assert_eq!(classify_key(down(KeyPress::ArrowUp), true, true, true), KeyAction::MoveUp);
    }

    #[test]
    fn escape_cancels_highlight_before_closing() {
        let key = down(KeyPress::Escape);
        assert_eq!(classify_key(key, true, true, false), KeyAction::CancelHighlight);
        assert_eq!(classify_key(key, true, false, false), KeyAction::ClosePanel);
        assert_eq!(classify_key(key, false, false, false), KeyAction::Noop);
    }

    #[test]
    fn backspace_pops_only_on_empty_text() {
        let key = down(KeyPress::Backspace);
        assert_eq!(classify_key(key, false, false, true), KeyAction::RemoveLastValue);
        assert_eq!(classify_key(key, false, false, false), KeyAction::Noop);
    }

    #[test]
    fn tab_commits_only_from_highlight() {
        let key = down(KeyPress::Tab);
        assert_eq!(classify_key(key, true, true, false), KeyAction::CommitSuggestion);
        assert_eq!(classify_key(key, true, false, false), KeyAction::Noop);
        assert_eq!(classify_key(key, false, false, false), KeyAction::Noop);
    }

    #[test]
    fn key_up_never_acts() {
        let key = KeyInput {
            press: KeyPress::Enter,
            phase: KeyPhase::Up,
        };
        assert_eq!(classify_key(key, true, true, false), KeyAction::Noop);
    }
}
