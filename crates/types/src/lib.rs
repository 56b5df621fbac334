//! Shared plain data types for the chipline workspace.
//!
//! Everything here is passive data exchanged between the core state machine
//! and its embedders: classified key events, geometry snapshots, panel
//! placement decisions, and the effect list the controller hands back from
//! each entry point. Behavior lives in `chipline-core`.

use serde::{Deserialize, Serialize};

/// Classified key identity as reported by the embedding layer.
///
/// The embedder owns platform key capture and translates whatever raw events
/// it receives into this small set before calling into the core. Plain
/// character input is not classified; it arrives as whole-text change events
/// instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPress {
    /// Submit action (IME "done", keypad enter), distinct from a typed newline
    Enter,
    ArrowUp,
    ArrowDown,
    Escape,
    Backspace,
    Tab,
}

/// Press phase of a key event. The core acts on `Down` only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A classified key event with its press phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub press: KeyPress,
    pub phase: KeyPhase,
}

impl KeyInput {
    /// Convenience constructor for a key-down event.
    pub fn down(press: KeyPress) -> Self {
        Self {
            press,
            phase: KeyPhase::Down,
        }
    }
}

/// Two-dimensional extent in the embedder's layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Geometry snapshot for the anchor (value box) region.
///
/// The core never queries platform layout itself; the embedder pushes one of
/// these on every anchor or viewport geometry change. `space_above` and
/// `space_below` measure the free viewport space on each side of the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionGeometry {
    pub size: Size,
    pub space_above: f32,
    pub space_below: f32,
}

/// Which side of the anchor the suggestion panel opens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelDirection {
    Above,
    Below,
}

/// Derived placement for the floating suggestion panel.
///
/// Purely a function of the most recent geometry snapshot; recomputed on
/// every geometry change and never treated as authoritative state.
///
/// `offset` is a vertical translation from the anchor's top edge, positive
/// downward: `anchor.height` when placed below (panel top flush with the
/// anchor bottom), `-max_height` when placed above (panel bottom flush with
/// the anchor top).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementDecision {
    pub direction: PanelDirection,
    pub max_height: f32,
    pub offset: f32,
}

/// Monotonically increasing identity for one external suggestion query.
///
/// When an external suggestion source is configured, each refresh is tagged
/// with a fresh token; a result carrying anything but the latest token is
/// stale and gets discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryToken(pub u64);

impl QueryToken {
    /// Returns the next token in sequence.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Side effects a controller entry point asks its embedder to perform.
///
/// Every entry point on the controller returns a `Vec<Effect>`; the embedder
/// iterates and executes them in order. The core never touches the platform
/// text field, overlay, or event loop directly.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Show the floating suggestion panel
    OpenPanel,
    /// Hide the floating suggestion panel
    ClosePanel,
    /// Repaint the panel contents (highlight moved or list changed)
    RedrawPanel,
    /// Write `text` into the platform text field with the caret at `caret`
    /// (byte index). Issued for selection echo and post-commit clearing; the
    /// text-change event this write provokes must be reported back through
    /// `on_text_changed` like any other.
    SyncText { text: String, caret: usize },
    /// The anchor moved or the list changed shape; re-read geometry and call
    /// `on_geometry_changed` so placement can be recomputed.
    PlacementInvalidated,
    /// Dispatch `query` to the configured external suggestion source and
    /// deliver the outcome via `apply_external_suggestions` with this token.
    FetchSuggestions { query: String, token: QueryToken },
}
