//! Controller configuration surface.

use chipline_types::PanelDirection;

/// Pluggable match predicate: raw query text against one candidate.
pub type MatcherFn<T> = Box<dyn Fn(&str, &T) -> bool>;

/// Pluggable value construction from raw text.
///
/// When configured, it takes precedence over the default trim-and-convert
/// path and receives the full current text of the field (including a typed
/// trailing delimiter, if any).
pub type ValueFromTextFn<T> = Box<dyn Fn(&str) -> T>;

/// Characters that commit the current text when typed last.
pub const DEFAULT_DELIMITERS: [char; 3] = ['\n', ',', '，'];

/// Default threshold below which the panel flips above the anchor.
pub const DEFAULT_MIN_PANEL_HEIGHT: f32 = 100.0;

/// Configuration handed to [`AutocompleteController::new`].
///
/// [`AutocompleteController::new`]: crate::AutocompleteController::new
pub struct AutocompleteConfig<T> {
    /// Candidate pool, in suggestion order. Ignored when `external_source`.
    pub source_pool: Vec<T>,
    /// Values committed before the controller existed (e.g. a saved draft)
    pub initial_values: Vec<T>,
    /// Custom match predicate; `None` uses the default case-insensitive
    /// substring matcher
    pub matcher: Option<MatcherFn<T>>,
    /// Custom value constructor for raw-text commits
    pub value_from_text: Option<ValueFromTextFn<T>>,
    /// Suggestions come from an external (possibly async) source instead of
    /// the pool; refreshes emit fetch effects and filtering is bypassed
    pub external_source: bool,
    /// Threshold for the below-the-anchor placement rule
    pub min_panel_height: f32,
    /// Pin the panel to one side, skipping measurement
    pub forced_direction: Option<PanelDirection>,
    /// Close the panel when the embedder reports focus loss
    pub auto_hide_on_focus_loss: bool,
    /// Commit delimiters checked against the last typed character
    pub delimiters: Vec<char>,
}

impl<T> AutocompleteConfig<T> {
    pub fn new(source_pool: Vec<T>) -> Self {
        Self {
            source_pool,
            initial_values: Vec::new(),
            matcher: None,
            value_from_text: None,
            external_source: false,
            min_panel_height: DEFAULT_MIN_PANEL_HEIGHT,
            forced_direction: None,
            auto_hide_on_focus_loss: true,
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }

    /// Configure an external suggestion source; the pool is not consulted.
    pub fn external() -> Self {
        let mut config = Self::new(Vec::new());
        config.external_source = true;
        config
    }

    pub fn with_initial_values(mut self, values: Vec<T>) -> Self {
        self.initial_values = values;
        self
    }

    pub fn with_matcher(mut self, matcher: impl Fn(&str, &T) -> bool + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    pub fn with_value_from_text(mut self, ctor: impl Fn(&str) -> T + 'static) -> Self {
        self.value_from_text = Some(Box::new(ctor));
        self
    }

    pub fn with_min_panel_height(mut self, height: f32) -> Self {
        self.min_panel_height = height;
        self
    }

    pub fn with_forced_direction(mut self, direction: PanelDirection) -> Self {
        self.forced_direction = Some(direction);
        self
    }

    pub fn with_auto_hide_on_focus_loss(mut self, auto_hide: bool) -> Self {
        self.auto_hide_on_focus_loss = auto_hide;
        self
    }

    pub fn with_delimiters(mut self, delimiters: Vec<char>) -> Self {
        self.delimiters = delimiters;
        self
    }
}
