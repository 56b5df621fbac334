//! Terminal application state and event loop for the chip input demo.

use std::io;

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use rat_focus::FocusFlag;
use ratatui::layout::Rect;
use tracing::debug;

use chipline_core::{AutocompleteConfig, AutocompleteController};
use chipline_types::{Effect, KeyInput, PanelDirection, RegionGeometry};

use crate::chip_input::ChipInputComponent;
use crate::field::FieldBuffer;

/// Options the binary forwards into the interactive session.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Candidate pool offered as suggestions
    pub pool: Vec<String>,
    /// Values already committed when the session starts
    pub initial_values: Vec<String>,
    /// Pin the suggestion panel to one side
    pub forced_direction: Option<PanelDirection>,
    /// Override the below-placement threshold, in terminal rows
    pub min_panel_height: Option<f32>,
}

/// Top-level state: the core controller plus the embedder-owned pieces the
/// core deliberately does not hold (field buffer, focus, geometry cache).
pub struct App {
    pub controller: AutocompleteController<String>,
    pub field: FieldBuffer,
    pub focus: FocusFlag,
    last_geometry: Option<RegionGeometry>,
}

impl App {
    pub fn new(options: RunOptions) -> Self {
        let mut config = AutocompleteConfig::new(options.pool).with_initial_values(options.initial_values);
        if let Some(direction) = options.forced_direction {
            config = config.with_forced_direction(direction);
        }
        if let Some(height) = options.min_panel_height {
            config = config.with_min_panel_height(height);
        }
        let focus = FocusFlag::named("chipline.input");
        focus.set(true);
        Self {
            controller: AutocompleteController::new(config),
            field: FieldBuffer::new(),
            focus,
            last_geometry: None,
        }
    }

    /// Report the field's current contents to the core.
    pub fn report_text(&mut self) {
        let text = self.field.text().to_string();
        let effects = self.controller.on_text_changed(&text);
        self.apply_effects(effects);
    }

    pub fn dispatch_key(&mut self, key: KeyInput) {
        let effects = self.controller.on_key(key);
        self.apply_effects(effects);
    }

    /// Push a fresh anchor snapshot when it differs from the last one.
    pub fn sync_geometry(&mut self, geometry: RegionGeometry) {
        if self.last_geometry == Some(geometry) {
            return;
        }
        self.last_geometry = Some(geometry);
        let effects = self.controller.on_geometry_changed(geometry);
        self.apply_effects(effects);
    }

    /// Execute the effects an entry point returned, in order.
    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SyncText { text, caret } => {
                    self.field.set(&text, caret);
                    // Mirror the write back like a platform field would; the
                    // core swallows its own echo.
                    let follow = self.controller.on_text_changed(&text);
                    self.apply_effects(follow);
                }
                Effect::FetchSuggestions { query, token } => {
                    // The demo runs on a local pool; no external source wired.
                    debug!(%query, ?token, "ignoring external fetch request");
                }
                // Panel visibility and placement are re-derived every frame.
                Effect::OpenPanel | Effect::ClosePanel | Effect::RedrawPanel | Effect::PlacementInvalidated => {}
            }
        }
    }
}

/// Run the interactive chip input until Ctrl+C / Ctrl+D and return the
/// committed values.
pub fn run(options: RunOptions) -> Result<Vec<String>> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = event_loop(&mut terminal, App::new(options));
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<Vec<String>> {
    let mut component = ChipInputComponent::default();
    loop {
        terminal.draw(|frame| {
            let area: Rect = frame.area();
            component.render(frame, area, &mut app);
        })?;

        match event::read()? {
            Event::Key(key) => {
                if !component.handle_key_event(&mut app, key) {
                    break;
                }
            }
            Event::Mouse(mouse) => component.handle_mouse_event(&mut app, mouse),
            Event::FocusGained => app.focus.set(true),
            Event::FocusLost => {
                app.focus.set(false);
                let effects = app.controller.on_focus_lost();
                app.apply_effects(effects);
            }
            _ => {}
        }
    }
    Ok(app.controller.values().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipline_types::Size;

    fn app_with(pool: &[&str]) -> App {
        App::new(RunOptions {
            pool: pool.iter().map(|s| s.to_string()).collect(),
            ..RunOptions::default()
        })
    }

    #[test]
    fn typed_characters_flow_into_the_core() {
        let mut app = app_with(&["Android", "iOS"]);
        for c in "and".chars() {
            app.field.insert_char(c);
            app.report_text();
        }
        assert_eq!(app.controller.suggestions(), ["Android"]);
        assert!(app.controller.is_panel_open());
    }

    #[test]
    fn sync_text_effect_round_trips_through_the_field() {
        let mut app = app_with(&["Android"]);
        app.field.insert_char('a');
        app.report_text();
        app.dispatch_key(KeyInput::down(chipline_types::KeyPress::ArrowDown));
        // Echo landed in the field and was swallowed by the core.
        assert_eq!(app.field.text(), "Android");
        assert_eq!(app.controller.selected_index(), Some(0));
        assert_eq!(app.controller.suggestions(), ["Android"]);
    }

    #[test]
    fn geometry_is_pushed_only_on_change() {
        let mut app = app_with(&[]);
        let geometry = RegionGeometry {
            size: Size::new(80.0, 3.0),
            space_above: 3.0,
            space_below: 17.0,
        };
        app.sync_geometry(geometry);
        let first = app.controller.placement();
        assert!(first.is_some());
        app.sync_geometry(geometry);
        assert_eq!(app.controller.placement(), first);
    }
}
