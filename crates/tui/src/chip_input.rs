//! Chip input component: chips row, editable line, and suggestion popup.
//!
//! A thin consumer of `chipline-core`: it renders the controller's state,
//! translates crossterm events into classified core events, and derives
//! anchor geometry from the layout rectangles each frame. Pointer hits are
//! resolved against rectangles recorded during the previous render.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use chipline_types::{KeyInput, KeyPhase, KeyPress, PanelDirection, RegionGeometry, Size};

use crate::app::App;

/// Most suggestion rows shown at once; the rest scroll with the highlight.
const MAX_POPUP_ROWS: usize = 8;

/// Renders the chip input and resolves pointer hits for it.
#[derive(Debug, Default)]
pub struct ChipInputComponent {
    /// Delete-affordance cells from the last render, with their chip index
    chip_hits: Vec<(Rect, usize)>,
    /// Inner rows of the suggestion popup from the last render
    popup_rows: Option<Rect>,
    /// List scroll state kept across frames; taps map through its offset
    popup_state: ListState,
    input_area: Rect,
}

impl ChipInputComponent {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let splits = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Committed chips
                Constraint::Length(3), // Input line
                Constraint::Min(0),    // Free space the popup can grow into
                Constraint::Length(1), // Hints
            ])
            .split(area);
        self.input_area = splits[1];

        app.sync_geometry(Self::anchor_geometry(splits[1], area));

        self.render_chips(frame, splits[0], app);
        self.render_input(frame, splits[1], app);
        self.render_hints(frame, splits[3]);
        self.render_popup(frame, area, app);
    }

    /// Anchor snapshot for the input box inside the full frame area.
    fn anchor_geometry(input: Rect, area: Rect) -> RegionGeometry {
        let below_start = input.y.saturating_add(input.height);
        RegionGeometry {
            size: Size::new(f32::from(input.width), f32::from(input.height)),
            space_above: f32::from(input.y.saturating_sub(area.y)),
            // Last row is the hints line, not free space.
            space_below: f32::from(area.bottom().saturating_sub(below_start).saturating_sub(1)),
        }
    }

    fn render_chips(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        self.chip_hits.clear();
        let block = Block::default().borders(Borders::ALL).title("Values");
        let inner = block.inner(area);

        let mut spans: Vec<Span<'_>> = Vec::new();
        let mut col = inner.x;
        for (index, value) in app.controller.values().iter().enumerate() {
            let label = format!(" {value} ");
            spans.push(Span::styled(label.clone(), Style::default().reversed()));
            col += label.width() as u16;
            // The ✕ cell is the delete affordance.
            spans.push(Span::styled("✕", Style::default().reversed().bold()));
            if col < inner.right() {
                self.chip_hits.push((Rect::new(col, inner.y, 1, 1), index));
            }
            col += 1;
            spans.push(Span::raw(" "));
            col += 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from(Span::styled("Add value", Style::default().add_modifier(Modifier::BOLD))));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(app.field.text()).block(block), area);

        if app.focus.get() {
            let col = app.field.text()[..app.field.cursor()].width() as u16;
            frame.set_cursor_position((inner.x.saturating_add(col), inner.y));
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled("Hints: ", Style::default().dim()),
            Span::styled("↑/↓", Style::default().bold()),
            Span::styled(" Cycle  ", Style::default().dim()),
            Span::styled("Enter", Style::default().bold()),
            Span::styled(" Accept  ", Style::default().dim()),
            Span::styled("Esc", Style::default().bold()),
            Span::styled(" Cancel  ", Style::default().dim()),
            Span::styled("Bksp", Style::default().bold()),
            Span::styled(" Pop  ", Style::default().dim()),
            Span::styled("Ctrl+C", Style::default().bold()),
            Span::styled(" Done", Style::default().dim()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }

    fn render_popup(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        self.popup_rows = None;
        if !app.controller.is_panel_open() || app.controller.suggestions().is_empty() {
            self.popup_state = ListState::default();
            return;
        }
        let Some(placement) = app.controller.placement() else {
            return;
        };

        let rows = app.controller.suggestions().len().min(MAX_POPUP_ROWS) as u16;
        // Borders take two rows; placement caps the whole panel.
        let height = (rows + 2).min((placement.max_height as u16).max(3));
        let input = self.input_area;
        let y = match placement.direction {
            PanelDirection::Below => input.y.saturating_add(input.height),
            PanelDirection::Above => input.y.saturating_sub(height),
        };
        let popup = Rect::new(input.x, y, input.width, height).intersection(area);

        let items: Vec<ListItem<'_>> = app
            .controller
            .suggestions()
            .iter()
            .map(|s| ListItem::new(s.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Suggestions"))
            .highlight_style(Style::default().reversed().add_modifier(Modifier::BOLD))
            .highlight_symbol("► ");

        self.popup_state.select(app.controller.selected_index());

        frame.render_widget(Clear, popup);
        // The render adjusts the state's offset when the highlight scrolls;
        // keeping the state is what lets taps land on the visible row.
        frame.render_stateful_widget(list, popup, &mut self.popup_state);
        self.popup_rows = Some(Rect::new(
            popup.x + 1,
            popup.y + 1,
            popup.width.saturating_sub(2),
            popup.height.saturating_sub(2),
        ));
    }

    /// Translate a crossterm key event into core calls. Returns `false` when
    /// the event asks to leave the input (Ctrl+C / Ctrl+D).
    pub fn handle_key_event(&self, app: &mut App, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return false;
        }
        let phase = match key.kind {
            KeyEventKind::Release => KeyPhase::Up,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Down,
        };

        match key.code {
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                if phase == KeyPhase::Down {
                    app.field.insert_char(c);
                    app.report_text();
                }
            }
            KeyCode::Backspace => {
                // Character deletion is a local edit; popping the last chip
                // is the core's call once the field is empty.
                if phase == KeyPhase::Down && app.field.backspace() {
                    app.report_text();
                } else {
                    app.dispatch_key(KeyInput {
                        press: KeyPress::Backspace,
                        phase,
                    });
                }
            }
            KeyCode::Left => {
                if phase == KeyPhase::Down {
                    app.field.move_left();
                }
            }
            KeyCode::Right => {
                if phase == KeyPhase::Down {
                    app.field.move_right();
                }
            }
            KeyCode::Enter => app.dispatch_key(KeyInput {
                press: KeyPress::Enter,
                phase,
            }),
            KeyCode::Up => app.dispatch_key(KeyInput {
                press: KeyPress::ArrowUp,
                phase,
            }),
            KeyCode::Down => app.dispatch_key(KeyInput {
                press: KeyPress::ArrowDown,
                phase,
            }),
            KeyCode::Esc => app.dispatch_key(KeyInput {
                press: KeyPress::Escape,
                phase,
            }),
            KeyCode::Tab => app.dispatch_key(KeyInput {
                press: KeyPress::Tab,
                phase,
            }),
            _ => {}
        }
        true
    }

    /// Resolve pointer taps: suggestion rows, chip delete cells, and focus
    /// gain/loss for everything else.
    pub fn handle_mouse_event(&self, app: &mut App, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let at = (mouse.column, mouse.row);

        if let Some(rows) = self.popup_rows
            && contains(rows, at)
        {
            let index = usize::from(mouse.row - rows.y) + self.popup_state.offset();
            let effects = app.controller.on_suggestion_tapped(index);
            app.apply_effects(effects);
            return;
        }
        if let Some((_, index)) = self.chip_hits.iter().find(|(cell, _)| contains(*cell, at)) {
            let effects = app.controller.on_chip_delete_tapped(*index);
            app.apply_effects(effects);
            return;
        }
        if contains(self.input_area, at) {
            app.focus.set(true);
        } else if app.focus.get() {
            app.focus.set(false);
            let effects = app.controller.on_focus_lost();
            app.apply_effects(effects);
        }
    }
}

fn contains(rect: Rect, (x, y): (u16, u16)) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}
