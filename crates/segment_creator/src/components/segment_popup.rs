//! The "Saving Segment" modal.
//!
//! Focus ring: name → rows… → add-select → add-button → cancel → save.
//! Tab / Down move forward, Shift-Tab / Up backward.
//!
//! - name: typed text goes straight into the draft
//! - row: Left/Right cycle through the full catalog, Delete removes the row
//! - add-select: Left/Right cycle through the remaining options, Enter adds
//! - Esc cancels, Ctrl-S submits from anywhere
//!
//! All editing goes through `SegmentEditor`; while a submission is in flight
//! the editor refuses changes and the popup only redraws.

use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tui_input::{backend::crossterm::EventHandler, Input};

use super::{
    popup::{centered_rect_fixed, draw_popup_frame, render_backdrop},
    Component,
};
use crate::{
    action::Action,
    catalog::{self, CATALOG},
    segment::SegmentDraft,
    state::{InputMode, State},
    tui::{EventResponse, Frame},
};

const TITLE: &str = "Saving Segment";
const NAME_PLACEHOLDER: &str = "Enter the Name of the Segment";
const ADD_PLACEHOLDER: &str = "Add schema to segment";
const INTRO: &str = "To save your segment, you need to add the schemas to build the query";
const DIALOG_WIDTH: u16 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Row(usize),
    AddSelect,
    AddButton,
    Cancel,
    Save,
}

impl Focus {
    fn ring(rows: usize) -> Vec<Focus> {
        let mut ring = Vec::with_capacity(rows + 5);
        ring.push(Focus::Name);
        ring.extend((0..rows).map(Focus::Row));
        ring.extend([Focus::AddSelect, Focus::AddButton, Focus::Cancel, Focus::Save]);
        ring
    }

    fn step(self, rows: usize, forward: bool) -> Focus {
        let ring = Focus::ring(rows);
        let current = ring.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (current + 1) % ring.len()
        } else {
            (current + ring.len() - 1) % ring.len()
        };
        ring[next]
    }

    /// Keep a row focus valid after the row count shrank.
    fn clamp(self, rows: usize) -> Focus {
        match self {
            Focus::Row(i) if i >= rows => {
                if rows == 0 {
                    Focus::AddSelect
                } else {
                    Focus::Row(rows - 1)
                }
            }
            other => other,
        }
    }
}

/// Move the pending slot through "nothing" plus the still-available options.
pub fn cycle_pending(draft: &mut SegmentDraft, forward: bool) {
    let options = draft.available_options();
    let len = options.len() + 1;
    let current = draft
        .pending()
        .and_then(|key| options.iter().position(|f| f.key == key))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    match next {
        0 => draft.clear_pending(),
        i => {
            draft.set_pending(options[i - 1].key);
        }
    }
}

/// Move row `index` to the neighbouring catalog entry (wrapping).
pub fn cycle_row(draft: &mut SegmentDraft, index: usize, forward: bool) {
    let Some(current) = draft.selected().get(index).and_then(|k| catalog::index_of(k)) else {
        return;
    };
    let len = CATALOG.len();
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    draft.edit(index, CATALOG[next].key);
}

pub struct SegmentPopup {
    focus: Focus,
    name_input: Input,
}

impl Default for SegmentPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentPopup {
    pub fn new() -> Self {
        Self {
            focus: Focus::Name,
            name_input: Input::default(),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    fn set_focus(&mut self, focus: Focus, state: &mut State) {
        self.focus = focus;
        state.input_mode = if focus == Focus::Name {
            InputMode::Insert
        } else {
            InputMode::Normal
        };
    }

    fn move_focus(&mut self, forward: bool, state: &mut State) {
        let rows = state.editor.draft().selected().len();
        let next = self.focus.step(rows, forward);
        self.set_focus(next, state);
    }

    fn edit_name(&mut self, key: KeyEvent, state: &mut State) {
        let Some(draft) = state.editor.draft_mut() else {
            return;
        };
        self.name_input.handle_event(&CrosstermEvent::Key(key));
        draft.set_name(self.name_input.value());
    }

    fn handle_focused_key(&mut self, key: KeyEvent, state: &mut State) -> Option<Action> {
        match (self.focus, key.code) {
            (Focus::Name, KeyCode::Enter) => {
                self.move_focus(true, state);
                None
            }
            (Focus::Name, _) => {
                self.edit_name(key, state);
                None
            }
            (Focus::Row(i), KeyCode::Left | KeyCode::Right) => {
                if let Some(draft) = state.editor.draft_mut() {
                    cycle_row(draft, i, key.code == KeyCode::Right);
                }
                None
            }
            (Focus::Row(i), KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d')) => {
                if let Some(draft) = state.editor.draft_mut() {
                    draft.remove(i);
                    let rows = draft.selected().len();
                    let focus = self.focus.clamp(rows);
                    self.set_focus(focus, state);
                }
                None
            }
            (Focus::AddSelect, KeyCode::Left | KeyCode::Right) => {
                if let Some(draft) = state.editor.draft_mut() {
                    cycle_pending(draft, key.code == KeyCode::Right);
                }
                None
            }
            (Focus::AddSelect | Focus::AddButton, KeyCode::Enter | KeyCode::Char(' ')) => {
                if let Some(draft) = state.editor.draft_mut() {
                    draft.add_pending();
                }
                None
            }
            (Focus::Cancel, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::CloseEditor),
            (Focus::Save, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::Submit),
            _ => None,
        }
    }

    fn dialog_height(rows: usize) -> u16 {
        // frame 2, name 3, intro 2, rows box, add-select 1, add-button 1,
        // error 2, gap 1, buttons 1, hints 1
        let rows_box = rows.max(1) as u16 + 2;
        2 + 3 + 2 + rows_box + 1 + 1 + 2 + 1 + 1 + 1
    }
}

/// First visible row so that the focused one stays inside a box `height`
/// lines tall.
fn rows_scroll(focus: Focus, height: u16) -> u16 {
    match focus {
        Focus::Row(i) if height > 0 => (i as u16 + 1).saturating_sub(height),
        _ => 0,
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default()
    }
}

impl Component for SegmentPopup {
    fn init(&mut self, _state: &State) -> Result<()> {
        self.focus = Focus::Name;
        self.name_input = Input::default();
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseEditor),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Submit)
            }
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true, state);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false, state);
                None
            }
            _ => self.handle_focused_key(key, state),
        };
        // Modal: nothing behind the popup sees the key.
        Ok(Some(EventResponse::Stop(action.unwrap_or(Action::Update))))
    }

    fn handle_paste(
        &mut self,
        text: String,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if self.focus == Focus::Name {
            if let Some(draft) = state.editor.draft_mut() {
                let value = format!("{}{}", self.name_input.value(), text.replace('\n', " "));
                self.name_input = Input::new(value);
                draft.set_name(self.name_input.value());
            }
        }
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn update(&mut self, action: Action, state: &mut State) -> Result<Option<Action>> {
        if let Action::SubmissionFinished(Err(_)) = action {
            // Draft is unchanged; make sure focus still points at something real.
            let rows = state.editor.draft().selected().len();
            let focus = self.focus.clamp(rows);
            self.set_focus(focus, state);
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        if area.width < 20 || area.height < 10 {
            return Ok(());
        }
        let editor = &state.editor;
        let draft = editor.draft();
        let saving = editor.is_saving();

        render_backdrop(f, area);
        let dialog = centered_rect_fixed(
            area,
            DIALOG_WIDTH,
            Self::dialog_height(draft.selected().len()),
        );
        let inner = draw_popup_frame(f, dialog, TITLE);

        let [name_area, intro_area, rows_area, add_select_area, add_button_area, error_area, _, buttons_area, hints_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        // Name
        let name_focused = self.focus == Focus::Name;
        let name_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if name_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let name_inner = name_block.inner(name_area);
        f.render_widget(name_block, name_area);
        let name_line = if draft.name().is_empty() {
            Line::from(NAME_PLACEHOLDER).fg(Color::DarkGray)
        } else {
            let scroll = self.name_input.visual_scroll(name_inner.width as usize);
            Line::from(
                draft
                    .name()
                    .chars()
                    .skip(scroll)
                    .collect::<String>(),
            )
        };
        f.render_widget(Paragraph::new(name_line), name_inner);
        if name_focused && !saving && name_inner.width > 0 {
            let scroll = self.name_input.visual_scroll(name_inner.width as usize);
            let col = (self.name_input.visual_cursor().saturating_sub(scroll) as u16)
                .min(name_inner.width.saturating_sub(1));
            f.set_cursor_position((name_inner.x + col, name_inner.y));
        }

        f.render_widget(
            Paragraph::new(INTRO).wrap(Wrap { trim: true }),
            intro_area,
        );

        // Selected rows
        let rows_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let rows_inner = rows_block.inner(rows_area);
        f.render_widget(rows_block, rows_area);
        let row_lines: Vec<Line> = if draft.selected().is_empty() {
            vec![Line::from("No schemas added yet").fg(Color::DarkGray)]
        } else {
            draft
                .selected()
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let label = catalog::label_of(key).unwrap_or(*key);
                    let focused = self.focus == Focus::Row(i);
                    Line::from(vec![
                        Span::styled(format!(" ◂ {label:<24} ▸ "), focus_style(focused)),
                        Span::raw("  "),
                        Span::styled("✕", Style::default().fg(Color::Red)),
                    ])
                })
                .collect()
        };
        let scroll = rows_scroll(self.focus, rows_inner.height);
        f.render_widget(
            Paragraph::new(Text::from(row_lines)).scroll((scroll, 0)),
            rows_inner,
        );

        // Pending addition
        let pending_label = draft
            .pending()
            .and_then(catalog::label_of)
            .unwrap_or(ADD_PLACEHOLDER);
        let add_select = Line::from(Span::styled(
            format!(" ◂ {pending_label:<24} ▸ "),
            focus_style(self.focus == Focus::AddSelect),
        ));
        f.render_widget(Paragraph::new(add_select), add_select_area);
        let add_button = Line::from(Span::styled(
            "+ Add new schema",
            focus_style(self.focus == Focus::AddButton)
                .fg(if self.focus == Focus::AddButton {
                    Color::Black
                } else {
                    Color::Cyan
                })
                .add_modifier(Modifier::UNDERLINED),
        ));
        f.render_widget(Paragraph::new(add_button), add_button_area);

        if let Some(error) = editor.error() {
            f.render_widget(
                Paragraph::new(Line::from(error).fg(Color::Red)).wrap(Wrap { trim: true }),
                error_area,
            );
        }

        // Footer buttons
        let disabled = Style::default().fg(Color::DarkGray);
        let button = |label: &str, focus: Focus| {
            let style = if saving {
                disabled
            } else {
                focus_style(self.focus == focus).add_modifier(Modifier::BOLD)
            };
            Span::styled(format!("[ {label} ]"), style)
        };
        let save_label = if saving { "Saving..." } else { "Save the Segment" };
        let buttons = Line::from(vec![
            button("Cancel", Focus::Cancel),
            Span::raw("  "),
            button(save_label, Focus::Save),
        ]);
        f.render_widget(Paragraph::new(buttons), buttons_area);

        let hints = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::White)),
            Span::raw(": Next  "),
            Span::styled("←/→", Style::default().fg(Color::White)),
            Span::raw(": Change  "),
            Span::styled("Del", Style::default().fg(Color::White)),
            Span::raw(": Remove  "),
            Span::styled("Ctrl-S", Style::default().fg(Color::White)),
            Span::raw(": Save  "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Cancel"),
        ])
        .fg(Color::DarkGray);
        f.render_widget(Paragraph::new(hints), hints_area);

        Ok(())
    }
}
