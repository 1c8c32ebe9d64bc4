use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::{
    action::Action,
    state::State,
    tui::{EventResponse, Frame},
};

/// Page behind the modal: a single "Save segment" control plus a status line.
#[derive(Default)]
pub struct LauncherPage;

impl LauncherPage {
    pub fn new() -> Self {
        Self
    }
}

impl Component for LauncherPage {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &mut State,
    ) -> Result<Option<EventResponse<Action>>> {
        if state.editor.is_open() {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => Some(Action::OpenEditor),
            _ => None,
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn update(&mut self, action: Action, state: &mut State) -> Result<Option<Action>> {
        if action == Action::OpenEditor {
            state.notice = None;
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &State) -> Result<()> {
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [button_area, notice_area] = Layout::vertical([Constraint::Length(3), Constraint::Length(2)])
            .flex(Flex::Center)
            .areas(body);
        let [button_area] = Layout::horizontal([Constraint::Length(22)])
            .flex(Flex::Center)
            .areas(button_area);

        let button = Paragraph::new(Line::from("Save segment").add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(button, button_area);

        if let Some(notice) = &state.notice {
            let notice = Paragraph::new(Line::from(notice.as_str()).fg(Color::Green))
                .alignment(Alignment::Center);
            f.render_widget(notice, notice_area);
        }

        let hints = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": Save segment   "),
            Span::styled("q", Style::default().fg(Color::White)),
            Span::raw(": Quit   "),
            Span::raw(format!("→ {}", state.endpoint)),
        ])
        .fg(Color::DarkGray);
        f.render_widget(Paragraph::new(hints), footer);
        Ok(())
    }
}
