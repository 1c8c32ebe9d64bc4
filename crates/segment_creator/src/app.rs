use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{prelude::Rect, Frame};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    components::{launcher::LauncherPage, segment_popup::SegmentPopup, Component},
    config::Config,
    state::{InputMode, State},
    submit::WebhookClient,
    tui::{Event, EventResponse, Tui},
};

pub struct App {
    pub config: Config,
    pub page: LauncherPage,
    pub popup: Option<SegmentPopup>,
    pub client: WebhookClient,
    pub should_quit: bool,
    pub should_suspend: bool,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub state: State,
}

impl App {
    pub fn new(config: Config, tick_rate: f64, frame_rate: f64) -> Self {
        let client = WebhookClient::new(config.endpoint.clone());
        let state = State::new(config.endpoint.clone());
        Self {
            config,
            page: LauncherPage::new(),
            popup: None,
            client,
            should_quit: false,
            should_suspend: false,
            tick_rate,
            frame_rate,
            state,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .paste(true);
        tui.enter()?;

        self.page.init(&self.state)?;
        info!(endpoint = %self.config.endpoint, "segment creator started");

        loop {
            if let Some(e) = tui.next_event().await {
                self.handle_event(e, &action_tx)?;
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.draw(&mut tui, &action_tx)?;
                    }
                    Action::Render => self.draw(&mut tui, &action_tx)?,
                    _ => {}
                }
                self.dispatch(action, &action_tx)?;
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate)
                    .paste(true);
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, e: Event, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match &e {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(*x, *y))?,
            Event::Key(key) => {
                if let Some(action) = self.global_key(*key) {
                    action_tx.send(action)?;
                    return Ok(());
                }
            }
            _ => {}
        }

        // The popup is modal: it sees events first and stops propagation.
        let mut stop_event_propagation = false;
        if let Some(popup) = self.popup.as_mut() {
            match popup.handle_events(e.clone(), &mut self.state)? {
                Some(EventResponse::Stop(action)) => {
                    action_tx.send(action)?;
                    stop_event_propagation = true;
                }
                Some(EventResponse::Continue(action)) => action_tx.send(action)?,
                None => {}
            }
        }
        if !stop_event_propagation {
            match self.page.handle_events(e, &mut self.state)? {
                Some(EventResponse::Stop(action)) | Some(EventResponse::Continue(action)) => {
                    action_tx.send(action)?
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Keys handled before any component sees them.
    fn global_key(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Some(Action::Quit),
            KeyCode::Char('z') if ctrl => Some(Action::Suspend),
            KeyCode::Char('q')
                if self.popup.is_none() && self.state.input_mode == InputMode::Normal =>
            {
                Some(Action::Quit)
            }
            _ => None,
        }
    }

    /// Apply one action to the app and forward it to the components.
    pub fn dispatch(&mut self, action: Action, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match &action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Error(message) => error!("{message}"),
            Action::OpenEditor => {
                self.state.editor.open();
                let mut popup = SegmentPopup::new();
                popup.init(&self.state)?;
                self.popup = Some(popup);
                self.state.input_mode = InputMode::Insert;
            }
            Action::CloseEditor => {
                if self.state.editor.cancel() {
                    self.close_popup();
                }
            }
            Action::Submit => {
                if let Some(payload) = self.state.editor.begin_submit() {
                    let client = self.client.clone();
                    let tx = action_tx.clone();
                    tokio::spawn(async move {
                        let result = client.submit(&payload).await;
                        let _ = tx.send(Action::SubmissionFinished(result));
                    });
                }
            }
            Action::SubmissionFinished(result) => {
                self.state.editor.finish_submit(result.clone());
                if result.is_ok() {
                    self.state.notice = Some("Segment saved.".to_string());
                }
                if !self.state.editor.is_open() {
                    self.close_popup();
                }
            }
            _ => {}
        }

        if let Some(popup) = self.popup.as_mut() {
            if let Some(action) = popup.update(action.clone(), &mut self.state)? {
                action_tx.send(action)?;
            }
        }
        if let Some(action) = self.page.update(action, &mut self.state)? {
            action_tx.send(action)?;
        }
        Ok(())
    }

    fn close_popup(&mut self) {
        self.popup = None;
        self.state.input_mode = InputMode::Normal;
    }

    fn draw(&mut self, tui: &mut Tui, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            if let Err(err) = self.render(f) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {err:?}")));
            }
        })?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let area = frame.area();
        self.page.draw(frame, area, &self.state)?;
        if let Some(popup) = self.popup.as_mut() {
            popup.draw(frame, area, &self.state)?;
        }
        Ok(())
    }
}
