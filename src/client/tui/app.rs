use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::application::{AnswerSource, StateStore};
use crate::client::{OsClipboard, SearchController};

use super::ui;
use super::{init, install_panic_hook, restore, AppEvent, EventHandler, Tui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    History,
}

pub struct App {
    pub(crate) controller: SearchController,
    pub(crate) focus: FocusPane,
    pub(crate) history_state: ListState,
    relay: Arc<dyn AnswerSource>,
    clipboard: OsClipboard,
    events: EventHandler,
    should_quit: bool,
}

/// Run the terminal client until the user quits.
pub async fn run(relay: Arc<dyn AnswerSource>, store: Arc<dyn StateStore>) -> Result<()> {
    install_panic_hook();
    let mut terminal = init()?;

    let app = App::new(relay, store);
    let result = app.main_loop(&mut terminal).await;

    restore()?;
    result
}

impl App {
    pub fn new(relay: Arc<dyn AnswerSource>, store: Arc<dyn StateStore>) -> Self {
        Self {
            controller: SearchController::new(store),
            // The query field has focus from the start.
            focus: FocusPane::Input,
            history_state: ListState::default(),
            relay,
            clipboard: OsClipboard::new(),
            events: EventHandler::new(),
            should_quit: false,
        }
    }

    async fn main_loop(mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(&mut self, frame))?;

            match self.events.next().await {
                Some(AppEvent::Key(key)) => self.handle_key(key),
                Some(AppEvent::Tick) => self.controller.tick(),
                Some(AppEvent::AnswerReady {
                    generation,
                    outcome,
                }) => self.controller.resolve(generation, outcome),
                Some(AppEvent::Resize(..)) => {}
                None => break,
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('t') => self.controller.toggle_theme(),
                KeyCode::Char('y') => self.controller.copy_answer(&self.clipboard),
                KeyCode::Char('s') => self.controller.save_current(),
                KeyCode::Char('l') => self.controller.request_clear_history(),
                _ => {}
            }
            return;
        }

        // A pending clear-history confirmation swallows the next key.
        if self.controller.confirm_clear_pending() {
            let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
            self.controller.confirm_clear_history(confirmed);
            if confirmed {
                self.history_state.select(None);
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.toggle_focus(),
            _ => match self.focus {
                FocusPane::Input => self.handle_input_key(key.code),
                FocusPane::History => self.handle_history_key(key.code),
            },
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.controller.insert_char(c),
            KeyCode::Backspace => self.controller.backspace(),
            KeyCode::Left => self.controller.move_cursor_left(),
            KeyCode::Right => self.controller.move_cursor_right(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        let len = self.controller.history().len();
        if len == 0 {
            return;
        }

        match code {
            KeyCode::Up => {
                let next = self.history_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.history_state.select(Some(next));
            }
            KeyCode::Down => {
                let next = self
                    .history_state
                    .selected()
                    .map_or(0, |i| (i + 1).min(len - 1));
                self.history_state.select(Some(next));
            }
            KeyCode::Enter => {
                if let Some(index) = self.history_state.selected() {
                    self.controller.select_history(index);
                    self.focus = FocusPane::Input;
                }
            }
            _ => {}
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Input => {
                if self.history_state.selected().is_none()
                    && !self.controller.history().is_empty()
                {
                    self.history_state.select(Some(0));
                }
                FocusPane::History
            }
            FocusPane::History => FocusPane::Input,
        };
    }

    /// Hand the submission off to a task; the result comes back through the
    /// event channel tagged with its generation.
    fn submit(&mut self) {
        let Some(ticket) = self.controller.submit() else {
            return;
        };

        let relay = self.relay.clone();
        let tx = self.events.sender();
        tokio::spawn(async move {
            let outcome = relay.answer(&ticket.query).await;
            let _ = tx.send(AppEvent::AnswerReady {
                generation: ticket.generation,
                outcome,
            });
        });
    }
}
