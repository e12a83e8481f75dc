//! TUI application - key handling
//!
//! The App struct owns the AppState and turns key presses into page
//! transitions. Network work is never done here: requests are queued in
//! `pending_request` for the runner. Rendering is delegated to the views
//! module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, Focus, InteractionMode};

/// Lines moved by PageUp/PageDown
const PAGE_LINES: u16 = 10;

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let (KeyCode::Char('c'), true) = (key.code, key.modifiers.contains(KeyModifiers::CONTROL)) {
            return true;
        }

        match self.state.interaction_mode {
            InteractionMode::Help => {
                self.state.interaction_mode = InteractionMode::Normal;
                false
            }
            InteractionMode::Normal => match self.state.focus {
                Focus::Input => self.handle_input_key(key),
                Focus::Result => self.handle_result_key(key),
            },
        }
    }

    /// Keys while typing the trip description
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                let request = self.state.page.begin_submit();
                debug!(queued = request.is_some(), "handle_input_key: submit");
                if request.is_some() {
                    self.state.scroll = 0;
                }
                self.state.queue(request);
            }
            KeyCode::Tab | KeyCode::Esc => {
                self.state.focus = Focus::Result;
            }
            KeyCode::Backspace if !self.state.page.loading => {
                self.state.page.input.pop();
            }
            KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) && !self.state.page.loading => {
                self.state.page.input.push(c);
            }
            _ => {}
        }
        false
    }

    /// Keys while the result pane is focused
    fn handle_result_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.state.should_quit = true;
                return true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Esc => {
                self.state.focus = Focus::Input;
            }
            KeyCode::Char('a') => {
                let request = self.state.page.begin_approve();
                debug!(queued = request.is_some(), "handle_result_key: approve");
                if request.is_some() {
                    self.state.scroll = 0;
                }
                self.state.queue(request);
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(1),
            KeyCode::PageDown => self.state.scroll_down(PAGE_LINES),
            KeyCode::PageUp => self.state.scroll_up(PAGE_LINES),
            KeyCode::Char('g') => self.state.scroll = 0,
            _ => {}
        }
        false
    }
}
