//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use crate::page::{PendingRequest, PlanPage};

/// Spinner frames shown while a request is in flight
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Trip description input (default)
    #[default]
    Input,
    /// Result pane: scrolling and approval
    Result,
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Normal,
    /// Help overlay (? key)
    Help,
}

/// Complete TUI state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Plan page controller state
    pub page: PlanPage,
    pub focus: Focus,
    pub interaction_mode: InteractionMode,
    /// Result pane scroll offset in lines
    pub scroll: u16,
    /// Request queued by a key press, sent by the runner on the next tick
    pub pending_request: Option<PendingRequest>,
    /// Proxy the frontend talks to, shown in the header
    pub proxy_url: String,
    pub should_quit: bool,
    spinner_frame: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proxy_url(proxy_url: impl Into<String>) -> Self {
        Self {
            proxy_url: proxy_url.into(),
            ..Self::default()
        }
    }

    /// Queue a request if the page decided to send one
    pub fn queue(&mut self, request: Option<PendingRequest>) {
        if request.is_some() {
            self.pending_request = request;
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Keep the scroll offset within the rendered content
    pub fn clamp_scroll(&mut self, content_lines: usize) {
        let max = u16::try_from(content_lines.saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.min(max);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Tick - called on each frame update
    pub fn tick(&mut self) {
        if self.page.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Status text for the header
    pub fn status_line(&self) -> String {
        match &self.page.result {
            Some(result) => match &result.thread_id {
                Some(thread) => format!("{} · {}", result.status.as_str(), thread),
                None => result.status.as_str().to_string(),
            },
            None => "no plan yet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViewResult;
    use serde_json::json;

    #[test]
    fn test_queue_ignores_none() {
        let mut state = AppState::new();
        state.queue(Some(PendingRequest::Load {
            thread_id: "t".to_string(),
        }));
        state.queue(None);
        assert!(state.pending_request.is_some());
    }

    #[test]
    fn test_scroll_bounds() {
        let mut state = AppState::new();
        state.scroll_up(3);
        assert_eq!(state.scroll, 0);
        state.scroll_down(10);
        state.clamp_scroll(4);
        assert_eq!(state.scroll, 3);
        state.clamp_scroll(0);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_spinner_only_moves_while_loading() {
        let mut state = AppState::new();
        let first = state.spinner();
        state.tick();
        assert_eq!(state.spinner(), first);

        state.page.loading = true;
        state.tick();
        assert_ne!(state.spinner(), first);
    }

    #[test]
    fn test_status_line() {
        let mut state = AppState::with_proxy_url("http://localhost:3000");
        assert_eq!(state.status_line(), "no plan yet");
        state.page.result = Some(ViewResult::from_body(&json!({"thread_id": "plan-1", "status": "awaiting_approval"})));
        assert_eq!(state.status_line(), "awaiting_approval · plan-1");
    }
}
