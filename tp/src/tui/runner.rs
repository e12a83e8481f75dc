//! TUI Runner - main loop that owns the terminal and the plan API client
//!
//! The TuiRunner is responsible for:
//! - Dispatching key events to App
//! - Sending queued plan requests on a background task
//! - Applying request outcomes to the page when they arrive
//! - Rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::AppState;
use super::views;
use crate::api::PlanApi;
use crate::page::{self, Outcome, PendingRequest};

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    api: Arc<dyn PlanApi>,
    event_handler: EventHandler,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, api: Arc<dyn PlanApi>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let state = AppState::with_proxy_url(api.base_url());
        Self {
            app: App::with_state(state),
            terminal,
            api,
            event_handler: EventHandler::new(Duration::from_millis(33)),
            outcome_tx,
            outcome_rx,
        }
    }

    /// Queue a state lookup to run on the first tick
    pub fn load_thread(&mut self, thread_id: &str) {
        let state = self.app.state_mut();
        let request = state.page.begin_load(thread_id);
        state.queue(request);
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        info!(proxy = %self.api.base_url(), "TUI started");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            match self.event_handler.next().await? {
                Event::Tick => self.handle_tick(),
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                    // Send right away rather than waiting for the next tick
                    self.dispatch_pending();
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "run: resize");
                }
            }

            if self.app.state().should_quit {
                break;
            }
        }
        info!("TUI exiting");
        Ok(())
    }

    /// Handle tick event - periodic updates
    fn handle_tick(&mut self) {
        self.app.state_mut().tick();
        self.dispatch_pending();

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            debug!(ok = outcome.is_ok(), "handle_tick: outcome received");
            self.app.state_mut().page.finish(outcome);
        }
    }

    /// Send the queued request, if any, on a background task
    fn dispatch_pending(&mut self) {
        if let Some(request) = self.app.state_mut().pending_request.take() {
            self.spawn_request(request);
        }
    }

    fn spawn_request(&self, request: PendingRequest) {
        debug!(request = request.name(), "spawn_request: called");
        let api = self.api.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = page::execute(api.as_ref(), &request).await;
            // Receiver is gone only when the TUI has exited
            let _ = tx.send(outcome);
        });
    }
}
