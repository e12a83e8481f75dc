//! Plan page controller
//!
//! Owns what the user sees on the plan page: the trip description being
//! typed, whether a request is in flight, the last error, and the last
//! result. Every transition is an explicit method so frontends can split a
//! request into `begin_*` (synchronous, decides whether to send anything),
//! [`execute`] (the network call) and [`PlanPage::finish`] (applies the
//! outcome). The `submit`/`approve`/`load` helpers run all three in sequence.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{ApiError, PlanApi, RawResponse};
use crate::domain::{ApproveRequest, TripRequest, ViewResult};
use crate::view::{PlanView, render_result};

/// Shown when the user submits a blank description
pub const EMPTY_INPUT_ERROR: &str = "Please describe your trip.";

/// A request the page decided to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Create { user_input: String },
    Approve { thread_id: String },
    Load { thread_id: String },
}

impl PendingRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Approve { .. } => "approve",
            Self::Load { .. } => "load",
        }
    }
}

/// Outcome of one request: a result to store or an error to display
pub type Outcome = Result<ViewResult, String>;

/// Plan page state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanPage {
    pub input: String,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<ViewResult>,
}

impl PlanPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Current view of the result
    pub fn view(&self) -> PlanView {
        render_result(self.result.as_ref())
    }

    /// True when the approval action should be offered
    pub fn can_approve(&self) -> bool {
        self.result.as_ref().and_then(ViewResult::approvable_thread).is_some()
    }

    /// Start a create-plan request
    ///
    /// Blank input sets an error and sends nothing. Otherwise the previous
    /// error and result are cleared and the trimmed input is returned for
    /// sending.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        debug!(input_len = self.input.len(), "begin_submit: called");
        if self.loading {
            debug!("begin_submit: request already in flight");
            return None;
        }
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.error = Some(EMPTY_INPUT_ERROR.to_string());
            return None;
        }
        let user_input = trimmed.to_string();
        self.error = None;
        self.result = None;
        self.loading = true;
        Some(PendingRequest::Create { user_input })
    }

    /// Start an approval; a no-op unless the result awaits approval
    pub fn begin_approve(&mut self) -> Option<PendingRequest> {
        debug!("begin_approve: called");
        if self.loading {
            return None;
        }
        let thread_id = self
            .result
            .as_ref()
            .and_then(ViewResult::approvable_thread)?
            .to_string();
        self.error = None;
        self.loading = true;
        Some(PendingRequest::Approve { thread_id })
    }

    /// Start a state lookup for an existing thread
    pub fn begin_load(&mut self, thread_id: &str) -> Option<PendingRequest> {
        debug!(%thread_id, "begin_load: called");
        let thread_id = thread_id.trim();
        if self.loading || thread_id.is_empty() {
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(PendingRequest::Load {
            thread_id: thread_id.to_string(),
        })
    }

    /// Apply the outcome of a request
    ///
    /// Success replaces the result. Failure sets the error and keeps the
    /// previous result. Loading is cleared either way.
    pub fn finish(&mut self, outcome: Outcome) {
        match outcome {
            Ok(result) => {
                debug!(status = result.status.as_str(), "finish: success");
                self.result = Some(result);
            }
            Err(message) => {
                debug!(%message, "finish: failure");
                self.error = Some(message);
            }
        }
        self.loading = false;
    }

    /// Create a plan from the current input
    pub async fn submit(&mut self, api: &dyn PlanApi) {
        if let Some(request) = self.begin_submit() {
            let outcome = execute(api, &request).await;
            self.finish(outcome);
        }
    }

    /// Approve the pending checkpoint
    pub async fn approve(&mut self, api: &dyn PlanApi) {
        if let Some(request) = self.begin_approve() {
            let outcome = execute(api, &request).await;
            self.finish(outcome);
        }
    }

    /// Load the state of an existing thread
    pub async fn load(&mut self, api: &dyn PlanApi, thread_id: &str) {
        if let Some(request) = self.begin_load(thread_id) {
            let outcome = execute(api, &request).await;
            self.finish(outcome);
        }
    }
}

/// Send a request and return the response uninterpreted
pub async fn send(api: &dyn PlanApi, request: &PendingRequest) -> Result<RawResponse, ApiError> {
    info!(request = request.name(), base_url = api.base_url(), "send: called");
    match request {
        PendingRequest::Create { user_input } => {
            let body = serde_json::to_value(TripRequest {
                user_input: user_input.clone(),
            })?;
            api.create_plan(&body).await
        }
        PendingRequest::Approve { thread_id } => {
            let body = serde_json::to_value(ApproveRequest::approve())?;
            api.approve(thread_id, &body).await
        }
        PendingRequest::Load { thread_id } => api.fetch_plan(thread_id).await,
    }
}

/// Send a request and interpret the response
pub async fn execute(api: &dyn PlanApi, request: &PendingRequest) -> Outcome {
    match send(api, request).await {
        Ok(raw) => interpret_response(&raw),
        Err(e) => {
            warn!(request = request.name(), error = %e, "execute: request failed");
            Err(e.to_string())
        }
    }
}

/// Turn a raw response into a result or a displayable error
///
/// For non-2xx responses the message is a string `detail` or `error` from a
/// JSON body, else the raw body text, else `Request failed: <status>`.
pub fn interpret_response(raw: &RawResponse) -> Outcome {
    debug!(status = raw.status, body_len = raw.body.len(), "interpret_response: called");
    if !raw.is_success() {
        return Err(failure_message(raw));
    }
    let body: Value = raw.json().map_err(|e| format!("Invalid response from server: {}", e))?;
    Ok(ViewResult::from_body(&body))
}

fn failure_message(raw: &RawResponse) -> String {
    let field = raw.json().ok().and_then(|body| {
        ["detail", "error"]
            .iter()
            .find_map(|name| body.get(*name).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map(str::to_string)
    });
    let text = raw.body.trim();
    field
        .or_else(|| (!text.is_empty()).then(|| text.to_string()))
        .unwrap_or_else(|| format!("Request failed: {}", raw.status))
}
