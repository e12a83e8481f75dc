//! Boundary parse of backend responses into view results

use serde_json::Value;
use tracing::debug;

use super::interrupt::InterruptPayload;
use super::plan::PlanState;

/// Workflow status reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStatus {
    Complete,
    AwaitingApproval,
    /// State lookup for an unknown thread
    NotFound,
    Other(String),
}

impl PlanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Complete => "complete",
            Self::AwaitingApproval => "awaiting_approval",
            Self::NotFound => "not_found",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for PlanStatus {
    fn from(s: &str) -> Self {
        match s {
            "complete" => Self::Complete,
            "awaiting_approval" => Self::AwaitingApproval,
            "not_found" => Self::NotFound,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The `state` member of a response after validation
#[derive(Debug, Clone, PartialEq)]
pub enum StatePayload {
    /// Parsed against the plan state schema
    Recognized(Box<PlanState>),
    /// Kept raw because it did not match the schema
    Unrecognized(Value),
}

impl StatePayload {
    /// Parse a raw `state` value; `null` means no state
    pub fn parse(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::Object(_) => match serde_json::from_value::<PlanState>(raw.clone()) {
                Ok(state) => Some(Self::Recognized(Box::new(state))),
                Err(e) => {
                    debug!(error = %e, "StatePayload::parse: state does not match schema");
                    Some(Self::Unrecognized(raw.clone()))
                }
            },
            _ => Some(Self::Unrecognized(raw.clone())),
        }
    }

    pub fn plan(&self) -> Option<&PlanState> {
        match self {
            Self::Recognized(state) => Some(state),
            Self::Unrecognized(_) => None,
        }
    }

    /// True when the payload carried nothing
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Recognized(state) => state.is_empty(),
            Self::Unrecognized(Value::Object(map)) => map.is_empty(),
            Self::Unrecognized(Value::Array(items)) => items.is_empty(),
            Self::Unrecognized(Value::String(s)) => s.is_empty(),
            Self::Unrecognized(Value::Null) => true,
            Self::Unrecognized(_) => false,
        }
    }
}

/// What the plan page stores after each response
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult {
    pub thread_id: Option<String>,
    pub status: PlanStatus,
    pub state: Option<StatePayload>,
    pub interrupt: Option<InterruptPayload>,
}

impl ViewResult {
    /// Build a result from a successful response body
    ///
    /// A non-empty `message` field is the legacy simple-response shape and
    /// becomes a complete result carrying only that message. A missing status
    /// is treated as complete.
    pub fn from_body(body: &Value) -> Self {
        debug!("ViewResult::from_body: called");
        let thread_id = body.get("thread_id").and_then(Value::as_str).map(str::to_string);

        if let Some(message) = body.get("message").and_then(Value::as_str).filter(|m| !m.is_empty()) {
            debug!("ViewResult::from_body: legacy message response");
            return Self {
                thread_id,
                status: PlanStatus::Complete,
                state: Some(StatePayload::Recognized(Box::new(PlanState::with_message(message)))),
                interrupt: None,
            };
        }

        let status = body
            .get("status")
            .and_then(Value::as_str)
            .map(PlanStatus::from)
            .unwrap_or(PlanStatus::Complete);
        let state = body.get("state").and_then(StatePayload::parse);
        let interrupt = body
            .get("interrupt")
            .and_then(Value::as_array)
            .and_then(|items| InterruptPayload::from_interrupts(items));

        debug!(?status, has_state = state.is_some(), has_interrupt = interrupt.is_some(), "ViewResult::from_body: parsed");
        Self {
            thread_id,
            status,
            state,
            interrupt,
        }
    }

    pub fn is_awaiting_approval(&self) -> bool {
        self.status == PlanStatus::AwaitingApproval
    }

    /// Thread id when the result can be approved
    pub fn approvable_thread(&self) -> Option<&str> {
        if self.is_awaiting_approval() {
            self.thread_id.as_deref()
        } else {
            None
        }
    }
}
