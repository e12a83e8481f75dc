//! Approval checkpoints and the interrupt payloads that preview them

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::plan::{BudgetAllocation, DayPlan};

/// Named pause in the backend workflow
///
/// The set is open: unknown tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Checkpoint {
    DestinationShortlist,
    BudgetAllocation,
    FinalItinerary,
    Other(String),
}

impl Checkpoint {
    pub fn as_str(&self) -> &str {
        match self {
            Self::DestinationShortlist => "destination_shortlist",
            Self::BudgetAllocation => "budget_allocation",
            Self::FinalItinerary => "final_itinerary",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for Checkpoint {
    fn from(tag: &str) -> Self {
        match tag {
            "destination_shortlist" => Self::DestinationShortlist,
            "budget_allocation" => Self::BudgetAllocation,
            "final_itinerary" => Self::FinalItinerary,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Checkpoint {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Checkpoint> for String {
    fn from(checkpoint: Checkpoint) -> Self {
        checkpoint.as_str().to_string()
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preview of the state the user is being asked to approve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterruptPayload {
    pub message: Option<String>,
    pub checkpoint: Option<Checkpoint>,
    pub destination_shortlist: Option<Vec<String>>,
    pub budget_allocation: Option<BudgetAllocation>,
    pub day_by_day_itinerary: Option<Vec<DayPlan>>,
}

impl InterruptPayload {
    /// Pick the payload out of the backend's `interrupt` array
    ///
    /// Only the first element is considered and it must be a JSON object.
    /// When the previews are malformed the checkpoint and message are still
    /// recovered so the approval prompt can be shown.
    pub fn from_interrupts(interrupts: &[Value]) -> Option<Self> {
        debug!(count = interrupts.len(), "InterruptPayload::from_interrupts: called");
        let first = interrupts.first()?;
        let object = first.as_object()?;

        match serde_json::from_value::<Self>(first.clone()) {
            Ok(payload) => Some(payload),
            Err(e) => {
                debug!(error = %e, "InterruptPayload::from_interrupts: preview malformed, keeping prompt only");
                Some(Self {
                    message: object.get("message").and_then(Value::as_str).map(str::to_string),
                    checkpoint: object.get("checkpoint").and_then(Value::as_str).map(Checkpoint::from),
                    ..Default::default()
                })
            }
        }
    }
}
