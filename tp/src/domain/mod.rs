//! Data model for plan responses
//!
//! Backend JSON is parsed here, at the boundary, into typed variants:
//! - [`PlanState`] and its nested records
//! - [`InterruptPayload`] and the open [`Checkpoint`] set
//! - [`ViewResult`], the value the plan page stores after each response

mod interrupt;
mod plan;
mod result;

pub use interrupt::{Checkpoint, InterruptPayload};
pub use plan::{
    ActivityOption, BUDGET_CATEGORIES, BookingOption, BudgetAllocation, BudgetCategory, DayItem, DayPlan,
    DecisionLogEntry, FlightOption, HotelOption, ParsedIntent, PlanState, ResearchedData, WeatherInfo,
};
pub use result::{PlanStatus, StatePayload, ViewResult};

use serde::{Deserialize, Serialize};

/// Body sent to create a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub user_input: String,
}

/// Body sent to resume after a checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveRequest {
    pub resume: bool,
}

impl ApproveRequest {
    pub fn approve() -> Self {
        Self { resume: true }
    }
}
