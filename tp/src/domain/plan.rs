//! Plan state records as returned by the planning backend
//!
//! Every field is optional. A field that is absent (or null) means the
//! corresponding section is not shown.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treat `null` like a missing list
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structured intent extracted from the user's trip description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedIntent {
    pub budget_total: Option<f64>,
    pub currency: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub num_days: Option<u32>,
    pub travel_style: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightOption {
    pub origin: String,
    pub destination: String,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub carrier: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub booking_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelOption {
    pub name: String,
    pub address: Option<String>,
    pub price_per_night: Option<f64>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub booking_link: Option<String>,
    pub map_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration_minutes: Option<u32>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub booking_link: Option<String>,
    pub map_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherInfo {
    pub location: String,
    pub date: String,
    pub summary: Option<String>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub conditions: Option<String>,
}

/// Aggregated research results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchedData {
    #[serde(deserialize_with = "null_as_empty")]
    pub flights: Vec<FlightOption>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hotels: Vec<HotelOption>,
    #[serde(deserialize_with = "null_as_empty")]
    pub activities: Vec<ActivityOption>,
    #[serde(deserialize_with = "null_as_empty")]
    pub weather: Vec<WeatherInfo>,
    #[serde(deserialize_with = "null_as_empty")]
    pub local_tips: Vec<String>,
}

/// Budget categories in display order
pub const BUDGET_CATEGORIES: [BudgetCategory; 5] = [
    BudgetCategory::Transport,
    BudgetCategory::Stay,
    BudgetCategory::Food,
    BudgetCategory::Activities,
    BudgetCategory::Buffer,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCategory {
    Transport,
    Stay,
    Food,
    Activities,
    Buffer,
}

impl BudgetCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Stay => "stay",
            Self::Food => "food",
            Self::Activities => "activities",
            Self::Buffer => "buffer",
        }
    }
}

/// Proposed budget split across categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetAllocation {
    pub transport: Option<f64>,
    pub stay: Option<f64>,
    pub food: Option<f64>,
    pub activities: Option<f64>,
    pub buffer: Option<f64>,
    pub currency: Option<String>,
    pub reasoning: Option<String>,
}

impl BudgetAllocation {
    pub fn amount(&self, category: BudgetCategory) -> Option<f64> {
        match category {
            BudgetCategory::Transport => self.transport,
            BudgetCategory::Stay => self.stay,
            BudgetCategory::Food => self.food,
            BudgetCategory::Activities => self.activities,
            BudgetCategory::Buffer => self.buffer,
        }
    }

    /// Categories with a non-zero amount, in display order
    pub fn nonzero(&self) -> Vec<(BudgetCategory, f64)> {
        BUDGET_CATEGORIES
            .iter()
            .filter_map(|c| self.amount(*c).filter(|v| *v != 0.0).map(|v| (*c, v)))
            .collect()
    }

    /// True when any spending category (buffer excluded) is non-zero
    pub fn has_spending(&self) -> bool {
        [self.transport, self.stay, self.food, self.activities]
            .iter()
            .any(|v| v.is_some_and(|v| v != 0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayItem {
    pub time: Option<String>,
    pub title: String,
    pub duration_minutes: Option<u32>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub map_link: Option<String>,
    pub booking_link: Option<String>,
}

/// One day of the itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub day: u32,
    pub date: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub items: Vec<DayItem>,
    pub travel_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingOption {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub booking_link: Option<String>,
    pub map_link: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionLogEntry {
    pub agent: Option<String>,
    pub step: Option<String>,
    pub message: Option<String>,
}

/// Snapshot of the backend workflow state
///
/// Top-level lists are `Option` so that "present but empty" can be told apart
/// from "absent" when judging whether the payload carried anything at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanState {
    pub parsed_intent: Option<ParsedIntent>,
    pub destination_shortlist: Option<Vec<String>>,
    pub researched_data: Option<ResearchedData>,
    pub budget_allocation: Option<BudgetAllocation>,
    pub approved_budget: Option<BudgetAllocation>,
    pub day_by_day_itinerary: Option<Vec<DayPlan>>,
    pub booking_options: Option<Vec<BookingOption>>,
    pub decision_log: Option<Vec<DecisionLogEntry>>,
    /// Failure reported by the backend workflow
    pub error_message: Option<String>,
    /// Legacy simple-response text
    pub message: Option<String>,
    /// Keys this layer does not interpret (user_input, current_checkpoint, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlanState {
    /// State carrying only a legacy message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Budget to display: the proposed allocation, else the approved one
    pub fn budget(&self) -> Option<&BudgetAllocation> {
        self.budget_allocation.as_ref().or(self.approved_budget.as_ref())
    }

    pub fn shortlist(&self) -> &[String] {
        self.destination_shortlist.as_deref().unwrap_or_default()
    }

    pub fn itinerary(&self) -> &[DayPlan] {
        self.day_by_day_itinerary.as_deref().unwrap_or_default()
    }

    pub fn bookings(&self) -> &[BookingOption] {
        self.booking_options.as_deref().unwrap_or_default()
    }

    pub fn decisions(&self) -> &[DecisionLogEntry] {
        self.decision_log.as_deref().unwrap_or_default()
    }

    /// True when the payload carried no keys at all
    pub fn is_empty(&self) -> bool {
        self.parsed_intent.is_none()
            && self.destination_shortlist.is_none()
            && self.researched_data.is_none()
            && self.budget_allocation.is_none()
            && self.approved_budget.is_none()
            && self.day_by_day_itinerary.is_none()
            && self.booking_options.is_none()
            && self.decision_log.is_none()
            && self.error_message.is_none()
            && self.message.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_state() {
        let state: PlanState = serde_json::from_value(json!({
            "user_input": "4-day trip",
            "parsed_intent": {
                "budget_total": 15000.0,
                "currency": "INR",
                "origin": "Delhi",
                "destination": "Rishikesh",
                "num_days": 4,
                "travel_style": "solo_backpacking",
                "interests": ["rafting", "yoga"]
            },
            "researched_data": {
                "flights": [],
                "activities": [{"name": "Rafting", "type": "adventure", "duration_minutes": 180, "price": 1200}],
                "local_tips": ["Carry cash"]
            },
            "budget_allocation": {"transport": 3000, "stay": 4500, "food": 2500, "activities": 3000, "buffer": 2000},
            "day_by_day_itinerary": [{"day": 1, "items": [{"title": "Arrive"}]}],
            "decision_log": [{"agent": "intent", "step": "parse", "message": "Parsed"}]
        }))
        .unwrap();

        let intent = state.parsed_intent.as_ref().unwrap();
        assert_eq!(intent.destination.as_deref(), Some("Rishikesh"));
        assert_eq!(intent.num_days, Some(4));
        assert_eq!(intent.interests, vec!["rafting", "yoga"]);

        let research = state.researched_data.as_ref().unwrap();
        assert_eq!(research.activities[0].kind.as_deref(), Some("adventure"));
        assert!(research.hotels.is_empty());

        assert_eq!(state.itinerary().len(), 1);
        assert_eq!(state.decisions().len(), 1);
        assert!(state.extra.contains_key("user_input"));
        assert!(!state.is_empty());
    }

    #[test]
    fn test_null_lists_are_empty() {
        let research: ResearchedData = serde_json::from_value(json!({
            "flights": null,
            "weather": null
        }))
        .unwrap();
        assert!(research.flights.is_empty());
        assert!(research.weather.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_state() {
        let state: PlanState = serde_json::from_value(json!({})).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_present_but_empty_list_is_not_empty_state() {
        let state: PlanState = serde_json::from_value(json!({"destination_shortlist": []})).unwrap();
        assert!(!state.is_empty());
        assert!(state.shortlist().is_empty());
    }

    #[test]
    fn test_wrong_type_fails() {
        let result = serde_json::from_value::<PlanState>(json!({"destination_shortlist": "Goa"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_budget_prefers_allocation() {
        let state = PlanState {
            budget_allocation: Some(BudgetAllocation {
                stay: Some(1.0),
                ..Default::default()
            }),
            approved_budget: Some(BudgetAllocation {
                stay: Some(2.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(state.budget().unwrap().stay, Some(1.0));

        let approved_only = PlanState {
            approved_budget: Some(BudgetAllocation {
                stay: Some(2.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(approved_only.budget().unwrap().stay, Some(2.0));
    }

    #[test]
    fn test_budget_nonzero_order() {
        let budget = BudgetAllocation {
            buffer: Some(500.0),
            transport: Some(1000.0),
            stay: Some(0.0),
            food: None,
            activities: Some(250.0),
            ..Default::default()
        };
        let lines: Vec<&str> = budget.nonzero().iter().map(|(c, _)| c.label()).collect();
        assert_eq!(lines, vec!["transport", "activities", "buffer"]);
    }

    #[test]
    fn test_has_spending_ignores_buffer() {
        let buffer_only = BudgetAllocation {
            buffer: Some(500.0),
            ..Default::default()
        };
        assert!(!buffer_only.has_spending());

        let with_food = BudgetAllocation {
            food: Some(10.0),
            ..Default::default()
        };
        assert!(with_food.has_spending());
    }
}
