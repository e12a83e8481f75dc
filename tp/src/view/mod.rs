//! Plan result renderer
//!
//! Maps a plan response onto an explicit view model. Rendering is a pure
//! function: the same input always yields an equal [`PlanView`], and nothing
//! here touches the network or mutates state. Frontends (TUI, CLI) only lay
//! the model out.
//!
//! - [`render`] picks the approval or completed-plan branch
//! - [`money`] formats amounts
//! - [`text`] lays a view out as styled lines

pub mod money;
pub mod text;

pub use money::format_money;
pub use text::{APPROVAL_BADGE, Fragment, TextLine, Tone, layout};

use tracing::debug;

use crate::domain::{
    ActivityOption, BookingOption, BudgetAllocation, Checkpoint, DayPlan, DecisionLogEntry, FlightOption, HotelOption,
    InterruptPayload, ParsedIntent, PlanState, PlanStatus, StatePayload, ViewResult, WeatherInfo,
};

/// Maximum weather entries shown
pub const WEATHER_LIMIT: usize = 5;

/// Approval prompt used when the checkpoint carries no message
pub const DEFAULT_APPROVAL_MESSAGE: &str = "Review the details below and approve to continue.";

/// Shown when the state has content but nothing this view knows how to draw
pub const FALLBACK_MESSAGE: &str = "Plan state received. No structured sections to display.";

/// Label of the approve action
pub fn approve_label(approving: bool) -> &'static str {
    if approving { "Sending…" } else { "Approve & continue" }
}

/// Top-level view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanView {
    /// No result yet
    Empty,
    /// Backend paused at a checkpoint
    Approval(ApprovalView),
    /// Plan (or partial plan) to display
    Completed(CompletedPlan),
}

/// Approval prompt for a checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalView {
    pub checkpoint: Option<Checkpoint>,
    pub title: &'static str,
    pub message: String,
    pub preview: Option<ApprovalPreview>,
}

/// Checkpoint-specific preview of what is being approved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalPreview {
    Destinations(Vec<String>),
    Budget(Vec<BudgetLine>),
    Itinerary { days: usize },
}

impl ApprovalPreview {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Destinations(_) => "Destinations",
            Self::Budget(_) => "Budget breakdown",
            Self::Itinerary { .. } => "Itinerary",
        }
    }
}

/// Completed plan, sections in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedPlan {
    pub sections: Vec<Section>,
}

impl CompletedPlan {
    pub fn titles(&self) -> Vec<&'static str> {
        self.sections.iter().map(Section::title).collect()
    }
}

/// A visual section of the completed plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Notice(String),
    PlannerError(String),
    TripSummary(TripSummary),
    Destinations(Vec<String>),
    Flights(Vec<FlightCard>),
    Stay(Vec<HotelCard>),
    Activities(Vec<ActivityCard>),
    Weather(Vec<WeatherCard>),
    LocalTips(Vec<String>),
    Budget(BudgetBreakdown),
    Itinerary(Vec<DayCard>),
    Bookings(Vec<BookingCard>),
    DecisionLog(Vec<DecisionLine>),
    Fallback,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Notice(_) => "Notice",
            Self::PlannerError(_) => "Planner error",
            Self::TripSummary(_) => "Trip summary",
            Self::Destinations(_) => "Destinations",
            Self::Flights(_) => "Flights",
            Self::Stay(_) => "Stay",
            Self::Activities(_) => "Activities",
            Self::Weather(_) => "Weather",
            Self::LocalTips(_) => "Local tips",
            Self::Budget(_) => "Budget breakdown",
            Self::Itinerary(_) => "Day-by-day itinerary",
            Self::Bookings(_) => "Booking links",
            Self::DecisionLog(_) => "Agent reasoning",
            Self::Fallback => "Plan",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Notice(_) => "ℹ️",
            Self::PlannerError(_) => "⚠️",
            Self::TripSummary(_) => "✈️",
            Self::Destinations(_) => "📍",
            Self::Flights(_) => "🛫",
            Self::Stay(_) => "🏨",
            Self::Activities(_) => "🎯",
            Self::Weather(_) => "🌤️",
            Self::LocalTips(_) => "💡",
            Self::Budget(_) => "💰",
            Self::Itinerary(_) => "📅",
            Self::Bookings(_) => "🔗",
            Self::DecisionLog(_) => "🧠",
            Self::Fallback => "📄",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripSummary {
    pub fields: Vec<SummaryField>,
    pub interests: Vec<String>,
}

/// External link shown next to a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub url: String,
}

impl Link {
    fn book(url: &Option<String>) -> Option<Self> {
        Self::labelled("Book", url)
    }

    fn map(url: &Option<String>) -> Option<Self> {
        Self::labelled("Map", url)
    }

    fn labelled(label: &'static str, url: &Option<String>) -> Option<Self> {
        present(url).map(|url| Self {
            label,
            url: url.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightCard {
    pub route: String,
    pub times: Option<String>,
    pub carrier: Option<String>,
    pub price: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelCard {
    pub name: String,
    pub address: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub meta: Option<String>,
    pub price: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub date: String,
    pub summary: Option<String>,
    pub temperature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    pub category: &'static str,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetBreakdown {
    pub reasoning: Option<String>,
    pub lines: Vec<BudgetLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayItemLine {
    pub time: Option<String>,
    pub title: String,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    pub heading: String,
    pub notes: Option<String>,
    pub items: Vec<DayItemLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCard {
    pub kind: String,
    pub label: String,
    pub price: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionLine {
    pub agent: String,
    pub step: Option<String>,
    pub message: String,
}

/// Non-empty string or nothing
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn price(amount: Option<f64>, currency: &Option<String>) -> Option<String> {
    amount.map(|v| format_money(v, currency.as_deref()))
}

fn positive_price(amount: Option<f64>, currency: &Option<String>) -> Option<String> {
    price(amount.filter(|v| *v > 0.0), currency)
}

fn minutes(duration: Option<u32>) -> Option<String> {
    duration.map(|m| format!("{} min", m))
}

/// Render the view for the page's current result
pub fn render_result(result: Option<&ViewResult>) -> PlanView {
    match result {
        None => PlanView::Empty,
        Some(r) => render(&r.status, r.state.as_ref(), r.interrupt.as_ref()),
    }
}

/// Render a plan response
///
/// `awaiting_approval` with an interrupt payload selects the approval view;
/// every other combination renders the completed plan.
pub fn render(status: &PlanStatus, state: Option<&StatePayload>, interrupt: Option<&InterruptPayload>) -> PlanView {
    debug!(status = status.as_str(), has_interrupt = interrupt.is_some(), "render: called");
    let plan = state.and_then(StatePayload::plan);

    match (status, interrupt) {
        (PlanStatus::AwaitingApproval, Some(payload)) => PlanView::Approval(approval_view(payload, plan)),
        _ => PlanView::Completed(completed_plan(state)),
    }
}

fn approval_view(payload: &InterruptPayload, plan: Option<&PlanState>) -> ApprovalView {
    let title = match &payload.checkpoint {
        Some(Checkpoint::DestinationShortlist) => "Confirm destinations",
        Some(Checkpoint::BudgetAllocation) => "Confirm budget",
        Some(Checkpoint::FinalItinerary) => "Confirm itinerary",
        Some(Checkpoint::Other(_)) | None => "Review & continue",
    };

    let preview = match &payload.checkpoint {
        Some(Checkpoint::DestinationShortlist) => {
            let shortlist = payload
                .destination_shortlist
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| plan.map(PlanState::shortlist))
                .unwrap_or_default();
            (!shortlist.is_empty()).then(|| ApprovalPreview::Destinations(shortlist.to_vec()))
        }
        Some(Checkpoint::BudgetAllocation) => payload
            .budget_allocation
            .as_ref()
            .map(|b| ApprovalPreview::Budget(budget_lines(b))),
        Some(Checkpoint::FinalItinerary) => payload
            .day_by_day_itinerary
            .as_ref()
            .filter(|days| !days.is_empty())
            .map(|days| ApprovalPreview::Itinerary { days: days.len() }),
        _ => None,
    };

    ApprovalView {
        checkpoint: payload.checkpoint.clone(),
        title,
        message: present(&payload.message).unwrap_or(DEFAULT_APPROVAL_MESSAGE).to_string(),
        preview,
    }
}

fn completed_plan(state: Option<&StatePayload>) -> CompletedPlan {
    let mut sections = Vec::new();

    let Some(payload) = state else {
        return CompletedPlan { sections };
    };

    let Some(plan) = payload.plan() else {
        if !payload.is_empty() {
            sections.push(Section::Fallback);
        }
        return CompletedPlan { sections };
    };

    if let Some(message) = present(&plan.message) {
        sections.push(Section::Notice(message.to_string()));
    }
    if let Some(error) = present(&plan.error_message) {
        sections.push(Section::PlannerError(error.to_string()));
    }

    let intent = plan.parsed_intent.as_ref();
    if let Some(intent) = intent {
        sections.push(Section::TripSummary(trip_summary(intent)));
    }

    let shortlist = plan.shortlist();
    if !shortlist.is_empty() && intent.is_none() {
        sections.push(Section::Destinations(shortlist.to_vec()));
    }

    let researched = plan.researched_data.as_ref();
    if let Some(research) = researched {
        if !research.flights.is_empty() {
            sections.push(Section::Flights(research.flights.iter().map(flight_card).collect()));
        }
        if !research.hotels.is_empty() {
            sections.push(Section::Stay(research.hotels.iter().map(hotel_card).collect()));
        }
        if !research.activities.is_empty() {
            sections.push(Section::Activities(research.activities.iter().map(activity_card).collect()));
        }
        if !research.weather.is_empty() {
            sections.push(Section::Weather(
                research.weather.iter().take(WEATHER_LIMIT).map(weather_card).collect(),
            ));
        }
        if !research.local_tips.is_empty() {
            sections.push(Section::LocalTips(research.local_tips.clone()));
        }
    }

    let budget = plan.budget();
    if let Some(b) = budget.filter(|b| b.has_spending()) {
        sections.push(Section::Budget(BudgetBreakdown {
            reasoning: present(&b.reasoning).map(str::to_string),
            lines: budget_lines(b),
        }));
    }

    let itinerary = plan.itinerary();
    if !itinerary.is_empty() {
        sections.push(Section::Itinerary(itinerary.iter().map(day_card).collect()));
    }

    let bookings = plan.bookings();
    if !bookings.is_empty() {
        sections.push(Section::Bookings(bookings.iter().map(booking_card).collect()));
    }

    let decisions = plan.decisions();
    if !decisions.is_empty() {
        sections.push(Section::DecisionLog(decisions.iter().map(decision_line).collect()));
    }

    let nothing_structured =
        intent.is_none() && researched.is_none() && budget.is_none() && itinerary.is_empty() && bookings.is_empty();
    if nothing_structured && !payload.is_empty() {
        sections.push(Section::Fallback);
    }

    CompletedPlan { sections }
}

fn trip_summary(intent: &ParsedIntent) -> TripSummary {
    let mut fields = Vec::new();
    if let Some(destination) = present(&intent.destination) {
        fields.push(SummaryField {
            label: "Destination",
            value: destination.to_string(),
        });
    }
    if let Some(origin) = present(&intent.origin) {
        fields.push(SummaryField {
            label: "From",
            value: origin.to_string(),
        });
    }
    if let Some(days) = intent.num_days {
        fields.push(SummaryField {
            label: "Days",
            value: days.to_string(),
        });
    }
    if let Some(total) = intent.budget_total {
        fields.push(SummaryField {
            label: "Budget",
            value: format_money(total, intent.currency.as_deref()),
        });
    }
    if let Some(style) = present(&intent.travel_style) {
        fields.push(SummaryField {
            label: "Style",
            value: style.replace('_', " "),
        });
    }
    TripSummary {
        fields,
        interests: intent.interests.clone(),
    }
}

fn flight_card(f: &FlightOption) -> FlightCard {
    let times: Vec<&str> = [present(&f.departure), present(&f.arrival)].into_iter().flatten().collect();
    FlightCard {
        route: format!("{} → {}", f.origin, f.destination),
        times: (!times.is_empty()).then(|| times.join(" · ")),
        carrier: present(&f.carrier).map(str::to_string),
        price: price(f.price, &f.currency),
        links: Link::book(&f.booking_link).into_iter().collect(),
    }
}

fn hotel_card(h: &HotelOption) -> HotelCard {
    HotelCard {
        name: h.name.clone(),
        address: present(&h.address).map(str::to_string),
        price: price(h.price_per_night, &h.currency).map(|p| format!("{}/night", p)),
        rating: h.rating.map(|r| format!("★ {}", r)),
        links: [Link::book(&h.booking_link), Link::map(&h.map_link)]
            .into_iter()
            .flatten()
            .collect(),
    }
}

fn activity_card(a: &ActivityOption) -> ActivityCard {
    let meta: Vec<String> = [
        present(&a.kind).map(str::to_string),
        minutes(a.duration_minutes.filter(|m| *m > 0)),
    ]
    .into_iter()
    .flatten()
    .collect();
    ActivityCard {
        name: a.name.clone(),
        meta: (!meta.is_empty()).then(|| meta.join(" · ")),
        price: positive_price(a.price, &a.currency),
        links: [Link::book(&a.booking_link), Link::map(&a.map_link)]
            .into_iter()
            .flatten()
            .collect(),
    }
}

fn weather_card(w: &WeatherInfo) -> WeatherCard {
    let temps: Vec<String> = [w.temp_min, w.temp_max].into_iter().flatten().map(|t| t.to_string()).collect();
    WeatherCard {
        date: w.date.clone(),
        summary: present(&w.summary).or(present(&w.conditions)).map(str::to_string),
        temperature: (!temps.is_empty()).then(|| format!("{}°C", temps.join("–"))),
    }
}

fn budget_lines(budget: &BudgetAllocation) -> Vec<BudgetLine> {
    budget
        .nonzero()
        .into_iter()
        .map(|(category, amount)| BudgetLine {
            category: category.label(),
            amount: format_money(amount, budget.currency.as_deref()),
        })
        .collect()
}

fn day_card(day: &DayPlan) -> DayCard {
    let heading = match present(&day.date) {
        Some(date) => format!("Day {} · {}", day.day, date),
        None => format!("Day {}", day.day),
    };
    DayCard {
        heading,
        notes: present(&day.travel_notes).map(str::to_string),
        items: day
            .items
            .iter()
            .map(|item| DayItemLine {
                time: present(&item.time).map(str::to_string),
                title: item.title.clone(),
                duration: minutes(item.duration_minutes),
                description: present(&item.description).map(str::to_string),
                price: positive_price(item.price, &item.currency),
                links: [Link::map(&item.map_link), Link::book(&item.booking_link)]
                    .into_iter()
                    .flatten()
                    .collect(),
            })
            .collect(),
    }
}

fn booking_card(b: &BookingOption) -> BookingCard {
    BookingCard {
        kind: b.kind.clone(),
        label: b.label.clone(),
        price: price(b.price, &b.currency),
        links: [Link::book(&b.booking_link), Link::map(&b.map_link)]
            .into_iter()
            .flatten()
            .collect(),
    }
}

fn decision_line(entry: &DecisionLogEntry) -> DecisionLine {
    DecisionLine {
        agent: entry.agent.clone().unwrap_or_default(),
        step: present(&entry.step).map(str::to_string),
        message: entry.message.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn result(body: Value) -> ViewResult {
        ViewResult::from_body(&body)
    }

    fn completed(body: Value) -> CompletedPlan {
        match render_result(Some(&result(body))) {
            PlanView::Completed(plan) => plan,
            other => panic!("expected completed plan, got {:?}", other),
        }
    }

    fn approval(body: Value) -> ApprovalView {
        match render_result(Some(&result(body))) {
            PlanView::Approval(view) => view,
            other => panic!("expected approval view, got {:?}", other),
        }
    }

    fn full_state() -> Value {
        json!({
            "parsed_intent": {
                "destination": "Rishikesh",
                "origin": "Delhi",
                "num_days": 4,
                "budget_total": 15000,
                "currency": "INR",
                "travel_style": "solo_backpacking",
                "interests": ["rafting", "yoga"]
            },
            "destination_shortlist": ["Rishikesh"],
            "researched_data": {
                "flights": [{"origin": "DEL", "destination": "DED", "departure": "08:00", "arrival": "09:00", "carrier": "IndiGo", "price": 3200, "booking_link": "https://book/f"}],
                "hotels": [{"name": "Zostel", "price_per_night": 800, "rating": 4.5, "map_link": "https://map/h"}],
                "activities": [{"name": "Rafting", "type": "adventure", "duration_minutes": 180, "price": 0}],
                "weather": [{"location": "Rishikesh", "date": "2025-03-01", "conditions": "Sunny", "temp_min": 12, "temp_max": 26}],
                "local_tips": ["Carry cash"]
            },
            "budget_allocation": {"transport": 3000, "stay": 3200, "food": 2400, "activities": 0, "buffer": 1500, "reasoning": "Hostel stays"},
            "day_by_day_itinerary": [
                {"day": 1, "date": "2025-03-01", "items": [
                    {"time": "09:00", "title": "Arrive", "duration_minutes": 60, "price": 0},
                    {"title": "Ganga aarti", "price": 200, "map_link": "https://map/a", "booking_link": "https://book/a"}
                ]}
            ],
            "booking_options": [{"type": "hotel", "label": "Zostel", "price": 800, "booking_link": "https://book/h"}],
            "decision_log": [{"agent": "budget", "step": "allocate", "message": "Split budget"}]
        })
    }

    #[test]
    fn test_no_result_is_empty() {
        assert_eq!(render_result(None), PlanView::Empty);
    }

    #[test]
    fn test_completed_sections_in_order() {
        let plan = completed(json!({"status": "complete", "thread_id": "t", "state": full_state()}));
        assert_eq!(
            plan.titles(),
            vec![
                "Trip summary",
                "Flights",
                "Stay",
                "Activities",
                "Weather",
                "Local tips",
                "Budget breakdown",
                "Day-by-day itinerary",
                "Booking links",
                "Agent reasoning",
            ]
        );
    }

    #[test]
    fn test_trip_summary_fields() {
        let plan = completed(json!({"status": "complete", "state": full_state()}));
        let Section::TripSummary(summary) = &plan.sections[0] else {
            panic!("expected trip summary");
        };
        let pairs: Vec<(&str, &str)> = summary.fields.iter().map(|f| (f.label, f.value.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Destination", "Rishikesh"),
                ("From", "Delhi"),
                ("Days", "4"),
                ("Budget", "₹15,000"),
                ("Style", "solo backpacking"),
            ]
        );
        assert_eq!(summary.interests, vec!["rafting", "yoga"]);
    }

    #[test]
    fn test_destinations_only_without_intent() {
        let plan = completed(json!({"status": "complete", "state": {"destination_shortlist": ["Goa", "Gokarna"]}}));
        assert_eq!(
            plan.sections,
            vec![
                Section::Destinations(vec!["Goa".to_string(), "Gokarna".to_string()]),
                Section::Fallback,
            ]
        );
    }

    #[test]
    fn test_card_details() {
        let plan = completed(json!({"status": "complete", "state": full_state()}));
        let flights = plan.sections.iter().find_map(|s| match s {
            Section::Flights(f) => Some(f),
            _ => None,
        });
        let flight = &flights.unwrap()[0];
        assert_eq!(flight.route, "DEL → DED");
        assert_eq!(flight.times.as_deref(), Some("08:00 · 09:00"));
        assert_eq!(flight.price.as_deref(), Some("₹3,200"));
        assert_eq!(flight.links[0].label, "Book");

        let hotels = plan.sections.iter().find_map(|s| match s {
            Section::Stay(h) => Some(h),
            _ => None,
        });
        let hotel = &hotels.unwrap()[0];
        assert_eq!(hotel.price.as_deref(), Some("₹800/night"));
        assert_eq!(hotel.rating.as_deref(), Some("★ 4.5"));
        assert_eq!(hotel.links.len(), 1);
        assert_eq!(hotel.links[0].label, "Map");

        let activities = plan.sections.iter().find_map(|s| match s {
            Section::Activities(a) => Some(a),
            _ => None,
        });
        let activity = &activities.unwrap()[0];
        assert_eq!(activity.meta.as_deref(), Some("adventure · 180 min"));
        assert!(activity.price.is_none(), "zero-priced activities show no price");

        let weather = plan.sections.iter().find_map(|s| match s {
            Section::Weather(w) => Some(w),
            _ => None,
        });
        let day = &weather.unwrap()[0];
        assert_eq!(day.summary.as_deref(), Some("Sunny"));
        assert_eq!(day.temperature.as_deref(), Some("12–26°C"));
    }

    #[test]
    fn test_budget_breakdown_skips_zero() {
        let plan = completed(json!({"status": "complete", "state": full_state()}));
        let budget = plan.sections.iter().find_map(|s| match s {
            Section::Budget(b) => Some(b),
            _ => None,
        });
        let budget = budget.unwrap();
        let categories: Vec<&str> = budget.lines.iter().map(|l| l.category).collect();
        assert_eq!(categories, vec!["transport", "stay", "food", "buffer"]);
        assert_eq!(budget.reasoning.as_deref(), Some("Hostel stays"));
        assert_eq!(budget.lines[0].amount, "₹3,000");
    }

    #[test]
    fn test_budget_hidden_when_only_buffer() {
        let plan = completed(json!({"status": "complete", "state": {"budget_allocation": {"buffer": 500}}}));
        assert!(plan.sections.is_empty(), "budget present means no fallback either");
    }

    #[test]
    fn test_approved_budget_used_when_no_allocation() {
        let plan = completed(json!({"status": "complete", "state": {"approved_budget": {"stay": 100, "currency": "USD"}}}));
        assert_eq!(
            plan.sections,
            vec![Section::Budget(BudgetBreakdown {
                reasoning: None,
                lines: vec![BudgetLine {
                    category: "stay",
                    amount: "$100".to_string(),
                }],
            })]
        );
    }

    #[test]
    fn test_itinerary_items_in_order() {
        let plan = completed(json!({"status": "complete", "state": full_state()}));
        let days = plan.sections.iter().find_map(|s| match s {
            Section::Itinerary(d) => Some(d),
            _ => None,
        });
        let day = &days.unwrap()[0];
        assert_eq!(day.heading, "Day 1 · 2025-03-01");
        let titles: Vec<&str> = day.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Arrive", "Ganga aarti"]);
        assert_eq!(day.items[0].time.as_deref(), Some("09:00"));
        assert_eq!(day.items[0].duration.as_deref(), Some("60 min"));
        assert!(day.items[0].price.is_none());
        assert_eq!(day.items[1].price.as_deref(), Some("₹200"));
        let links: Vec<&str> = day.items[1].links.iter().map(|l| l.label).collect();
        assert_eq!(links, vec!["Map", "Book"]);
    }

    #[test]
    fn test_weather_capped_at_five() {
        let weather: Vec<Value> = (1..=8)
            .map(|d| json!({"location": "Goa", "date": format!("2025-01-0{}", d), "summary": "Clear"}))
            .collect();
        let plan = completed(json!({"status": "complete", "state": {"researched_data": {"weather": weather}}}));
        let Section::Weather(cards) = &plan.sections[0] else {
            panic!("expected weather");
        };
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4].date, "2025-01-05");
    }

    #[test]
    fn test_fallback_for_unstructured_state() {
        let plan = completed(json!({"status": "complete", "state": {"user_input": "Goa"}}));
        assert_eq!(plan.sections, vec![Section::Fallback]);
    }

    #[test]
    fn test_no_fallback_for_empty_state() {
        let plan = completed(json!({"status": "complete", "state": {}}));
        assert!(plan.sections.is_empty());
    }

    #[test]
    fn test_unrecognized_state_renders_fallback_only() {
        let plan = completed(json!({"status": "complete", "state": {"parsed_intent": "Goa", "destination_shortlist": ["Goa"]}}));
        assert_eq!(plan.sections, vec![Section::Fallback]);
    }

    #[test]
    fn test_legacy_message_renders_notice() {
        let plan = completed(json!({"message": "Use the approve endpoint"}));
        assert_eq!(
            plan.sections,
            vec![Section::Notice("Use the approve endpoint".to_string()), Section::Fallback]
        );
    }

    #[test]
    fn test_planner_error_leads() {
        let plan = completed(json!({"status": "complete", "state": {"error_message": "Research failed", "destination_shortlist": ["Goa"]}}));
        assert_eq!(plan.titles(), vec!["Planner error", "Destinations", "Plan"]);
    }

    #[test]
    fn test_approval_titles_by_checkpoint() {
        let cases = [
            ("destination_shortlist", "Confirm destinations"),
            ("budget_allocation", "Confirm budget"),
            ("final_itinerary", "Confirm itinerary"),
            ("hotel_choice", "Review & continue"),
        ];
        for (checkpoint, title) in cases {
            let view = approval(json!({
                "status": "awaiting_approval",
                "thread_id": "t",
                "interrupt": [{"checkpoint": checkpoint}]
            }));
            assert_eq!(view.title, title, "checkpoint {}", checkpoint);
            assert_eq!(view.message, DEFAULT_APPROVAL_MESSAGE);
        }
    }

    #[test]
    fn test_approval_without_checkpoint() {
        let view = approval(json!({"status": "awaiting_approval", "interrupt": [{"message": "Go on?"}]}));
        assert_eq!(view.title, "Review & continue");
        assert_eq!(view.message, "Go on?");
        assert!(view.preview.is_none());
    }

    #[test]
    fn test_destination_preview() {
        let view = approval(json!({
            "status": "awaiting_approval",
            "interrupt": [{"checkpoint": "destination_shortlist", "message": "Pick a destination"}],
            "state": {"destination_shortlist": ["Rishikesh", "Manali"]}
        }));
        assert_eq!(view.message, "Pick a destination");
        assert_eq!(
            view.preview,
            Some(ApprovalPreview::Destinations(vec!["Rishikesh".to_string(), "Manali".to_string()]))
        );

        let from_interrupt = approval(json!({
            "status": "awaiting_approval",
            "interrupt": [{"checkpoint": "destination_shortlist", "destination_shortlist": ["Goa"]}]
        }));
        assert_eq!(from_interrupt.preview, Some(ApprovalPreview::Destinations(vec!["Goa".to_string()])));
    }

    #[test]
    fn test_budget_preview_non_zero_lines() {
        let view = approval(json!({
            "status": "awaiting_approval",
            "interrupt": [{
                "checkpoint": "budget_allocation",
                "budget_allocation": {"transport": 0, "stay": 4000, "food": 2000, "buffer": 0}
            }]
        }));
        let Some(ApprovalPreview::Budget(lines)) = view.preview else {
            panic!("expected budget preview");
        };
        assert_eq!(
            lines,
            vec![
                BudgetLine {
                    category: "stay",
                    amount: "₹4,000".to_string()
                },
                BudgetLine {
                    category: "food",
                    amount: "₹2,000".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_itinerary_preview_day_count() {
        let view = approval(json!({
            "status": "awaiting_approval",
            "interrupt": [{"checkpoint": "final_itinerary", "day_by_day_itinerary": [{"day": 1}, {"day": 2}, {"day": 3}]}]
        }));
        assert_eq!(view.preview, Some(ApprovalPreview::Itinerary { days: 3 }));
    }

    #[test]
    fn test_awaiting_without_interrupt_falls_back_to_completed() {
        let view = render_result(Some(&result(json!({
            "status": "awaiting_approval",
            "thread_id": "t",
            "state": {"destination_shortlist": ["Goa"]}
        }))));
        assert!(matches!(view, PlanView::Completed(_)));
    }

    #[test]
    fn test_complete_with_interrupt_renders_completed() {
        let view = render_result(Some(&result(json!({
            "status": "complete",
            "interrupt": [{"checkpoint": "budget_allocation"}],
            "state": {}
        }))));
        assert!(matches!(view, PlanView::Completed(_)));
    }

    #[test]
    fn test_render_is_pure() {
        let r = result(json!({"status": "complete", "state": full_state()}));
        assert_eq!(render_result(Some(&r)), render_result(Some(&r)));
    }

    #[test]
    fn test_approve_label() {
        assert_eq!(approve_label(false), "Approve & continue");
        assert_eq!(approve_label(true), "Sending…");
    }
}
