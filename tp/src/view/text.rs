//! Line layout for plan views
//!
//! Turns a [`PlanView`] into lines of toned fragments. The TUI maps tones to
//! ratatui styles and the CLI maps them to terminal colors, so both frontends
//! show the same layout.

use super::{
    ApprovalPreview, ApprovalView, BudgetLine, CompletedPlan, FALLBACK_MESSAGE, Link, PlanView, Section,
};

/// Visual weight of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Heading,
    Body,
    Muted,
    Accent,
    Price,
    Link,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub tone: Tone,
    pub text: String,
}

/// One output line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    pub indent: usize,
    pub fragments: Vec<Fragment>,
}

impl TextLine {
    fn new(indent: usize) -> Self {
        Self {
            indent,
            fragments: Vec::new(),
        }
    }

    fn single(indent: usize, tone: Tone, text: impl Into<String>) -> Self {
        Self::new(indent).push(tone, text)
    }

    fn blank() -> Self {
        Self::default()
    }

    fn push(mut self, tone: Tone, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            if !self.fragments.is_empty() {
                self.fragments.push(Fragment {
                    tone: Tone::Muted,
                    text: "  ".to_string(),
                });
            }
            self.fragments.push(Fragment { tone, text });
        }
        self
    }

    fn push_opt(self, tone: Tone, text: Option<&str>) -> Self {
        match text {
            Some(t) => self.push(tone, t),
            None => self,
        }
    }

    fn push_links(self, links: &[Link]) -> Self {
        links
            .iter()
            .fold(self, |line, link| line.push(Tone::Link, format!("[{}] {}", link.label, link.url)))
    }

    /// Text without tones, indented with two spaces per level
    pub fn plain(&self) -> String {
        let body: String = self.fragments.iter().map(|f| f.text.as_str()).collect();
        format!("{}{}", "  ".repeat(self.indent), body)
    }
}

/// Lay a view out as lines
pub fn layout(view: &PlanView) -> Vec<TextLine> {
    match view {
        PlanView::Empty => Vec::new(),
        PlanView::Approval(approval) => approval_lines(approval),
        PlanView::Completed(plan) => completed_lines(plan),
    }
}

fn budget_rows(lines: &[BudgetLine], indent: usize) -> Vec<TextLine> {
    lines
        .iter()
        .map(|l| {
            TextLine::new(indent)
                .push(Tone::Body, format!("{:<12}", l.category))
                .push(Tone::Price, l.amount.clone())
        })
        .collect()
}

/// Badge shown above every approval prompt
pub const APPROVAL_BADGE: &str = "Approval needed";

fn approval_lines(view: &ApprovalView) -> Vec<TextLine> {
    let mut lines = vec![
        TextLine::single(0, Tone::Muted, APPROVAL_BADGE),
        TextLine::single(0, Tone::Title, view.title),
        TextLine::single(0, Tone::Body, view.message.clone()),
    ];
    if let Some(preview) = &view.preview {
        lines.push(TextLine::blank());
        lines.push(TextLine::single(0, Tone::Heading, preview.label()));
        match preview {
            ApprovalPreview::Destinations(names) => {
                let pills = names.iter().map(|n| format!("[{}]", n)).collect::<Vec<_>>().join(" ");
                lines.push(TextLine::single(1, Tone::Accent, pills));
            }
            ApprovalPreview::Budget(rows) => lines.extend(budget_rows(rows, 1)),
            ApprovalPreview::Itinerary { days } => {
                lines.push(TextLine::single(1, Tone::Body, format!("{} day(s) planned.", days)));
            }
        }
    }
    lines
}

fn completed_lines(plan: &CompletedPlan) -> Vec<TextLine> {
    let mut lines = Vec::new();
    for (i, section) in plan.sections.iter().enumerate() {
        if i > 0 {
            lines.push(TextLine::blank());
        }
        let heading_tone = match section {
            Section::PlannerError(_) => Tone::Error,
            _ => Tone::Heading,
        };
        lines.push(TextLine::single(0, heading_tone, format!("{} {}", section.icon(), section.title())));
        lines.extend(section_lines(section));
    }
    lines
}

fn section_lines(section: &Section) -> Vec<TextLine> {
    match section {
        Section::Notice(message) => vec![TextLine::single(1, Tone::Body, message.clone())],
        Section::PlannerError(message) => vec![TextLine::single(1, Tone::Error, message.clone())],
        Section::TripSummary(summary) => {
            let mut lines: Vec<TextLine> = summary
                .fields
                .iter()
                .map(|f| {
                    TextLine::new(1)
                        .push(Tone::Muted, format!("{:<12}", f.label))
                        .push(Tone::Body, f.value.clone())
                })
                .collect();
            if !summary.interests.is_empty() {
                let pills = summary.interests.iter().map(|i| format!("[{}]", i)).collect::<Vec<_>>().join(" ");
                lines.push(TextLine::single(1, Tone::Accent, pills));
            }
            lines
        }
        Section::Destinations(names) => {
            let pills = names.iter().map(|n| format!("[{}]", n)).collect::<Vec<_>>().join(" ");
            vec![TextLine::single(1, Tone::Accent, pills)]
        }
        Section::Flights(flights) => flights
            .iter()
            .map(|f| {
                TextLine::new(1)
                    .push(Tone::Body, f.route.clone())
                    .push_opt(Tone::Muted, f.times.as_deref())
                    .push_opt(Tone::Muted, f.carrier.as_deref())
                    .push_opt(Tone::Price, f.price.as_deref())
                    .push_links(&f.links)
            })
            .collect(),
        Section::Stay(hotels) => hotels
            .iter()
            .flat_map(|h| {
                let mut lines = vec![
                    TextLine::new(1)
                        .push(Tone::Body, h.name.clone())
                        .push_opt(Tone::Price, h.price.as_deref())
                        .push_opt(Tone::Accent, h.rating.as_deref())
                        .push_links(&h.links),
                ];
                if let Some(address) = &h.address {
                    lines.push(TextLine::single(2, Tone::Muted, address.clone()));
                }
                lines
            })
            .collect(),
        Section::Activities(activities) => activities
            .iter()
            .map(|a| {
                TextLine::new(1)
                    .push(Tone::Body, a.name.clone())
                    .push_opt(Tone::Muted, a.meta.as_deref())
                    .push_opt(Tone::Price, a.price.as_deref())
                    .push_links(&a.links)
            })
            .collect(),
        Section::Weather(days) => days
            .iter()
            .map(|w| {
                TextLine::new(1)
                    .push(Tone::Body, w.date.clone())
                    .push_opt(Tone::Muted, w.summary.as_deref())
                    .push_opt(Tone::Accent, w.temperature.as_deref())
            })
            .collect(),
        Section::LocalTips(tips) => tips
            .iter()
            .map(|t| TextLine::single(1, Tone::Body, format!("• {}", t)))
            .collect(),
        Section::Budget(budget) => {
            let mut lines = Vec::new();
            if let Some(reasoning) = &budget.reasoning {
                lines.push(TextLine::single(1, Tone::Muted, reasoning.clone()));
            }
            lines.extend(budget_rows(&budget.lines, 1));
            lines
        }
        Section::Itinerary(days) => days
            .iter()
            .flat_map(|day| {
                let mut lines = vec![TextLine::single(1, Tone::Accent, day.heading.clone())];
                if let Some(notes) = &day.notes {
                    lines.push(TextLine::single(2, Tone::Muted, notes.clone()));
                }
                for item in &day.items {
                    lines.push(
                        TextLine::new(2)
                            .push_opt(Tone::Muted, item.time.as_deref())
                            .push(Tone::Body, item.title.clone())
                            .push_opt(Tone::Muted, item.duration.as_deref())
                            .push_opt(Tone::Price, item.price.as_deref())
                            .push_links(&item.links),
                    );
                    if let Some(description) = &item.description {
                        lines.push(TextLine::single(3, Tone::Muted, description.clone()));
                    }
                }
                lines
            })
            .collect(),
        Section::Bookings(bookings) => bookings
            .iter()
            .map(|b| {
                TextLine::new(1)
                    .push(Tone::Muted, b.kind.clone())
                    .push(Tone::Body, b.label.clone())
                    .push_opt(Tone::Price, b.price.as_deref())
                    .push_links(&b.links)
            })
            .collect(),
        Section::DecisionLog(entries) => entries
            .iter()
            .map(|d| {
                TextLine::new(1)
                    .push(Tone::Accent, d.agent.clone())
                    .push_opt(Tone::Muted, d.step.as_deref().map(|s| format!("({})", s)).as_deref())
                    .push(Tone::Body, d.message.clone())
            })
            .collect(),
        Section::Fallback => vec![TextLine::single(1, Tone::Muted, FALLBACK_MESSAGE)],
    }
}
