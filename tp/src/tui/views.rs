//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{AppState, Focus, InteractionMode};
use crate::view::{PlanView, TextLine, Tone, approve_label, layout};

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    let error_height = if state.page.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Trip description
            Constraint::Length(error_height), // Error banner
            Constraint::Min(0),               // Result
            Constraint::Length(3),            // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_input(state, frame, chunks[1]);
    if let Some(error) = &state.page.error {
        render_error(error, frame, chunks[2]);
    }
    render_result(state, frame, chunks[3]);
    render_footer(state, frame, chunks[4]);

    if state.interaction_mode == InteractionMode::Help {
        render_help_overlay(frame, chunks[3]);
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Title => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Tone::Heading => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Tone::Body => Style::default(),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Accent => Style::default().fg(Color::Magenta),
        Tone::Price => Style::default().fg(Color::Green),
        Tone::Link => Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        Tone::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn to_line(line: &TextLine) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.fragments.len() + 1);
    if line.indent > 0 {
        spans.push(Span::raw("  ".repeat(line.indent)));
    }
    spans.extend(
        line.fragments
            .iter()
            .map(|f| Span::styled(f.text.clone(), tone_style(f.tone))),
    );
    Line::from(spans)
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled("TripPlanner ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(state.proxy_url.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw(" │ "),
        Span::styled(state.status_line(), Style::default().fg(Color::Yellow)),
    ];
    if state.page.loading {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{} Planning…", state.spinner()),
            Style::default().fg(Color::Green),
        ));
    }

    let header =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" AI Travel Planning "));
    frame.render_widget(header, area);
}

/// Render the trip description input
fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let focused = state.focus == Focus::Input;
    let mut spans = vec![Span::raw(state.page.input.clone())];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    if state.page.input.is_empty() && !focused {
        spans = vec![Span::styled(
            "e.g. 4-day solo trip from Delhi to Rishikesh under ₹15,000",
            Style::default().fg(Color::DarkGray),
        )];
    }

    let title = if state.page.loading {
        " Describe your trip · Planning… "
    } else {
        " Describe your trip · Enter to plan "
    };
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(focused))
            .title(title),
    );
    frame.render_widget(input, area);
}

fn render_error(error: &str, frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new(Line::from(Span::styled(error.to_string(), tone_style(Tone::Error))))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

/// Lines for the result pane, including the approve action
fn result_lines(state: &AppState) -> Vec<Line<'static>> {
    let view = state.page.view();
    let mut lines: Vec<Line<'static>> = layout(&view).iter().map(to_line).collect();

    match &view {
        PlanView::Empty => {
            lines.push(Line::from(Span::styled(
                "Describe your trip above and press Enter.",
                tone_style(Tone::Muted),
            )));
        }
        PlanView::Approval(_) if state.page.can_approve() => {
            lines.push(Line::from(""));
            let style = if state.page.loading {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::styled(" a ", tone_style(Tone::Heading)),
                Span::styled(format!(" {} ", approve_label(state.page.loading)), style),
            ]));
        }
        _ => {}
    }
    lines
}

/// Render the plan result pane
fn render_result(state: &mut AppState, frame: &mut Frame, area: Rect) {
    let lines = result_lines(state);
    state.clamp_scroll(lines.len());

    let focused = state.focus == Focus::Result;
    let result = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(focused))
                .title(" Plan "),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(result, area);
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(label),
    ]
}

/// Render the footer bar
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let hints: Vec<Span> = match state.focus {
        Focus::Input => [
            key_hint(" Enter", " Plan "),
            key_hint(" Tab", " Result "),
            key_hint(" F1", " Help "),
            key_hint(" Ctrl+c", " Quit "),
        ]
        .into_iter()
        .flatten()
        .collect(),
        Focus::Result => [
            key_hint(" a", " Approve "),
            key_hint(" ↑↓", " Scroll "),
            key_hint(" Tab", " Edit "),
            key_hint(" ?", " Help "),
            key_hint(" q", " Quit "),
        ]
        .into_iter()
        .flatten()
        .collect(),
    };

    let footer = Paragraph::new(Line::from(hints)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let row = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<11}", key), Style::default().fg(Color::Cyan)),
            Span::raw(label),
        ])
    };
    let heading = |text: &'static str| Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)));

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        heading("Trip description"),
        row("Enter", "Plan my trip"),
        row("Backspace", "Delete character"),
        row("Tab, Esc", "Focus result"),
        Line::from(""),
        heading("Result"),
        row("a", "Approve & continue"),
        row("↑/↓, j/k", "Scroll"),
        row("PgUp/PgDn", "Scroll a page"),
        row("g", "Back to top"),
        row("Tab, i", "Edit description"),
        row("q", "Quit"),
        Line::from(""),
        row("Ctrl+c", "Quit from anywhere"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViewResult;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn screen(state: &mut AppState) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(state, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_empty_screen() {
        let mut state = AppState::with_proxy_url("http://localhost:3000");
        let text = screen(&mut state);
        assert!(text.contains("TripPlanner"));
        assert!(text.contains("Describe your trip above and press Enter."));
    }

    #[test]
    fn test_approval_screen_shows_button() {
        let mut state = AppState::new();
        state.page.result = Some(ViewResult::from_body(&json!({
            "thread_id": "plan-1",
            "status": "awaiting_approval",
            "interrupt": [{"checkpoint": "destination_shortlist", "message": "Pick one"}],
            "state": {"destination_shortlist": ["Rishikesh"]}
        })));
        let text = screen(&mut state);
        assert!(text.contains("Approval needed"));
        assert!(text.contains("Confirm destinations"));
        assert!(text.contains("[Rishikesh]"));
        assert!(text.contains("Approve & continue"));

        state.page.loading = true;
        let text = screen(&mut state);
        assert!(text.contains("Sending…"));
    }

    #[test]
    fn test_error_banner() {
        let mut state = AppState::new();
        state.page.error = Some("Please describe your trip.".to_string());
        let text = screen(&mut state);
        assert!(text.contains("Please describe your trip."));
    }

    #[test]
    fn test_completed_screen_has_no_approve_button() {
        let mut state = AppState::new();
        state.page.result = Some(ViewResult::from_body(&json!({
            "thread_id": "plan-1",
            "status": "complete",
            "state": {"parsed_intent": {"destination": "Goa"}}
        })));
        let text = screen(&mut state);
        assert!(text.contains("Trip summary"));
        assert!(!text.contains("Approve & continue"));
    }
}
