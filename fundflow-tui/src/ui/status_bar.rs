//! One-line footer: selection and analysis badge, status message, key hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use fundflow_core::analysis::AnalysisState;

use crate::app::{AppState, StatusLevel};
use crate::theme;

const HINTS: &str = "1-3 panel  m mode  a analyze  ? help  e errors  q quit ";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(HINTS.len() as u16)])
        .split(area);

    let mut left = vec![analysis_badge(app.analysis.state())];
    if let Some(fund) = app.selected_fund() {
        left.push(Span::styled(format!(" {} ", fund.code), theme::accent_bold()));
    }
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::text(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        left.push(Span::styled(msg.as_str(), style));
    }
    f.render_widget(Paragraph::new(Line::from(left)), halves[0]);

    let hints = Paragraph::new(Span::styled(HINTS, theme::muted())).alignment(Alignment::Right);
    f.render_widget(hints, halves[1]);
}

fn analysis_badge(state: &AnalysisState) -> Span<'static> {
    match state {
        AnalysisState::Idle => Span::styled(" AI ·", theme::muted()),
        AnalysisState::Loading { .. } => Span::styled(" AI …", theme::warning()),
        AnalysisState::Ready { .. } => Span::styled(" AI ✓", theme::positive()),
        AnalysisState::Failed { .. } => Span::styled(" AI ✗", theme::negative()),
    }
}
