//! Panel 3, AI analyst: on-demand narrative for the selected fund.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use fundflow_core::analysis::AnalysisState;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let code = app
        .view
        .as_ref()
        .map(|v| v.fund.code.as_str())
        .unwrap_or("-");

    let lines: Vec<Line> = match app.analysis.state() {
        AnalysisState::Idle => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Get an AI-generated market read for {code}."),
                theme::muted(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", theme::muted()),
                Span::styled("a", theme::accent_bold()),
                Span::styled(" (or Enter here) to generate insight.", theme::muted()),
            ]),
        ],
        AnalysisState::Loading { .. } => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Analyzing {code} with {}...", app.settings.model),
                theme::accent(),
            )),
        ],
        AnalysisState::Ready { text } => {
            let mut lines = markdown_lines(text);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "r refresh  j/k scroll",
                theme::muted(),
            )));
            lines
        }
        AnalysisState::Failed { message } => vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), theme::negative())),
            Line::from(""),
            Line::from(Span::styled("Press r to retry.", theme::muted())),
        ],
    };

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.analysis_scroll, 0));
    f.render_widget(para, area);
}

/// Light Markdown rendering: headings, bullets and `**bold**` runs.
pub fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|raw| {
            let trimmed = raw.trim_start();
            if let Some(heading) = trimmed.strip_prefix('#') {
                let heading = heading.trim_start_matches('#').trim();
                return Line::from(Span::styled(heading.to_string(), theme::accent_bold()));
            }
            let (prefix, body) = match trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                Some(rest) => ("  • ", rest),
                None => ("", trimmed),
            };
            let mut spans = Vec::new();
            if !prefix.is_empty() {
                spans.push(Span::styled(prefix, theme::accent()));
            }
            spans.extend(inline_bold(body));
            Line::from(spans)
        })
        .collect()
}

fn inline_bold(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, part) in text.split("**").enumerate() {
        if part.is_empty() {
            continue;
        }
        // odd segments sit between a pair of markers
        let style = if i % 2 == 1 {
            theme::text().add_modifier(Modifier::BOLD)
        } else {
            theme::text()
        };
        spans.push(Span::styled(part.to_string(), style));
    }
    spans
}
