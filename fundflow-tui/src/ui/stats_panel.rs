//! Stats card for the selected fund.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use fundflow_core::dashboard::HistorySource;

use crate::app::AppState;
use crate::theme;
use crate::ui::thousands;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        f.render_widget(
            Paragraph::new(Span::styled("No fund selected.", theme::muted())),
            area,
        );
        return;
    };
    let stats = &view.stats;
    let fund = &view.fund;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("{} ", fund.code), theme::accent_bold()),
        Span::styled(format!("{} · {} risk", fund.sector, fund.risk_level), theme::muted()),
    ]));
    stat(
        &mut lines,
        "Market Cap",
        format!("{} {}M", stats.currency, thousands(stats.market_cap)),
    );
    stat(&mut lines, "Close", format!("{:.2}", view.close()));
    stat(&mut lines, "Implied Open", format!("{:.2}", view.implied_open));
    stat(&mut lines, "52W High", format!("{:.2}", stats.high_52w));
    stat(&mut lines, "52W Low", format!("{:.2}", stats.low_52w));

    if let (Some(high), Some(low)) = (stats.period_high, stats.period_low) {
        stat(&mut lines, "Period High", format!("{high:.2}"));
        stat(&mut lines, "Period Low", format!("{low:.2}"));
    }
    if let Some(ret) = stats.period_return_pct {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>13}: ", "Period Return"), theme::muted()),
            Span::styled(format!("{ret:+.2}%"), theme::change_color(ret)),
        ]));
    }

    let source = match view.history_source {
        HistorySource::Recorded => "recorded",
        HistorySource::Synthetic => "simulated",
    };
    stat(&mut lines, "History", format!("{} days, {source}", stats.points));

    f.render_widget(Paragraph::new(lines), area);
}

fn stat(lines: &mut Vec<Line<'_>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(format!("{label:>13}: "), theme::muted()),
        Span::styled(value, theme::text()),
    ]));
}
