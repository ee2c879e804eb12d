//! Panel 1, funds: catalog list with day change and hotspot status.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use fundflow_core::hotspot::HotspotStatus;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, fund) in app.funds().iter().enumerate() {
        let is_cursor = i == app.cursor;
        let is_selected = app.selected == Some(i);
        let hotspot = app.hotspots.get(i);

        let marker = if is_selected { "▶ " } else { "  " };
        let change = hotspot.map_or_else(
            || format!("{:+.2}%", fund.day_change_percent),
            |h| h.metric.clone(),
        );
        let change_style = theme::change_color(fund.day_change_percent);

        let code_style = if is_cursor {
            theme::selected_row()
        } else if is_selected {
            theme::accent_bold()
        } else {
            theme::text()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<10}", fund.code), code_style),
            Span::styled(format!("{:>9.2} ", fund.current_price), theme::text()),
            Span::styled(format!("{change:>7}"), change_style),
        ]));

        let mut detail = vec![
            Span::raw("  "),
            Span::styled(fund.name.clone(), theme::muted()),
        ];
        if let Some(h) = hotspot {
            let style = match h.status {
                HotspotStatus::Pending => theme::warning(),
                HotspotStatus::Processing => theme::neutral(),
                HotspotStatus::Completed => theme::muted(),
            };
            detail.push(Span::styled(format!("  [{}]", h.status), style));
        }
        lines.push(Line::from(detail));

        if let Some(h) = hotspot {
            lines.push(Line::from(Span::styled(
                format!("  {}", h.reason),
                theme::muted(),
            )));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "j/k move  Enter select  [/] prev/next",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
