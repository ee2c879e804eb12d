//! Top-level UI layout: fund list, chart, stats and analyst with a status bar.

pub mod analyst_panel;
pub mod chart_panel;
pub mod fund_list;
pub mod help_panel;
pub mod overlays;
pub mod stats_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(8)])
        .split(columns[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(right[1]);

    let funds = framed(f, columns[0], Panel::Funds.label().to_string(), app, Some(Panel::Funds));
    fund_list::render(f, funds, app);

    let chart_title = format!("{} · {}", Panel::Chart.label(), app.chart_mode.label());
    let chart = framed(f, right[0], chart_title, app, Some(Panel::Chart));
    chart_panel::render(f, chart, app);

    let stats = framed(f, bottom[0], "Stats".to_string(), app, None);
    stats_panel::render(f, stats, app);

    let analyst = framed(f, bottom[1], Panel::Analyst.label().to_string(), app, Some(Panel::Analyst));
    analyst_panel::render(f, analyst, app);

    // Draw status bar.
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match app.overlay {
        Overlay::Help => help_panel::render(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a bordered block and return its inner area. Focusable panels get
/// their number in the title and an accent border when active.
fn framed(
    f: &mut Frame,
    area: Rect,
    title: String,
    app: &AppState,
    panel: Option<Panel>,
) -> Rect {
    let is_active = panel == Some(app.active_panel);
    let title = match panel {
        Some(p) => format!(" {title} [{}] ", p.index() + 1),
        None => format!(" {title} "),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(title)
        .title_style(theme::panel_title(is_active));

    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

/// `4500` → `4,500`
pub fn thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::harness;
    use crate::app::ChartMode;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &AppState) -> String {
        let backend = TestBackend::new(140, 44);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(thousands(4500.0), "4,500");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1_234_567.0), "1,234,567");
        assert_eq!(thousands(-1200.0), "-1,200");
    }

    #[test]
    fn draws_every_panel_in_every_mode() {
        let mut h = harness();
        for mode in [ChartMode::History, ChartMode::Intraday, ChartMode::Compare] {
            h.app.chart_mode = mode;
            let text = screen(&h.app);
            assert!(text.contains("TECH-001"));
            assert!(text.contains(mode.label()));
            assert!(text.contains("52W High"));
        }
    }

    #[test]
    fn draws_overlays() {
        let mut h = harness();
        h.app.overlay = Overlay::Help;
        assert!(screen(&h.app).contains("Keyboard"));
        h.app.overlay = Overlay::ErrorHistory;
        assert!(screen(&h.app).contains("Error History"));
    }
}
