//! Panel 2, chart: NAV history, intraday session, or peer comparison.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use fundflow_core::dashboard::FundView;

use crate::app::{AppState, ChartMode};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view {
        Some(view) => match app.chart_mode {
            ChartMode::History => render_history(f, area, view),
            ChartMode::Intraday => render_intraday(f, area, view),
            ChartMode::Compare => render_compare(f, area, view),
        },
        None => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Select a fund from the list to display its chart.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Y bounds with 5% padding; a flat series still gets a visible band.
fn y_bounds<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for data in series {
        for &(_, y) in data {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        return [0.0, 1.0];
    }
    let padding = ((max_y - min_y).abs() * 0.05).max(0.01);
    [min_y - padding, max_y + padding]
}

fn axis_labels(low: String, high: String) -> Vec<Span<'static>> {
    vec![Span::styled(low, theme::muted()), Span::styled(high, theme::muted())]
}

fn render_history(f: &mut Frame, area: Rect, view: &FundView) {
    let data: Vec<(f64, f64)> = view
        .history
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let [y_min, y_max] = y_bounds([data.as_slice()]);
    let x_max = data.len().saturating_sub(1) as f64;

    let color = if view.fund.is_up_day() {
        theme::POSITIVE
    } else {
        theme::NEGATIVE
    };
    let dataset = Dataset::default()
        .name(format!("{} NAV", view.fund.code))
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(&data);

    let (first, last) = match (view.history.first(), view.history.last()) {
        (Some(a), Some(b)) => (a.date.format("%m-%d").to_string(), b.date.format("%m-%d").to_string()),
        _ => (String::new(), String::new()),
    };

    let chart = Chart::new(vec![dataset])
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(axis_labels(first, last)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("NAV", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(axis_labels(format!("{y_min:.2}"), format!("{y_max:.2}"))),
        );

    f.render_widget(chart, area);
}

fn render_intraday(f: &mut Frame, area: Rect, view: &FundView) {
    let price: Vec<(f64, f64)> = view
        .intraday
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let iopv: Vec<(f64, f64)> = view
        .intraday
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.indicative_value))
        .collect();
    let triggers: Vec<(f64, f64)> = view
        .intraday
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_trigger)
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let [y_min, y_max] = y_bounds([price.as_slice(), iopv.as_slice()]);
    let x_max = price.len().saturating_sub(1) as f64;

    let mut datasets = vec![
        Dataset::default()
            .name("IOPV")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&iopv),
        Dataset::default()
            .name(format!("{} price", view.fund.code))
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&price),
    ];
    if !triggers.is_empty() {
        datasets.push(
            Dataset::default()
                .name("alert")
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(theme::WARNING))
                .graph_type(GraphType::Scatter)
                .data(&triggers),
        );
    }

    let time_label = |i: usize| {
        view.intraday
            .get(i)
            .map(|p| Span::styled(p.time.format("%H:%M").to_string(), theme::muted()))
            .unwrap_or_else(|| Span::raw(""))
    };
    let mid = view.intraday.len() / 2;

    let chart = Chart::new(datasets)
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    time_label(0),
                    time_label(mid),
                    time_label(view.intraday.len().saturating_sub(1)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    format!("open {:.2}", view.implied_open),
                    theme::muted(),
                ))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(axis_labels(format!("{y_min:.2}"), format!("{y_max:.2}"))),
        );

    f.render_widget(chart, area);
}

fn render_compare(f: &mut Frame, area: Rect, view: &FundView) {
    let primary: Vec<(f64, f64)> = view
        .comparison
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.pct_change))
        .collect();
    let peers: Vec<(String, Vec<(f64, f64)>)> = view
        .peers
        .iter()
        .map(|peer| {
            let data = view
                .comparison
                .iter()
                .enumerate()
                .map(|(i, p)| (i as f64, p.peers.get(&peer.code).copied().unwrap_or(0.0)))
                .collect();
            (peer.code.clone(), data)
        })
        .collect();

    let [y_min, y_max] = y_bounds(
        std::iter::once(primary.as_slice()).chain(peers.iter().map(|(_, d)| d.as_slice())),
    );
    let x_max = primary.len().saturating_sub(1) as f64;

    let mut datasets: Vec<Dataset> = peers
        .iter()
        .enumerate()
        .map(|(i, (code, data))| {
            Dataset::default()
                .name(code.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::peer_color(i)))
                .graph_type(GraphType::Line)
                .data(data)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .name(view.fund.code.clone())
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&primary),
    );

    let chart = Chart::new(datasets)
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(axis_labels("start".into(), "now".into())),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("% from start", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(axis_labels(format!("{y_min:+.1}%"), format!("{y_max:+.1}%"))),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_five_percent() {
        let data = [(0.0, 100.0), (1.0, 200.0)];
        let [lo, hi] = y_bounds([data.as_slice()]);
        assert!((lo - 95.0).abs() < 1e-9);
        assert!((hi - 205.0).abs() < 1e-9);
    }

    #[test]
    fn flat_and_empty_series_get_a_band() {
        let flat = [(0.0, 5.0), (1.0, 5.0)];
        let [lo, hi] = y_bounds([flat.as_slice()]);
        assert!(lo < 5.0 && hi > 5.0);
        assert_eq!(y_bounds(std::iter::empty::<&[(f64, f64)]>()), [0.0, 1.0]);
    }
}
