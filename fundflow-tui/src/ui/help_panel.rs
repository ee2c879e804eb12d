//! Help overlay: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keyboard [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-3", "Focus panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panel focus");
    key(&mut lines, "[ / ]", "Select previous / next fund");
    key(&mut lines, "m", "Cycle chart mode");
    key(&mut lines, "a", "Generate or refresh AI analysis");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Funds");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "g / G", "First / last fund");
    key(&mut lines, "Enter / Space", "Select fund under cursor");
    lines.push(Line::from(""));

    section(&mut lines, "Chart");
    key(&mut lines, "h", "NAV history");
    key(&mut lines, "i", "Intraday session with IOPV and alert tick");
    key(&mut lines, "c", "Percent change vs peers");
    key(&mut lines, "j / k", "Select next / previous fund");
    lines.push(Line::from(""));

    section(&mut lines, "AI Analyst");
    key(&mut lines, "Enter / r", "Generate, refresh or retry");
    key(&mut lines, "j / k", "Scroll the analysis");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "", "Switching funds discards any pending analysis");
    key(&mut lines, "", "The API key is read from the configured environment variable");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
