//! Error history overlay: newest first, one row per record.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use ratatui::Frame;

use crate::app::{AppState, ErrorCategory, ErrorRecord};
use crate::theme;
use crate::ui::centered_rect;

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(" Error History · {} ", summary(app)))
        .title_style(theme::negative())
        .title_bottom(Line::from(" j/k scroll  Esc close ").style(theme::muted()));

    if app.error_history.is_empty() {
        let empty = List::new([ListItem::new(Span::styled("No errors recorded.", theme::muted()))])
            .block(block);
        f.render_widget(empty, popup);
        return;
    }

    let items: Vec<ListItem> = app.error_history.iter().map(item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected_row());
    let mut state = ListState::default().with_selected(Some(app.error_scroll));
    f.render_stateful_widget(list, popup, &mut state);
}

fn summary(app: &AppState) -> String {
    let count = |cat: ErrorCategory| app.error_history.iter().filter(|e| e.category == cat).count();
    [ErrorCategory::Analysis, ErrorCategory::Data, ErrorCategory::Worker]
        .into_iter()
        .map(|cat| format!("{} {}", cat.label(), count(cat)))
        .collect::<Vec<_>>()
        .join("  ")
}

fn item(record: &ErrorRecord) -> ListItem<'_> {
    let mut lines = vec![Line::from(vec![
        Span::styled(record.timestamp.format("%H:%M:%S ").to_string(), theme::muted()),
        Span::styled(format!("{:<5}", record.category.label()), theme::warning()),
        Span::styled(record.message.as_str(), theme::negative()),
    ])];
    if !record.context.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("               {}", record.context),
            theme::muted(),
        )));
    }
    ListItem::new(lines)
}
