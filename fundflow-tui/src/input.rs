//! Keyboard input dispatch: overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Funds; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Analyst; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('[') => { app.select_relative(-1); return; }
        KeyCode::Char(']') => { app.select_relative(1); return; }
        KeyCode::Char('m') => {
            app.chart_mode = app.chart_mode.next();
            return;
        }
        KeyCode::Char('a') => {
            app.request_analysis();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Funds => handle_funds_key(app, key),
        Panel::Chart => handle_chart_key(app, key),
        Panel::Analyst => handle_analyst_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_funds_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.move_cursor(isize::MIN / 2),
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX / 2),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_cursor(),
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    use crate::app::ChartMode;

    match key.code {
        KeyCode::Char('h') => app.chart_mode = ChartMode::History,
        KeyCode::Char('i') => app.chart_mode = ChartMode::Intraday,
        KeyCode::Char('c') => app.chart_mode = ChartMode::Compare,
        KeyCode::Char('j') | KeyCode::Down => app.select_relative(1),
        KeyCode::Char('k') | KeyCode::Up => app.select_relative(-1),
        _ => {}
    }
}

fn handle_analyst_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') => app.request_analysis(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.analysis_scroll = app.analysis_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.analysis_scroll = app.analysis_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::harness;
    use crate::app::ChartMode;
    use fundflow_core::analysis::AnalysisState;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn quit_and_overlays() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('?'));
        assert_eq!(h.app.overlay, Overlay::Help);
        // any key dismisses help without acting
        press(&mut h.app, KeyCode::Char('q'));
        assert_eq!(h.app.overlay, Overlay::None);
        assert!(h.app.running);

        press(&mut h.app, KeyCode::Char('e'));
        assert_eq!(h.app.overlay, Overlay::ErrorHistory);
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.overlay, Overlay::None);

        press(&mut h.app, KeyCode::Char('q'));
        assert!(!h.app.running);
    }

    #[test]
    fn fund_list_navigation_selects_on_enter() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('j'));
        press(&mut h.app, KeyCode::Char('j'));
        assert_eq!(h.app.cursor, 2);
        assert_eq!(h.app.selected, Some(0));
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.app.view.as_ref().unwrap().fund.code, "DIV-100");
    }

    #[test]
    fn chart_mode_keys() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('2'));
        press(&mut h.app, KeyCode::Char('i'));
        assert_eq!(h.app.chart_mode, ChartMode::Intraday);
        press(&mut h.app, KeyCode::Char('m'));
        assert_eq!(h.app.chart_mode, ChartMode::Compare);
    }

    #[test]
    fn analyst_enter_starts_loading() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('3'));
        press(&mut h.app, KeyCode::Enter);
        assert!(matches!(h.app.analysis.state(), AnalysisState::Loading { .. }));
        assert!(h.commands.try_recv().is_ok());
    }

    #[test]
    fn bracket_keys_switch_selection() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char(']'));
        assert_eq!(h.app.selected, Some(1));
        press(&mut h.app, KeyCode::Char('['));
        press(&mut h.app, KeyCode::Char('['));
        assert_eq!(h.app.selected, Some(0));
    }
}
