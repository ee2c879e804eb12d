//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use fundflow_core::analysis::{
    AnalysisFailure, AnalysisSession, AnalysisState, Resolution, SessionError,
};
use fundflow_core::catalog::{FundRepository, InMemoryCatalog};
use fundflow_core::dashboard::{DashboardBuilder, FundView};
use fundflow_core::domain::Fund;
use fundflow_core::hotspot::Hotspot;
use fundflow_core::rng::RngHierarchy;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Funds,
    Chart,
    Analyst,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Funds => 0,
            Panel::Chart => 1,
            Panel::Analyst => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Funds),
            1 => Some(Panel::Chart),
            2 => Some(Panel::Analyst),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Funds => "Funds",
            Panel::Chart => "Chart",
            Panel::Analyst => "AI Analyst",
        }
    }

    pub fn next(self) -> Panel {
        match self {
            Panel::Funds => Panel::Chart,
            Panel::Chart => Panel::Analyst,
            Panel::Analyst => Panel::Funds,
        }
    }

    pub fn prev(self) -> Panel {
        match self {
            Panel::Funds => Panel::Analyst,
            Panel::Chart => Panel::Funds,
            Panel::Analyst => Panel::Chart,
        }
    }
}

/// What the chart panel plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Daily NAV over the history window.
    History,
    /// Simulated session ticks with IOPV and peers.
    Intraday,
    /// Percent change from period start, fund vs peers.
    Compare,
}

impl ChartMode {
    pub fn label(self) -> &'static str {
        match self {
            ChartMode::History => "History",
            ChartMode::Intraday => "Intraday",
            ChartMode::Compare => "Compare",
        }
    }

    pub fn next(self) -> ChartMode {
        match self {
            ChartMode::History => ChartMode::Intraday,
            ChartMode::Intraday => ChartMode::Compare,
            ChartMode::Compare => ChartMode::History,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Analysis,
    Data,
    Worker,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Analysis => "AI",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Worker => "WRK",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// How fund views are generated; kept so a view can be rebuilt on selection.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub rng: RngHierarchy,
    pub history_length: usize,
    pub trigger_time: Option<NaiveTime>,
    pub end_date: NaiveDate,
    pub model: String,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub catalog: InMemoryCatalog,
    pub settings: ViewSettings,
    pub hotspots: Vec<Hotspot>,
    pub cursor: usize,
    pub selected: Option<usize>,
    pub view: Option<FundView>,
    pub chart_mode: ChartMode,

    // Analysis
    pub analysis: AnalysisSession,
    pub analysis_scroll: u16,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub cancel: Arc<AtomicBool>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        catalog: InMemoryCatalog,
        settings: ViewSettings,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        let mut app = Self {
            active_panel: Panel::Funds,
            running: true,
            catalog,
            settings,
            hotspots: Vec::new(),
            cursor: 0,
            selected: None,
            view: None,
            chart_mode: ChartMode::History,
            analysis: AnalysisSession::new(),
            analysis_scroll: 0,
            worker_tx,
            worker_rx,
            cancel,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
        };
        let hotspots = app.builder().hotspots();
        app.hotspots = hotspots;
        app.select_fund(0);
        app
    }

    pub fn builder(&self) -> DashboardBuilder<'_> {
        DashboardBuilder::new(&self.catalog, self.settings.rng.clone())
            .with_history_length(self.settings.history_length)
            .with_trigger(self.settings.trigger_time)
            .with_end_date(self.settings.end_date)
    }

    pub fn funds(&self) -> &[Fund] {
        self.catalog.funds()
    }

    pub fn selected_fund(&self) -> Option<&Fund> {
        self.selected.and_then(|i| self.funds().get(i))
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.funds().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    /// Make the fund at `index` the subject of every panel.
    ///
    /// Switching funds forgets the previous analysis; a request still in
    /// flight for the old fund is cancelled and its result will be ignored.
    pub fn select_fund(&mut self, index: usize) {
        let Some(fund) = self.funds().get(index).cloned() else {
            return;
        };
        self.cursor = index;
        if self.selected == Some(index) && self.view.is_some() {
            return;
        }

        let was_loading = self.analysis.is_loading();
        if self.analysis.select(&fund.id) {
            self.analysis_scroll = 0;
            if was_loading {
                self.cancel.store(true, Ordering::Relaxed);
                tracing::debug!(code = %fund.code, "selection changed during analysis");
            }
        }
        self.selected = Some(index);

        let built = self.builder().build(&fund.code);
        match built {
            Ok(view) => {
                self.view = Some(view);
                self.set_status(format!("{}  {}", fund.code, fund.name));
            }
            Err(e) => {
                self.view = None;
                self.push_error(ErrorCategory::Data, e.to_string(), fund.code.clone());
            }
        }
    }

    pub fn select_cursor(&mut self) {
        self.select_fund(self.cursor);
    }

    /// Step the selection itself (not just the cursor) by `delta`.
    pub fn select_relative(&mut self, delta: isize) {
        self.move_cursor(delta);
        self.select_cursor();
    }

    /// Generate or refresh the analysis for the selected fund.
    pub fn request_analysis(&mut self) {
        let (fund, history) = match &self.view {
            Some(view) => (view.fund.clone(), view.history.clone()),
            None => {
                self.set_warning("Select a fund first");
                return;
            }
        };

        let ticket = match self.analysis.begin() {
            Ok(ticket) => ticket,
            Err(SessionError::AlreadyLoading) => {
                self.set_warning("Analysis already in progress");
                return;
            }
            Err(e) => {
                self.set_warning(e.to_string());
                return;
            }
        };
        self.analysis_scroll = 0;

        let cmd = WorkerCommand::Analyze {
            ticket: ticket.clone(),
            fund,
            history,
        };
        if self.worker_tx.send(cmd).is_err() {
            self.analysis.resolve(&ticket, Err(AnalysisFailure));
            self.push_error(
                ErrorCategory::Worker,
                "worker thread is not running".into(),
                ticket.fund().to_string(),
            );
            return;
        }
        self.set_status(format!("Requesting analysis with {}...", self.settings.model));
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::AnalysisDone { ticket, outcome } => {
                let failed = outcome.is_err();
                match self.analysis.resolve(&ticket, outcome) {
                    Resolution::Stale => {}
                    Resolution::Applied if failed => {
                        if let AnalysisState::Failed { message } = self.analysis.state() {
                            let message = message.clone();
                            self.push_error(
                                ErrorCategory::Analysis,
                                message,
                                ticket.fund().to_string(),
                            );
                        }
                    }
                    Resolution::Applied => self.set_status("Analysis ready"),
                }
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        tracing::warn!(category = category.label(), context = %context, "{message}");
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::mpsc;

    pub(crate) struct Harness {
        pub app: AppState,
        pub commands: mpsc::Receiver<WorkerCommand>,
        pub responses: mpsc::Sender<WorkerResponse>,
    }

    pub(crate) fn harness() -> Harness {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let settings = ViewSettings {
            rng: RngHierarchy::new(42),
            history_length: 31,
            trigger_time: NaiveTime::from_hms_opt(10, 42, 0),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            model: "gemini-2.5-flash".into(),
        };
        let app = AppState::new(
            InMemoryCatalog::builtin(),
            settings,
            cmd_tx,
            resp_rx,
            Arc::new(AtomicBool::new(false)),
        );
        Harness {
            app,
            commands: cmd_rx,
            responses: resp_tx,
        }
    }

    fn analyze_command(h: &Harness) -> WorkerCommand {
        h.commands.try_recv().expect("analyze command sent")
    }

    fn drain(h: &mut Harness) {
        while let Ok(resp) = h.app.worker_rx.try_recv() {
            h.app.handle_worker_response(resp);
        }
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Funds.next(), Panel::Chart);
        assert_eq!(Panel::Analyst.next(), Panel::Funds);
        assert_eq!(Panel::Funds.prev(), Panel::Analyst);
        for i in 0..3 {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(3).is_none());
    }

    #[test]
    fn starts_on_first_fund() {
        let h = harness();
        assert_eq!(h.app.selected, Some(0));
        let view = h.app.view.as_ref().unwrap();
        assert_eq!(view.fund.code, "TECH-001");
        assert_eq!(h.app.hotspots.len(), 4);
        assert_eq!(h.app.analysis.state(), &AnalysisState::Idle);
    }

    #[test]
    fn analysis_round_trip() {
        let mut h = harness();
        h.app.request_analysis();
        assert!(h.app.analysis.is_loading());

        let WorkerCommand::Analyze { ticket, fund, history } = analyze_command(&h) else {
            panic!("expected Analyze");
        };
        assert_eq!(fund.code, "TECH-001");
        assert_eq!(history.len(), 31);

        h.responses
            .send(WorkerResponse::AnalysisDone {
                ticket,
                outcome: Ok("## Bullish".into()),
            })
            .unwrap();
        drain(&mut h);
        assert_eq!(
            h.app.analysis.state(),
            &AnalysisState::Ready {
                text: "## Bullish".into()
            }
        );
    }

    #[test]
    fn switching_fund_suppresses_stale_analysis() {
        let mut h = harness();
        h.app.request_analysis();
        let WorkerCommand::Analyze { ticket, .. } = analyze_command(&h) else {
            panic!("expected Analyze");
        };

        h.app.select_fund(1);
        assert!(h.app.cancel.load(Ordering::Relaxed));
        assert_eq!(h.app.analysis.state(), &AnalysisState::Idle);

        h.responses
            .send(WorkerResponse::AnalysisDone {
                ticket,
                outcome: Ok("analysis of TECH-001".into()),
            })
            .unwrap();
        drain(&mut h);

        assert_eq!(h.app.view.as_ref().unwrap().fund.code, "GREEN-055");
        assert_eq!(h.app.analysis.state(), &AnalysisState::Idle);
    }

    #[test]
    fn failure_is_recorded_once_with_generic_message() {
        let mut h = harness();
        h.app.request_analysis();
        let WorkerCommand::Analyze { ticket, .. } = analyze_command(&h) else {
            panic!("expected Analyze");
        };
        h.responses
            .send(WorkerResponse::AnalysisDone {
                ticket,
                outcome: Err(AnalysisFailure),
            })
            .unwrap();
        drain(&mut h);

        assert!(matches!(h.app.analysis.state(), AnalysisState::Failed { .. }));
        assert_eq!(h.app.error_history.len(), 1);
        assert_eq!(
            h.app.error_history[0].message,
            "Failed to generate analysis. Please try again."
        );
        assert_eq!(h.app.error_history[0].category, ErrorCategory::Analysis);
    }

    #[test]
    fn second_request_while_loading_is_refused() {
        let mut h = harness();
        h.app.request_analysis();
        h.app.request_analysis();
        assert!(h.commands.try_recv().is_ok());
        assert!(h.commands.try_recv().is_err());
        assert!(matches!(
            h.app.status_message,
            Some((_, StatusLevel::Warning))
        ));
    }

    #[test]
    fn reselecting_same_fund_keeps_analysis() {
        let mut h = harness();
        h.app.request_analysis();
        let WorkerCommand::Analyze { ticket, .. } = analyze_command(&h) else {
            panic!("expected Analyze");
        };
        h.app
            .handle_worker_response(WorkerResponse::AnalysisDone {
                ticket,
                outcome: Ok("kept".into()),
            });
        h.app.select_fund(0);
        assert_eq!(
            h.app.analysis.state(),
            &AnalysisState::Ready {
                text: "kept".into()
            }
        );
    }

    #[test]
    fn cursor_clamps() {
        let mut h = harness();
        h.app.move_cursor(-5);
        assert_eq!(h.app.cursor, 0);
        h.app.move_cursor(10);
        assert_eq!(h.app.cursor, 3);
        h.app.select_cursor();
        assert_eq!(h.app.selected_fund().unwrap().code, "ASIA-202");
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut h = harness();
        for i in 0..60 {
            h.app
                .push_error(ErrorCategory::Data, format!("error {i}"), String::new());
        }
        assert_eq!(h.app.error_history.len(), 50);
        assert!(h.app.error_history[0].message.contains("59"));
    }
}
