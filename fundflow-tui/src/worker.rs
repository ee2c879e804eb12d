//! Background worker thread: analysis requests run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. One request
//! is executed at a time; the HTTP call blocks this thread, never the UI.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use fundflow_core::analysis::{AnalysisFailure, FundAnalyst, Ticket};
use fundflow_core::domain::{Fund, HistoricalPoint};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze {
        ticket: Ticket,
        fund: Fund,
        history: Vec<HistoricalPoint>,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    AnalysisDone {
        ticket: Ticket,
        outcome: Result<String, AnalysisFailure>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    analyst: FundAnalyst,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("fundflow-worker".into())
        .spawn(move || worker_loop(&analyst, rx, tx, cancel))
}

fn worker_loop(
    analyst: &FundAnalyst,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Analyze {
                ticket,
                fund,
                history,
            }) => {
                cancel.store(false, Ordering::Relaxed);
                let outcome = analyst.analyze(&fund, &history);

                // Selection moved on while the request was in flight.
                if cancel.load(Ordering::Relaxed) {
                    tracing::debug!(seq = ticket.seq(), code = %fund.code, "dropping cancelled analysis");
                    continue;
                }
                if tx.send(WorkerResponse::AnalysisDone { ticket, outcome }).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundflow_core::analysis::{
        AnalysisError, AnalysisSession, GenerationRequest, TextGenerator,
    };
    use fundflow_core::domain::FundId;
    use std::sync::mpsc;
    use std::time::Duration;

    struct Echo;

    impl TextGenerator for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn generate(&self, req: &GenerationRequest) -> Result<String, AnalysisError> {
            Ok(format!("len {}", req.prompt.len()))
        }
    }

    /// Reports that it started, then blocks until the cancel flag is raised.
    struct WaitForCancel {
        started: std::sync::Mutex<mpsc::Sender<()>>,
        cancel: Arc<AtomicBool>,
    }

    impl TextGenerator for WaitForCancel {
        fn name(&self) -> &str {
            "wait"
        }
        fn generate(&self, _: &GenerationRequest) -> Result<String, AnalysisError> {
            let _ = self.started.lock().unwrap().send(());
            while !self.cancel.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(5));
            }
            Ok("late".into())
        }
    }

    fn fund(code: &str) -> Fund {
        fundflow_core::catalog::builtin::demo_funds()
            .into_iter()
            .find(|f| f.code == code)
            .unwrap()
    }

    fn ticket_for(code: &str) -> Ticket {
        let mut session = AnalysisSession::new();
        session.select(&FundId::new(code));
        session.begin().unwrap()
    }

    #[test]
    fn analyze_round_trip() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let analyst = FundAnalyst::new(Arc::new(Echo), "m");
        let handle = spawn_worker(analyst, cmd_rx, resp_tx, cancel).unwrap();

        let ticket = ticket_for("1");
        cmd_tx
            .send(WorkerCommand::Analyze {
                ticket: ticket.clone(),
                fund: fund("TECH-001"),
                history: Vec::new(),
            })
            .unwrap();

        let WorkerResponse::AnalysisDone { ticket: got, outcome } =
            resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(got, ticket);
        assert!(outcome.unwrap().starts_with("len "));

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn cancelled_request_is_not_delivered() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let (started_tx, started_rx) = mpsc::channel();
        let generator = WaitForCancel {
            started: std::sync::Mutex::new(started_tx),
            cancel: cancel.clone(),
        };
        let analyst = FundAnalyst::new(Arc::new(generator), "m");
        let handle = spawn_worker(analyst, cmd_rx, resp_tx, cancel.clone()).unwrap();

        cmd_tx
            .send(WorkerCommand::Analyze {
                ticket: ticket_for("1"),
                fund: fund("TECH-001"),
                history: Vec::new(),
            })
            .unwrap();
        // The flag is reset on receipt, so raise it only once the request runs.
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        cancel.store(true, Ordering::Relaxed);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
        assert!(resp_rx.try_recv().is_err());
    }
}
