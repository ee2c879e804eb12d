//! Analysis lifecycle for the currently selected fund.
//!
//! `Idle → Loading → {Ready | Failed}`, reset to `Idle` whenever the subject
//! fund changes. Every request carries a [`Ticket`]; an outcome is applied
//! only if its ticket is the one currently loading, so a response that
//! arrives after the user moved on is dropped instead of being shown under
//! the wrong fund.

use serde::Serialize;
use thiserror::Error;

use super::AnalysisFailure;
use crate::domain::FundId;

/// Identifies one analysis request and the fund it was made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ticket {
    seq: u64,
    fund: FundId,
}

impl Ticket {
    pub fn fund(&self) -> &FundId {
        &self.fund
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AnalysisState {
    Idle,
    Loading { ticket: Ticket },
    Ready { text: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no fund selected")]
    NoSubject,

    #[error("an analysis is already in progress")]
    AlreadyLoading,
}

/// What `resolve` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// Ticket no longer current; the outcome was discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    subject: Option<FundId>,
    state: AnalysisState,
    next_seq: u64,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            subject: None,
            state: AnalysisState::Idle,
            next_seq: 1,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn subject(&self) -> Option<&FundId> {
        self.subject.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AnalysisState::Loading { .. })
    }

    /// Select the subject fund. Returns true if it changed, in which case any
    /// previous text, error or in-flight request is forgotten.
    pub fn select(&mut self, fund: &FundId) -> bool {
        if self.subject.as_ref() == Some(fund) {
            return false;
        }
        self.subject = Some(fund.clone());
        self.state = AnalysisState::Idle;
        true
    }

    /// Enter `Loading` for the current subject and hand out its ticket.
    ///
    /// Allowed from `Idle`, `Ready` (refresh) and `Failed` (retry).
    pub fn begin(&mut self) -> Result<Ticket, SessionError> {
        let fund = self.subject.clone().ok_or(SessionError::NoSubject)?;
        if self.is_loading() {
            return Err(SessionError::AlreadyLoading);
        }
        let ticket = Ticket {
            seq: self.next_seq,
            fund,
        };
        self.next_seq += 1;
        self.state = AnalysisState::Loading {
            ticket: ticket.clone(),
        };
        Ok(ticket)
    }

    /// Apply a finished request's outcome if it is still wanted.
    pub fn resolve(
        &mut self,
        ticket: &Ticket,
        outcome: Result<String, AnalysisFailure>,
    ) -> Resolution {
        let current = match &self.state {
            AnalysisState::Loading { ticket: t } => t == ticket,
            _ => false,
        };
        if !current || self.subject.as_ref() != Some(&ticket.fund) {
            tracing::debug!(seq = ticket.seq, fund = %ticket.fund, "discarding stale analysis outcome");
            return Resolution::Stale;
        }

        self.state = match outcome {
            Ok(text) => AnalysisState::Ready { text },
            Err(failure) => AnalysisState::Failed {
                message: failure.to_string(),
            },
        };
        Resolution::Applied
    }
}
