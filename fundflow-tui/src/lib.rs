//! FundFlow TUI: terminal dashboard for monitoring funds.
//!
//! Panels:
//! 1. Funds: catalog list with hotspot status and trigger reason
//! 2. Chart: NAV history, intraday session, percent change vs peers
//! 3. Analyst: on-demand AI commentary for the selected fund

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;
