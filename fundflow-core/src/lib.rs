//! FundFlow Core: fund catalog, synthetic series, normalization and the AI analyst.
//!
//! This crate holds everything the dashboards render:
//! - Domain types (funds, quotes, historical / intraday / normalized points)
//! - Catalog repository (built-in demo funds, TOML catalogs, recorded CSV closes)
//! - Synthetic series: baseline resolver, random-walk history, intraday simulator
//! - Normalization to percent change from period start, descriptive stats
//! - Hotspot classification of day moves
//! - Analysis request client and its explicit lifecycle state machine
//! - Dashboard assembly tying the above into one chart-ready view

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod hotspot;
pub mod rng;
pub mod series;
