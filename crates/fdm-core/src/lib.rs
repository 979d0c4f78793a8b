#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fdm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and transformations for the finance data manager.
//!
//! This crate holds everything that does not talk to the network:
//!
//! - [`CompanyValidator`](validation::CompanyValidator) - Schema check and USD filter for search hits
//! - [`income_by_year`](statement::income_by_year) / [`cash_flow_by_year`](statement::cash_flow_by_year) - Statement reshaping
//! - [`merge_by_year`](statement::merge_by_year) - Per-year union of both statements
//! - [`ChartRenderer`](chart::ChartRenderer) - Charting seam
//! - [`DebugLog`](log::DebugLog) - Explicitly owned log sink
//! - [`Credentials`](config::Credentials) - API key loading

/// Line chart model and renderers.
pub mod chart;
/// API credentials.
pub mod config;
/// Error types for finance data operations.
pub mod error;
/// Debug log sink.
pub mod log;
/// Statement reshaping and merging.
pub mod statement;
/// Core data types (Symbol, CompanyRecord, yearly entries).
pub mod types;
/// Company search validation.
pub mod validation;

// Re-export commonly used items at crate root
pub use chart::{ChartRenderer, LineChart, Series, TableRenderer};
pub use config::Credentials;
pub use error::{FieldError, FinanceError, Result, ValidationError};
pub use log::DebugLog;
pub use statement::{RevenueSeries, cash_flow_by_year, income_by_year, merge_by_year, revenue_series};
pub use types::{CashFlowEntry, CombinedEntry, CompanyRecord, IncomeEntry, Symbol, YearlyMap};
pub use validation::CompanyValidator;
