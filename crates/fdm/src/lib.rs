#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fdm/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Finance data manager.
//!
//! This crate re-exports the core types from `fdm-core` and the
//! [`FinanceDataManager`] from `fdm-fmp`.
//!
//! # Example
//!
//! ```rust,ignore
//! use fdm::{Credentials, DebugLog, FinanceDataManager, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> fdm::Result<()> {
//!     let credentials = Credentials::load("api_key.json")?;
//!     let manager = FinanceDataManager::from_credentials(&credentials)
//!         .with_log(DebugLog::append_to("output.txt")?);
//!
//!     let combined = manager.merge_financial_data(&Symbol::new("TSLA"), 5).await?;
//!     println!("{:?}", combined);
//!
//!     Ok(())
//! }
//! ```

// Core types and transformations
pub use fdm_core::*;

// Client
pub use fdm_fmp::{FinanceDataManager, csv_file_name};
