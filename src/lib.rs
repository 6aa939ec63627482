//! # copymarks
//!
//! Lookup of examination copy marks by barcode against the BTE records
//! endpoint, with bounded-concurrency batch fetching.
//!
//! The crate is split into a thin CLI surface and a small core:
//!
//! - [`core::input`] normalizes free-form multi-line text into barcodes
//! - [`core::client`] resolves one barcode to a terminal [`Outcome`]
//! - [`core::batch`] fans lookups out with a fixed concurrency ceiling
//!   and aggregates the per-barcode outcomes into a [`BatchReport`]
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use copymarks::{BatchDispatcher, LookupConfig, MarksClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarksClient::new(LookupConfig::default())?;
//!     let dispatcher = BatchDispatcher::new(client);
//!
//!     let report = dispatcher
//!         .dispatch_report(vec!["4102016023".to_string(), "4102016024".to_string()])
//!         .await;
//!
//!     for row in &report.rows {
//!         println!("{}: {} / {}", row.bar_code, row.obt_marks, row.total_marks);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

// Re-export the main types
pub use crate::config::LookupConfig;
pub use crate::core::batch::{BarCodeOutcome, BatchConfig, BatchDispatcher, BatchReport};
pub use crate::core::client::{MarksClient, Outcome};
pub use crate::core::input::parse_bar_codes;
pub use crate::core::records::{MarksRequest, MarksRow, RawMarksRecord, NOT_AVAILABLE};
pub use crate::error::{ErrorKind, LookupError, Result};
