//! Ctxpick - pick files from a terminal checklist and hand them to an AI assistant
//!
//! This crate provides the selection-and-aggregation engine behind the `ctxpick`
//! binary: per-file preprocessing, the checklist state machine and the output sinks.

pub mod annotate;
pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod logging;
pub mod preprocess;
pub mod sink;
pub mod tokenizer;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use controller::{Controller, ControllerState, Outcome};
pub use domain::{
    aggregate, totals, AggregateResult, FileRecord, FileRecords, Selection, SelectionCommand,
    SelectionEntry, Totals,
};
pub use error::{CtxpickError, Result};
pub use preprocess::{preprocess, preprocess_blocking, preprocess_with, Preprocessed};
pub use sink::{Destination, Sink};

/// Exit status after the text was delivered
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when the user quit the checklist
pub const EXIT_ABORTED: i32 = 1;
/// Exit status for bad arguments, encodings or config files
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit status when the clipboard could not be written
pub const EXIT_SINK_ERROR: i32 = 3;
/// Exit status for any other failure, such as terminal I/O
pub const EXIT_FAILURE: i32 = 4;
