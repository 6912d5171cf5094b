//! One ctxpick run, from resolved configuration to exit status
//!
//! The binary wires the real terminal, clipboard and stderr into [`execute`]; tests
//! hand in recording sinks and buffers instead.

use crate::cli::AppConfig;
use crate::controller::Outcome;
use crate::domain::{aggregate, AggregateResult, FileRecords};
use crate::error::Result;
use crate::preprocess::preprocess_blocking;
use crate::sink::{deliver_or_fallback, Sink};
use crate::tui::format_count;
use crate::{EXIT_ABORTED, EXIT_SUCCESS};
use std::io::{self, Write};
use tracing::debug;

/// Where a run sends its text and its messages
pub struct Outputs<'o> {
    /// The configured destination
    pub sink: &'o mut dyn Sink,
    /// Receives the text when `sink` fails
    pub fallback: &'o mut dyn Sink,
    /// Human-readable messages, stderr in the binary
    pub report: &'o mut dyn Write,
}

/// Preprocesses every path, runs `checklist` when the run is interactive and
/// delivers the result.
///
/// Configuration errors and terminal I/O errors are returned; abort and sink
/// failures are reported on `report` and turned into an exit status.
pub fn execute<C>(config: &AppConfig, checklist: C, out: Outputs<'_>) -> Result<i32>
where
    C: FnOnce(&FileRecords) -> io::Result<Outcome>,
{
    let Outputs {
        sink,
        fallback,
        report,
    } = out;

    // Blocks until every file is read and counted
    let preprocessed = preprocess_blocking(&config.paths, &config.encoding)?;
    for failure in &preprocessed.diagnostics {
        writeln!(report, "warning: {}", failure)?;
    }
    let records = preprocessed.records;

    let result = if config.interactive {
        match checklist(&records)? {
            Outcome::Committed(result) => result,
            Outcome::Aborted => {
                writeln!(report, "Aborted, nothing was copied.")?;
                return Ok(EXIT_ABORTED);
            }
        }
    } else {
        debug!(files = records.len(), "checklist skipped");
        aggregate(&records.paths(), &records)
    };

    deliver(&result, config, sink, fallback, report)
}

/// Hands the text to its destination and prints a one-line summary
fn deliver(
    result: &AggregateResult,
    config: &AppConfig,
    sink: &mut dyn Sink,
    fallback: &mut dyn Sink,
    report: &mut dyn Write,
) -> Result<i32> {
    if let Err(failure) = deliver_or_fallback(&result.text, sink, fallback) {
        writeln!(report, "Error: {}", failure.error)?;
        match &failure.fallback {
            Ok(()) => writeln!(report, "The selection was written to stdout instead.")?,
            Err(e) => writeln!(report, "The selection could not be written to stdout either: {}", e)?,
        }
        return Ok(failure.error.exit_code());
    }

    writeln!(
        report,
        "Sent {} files ({} tokens, {} words) to {}.",
        result.file_count,
        format_count(result.token_count),
        format_count(result.word_count),
        config.destination.label()
    )?;
    Ok(EXIT_SUCCESS)
}
