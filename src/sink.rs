//! Output destinations for the assembled text

use crate::error::{CtxpickError, Result};
use std::io::{self, Write};
use tracing::{info, warn};

/// Where the final text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Clipboard,
    Stdout,
}

impl Destination {
    pub fn label(&self) -> &'static str {
        match self {
            Destination::Clipboard => "clipboard",
            Destination::Stdout => "stdout",
        }
    }

    pub fn sink(&self) -> Box<dyn Sink> {
        match self {
            Destination::Clipboard => Box::new(ClipboardSink),
            Destination::Stdout => Box::new(WriterSink::stdout()),
        }
    }
}

/// Receives the final text exactly once per run
pub trait Sink {
    fn deliver(&mut self, text: &str) -> Result<()>;
}

/// Puts text on the system clipboard
#[derive(Debug, Default)]
pub struct ClipboardSink;

impl Sink for ClipboardSink {
    fn deliver(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CtxpickError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| CtxpickError::Clipboard(e.to_string()))?;
        info!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

/// Writes text followed by a newline to any writer
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn deliver(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}

/// The primary sink refused the text
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Why the primary sink failed; this decides the exit status
    pub error: CtxpickError,
    /// Result of writing the text to the fallback sink instead
    pub fallback: Result<()>,
}

impl DeliveryFailure {
    /// Whether the text still reached the fallback sink
    pub fn recovered(&self) -> bool {
        self.fallback.is_ok()
    }
}

/// Delivers `text` to `primary`. If that fails, the text goes to `fallback` so the
/// selection is not lost. The primary error is kept either way.
pub fn deliver_or_fallback(
    text: &str,
    primary: &mut dyn Sink,
    fallback: &mut dyn Sink,
) -> std::result::Result<(), DeliveryFailure> {
    let error = match primary.deliver(text) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    warn!(error = %error, "delivery failed, writing to fallback");
    let fallback = fallback.deliver(text);
    if let Err(e) = &fallback {
        warn!(error = %e, "fallback delivery failed too");
    }
    Err(DeliveryFailure { error, fallback })
}
