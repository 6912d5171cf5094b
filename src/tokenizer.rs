//! Token counting backed by tiktoken encodings

use crate::error::{CtxpickError, Result};
use std::str::FromStr;
use std::sync::Arc;
use tiktoken_rs::CoreBPE;

/// Encoding used when neither the command line nor the config file names one
pub const DEFAULT_ENCODING: &str = "cl100k_base";

/// Counts tokens in a piece of text.
///
/// Implementations are shared by every preprocessing task, so they must be
/// `Send + Sync` and must not keep per-call state.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Named BPE encodings shipped with tiktoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenEncoding {
    Cl100kBase,
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl TokenEncoding {
    pub const ALL: [TokenEncoding; 5] = [
        TokenEncoding::Cl100kBase,
        TokenEncoding::O200kBase,
        TokenEncoding::P50kBase,
        TokenEncoding::P50kEdit,
        TokenEncoding::R50kBase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TokenEncoding::Cl100kBase => "cl100k_base",
            TokenEncoding::O200kBase => "o200k_base",
            TokenEncoding::P50kBase => "p50k_base",
            TokenEncoding::P50kEdit => "p50k_edit",
            TokenEncoding::R50kBase => "r50k_base",
        }
    }

    /// Loads the BPE tables for this encoding
    pub fn load(&self) -> Result<BpeCounter> {
        let bpe = match self {
            TokenEncoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            TokenEncoding::O200kBase => tiktoken_rs::o200k_base(),
            TokenEncoding::P50kBase => tiktoken_rs::p50k_base(),
            TokenEncoding::P50kEdit => tiktoken_rs::p50k_edit(),
            TokenEncoding::R50kBase => tiktoken_rs::r50k_base(),
        }
        .map_err(|e| CtxpickError::TokenizerInit(format!("{}: {}", self.name(), e)))?;

        Ok(BpeCounter { bpe })
    }
}

impl FromStr for TokenEncoding {
    type Err = CtxpickError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TokenEncoding::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CtxpickError::UnknownEncoding {
                name: s.to_string(),
                available: encoding_names().into_iter().map(String::from).collect(),
            })
    }
}

/// Names accepted by [`TokenEncoding::from_str`]
pub fn encoding_names() -> Vec<&'static str> {
    TokenEncoding::ALL.iter().map(|e| e.name()).collect()
}

/// Resolves an encoding name and loads it, ready to share across tasks
pub fn load_counter(encoding_name: &str) -> Result<Arc<dyn TokenCounter>> {
    let encoding: TokenEncoding = encoding_name.parse()?;
    Ok(Arc::new(encoding.load()?))
}

/// Token counter over a tiktoken BPE
pub struct BpeCounter {
    bpe: CoreBPE,
}

impl TokenCounter for BpeCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// Counts whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Token counter that treats every whitespace-separated word as one token
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceCounter;

impl TokenCounter for WhitespaceCounter {
    fn count(&self, text: &str) -> usize {
        count_words(text)
    }
}
