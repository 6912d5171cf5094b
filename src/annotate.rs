//! File annotation: prefixes a file's text with a comment line naming the file

use std::fmt;
use std::fs;
use std::path::Path;

/// Extensions whose languages use `#` line comments
const HASH_COMMENT_EXTENSIONS: &[&str] = &[
    "py", "pyw", "sh", "bash", "zsh", "fish", "rb", "pl", "pm", "r", "yaml", "yml", "toml",
    "ini", "cfg", "conf", "ps1", "tcl", "jl", "ex", "exs", "cmake", "mk", "nim", "coffee",
];

/// Line comment marker used in the header of an annotated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentMarker {
    /// `#`
    Hash,
    /// `//`
    Slash,
}

impl CommentMarker {
    /// Picks the marker from the path's extension
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext {
            Some(ext) if HASH_COMMENT_EXTENSIONS.contains(&ext.as_str()) => CommentMarker::Hash,
            _ => CommentMarker::Slash,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentMarker::Hash => "#",
            CommentMarker::Slash => "//",
        }
    }
}

impl fmt::Display for CommentMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file that could not be read as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not read {}: {}", self.path, self.reason)
    }
}

/// Result of annotating one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub text: String,
    /// Set when the file could not be read and the header stands alone
    pub failure: Option<ReadFailure>,
}

/// Header line for `path`, including the trailing newline
pub fn header(path: &str) -> String {
    format!("{} File {}\n", CommentMarker::for_path(Path::new(path)), path)
}

/// Builds the annotated text from already-loaded content
pub fn annotate_content(path: &str, content: &str) -> String {
    let mut text = header(path);
    text.push_str(content);
    text
}

/// Reads `path` and annotates it.
///
/// Read errors never propagate: the content is replaced by the empty string and the
/// reason is returned in [`Annotated::failure`].
pub fn annotate(path: &str) -> Annotated {
    match fs::read_to_string(path) {
        Ok(content) => Annotated {
            text: annotate_content(path, &content),
            failure: None,
        },
        Err(e) => Annotated {
            text: header(path),
            failure: Some(ReadFailure {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}
