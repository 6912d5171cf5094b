//! Parallel per-file preprocessing
//!
//! Every input path is read, annotated and counted exactly once, before the
//! checklist is shown. Paths are independent of each other, so each one runs as
//! its own blocking task on the tokio runtime; the number of tasks reading and
//! tokenizing at the same time is capped at the available parallelism.

use crate::annotate::{annotate, ReadFailure};
use crate::domain::{FileRecord, FileRecords};
use crate::error::{CtxpickError, Result};
use crate::tokenizer::{count_words, load_counter, TokenCounter};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Output of a preprocessing run
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub records: FileRecords,
    /// Files that could not be read, in input order
    pub diagnostics: Vec<ReadFailure>,
}

/// Reads, annotates and counts a single path
fn process_path(path: String, counter: &dyn TokenCounter) -> (FileRecord, Option<ReadFailure>) {
    let annotated = annotate(&path);
    let record = FileRecord {
        token_count: counter.count(&annotated.text),
        word_count: count_words(&annotated.text),
        unreadable: annotated.failure.is_some(),
        annotated_content: annotated.text,
        path,
    };
    (record, annotated.failure)
}

/// Default cap on concurrently running file tasks
fn default_parallelism() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Drops repeated paths, keeping the first occurrence
fn unique_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| seen.insert(*p))
        .map(String::from)
        .collect()
}

/// Preprocesses `paths` with the named token encoding.
///
/// The path list and the encoding name are validated before any file is touched.
pub async fn preprocess<S: AsRef<str>>(paths: &[S], encoding_name: &str) -> Result<Preprocessed> {
    if paths.is_empty() {
        return Err(CtxpickError::NoInputPaths);
    }
    let counter = load_counter(encoding_name)?;
    preprocess_with(paths, counter).await
}

/// Preprocesses `paths` with an already loaded token counter
pub async fn preprocess_with<S: AsRef<str>>(
    paths: &[S],
    counter: Arc<dyn TokenCounter>,
) -> Result<Preprocessed> {
    if paths.is_empty() {
        return Err(CtxpickError::NoInputPaths);
    }

    let paths = unique_paths(paths);
    let total = paths.len();
    let limit = Arc::new(Semaphore::new(default_parallelism()));
    debug!(files = total, "preprocessing started");

    let mut tasks = JoinSet::new();
    for (index, path) in paths.into_iter().enumerate() {
        let counter = Arc::clone(&counter);
        let limit = Arc::clone(&limit);
        tasks.spawn(async move {
            let _permit = limit
                .acquire_owned()
                .await
                .map_err(|e| CtxpickError::Task(e.to_string()))?;
            let processed =
                tokio::task::spawn_blocking(move || process_path(path, counter.as_ref()))
                    .await
                    .map_err(|e| CtxpickError::Task(e.to_string()))?;
            Ok::<_, CtxpickError>((index, processed))
        });
    }

    // Tasks finish in any order; slot results back by input position
    let mut slots: Vec<Option<(FileRecord, Option<ReadFailure>)>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, processed) = joined.map_err(|e| CtxpickError::Task(e.to_string()))??;
        slots[index] = Some(processed);
    }

    let mut records = FileRecords::new();
    let mut diagnostics = Vec::new();
    for (record, failure) in slots.into_iter().flatten() {
        if let Some(failure) = failure {
            warn!(path = %failure.path, reason = %failure.reason, "unreadable file, using header only");
            diagnostics.push(failure);
        }
        records.insert(record);
    }

    debug!(
        files = records.len(),
        unreadable = diagnostics.len(),
        "preprocessing finished"
    );
    Ok(Preprocessed {
        records,
        diagnostics,
    })
}

/// Runs [`preprocess`] to completion on a dedicated multi-threaded runtime
pub fn preprocess_blocking<S: AsRef<str>>(paths: &[S], encoding_name: &str) -> Result<Preprocessed> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(preprocess(paths, encoding_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceCounter;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_unique_paths_keeps_first_occurrence() {
        let paths = ["b", "a", "b", "c", "a"];
        assert_eq!(unique_paths(&paths), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_process_path_counts_annotated_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "a.py", "print(1)");

        let (record, failure) = process_path(path.clone(), &WhitespaceCounter);
        assert!(failure.is_none());
        assert_eq!(record.annotated_content, format!("# File {}\nprint(1)", path));
        assert_eq!(record.word_count, 4);
        assert_eq!(record.token_count, 4);
        assert!(!record.unreadable);
    }

    mod pipeline_tests {
        use super::*;

        #[tokio::test]
        async fn test_one_record_per_distinct_path() {
            let temp_dir = TempDir::new().unwrap();
            let a = write_file(&temp_dir, "a.py", "print(1)");
            let b = write_file(&temp_dir, "b.js", "log(1);");
            let paths = vec![a.clone(), b.clone(), a.clone()];

            let out = preprocess_with(&paths, Arc::new(WhitespaceCounter))
                .await
                .unwrap();
            assert_eq!(out.records.len(), 2);
            assert_eq!(out.records.paths(), vec![a.clone(), b.clone()]);
            for path in [&a, &b] {
                assert_eq!(&out.records.get(path).unwrap().path, path);
            }
            assert!(out.diagnostics.is_empty());
        }

        #[tokio::test]
        async fn test_many_files_keep_input_order() {
            let temp_dir = TempDir::new().unwrap();
            let paths: Vec<String> = (0..40)
                .map(|i| write_file(&temp_dir, &format!("f{i}.rs"), &"word ".repeat(i)))
                .collect();

            let out = preprocess_with(&paths, Arc::new(WhitespaceCounter))
                .await
                .unwrap();
            assert_eq!(out.records.paths(), paths);
            for (i, path) in paths.iter().enumerate() {
                // header is three words
                assert_eq!(out.records.get(path).unwrap().word_count, i + 3);
            }
        }

        #[tokio::test]
        async fn test_unreadable_file_degrades_to_header() {
            let out = preprocess_with(&["missing.txt"], Arc::new(WhitespaceCounter))
                .await
                .unwrap();

            let record = out.records.get("missing.txt").unwrap();
            assert_eq!(record.annotated_content, "// File missing.txt\n");
            assert_eq!(record.word_count, 3);
            assert_eq!(record.token_count, 3);
            assert!(record.unreadable);

            assert_eq!(out.diagnostics.len(), 1);
            assert_eq!(out.diagnostics[0].path, "missing.txt");
        }

        #[tokio::test]
        async fn test_empty_path_list_is_rejected() {
            let none: [&str; 0] = [];
            let err = preprocess(&none, "cl100k_base").await.unwrap_err();
            assert!(matches!(err, CtxpickError::NoInputPaths));
        }

        #[tokio::test]
        async fn test_unknown_encoding_is_rejected_before_reading() {
            let err = preprocess(&["missing.txt"], "not_an_encoding")
                .await
                .unwrap_err();
            assert!(matches!(err, CtxpickError::UnknownEncoding { .. }));
        }

        #[tokio::test]
        async fn test_repeat_runs_are_identical() {
            let temp_dir = TempDir::new().unwrap();
            let paths = vec![
                write_file(&temp_dir, "a.py", "def f(x):\n    return x * 2\n"),
                write_file(&temp_dir, "b.js", "const y = f(21);\nconsole.log(y);\n"),
            ];

            let first = preprocess(&paths, "cl100k_base").await.unwrap();
            let second = preprocess(&paths, "cl100k_base").await.unwrap();
            for path in &paths {
                let (a, b) = (
                    first.records.get(path).unwrap(),
                    second.records.get(path).unwrap(),
                );
                assert_eq!(a.token_count, b.token_count);
                assert_eq!(a.word_count, b.word_count);
                assert!(a.token_count > 0);
            }
        }
    }

    #[test]
    fn test_preprocess_blocking() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "main.rs", "fn main() {}");

        let out = preprocess_blocking(&[path.as_str()], "o200k_base").unwrap();
        assert_eq!(out.records.len(), 1);
        assert!(out.records.get(&path).unwrap().token_count > 0);
    }
}
