//! Dataset dump import.
//!
//! Two stages fill the catalog at startup: authors first, then works. The
//! works stage copies author names onto each book, so it must see a fully
//! loaded author table; the loader enforces that order.

pub mod authors;
pub mod record;
pub mod works;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};

use crate::{
    config::DataDumpConfig,
    error::ImportError,
    repository::{AuthorStore, BookStore},
};

use record::RecordError;

/// Line-by-line reader over a dump file.
///
/// Lines are framed on raw bytes, so a line that is not valid UTF-8 is
/// returned as a per-line error and the lines after it are still read.
pub struct DumpReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_number: u64,
}

/// One framed line: its 1-based number and its text, if it decoded
pub type DumpLine = (u64, Result<String, RecordError>);

impl DumpReader {
    pub async fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path).await.map_err(|source| ImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_number: 0,
        })
    }

    /// Next line, `None` at end of file.
    ///
    /// Only I/O failures are errors here; bad encoding stays with the line.
    pub async fn next_line(&mut self) -> Result<Option<DumpLine>, ImportError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|source| ImportError::Read {
                path: self.path.clone(),
                line: self.line_number,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        self.line_number += 1;
        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }

        let line = std::str::from_utf8(&self.buf)
            .map(str::to_string)
            .map_err(RecordError::from);
        Ok(Some((self.line_number, line)))
    }
}

/// Counters for one import stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    pub lines_read: u64,
    pub imported: u64,
    /// Lines rejected for bad input
    pub skipped: u64,
    /// Records lost to store errors
    pub failed: u64,
    /// Author references stored as the unknown-author sentinel
    pub unresolved_authors: u64,
}

impl StageReport {
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    fn record_error(&mut self, line_number: u64, error: &RecordError) {
        if error.is_store_failure() {
            self.failed += 1;
            tracing::error!("{} line {}: {}", self.stage, line_number, error);
        } else {
            self.skipped += 1;
            tracing::warn!("{} line {} skipped: {}", self.stage, line_number, error);
        }
    }

    fn progress(&self, interval: u64) {
        if interval > 0 && self.lines_read % interval == 0 {
            tracing::info!(
                "{} import: {} lines read, {} imported, {} skipped, {} failed",
                self.stage,
                self.lines_read,
                self.imported,
                self.skipped,
                self.failed
            );
        }
    }
}

/// How a stage ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
    Completed(StageReport),
    Aborted { error: String },
    Skipped { reason: String },
}

impl StageOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed(_))
    }
}

/// Result of a full import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub authors: StageOutcome,
    pub works: StageOutcome,
}

/// Runs the author stage, then the works stage
pub struct DataLoader<'a> {
    authors: &'a dyn AuthorStore,
    books: &'a dyn BookStore,
    config: &'a DataDumpConfig,
}

impl<'a> DataLoader<'a> {
    pub fn new(
        authors: &'a dyn AuthorStore,
        books: &'a dyn BookStore,
        config: &'a DataDumpConfig,
    ) -> Self {
        Self {
            authors,
            books,
            config,
        }
    }

    pub async fn run(&self) -> ImportSummary {
        let authors = match self.config.author_path.as_deref() {
            Some(path) => finish(
                authors::import_authors(path, self.authors, self.config.progress_interval).await,
            ),
            None => not_configured("authors"),
        };

        let works = if self.config.require_authors && !authors.is_completed() {
            tracing::warn!("Works import skipped: author import did not complete");
            StageOutcome::Skipped {
                reason: "author import did not complete".to_string(),
            }
        } else {
            match self.config.works_path.as_deref() {
                Some(path) => finish(
                    works::import_works(
                        path,
                        self.authors,
                        self.books,
                        self.config.field_failure_policy,
                        self.config.progress_interval,
                    )
                    .await,
                ),
                None => not_configured("works"),
            }
        };

        ImportSummary { authors, works }
    }
}

fn finish(result: Result<StageReport, ImportError>) -> StageOutcome {
    match result {
        Ok(report) => {
            tracing::info!(
                "{} import completed: {} lines read, {} imported, {} skipped, {} failed",
                report.stage,
                report.lines_read,
                report.imported,
                report.skipped,
                report.failed
            );
            StageOutcome::Completed(report)
        }
        Err(e) => {
            tracing::error!("Import stage aborted: {}", e);
            StageOutcome::Aborted {
                error: e.to_string(),
            }
        }
    }
}

fn not_configured(stage: &'static str) -> StageOutcome {
    let error = ImportError::NotConfigured(stage);
    tracing::warn!("{}", error);
    StageOutcome::Skipped {
        reason: error.to_string(),
    }
}
