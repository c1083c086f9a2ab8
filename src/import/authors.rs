//! Author dump import

use std::path::Path;

use crate::{
    error::ImportError,
    models::{author::AUTHOR_KEY_PREFIX, Author},
    repository::AuthorStore,
};

use super::{
    record::{self, RecordError},
    DumpReader, StageReport,
};

/// Build an author from one dump line
pub fn parse_author(line: &str) -> Result<Author, RecordError> {
    let object = record::parse_line(line)?;
    Ok(Author {
        id: record::required_key(&object, AUTHOR_KEY_PREFIX)?,
        name: record::opt_string(&object, "name"),
        personal_name: record::opt_string(&object, "personal_name"),
    })
}

/// Upsert every author of the dump at `path`.
///
/// Bad lines are logged and skipped; only a file-level I/O failure stops
/// the stage.
pub async fn import_authors<S>(
    path: &Path,
    store: &S,
    progress_interval: u64,
) -> Result<StageReport, ImportError>
where
    S: AuthorStore + ?Sized,
{
    tracing::info!("Importing authors from {}", path.display());

    let mut reader = DumpReader::open(path).await?;
    let mut report = StageReport::new("authors");

    while let Some((line_number, line)) = reader.next_line().await? {
        report.lines_read += 1;

        let saved = match line {
            Ok(line) => save_author(&line, store).await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(()) => report.imported += 1,
            Err(e) => report.record_error(line_number, &e),
        }

        report.progress(progress_interval);
    }

    Ok(report)
}

async fn save_author<S>(line: &str, store: &S) -> Result<(), RecordError>
where
    S: AuthorStore + ?Sized,
{
    let author = parse_author(line)?;
    tracing::debug!("Saving author: {} ({})", author.name, author.id);
    store.upsert(&author).await?;
    Ok(())
}
