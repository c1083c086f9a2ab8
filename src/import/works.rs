//! Works dump import.
//!
//! Each optional nested field is extracted into its own `Result`. Whether a
//! field failure loses the whole record or only that field is decided by
//! [`FieldFailurePolicy`]; a missing `key` and author lookup errors always
//! lose the record, and an unknown author never does.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::{
    config::FieldFailurePolicy,
    error::ImportError,
    models::{
        author::AUTHOR_KEY_PREFIX,
        book::{UNKNOWN_AUTHOR, WORK_KEY_PREFIX},
        Book,
    },
    repository::{AuthorStore, BookStore},
};

use super::{
    record::{self, FieldError, JsonObject, RecordError},
    DumpReader, StageReport,
};

/// `yyyy-MM-dd'T'HH:mm:ss.SSSSSS`, exactly six fraction digits
const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// Build a book from one dump line, leaving `author_names` unresolved
pub fn parse_work(line: &str, policy: FieldFailurePolicy) -> Result<Book, RecordError> {
    let object = record::parse_line(line)?;
    let id = record::required_key(&object, WORK_KEY_PREFIX)?;

    let published_date = apply(policy, &id, published_date(&object))?;
    let cover_ids = apply(policy, &id, cover_ids(&object))?;
    let author_ids = apply(policy, &id, author_ids(&object))?;

    Ok(Book {
        name: record::opt_string(&object, "title"),
        description: description(&object),
        published_date,
        cover_ids,
        author_ids,
        author_names: None,
        id,
    })
}

fn apply<T>(
    policy: FieldFailurePolicy,
    id: &str,
    result: Result<Option<T>, FieldError>,
) -> Result<Option<T>, RecordError> {
    match (result, policy) {
        (Ok(value), _) => Ok(value),
        (Err(e), FieldFailurePolicy::DiscardRecord) => Err(e.into()),
        (Err(e), FieldFailurePolicy::DiscardField) => {
            tracing::warn!("Work {}: dropping {}", id, e);
            Ok(None)
        }
    }
}

/// `description.value` when `description` is an object
fn description(object: &JsonObject) -> Option<String> {
    record::opt_object(object, "description").map(|d| record::opt_string(d, "value"))
}

/// Date part of `created.value` when `created` is an object
fn published_date(object: &JsonObject) -> Result<Option<NaiveDate>, FieldError> {
    let Some(created) = record::opt_object(object, "created") else {
        return Ok(None);
    };
    let value = created
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| FieldError::new("created", "missing string `value`"))?;
    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .map(|timestamp| Some(timestamp.date()))
        .map_err(|e| FieldError::new("created", format!("cannot parse {:?}: {}", value, e)))
}

/// `covers` rendered as strings, in source order
fn cover_ids(object: &JsonObject) -> Result<Option<Vec<String>>, FieldError> {
    let Some(covers) = record::opt_array(object, "covers") else {
        return Ok(None);
    };
    covers
        .iter()
        .enumerate()
        .map(|(index, cover)| match cover {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(FieldError::new(
                "covers",
                format!("entry {} is not a cover id: {}", index, other),
            )),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// `authors[].author.key` without the `/authors/` prefix, in source order
fn author_ids(object: &JsonObject) -> Result<Option<Vec<String>>, FieldError> {
    let Some(authors) = record::opt_array(object, "authors") else {
        return Ok(None);
    };
    authors
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .get("author")
                .and_then(|author| author.get("key"))
                .and_then(Value::as_str)
                .map(|key| record::strip_prefix(key, AUTHOR_KEY_PREFIX))
                .ok_or_else(|| {
                    FieldError::new("authors", format!("entry {} has no `author.key`", index))
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Look up each id, keeping positions; misses become [`UNKNOWN_AUTHOR`]
pub async fn resolve_author_names<S>(
    store: &S,
    author_ids: &[String],
) -> Result<(Vec<String>, u64), RecordError>
where
    S: AuthorStore + ?Sized,
{
    let mut names = Vec::with_capacity(author_ids.len());
    let mut unresolved = 0;
    for id in author_ids {
        match store.find_by_id(id).await? {
            Some(author) => names.push(author.name),
            None => {
                unresolved += 1;
                names.push(UNKNOWN_AUTHOR.to_string());
            }
        }
    }
    Ok((names, unresolved))
}

/// Upsert every work of the dump at `path`, denormalizing author names
/// from `authors`.
///
/// Run this only after the author import: ids missing from `authors` at
/// this point are stored as [`UNKNOWN_AUTHOR`] for good.
pub async fn import_works<A, B>(
    path: &Path,
    authors: &A,
    books: &B,
    policy: FieldFailurePolicy,
    progress_interval: u64,
) -> Result<StageReport, ImportError>
where
    A: AuthorStore + ?Sized,
    B: BookStore + ?Sized,
{
    tracing::info!("Importing works from {} ({:?})", path.display(), policy);

    let mut reader = DumpReader::open(path).await?;
    let mut report = StageReport::new("works");

    while let Some((line_number, line)) = reader.next_line().await? {
        report.lines_read += 1;

        let saved = match line {
            Ok(line) => save_work(&line, authors, books, policy).await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(unresolved) => {
                report.imported += 1;
                report.unresolved_authors += unresolved;
            }
            Err(e) => report.record_error(line_number, &e),
        }

        report.progress(progress_interval);
    }

    Ok(report)
}

async fn save_work<A, B>(
    line: &str,
    authors: &A,
    books: &B,
    policy: FieldFailurePolicy,
) -> Result<u64, RecordError>
where
    A: AuthorStore + ?Sized,
    B: BookStore + ?Sized,
{
    let mut book = parse_work(line, policy)?;

    let mut unresolved = 0;
    if let Some(ids) = &book.author_ids {
        let (names, misses) = resolve_author_names(authors, ids).await?;
        book.author_names = Some(names);
        unresolved = misses;
    }

    tracing::debug!("Saving book: {} ({})", book.name, book.id);
    books.upsert(&book).await?;
    Ok(unresolved)
}
