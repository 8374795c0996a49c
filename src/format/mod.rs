//! Utilities for formatting recognized records.

use crate::record::Record;
use std::error::Error;

mod pretty;
pub use pretty::Pretty;

/// Format a recognized [`Record`] into a `String`.
///
/// [`Pretty`] is the built-in implementation. You can implement this trait to
/// render records completely differently while reusing the recognizer and
/// the pass-through machinery.
///
/// # Examples
///
/// This trait is implemented for all `Fn(&Record) -> Result<String, E>`
/// types, where `E: Error + Send + Sync`. Since [`Record`] serializes
/// transparently as its underlying object, functions like
/// `serde_json::to_string_pretty` can be used wherever a `Formatter` is
/// required:
///
/// ```
/// use ndjson_pretty::{Formatter, Record};
///
/// let reserialize = |record: &Record| serde_json::to_string_pretty(record);
///
/// let record = Record::recognize(r#"{"v":1,"level":30}"#).unwrap();
/// let json = reserialize.fmt(&record).unwrap();
/// assert!(json.contains("\"level\": 30"));
/// ```
pub trait Formatter {
    /// The error type if the record cannot be stringified.
    type Error: Error + Send + Sync;

    /// Stringifies the record, or returns an error.
    fn fmt(&self, record: &Record) -> Result<String, Self::Error>;
}

impl<F, E> Formatter for F
where
    F: Fn(&Record) -> Result<String, E>,
    E: Error + Send + Sync,
{
    type Error = E;

    #[inline]
    fn fmt(&self, record: &Record) -> Result<String, E> {
        self(record)
    }
}
