//! Render newline-delimited JSON log records as human-readable text.
//!
//! # Overview
//!
//! Machine-oriented logging libraries emit one JSON object per line: compact,
//! greppable, and unreadable at 2am. This crate is the other half of that
//! contract: a pure, synchronous, line-to-line transformer that recognizes
//! structured records (a JSON object carrying the schema marker `v: 1`),
//! reorders their semantic fields into a header line, and flattens everything
//! else into indented `key: value` text, with special-cased rendering for
//! error records and nested error-like objects.
//!
//! Lines that are not structured records (plain text, foreign JSON, records
//! with the wrong schema version) pass through unmodified, so the formatter
//! is safe to run over mixed input streams.
//!
//! # Getting started
//!
//! Build a [`Pretty`] formatter with [`builder`], then feed it lines:
//!
//! ```
//! let pretty = ndjson_pretty::builder().build();
//!
//! let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hello","pid":1,"hostname":"h"}"#;
//! assert_eq!(pretty.format(line), "[1500000000000] INFO (1 on h): hello\n");
//!
//! // anything unrecognized passes through verbatim
//! assert_eq!(pretty.format("not json at all"), "not json at all\n");
//! ```
//!
//! A stream of records renders like this:
//!
//! ```log
//! [2017-07-14 02:40:00.000 +0000] INFO (api/1 on box): request accepted
//! [2017-07-14 02:40:00.001 +0000] WARN (api/1 on box): retrying upstream
//!     attempt: 2
//!     url: "https://example.com"
//! [2017-07-14 02:40:00.002 +0000] ERROR (api/1 on box): upstream failed
//! Error: connect ECONNREFUSED
//!         at TCPConnectWrap.afterConnect (net.js:1191:14)
//! ```
//!
//! The formatter holds no state across calls and takes `&self`, so one
//! instance can serve any number of call sites without coordination.
//!
//! # The binary
//!
//! The `ndjson-pretty` binary wires [`Pretty`] between stdin and stdout, one
//! flag per configuration option:
//!
//! ```sh
//! node service.js | ndjson-pretty --translate-time --colorize
//! ```

pub mod builder;
pub mod format;
pub mod record;

mod level;

pub use crate::builder::Builder;
pub use crate::format::{Formatter, Pretty};
pub use crate::record::Record;

/// Returns a new [`Builder`] with the default configuration.
///
/// This is the preferred entry point for constructing a [`Pretty`] formatter.
///
/// # Examples
///
/// ```
/// let pretty = ndjson_pretty::builder()
///     .level_first(true)
///     .build();
///
/// let line = r#"{"v":1,"level":30,"time":1500000000000,"msg":"hi"}"#;
/// assert_eq!(pretty.format(line), "INFO [1500000000000]: hi\n");
/// ```
pub fn builder() -> Builder {
    Builder::default()
}
