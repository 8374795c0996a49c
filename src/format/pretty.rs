//! The built-in human-readable renderer.

use crate::builder::{Config, ErrorProps};
use crate::format::Formatter;
use crate::record::{self, Record, STANDARD_KEYS};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::fmt::{self, Write};

/// One unit of body indentation.
const INDENT: &str = "    ";

/// A serialized `"stack"` line inside an error-like object dump. The second
/// capture is the still-escaped JSON string holding the stack trace.
static STACK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\s*"stack":)\s*(".*"),?$"#).expect("hard-coded pattern compiles"));

type KeySet<'a> = SmallVec<[&'a str; 10]>;

/// Format records for human reading.
///
/// A `Pretty` is built once from a [`Builder`](crate::Builder) and is
/// immutable afterwards: [`format`](Pretty::format) takes `&self`, holds no
/// state across calls, and is deterministic for a fixed configuration.
///
/// Each recognized record renders as a header line (timestamp, severity,
/// process identity, message) followed by a body: the indented stack trace
/// and selected extra properties for error records, or the recursively
/// flattened non-standard fields for everything else.
///
/// # Examples
///
/// ```
/// let pretty = ndjson_pretty::builder().build();
///
/// let line = r#"{"v":1,"level":40,"time":1500000000000,"msg":"low disk","disk":"/dev/sda1"}"#;
/// assert_eq!(
///     pretty.format(line),
///     "[1500000000000] WARN: low disk\n    disk: \"/dev/sda1\"\n",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Pretty {
    config: Config,
}

impl Pretty {
    pub(crate) fn new(config: Config) -> Self {
        Pretty { config }
    }

    /// Formats one raw input line into one output chunk.
    ///
    /// This function is total: every input produces a chunk terminated by
    /// the configured line terminator. Lines that are not recognized as
    /// structured records come back verbatim (plus the terminator), so the
    /// formatter can sit on a mixed stream without eating foreign output.
    ///
    /// # Examples
    ///
    /// ```
    /// let pretty = ndjson_pretty::builder().build();
    /// assert_eq!(pretty.format("2023/01/01 some legacy line"), "2023/01/01 some legacy line\n");
    /// ```
    pub fn format(&self, line: &str) -> String {
        match Record::recognize(line) {
            Some(record) => match self.render(&record) {
                Ok(text) => text,
                // String writes cannot fail; any renderer error degrades to
                // pass-through instead of escaping.
                Err(fmt::Error) => self.passthrough(line),
            },
            None => self.passthrough(line),
        }
    }

    fn passthrough(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() + self.config.eol.len());
        out.push_str(line);
        out.push_str(self.config.eol);
        out
    }

    fn render(&self, record: &Record) -> Result<String, fmt::Error> {
        let mut out = String::with_capacity(256);

        self.render_header(record, &mut out)?;

        if record.is_error() {
            self.render_error_body(record, &mut out)?;
        } else {
            self.flatten(
                record.entries(),
                1,
                Some(&self.config.message_key),
                true,
                &mut out,
            )?;
        }

        Ok(out)
    }

    /// Writes the first output line: timestamp, severity, identity, message.
    fn render_header(&self, record: &Record, out: &mut String) -> fmt::Result {
        let cfg = &self.config;
        let timestamp = self.timestamp(record);
        let severity = cfg.palette.severity(record.level_code());

        if cfg.level_first {
            write!(out, "{} [{}]", severity, timestamp)?;
        } else {
            write!(out, "[{}] {}", timestamp, severity)?;
        }

        let name = record.get_truthy("name");
        let pid = record.get_truthy("pid");
        let hostname = record.get_truthy("hostname");

        if name.is_some() || pid.is_some() || hostname.is_some() {
            out.push_str(" (");
            if let Some(name) = name {
                out.push_str(&record::scalar_text(name));
                if let Some(pid) = pid {
                    write!(out, "/{}", record::scalar_text(pid))?;
                }
            } else if let Some(pid) = pid {
                out.push_str(&record::scalar_text(pid));
            }
            if let Some(hostname) = hostname {
                write!(out, " on {}", record::scalar_text(hostname))?;
            }
            out.push(')');
        }

        out.push_str(": ");
        if let Some(message) = record.get_truthy(&cfg.message_key) {
            out.push_str(&cfg.palette.message(&record::scalar_text(message)));
        }
        out.push_str(cfg.eol);

        Ok(())
    }

    /// The timestamp token, translated when configured and translatable,
    /// otherwise the raw field in its plain text form.
    fn timestamp(&self, record: &Record) -> String {
        let raw = record.get("time");

        if self.config.translate_time {
            let translated = raw.and_then(|value| {
                translate_time(value, &self.config.date_format, self.config.local_time)
            });
            if let Some(formatted) = translated {
                return formatted;
            }
        }

        raw.map(record::scalar_text).unwrap_or_default()
    }

    /// Body of a record whose `type` is the error sentinel: the stack block,
    /// then whichever extra properties the configuration selects.
    fn render_error_body(&self, record: &Record, out: &mut String) -> fmt::Result {
        let cfg = &self.config;

        if let Some(stack) = record.get("stack").and_then(Value::as_str) {
            self.write_stack(stack, out)?;
        }

        let mut excluded = KeySet::from_slice(&STANDARD_KEYS);
        excluded.push(&cfg.message_key);
        excluded.push("type");
        excluded.push("stack");

        match &cfg.error_props {
            ErrorProps::None => Ok(()),
            ErrorProps::All => {
                let selected: Vec<&str> = record
                    .entries()
                    .keys()
                    .map(String::as_str)
                    .filter(|key| !excluded.contains(key))
                    .collect();
                self.write_error_props(record, &selected, out)
            }
            ErrorProps::Keys(keys) => {
                let selected: Vec<&str> = keys
                    .iter()
                    .map(String::as_str)
                    .filter(|key| !excluded.contains(key))
                    .collect();
                self.write_error_props(record, &selected, out)
            }
        }
    }

    /// The stack block: first line flush, every later line one unit in.
    fn write_stack(&self, stack: &str, out: &mut String) -> fmt::Result {
        for (i, line) in stack.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if i > 0 {
                out.push_str(self.config.eol);
                out.push_str(INDENT);
            }
            out.push_str(line);
        }
        out.push_str(self.config.eol);
        Ok(())
    }

    fn write_error_props(&self, record: &Record, selected: &[&str], out: &mut String) -> fmt::Result {
        let cfg = &self.config;

        for &key in selected {
            let value = match record.get(key) {
                Some(value) => value,
                None => continue,
            };

            // An error-like key wins over the generic object/scalar split.
            if cfg.error_like_object_keys.iter().any(|k| k == key) {
                self.write_error_like(key, value, 1, out)?;
            } else if let Value::Object(fields) = value {
                write!(out, "{}{}: {{{}", INDENT, key, cfg.eol)?;
                self.flatten(fields, 2, None, false, out)?;
                write!(out, "{}}}{}", INDENT, cfg.eol)?;
            } else {
                write!(out, "{}{}: {}{}", INDENT, key, record::scalar_text(value), cfg.eol)?;
            }
        }

        Ok(())
    }

    /// Flattens an object into indented `key: value` lines.
    ///
    /// The exclusion set is `excluded_message_key` plus, when
    /// `exclude_standard` is set, the standard header keys. Error-like keys
    /// are checked before the exclusion set and always take the serialized
    /// dump path.
    fn flatten(
        &self,
        fields: &Map<String, Value>,
        depth: usize,
        excluded_message_key: Option<&str>,
        exclude_standard: bool,
        out: &mut String,
    ) -> fmt::Result {
        let cfg = &self.config;

        let mut excluded = KeySet::new();
        if let Some(key) = excluded_message_key {
            excluded.push(key);
        }
        if exclude_standard {
            excluded.extend(STANDARD_KEYS);
        }

        for (key, value) in fields {
            if cfg.error_like_object_keys.iter().any(|k| k == key) {
                self.write_error_like(key, value, depth, out)?;
            } else if !excluded.contains(&key.as_str()) {
                let pad = INDENT.repeat(depth);
                let serialized = pretty_json(value)?;
                write!(
                    out,
                    "{}{}: {}{}",
                    pad,
                    key,
                    indent_continuations(&serialized, &pad, cfg.eol),
                    cfg.eol,
                )?;
            }
        }

        Ok(())
    }

    /// Dumps an error-like value as indented JSON, then re-expands any
    /// serialized `"stack"` line into a real multi-line block.
    fn write_error_like(
        &self,
        key: &str,
        value: &Value,
        depth: usize,
        out: &mut String,
    ) -> fmt::Result {
        let cfg = &self.config;
        let pad = INDENT.repeat(depth);
        let serialized = pretty_json(value)?;
        let block = format!("{}{}: {}", pad, key, indent_continuations(&serialized, &pad, "\n"));

        for (i, line) in block.split('\n').enumerate() {
            if i > 0 {
                out.push_str(cfg.eol);
            }

            let captures = match STACK_LINE.captures(line) {
                Some(captures) => captures,
                None => {
                    out.push_str(line);
                    continue;
                }
            };

            // Re-expand the escaped stack string so the trace reads as real
            // lines, aligned one unit past the `"stack":` label.
            let leading = line.len() - line.trim_start().len();
            let stack_pad = " ".repeat(leading + INDENT.len());
            match serde_json::from_str::<String>(&captures[2]) {
                Ok(stack) => {
                    let broken = format!("{}{}", cfg.eol, stack_pad);
                    out.push_str(&captures[1]);
                    out.push_str(&broken);
                    out.push_str(&stack.replace('\n', &broken));
                }
                Err(_) => out.push_str(line),
            }
        }

        out.push_str(cfg.eol);
        Ok(())
    }
}

impl Formatter for Pretty {
    type Error = fmt::Error;

    fn fmt(&self, record: &Record) -> Result<String, fmt::Error> {
        self.render(record)
    }
}

/// Human-indented serialization of any value. Serializing a `Value` cannot
/// realistically fail; a failure is mapped onto `fmt::Error` so the caller
/// degrades to pass-through instead of panicking.
fn pretty_json(value: &Value) -> Result<String, fmt::Error> {
    serde_json::to_string_pretty(value).map_err(|_| fmt::Error)
}

/// Prefixes every line after the first with `pad`, joining with `eol`.
fn indent_continuations(text: &str, pad: &str, eol: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = String::with_capacity(text.len());

    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str(eol);
        out.push_str(pad);
        out.push_str(line);
    }

    out
}

/// Formats an epoch-millisecond value with a strftime pattern.
///
/// Returns `None` whenever the value or the pattern cannot produce a
/// formatted date (non-numeric field, out-of-range instant, malformed
/// pattern), letting the caller fall back to the raw field.
fn translate_time(value: &Value, pattern: &str, local: bool) -> Option<String> {
    let millis = value.as_f64()? as i64;

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut formatted = String::with_capacity(pattern.len() + 16);
    if local {
        let instant = Local.timestamp_millis_opt(millis).single()?;
        write!(formatted, "{}", instant.format_with_items(items.into_iter())).ok()?;
    } else {
        let instant = Utc.timestamp_millis_opt(millis).single()?;
        write!(formatted, "{}", instant.format_with_items(items.into_iter())).ok()?;
    }

    Some(formatted)
}

#[cfg(test)]
mod tests {
    use super::{indent_continuations, translate_time, STACK_LINE};
    use serde_json::json;

    #[test]
    fn stack_line_pattern() {
        assert!(STACK_LINE.captures(r#"  "message": "hi","#).is_none());

        let captures = STACK_LINE
            .captures(r#"  "stack": "Error: boom\n    at f","#)
            .expect("line matches");
        assert_eq!(&captures[1], r#"  "stack":"#);
        assert_eq!(&captures[2], r#""Error: boom\n    at f""#);
    }

    #[test]
    fn continuation_indent() {
        assert_eq!(indent_continuations("one", "    ", "\n"), "one");
        assert_eq!(
            indent_continuations("{\n  \"a\": 1\n}", "    ", "\n"),
            "{\n      \"a\": 1\n    }",
        );
    }

    #[test]
    fn time_translation_falls_back() {
        let pattern = "%Y-%m-%d %H:%M:%S%.3f %z";

        assert_eq!(
            translate_time(&json!(1500000000000i64), pattern, false).as_deref(),
            Some("2017-07-14 02:40:00.000 +0000"),
        );

        // not a number
        assert_eq!(translate_time(&json!("2017-07-14"), pattern, false), None);
        // malformed pattern
        assert_eq!(translate_time(&json!(1500000000000i64), "%!", false), None);
    }
}
