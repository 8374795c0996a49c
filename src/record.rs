//! Recognition of structured log records.
//!
//! A structured record is one line of input that parses as a JSON object and
//! carries the schema marker `v: 1`. Anything else (unparseable text, valid
//! JSON of another shape, a different schema version) is not a record, and
//! the caller passes the line through verbatim.

use serde::Serialize;
use serde_json::{Map, Value};

/// Keys already surfaced in the header line, excluded from generic body
/// rendering. The configured message key is excluded separately and never
/// appears here.
pub(crate) const STANDARD_KEYS: [&str; 6] = ["pid", "hostname", "name", "level", "time", "v"];

/// The `type` value that selects the error-rendering branch.
pub(crate) const ERROR_TYPE: &str = "Error";

/// One recognized structured log record.
///
/// Constructed fresh per input line by [`Record::recognize`] and discarded
/// after rendering; it has no identity beyond the current call. Serializes
/// transparently as the underlying object, so closure formatters can hand a
/// record straight to `serde_json`.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Parses a raw line into a recognized record.
    ///
    /// Returns `None` for anything that is not a JSON object with the schema
    /// marker `v` numerically equal to `1`. On `None` the caller must emit
    /// the original line unmodified, plus a terminator: the pass-through
    /// guarantee that makes the formatter safe on mixed input streams.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndjson_pretty::Record;
    ///
    /// assert!(Record::recognize(r#"{"v":1,"level":30,"msg":"hi"}"#).is_some());
    /// assert!(Record::recognize(r#"{"v":2,"level":30,"msg":"hi"}"#).is_none());
    /// assert!(Record::recognize("not json at all").is_none());
    /// ```
    pub fn recognize(line: &str) -> Option<Record> {
        let fields = match serde_json::from_str(line).ok()? {
            Value::Object(fields) => fields,
            _ => return None,
        };

        // The marker must be numerically 1, not merely present.
        match fields.get("v").and_then(Value::as_f64) {
            Some(v) if v == 1.0 => Some(Record { fields }),
            _ => None,
        }
    }

    /// Returns the value under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterates the record's fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub(crate) fn entries(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the value under `key` only if it is truthy.
    pub(crate) fn get_truthy(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| is_truthy(value))
    }

    /// The numeric level code, when the record carries an integral one.
    pub(crate) fn level_code(&self) -> Option<i64> {
        let level = self.fields.get("level")?.as_f64()?;
        (level.fract() == 0.0).then(|| level as i64)
    }

    /// Whether the record selects the error-rendering branch.
    pub fn is_error(&self) -> bool {
        self.fields.get("type").and_then(Value::as_str) == Some(ERROR_TYPE)
    }
}

/// Truthiness of a JSON value: `null`, `false`, `0`, and `""` are falsy,
/// everything else (including empty arrays and objects) is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The plain text form of a value: strings verbatim (unquoted), scalars via
/// their display form, composites as compact JSON.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => composite.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{is_truthy, scalar_text, Record};
    use serde_json::json;

    #[test]
    fn recognizes_schema_records_only() {
        assert!(Record::recognize(r#"{"v":1}"#).is_some());
        assert!(Record::recognize(r#"{"v":1.0}"#).is_some());

        assert!(Record::recognize(r#"{"v":2}"#).is_none());
        assert!(Record::recognize(r#"{"v":"1"}"#).is_none());
        assert!(Record::recognize(r#"{"level":30}"#).is_none());
        assert!(Record::recognize("[1,2,3]").is_none());
        assert!(Record::recognize("null").is_none());
        assert!(Record::recognize("false").is_none());
        assert!(Record::recognize("").is_none());
        assert!(Record::recognize("not json at all").is_none());
    }

    #[test]
    fn level_code_requires_an_integral_number() {
        let record = Record::recognize(r#"{"v":1,"level":30}"#).unwrap();
        assert_eq!(record.level_code(), Some(30));

        let record = Record::recognize(r#"{"v":1,"level":30.0}"#).unwrap();
        assert_eq!(record.level_code(), Some(30));

        let record = Record::recognize(r#"{"v":1,"level":30.5}"#).unwrap();
        assert_eq!(record.level_code(), None);

        let record = Record::recognize(r#"{"v":1,"level":"30"}"#).unwrap();
        assert_eq!(record.level_code(), None);

        let record = Record::recognize(r#"{"v":1}"#).unwrap();
        assert_eq!(record.level_code(), None);
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn plain_text_forms() {
        assert_eq!(scalar_text(&json!("text")), "text");
        assert_eq!(scalar_text(&json!(42)), "42");
        assert_eq!(scalar_text(&json!(true)), "true");
        assert_eq!(scalar_text(&json!(null)), "null");
        assert_eq!(scalar_text(&json!([1, 2])), "[1,2]");
    }
}
