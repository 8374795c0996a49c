//! Configure and build [`Pretty`] formatters.
//!
//! To start, call [`builder`](crate::builder()) to create a [`Builder`], which
//! configures the formatter by chaining methods. Every option has a default
//! matching the upstream record producer, so `builder().build()` is already a
//! working formatter.
//!
//! # Examples
//!
//! Printing the severity first, reformatting timestamps in the system
//! timezone, and pulling the message from a non-default key:
//!
//! ```
//! let pretty = ndjson_pretty::builder()
//!     .level_first(true)
//!     .translate_time(true)
//!     .local_time(true)
//!     .message_key("message")
//!     .build();
//! ```

use crate::format::Pretty;
use crate::level::Palette;

/// Configures a [`Pretty`] formatter.
///
/// See the [module level documentation] for details on using [`Builder`].
///
/// [module level documentation]: self
#[derive(Clone, Debug)]
pub struct Builder {
    colorize: bool,
    crlf: bool,
    date_format: String,
    error_like_object_keys: Vec<String>,
    error_props: String,
    level_first: bool,
    local_time: bool,
    message_key: String,
    translate_time: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            colorize: false,
            crlf: false,
            date_format: "%Y-%m-%d %H:%M:%S%.3f %z".to_owned(),
            error_like_object_keys: vec!["err".to_owned(), "error".to_owned()],
            error_props: String::new(),
            level_first: false,
            local_time: false,
            message_key: "msg".to_owned(),
            translate_time: false,
        }
    }
}

impl Builder {
    /// Paints the severity label and the message with ANSI colors.
    ///
    /// Off by default. With colorization off every style is the identity and
    /// the output contains no escape sequences.
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Terminates output lines with `\r\n` instead of `\n`.
    pub fn crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }

    /// Sets the strftime pattern used when [`translate_time`] is enabled.
    ///
    /// Defaults to `%Y-%m-%d %H:%M:%S%.3f %z`. A pattern that fails to
    /// format never aborts rendering; the raw timestamp is printed instead.
    ///
    /// [`translate_time`]: Builder::translate_time
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Sets the keys whose values are rendered as nested error objects,
    /// with any embedded stack trace re-expanded into real lines.
    ///
    /// Defaults to `["err", "error"]`.
    ///
    /// # Examples
    ///
    /// ```
    /// let pretty = ndjson_pretty::builder()
    ///     .error_like_object_keys(["cause", "err"])
    ///     .build();
    /// ```
    pub fn error_like_object_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.error_like_object_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the extra properties printed for top-level error records, as a
    /// comma-separated list of key names, or `*` for every non-standard
    /// property.
    ///
    /// Defaults to empty: only the stack trace is printed.
    pub fn error_props(mut self, props: impl Into<String>) -> Self {
        self.error_props = props.into();
        self
    }

    /// Prints the severity token before the bracketed timestamp.
    pub fn level_first(mut self, level_first: bool) -> Self {
        self.level_first = level_first;
        self
    }

    /// Renders translated timestamps in the system timezone instead of UTC.
    pub fn local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    /// Sets the record key that holds the human-readable message.
    ///
    /// Defaults to `msg`.
    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    /// Reformats the record's epoch-millisecond timestamp with the
    /// configured [`date_format`] instead of printing it raw.
    ///
    /// [`date_format`]: Builder::date_format
    pub fn translate_time(mut self, translate_time: bool) -> Self {
        self.translate_time = translate_time;
        self
    }

    /// Finalizes the configuration into a [`Pretty`] formatter.
    pub fn build(self) -> Pretty {
        Pretty::new(Config {
            palette: if self.colorize {
                Palette::Ansi
            } else {
                Palette::Plain
            },
            eol: if self.crlf { "\r\n" } else { "\n" },
            date_format: self.date_format,
            error_like_object_keys: self.error_like_object_keys,
            error_props: ErrorProps::parse(&self.error_props),
            level_first: self.level_first,
            local_time: self.local_time,
            message_key: self.message_key,
            translate_time: self.translate_time,
        })
    }
}

/// Immutable per-formatter settings, resolved once by [`Builder::build`].
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) palette: Palette,
    pub(crate) eol: &'static str,
    pub(crate) date_format: String,
    pub(crate) error_like_object_keys: Vec<String>,
    pub(crate) error_props: ErrorProps,
    pub(crate) level_first: bool,
    pub(crate) local_time: bool,
    pub(crate) message_key: String,
    pub(crate) translate_time: bool,
}

/// Which extra properties an error record prints after its stack trace.
#[derive(Clone, Debug)]
pub(crate) enum ErrorProps {
    None,
    All,
    Keys(Vec<String>),
}

impl ErrorProps {
    fn parse(raw: &str) -> Self {
        match raw {
            "" => ErrorProps::None,
            "*" => ErrorProps::All,
            list => ErrorProps::Keys(list.split(',').map(str::to_owned).collect()),
        }
    }
}
