//! The fixed severity table and its presentation.

use colored::{ColoredString, Colorize};

/// A record's severity, resolved from its numeric level code.
///
/// The table is closed: the six codes the upstream producer emits map to
/// their labels, and every other code (or a missing/non-integer level) falls
/// back to [`Severity::Userlvl`]. Resolution never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Userlvl,
}

impl Severity {
    pub(crate) fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(10) => Severity::Trace,
            Some(20) => Severity::Debug,
            Some(30) => Severity::Info,
            Some(40) => Severity::Warn,
            Some(50) => Severity::Error,
            Some(60) => Severity::Fatal,
            _ => Severity::Userlvl,
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Userlvl => "USERLVL",
        }
    }

    fn painted(self) -> ColoredString {
        let label = self.label();
        match self {
            Severity::Trace => label.bright_black(),
            Severity::Debug => label.blue(),
            Severity::Info => label.green(),
            Severity::Warn => label.yellow(),
            Severity::Error => label.red(),
            Severity::Fatal => label.on_red(),
            Severity::Userlvl => label.white(),
        }
    }
}

/// The styling capability bound at construction time.
///
/// [`Plain`](Palette::Plain) is the identity transform; [`Ansi`](Palette::Ansi)
/// wraps text in the escape codes of the style assigned to each severity.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Palette {
    Plain,
    Ansi,
}

impl Palette {
    /// Renders the severity token for a numeric level code.
    pub(crate) fn severity(self, code: Option<i64>) -> String {
        let severity = Severity::from_code(code);
        match self {
            Palette::Plain => severity.label().to_owned(),
            Palette::Ansi => severity.painted().to_string(),
        }
    }

    /// Renders the message text.
    pub(crate) fn message(self, text: &str) -> String {
        match self {
            Palette::Plain => text.to_owned(),
            Palette::Ansi => text.cyan().to_string(),
        }
    }
}
