//! CLI entrypoint: a stdin-to-stdout filter around [`ndjson_pretty::Pretty`].
//!
//! Formatted output goes to stdout; the tool's own diagnostics go through
//! `tracing` to stderr so the data stream stays clean.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Render newline-delimited JSON log records as human-readable text.
///
/// Reads one record per line on stdin and writes the formatted text to
/// stdout. Lines that are not structured records pass through unmodified.
#[derive(Debug, Parser)]
#[command(name = "ndjson-pretty", version)]
struct Cli {
    /// Paint level labels and messages with ANSI colors, even when stdout
    /// is not a terminal
    #[arg(short, long)]
    colorize: bool,

    /// Terminate output lines with CRLF
    #[arg(long)]
    crlf: bool,

    /// Print the level token before the timestamp
    #[arg(short, long)]
    level_first: bool,

    /// Reformat epoch-millisecond timestamps with the date format
    #[arg(short, long)]
    translate_time: bool,

    /// Render timestamps in the system timezone instead of UTC
    #[arg(long)]
    local_time: bool,

    /// Record key that holds the human-readable message
    #[arg(short = 'k', long, default_value = "msg")]
    message_key: String,

    /// strftime pattern used with --translate-time
    #[arg(long, default_value = "%Y-%m-%d %H:%M:%S%.3f %z")]
    date_format: String,

    /// Comma-separated extra properties to print for error records, or '*'
    /// for all non-standard properties
    #[arg(long, default_value = "")]
    error_props: String,

    /// Keys whose values are rendered as nested error objects
    #[arg(long, value_delimiter = ',', default_values_t = ["err".to_owned(), "error".to_owned()])]
    error_like_object_keys: Vec<String>,

    /// Diagnostic verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if cli.colorize {
        // --colorize must survive a piped stdout.
        colored::control::set_override(true);
    }

    let pretty = ndjson_pretty::builder()
        .colorize(cli.colorize)
        .crlf(cli.crlf)
        .level_first(cli.level_first)
        .translate_time(cli.translate_time)
        .local_time(cli.local_time)
        .message_key(cli.message_key)
        .date_format(cli.date_format)
        .error_props(cli.error_props)
        .error_like_object_keys(cli.error_like_object_keys)
        .build();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut lines = 0u64;

    for line in stdin.lock().lines() {
        let line = line?;
        if let Err(err) = stdout.write_all(pretty.format(&line).as_bytes()) {
            if err.kind() == io::ErrorKind::BrokenPipe {
                debug!(lines, "stdout closed downstream, stopping");
                return Ok(());
            }
            return Err(err.into());
        }
        lines += 1;
    }

    stdout.flush()?;
    debug!(lines, "input drained");

    Ok(())
}
