//! Informante: CLI front end for the Informar reporter.
//!
//! Reads a test-run event stream as JSON Lines (one [`Event`] per
//! line) and writes the TeamCity service-message protocol to stdout.
//! Any runner that can serialize its lifecycle callbacks can drive a
//! CI server through this binary.
//!
//! ## Usage
//!
//! ```bash
//! informante < events.jsonl            # Translate a stream from stdin
//! informante --input events.jsonl      # Translate a recorded stream
//! informante --threshold 80 < events.jsonl
//! ```

#![warn(missing_docs)]

use clap::Parser;
use informar::{Event, InformarResult, SystemClock, TeamcityReporter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

/// Informante: replay a test-run event stream as TeamCity service messages
#[derive(Parser, Debug)]
#[command(name = "informante")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Event stream file (JSON Lines); reads stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Minimum acceptable coverage percentage; overrides the value in
    /// the stream's run-end event
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error diagnostics)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Default tracing directive for the chosen verbosity.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Initialize tracing on stderr, honoring `RUST_LOG` when set.
///
/// Diagnostics must never land on stdout: the protocol owns it.
pub fn init_tracing(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run the translation end to end.
///
/// # Errors
///
/// Returns an error when the input cannot be read, a line is not a
/// valid event, or writing to stdout fails.
pub fn run(cli: &Cli) -> InformarResult<()> {
    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let stdout = io::stdout();
    let mut reporter = TeamcityReporter::with_clock(stdout.lock(), SystemClock);
    translate(reader, &mut reporter, cli.threshold)
}

/// Feed each JSONL event through the reporter, applying the threshold
/// override to the run-end context.
pub fn translate<R, W>(
    reader: R,
    reporter: &mut TeamcityReporter<W>,
    threshold: Option<u32>,
) -> InformarResult<()>
where
    R: BufRead,
    W: Write,
{
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut event: Event = serde_json::from_str(&line)?;
        if let (Some(t), Event::RunEnd(ctx)) = (threshold, &mut event) {
            tracing::info!(threshold = t, "overriding run-end coverage threshold");
            ctx.threshold = t;
        }
        reporter.on_event(event)?;
    }
    Ok(())
}
