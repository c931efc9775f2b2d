//! Event-to-protocol translation.
//!
//! One dispatch point over the runner's lifecycle events. Handlers are
//! independent and trust the stream to arrive well-formed: no
//! cross-event validation, no buffering, one or more protocol lines
//! per event in call order.

use crate::clock::{Clock, SystemClock};
use crate::coverage::CoverageSummary;
use crate::event::{Event, RunEndContext, RunStats, Speed, Suite, SuiteId, TestCase, TestError};
use crate::message::{ProtocolWriter, ServiceMessage};
use crate::result::InformarResult;
use std::collections::HashMap;
use std::io::Write;

/// Protocol name of the implicit top-level suite.
///
/// Fixed by the consuming CI configuration; the root suite itself
/// never emits suite-start/suite-end lines under its own title.
pub const ROOT_SUITE_NAME: &str = "mocha.suite";

/// Display name of the coverage block.
const COVERAGE_BLOCK_NAME: &str = "Code Coverage Summary";

/// Translates runner lifecycle events into TeamCity service messages.
///
/// The reporter owns its suite timing state: start timestamps live in
/// a map keyed by [`SuiteId`], populated at suite-start and removed at
/// the matching suite-end.
///
/// # Example
///
/// ```
/// use informar::{Event, RunEndContext, RunStats, TeamcityReporter};
///
/// let mut reporter = TeamcityReporter::new(Vec::new());
/// reporter.on_event(Event::RunStart(RunStats::new(0))).unwrap();
/// reporter.on_event(Event::RunEnd(RunEndContext::new(RunStats::new(12)))).unwrap();
/// ```
#[derive(Debug)]
pub struct TeamcityReporter<W: Write, C: Clock = SystemClock> {
    out: ProtocolWriter<W>,
    clock: C,
    started_at: HashMap<SuiteId, u64>,
}

impl<W: Write> TeamcityReporter<W> {
    /// Create a reporter over the given sink, timing suites with the
    /// system clock.
    pub fn new(sink: W) -> Self {
        Self::with_clock(sink, SystemClock)
    }
}

impl<W: Write, C: Clock> TeamcityReporter<W, C> {
    /// Create a reporter with an explicit time source.
    pub fn with_clock(sink: W, clock: C) -> Self {
        Self {
            out: ProtocolWriter::new(sink),
            clock,
            started_at: HashMap::new(),
        }
    }

    /// Dispatch one lifecycle event.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing to the sink fails.
    pub fn on_event(&mut self, event: Event) -> InformarResult<()> {
        tracing::debug!(event = event.name(), "dispatching lifecycle event");
        match event {
            Event::RunStart(stats) => self.on_run_start(stats),
            Event::SuiteStart(suite) => self.on_suite_start(&suite),
            Event::TestStart(test) => self.on_test_start(&test),
            Event::TestPass(test) => self.on_test_pass(&test),
            Event::TestFail { test, error } => self.on_test_fail(&test, &error),
            Event::TestPending(test) => self.on_test_pending(&test),
            Event::TestEnd(test) => self.on_test_end(&test),
            Event::SuiteEnd(suite) => self.on_suite_end(&suite),
            Event::RunEnd(ctx) => self.on_run_end(&ctx),
        }
    }

    /// Consume the reporter, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn on_run_start(&mut self, stats: RunStats) -> InformarResult<()> {
        self.out.message(
            &ServiceMessage::new("testSuiteStarted")
                .attr("name", ROOT_SUITE_NAME)
                .attr("duration", stats.duration_ms.to_string()),
        )
    }

    fn on_suite_start(&mut self, suite: &Suite) -> InformarResult<()> {
        if suite.root {
            return Ok(());
        }
        let _ = self.started_at.insert(suite.id, self.clock.now_ms());
        self.out.message(
            &ServiceMessage::new("testSuiteStarted").attr("name", suite.title.as_str()),
        )
    }

    fn on_test_start(&mut self, test: &TestCase) -> InformarResult<()> {
        self.out.message(
            &ServiceMessage::new("testStarted")
                .attr("name", test.title.as_str())
                .attr("captureStandardOutput", "true"),
        )
    }

    // Console convenience only; not part of the wire protocol.
    fn on_test_pass(&mut self, test: &TestCase) -> InformarResult<()> {
        let timing = match test.speed {
            Speed::Slow => format!("({}ms, slow)", test.duration_ms),
            Speed::Fast | Speed::Medium => format!("({}ms)", test.duration_ms),
        };
        self.out.line(&format!("  ✓ {} {timing}", test.title))
    }

    fn on_test_fail(&mut self, test: &TestCase, error: &TestError) -> InformarResult<()> {
        self.out.message(
            &ServiceMessage::new("testFailed")
                .attr("name", test.title.as_str())
                .attr("message", error.message.as_str())
                .attr("captureStandardOutput", "true")
                .attr("details", error.stack.as_str()),
        )
    }

    fn on_test_pending(&mut self, test: &TestCase) -> InformarResult<()> {
        self.out.line(&format!("  - {}", test.title))?;
        self.out.message(
            &ServiceMessage::new("testIgnored")
                .attr("name", test.title.as_str())
                .attr("message", "pending"),
        )
    }

    fn on_test_end(&mut self, test: &TestCase) -> InformarResult<()> {
        self.out.message(
            &ServiceMessage::new("testFinished")
                .attr("name", test.title.as_str())
                .attr("duration", test.duration_ms.to_string()),
        )
    }

    fn on_suite_end(&mut self, suite: &Suite) -> InformarResult<()> {
        if suite.root {
            return Ok(());
        }
        let elapsed = match self.started_at.remove(&suite.id) {
            Some(start) => self.clock.now_ms().saturating_sub(start),
            None => {
                tracing::warn!(suite = %suite.title, "suite end without matching start");
                0
            }
        };
        self.out.message(
            &ServiceMessage::new("testSuiteFinished")
                .attr("name", suite.title.as_str())
                .attr("duration", elapsed.to_string()),
        )
    }

    fn on_run_end(&mut self, ctx: &RunEndContext) -> InformarResult<()> {
        self.out.message(
            &ServiceMessage::new("testSuiteFinished")
                .attr("name", ROOT_SUITE_NAME)
                .attr("duration", ctx.stats.duration_ms.to_string()),
        )?;
        self.out.blank()?;
        self.emit_coverage(ctx.coverage.as_ref(), ctx.threshold)
    }

    fn emit_coverage(
        &mut self,
        summary: Option<&CoverageSummary>,
        threshold: u32,
    ) -> InformarResult<()> {
        let Some(summary) = summary else {
            // Missing summary is reported through the protocol, with
            // nothing after it: no block, no verdict, no trailing blank.
            return self.out.message(
                &ServiceMessage::new("message")
                    .attr("text", "CODE-COVERAGE CHECK FAILED")
                    .attr("errorDetails", "Error reading report file.")
                    .attr("status", "ERROR"),
            );
        };

        let percent = summary.percent();
        self.out.message(
            &ServiceMessage::new("message").attr("text", format!("Code Coverage is {percent}%")),
        )?;
        self.out
            .message(&ServiceMessage::new("blockOpened").attr("name", COVERAGE_BLOCK_NAME))?;
        // The "B" and "L" keys both carry the rounded percentage; the
        // consuming CI schema expects the duplication.
        self.statistic("CodeCoverageB", u64::from(percent))?;
        self.statistic("CodeCoverageAbsLCovered", summary.hits)?;
        self.statistic("CodeCoverageAbsLTotal", summary.sloc)?;
        self.statistic("CodeCoverageL", u64::from(percent))?;
        self.out
            .message(&ServiceMessage::new("blockClosed").attr("name", COVERAGE_BLOCK_NAME))?;

        if summary.meets(threshold) {
            self.out.message(
                &ServiceMessage::new("message")
                    .attr("text", "CODE-COVERAGE CHECK PASSED")
                    .attr("status", "NORMAL"),
            )?;
        } else {
            self.out.message(
                &ServiceMessage::new("message")
                    .attr("text", "CODE-COVERAGE CHECK FAILED")
                    .attr("errorDetails", "Insufficient code coverage.")
                    .attr("status", "ERROR"),
            )?;
        }
        self.out.blank()
    }

    fn statistic(&mut self, key: &'static str, value: u64) -> InformarResult<()> {
        self.out.message(
            &ServiceMessage::new("buildStatisticValue")
                .attr("key", key)
                .attr("value", value.to_string()),
        )
    }
}
