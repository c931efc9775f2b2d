//! Test-lifecycle event model.
//!
//! The runner is an external collaborator; its callbacks are modeled
//! as a tagged enum so a reporter can be driven by synthetic values in
//! tests, or by a serialized stream, without a live event emitter.

use crate::coverage::CoverageSummary;
use serde::{Deserialize, Serialize};

/// Stable suite identity assigned by the runner.
///
/// Start timestamps are keyed off this id instead of being written
/// onto the runner's suite object, so the reporter never mutates
/// values it does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuiteId(pub u64);

/// A named group of tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    /// Runner-assigned identity, stable across start/end.
    pub id: SuiteId,
    /// Suite title as written in the test source.
    pub title: String,
    /// True only for the implicit top-level suite, which is excluded
    /// from protocol emission.
    #[serde(default)]
    pub root: bool,
}

impl Suite {
    /// Create a non-root suite.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: SuiteId(id),
            title: title.into(),
            root: false,
        }
    }

    /// Create the implicit top-level suite.
    #[must_use]
    pub fn root(id: u64) -> Self {
        Self {
            id: SuiteId(id),
            title: String::new(),
            root: true,
        }
    }
}

/// Relative execution speed of a test, classified by the runner
/// against its slow threshold. Feeds only the human-readable pass
/// line; the wire protocol never carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    /// Within the runner's fast budget.
    #[default]
    Fast,
    /// Near the slow threshold.
    Medium,
    /// Over the slow threshold.
    Slow,
}

/// A single test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Test title as written in the test source.
    pub title: String,
    /// Execution duration in milliseconds, populated by the runner.
    #[serde(default)]
    pub duration_ms: u64,
    /// Runner-classified speed; defaults to fast when absent.
    #[serde(default)]
    pub speed: Speed,
}

impl TestCase {
    /// Create a test case with zero duration.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration_ms: 0,
            speed: Speed::Fast,
        }
    }

    /// Set the runner-measured duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the runner-classified speed.
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }
}

/// Failure details attached to a failing test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestError {
    /// Assertion or error message.
    pub message: String,
    /// Stack trace, possibly multi-line.
    #[serde(default)]
    pub stack: String,
}

impl TestError {
    /// Create failure details.
    #[must_use]
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: stack.into(),
        }
    }
}

/// Cumulative run statistics maintained by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Accumulated run duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
}

impl RunStats {
    /// Create run statistics with the given accumulated duration.
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }
}

/// Everything the run-end handler needs, passed explicitly instead of
/// read late-bound off the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEndContext {
    /// Final run statistics.
    #[serde(default)]
    pub stats: RunStats,
    /// Coverage summary, when the collector produced one. Absence is
    /// an expected state reported through the protocol.
    #[serde(default)]
    pub coverage: Option<CoverageSummary>,
    /// Minimum acceptable coverage percentage (inclusive).
    #[serde(default)]
    pub threshold: u32,
}

impl RunEndContext {
    /// Create a run-end context with no coverage and a zero threshold.
    #[must_use]
    pub fn new(stats: RunStats) -> Self {
        Self {
            stats,
            coverage: None,
            threshold: 0,
        }
    }

    /// Attach a coverage summary.
    #[must_use]
    pub fn with_coverage(mut self, coverage: CoverageSummary) -> Self {
        self.coverage = Some(coverage);
        self
    }

    /// Set the coverage threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Lifecycle notification from the runner.
///
/// Events arrive strictly in execution order: `run-start` precedes all
/// others, every non-root `suite-start` is matched by one `suite-end`,
/// every `test-start` by one `test-end`, and `run-end` is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    /// The run began.
    RunStart(RunStats),
    /// A suite began.
    SuiteStart(Suite),
    /// A test began executing.
    TestStart(TestCase),
    /// A test passed.
    TestPass(TestCase),
    /// A test failed.
    TestFail {
        /// The failing test.
        test: TestCase,
        /// Why it failed.
        error: TestError,
    },
    /// A test is pending (registered but not implemented).
    TestPending(TestCase),
    /// A test finished, pass or fail.
    TestEnd(TestCase),
    /// A suite finished.
    SuiteEnd(Suite),
    /// The run finished. Terminal, at most once per run.
    RunEnd(RunEndContext),
}

impl Event {
    /// Wire name of the event, matching its serialized tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RunStart(_) => "run-start",
            Self::SuiteStart(_) => "suite-start",
            Self::TestStart(_) => "test-start",
            Self::TestPass(_) => "test-pass",
            Self::TestFail { .. } => "test-fail",
            Self::TestPending(_) => "test-pending",
            Self::TestEnd(_) => "test-end",
            Self::SuiteEnd(_) => "suite-end",
            Self::RunEnd(_) => "run-end",
        }
    }
}
