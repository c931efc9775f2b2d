//! Informar: TeamCity Service-Message Reporter for Test Runs
//!
//! Informar (Spanish: "to report") translates an ordered stream of
//! test-lifecycle events into the line-oriented `##teamcity[...]`
//! service-message protocol consumed by a CI server, plus a
//! code-coverage summary block at the end of the run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   INFORMAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌────────────┐          │
//! │   │ Runner     │    │ Teamcity     │    │ CI Server  │          │
//! │   │ (events)   │───►│ Reporter     │───►│ (stdout)   │          │
//! │   │            │    │              │    │            │          │
//! │   └────────────┘    └──────────────┘    └────────────┘          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The runner is an external collaborator. Its only contract with this
//! crate is a sequence of [`Event`] values delivered in execution
//! order; feeding synthetic events works exactly like a live run.
//!
//! # Example
//!
//! ```
//! use informar::{Event, RunStats, TeamcityReporter, TestCase};
//!
//! let mut reporter = TeamcityReporter::new(Vec::new());
//! reporter.on_event(Event::RunStart(RunStats::new(0))).unwrap();
//! reporter.on_event(Event::TestStart(TestCase::new("adds numbers"))).unwrap();
//! ```

#![warn(missing_docs)]

mod clock;
mod coverage;
mod escape;
mod event;
mod message;
mod reporter;
mod result;

pub use clock::{Clock, FakeClock, SystemClock};
pub use coverage::CoverageSummary;
pub use escape::{escape, escape_opt};
pub use event::{Event, RunEndContext, RunStats, Speed, Suite, SuiteId, TestCase, TestError};
pub use message::{ProtocolWriter, ServiceMessage};
pub use reporter::{TeamcityReporter, ROOT_SUITE_NAME};
pub use result::{InformarError, InformarResult};
