//! Code-coverage summary data.
//!
//! Produced by an external coverage collector and handed to the
//! reporter only at run end. The statistic block itself is emitted by
//! the reporter; this module owns the numbers.

use serde::{Deserialize, Serialize};

/// Coverage summary exposed by the coverage collector at run end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Covered percentage as reported by the collector (may be
    /// fractional, e.g. 87.2).
    pub coverage: f64,
    /// Covered statement count.
    pub hits: u64,
    /// Total statements of code (the coverage denominator).
    pub sloc: u64,
}

impl CoverageSummary {
    /// Create a summary from collector output.
    #[must_use]
    pub fn new(coverage: f64, hits: u64, sloc: u64) -> Self {
        Self {
            coverage,
            hits,
            sloc,
        }
    }

    /// Percentage rounded up to the nearest integer, as carried by
    /// every statistic line of the report block.
    #[must_use]
    pub fn percent(&self) -> u32 {
        self.coverage.ceil() as u32
    }

    /// Whether this summary meets the threshold. The boundary is
    /// inclusive: an exact match passes.
    #[must_use]
    pub fn meets(&self, threshold: u32) -> bool {
        self.percent() >= threshold
    }
}
