use std::collections::BTreeMap;
use std::fmt;

use crate::error::SkipReason;

/// Per-run counters. Purely observational: nothing reads them to make decisions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub read: u64,
    pub accepted: u64,
    pub emitted: u64,
    skipped: BTreeMap<&'static str, u64>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(&mut self, reason: &SkipReason) {
        tracing::trace!(reason = %reason, "skipping");
        *self.skipped.entry(reason.label()).or_insert(0) += 1;
    }

    pub fn skipped(&self, label: &str) -> u64 {
        self.skipped.get(label).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read={} accepted={} emitted={} skipped={}",
            self.read,
            self.accepted,
            self.emitted,
            self.total_skipped()
        )?;
        for (label, count) in &self.skipped {
            write!(f, " {}={}", label, count)?;
        }
        Ok(())
    }
}
