//! Hadoop streaming glue for the reducers.
//!
//! The driver hands over values grouped by key when the input was sorted,
//! but nothing here relies on that: every group is folded into the same
//! reduction, so a key that shows up in several groups is still summed once.

use std::io::{self, Write};
use std::process;

use efflux::prelude::{Context, Reducer};

use crate::emission::Emission;
use crate::error::Result;
use crate::reducers::Reduction;
use crate::stats::RunStats;

pub struct StreamingReducer<T> {
    reduction: T,
    stats: RunStats,
}

impl<T: Reduction> StreamingReducer<T> {
    pub fn new(reduction: T) -> Self {
        StreamingReducer {
            reduction,
            stats: RunStats::new(),
        }
    }

    /// Folds one raw key/value pair from the driver.
    pub fn absorb(&mut self, key: &[u8], value: &[u8]) {
        if is_blank(key) && is_blank(value) {
            return;
        }

        self.stats.read += 1;
        match Emission::from_bytes(key, value) {
            Ok(emission) => {
                self.stats.accepted += 1;
                self.reduction.accumulate(emission);
            }
            Err(reason) => self.stats.skip(&reason),
        }
    }

    /// Ranks everything absorbed so far and writes the table to `out`.
    pub fn complete<W: Write>(&mut self, out: W) -> Result<RunStats> {
        let distinct = self.reduction.distinct_keys();
        let table = self.reduction.finish();
        table.write_csv(out)?;

        self.stats.emitted = table.len() as u64;
        tracing::info!(distinct_keys = distinct, "reduce finished: {}", self.stats);
        Ok(self.stats.clone())
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

impl<T: Reduction> Reducer for StreamingReducer<T> {
    fn reduce(&mut self, key: &[u8], values: &[&[u8]], _ctx: &mut Context) {
        for value in values {
            self.absorb(key, value);
        }
    }

    fn cleanup(&mut self, _ctx: &mut Context) {
        let stdout = io::stdout();
        if let Err(err) = self.complete(stdout.lock()) {
            tracing::error!("failed to write reducer output: {}", err);
            process::exit(1);
        }
    }
}
