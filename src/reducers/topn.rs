use std::collections::HashMap;
use std::mem;

use crate::config::TopNConfig;
use crate::emission::Emission;

use super::{Reduction, Table};

/// One surviving key and its total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub key: String,
    pub total: i64,
}

/// Running integer sum per key.
#[derive(Debug, Default, Clone)]
pub struct TopNCounter {
    sums: HashMap<String, i64>,
}

impl TopNCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: String, value: i64) {
        let sum = self.sums.entry(key).or_insert(0);
        *sum = sum.saturating_add(value);
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.sums.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Highest totals first, ties by key ascending, at most `limit` rows.
    pub fn ranked(self, limit: usize) -> Vec<CountRow> {
        let mut rows: Vec<CountRow> = self
            .sums
            .into_iter()
            .map(|(key, total)| CountRow { key, total })
            .collect();
        rows.sort_unstable_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
        rows.truncate(limit);
        rows
    }
}

/// Top-N counting job: sum per key, rank, truncate, optional header.
#[derive(Debug, Clone)]
pub struct TopNReduction {
    config: TopNConfig,
    counter: TopNCounter,
}

impl TopNReduction {
    pub fn new(config: TopNConfig) -> Self {
        TopNReduction {
            config,
            counter: TopNCounter::new(),
        }
    }

    pub fn counter(&self) -> &TopNCounter {
        &self.counter
    }
}

impl Reduction for TopNReduction {
    fn accumulate(&mut self, emission: Emission) {
        let (key, value) = emission.into_parts();
        self.counter.add(key, value);
    }

    fn distinct_keys(&self) -> usize {
        self.counter.len()
    }

    fn finish(&mut self) -> Table {
        let counter = mem::take(&mut self.counter);
        let mut table = Table::new(self.config.header.clone());
        for row in counter.ranked(self.config.limit) {
            table.push(vec![row.key, row.total.to_string()]);
        }
        table
    }
}
