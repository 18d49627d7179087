//! Reducer stage: fold an unordered key/value stream into a ranked table.
//!
//! Input order does not matter. Each reduction keeps one entry per distinct
//! key for the whole run, so memory grows with key cardinality, not with the
//! number of input lines.

mod average;
mod table;
mod topn;

use std::io::BufRead;
use std::str;

use crate::emission::Emission;
use crate::error::{Result, SkipReason};
use crate::stats::RunStats;

pub use average::{AverageAggregate, AverageReduction, AverageRow, AVERAGE_HEADER};
pub use table::Table;
pub use topn::{CountRow, TopNCounter, TopNReduction};

pub trait Reduction {
    fn accumulate(&mut self, emission: Emission);

    /// Number of distinct keys held so far.
    fn distinct_keys(&self) -> usize;

    /// Ranks what has been accumulated and renders it, leaving the reduction empty.
    fn finish(&mut self) -> Table;
}

/// Folds every line of `input` into `reduction` and hands it back.
///
/// Blank lines are ignored. Lines that do not parse are counted and dropped.
pub fn fold_lines<R, T>(mut input: R, mut reduction: T) -> Result<(T, RunStats)>
where
    R: BufRead,
    T: Reduction,
{
    let mut stats = RunStats::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = match str::from_utf8(&buf) {
            Ok(line) => line,
            Err(_) => {
                stats.read += 1;
                stats.skip(&SkipReason::MalformedLine);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        stats.read += 1;
        match Emission::parse_line(line) {
            Ok(emission) => {
                stats.accepted += 1;
                reduction.accumulate(emission);
            }
            Err(reason) => stats.skip(&reason),
        }
    }

    Ok((reduction, stats))
}

/// Folds `input` and renders the finished table.
pub fn reduce<R, T>(input: R, reduction: T) -> Result<(Table, RunStats)>
where
    R: BufRead,
    T: Reduction,
{
    let (mut reduction, mut stats) = fold_lines(input, reduction)?;
    let table = reduction.finish();
    stats.emitted = table.len() as u64;
    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopNConfig;

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut input = b"good\t1\n".to_vec();
        input.extend_from_slice(&[0xc3, 0x28, b'\t', b'1', b'\n']);
        input.extend_from_slice(b"good\t2\n");

        let (counter, stats) =
            fold_lines(input.as_slice(), TopNReduction::new(TopNConfig::default())).unwrap();

        assert_eq!(counter.distinct_keys(), 1);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.skipped("malformed_line"), 1);
    }

    #[test]
    fn blank_lines_are_not_counted() {
        let (_, stats) = fold_lines(
            "\n  \nkey\t1\n\r\n".as_bytes(),
            TopNReduction::new(TopNConfig::default()),
        )
        .unwrap();
        assert_eq!(stats.read, 1);
        assert_eq!(stats.total_skipped(), 0);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let (table, stats) = reduce(
            "a\t1\nb\t2".as_bytes(),
            TopNReduction::new(TopNConfig::default()),
        )
        .unwrap();
        assert_eq!(stats.accepted, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(stats.emitted, 2);
    }
}
