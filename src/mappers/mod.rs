//! Mapper stage: review rows in, key/value emissions out.
//!
//! Every mapper shares one failure policy. A row that cannot be used (short
//! row, bad rating, empty key, filtered out) is dropped and counted; the run
//! only stops when the header lacks a required column or the input itself
//! fails to read.

mod category;
mod products;
mod words;

use std::io::{BufWriter, Read, Write};

use clap::ValueEnum;

use crate::emission::Emission;
use crate::error::{Result, SkipReason};
use crate::record::{Column, Record, RecordReader};
use crate::stats::RunStats;

pub use category::{AvgRatingCategory, CategoryCount};
pub use products::ProblemProducts;
pub use words::{RatingFilter, SentimentWords, WordCount};

pub trait Mapper {
    /// Columns that must be present in the input header.
    fn columns(&self) -> &'static [Column];

    /// Maps one record. Either every emission for the row or a skip.
    fn map(&self, record: &Record) -> std::result::Result<Vec<Emission>, SkipReason>;
}

/// The mapper variants, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapperKind {
    Wordcount,
    PositiveWords,
    NegativeWords,
    CategoryCount,
    ProblemProducts,
    AvgRatingCategory,
}

impl MapperKind {
    pub fn mapper(self) -> Box<dyn Mapper> {
        match self {
            MapperKind::Wordcount => Box::new(WordCount),
            MapperKind::PositiveWords => Box::new(SentimentWords::new(RatingFilter::Positive)),
            MapperKind::NegativeWords => Box::new(SentimentWords::new(RatingFilter::Negative)),
            MapperKind::CategoryCount => Box::new(CategoryCount),
            MapperKind::ProblemProducts => Box::new(ProblemProducts),
            MapperKind::AvgRatingCategory => Box::new(AvgRatingCategory),
        }
    }
}

/// Parses the `rating` field as an integer.
pub(crate) fn rating(record: &Record) -> std::result::Result<i64, SkipReason> {
    let raw = record.require(Column::Rating)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SkipReason::InvalidRating(raw.to_string()))
}

/// Runs `mapper` over a review CSV, handing each emission to `emit`.
pub fn map_records<M, R, F>(mapper: &M, input: R, mut emit: F) -> Result<RunStats>
where
    M: Mapper + ?Sized,
    R: Read,
    F: FnMut(Emission) -> Result<()>,
{
    let mut stats = RunStats::new();
    let reader = RecordReader::new(input, mapper.columns())?;

    for row in reader {
        stats.read += 1;
        let emissions = match row?.and_then(|record| mapper.map(&record)) {
            Ok(emissions) => emissions,
            Err(reason) => {
                stats.skip(&reason);
                continue;
            }
        };

        stats.accepted += 1;
        for emission in emissions {
            emit(emission)?;
            stats.emitted += 1;
        }
    }

    Ok(stats)
}

/// Runs `mapper` over a review CSV and writes `key<TAB>value` lines to `output`.
pub fn run<M, R, W>(mapper: &M, input: R, output: W) -> Result<RunStats>
where
    M: Mapper + ?Sized,
    R: Read,
    W: Write,
{
    let mut out = BufWriter::new(output);
    let stats = map_records(mapper, input, |emission| {
        writeln!(out, "{}", emission)?;
        Ok(())
    })?;
    out.flush()?;
    Ok(stats)
}
