//! Map/reduce stages for aggregating product review exports into summary tables.
//!
//! Mappers read a header-bearing review CSV and emit `key<TAB>value` lines;
//! reducers fold those lines into ranked CSV tables. Everything here is a
//! single-pass stream transducer; the only state a reducer keeps is its own
//! aggregate, which is sized by the number of distinct keys.

pub mod config;
pub mod emission;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod mappers;
pub mod record;
pub mod reducers;
pub mod stats;
pub mod streaming;
pub mod tokenize;

pub use emission::Emission;
pub use error::{PipelineError, Result, SkipReason};
pub use record::{Column, Record, RecordReader};
pub use stats::RunStats;
