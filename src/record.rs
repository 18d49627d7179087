//! Header-aware reader over the raw review export.
//!
//! Required columns are resolved to positions once, from the header row, by
//! exact case-sensitive name. Field values are handed out untouched; parsing
//! them is the mapper's business.

use std::fmt;
use std::io::Read;

use csv::StringRecord;

use crate::error::{PipelineError, Result, SkipReason};

/// A named column of the review export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Text,
    Rating,
    Category,
    ProductName,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Text => "text",
            Column::Rating => "rating",
            Column::Category => "category",
            Column::ProductName => "product_name",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One input row, holding only the columns the reader was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(Column, String)>,
}

impl Record {
    pub fn new(fields: Vec<(Column, String)>) -> Self {
        Record { fields }
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`Record::get`] but reports the absent column as a skip.
    pub fn require(&self, column: Column) -> std::result::Result<&str, SkipReason> {
        self.get(column).ok_or(SkipReason::MissingField(column))
    }
}

/// Outcome of reading one row: a usable record or the reason it was dropped.
pub type Row = std::result::Result<Record, SkipReason>;

pub struct RecordReader<R> {
    reader: csv::Reader<R>,
    layout: Vec<(Column, usize)>,
    buf: StringRecord,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    /// Reads the header and resolves `columns` against it.
    ///
    /// An input without any header row yields no records. A header that lacks
    /// one of `columns` is a [`PipelineError::MissingColumn`].
    pub fn new(input: R, columns: &[Column]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            tracing::debug!("input has no header row");
            return Ok(RecordReader {
                reader,
                layout: Vec::new(),
                buf: StringRecord::new(),
                done: true,
            });
        }

        let layout = resolve(&headers, columns)?;
        tracing::debug!(?layout, "resolved columns");

        Ok(RecordReader {
            reader,
            layout,
            buf: StringRecord::new(),
            done: false,
        })
    }

    fn build(&self) -> Row {
        let mut fields = Vec::with_capacity(self.layout.len());
        for &(column, index) in &self.layout {
            match self.buf.get(index) {
                Some(value) => fields.push((column, value.to_string())),
                None => return Err(SkipReason::MissingField(column)),
            }
        }
        Ok(Record::new(fields))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record(&mut self.buf) {
            Ok(true) => Some(Ok(self.build())),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) if err.is_io_error() => {
                self.done = true;
                Some(Err(PipelineError::Csv(err)))
            }
            Err(err) => Some(Ok(Err(SkipReason::MalformedRow(err.to_string())))),
        }
    }
}

fn resolve(headers: &StringRecord, columns: &[Column]) -> Result<Vec<(Column, usize)>> {
    columns
        .iter()
        .map(|&column| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == column.name())
                .map(|index| (column, index))
                .ok_or_else(|| PipelineError::MissingColumn {
                    column: column.name().to_string(),
                })
        })
        .collect()
}
