use crate::emission::Emission;
use crate::error::SkipReason;
use crate::record::{Column, Record};
use crate::tokenize::tokenize;

use super::{rating, Mapper};

fn token_emissions(text: &str) -> Result<Vec<Emission>, SkipReason> {
    tokenize(text).iter().map(Emission::one).collect()
}

/// `(token, 1)` for every token of every review.
pub struct WordCount;

impl Mapper for WordCount {
    fn columns(&self) -> &'static [Column] {
        &[Column::Text]
    }

    fn map(&self, record: &Record) -> Result<Vec<Emission>, SkipReason> {
        token_emissions(record.require(Column::Text)?)
    }
}

/// Which ratings count as positive or negative sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFilter {
    /// 4 stars and up
    Positive,
    /// 2 stars and below
    Negative,
}

impl RatingFilter {
    pub fn accepts(self, rating: i64) -> bool {
        match self {
            RatingFilter::Positive => rating >= 4,
            RatingFilter::Negative => rating <= 2,
        }
    }
}

/// Word counts restricted to reviews on one side of the rating scale.
pub struct SentimentWords {
    filter: RatingFilter,
}

impl SentimentWords {
    pub fn new(filter: RatingFilter) -> Self {
        SentimentWords { filter }
    }
}

impl Mapper for SentimentWords {
    fn columns(&self) -> &'static [Column] {
        &[Column::Text, Column::Rating]
    }

    fn map(&self, record: &Record) -> Result<Vec<Emission>, SkipReason> {
        if !self.filter.accepts(rating(record)?) {
            return Err(SkipReason::Filtered);
        }
        token_emissions(record.require(Column::Text)?)
    }
}
