use crate::emission::Emission;
use crate::error::SkipReason;
use crate::record::{Column, Record};

use super::{rating, Mapper};

/// `(category, 1)` per review with a non-blank category.
pub struct CategoryCount;

impl Mapper for CategoryCount {
    fn columns(&self) -> &'static [Column] {
        &[Column::Category]
    }

    fn map(&self, record: &Record) -> Result<Vec<Emission>, SkipReason> {
        let category = record.require(Column::Category)?.trim();
        if category.is_empty() {
            return Err(SkipReason::EmptyKey);
        }
        Ok(vec![Emission::one(category)?])
    }
}

/// `(category, rating)` per review; the value is the raw star rating.
pub struct AvgRatingCategory;

impl Mapper for AvgRatingCategory {
    fn columns(&self) -> &'static [Column] {
        &[Column::Category, Column::Rating]
    }

    fn map(&self, record: &Record) -> Result<Vec<Emission>, SkipReason> {
        let category = record.require(Column::Category)?.trim();
        let rating = rating(record)?;
        Ok(vec![Emission::new(category, rating)?])
    }
}
