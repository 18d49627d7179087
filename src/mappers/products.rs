use crate::emission::Emission;
use crate::error::SkipReason;
use crate::record::{Column, Record};

use super::{rating, Mapper, RatingFilter};

/// `(product_name, 1)` for each negative review of a named product.
pub struct ProblemProducts;

impl Mapper for ProblemProducts {
    fn columns(&self) -> &'static [Column] {
        &[Column::ProductName, Column::Rating]
    }

    fn map(&self, record: &Record) -> Result<Vec<Emission>, SkipReason> {
        if !RatingFilter::Negative.accepts(rating(record)?) {
            return Err(SkipReason::Filtered);
        }
        let product = record.require(Column::ProductName)?.trim();
        if product.is_empty() {
            return Err(SkipReason::EmptyKey);
        }
        Ok(vec![Emission::one(product)?])
    }
}
