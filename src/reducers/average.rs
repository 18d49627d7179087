use std::cmp::Ordering;
use std::collections::HashMap;
use std::mem;

use crate::emission::Emission;

use super::{Reduction, Table};

pub const AVERAGE_HEADER: [&str; 3] = ["category", "avg_rating", "review_count"];

/// One category's accumulated ratings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageRow {
    pub category: String,
    pub sum: i64,
    pub count: u64,
}

impl AverageRow {
    pub fn average(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    /// The mean with exactly two fractional digits.
    pub fn avg_rating(&self) -> String {
        format!("{:.2}", self.average())
    }

    /// Compares exact means without going through floating point.
    fn cmp_average(&self, other: &Self) -> Ordering {
        let lhs = self.sum as i128 * other.count as i128;
        let rhs = other.sum as i128 * self.count as i128;
        lhs.cmp(&rhs)
    }
}

/// Running `(sum, count)` per category. Every entry has `count >= 1`.
#[derive(Debug, Default, Clone)]
pub struct AverageAggregate {
    totals: HashMap<String, (i64, u64)>,
}

impl AverageAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: String, rating: i64) {
        let (sum, count) = self.totals.entry(category).or_insert((0, 0));
        *sum = sum.saturating_add(rating);
        *count += 1;
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Highest mean first, ties by category ascending. Nothing is truncated.
    pub fn ranked(self) -> Vec<AverageRow> {
        let mut rows: Vec<AverageRow> = self
            .totals
            .into_iter()
            .map(|(category, (sum, count))| AverageRow {
                category,
                sum,
                count,
            })
            .collect();
        rows.sort_unstable_by(|a, b| {
            b.cmp_average(a)
                .then_with(|| a.category.cmp(&b.category))
        });
        rows
    }
}

/// Grouped-average job with the fixed `category,avg_rating,review_count` header.
#[derive(Debug, Default, Clone)]
pub struct AverageReduction {
    aggregate: AverageAggregate,
}

impl AverageReduction {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reduction for AverageReduction {
    fn accumulate(&mut self, emission: Emission) {
        let (category, rating) = emission.into_parts();
        self.aggregate.add(category, rating);
    }

    fn distinct_keys(&self) -> usize {
        self.aggregate.len()
    }

    fn finish(&mut self) -> Table {
        let aggregate = mem::take(&mut self.aggregate);
        let header = AVERAGE_HEADER.iter().map(|h| h.to_string()).collect();
        let mut table = Table::new(Some(header));
        for row in aggregate.ranked() {
            let avg_rating = row.avg_rating();
            table.push(vec![row.category, avg_rating, row.count.to_string()]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::reduce;
    use proptest::prelude::*;

    #[test]
    fn averages_and_breaks_ties_by_category() {
        let input = "Electronics\t5\nElectronics\t3\nBooks\t4\n";
        let (table, _) = reduce(input.as_bytes(), AverageReduction::new()).unwrap();

        assert_eq!(
            table.to_csv_string().unwrap(),
            "category,avg_rating,review_count\nBooks,4.00,1\nElectronics,4.00,2\n"
        );
    }

    #[test]
    fn formats_two_decimals() {
        let input = "Toys\t5\nToys\t4\nToys\t4\nFood\t1\nFood\t2\n";
        let (table, _) = reduce(input.as_bytes(), AverageReduction::new()).unwrap();

        assert_eq!(
            table.to_csv_string().unwrap(),
            "category,avg_rating,review_count\nToys,4.33,3\nFood,1.50,2\n"
        );
    }

    #[test]
    fn empty_stream_emits_header_only() {
        let (table, _) = reduce("".as_bytes(), AverageReduction::new()).unwrap();
        assert_eq!(
            table.to_csv_string().unwrap(),
            "category,avg_rating,review_count\n"
        );
    }

    #[test]
    fn every_category_is_kept() {
        let input: String = (0..120).map(|i| format!("cat{}\t{}\n", i, i % 5 + 1)).collect();
        let (table, _) = reduce(input.as_bytes(), AverageReduction::new()).unwrap();
        assert_eq!(table.len(), 120);
    }

    #[test]
    fn bad_ratings_are_skipped() {
        let input = "Books\t4\nBooks\tfour\nBooks\t2\n";
        let (table, stats) = reduce(input.as_bytes(), AverageReduction::new()).unwrap();

        assert_eq!(table.rows()[0], vec!["Books", "3.00", "2"]);
        assert_eq!(stats.skipped("invalid_value"), 1);
    }

    #[test]
    fn exact_means_order_values_that_print_alike() {
        let mut aggregate = AverageAggregate::new();
        for rating in [2, 0, 0] {
            aggregate.add("thirds".into(), rating);
        }
        for i in 0..100 {
            aggregate.add("hundredths".into(), i64::from(i < 67));
        }

        let rows = aggregate.ranked();
        assert_eq!(rows[0].category, "hundredths");
        assert_eq!(rows[1].category, "thirds");
        assert_eq!(rows[0].avg_rating(), rows[1].avg_rating());
    }

    proptest! {
        #[test]
        fn averages_match_sum_over_count(
            lines in prop::collection::vec(("[A-D]", 1i64..=5), 1..80),
        ) {
            let mut aggregate = AverageAggregate::new();
            for (category, rating) in &lines {
                aggregate.add(category.clone(), *rating);
            }

            let rows = aggregate.ranked();
            for row in &rows {
                let ratings: Vec<i64> = lines
                    .iter()
                    .filter(|(c, _)| *c == row.category)
                    .map(|(_, r)| *r)
                    .collect();
                prop_assert_eq!(row.count, ratings.len() as u64);
                let expected = ratings.iter().sum::<i64>() as f64 / ratings.len() as f64;
                prop_assert_eq!(row.avg_rating(), format!("{:.2}", expected));
            }
            for pair in rows.windows(2) {
                prop_assert!(pair[0].average() >= pair[1].average());
            }
        }
    }
}
