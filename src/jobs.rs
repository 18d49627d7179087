//! The six named jobs behind the review dashboard, and a local runner that
//! wires each mapper straight into its reducer.
//!
//! Artifact names and column headers are a contract with the dashboard that
//! reads them; changing either breaks it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::TopNConfig;
use crate::error::Result;
use crate::mappers::{map_records, Mapper, MapperKind};
use crate::reducers::{AverageReduction, Reduction, Table, TopNReduction};
use crate::stats::RunStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReducerKind {
    TopN { header: &'static [&'static str] },
    Average,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub name: &'static str,
    pub mapper: MapperKind,
    pub reducer: ReducerKind,
    pub artifact: &'static str,
}

pub static JOBS: [Job; 6] = [
    Job {
        name: "wordcount",
        mapper: MapperKind::Wordcount,
        reducer: ReducerKind::TopN {
            header: &["word", "count"],
        },
        artifact: "wordcount.csv",
    },
    Job {
        name: "positive_words",
        mapper: MapperKind::PositiveWords,
        reducer: ReducerKind::TopN {
            header: &["word", "count"],
        },
        artifact: "positive_words.csv",
    },
    Job {
        name: "negative_words",
        mapper: MapperKind::NegativeWords,
        reducer: ReducerKind::TopN {
            header: &["word", "count"],
        },
        artifact: "negative_words.csv",
    },
    Job {
        name: "category_count",
        mapper: MapperKind::CategoryCount,
        reducer: ReducerKind::TopN {
            header: &["category", "review_count"],
        },
        artifact: "category_count.csv",
    },
    Job {
        name: "avg_rating_category",
        mapper: MapperKind::AvgRatingCategory,
        reducer: ReducerKind::Average,
        artifact: "avg_rating_category.csv",
    },
    Job {
        name: "problem_products",
        mapper: MapperKind::ProblemProducts,
        reducer: ReducerKind::TopN {
            header: &["product_name", "negative_review_count"],
        },
        artifact: "problem_products.csv",
    },
];

pub fn find(name: &str) -> Option<&'static Job> {
    JOBS.iter().find(|job| job.name == name)
}

/// What one job produced.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub name: &'static str,
    pub artifact: PathBuf,
    pub rows: usize,
    pub map_stats: RunStats,
}

impl Job {
    /// Maps `input` and reduces the emissions in-process. `limit` only
    /// applies to Top-N jobs.
    pub fn run<R: Read>(&self, input: R, limit: usize) -> Result<(Table, RunStats)> {
        let mapper = self.mapper.mapper();
        match self.reducer {
            ReducerKind::TopN { header } => {
                let config = TopNConfig::new(limit, None).with_header(header);
                map_into(mapper.as_ref(), input, TopNReduction::new(config))
            }
            ReducerKind::Average => map_into(mapper.as_ref(), input, AverageReduction::new()),
        }
    }
}

fn map_into<R, T>(mapper: &dyn Mapper, input: R, mut reduction: T) -> Result<(Table, RunStats)>
where
    R: Read,
    T: Reduction,
{
    let stats = map_records(mapper, input, |emission| {
        reduction.accumulate(emission);
        Ok(())
    })?;
    tracing::debug!(distinct_keys = reduction.distinct_keys(), "map finished: {}", stats);
    Ok((reduction.finish(), stats))
}

/// Runs every job over `input`, writing one artifact per job into `output_dir`.
///
/// The input is reopened for each job. Every table is computed before any
/// artifact is written, so a missing column or a read failure in any job
/// leaves `output_dir` untouched.
pub fn run_all(input: &Path, output_dir: &Path, limit: usize) -> Result<Vec<JobReport>> {
    let mut finished = Vec::with_capacity(JOBS.len());
    for job in &JOBS {
        let reader = BufReader::new(File::open(input)?);
        let (table, map_stats) = job.run(reader, limit)?;
        finished.push((job, table, map_stats));
    }

    fs::create_dir_all(output_dir)?;

    let mut reports = Vec::with_capacity(finished.len());
    for (job, table, map_stats) in finished {
        let artifact = output_dir.join(job.artifact);
        let mut out = BufWriter::new(File::create(&artifact)?);
        table.write_csv(&mut out)?;
        out.flush()?;

        tracing::info!(job = job.name, rows = table.len(), "wrote {}", artifact.display());
        reports.push(JobReport {
            name: job.name,
            artifact,
            rows: table.len(),
            map_stats,
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEWS: &str = "\
text,rating,category,product_name
Great product great value,5,Electronics,Charger
Rusak parah tidak berfungsi,1,Electronics,Charger
Lumayan,3,Books,Novel
Mantap sekali,4,Books,Novel
Jelek,2,Toys,Robot
";

    fn run(name: &str) -> String {
        let (table, _) = find(name).unwrap().run(REVIEWS.as_bytes(), 50).unwrap();
        table.to_csv_string().unwrap()
    }

    #[test]
    fn catalogue_names_are_unique() {
        for job in &JOBS {
            assert_eq!(find(job.name), Some(job));
        }
        assert!(find("nope").is_none());
    }

    #[test]
    fn wordcount_job() {
        assert_eq!(
            run("wordcount"),
            "word,count\ngreat,2\nberfungsi,1\njelek,1\nlumayan,1\nmantap,1\nparah,1\n\
             product,1\nrusak,1\nsekali,1\ntidak,1\nvalue,1\n"
        );
    }

    #[test]
    fn sentiment_jobs() {
        assert_eq!(
            run("positive_words"),
            "word,count\ngreat,2\nmantap,1\nproduct,1\nsekali,1\nvalue,1\n"
        );
        assert_eq!(
            run("negative_words"),
            "word,count\nberfungsi,1\njelek,1\nparah,1\nrusak,1\ntidak,1\n"
        );
    }

    #[test]
    fn category_jobs() {
        assert_eq!(
            run("category_count"),
            "category,review_count\nBooks,2\nElectronics,2\nToys,1\n"
        );
        assert_eq!(
            run("avg_rating_category"),
            "category,avg_rating,review_count\nBooks,3.50,2\nElectronics,3.00,2\nToys,2.00,1\n"
        );
    }

    #[test]
    fn problem_products_job() {
        assert_eq!(
            run("problem_products"),
            "product_name,negative_review_count\nCharger,1\nRobot,1\n"
        );
    }

    #[test]
    fn run_all_writes_every_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("reviews.csv");
        fs::write(&input, REVIEWS).unwrap();

        let reports = run_all(&input, &dir.path().join("out"), 50).unwrap();

        assert_eq!(reports.len(), JOBS.len());
        for report in &reports {
            let written = fs::read_to_string(&report.artifact).unwrap();
            assert_eq!(written, run(report.name), "{}", report.name);
        }
    }

    #[test]
    fn missing_column_in_a_later_job_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("reviews.csv");
        let output_dir = dir.path().join("out");
        fs::write(&input, "text\nonly text here\n").unwrap();

        let err = run_all(&input, &output_dir, 50).unwrap_err();

        assert!(matches!(
            err,
            crate::error::PipelineError::MissingColumn { ref column } if column == "rating"
        ));
        assert!(!output_dir.join("wordcount.csv").exists());
        assert!(!output_dir.exists());
    }

    #[test]
    fn failed_run_leaves_previous_artifacts_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("reviews.csv");
        let output_dir = dir.path().join("out");
        fs::write(&input, REVIEWS).unwrap();
        run_all(&input, &output_dir, 50).unwrap();
        let before = fs::read_to_string(output_dir.join("wordcount.csv")).unwrap();

        fs::write(&input, "text\nsomething else entirely\n").unwrap();
        assert!(run_all(&input, &output_dir, 50).is_err());

        assert_eq!(fs::read_to_string(output_dir.join("wordcount.csv")).unwrap(), before);
    }

    #[test]
    fn limit_truncates_counting_jobs_only() {
        let (words, _) = find("wordcount").unwrap().run(REVIEWS.as_bytes(), 2).unwrap();
        let (averages, _) = find("avg_rating_category")
            .unwrap()
            .run(REVIEWS.as_bytes(), 2)
            .unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(averages.len(), 3);
    }
}
