//! Grade curve: one offset added to every grade.
//!
//! The offset is tuned to maximize the share of passing students, with a
//! small penalty once the class mean climbs above 14.

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{Objective, Score};
use climber_solver::{OffsetSteps, SearchResult};
use rand::RngCore;

use crate::adapter::ProblemAdapter;
use crate::data::{self, DataUnavailable, Dataset};
use crate::report::Report;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 20.0;
/// A student passes when their mean grade reaches this mark.
pub const PASS_MARK: f64 = 11.0;
/// Class means above this value are penalized.
pub const MEAN_CEILING: f64 = 14.0;
const MEAN_PENALTY: f64 = 0.1;

const ID_COLUMN: &str = "StudentID";

/// Pass rate and mean of a curved grade book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSummary {
    pub mean: f64,
    pub pass_rate: f64,
}

/// Grades per student, one column per subject.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeBook {
    students: Vec<String>,
    subjects: Vec<String>,
    grades: Vec<Vec<f64>>,
}

impl GradeBook {
    pub fn new(students: Vec<String>, subjects: Vec<String>, grades: Vec<Vec<f64>>) -> Self {
        Self {
            students,
            subjects,
            grades,
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Every grade shifted by `offset` and clipped to the grading scale.
    pub fn curved(&self, offset: f64) -> Vec<Vec<f64>> {
        self.grades
            .iter()
            .map(|row| {
                row.iter()
                    .map(|grade| (grade + offset).clamp(MIN_GRADE, MAX_GRADE))
                    .collect()
            })
            .collect()
    }

    pub fn summarize(&self, offset: f64) -> CurveSummary {
        let curved = self.curved(offset);
        let cells = curved.iter().map(Vec::len).sum::<usize>();
        let total: f64 = curved.iter().flatten().sum();
        let passing = curved
            .iter()
            .filter(|row| !row.is_empty() && mean(row) >= PASS_MARK)
            .count();

        CurveSummary {
            mean: if cells == 0 { 0.0 } else { total / cells as f64 },
            pass_rate: if curved.is_empty() {
                0.0
            } else {
                passing as f64 / curved.len() as f64
            },
        }
    }

    /// Pass rate, less `0.1` per point of class mean above the ceiling.
    pub fn fitness(offset: &f64, book: &GradeBook) -> Score {
        let summary = book.summarize(*offset);
        let penalty = if summary.mean > MEAN_CEILING {
            (summary.mean - MEAN_CEILING) * MEAN_PENALTY
        } else {
            0.0
        };
        Score::of(summary.pass_rate - penalty)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl ProblemAdapter for GradeBook {
    const NAME: &'static str = "grades";

    type Solution = f64;
    type Evaluator = fn(&f64, &GradeBook) -> Score;
    type Neighborhood = OffsetSteps;

    /// Every numeric column other than `StudentID` is a subject.
    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        let id = dataset.column_index(ID_COLUMN)?;
        let subjects: Vec<usize> = dataset
            .numeric_columns()
            .into_iter()
            .filter(|&column| column != id)
            .collect();
        if subjects.is_empty() {
            return Err(DataUnavailable::MissingColumn {
                column: "numeric grade column".to_string(),
            });
        }

        let mut grades = Vec::with_capacity(dataset.len());
        for row in 0..dataset.len() {
            let values = subjects
                .iter()
                .map(|&column| dataset.f64_at(row, column))
                .collect::<data::Result<Vec<_>>>()?;
            grades.push(values);
        }

        Ok(Self {
            students: dataset.str_column(ID_COLUMN)?.into_iter().map(str::to_string).collect(),
            subjects: subjects
                .iter()
                .map(|&column| dataset.headers()[column].clone())
                .collect(),
            grades,
        })
    }

    fn default_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(101)
            .with_objective(Objective::Maximize)
            .with_stop_on_no_improvement(true)
    }

    fn initial_solution(&self, _rng: &mut dyn RngCore) -> f64 {
        0.0
    }

    fn evaluator(&self, _config: &ClimberConfig) -> Result<Self::Evaluator> {
        Ok(GradeBook::fitness)
    }

    fn neighborhood(&self) -> Result<OffsetSteps> {
        OffsetSteps::new(0.5, -5.0, 5.0)
    }

    fn report(&self, result: &SearchResult<f64>) -> Report {
        let offset = result.best_solution;
        let summary = self.summarize(offset);

        let headers = std::iter::once(ID_COLUMN.to_string()).chain(self.subjects.iter().cloned());
        let rows = self
            .students
            .iter()
            .zip(self.curved(offset))
            .map(|(student, grades)| {
                std::iter::once(student.clone())
                    .chain(grades.iter().map(|g| g.to_string()))
                    .collect()
            })
            .collect();

        Report::new("Grade curve")
            .with_summary("offset", offset)
            .with_summary("mean", format!("{:.2}", summary.mean))
            .with_summary("pass rate", format!("{:.2}%", summary.pass_rate * 100.0))
            .with_table(headers, rows)
    }
}
