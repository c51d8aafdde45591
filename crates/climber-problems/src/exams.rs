//! Exam composition: the hardest exam that fits the time and difficulty
//! window.

use std::ops::RangeInclusive;

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{BitVector, Objective, Score};
use climber_solver::{BitFlip, SearchResult};
use rand::RngCore;

use crate::adapter::ProblemAdapter;
use crate::data::{self, Dataset};
use crate::report::Report;

pub const MAX_MINUTES: f64 = 90.0;
pub const DIFFICULTY_WINDOW: RangeInclusive<f64> = 180.0..=200.0;

const ID_COLUMN: &str = "QuestionID";
const DIFFICULTY_COLUMN: &str = "Difficulty";
const TIME_COLUMN: &str = "Time_min";

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    ids: Vec<String>,
    difficulty: Vec<f64>,
    minutes: Vec<f64>,
}

impl QuestionBank {
    pub fn new(ids: Vec<String>, difficulty: Vec<f64>, minutes: Vec<f64>) -> Self {
        Self {
            ids,
            difficulty,
            minutes,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn total_difficulty(&self, exam: &BitVector) -> f64 {
        exam.selected().map(|i| self.difficulty[i]).sum()
    }

    pub fn total_minutes(&self, exam: &BitVector) -> f64 {
        exam.selected().map(|i| self.minutes[i]).sum()
    }

    pub fn is_valid(&self, exam: &BitVector) -> bool {
        self.total_minutes(exam) <= MAX_MINUTES
            && DIFFICULTY_WINDOW.contains(&self.total_difficulty(exam))
    }

    pub fn score(exam: &BitVector, bank: &QuestionBank) -> Score {
        if bank.is_valid(exam) {
            Score::of(bank.total_difficulty(exam))
        } else {
            Score::Infeasible
        }
    }
}

impl ProblemAdapter for QuestionBank {
    const NAME: &'static str = "exams";

    type Solution = BitVector;
    type Evaluator = fn(&BitVector, &QuestionBank) -> Score;
    type Neighborhood = BitFlip;

    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        Ok(Self::new(
            dataset.str_column(ID_COLUMN)?.into_iter().map(str::to_string).collect(),
            dataset.f64_column(DIFFICULTY_COLUMN)?,
            dataset.f64_column(TIME_COLUMN)?,
        ))
    }

    fn default_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(1000)
            .with_objective(Objective::Maximize)
    }

    fn initial_solution(&self, rng: &mut dyn RngCore) -> BitVector {
        BitVector::random(self.len(), rng)
    }

    fn evaluator(&self, _config: &ClimberConfig) -> Result<Self::Evaluator> {
        Ok(QuestionBank::score)
    }

    fn neighborhood(&self) -> Result<BitFlip> {
        Ok(BitFlip)
    }

    fn report(&self, result: &SearchResult<BitVector>) -> Report {
        let exam = &result.best_solution;
        let rows = exam
            .selected()
            .map(|i| {
                vec![
                    self.ids[i].clone(),
                    self.difficulty[i].to_string(),
                    self.minutes[i].to_string(),
                ]
            })
            .collect();

        Report::new("Exam composition")
            .with_summary("valid", self.is_valid(exam))
            .with_summary("questions", exam.count_ones())
            .with_summary("difficulty", self.total_difficulty(exam))
            .with_summary("minutes", self.total_minutes(exam))
            .with_table([ID_COLUMN, DIFFICULTY_COLUMN, TIME_COLUMN], rows)
    }
}

#[cfg(test)]
mod tests {
    use climber_solver::HillClimber;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn bank() -> QuestionBank {
        QuestionBank::new(
            (1..=6).map(|i| format!("Q{}", i)).collect(),
            vec![60.0, 60.0, 60.0, 50.0, 40.0, 30.0],
            vec![20.0, 25.0, 30.0, 15.0, 10.0, 40.0],
        )
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let bank = bank();
        let exactly_180 = BitVector::from_bits(vec![true, true, true, false, false, false]);
        assert_eq!(QuestionBank::score(&exactly_180, &bank), Score::of(180.0));

        let too_easy = BitVector::from_bits(vec![true, true, false, false, false, false]);
        assert_eq!(QuestionBank::score(&too_easy, &bank), Score::Infeasible);
    }

    #[test]
    fn test_time_limit() {
        let bank = bank();
        let too_long = BitVector::from_bits(vec![true, true, true, false, false, true]);
        assert_eq!(bank.total_minutes(&too_long), 115.0);
        assert_eq!(QuestionBank::score(&too_long, &bank), Score::Infeasible);
    }

    #[test]
    fn test_search_never_loses_feasibility() {
        let bank = bank();
        let climber = HillClimber::new(QuestionBank::default_config()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let start = BitVector::from_bits(vec![true, true, true, false, false, false]);

        let result = climber.run(
            start,
            &bank,
            &bank.evaluator(&ClimberConfig::default()).unwrap(),
            &BitFlip,
            &mut rng,
        );

        assert!(result.best_score.value().unwrap() >= 180.0);
        assert!(bank.is_valid(&result.best_solution));
        assert!(result.statistics.is_monotonic(Objective::Maximize));
    }
}
