//! Mentor schedule: one two-slot block per mentor, avoiding double booking.

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{Assignment, NeighborGenerator, Objective, Score};
use climber_solver::{SearchResult, Single};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::adapter::ProblemAdapter;
use crate::data::{self, DataUnavailable, Dataset};
use crate::report::Report;

const ID_COLUMN: &str = "MentorID";

/// Slot availability of each mentor.
///
/// A block starting at slot `j` covers `j` and `j + 1`; it is feasible when
/// the mentor is available for both.
#[derive(Debug, Clone, PartialEq)]
pub struct MentorAvailability {
    mentors: Vec<String>,
    slots: Vec<String>,
    blocks: Vec<Vec<usize>>,
}

impl MentorAvailability {
    /// `available[m][s]` tells whether mentor `m` can take slot `s`.
    pub fn new(mentors: Vec<String>, slots: Vec<String>, available: &[Vec<bool>]) -> Self {
        let blocks = available
            .iter()
            .map(|row| {
                (0..slots.len().saturating_sub(1))
                    .filter(|&j| row.get(j) == Some(&true) && row.get(j + 1) == Some(&true))
                    .collect()
            })
            .collect();
        Self {
            mentors,
            slots,
            blocks,
        }
    }

    pub fn mentor_count(&self) -> usize {
        self.mentors.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Feasible block starts of `mentor`.
    pub fn blocks(&self, mentor: usize) -> &[usize] {
        &self.blocks[mentor]
    }

    /// Number of slots covered by more than one block.
    pub fn conflicts(&self, schedule: &Assignment) -> usize {
        let mut usage = vec![0usize; self.slots.len()];
        for (_, start) in schedule.iter_assigned() {
            usage[start] += 1;
            usage[start + 1] += 1;
        }
        usage.iter().filter(|&&count| count > 1).count()
    }

    pub fn score(schedule: &Assignment, availability: &MentorAvailability) -> Score {
        Score::of(availability.conflicts(schedule) as f64)
    }
}

/// Moves one random mentor to one of their feasible blocks.
///
/// Mentors without a feasible block are left unassigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveMentor;

impl NeighborGenerator<Assignment, MentorAvailability> for MoveMentor {
    fn propose(
        &self,
        current: &Assignment,
        availability: &MentorAvailability,
        rng: &mut dyn RngCore,
    ) -> Assignment {
        let mut next = current.clone();
        if next.is_empty() {
            return next;
        }
        let mentor = rng.random_range(0..next.len());
        if let Some(&start) = availability.blocks(mentor).choose(rng) {
            next.assign(mentor, start);
        }
        next
    }
}

impl ProblemAdapter for MentorAvailability {
    const NAME: &'static str = "mentors";

    type Solution = Assignment;
    type Evaluator = fn(&Assignment, &MentorAvailability) -> Score;
    type Neighborhood = Single<MoveMentor>;

    /// Every column after `MentorID` is a 0/1 slot column.
    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        let id = dataset.column_index(ID_COLUMN)?;
        let slot_columns: Vec<usize> = (0..dataset.headers().len()).filter(|&c| c != id).collect();
        if slot_columns.len() < 2 {
            return Err(DataUnavailable::MissingColumn {
                column: "slot column".to_string(),
            });
        }

        let mut available = Vec::with_capacity(dataset.len());
        for row in 0..dataset.len() {
            let flags = slot_columns
                .iter()
                .map(|&column| dataset.flag_at(row, column))
                .collect::<data::Result<Vec<_>>>()?;
            available.push(flags);
        }

        let mentors = dataset.str_column(ID_COLUMN)?.into_iter().map(str::to_string).collect();
        let slots = slot_columns
            .iter()
            .map(|&column| dataset.headers()[column].clone())
            .collect();
        Ok(Self::new(mentors, slots, &available))
    }

    fn default_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(1000)
            .with_objective(Objective::Minimize)
            .with_target_score(0.0)
    }

    /// A random feasible block per mentor.
    fn initial_solution(&self, rng: &mut dyn RngCore) -> Assignment {
        Assignment::new(
            self.blocks
                .iter()
                .map(|blocks| blocks.choose(rng).copied())
                .collect(),
        )
    }

    fn evaluator(&self, _config: &ClimberConfig) -> Result<Self::Evaluator> {
        Ok(MentorAvailability::score)
    }

    fn neighborhood(&self) -> Result<Single<MoveMentor>> {
        Ok(Single(MoveMentor))
    }

    fn report(&self, result: &SearchResult<Assignment>) -> Report {
        let schedule = &result.best_solution;
        let rows = self
            .mentors
            .iter()
            .enumerate()
            .map(|(mentor, name)| match schedule.get(mentor) {
                Some(start) => vec![
                    name.clone(),
                    self.slots[start].clone(),
                    self.slots[start + 1].clone(),
                ],
                None => vec![name.clone(), String::new(), String::new()],
            })
            .collect();

        Report::new("Mentor schedule")
            .with_summary("conflicts", self.conflicts(schedule))
            .with_summary("unassigned mentors", schedule.unassigned_count())
            .with_table([ID_COLUMN, "FirstSlot", "SecondSlot"], rows)
    }
}

#[cfg(test)]
mod tests {
    use climber_solver::HillClimber;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn availability() -> MentorAvailability {
        let dataset = Dataset::from_records(
            ["MentorID", "Slot1", "Slot2", "Slot3", "Slot4", "Slot5", "Slot6"],
            [
                ["M1", "0", "0", "0", "1", "1", "1"],
                ["M2", "1", "1", "0", "0", "0", "0"],
                ["M3", "0", "0", "1", "1", "0", "0"],
                ["M4", "1", "0", "1", "0", "1", "0"],
            ],
        );
        MentorAvailability::from_dataset(&dataset).unwrap()
    }

    #[test]
    fn test_feasible_blocks() {
        let availability = availability();
        assert_eq!(availability.blocks(0), &[3, 4]);
        assert_eq!(availability.blocks(1), &[0]);
        assert_eq!(availability.blocks(2), &[2]);
        assert!(availability.blocks(3).is_empty());
    }

    #[test]
    fn test_conflicts_count_shared_slots() {
        let availability = availability();
        let clash = Assignment::new(vec![Some(3), Some(0), Some(2), None]);
        assert_eq!(availability.conflicts(&clash), 1);

        let clean = Assignment::new(vec![Some(4), Some(0), Some(2), None]);
        assert_eq!(availability.conflicts(&clean), 0);
    }

    #[test]
    fn test_move_keeps_blocks_feasible() {
        let availability = availability();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut schedule = availability.initial_solution(&mut rng);
        assert_eq!(schedule.get(3), None);

        for _ in 0..100 {
            schedule = MoveMentor.propose(&schedule, &availability, &mut rng);
            for (mentor, start) in schedule.iter_assigned() {
                assert!(availability.blocks(mentor).contains(&start));
            }
            assert_eq!(schedule.get(3), None);
        }
    }

    #[test]
    fn test_search_removes_conflicts() {
        let availability = availability();
        let climber = HillClimber::new(MentorAvailability::default_config()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let initial = availability.initial_solution(&mut rng);

        let result = climber.run(
            initial,
            &availability,
            &availability.evaluator(&ClimberConfig::default()).unwrap(),
            &availability.neighborhood().unwrap(),
            &mut rng,
        );

        assert_eq!(result.best_score, Score::of(0.0));
        assert!(result.converged);

        let report = availability.report(&result);
        assert_eq!(report.summary_value("unassigned mentors"), Some("1"));
        assert_eq!(report.rows[3], vec!["M4", "", ""]);
    }
}
