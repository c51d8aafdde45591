//! Thesis defense schedule: students to (room, slot) cells.
//!
//! Two defenses sharing a cell is a hard violation. The soft objective
//! counts idle slots between defenses of the same room and heavily
//! penalizes rooms with more than four defenses. How violations fold into
//! the score is chosen by the configured [`FeasibilityPolicy`].

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{
    Assignment, ConstrainedEvaluation, FeasibilityPolicy, NeighborGenerator, Objective,
    PenalizedEvaluator,
};
use climber_solver::{SearchResult, Single};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::adapter::ProblemAdapter;
use crate::data::{self, Dataset};
use crate::report::Report;

pub const ROOMS: usize = 6;
pub const SLOTS: usize = 6;
/// Rooms hosting more defenses than this are penalized.
pub const MAX_DEFENSES_PER_ROOM: usize = 4;
pub const CROWDED_ROOM_PENALTY: f64 = 1000.0;

const ID_COLUMN: &str = "TesistaID";

pub type DefenseEvaluator = PenalizedEvaluator<fn(&Assignment, &DefenseSchedule) -> ConstrainedEvaluation>;

/// Index of a (room, slot) cell.
pub fn cell(room: usize, slot: usize) -> usize {
    room * SLOTS + slot
}

/// The (room, slot) of a cell index.
pub fn room_and_slot(cell: usize) -> (usize, usize) {
    (cell / SLOTS, cell % SLOTS)
}

fn slot_name(slot: usize) -> String {
    format!("F{}", slot + 1)
}

/// Slot availability of each student.
#[derive(Debug, Clone, PartialEq)]
pub struct DefenseSchedule {
    students: Vec<String>,
    available: Vec<Vec<usize>>,
}

impl DefenseSchedule {
    /// `available[s]` lists the slots student `s` can defend in.
    pub fn new(students: Vec<String>, available: Vec<Vec<usize>>) -> Self {
        Self {
            students,
            available,
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn available_slots(&self, student: usize) -> &[usize] {
        &self.available[student]
    }

    /// Defenses beyond the first in each cell.
    pub fn overlaps(&self, calendar: &Assignment) -> usize {
        let mut usage = [0usize; ROOMS * SLOTS];
        for (_, cell) in calendar.iter_assigned() {
            usage[cell] += 1;
        }
        usage.iter().map(|count| count.saturating_sub(1)).sum()
    }

    /// Idle slots between defenses of each room, plus the crowded-room
    /// penalty.
    pub fn gaps(&self, calendar: &Assignment) -> f64 {
        let mut by_room: Vec<Vec<usize>> = vec![Vec::new(); ROOMS];
        for (_, cell) in calendar.iter_assigned() {
            let (room, slot) = room_and_slot(cell);
            by_room[room].push(slot);
        }

        let mut gaps = 0.0;
        for slots in &mut by_room {
            slots.sort_unstable();
            gaps += slots
                .windows(2)
                .map(|pair| pair[1] - pair[0])
                .filter(|&diff| diff > 1)
                .map(|diff| (diff - 1) as f64)
                .sum::<f64>();
            if slots.len() > MAX_DEFENSES_PER_ROOM {
                gaps += CROWDED_ROOM_PENALTY;
            }
        }
        gaps
    }

    pub fn evaluate(calendar: &Assignment, schedule: &DefenseSchedule) -> ConstrainedEvaluation {
        ConstrainedEvaluation::new(
            schedule.overlaps(calendar) as f64,
            schedule.gaps(calendar),
        )
    }

    /// Fills rooms slot by slot in student order, skipping slots the
    /// student cannot take. Students with no available slot stay
    /// unassigned.
    pub fn sequential_calendar(&self) -> Assignment {
        fn advance(room: &mut usize, slot: &mut usize) {
            *slot = (*slot + 1) % SLOTS;
            if *slot == 0 {
                *room = (*room + 1) % ROOMS;
            }
        }

        let mut room = 0;
        let mut slot = 0;
        let cells = self
            .available
            .iter()
            .map(|available| {
                if available.is_empty() {
                    return None;
                }
                while !available.contains(&slot) {
                    advance(&mut room, &mut slot);
                }
                let assigned = cell(room, slot);
                advance(&mut room, &mut slot);
                Some(assigned)
            })
            .collect();
        Assignment::new(cells)
    }
}

/// Moves one random student to a random room at one of their available
/// slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveDefense;

impl NeighborGenerator<Assignment, DefenseSchedule> for MoveDefense {
    fn propose(
        &self,
        current: &Assignment,
        schedule: &DefenseSchedule,
        rng: &mut dyn RngCore,
    ) -> Assignment {
        let mut next = current.clone();
        if next.is_empty() {
            return next;
        }
        let student = rng.random_range(0..next.len());
        if let Some(&slot) = schedule.available_slots(student).choose(rng) {
            let room = rng.random_range(0..ROOMS);
            next.assign(student, cell(room, slot));
        }
        next
    }
}

impl ProblemAdapter for DefenseSchedule {
    const NAME: &'static str = "thesis";

    type Solution = Assignment;
    type Evaluator = DefenseEvaluator;
    type Neighborhood = Single<MoveDefense>;

    /// Reads `TesistaID` and the 0/1 availability columns `F1`..`F6`.
    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        let slot_columns = (0..SLOTS)
            .map(|slot| dataset.column_index(&slot_name(slot)))
            .collect::<data::Result<Vec<_>>>()?;

        let mut available = Vec::with_capacity(dataset.len());
        for row in 0..dataset.len() {
            let mut slots = Vec::new();
            for (slot, &column) in slot_columns.iter().enumerate() {
                if dataset.flag_at(row, column)? {
                    slots.push(slot);
                }
            }
            available.push(slots);
        }

        Ok(Self::new(
            dataset.str_column(ID_COLUMN)?.into_iter().map(str::to_string).collect(),
            available,
        ))
    }

    fn default_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(1000)
            .with_objective(Objective::Minimize)
    }

    fn initial_solution(&self, _rng: &mut dyn RngCore) -> Assignment {
        self.sequential_calendar()
    }

    fn evaluator(&self, config: &ClimberConfig) -> Result<DefenseEvaluator> {
        PenalizedEvaluator::new(
            DefenseSchedule::evaluate as fn(&Assignment, &DefenseSchedule) -> ConstrainedEvaluation,
            Objective::Minimize,
            config.feasibility_or(FeasibilityPolicy::default()),
        )
    }

    fn neighborhood(&self) -> Result<Single<MoveDefense>> {
        Ok(Single(MoveDefense))
    }

    fn report(&self, result: &SearchResult<Assignment>) -> Report {
        let calendar = &result.best_solution;
        let rows = self
            .students
            .iter()
            .enumerate()
            .map(|(student, name)| match calendar.get(student) {
                Some(assigned) => {
                    let (room, slot) = room_and_slot(assigned);
                    vec![name.clone(), (room + 1).to_string(), slot_name(slot)]
                }
                None => vec![name.clone(), String::new(), String::new()],
            })
            .collect();

        Report::new("Thesis defense calendar")
            .with_summary("overlaps", self.overlaps(calendar))
            .with_summary("gaps", self.gaps(calendar))
            .with_summary("unassigned students", calendar.unassigned_count())
            .with_summary("score", result.best_score)
            .with_table([ID_COLUMN, "Sala", "Franja"], rows)
    }
}
