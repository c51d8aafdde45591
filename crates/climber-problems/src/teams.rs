//! Team formation: balanced GPA and skills across a fixed number of teams.

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{Assignment, NeighborGenerator, Objective, Permutation, Score};
use climber_solver::{SearchResult, Single};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::adapter::ProblemAdapter;
use crate::data::{self, Dataset};
use crate::report::Report;

pub const DEFAULT_TEAMS: usize = 5;

const ID_COLUMN: &str = "StudentID";
const GPA_COLUMN: &str = "GPA";
const SKILL_COLUMN: &str = "Skill";

/// Students to split into teams.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    students: Vec<String>,
    gpa: Vec<f64>,
    /// Index into `skills` per student.
    skill: Vec<usize>,
    /// Distinct skills in order of first appearance.
    skills: Vec<String>,
    teams: usize,
}

impl Cohort {
    pub fn new(students: Vec<String>, gpa: Vec<f64>, skills: Vec<String>) -> Self {
        let mut names: Vec<String> = Vec::new();
        let skill = skills
            .into_iter()
            .map(|name| match names.iter().position(|known| *known == name) {
                Some(index) => index,
                None => {
                    names.push(name);
                    names.len() - 1
                }
            })
            .collect();
        Self {
            students,
            gpa,
            skill,
            skills: names,
            teams: DEFAULT_TEAMS,
        }
    }

    /// Sets the number of teams, at least one.
    pub fn with_teams(mut self, teams: usize) -> Self {
        self.teams = teams.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn team_count(&self) -> usize {
        self.teams
    }

    /// Members of each team.
    pub fn members(&self, teams: &Assignment) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.teams];
        for (student, team) in teams.iter_assigned() {
            members[team].push(student);
        }
        members
    }

    /// Deals students to teams round-robin in the given order.
    pub fn deal(&self, order: &Permutation) -> Assignment {
        let mut teams = vec![None; self.len()];
        for (position, &student) in order.as_slice().iter().enumerate() {
            teams[student] = Some(position % self.teams);
        }
        Assignment::new(teams)
    }

    /// Sum of per-team GPA population variances.
    pub fn gpa_spread(&self, teams: &Assignment) -> f64 {
        self.members(teams)
            .iter()
            .filter(|team| !team.is_empty())
            .map(|team| {
                let n = team.len() as f64;
                let mean = team.iter().map(|&s| self.gpa[s]).sum::<f64>() / n;
                team.iter().map(|&s| (self.gpa[s] - mean).powi(2)).sum::<f64>() / n
            })
            .sum()
    }

    /// Distance of each team's skill counts from an even share.
    pub fn skill_imbalance(&self, teams: &Assignment) -> f64 {
        let mut global = vec![0usize; self.skills.len()];
        for &skill in &self.skill {
            global[skill] += 1;
        }

        self.members(teams)
            .iter()
            .map(|team| {
                let mut counts = vec![0usize; self.skills.len()];
                for &student in team {
                    counts[self.skill[student]] += 1;
                }
                counts
                    .iter()
                    .zip(&global)
                    .map(|(&count, &total)| (count as f64 - total as f64 / self.teams as f64).abs())
                    .sum::<f64>()
            })
            .sum()
    }

    pub fn score(teams: &Assignment, cohort: &Cohort) -> Score {
        Score::of(cohort.gpa_spread(teams) + cohort.skill_imbalance(teams))
    }
}

/// Exchanges one random member of a team with one of another team.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapTeammates;

impl NeighborGenerator<Assignment, Cohort> for SwapTeammates {
    fn propose(&self, current: &Assignment, cohort: &Cohort, rng: &mut dyn RngCore) -> Assignment {
        let mut next = current.clone();
        let teams = cohort.team_count();
        if teams < 2 {
            return next;
        }
        let first = rng.random_range(0..teams);
        let mut second = rng.random_range(0..teams - 1);
        if second >= first {
            second += 1;
        }

        let members = cohort.members(current);
        if let (Some(&a), Some(&b)) = (members[first].choose(rng), members[second].choose(rng)) {
            next.swap(a, b);
        }
        next
    }
}

impl ProblemAdapter for Cohort {
    const NAME: &'static str = "teams";

    type Solution = Assignment;
    type Evaluator = fn(&Assignment, &Cohort) -> Score;
    type Neighborhood = Single<SwapTeammates>;

    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        Ok(Self::new(
            dataset.str_column(ID_COLUMN)?.into_iter().map(str::to_string).collect(),
            dataset.f64_column(GPA_COLUMN)?,
            dataset.str_column(SKILL_COLUMN)?.into_iter().map(str::to_string).collect(),
        ))
    }

    fn default_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(1000)
            .with_objective(Objective::Minimize)
    }

    fn initial_solution(&self, rng: &mut dyn RngCore) -> Assignment {
        self.deal(&Permutation::shuffled(self.len(), rng))
    }

    fn evaluator(&self, _config: &ClimberConfig) -> Result<Self::Evaluator> {
        Ok(Cohort::score)
    }

    fn neighborhood(&self) -> Result<Single<SwapTeammates>> {
        Ok(Single(SwapTeammates))
    }

    fn report(&self, result: &SearchResult<Assignment>) -> Report {
        let teams = &result.best_solution;
        let mut rows = Vec::with_capacity(self.len());
        for (team, members) in self.members(teams).iter().enumerate() {
            for &student in members {
                rows.push(vec![
                    (team + 1).to_string(),
                    self.students[student].clone(),
                    self.gpa[student].to_string(),
                    self.skills[self.skill[student]].clone(),
                ]);
            }
        }

        Report::new("Team formation")
            .with_summary("teams", self.teams)
            .with_summary("gpa variance", format!("{:.4}", self.gpa_spread(teams)))
            .with_summary("skill imbalance", format!("{:.2}", self.skill_imbalance(teams)))
            .with_table(["Team", ID_COLUMN, GPA_COLUMN, SKILL_COLUMN], rows)
    }
}
