//! Lab route: the shortest closed tour through every lab.

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{Objective, Permutation, Score};
use climber_solver::{PairSwap, SearchResult};
use rand::RngCore;

use crate::adapter::ProblemAdapter;
use crate::data::{self, DataUnavailable, Dataset};
use crate::report::Report;

/// Labeled, square distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct LabRoute {
    labs: Vec<String>,
    distances: Vec<Vec<f64>>,
}

impl LabRoute {
    pub fn new(labs: Vec<String>, distances: Vec<Vec<f64>>) -> Self {
        Self { labs, distances }
    }

    pub fn len(&self) -> usize {
        self.labs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }

    /// Length of the tour, including the leg back to the start.
    pub fn tour_length(tour: &Permutation, route: &LabRoute) -> Score {
        Score::of(
            tour.closed_edges()
                .map(|(from, to)| route.distance(from, to))
                .sum(),
        )
    }
}

impl ProblemAdapter for LabRoute {
    const NAME: &'static str = "routes";

    type Solution = Permutation;
    type Evaluator = fn(&Permutation, &LabRoute) -> Score;
    type Neighborhood = PairSwap;

    /// The first column holds the row labels; every label must also name a
    /// column.
    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        let labs: Vec<String> = dataset.row_labels().into_iter().map(str::to_string).collect();

        let columns = labs
            .iter()
            .map(|lab| dataset.column_index(lab))
            .collect::<data::Result<Vec<_>>>()?;

        let mut distances = Vec::with_capacity(labs.len());
        for row in 0..dataset.len() {
            let values = columns
                .iter()
                .map(|&column| dataset.f64_at(row, column))
                .collect::<data::Result<Vec<_>>>()?;
            if let Some((column, &value)) = values.iter().enumerate().find(|(_, v)| **v < 0.0) {
                return Err(DataUnavailable::InvalidValue {
                    column: labs[column].clone(),
                    row,
                    value: value.to_string(),
                });
            }
            distances.push(values);
        }

        Ok(Self { labs, distances })
    }

    fn default_config() -> SearchConfig {
        SearchConfig::new()
            .with_max_iterations(1000)
            .with_objective(Objective::Minimize)
    }

    fn initial_solution(&self, rng: &mut dyn RngCore) -> Permutation {
        Permutation::shuffled(self.len(), rng)
    }

    fn evaluator(&self, _config: &ClimberConfig) -> Result<Self::Evaluator> {
        Ok(LabRoute::tour_length)
    }

    fn neighborhood(&self) -> Result<PairSwap> {
        Ok(PairSwap)
    }

    fn report(&self, result: &SearchResult<Permutation>) -> Report {
        let distance = result.best_score.value().unwrap_or(f64::INFINITY);
        let rows = result
            .best_solution
            .as_slice()
            .iter()
            .enumerate()
            .map(|(stop, &lab)| vec![(stop + 1).to_string(), self.labs[lab].clone()])
            .collect();

        Report::new("Lab route")
            .with_summary("labs", self.len())
            .with_summary("distance", format!("{:.2}", distance))
            .with_table(["Stop", "Lab"], rows)
    }
}
