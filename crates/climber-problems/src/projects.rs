//! Project selection: maximize benefit within a budget.

use climber_config::{ClimberConfig, SearchConfig};
use climber_core::error::Result;
use climber_core::{BitVector, Objective, Score};
use climber_solver::{BitFlip, SearchResult};
use rand::RngCore;

use crate::adapter::ProblemAdapter;
use crate::data::{self, Dataset};
use crate::report::Report;

pub const DEFAULT_BUDGET: f64 = 10_000.0;

const ID_COLUMN: &str = "ProjectID";
const COST_COLUMN: &str = "Cost_Soles";
const BENEFIT_COLUMN: &str = "Benefit_Soles";

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPortfolio {
    ids: Vec<String>,
    costs: Vec<f64>,
    benefits: Vec<f64>,
    budget: f64,
}

impl ProjectPortfolio {
    pub fn new(ids: Vec<String>, costs: Vec<f64>, benefits: Vec<f64>) -> Self {
        Self {
            ids,
            costs,
            benefits,
            budget: DEFAULT_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn total_cost(&self, selection: &BitVector) -> f64 {
        selection.selected().map(|i| self.costs[i]).sum()
    }

    pub fn total_benefit(&self, selection: &BitVector) -> f64 {
        selection.selected().map(|i| self.benefits[i]).sum()
    }

    /// Total benefit; infeasible once the cost exceeds the budget.
    pub fn score(selection: &BitVector, portfolio: &ProjectPortfolio) -> Score {
        if portfolio.total_cost(selection) > portfolio.budget {
            Score::Infeasible
        } else {
            Score::of(portfolio.total_benefit(selection))
        }
    }
}

impl ProblemAdapter for ProjectPortfolio {
    const NAME: &'static str = "projects";

    type Solution = BitVector;
    type Evaluator = fn(&BitVector, &ProjectPortfolio) -> Score;
    type Neighborhood = BitFlip;

    fn from_dataset(dataset: &Dataset) -> data::Result<Self> {
        Ok(Self::new(
            dataset.str_column(ID_COLUMN)?.into_iter().map(str::to_string).collect(),
            dataset.f64_column(COST_COLUMN)?,
            dataset.f64_column(BENEFIT_COLUMN)?,
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
        Ok(ProjectPortfolio::score)
    }

    fn neighborhood(&self) -> Result<BitFlip> {
        Ok(BitFlip)
    }

    fn report(&self, result: &SearchResult<BitVector>) -> Report {
        let selection = &result.best_solution;
        let rows = selection
            .selected()
            .map(|i| {
                vec![
                    self.ids[i].clone(),
                    self.costs[i].to_string(),
                    self.benefits[i].to_string(),
                ]
            })
            .collect();

        Report::new("Project selection")
            .with_summary("feasible", result.best_score.is_feasible())
            .with_summary("selected", selection.count_ones())
            .with_summary("total cost", self.total_cost(selection))
            .with_summary("total benefit", self.total_benefit(selection))
            .with_summary("budget", self.budget)
            .with_table([ID_COLUMN, COST_COLUMN, BENEFIT_COLUMN], rows)
    }
}

#[cfg(test)]
mod tests {
    use climber_solver::HillClimber;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn portfolio() -> ProjectPortfolio {
        let dataset = Dataset::from_records(
            ["ProjectID", "Cost_Soles", "Benefit_Soles"],
            [
                ["P1", "6000", "9000"],
                ["P2", "5000", "7000"],
                ["P3", "4000", "6500"],
                ["P4", "12000", "30000"],
            ],
        );
        ProjectPortfolio::from_dataset(&dataset).unwrap()
    }

    #[test]
    fn test_over_budget_is_infeasible() {
        let portfolio = portfolio();
        let too_expensive = BitVector::from_bits(vec![false, false, false, true]);
        assert_eq!(ProjectPortfolio::score(&too_expensive, &portfolio), Score::Infeasible);

        let pair = BitVector::from_bits(vec![true, false, true, false]);
        assert_eq!(ProjectPortfolio::score(&pair, &portfolio), Score::of(15_500.0));
    }

    #[test]
    fn test_search_stays_within_budget() {
        let portfolio = portfolio();
        let climber = HillClimber::new(ProjectPortfolio::default_config()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let result = climber.run(
            BitVector::zeros(portfolio.len()),
            &portfolio,
            &portfolio.evaluator(&ClimberConfig::default()).unwrap(),
            &BitFlip,
            &mut rng,
        );

        assert!(result.best_score.is_feasible());
        assert!(portfolio.total_cost(&result.best_solution) <= DEFAULT_BUDGET);

        let report = portfolio.report(&result);
        assert_eq!(report.summary_value("feasible"), Some("true"));
        assert_eq!(report.rows.len(), result.best_solution.count_ones());
    }

    #[test]
    fn test_budget_override() {
        let portfolio = portfolio().with_budget(20_000.0);
        let first_and_last = BitVector::from_bits(vec![true, false, false, true]);
        assert_eq!(
            ProjectPortfolio::score(&first_and_last, &portfolio),
            Score::of(39_000.0)
        );
    }
}
