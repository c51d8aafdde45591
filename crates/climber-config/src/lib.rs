//! Configuration system for Climber.
//!
//! Load search configuration from TOML or YAML files to control iteration
//! limits, acceptance, stopping rules and feasibility handling without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use climber_config::{AcceptanceRule, ClimberConfig, SearchConfig};
//! use climber_core::Objective;
//!
//! let config = ClimberConfig::from_toml_str(r#"
//!     random_seed = 42
//!     restarts = 4
//!
//!     [search]
//!     max_iterations = 500
//!     objective = "minimize"
//!     acceptance = "best_of_step"
//!
//!     [feasibility]
//!     type = "hard_block"
//! "#).unwrap();
//!
//! let search = config.search_config(SearchConfig::default());
//! assert_eq!(search.max_iterations, 500);
//! assert_eq!(search.objective, Objective::Minimize);
//! assert_eq!(search.acceptance, AcceptanceRule::BestOfStep);
//! assert_eq!(config.restarts, Some(4));
//! ```
//!
//! Use the defaults when the file is missing:
//!
//! ```
//! use climber_config::ClimberConfig;
//!
//! let config = ClimberConfig::load("climber.toml").unwrap_or_default();
//! assert!(config.search.is_none());
//! ```

use std::path::Path;

use climber_core::{ClimbError, FeasibilityPolicy, Objective};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ClimbError> for ConfigError {
    fn from(err: ClimbError) -> Self {
        match err {
            ClimbError::InvalidConfiguration(message) => ConfigError::Invalid(message),
        }
    }
}

/// Top-level run configuration, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClimberConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent restarts.
    #[serde(default)]
    pub restarts: Option<usize>,

    /// Run restarts on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,

    /// Overrides applied on top of a problem's default search settings.
    #[serde(default)]
    pub search: Option<SearchConfigOverride>,

    /// How hard-constraint violations are scored, for problems that have them.
    #[serde(default)]
    pub feasibility: Option<FeasibilityPolicy>,
}

impl ClimberConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a parser cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restarts == Some(0) {
            return Err(ConfigError::Invalid(
                "restarts must be at least 1".to_string(),
            ));
        }
        if let Some(search) = &self.search {
            search.validate()?;
        }
        if let Some(policy) = &self.feasibility {
            policy.validate()?;
        }
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the number of restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = Some(restarts);
        self
    }

    /// Enables or disables parallel restarts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the search overrides.
    pub fn with_search(mut self, search: SearchConfigOverride) -> Self {
        self.search = Some(search);
        self
    }

    /// Sets the feasibility policy.
    pub fn with_feasibility(mut self, policy: FeasibilityPolicy) -> Self {
        self.feasibility = Some(policy);
        self
    }

    /// Resolves the effective search settings from a problem's defaults.
    pub fn search_config(&self, base: SearchConfig) -> SearchConfig {
        match &self.search {
            Some(search) => search.apply(base),
            None => base,
        }
    }

    /// Returns the configured feasibility policy, or `default`.
    pub fn feasibility_or(&self, default: FeasibilityPolicy) -> FeasibilityPolicy {
        self.feasibility.unwrap_or(default)
    }
}

/// How the engine picks among a step's candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceRule {
    /// Accept the first strictly improving candidate and stop scanning.
    #[default]
    FirstImprovement,

    /// Score every candidate and accept the best strict improvement.
    BestOfStep,
}

/// Settings of a single hill-climbing run.
///
/// # Examples
///
/// ```
/// use climber_config::{AcceptanceRule, SearchConfig};
/// use climber_core::Objective;
///
/// let config = SearchConfig::new()
///     .with_max_iterations(200)
///     .with_objective(Objective::Minimize)
///     .with_target_score(0.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.acceptance, AcceptanceRule::FirstImprovement);
/// assert!(SearchConfig::new().with_max_iterations(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Upper bound on iterations. Must be positive.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,

    #[serde(default)]
    pub objective: Objective,

    #[serde(default)]
    pub acceptance: AcceptanceRule,

    /// Stop as soon as one iteration fails to improve.
    #[serde(default)]
    pub stop_on_no_improvement: bool,

    /// Stop once the incumbent reaches this score.
    #[serde(default)]
    pub stop_on_target_score: Option<f64>,

    /// Stop after this many consecutive iterations without improvement.
    #[serde(default)]
    pub unimproved_iteration_limit: Option<u64>,
}

fn default_max_iterations() -> u64 {
    1000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            objective: Objective::default(),
            acceptance: AcceptanceRule::default(),
            stop_on_no_improvement: false,
            stop_on_target_score: None,
            unimproved_iteration_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects a zero iteration limit, a non-finite target and a zero
    /// unimproved limit.
    pub fn validate(&self) -> Result<(), ClimbError> {
        if self.max_iterations == 0 {
            return Err(ClimbError::InvalidConfiguration(
                "max_iterations must be positive".to_string(),
            ));
        }
        if let Some(target) = self.stop_on_target_score {
            if !target.is_finite() {
                return Err(ClimbError::InvalidConfiguration(format!(
                    "stop_on_target_score must be finite, got {}",
                    target
                )));
            }
        }
        if self.unimproved_iteration_limit == Some(0) {
            return Err(ClimbError::InvalidConfiguration(
                "unimproved_iteration_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_acceptance(mut self, acceptance: AcceptanceRule) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_stop_on_no_improvement(mut self, stop: bool) -> Self {
        self.stop_on_no_improvement = stop;
        self
    }

    pub fn with_target_score(mut self, target: f64) -> Self {
        self.stop_on_target_score = Some(target);
        self
    }

    pub fn with_unimproved_iteration_limit(mut self, limit: u64) -> Self {
        self.unimproved_iteration_limit = Some(limit);
        self
    }
}

/// Partial [`SearchConfig`] read from a config file.
///
/// Fields left out of the file keep the problem's default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfigOverride {
    #[serde(default)]
    pub max_iterations: Option<u64>,

    #[serde(default)]
    pub objective: Option<Objective>,

    #[serde(default)]
    pub acceptance: Option<AcceptanceRule>,

    #[serde(default)]
    pub stop_on_no_improvement: Option<bool>,

    #[serde(default)]
    pub stop_on_target_score: Option<f64>,

    #[serde(default)]
    pub unimproved_iteration_limit: Option<u64>,
}

impl SearchConfigOverride {
    /// Layers the fields present here over `base`.
    pub fn apply(&self, base: SearchConfig) -> SearchConfig {
        SearchConfig {
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
            objective: self.objective.unwrap_or(base.objective),
            acceptance: self.acceptance.unwrap_or(base.acceptance),
            stop_on_no_improvement: self
                .stop_on_no_improvement
                .unwrap_or(base.stop_on_no_improvement),
            stop_on_target_score: self.stop_on_target_score.or(base.stop_on_target_score),
            unimproved_iteration_limit: self
                .unimproved_iteration_limit
                .or(base.unimproved_iteration_limit),
        }
    }

    fn validate(&self) -> Result<(), ClimbError> {
        self.apply(SearchConfig::default()).validate()
    }
}

#[cfg(test)]
mod tests;
