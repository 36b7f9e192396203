//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the generation loop.

use super::selection::SelectionMethod;
use super::types::Objective;
use crate::error::{Result, SitingError};

/// Configuration for [`EvolutionRunner`](super::EvolutionRunner).
///
/// # Defaults
///
/// ```
/// use u_siting::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_siting::ga::{EvolutionConfig, Objective, SelectionMethod};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_objective(Objective::Minimize)
///     .with_selection(SelectionMethod::Roulette { with_replacement: false })
///     .with_mutation_chance(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of chromosomes per generation.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Whether lower or higher fitness is better.
    pub objective: Objective,

    /// How survivors are picked each generation.
    pub selection: SelectionMethod,

    /// Fraction of the population requested from selection (0.0–1.0].
    ///
    /// Survivors carry over unchanged; offspring fill the rest.
    pub survival_ratio: f64,

    /// Probability of reproducing a parent pair (0.0–1.0).
    ///
    /// When reproduction is skipped, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Chance handed to [`GeneticProblem::mutate`](super::GeneticProblem::mutate)
    /// for every offspring (0.0–1.0).
    pub mutation_chance: f64,

    /// Generations without improvement before stopping. 0 disables it.
    pub stagnation_limit: usize,

    /// Whether to evaluate populations in parallel (feature `parallel`).
    ///
    /// Ignored when the crate is built without the feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            objective: Objective::Minimize,
            selection: SelectionMethod::default(),
            survival_ratio: 0.5,
            crossover_rate: 0.9,
            mutation_chance: 0.03,
            stagnation_limit: 25,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: SelectionMethod) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the survival ratio.
    pub fn with_survival_ratio(mut self, ratio: f64) -> Self {
        self.survival_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation chance.
    pub fn with_mutation_chance(mut self, chance: f64) -> Self {
        self.mutation_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of survivors requested from selection each generation.
    pub fn survivor_count(&self) -> usize {
        let n = (self.population_size as f64 * self.survival_ratio).round() as usize;
        n.clamp(1, self.population_size.max(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`SitingError::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SitingError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SitingError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(self.survival_ratio > 0.0 && self.survival_ratio <= 1.0) {
            return Err(SitingError::InvalidConfig(
                "survival_ratio must be in (0, 1]".into(),
            ));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_chance", self.mutation_chance),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SitingError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.objective, Objective::Minimize);
        assert_eq!(config.selection, SelectionMethod::Tournament);
        assert!((config.survival_ratio - 0.5).abs() < 1e-10);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_chance - 0.03).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 25);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_objective(Objective::Maximize)
            .with_selection(SelectionMethod::Roulette {
                with_replacement: true,
            })
            .with_survival_ratio(0.3)
            .with_crossover_rate(0.8)
            .with_mutation_chance(0.05)
            .with_stagnation_limit(0)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.objective, Objective::Maximize);
        assert_eq!(
            config.selection,
            SelectionMethod::Roulette {
                with_replacement: true
            }
        );
        assert!((config.survival_ratio - 0.3).abs() < 1e-10);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_chance - 0.05).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 0);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = EvolutionConfig::default().with_population_size(1);
        assert!(matches!(
            config.validate(),
            Err(SitingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = EvolutionConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_survival() {
        let config = EvolutionConfig::default().with_survival_ratio(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_raw_field_out_of_range() {
        let mut config = EvolutionConfig::default();
        config.mutation_chance = 1.5;
        assert!(config.validate().is_err());
        config.mutation_chance = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_rates() {
        let config = EvolutionConfig::default()
            .with_survival_ratio(3.0)
            .with_crossover_rate(-0.5)
            .with_mutation_chance(2.0);

        assert!((config.survival_ratio - 1.0).abs() < 1e-10);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_chance - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_survivor_count() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_survival_ratio(0.34);
        assert_eq!(config.survivor_count(), 3);

        let config = config.with_survival_ratio(0.01);
        assert_eq!(config.survivor_count(), 1);
    }
}
