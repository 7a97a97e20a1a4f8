//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::{Crossover, Mutation};
use super::selection::Selection;

/// Configuration for the real-coded Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_wban::search::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert!((config.crossover_rate - 0.9).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_wban::search::ga::{Crossover, GaConfig, Mutation, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::OnePoint)
///     .with_mutation(Mutation::Perturb(0.05))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Fraction of the population copied unchanged into the next
    /// generation (0.0–1.0).
    pub elite_ratio: f64,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Generations with no significant improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Minimum relative improvement `|old - new| / |old|` that resets the
    /// stagnation counter. 0.0 counts any improvement.
    pub convergence_threshold: f64,

    /// Whether to evaluate offspring in parallel (needs the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked at the start of
    /// each generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            stagnation_limit: 50,
            convergence_threshold: 0.0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
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

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the convergence threshold. Negative values clamp to 0.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
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

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Small population, few generations.
    ///
    /// - Population: 50, Generations: 100, Time limit: 10s
    /// - Stagnation limit: 20, Convergence threshold: 0.001
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            stagnation_limit: 20,
            convergence_threshold: 0.001,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Moderate population and generations.
    ///
    /// - Population: 100, Generations: 300, Time limit: 30s
    /// - Stagnation limit: 50, Convergence threshold: 0.001
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            stagnation_limit: 50,
            convergence_threshold: 0.001,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Large population, many generations.
    ///
    /// - Population: 150, Generations: 500, Time limit: 60s
    /// - Stagnation limit: 80, Convergence threshold: 0.0005
    pub fn quality() -> Self {
        Self {
            population_size: 150,
            max_generations: 500,
            stagnation_limit: 80,
            convergence_threshold: 0.0005,
            time_limit_ms: Some(60_000),
            ..Self::default()
        }
    }

    /// Picks a preset from the number of decision variables `D = N + K`.
    ///
    /// - `dimension < 10` → [`fast()`](Self::fast)
    /// - `10 ≤ dimension < 30` → [`balanced()`](Self::balanced)
    /// - `dimension ≥ 30` → [`quality()`](Self::quality)
    pub fn auto_select(dimension: usize) -> Self {
        if dimension < 10 {
            Self::fast()
        } else if dimension < 30 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        let elite_count = (self.population_size as f64 * self.elite_ratio) as usize;
        if elite_count >= self.population_size {
            return Err("elite_ratio too high: elites fill entire population".into());
        }
        if self.convergence_threshold < 0.0 {
            return Err("convergence_threshold must be non-negative".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        if let Mutation::Perturb(step) = self.mutation {
            if !(step > 0.0) {
                return Err("perturbation step must be positive".into());
            }
        }
        Ok(())
    }
}
