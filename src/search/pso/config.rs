//! PSO configuration.

/// Configuration for Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use u_wban::search::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(40)
///     .with_inertia(0.7)
///     .with_seed(3);
/// assert_eq!(config.swarm_size, 40);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Maximum number of swarm updates.
    pub max_iterations: usize,

    /// Cognitive coefficient: pull toward the particle's own best.
    pub c1: f64,

    /// Social coefficient: pull toward the swarm's best.
    pub c2: f64,

    /// Inertia weight applied to the previous velocity.
    pub inertia: f64,

    /// Per-component velocity bound, as a fraction of the unit range.
    pub velocity_limit: f64,

    /// Iterations with no significant improvement before stopping
    /// (0 to disable).
    pub stagnation_limit: usize,

    /// Minimum relative improvement that resets the stagnation counter.
    pub convergence_threshold: f64,

    /// Whether to evaluate particles in parallel (needs the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Random seed (None for random).
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 50,
            max_iterations: 500,
            c1: 2.05,
            c2: 2.05,
            inertia: 0.4,
            velocity_limit: 0.5,
            stagnation_limit: 50,
            convergence_threshold: 0.0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the velocity bound. Clamped to `(0, 1]`.
    pub fn with_velocity_limit(mut self, limit: f64) -> Self {
        self.velocity_limit = limit.clamp(f64::MIN_POSITIVE, 1.0);
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.swarm_size < 2 {
            return Err("swarm_size must be at least 2".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(self.c1 >= 0.0 && self.c2 >= 0.0) {
            return Err(format!(
                "c1 ({}) and c2 ({}) must be non-negative",
                self.c1, self.c2
            ));
        }
        if !(self.inertia >= 0.0) {
            return Err("inertia must be non-negative".into());
        }
        if !(self.velocity_limit > 0.0 && self.velocity_limit <= 1.0) {
            return Err("velocity_limit must be in (0, 1]".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PsoConfig::default();
        assert_eq!(config.swarm_size, 50);
        assert!((config.c1 - 2.05).abs() < 1e-12);
        assert!((config.c2 - 2.05).abs() < 1e-12);
        assert!((config.inertia - 0.4).abs() < 1e-12);
        assert!((config.velocity_limit - 0.5).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(PsoConfig::default().with_swarm_size(1).validate().is_err());
        assert!(PsoConfig::default().with_max_iterations(0).validate().is_err());
        assert!(PsoConfig::default().with_coefficients(-1.0, 2.0).validate().is_err());
        assert!(PsoConfig::default().with_inertia(-0.1).validate().is_err());
        assert!(PsoConfig::default().with_time_limit_ms(0).validate().is_err());
    }

    #[test]
    fn test_velocity_limit_clamped() {
        let config = PsoConfig::default().with_velocity_limit(3.0);
        assert_eq!(config.velocity_limit, 1.0);
        let config = PsoConfig::default().with_velocity_limit(-1.0);
        assert!(config.velocity_limit > 0.0);
        assert!(config.validate().is_ok());
    }
}
