//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use super::config::GaConfig;
use crate::error::{PlacementError, Result};
use crate::random::rng_from;
use crate::search::eval::{best_index, evaluate_batch, is_significant};
use crate::search::types::{Candidate, Objective, SearchDriver, SearchResult};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

const ALGORITHM: &str = "GA";

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let request = PlacementRequest::from_coordinates(&pool, 6, 2).build()?;
/// let config = GaConfig::fast().with_seed(42);
/// let result = GaRunner::run(&request, &config)?;
/// let best = request.placement(&result.best_x)?;
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<O: Objective>(objective: &O, config: &GaConfig) -> Result<SearchResult> {
        Self::run_with_cancel(objective, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the start of the next generation and returns the best solution
    /// found so far.
    pub fn run_with_cancel<O: Objective>(
        objective: &O,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        config.validate().map_err(PlacementError::InvalidConfig)?;
        let dim = objective.dimension();
        if dim == 0 {
            return Err(PlacementError::InvalidConfig(
                "objective dimension must be at least 1".into(),
            ));
        }

        let (mut rng, seed) = rng_from(config.seed);
        let started = Instant::now();

        // 1. Initialize and evaluate
        let mut population: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::new((0..dim).map(|_| rng.random_range(0.0..1.0)).collect()))
            .collect();
        let mut failed = evaluate_batch(objective, &mut population, config.parallel);
        let mut evaluations = population.len();

        // 2. Track best
        let mut best = population[best_index(&population)].clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness);

        let elite_count = (config.population_size as f64 * config.elite_ratio) as usize;
        let mut stagnation_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut timed_out = false;

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            // Sort ascending: best first
            population.sort_by(|a, b| {
                a.fitness
                    .partial_cmp(&b.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let fitness: Vec<f64> = population.iter().map(|c| c.fitness).collect();

            let mut next_gen: Vec<Candidate> = population[..elite_count].to_vec();

            while next_gen.len() < config.population_size {
                let p1 = &population[config.selection.select(&fitness, &mut rng)];
                let p2 = &population[config.selection.select(&fitness, &mut rng)];

                let children = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let (c1, c2) = config.crossover.apply(&p1.genes, &p2.genes, &mut rng);
                    vec![c1, c2]
                } else {
                    vec![p1.genes.clone()]
                };

                for mut genes in children {
                    if next_gen.len() >= config.population_size {
                        break;
                    }
                    if rng.random_range(0.0..1.0) < config.mutation_rate {
                        config.mutation.apply(&mut genes, &mut rng);
                    }
                    for g in genes.iter_mut() {
                        *g = g.clamp(0.0, 1.0);
                    }
                    next_gen.push(Candidate::new(genes));
                }
            }

            // Elites keep their fitness
            failed += evaluate_batch(objective, &mut next_gen[elite_count..], config.parallel);
            evaluations += config.population_size - elite_count;
            population = next_gen;
            generations = gen + 1;

            let gen_best = &population[best_index(&population)];
            if gen_best.fitness < best.fitness {
                if is_significant(best.fitness, gen_best.fitness, config.convergence_threshold) {
                    stagnation_counter = 0;
                } else {
                    stagnation_counter += 1;
                }
                best = gen_best.clone();
            } else {
                stagnation_counter += 1;
            }

            fitness_history.push(best.fitness);
            objective.on_generation(generations, best.fitness);
            debug!(
                generation = generations,
                best_fitness = best.fitness,
                stagnation = stagnation_counter,
                "ga generation"
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            algorithm = ALGORITHM,
            seed,
            generations,
            evaluations,
            failed_evaluations = failed,
            best_fitness = best.fitness,
            stagnated,
            cancelled,
            timed_out,
            "ga finished"
        );

        Ok(SearchResult {
            algorithm: ALGORITHM,
            best_x: best.genes,
            best_fitness: best.fitness,
            generations,
            evaluations,
            failed_evaluations: failed,
            stagnated,
            cancelled,
            timed_out,
            seed,
            fitness_history,
        })
    }
}

impl SearchDriver for GaConfig {
    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn minimize<O: Objective>(
        &self,
        objective: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        GaRunner::run_with_cancel(objective, self, cancel)
    }
}

// ============================================================================
// Tests
// ============================================================================
