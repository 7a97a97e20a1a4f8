//! Repeated-run experiments over scenarios, gateway placements and drivers.
//!
//! An experiment is the cross product
//! `scenarios × gateway variants × algorithms × runs`. Every cell builds a
//! [`PlacementRequest`], runs a driver with seed `base_seed + run`, and
//! re-evaluates the best vector into a [`RunRecord`]. [`summarize`] then
//! folds the records into per-cell statistics.
//!
//! All requests are built before the first optimization starts.

use crate::codec::RepairStrategy;
use crate::energy::EnergyParams;
use crate::error::{PlacementError, Result};
use crate::geometry::Point;
use crate::placement::{sort_pool, AttachmentPoint, PlacementRequest};
use crate::search::ga::GaConfig;
use crate::search::pso::PsoConfig;
use crate::search::{SearchDriver, SearchResult};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

/// A problem size to evaluate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,

    /// Sensor count N.
    pub sensors: usize,

    /// Cluster-head count K.
    pub cluster_heads: usize,

    /// Number of leading attachment points forming the pool (M).
    pub pool_size: usize,

    /// Names of the gateway positions to try, looked up in the gateway table.
    pub gateway_variants: Vec<String>,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        sensors: usize,
        cluster_heads: usize,
        pool_size: usize,
    ) -> Self {
        Self {
            name: name.into(),
            sensors,
            cluster_heads,
            pool_size,
            gateway_variants: Vec::new(),
        }
    }

    pub fn with_gateway(mut self, variant: impl Into<String>) -> Self {
        self.gateway_variants.push(variant.into());
        self
    }
}

/// Settings shared by every cell of an experiment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    /// Independent runs per (scenario, gateway, algorithm) cell.
    pub runs: usize,

    /// Run `r` is seeded with `base_seed + r`.
    pub base_seed: u64,

    pub energy: EnergyParams,

    /// Maximum sensor to cluster-head distance in meters.
    pub max_range: f64,

    /// Penalty weight λ.
    pub penalty_weight: f64,

    pub repair: RepairStrategy,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            base_seed: 0,
            energy: EnergyParams::default(),
            max_range: f64::INFINITY,
            penalty_weight: 1e6,
            repair: RepairStrategy::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_energy(mut self, energy: EnergyParams) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_max_range(mut self, dmax: f64) -> Self {
        self.max_range = dmax;
        self
    }

    pub fn with_penalty_weight(mut self, lambda: f64) -> Self {
        self.penalty_weight = lambda;
        self
    }

    pub fn with_repair(mut self, repair: RepairStrategy) -> Self {
        self.repair = repair;
        self
    }

    /// Validates the configuration. Physical parameters are checked again
    /// when each request is built.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.runs == 0 {
            return Err("runs must be at least 1".into());
        }
        Ok(())
    }
}

/// A search driver together with its parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Ga(GaConfig),
    Pso(PsoConfig),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Ga(c) => c.name(),
            Algorithm::Pso(c) => c.name(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Algorithm::Ga(c) => c.validate(),
            Algorithm::Pso(c) => c.validate(),
        }
    }

    /// Runs the driver on `request` with a fixed seed.
    fn run(&self, request: &PlacementRequest, seed: u64) -> Result<SearchResult> {
        match self {
            Algorithm::Ga(c) => c.clone().with_seed(seed).minimize(request, None),
            Algorithm::Pso(c) => c.clone().with_seed(seed).minimize(request, None),
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    pub scenario: String,
    pub gateway: String,
    pub algorithm: String,
    pub run: usize,
    pub seed: u64,
    pub fitness: f64,
    pub energy: f64,
    pub penalty: f64,
    pub feasible: bool,

    /// Attachment-point ids hosting sensors.
    pub sensor_points: Vec<usize>,

    /// Attachment-point ids hosting cluster-heads.
    pub cluster_head_points: Vec<usize>,

    pub generations: usize,
    pub elapsed_ms: u128,
}

/// Aggregated statistics of one (scenario, gateway, algorithm) cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub scenario: String,
    pub gateway: String,
    pub algorithm: String,
    pub runs: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,

    /// Population standard deviation of the run fitnesses.
    pub std_fitness: f64,

    pub mean_energy: f64,

    /// Fraction of runs whose best placement is feasible.
    pub feasible_rate: f64,
}

/// Fraction of `true` entries; 0 for an empty slice.
pub fn feasible_rate(flags: &[bool]) -> f64 {
    if flags.is_empty() {
        return 0.0;
    }
    flags.iter().filter(|&&f| f).count() as f64 / flags.len() as f64
}

struct Cell<'a> {
    scenario: &'a Scenario,
    gateway: &'a str,
    request: PlacementRequest,
}

fn build_cells<'a>(
    points: &[AttachmentPoint],
    gateways: &'a HashMap<String, Point>,
    scenarios: &'a [Scenario],
    config: &ExperimentConfig,
) -> Result<Vec<Cell<'a>>> {
    let mut cells = Vec::new();
    for scenario in scenarios {
        if points.len() < scenario.pool_size {
            return Err(PlacementError::InfeasibleCardinality {
                required: scenario.pool_size,
                available: points.len(),
            });
        }
        let pool = &points[..scenario.pool_size];
        debug!(
            scenario = %scenario.name,
            sensors = scenario.sensors,
            cluster_heads = scenario.cluster_heads,
            pool_size = scenario.pool_size,
            "preparing scenario"
        );

        for variant in &scenario.gateway_variants {
            let gateway = gateways
                .get(variant)
                .ok_or_else(|| PlacementError::UnknownGateway(variant.clone()))?;
            let request = PlacementRequest::builder(
                pool.to_vec(),
                scenario.sensors,
                scenario.cluster_heads,
            )
            .with_gateway(*gateway)
            .with_energy(config.energy)
            .with_max_range(config.max_range)
            .with_penalty_weight(config.penalty_weight)
            .with_repair(config.repair)
            .build()?;
            cells.push(Cell {
                scenario,
                gateway: variant,
                request,
            });
        }
    }
    Ok(cells)
}

/// Runs every algorithm `config.runs` times on every scenario and gateway
/// variant.
///
/// `points` is ordered by [`AttachmentPoint::index`] first; a scenario's
/// pool is the first `pool_size` points of that order.
///
/// # Errors
///
/// - [`PlacementError::InvalidConfig`] if `config` or an algorithm fails
///   validation
/// - [`PlacementError::InfeasibleCardinality`] if a scenario asks for more
///   points than `points` holds, or `N + K > pool_size`
/// - [`PlacementError::UnknownGateway`] if a variant is missing from
///   `gateways`
/// - [`PlacementError::InvalidParameter`] or
///   [`PlacementError::MalformedCoordinates`] if `points` repeats an index
///   or holds non-finite coordinates
///
/// All of these are reported before any search runs.
pub fn run_experiment(
    points: &[AttachmentPoint],
    gateways: &HashMap<String, Point>,
    scenarios: &[Scenario],
    algorithms: &[Algorithm],
    config: &ExperimentConfig,
) -> Result<Vec<RunRecord>> {
    config.validate().map_err(PlacementError::InvalidConfig)?;
    for algorithm in algorithms {
        algorithm.validate().map_err(PlacementError::InvalidConfig)?;
    }
    let mut table = points.to_vec();
    sort_pool(&mut table)?;
    let cells = build_cells(&table, gateways, scenarios, config)?;

    let mut records = Vec::with_capacity(cells.len() * algorithms.len() * config.runs);
    for cell in &cells {
        let request = &cell.request;
        for algorithm in algorithms {
            for run in 0..config.runs {
                let seed = config.base_seed.wrapping_add(run as u64);
                let started = Instant::now();
                let result = algorithm.run(request, seed)?;
                let placement = request.placement(&result.best_x)?;
                let elapsed_ms = started.elapsed().as_millis();

                let ids = |positions: &[usize]| -> Vec<usize> {
                    positions.iter().map(|&p| request.points()[p].index).collect()
                };
                let record = RunRecord {
                    scenario: cell.scenario.name.clone(),
                    gateway: cell.gateway.to_string(),
                    algorithm: algorithm.name().to_string(),
                    run,
                    seed,
                    fitness: placement.result.fitness,
                    energy: placement.result.energy,
                    penalty: placement.result.penalty,
                    feasible: placement.result.feasible,
                    sensor_points: ids(&placement.sensors),
                    cluster_head_points: ids(&placement.cluster_heads),
                    generations: result.generations,
                    elapsed_ms,
                };
                info!(
                    scenario = %record.scenario,
                    gateway = %record.gateway,
                    algorithm = %record.algorithm,
                    run,
                    seed,
                    fitness = record.fitness,
                    feasible = record.feasible,
                    elapsed_ms = elapsed_ms as u64,
                    "run finished"
                );
                records.push(record);
            }
        }
    }
    Ok(records)
}

/// Groups `records` by (scenario, gateway, algorithm), in the order each
/// group first appears.
pub fn summarize(records: &[RunRecord]) -> Vec<Summary> {
    let mut order: Vec<(&str, &str, &str)> = Vec::new();
    let mut groups: HashMap<(&str, &str, &str), Vec<&RunRecord>> = HashMap::new();
    for r in records {
        let key = (r.scenario.as_str(), r.gateway.as_str(), r.algorithm.as_str());
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(r);
    }

    order
        .into_iter()
        .filter_map(|key| groups.get(&key).map(|group| (key, group)))
        .map(|((scenario, gateway, algorithm), group)| {
            let n = group.len() as f64;
            let fitness: Vec<f64> = group.iter().map(|r| r.fitness).collect();
            let mean = fitness.iter().sum::<f64>() / n;
            let var = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
            let flags: Vec<bool> = group.iter().map(|r| r.feasible).collect();
            Summary {
                scenario: scenario.to_string(),
                gateway: gateway.to_string(),
                algorithm: algorithm.to_string(),
                runs: group.len(),
                best_fitness: fitness.iter().copied().fold(f64::INFINITY, f64::min),
                mean_fitness: mean,
                std_fitness: var.sqrt(),
                mean_energy: group.iter().map(|r| r.energy).sum::<f64>() / n,
                feasible_rate: feasible_rate(&flags),
            }
        })
        .collect()
}
