use crate::config::{GaConfig, InstanceLimits};
use crate::error::Result;
use crate::genetic_algorithm::Optimizer;
use crate::model::DistanceModel;
use crate::optimizer::SteadyStateOptimizer;
use crate::trace::HistoryRecorder;
use itertools::iproduct;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::time::Instant;
use tracing::info;

/// Values tried for each GA parameter; every combination is one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepGrid {
    pub population_sizes: Vec<usize>,
    pub mutation_rates: Vec<f64>,
    pub selection_probabilities: Vec<f64>,
    pub generations: Vec<usize>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            population_sizes: vec![5, 10, 20],
            mutation_rates: vec![0.1, 0.3, 0.5],
            selection_probabilities: vec![0.1, 0.2, 0.4],
            generations: vec![50],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepResult {
    pub scenario: u64,
    pub repetitions: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub selection_probability: f64,
    pub max_generations: usize,
    pub best_cost: u64,
    pub mean_cost: f64,
    pub var_cost: f64,
    pub mean_last_improvement: f64,
    pub mean_runtime: f64,
    pub var_runtime: f64,
}

#[derive(Debug)]
struct RunResult {
    cost: u64,
    last_improvement: usize,
    runtime: f64,
}

pub fn mean_variance<T: Copy + Into<f64>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v.into()).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

fn hash_scenario(
    population_size: usize,
    mutation_rate: f64,
    selection_probability: f64,
    generations: usize,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    population_size.hash(&mut hasher);
    mutation_rate.to_bits().hash(&mut hasher);
    selection_probability.to_bits().hash(&mut hasher);
    generations.hash(&mut hasher);
    hasher.finish()
}

/// Generation of the last change in best-ever cost, 0 if the initial best
/// was never beaten.
fn last_improvement(history: &HistoryRecorder) -> usize {
    history
        .records
        .windows(2)
        .filter(|pair| pair[1].best_fitness < pair[0].best_fitness)
        .map(|pair| pair[1].generation)
        .last()
        .unwrap_or(0)
}

fn single_run(model: &DistanceModel, config: GaConfig) -> Result<RunResult> {
    let start = Instant::now();
    let mut history = HistoryRecorder::default();
    let outcome = SteadyStateOptimizer::new(model, config)?.optimize(&mut history)?;

    Ok(RunResult {
        cost: outcome.best.fitness,
        last_improvement: last_improvement(&history),
        runtime: start.elapsed().as_secs_f64(),
    })
}

/// Runs every scenario of `grid` `repetitions` times and writes one CSV row
/// per scenario. Repetition `i` is seeded with `base_seed + i` in every
/// scenario so scenarios are compared on the same random streams.
pub fn run_sweep<W: Write>(
    model: &DistanceModel,
    grid: &SweepGrid,
    repetitions: usize,
    base_seed: u64,
    limits: InstanceLimits,
    writer: &mut csv::Writer<W>,
) -> Result<Vec<SweepResult>> {
    let mut visited: HashSet<u64> = HashSet::new();
    let mut results = Vec::new();

    for (&population_size, &mutation_rate, &selection_probability, &max_generations) in iproduct!(
        &grid.population_sizes,
        &grid.mutation_rates,
        &grid.selection_probabilities,
        &grid.generations
    ) {
        let scenario = hash_scenario(
            population_size,
            mutation_rate,
            selection_probability,
            max_generations,
        );
        if !visited.insert(scenario) {
            info!(scenario, "scenario already evaluated, skipping");
            continue;
        }
        info!(
            scenario,
            population_size, mutation_rate, selection_probability, max_generations, "running scenario"
        );

        let runs = (0..repetitions)
            .into_par_iter()
            .map(|i| {
                let config = GaConfig {
                    population_size,
                    mutation_rate,
                    max_generations,
                    selection_probability,
                    seed: Some(base_seed.wrapping_add(i as u64)),
                    limits,
                };
                single_run(model, config)
            })
            .collect::<Result<Vec<RunResult>>>()?;

        let costs: Vec<f64> = runs.iter().map(|r| r.cost as f64).collect();
        let improvements: Vec<f64> = runs.iter().map(|r| r.last_improvement as f64).collect();
        let runtimes: Vec<f64> = runs.iter().map(|r| r.runtime).collect();

        let (mean_cost, var_cost) = mean_variance(&costs);
        let (mean_last_improvement, _) = mean_variance(&improvements);
        let (mean_runtime, var_runtime) = mean_variance(&runtimes);

        let result = SweepResult {
            scenario,
            repetitions,
            population_size,
            mutation_rate,
            selection_probability,
            max_generations,
            best_cost: runs.iter().map(|r| r.cost).min().unwrap_or(0),
            mean_cost,
            var_cost,
            mean_last_improvement,
            mean_runtime,
            var_runtime,
        };

        writer.serialize(&result)?;
        writer.flush()?;
        results.push(result);
    }

    Ok(results)
}
