use crate::config::GaConfig;
use crate::error::{ConfigError, Result};
use crate::genetic_algorithm::{Evaluator, GenerationStats, Optimizer};
use crate::individual::Individual;
use crate::model::DistanceModel;
use crate::operators::{crossover, mutate};
use crate::population::{BestTracker, Population};
use crate::selection::{replace, select_parents, Replacement};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvolutionState {
    Init,
    /// Zero-based index of the generation that runs on the next step.
    Generation(usize),
    Done,
}

/// What a single call to `SteadyStateOptimizer::step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Initialized,
    /// A generation finished; `generation` is 1-based.
    Generation {
        generation: usize,
        stats: GenerationStats,
    },
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub best: Individual,
    pub seed: u64,
    pub generations: usize,
}

/// Steady-state GA over a borrowed instance. Every random draw comes from one
/// `ChaCha8Rng` seeded when the optimizer is built.
#[derive(Debug)]
pub struct SteadyStateOptimizer<'a> {
    model: &'a DistanceModel,
    config: GaConfig,
    seed: u64,
    rng: ChaCha8Rng,
    state: EvolutionState,
    population: Population,
    best: Option<BestTracker>,
}

impl<'a> SteadyStateOptimizer<'a> {
    pub fn new(model: &'a DistanceModel, config: GaConfig) -> Result<Self> {
        config.validate()?;
        check_limits(model, &config)?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

        Ok(Self {
            model,
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: EvolutionState::Init,
            population: Population {
                individuals: Vec::new(),
            },
            best: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> EvolutionState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best individual seen so far; `None` before initialisation.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref().map(BestTracker::best)
    }

    /// Advances the state machine by one state.
    pub fn step(&mut self) -> Result<StepEvent> {
        match self.state {
            EvolutionState::Init => {
                self.initialize()?;
                self.state = EvolutionState::Generation(0);
                Ok(StepEvent::Initialized)
            }
            EvolutionState::Generation(index) => {
                let stats = self.run_generation(index)?;
                let generation = index + 1;
                self.state = if generation >= self.config.max_generations {
                    EvolutionState::Done
                } else {
                    EvolutionState::Generation(generation)
                };
                Ok(StepEvent::Generation { generation, stats })
            }
            EvolutionState::Done => Ok(StepEvent::Finished),
        }
    }

    fn initialize(&mut self) -> Result<()> {
        info!(
            seed = self.seed,
            population = self.config.population_size,
            facilities = self.model.facility_count(),
            planned = self.model.planned_facility_count(),
            customers = self.model.customer_count(),
            "initializing population"
        );

        self.population =
            Population::generate(self.model, self.config.population_size, &mut self.rng)?;
        let initial_best = self
            .population
            .best()
            .cloned()
            .ok_or_else(|| ConfigError::InvalidParameter("empty population".to_string()))?;

        debug!(fitness = initial_best.fitness, "initial best");
        self.best = Some(BestTracker::new(initial_best));
        Ok(())
    }

    /// Runs the zero-based generation `index`. The survival chance of weaker
    /// offspring is computed from `index`, so generation 0 keeps them all.
    fn run_generation(&mut self, index: usize) -> Result<GenerationStats> {
        let generation = index + 1;
        let planned = self.model.planned_facility_count();
        let size = self.population.len();
        let mut next = self.population.individuals.clone();
        let mut stats = GenerationStats::default();

        for _ in 0..size {
            let parents = select_parents(size, &mut self.rng);
            let mut genes = crossover(
                &self.population.individuals[parents.0].genes,
                &self.population.individuals[parents.1].genes,
                planned,
                &mut self.rng,
            )?;
            mutate(&mut genes, self.config.mutation_rate, &mut self.rng);
            let offspring = Individual::new(genes, self.model);

            match replace(
                &mut next,
                offspring,
                parents,
                index,
                self.config.selection_probability,
                &mut self.rng,
            ) {
                Replacement::ReplacedFirst | Replacement::ReplacedSecond => stats.improved += 1,
                Replacement::Diversity(_) => stats.diversity += 1,
                Replacement::Discarded => stats.discarded += 1,
            }
        }

        self.population = Population { individuals: next };
        if let Some(tracker) = self.best.as_mut() {
            if tracker.update(&self.population) {
                debug!(generation, fitness = tracker.best().fitness, "new best individual");
            }
        }

        debug!(
            generation,
            improved = stats.improved,
            diversity = stats.diversity,
            discarded = stats.discarded,
            "generation complete"
        );
        Ok(stats)
    }
}

impl Optimizer<Individual> for SteadyStateOptimizer<'_> {
    type Outcome = RunOutcome;

    fn optimize(&mut self, eval: &mut dyn Evaluator<Individual>) -> Result<RunOutcome> {
        let mut generations = 0;

        loop {
            match self.step()? {
                StepEvent::Initialized => {}
                StepEvent::Generation { generation, stats } => {
                    generations = generation;
                    if let Some(best) = self.best() {
                        eval.record(generation, best, &stats)?;
                    }
                }
                StepEvent::Finished => break,
            }
        }

        let best = self
            .best()
            .cloned()
            .ok_or_else(|| ConfigError::InvalidParameter("run produced no individual".to_string()))?;

        info!(
            seed = self.seed,
            generations,
            fitness = best.fitness,
            "evolution complete"
        );

        Ok(RunOutcome {
            best,
            seed: self.seed,
            generations,
        })
    }
}

fn check_limits(model: &DistanceModel, config: &GaConfig) -> Result<(), ConfigError> {
    if model.customer_count() > config.limits.max_customers {
        return Err(ConfigError::CapacityExceeded {
            what: "customer",
            count: model.customer_count(),
            limit: config.limits.max_customers,
        });
    }
    if model.facility_count() > config.limits.max_facilities {
        return Err(ConfigError::CapacityExceeded {
            what: "facility",
            count: model.facility_count(),
            limit: config.limits.max_facilities,
        });
    }
    Ok(())
}
