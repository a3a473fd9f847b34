use crate::error::ConfigError;
use crate::fitness::evaluate;
use crate::individual::Individual;
use crate::model::DistanceModel;
use crate::repair::repair;
use rand::Rng;
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Population {
    pub individuals: Vec<Individual>,
}

impl Population {
    /// Random fair-coin chromosomes, each repaired to the planned count.
    ///
    /// All random draws happen up front on the caller's generator; only the
    /// pure fitness evaluation is spread over rayon.
    pub fn generate<R: Rng + ?Sized>(
        model: &DistanceModel,
        size: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let mut individuals = Vec::with_capacity(size);
        for _ in 0..size {
            let mut genes: Vec<bool> = (0..model.facility_count())
                .map(|_| rng.gen_bool(0.5))
                .collect();
            repair(&mut genes, model.planned_facility_count(), rng)?;
            individuals.push(Individual { genes, fitness: 0 });
        }

        individuals.par_iter_mut().for_each(|individual| {
            individual.fitness = evaluate(&individual.genes, model);
        });

        Ok(Self { individuals })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Lowest-cost member; the earliest one wins a tie.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .reduce(|best, candidate| {
                if candidate.fitness < best.fitness {
                    candidate
                } else {
                    best
                }
            })
    }
}

/// Holds the best individual seen across the whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestTracker {
    best: Individual,
}

impl BestTracker {
    pub fn new(initial: Individual) -> Self {
        Self { best: initial }
    }

    /// Adopts the population's best if it is strictly cheaper. Returns whether
    /// the tracked individual changed.
    pub fn update(&mut self, population: &Population) -> bool {
        match population.best() {
            Some(candidate) if candidate.fitness < self.best.fitness => {
                self.best = candidate.clone();
                true
            }
            _ => false,
        }
    }

    pub fn best(&self) -> &Individual {
        &self.best
    }

    pub fn into_inner(self) -> Individual {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstanceLimits;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn model() -> DistanceModel {
        DistanceModel::new(
            3,
            vec![1, 2, 3],
            vec![
                vec![1, 4, 6, 8, 2, 9],
                vec![3, 3, 1, 7, 5, 2],
                vec![8, 2, 4, 1, 6, 3],
            ],
            &InstanceLimits::default(),
        )
        .unwrap()
    }

    fn with_fitness(fitness: u64) -> Individual {
        Individual {
            genes: vec![true],
            fitness,
        }
    }

    #[test]
    fn generated_members_are_valid_and_evaluated() {
        let model = model();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let population = Population::generate(&model, 8, &mut rng).unwrap();

        assert_eq!(population.len(), 8);
        for individual in &population.individuals {
            assert_eq!(individual.open_count(), 3);
            assert_eq!(individual.fitness, evaluate(&individual.genes, &model));
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let model = model();
        let a = Population::generate(&model, 6, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let b = Population::generate(&model, 6, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn best_prefers_earliest_on_ties() {
        let population = Population {
            individuals: vec![with_fitness(9), with_fitness(4), with_fitness(4)],
        };
        let best = population.best().unwrap();
        assert!(std::ptr::eq(best, &population.individuals[1]));
    }

    #[test]
    fn tracker_only_moves_downhill() {
        let mut tracker = BestTracker::new(with_fitness(10));
        let worse = Population {
            individuals: vec![with_fitness(12), with_fitness(11)],
        };
        assert!(!tracker.update(&worse));
        assert_eq!(tracker.best().fitness, 10);

        let better = Population {
            individuals: vec![with_fitness(12), with_fitness(7)],
        };
        assert!(tracker.update(&better));
        assert_eq!(tracker.into_inner().fitness, 7);
    }
}
