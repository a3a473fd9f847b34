use crate::individual::Individual;
use rand::Rng;

/// Outcome of offering one offspring to the population.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replacement {
    ReplacedFirst,
    ReplacedSecond,
    /// An offspring no better than either parent survived anyway.
    Diversity(usize),
    Discarded,
}

/// Two distinct population slots, uniformly at random.
pub fn select_parents<R: Rng + ?Sized>(population_size: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(population_size >= 2);
    let first = rng.gen_range(0..population_size);
    let mut second = rng.gen_range(0..population_size);
    while second == first {
        second = rng.gen_range(0..population_size);
    }
    (first, second)
}

/// Chance that an inferior offspring still takes a parent's slot in the
/// zero-based `generation`. Certain in generation 0, then decays as
/// `selection_probability / generation`.
pub fn survival_probability(selection_probability: f64, generation: usize) -> f64 {
    if generation == 0 {
        1.0
    } else {
        (selection_probability / generation as f64).min(1.0)
    }
}

/// Steady-state replacement: the offspring overwrites at most one of its
/// parents' slots in `next`.
pub fn replace<R: Rng + ?Sized>(
    next: &mut [Individual],
    offspring: Individual,
    parents: (usize, usize),
    generation: usize,
    selection_probability: f64,
    rng: &mut R,
) -> Replacement {
    let (first, second) = parents;

    if offspring.fitness < next[first].fitness {
        next[first] = offspring;
        Replacement::ReplacedFirst
    } else if offspring.fitness < next[second].fitness {
        next[second] = offspring;
        Replacement::ReplacedSecond
    } else if rng.gen_bool(survival_probability(selection_probability, generation)) {
        let slot = if rng.gen_bool(0.5) { first } else { second };
        next[slot] = offspring;
        Replacement::Diversity(slot)
    } else {
        Replacement::Discarded
    }
}
