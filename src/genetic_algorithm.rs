use crate::error::Result;
use std::fmt::Debug;

// This trait represents a chromosome - a single candidate choice of
// open facilities together with its cached cost
pub trait Chromosome: Send + Sync + Debug + Clone {
    fn fitness(&self) -> u64;
    fn genes(&self) -> &[bool];
}

// Counts of what happened to the offspring produced in one generation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub improved: usize,
    pub diversity: usize,
    pub discarded: usize,
}

// This trait observes the algorithm once per finished generation, receiving
// the best-ever chromosome at that point
pub trait Evaluator<C: Chromosome>: Debug {
    fn record(&mut self, generation: usize, best: &C, stats: &GenerationStats) -> Result<()>;
}

// Observers compose pairwise so a run can stream to the console and a trace
// file at once
impl<C, A, B> Evaluator<C> for (A, B)
where
    C: Chromosome,
    A: Evaluator<C>,
    B: Evaluator<C>,
{
    fn record(&mut self, generation: usize, best: &C, stats: &GenerationStats) -> Result<()> {
        self.0.record(generation, best, stats)?;
        self.1.record(generation, best, stats)
    }
}

impl<C, E> Evaluator<C> for Option<E>
where
    C: Chromosome,
    E: Evaluator<C>,
{
    fn record(&mut self, generation: usize, best: &C, stats: &GenerationStats) -> Result<()> {
        match self {
            Some(inner) => inner.record(generation, best, stats),
            None => Ok(()),
        }
    }
}

// This trait encapsulates the optimizer logic
pub trait Optimizer<C: Chromosome> {
    type Outcome;

    fn optimize(&mut self, eval: &mut dyn Evaluator<C>) -> Result<Self::Outcome>;
}
