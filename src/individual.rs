use crate::fitness::evaluate;
use crate::genetic_algorithm::Chromosome;
use crate::model::DistanceModel;
use itertools::Itertools;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Individual {
    pub genes: Vec<bool>,
    pub fitness: u64,
}

impl Individual {
    /// Wraps `genes` and computes their cost under `model`.
    pub fn new(genes: Vec<bool>, model: &DistanceModel) -> Self {
        let fitness = evaluate(&genes, model);
        Self { genes, fitness }
    }

    pub fn open_count(&self) -> usize {
        count_open(&self.genes)
    }

    pub fn open_facilities(&self) -> Vec<usize> {
        self.genes.iter().positions(|&open| open).collect()
    }

    /// Space separated 0/1 rendering of the chromosome.
    pub fn chromosome_string(&self) -> String {
        self.genes
            .iter()
            .map(|&open| if open { '1' } else { '0' })
            .join(" ")
    }
}

impl Chromosome for Individual {
    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn genes(&self) -> &[bool] {
        &self.genes
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] cost {}", self.chromosome_string(), self.fitness)
    }
}

pub fn count_open(genes: &[bool]) -> usize {
    genes.iter().filter(|&&open| open).count()
}
