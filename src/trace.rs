use crate::error::Result;
use crate::genetic_algorithm::{Chromosome, Evaluator, GenerationStats};
use crate::individual::Individual;
use colored::Colorize;
use csv::Writer;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One row of the per-generation progress trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: u64,
    pub chromosome: String,
    pub improved: usize,
    pub diversity: usize,
    pub discarded: usize,
}

impl GenerationRecord {
    pub fn new(generation: usize, best: &Individual, stats: &GenerationStats) -> Self {
        Self {
            generation,
            best_fitness: best.fitness(),
            chromosome: best.chromosome_string(),
            improved: stats.improved,
            diversity: stats.diversity,
            discarded: stats.discarded,
        }
    }
}

/// Prints the best-ever individual after each generation.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub quiet: bool,
}

impl Evaluator<Individual> for ConsoleReporter {
    fn record(
        &mut self,
        generation: usize,
        best: &Individual,
        stats: &GenerationStats,
    ) -> Result<()> {
        if !self.quiet {
            println!(
                "{} - Best fitness: {}, accepted: {}, diversity: {}, chromosome: {}",
                format!("Generation {:3}", generation).bold().red(),
                best.fitness,
                stats.improved,
                stats.diversity,
                best.chromosome_string(),
            );
        }
        Ok(())
    }
}

/// Keeps every generation's record in memory.
#[derive(Debug, Default)]
pub struct HistoryRecorder {
    pub records: Vec<GenerationRecord>,
}

impl HistoryRecorder {
    pub fn best_fitness_series(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.best_fitness).collect()
    }
}

impl Evaluator<Individual> for HistoryRecorder {
    fn record(
        &mut self,
        generation: usize,
        best: &Individual,
        stats: &GenerationStats,
    ) -> Result<()> {
        self.records.push(GenerationRecord::new(generation, best, stats));
        Ok(())
    }
}

/// Streams generation records to CSV as they arrive.
pub struct CsvTrace<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> fmt::Debug for CsvTrace<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvTrace").finish_non_exhaustive()
    }
}

impl CsvTrace<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvTrace<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> Evaluator<Individual> for CsvTrace<W> {
    fn record(
        &mut self,
        generation: usize,
        best: &Individual,
        stats: &GenerationStats,
    ) -> Result<()> {
        self.writer.serialize(GenerationRecord::new(generation, best, stats))?;
        self.writer.flush()?;
        Ok(())
    }
}
