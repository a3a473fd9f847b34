use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Run the GA once and report the best placement.
    Solve,
    /// Run a grid of GA parameters several times each and write statistics.
    Sweep,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Solve => write!(f, "solve"),
            Mode::Sweep => write!(f, "sweep"),
        }
    }
}

/// Command-line interface (CLI) options.
#[derive(Debug, Parser)]
#[command(name = "pmedian-ga")]
#[command(about = "Steady-state genetic algorithm for the p-median problem", long_about = None)]
pub struct Cli {
    #[arg(short = 'm', long, default_value = "solve")]
    pub mode: Mode,

    /// Instance file, or `-` for stdin. A demo instance is generated when absent.
    #[arg(short = 'i', long)]
    pub instance: Option<String>,

    /// Customers in the generated demo instance.
    #[arg(long, default_value_t = 30)]
    pub customers: usize,

    /// Candidate facilities in the generated demo instance.
    #[arg(long, default_value_t = 12)]
    pub facilities: usize,

    /// Facilities to open in the generated demo instance.
    #[arg(long, default_value_t = 3)]
    pub planned: usize,

    /// TOML file with GA parameters. Flags below override it.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    #[arg(short = 'p', long)]
    pub population: Option<usize>,

    #[arg(long)]
    pub mutation_rate: Option<f64>,

    #[arg(short = 'g', long)]
    pub generations: Option<usize>,

    #[arg(long)]
    pub selection_probability: Option<f64>,

    /// Seed for the GA. Also seeds the demo instance and the sweep.
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Write the per-generation trace as CSV.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Draw the convergence chart as SVG.
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Write customer to facility assignments as CSV.
    #[arg(long)]
    pub assignments: Option<PathBuf>,

    /// Runs per sweep scenario.
    #[arg(short = 'r', long, default_value_t = 5)]
    pub repetitions: usize,

    /// Sweep result file. Defaults to a timestamped name.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Suppress the per-generation console lines.
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_solve_on_demo_instance() {
        let cli = Cli::parse_from(["pmedian-ga"]);
        assert_eq!(cli.mode, Mode::Solve);
        assert!(cli.instance.is_none());
        assert_eq!((cli.customers, cli.facilities, cli.planned), (30, 12, 3));
        assert_eq!(cli.repetitions, 5);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "pmedian-ga",
            "--mode",
            "sweep",
            "--instance",
            "-",
            "--population",
            "8",
            "--mutation-rate",
            "0.1",
            "--seed",
            "42",
        ]);
        assert_eq!(cli.mode, Mode::Sweep);
        assert_eq!(cli.instance.as_deref(), Some("-"));
        assert_eq!(cli.population, Some(8));
        assert_eq!(cli.mutation_rate, Some(0.1));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(Mode::Sweep.to_string(), "sweep");
    }
}
