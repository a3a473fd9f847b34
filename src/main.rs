use crate::cli::{Cli, Mode};
use chrono::Local;
use clap::Parser;
use csv::Writer;
use pmedian_ga::demo_data::{self, DemoSpec};
use pmedian_ga::error::Result;
use pmedian_ga::genetic_algorithm::Optimizer;
use pmedian_ga::instance::{load_instance, read_instance};
use pmedian_ga::report::Report;
use pmedian_ga::sweep::{run_sweep, SweepGrid};
use pmedian_ga::trace::{ConsoleReporter, CsvTrace, HistoryRecorder};
use pmedian_ga::visualization::draw_convergence;
use pmedian_ga::{DistanceModel, GaConfig, SteadyStateOptimizer};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;

const DEMO_SEED: u64 = 7;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<GaConfig> {
    let mut config = match &cli.config {
        Some(path) => GaConfig::load(path)?,
        None => GaConfig::default(),
    };

    if let Some(population) = cli.population {
        config.population_size = population;
    }
    if let Some(rate) = cli.mutation_rate {
        config.mutation_rate = rate;
    }
    if let Some(generations) = cli.generations {
        config.max_generations = generations;
    }
    if let Some(probability) = cli.selection_probability {
        config.selection_probability = probability;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

fn build_model(cli: &Cli, config: &GaConfig) -> Result<DistanceModel> {
    let model = match cli.instance.as_deref() {
        Some("-") => read_instance(io::stdin().lock(), &config.limits)?,
        Some(path) => load_instance(Path::new(path), &config.limits)?,
        None => {
            let spec = DemoSpec {
                customers: cli.customers,
                facilities: cli.facilities,
                planned: cli.planned,
                seed: cli.seed.unwrap_or(DEMO_SEED),
            };
            info!(?spec, "no instance given, generating demo instance");
            demo_data::generate(&spec, &config.limits)?
        }
    };

    info!(
        customers = model.customer_count(),
        facilities = model.facility_count(),
        planned = model.planned_facility_count(),
        "instance loaded"
    );
    Ok(model)
}

fn solve(cli: &Cli, model: &DistanceModel, config: GaConfig) -> Result<()> {
    let trace = match &cli.trace {
        Some(path) => Some(CsvTrace::create(path)?),
        None => None,
    };
    let mut observers = (
        (
            ConsoleReporter { quiet: cli.quiet },
            HistoryRecorder::default(),
        ),
        trace,
    );

    let mut optimizer = SteadyStateOptimizer::new(model, config)?;
    let outcome = optimizer.optimize(&mut observers)?;
    let ((_, history), _) = observers;

    let report = Report::new(outcome.best, model);
    println!("{}", report);
    println!("Seed: {}", outcome.seed);

    if let Some(path) = &cli.assignments {
        report.write_assignments(File::create(path)?)?;
        info!(path = %path.display(), "assignments written");
    }
    if let Some(path) = &cli.chart {
        draw_convergence(&history.records, path)?;
        info!(path = %path.display(), "convergence chart written");
    }

    Ok(())
}

fn sweep(cli: &Cli, model: &DistanceModel, config: &GaConfig) -> Result<()> {
    let path = cli.output.clone().unwrap_or_else(|| {
        let date_str = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        PathBuf::from(format!("sweep_results_{}.csv", date_str))
    });
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = Writer::from_writer(file);

    let base_seed = config.seed.unwrap_or(DEMO_SEED);
    let results = run_sweep(
        model,
        &SweepGrid::default(),
        cli.repetitions,
        base_seed,
        config.limits,
        &mut writer,
    )?;

    info!(
        scenarios = results.len(),
        path = %path.display(),
        "sweep complete"
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let model = build_model(cli, &config)?;

    info!(mode = %cli.mode, "starting");
    match cli.mode {
        Mode::Solve => solve(cli, &model, config),
        Mode::Sweep => sweep(cli, &model, &config),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}
