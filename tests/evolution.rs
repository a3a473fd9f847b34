use itertools::Itertools;
use pmedian_ga::demo_data::{generate, DemoSpec};
use pmedian_ga::fitness::{evaluate, find_nearest_facility};
use pmedian_ga::genetic_algorithm::Optimizer;
use pmedian_ga::instance::parse_instance;
use pmedian_ga::optimizer::{EvolutionState, StepEvent};
use pmedian_ga::report::Report;
use pmedian_ga::trace::HistoryRecorder;
use pmedian_ga::{ConfigError, DistanceModel, GaConfig, GaError, InstanceLimits, SteadyStateOptimizer};

fn demo_model() -> DistanceModel {
    generate(
        &DemoSpec {
            customers: 25,
            facilities: 10,
            planned: 3,
            seed: 11,
        },
        &InstanceLimits::default(),
    )
    .unwrap()
}

fn seeded(seed: u64) -> GaConfig {
    GaConfig {
        population_size: 8,
        max_generations: 40,
        seed: Some(seed),
        ..GaConfig::default()
    }
}

fn run(model: &DistanceModel, config: GaConfig) -> HistoryRecorder {
    let mut history = HistoryRecorder::default();
    SteadyStateOptimizer::new(model, config)
        .unwrap()
        .optimize(&mut history)
        .unwrap();
    history
}

#[test]
fn same_seed_gives_same_trajectory() {
    let model = demo_model();
    let first = run(&model, seeded(5));
    let second = run(&model, seeded(5));

    assert_eq!(first.records.len(), 40);
    assert_eq!(first.best_fitness_series(), second.best_fitness_series());
    assert_eq!(first.records, second.records);
}

#[test]
fn best_cost_never_increases() {
    let model = demo_model();
    for seed in 0..5 {
        let history = run(&model, seeded(seed));
        let series = history.best_fitness_series();
        assert!(series.windows(2).all(|pair| pair[1] <= pair[0]), "{:?}", series);
    }
}

#[test]
fn every_reported_chromosome_opens_planned_sites() {
    let model = demo_model();
    let history = run(&model, seeded(3));
    for record in &history.records {
        let open = record.chromosome.split(' ').filter(|&bit| bit == "1").count();
        assert_eq!(open, model.planned_facility_count());
    }
}

#[test]
fn population_keeps_cardinality_at_every_step() {
    let model = demo_model();
    let mut optimizer = SteadyStateOptimizer::new(&model, seeded(9)).unwrap();
    assert_eq!(optimizer.state(), EvolutionState::Init);

    loop {
        let event = optimizer.step().unwrap();
        for individual in &optimizer.population().individuals {
            assert_eq!(individual.open_count(), 3);
            assert_eq!(individual.fitness, evaluate(&individual.genes, &model));
        }
        if event == StepEvent::Finished {
            break;
        }
    }
    assert_eq!(optimizer.state(), EvolutionState::Done);
}

fn exhaustive_optimum(model: &DistanceModel) -> u64 {
    (0..model.facility_count())
        .combinations(model.planned_facility_count())
        .map(|open| {
            let mut genes = vec![false; model.facility_count()];
            for facility in open {
                genes[facility] = true;
            }
            evaluate(&genes, model)
        })
        .min()
        .unwrap()
}

#[test]
fn reaches_exhaustive_optimum_on_small_instance() {
    let model = generate(
        &DemoSpec {
            customers: 12,
            facilities: 5,
            planned: 2,
            seed: 11,
        },
        &InstanceLimits::default(),
    )
    .unwrap();
    let optimum = exhaustive_optimum(&model);

    for seed in 0..3 {
        let config = GaConfig {
            population_size: 10,
            max_generations: 100,
            seed: Some(seed),
            ..GaConfig::default()
        };
        let mut history = HistoryRecorder::default();
        let outcome = SteadyStateOptimizer::new(&model, config)
            .unwrap()
            .optimize(&mut history)
            .unwrap();

        assert_eq!(outcome.best.fitness, optimum, "seed {}", seed);
        assert_eq!(outcome.seed, seed);
        assert_eq!(outcome.generations, 100);
    }
}

#[test]
fn demo_result_is_a_feasible_placement() {
    let model = demo_model();
    let outcome = SteadyStateOptimizer::new(&model, seeded(1))
        .unwrap()
        .optimize(&mut HistoryRecorder::default())
        .unwrap();

    assert!(outcome.best.fitness >= exhaustive_optimum(&model));
    assert_eq!(outcome.best.fitness, evaluate(&outcome.best.genes, &model));
    assert_eq!(outcome.best.open_count(), model.planned_facility_count());
}

#[test]
fn invalid_planned_count_is_rejected_before_evolution() {
    for planned in [0, 4] {
        let result = DistanceModel::new(
            planned,
            vec![1, 1],
            vec![vec![1, 2, 3], vec![3, 2, 1]],
            &InstanceLimits::default(),
        );
        assert!(matches!(result, Err(ConfigError::PlannedOutOfRange { .. })));
    }
}

#[test]
fn invalid_parameters_are_rejected_before_evolution() {
    let model = demo_model();
    let config = GaConfig {
        population_size: 1,
        ..seeded(0)
    };
    assert!(matches!(
        SteadyStateOptimizer::new(&model, config),
        Err(GaError::Config(ConfigError::InvalidParameter(_)))
    ));
}

#[test]
fn nearest_facility_and_fitness_examples() {
    let model = DistanceModel::new(
        2,
        vec![1],
        vec![vec![5, 1, 3]],
        &InstanceLimits::default(),
    )
    .unwrap();
    assert_eq!(find_nearest_facility(&model, 0, &[true, false, true]), 2);

    let model = DistanceModel::new(
        1,
        vec![1, 2],
        vec![vec![4, 9], vec![2, 6]],
        &InstanceLimits::default(),
    )
    .unwrap();
    assert_eq!(evaluate(&[true, false], &model), 8);
}

#[test]
fn parsed_instance_solves_to_consistent_report() {
    let text = "\
4 2 5
3 1 4 1 5
2 7 9 4
8 1 6 3
5 5 2 9
7 3 8 1
6 4 1 2
";
    let model = parse_instance(text, &InstanceLimits::default()).unwrap();
    let mut history = HistoryRecorder::default();
    let outcome = SteadyStateOptimizer::new(
        &model,
        GaConfig {
            population_size: 6,
            max_generations: 30,
            seed: Some(2024),
            ..GaConfig::default()
        },
    )
    .unwrap()
    .optimize(&mut history)
    .unwrap();

    let report = Report::new(outcome.best, &model);
    assert_eq!(report.open_facilities.len(), 2);
    assert_eq!(report.assignments.len(), 5);
    let summed: u64 = report.assignments.iter().map(|a| a.cost).sum();
    assert_eq!(summed, report.total_cost());
    for assignment in &report.assignments {
        assert!(report.open_facilities.contains(&assignment.facility));
    }
}
