//! Steady-state genetic algorithm for the p-median facility location problem.

pub mod config;
pub mod demo_data;
pub mod error;
pub mod fitness;
pub mod genetic_algorithm;
pub mod individual;
pub mod instance;
pub mod model;
pub mod operators;
pub mod optimizer;
pub mod population;
pub mod repair;
pub mod report;
pub mod selection;
pub mod sweep;
pub mod trace;
pub mod visualization;

pub use config::{GaConfig, InstanceLimits};
pub use error::{ConfigError, GaError, InstanceError};
pub use individual::Individual;
pub use model::DistanceModel;
pub use optimizer::{RunOutcome, SteadyStateOptimizer};
