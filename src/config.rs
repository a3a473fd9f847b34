use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_POPULATION_SIZE: usize = 5;
pub const DEFAULT_MUTATION_RATE: f64 = 0.3;
pub const DEFAULT_MAX_GENERATIONS: usize = 50;
pub const DEFAULT_SELECTION_PROBABILITY: f64 = 0.2;
pub const DEFAULT_CAPACITY: usize = 100;

/// Upper bounds on instance dimensions accepted by `DistanceModel::new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceLimits {
    pub max_customers: usize,
    pub max_facilities: usize,
}

impl Default for InstanceLimits {
    fn default() -> Self {
        Self {
            max_customers: DEFAULT_CAPACITY,
            max_facilities: DEFAULT_CAPACITY,
        }
    }
}

impl InstanceLimits {
    pub fn unbounded() -> Self {
        Self {
            max_customers: usize::MAX,
            max_facilities: usize::MAX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub max_generations: usize,
    /// Numerator of the decaying chance that an inferior offspring still
    /// takes a parent's slot.
    pub selection_probability: f64,
    /// Fixed seed for reproducible runs. Drawn from OS entropy when absent.
    pub seed: Option<u64>,
    pub limits: InstanceLimits,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            max_generations: DEFAULT_MAX_GENERATIONS,
            selection_probability: DEFAULT_SELECTION_PROBABILITY,
            seed: None,
            limits: InstanceLimits::default(),
        }
    }
}

impl GaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GaConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::InvalidParameter(format!(
                "population_size must be at least 2 to pick distinct parents, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidParameter(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.selection_probability) {
            return Err(ConfigError::InvalidParameter(format!(
                "selection_probability must lie in [0, 1], got {}",
                self.selection_probability
            )));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::InvalidParameter(
                "max_generations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 5);
        assert_eq!(config.max_generations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_population_of_one() {
        let config = GaConfig {
            population_size: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GaConfig {
            selection_probability: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: GaConfig = toml::from_str(
            "population_size = 12\nseed = 7\n\n[limits]\nmax_customers = 500\n",
        )
        .unwrap();
        assert_eq!(config.population_size, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mutation_rate, DEFAULT_MUTATION_RATE);
        assert_eq!(config.limits.max_customers, 500);
        assert_eq!(config.limits.max_facilities, DEFAULT_CAPACITY);
    }
}
