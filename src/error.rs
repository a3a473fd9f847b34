use thiserror::Error;

/// Problems with the instance or the GA parameters. All of these are detected
/// before the first generation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("planned facility count {planned} must lie in 1..={facilities}")]
    PlannedOutOfRange { planned: usize, facilities: usize },
    #[error("{what} count must be positive")]
    EmptyDimension { what: &'static str },
    #[error("{what} count {count} exceeds capacity {limit}")]
    CapacityExceeded {
        what: &'static str,
        count: usize,
        limit: usize,
    },
    #[error("negative demand {value} for customer {customer}")]
    NegativeDemand { customer: usize, value: i64 },
    #[error("negative distance {value} between customer {customer} and facility {facility}")]
    NegativeDistance {
        customer: usize,
        facility: usize,
        value: i64,
    },
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },
    #[error("demand-weighted distances overflow the total cost at customer {customer}")]
    CostOverflow { customer: usize },
    #[error("invalid GA parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("token {position} ('{token}') is not an integer")]
    Malformed { position: usize, token: String },
    #[error("instance ended early while reading {expected}")]
    UnexpectedEnd { expected: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum GaError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Instance(#[from] InstanceError),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to draw chart: {0}")]
    Plot(String),
}

pub type Result<T, E = GaError> = std::result::Result<T, E>;
