use crate::config::InstanceLimits;
use crate::error::ConfigError;

/// Read-only view of a p-median instance: customer demands, the
/// customer×facility distance matrix and the number of facilities to open.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceModel {
    planned_facility_count: usize,
    demand: Vec<u64>,
    distance: Vec<Vec<u64>>,
    // Facilities of each customer ordered by (distance, index).
    ranked: Vec<Vec<usize>>,
}

impl DistanceModel {
    pub fn new(
        planned_facility_count: usize,
        demand: Vec<u64>,
        distance: Vec<Vec<u64>>,
        limits: &InstanceLimits,
    ) -> Result<Self, ConfigError> {
        let customer_count = demand.len();
        if customer_count == 0 {
            return Err(ConfigError::EmptyDimension { what: "customer" });
        }
        if distance.len() != customer_count {
            return Err(ConfigError::DimensionMismatch {
                what: "distance matrix".to_string(),
                expected: customer_count,
                actual: distance.len(),
            });
        }

        let facility_count = distance[0].len();
        if facility_count == 0 {
            return Err(ConfigError::EmptyDimension { what: "facility" });
        }
        if let Some((customer, row)) = distance
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != facility_count)
        {
            return Err(ConfigError::DimensionMismatch {
                what: format!("distance row of customer {}", customer),
                expected: facility_count,
                actual: row.len(),
            });
        }

        if customer_count > limits.max_customers {
            return Err(ConfigError::CapacityExceeded {
                what: "customer",
                count: customer_count,
                limit: limits.max_customers,
            });
        }
        if facility_count > limits.max_facilities {
            return Err(ConfigError::CapacityExceeded {
                what: "facility",
                count: facility_count,
                limit: limits.max_facilities,
            });
        }
        if planned_facility_count == 0 || planned_facility_count > facility_count {
            return Err(ConfigError::PlannedOutOfRange {
                planned: planned_facility_count,
                facilities: facility_count,
            });
        }

        // Any chromosome's cost is bounded by the sum of each customer's
        // farthest weighted distance, so that sum must fit.
        distance
            .iter()
            .zip(&demand)
            .enumerate()
            .try_fold(0u64, |total, (customer, (row, &weight))| {
                row.iter()
                    .max()
                    .copied()
                    .unwrap_or(0)
                    .checked_mul(weight)
                    .and_then(|worst| total.checked_add(worst))
                    .ok_or(ConfigError::CostOverflow { customer })
            })?;

        let ranked = distance
            .iter()
            .map(|row| {
                let mut order: Vec<usize> = (0..facility_count).collect();
                order.sort_by_key(|&facility| (row[facility], facility));
                order
            })
            .collect();

        Ok(Self {
            planned_facility_count,
            demand,
            distance,
            ranked,
        })
    }

    pub fn customer_count(&self) -> usize {
        self.demand.len()
    }

    pub fn facility_count(&self) -> usize {
        self.distance[0].len()
    }

    pub fn planned_facility_count(&self) -> usize {
        self.planned_facility_count
    }

    pub fn demand(&self, customer: usize) -> u64 {
        self.demand[customer]
    }

    pub fn distance(&self, customer: usize, facility: usize) -> u64 {
        self.distance[customer][facility]
    }

    /// Facilities ordered nearest first for `customer`, ties broken by index.
    pub fn ranked_facilities(&self, customer: usize) -> &[usize] {
        &self.ranked[customer]
    }
}
