//! Reader for p-median instances written as whitespace separated integers:
//!
//! ```text
//! <facilities> <planned> <customers>
//! <demand of each customer>
//! <one row of facility distances per customer>
//! ```
//!
//! `#` starts a comment running to the end of the line.

use crate::config::InstanceLimits;
use crate::error::{ConfigError, InstanceError};
use crate::model::DistanceModel;
use std::fs;
use std::io::Read;
use std::path::Path;

const PREALLOCATION_CAP: usize = 1024;

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = &'a str> + 'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let inner = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace);
        Self {
            inner: Box::new(inner),
            position: 0,
        }
    }

    fn next_i64(&mut self, expected: impl FnOnce() -> String) -> Result<i64, InstanceError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| InstanceError::UnexpectedEnd {
                expected: expected(),
            })?;
        self.position += 1;
        token.parse().map_err(|_| InstanceError::Malformed {
            position: self.position,
            token: token.to_string(),
        })
    }

    fn next_count(&mut self, what: &'static str) -> Result<usize, InstanceError> {
        let value = self.next_i64(|| format!("{} count", what))?;
        if value <= 0 {
            return Err(ConfigError::EmptyDimension { what }.into());
        }
        Ok(value as usize)
    }
}

pub fn parse_instance(text: &str, limits: &InstanceLimits) -> Result<DistanceModel, InstanceError> {
    let mut tokens = Tokens::new(text);

    let facility_count = tokens.next_count("facility")?;
    let planned = tokens.next_i64(|| "planned facility count".to_string())?;
    if planned <= 0 || planned as usize > facility_count {
        return Err(ConfigError::PlannedOutOfRange {
            planned: planned.max(0) as usize,
            facilities: facility_count,
        }
        .into());
    }
    let customer_count = tokens.next_count("customer")?;

    // Refuse oversized headers before allocating for them.
    if customer_count > limits.max_customers {
        return Err(ConfigError::CapacityExceeded {
            what: "customer",
            count: customer_count,
            limit: limits.max_customers,
        }
        .into());
    }
    if facility_count > limits.max_facilities {
        return Err(ConfigError::CapacityExceeded {
            what: "facility",
            count: facility_count,
            limit: limits.max_facilities,
        }
        .into());
    }

    // Headers are untrusted when limits are lifted; grow past this as tokens arrive.
    let mut demand = Vec::with_capacity(customer_count.min(PREALLOCATION_CAP));
    for customer in 0..customer_count {
        let value = tokens.next_i64(|| format!("demand of customer {}", customer + 1))?;
        if value < 0 {
            return Err(ConfigError::NegativeDemand { customer, value }.into());
        }
        demand.push(value as u64);
    }

    let mut distance = Vec::with_capacity(customer_count.min(PREALLOCATION_CAP));
    for customer in 0..customer_count {
        let mut row = Vec::with_capacity(facility_count.min(PREALLOCATION_CAP));
        for facility in 0..facility_count {
            let value = tokens.next_i64(|| {
                format!(
                    "distance from customer {} to facility {}",
                    customer + 1,
                    facility + 1
                )
            })?;
            if value < 0 {
                return Err(ConfigError::NegativeDistance {
                    customer,
                    facility,
                    value,
                }
                .into());
            }
            row.push(value as u64);
        }
        distance.push(row);
    }

    Ok(DistanceModel::new(planned as usize, demand, distance, limits)?)
}

pub fn read_instance<R: Read>(
    mut reader: R,
    limits: &InstanceLimits,
) -> Result<DistanceModel, InstanceError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_instance(&text, limits)
}

pub fn load_instance(path: &Path, limits: &InstanceLimits) -> Result<DistanceModel, InstanceError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text, limits)
}
