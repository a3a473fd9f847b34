use crate::error::Result;
use crate::fitness::assignments;
use crate::individual::Individual;
use crate::model::DistanceModel;
use csv::Writer;
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// A customer and the open facility that serves it. Indices are zero-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub customer: usize,
    pub facility: usize,
    pub distance: u64,
    pub demand: u64,
    pub cost: u64,
}

/// Final answer of a run: which sites open, who each customer goes to, and
/// what it costs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub best: Individual,
    pub open_facilities: Vec<usize>,
    pub assignments: Vec<Assignment>,
}

impl Report {
    pub fn new(best: Individual, model: &DistanceModel) -> Self {
        let assignments = assignments(model, &best.genes)
            .into_iter()
            .enumerate()
            .map(|(customer, facility)| {
                let distance = model.distance(customer, facility);
                let demand = model.demand(customer);
                Assignment {
                    customer,
                    facility,
                    distance,
                    demand,
                    cost: distance * demand,
                }
            })
            .collect();

        Self {
            open_facilities: best.open_facilities(),
            best,
            assignments,
        }
    }

    pub fn total_cost(&self) -> u64 {
        self.best.fitness
    }

    pub fn write_assignments<W: Write>(&self, inner: W) -> Result<()> {
        let mut writer = Writer::from_writer(inner);
        for assignment in &self.assignments {
            writer.serialize(assignment)?;
        }
        writer.flush()?;
        Ok(())
    }
}

// Customers and facilities are numbered from 1 for people reading the report.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cost : {}", self.total_cost())?;
        writeln!(f, "Chromosome: {}", self.best.chromosome_string())?;
        writeln!(f, "The following facilities must be finally selected :")?;
        for facility in &self.open_facilities {
            writeln!(f, "\tFacility {}", facility + 1)?;
        }
        writeln!(f, "Customers to be served by following facilities :")?;
        for assignment in &self.assignments {
            writeln!(
                f,
                "\tCustomer {} : {}",
                assignment.customer + 1,
                assignment.facility + 1
            )?;
        }
        Ok(())
    }
}
