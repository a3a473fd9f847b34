use crate::config::InstanceLimits;
use crate::error::ConfigError;
use crate::model::DistanceModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, NormalError};

const AREA: f64 = 100.0;
const CLUSTER_SPREAD: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoSpec {
    pub customers: usize,
    pub facilities: usize,
    pub planned: usize,
    pub seed: u64,
}

pub fn demands<R: Rng + ?Sized>(customers: usize, rng: &mut R) -> Vec<u64> {
    (0..customers).map(|_| rng.gen_range(1..=20)).collect()
}

/// Customer points spread uniformly over the square.
pub fn customer_sites<R: Rng + ?Sized>(customers: usize, rng: &mut R) -> Vec<(f64, f64)> {
    (0..customers)
        .map(|_| (rng.gen_range(0.0..AREA), rng.gen_range(0.0..AREA)))
        .collect()
}

/// Candidate sites drawn around a handful of cluster centres, so some sites
/// are clearly better placed than others.
pub fn facility_sites<R: Rng + ?Sized>(
    facilities: usize,
    rng: &mut R,
) -> Result<Vec<(f64, f64)>, NormalError> {
    let clusters = (facilities / 4).clamp(1, 6);
    let mut distribution: Vec<(Normal<f64>, Normal<f64>)> = Vec::with_capacity(clusters);

    for _ in 0..clusters {
        let x = rng.gen_range(0.0..AREA);
        let y = rng.gen_range(0.0..AREA);
        distribution.push((Normal::new(x, CLUSTER_SPREAD)?, Normal::new(y, CLUSTER_SPREAD)?));
    }

    Ok((0..facilities)
        .map(|i| {
            let (nx, ny) = &distribution[i % clusters];
            (
                nx.sample(rng).clamp(0.0, AREA),
                ny.sample(rng).clamp(0.0, AREA),
            )
        })
        .collect())
}

pub fn distance_matrix(customers: &[(f64, f64)], facilities: &[(f64, f64)]) -> Vec<Vec<u64>> {
    customers
        .iter()
        .map(|&(cx, cy)| {
            facilities
                .iter()
                .map(|&(fx, fy)| {
                    let dx = cx - fx;
                    let dy = cy - fy;
                    (dx * dx + dy * dy).sqrt().round() as u64
                })
                .collect()
        })
        .collect()
}

/// Builds a reproducible random instance.
pub fn generate(spec: &DemoSpec, limits: &InstanceLimits) -> Result<DistanceModel, ConfigError> {
    if spec.facilities == 0 {
        return Err(ConfigError::EmptyDimension { what: "facility" });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed);
    let demand = demands(spec.customers, &mut rng);
    let customers = customer_sites(spec.customers, &mut rng);
    let facilities = facility_sites(spec.facilities, &mut rng)
        .map_err(|e| ConfigError::InvalidParameter(format!("facility cluster: {}", e)))?;

    DistanceModel::new(
        spec.planned,
        demand,
        distance_matrix(&customers, &facilities),
        limits,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(seed: u64) -> DemoSpec {
        DemoSpec {
            customers: 30,
            facilities: 12,
            planned: 3,
            seed,
        }
    }

    #[test]
    fn same_seed_same_instance() {
        let limits = InstanceLimits::default();
        assert_eq!(
            generate(&spec(9), &limits).unwrap(),
            generate(&spec(9), &limits).unwrap()
        );
        assert_ne!(
            generate(&spec(9), &limits).unwrap(),
            generate(&spec(10), &limits).unwrap()
        );
    }

    #[test]
    fn dimensions_and_demand_range() {
        let model = generate(&spec(1), &InstanceLimits::default()).unwrap();
        assert_eq!(model.customer_count(), 30);
        assert_eq!(model.facility_count(), 12);
        assert_eq!(model.planned_facility_count(), 3);
        for customer in 0..model.customer_count() {
            assert!((1..=20).contains(&model.demand(customer)));
        }
    }

    #[test]
    fn euclidean_distances_are_rounded() {
        let matrix = distance_matrix(&[(0.0, 0.0)], &[(3.0, 4.0), (1.0, 1.0)]);
        assert_eq!(matrix, vec![vec![5, 1]]);
    }

    #[test]
    fn invalid_planned_count_is_rejected() {
        let bad = DemoSpec {
            planned: 13,
            ..spec(1)
        };
        assert!(matches!(
            generate(&bad, &InstanceLimits::default()),
            Err(ConfigError::PlannedOutOfRange { .. })
        ));
    }
}
