use crate::model::DistanceModel;

/// Returns the open facility closest to `customer`, ties going to the lower
/// index. With no open facility the farthest candidate is returned; callers
/// keep the cardinality invariant so that never happens.
pub fn find_nearest_facility(model: &DistanceModel, customer: usize, genes: &[bool]) -> usize {
    let ranked = model.ranked_facilities(customer);
    ranked
        .iter()
        .copied()
        .find(|&facility| genes[facility])
        .unwrap_or_else(|| ranked[ranked.len() - 1])
}

/// Total demand-weighted distance from every customer to its serving facility.
pub fn evaluate(genes: &[bool], model: &DistanceModel) -> u64 {
    (0..model.customer_count())
        .map(|customer| {
            let facility = find_nearest_facility(model, customer, genes);
            model.distance(customer, facility) * model.demand(customer)
        })
        .sum()
}

pub fn assignments(model: &DistanceModel, genes: &[bool]) -> Vec<usize> {
    (0..model.customer_count())
        .map(|customer| find_nearest_facility(model, customer, genes))
        .collect()
}
