use crate::error::ConfigError;
use crate::repair::repair;
use rand::Rng;

/// Last index copied from the first parent. Drawn from roughly the middle
/// 70% of the chromosome and capped so the second parent contributes at
/// least one position whenever `len >= 2`.
pub fn crossover_point<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    let len_f = len as f64;
    let point = (0.2 * len_f + rng.gen::<f64>() * 0.7 * len_f) as usize;
    point.min(len.saturating_sub(2))
}

/// Single-point crossover followed by cardinality repair.
///
/// The parents are swapped with probability one half so neither is favoured
/// for the prefix. The child takes positions `0..=k` from the first parent and
/// the rest from the second.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &[bool],
    parent_b: &[bool],
    planned: usize,
    rng: &mut R,
) -> Result<Vec<bool>, ConfigError> {
    if parent_a.len() != parent_b.len() {
        return Err(ConfigError::DimensionMismatch {
            what: "second parent".to_string(),
            expected: parent_a.len(),
            actual: parent_b.len(),
        });
    }

    let (first, second) = if rng.gen_bool(0.5) {
        (parent_b, parent_a)
    } else {
        (parent_a, parent_b)
    };

    let len = first.len();
    let split = (crossover_point(len, rng) + 1).min(len);

    let mut child = Vec::with_capacity(len);
    child.extend_from_slice(&first[..split]);
    child.extend_from_slice(&second[split..]);

    repair(&mut child, planned, rng)?;
    Ok(child)
}

/// Swaps two distinct positions with probability `rate`. Returns whether a
/// swap happened. A swap never changes the number of open facilities.
pub fn mutate<R: Rng + ?Sized>(genes: &mut [bool], rate: f64, rng: &mut R) -> bool {
    if genes.len() < 2 || !rng.gen_bool(rate) {
        return false;
    }

    let first = rng.gen_range(0..genes.len());
    let mut second = rng.gen_range(0..genes.len());
    while second == first {
        second = rng.gen_range(0..genes.len());
    }

    genes.swap(first, second);
    true
}
