use crate::error::ConfigError;
use crate::individual::count_open;
use rand::Rng;
use tracing::debug;

/// Random probes allowed per facility per unit of imbalance before the
/// deterministic fallback takes over.
pub const REPAIR_PROBE_FACTOR: usize = 32;

/// Opens or closes facilities until exactly `planned` are open, returning the
/// number of bits flipped.
///
/// Random positions are probed first; a probe only flips a bit that moves the
/// count toward `planned`. If the probe budget runs out, the lowest-index bits
/// still in the surplus state are toggled, so the call always terminates.
pub fn repair<R: Rng + ?Sized>(
    genes: &mut [bool],
    planned: usize,
    rng: &mut R,
) -> Result<usize, ConfigError> {
    let len = genes.len();
    if planned == 0 || planned > len {
        return Err(ConfigError::PlannedOutOfRange {
            planned,
            facilities: len,
        });
    }

    let mut open = count_open(genes);
    let mut flips = 0;
    let mut budget = REPAIR_PROBE_FACTOR * len * open.abs_diff(planned);

    while open != planned && budget > 0 {
        budget -= 1;
        let probe = rng.gen_range(0..len);
        if open > planned && genes[probe] {
            genes[probe] = false;
            open -= 1;
            flips += 1;
        } else if open < planned && !genes[probe] {
            genes[probe] = true;
            open += 1;
            flips += 1;
        }
    }

    if open != planned {
        debug!(open, planned, "repair probe budget exhausted, toggling lowest-index bits");
        let surplus = open > planned;
        for gene in genes.iter_mut() {
            if open == planned {
                break;
            }
            if *gene == surplus {
                *gene = !surplus;
                if surplus {
                    open -= 1;
                } else {
                    open += 1;
                }
                flips += 1;
            }
        }
    }

    debug_assert_eq!(count_open(genes), planned);
    Ok(flips)
}
