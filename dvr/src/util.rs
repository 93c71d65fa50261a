use crate::framework::{Cost, INF};

/// Whether a cost names a reachable destination
pub fn is_finite(cost: Cost) -> bool {
    cost < INF
}

/// Adds two costs, only if both are finite and so is the result
///
/// # Arguments
///
/// * `cost_a`: First cost
/// * `cost_b`: Second cost
///
/// returns: Option<u32>
///
/// # Examples
///
/// ```
/// use dvr::framework::INF;
/// assert_eq!(dvr::util::sum_finite(3, 4), Some(7));
/// assert_eq!(dvr::util::sum_finite(3, INF), None);
/// assert_eq!(dvr::util::sum_finite(INF, INF), None);
/// assert_eq!(dvr::util::sum_finite(INF - 1, 1), None);
/// ```
pub fn sum_finite(cost_a: Cost, cost_b: Cost) -> Option<Cost> {
    if !is_finite(cost_a) || !is_finite(cost_b) {
        return None;
    }
    // both operands are below INF, so this stays well inside u32
    Some(cost_a + cost_b).filter(|sum| is_finite(*sum))
}

/// Like `sum_finite`, but saturates to INF
///
/// ```
/// use dvr::framework::INF;
/// assert_eq!(dvr::util::sum_inf(1, 2), 3);
/// assert_eq!(dvr::util::sum_inf(1, INF), INF);
/// ```
pub fn sum_inf(cost_a: Cost, cost_b: Cost) -> Cost {
    sum_finite(cost_a, cost_b).unwrap_or(INF)
}
