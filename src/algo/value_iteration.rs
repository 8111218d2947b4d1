use log::{debug, trace};
use nalgebra::DVector;

use crate::{mdp::TabularMdp, Error, Result};

use super::{greedy, Solution};

/// Stopping threshold that works well for stores of a few dozen states
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Compute an optimal policy as the fixed point of the Bellman optimality operator
///
/// Each sweep backs the value up through every action and keeps the greedy
/// maximum. Sweeps stop once the Euclidean norm of the value change drops to
/// `epsilon`; the operator is a `gamma`-contraction, so for `gamma < 1` this
/// always happens. `max_sweeps` bounds the loop anyway, since a discount
/// near 1 can push convergence past any practical budget.
pub fn value_iteration(
    mdp: &TabularMdp,
    gamma: f64,
    epsilon: f64,
    max_sweeps: u32,
) -> Result<Solution> {
    let mut value = DVector::zeros(mdp.num_states());

    for sweep in 1..=max_sweeps {
        let (policy, new_value) = greedy(mdp, &value, gamma);
        let delta = (&new_value - &value).norm();
        trace!("value iteration sweep {sweep}: delta = {delta:.3e}");
        value = new_value;

        if delta <= epsilon {
            debug!("value iteration converged after {sweep} sweeps");
            return Ok(Solution {
                policy,
                value,
                iterations: sweep,
            });
        }
    }

    Err(Error::NonConvergence(max_sweeps))
}
