use log::debug;

use crate::{mdp::TabularMdp, Error, Result};

use super::{evaluate_policy, greedy, Solution};

/// Compute an optimal policy by alternating exact evaluation with greedy improvement
///
/// Starts from the never-order policy and stops as soon as an improvement
/// sweep leaves the policy unchanged. Each round strictly improves the value
/// unless the policy is already optimal, and the policy space is finite, so
/// termination is guaranteed; `max_rounds` guards the loop regardless.
pub fn policy_iteration(mdp: &TabularMdp, gamma: f64, max_rounds: u32) -> Result<Solution> {
    let mut policy = vec![0; mdp.num_states()];

    for round in 1..=max_rounds {
        let value = evaluate_policy(mdp, &policy, gamma)?;
        let (new_policy, _) = greedy(mdp, &value, gamma);

        if new_policy == policy {
            debug!("policy stable after {round} rounds");
            return Ok(Solution {
                policy,
                value,
                iterations: round,
            });
        }
        policy = new_policy;
    }

    Err(Error::NonConvergence(max_rounds))
}
