use nalgebra::DVector;

use crate::{mdp::TabularMdp, util::argmax};

pub mod policy_evaluation;
pub mod policy_iteration;
pub mod q_learning;
pub mod td_zero;
pub mod value_iteration;

pub use policy_evaluation::evaluate_policy;
pub use policy_iteration::policy_iteration;
pub use q_learning::{PolicySnapshot, QLearningAgent, QLearningConfig};
pub use td_zero::TdZeroAgent;
pub use value_iteration::{value_iteration, DEFAULT_EPSILON};

/// A deterministic decision rule over an indexed state space
pub trait Policy {
    /// The action to take in `state`
    fn action(&self, state: usize) -> usize;
}

impl Policy for Vec<usize> {
    fn action(&self, state: usize) -> usize {
        self[state]
    }
}

/// Adapter for using a plain function as a [`Policy`]
pub struct FnPolicy<F: Fn(usize) -> usize>(pub F);

impl<F: Fn(usize) -> usize> Policy for FnPolicy<F> {
    fn action(&self, state: usize) -> usize {
        (self.0)(state)
    }
}

/// An optimal-control result: the policy, its value, and the sweeps it took
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub policy: Vec<usize>,
    pub value: DVector<f64>,
    pub iterations: u32,
}

/// One step of greedy policy improvement
///
/// Backs `value` up through every action and picks, per state, the action
/// with the largest backup, ties going to the lowest action index. Returns
/// the improved policy together with its backed-up value.
pub(crate) fn greedy(
    mdp: &TabularMdp,
    value: &DVector<f64>,
    gamma: f64,
) -> (Vec<usize>, DVector<f64>) {
    let q = mdp.q_values(value, gamma);
    let mut policy = Vec::with_capacity(mdp.num_states());
    let mut new_value = DVector::zeros(mdp.num_states());
    for s in 0..mdp.num_states() {
        let a = argmax(q.row(s).iter().copied());
        policy.push(a);
        new_value[s] = q[(s, a)];
    }
    (policy, new_value)
}
