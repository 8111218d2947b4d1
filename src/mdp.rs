use nalgebra::{DMatrix, DVector};

use crate::{
    algo::Policy,
    env::{DiscreteActionSpace, DiscreteStateSpace, ExplicitDynamics},
};

/// An exact tabular model of an environment's dynamics
///
/// Holds one row-stochastic transition matrix per action along with the
/// expected immediate reward of every state-action pair. The model is a pure
/// function of the environment's parameters: it is built once and every
/// dynamic programming solver only reads it.
pub struct TabularMdp {
    kernel: Vec<DMatrix<f64>>,
    avg_reward: DMatrix<f64>,
}

impl TabularMdp {
    /// Build the model by enumerating every outcome of every state-action pair
    ///
    /// States and actions must enumerate as `0..n`, which is what the
    /// tabular solvers index by.
    pub fn from_env<E>(env: &E) -> Self
    where
        E: ExplicitDynamics<State = usize, Action = usize> + DiscreteStateSpace + DiscreteActionSpace,
    {
        let states = env.states();
        let actions = env.actions();
        let mut kernel = vec![DMatrix::zeros(states.len(), states.len()); actions.len()];
        let mut avg_reward = DMatrix::zeros(states.len(), actions.len());

        for &s in &states {
            for &a in &actions {
                for outcome in env.dynamics(s, a) {
                    kernel[a][(s, outcome.next_state)] += outcome.prob;
                    avg_reward[(s, a)] += outcome.prob * outcome.reward;
                }
            }
        }

        Self { kernel, avg_reward }
    }

    pub fn num_states(&self) -> usize {
        self.avg_reward.nrows()
    }

    pub fn num_actions(&self) -> usize {
        self.avg_reward.ncols()
    }

    /// Transition probabilities under a fixed action, indexed `[(state, next_state)]`
    pub fn kernel(&self, action: usize) -> &DMatrix<f64> {
        &self.kernel[action]
    }

    /// Expected immediate rewards, indexed `[(state, action)]`
    pub fn avg_reward(&self) -> &DMatrix<f64> {
        &self.avg_reward
    }

    /// One Bellman backup of `value`: `Q[s, a] = avgR[s, a] + gamma * K_a[s, :] · value`
    pub fn q_values(&self, value: &DVector<f64>, gamma: f64) -> DMatrix<f64> {
        let mut q = DMatrix::zeros(self.num_states(), self.num_actions());
        for (a, k) in self.kernel.iter().enumerate() {
            let mut backup = k * value;
            backup *= gamma;
            backup += self.avg_reward.column(a);
            q.set_column(a, &backup);
        }
        q
    }

    /// The transition matrix and reward vector induced by following `policy`
    pub fn policy_kernel(&self, policy: &impl Policy) -> (DMatrix<f64>, DVector<f64>) {
        let n = self.num_states();
        let mut k_pi = DMatrix::zeros(n, n);
        let mut r_pi = DVector::zeros(n);
        for s in 0..n {
            let a = policy.action(s);
            k_pi.set_row(s, &self.kernel[a].row(s));
            r_pi[s] = self.avg_reward[(s, a)];
        }
        (k_pi, r_pi)
    }
}
