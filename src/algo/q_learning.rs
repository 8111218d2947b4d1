use log::trace;
use nalgebra::DMatrix;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    assert_interval,
    decay::{self, Decay, InverseSqrt},
    env::{DiscreteActionSpace, Environment},
    exploration::{Choice, EpsilonGreedy},
    util::argmax,
};

/// Configuration for the [`QLearningAgent`]
pub struct QLearningConfig<D: Decay> {
    pub exploration: EpsilonGreedy<D>,
    pub gamma: f64,
}

impl Default for QLearningConfig<decay::Constant> {
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.3)),
            gamma: 0.99,
        }
    }
}

/// The greedy policy extracted from the table after a given number of steps
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySnapshot {
    pub step: u64,
    pub policy: Vec<usize>,
}

/// An off-policy Q-learning agent over a dense state-action table
///
/// Learns optimal action values from a single continuing trajectory with
/// epsilon-greedy exploration, never consulting an explicit model. Per-pair
/// visit counts drive the `1/sqrt(1 + N[s, a])` step-size schedule.
pub struct QLearningAgent<D: Decay> {
    q: DMatrix<f64>,
    visits: DMatrix<u64>,
    exploration: EpsilonGreedy<D>,
    step_size: InverseSqrt,
    gamma: f64,
    steps: u64,
    rng: StdRng,
}

impl<D: Decay> QLearningAgent<D> {
    /// Initialize an agent with table entries drawn uniformly from `[0, 1)`
    ///
    /// **Panics** if `config.gamma` is not in the interval `[0, 1]`
    pub fn new(num_states: usize, num_actions: usize, config: QLearningConfig<D>, seed: u64) -> Self {
        assert_interval!(config.gamma, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            q: DMatrix::from_fn(num_states, num_actions, |_, _| rng.gen::<f64>()),
            visits: DMatrix::zeros(num_states, num_actions),
            exploration: config.exploration,
            step_size: InverseSqrt::default(),
            gamma: config.gamma,
            steps: 0,
            rng,
        }
    }

    /// Choose an action for `state` per the exploration policy
    fn act<E>(&mut self, env: &mut E, state: usize) -> usize
    where
        E: Environment<State = usize, Action = usize> + DiscreteActionSpace,
    {
        match self.exploration.choose(self.steps as f64, &mut self.rng) {
            Choice::Explore => env.random_action(),
            Choice::Exploit => argmax(self.q.row(state).iter().copied()),
        }
    }

    /// Apply one off-policy update for an observed transition
    fn learn(&mut self, state: usize, action: usize, reward: f64, next_state: usize) {
        self.visits[(state, action)] += 1;
        let alpha = self.step_size.evaluate(self.visits[(state, action)] as f64);

        let max_next = self
            .q
            .row(next_state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let q = self.q[(state, action)];
        self.q[(state, action)] = q + alpha * (reward + self.gamma * max_next - q);
    }

    /// Run a single trajectory up to the last of `checkpoints`, recording
    /// the greedy policy each time the step count reaches one
    ///
    /// `checkpoints` must be sorted ascending; a checkpoint of 0 snapshots
    /// the table before any learning. Spacing the checkpoints exponentially
    /// makes the convergence of the greedy policy visible over horizons that
    /// differ by orders of magnitude.
    pub fn run_checkpoints<E>(&mut self, env: &mut E, checkpoints: &[u64]) -> Vec<PolicySnapshot>
    where
        E: Environment<State = usize, Action = usize> + DiscreteActionSpace,
    {
        debug_assert!(
            checkpoints.windows(2).all(|w| w[0] <= w[1]),
            "`checkpoints` must be sorted ascending"
        );

        let mut snapshots = Vec::with_capacity(checkpoints.len());
        let mut state = env.reset();
        let mut t = 0;

        for &checkpoint in checkpoints {
            while t < checkpoint {
                let action = self.act(env, state);
                let step = env.step(action);
                self.learn(state, action, step.reward, step.next_state);
                state = step.next_state;
                self.steps += 1;
                t += 1;
            }
            trace!("greedy policy snapshot at step {t}");
            snapshots.push(PolicySnapshot {
                step: checkpoint,
                policy: self.greedy_policy(),
            });
        }

        snapshots
    }

    /// Run a single trajectory of `steps` steps
    pub fn run<E>(&mut self, env: &mut E, steps: u64)
    where
        E: Environment<State = usize, Action = usize> + DiscreteActionSpace,
    {
        self.run_checkpoints(env, &[steps]);
    }

    /// The greedy policy with respect to the current table
    pub fn greedy_policy(&self) -> Vec<usize> {
        (0..self.q.nrows())
            .map(|s| argmax(self.q.row(s).iter().copied()))
            .collect()
    }

    /// Current action-value estimates, indexed `[(state, action)]`
    pub fn q_table(&self) -> &DMatrix<f64> {
        &self.q
    }
}
