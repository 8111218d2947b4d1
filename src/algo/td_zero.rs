use nalgebra::DVector;
use rand::Rng;

use crate::{
    assert_interval,
    decay::{Decay, InverseSqrt},
    env::Environment,
};

use super::Policy;

/// On-policy TD(0) evaluation over a single continuing trajectory
///
/// Estimates the value of a fixed policy from sampled transitions alone,
/// never consulting an explicit model. Each state keeps a visit count and
/// its step size shrinks as `1/sqrt(1 + N[s])`, so the estimate converges to
/// the policy's true value only asymptotically; expect horizons in the
/// millions of steps for tight estimates.
pub struct TdZeroAgent {
    value: DVector<f64>,
    visits: Vec<u64>,
    step_size: InverseSqrt,
    gamma: f64,
}

impl TdZeroAgent {
    /// Initialize an agent with value estimates drawn uniformly from `[0, 1)`
    ///
    /// **Panics** if `gamma` is not in the interval `[0, 1]`
    pub fn new(num_states: usize, gamma: f64, rng: &mut impl Rng) -> Self {
        assert_interval!(gamma, 0.0, 1.0);
        Self {
            value: DVector::from_fn(num_states, |_, _| rng.gen::<f64>()),
            visits: vec![0; num_states],
            step_size: InverseSqrt::default(),
            gamma,
        }
    }

    /// Run one trajectory of `steps` steps under `policy`, updating the
    /// value estimate at every transition
    ///
    /// The trajectory starts wherever [`Environment::reset`] lands. Repeated
    /// calls keep refining the same estimates.
    pub fn go<E, P>(&mut self, env: &mut E, policy: &P, steps: u64)
    where
        E: Environment<State = usize, Action = usize>,
        P: Policy,
    {
        let mut state = env.reset();
        for _ in 0..steps {
            self.visits[state] += 1;
            let alpha = self.step_size.evaluate(self.visits[state] as f64);

            let step = env.step(policy.action(state));
            let target = step.reward + self.gamma * self.value[step.next_state];
            self.value[state] = (1.0 - alpha) * self.value[state] + alpha * target;

            state = step.next_state;
        }
    }

    /// Current value estimates
    pub fn value(&self) -> &DVector<f64> {
        &self.value
    }

    /// Times each state has been visited
    pub fn visits(&self) -> &[u64] {
        &self.visits
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        algo::evaluate_policy,
        gym::{RetailStore, StoreConfig},
        mdp::TabularMdp,
        prob::Demand,
    };

    use super::*;

    #[test]
    fn value_decays_to_zero_without_rewards() {
        // Zero demand, zero costs, and a never-order policy: every reward is
        // 0 and the state never moves, so the visited state's estimate must
        // shrink from its random initialization toward 0
        let config = StoreConfig {
            capacity: 2,
            holding_cost: 0.0,
            order_cost: 0.0,
            fixed_order_cost: 0.0,
            price: 1.0,
        };
        let demand = Demand::from_probs(vec![1.0, 0.0, 0.0]).unwrap();
        let mut env = RetailStore::seeded(config, demand, 5);

        let mut rng = StdRng::seed_from_u64(9);
        let mut agent = TdZeroAgent::new(3, 0.9, &mut rng);
        agent.go(&mut env, &vec![0, 0, 0], 10_000);

        let visited = agent
            .visits()
            .iter()
            .position(|&n| n > 0)
            .expect("Some state was visited");
        assert_eq!(agent.visits()[visited], 10_000, "The trajectory never leaves its start");
        assert!(
            agent.value()[visited].abs() < 1e-6,
            "Estimate contracts to the true value 0, got {}",
            agent.value()[visited]
        );
    }

    #[test]
    fn estimate_approaches_exact_evaluation() {
        let config = StoreConfig {
            capacity: 1,
            holding_cost: 0.1,
            order_cost: 0.2,
            fixed_order_cost: 0.0,
            price: 1.0,
        };
        let demand = Demand::truncated_geometric(1, 0.5).unwrap();
        let gamma = 0.5;
        // Always order one unit
        let policy = vec![1, 1];

        let mdp = TabularMdp::from_env(&RetailStore::seeded(config, demand.clone(), 0));
        let exact = evaluate_policy(&mdp, &policy, gamma).unwrap();

        let mut env = RetailStore::seeded(config, demand, 23);
        let mut rng = StdRng::seed_from_u64(41);
        let mut agent = TdZeroAgent::new(2, gamma, &mut rng);
        agent.go(&mut env, &policy, 300_000);

        for s in 0..2 {
            let error = (agent.value()[s] - exact[s]).abs();
            assert!(
                error < 0.15,
                "TD estimate for state {s} is near the exact value: |{} - {}| = {error}",
                agent.value()[s],
                exact[s]
            );
        }
    }

    #[test]
    #[should_panic(expected = "Invalid value for `gamma`")]
    fn rejects_out_of_range_gamma() {
        let mut rng = StdRng::seed_from_u64(0);
        TdZeroAgent::new(3, 1.5, &mut rng);
    }
}
