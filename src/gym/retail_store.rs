use rand::{distributions::Distribution, rngs::StdRng, Rng, SeedableRng};

use crate::{
    env::{
        DiscreteActionSpace, DiscreteStateSpace, Environment, ExplicitDynamics, Outcome, Report,
        Step,
    },
    prob::Demand,
};

/// Parameters of a [`RetailStore`]
///
/// One immutable record shared by the environment and the model builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreConfig {
    /// Shelf capacity; stock, orders, and demand all live in `[0, capacity]`
    pub capacity: usize,
    /// Cost of keeping one unit in stock for one step
    pub holding_cost: f64,
    /// Cost of ordering one unit
    pub order_cost: f64,
    /// Fixed cost incurred by any non-empty order
    pub fixed_order_cost: f64,
    /// Revenue from selling one unit
    pub price: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            holding_cost: 0.1,
            order_cost: 0.5,
            fixed_order_cost: 0.2,
            price: 1.0,
        }
    }
}

/// Apply one demand realization to the store
///
/// Orders beyond free shelf space saturate at `capacity` rather than being
/// rejected, and unmet demand is lost.
fn transition(config: &StoreConfig, stock: usize, action: usize, demand: usize) -> (usize, f64) {
    let stocked = (stock + action).min(config.capacity);
    let sold = demand.min(stocked);

    let mut reward = config.price * sold as f64
        - config.order_cost * action as f64
        - config.holding_cost * stock as f64;
    if action > 0 {
        reward -= config.fixed_order_cost;
    }

    (stocked - sold, reward)
}

/// A single-store inventory control environment
///
/// The state is the scalar stock level. Each step the agent orders some
/// number of units, one demand is drawn, and the store sells what it can.
/// The task is continuing: `done` is never set, the caller owns the horizon.
pub struct RetailStore {
    config: StoreConfig,
    demand: Demand,
    stock: usize,
    rng: StdRng,
    pub report: Report,
}

impl RetailStore {
    /// Initialize a store with entropy-seeded randomness
    pub fn new(config: StoreConfig, demand: Demand) -> Self {
        Self::seeded(config, demand, rand::random())
    }

    /// Initialize a store with a fixed seed, making every trajectory reproducible
    ///
    /// **Panics** if the demand support does not match the store capacity
    pub fn seeded(config: StoreConfig, demand: Demand, seed: u64) -> Self {
        assert_eq!(
            demand.max(),
            config.capacity,
            "Demand must be supported on [0, capacity]"
        );
        Self {
            config,
            demand,
            stock: 0,
            rng: StdRng::seed_from_u64(seed),
            report: Report::new(vec!["reward", "steps"]),
        }
    }

    /// Reset to a chosen stock level instead of a random one
    ///
    /// **Returns** the state
    pub fn reset_to(&mut self, stock: usize) -> usize {
        self.stock = stock.min(self.config.capacity);
        self.report.reset();
        self.stock
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current stock level
    pub fn stock(&self) -> usize {
        self.stock
    }
}

impl Environment for RetailStore {
    type State = usize;
    type Action = usize;

    fn reset(&mut self) -> usize {
        let stock = self.rng.gen_range(0..=self.config.capacity);
        self.reset_to(stock)
    }

    fn step(&mut self, action: usize) -> Step<usize> {
        let demand = self.demand.sample(&mut self.rng);
        let (next_stock, reward) = transition(&self.config, self.stock, action, demand);
        self.stock = next_stock;

        self.report.entry("reward").and_modify(|x| *x += reward);
        self.report.entry("steps").and_modify(|x| *x += 1.0);

        Step {
            next_state: next_stock,
            reward,
            done: false,
        }
    }

    fn random_action(&mut self) -> usize {
        self.rng.gen_range(0..=self.config.capacity)
    }
}

impl DiscreteStateSpace for RetailStore {
    fn states(&self) -> Vec<usize> {
        (0..=self.config.capacity).collect()
    }
}

impl DiscreteActionSpace for RetailStore {
    fn actions(&self) -> Vec<usize> {
        (0..=self.config.capacity).collect()
    }
}

impl ExplicitDynamics for RetailStore {
    fn dynamics(&self, state: usize, action: usize) -> Vec<Outcome<usize>> {
        self.demand
            .probs()
            .iter()
            .enumerate()
            .map(|(demand, &prob)| {
                let (next_state, reward) = transition(&self.config, state, action, demand);
                Outcome {
                    next_state,
                    reward,
                    prob,
                }
            })
            .collect()
    }
}
