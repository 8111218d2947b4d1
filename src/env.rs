use std::{
    collections::{hash_map, HashMap},
    ops::Index,
};

/// The outcome of a single environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<S> {
    /// The state of the environment after the action was applied
    pub next_state: S,
    /// The reward received for the transition
    pub reward: f64,
    /// Whether the episode ended on this step
    pub done: bool,
}

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State: Clone;

    /// A representation of an action that an agent can take to affect the environment
    type Action: Clone;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Update the environment in response to an action taken by an agent
    fn step(&mut self, action: Self::Action) -> Step<Self::State>;

    /// Draw a uniformly random action
    fn random_action(&mut self) -> Self::Action;
}

/// Environments with a finite, enumerable state space
pub trait DiscreteStateSpace: Environment {
    /// Enumerate every state of the environment
    fn states(&self) -> Vec<Self::State>;
}

/// Environments with a finite, enumerable action space
pub trait DiscreteActionSpace: Environment {
    /// Enumerate every action available to an agent
    ///
    /// The returned vec should never be empty, instead specify an action that
    /// represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;
}

/// A possible transition out of a state-action pair, with its probability
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<S> {
    pub next_state: S,
    pub reward: f64,
    pub prob: f64,
}

/// Environments that can enumerate their full one-step transition model
///
/// Dynamic programming solvers require this; the online learners do not.
pub trait ExplicitDynamics: Environment {
    /// Enumerate every possible outcome of taking `action` in `state`
    ///
    /// The probabilities of the returned outcomes must sum to 1.
    fn dynamics(&self, state: Self::State, action: Self::Action) -> Vec<Outcome<Self::State>>;
}

/// A string-keyed accumulator for tracking quantities across an episode
#[derive(Debug, Clone, Default)]
pub struct Report(HashMap<&'static str, f64>);

impl Report {
    /// Initialize a report with the provided keys, all starting at zero
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self(keys.into_iter().map(|k| (k, 0.0)).collect())
    }

    /// Get a key's entry for in-place manipulation
    pub fn entry(&mut self, key: &'static str) -> hash_map::Entry<'_, &'static str, f64> {
        self.0.entry(key)
    }

    /// Zero every tracked quantity
    pub fn reset(&mut self) {
        self.0.values_mut().for_each(|v| *v = 0.0);
    }
}

impl Index<&str> for Report {
    type Output = f64;

    fn index(&self, key: &str) -> &f64 {
        &self.0[key]
    }
}
