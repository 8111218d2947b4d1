/// Solvers: dynamic programming and online temporal-difference learners
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Inventory environments
pub mod gym;

/// Exact tabular models of environment dynamics
pub mod mdp;

/// Probabilistic models
pub mod prob;

mod util;

pub use error::{Error, Result};
