use thiserror::Error;

/// Alias for results with the crate's [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by model construction and the exact solvers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter lies outside the range where the computation is defined
    #[error("invalid value for `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// The policy evaluation system has no unique solution
    #[error("policy evaluation system is singular")]
    SingularSystem,

    /// An iterative solver exhausted its sweep budget
    #[error("did not converge within {0} sweeps")]
    NonConvergence(u32),
}
