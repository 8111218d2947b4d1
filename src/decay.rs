use crate::{Error, Result};

/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

fn validate(rate: f64, vi: f64, vf: f64) -> Result<()> {
    ((rate >= 0.0 && vi > vf) || (rate < 0.0 && vi < vf))
        .then_some(())
        .ok_or(Error::InvalidParameter {
            name: "rate",
            reason: "must have the same sign as `vi - vf`",
        })
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Exponential {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t).exp()
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Linear {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        (vi - rate * t).max(vf)
    }
}

/// v(t) = v<sub>i</sub> / sqrt(1 + t)
///
/// The visit-count step-size schedule of the online learners: evaluated at
/// the number of visits `n`, it yields the Robbins-Monro step `1/sqrt(1 + n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseSqrt {
    vi: f64,
}

impl InverseSqrt {
    pub fn new(vi: f64) -> Result<Self> {
        (vi > 0.0).then_some(Self { vi }).ok_or(Error::InvalidParameter {
            name: "vi",
            reason: "must be positive",
        })
    }
}

impl Default for InverseSqrt {
    fn default() -> Self {
        Self { vi: 1.0 }
    }
}

impl Decay for InverseSqrt {
    fn evaluate(&self, t: f64) -> f64 {
        self.vi / (1.0 + t).sqrt()
    }
}
