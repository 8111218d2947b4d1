use rand::Rng;

use crate::decay::Decay;

/// Exploration policy result
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Invoke epsilon greedy policy at time `t`, drawing from the provided rng
    pub fn choose(&self, t: f64, rng: &mut impl Rng) -> Choice {
        if rng.gen::<f64>() > self.epsilon.evaluate(t) {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }
}
