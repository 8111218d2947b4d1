use rand::{distributions::Distribution, Rng};

use crate::{Error, Result};

/// A demand distribution: a probability mass function over `{0..=max}` units
/// requested per step
#[derive(Debug, Clone)]
pub struct Demand {
    probs: Vec<f64>,
}

impl Demand {
    /// Geometric demand with parameter `q`, capped at `max`
    ///
    /// Entry `m < max` carries mass `q * (1 - q)^m`; the final entry absorbs
    /// the remaining tail so the masses sum to exactly 1.
    pub fn truncated_geometric(max: usize, q: f64) -> Result<Self> {
        if !(q > 0.0 && q < 1.0) {
            return Err(Error::InvalidParameter {
                name: "q",
                reason: "must lie in the open interval (0, 1)",
            });
        }

        let mut probs = (0..max)
            .map(|m| q * (1.0 - q).powi(m as i32))
            .collect::<Vec<_>>();
        probs.push(1.0 - probs.iter().sum::<f64>());

        Ok(Self { probs })
    }

    /// Demand with an explicit pmf
    ///
    /// `probs[m]` is the probability of `m` units being requested. The vec
    /// must be non-empty with non-negative entries summing to 1.
    pub fn from_probs(probs: Vec<f64>) -> Result<Self> {
        if probs.is_empty() || probs.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
            return Err(Error::InvalidParameter {
                name: "probs",
                reason: "entries must be probabilities in [0, 1]",
            });
        }
        if (probs.iter().sum::<f64>() - 1.0).abs() > 1e-9 {
            return Err(Error::InvalidParameter {
                name: "probs",
                reason: "entries must sum to 1",
            });
        }

        Ok(Self { probs })
    }

    /// The pmf over `{0..=max}`
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// The largest representable demand
    pub fn max(&self) -> usize {
        self.probs.len() - 1
    }
}

impl Distribution<usize> for Demand {
    /// Inverse-cdf draw: the smallest value whose cumulative mass exceeds a
    /// uniform variate
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u = rng.gen::<f64>();
        let mut cumulative = 0.0;
        for (m, p) in self.probs.iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                return m;
            }
        }
        self.probs.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::distribution::{Discrete, Geometric};

    use super::*;

    #[test]
    fn truncated_geometric_is_normalized() {
        for (max, q) in [(5, 0.3), (10, 0.05), (1, 0.9), (0, 0.5)] {
            let demand = Demand::truncated_geometric(max, q).unwrap();
            assert_eq!(demand.probs().len(), max + 1);
            assert!(demand.probs().iter().all(|&p| p >= 0.0), "Masses are non-negative");
            let total: f64 = demand.probs().iter().sum();
            assert!((total - 1.0).abs() < 1e-12, "Masses sum to 1, got {total}");
        }
    }

    #[test]
    fn truncated_geometric_matches_geometric_law() {
        let q = 0.3;
        let demand = Demand::truncated_geometric(6, q).unwrap();
        let geometric = Geometric::new(q).unwrap();

        // statrs counts trials to first success, so its support starts at 1
        for m in 0..6 {
            let expected = geometric.pmf(m as u64 + 1);
            assert!(
                (demand.probs()[m] - expected).abs() < 1e-12,
                "Untruncated entries follow q(1-q)^m"
            );
        }
        assert!(
            demand.probs()[6] > geometric.pmf(7),
            "Final entry absorbs the tail mass"
        );
    }

    #[test]
    fn truncated_geometric_rejects_bad_q() {
        for q in [0.0, 1.0, -0.5, 1.5] {
            assert!(
                matches!(
                    Demand::truncated_geometric(5, q),
                    Err(Error::InvalidParameter { name: "q", .. })
                ),
                "q = {q} is rejected"
            );
        }
    }

    #[test]
    fn from_probs_validates() {
        assert!(Demand::from_probs(vec![0.5, 0.5]).is_ok());
        assert!(Demand::from_probs(vec![]).is_err(), "Empty pmf is rejected");
        assert!(Demand::from_probs(vec![1.5, -0.5]).is_err(), "Negative mass is rejected");
        assert!(Demand::from_probs(vec![0.3, 0.3]).is_err(), "Unnormalized pmf is rejected");
    }

    #[test]
    fn sample_respects_support() {
        let mut rng = StdRng::seed_from_u64(17);

        let pinned = Demand::from_probs(vec![0.0, 0.0, 1.0]).unwrap();
        for _ in 0..100 {
            assert_eq!(pinned.sample(&mut rng), 2, "Point mass always samples its atom");
        }

        let demand = Demand::truncated_geometric(4, 0.4).unwrap();
        for _ in 0..1000 {
            assert!(demand.sample(&mut rng) <= 4, "Samples stay within the cap");
        }
    }

    #[test]
    fn sample_is_reproducible() {
        let demand = Demand::truncated_geometric(8, 0.25).unwrap();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50).map(|_| demand.sample(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(3), draw(3), "Same seed, same draws");
    }
}
