use nalgebra::{DMatrix, DVector};

use crate::{mdp::TabularMdp, Error, Result};

use super::Policy;

/// Exact discounted value of a fixed policy
///
/// Gathers the policy-induced kernel and reward vector from the model and
/// solves `(I - gamma * K_pi) V = r_pi` by LU decomposition. `gamma` below 1
/// keeps the system nonsingular, so the result is exact up to solver error.
pub fn evaluate_policy(
    mdp: &TabularMdp,
    policy: &impl Policy,
    gamma: f64,
) -> Result<DVector<f64>> {
    if !(0.0..1.0).contains(&gamma) {
        return Err(Error::InvalidParameter {
            name: "gamma",
            reason: "must lie in [0, 1) for exact evaluation",
        });
    }

    let (k_pi, r_pi) = mdp.policy_kernel(policy);
    let n = mdp.num_states();
    let system = DMatrix::identity(n, n) - gamma * k_pi;
    system.lu().solve(&r_pi).ok_or(Error::SingularSystem)
}

#[cfg(test)]
mod tests {
    use crate::{
        gym::{RetailStore, StoreConfig},
        mdp::TabularMdp,
        prob::Demand,
    };

    use super::super::FnPolicy;
    use super::*;

    fn store_mdp(capacity: usize) -> TabularMdp {
        let config = StoreConfig {
            capacity,
            ..StoreConfig::default()
        };
        let demand = Demand::truncated_geometric(capacity, 0.3).unwrap();
        TabularMdp::from_env(&RetailStore::seeded(config, demand, 0))
    }

    #[test]
    fn value_satisfies_bellman_equation() {
        let mdp = store_mdp(4);
        let gamma = 0.9;
        // Order back up to capacity every step
        let policy = FnPolicy(|s: usize| 4 - s);

        let value = evaluate_policy(&mdp, &policy, gamma).unwrap();
        let (k_pi, r_pi) = mdp.policy_kernel(&policy);
        let residual = (&r_pi + gamma * (k_pi * &value) - &value).norm();
        assert!(residual < 1e-10, "V = r + gamma K V, residual {residual:e}");
    }

    #[test]
    fn tabular_policies_work_too() {
        let mdp = store_mdp(3);
        let value = evaluate_policy(&mdp, &vec![3, 2, 1, 0], 0.8).unwrap();
        assert_eq!(value.len(), 4);
        assert!(value.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn zero_discount_reduces_to_immediate_reward() {
        let mdp = store_mdp(3);
        let policy = vec![0, 0, 0, 0];
        let value = evaluate_policy(&mdp, &policy, 0.0).unwrap();
        for s in 0..4 {
            assert!(
                (value[s] - mdp.avg_reward()[(s, 0)]).abs() < 1e-12,
                "With gamma 0 the value is the one-step reward"
            );
        }
    }

    #[test]
    fn rejects_undiscounted_evaluation() {
        let mdp = store_mdp(2);
        let policy = vec![0, 0, 0];
        for gamma in [1.0, 1.5, -0.1] {
            assert!(
                matches!(
                    evaluate_policy(&mdp, &policy, gamma),
                    Err(Error::InvalidParameter { name: "gamma", .. })
                ),
                "gamma = {gamma} is rejected"
            );
        }
    }
}
