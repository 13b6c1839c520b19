//! Accept/reject decision for one observed card.

use crate::automation::config::Target;
use crate::error::ConfigError;

/// Result of comparing an observed card against a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Accept { premium_pct: f64, max_price: f64 },
    PriceTooHigh { premium_pct: f64, max_price: f64 },
    NameMismatch,
}

impl Decision {
    #[cfg(test)]
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept { .. })
    }
}

/// Decides whether `observed_name` at `observed_price` should be bought.
///
/// A price below ideal is always accepted, otherwise the price must stay
/// under `ideal + ideal * tolerance`.
pub fn evaluate(
    observed_name: &str,
    observed_price: u64,
    target: &Target,
) -> Result<Decision, ConfigError> {
    if !target.accepts_name(observed_name) {
        return Ok(Decision::NameMismatch);
    }

    if target.ideal_price.is_nan() || target.ideal_price <= 0.0 {
        return Err(ConfigError::NonPositiveIdealPrice {
            name: target.label(),
            ideal_price: target.ideal_price,
        });
    }

    let price = observed_price as f64;
    let premium_pct = (price / target.ideal_price - 1.0) * 100.0;
    // Summed form keeps 100 + 100 * 0.1 at exactly 110.0
    let max_price = target.ideal_price + target.ideal_price * target.floating_tolerance;

    if premium_pct < 0.0 || price < max_price {
        Ok(Decision::Accept {
            premium_pct,
            max_price,
        })
    } else {
        Ok(Decision::PriceTooHigh {
            premium_pct,
            max_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(ideal_price: f64, tolerance: f64) -> Target {
        Target {
            id: 0,
            names: vec!["东区钥匙".to_string(), "RedKey".to_string()],
            ideal_price,
            floating_tolerance: tolerance,
            position: None,
            want_buy: true,
        }
    }

    fn premium(decision: Decision) -> f64 {
        match decision {
            Decision::Accept { premium_pct, .. } | Decision::PriceTooHigh { premium_pct, .. } => {
                premium_pct
            }
            Decision::NameMismatch => panic!("expected a priced decision"),
        }
    }

    #[test]
    fn test_price_table() {
        let cases = [(90, true, -10.0), (105, true, 5.0), (115, false, 15.0)];
        for (price, accept, expected_premium) in cases {
            let decision = evaluate("东区钥匙", price, &target(100.0, 0.1)).unwrap();
            assert_eq!(decision.is_accept(), accept, "price {}", price);
            assert!((premium(decision) - expected_premium).abs() < 1e-9);
        }
    }

    #[test]
    fn test_price_at_max_is_rejected() {
        let decision = evaluate("RedKey", 110, &target(100.0, 0.1)).unwrap();
        match decision {
            Decision::PriceTooHigh { max_price, .. } => {
                assert!((max_price - 110.0).abs() < 1e-9)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_ceiling_boundary_is_exact() {
        let t = target(100.0, 0.1);
        assert!(evaluate("RedKey", 109, &t).unwrap().is_accept());
        assert!(!evaluate("RedKey", 110, &t).unwrap().is_accept());

        let t = target(1000.0, 0.3);
        assert!(evaluate("RedKey", 1299, &t).unwrap().is_accept());
        assert!(!evaluate("RedKey", 1300, &t).unwrap().is_accept());
    }

    #[test]
    fn test_below_ideal_accepted_even_with_negative_tolerance() {
        let decision = evaluate("RedKey", 95, &target(100.0, -0.5)).unwrap();
        assert!(decision.is_accept());
    }

    #[test]
    fn test_name_mismatch_ignores_price() {
        let decision = evaluate("BlueKey", 1, &target(100.0, 0.1)).unwrap();
        assert_eq!(decision, Decision::NameMismatch);
    }

    #[test]
    fn test_observed_name_whitespace_is_ignored() {
        let decision = evaluate("东区 钥匙", 90, &target(100.0, 0.1)).unwrap();
        assert!(decision.is_accept());
    }

    #[test]
    fn test_non_positive_ideal_price() {
        for ideal in [0.0, -5.0, f64::NAN] {
            let err = evaluate("RedKey", 10, &target(ideal, 0.1)).unwrap_err();
            assert!(matches!(err, ConfigError::NonPositiveIdealPrice { .. }));
        }
    }
}
