//! Property-based tests for the complexity breakdown
//!
//! These tests verify invariants that should hold for all inputs:
//! - The total is the exact sum of the four modules
//! - Both Add & Norm entries are equal
//! - Costs never decrease when a hyperparameter grows
//! - Chart percentages add up to 100 within rounding

use flopmap::{compute_breakdown, BlockModule, Hyperparameters, PieChart};
use proptest::prelude::*;

/// Hyperparameters small enough that every formula fits in u64
fn hyperparameters() -> impl Strategy<Value = Hyperparameters> {
    (0u64..=8192, 0u64..=8192, 0u64..=16, 0u64..=128)
        .prop_map(|(l, d, k, h)| Hyperparameters::new(l, d, k, h))
}

fn costs(params: &Hyperparameters) -> Vec<u64> {
    let b = compute_breakdown(params).unwrap();
    let mut costs: Vec<u64> = b.iter().map(|m| m.cost).collect();
    costs.push(b.total());
    costs
}

/// Numeric value of a `12.3%` annotation
fn label_value(label: &str) -> f64 {
    label.trim_end_matches('%').parse().unwrap()
}

fn assert_not_smaller(before: &[u64], after: &[u64]) -> Result<(), TestCaseError> {
    for (b, a) in before.iter().zip(after) {
        prop_assert!(a >= b, "cost decreased from {} to {}", b, a);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_total_is_exact_sum(params in hyperparameters()) {
        let b = compute_breakdown(&params).unwrap();
        let sum: u64 = b.iter().map(|m| m.cost).sum();
        prop_assert_eq!(b.total(), sum);
    }

    #[test]
    fn prop_add_norm_entries_equal(params in hyperparameters()) {
        let b = compute_breakdown(&params).unwrap();
        prop_assert_eq!(b.get(BlockModule::AddNorm1), b.get(BlockModule::AddNorm2));
    }

    #[test]
    fn prop_fixed_module_order(params in hyperparameters()) {
        let b = compute_breakdown(&params).unwrap();
        let order: Vec<BlockModule> = b.iter().map(|m| m.module).collect();
        prop_assert_eq!(order, BlockModule::ALL.to_vec());
    }

    #[test]
    fn prop_monotonic_in_every_parameter(params in hyperparameters(), step in 1u64..64) {
        let before = costs(&params);
        let Hyperparameters { seq_len, hidden_dim, ffn_multiplier, num_heads } = params;

        assert_not_smaller(&before, &costs(&Hyperparameters::new(seq_len + step, hidden_dim, ffn_multiplier, num_heads)))?;
        assert_not_smaller(&before, &costs(&Hyperparameters::new(seq_len, hidden_dim + step, ffn_multiplier, num_heads)))?;
        assert_not_smaller(&before, &costs(&Hyperparameters::new(seq_len, hidden_dim, ffn_multiplier + step, num_heads)))?;
        assert_not_smaller(&before, &costs(&Hyperparameters::new(seq_len, hidden_dim, ffn_multiplier, num_heads + step)))?;
    }

    #[test]
    fn prop_zero_length_or_width_is_free(
        other in 0u64..=8192,
        k in 0u64..=16,
        h in 0u64..=128,
        zero_len in any::<bool>()
    ) {
        let params = if zero_len {
            Hyperparameters::new(0, other, k, h)
        } else {
            Hyperparameters::new(other, 0, k, h)
        };
        let b = compute_breakdown(&params).unwrap();
        // h·L² survives D=0, so only L=0 zeroes attention unconditionally
        if zero_len {
            prop_assert_eq!(b.total(), 0);
        } else {
            prop_assert_eq!(b.get(BlockModule::AddNorm1), 0);
            prop_assert_eq!(b.get(BlockModule::Ffn), 0);
        }
    }

    #[test]
    fn prop_chart_percentages_sum_to_hundred(params in hyperparameters()) {
        let b = compute_breakdown(&params).unwrap();
        prop_assume!(!b.is_empty());
        let chart = PieChart::from_breakdown(&b).unwrap();

        let exact: f64 = chart.slices.iter().map(|s| s.percentage()).sum();
        prop_assert!((exact - 100.0).abs() < 1e-9);

        let shown: f64 = chart.slices.iter().map(|s| label_value(&s.percentage_label())).sum();
        prop_assert!((shown - 100.0).abs() <= 0.2 + 1e-9, "label sum {}", shown);
    }
}
