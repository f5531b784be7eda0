//! Winning-index selection
//!
//! One spin consumes one draw (two in win-bias mode) and maps it to one
//! index. Three modes: weighted (inverse-CDF walk over the weight vector),
//! uniform, and an optional two-stage win-bias draw over the prize/blank
//! partition.

use rand::Rng;

use super::items::{self, Item};
use crate::error::WheelError;
use crate::settings::WheelConfig;

/// Pick the winning index for one spin.
///
/// Validates the item set, then draws from the injected RNG according to the
/// configured mode. Pure aside from advancing the RNG.
pub fn select_winner<R: Rng + ?Sized>(
    items: &[Item],
    config: &WheelConfig,
    rng: &mut R,
) -> Result<usize, WheelError> {
    items::validate_items(items)?;

    if let Some(bias) = config.effective_win_bias() {
        if let Some(index) = biased_pick(items, config.weighted_mode, bias, rng) {
            return Ok(index);
        }
    }

    Ok(draw_index(items, config.weighted_mode, rng))
}

/// Single-stage draw over the whole item set. Items must be validated.
fn draw_index<R: Rng + ?Sized>(items: &[Item], weighted: bool, rng: &mut R) -> usize {
    if weighted {
        let total = items::total_weight(items);
        pick_by_cumulative(items, rng.random_range(0.0..total))
    } else {
        index_from_unit(items.len(), rng.random::<f64>())
    }
}

/// Walk the cumulative weights until the draw is covered.
///
/// The first item whose cumulative weight reaches `draw` wins; a draw landing
/// exactly on a boundary belongs to the earlier item. Falls back to the last
/// index if float accumulation comes up short of the total. Items must be
/// non-empty.
pub fn pick_by_cumulative(items: &[Item], draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, item) in items.iter().enumerate() {
        cumulative += item.weight;
        if draw <= cumulative {
            return index;
        }
    }
    items.len() - 1
}

/// Map a unit draw in [0, 1) to an index. Clamped so a draw of exactly 1.0
/// cannot index past the end. `len` must be non-zero.
pub fn index_from_unit(len: usize, unit: f64) -> usize {
    ((unit * len as f64) as usize).min(len - 1)
}

/// Two-stage win-bias draw over the prize/blank partition.
///
/// Rolls percent against `bias` to choose the prize (`blank == false`) or the
/// blank pool, then runs the configured draw within that pool. Returns `None`
/// without consuming the RNG when the wheel has no split (all prizes or all
/// blanks); the caller then falls back to the single-stage draw.
fn biased_pick<R: Rng + ?Sized>(
    items: &[Item],
    weighted: bool,
    bias: f64,
    rng: &mut R,
) -> Option<usize> {
    let prizes: Vec<usize> = (0..items.len()).filter(|&i| !items[i].blank).collect();
    if prizes.is_empty() || prizes.len() == items.len() {
        return None;
    }

    let pool: Vec<usize> = if rng.random_range(0.0..100.0) < bias {
        prizes
    } else {
        (0..items.len()).filter(|&i| items[i].blank).collect()
    };
    Some(pick_in_pool(items, &pool, weighted, rng))
}

/// Draw within a pool of wheel indices, weighted or uniform. Pool must be
/// non-empty with valid weights.
fn pick_in_pool<R: Rng + ?Sized>(
    items: &[Item],
    pool: &[usize],
    weighted: bool,
    rng: &mut R,
) -> usize {
    if weighted {
        let total: f64 = pool.iter().map(|&i| items[i].weight).sum();
        let draw = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for &index in pool {
            cumulative += items[index].weight;
            if draw <= cumulative {
                return index;
            }
        }
        pool[pool.len() - 1]
    } else {
        pool[index_from_unit(pool.len(), rng.random::<f64>())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn even_items() -> Vec<Item> {
        vec![
            Item::new("A", 25.0),
            Item::new("B", 25.0),
            Item::new("C", 25.0),
            Item::new("D", 25.0),
        ]
    }

    #[test]
    fn test_cumulative_walk_worked_example() {
        // Cumulative sums 25, 50, 75, 100
        let items = even_items();
        assert_eq!(pick_by_cumulative(&items, 0.1), 0);
        assert_eq!(pick_by_cumulative(&items, 25.0), 0); // boundary belongs to the earlier item
        assert_eq!(pick_by_cumulative(&items, 25.1), 1);
        assert_eq!(pick_by_cumulative(&items, 99.9), 3);
    }

    #[test]
    fn test_cumulative_walk_shortfall_falls_back_to_last() {
        let items = even_items();
        assert_eq!(pick_by_cumulative(&items, 100.5), 3);
    }

    #[test]
    fn test_index_from_unit() {
        assert_eq!(index_from_unit(4, 0.0), 0);
        assert_eq!(index_from_unit(4, 0.1), 0);
        assert_eq!(index_from_unit(4, 0.25), 1);
        assert_eq!(index_from_unit(4, 0.999), 3);
        assert_eq!(index_from_unit(4, 1.0), 3); // clamped
        assert_eq!(index_from_unit(1, 0.7), 0);
    }

    #[test]
    fn test_select_winner_rejects_empty() {
        let mut rng = Pcg32::seed_from_u64(1);
        let result = select_winner(&[], &WheelConfig::default(), &mut rng);
        assert_eq!(result, Err(WheelError::EmptyWheel));
    }

    #[test]
    fn test_select_winner_rejects_bad_weight() {
        let mut rng = Pcg32::seed_from_u64(1);
        let items = vec![Item::new("A", 25.0), Item::new("B", 0.0)];
        let result = select_winner(&items, &WheelConfig::default(), &mut rng);
        assert!(matches!(result, Err(WheelError::InvalidWeight { .. })));
    }

    #[test]
    fn test_select_winner_rejects_overflowing_total() {
        // Each weight passes on its own; the sum does not
        let mut rng = Pcg32::seed_from_u64(1);
        let items = vec![Item::new("A", 1.0e308), Item::new("B", 1.0e308)];
        let result = select_winner(&items, &WheelConfig::default(), &mut rng);
        assert!(matches!(result, Err(WheelError::WeightOverflow { .. })));
    }

    #[test]
    fn test_select_winner_in_range_both_modes() {
        let items = even_items();
        for weighted in [true, false] {
            let config = WheelConfig {
                weighted_mode: weighted,
                ..WheelConfig::default()
            };
            let mut rng = Pcg32::seed_from_u64(7);
            for _ in 0..1000 {
                let winner = select_winner(&items, &config, &mut rng).unwrap();
                assert!(winner < items.len());
            }
        }
    }

    #[test]
    fn test_weighted_distribution_matches_weights() {
        let items = vec![
            Item::new("A", 10.0),
            Item::new("B", 20.0),
            Item::new("C", 70.0),
        ];
        let config = WheelConfig::default();
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut counts = [0usize; 3];
        let samples = 100_000;
        for _ in 0..samples {
            counts[select_winner(&items, &config, &mut rng).unwrap()] += 1;
        }
        let expected = [0.10, 0.20, 0.70];
        for (count, want) in counts.iter().zip(expected) {
            let freq = *count as f64 / samples as f64;
            assert!(
                (freq - want).abs() < 0.01,
                "frequency {:.4} too far from {:.2}",
                freq,
                want
            );
        }
    }

    #[test]
    fn test_uniform_distribution_is_even() {
        let items = even_items();
        let config = WheelConfig {
            weighted_mode: false,
            ..WheelConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(99);
        let mut counts = [0usize; 4];
        let samples = 40_000;
        for _ in 0..samples {
            counts[select_winner(&items, &config, &mut rng).unwrap()] += 1;
        }
        for count in counts {
            let freq = count as f64 / samples as f64;
            assert!((freq - 0.25).abs() < 0.02, "frequency {:.4} not near 0.25", freq);
        }
    }

    #[test]
    fn test_bias_ignored_without_blank_split() {
        // All-prize wheel: the bias stage must not run or consume randomness
        let items = even_items();
        let unbiased = WheelConfig::default();
        let biased = WheelConfig {
            win_bias: Some(80.0),
            ..WheelConfig::default()
        };

        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let a = select_winner(&items, &unbiased, &mut rng_a).unwrap();
            let b = select_winner(&items, &biased, &mut rng_b).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_bias_extremes_pin_the_pool() {
        let items = vec![
            Item::new("Prize", 25.0),
            Item::blank("Try again", 25.0),
            Item::new("Jackpot", 50.0),
        ];
        let always_win = WheelConfig {
            win_bias: Some(100.0),
            ..WheelConfig::default()
        };
        let never_win = WheelConfig {
            win_bias: Some(0.0),
            ..WheelConfig::default()
        };

        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            let winner = select_winner(&items, &always_win, &mut rng).unwrap();
            assert!(!items[winner].blank);
        }
        for _ in 0..500 {
            let winner = select_winner(&items, &never_win, &mut rng).unwrap();
            assert!(items[winner].blank);
        }
    }

    #[test]
    fn test_bias_controls_blank_frequency() {
        // 75% prize bias over a half-blank wheel: blanks land ~25% of spins
        let items = vec![Item::new("Prize", 50.0), Item::blank("Try again", 50.0)];
        let config = WheelConfig {
            win_bias: Some(75.0),
            ..WheelConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(31);
        let samples = 20_000;
        let mut blanks = 0usize;
        for _ in 0..samples {
            if items[select_winner(&items, &config, &mut rng).unwrap()].blank {
                blanks += 1;
            }
        }
        let freq = blanks as f64 / samples as f64;
        assert!((freq - 0.25).abs() < 0.02, "blank frequency {:.4}", freq);
    }

    proptest! {
        #[test]
        fn prop_winner_always_in_range(
            weights in prop::collection::vec(0.001f64..1000.0, 1..32),
            seed in any::<u64>(),
            weighted in any::<bool>(),
        ) {
            let items: Vec<Item> = weights
                .iter()
                .enumerate()
                .map(|(i, &w)| Item::new(format!("item {}", i), w))
                .collect();
            let config = WheelConfig { weighted_mode: weighted, ..WheelConfig::default() };
            let mut rng = Pcg32::seed_from_u64(seed);
            let winner = select_winner(&items, &config, &mut rng).unwrap();
            prop_assert!(winner < items.len());
        }

        #[test]
        fn prop_extreme_weights_never_panic(
            weights in prop::collection::vec(1.0e300f64..1.0e308, 2..8),
            seed in any::<u64>(),
            weighted in any::<bool>(),
        ) {
            // Totals straddle f64::MAX: either a normal in-range draw or a
            // clean overflow rejection
            let items: Vec<Item> = weights
                .iter()
                .enumerate()
                .map(|(i, &w)| Item::new(format!("item {}", i), w))
                .collect();
            let config = WheelConfig { weighted_mode: weighted, ..WheelConfig::default() };
            let mut rng = Pcg32::seed_from_u64(seed);
            match select_winner(&items, &config, &mut rng) {
                Ok(winner) => prop_assert!(winner < items.len()),
                Err(err) => prop_assert_eq!(
                    err,
                    WheelError::WeightOverflow { total: f64::INFINITY }
                ),
            }
        }
    }
}
