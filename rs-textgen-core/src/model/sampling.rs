use rand::Rng;

/// Draws one item with probability proportional to its weight.
///
/// Weights are normalized to sum to exactly 1 before drawing, so lists whose
/// probabilities drifted away from 1 are still sampled correctly.
/// Non-positive and non-finite weights are never selected.
///
/// Returns `None` if no item has a positive weight.
pub fn weighted_choice<T: Copy, R: Rng + ?Sized>(choices: &[(T, f64)], rng: &mut R) -> Option<T> {
	let usable = |weight: f64| weight.is_finite() && weight > 0.0;
	let total: f64 = choices.iter().map(|(_, w)| *w).filter(|w| usable(*w)).sum();
	if total <= 0.0 || !total.is_finite() {
		return None;
	}

	let r: f64 = rng.random();
	let mut cumulative = 0.0;
	let mut fallback = None;
	for (item, weight) in choices.iter().filter(|(_, w)| usable(*w)) {
		cumulative += weight / total;
		if r < cumulative {
			return Some(*item);
		}
		fallback = Some(*item);
	}

	// Rounding left `cumulative` just under 1.
	fallback
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn single_choice_is_always_drawn() {
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..20 {
			assert_eq!(weighted_choice(&[('x', 0.3)], &mut rng), Some('x'));
		}
	}

	#[test]
	fn nothing_to_draw() {
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(weighted_choice::<u32, _>(&[], &mut rng), None);
		assert_eq!(weighted_choice(&[(1, 0.0), (2, -1.0), (3, f64::NAN)], &mut rng), None);
	}

	#[test]
	fn zero_weights_are_never_drawn() {
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..100 {
			assert_eq!(weighted_choice(&[(1, 0.0), (2, 0.5), (3, 0.0)], &mut rng), Some(2));
		}
	}

	#[test]
	fn frequencies_follow_weights() {
		let mut rng = StdRng::seed_from_u64(42);
		let choices = [(0usize, 0.1), (1, 0.3), (2, 0.6)];
		let mut hits = [0u32; 3];
		for _ in 0..10_000 {
			hits[weighted_choice(&choices, &mut rng).unwrap()] += 1;
		}
		assert!((800..1200).contains(&hits[0]), "{hits:?}");
		assert!((2700..3300).contains(&hits[1]), "{hits:?}");
		assert!((5700..6300).contains(&hits[2]), "{hits:?}");
	}

	#[test]
	fn same_seed_same_draws() {
		let choices = [("a", 1.0), ("b", 1.0), ("c", 1.0)];
		let draw = |seed| {
			let mut rng = StdRng::seed_from_u64(seed);
			(0..10).map(|_| weighted_choice(&choices, &mut rng).unwrap()).collect::<Vec<_>>()
		};
		assert_eq!(draw(5), draw(5));
	}
}
