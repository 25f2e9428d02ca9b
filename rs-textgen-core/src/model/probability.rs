use std::collections::HashMap;

use super::frequency::FrequencyTable;
use super::lexicon::Code;
use crate::error::{Result, TextGenError};

/// Conditional next-word distributions, one per observed context.
///
/// A context is every n-gram of the frequency table minus its last code;
/// order-1 n-grams have an empty context and contribute nothing.
/// Continuations are listed in the frequency table's key order.
///
/// ## Invariants
/// - every context has 1 to `N - 1` codes
/// - the probabilities of a context sum to 1
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbabilityModel {
	distributions: HashMap<Vec<Code>, Vec<(Code, f64)>>,
}

impl ProbabilityModel {
	/// Derives the distributions from `table` without modifying it.
	///
	/// Each continuation gets `count(context + next) / count(context)`, then
	/// each list is normalized (carried tails inflate context counts, see
	/// [`Trainer`](super::trainer::Trainer)).
	///
	/// # Errors
	/// `DegenerateContext` if a context is missing from the table or has a
	/// zero count. Only a hand-edited or corrupted table can trigger it.
	pub fn build(table: &FrequencyTable) -> Result<Self> {
		let mut distributions: HashMap<Vec<Code>, Vec<(Code, f64)>> = HashMap::new();

		for (ngram, count) in table.iter() {
			let Some((&next, context)) = ngram.split_last() else {
				continue;
			};
			if context.is_empty() {
				continue;
			}

			let context_count = table.count(context);
			if context_count == 0 {
				return Err(TextGenError::DegenerateContext(context.to_vec()));
			}

			distributions
				.entry(context.to_vec())
				.or_default()
				.push((next, count as f64 / context_count as f64));
		}

		for continuations in distributions.values_mut() {
			let total: f64 = continuations.iter().map(|(_, p)| p).sum();
			for (_, p) in continuations.iter_mut() {
				*p /= total;
			}
		}

		log::debug!("probability model built for {} contexts", distributions.len());
		Ok(Self { distributions })
	}

	/// Continuations of `context`, or `None` if it was never observed.
	pub fn distribution(&self, context: &[Code]) -> Option<&[(Code, f64)]> {
		self.distributions.get(context).map(Vec::as_slice)
	}

	/// Number of contexts.
	pub fn len(&self) -> usize {
		self.distributions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.distributions.is_empty()
	}

	pub fn contexts(&self) -> impl Iterator<Item = &[Code]> {
		self.distributions.keys().map(Vec::as_slice)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::model::tokenizer::Alphabet;
	use crate::model::trainer::Trainer;

	fn trained_table() -> FrequencyTable {
		let mut trainer = Trainer::new(&Config { order: 3, alphabet: Alphabet::Latin, lowercase: false }).unwrap();
		for line in ["a b a c a b", "b a", "c c a b"] {
			trainer.train(line);
		}
		trainer.frequencies().clone()
	}

	#[test]
	fn the_cat_sat() {
		// the=0 cat=1 sat=2
		let table = FrequencyTable::from_counts([
			(vec![0], 1),
			(vec![1], 1),
			(vec![2], 1),
			(vec![0, 1], 1),
			(vec![1, 2], 1),
		]);
		let model = ProbabilityModel::build(&table).unwrap();
		assert_eq!(model.len(), 2);
		assert_eq!(model.distribution(&[0]), Some(&[(1, 1.0)][..]));
		assert_eq!(model.distribution(&[1]), Some(&[(2, 1.0)][..]));
		assert_eq!(model.distribution(&[2]), None);
	}

	#[test]
	fn distributions_sum_to_one() {
		let model = ProbabilityModel::build(&trained_table()).unwrap();
		assert!(!model.is_empty());
		for context in model.contexts() {
			assert!(!context.is_empty() && context.len() < 3);
			let sum: f64 = model.distribution(context).unwrap().iter().map(|(_, p)| p).sum();
			assert!((sum - 1.0).abs() < 1e-9, "{context:?} sums to {sum}");
		}
	}

	#[test]
	fn conditional_probability_uses_context_count() {
		// (0) seen 4 times, followed by 1 three times and by 2 once.
		let table = FrequencyTable::from_counts([
			(vec![0], 4),
			(vec![1], 3),
			(vec![2], 1),
			(vec![0, 1], 3),
			(vec![0, 2], 1),
		]);
		let model = ProbabilityModel::build(&table).unwrap();
		assert_eq!(model.distribution(&[0]), Some(&[(1, 0.75), (2, 0.25)][..]));
	}

	#[test]
	fn rebuilding_is_idempotent() {
		let table = trained_table();
		let before = table.clone();
		let first = ProbabilityModel::build(&table).unwrap();
		let second = ProbabilityModel::build(&table).unwrap();
		assert_eq!(first, second);
		assert_eq!(table, before);
	}

	#[test]
	fn missing_context_is_degenerate() {
		let table = FrequencyTable::from_counts([(vec![1], 1), (vec![0, 1], 1)]);
		let err = ProbabilityModel::build(&table).unwrap_err();
		assert!(matches!(err, TextGenError::DegenerateContext(context) if context == vec![0]));
	}

	#[test]
	fn zero_context_count_is_degenerate() {
		let table = FrequencyTable::from_counts([(vec![0], 0), (vec![0, 0], 2)]);
		assert!(matches!(ProbabilityModel::build(&table), Err(TextGenError::DegenerateContext(_))));
	}
}
