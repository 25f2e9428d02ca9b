use std::collections::BTreeMap;

use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use super::lexicon::Code;

/// Occurrence counts of n-grams of every order, keyed by lexicon codes.
///
/// Keys are kept ordered so that iteration, serialization and everything
/// derived from the table are reproducible.
///
/// ## Invariants
/// - every key has between 1 and `N` codes
/// - every stored count is >= 1
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	counts: BTreeMap<Vec<Code>, u64>,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `ngram`.
	pub fn increment(&mut self, ngram: &[Code]) {
		match self.counts.get_mut(ngram) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(ngram.to_vec(), 1);
			}
		}
	}

	/// Count of `ngram`, 0 if never seen.
	pub fn count(&self, ngram: &[Code]) -> u64 {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Number of distinct n-grams of all orders.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(ngram, count)` in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&[Code], u64)> {
		self.counts.iter().map(|(key, count)| (key.as_slice(), *count))
	}

	/// Longest key length stored in the table.
	pub fn max_order(&self) -> usize {
		self.counts.keys().map(Vec::len).max().unwrap_or(0)
	}

	/// Draws one key uniformly among all keys, whatever their order or count.
	///
	/// Returns `None` if the table is empty.
	pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&[Code]> {
		self.counts.keys().choose(rng).map(Vec::as_slice)
	}

	#[cfg(test)]
	pub(crate) fn from_counts(counts: impl IntoIterator<Item = (Vec<Code>, u64)>) -> Self {
		Self { counts: counts.into_iter().collect() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn increments_and_counts() {
		let mut table = FrequencyTable::new();
		table.increment(&[0, 1]);
		table.increment(&[0, 1]);
		table.increment(&[2]);
		assert_eq!(table.count(&[0, 1]), 2);
		assert_eq!(table.count(&[2]), 1);
		assert_eq!(table.count(&[1, 0]), 0);
		assert_eq!(table.len(), 2);
		assert_eq!(table.max_order(), 2);
	}

	#[test]
	fn random_key_covers_every_order() {
		let table = FrequencyTable::from_counts([(vec![0], 100), (vec![0, 1], 1), (vec![0, 1, 2], 1)]);
		let mut rng = StdRng::seed_from_u64(7);
		let mut seen = [false; 3];
		for _ in 0..200 {
			let key = table.random_key(&mut rng).unwrap();
			seen[key.len() - 1] = true;
		}
		assert_eq!(seen, [true; 3]);
	}

	#[test]
	fn random_key_on_empty_table() {
		let mut rng = StdRng::seed_from_u64(1);
		assert!(FrequencyTable::new().random_key(&mut rng).is_none());
	}
}
