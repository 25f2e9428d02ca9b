use std::collections::VecDeque;

use super::artifact::ModelArtifact;
use super::frequency::FrequencyTable;
use super::lexicon::{Code, Lexicon};
use super::tokenizer::Tokenizer;
use crate::config::Config;
use crate::error::Result;

/// Builds the context buffer for the next line.
///
/// Drops tokens from the front of `buffer` until fewer than `order` remain,
/// then appends `tokens`. The carried tail lets n-grams span line breaks.
pub fn extend_context(mut buffer: VecDeque<String>, tokens: Vec<String>, order: usize) -> VecDeque<String> {
	while buffer.len() >= order {
		buffer.pop_front();
	}
	buffer.extend(tokens);
	buffer
}

/// Accumulates n-gram counts from a stream of lines.
///
/// Lines must be fed in arrival order: each call depends on the context
/// buffer left by the previous one.
///
/// # Notes
/// The buffer is trimmed lazily at the start of the next call, so n-grams
/// lying entirely inside the carried tail are counted once more on that
/// call.
#[derive(Debug)]
pub struct Trainer {
	order: usize,
	lowercase: bool,
	tokenizer: Tokenizer,
	lexicon: Lexicon,
	frequencies: FrequencyTable,
	buffer: VecDeque<String>,
}

impl Trainer {
	/// Creates an empty trainer for n-grams up to `config.order`.
	///
	/// # Errors
	/// `InvalidConfig` if the configuration does not validate.
	pub fn new(config: &Config) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			order: config.order,
			lowercase: config.lowercase,
			tokenizer: Tokenizer::new(config.alphabet.clone()),
			lexicon: Lexicon::new(),
			frequencies: FrequencyTable::new(),
			buffer: VecDeque::new(),
		})
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn lexicon(&self) -> &Lexicon {
		&self.lexicon
	}

	pub fn frequencies(&self) -> &FrequencyTable {
		&self.frequencies
	}

	/// Tokens carried over to the next call.
	pub fn context(&self) -> &VecDeque<String> {
		&self.buffer
	}

	/// Counts every n-gram of order 1..=N in the carried context plus `line`.
	///
	/// The line is lowercased first when the configuration asks for it.
	pub fn train(&mut self, line: &str) {
		let tokens = if self.lowercase {
			self.tokenizer.tokenize(&line.to_lowercase())
		} else {
			self.tokenizer.tokenize(line)
		};
		self.buffer = extend_context(std::mem::take(&mut self.buffer), tokens, self.order);

		let codes: Vec<Code> = self.buffer.iter().map(|word| self.lexicon.ensure(word)).collect();

		for k in 1..=self.order.min(codes.len()) {
			for window in codes.windows(k) {
				self.frequencies.increment(window);
			}
		}
	}

	/// Snapshot of the trained state, ready to be persisted.
	pub fn artifact(&self) -> ModelArtifact {
		ModelArtifact::new(self.order, self.frequencies.clone(), self.lexicon.clone())
	}

	/// Consumes the trainer and hands its state over.
	pub fn into_artifact(self) -> ModelArtifact {
		ModelArtifact::new(self.order, self.frequencies, self.lexicon)
	}
}
