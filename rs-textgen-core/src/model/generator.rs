use std::fmt;
use std::path::Path;

use rand::Rng;

use super::artifact::ModelArtifact;
use super::frequency::FrequencyTable;
use super::lexicon::{Code, Lexicon, Reverse, TERMINATOR};
use super::probability::ProbabilityModel;
use super::sampling::weighted_choice;
use crate::error::{Result, TextGenError};

/// Non-fatal conditions met while generating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationWarning {
	/// The seed word is not in the lexicon; a random start was used instead.
	UnknownSeed(String),
}

impl fmt::Display for GenerationWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnknownSeed(word) => {
				write!(f, "'{word}' is an unknown word, generation started with a random seed")
			}
		}
	}
}

/// Output of one generation session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generated {
	/// Completed sentences, each capitalized and ending with a period.
	pub sentences: Vec<String>,
	pub warnings: Vec<GenerationWarning>,
}

/// High-level interface generating text from a trained model.
///
/// # Responsibilities
/// - Own the loaded frequency table and lexicon
/// - Derive the probability model once per load
/// - Run generation sessions: seeding, back-off extension, sentence assembly
///
/// The generator is read-only after construction; sessions only keep their
/// own buffer, so one generator can serve many sessions concurrently.
#[derive(Debug)]
pub struct Generator {
	order: usize,
	frequencies: FrequencyTable,
	lexicon: Lexicon,
	probabilities: ProbabilityModel,
}

impl Generator {
	/// Takes over a trained artifact and derives its probability model.
	///
	/// # Errors
	/// `DegenerateContext` if the frequency table is inconsistent.
	pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
		let (order, frequencies, lexicon) = artifact.into_parts();
		log::info!(
			"model loaded: order {order}, {} words, {} n-grams",
			lexicon.len(),
			frequencies.len()
		);
		let probabilities = ProbabilityModel::build(&frequencies)?;
		log::info!("model probabilities computed for {} contexts", probabilities.len());
		Ok(Self { order, frequencies, lexicon, probabilities })
	}

	/// Loads a stored artifact and prepares it for generation.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		Self::from_artifact(ModelArtifact::load(path)?)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn lexicon(&self) -> &Lexicon {
		&self.lexicon
	}

	pub fn probabilities(&self) -> &ProbabilityModel {
		&self.probabilities
	}

	/// Generates sentences until their total length reaches `target_length`
	/// characters, using the thread-local random generator.
	///
	/// See [`generate_with`](Self::generate_with).
	pub fn generate(&self, target_length: usize, seed: Option<&str>) -> Result<Generated> {
		self.generate_with(&mut rand::rng(), target_length, seed)
	}

	/// Generates sentences until their total length reaches `target_length`.
	///
	/// # Behavior
	/// - The first sentence starts with `seed` when the lexicon knows it.
	/// - Every other start, including an unknown seed, draws one n-gram key
	///   uniformly from the frequency table and uses all of its words.
	/// - A sentence grows until no context has a continuation or the text
	///   reaches the target length.
	/// - At least one sentence is always produced, even for a target of 0.
	///
	/// # Errors
	/// `EmptyModel` if the frequency table is empty.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, target_length: usize, seed: Option<&str>) -> Result<Generated> {
		if self.frequencies.is_empty() {
			return Err(TextGenError::EmptyModel);
		}

		let mut generated = Generated::default();
		let mut seed_code = match seed {
			None => None,
			Some(word) => {
				let code = self.lexicon.forward().code_of(word);
				if code.is_none() {
					let warning = GenerationWarning::UnknownSeed(word.to_owned());
					log::warn!("{warning}");
					generated.warnings.push(warning);
				}
				code
			}
		};

		log::info!("generating text with {target_length} symbols, started with {seed:?}");

		let reverse = self.lexicon.reverse();
		let mut emitted = 0;
		loop {
			let mut sentence = Sentence::default();
			match seed_code.take() {
				Some(code) => sentence.push(code, &reverse)?,
				None => self.random_start(&mut sentence, &reverse, rng)?,
			}

			while !sentence.is_terminated() && sentence.chars + emitted < target_length {
				self.add_word(&mut sentence, &reverse, rng)?;
			}

			let mut text = capitalize(&sentence.text);
			if !text.ends_with('.') {
				text.push('.');
			}
			emitted += text.chars().count();
			generated.sentences.push(text);

			if emitted >= target_length {
				break;
			}
		}

		log::info!("text generation ended: {} sentences, {emitted} symbols", generated.sentences.len());
		Ok(generated)
	}

	/// Appends every code of a uniformly drawn frequency-table key.
	fn random_start<R: Rng + ?Sized>(&self, sentence: &mut Sentence, reverse: &Reverse<'_>, rng: &mut R) -> Result<()> {
		let key = self.frequencies.random_key(rng).ok_or(TextGenError::EmptyModel)?;
		for &code in key {
			sentence.push(code, reverse)?;
		}
		Ok(())
	}

	/// Appends the next code, or [`TERMINATOR`] when no context continues.
	fn add_word<R: Rng + ?Sized>(&self, sentence: &mut Sentence, reverse: &Reverse<'_>, rng: &mut R) -> Result<()> {
		let next = self.next_code(&sentence.codes, rng).unwrap_or(TERMINATOR);
		sentence.push(next, reverse)
	}

	/// Samples a continuation of `buffer`, backing off to shorter contexts.
	///
	/// Tries the last `min(N, len)` codes first, then one code less each
	/// time, and stops at the first context that yields a continuation.
	pub(crate) fn next_code<R: Rng + ?Sized>(&self, buffer: &[Code], rng: &mut R) -> Option<Code> {
		let window = self.order.min(buffer.len());
		(1..=window).rev().find_map(|len| {
			let context = &buffer[buffer.len() - len..];
			let continuations = self.probabilities.distribution(context)?;
			weighted_choice(continuations, rng)
		})
	}
}

/// Sentence under construction.
///
/// The decoded text and its length in characters follow the codes word by
/// word; capitalization is applied once the sentence is complete.
#[derive(Debug, Default)]
struct Sentence {
	codes: Vec<Code>,
	text: String,
	chars: usize,
}

impl Sentence {
	/// Decodes `code` and appends it, space-separated, terminator included.
	fn push(&mut self, code: Code, reverse: &Reverse<'_>) -> Result<()> {
		let word = reverse.decode(code)?;
		if !self.codes.is_empty() {
			self.text.push(' ');
			self.chars += 1;
		}
		self.text.push_str(word);
		self.chars += word.chars().count();
		self.codes.push(code);
		Ok(())
	}

	fn is_terminated(&self) -> bool {
		self.codes.last() == Some(&TERMINATOR)
	}
}

/// Uppercases the first character, leaving the rest untouched.
fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
