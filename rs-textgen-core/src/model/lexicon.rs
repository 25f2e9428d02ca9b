use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextGenError};

/// Integer code of a word in the lexicon.
pub type Code = u32;

/// Reserved end-of-sentence code. Never assigned to a word.
pub const TERMINATOR: Code = Code::MAX;

/// Text rendered for [`TERMINATOR`].
pub const TERMINATOR_TEXT: &str = ".";

/// Bidirectional mapping between words and compact integer codes.
///
/// Codes are handed out sequentially from 0 in the order words are first
/// seen, and never change afterwards.
///
/// ## Invariants
/// - `words[code]` is the word whose code is `code`
/// - `codes` is the exact inverse of `words` (no duplicate words)
///
/// Persisted as the ordered word list; the reverse index is rebuilt on load.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Lexicon {
	words: Vec<String>,
	codes: HashMap<String, Code>,
}

impl Lexicon {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Code of `word`, or `None` if it was never seen.
	pub fn code_of(&self, word: &str) -> Option<Code> {
		self.codes.get(word).copied()
	}

	/// Returns the code of `word`, assigning the next free code on first sight.
	///
	/// # Panics
	/// If every code below [`TERMINATOR`] is already assigned.
	pub fn ensure(&mut self, word: &str) -> Code {
		if let Some(code) = self.code_of(word) {
			return code;
		}
		let code = code_at(self.words.len()).expect("lexicon exhausted the code space");
		self.words.push(word.to_owned());
		self.codes.insert(word.to_owned(), code);
		code
	}

	/// Word for `code`; [`TERMINATOR`] decodes to `"."`.
	///
	/// # Errors
	/// `UnknownCode` if the code was never assigned.
	pub fn decode(&self, code: Code) -> Result<&str> {
		self.reverse().decode(code)
	}

	/// `true` if `code` is an assigned word code.
	pub fn contains_code(&self, code: Code) -> bool {
		(code as usize) < self.words.len()
	}

	/// Read-only word → code view.
	pub fn forward(&self) -> Forward<'_> {
		Forward { codes: &self.codes }
	}

	/// Read-only code → word view.
	pub fn reverse(&self) -> Reverse<'_> {
		Reverse { words: &self.words }
	}
}

/// Word → code lookups over a [`Lexicon`].
#[derive(Clone, Copy, Debug)]
pub struct Forward<'a> {
	codes: &'a HashMap<String, Code>,
}

impl Forward<'_> {
	pub fn code_of(&self, word: &str) -> Option<Code> {
		self.codes.get(word).copied()
	}
}

/// Code → word lookups over a [`Lexicon`].
#[derive(Clone, Copy, Debug)]
pub struct Reverse<'a> {
	words: &'a [String],
}

impl<'a> Reverse<'a> {
	pub fn decode(&self, code: Code) -> Result<&'a str> {
		if code == TERMINATOR {
			return Ok(TERMINATOR_TEXT);
		}
		self.words
			.get(code as usize)
			.map(String::as_str)
			.ok_or(TextGenError::UnknownCode(code))
	}
}

/// Code assigned to the word at `index`, if it stays below [`TERMINATOR`].
fn code_at(index: usize) -> Option<Code> {
	Code::try_from(index).ok().filter(|&code| code != TERMINATOR)
}

impl TryFrom<Vec<String>> for Lexicon {
	type Error = TextGenError;

	fn try_from(words: Vec<String>) -> Result<Self> {
		let mut codes = HashMap::with_capacity(words.len());
		for (index, word) in words.iter().enumerate() {
			let code = code_at(index).ok_or_else(|| TextGenError::Corrupt("lexicon too large".to_owned()))?;
			if codes.insert(word.clone(), code).is_some() {
				return Err(TextGenError::Corrupt(format!("duplicate lexicon word '{word}'")));
			}
		}
		Ok(Self { words, codes })
	}
}

impl From<Lexicon> for Vec<String> {
	fn from(lexicon: Lexicon) -> Self {
		lexicon.words
	}
}
