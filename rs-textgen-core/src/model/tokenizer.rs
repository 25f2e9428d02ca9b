use serde::{Deserialize, Serialize};

/// Set of characters a word may be made of.
///
/// Everything outside the alphabet (digits, punctuation, foreign scripts)
/// is dropped before a line is split into words.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
	/// Russian letters, including `Ё`/`ё` and the hard sign.
	#[default]
	Cyrillic,
	/// ASCII letters.
	Latin,
	/// Any character Unicode considers alphabetic.
	Unicode,
	/// Exactly the listed characters.
	Custom(String),
}

impl Alphabet {
	pub fn contains(&self, c: char) -> bool {
		match self {
			Self::Cyrillic => matches!(c, 'А'..='я' | 'Ё' | 'ё'),
			Self::Latin => c.is_ascii_alphabetic(),
			Self::Unicode => c.is_alphabetic(),
			Self::Custom(chars) => chars.contains(c),
		}
	}
}

/// Splits raw lines into word tokens.
///
/// Pure: the output depends only on the line and the configured alphabet.
#[derive(Clone, Debug, Default)]
pub struct Tokenizer {
	alphabet: Alphabet,
}

impl Tokenizer {
	pub fn new(alphabet: Alphabet) -> Self {
		Self { alphabet }
	}

	/// Removes every character that is neither whitespace nor part of the
	/// alphabet, then splits on whitespace.
	///
	/// Removal does not split words: `"don't"` becomes `"dont"`.
	pub fn tokenize(&self, line: &str) -> Vec<String> {
		let filtered: String = line
			.chars()
			.filter(|c| c.is_whitespace() || self.alphabet.contains(*c))
			.collect();
		filtered.split_whitespace().map(str::to_owned).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drops_characters_outside_the_alphabet() {
		let tokenizer = Tokenizer::new(Alphabet::Latin);
		assert_eq!(tokenizer.tokenize("The cat, sat 42 times!"), vec!["The", "cat", "sat", "times"]);
		assert_eq!(tokenizer.tokenize("don't"), vec!["dont"]);
	}

	#[test]
	fn cyrillic_keeps_yo_and_hard_sign() {
		let tokenizer = Tokenizer::new(Alphabet::Cyrillic);
		assert_eq!(tokenizer.tokenize("Съел ёжик, hello мёд."), vec!["Съел", "ёжик", "мёд"]);
	}

	#[test]
	fn empty_and_blank_lines_produce_nothing() {
		let tokenizer = Tokenizer::new(Alphabet::Unicode);
		assert!(tokenizer.tokenize("").is_empty());
		assert!(tokenizer.tokenize("  \t 123 ... ").is_empty());
	}

	#[test]
	fn any_whitespace_separates_words() {
		let tokenizer = Tokenizer::new(Alphabet::Custom("ab".to_owned()));
		assert_eq!(tokenizer.tokenize("ab\tba\nxx a"), vec!["ab", "ba", "a"]);
	}
}
