use serde::{Deserialize, Serialize};

use crate::error::{Result, TextGenError};
use crate::model::tokenizer::Alphabet;

/// Default maximum n-gram order.
pub const DEFAULT_ORDER: usize = 5;

/// Training settings.
///
/// Serializable so binaries can keep it in a user config file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
	/// Maximum n-gram order `N`.
	pub order: usize,
	/// Characters words are made of.
	pub alphabet: Alphabet,
	/// Lowercase every line before it reaches the trainer.
	pub lowercase: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			alphabet: Alphabet::default(),
			lowercase: false,
		}
	}
}

impl Config {
	/// Checks that the settings can drive a trainer.
	///
	/// # Errors
	/// - `order` is 0
	/// - a custom alphabet is empty
	pub fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(TextGenError::InvalidConfig("order must be >= 1".to_owned()));
		}
		if matches!(&self.alphabet, Alphabet::Custom(chars) if chars.is_empty()) {
			return Err(TextGenError::InvalidConfig("custom alphabet is empty".to_owned()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_valid() {
		let config = Config::default();
		assert_eq!(config.order, 5);
		assert_eq!(config.alphabet, Alphabet::Cyrillic);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn rejects_zero_order_and_empty_alphabet() {
		let config = Config { order: 0, ..Config::default() };
		assert!(matches!(config.validate(), Err(TextGenError::InvalidConfig(_))));

		let config = Config { alphabet: Alphabet::Custom(String::new()), ..Config::default() };
		assert!(matches!(config.validate(), Err(TextGenError::InvalidConfig(_))));
	}
}
