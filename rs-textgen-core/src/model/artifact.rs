use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::frequency::FrequencyTable;
use super::lexicon::Lexicon;
use crate::error::{Result, TextGenError};

/// Leading bytes of every stored model.
const MAGIC: [u8; 4] = *b"TGNM";
/// Current on-disk format version.
const FORMAT_VERSION: u8 = 1;

/// Trained state crossing the training/generation boundary.
///
/// Holds the frequency table, the lexicon its keys refer to, and the
/// maximum order `N` used while training.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelArtifact {
	order: usize,
	frequencies: FrequencyTable,
	lexicon: Lexicon,
}

impl ModelArtifact {
	pub fn new(order: usize, frequencies: FrequencyTable, lexicon: Lexicon) -> Self {
		Self { order, frequencies, lexicon }
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn frequencies(&self) -> &FrequencyTable {
		&self.frequencies
	}

	pub fn lexicon(&self) -> &Lexicon {
		&self.lexicon
	}

	pub fn into_parts(self) -> (usize, FrequencyTable, Lexicon) {
		(self.order, self.frequencies, self.lexicon)
	}

	/// Encodes the artifact: magic, format version, then the `postcard` payload.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut bytes = Vec::from(MAGIC);
		bytes.push(FORMAT_VERSION);
		bytes.extend(postcard::to_stdvec(self)?);
		Ok(bytes)
	}

	/// Decodes and validates an artifact produced by [`to_bytes`](Self::to_bytes).
	///
	/// # Errors
	/// `Corrupt` if the header is wrong, the payload is truncated or has
	/// trailing bytes, or the decoded state breaks a model invariant.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let payload = bytes
			.strip_prefix(&MAGIC[..])
			.ok_or_else(|| TextGenError::Corrupt("not a model file (bad magic)".to_owned()))?;
		let (version, payload) = payload
			.split_first()
			.ok_or_else(|| TextGenError::Corrupt("missing format version".to_owned()))?;
		if *version != FORMAT_VERSION {
			return Err(TextGenError::Corrupt(format!("unsupported format version {version}")));
		}

		let (artifact, rest): (Self, &[u8]) = postcard::take_from_bytes(payload)?;
		if !rest.is_empty() {
			return Err(TextGenError::Corrupt(format!("{} trailing bytes", rest.len())));
		}
		artifact.validate()?;
		Ok(artifact)
	}

	/// Writes the encoded artifact to `path`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let bytes = self.to_bytes()?;
		fs::write(path, bytes).map_err(|e| TextGenError::io(format!("storing model to {}", path.display()), e))
	}

	/// Reads and decodes an artifact from `path`.
	///
	/// A missing or unreadable file is an `Io` error, a readable file with
	/// the wrong content is `Corrupt`.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path).map_err(|e| TextGenError::io(format!("loading model from {}", path.display()), e))?;
		Self::from_bytes(&bytes)
	}

	/// Checks the invariants a trainer always upholds.
	fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(TextGenError::Corrupt("order is 0".to_owned()));
		}
		for (ngram, count) in self.frequencies.iter() {
			if ngram.is_empty() || ngram.len() > self.order {
				return Err(TextGenError::Corrupt(format!(
					"n-gram {ngram:?} does not fit order {}",
					self.order
				)));
			}
			if count == 0 {
				return Err(TextGenError::Corrupt(format!("n-gram {ngram:?} has a zero count")));
			}
			if let Some(code) = ngram.iter().find(|code| !self.lexicon.contains_code(**code)) {
				return Err(TextGenError::Corrupt(format!("n-gram {ngram:?} uses unknown code {code}")));
			}
		}
		Ok(())
	}
}
