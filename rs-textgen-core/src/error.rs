//! Error types shared by the whole library.

use std::{fmt, io};

use crate::model::lexicon::Code;

/// Every failure the library can report.
///
/// Variants fall into three families:
/// - input errors (`Io`, `Fetch`, `InvalidConfig`), raised by collaborators
/// - state errors (`UnknownCode`, `DegenerateContext`, `EmptyModel`)
/// - corruption errors (`Corrupt`), raised while decoding a stored model
#[derive(Debug)]
pub enum TextGenError {
	/// Reading a line source or a model file failed.
	Io { context: String, source: io::Error },
	/// A remote page could not be retrieved.
	Fetch(String),
	/// A stored model is truncated, has a wrong header or breaks an invariant.
	Corrupt(String),
	/// Configuration values that cannot drive a model.
	InvalidConfig(String),
	/// A code that the lexicon never assigned.
	UnknownCode(Code),
	/// An n-gram whose context has no usable count in the frequency table.
	DegenerateContext(Vec<Code>),
	/// The frequency table holds nothing to sample from.
	EmptyModel,
}

impl TextGenError {
	/// Wraps an I/O error with a short description of what was attempted.
	pub fn io(context: impl Into<String>, source: io::Error) -> Self {
		Self::Io { context: context.into(), source }
	}

	/// `true` when the underlying cause is a missing file or directory.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
	}
}

impl fmt::Display for TextGenError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io { context, source } => write!(f, "{context}: {source}"),
			Self::Fetch(msg) => write!(f, "cannot fetch page: {msg}"),
			Self::Corrupt(msg) => write!(f, "corrupted model: {msg}"),
			Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
			Self::UnknownCode(code) => write!(f, "code {code} is not in the lexicon"),
			Self::DegenerateContext(context) => {
				write!(f, "context {context:?} has no count in the frequency table")
			}
			Self::EmptyModel => write!(f, "the model is empty, nothing to generate from"),
		}
	}
}

impl std::error::Error for TextGenError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}

impl From<postcard::Error> for TextGenError {
	fn from(err: postcard::Error) -> Self {
		Self::Corrupt(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, TextGenError>;
