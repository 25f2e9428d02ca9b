//! Top-level module for the n-gram text generation system.
//!
//! Components, leaf-first:
//! - Word codes (`Lexicon`) and line splitting (`Tokenizer`)
//! - N-gram counting across lines (`Trainer`, `FrequencyTable`)
//! - Persisted trained state (`ModelArtifact`)
//! - Conditional distributions (`ProbabilityModel`)
//! - Sentence generation with back-off (`Generator`)

/// Stored trained state and its binary encoding.
pub mod artifact;

/// Occurrence counts of n-grams of every order.
pub mod frequency;

/// High-level interface generating sentences from a trained model.
///
/// Derives the probability model on load and runs generation sessions
/// with context back-off and random starts.
pub mod generator;

/// Bidirectional word ↔ code mapping.
pub mod lexicon;

/// Conditional next-word distributions derived from a frequency table.
pub mod probability;

/// Weighted random selection.
pub mod sampling;

/// Alphabet filtering and word splitting.
pub mod tokenizer;

/// Line-by-line n-gram counting with cross-line context.
pub mod trainer;
