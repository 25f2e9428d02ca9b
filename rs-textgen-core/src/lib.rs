//! Word-level n-gram text generation library.
//!
//! This crate provides:
//! - A stable word ↔ code lexicon and an alphabet-filtering tokenizer
//! - A line-by-line trainer counting n-grams of every order up to `N`
//! - A compact, validated binary format for trained models
//! - Back-off probabilistic generation of whole sentences
//! - Line sources for directories and stdin

/// Training configuration.
pub mod config;

/// Error types shared by the whole library.
pub mod error;

/// Core n-gram models, training and generation logic.
pub mod model;

/// Line sources and file helpers (directory scanning, stdin, model names).
pub mod io;

pub use config::Config;
pub use error::{Result, TextGenError};
pub use model::artifact::ModelArtifact;
pub use model::generator::{Generated, GenerationWarning, Generator};
pub use model::trainer::Trainer;
