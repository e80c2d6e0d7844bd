//! `mg-model` - the mock name model behind the microgpt explorer.
//!
//! This crate provides:
//! - The 27-symbol character `Vocabulary` and a `CharTokenizer`
//! - A rule-table `LogitHeuristic` that stands in for a trained network
//! - The `SequenceSampler` that turns heuristic scores into names
//! - Explorer configuration and synthetic embedding / loss-curve data

pub mod config;
pub mod error;
pub mod generator;
pub mod heuristic;
pub mod mock;
pub mod tokenizer;

pub use config::{ExplorerConfig, GenerationConfig, ModelConfig, TemperatureLabel, TrainingConfig};
pub use error::{ModelError, Result};
pub use generator::{GeneratedSequence, GenerationStep, GenerationTrace, SequenceSampler, MAX_GENERATION_STEPS};
pub use heuristic::LogitHeuristic;
pub use tokenizer::{CharTokenizer, Symbol, Token, TokenPair, Vocabulary};
