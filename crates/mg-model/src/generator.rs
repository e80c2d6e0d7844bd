use std::sync::Arc;

use mg_sampler::SamplingPipeline;
use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::heuristic::LogitHeuristic;
use crate::tokenizer::{Token, Vocabulary};

/// Sampling steps before a name is closed regardless of what was drawn.
pub const MAX_GENERATION_STEPS: usize = 12;

/// One finished name.
///
/// `tokens` starts and ends with the boundary token; `name` is the letters
/// in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSequence {
    pub name: String,
    pub tokens: Vec<Token>,
    pub temperature: f64,
}

impl GeneratedSequence {
    pub fn token_ids(&self) -> Vec<u32> {
        self.tokens.iter().map(|t| t.id).collect()
    }
}

/// Everything that went into one sampled token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStep {
    pub position: usize,
    /// Name so far, before this token.
    pub context: String,
    pub probabilities: Vec<f64>,
    pub draw: f64,
    pub token: Token,
}

/// A generated name together with the steps that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationTrace {
    pub sequence: GeneratedSequence,
    pub steps: Vec<GenerationStep>,
    /// True if the step bound was hit and the closing boundary was added.
    pub truncated: bool,
}

enum State {
    Generating,
    Done { truncated: bool },
}

/// Generates names one token at a time.
///
/// Each step scores the vocabulary with the [`LogitHeuristic`], scales by
/// temperature, normalizes and draws. Generation stops when the boundary
/// token is drawn or after `max_steps` draws, in which case a closing
/// boundary is appended.
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    vocab: Arc<Vocabulary>,
    heuristic: LogitHeuristic,
    max_steps: usize,
}

impl SequenceSampler {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self {
            vocab,
            heuristic: LogitHeuristic::new(),
            max_steps: MAX_GENERATION_STEPS,
        }
    }

    pub fn with_heuristic(mut self, heuristic: LogitHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Generate one name. Fails only if `temperature` is not positive and finite.
    pub fn generate<R: Rng + ?Sized>(&self, temperature: f64, rng: &mut R) -> Result<GeneratedSequence> {
        Ok(self.generate_with_trace(temperature, rng)?.sequence)
    }

    /// Generate `count` independent names at the same temperature.
    pub fn generate_many<R: Rng + ?Sized>(
        &self,
        temperature: f64,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<GeneratedSequence>> {
        (0..count).map(|_| self.generate(temperature, rng)).collect()
    }

    /// Generate one name and keep the per-step distributions.
    pub fn generate_with_trace<R: Rng + ?Sized>(
        &self,
        temperature: f64,
        rng: &mut R,
    ) -> Result<GenerationTrace> {
        let pipeline = SamplingPipeline::new(temperature)?;

        let boundary_id = self.vocab.boundary_id();
        let mut tokens = vec![self.vocab.boundary_token()];
        let mut context = String::new();
        let mut steps = Vec::new();
        let mut position = 0usize;
        let mut state = State::Generating;

        while let State::Generating = state {
            if position >= self.max_steps {
                state = State::Done { truncated: true };
                continue;
            }

            let scores = self.heuristic.scores(&self.vocab, &context, position, rng);
            let step = pipeline.step(scores, rng);
            log::trace!("position {} distribution {:?}", position, step.probabilities);

            let token = self.vocab.token(step.index as u32)?;
            log::debug!(
                "position {}: drew {:.4}, sampled {} (p = {:.4})",
                position,
                step.draw,
                token,
                step.probabilities[step.index]
            );

            tokens.push(token);
            steps.push(GenerationStep {
                position,
                context: context.clone(),
                probabilities: step.probabilities,
                draw: step.draw,
                token,
            });

            if token.id == boundary_id {
                state = State::Done { truncated: false };
            } else if let Some(c) = token.symbol.as_char() {
                context.push(c);
                position += 1;
            }
        }

        let truncated = matches!(state, State::Done { truncated: true });
        if truncated {
            log::warn!(
                "name {:?} hit the {}-step bound; closing it with a boundary token",
                context,
                self.max_steps
            );
            tokens.push(self.vocab.boundary_token());
        }

        Ok(GenerationTrace {
            sequence: GeneratedSequence {
                name: context,
                tokens,
                temperature,
            },
            steps,
            truncated,
        })
    }
}
