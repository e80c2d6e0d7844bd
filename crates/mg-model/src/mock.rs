//! Synthetic numbers for the embedding, training and logit views.
//!
//! None of this comes from a trained model; the values only need to look
//! plausible and be stable enough to chart.

use rand::Rng;
use serde::Serialize;

use crate::config::TrainingConfig;

/// Seed offset separating position embeddings from token embeddings.
pub const POSITION_SEED_OFFSET: usize = 100;

/// One point on the simulated loss curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingStep {
    pub step: usize,
    pub loss: f64,
    #[serde(rename = "learningRate")]
    pub learning_rate: f64,
}

/// Pseudo-embedding in `[-0.8, 0.8]`: element `i` is `sin(seed + i) * 0.8`.
pub fn embedding(seed: usize, n_embd: usize) -> Vec<f64> {
    (0..n_embd)
        .map(|i| ((seed + i) as f64).sin() * 0.8)
        .collect()
}

pub fn token_embedding(token_id: u32, n_embd: usize) -> Vec<f64> {
    embedding(token_id as usize, n_embd)
}

pub fn position_embedding(position: usize, n_embd: usize) -> Vec<f64> {
    embedding(position + POSITION_SEED_OFFSET, n_embd)
}

/// Token embedding plus position embedding, element-wise.
pub fn combined_embedding(token_id: u32, position: usize, n_embd: usize) -> Vec<f64> {
    token_embedding(token_id, n_embd)
        .iter()
        .zip(position_embedding(position, n_embd))
        .map(|(t, p)| t + p)
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Loss curve decaying exponentially from `initial_loss` toward `final_loss`.
///
/// A deterministic sinusoidal wobble, damped as training progresses, keeps
/// the curve from looking synthetic. Loss never drops below `final_loss`.
/// The learning rate decays linearly to zero.
pub fn training_loss_curve(num_steps: usize, config: &TrainingConfig) -> Vec<TrainingStep> {
    let initial = config.initial_loss;
    let target = config.final_loss;

    (0..num_steps)
        .map(|step| {
            let progress = step as f64 / num_steps as f64;
            let base = initial - (initial - target) * (1.0 - (-3.0 * progress).exp());
            let s = step as f64;
            let noise = ((s * 0.3).sin() * 0.2 + (s * 0.7).cos() * 0.15) * (1.0 - progress * 0.5);
            let loss = target.max(base + noise);
            let lr = config.learning_rate * (1.0 - progress);

            TrainingStep {
                step,
                loss: round_to(loss, 4),
                learning_rate: round_to(lr, 6),
            }
        })
        .collect()
}

/// Random scores in `[-4, -2)`, with `target` (if in range) lifted by 2.
pub fn mock_logits<R: Rng + ?Sized>(vocab_size: usize, target: Option<u32>, rng: &mut R) -> Vec<f64> {
    let mut logits: Vec<f64> = (0..vocab_size).map(|_| rng.gen_range(-4.0..-2.0)).collect();
    if let Some(slot) = target.and_then(|t| logits.get_mut(t as usize)) {
        *slot += 2.0;
    }
    logits
}
