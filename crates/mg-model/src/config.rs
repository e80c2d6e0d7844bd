use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::tokenizer::VOCAB_SIZE;

/// Shape of the tiny GPT the explorer pretends to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Embedding dimension.
    pub n_embd: usize,
    /// Number of attention heads.
    pub n_head: usize,
    /// Number of transformer layers.
    pub n_layer: usize,
    /// Maximum context length.
    pub block_size: usize,
    /// 26 letters plus the boundary token.
    pub vocab_size: usize,
}

impl ModelConfig {
    pub fn head_dim(&self) -> usize {
        self.n_embd / self.n_head
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_embd: 16,
            n_head: 4,
            n_layer: 1,
            block_size: 16,
            vocab_size: VOCAB_SIZE,
        }
    }
}

/// Parameters of the simulated training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub num_steps: usize,
    pub initial_loss: f64,
    pub final_loss: f64,
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_steps: 100,
            initial_loss: 3.3,
            final_loss: 2.2,
            learning_rate: 0.01,
            beta1: 0.85,
            beta2: 0.99,
        }
    }
}

/// Coarse description of a temperature shown next to the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureLabel {
    Conservative,
    Balanced,
    Creative,
}

impl TemperatureLabel {
    pub fn for_temperature(temperature: f64) -> Self {
        if temperature < 0.4 {
            TemperatureLabel::Conservative
        } else if temperature < 0.8 {
            TemperatureLabel::Balanced
        } else {
            TemperatureLabel::Creative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureLabel::Conservative => "Conservative",
            TemperatureLabel::Balanced => "Balanced",
            TemperatureLabel::Creative => "Creative",
        }
    }
}

impl fmt::Display for TemperatureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limits of the generation controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub temperature_step: f64,
    /// Sampling steps before a name is forcibly closed.
    pub max_steps: usize,
    pub min_names: usize,
    pub max_names: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            min_temperature: 0.1,
            max_temperature: 1.5,
            temperature_step: 0.1,
            max_steps: 12,
            min_names: 1,
            max_names: 5,
        }
    }
}

impl GenerationConfig {
    /// Clamp a slider value into range and snap it to the step grid.
    pub fn clamp_temperature(&self, temperature: f64) -> f64 {
        let clamped = temperature.clamp(self.min_temperature, self.max_temperature);
        if self.temperature_step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min_temperature) / self.temperature_step).round();
        (self.min_temperature + steps * self.temperature_step).min(self.max_temperature)
    }

    pub fn clamp_names(&self, count: usize) -> usize {
        count.clamp(self.min_names, self.max_names)
    }
}

/// All explorer settings, loadable from a JSON file. Missing sections and
/// fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub generation: GenerationConfig,
}

impl ExplorerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ExplorerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the explorer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let m = &self.model;
        if m.vocab_size != VOCAB_SIZE {
            return Err(ModelError::Config(format!(
                "vocab_size must be {}, got {}",
                VOCAB_SIZE, m.vocab_size
            )));
        }
        if m.n_head == 0 || m.n_embd % m.n_head != 0 {
            return Err(ModelError::Config(format!(
                "n_embd ({}) must be a positive multiple of n_head ({})",
                m.n_embd, m.n_head
            )));
        }

        let t = &self.training;
        if t.final_loss > t.initial_loss {
            return Err(ModelError::Config(format!(
                "final_loss ({}) exceeds initial_loss ({})",
                t.final_loss, t.initial_loss
            )));
        }

        let g = &self.generation;
        if !(g.min_temperature > 0.0) || g.min_temperature > g.max_temperature {
            return Err(ModelError::Config(format!(
                "temperature range [{}, {}] must be positive and ordered",
                g.min_temperature, g.max_temperature
            )));
        }
        if g.temperature < g.min_temperature || g.temperature > g.max_temperature {
            return Err(ModelError::Config(format!(
                "default temperature {} outside [{}, {}]",
                g.temperature, g.min_temperature, g.max_temperature
            )));
        }
        if g.max_steps == 0 {
            return Err(ModelError::Config("max_steps must be at least 1".to_string()));
        }
        if g.min_names == 0 || g.min_names > g.max_names {
            return Err(ModelError::Config(format!(
                "name count range [{}, {}] is invalid",
                g.min_names, g.max_names
            )));
        }
        Ok(())
    }
}
