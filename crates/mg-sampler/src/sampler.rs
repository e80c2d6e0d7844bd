use rand::Rng;

use crate::categorical;
use crate::error::Result;
use crate::softmax::softmax;
use crate::temperature::TemperatureScaler;

/// Outcome of one sampling step: the distribution that was sampled from,
/// the uniform draw used, and the selected index.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStep {
    pub probabilities: Vec<f64>,
    pub draw: f64,
    pub index: usize,
}

/// Composes temperature scaling, softmax and categorical selection into a
/// single step.
///
/// The pipeline holds no mutable state, so one instance can be shared
/// across threads and reused for every step of a sequence.
#[derive(Debug, Clone, Copy)]
pub struct SamplingPipeline {
    scaler: TemperatureScaler,
}

impl SamplingPipeline {
    /// Create a pipeline for the given temperature.
    pub fn new(temperature: f64) -> Result<Self> {
        Ok(Self {
            scaler: TemperatureScaler::new(temperature)?,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.scaler.temperature()
    }

    /// Scale and normalize `scores` without selecting anything.
    pub fn distribution(&self, mut scores: Vec<f64>) -> Vec<f64> {
        self.scaler.apply(&mut scores);
        softmax(&scores)
    }

    /// Run one step against an explicit uniform draw in `[0, 1)`.
    pub fn step_with_draw(&self, scores: Vec<f64>, draw: f64) -> SampleStep {
        let probabilities = self.distribution(scores);
        let index = categorical::sample(&probabilities, draw);
        SampleStep {
            probabilities,
            draw,
            index,
        }
    }

    /// Run one step, drawing the uniform value from `rng`.
    pub fn step<R: Rng + ?Sized>(&self, scores: Vec<f64>, rng: &mut R) -> SampleStep {
        let draw: f64 = rng.gen();
        self.step_with_draw(scores, draw)
    }
}
