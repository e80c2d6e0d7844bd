//! `mg-sampler` - sampling primitives for the microgpt explorer.
//!
//! - `TemperatureScaler` / `scale`: divide scores by a temperature
//! - `softmax`: max-shifted normalization into a probability distribution
//! - `sample` / `sample_with`: categorical selection by cumulative sum
//! - `SamplingPipeline`: all three chained into a single step

pub mod categorical;
pub mod error;
pub mod sampler;
pub mod softmax;
pub mod temperature;

pub use categorical::{sample, sample_with};
pub use error::{Result, SamplerError};
pub use sampler::{SampleStep, SamplingPipeline};
pub use softmax::softmax;
pub use temperature::{scale, TemperatureScaler};
