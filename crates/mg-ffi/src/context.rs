use std::sync::Arc;

use mg_model::{GenerationConfig, SequenceSampler, Vocabulary};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::types::MgGenerateParams;

/// Opaque context handle that owns the vocabulary and the random source.
pub struct MgContext {
    pub vocab: Arc<Vocabulary>,
    pub rng: StdRng,
    pub limits: GenerationConfig,
}

impl MgContext {
    /// A seed of 0 draws from OS entropy; any other seed is reproducible.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed)
        };
        Self {
            vocab: Arc::new(Vocabulary::new()),
            rng,
            limits: GenerationConfig::default(),
        }
    }

    /// Number of names to produce for `params`, kept within the name range.
    pub fn name_count(&self, params: &MgGenerateParams) -> usize {
        let count = self.limits.clamp_names(params.count as usize);
        if count != params.count as usize {
            log::warn!("name count {} clamped to {}", params.count, count);
        }
        count
    }

    /// Sequence sampler configured from `params`.
    pub fn sampler(&self, params: &MgGenerateParams) -> SequenceSampler {
        let sampler = SequenceSampler::new(Arc::clone(&self.vocab));
        if params.max_steps == 0 {
            sampler
        } else {
            sampler.with_max_steps(params.max_steps as usize)
        }
    }
}
