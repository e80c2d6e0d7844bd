use rand::Rng;

/// Draw an index from `probs` by cumulative-sum inversion.
///
/// Walks the distribution in index order and returns the first index whose
/// running sum exceeds `draw`. If rounding leaves the total just below
/// `draw`, the last index is returned instead. An empty distribution
/// yields 0.
pub fn sample(probs: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0f64;
    for (i, &p) in probs.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return i;
        }
    }
    probs.len().saturating_sub(1)
}

/// Like [`sample`], drawing the uniform value in `[0, 1)` from `rng`.
///
/// Returns the chosen index together with the draw so callers can show it.
pub fn sample_with<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> (usize, f64) {
    let draw: f64 = rng.gen();
    (sample(probs, draw), draw)
}
