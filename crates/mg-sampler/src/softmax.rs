/// Convert raw scores into a probability distribution.
///
/// The maximum score is subtracted before exponentiating so large scores
/// cannot overflow. The shifted maximum contributes `exp(0) = 1` to the
/// denominator, so the sum is never zero for finite input. If the maximum
/// is infinite (a tiny temperature can push scores past `f64::MAX`), the
/// mass is split evenly across the entries equal to it. An empty slice
/// yields an empty distribution.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max_score.is_infinite() {
        let ties = scores.iter().filter(|&&s| s == max_score).count() as f64;
        return scores
            .iter()
            .map(|&s| if s == max_score { 1.0 / ties } else { 0.0 })
            .collect();
    }

    let exps: Vec<f64> = scores.iter().map(|s| (s - max_score).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}
