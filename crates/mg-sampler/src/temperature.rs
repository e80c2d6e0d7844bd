use crate::error::{Result, SamplerError};

/// Scales scores by dividing by a temperature value.
///
/// Higher temperatures produce more uniform distributions (more random),
/// while lower temperatures sharpen the distribution (more deterministic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureScaler {
    temperature: f64,
}

impl TemperatureScaler {
    /// Create a new temperature scaler.
    ///
    /// Rejects zero, negative, NaN and infinite temperatures with
    /// [`SamplerError::Domain`]. Range limits imposed by a UI control are the
    /// caller's business.
    pub fn new(temperature: f64) -> Result<Self> {
        if !(temperature > 0.0) || !temperature.is_finite() {
            return Err(SamplerError::Domain { temperature });
        }
        Ok(Self { temperature })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Divide every score by the temperature, in place.
    pub fn apply(&self, scores: &mut [f64]) {
        for score in scores.iter_mut() {
            *score /= self.temperature;
        }
    }
}

/// Return a copy of `scores` with every element divided by `temperature`.
pub fn scale(scores: &[f64], temperature: f64) -> Result<Vec<f64>> {
    let scaler = TemperatureScaler::new(temperature)?;
    let mut scaled = scores.to_vec();
    scaler.apply(&mut scaled);
    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_one() {
        let v = vec![-5.0, 0.0, 2.5, 3.25];
        assert_eq!(scale(&v, 1.0).unwrap(), v);
    }

    #[test]
    fn test_divides_each_element() {
        let r = scale(&[1.0, -2.0, 4.0], 0.5).unwrap();
        assert_eq!(r, vec![2.0, -4.0, 8.0]);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(
            scale(&[1.0], 0.0),
            Err(SamplerError::Domain { temperature: 0.0 })
        );
        assert!(scale(&[1.0], -0.3).is_err());
        assert!(TemperatureScaler::new(f64::NAN).is_err());
        assert!(TemperatureScaler::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_apply_in_place() {
        let scaler = TemperatureScaler::new(2.0).unwrap();
        let mut v = vec![4.0, 6.0];
        scaler.apply(&mut v);
        assert_eq!(v, vec![2.0, 3.0]);
        assert_eq!(scaler.temperature(), 2.0);
    }
}
