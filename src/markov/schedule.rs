use crate::error::{GeneticError, Result};

/// Geometric cooling: `T_k = T_0 * rate^k`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSchedule {
    initial_temperature: f64,
    cooling_rate: f64,
}

impl CoolingSchedule {
    /// # Errors
    ///
    /// Returns an error if:
    /// - `initial_temperature` is not a positive finite number
    /// - `cooling_rate` is not in `(0, 1]`
    pub fn new(initial_temperature: f64, cooling_rate: f64) -> Result<Self> {
        if !(initial_temperature.is_finite() && initial_temperature > 0.0) {
            return Err(GeneticError::Configuration(format!(
                "Initial temperature must be positive, got {}",
                initial_temperature
            )));
        }
        if !(cooling_rate > 0.0 && cooling_rate <= 1.0) {
            return Err(GeneticError::Configuration(format!(
                "Cooling rate must be in (0.0, 1.0], got {}",
                cooling_rate
            )));
        }
        Ok(Self {
            initial_temperature,
            cooling_rate,
        })
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    /// Temperature at step `k`, counting from 0.
    pub fn temperature(&self, k: usize) -> f64 {
        self.initial_temperature * self.cooling_rate.powf(k as f64)
    }

    /// The first `steps` temperatures.
    pub fn temperatures(&self, steps: usize) -> impl Iterator<Item = f64> + '_ {
        (0..steps).map(move |k| self.temperature(k))
    }
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: 50.0,
            cooling_rate: 0.995,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_cooling() {
        let schedule = CoolingSchedule::default();
        assert_eq!(schedule.temperature(0), 50.0);
        assert!((schedule.temperature(2) - 50.0 * 0.995 * 0.995).abs() < 1e-12);
        let temps: Vec<f64> = schedule.temperatures(4).collect();
        assert_eq!(temps.len(), 4);
        assert!(temps.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(CoolingSchedule::new(0.0, 0.9).is_err());
        assert!(CoolingSchedule::new(f64::INFINITY, 0.9).is_err());
        assert!(CoolingSchedule::new(10.0, 0.0).is_err());
        assert!(CoolingSchedule::new(10.0, 1.5).is_err());
        assert!(CoolingSchedule::new(10.0, 1.0).is_ok());
    }
}
