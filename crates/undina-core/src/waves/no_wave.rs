//! Still water.

use crate::types::{ForceVector, WaveMode, DOF_PER_BODY};
use crate::waves::{WaveError, WaveForce};

/// Zero excitation for every body at every time.
#[derive(Debug, Clone)]
pub struct NoWave {
    num_bodies: usize,
}

impl NoWave {
    pub fn new(num_bodies: usize) -> Self {
        Self { num_bodies }
    }
}

impl WaveForce for NoWave {
    fn force_at_time(&self, _t: f64) -> Result<ForceVector, WaveError> {
        Ok(ForceVector::zeros(DOF_PER_BODY * self.num_bodies))
    }

    fn num_bodies(&self) -> usize {
        self.num_bodies
    }

    fn mode(&self) -> WaveMode {
        WaveMode::NoWave
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_for_two_bodies() {
        let waves = NoWave::new(2);
        for &t in &[-1.0, 0.0, 1e6] {
            let f = waves.force_at_time(t).unwrap();
            assert_eq!(f.len(), 12);
            assert!(f.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_no_bodies_gives_empty_vector() {
        assert!(NoWave::new(0).force_at_time(0.0).unwrap().is_empty());
    }
}
