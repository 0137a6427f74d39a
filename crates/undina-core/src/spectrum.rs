//! Parametric wave spectra in Hz.
//!
//! Pierson-Moskowitz, written in terms of significant wave height $H_s$
//! and peak period $T_p$:
//!
//! $$
//! S_{PM}(f) = \frac{5}{4}\,T_p^{-4} \left(\frac{H_s}{2}\right)^2 f^{-5}
//!   \exp\!\left(-\frac{5}{4}\,T_p^{-4} f^{-4}\right)
//! $$
//!
//! JONSWAP scales it by the peak enhancement
//! $\gamma^{\exp(-(f T_p - 1)^2 / 2\sigma^2)}$ with $\sigma = 0.07$ at or
//! below the peak frequency $1/T_p$ and $\sigma = 0.09$ above it.

use crate::types::{FrequencyGrid, SpectrumConfig, SpectrumKind};
use crate::waves::WaveError;

/// `points` frequencies linearly spaced over `[start, end]`.
pub fn frequency_grid(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Pierson-Moskowitz spectral densities (m²/Hz).
///
/// `frequencies` (Hz) is sorted ascending in place first; densities are
/// returned in that sorted order. Non-positive frequencies get zero density.
pub fn pierson_moskowitz(frequencies: &mut [f64], hs: f64, tp: f64) -> Vec<f64> {
    frequencies.sort_by(|a, b| a.total_cmp(b));

    let b = 1.25 * (1.0 / tp).powi(4);
    let a = b * (hs / 2.0).powi(2);
    frequencies
        .iter()
        .map(|&f| {
            if f <= 0.0 {
                0.0
            } else {
                a * f.powi(-5) * (-b * f.powi(-4)).exp()
            }
        })
        .collect()
}

/// JONSWAP spectral densities (m²/Hz) with peak-enhancement factor `gamma`.
///
/// Sorts `frequencies` in place like [`pierson_moskowitz`].
pub fn jonswap(frequencies: &mut [f64], hs: f64, tp: f64, gamma: f64) -> Vec<f64> {
    let mut densities = pierson_moskowitz(frequencies, hs, tp);
    for (s, &f) in densities.iter_mut().zip(frequencies.iter()) {
        let sigma: f64 = if f <= 1.0 / tp { 0.07 } else { 0.09 };
        let r = (-(1.0 / (2.0 * sigma * sigma)) * (f * tp - 1.0).powi(2)).exp();
        *s *= gamma.powf(r);
    }
    densities
}

/// A discretised one-sided spectrum: ascending frequencies (Hz) and
/// non-negative densities (m²/Hz).
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    densities: Vec<f64>,
}

impl Spectrum {
    /// Build a spectrum from matching frequency and density lists.
    pub fn new(frequencies: Vec<f64>, densities: Vec<f64>) -> Result<Self, WaveError> {
        if frequencies.is_empty() {
            return Err(WaveError::Configuration("spectrum has no frequencies".into()));
        }
        if frequencies.len() != densities.len() {
            return Err(WaveError::Configuration(format!(
                "spectrum has {} frequencies but {} densities",
                frequencies.len(),
                densities.len()
            )));
        }
        if let Some(i) = (1..frequencies.len()).find(|&i| !(frequencies[i] > frequencies[i - 1])) {
            return Err(WaveError::Configuration(format!(
                "spectrum frequencies are not strictly ascending at index {}",
                i
            )));
        }
        if let Some(i) = densities.iter().position(|s| !(*s >= 0.0)) {
            return Err(WaveError::Configuration(format!(
                "spectral density at index {} is negative or NaN ({})",
                i, densities[i]
            )));
        }
        Ok(Self {
            frequencies,
            densities,
        })
    }

    /// Evaluate a parametric spectrum for the given sea state.
    pub fn generate(config: &SpectrumConfig, hs: f64, tp: f64) -> Result<Self, WaveError> {
        if !(hs > 0.0) || !(tp > 0.0) {
            return Err(WaveError::Configuration(format!(
                "spectrum needs positive wave height and period (Hs = {}, Tp = {})",
                hs, tp
            )));
        }
        let FrequencyGrid { start, end, points } = config.grid;
        let mut frequencies = frequency_grid(start, end, points);
        let densities = match config.kind {
            SpectrumKind::PiersonMoskowitz => pierson_moskowitz(&mut frequencies, hs, tp),
            SpectrumKind::Jonswap { gamma } => jonswap(&mut frequencies, hs, tp, gamma),
        };
        Self::new(frequencies, densities)
    }

    /// Frequencies (Hz).
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Spectral densities (m²/Hz).
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterate over `(frequency, density)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.densities.iter().copied())
    }

    /// Zeroth spectral moment $m_0 = \int S(f)\,df$ (trapezoidal).
    ///
    /// For a well-resolved spectrum $4\sqrt{m_0} \approx H_s$.
    pub fn zeroth_moment(&self) -> f64 {
        self.frequencies
            .windows(2)
            .zip(self.densities.windows(2))
            .map(|(f, s)| 0.5 * (s[0] + s[1]) * (f[1] - f[0]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_jonswap_gamma_one_equals_pierson_moskowitz() {
        let mut f1 = frequency_grid(0.001, 1.0, 1000);
        let mut f2 = f1.clone();
        let pm = pierson_moskowitz(&mut f1, 2.5, 8.0);
        let js = jonswap(&mut f2, 2.5, 8.0, 1.0);
        for (a, b) in pm.iter().zip(js.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_pierson_moskowitz_sorts_input() {
        let mut f = vec![0.3, 0.1, 0.2];
        let s = pierson_moskowitz(&mut f, 1.0, 5.0);
        assert_eq!(f, vec![0.1, 0.2, 0.3]);
        let mut sorted = vec![0.1, 0.2, 0.3];
        assert_eq!(s, pierson_moskowitz(&mut sorted, 1.0, 5.0));
    }

    #[test]
    fn test_pierson_moskowitz_peak_near_one_over_tp() {
        // In the Hs/Tp form the maximum sits exactly at f = 1/Tp.
        let tp = 10.0;
        let mut f = frequency_grid(0.01, 0.5, 4901);
        let s = pierson_moskowitz(&mut f, 3.0, tp);
        let (imax, _) = s
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });
        assert_abs_diff_eq!(f[imax], 1.0 / tp, epsilon = 1e-3);
    }

    #[test]
    fn test_jonswap_enhances_peak() {
        let tp = 8.0;
        let mut f = vec![1.0 / tp];
        let pm = pierson_moskowitz(&mut f.clone(), 2.0, tp)[0];
        let js = jonswap(&mut f, 2.0, tp, 3.3)[0];
        assert_relative_eq!(js / pm, 3.3, max_relative = 1e-12);
    }

    #[test]
    fn test_zeroth_moment_matches_wave_height() {
        let config = SpectrumConfig {
            kind: SpectrumKind::PiersonMoskowitz,
            grid: FrequencyGrid {
                start: 0.001,
                end: 2.0,
                points: 20_000,
            },
        };
        let hs = 2.0;
        let spectrum = Spectrum::generate(&config, hs, 8.0).unwrap();
        assert_relative_eq!(4.0 * spectrum.zeroth_moment().sqrt(), hs, max_relative = 0.01);
    }

    #[test]
    fn test_generate_requires_sea_state() {
        let result = Spectrum::generate(&SpectrumConfig::default(), 0.0, 8.0);
        assert!(matches!(result, Err(WaveError::Configuration(_))));
    }

    #[test]
    fn test_rejects_negative_density() {
        let result = Spectrum::new(vec![0.1, 0.2], vec![1.0, -0.5]);
        assert!(matches!(result, Err(WaveError::Configuration(_))));
    }

    #[test]
    fn test_rejects_empty_spectrum() {
        assert!(Spectrum::new(Vec::new(), Vec::new()).is_err());
    }
}
