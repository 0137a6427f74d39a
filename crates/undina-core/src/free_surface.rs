//! Random-phase synthesis of the free-surface elevation.
//!
//! A one-sided spectrum $S(f_i)$ is turned into a sum of cosines
//!
//! $$
//! \eta(x, t) = \sum_i \sqrt{A_i}\,\cos(\omega_i t - k_i x + \phi_i),
//! \qquad A_i = 2\,S(f_i)\,\Delta f, \quad \omega_i = 2\pi f_i
//! $$
//!
//! with $\Delta f = f_{N-1} / N$, wave numbers $k_i$ from the dispersion
//! relation, and phases $\phi_i$ drawn uniformly on $[0, 2\pi)$ from a
//! generator seeded by the caller. The same spectrum, time grid and seed
//! always give the same series.
//!
//! The resulting series is frozen into a [`FreeSurfaceHistory`], which the
//! convolution reads by linear interpolation.

use std::f64::consts::{PI, TAU};

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dispersion::{wave_numbers_with, DispersionOptions};
use crate::spectrum::Spectrum;
use crate::waves::WaveError;

/// Half-width (m) of the free-surface strip exported for visualisation.
pub const MESH_HALF_WIDTH: f64 = 10.0;

/// The sinusoidal components of a random-phase sea.
#[derive(Debug, Clone)]
pub struct PhaseComponents {
    omegas: Vec<f64>,
    wave_numbers: Vec<f64>,
    /// $\sqrt{A_i}$
    weights: Vec<f64>,
    phases: Vec<f64>,
}

impl PhaseComponents {
    /// Derive amplitudes and wave numbers from `spectrum` and draw one phase
    /// per bin from a generator seeded with `seed`.
    pub fn draw(
        spectrum: &Spectrum,
        depth: f64,
        seed: u64,
        dispersion: &DispersionOptions,
    ) -> Self {
        let freqs = spectrum.frequencies();
        let delta_f = freqs[freqs.len() - 1] / freqs.len() as f64;

        let omegas: Vec<f64> = freqs.iter().map(|f| 2.0 * PI * f).collect();
        let wave_numbers = wave_numbers_with(&omegas, depth, dispersion);
        let weights = spectrum
            .densities()
            .iter()
            .map(|s| (2.0 * s * delta_f).sqrt())
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Uniform::new(0.0, TAU);
        let phases = (0..omegas.len()).map(|_| dist.sample(&mut rng)).collect();

        Self {
            omegas,
            wave_numbers,
            weights,
            phases,
        }
    }

    /// Angular frequencies $\omega_i$ (rad/s).
    pub fn omegas(&self) -> &[f64] {
        &self.omegas
    }

    /// Wave numbers $k_i$ (rad/m).
    pub fn wave_numbers(&self) -> &[f64] {
        &self.wave_numbers
    }

    /// Component amplitudes $\sqrt{A_i}$ (m).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Random phases $\phi_i$ (rad).
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Elevation at the origin, $\eta(0, t)$.
    pub fn elevation_at(&self, t: f64) -> f64 {
        self.weights
            .iter()
            .zip(self.omegas.iter())
            .zip(self.phases.iter())
            .map(|((a, w), p)| a * (w * t + p).cos())
            .sum()
    }

    /// Elevation at horizontal position `x` along the wave direction.
    pub fn elevation_at_position(&self, x: f64, t: f64) -> f64 {
        (0..self.omegas.len())
            .map(|i| {
                self.weights[i]
                    * (self.omegas[i] * t - self.wave_numbers[i] * x + self.phases[i]).cos()
            })
            .sum()
    }

    /// Elevation at the origin for every time in `time`.
    pub fn elevation(&self, time: &[f64]) -> Vec<f64> {
        time.iter().map(|&t| self.elevation_at(t)).collect()
    }
}

/// Synthesise $\eta(t_j)$ over `time` from a spectrum, depth and seed.
pub fn synthesize(spectrum: &Spectrum, time: &[f64], depth: f64, seed: u64) -> Vec<f64> {
    PhaseComponents::draw(spectrum, depth, seed, &DispersionOptions::default()).elevation(time)
}

/// Multiply the first `ramp_samples` values by a linear ramp from 0 to 1.
///
/// A ramp of a single sample is the constant 1.
pub fn apply_ramp(elevation: &mut [f64], ramp_samples: usize) {
    if ramp_samples < 2 {
        return;
    }
    let denom = (ramp_samples - 1) as f64;
    for (i, eta) in elevation.iter_mut().take(ramp_samples).enumerate() {
        *eta *= i as f64 / denom;
    }
}

/// Free-surface elevation samples on a strictly ascending time grid.
///
/// Read-only once built; shared by every body's convolution.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSurfaceHistory {
    times: Vec<f64>,
    elevations: Vec<f64>,
}

impl FreeSurfaceHistory {
    /// Freeze a `(time, elevation)` series. Needs at least two samples.
    pub fn new(times: Vec<f64>, elevations: Vec<f64>) -> Result<Self, WaveError> {
        if times.len() != elevations.len() {
            return Err(WaveError::DataFormat(format!(
                "elevation series has {} times but {} values",
                times.len(),
                elevations.len()
            )));
        }
        if times.len() < 2 {
            return Err(WaveError::DataFormat(format!(
                "elevation series needs at least 2 samples, got {}",
                times.len()
            )));
        }
        if let Some(i) = (1..times.len()).find(|&i| !(times[i] > times[i - 1])) {
            return Err(WaveError::DataFormat(format!(
                "elevation times are not strictly ascending at sample {} (t = {})",
                i, times[i]
            )));
        }
        Ok(Self { times, elevations })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First and last sample time.
    pub fn bounds(&self) -> (f64, f64) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    pub fn contains(&self, t: f64) -> bool {
        let (min, max) = self.bounds();
        min <= t && t <= max
    }

    /// Index `i` of the bracket `[t_i, t_{i+1}]` containing `t`, clamped to
    /// `0..=len - 2`.
    pub fn lower_index(&self, t: f64) -> usize {
        let upper = self.times.partition_point(|&s| s <= t);
        upper.saturating_sub(1).min(self.times.len() - 2)
    }

    /// Elevation between the samples of bracket `idx`, linear in time.
    pub(crate) fn interpolate_in(&self, idx: usize, t: f64) -> f64 {
        let (t1, t2) = (self.times[idx], self.times[idx + 1]);
        let (e1, e2) = (self.elevations[idx], self.elevations[idx + 1]);
        if t == t1 {
            e1
        } else if t == t2 {
            e2
        } else {
            let w1 = (t2 - t) / (t2 - t1);
            w1 * e1 + (1.0 - w1) * e2
        }
    }

    /// Linearly interpolated elevation at `t`.
    ///
    /// Fails with [`WaveError::Domain`] outside the sampled window.
    pub fn elevation_at(&self, t: f64) -> Result<f64, WaveError> {
        if !self.contains(t) {
            let (min, max) = self.bounds();
            return Err(WaveError::Domain { time: t, min, max });
        }
        Ok(self.interpolate_in(self.lower_index(t), t))
    }
}

/// Triangulated strip for visualising an elevation series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions `[x, y, z]`.
    pub points: Vec<[f64; 3]>,
    /// Zero-based vertex indices.
    pub triangles: Vec<[usize; 3]>,
}

/// Build the strip mesh of an elevation series.
///
/// Sample `i` becomes two vertices at `x = -t_i`, `y = ∓10`, `z = η_i`;
/// each pair of consecutive columns is closed by the triangles
/// `{2i, 2i+1, 2i+3}` and `{2i, 2i+3, 2i+2}`.
pub fn surface_mesh(elevation: &[f64], time: &[f64]) -> SurfaceMesh {
    let n = elevation.len().min(time.len());
    let mut points = Vec::with_capacity(2 * n);
    for i in 0..n {
        let x = -time[i];
        let z = elevation[i];
        points.push([x, -MESH_HALF_WIDTH, z]);
        points.push([x, MESH_HALF_WIDTH, z]);
    }

    let mut triangles = Vec::with_capacity(2 * n.saturating_sub(1));
    for i in 0..n.saturating_sub(1) {
        triangles.push([2 * i, 2 * i + 1, 2 * i + 3]);
        triangles.push([2 * i, 2 * i + 3, 2 * i + 2]);
    }

    SurfaceMesh { points, triangles }
}
