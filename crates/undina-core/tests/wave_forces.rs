//! End-to-end checks of the wave-force models through the public API.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{Array2, Array3};
use undina_core::convolution::convolve;
use undina_core::dispersion::{dispersion_residual, solve_wave_number, DispersionOptions};
use undina_core::free_surface::{synthesize, FreeSurfaceHistory, PhaseComponents};
use undina_core::spectrum::{jonswap, pierson_moskowitz, Spectrum};
use undina_core::types::{IrregularWaveParams, RegularWaveParams, SpectrumConfig, WaveMode};
use undina_core::waves::{IrregularWaves, NoWave, RegularWave};
use undina_core::{WaveError, WaveForce, WaveForceProvider};
use undina_hydro::{FrequencyExcitation, ImpulseExcitation};

#[test]
fn test_dispersion_residual_small_across_depths() {
    let opts = DispersionOptions::default();
    for &depth in &[1.0, 5.0, 20.0, 100.0, 1000.0] {
        for &omega in &[0.1, 0.5, 1.0, 2.0, 4.0] {
            let sol = solve_wave_number(omega, depth, &opts);
            assert!(
                sol.converged,
                "no convergence for omega = {omega}, depth = {depth}"
            );
            let residual = dispersion_residual(omega, sol.wave_number, depth, opts.gravity);
            assert!(
                residual.abs() < 1e-4,
                "residual {residual} for omega = {omega}, depth = {depth}"
            );
        }
    }
}

#[test]
fn test_jonswap_with_unit_gamma_is_pierson_moskowitz() {
    let mut f1: Vec<f64> = (1..=200).map(|i| 0.005 * i as f64).collect();
    let mut f2 = f1.clone();
    let pm = pierson_moskowitz(&mut f1, 4.0, 11.0);
    let js = jonswap(&mut f2, 4.0, 11.0, 1.0);
    for (a, b) in pm.iter().zip(js.iter()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }
}

#[test]
fn test_synthesis_bit_identical_for_fixed_seed() {
    let spectrum = Spectrum::generate(&SpectrumConfig::default(), 3.0, 9.0).unwrap();
    let time: Vec<f64> = (0..2000).map(|i| -5.0 + 0.05 * i as f64).collect();
    let a = synthesize(&spectrum, &time, 40.0, 2024);
    let b = synthesize(&spectrum, &time, 40.0, 2024);
    let c = synthesize(&spectrum, &time, 40.0, 2025);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_single_bin_spectrum() {
    let (f0, s0) = (0.125, 1.6);
    let spectrum = Spectrum::new(vec![0.0625, f0, 0.25], vec![0.0, s0, 0.0]).unwrap();
    let components = PhaseComponents::draw(&spectrum, 100.0, 99, &DispersionOptions::default());
    let a = 2.0 * s0 * 0.25 / 3.0;
    let phi = components.phases()[1];

    let time: Vec<f64> = (0..50).map(|i| 0.4 * i as f64).collect();
    let eta = synthesize(&spectrum, &time, 100.0, 99);
    for (t, e) in time.iter().zip(eta.iter()) {
        let expected = a.sqrt() * (2.0 * std::f64::consts::PI * f0 * t + phi).cos();
        assert_abs_diff_eq!(*e, expected, epsilon = 1e-12);
    }
}

#[test]
fn test_single_nonzero_irf_sample_scales_elevation() {
    let history =
        FreeSurfaceHistory::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.5, -1.5, 2.0, 0.25]).unwrap();
    // Lag grid [0, 0.5]: widths are [0.25, 0.25].
    let mut values = Array2::zeros((6, 2));
    values[[3, 0]] = 4.0;
    let kernel = ImpulseExcitation::new(vec![0.0, 0.5], values).unwrap();
    let w = kernel.widths()[0];

    let f = convolve(&kernel, &history, 3, 2.0).unwrap();
    assert_abs_diff_eq!(f, 4.0 * 2.0 * w, epsilon = 1e-12);
    assert_eq!(convolve(&kernel, &history, 0, 2.0).unwrap(), 0.0);
}

#[test]
fn test_convolution_outside_window_fails() {
    let history = FreeSurfaceHistory::new(vec![0.0, 1.0, 2.0], vec![0.0; 3]).unwrap();
    let kernel = ImpulseExcitation::new(vec![0.0, 1.0], Array2::ones((6, 2))).unwrap();
    assert!(matches!(
        convolve(&kernel, &history, 0, 0.5),
        Err(WaveError::Domain { .. })
    ));
    assert!(matches!(
        convolve(&kernel, &history, 0, 2.5),
        Err(WaveError::Domain { .. })
    ));
}

#[test]
fn test_no_wave_two_bodies() {
    let provider = WaveForceProvider::from(NoWave::new(2));
    for &t in &[0.0, 3.7, -12.0, 1e4] {
        let force = provider.force_at_time(t).unwrap();
        assert_eq!(force.len(), 12);
        assert!(force.iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_regular_wave_unit_response() {
    let freqs: Vec<f64> = (1..=20).map(|i| 0.1 * i as f64).collect();
    let nf = freqs.len();
    let table =
        FrequencyExcitation::new(freqs, Array3::ones((6, 1, nf)), Array3::zeros((6, 1, nf)))
            .unwrap();
    let mut waves = RegularWave::new(
        1,
        RegularWaveParams {
            amplitude: 2.0,
            omega: 1.0,
        },
    );
    waves.add_hydro_data(&[table]).unwrap();
    let provider = WaveForceProvider::from(waves);
    assert_eq!(provider.mode(), WaveMode::Regular);

    for &t in &[0.0, 0.5, 2.0, 13.0] {
        let force = provider.force_at_time(t).unwrap();
        assert_abs_diff_eq!(force[2], 2.0 * t.cos(), epsilon = 1e-12);
    }
}

#[test]
fn test_irregular_end_to_end() {
    let params = IrregularWaveParams {
        wave_height: 1.5,
        wave_period: 7.0,
        simulation_dt: 0.05,
        simulation_duration: 30.0,
        ramp_duration: 2.0,
        seed: 7,
        ..Default::default()
    };
    let time: Vec<f64> = (0..41).map(|i| -2.0 + 0.1 * i as f64).collect();
    let values = Array2::from_shape_fn((6, time.len()), |(d, j)| {
        let tau: f64 = time[j];
        (d as f64 + 1.0) * 1e4 * (-tau * tau).exp()
    });
    let kernel = ImpulseExcitation::new(time, values).unwrap();

    let mut waves = IrregularWaves::new(1, params);
    waves.add_hydro_data(vec![kernel], 60.0).unwrap();
    let provider = WaveForceProvider::from(waves);

    let mut peak = 0.0_f64;
    for step in 0..=600 {
        let t = step as f64 * 0.05;
        let force = provider.force_at_time(t).unwrap();
        assert_eq!(force.len(), 6);
        // Proportional IRF rows give proportional forces.
        assert_relative_eq!(force[1], 2.0 * force[0], max_relative = 1e-9, epsilon = 1e-9);
        peak = peak.max(force[0].abs());
    }
    assert!(peak > 0.0);
}
