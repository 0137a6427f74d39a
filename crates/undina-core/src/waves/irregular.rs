//! Irregular (spectral) sea state.
//!
//! Attaching hydrodynamic data is the one-time initialisation step:
//!
//! 1. validate one excitation IRF per body and, when the simulation step is
//!    positive, resample each onto that step;
//! 2. obtain the free-surface elevation, either from an [`ElevationSource`]
//!    or by generating a spectrum and synthesising a random-phase series
//!    long enough that no convolution query can leave it;
//! 3. freeze both into the ready state.
//!
//! After that the model is read-only and every force evaluation is a
//! convolution against the frozen history.

use undina_hydro::ImpulseExcitation;

use crate::convolution::{convolve, convolve_body};
use crate::dispersion::DispersionOptions;
use crate::free_surface::{apply_ramp, surface_mesh, FreeSurfaceHistory, PhaseComponents, SurfaceMesh};
use crate::ports::{DebugSink, ElevationSource, NoDebug};
use crate::spectrum::Spectrum;
use crate::types::{ForceVector, IrregularWaveParams, WaveMode, DOF_PER_BODY};
use crate::waves::{WaveError, WaveForce};

/// Velocity at which a visualiser scrolls the free-surface strip (m/s).
pub const MESH_VELOCITY: [f64; 3] = [1.0, 0.0, 0.0];

#[derive(Debug)]
enum State {
    Uninitialized,
    Ready(Box<Ready>),
}

#[derive(Debug)]
struct Ready {
    kernels: Vec<ImpulseExcitation>,
    history: FreeSurfaceHistory,
    spectrum: Option<Spectrum>,
}

/// Irregular-wave force model.
#[derive(Debug)]
pub struct IrregularWaves {
    num_bodies: usize,
    params: IrregularWaveParams,
    dispersion: DispersionOptions,
    elevation_source: Option<Box<dyn ElevationSource>>,
    debug: Box<dyn DebugSink>,
    state: State,
}

impl IrregularWaves {
    pub fn new(num_bodies: usize, params: IrregularWaveParams) -> Self {
        Self {
            num_bodies,
            params,
            dispersion: DispersionOptions::default(),
            elevation_source: None,
            debug: Box::new(NoDebug),
            state: State::Uninitialized,
        }
    }

    /// Read the elevation from `source` instead of synthesising it.
    pub fn with_elevation_source(mut self, source: Box<dyn ElevationSource>) -> Self {
        self.elevation_source = Some(source);
        self
    }

    /// Send the spectrum and elevation dumps to `sink`.
    pub fn with_debug_sink(mut self, sink: Box<dyn DebugSink>) -> Self {
        self.debug = sink;
        self
    }

    pub fn with_dispersion(mut self, dispersion: DispersionOptions) -> Self {
        self.dispersion = dispersion;
        self
    }

    pub fn params(&self) -> &IrregularWaveParams {
        &self.params
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Attach one excitation IRF per body and build the free-surface history.
    ///
    /// `water_depth` (m) feeds the dispersion relation during synthesis.
    /// May be called once; on error the model stays uninitialised.
    pub fn add_hydro_data(
        &mut self,
        mut kernels: Vec<ImpulseExcitation>,
        water_depth: f64,
    ) -> Result<(), WaveError> {
        if self.is_initialized() {
            return Err(WaveError::Configuration(
                "irregular waves already have hydrodynamic data".into(),
            ));
        }
        if kernels.len() != self.num_bodies {
            return Err(WaveError::Configuration(format!(
                "expected excitation IRFs for {} bodies, got {}",
                self.num_bodies,
                kernels.len()
            )));
        }
        if kernels.iter().any(|k| k.is_empty()) {
            return Err(WaveError::Configuration("excitation IRF has no samples".into()));
        }

        let dt = self.params.simulation_dt;
        if dt > 0.0 {
            for (body, kernel) in kernels.iter_mut().enumerate() {
                kernel.resample_in_place(dt)?;
                log::debug!("Body {}: IRF resampled to {} samples", body, kernel.len());
            }
        }

        let (tau_min, tau_max) = lag_extent(&kernels);
        let (history, spectrum) = match &self.elevation_source {
            Some(source) => (self.load_history(source.as_ref(), tau_max)?, None),
            None => {
                let (history, spectrum) = self.synthesize_history(water_depth, tau_min, tau_max)?;
                (history, Some(spectrum))
            }
        };

        self.state = State::Ready(Box::new(Ready {
            kernels,
            history,
            spectrum,
        }));
        Ok(())
    }

    fn load_history(
        &self,
        source: &dyn ElevationSource,
        tau_max: f64,
    ) -> Result<FreeSurfaceHistory, WaveError> {
        log::info!("Reading free surface elevation from {}", source.describe());
        let (time, elevation) = source.load()?;
        let history = FreeSurfaceHistory::new(time, elevation)?;

        let (start, end) = history.bounds();
        if start > -tau_max {
            log::warn!(
                "Elevation history starts at {} s but the IRF reaches back to {} s; \
                 early force evaluations will fail",
                start,
                -tau_max
            );
        }
        log::info!("Free surface elevation loaded on [{}, {}]", start, end);
        Ok(history)
    }

    fn synthesize_history(
        &self,
        water_depth: f64,
        tau_min: f64,
        tau_max: f64,
    ) -> Result<(FreeSurfaceHistory, Spectrum), WaveError> {
        let p = &self.params;
        if !(p.wave_height > 0.0 && p.wave_period > 0.0) {
            return Err(WaveError::Configuration(
                "irregular waves need a wave height and period, or an elevation file".into(),
            ));
        }
        let dt = p.simulation_dt;
        if !(dt > 0.0) {
            return Err(WaveError::Configuration(format!(
                "free surface synthesis needs a positive time step, got {}",
                dt
            )));
        }

        let spectrum = Spectrum::generate(&p.spectrum, p.wave_height, p.wave_period)?;
        if let Err(err) = self.debug.spectrum(&spectrum) {
            log::warn!("Unable to write spectrum dump: {}", err);
        }

        let t_start = -tau_max;
        let t_end = p.simulation_duration + 2.0 * (tau_max - tau_min) - tau_max;
        log::info!("Precalculating free surface on [{}, {}]", t_start, t_end);

        let time = undina_hydro::resample::uniform_grid(t_start, t_end, dt)?;
        let components = PhaseComponents::draw(&spectrum, water_depth, p.seed, &self.dispersion);
        let mut elevation = components.elevation(&time);
        let ramp_samples = (p.ramp_duration / dt).floor().max(0.0) as usize + 1;
        apply_ramp(&mut elevation, ramp_samples);

        if let Err(err) = self.debug.elevation(&time, &elevation) {
            log::warn!("Unable to write elevation dump: {}", err);
        }
        log::info!("Free surface synthesised: {} samples", time.len());

        Ok((FreeSurfaceHistory::new(time, elevation)?, spectrum))
    }

    fn ready(&self) -> Result<&Ready, WaveError> {
        match &self.state {
            State::Ready(ready) => Ok(ready),
            State::Uninitialized => Err(WaveError::Configuration(
                "irregular waves evaluated before hydrodynamic data was attached".into(),
            )),
        }
    }

    fn kernel(&self, body: usize) -> Result<(&ImpulseExcitation, &FreeSurfaceHistory), WaveError> {
        let ready = self.ready()?;
        let kernel = ready.kernels.get(body).ok_or_else(|| {
            WaveError::Configuration(format!(
                "body {} out of range ({} bodies)",
                body, self.num_bodies
            ))
        })?;
        Ok((kernel, &ready.history))
    }

    /// Excitation force on a single DOF of `body` at time `t`.
    pub fn force_at(&self, body: usize, dof: usize, t: f64) -> Result<f64, WaveError> {
        if dof >= DOF_PER_BODY {
            return Err(WaveError::Configuration(format!("DOF {} out of range", dof)));
        }
        let (kernel, history) = self.kernel(body)?;
        convolve(kernel, history, dof, t)
    }

    /// Full force vector with only `body`'s six slots filled.
    pub fn body_force_at_time(&self, body: usize, t: f64) -> Result<ForceVector, WaveError> {
        let (kernel, history) = self.kernel(body)?;
        let mut force = ForceVector::zeros(DOF_PER_BODY * self.num_bodies);
        let start = body * DOF_PER_BODY;
        force
            .slice_mut(ndarray::s![start..start + DOF_PER_BODY])
            .assign(&convolve_body(kernel, history, t)?);
        Ok(force)
    }

    /// The synthesised spectrum.
    ///
    /// Not available before initialisation or when the elevation was loaded
    /// from a source.
    pub fn spectrum(&self) -> Result<&Spectrum, WaveError> {
        self.ready()?.spectrum.as_ref().ok_or_else(|| {
            WaveError::Configuration("no spectrum: elevation was not synthesised".into())
        })
    }

    /// The frozen elevation history, once initialised.
    pub fn free_surface(&self) -> Option<&FreeSurfaceHistory> {
        match &self.state {
            State::Ready(ready) => Some(&ready.history),
            State::Uninitialized => None,
        }
    }

    /// Excitation IRFs as used by the convolution (after resampling).
    pub fn kernels(&self) -> &[ImpulseExcitation] {
        match &self.state {
            State::Ready(ready) => &ready.kernels,
            State::Uninitialized => &[],
        }
    }

    /// Strip mesh of the elevation history.
    pub fn surface_mesh(&self) -> Result<SurfaceMesh, WaveError> {
        let history = &self.ready()?.history;
        Ok(surface_mesh(history.elevations(), history.times()))
    }

    pub fn mesh_velocity(&self) -> [f64; 3] {
        MESH_VELOCITY
    }
}

/// `(min(0, τ_first), max(0, τ_last))` over all bodies.
fn lag_extent(kernels: &[ImpulseExcitation]) -> (f64, f64) {
    kernels.iter().fold((0.0_f64, 0.0_f64), |(lo, hi), k| {
        let (t0, t1) = k.support();
        (lo.min(t0), hi.max(t1))
    })
}

impl WaveForce for IrregularWaves {
    fn force_at_time(&self, t: f64) -> Result<ForceVector, WaveError> {
        let ready = self.ready()?;
        let mut force = ForceVector::zeros(DOF_PER_BODY * self.num_bodies);
        for (body, kernel) in ready.kernels.iter().enumerate() {
            let start = body * DOF_PER_BODY;
            force
                .slice_mut(ndarray::s![start..start + DOF_PER_BODY])
                .assign(&convolve_body(kernel, &ready.history, t)?);
        }
        Ok(force)
    }

    fn num_bodies(&self) -> usize {
        self.num_bodies
    }

    fn mode(&self) -> WaveMode {
        WaveMode::Irregular
    }
}
