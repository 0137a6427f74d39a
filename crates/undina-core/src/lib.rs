//! # Undina Core
//!
//! Time-domain wave excitation forces for floating bodies. This crate turns
//! a sea state and a set of already-parsed hydrodynamic tables into the
//! six-DOF-per-body excitation force a dynamics integrator asks for at every
//! step.
//!
//! ## Architecture
//!
//! All wave models implement the [`waves::WaveForce`] trait; the host picks
//! one through [`waves::WaveForceProvider`]. The irregular model is built
//! from the lower layers:
//!
//! - [`spectrum`] produces a Pierson-Moskowitz or JONSWAP spectrum,
//! - [`free_surface`] synthesises a random-phase elevation history from it,
//!   using wave numbers from [`dispersion`],
//! - [`convolution`] convolves each body's excitation IRF with that history.
//!
//! ## Modules
//!
//! - [`types`]: wave mode and parameter sets.
//! - [`dispersion`]: linear dispersion relation solver.
//! - [`spectrum`]: parametric wave spectra.
//! - [`free_surface`]: elevation synthesis, history and strip mesh.
//! - [`convolution`]: IRF convolution against the elevation history.
//! - [`ports`]: elevation source and debug sink seams.
//! - [`waves`]: the force models.

pub mod convolution;
pub mod dispersion;
pub mod free_surface;
pub mod ports;
pub mod spectrum;
pub mod types;
pub mod waves;

pub use waves::{WaveError, WaveForce, WaveForceProvider};
