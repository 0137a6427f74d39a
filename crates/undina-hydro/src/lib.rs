//! # Undina Hydro
//!
//! Hydrodynamic coefficient tables for the Undina wave-excitation framework.
//! The tables are produced by a frequency-domain boundary-element solver and
//! arrive here already parsed; this crate validates them and conditions them
//! for time-domain use.
//!
//! ## Contents
//!
//! | Concern | Module |
//! |---------|--------|
//! | Frequency-domain magnitude/phase and excitation IRF tables | [`excitation`] |
//! | Serialisable multi-body dataset | [`data`] |
//! | Interpolating cubic B-splines | [`spline`] |
//! | IRF resampling onto the simulation step | [`resample`] |
//!
//! Every body carries six degrees of freedom (surge, sway, heave, roll,
//! pitch, yaw); see [`DOF_PER_BODY`].

pub mod data;
pub mod error;
pub mod excitation;
pub mod resample;
pub mod spline;

/// Rigid-body degrees of freedom per body.
pub const DOF_PER_BODY: usize = 6;

pub use data::{BodyData, HydroDataset, ImpulseResponse, SimulationParameters};
pub use error::HydroError;
pub use excitation::{integration_widths, FrequencyExcitation, ImpulseExcitation};
pub use resample::resample;
