//! I/O seams for the irregular-wave model.
//!
//! The core never touches the filesystem itself. A pre-recorded elevation
//! series comes in through an [`ElevationSource`], and the spectrum and
//! elevation debug dumps go out through a [`DebugSink`]. File-backed
//! implementations live in `undina-io`.

use std::fmt;
use std::io;

use crate::spectrum::Spectrum;
use crate::waves::WaveError;

/// Supplier of a pre-recorded free-surface elevation series.
pub trait ElevationSource: fmt::Debug + Send + Sync {
    /// Short description for log messages, e.g. a file path.
    fn describe(&self) -> String;

    /// Load `(time, elevation)` pairs. Times must be strictly ascending.
    fn load(&self) -> Result<(Vec<f64>, Vec<f64>), WaveError>;
}

/// Receiver of diagnostic dumps written during initialisation.
///
/// Failures are reported to the caller, which logs them and carries on.
pub trait DebugSink: fmt::Debug + Send + Sync {
    fn spectrum(&self, spectrum: &Spectrum) -> io::Result<()>;

    fn elevation(&self, time: &[f64], elevation: &[f64]) -> io::Result<()>;
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebug;

impl DebugSink for NoDebug {
    fn spectrum(&self, _spectrum: &Spectrum) -> io::Result<()> {
        Ok(())
    }

    fn elevation(&self, _time: &[f64], _elevation: &[f64]) -> io::Result<()> {
        Ok(())
    }
}

/// An elevation series already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryElevation {
    pub time: Vec<f64>,
    pub elevation: Vec<f64>,
}

impl MemoryElevation {
    pub fn new(time: Vec<f64>, elevation: Vec<f64>) -> Self {
        Self { time, elevation }
    }
}

impl ElevationSource for MemoryElevation {
    fn describe(&self) -> String {
        format!("in-memory series ({} samples)", self.time.len())
    }

    fn load(&self) -> Result<(Vec<f64>, Vec<f64>), WaveError> {
        Ok((self.time.clone(), self.elevation.clone()))
    }
}
