//! Free-surface elevation text files.
//!
//! One sample per line, time and elevation separated by a colon:
//! ```text
//! -12.5 : 0.0
//! -12.49 : 0.00131
//! ```
//!
//! Whitespace around either field is ignored on read, as are blank lines.
//! Values are written with Rust's shortest round-trip formatting, so a
//! written series reads back bit for bit.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use undina_core::ports::ElevationSource;
use undina_core::WaveError;

use crate::ParseError;

/// Parse `(time, elevation)` columns from file content.
pub fn parse_elevation(content: &str) -> Result<(Vec<f64>, Vec<f64>), ParseError> {
    let mut time = Vec::new();
    let mut elevation = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (t, eta) = line.split_once(':').ok_or_else(|| ParseError::FormatError {
            line: idx + 1,
            message: format!("Expected '<time> : <elevation>', got '{}'", line),
        })?;
        let t: f64 = t.trim().parse().map_err(|_| ParseError::FormatError {
            line: idx + 1,
            message: format!("Invalid time: {}", t.trim()),
        })?;
        let eta: f64 = eta.trim().parse().map_err(|_| ParseError::FormatError {
            line: idx + 1,
            message: format!("Invalid elevation: {}", eta.trim()),
        })?;
        time.push(t);
        elevation.push(eta);
    }

    Ok((time, elevation))
}

/// Format an elevation series, one `<time> : <elevation>` line per sample.
pub fn format_elevation(time: &[f64], elevation: &[f64]) -> String {
    let mut out = String::with_capacity(32 * time.len());
    for (t, eta) in time.iter().zip(elevation.iter()) {
        let _ = writeln!(out, "{} : {}", t, eta);
    }
    out
}

pub fn read_elevation(path: &Path) -> Result<(Vec<f64>, Vec<f64>), ParseError> {
    let content = fs::read_to_string(path)?;
    parse_elevation(&content)
}

pub fn write_elevation(path: &Path, time: &[f64], elevation: &[f64]) -> Result<(), ParseError> {
    fs::write(path, format_elevation(time, elevation))?;
    Ok(())
}

/// An elevation series stored in a text file.
#[derive(Debug, Clone)]
pub struct ElevationFile {
    path: PathBuf,
}

impl ElevationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ElevationSource for ElevationFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<(Vec<f64>, Vec<f64>), WaveError> {
        read_elevation(&self.path)
            .map_err(|e| WaveError::DataFormat(format!("{}: {}", self.path.display(), e)))
    }
}
