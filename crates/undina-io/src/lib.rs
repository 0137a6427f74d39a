//! # Undina IO
//!
//! File formats around the wave-excitation core:
//!
//! - **Elevation series** ([`elevation`]): `<time> : <elevation>` text files,
//!   read as an alternative elevation source and written as a debug dump.
//! - **Debug dumps** ([`dump`]): the spectrum and elevation written into a
//!   directory during initialisation.
//! - **Mesh export** ([`obj`]): the free-surface strip as a Wavefront OBJ.

pub mod dump;
pub mod elevation;
pub mod obj;

use thiserror::Error;

pub use dump::DumpDirectory;
pub use elevation::ElevationFile;

/// Errors while reading or writing undina text files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    FormatError { line: usize, message: String },
}
