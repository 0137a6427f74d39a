//! Debug dumps written while the irregular-wave model initialises.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use undina_core::ports::DebugSink;
use undina_core::spectrum::Spectrum;

use crate::elevation::format_elevation;

/// File name of the spectrum dump.
pub const SPECTRUM_FILE: &str = "spectral_densities.txt";
/// File name of the elevation dump.
pub const ELEVATION_FILE: &str = "eta.txt";

/// One `<frequency> : <spectral density>` line per bin.
pub fn format_spectrum(spectrum: &Spectrum) -> String {
    let mut out = String::with_capacity(32 * spectrum.len());
    for (f, s) in spectrum.iter() {
        let _ = writeln!(out, "{} : {}", f, s);
    }
    out
}

/// Writes the dumps into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DumpDirectory {
    dir: PathBuf,
}

impl DumpDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, name: &str, content: String) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl DebugSink for DumpDirectory {
    fn spectrum(&self, spectrum: &Spectrum) -> io::Result<()> {
        self.write(SPECTRUM_FILE, format_spectrum(spectrum))
    }

    fn elevation(&self, time: &[f64], elevation: &[f64]) -> io::Result<()> {
        self.write(ELEVATION_FILE, format_elevation(time, elevation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_spectrum() {
        let spectrum = Spectrum::new(vec![0.1, 0.2], vec![0.5, 0.0]).unwrap();
        assert_eq!(format_spectrum(&spectrum), "0.1 : 0.5\n0.2 : 0\n");
    }

    #[test]
    fn test_dump_directory_writes_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DumpDirectory::new(tmp.path().join("debug"));
        let spectrum = Spectrum::new(vec![0.1, 0.2, 0.3], vec![1.0, 2.0, 3.0]).unwrap();

        sink.spectrum(&spectrum).unwrap();
        sink.elevation(&[0.0, 0.1], &[0.0, 0.5]).unwrap();

        let spec = fs::read_to_string(sink.dir().join(SPECTRUM_FILE)).unwrap();
        assert_eq!(spec.lines().count(), 3);
        let eta = fs::read_to_string(sink.dir().join(ELEVATION_FILE)).unwrap();
        assert_eq!(eta, "0 : 0\n0.1 : 0.5\n");
    }
}
