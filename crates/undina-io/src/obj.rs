//! Wavefront `.obj` export of the free-surface strip.
//!
//! Only the subset a viewer needs is written: a comment header, `v x y z`
//! vertex lines with six decimals, and triangular `f i j k` faces with
//! 1-based indices.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use undina_core::free_surface::SurfaceMesh;

/// Write `mesh` as OBJ text to `writer`.
pub fn write_obj<W: Write>(mut writer: W, mesh: &SurfaceMesh) -> io::Result<()> {
    writeln!(writer, "# Free surface mesh written by undina")?;
    writeln!(writer, "# Created: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "# Vertices: {}", mesh.points.len())?;
    writeln!(writer, "# Faces: {}", mesh.triangles.len())?;
    writeln!(writer)?;

    for [x, y, z] in &mesh.points {
        writeln!(writer, "v {:.6} {:.6} {:.6}", x, y, z)?;
    }
    for [i, j, k] in &mesh.triangles {
        writeln!(writer, "f {} {} {}", i + 1, j + 1, k + 1)?;
    }
    writer.flush()
}

/// Write `mesh` to an OBJ file at `path`.
pub fn save_obj(path: &Path, mesh: &SurfaceMesh) -> io::Result<()> {
    let file = fs::File::create(path)?;
    write_obj(io::BufWriter::new(file), mesh)?;
    log::info!(
        "Wrote {} ({} vertices, {} faces)",
        path.display(),
        mesh.points.len(),
        mesh.triangles.len()
    );
    Ok(())
}
