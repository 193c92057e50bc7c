//! PNG export for rendered surfaces.
//!
//! Feature-gated behind `png` (default on) so embedders that only drive
//! sessions can depend on this crate without pulling in the `image` crate.

use std::path::Path;

use constel_core::error::EngineError;

use crate::surface::Surface;

/// Writes a surface to disk as a PNG.
///
/// Returns `EngineError::Io` on write failure.
pub fn write_png(surface: &Surface, path: &Path) -> Result<(), EngineError> {
    let img = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.data().to_vec(),
    )
    .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use constel_core::palette::Rgba;

    #[test]
    fn written_png_reads_back_with_same_pixels() {
        let mut surface = Surface::new(8, 6).unwrap();
        surface.clear(Rgba::opaque(15, 23, 42));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(3, 3).0, [15, 23, 42, 255]);
    }

    #[test]
    fn unwritable_path_surfaces_an_io_error() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.clear(Rgba::opaque(0, 0, 0));
        let err = write_png(&surface, Path::new("/no/such/dir/frame.png")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)), "got {err:?}");
    }
}
