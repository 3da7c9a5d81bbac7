//! SVG to PNG rasterization.

use anyhow::Result;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::path::Path;
use tracing::debug;

use crate::constants::MAX_CANVAS_PIXELS;
use crate::core::{FileOperations, FileOps, TopologyError};

/// Rasterizes SVG scenes with a font database loaded once per run.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    /// Load system fonts and use the first family of `font_family` as default.
    pub fn new(font_family: &str) -> Self {
        let mut options = usvg::Options::default();
        options.font_family = primary_font(font_family);
        options.fontdb_mut().load_system_fonts();
        debug!("Loaded {} font faces", options.fontdb.len());
        Self { options }
    }

    /// Rasterize `svg` to PNG bytes. `path` only names the target in errors.
    pub fn render_png(&self, svg: &str, path: &Path) -> Result<Vec<u8>> {
        let failure = |reason: String| TopologyError::RenderFailure {
            path: path.display().to_string(),
            reason,
        };

        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| failure(format!("invalid scene: {e}")))?;
        let size = tree.size().to_int_size();
        if u64::from(size.width()) * u64::from(size.height()) > MAX_CANVAS_PIXELS {
            return Err(failure(format!(
                "{}x{} canvas exceeds the limit of {MAX_CANVAS_PIXELS} pixels",
                size.width(),
                size.height()
            ))
            .into());
        }
        let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            failure(format!("cannot allocate {}x{} canvas", size.width(), size.height()))
        })?;

        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        let png = pixmap.encode_png().map_err(|e| failure(e.to_string()))?;
        Ok(png)
    }

    /// Rasterize `svg` and write the PNG to `path`.
    pub fn write_png(&self, svg: &str, path: &Path) -> Result<()> {
        let png = self.render_png(svg, path)?;
        FileOps::write_output_with_context(path, &png)?;
        debug!("Wrote {} bytes to {}", png.len(), path.display());
        Ok(())
    }
}

/// First non-empty family of a CSS font list.
fn primary_font(fonts: &str) -> String {
    fonts
        .split(',')
        .map(|s| s.trim().trim_matches('"'))
        .find(|s| !s.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_primary_font() {
        assert_eq!(primary_font("\"Noto Sans\", Arial"), "Noto Sans");
        assert_eq!(primary_font(" , "), "sans-serif");
    }

    #[test]
    fn test_render_png() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="white"/><circle cx="10" cy="10" r="5" fill="skyblue"/></svg>"#;
        let rasterizer = Rasterizer::new("sans-serif");
        let png = rasterizer.render_png(svg, Path::new("out.png")).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_invalid_svg_is_render_failure() {
        let rasterizer = Rasterizer::new("sans-serif");
        let err = rasterizer.render_png("<not-svg", Path::new("broken.png")).unwrap_err();
        match err.downcast_ref::<TopologyError>() {
            Some(TopologyError::RenderFailure { path, .. }) => assert_eq!(path, "broken.png"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_canvas_is_render_failure() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20000" height="20000"/>"#;
        let rasterizer = Rasterizer::new("sans-serif");
        let err = rasterizer.render_png(svg, Path::new("huge.png")).unwrap_err();
        match err.downcast_ref::<TopologyError>() {
            Some(TopologyError::RenderFailure { path, reason }) => {
                assert_eq!(path, "huge.png");
                assert!(reason.contains("exceeds"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_write_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diagram.png");
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"/>"#;
        Rasterizer::new("sans-serif").write_png(svg, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(PNG_MAGIC));
    }
}
