//! Drink image previews
//!
//! Images are decoded once, downscaled, and drawn with upper half blocks:
//! each terminal cell shows two vertical pixels (foreground = top,
//! background = bottom), which keeps pixels roughly square.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preview size in terminal cells
pub const PREVIEW_COLS: u16 = 24;
pub const PREVIEW_ROWS: u16 = 12;

/// A decoded, downscaled image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Preview {
    /// Decode an image file and fit it into `cols` x `rows` cells
    pub fn load(path: &Path, cols: u16, rows: u16) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Failed to open image {:?}", path))?;
        let img = img.resize(cols as u32, rows as u32 * 2, FilterType::Triangle);
        Ok(Self::from_rgb(img.to_rgb8()))
    }

    fn from_rgb(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in terminal rows
    pub fn rows(&self) -> u32 {
        self.height.div_ceil(2)
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[(y * self.width + x) as usize];
        Some(Color::Rgb(r, g, b))
    }

    /// Render as half-block lines; odd last rows use `fill` below
    pub fn lines(&self, fill: Color) -> Vec<Line<'static>> {
        (0..self.rows())
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let top = self.pixel(x, row * 2).unwrap_or(fill);
                        let bottom = self.pixel(x, row * 2 + 1).unwrap_or(fill);
                        Span::styled("▀", Style::default().fg(top).bg(bottom))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Decoded previews by resolved path; failures are cached as `None`
#[derive(Debug, Default)]
pub struct PreviewCache {
    entries: HashMap<PathBuf, Option<Preview>>,
}

impl PreviewCache {
    /// Decode on first use
    pub fn ensure(&mut self, path: &Path) {
        if self.entries.contains_key(path) {
            return;
        }
        let preview = match Preview::load(path, PREVIEW_COLS, PREVIEW_ROWS) {
            Ok(p) => {
                debug!(path = %path.display(), width = p.width(), rows = p.rows(), "Preview decoded");
                Some(p)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{:#}", e), "Preview unavailable");
                None
            }
        };
        self.entries.insert(path.to_path_buf(), preview);
    }

    pub fn get(&self, path: &Path) -> Option<&Preview> {
        self.entries.get(path).and_then(Option::as_ref)
    }
}

/// Find a drink's image: as given (relative to the working directory),
/// then relative to the catalog directory
pub fn resolve_image_path(image: &str, catalog_dir: Option<&Path>) -> Option<PathBuf> {
    let image = image.trim();
    if image.is_empty() {
        return None;
    }

    let direct = PathBuf::from(image);
    if direct.is_file() {
        return Some(direct);
    }

    catalog_dir
        .map(|dir| dir.join(image))
        .filter(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Preview {
        let img = image::RgbImage::from_fn(2, 3, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        });
        Preview::from_rgb(img)
    }

    #[test]
    fn test_lines_pair_rows_into_half_blocks() {
        let preview = checker();
        assert_eq!(preview.rows(), 2);

        let lines = preview.lines(Color::Reset);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);

        let first = lines[0].spans[0].style;
        assert_eq!(first.fg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(first.bg, Some(Color::Rgb(0, 0, 0)));

        // Third pixel row has no partner below it
        let last = lines[1].spans[0].style;
        assert_eq!(last.bg, Some(Color::Reset));
    }

    #[test]
    fn test_load_resizes_into_cell_box() {
        let dir = std::env::temp_dir().join(format!("barcart-preview-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("wide.png");
        image::RgbImage::from_pixel(100, 50, image::Rgb([200, 30, 30]))
            .save(&path)
            .unwrap();

        let preview = Preview::load(&path, PREVIEW_COLS, PREVIEW_ROWS).unwrap();
        assert_eq!(preview.width(), 24);
        assert_eq!(preview.rows(), 6);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cache_remembers_failures() {
        let mut cache = PreviewCache::default();
        let missing = Path::new("/nonexistent/barcart/negroni.png");
        cache.ensure(missing);
        cache.ensure(missing);
        assert_eq!(cache.entries.len(), 1);
        assert!(cache.get(missing).is_none());
    }

    #[test]
    fn test_resolve_image_path() {
        assert_eq!(resolve_image_path("  ", None), None);
        assert_eq!(resolve_image_path("/nonexistent/x.png", None), None);

        let dir = std::env::temp_dir().join(format!("barcart-resolve-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("Images")).unwrap();
        std::fs::write(dir.join("Images").join("mojito.png"), b"png").unwrap();

        assert_eq!(
            resolve_image_path("Images/mojito.png", Some(dir.as_path())),
            Some(dir.join("Images/mojito.png"))
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
