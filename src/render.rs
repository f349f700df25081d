//! SVG rasterization on top of resvg.
//!
//! The logo is parsed once and rendered at any number of square sizes. Every
//! render starts from a fresh pixmap, so the same source, size and background
//! always produce the same pixels.

use anyhow::{Context, Result};
use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

/// Opaque fill painted behind the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Background {
    fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.red, self.green, self.blue, 255)
    }
}

impl FromStr for Background {
    type Err = anyhow::Error;

    /// Accepts any CSS color (`#fff`, `#1e90ff`, `rgb(0, 0, 0)`, `white`).
    /// Alpha is dropped; the fill is always opaque.
    fn from_str(s: &str) -> Result<Self> {
        let color = css_color::Srgb::from_str(s.trim())
            .map_err(|_| anyhow::anyhow!("Invalid background color: {s}"))?;
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.).round() as u8;
        Ok(Self {
            red: channel(color.red),
            green: channel(color.green),
            blue: channel(color.blue),
        })
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// A parsed SVG ready to be rendered.
pub struct SvgSource {
    path: PathBuf,
    tree: usvg::Tree,
}

impl fmt::Debug for SvgSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgSource")
            .field("path", &self.path)
            .field("size", &self.tree.size())
            .finish()
    }
}

impl SvgSource {
    /// Read and parse an SVG file. Relative `href`s resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read SVG {}", path.display()))?;

        let mut opt = usvg::Options {
            resources_dir: path
                .canonicalize()
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf)),
            ..Default::default()
        };
        Arc::make_mut(&mut opt.fontdb).load_system_fonts();

        let tree = usvg::Tree::from_data(&data, &opt)
            .with_context(|| format!("Failed to parse SVG {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            width = tree.size().width(),
            height = tree.size().height(),
            "parsed svg"
        );

        Ok(Self {
            path: path.to_path_buf(),
            tree,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render to an exact `size` x `size` square.
    ///
    /// The artwork is scaled uniformly to fit and centered. Without a
    /// background the canvas stays transparent.
    pub fn render(&self, size: u32, background: Option<Background>) -> Result<RgbaImage> {
        let mut pixmap = tiny_skia::Pixmap::new(size, size)
            .with_context(|| format!("Failed to allocate {size}x{size} pixmap"))?;

        if let Some(bg) = background {
            pixmap.fill(bg.to_skia());
        }

        let svg_size = self.tree.size();
        let side = size as f32;
        let scale = (side / svg_size.width()).min(side / svg_size.height());
        let dx = (side - svg_size.width() * scale) / 2.0;
        let dy = (side - svg_size.height() * scale) / 2.0;
        let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);

        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        // tiny-skia keeps premultiplied alpha; image expects straight alpha.
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        RgbaImage::from_raw(size, size, rgba)
            .with_context(|| format!("Rendered buffer does not match {size}x{size}"))
    }
}
