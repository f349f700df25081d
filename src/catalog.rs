//! The fixed set of icons produced from a logo, and where they land on disk.
//!
//! Nothing here touches the filesystem except [`OutputLayout::ensure_dirs`].
//! The catalog is a plain value so callers (and tests) can swap sizes without
//! any shared state.

use anyhow::{Context, Result};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

/// Sizes and safe-area settings for every artifact in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct IconCatalog {
    pub favicon_png_sizes: Vec<u32>,
    pub favicon_ico_sizes: Vec<u32>,
    pub pwa_sizes: Vec<u32>,
    pub apple_touch_size: u32,
    pub maskable_size: u32,
    /// Share of the maskable canvas the artwork may occupy (0.80 = 20% padding).
    pub maskable_safe_fraction: f32,
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self {
            favicon_png_sizes: vec![16, 32],
            favicon_ico_sizes: vec![16, 32, 48],
            pwa_sizes: vec![192, 256, 384, 512],
            apple_touch_size: 180,
            maskable_size: 512,
            maskable_safe_fraction: 0.80,
        }
    }
}

/// Which family an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Favicon,
    Pwa,
    AppleTouch,
}

/// How an artifact is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum IconKind {
    /// One render written straight to PNG.
    Png { size: u32 },
    /// One render per size, packed into a single ICO container.
    Ico { sizes: Vec<u32> },
    /// Full-size render shrunk into the safe area of a transparent canvas.
    Maskable { size: u32, safe_fraction: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    pub purpose: Purpose,
    pub kind: IconKind,
    pub path: PathBuf,
}

/// Base output directory and its three fixed subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub base: PathBuf,
    pub favicon_dir: PathBuf,
    pub pwa_dir: PathBuf,
    pub apple_dir: PathBuf,
}

impl OutputLayout {
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            favicon_dir: base.join("favicon"),
            pwa_dir: base.join("pwa"),
            apple_dir: base.join("apple"),
            base,
        }
    }

    /// Create all subdirectories. Existing directories are fine.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in self.dirs() {
            create_dir_all(dir)
                .with_context(|| format!("Can't create output directory {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn dirs(&self) -> [&Path; 3] {
        [
            self.favicon_dir.as_path(),
            self.pwa_dir.as_path(),
            self.apple_dir.as_path(),
        ]
    }
}

impl IconCatalog {
    /// Maskable safe-area edge length: `floor(size * fraction + 0.5)`, at least 1px.
    pub fn safe_size(size: u32, safe_fraction: f32) -> u32 {
        ((size as f64 * safe_fraction as f64 + 0.5).floor() as u32).max(1)
    }

    /// Expand the catalog into concrete artifacts, in generation order.
    pub fn specs(&self, layout: &OutputLayout, include_maskable: bool) -> Vec<IconSpec> {
        let mut specs = Vec::new();

        for &size in &self.favicon_png_sizes {
            specs.push(IconSpec {
                purpose: Purpose::Favicon,
                kind: IconKind::Png { size },
                path: layout.favicon_dir.join(format!("favicon-{size}x{size}.png")),
            });
        }

        specs.push(IconSpec {
            purpose: Purpose::Favicon,
            kind: IconKind::Ico {
                sizes: self.favicon_ico_sizes.clone(),
            },
            path: layout.favicon_dir.join("favicon.ico"),
        });

        for &size in &self.pwa_sizes {
            specs.push(IconSpec {
                purpose: Purpose::Pwa,
                kind: IconKind::Png { size },
                path: layout.pwa_dir.join(format!("icon-{size}x{size}.png")),
            });
        }

        let apple = self.apple_touch_size;
        specs.push(IconSpec {
            purpose: Purpose::AppleTouch,
            kind: IconKind::Png { size: apple },
            path: layout.apple_dir.join("apple-touch-icon.png"),
        });

        if include_maskable {
            let size = self.maskable_size;
            specs.push(IconSpec {
                purpose: Purpose::Pwa,
                kind: IconKind::Maskable {
                    size,
                    safe_fraction: self.maskable_safe_fraction,
                },
                path: layout
                    .pwa_dir
                    .join(format!("icon-maskable-{size}x{size}.png")),
            });
        }

        specs
    }
}
