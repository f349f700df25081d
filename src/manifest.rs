//! Usage hints printed after a run: web manifest icon entries and HTML link tags.
//!
//! These mirror what the generated files are for. The `icons` array follows the
//! Web App Manifest schema (`src`, `sizes`, `type`, optional `purpose`).

use crate::catalog::{IconKind, IconSpec, Purpose};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Component, Path};

/// Root of the `manifest.json` fragment.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ManifestIcons {
    pub icons: Vec<ManifestIcon>,
}

/// One entry of a web manifest `icons` array.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ManifestIcon {
    pub src: String,

    /// `"<w>x<h>"`
    pub sizes: String,

    #[serde(rename = "type")]
    pub mime_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ManifestIcon {
    fn png(src: String, size: u32) -> Self {
        Self {
            src,
            sizes: format!("{size}x{size}"),
            mime_type: "image/png".to_string(),
            purpose: None,
        }
    }

    fn with_purpose(mut self, purpose: &str) -> Self {
        self.purpose = Some(purpose.to_string());
        self
    }
}

/// Used when the output directory says nothing about the site layout.
pub const DEFAULT_HREF_BASE: &str = "/assets/icons";

fn is_site_relative(base: &Path) -> bool {
    base.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Site-absolute href for `path`, a file under the output directory `base`.
///
/// A relative `base` of plain names maps onto the site root, so `assets/icons`
/// gives `/assets/icons/pwa/icon-192x192.png`. An absolute `base` or one
/// containing `..` falls back to [`DEFAULT_HREF_BASE`].
pub fn href(base: &Path, path: &Path) -> String {
    let prefix = if is_site_relative(base) {
        let base = url_path(base);
        if base.is_empty() {
            String::new()
        } else {
            format!("/{base}")
        }
    } else {
        DEFAULT_HREF_BASE.to_string()
    };

    let rest = path.strip_prefix(base).unwrap_or(path);
    format!("{prefix}/{}", url_path(rest))
}

/// Manifest entries for every PWA artifact in `specs`, which live under `base`.
pub fn manifest_icons(base: &Path, specs: &[IconSpec]) -> ManifestIcons {
    let icons = specs
        .iter()
        .filter(|spec| spec.purpose == Purpose::Pwa)
        .filter_map(|spec| match spec.kind {
            IconKind::Png { size } => Some(ManifestIcon::png(href(base, &spec.path), size)),
            IconKind::Maskable { size, .. } => {
                Some(ManifestIcon::png(href(base, &spec.path), size).with_purpose("maskable"))
            }
            IconKind::Ico { .. } => None,
        })
        .collect();

    ManifestIcons { icons }
}

pub fn manifest_json(base: &Path, specs: &[IconSpec]) -> Result<String> {
    serde_json::to_string_pretty(&manifest_icons(base, specs))
        .context("Failed to serialize manifest icons")
}

/// `<link>` tags for the favicon and Apple touch artifacts in `specs`.
pub fn html_links(base: &Path, specs: &[IconSpec]) -> Vec<String> {
    let mut links = Vec::new();

    for spec in specs {
        let href = href(base, &spec.path);
        match (spec.purpose, &spec.kind) {
            (Purpose::Favicon, IconKind::Ico { .. }) => {
                links.push(format!(r#"<link rel="icon" href="{href}">"#));
            }
            (Purpose::Favicon, IconKind::Png { size }) => {
                links.push(format!(
                    r#"<link rel="icon" type="image/png" sizes="{size}x{size}" href="{href}">"#
                ));
            }
            (Purpose::AppleTouch, IconKind::Png { size }) => {
                links.push(format!(
                    r#"<link rel="apple-touch-icon" sizes="{size}x{size}" href="{href}">"#
                ));
            }
            _ => {}
        }
    }

    links
}
