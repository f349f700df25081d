use crate::{
    catalog::{IconCatalog, IconKind, IconSpec, OutputLayout},
    manifest,
    render::{Background, SvgSource},
};
use anyhow::{Context, Result};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    imageops::FilterType,
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub overwrite: bool,
    pub include_maskable: bool,
    pub background: Option<Background>,
}

/// What happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// The file was already there and overwriting was not requested.
    Skipped,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl GenerationReport {
    fn record(&mut self, path: PathBuf, outcome: Outcome) {
        match outcome {
            Outcome::Written => self.written.push(path),
            Outcome::Skipped => self.skipped.push(path),
        }
    }
}

/// Check the input before anything is created on disk.
pub fn validate_input(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("SVG not found: {}", path.display());
    }

    let is_svg = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if !is_svg {
        anyhow::bail!("Input must be an .svg file: {}", path.display());
    }

    Ok(())
}

/// An artifact is produced when it is missing or overwriting was requested.
pub fn should_write(path: &Path, overwrite: bool) -> bool {
    overwrite || !path.exists()
}

/// Render every artifact of `catalog` from the SVG in `opts`.
///
/// Stops at the first failure; files written before it stay on disk.
pub fn generate(opts: &GenerateOptions, catalog: &IconCatalog) -> Result<GenerationReport> {
    validate_input(&opts.input)?;
    let source = SvgSource::load(&opts.input)?;

    let layout = OutputLayout::from_base(&opts.output);
    layout.ensure_dirs()?;

    let mut report = GenerationReport::default();
    for spec in catalog.specs(&layout, opts.include_maskable) {
        let outcome = produce(&source, &spec, opts)?;
        report.record(spec.path, outcome);
    }

    Ok(report)
}

/// Run a full generation and print the summary, as the CLI does.
pub fn generate_icons(opts: GenerateOptions) -> Result<()> {
    let catalog = IconCatalog::default();
    let report = generate(&opts, &catalog)?;

    let layout = OutputLayout::from_base(&opts.output);
    let specs = catalog.specs(&layout, opts.include_maskable);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, &opts, &report, &specs)?;
    out.flush()?;
    Ok(())
}

fn produce(source: &SvgSource, spec: &IconSpec, opts: &GenerateOptions) -> Result<Outcome> {
    if !should_write(&spec.path, opts.overwrite) {
        tracing::debug!(path = %spec.path.display(), "exists, skipping");
        return Ok(Outcome::Skipped);
    }

    tracing::debug!(
        source = %source.path().display(),
        path = %spec.path.display(),
        "rendering"
    );

    match &spec.kind {
        IconKind::Png { size } => {
            let image = source.render(*size, opts.background)?;
            save_png(&image, &spec.path)?;
        }
        IconKind::Ico { sizes } => save_ico(source, &spec.path, sizes)?,
        IconKind::Maskable {
            size,
            safe_fraction,
        } => {
            let image = render_maskable(source, *size, *safe_fraction)?;
            save_png(&image, &spec.path)?;
        }
    }

    println!("  ✓ Generated {}", display_path(&spec.path));
    Ok(Outcome::Written)
}

/// Full-size transparent render shrunk into the safe area and centered.
pub fn render_maskable(source: &SvgSource, size: u32, safe_fraction: f32) -> Result<RgbaImage> {
    let full = source.render(size, None)?;

    let safe_size = IconCatalog::safe_size(size, safe_fraction);
    // Resample premultiplied so transparent black does not bleed into edges.
    let mut content = image::imageops::resize(
        &premultiplied(full),
        safe_size,
        safe_size,
        FilterType::Lanczos3,
    );
    demultiply(&mut content);

    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let offset = size.saturating_sub(safe_size) / 2;
    image::imageops::overlay(&mut canvas, &content, offset.into(), offset.into());

    tracing::debug!(size, safe_size, offset, "composited maskable icon");
    Ok(canvas)
}

fn premultiplied(mut image: RgbaImage) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * alpha + 127) / 255) as u8;
        }
    }
    image
}

fn demultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        if alpha == 0 {
            pixel.0 = [0, 0, 0, 0];
            continue;
        }
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
}

/// Each ICO frame gets its own render so small sizes stay crisp.
fn save_ico(source: &SvgSource, path: &Path, sizes: &[u32]) -> Result<()> {
    let mut frames = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let image = source.render(size, None)?;
        frames.push(
            IcoFrame::as_png(image.as_raw(), size, size, ColorType::Rgba8)
                .with_context(|| format!("Failed to encode {size}x{size} ICO frame"))?,
        );
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create ICO file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    IcoEncoder::new(&mut out_file)
        .encode_images(&frames)
        .with_context(|| format!("Failed to write ICO {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    write_png(image.as_raw(), &mut out_file, image.width(), image.height())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}

/// Path relative to the working directory when it lives below it.
fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Human-readable end-of-run report with HTML and manifest snippets.
pub fn write_summary<W: Write>(
    out: &mut W,
    opts: &GenerateOptions,
    report: &GenerationReport,
    specs: &[IconSpec],
) -> Result<()> {
    let out_dir = opts
        .output
        .canonicalize()
        .unwrap_or_else(|_| opts.output.clone());

    writeln!(out)?;
    writeln!(out, "Icon generation complete.")?;
    writeln!(out, "Source SVG: {}", opts.input.display())?;
    writeln!(out, "Output dir: {}", out_dir.display())?;
    if let Some(bg) = opts.background {
        writeln!(out, "Background: {bg}")?;
    }

    if !report.written.is_empty() {
        writeln!(out)?;
        writeln!(out, "Written:")?;
        for path in &report.written {
            writeln!(out, "  - {}", display_path(path))?;
        }
    }
    if !report.skipped.is_empty() {
        writeln!(out)?;
        writeln!(out, "Skipped (already exists; use --overwrite to replace):")?;
        for path in &report.skipped {
            writeln!(out, "  - {}", display_path(path))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    writeln!(out, "  - Reference favicon and apple-touch-icon in HTML <head>:")?;
    for link in manifest::html_links(&opts.output, specs) {
        writeln!(out, "    {link}")?;
    }
    writeln!(out, "  - Reference PWA icons in manifest.json:")?;
    for line in manifest::manifest_json(&opts.output, specs)?.lines() {
        writeln!(out, "    {line}")?;
    }

    Ok(())
}
