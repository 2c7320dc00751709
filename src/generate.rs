use crate::contents_json::{write_contents_json, ImageEntry};
use crate::palette::Variant;
use crate::renderer::IconRenderer;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Where the icon set lives inside the app project.
pub const DEFAULT_OUTPUT_DIR: &str = "lingo_journey/Assets.xcassets/AppIcon.appiconset";

/// Asset catalog app icons are a single 1024px image.
pub const DEFAULT_SIZE: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub size: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            size: DEFAULT_SIZE,
        }
    }
}

/// Files written by one run, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub icons: Vec<PathBuf>,
    pub contents: PathBuf,
}

/// Renders every variant into `options.output` and writes the manifest.
///
/// Runs strictly in order. A failure aborts the run and leaves files that
/// were already written in place.
pub fn generate_icons(
    renderer: &IconRenderer,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    std::fs::create_dir_all(&options.output).with_context(|| {
        format!("Can't create output directory {}", options.output.display())
    })?;

    let mut icons = Vec::with_capacity(Variant::ALL.len());
    let mut images = Vec::with_capacity(Variant::ALL.len());

    for variant in Variant::ALL {
        let filename = variant.filename();
        println!("Generating {filename}...");

        let icon = renderer.render(options.size, variant);
        let output_path = options.output.join(filename);
        save_png(&icon, &output_path)?;
        println!("  ✓ Generated {}", output_path.display());

        icons.push(output_path);
        images.push(ImageEntry::for_variant(variant, options.size));
    }

    let contents = write_contents_json(&options.output, images)?;
    println!("  ✓ Generated {}", contents.display());

    Ok(GenerateReport { icons, contents })
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(image, &mut out).with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
    Ok(())
}
