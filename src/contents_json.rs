//! Contents.json data model for an Apple asset catalog app icon set
//!
//! Mirrors the subset of the Asset Catalog Format Reference needed for a
//! single-size app icon with appearance variants: one universal 1024pt image
//! per appearance, the dark and tinted ones tagged with a luminosity
//! appearance.

use crate::palette::Variant;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the manifest inside an `.appiconset` directory
pub const CONTENTS_FILENAME: &str = "Contents.json";

/// Root structure of a Contents.json file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentsFile {
    /// Array of image entries, one per appearance
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an asset catalog
///
/// Field order matches the order Xcode writes, so the output diffs cleanly
/// against a catalog saved by Xcode itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Appearance conditions; absent for the any-appearance image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearances: Option<Vec<Appearance>>,

    /// The filename of the image inside the icon set
    pub filename: String,

    /// The device type for the image (always "universal" here)
    pub idiom: String,

    /// The target platform (e.g., "ios")
    pub platform: String,

    /// The size of the image in points (e.g., "1024x1024")
    pub size: String,
}

/// A single appearance condition, e.g. `luminosity = dark`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub appearance: String,
    pub value: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// The application or tool that authored the asset catalog
    pub author: String,

    /// The format version of the asset catalog (always 1)
    pub version: u8,
}

impl ContentsFile {
    /// Creates an empty manifest with the given author
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            images: Vec::new(),
            info: Info {
                author: author.into(),
                version: 1,
            },
        }
    }

    /// Adds an image entry to the contents file
    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    /// Serializes with two-space indentation
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")
    }
}

impl Default for Info {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

impl ImageEntry {
    /// Creates a universal iOS entry of `size` pixels with no appearance
    pub fn universal_ios(filename: impl Into<String>, size: u32) -> Self {
        Self {
            appearances: None,
            filename: filename.into(),
            idiom: "universal".to_string(),
            platform: "ios".to_string(),
            size: format!("{size}x{size}"),
        }
    }

    /// Entry for one rendered icon variant
    pub fn for_variant(variant: Variant, size: u32) -> Self {
        let entry = Self::universal_ios(variant.filename(), size);
        match variant.luminosity() {
            Some(value) => entry.with_luminosity(value),
            None => entry,
        }
    }

    /// Tags the entry with a luminosity appearance ("dark" or "tinted")
    pub fn with_luminosity(mut self, value: impl Into<String>) -> Self {
        self.appearances = Some(vec![Appearance {
            appearance: "luminosity".to_string(),
            value: value.into(),
        }]);
        self
    }
}

/// Writes a Contents.json file listing `images` into `dir`
///
/// # Errors
/// Returns an error if JSON serialization or the file write fails.
pub fn write_contents_json(dir: &Path, images: Vec<ImageEntry>) -> Result<PathBuf> {
    let mut contents = ContentsFile::new(Info::default().author);
    for image in images {
        contents.add_image(image);
    }

    let contents_path = dir.join(CONTENTS_FILENAME);
    std::fs::write(&contents_path, contents.to_json()?)
        .with_context(|| format!("Failed to write {}", contents_path.display()))?;
    Ok(contents_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<ImageEntry> {
        Variant::ALL
            .iter()
            .map(|&variant| ImageEntry::for_variant(variant, 1024))
            .collect()
    }

    #[test]
    fn test_contents_file_creation() {
        let contents = ContentsFile::new("xcode");
        assert_eq!(contents.info.author, "xcode");
        assert_eq!(contents.info.version, 1);
        assert!(contents.images.is_empty());
    }

    #[test]
    fn test_variant_entries() {
        let images = all_variants();
        assert_eq!(images[0].filename, "AppIcon.png");
        assert!(images[0].appearances.is_none());
        assert_eq!(images[1].filename, "AppIcon-Dark.png");
        assert_eq!(
            images[1].appearances.as_deref(),
            Some(
                &[Appearance {
                    appearance: "luminosity".to_string(),
                    value: "dark".to_string(),
                }][..]
            )
        );
        assert_eq!(images[2].appearances.as_ref().unwrap()[0].value, "tinted");
        for image in &images {
            assert_eq!(image.idiom, "universal");
            assert_eq!(image.platform, "ios");
            assert_eq!(image.size, "1024x1024");
        }
    }

    #[test]
    fn test_apple_contents_json_format() {
        let mut contents = ContentsFile::new("xcode");
        for image in all_variants() {
            contents.add_image(image);
        }
        let json = contents.to_json().unwrap();

        let expected = r#"{
  "images": [
    {
      "filename": "AppIcon.png",
      "idiom": "universal",
      "platform": "ios",
      "size": "1024x1024"
    },
    {
      "appearances": [
        {
          "appearance": "luminosity",
          "value": "dark"
        }
      ],
      "filename": "AppIcon-Dark.png",
      "idiom": "universal",
      "platform": "ios",
      "size": "1024x1024"
    },
    {
      "appearances": [
        {
          "appearance": "luminosity",
          "value": "tinted"
        }
      ],
      "filename": "AppIcon-Tinted.png",
      "idiom": "universal",
      "platform": "ios",
      "size": "1024x1024"
    }
  ],
  "info": {
    "author": "xcode",
    "version": 1
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_write_contents_json() {
        let temp_dir = tempfile::tempdir().unwrap();

        let path = write_contents_json(temp_dir.path(), all_variants()).unwrap();
        assert_eq!(path, temp_dir.path().join("Contents.json"));

        let parsed: ContentsFile =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.images, all_variants());
        assert_eq!(parsed.info, Info::default());
    }

    #[test]
    fn test_custom_size_entry() {
        let entry = ImageEntry::universal_ios("AppIcon.png", 512);
        assert_eq!(entry.size, "512x512");
    }
}
