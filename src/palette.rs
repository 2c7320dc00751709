//! Per-variant colors and background rules.

use crate::color::{hex_to_rgb, ColorSpec};
use image::Rgb;
use std::fmt;

/// The appearance an icon is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Standard,
    Dark,
    Tinted,
}

impl Variant {
    /// Render order used by the generator.
    pub const ALL: [Variant; 3] = [Variant::Standard, Variant::Dark, Variant::Tinted];

    pub fn filename(&self) -> &'static str {
        match self {
            Variant::Standard => "AppIcon.png",
            Variant::Dark => "AppIcon-Dark.png",
            Variant::Tinted => "AppIcon-Tinted.png",
        }
    }

    /// The asset catalog luminosity value, `None` for the any-appearance image.
    pub fn luminosity(&self) -> Option<&'static str> {
        match self {
            Variant::Standard => None,
            Variant::Dark => Some("dark"),
            Variant::Tinted => Some("tinted"),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Standard => "standard",
            Variant::Dark => "dark",
            Variant::Tinted => "tinted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Top-to-bottom linear gradient.
    Gradient { top: ColorSpec, bottom: ColorSpec },
    Flat(ColorSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Fill of the left (front) bubble.
    pub primary: ColorSpec,
    /// Fill of the right (rear) bubble.
    pub secondary: ColorSpec,
    pub text_on_primary: ColorSpec,
    pub text_on_secondary: ColorSpec,
    pub arrow: ColorSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStyle {
    pub background: Background,
    pub palette: Palette,
}

/// Optional replacements for the brand colors of the standard and dark icons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrandOverrides {
    pub background_top: Option<ColorSpec>,
    pub background_bottom: Option<ColorSpec>,
    pub primary: Option<ColorSpec>,
    pub secondary: Option<ColorSpec>,
}

/// Immutable styling for every variant, handed to the renderer up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    standard: VariantStyle,
    dark: VariantStyle,
    tinted: VariantStyle,
}

impl RenderConfig {
    pub fn new(standard: VariantStyle, dark: VariantStyle, tinted: VariantStyle) -> Self {
        Self {
            standard,
            dark,
            tinted,
        }
    }

    pub fn style(&self, variant: Variant) -> &VariantStyle {
        match variant {
            Variant::Standard => &self.standard,
            Variant::Dark => &self.dark,
            Variant::Tinted => &self.tinted,
        }
    }

    /// Applies brand overrides to the colored variants. The tinted variant is
    /// recolored by the OS and keeps its grayscale palette.
    pub fn with_brand(mut self, brand: &BrandOverrides) -> Self {
        for style in [&mut self.standard, &mut self.dark] {
            if let Background::Gradient { top, bottom } = &mut style.background {
                *top = brand.background_top.unwrap_or(*top);
                *bottom = brand.background_bottom.unwrap_or(*bottom);
            }
            style.palette.primary = brand.primary.unwrap_or(style.palette.primary);
            style.palette.secondary = brand.secondary.unwrap_or(style.palette.secondary);
        }
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let background_dark = hex_to_rgb("#0A1628");
        let background_light = hex_to_rgb("#0F2744");
        let white = Rgb([255, 255, 255]);

        let colored = VariantStyle {
            background: Background::Gradient {
                top: background_dark,
                bottom: background_light,
            },
            palette: Palette {
                primary: hex_to_rgb("#4A9EFF"),
                secondary: hex_to_rgb("#2563EB"),
                text_on_primary: background_dark,
                text_on_secondary: white,
                arrow: white,
            },
        };

        let tinted = VariantStyle {
            background: Background::Flat(background_dark),
            palette: Palette {
                primary: Rgb([200, 200, 200]),
                secondary: Rgb([120, 120, 120]),
                text_on_primary: Rgb([50, 50, 50]),
                text_on_secondary: Rgb([240, 240, 240]),
                arrow: Rgb([180, 180, 180]),
            },
        };

        Self::new(colored, colored, tinted)
    }
}
