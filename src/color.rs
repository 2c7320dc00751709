//! Color helpers shared by the palette, the renderer and the CLI.

use image::Rgb;
use std::str::FromStr;

/// An opaque 8-bit RGB color.
pub type ColorSpec = Rgb<u8>;

/// Decodes a 6-digit hex color such as `"#0A1628"` or `"4A9EFF"`.
///
/// A leading `#` is optional. Anything other than exactly six hex digits
/// after stripping it is a caller bug and panics.
pub fn hex_to_rgb(hex: &str) -> ColorSpec {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    let channel = |offset: usize| {
        u8::from_str_radix(&hex[offset..offset + 2], 16)
            .unwrap_or_else(|_| panic!("invalid hex color channel in {hex:?}"))
    };
    Rgb([channel(0), channel(2), channel(4)])
}

/// Parses any CSS color notation into an opaque RGB color.
///
/// Used for palette overrides given on the command line. Alpha is dropped and
/// channels are rounded to the nearest 8-bit value, so hex input comes back
/// exactly as written.
pub fn parse_css_color(value: &str) -> Result<ColorSpec, String> {
    css_color::Srgb::from_str(value)
        .map(|color| {
            Rgb([
                (color.red * 255.).round() as u8,
                (color.green * 255.).round() as u8,
                (color.blue * 255.).round() as u8,
            ])
        })
        .map_err(|_| format!("`{value}` is not a valid CSS color"))
}
