//! Procedural app icon generator.
//!
//! Draws the chat-bubble icon (two overlapping speech bubbles with an "A",
//! a "文" and a double-headed arrow) in its standard, dark and tinted
//! appearances, and writes the asset catalog `Contents.json` describing them.
//!
//! ```no_run
//! use chat_icon_gen::{generate_icons, GenerateOptions, IconRenderer};
//!
//! let renderer = IconRenderer::default();
//! generate_icons(&renderer, &GenerateOptions::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod canvas;
pub mod color;
pub mod contents_json;
pub mod fonts;
pub mod generate;
pub mod labels;
pub mod layout;
pub mod palette;
pub mod renderer;

pub use fonts::{EmbeddedFont, FontChain, FontFile, FontProvider, FontSet};
pub use generate::{generate_icons, GenerateOptions, GenerateReport};
pub use palette::{BrandOverrides, RenderConfig, Variant};
pub use renderer::IconRenderer;
