//! Font discovery.
//!
//! Fonts come from an ordered chain of [`FontProvider`]s; the first one that
//! loads wins. The generator uses [`FontSet::system`], tests can build their
//! own chains out of fake providers.

use rusttype::Font;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read font {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unparsable font data in {0}")]
    Invalid(String),
}

/// Something that can hand out a parsed font.
pub trait FontProvider {
    /// Human readable origin, used in log lines.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Font<'static>, FontError>;
}

/// A font file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FontProvider for FontFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Font<'static>, FontError> {
        if !self.path.exists() {
            return Err(FontError::Missing(self.path.clone()));
        }
        let data = std::fs::read(&self.path).map_err(|source| FontError::Io {
            path: self.path.clone(),
            source,
        })?;
        Font::try_from_vec(data).ok_or_else(|| FontError::Invalid(self.describe()))
    }
}

/// A font compiled into the binary, e.g. with `include_bytes!`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFont {
    name: &'static str,
    data: &'static [u8],
}

impl EmbeddedFont {
    pub const fn new(name: &'static str, data: &'static [u8]) -> Self {
        Self { name, data }
    }
}

impl FontProvider for EmbeddedFont {
    fn describe(&self) -> String {
        format!("embedded:{}", self.name)
    }

    fn load(&self) -> Result<Font<'static>, FontError> {
        Font::try_from_bytes(self.data).ok_or_else(|| FontError::Invalid(self.describe()))
    }
}

/// Latin-only outline font shipped with the tests.
#[cfg(test)]
pub(crate) fn dejavu_sans() -> EmbeddedFont {
    EmbeddedFont::new(
        "DejaVuSans.ttf",
        include_bytes!("../tests/fixtures/DejaVuSans.ttf"),
    )
}

/// Providers tried in priority order.
#[derive(Default)]
pub struct FontChain {
    providers: Vec<Box<dyn FontProvider>>,
}

impl FontChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut chain = Self::new();
        for path in paths {
            chain.push(FontFile::new(path.as_ref()));
        }
        chain
    }

    /// Adds a provider with the lowest priority.
    pub fn push(&mut self, provider: impl FontProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Adds a provider ahead of every existing one.
    pub fn prepend(&mut self, provider: impl FontProvider + 'static) {
        self.providers.insert(0, Box::new(provider));
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns the first font that loads, or `None` when every provider fails.
    pub fn resolve(&self) -> Option<Font<'static>> {
        self.first_loadable(None)
    }

    /// Like [`resolve`](Self::resolve), but also skips fonts that have no
    /// glyph for `ch`.
    pub fn resolve_for(&self, ch: char) -> Option<Font<'static>> {
        self.first_loadable(Some(ch))
    }

    fn first_loadable(&self, required: Option<char>) -> Option<Font<'static>> {
        for provider in &self.providers {
            match provider.load() {
                Ok(font) => match required {
                    Some(ch) if font.glyph(ch).id().0 == 0 => {
                        tracing::debug!("skipping font {}: no glyph for {ch:?}", provider.describe());
                    }
                    _ => {
                        tracing::debug!("using font {}", provider.describe());
                        return Some(font);
                    }
                },
                Err(FontError::Missing(path)) => {
                    tracing::trace!("font not present: {}", path.display());
                }
                Err(err) => {
                    tracing::debug!("skipping font {}: {err}", provider.describe());
                }
            }
        }
        None
    }
}

impl fmt::Debug for FontChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.describe()))
            .finish()
    }
}

const SYSTEM_LATIN_FONTS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNSText.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

const SYSTEM_BROAD_FONTS: &[&str] = &[
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
];

/// The two font chains a render needs.
#[derive(Debug, Default)]
pub struct FontSet {
    /// Fonts for the Latin label. The builtin bitmap font covers a miss.
    pub latin: FontChain,
    /// Fonts that can draw CJK text. A miss falls back to placeholder strokes.
    pub broad: FontChain,
}

impl FontSet {
    /// Well-known font locations on macOS and common Linux distributions.
    pub fn system() -> Self {
        Self {
            latin: FontChain::from_paths(SYSTEM_LATIN_FONTS),
            broad: FontChain::from_paths(SYSTEM_BROAD_FONTS),
        }
    }

    /// No fonts at all: labels always use the builtin font and strokes.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Width of a builtin glyph in cells.
pub const BUILTIN_GLYPH_WIDTH: u32 = 5;
/// Height of a builtin glyph in cells.
pub const BUILTIN_GLYPH_HEIGHT: u32 = 7;

/// Minimal 5x7 bitmap font for upper-case Latin letters, used when no
/// outline font can be found. Each row keeps its leftmost cell in bit 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinFont;

impl BuiltinFont {
    pub fn rows(&self, ch: char) -> Option<&'static [u8; 7]> {
        let index = (ch as u32).checked_sub('A' as u32)? as usize;
        ch.is_ascii_uppercase().then(|| &BUILTIN_GLYPHS[index])
    }

    /// Whether cell `(col, row)` of `ch` is set.
    pub fn cell(&self, ch: char, col: u32, row: u32) -> bool {
        if col >= BUILTIN_GLYPH_WIDTH || row >= BUILTIN_GLYPH_HEIGHT {
            return false;
        }
        self.rows(ch)
            .map(|rows| rows[row as usize] & (0x10 >> col) != 0)
            .unwrap_or(false)
    }
}

#[rustfmt::skip]
const BUILTIN_GLYPHS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every load attempt and always fails.
    struct Unavailable {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl FontProvider for Unavailable {
        fn describe(&self) -> String {
            self.name.to_string()
        }

        fn load(&self) -> Result<Font<'static>, FontError> {
            self.log.borrow_mut().push(self.name);
            Err(FontError::Invalid(self.name.to_string()))
        }
    }

    #[test]
    fn test_chain_tries_providers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = FontChain::new();
        chain.push(Unavailable {
            name: "second",
            log: log.clone(),
        });
        chain.push(Unavailable {
            name: "third",
            log: log.clone(),
        });
        chain.prepend(Unavailable {
            name: "first",
            log: log.clone(),
        });

        assert!(chain.resolve().is_none());
        assert_eq!(*log.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn test_missing_font_file() {
        let file = FontFile::new("/definitely/not/here/font.ttf");
        assert!(matches!(file.load(), Err(FontError::Missing(_))));
    }

    #[test]
    fn test_garbage_font_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let file = FontFile::new(&path);
        assert!(matches!(file.load(), Err(FontError::Invalid(_))));

        let chain = FontChain::from_paths(&[path]);
        assert_eq!(chain.len(), 1);
        assert!(chain.resolve().is_none());
    }

    #[test]
    fn test_empty_set_has_no_providers() {
        let fonts = FontSet::empty();
        assert!(fonts.latin.is_empty());
        assert!(fonts.broad.is_empty());
        assert!(fonts.latin.resolve().is_none());
    }

    #[test]
    fn test_system_set_prefers_macos_paths() {
        let fonts = FontSet::system();
        let listed = format!("{:?}", fonts.latin);
        assert!(listed.starts_with("[\"/System/Library/Fonts/Helvetica.ttc\""));
        assert_eq!(fonts.broad.len(), SYSTEM_BROAD_FONTS.len());
    }

    #[test]
    fn test_embedded_font_loads() {
        let font = dejavu_sans().load().unwrap();
        assert_ne!(font.glyph('A').id().0, 0);
        assert!(EmbeddedFont::new("junk", b"junk").load().is_err());
    }

    #[test]
    fn test_resolve_for_skips_fonts_without_the_glyph() {
        let mut chain = FontChain::new();
        chain.push(dejavu_sans());

        // DejaVu Sans has Latin but no CJK coverage.
        assert!(chain.resolve().is_some());
        assert!(chain.resolve_for('A').is_some());
        assert!(chain.resolve_for('文').is_none());
    }

    #[test]
    fn test_resolve_for_falls_through_to_next_provider() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = FontChain::new();
        chain.push(dejavu_sans());
        chain.push(Unavailable {
            name: "cjk",
            log: log.clone(),
        });

        assert!(chain.resolve_for('文').is_none());
        assert_eq!(*log.borrow(), ["cjk"]);
    }

    #[test]
    fn test_builtin_font_cells() {
        let font = BuiltinFont;
        // Apex of the A is the middle three cells.
        assert!(!font.cell('A', 0, 0));
        assert!(font.cell('A', 1, 0));
        assert!(font.cell('A', 3, 0));
        assert!(!font.cell('A', 4, 0));
        // Crossbar spans the whole row.
        assert!((0..5).all(|col| font.cell('A', col, 3)));
        assert!(font.rows('Z').is_some());
        assert!(font.rows('a').is_none());
        assert!(font.rows('文').is_none());
        assert!(!font.cell('A', 5, 0));
    }
}
