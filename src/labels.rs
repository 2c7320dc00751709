//! The glyph layer: "A" in the front bubble, "文" in the rear one.
//!
//! Drawing labels is allowed to fail. The renderer logs the error and ships
//! the icon without the rest of the layer.

use crate::canvas::Canvas;
use crate::color::ColorSpec;
use crate::fonts::{BuiltinFont, FontSet, BUILTIN_GLYPH_HEIGHT, BUILTIN_GLYPH_WIDTH};
use crate::layout::{BoundingBox, Layout, Point};
use crate::palette::Palette;
use rusttype::{point, Font, Scale};
use thiserror::Error;

pub const LATIN_LABEL: char = 'A';
pub const BROAD_LABEL: char = '文';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("glyph {0:?} has no pixels at {1}px")]
    EmptyGlyph(char, u32),
}

/// What ended up in the front bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatinFace {
    Outline,
    Builtin,
}

/// What ended up in the rear bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadFace {
    Glyph,
    Strokes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOutcome {
    pub latin: LatinFace,
    pub broad: BroadFace,
}

/// One horizontal placeholder stroke, end points inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub x1: i32,
    pub x2: i32,
    pub y: i32,
    pub width: i32,
}

impl Stroke {
    pub fn length(&self) -> i32 {
        self.x2 - self.x1
    }
}

pub fn draw_labels(
    canvas: &mut Canvas,
    layout: &Layout,
    palette: &Palette,
    fonts: &FontSet,
) -> Result<LabelOutcome, LabelError> {
    let left_center = layout.left_bubble.center();
    let latin = match fonts.latin.resolve_for(LATIN_LABEL) {
        Some(font) => {
            draw_outline_glyph(
                canvas,
                &font,
                LATIN_LABEL,
                layout.large_label,
                left_center,
                palette.text_on_primary,
            )?;
            LatinFace::Outline
        }
        None => {
            draw_builtin_glyph(
                canvas,
                LATIN_LABEL,
                layout.large_label,
                left_center,
                palette.text_on_primary,
            )?;
            LatinFace::Builtin
        }
    };

    let broad = match fonts.broad.resolve_for(BROAD_LABEL) {
        Some(font) => {
            draw_outline_glyph(
                canvas,
                &font,
                BROAD_LABEL,
                layout.small_label,
                layout.right_bubble.center(),
                palette.text_on_secondary,
            )?;
            BroadFace::Glyph
        }
        None => {
            tracing::debug!("no CJK font found, drawing placeholder strokes");
            for stroke in placeholder_strokes(layout) {
                canvas.line_horizontal(
                    stroke.x1,
                    stroke.x2,
                    stroke.y,
                    stroke.width,
                    palette.text_on_secondary,
                );
            }
            BroadFace::Strokes
        }
    };

    Ok(LabelOutcome { latin, broad })
}

/// Three lines suggesting text, each shorter than the last, anchored on the
/// left and stacked downwards through the rear bubble's centre.
pub fn placeholder_strokes(layout: &Layout) -> [Stroke; 3] {
    let (cx, cy) = layout.right_bubble.center();
    let s = layout.strokes;
    let top = cy - s.start_offset;
    [0, 1, 2].map(|i| Stroke {
        x1: cx - s.half_width,
        x2: cx + s.half_width - i * s.decrement,
        y: top + i * s.spacing,
        width: s.width,
    })
}

/// Draws `ch` with its advance box centred horizontally on `center` and its
/// line box (ascent to descent) centred vertically.
fn draw_outline_glyph(
    canvas: &mut Canvas,
    font: &Font<'_>,
    ch: char,
    px: u32,
    center: Point,
    color: ColorSpec,
) -> Result<(), LabelError> {
    let glyph = font.glyph(ch);
    if glyph.id().0 == 0 {
        return Err(LabelError::MissingGlyph(ch));
    }
    if px == 0 {
        return Err(LabelError::EmptyGlyph(ch, px));
    }

    let scale = Scale::uniform(px as f32);
    let v_metrics = font.v_metrics(scale);
    let glyph = glyph.scaled(scale);
    let advance = glyph.h_metrics().advance_width;
    let (cx, cy) = center;
    let origin = point(
        cx as f32 - advance / 2.0,
        cy as f32 + (v_metrics.ascent + v_metrics.descent) / 2.0,
    );

    let glyph = glyph.positioned(origin);
    let bounds = glyph
        .pixel_bounding_box()
        .ok_or(LabelError::EmptyGlyph(ch, px))?;
    glyph.draw(|x, y, coverage| {
        canvas.blend(bounds.min.x + x as i32, bounds.min.y + y as i32, color, coverage);
    });
    Ok(())
}

/// Draws `ch` from the builtin bitmap font. Cells are a tenth of the label
/// size, so the glyph is about as tall as an outline capital.
fn draw_builtin_glyph(
    canvas: &mut Canvas,
    ch: char,
    px: u32,
    center: Point,
    color: ColorSpec,
) -> Result<(), LabelError> {
    let font = BuiltinFont;
    if font.rows(ch).is_none() {
        return Err(LabelError::MissingGlyph(ch));
    }
    if px == 0 {
        return Err(LabelError::EmptyGlyph(ch, px));
    }

    let cell = (px / 10).max(1) as i32;
    let (cx, cy) = center;
    let left = cx - BUILTIN_GLYPH_WIDTH as i32 * cell / 2;
    let top = cy - BUILTIN_GLYPH_HEIGHT as i32 * cell / 2;

    for row in 0..BUILTIN_GLYPH_HEIGHT {
        for col in 0..BUILTIN_GLYPH_WIDTH {
            if font.cell(ch, col, row) {
                let x = left + col as i32 * cell;
                let y = top + row as i32 * cell;
                canvas.fill_rect(BoundingBox::new(x, y, x + cell - 1, y + cell - 1), color);
            }
        }
    }
    Ok(())
}
