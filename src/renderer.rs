//! Draws one icon: background, bubbles, labels, arrow.

use crate::canvas::Canvas;
use crate::fonts::FontSet;
use crate::labels::{draw_labels, LabelOutcome};
use crate::layout::Layout;
use crate::palette::{Background, Palette, RenderConfig, Variant};
use image::RgbImage;

/// Renders icons from a fixed configuration and font source.
#[derive(Debug)]
pub struct IconRenderer {
    config: RenderConfig,
    fonts: FontSet,
}

impl IconRenderer {
    pub fn new(config: RenderConfig, fonts: FontSet) -> Self {
        Self { config, fonts }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders a `size` x `size` icon. Same inputs, same pixels.
    pub fn render(&self, size: u32, variant: Variant) -> RgbImage {
        self.render_with_outcome(size, variant).0
    }

    /// Like [`render`](Self::render), also reporting how the labels were
    /// drawn. `None` means the label layer failed and was left out.
    pub fn render_with_outcome(
        &self,
        size: u32,
        variant: Variant,
    ) -> (RgbImage, Option<LabelOutcome>) {
        let style = self.config.style(variant);
        let layout = Layout::for_size(size);

        let mut canvas = paint_background(size, &style.background);
        draw_bubbles(&mut canvas, &layout, &style.palette);

        let labels = match draw_labels(&mut canvas, &layout, &style.palette, &self.fonts) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(%variant, size, "label layer skipped: {err}");
                None
            }
        };

        draw_arrow(&mut canvas, &layout, &style.palette);
        (canvas.into_image(), labels)
    }
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default(), FontSet::system())
    }
}

fn paint_background(size: u32, background: &Background) -> Canvas {
    match *background {
        Background::Gradient { top, bottom } => Canvas::vertical_gradient(size, top, bottom),
        Background::Flat(color) => Canvas::filled(size, color),
    }
}

/// Rear bubble first so the front bubble covers it where they overlap.
fn draw_bubbles(canvas: &mut Canvas, layout: &Layout, palette: &Palette) {
    canvas.rounded_rectangle(
        layout.right_bubble,
        layout.bubble_radius,
        palette.secondary,
        None,
    );
    canvas.polygon(&layout.right_tail, palette.secondary);

    canvas.rounded_rectangle(
        layout.left_bubble,
        layout.bubble_radius,
        palette.primary,
        None,
    );
    canvas.polygon(&layout.left_tail, palette.primary);
}

fn draw_arrow(canvas: &mut Canvas, layout: &Layout, palette: &Palette) {
    let arrow = layout.arrow;
    let (x, y) = arrow.center;
    canvas.line_horizontal(
        x - arrow.half_length,
        x + arrow.half_length,
        y,
        arrow.line_width,
        palette.arrow,
    );
    canvas.polygon(&arrow.left_head(), palette.arrow);
    canvas.polygon(&arrow.right_head(), palette.arrow);
}
