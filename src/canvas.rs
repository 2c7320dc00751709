//! A square RGB raster with the handful of primitives the icon is drawn with.
//!
//! Coordinates are signed pixel positions; anything outside the canvas is
//! clipped. Boxes and lines are inclusive of their end points.

use crate::color::ColorSpec;
use crate::layout::{BoundingBox, Point};
use image::{ImageBuffer, RgbImage};

/// Stroke drawn along the inside edge of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: ColorSpec,
    pub width: i32,
}

/// The raster a single render draws into.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// A canvas painted with one solid color.
    pub fn filled(size: u32, color: ColorSpec) -> Self {
        Self {
            image: ImageBuffer::from_pixel(size, size, color),
        }
    }

    /// A canvas painted with a top-to-bottom gradient.
    ///
    /// Row `y` uses the ratio `y / size`, so the first row is exactly `top`
    /// while the last row stops one step short of `bottom`. Channels are
    /// truncated, not rounded.
    pub fn vertical_gradient(size: u32, top: ColorSpec, bottom: ColorSpec) -> Self {
        let mut canvas = Self {
            image: RgbImage::new(size, size),
        };
        let lerp = |from: u8, to: u8, ratio: f64| {
            (from as f64 + (to as f64 - from as f64) * ratio) as u8
        };

        for y in 0..size {
            let ratio = y as f64 / size as f64;
            let row = image::Rgb([
                lerp(top[0], bottom[0], ratio),
                lerp(top[1], bottom[1], ratio),
                lerp(top[2], bottom[2], ratio),
            ]);
            canvas.line_horizontal(0, size as i32, y as i32, 1, row);
        }

        canvas
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn pixel(&self, x: u32, y: u32) -> ColorSpec {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    fn put(&mut self, x: i32, y: i32, color: ColorSpec) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Visits every on-canvas pixel of `bbox`.
    fn for_each_in(
        &mut self,
        bbox: BoundingBox,
        mut paint: impl FnMut(i32, i32) -> Option<ColorSpec>,
    ) {
        let max = self.size() as i32 - 1;
        for y in bbox.y1.max(0)..=bbox.y2.min(max) {
            for x in bbox.x1.max(0)..=bbox.x2.min(max) {
                if let Some(color) = paint(x, y) {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Horizontal line from `x1` to `x2`. Widths above one grow downwards
    /// from `y - width / 2`.
    pub fn line_horizontal(&mut self, x1: i32, x2: i32, y: i32, width: i32, color: ColorSpec) {
        let (top, rows) = if width <= 1 {
            (y, 1)
        } else {
            (y - width / 2, width)
        };
        let (left, right) = (x1.min(x2), x1.max(x2));
        self.fill_rect(BoundingBox::new(left, top, right, top + rows - 1), color);
    }

    pub fn fill_rect(&mut self, bbox: BoundingBox, color: ColorSpec) {
        self.for_each_in(bbox, |_, _| Some(color));
    }

    /// Filled rectangle with circular corners of `radius` pixels.
    pub fn rounded_rectangle(
        &mut self,
        bbox: BoundingBox,
        radius: i32,
        fill: ColorSpec,
        outline: Option<Outline>,
    ) {
        let half_extent = ((bbox.x2 - bbox.x1).min(bbox.y2 - bbox.y1) as f64 / 2.0).max(0.0);
        let radius = (radius.max(0) as f64).min(half_extent);
        let outline = outline.filter(|o| o.width > 0);

        self.for_each_in(bbox, |x, y| {
            if !inside_rounded(bbox, radius, 0.0, x, y) {
                return None;
            }
            match outline {
                Some(o) if !inside_rounded(bbox, radius, o.width as f64, x, y) => Some(o.color),
                _ => Some(fill),
            }
        });
    }

    /// Fills a convex polygon. Pixels lying exactly on an edge are filled.
    pub fn polygon(&mut self, points: &[Point], color: ColorSpec) {
        let Some(bbox) = bounds(points) else {
            return;
        };
        self.for_each_in(bbox, |x, y| inside_convex(points, x, y).then_some(color));
    }

    /// Composites `color` over the pixel at `(x, y)` with `coverage` in `[0, 1]`.
    pub fn blend(&mut self, x: i32, y: i32, color: ColorSpec, coverage: f32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage >= 1.0 {
            self.put(x, y, color);
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let d = dst[channel] as f32;
            let s = color[channel] as f32;
            dst[channel] = (d + (s - d) * coverage).round() as u8;
        }
    }
}

fn inside_rounded(bbox: BoundingBox, radius: f64, inset: f64, x: i32, y: i32) -> bool {
    let (x, y) = (x as f64, y as f64);
    let x1 = bbox.x1 as f64 + inset;
    let y1 = bbox.y1 as f64 + inset;
    let x2 = bbox.x2 as f64 - inset;
    let y2 = bbox.y2 as f64 - inset;
    if x < x1 || x > x2 || y < y1 || y > y2 {
        return false;
    }

    let r = (radius - inset).max(0.0);
    let cx = x.clamp(x1 + r, (x2 - r).max(x1 + r));
    let cy = y.clamp(y1 + r, (y2 - r).max(y1 + r));
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

fn bounds(points: &[Point]) -> Option<BoundingBox> {
    let (&(x, y), rest) = points.split_first()?;
    Some(rest.iter().fold(BoundingBox::new(x, y, x, y), |b, &(x, y)| {
        BoundingBox::new(b.x1.min(x), b.y1.min(y), b.x2.max(x), b.y2.max(y))
    }))
}

fn inside_convex(points: &[Point], x: i32, y: i32) -> bool {
    let mut positive = false;
    let mut negative = false;
    for (i, &(ax, ay)) in points.iter().enumerate() {
        let (bx, by) = points[(i + 1) % points.len()];
        let cross = (bx - ax) as i64 * (y - ay) as i64 - (by - ay) as i64 * (x - ax) as i64;
        positive |= cross > 0;
        negative |= cross < 0;
        if positive && negative {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_rgb;
    use image::Rgb;

    const RED: ColorSpec = Rgb([255, 0, 0]);
    const BLACK: ColorSpec = Rgb([0, 0, 0]);

    #[test]
    fn test_gradient_first_row_is_top_color() {
        let top = hex_to_rgb("#0A1628");
        let bottom = hex_to_rgb("#0F2744");
        let canvas = Canvas::vertical_gradient(64, top, bottom);
        for x in 0..64 {
            assert_eq!(canvas.pixel(x, 0), top);
        }
    }

    #[test]
    fn test_gradient_last_row_approaches_bottom_color() {
        let size = 32;
        let top = Rgb([0, 255, 100]);
        let bottom = Rgb([255, 0, 100]);
        let canvas = Canvas::vertical_gradient(size, top, bottom);
        let last = canvas.pixel(0, size - 1);
        let tolerance = (255.0 / size as f64).round() as i32;
        for channel in 0..3 {
            let deviation = (last[channel] as i32 - bottom[channel] as i32).abs();
            assert!(deviation <= tolerance, "channel {channel} off by {deviation}");
        }
        assert_ne!(last, bottom);
    }

    #[test]
    fn test_gradient_truncates_channels() {
        // 0 + 255 * 1/4 = 63.75
        let canvas = Canvas::vertical_gradient(4, BLACK, Rgb([255, 255, 255]));
        assert_eq!(canvas.pixel(3, 1), Rgb([63, 63, 63]));
        assert_eq!(canvas.pixel(0, 3), Rgb([191, 191, 191]));
    }

    #[test]
    fn test_rounded_rectangle_skips_corners() {
        let mut canvas = Canvas::filled(100, BLACK);
        canvas.rounded_rectangle(BoundingBox::new(10, 10, 89, 89), 20, RED, None);
        assert_eq!(canvas.pixel(50, 50), RED);
        assert_eq!(canvas.pixel(10, 50), RED);
        assert_eq!(canvas.pixel(50, 89), RED);
        assert_eq!(canvas.pixel(10, 10), BLACK);
        assert_eq!(canvas.pixel(89, 89), BLACK);
        assert_eq!(canvas.pixel(9, 50), BLACK);
    }

    #[test]
    fn test_rounded_rectangle_outline() {
        let blue = Rgb([0, 0, 255]);
        let mut canvas = Canvas::filled(100, BLACK);
        let outline = Outline {
            color: blue,
            width: 3,
        };
        canvas.rounded_rectangle(BoundingBox::new(10, 10, 89, 89), 10, RED, Some(outline));
        assert_eq!(canvas.pixel(10, 50), blue);
        assert_eq!(canvas.pixel(12, 50), blue);
        assert_eq!(canvas.pixel(13, 50), RED);
        assert_eq!(canvas.pixel(50, 50), RED);
    }

    #[test]
    fn test_polygon_fills_triangle_and_edges() {
        let mut canvas = Canvas::filled(50, BLACK);
        canvas.polygon(&[(10, 10), (40, 10), (10, 40)], RED);
        assert_eq!(canvas.pixel(10, 10), RED);
        assert_eq!(canvas.pixel(25, 10), RED);
        assert_eq!(canvas.pixel(25, 25), RED);
        assert_eq!(canvas.pixel(15, 15), RED);
        assert_eq!(canvas.pixel(30, 30), BLACK);
        assert_eq!(canvas.pixel(9, 10), BLACK);
    }

    #[test]
    fn test_polygon_winding_does_not_matter() {
        let mut a = Canvas::filled(40, BLACK);
        let mut b = Canvas::filled(40, BLACK);
        a.polygon(&[(5, 5), (30, 8), (12, 35)], RED);
        b.polygon(&[(12, 35), (30, 8), (5, 5)], RED);
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn test_shapes_clip_to_canvas() {
        let mut canvas = Canvas::filled(20, BLACK);
        canvas.rounded_rectangle(BoundingBox::new(-30, -30, 50, 50), 5, RED, None);
        canvas.polygon(&[(-10, -10), (100, 0), (0, 100)], RED);
        canvas.line_horizontal(-5, 500, 19, 6, RED);
        canvas.blend(-1, 25, RED, 1.0);
        assert_eq!(canvas.pixel(19, 19), RED);
    }

    #[test]
    fn test_line_width_rows() {
        let mut canvas = Canvas::filled(20, BLACK);
        canvas.line_horizontal(2, 12, 10, 4, RED);
        assert_eq!(canvas.pixel(2, 8), RED);
        assert_eq!(canvas.pixel(12, 11), RED);
        assert_eq!(canvas.pixel(7, 7), BLACK);
        assert_eq!(canvas.pixel(7, 12), BLACK);
        assert_eq!(canvas.pixel(13, 10), BLACK);
    }

    #[test]
    fn test_blend_coverage() {
        let mut canvas = Canvas::filled(4, BLACK);
        canvas.blend(1, 1, Rgb([200, 100, 50]), 0.5);
        assert_eq!(canvas.pixel(1, 1), Rgb([100, 50, 25]));
        canvas.blend(2, 2, RED, 0.0);
        assert_eq!(canvas.pixel(2, 2), BLACK);
    }
}
