//! Icon geometry on the 1024-unit design grid, scaled to an output size.

/// Side length of the square design grid every coordinate is written in.
pub const DESIGN_GRID: u32 = 1024;

/// An axis-aligned rectangle in canvas pixels, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Integer midpoint, used as the anchor for centred labels.
    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Overlapping region of two boxes, if any.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);
        (x1 <= x2 && y1 <= y2).then_some(BoundingBox { x1, y1, x2, y2 })
    }
}

/// A pixel position on the canvas.
pub type Point = (i32, i32);

/// Geometry of the three placeholder strokes drawn when no wide-coverage
/// font is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeLayout {
    /// Distance of the first stroke above the bubble centre.
    pub start_offset: i32,
    pub spacing: i32,
    pub half_width: i32,
    /// How much shorter each stroke is than the one above it.
    pub decrement: i32,
    pub width: i32,
}

/// The double-headed arrow between the two bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowLayout {
    pub center: Point,
    pub half_length: i32,
    pub head: i32,
    pub line_width: i32,
}

impl ArrowLayout {
    pub fn left_head(&self) -> [Point; 3] {
        let (x, y) = self.center;
        let tip = x - self.half_length;
        [
            (tip, y),
            (tip + self.head, y - self.head),
            (tip + self.head, y + self.head),
        ]
    }

    pub fn right_head(&self) -> [Point; 3] {
        let (x, y) = self.center;
        let tip = x + self.half_length;
        [
            (tip, y),
            (tip - self.head, y - self.head),
            (tip - self.head, y + self.head),
        ]
    }
}

/// Every coordinate the renderer needs, already scaled to one output size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub size: u32,
    pub bubble_radius: i32,
    /// The larger, front bubble carrying the Latin label.
    pub left_bubble: BoundingBox,
    pub left_tail: [Point; 3],
    /// The rear bubble, partly covered by the left one.
    pub right_bubble: BoundingBox,
    pub right_tail: [Point; 3],
    pub large_label: u32,
    pub small_label: u32,
    pub strokes: StrokeLayout,
    pub arrow: ArrowLayout,
}

impl Layout {
    pub fn for_size(size: u32) -> Self {
        let scale = size as f64 / DESIGN_GRID as f64;
        let s = |v: i32| (v as f64 * scale) as i32;
        let p = |x: i32, y: i32| (s(x), s(y));

        Self {
            size,
            bubble_radius: s(60),
            left_bubble: BoundingBox::new(s(180), s(220), s(580), s(520)),
            left_tail: [p(280, 520), p(200, 600), p(330, 520)],
            right_bubble: BoundingBox::new(s(440), s(480), s(840), s(780)),
            right_tail: [p(750, 780), p(820, 850), p(700, 780)],
            large_label: s(140) as u32,
            small_label: s(100) as u32,
            strokes: StrokeLayout {
                start_offset: s(30),
                spacing: s(25),
                half_width: s(60),
                decrement: s(20),
                width: s(8),
            },
            arrow: ArrowLayout {
                center: p(510, 500),
                half_length: s(40),
                head: s(15),
                line_width: s(6),
            },
        }
    }
}
