use serde::{Deserialize, Serialize};

pub use kurbo::{Point, Rect, Size};

/// Integer rectangle in content or screen pixels, stored as origin + extent.
///
/// A rectangle with a non-positive width or height is empty. The canonical empty value is
/// [`IntRect::ZERO`], which is also the "redraw everything" sentinel reported to the host.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IntRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl IntRect {
    /// All-zero rectangle.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Build from origin and extent.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from edges. `right`/`bottom` are exclusive.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Truncate a float rectangle component-wise (origin and extent separately).
    pub fn from_rect_truncating(r: Rect) -> Self {
        Self {
            x: r.x0 as i32,
            y: r.y0 as i32,
            width: r.width() as i32,
            height: r.height() as i32,
        }
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Return `true` when the rectangle covers no area.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Smallest rectangle enclosing both. Empty operands are ignored.
    pub fn unite(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Self::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grow by `d` on every side.
    pub fn inflate(self, d: i32) -> Self {
        Self {
            x: self.x.saturating_sub(d),
            y: self.y.saturating_sub(d),
            width: self.width.saturating_add(d.saturating_mul(2)),
            height: self.height.saturating_add(d.saturating_mul(2)),
        }
    }

    /// Return `true` when both rectangles are non-empty and overlap.
    pub fn intersects(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Return `true` when `other` lies entirely inside `self`.
    pub fn contains(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Parts of `self` outside `other`, as up to four disjoint bands.
    pub fn subtract(self, other: Self) -> Vec<Self> {
        if !self.intersects(other) {
            return if self.is_empty() { Vec::new() } else { vec![self] };
        }
        let mut out = Vec::with_capacity(4);
        let (top, bottom) = (self.y.max(other.y), self.bottom().min(other.bottom()));
        if self.y < other.y {
            out.push(Self::from_ltrb(self.x, self.y, self.right(), other.y));
        }
        if other.bottom() < self.bottom() {
            out.push(Self::from_ltrb(self.x, other.bottom(), self.right(), self.bottom()));
        }
        if self.x < other.x {
            out.push(Self::from_ltrb(self.x, top, other.x, bottom));
        }
        if other.right() < self.right() {
            out.push(Self::from_ltrb(other.right(), top, self.right(), bottom));
        }
        out
    }

    /// Convert to a float rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

/// Union of integer rectangles.
///
/// Only the covered area matters: insertion order is irrelevant, empty rectangles are dropped and
/// rectangles already covered by a member are not stored twice.
#[derive(Clone, Debug, Default)]
pub struct Region {
    rects: Vec<IntRect>,
}

impl Region {
    /// Empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of all rectangles yielded by `rects`.
    pub fn from_rects(rects: impl IntoIterator<Item = IntRect>) -> Self {
        let mut region = Self::new();
        for r in rects {
            region.union_rect(r);
        }
        region
    }

    /// Add `r` to the covered area.
    pub fn union_rect(&mut self, r: IntRect) {
        if r.is_empty() || self.rects.iter().any(|e| e.contains(r)) {
            return;
        }
        self.rects.retain(|e| !r.contains(*e));
        self.rects.push(r);
    }

    /// Return `true` when nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Drop every rectangle.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Bounding box of the covered area, [`IntRect::ZERO`] when empty.
    pub fn bounds(&self) -> IntRect {
        self.rects
            .iter()
            .fold(IntRect::ZERO, |acc, r| acc.unite(*r))
    }

    /// Parts of `r` the region does not cover, as disjoint rectangles.
    pub fn uncovered(&self, r: IntRect) -> Vec<IntRect> {
        let mut pieces = if r.is_empty() { Vec::new() } else { vec![r] };
        for covered in &self.rects {
            pieces = pieces
                .into_iter()
                .flat_map(|p| p.subtract(*covered))
                .collect();
        }
        pieces
    }

    /// Iterate the stored rectangles.
    pub fn iter(&self) -> impl Iterator<Item = IntRect> + '_ {
        self.rects.iter().copied()
    }

    /// Move the rectangles out, leaving the region empty.
    pub fn take(&mut self) -> Vec<IntRect> {
        std::mem::take(&mut self.rects)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the background before any content arrives.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Normalized `[r, g, b, 1.0]` clear color.
    pub fn to_clear_color(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            1.0,
        ]
    }

    /// Gray clear color used by the inverted-screen mode: `1 - (r + g + b) / 3`.
    pub fn to_inverted_clear_color(self) -> [f32; 4] {
        let [r, g, b, _] = self.to_clear_color();
        let c = 1.0 - (r + g + b) / 3.0;
        [c, c, c, 1.0]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
        }

        fn opaque() -> u8 {
            0xff
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self { r, g, b, a }),
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| format!("color '{s}' must start with '#'"))?;
    if !hex.is_ascii() {
        return Err(format!("color '{s}' must be ascii hex"));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("color '{s}': {e}"))
    };
    match hex.len() {
        6 => Ok(Rgba8::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Rgba8 {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: byte(6)?,
        }),
        _ => Err(format!("color '{s}' must be #rrggbb or #rrggbbaa")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
