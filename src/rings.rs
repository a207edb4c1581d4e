//! Touch/focus ring overlay drawn on top of the composited frame.

use crate::backend::ShaderPipeline;
use crate::foundation::config::RingStyle;
use crate::foundation::core::{IntRect, Rect, Region};

/// Ring rectangles plus their visual state.
#[derive(Debug, Clone, Default)]
pub struct RingOverlay {
    region: Region,
    pressed: bool,
    button: bool,
    displayed: bool,
}

impl RingOverlay {
    /// Replace the ring region and start displaying it.
    pub fn set(&mut self, rects: &[IntRect], pressed: bool, button: bool) {
        self.region = Region::from_rects(rects.iter().copied());
        self.pressed = pressed;
        self.button = button;
        self.displayed = true;
    }

    /// Stop displaying the rings. The region is kept until the next [`RingOverlay::set`].
    pub fn hide(&mut self) {
        self.displayed = false;
    }

    /// Return `true` while the rings are shown.
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Copy of the overlay when there is something to paint.
    pub(crate) fn visible(&self) -> Option<Self> {
        (self.displayed && !self.region.is_empty()).then(|| self.clone())
    }

    /// Draw the overlay.
    ///
    /// Pressed rings fill every region rectangle; a pressed button stops there. Otherwise strips
    /// of `border_width` (doubled when not pressed) are drawn along the region boundary, with an
    /// inner strip of `border_width` when not pressed. Each strip only covers what earlier strips
    /// of the same kind left, so translucent corners are blended once.
    pub fn paint(&self, style: &RingStyle, shader: &dyn ShaderPipeline) {
        if !self.displayed || self.region.is_empty() {
            return;
        }
        let bounds = self.region.bounds();
        if bounds.is_empty() {
            return;
        }
        shader.clip(bounds.to_rect());

        if self.pressed {
            for r in self.region.iter() {
                draw_ring_quad(shader, r.to_rect(), style);
            }
        }
        if self.button && self.pressed {
            return;
        }

        let (outer, inner) = if self.pressed {
            (style.border_width, None)
        } else {
            (style.border_width.saturating_mul(2), Some(style.border_width))
        };
        let mut painted_outer = Region::new();
        let mut painted_inner = Region::new();
        for edge in boundary_edges(&self.region) {
            paint_strip(shader, edge.inflate(outer), &mut painted_outer, style);
            if let Some(inner) = inner {
                paint_strip(shader, edge.inflate(inner), &mut painted_inner, style);
            }
        }
    }
}

/// Draw the part of `strip` that `painted` does not cover yet, then add the strip to it.
fn paint_strip(
    shader: &dyn ShaderPipeline,
    strip: IntRect,
    painted: &mut Region,
    style: &RingStyle,
) {
    for piece in painted.uncovered(strip) {
        draw_ring_quad(shader, piece.to_rect(), style);
    }
    painted.union_rect(strip);
}

fn draw_ring_quad(shader: &dyn ShaderPipeline, rect: Rect, style: &RingStyle) {
    if rect.x1 <= rect.x0 || rect.y1 <= rect.y0 {
        return;
    }
    shader.draw_highlight_quad(rect, style.color, style.alpha);
}

/// Boundary of the region as zero-thickness rectangles.
///
/// Every rectangle edge is cut wherever another rectangle's edge crosses it, so coverage on
/// either side is constant along each piece. A piece is interior when the points just on either
/// side of its midpoint are both covered. Boundary pieces on the same line that touch are joined.
/// Horizontal edges come first, sorted by `y` then `x`, followed by vertical edges sorted by `x`
/// then `y`.
fn boundary_edges(region: &Region) -> Vec<IntRect> {
    // Doubled coordinates keep the sample points on half-pixel offsets.
    let covers = |px2: i64, py2: i64| {
        region.iter().any(|r| {
            2 * i64::from(r.x) <= px2
                && px2 < 2 * i64::from(r.right())
                && 2 * i64::from(r.y) <= py2
                && py2 < 2 * i64::from(r.bottom())
        })
    };
    let mut xs: Vec<i32> = region.iter().flat_map(|r| [r.x, r.right()]).collect();
    let mut ys: Vec<i32> = region.iter().flat_map(|r| [r.y, r.bottom()]).collect();
    xs.sort_unstable();
    xs.dedup();
    ys.sort_unstable();
    ys.dedup();

    // (line, start, end)
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for r in region.iter() {
        for y in [r.y, r.bottom()] {
            let y2 = 2 * i64::from(y);
            for (a, b) in split_span(r.x, r.right(), &xs) {
                let m2 = i64::from(a) + i64::from(b);
                if !(covers(m2, y2 - 1) && covers(m2, y2 + 1)) {
                    horizontal.push((y, a, b));
                }
            }
        }
        for x in [r.x, r.right()] {
            let x2 = 2 * i64::from(x);
            for (a, b) in split_span(r.y, r.bottom(), &ys) {
                let m2 = i64::from(a) + i64::from(b);
                if !(covers(x2 - 1, m2) && covers(x2 + 1, m2)) {
                    vertical.push((x, a, b));
                }
            }
        }
    }

    let mut edges = Vec::new();
    for (y, a, b) in join_runs(horizontal) {
        edges.push(IntRect::from_ltrb(a, y, b, y));
    }
    for (x, a, b) in join_runs(vertical) {
        edges.push(IntRect::from_ltrb(x, a, x, b));
    }
    edges
}

/// Split `start..end` at every sorted cut strictly inside it.
fn split_span(start: i32, end: i32, cuts: &[i32]) -> Vec<(i32, i32)> {
    let mut spans = Vec::new();
    let mut from = start;
    for &cut in cuts.iter().filter(|&&c| start < c && c < end) {
        spans.push((from, cut));
        from = cut;
    }
    spans.push((from, end));
    spans
}

/// Sort `(line, start, end)` runs and join those on the same line that touch or overlap.
fn join_runs(mut runs: Vec<(i32, i32, i32)>) -> Vec<(i32, i32, i32)> {
    runs.sort_unstable();
    let mut joined: Vec<(i32, i32, i32)> = Vec::with_capacity(runs.len());
    for (line, a, b) in runs {
        match joined.last_mut() {
            Some(last) if last.0 == line && a <= last.2 => last.2 = last.2.max(b),
            _ => joined.push((line, a, b)),
        }
    }
    joined
}

#[cfg(test)]
#[path = "../tests/unit/rings.rs"]
mod tests;
