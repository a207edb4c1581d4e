//! Running unions of invalidated areas.
//!
//! The base union covers base-content invalidations in document units and persists until the
//! host drains it. The layer union collects dirty areas reported by composited layers during a
//! frame, in screen pixels, and is rebuilt every frame.

use crate::foundation::core::IntRect;

/// Base and layer dirty unions.
#[derive(Debug, Clone, Default)]
pub struct DirtyRegionTracker {
    layer_margin: i32,
    base: IntRect,
    layer: IntRect,
}

impl DirtyRegionTracker {
    /// Empty tracker inflating layer rectangles by `layer_margin`.
    pub fn new(layer_margin: i32) -> Self {
        Self {
            layer_margin,
            base: IntRect::ZERO,
            layer: IntRect::ZERO,
        }
    }

    /// Grow the base union to cover `rect`. Empty rectangles are ignored.
    pub fn merge_base(&mut self, rect: IntRect) {
        if rect.is_empty() {
            return;
        }
        self.base = merge(self.base, rect);
    }

    /// Grow the layer union to cover `rect` plus the anti-aliasing margin.
    pub fn merge_layer(&mut self, rect: IntRect) {
        if rect.is_empty() {
            return;
        }
        self.layer = merge(self.layer, rect.inflate(self.layer_margin));
    }

    /// Current base union.
    pub fn base(&self) -> IntRect {
        self.base
    }

    /// Current layer union.
    pub fn layer(&self) -> IntRect {
        self.layer
    }

    /// Reset the base union to [`IntRect::ZERO`], returning its previous value.
    pub fn drain_base(&mut self) -> IntRect {
        std::mem::replace(&mut self.base, IntRect::ZERO)
    }

    /// Reset the layer union to [`IntRect::ZERO`], returning its previous value.
    pub fn drain_layer(&mut self) -> IntRect {
        std::mem::replace(&mut self.layer, IntRect::ZERO)
    }
}

fn merge(union: IntRect, rect: IntRect) -> IntRect {
    if union.is_empty() {
        rect
    } else {
        union.unite(rect)
    }
}

#[cfg(test)]
#[path = "../tests/unit/dirty.rs"]
mod tests;
