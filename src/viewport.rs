//! Visible rectangle to tile-grid conversion.

use crate::foundation::config::CompositorOpts;
use crate::foundation::core::{IntRect, Rect, Size};

/// Result of a viewport change that must be pushed to the texture manager and tile pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportUpdate {
    /// Texture budget for both tile pages together.
    pub max_texture_count: usize,
    /// The scale differs from the last applied one, so tile geometry must be recomputed.
    pub scale_changed: bool,
}

/// Tracks the visible rectangle, its tile bounds, the scroll direction and prefetch expansion.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    tile_width: f64,
    tile_height: f64,
    prefetch_distance: u32,
    prefetch_ratio: f64,

    viewport: Rect,
    applied_scale: Option<f32>,
    tile_bounds: IntRect,
    max_texture_count: usize,
    going_down: bool,
    going_left: bool,
    expanded_x: u32,
    expanded_y: u32,
}

impl ViewportTracker {
    /// Empty tracker using the tile geometry from `opts`.
    pub fn new(opts: &CompositorOpts) -> Self {
        Self {
            tile_width: f64::from(opts.tile_width),
            tile_height: f64::from(opts.tile_height),
            prefetch_distance: opts.prefetch_distance,
            prefetch_ratio: opts.prefetch_ratio,
            viewport: Rect::ZERO,
            applied_scale: None,
            tile_bounds: IntRect::ZERO,
            max_texture_count: 0,
            going_down: true,
            going_left: false,
            expanded_x: 0,
            expanded_y: 0,
        }
    }

    /// Record a new visible rectangle at `scale`.
    ///
    /// Returns `None` when `visible` equals the previous rectangle and `future_scale` (the scale
    /// the zoom controller is heading to) equals `scale`.
    pub fn set_viewport(
        &mut self,
        visible: Rect,
        scale: f32,
        future_scale: f32,
    ) -> Option<ViewportUpdate> {
        if self.viewport == visible && future_scale == scale {
            return None;
        }

        self.going_down = self.viewport.y0 - visible.y0 <= 0.0;
        self.going_left = self.viewport.x0 - visible.x0 >= 0.0;
        self.viewport = visible;

        let inv_w = f64::from(scale) / self.tile_width;
        let inv_h = f64::from(scale) / self.tile_height;

        self.tile_bounds = if visible.width() <= 0.0 || visible.height() <= 0.0 {
            IntRect::ZERO
        } else {
            IntRect::from_ltrb(
                (visible.x0 * inv_w).floor() as i32,
                (visible.y0 * inv_h).floor() as i32,
                (visible.x1 * inv_w).ceil() as i32,
                (visible.y1 * inv_h).ceil() as i32,
            )
        };

        let margin = 2 * u64::from(self.prefetch_distance);
        let across_x = tiles_across(visible.width(), inv_w) + margin;
        let across_y = tiles_across(visible.height(), inv_h) + margin;
        self.max_texture_count =
            usize::try_from(across_x.saturating_mul(across_y).saturating_mul(2))
                .unwrap_or(usize::MAX);

        let scale_changed = self.applied_scale != Some(scale);
        self.applied_scale = Some(scale);

        tracing::debug!(
            x0 = visible.x0,
            y0 = visible.y0,
            x1 = visible.x1,
            y1 = visible.y1,
            scale,
            future_scale,
            max_texture_count = self.max_texture_count,
            "new viewport"
        );

        Some(ViewportUpdate {
            max_texture_count: self.max_texture_count,
            scale_changed,
        })
    }

    /// Decide per axis whether tiles beyond the viewport are prefetched.
    ///
    /// An axis gets `prefetch_distance` extra tiles only when the scaled visible extent is
    /// smaller than the content extent on that axis.
    pub fn update_prefetch(&mut self, visible: Rect, content: Size) -> (u32, u32) {
        let view_w = visible.width() * self.prefetch_ratio;
        let view_h = visible.height() * self.prefetch_ratio;
        self.expanded_x = if view_w < content.width {
            self.prefetch_distance
        } else {
            0
        };
        self.expanded_y = if view_h < content.height {
            self.prefetch_distance
        } else {
            0
        };
        (self.expanded_x, self.expanded_y)
    }

    /// Last visible rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Tile indices covered by the last visible rectangle.
    pub fn tile_bounds(&self) -> IntRect {
        self.tile_bounds
    }

    /// Last computed texture budget.
    pub fn max_texture_count(&self) -> usize {
        self.max_texture_count
    }

    /// Prefetch expansion `(x, y)` in tiles decided for the current frame.
    pub fn expanded_tile_bounds(&self) -> (u32, u32) {
        (self.expanded_x, self.expanded_y)
    }

    /// The last change kept the top edge in place or moved it down.
    pub fn going_down(&self) -> bool {
        self.going_down
    }

    /// The last change kept the left edge in place or moved it left.
    pub fn going_left(&self) -> bool {
        self.going_left
    }
}

fn tiles_across(extent: f64, inv_tile: f64) -> u64 {
    if extent.is_nan() || extent <= 0.0 {
        return 0;
    }
    let n = ((extent - 1.0) * inv_tile).ceil() + 1.0;
    if n > 0.0 { n as u64 } else { 0 }
}

#[cfg(test)]
#[path = "../tests/unit/viewport.rs"]
mod tests;
