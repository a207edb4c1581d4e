//! Content collaborators: the rasterized base content, the composited layers on top of it and
//! the overlay pictures bound to it.
//!
//! These are implemented by the host. The compositor only holds them through [`Arc`] handles and
//! compares layers by identity, never by value.

use std::sync::Arc;

use crate::foundation::core::{IntRect, Rect, Rgba8};

/// A composited layer drawn on top of the base tiles.
pub trait Layer: Send + Sync {
    /// Stable identifier, used for diagnostics only. Identity comparisons use the handle address.
    fn unique_id(&self) -> u64;
}

/// A recorded overlay picture (for example a text selection) bound to base content.
pub trait Picture: Send + Sync {
    /// Play the picture back into `ctx`.
    fn draw_into(&self, ctx: &mut vello_cpu::RenderContext);
}

/// Per-frame arguments handed to [`BaseContent::draw_gl`].
#[derive(Clone, Copy)]
pub struct DrawParams<'a> {
    /// Wall-clock timestamp of the frame in seconds.
    pub time: f64,
    /// Top composited layer, if any.
    pub composited_root: Option<&'a Arc<dyn Layer>>,
    /// Frame rectangle in screen pixels.
    pub frame_rect: IntRect,
    /// Visible content rectangle in document units.
    pub visible_rect: Rect,
    /// Active scale.
    pub scale: f32,
}

/// Receives dirty areas reported by layers while a frame is drawn.
pub trait LayerDirtySink {
    /// Report `rect` (screen pixels) as needing a repaint next frame.
    fn add_dirty_area(&self, rect: IntRect);
}

/// A snapshot of rasterized page content.
pub trait BaseContent: Send + Sync {
    /// Play the page picture back into `ctx`. Called by tile workers.
    fn draw_into(&self, ctx: &mut vello_cpu::RenderContext);

    /// Page background color.
    fn background_color(&self) -> Rgba8;

    /// Content width in document units.
    fn width(&self) -> i32;

    /// Content height in document units.
    fn height(&self) -> i32;

    /// Number of composited child layers.
    fn child_count(&self) -> usize;

    /// Child layer at `index`.
    fn child(&self, index: usize) -> Option<Arc<dyn Layer>>;

    /// Bind an overlay picture to this content.
    fn set_extra(&self, picture: Arc<dyn Picture>);

    /// Unbind and return the overlay picture, if one is bound.
    fn take_extra(&self) -> Option<Arc<dyn Picture>> {
        None
    }

    /// Draw the tiles and composited layers for one frame.
    ///
    /// Returns `true` when the frame is not final yet (tiles still regenerating, animations
    /// running) and the host must keep drawing.
    fn draw_gl(&self, params: &DrawParams<'_>, dirty: &dyn LayerDirtySink) -> bool;
}

/// Return `true` when both handles point at the same layer (or both are absent).
pub(crate) fn same_layer(a: Option<&Arc<dyn Layer>>, b: Option<&Arc<dyn Layer>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
