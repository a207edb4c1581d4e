//! Per-frame draw orchestration.
//!
//! [`ViewState::draw_frame`] runs on the drawing thread once per display frame. It samples the
//! content snapshots, flushes texture uploads, sets up the shader, draws tiles and layers, paints
//! the ring overlay and reports which part of the screen the host must redraw.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::content::{DrawParams, Layer, same_layer};
use crate::foundation::core::{IntRect, Rect, Rgba8, Size};
use crate::foundation::sync::lock;
use crate::gate::Snapshots;
use crate::view_state::ViewState;

/// Screen geometry and scale of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRequest {
    /// Frame rectangle in screen pixels.
    pub frame_rect: IntRect,
    /// Visible content rectangle in document units.
    pub visible_rect: Rect,
    /// Web view rectangle in screen pixels.
    pub web_view_rect: IntRect,
    /// Title bar height in screen pixels.
    pub title_bar_height: i32,
    /// Screen clip rectangle.
    pub screen_clip: IntRect,
    /// Scale the frame is drawn at.
    pub scale: f32,
}

impl FrameRequest {
    /// Request where the web view and the clip cover the whole frame and there is no title bar.
    pub fn new(frame_rect: IntRect, visible_rect: Rect, scale: f32) -> Self {
        Self {
            frame_rect,
            visible_rect,
            web_view_rect: frame_rect,
            title_bar_height: 0,
            screen_clip: frame_rect,
            scale,
        }
    }
}

/// Screen area the host must redraw after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// Nothing beyond the normal schedule.
    None,
    /// The whole screen.
    FullScreen,
    /// A screen rectangle.
    Rect(IntRect),
}

impl Invalidation {
    /// Host rectangle encoding: [`IntRect::ZERO`] stands for the full screen.
    pub fn to_inval_rect(self) -> Option<IntRect> {
        match self {
            Self::None => None,
            Self::FullScreen => Some(IntRect::ZERO),
            Self::Rect(r) => Some(r),
        }
    }
}

/// Result of [`ViewState::draw_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The frame is not final and the host must keep drawing.
    pub drawn: bool,
    /// Area to redraw, meaningful only when `drawn` is set.
    pub invalidation: Invalidation,
}

impl FrameOutcome {
    fn idle() -> Self {
        Self {
            drawn: false,
            invalidation: Invalidation::None,
        }
    }
}

impl ViewState {
    /// Composite one frame.
    ///
    /// Returns immediately with nothing drawn when no content is current. A scale outside the
    /// plausible band is logged before the texture upload and aborts the process after it.
    #[tracing::instrument(level = "trace", skip_all, fields(scale = req.scale))]
    pub fn draw_frame(&self, req: &FrameRequest) -> FrameOutcome {
        let textures = self.collab.texture_manager.as_ref();
        textures.inc_draw_count();
        self.collab
            .profiler
            .next_frame(req.visible_rect, req.scale);

        let Snapshots { current, latest } = lock(&self.gate).snapshots();
        let Some(base) = current else {
            return FrameOutcome::idle();
        };

        let content = Size::new(f64::from(base.width()), f64::from(base.height()));
        lock(&self.viewport).update_prefetch(req.visible_rect, content);
        lock(&self.gate).dirty_mut().drain_layer();

        // Prefer the latest content's layers so layer textures follow it while tiles are locked.
        let lookup = match &latest {
            Some(l) if l.child_count() > 0 => l,
            _ => &base,
        };
        let root = if lookup.child_count() >= 1 {
            lookup.child(0)
        } else {
            None
        };
        self.swap_composited_root(root.as_ref());

        let background = base.background_color();
        lock(&self.frame).background_color = background;

        let plausible = self.opts.scale_is_plausible(req.scale);
        if !plausible {
            tracing::warn!(scale = req.scale, "implausible scale before texture upload");
        }
        textures.flush_pending_uploads();
        if !plausible {
            tracing::error!(
                scale = req.scale,
                min = self.opts.min_scale_warning,
                max = self.opts.max_scale_warning,
                "implausible scale after texture upload, aborting"
            );
            std::process::abort();
        }
        textures.gather_usable_textures();

        let time = self.setup_drawing(req, background);

        let params = DrawParams {
            time,
            composited_root: root.as_ref(),
            frame_rect: req.frame_rect,
            visible_rect: req.visible_rect,
            scale: req.scale,
        };
        let mut drawn = base.draw_gl(&params, self);

        let rings = lock(&self.gate).rings().visible();
        if let Some(rings) = rings {
            rings.paint(&self.opts.ring, textures.shader());
        }

        let inverted_switch = textures.inverted_screen_switch();
        drawn |= inverted_switch;

        let invalidation = if drawn {
            self.compute_invalidation(req.frame_rect, inverted_switch)
        } else {
            lock(&self.gate).dirty_mut().drain_base();
            Invalidation::None
        };
        FrameOutcome {
            drawn,
            invalidation,
        }
    }

    /// Hand layer textures over when the composited root changed identity.
    fn swap_composited_root(&self, root: Option<&Arc<dyn Layer>>) {
        let previous = lock(&self.frame).previously_used_root.clone();
        if same_layer(previous.as_ref(), root) {
            return;
        }
        tracing::debug!(
            old = previous.as_ref().map(|l| l.unique_id()),
            new = root.map(|l| l.unique_id()),
            "composited root changed"
        );
        self.collab
            .texture_manager
            .notify_composited_root_changed(previous.as_ref(), root);
        lock(&self.frame).previously_used_root = root.cloned();
    }

    /// Clear the framebuffer, configure the shader and apply the frame's viewport and scale.
    ///
    /// Returns the frame timestamp in seconds.
    fn setup_drawing(&self, req: &FrameRequest, background: Rgba8) -> f64 {
        let textures = self.collab.texture_manager.as_ref();
        let shader = textures.shader();

        let clear = if textures.inverted_screen() {
            background.to_inverted_clear_color()
        } else {
            background.to_clear_color()
        };
        shader.clear(clear);
        shader.set_gpu_viewport(req.frame_rect);

        if !shader.is_initialized() {
            tracing::debug!("shader program missing, reinitializing");
            shader.init();
        }
        shader.set_view_rect(req.frame_rect);
        shader.set_viewport(req.visible_rect);
        shader.set_web_view_rect(req.web_view_rect);
        shader.set_title_bar_height(req.title_bar_height);
        shader.set_screen_clip(req.screen_clip);
        shader.reset_blending();

        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64());
        self.set_viewport(req.visible_rect, req.scale);
        self.collab.zoom.process_new_scale(time, req.scale);
        time
    }

    /// Screen area to redraw after a frame that is not final.
    fn compute_invalidation(&self, frame_rect: IntRect, inverted_switch: bool) -> Invalidation {
        let (base_dirty, layer_dirty) = {
            let gate = lock(&self.gate);
            (gate.dirty().base(), gate.dirty().layer())
        };
        let textures = self.collab.texture_manager.as_ref();

        if inverted_switch {
            textures.set_inverted_screen_switch(false);
            return Invalidation::FullScreen;
        }
        if base_dirty.is_empty() {
            return Invalidation::FullScreen;
        }

        let margin = f64::from(self.opts.screen_inval_margin);
        let mapped = textures
            .shader()
            .map_rect_to_screen(base_dirty.to_rect())
            .inflate(margin, margin);
        let inval = IntRect::from_rect_truncating(mapped).unite(layer_dirty);
        if !inval.intersects(frame_rect) {
            tracing::debug!(?inval, ?frame_rect, "invalidation off screen, redrawing all");
            return Invalidation::FullScreen;
        }
        Invalidation::Rect(inval)
    }
}
