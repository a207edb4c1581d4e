//! GPU-side collaborators: texture management, the shader pipeline and the zoom controller.

use std::sync::Arc;

use crate::content::Layer;
use crate::foundation::core::{IntRect, Rect, Rgba8};

/// Shader/GPU primitive abstraction used while setting up and finishing a frame.
pub trait ShaderPipeline: Send + Sync {
    /// Return `true` once [`ShaderPipeline::init`] has produced a usable program.
    fn is_initialized(&self) -> bool;

    /// (Re)create the shader program.
    fn init(&self);

    /// Clear the framebuffer to a normalized RGBA color.
    fn clear(&self, rgba: [f32; 4]);

    /// Set the GPU viewport.
    fn set_gpu_viewport(&self, rect: IntRect);

    /// Frame rectangle in screen pixels.
    fn set_view_rect(&self, rect: IntRect);

    /// Visible content rectangle in document units.
    fn set_viewport(&self, visible: Rect);

    /// Web view rectangle in screen pixels.
    fn set_web_view_rect(&self, rect: IntRect);

    /// Title bar height in screen pixels.
    fn set_title_bar_height(&self, height: i32);

    /// Screen clip rectangle.
    fn set_screen_clip(&self, clip: IntRect);

    /// Restore default blending state.
    fn reset_blending(&self);

    /// Map a document rectangle into inverted screen coordinates.
    fn map_rect_to_screen(&self, rect: Rect) -> Rect;

    /// Restrict subsequent quad draws to `rect` (document units).
    fn clip(&self, rect: Rect);

    /// Fill `rect` with a translucent solid color.
    fn draw_highlight_quad(&self, rect: Rect, color: Rgba8, alpha: f32);
}

/// Owner of GPU tile and layer textures.
pub trait TextureManager: Send + Sync {
    /// Budget of live tile textures across both tile pages.
    fn set_max_texture_count(&self, count: usize);

    /// Blit tiles finished by the transfer queue into their textures.
    fn flush_pending_uploads(&self);

    /// Collect the layer textures usable this frame.
    fn gather_usable_textures(&self);

    /// The composited root changed identity; hand cached textures from `old` over to `new`.
    fn notify_composited_root_changed(
        &self,
        old: Option<&Arc<dyn Layer>>,
        new: Option<&Arc<dyn Layer>>,
    );

    /// Shader pipeline used for the frame.
    fn shader(&self) -> &dyn ShaderPipeline;

    /// Accessibility inverted-screen mode.
    fn inverted_screen(&self) -> bool;

    /// One-shot flag raised when the inverted-screen mode just toggled.
    fn inverted_screen_switch(&self) -> bool;

    /// Raise or clear the one-shot inverted-screen flag.
    fn set_inverted_screen_switch(&self, on: bool);

    /// Toggle the tile debug overlay.
    fn set_show_visual_indicator(&self, _show: bool) {}

    /// Count one more frame. Called first thing in every frame, before any other collaborator.
    fn inc_draw_count(&self) {}

    /// The owning view state is going away; release anything queued for it.
    fn unregister_view(&self) {}
}

/// Zoom controller that owns the current and target scale.
pub trait ZoomManager: Send + Sync {
    /// Scale the tiles are currently rendered at.
    fn current_scale(&self) -> f32;

    /// Scale being zoomed towards.
    fn future_scale(&self) -> f32;

    /// The tile pages were just swapped.
    fn notify_pages_swapped(&self);

    /// Feed the frame's scale at `time` seconds.
    fn process_new_scale(&self, time: f64, scale: f32);
}
