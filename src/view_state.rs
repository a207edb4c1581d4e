//! The owning state object and the host-facing API.
//!
//! [`ViewState`] is shared between the host thread, which supplies content and overlays, and the
//! drawing thread, which runs [`ViewState::draw_frame`](crate::ViewState::draw_frame). Cross-thread
//! coordination uses short-held mutexes around handles and flags only:
//!
//! - the gate lock (snapshots, lock flag, pending region, dirty unions, rings, generation);
//! - the tile-page lock (front/back label, inside [`TilePages`]);
//! - the host's UI lock, taken only while playing content back for tile workers.
//!
//! Host calls that invalidate tiles also hold the host-update lock from before the gate lock
//! until their invalidations are issued, so tile pages see generations in increasing order. The
//! drawing thread never takes it. Apart from that no lock is held while another is taken, and
//! the gate lock is never held across a collaborator call.

use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{TextureManager, ZoomManager};
use crate::content::{BaseContent, Layer, LayerDirtySink, Picture};
use crate::diagnostics::{NoopProfiler, Profiler};
use crate::foundation::config::CompositorOpts;
use crate::foundation::core::{IntRect, Rect, Region, Rgba8};
use crate::foundation::error::WebtileResult;
use crate::foundation::sync::lock;
use crate::gate::{ContentGate, InvalBatch};
use crate::tiles::{PageSlot, TilePage, TilePages};
use crate::viewport::ViewportTracker;

/// Host-provided collaborators.
#[derive(Clone)]
pub struct Collaborators {
    /// Tile/layer texture owner and shader accessor.
    pub texture_manager: Arc<dyn TextureManager>,
    /// Zoom controller.
    pub zoom: Arc<dyn ZoomManager>,
    /// Diagnostics sink.
    pub profiler: Arc<dyn Profiler>,
    /// Lock guarding UI-thread resources touched while content plays back.
    pub ui_lock: Arc<Mutex<()>>,
}

impl Collaborators {
    /// Collaborators with a no-op profiler and a private UI lock.
    pub fn new(texture_manager: Arc<dyn TextureManager>, zoom: Arc<dyn ZoomManager>) -> Self {
        Self {
            texture_manager,
            zoom,
            profiler: Arc::new(NoopProfiler),
            ui_lock: Arc::default(),
        }
    }

    /// Replace the diagnostics sink.
    pub fn with_profiler(mut self, profiler: Arc<dyn Profiler>) -> Self {
        self.profiler = profiler;
        self
    }

    /// Share the host's UI lock.
    pub fn with_ui_lock(mut self, ui_lock: Arc<Mutex<()>>) -> Self {
        self.ui_lock = ui_lock;
        self
    }
}

/// Draw-thread bookkeeping carried from one frame to the next.
pub(crate) struct FrameState {
    pub(crate) previously_used_root: Option<Arc<dyn Layer>>,
    pub(crate) background_color: Rgba8,
}

/// Compositing state for one web view.
pub struct ViewState {
    // Declared first so the pages drop before the snapshots they may still paint from.
    pub(crate) pages: TilePages,
    pub(crate) opts: CompositorOpts,
    pub(crate) gate: Mutex<ContentGate>,
    /// Orders host updates; taken before `gate`, never by the drawing thread.
    host_updates: Mutex<()>,
    pub(crate) viewport: Mutex<ViewportTracker>,
    pub(crate) frame: Mutex<FrameState>,
    pub(crate) collab: Collaborators,
}

impl ViewState {
    /// Build the state around two tile pages. Page A starts in front.
    pub fn new(
        opts: CompositorOpts,
        pages: TilePages,
        collab: Collaborators,
    ) -> WebtileResult<Self> {
        opts.validate()?;
        Ok(Self {
            pages,
            gate: Mutex::new(ContentGate::new(opts.layer_dirty_margin)),
            host_updates: Mutex::new(()),
            viewport: Mutex::new(ViewportTracker::new(&opts)),
            frame: Mutex::new(FrameState {
                previously_used_root: None,
                background_color: Rgba8::WHITE,
            }),
            opts,
            collab,
        })
    }

    /// Compositor options.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Supply new base content and the area it changed.
    ///
    /// `is_first_layout_pass` locks content updates until
    /// [`ViewState::unlock_content_update`] and makes both tile pages drop their textures, as
    /// does absent content.
    pub fn set_base_content(
        &self,
        content: Option<Arc<dyn BaseContent>>,
        inval: &Region,
        show_indicator: bool,
        is_first_layout_pass: bool,
    ) {
        let _order = lock(&self.host_updates);
        let update = lock(&self.gate).set_content(content, inval, is_first_layout_pass);
        if update.discard_pages {
            self.pages.discard_all();
        }
        self.apply_invals(update.invals);
        self.collab
            .texture_manager
            .set_show_visual_indicator(show_indicator);
    }

    /// Replace the ring overlay and start displaying it.
    pub fn set_overlay_rings(&self, rects: &[IntRect], is_pressed: bool, is_button: bool) {
        lock(&self.gate).rings_mut().set(rects, is_pressed, is_button);
    }

    /// Hide the ring overlay.
    pub fn reset_rings(&self) {
        lock(&self.gate).rings_mut().hide();
    }

    /// Hold back new content until [`ViewState::unlock_content_update`].
    pub fn lock_content_update(&self) {
        lock(&self.gate).lock();
    }

    /// Promote the latest content and replay invalidations collected while locked.
    pub fn unlock_content_update(&self) {
        let _order = lock(&self.host_updates);
        let flushed = lock(&self.gate).unlock();
        if let Some(invals) = flushed {
            self.apply_invals(invals);
        }
    }

    /// Bind an overlay picture to `content` and invalidate the changed extras area.
    pub fn set_overlay_extras(
        &self,
        content: &Arc<dyn BaseContent>,
        picture: Arc<dyn Picture>,
        rect: IntRect,
        allow_same_rect_twice: bool,
    ) {
        let _order = lock(&self.host_updates);
        let invals = lock(&self.gate).set_extras(content, picture, rect, allow_same_rect_twice);
        self.apply_invals(invals);
    }

    /// Record the visible rectangle at `scale`, updating tile bounds and the texture budget.
    pub fn set_viewport(&self, visible: Rect, scale: f32) {
        let future_scale = self.collab.zoom.future_scale();
        let update = lock(&self.viewport).set_viewport(visible, scale, future_scale);
        let Some(update) = update else {
            return;
        };
        self.collab
            .texture_manager
            .set_max_texture_count(update.max_texture_count);
        if update.scale_changed {
            self.pages.update_tile_size();
        }
    }

    /// Make the back page the front page and evict the old front page.
    pub fn swap_pages(&self) {
        self.pages.swap_pages(self.collab.zoom.as_ref());
    }

    /// Current front page.
    pub fn front_page(&self) -> &dyn TilePage {
        self.pages.front_page()
    }

    /// Current back page.
    pub fn back_page(&self) -> &dyn TilePage {
        self.pages.back_page()
    }

    /// Slot currently labelled front.
    pub fn front_slot(&self) -> PageSlot {
        self.pages.front_slot()
    }

    /// The page in the other slot.
    pub fn sibling(&self, slot: PageSlot) -> &dyn TilePage {
        self.pages.sibling(slot)
    }

    /// Play the current content back into `ctx` for a tile worker.
    ///
    /// Returns the generation sampled together with the content, which the worker uses to tag its
    /// output. The UI lock is taken only after the gate lock is released.
    pub fn paint_base_content(&self, ctx: &mut vello_cpu::RenderContext) -> u64 {
        let (content, generation) = {
            let gate = lock(&self.gate);
            (gate.current().cloned(), gate.generation())
        };
        if let Some(content) = content {
            let _ui = lock(&self.collab.ui_lock);
            content.draw_into(ctx);
        }
        generation
    }

    /// Width of the current content, 0 when there is none.
    pub fn base_content_width(&self) -> i32 {
        lock(&self.gate).current().map_or(0, |c| c.width())
    }

    /// Height of the current content, 0 when there is none.
    pub fn base_content_height(&self) -> i32 {
        lock(&self.gate).current().map_or(0, |c| c.height())
    }

    /// Drain the base dirty union for the host.
    pub fn take_base_dirty(&self) -> IntRect {
        lock(&self.gate).dirty_mut().drain_base()
    }

    /// Current base dirty union.
    pub fn base_dirty(&self) -> IntRect {
        lock(&self.gate).dirty().base()
    }

    /// Layer dirty union collected during the last frame.
    pub fn layer_dirty(&self) -> IntRect {
        lock(&self.gate).dirty().layer()
    }

    /// Bounding box of the invalidations held back while locked.
    pub fn pending_dirty(&self) -> IntRect {
        lock(&self.gate).pending().bounds()
    }

    /// Return `true` while content updates are held back.
    pub fn is_update_locked(&self) -> bool {
        lock(&self.gate).is_locked()
    }

    /// Number of invalidations issued while unlocked.
    pub fn generation(&self) -> u64 {
        lock(&self.gate).generation()
    }

    /// Return `true` while the ring overlay is displayed.
    pub fn rings_displayed(&self) -> bool {
        lock(&self.gate).rings().is_displayed()
    }

    /// Tile indices covered by the visible rectangle.
    pub fn viewport_tile_bounds(&self) -> IntRect {
        lock(&self.viewport).tile_bounds()
    }

    /// Texture budget computed for the visible rectangle.
    pub fn max_texture_count(&self) -> usize {
        lock(&self.viewport).max_texture_count()
    }

    /// Prefetch expansion `(x, y)` in tiles for the current frame.
    pub fn expanded_tile_bounds(&self) -> (u32, u32) {
        lock(&self.viewport).expanded_tile_bounds()
    }

    /// The last viewport change scrolled down (or kept the top edge).
    pub fn is_scrolling_down(&self) -> bool {
        lock(&self.viewport).going_down()
    }

    /// The last viewport change scrolled left (or kept the left edge).
    pub fn is_scrolling_left(&self) -> bool {
        lock(&self.viewport).going_left()
    }

    /// Background color of the last drawn content.
    pub fn background_color(&self) -> Rgba8 {
        lock(&self.frame).background_color
    }

    /// Issue queued front-page invalidations and profiler events.
    ///
    /// Must run without the gate lock and under the host-update lock that was held when the batch
    /// was taken from the gate.
    pub(crate) fn apply_invals(&self, invals: InvalBatch) {
        if !invals.pages.is_empty() {
            let front = self.pages.front_page();
            for p in &invals.pages {
                front.invalidate_rect(p.rect, p.generation);
            }
        }
        if !invals.profiled.is_empty() {
            let scale = self.collab.zoom.current_scale();
            for r in invals.profiled {
                self.collab.profiler.next_inval(r, scale);
            }
        }
    }
}

impl LayerDirtySink for ViewState {
    fn add_dirty_area(&self, rect: IntRect) {
        lock(&self.gate).dirty_mut().merge_layer(rect);
    }
}

impl Drop for ViewState {
    fn drop(&mut self) {
        let previous = self
            .frame
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .previously_used_root
            .take();
        let textures = self.collab.texture_manager.as_ref();
        if let Some(previous) = previous {
            textures.notify_composited_root_changed(Some(&previous), None);
        }
        textures.unregister_view();
    }
}
