//! Base content gate.
//!
//! Holds the latest and current content snapshots, the update lock, the pending dirty region
//! collected while locked, the dirty unions and the invalidation generation counter. Everything
//! here lives behind the view state's gate mutex; methods only touch handles and flags and return
//! the page invalidations to issue once that mutex is released.

use std::sync::Arc;

use crate::content::{BaseContent, Picture};
use crate::dirty::DirtyRegionTracker;
use crate::foundation::core::{IntRect, Region};
use crate::rings::RingOverlay;

/// A front-page invalidation tagged with its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageInval {
    pub(crate) rect: IntRect,
    pub(crate) generation: u64,
}

/// Side effects of a gate operation, applied outside the gate lock.
#[derive(Debug, Default)]
pub(crate) struct InvalBatch {
    /// Invalidations for the front tile page, in issue order.
    pub(crate) pages: Vec<PageInval>,
    /// Every rectangle seen, for the profiler.
    pub(crate) profiled: Vec<IntRect>,
}

/// Result of supplying new base content.
#[derive(Debug, Default)]
pub(crate) struct ContentUpdate {
    pub(crate) discard_pages: bool,
    pub(crate) invals: InvalBatch,
}

/// Both retained snapshots, taken together under the gate lock.
pub(crate) struct Snapshots {
    pub(crate) current: Option<Arc<dyn BaseContent>>,
    pub(crate) latest: Option<Arc<dyn BaseContent>>,
}

pub(crate) struct ContentGate {
    latest: Option<Arc<dyn BaseContent>>,
    current: Option<Arc<dyn BaseContent>>,
    unlocked: bool,
    pending: Region,
    last_extras_rect: IntRect,
    generation: u64,
    dirty: DirtyRegionTracker,
    rings: RingOverlay,
}

impl ContentGate {
    pub(crate) fn new(layer_dirty_margin: i32) -> Self {
        Self {
            latest: None,
            current: None,
            unlocked: true,
            pending: Region::new(),
            last_extras_rect: IntRect::ZERO,
            generation: 0,
            dirty: DirtyRegionTracker::new(layer_dirty_margin),
            rings: RingOverlay::default(),
        }
    }

    /// Supply new base content together with the area it changed.
    ///
    /// A layout change locks the gate and drops the pending region; the new content then only
    /// becomes current on [`ContentGate::unlock`]. Absent content or a layout change requires
    /// both tile pages to drop their textures.
    pub(crate) fn set_content(
        &mut self,
        content: Option<Arc<dyn BaseContent>>,
        inval: &Region,
        layout_changed: bool,
    ) -> ContentUpdate {
        let discard_pages = content.is_none() || layout_changed;
        if layout_changed {
            if self.unlocked {
                tracing::debug!("layout changed, locking content updates");
            }
            self.unlocked = false;
            self.pending.clear();
        }

        if let (Some(old), Some(new)) = (&self.latest, &content)
            && !Arc::ptr_eq(old, new)
            && let Some(extra) = old.take_extra()
        {
            new.set_extra(extra);
        }

        self.latest = content;
        if self.unlocked {
            self.current = self.latest.clone();
        }
        self.rings.hide();

        let mut invals = InvalBatch::default();
        for r in inval.iter() {
            self.inval(r, &mut invals);
        }
        ContentUpdate {
            discard_pages,
            invals,
        }
    }

    /// Stop promoting new content until [`ContentGate::unlock`].
    pub(crate) fn lock(&mut self) {
        self.unlocked = false;
    }

    /// Promote the latest content and replay everything invalidated while locked.
    ///
    /// Returns `None` when the gate was already unlocked.
    pub(crate) fn unlock(&mut self) -> Option<InvalBatch> {
        if self.unlocked {
            return None;
        }
        self.unlocked = true;
        self.current = self.latest.clone();

        let mut invals = InvalBatch::default();
        for r in self.pending.take() {
            self.inval(r, &mut invals);
        }
        tracing::debug!(replayed = invals.pages.len(), "content updates unlocked");
        Some(invals)
    }

    /// Bind an overlay picture to `content` and invalidate the old and new extras areas.
    ///
    /// Rejected while locked. An unchanged rectangle is not invalidated again unless
    /// `allow_same_rect_twice` is set.
    pub(crate) fn set_extras(
        &mut self,
        content: &Arc<dyn BaseContent>,
        picture: Arc<dyn Picture>,
        rect: IntRect,
        allow_same_rect_twice: bool,
    ) -> InvalBatch {
        let mut invals = InvalBatch::default();
        if !self.unlocked {
            return invals;
        }

        content.set_extra(picture);

        if !allow_same_rect_twice && self.last_extras_rect == rect {
            return invals;
        }

        if !rect.is_empty() {
            self.inval(rect, &mut invals);
        }
        let last = self.last_extras_rect;
        if !last.is_empty() {
            self.inval(last, &mut invals);
        }
        self.last_extras_rect = rect;
        self.rings.hide();
        invals
    }

    /// Route one invalidated rectangle.
    ///
    /// Unlocked: bump the generation, grow the base union and queue a front-page invalidation.
    /// Locked: add the rectangle to the pending region.
    fn inval(&mut self, rect: IntRect, out: &mut InvalBatch) {
        if self.unlocked {
            self.generation += 1;
            if !rect.is_empty() {
                out.pages.push(PageInval {
                    rect,
                    generation: self.generation,
                });
                self.dirty.merge_base(rect);
            }
        } else {
            self.pending.union_rect(rect);
        }
        out.profiled.push(rect);
    }

    pub(crate) fn snapshots(&self) -> Snapshots {
        Snapshots {
            current: self.current.clone(),
            latest: self.latest.clone(),
        }
    }

    pub(crate) fn current(&self) -> Option<&Arc<dyn BaseContent>> {
        self.current.as_ref()
    }

    pub(crate) fn is_locked(&self) -> bool {
        !self.unlocked
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn pending(&self) -> &Region {
        &self.pending
    }

    pub(crate) fn dirty(&self) -> &DirtyRegionTracker {
        &self.dirty
    }

    pub(crate) fn dirty_mut(&mut self) -> &mut DirtyRegionTracker {
        &mut self.dirty
    }

    pub(crate) fn rings(&self) -> &RingOverlay {
        &self.rings
    }

    pub(crate) fn rings_mut(&mut self) -> &mut RingOverlay {
        &mut self.rings
    }
}

#[cfg(test)]
#[path = "../tests/unit/gate.rs"]
mod tests;
