//! Double-buffered tile pages.
//!
//! Two [`TilePage`]s live for as long as the owning view state. One is the front page (displayed
//! and invalidated against), the other the back page (regenerating for a new scale). A swap flips
//! the labels and evicts the vacated page.

use std::sync::Mutex;

use crate::backend::ZoomManager;
use crate::foundation::core::IntRect;
use crate::foundation::sync::lock;

/// A grid of GPU-backed tiles covering page content at one buffering slot.
pub trait TilePage: Send + Sync {
    /// Mark the tiles intersecting `rect` stale as of `generation`.
    ///
    /// Generations arrive in increasing order, even when several host threads update content.
    fn invalidate_rect(&self, rect: IntRect, generation: u64);

    /// Release every tile texture.
    fn discard_textures(&self);

    /// Recompute tile geometry after a scale change.
    fn update_base_tile_size(&self);
}

/// Buffering slot of a tile page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageSlot {
    /// First page; front by default.
    A,
    /// Second page.
    B,
}

impl PageSlot {
    /// The other slot.
    pub fn sibling(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Owns both tile pages and the front/back assignment.
pub struct TilePages {
    pages: [Box<dyn TilePage>; 2],
    front: Mutex<PageSlot>,
}

impl TilePages {
    /// Take ownership of the two pages. `a` starts as the front page.
    pub fn new(a: Box<dyn TilePage>, b: Box<dyn TilePage>) -> Self {
        Self {
            pages: [a, b],
            front: Mutex::new(PageSlot::A),
        }
    }

    /// Page stored in `slot`.
    pub fn page(&self, slot: PageSlot) -> &dyn TilePage {
        self.pages[slot.index()].as_ref()
    }

    /// Page in the other slot. Slots never change identity, so this takes no lock.
    pub fn sibling(&self, slot: PageSlot) -> &dyn TilePage {
        self.page(slot.sibling())
    }

    /// Slot currently labelled front.
    pub fn front_slot(&self) -> PageSlot {
        *lock(&self.front)
    }

    /// Slot currently labelled back.
    pub fn back_slot(&self) -> PageSlot {
        lock(&self.front).sibling()
    }

    /// Current front page.
    pub fn front_page(&self) -> &dyn TilePage {
        self.page(self.front_slot())
    }

    /// Current back page.
    pub fn back_page(&self) -> &dyn TilePage {
        self.page(self.back_slot())
    }

    /// Flip front and back, tell the zoom controller, then evict the page that was vacated.
    ///
    /// Eviction runs after the lock is released, so readers of the front label never observe the
    /// page being evicted.
    pub fn swap_pages(&self, zoom: &dyn ZoomManager) {
        let vacated = {
            let mut front = lock(&self.front);
            let vacated = *front;
            *front = vacated.sibling();
            vacated
        };
        tracing::debug!(front = ?vacated.sibling(), "swapped tile pages");
        zoom.notify_pages_swapped();
        self.page(vacated).discard_textures();
    }

    /// Release the textures of both pages.
    pub fn discard_all(&self) {
        for page in &self.pages {
            page.discard_textures();
        }
    }

    /// Re-tile both pages.
    pub fn update_tile_size(&self) {
        for page in &self.pages {
            page.update_base_tile_size();
        }
    }
}

impl std::fmt::Debug for TilePages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilePages")
            .field("front", &self.front_slot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../tests/unit/tiles.rs"]
mod tests;
