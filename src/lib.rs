//! Webtile is the frame-compositing core of a tile-based web content renderer.
//!
//! The host feeds rasterized page content, overlays and viewport changes into a [`ViewState`]
//! from its UI thread and calls [`ViewState::draw_frame`] once per display refresh:
//!
//! - Content goes through a gate that can hold new snapshots back while tiles regenerate
//! - Invalidated areas accumulate into dirty unions reported back as redraw hints
//! - Two [`TilePages`] are double-buffered across scroll and zoom changes
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// GPU-side collaborator traits.
pub mod backend;
/// Content collaborator traits.
pub mod content;
/// Profiling hooks.
pub mod diagnostics;
/// Dirty-region unions.
pub mod dirty;
mod frame;
pub(crate) mod gate;
/// Ring overlay.
pub mod rings;
/// Double-buffered tile pages.
pub mod tiles;
mod view_state;
/// Viewport-to-tile conversion.
pub mod viewport;

pub use crate::foundation::config::{CompositorOpts, RingStyle};
pub use crate::foundation::core::{IntRect, Point, Rect, Region, Rgba8, Size};
pub use crate::foundation::error::{WebtileError, WebtileResult};

pub use crate::backend::{ShaderPipeline, TextureManager, ZoomManager};
pub use crate::content::{BaseContent, DrawParams, Layer, LayerDirtySink, Picture};
pub use crate::diagnostics::{NoopProfiler, Profiler, TracingProfiler};
pub use crate::frame::{FrameOutcome, FrameRequest, Invalidation};
pub use crate::tiles::{PageSlot, TilePage, TilePages};
pub use crate::view_state::{Collaborators, ViewState};
