//! Pluggable diagnostics sink.

use crate::foundation::core::{IntRect, Rect};

/// Receives per-frame and per-invalidation events. Every method defaults to a no-op.
pub trait Profiler: Send + Sync {
    /// A frame is starting.
    fn next_frame(&self, _visible: Rect, _scale: f32) {}

    /// A single rectangle was invalidated (before merging).
    fn next_inval(&self, _rect: IntRect, _scale: f32) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

impl Profiler for NoopProfiler {}

/// Emits every event as a `trace` level tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProfiler;

impl Profiler for TracingProfiler {
    fn next_frame(&self, visible: Rect, scale: f32) {
        tracing::trace!(
            x0 = visible.x0,
            y0 = visible.y0,
            x1 = visible.x1,
            y1 = visible.y1,
            scale,
            "frame"
        );
    }

    fn next_inval(&self, rect: IntRect, scale: f32) {
        tracing::trace!(
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            scale,
            "inval"
        );
    }
}
