use crate::foundation::core::Rgba8;
use crate::foundation::error::{WebtileError, WebtileResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Ring overlay appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingStyle {
    /// Border strip width; doubled when the ring is not pressed.
    pub border_width: i32,
    /// Fill color.
    pub color: Rgba8,
    /// Fill opacity in `[0, 1]`.
    pub alpha: f32,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            border_width: 1,
            color: Rgba8::rgb(0x33, 0xb5, 0xe5),
            alpha: 0.4,
        }
    }
}

/// Compositor tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// Tile width in device pixels.
    pub tile_width: u32,
    /// Tile height in device pixels.
    pub tile_height: u32,
    /// Extra tiles kept around the viewport on each side.
    pub prefetch_distance: u32,
    /// Visible-size multiplier used to decide whether an axis gets prefetch.
    pub prefetch_ratio: f64,
    /// Scales below this are considered implausible.
    pub min_scale_warning: f32,
    /// Scales above this are considered implausible.
    pub max_scale_warning: f32,
    /// Slack added around layer dirty areas.
    pub layer_dirty_margin: i32,
    /// Slack added around the base dirty area once mapped to the screen.
    pub screen_inval_margin: i32,
    /// Ring overlay appearance.
    pub ring: RingStyle,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            tile_width: 256,
            tile_height: 256,
            prefetch_distance: 1,
            prefetch_ratio: 1.2,
            min_scale_warning: 0.1,
            max_scale_warning: 10.0,
            layer_dirty_margin: 8,
            screen_inval_margin: 1,
            ring: RingStyle::default(),
        }
    }
}

impl CompositorOpts {
    /// Parse options from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> WebtileResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| WebtileError::serde(format!("parse compositor options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WebtileResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WebtileError::config(format!("open compositor options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check that the options describe a usable compositor.
    pub fn validate(&self) -> WebtileResult<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(WebtileError::config("tile size must be non-zero"));
        }
        if !self.prefetch_ratio.is_finite() || self.prefetch_ratio <= 0.0 {
            return Err(WebtileError::config("prefetch_ratio must be finite and > 0"));
        }
        if !(self.min_scale_warning > 0.0 && self.min_scale_warning < self.max_scale_warning) {
            return Err(WebtileError::config(
                "scale warning band must satisfy 0 < min < max",
            ));
        }
        if self.layer_dirty_margin < 0 || self.screen_inval_margin < 0 {
            return Err(WebtileError::config("invalidation margins must be >= 0"));
        }
        if self.ring.border_width < 0 {
            return Err(WebtileError::config("ring border width must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.ring.alpha) {
            return Err(WebtileError::config("ring alpha must be within [0, 1]"));
        }
        Ok(())
    }

    /// Return `true` when `scale` lies inside the plausible band.
    pub fn scale_is_plausible(&self, scale: f32) -> bool {
        scale >= self.min_scale_warning && scale <= self.max_scale_warning
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
