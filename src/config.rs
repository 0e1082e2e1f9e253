use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::effects::style::{EraStyleTable, StyleTableSpec};
use crate::foundation::core::{Canvas, Fps, Rgba8Premul};
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::clock::Timing;

/// Caption text settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Draw era captions at all.
    pub enabled: bool,
    /// Font file to use. A path that cannot be loaded fails renderer construction.
    pub font_path: Option<PathBuf>,
    /// Installed families to try before generic cursive and sans-serif.
    pub families: Vec<String>,
    /// Font size in pixels.
    pub size_px: f32,
    /// Distance from the bottom edge to the text baseline.
    pub bottom_offset: f32,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_path: None,
            families: vec!["Permanent Marker".to_string()],
            size_px: 80.0,
            bottom_offset: 80.0,
        }
    }
}

/// Everything that shapes one render. Immutable once a render starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Output frames per second.
    pub fps: u32,
    /// Screen time per entry, in milliseconds.
    pub display_ms: u64,
    /// Cross-fade length at the end of each entry, in milliseconds.
    pub transition_ms: u64,
    /// Ken-Burns zoom factor: scale grows from 1 to `1 + ken_burns` over an entry.
    pub ken_burns: f64,
    /// Straight-alpha RGBA background.
    pub background: [u8; 4],
    /// Caption settings.
    pub caption: CaptionConfig,
    /// Era overlay and caption style rules.
    pub styles: StyleTableSpec,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 960,
            fps: 30,
            display_ms: 3000,
            transition_ms: 500,
            ken_burns: 0.1,
            background: [0, 0, 0, 255],
            caption: CaptionConfig::default(),
            styles: StyleTableSpec::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a JSON config; omitted fields keep their defaults.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ReelError::validation(format!("invalid render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check every field that can be checked without touching the environment.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps()?;
        self.timing()?;
        if !self.ken_burns.is_finite() || self.ken_burns < 0.0 {
            return Err(ReelError::validation("ken_burns must be finite and >= 0"));
        }
        let c = &self.caption;
        if !c.size_px.is_finite() || c.size_px <= 0.0 {
            return Err(ReelError::validation("caption.size_px must be > 0"));
        }
        if !c.bottom_offset.is_finite() {
            return Err(ReelError::validation("caption.bottom_offset must be finite"));
        }
        self.style_table()?;
        Ok(())
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Output frame rate.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Display and transition durations.
    pub fn timing(&self) -> ReelResult<Timing> {
        Timing::new(
            Duration::from_millis(self.display_ms),
            Duration::from_millis(self.transition_ms),
        )
    }

    /// Premultiplied background color.
    pub fn background_premul(&self) -> Rgba8Premul {
        let [r, g, b, a] = self.background;
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }

    /// Build the era style table.
    pub fn style_table(&self) -> ReelResult<EraStyleTable> {
        EraStyleTable::from_spec(&self.styles)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
