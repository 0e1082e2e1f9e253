//! Era-keyed overlay and caption selection.
//!
//! Both tables map inclusive year ranges to a style. Ranges inside one table may not overlap, so a
//! year always resolves to at most one overlay and exactly one caption style.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effects::overlay::{ColorTint, OverlayEffect, Scanlines, Vignette};
use crate::foundation::error::{ReelError, ReelResult};

/// Inclusive range of years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First year.
    pub from: u16,
    /// Last year.
    pub to: u16,
}

impl YearRange {
    /// Create a range, rejecting `from > to`.
    pub fn new(from: u16, to: u16) -> ReelResult<Self> {
        if from > to {
            return Err(ReelError::validation(format!(
                "year range {from}..={to} is empty"
            )));
        }
        Ok(Self { from, to })
    }

    /// The ten years of the decade starting at `start`.
    pub fn decade(start: u16) -> Self {
        Self {
            from: start,
            to: start.saturating_add(9),
        }
    }

    /// Exactly `year`.
    pub fn year(year: u16) -> Self {
        Self {
            from: year,
            to: year,
        }
    }

    /// `year` and every later year.
    pub fn since(year: u16) -> Self {
        Self {
            from: year,
            to: u16::MAX,
        }
    }

    /// Whether `year` falls inside the range.
    pub fn contains(self, year: u16) -> bool {
        (self.from..=self.to).contains(&year)
    }

    fn overlaps(self, other: Self) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}

/// Serializable overlay description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlaySpec {
    /// Radial vignette.
    Vignette(Vignette),
    /// "color" blend tint.
    ColorTint(ColorTint),
    /// Horizontal scanlines.
    Scanlines(Scanlines),
}

impl OverlaySpec {
    fn build(&self) -> Arc<dyn OverlayEffect> {
        match self {
            Self::Vignette(v) => Arc::new(*v),
            Self::ColorTint(t) => Arc::new(*t),
            Self::Scanlines(s) => Arc::new(*s),
        }
    }
}

/// How a caption is painted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptionStyle {
    /// One pass: blurred drop shadow under a translucent fill.
    Shadow {
        /// Straight-alpha fill color.
        fill: [u8; 4],
        /// Straight-alpha shadow color.
        shadow: [u8; 4],
        /// Shadow blur in pixels.
        blur: f32,
    },
    /// Neon glow: per pass, a blurred halo in `glow` followed by an opaque fill.
    Glow {
        /// Halo color.
        glow: [u8; 3],
        /// Fill color.
        #[serde(default = "white")]
        fill: [u8; 3],
        /// Halo blur per pass, in draw order.
        passes: Vec<f32>,
    },
}

fn white() -> [u8; 3] {
    [255, 255, 255]
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self::Shadow {
            fill: [255, 255, 255, 230],
            shadow: [0, 0, 0, 179],
            blur: 15.0,
        }
    }
}

impl CaptionStyle {
    /// Neon glow in `glow` with the default 20 px then 10 px passes.
    pub fn neon(glow: [u8; 3]) -> Self {
        Self::Glow {
            glow,
            fill: white(),
            passes: vec![20.0, 10.0],
        }
    }
}

/// One `{ from, to, overlay }` entry of a serialized style table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayRule {
    /// Years the overlay applies to.
    #[serde(flatten)]
    pub years: YearRange,
    /// Overlay to apply.
    pub overlay: OverlaySpec,
}

/// One `{ from, to, caption }` entry of a serialized style table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionRule {
    /// Years the caption style applies to.
    #[serde(flatten)]
    pub years: YearRange,
    /// Caption style.
    pub caption: CaptionStyle,
}

/// Serializable form of an [`EraStyleTable`]. Omitted lists keep the built-in rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTableSpec {
    /// Overlay rules.
    pub overlays: Vec<OverlayRule>,
    /// Caption rules; unmatched years use `default_caption`.
    pub captions: Vec<CaptionRule>,
    /// Caption style for years no rule matches.
    pub default_caption: CaptionStyle,
}

impl Default for StyleTableSpec {
    fn default() -> Self {
        Self {
            overlays: vec![
                OverlayRule {
                    years: YearRange::year(2010),
                    overlay: OverlaySpec::Vignette(Vignette::default()),
                },
                OverlayRule {
                    years: YearRange::year(2040),
                    overlay: OverlaySpec::ColorTint(ColorTint {
                        rgb: [255, 0, 255],
                        alpha: 0.2,
                    }),
                },
                OverlayRule {
                    years: YearRange::year(2050),
                    overlay: OverlaySpec::Scanlines(Scanlines::default()),
                },
            ],
            captions: vec![
                CaptionRule {
                    years: YearRange::year(2040),
                    caption: CaptionStyle::neon([255, 0, 255]),
                },
                CaptionRule {
                    years: YearRange::since(2041),
                    caption: CaptionStyle::neon([0, 255, 255]),
                },
            ],
            default_caption: CaptionStyle::default(),
        }
    }
}

/// Registered overlay strategies and caption styles, selected by year.
#[derive(Clone, Debug, Default)]
pub struct EraStyleTable {
    overlays: Vec<(YearRange, Arc<dyn OverlayEffect>)>,
    captions: Vec<(YearRange, CaptionStyle)>,
    default_caption: CaptionStyle,
}

impl EraStyleTable {
    /// An empty table: no overlays, default caption for every year.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from its serialized form, validating every range.
    pub fn from_spec(spec: &StyleTableSpec) -> ReelResult<Self> {
        let mut table = Self::new().with_default_caption(spec.default_caption.clone());
        for rule in &spec.overlays {
            YearRange::new(rule.years.from, rule.years.to)?;
            table.register_overlay(rule.years, rule.overlay.build())?;
        }
        for rule in &spec.captions {
            YearRange::new(rule.years.from, rule.years.to)?;
            table.register_caption(rule.years, rule.caption.clone())?;
        }
        Ok(table)
    }

    /// Replace the caption style used for unmatched years.
    pub fn with_default_caption(mut self, style: CaptionStyle) -> Self {
        self.default_caption = style;
        self
    }

    /// Register an overlay for `years`. Fails if it overlaps an existing registration.
    pub fn register_overlay(
        &mut self,
        years: YearRange,
        effect: Arc<dyn OverlayEffect>,
    ) -> ReelResult<()> {
        if let Some((existing, _)) = self.overlays.iter().find(|(r, _)| r.overlaps(years)) {
            return Err(ReelError::validation(format!(
                "overlay range {}..={} overlaps {}..={}",
                years.from, years.to, existing.from, existing.to
            )));
        }
        self.overlays.push((years, effect));
        Ok(())
    }

    /// Register a caption style for `years`. Fails if it overlaps an existing registration.
    pub fn register_caption(&mut self, years: YearRange, style: CaptionStyle) -> ReelResult<()> {
        if let Some((existing, _)) = self.captions.iter().find(|(r, _)| r.overlaps(years)) {
            return Err(ReelError::validation(format!(
                "caption range {}..={} overlaps {}..={}",
                years.from, years.to, existing.from, existing.to
            )));
        }
        self.captions.push((years, style));
        Ok(())
    }

    /// Overlay for `year`, if any.
    pub fn overlay_for(&self, year: u16) -> Option<&dyn OverlayEffect> {
        self.overlays
            .iter()
            .find(|(r, _)| r.contains(year))
            .map(|(_, e)| e.as_ref())
    }

    /// Caption style for `year`.
    pub fn caption_for(&self, year: u16) -> &CaptionStyle {
        self.captions
            .iter()
            .find(|(r, _)| r.contains(year))
            .map_or(&self.default_caption, |(_, s)| s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
