//! Rendering configuration.
//!
//! [`RenderConfig`] carries the canvas and typography settings used for every
//! diagram. Defaults reproduce an 18 × 8 inch figure at 200 DPI with 7 pt labels.
//! A few settings can be overridden from the environment:
//!
//! | variable | field | example |
//! |---|---|---|
//! | `VPC_TOPOLOGY_DPI` | `dpi` | `150` |
//! | `VPC_TOPOLOGY_WIDTH` | `width_in` | `24` |
//! | `VPC_TOPOLOGY_HEIGHT` | `height_in` | `10.5` |
//! | `VPC_TOPOLOGY_FONT` | `font_family` | `Noto Sans` |
//!
//! Algorithm constants (tier gaps, fallback layer) are fixed and live in
//! [`crate::constants`].

use anyhow::Result;
use std::str::FromStr;
use tracing::debug;

use crate::constants::MAX_CANVAS_PIXELS;
use crate::core::TopologyError;

/// Environment variable overriding [`RenderConfig::dpi`].
pub const DPI_ENV: &str = "VPC_TOPOLOGY_DPI";
/// Environment variable overriding [`RenderConfig::width_in`].
pub const WIDTH_ENV: &str = "VPC_TOPOLOGY_WIDTH";
/// Environment variable overriding [`RenderConfig::height_in`].
pub const HEIGHT_ENV: &str = "VPC_TOPOLOGY_HEIGHT";
/// Environment variable overriding [`RenderConfig::font_family`].
pub const FONT_ENV: &str = "VPC_TOPOLOGY_FONT";

const MAX_DPI: u32 = 1200;
const MAX_INCHES: f64 = 200.0;

/// Canvas and typography settings for diagram output.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Canvas width in inches (may grow for crowded tiers)
    pub width_in: f64,
    /// Canvas height in inches
    pub height_in: f64,
    /// Output resolution
    pub dpi: u32,
    /// Node marker area in square points
    pub node_area_pt2: f64,
    /// Node label font size in points
    pub font_size_pt: f64,
    /// Legend font size in points
    pub legend_font_size_pt: f64,
    /// Title font size in points
    pub title_font_size_pt: f64,
    /// Font family list, CSS style
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width_in: 18.0,
            height_in: 8.0,
            dpi: 200,
            node_area_pt2: 1800.0,
            font_size_pt: 7.0,
            legend_font_size_pt: 8.0,
            title_font_size_pt: 12.0,
            font_family: "DejaVu Sans, Helvetica, Arial, sans-serif".to_string(),
        }
    }
}

impl RenderConfig {
    /// Defaults with overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::with_overrides(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`.
    ///
    /// `lookup` receives a variable name and returns its value if set. Empty
    /// values are treated as unset. The resulting canvas must stay within
    /// [`MAX_CANVAS_PIXELS`].
    pub fn with_overrides<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get(DPI_ENV) {
            config.dpi = parse_in_range(DPI_ENV, &raw, 1, MAX_DPI)?;
        }
        if let Some(raw) = get(WIDTH_ENV) {
            config.width_in = parse_in_range(WIDTH_ENV, &raw, 1.0, MAX_INCHES)?;
        }
        if let Some(raw) = get(HEIGHT_ENV) {
            config.height_in = parse_in_range(HEIGHT_ENV, &raw, 1.0, MAX_INCHES)?;
        }
        if let Some(raw) = get(FONT_ENV) {
            config.font_family = raw.trim().to_string();
        }

        let pixels = config.width_px() * config.height_px();
        if pixels > MAX_CANVAS_PIXELS as f64 {
            return Err(TopologyError::ConfigError {
                message: format!(
                    "canvas of {}x{} pixels exceeds the limit of {MAX_CANVAS_PIXELS} pixels",
                    config.width_px(),
                    config.height_px()
                ),
            }
            .into());
        }

        debug!(
            "Render config: {}x{} in at {} dpi, font '{}'",
            config.width_in, config.height_in, config.dpi, config.font_family
        );
        Ok(config)
    }

    /// Pixels per typographic point.
    pub fn px_per_pt(&self) -> f64 {
        f64::from(self.dpi) / 72.0
    }

    /// Canvas width in pixels before any widening.
    pub fn width_px(&self) -> f64 {
        (self.width_in * f64::from(self.dpi)).round()
    }

    /// Canvas height in pixels.
    pub fn height_px(&self) -> f64 {
        (self.height_in * f64::from(self.dpi)).round()
    }

    /// Node marker radius in pixels.
    ///
    /// The marker area is that of the square enclosing the circle, so the
    /// diameter is its square root.
    pub fn node_radius_px(&self) -> f64 {
        self.node_area_pt2.sqrt() / 2.0 * self.px_per_pt()
    }

    /// Node label font size in pixels.
    pub fn font_px(&self) -> f64 {
        self.font_size_pt * self.px_per_pt()
    }

    /// Legend font size in pixels.
    pub fn legend_font_px(&self) -> f64 {
        self.legend_font_size_pt * self.px_per_pt()
    }

    /// Title font size in pixels.
    pub fn title_font_px(&self) -> f64 {
        self.title_font_size_pt * self.px_per_pt()
    }
}

fn parse_in_range<T>(key: &str, raw: &str, min: T, max: T) -> Result<T>
where
    T: FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let value: T = raw.trim().parse().map_err(|_| TopologyError::ConfigError {
        message: format!("{key} must be a number, got '{raw}'"),
    })?;
    // NaN and infinities fall outside every range
    if !(min..=max).contains(&value) {
        return Err(TopologyError::ConfigError {
            message: format!("{key} must be between {min} and {max}, got {value}"),
        }
        .into());
    }
    Ok(value)
}
