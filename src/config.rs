//! Start-up configuration for the sky view.
//!
//! `SkyConfig::default()` reproduces the stock planetarium; individual knobs
//! are overridden with the consuming `with_*` builders and checked once with
//! [`SkyConfig::validate`].

use std::f64::consts::TAU;

use crate::error::SkyError;
use crate::render::color::{parse_hex_color, Rgba};
use crate::sky::scene::SceneParams;

/// How the animator advances the time angles each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStep {
    /// Radians per second of real elapsed time
    RealTime { diurnal_rate: f64, annual_rate: f64 },
    /// Radians per frame, ignoring elapsed time
    Fixed { diurnal: f64, annual: f64 },
}

impl Default for TimeStep {
    fn default() -> Self {
        // one sky revolution every 12 s; a 36.5-day "year"
        let diurnal_rate = TAU / 12.0;
        TimeStep::RealTime {
            diurnal_rate,
            annual_rate: diurnal_rate / 36.5,
        }
    }
}

/// Radians of camera turn per dragged pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSensitivity {
    /// Constant radians per pixel
    Fixed(f64),
    /// `scale / resolution` per pixel: the sky stays under the pointer at any zoom
    ZoomRelative,
}

impl Default for DragSensitivity {
    fn default() -> Self {
        DragSensitivity::ZoomRelative
    }
}

/// Theme colours as CSS hex strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub day_sky: String,
    pub night_sky: String,
    pub horizontal_grid: String,
    pub equatorial_grid: String,
    pub ecliptic: String,
    pub horizon: String,
    pub star: String,
    pub sun: String,
    pub label: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            day_sky: "#4a90d9".into(),
            night_sky: "#000".into(),
            horizontal_grid: "#888".into(),
            equatorial_grid: "#3a7a5a".into(),
            ecliptic: "#c8843c".into(),
            horizon: "#bbb".into(),
            star: "#fff".into(),
            sun: "#ffd700".into(),
            label: "#ddd".into(),
        }
    }
}

/// Parsed theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub day_sky: Rgba,
    pub night_sky: Rgba,
    pub horizontal_grid: Rgba,
    pub equatorial_grid: Rgba,
    pub ecliptic: Rgba,
    pub horizon: Rgba,
    pub star: Rgba,
    pub sun: Rgba,
    pub label: Rgba,
}

impl ThemeConfig {
    pub fn palette(&self) -> Result<Palette, SkyError> {
        let c = |name: &str, hex: &str| {
            parse_hex_color(hex).ok_or_else(|| SkyError::InvalidConfig {
                reason: format!("theme.{}: bad colour {:?}", name, hex),
            })
        };
        Ok(Palette {
            day_sky: c("day_sky", &self.day_sky)?,
            night_sky: c("night_sky", &self.night_sky)?,
            horizontal_grid: c("horizontal_grid", &self.horizontal_grid)?,
            equatorial_grid: c("equatorial_grid", &self.equatorial_grid)?,
            ecliptic: c("ecliptic", &self.ecliptic)?,
            horizon: c("horizon", &self.horizon)?,
            star: c("star", &self.star)?,
            sun: c("sun", &self.sun)?,
            label: c("label", &self.label)?,
        })
    }
}

/// Which overlays the draw list includes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlays {
    pub horizontal_grid: bool,
    pub equatorial_grid: bool,
    pub ecliptic: bool,
    pub horizon: bool,
    pub labels: bool,
}

impl Default for Overlays {
    fn default() -> Self {
        Self {
            horizontal_grid: true,
            equatorial_grid: false,
            ecliptic: true,
            horizon: true,
            labels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkyConfig {
    pub star_count: usize,
    /// `None` seeds the catalog from OS entropy
    pub seed: Option<u64>,
    pub initial: SceneParams,
    pub time_step: TimeStep,
    pub drag: DragSensitivity,
    /// Scroll multiplies or divides the scale by this
    pub zoom_factor: f64,
    /// Zoom-out limit
    pub max_scale: f64,
    /// Zoom-in limit
    pub min_scale: f64,
    /// Curve samples per 15° grid step
    pub curve_samples: usize,
    pub overlays: Overlays,
    pub theme: ThemeConfig,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            star_count: 1000,
            seed: None,
            initial: SceneParams::default(),
            time_step: TimeStep::default(),
            drag: DragSensitivity::default(),
            zoom_factor: 1.2,
            max_scale: 1.4,
            min_scale: 0.01,
            curve_samples: 3,
            overlays: Overlays::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SkyConfig {
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initial(mut self, initial: SceneParams) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_time_step(mut self, step: TimeStep) -> Self {
        self.time_step = step;
        self
    }

    pub fn with_drag(mut self, drag: DragSensitivity) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_overlays(mut self, overlays: Overlays) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.theme = theme;
        self
    }

    /// Check bounds and parse the theme.
    pub fn validate(&self) -> Result<Palette, SkyError> {
        let bad = |reason: String| Err(SkyError::InvalidConfig { reason });

        if !(self.min_scale > 0.0 && self.min_scale.is_finite()) {
            return bad(format!("min_scale must be positive, got {}", self.min_scale));
        }
        if !(self.max_scale > self.min_scale && self.max_scale.is_finite()) {
            return bad(format!(
                "max_scale ({}) must exceed min_scale ({})",
                self.max_scale, self.min_scale
            ));
        }
        if !(self.zoom_factor > 1.0 && self.zoom_factor.is_finite()) {
            return bad(format!("zoom_factor must be > 1, got {}", self.zoom_factor));
        }
        if !(self.min_scale..=self.max_scale).contains(&self.initial.scale) {
            return bad(format!(
                "initial scale {} outside [{}, {}]",
                self.initial.scale, self.min_scale, self.max_scale
            ));
        }
        if self.curve_samples == 0 {
            return bad("curve_samples must be at least 1".to_string());
        }
        let rates = match self.time_step {
            TimeStep::RealTime { diurnal_rate, annual_rate } => [diurnal_rate, annual_rate],
            TimeStep::Fixed { diurnal, annual } => [diurnal, annual],
        };
        if rates.iter().any(|r| !r.is_finite()) {
            return bad(format!("time step must be finite, got {:?}", self.time_step));
        }
        if let DragSensitivity::Fixed(k) = self.drag {
            if !k.is_finite() {
                return bad(format!("drag sensitivity must be finite, got {}", k));
            }
        }
        self.theme.palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let palette = SkyConfig::default().validate().unwrap();
        assert_eq!(palette.night_sky, Rgba::BLACK);
        assert_eq!(palette.horizontal_grid, Rgba::rgb(136, 136, 136));
    }

    #[test]
    fn test_default_annual_slower_than_diurnal() {
        match TimeStep::default() {
            TimeStep::RealTime { diurnal_rate, annual_rate } => {
                assert!(annual_rate > 0.0 && annual_rate < diurnal_rate / 10.0)
            }
            other => panic!("unexpected default {:?}", other),
        }
    }

    #[test]
    fn test_rejects_inverted_scale_bounds() {
        let mut cfg = SkyConfig::default();
        cfg.min_scale = 2.0;
        assert!(matches!(cfg.validate(), Err(SkyError::InvalidConfig { .. })));
    }

    #[test]
    fn test_rejects_initial_scale_out_of_bounds() {
        let mut initial = SceneParams::default();
        initial.scale = 3.0;
        let cfg = SkyConfig::default().with_initial(initial);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_theme_colour() {
        let theme = ThemeConfig {
            sun: "gold".into(),
            ..ThemeConfig::default()
        };
        let err = SkyConfig::default().with_theme(theme).validate().unwrap_err();
        assert!(err.to_string().contains("theme.sun"), "got {}", err);
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let cfg = SkyConfig::default().with_time_step(TimeStep::Fixed {
            diurnal: f64::NAN,
            annual: 0.0,
        });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_weak_zoom_factor() {
        let mut cfg = SkyConfig::default();
        cfg.zoom_factor = 1.0;
        assert!(cfg.validate().is_err());
    }
}
