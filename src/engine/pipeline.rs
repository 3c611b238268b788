use rayon::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector3;

use crate::config::{Overlays, Palette, SkyConfig};
use crate::error::SkyError;
use crate::render::color::Rgba;
use crate::sky::catalog::{Star, StarCatalog};
use crate::sky::frames::{spherical_to_orthogonal, FrameStack};
use crate::sky::projection::{project_polyline, view_to_screen, ScreenPoint, Viewport};
use crate::sky::scene::{sky_color, sun_horizontal, SceneParams};

/// Angular spacing of grid lines: 15°.
const GRID_STEP: f64 = PI / 12.0;
const SUN_RADIUS: f64 = 7.0;
const LABEL_OFFSET: f64 = 12.0;
/// Azimuths run westward under the negated longitude, so east is 3π/2.
const CARDINALS: [(&str, f64); 4] = [
    ("N", 0.0),
    ("E", 3.0 * FRAC_PI_2),
    ("S", PI),
    ("W", FRAC_PI_2),
];

/// One vector drawing primitive, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline {
        points: Vec<ScreenPoint>,
        color: Rgba,
        width: f32,
    },
    Circle {
        center: ScreenPoint,
        radius: f64,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
    },
    Text {
        position: ScreenPoint,
        text: String,
        color: Rgba,
    },
}

/// Counters for the stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub stars_total: usize,
    pub stars_drawn: usize,
    pub stars_above_horizon: usize,
    pub polylines: usize,
    pub sun_visible: bool,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Rgba,
    pub commands: Vec<DrawCommand>,
    pub stats: FrameStats,
    /// Sun height in the horizontal frame
    pub sun_altitude_z: f64,
}

/// The sky pipeline: Scene → Frames → Projection → Draw list
pub struct SkyEngine {
    catalog: StarCatalog,
    palette: Palette,
    overlays: Overlays,
    curve_samples: usize,
}

impl SkyEngine {
    /// Validate the config and generate the star catalog.
    pub fn new(config: &SkyConfig) -> Result<Self, SkyError> {
        let palette = config.validate()?;
        let catalog = StarCatalog::generate(config.star_count, config.seed);
        Ok(Self {
            catalog,
            palette,
            overlays: config.overlays,
            curve_samples: config.curve_samples,
        })
    }

    /// Use a prepared catalog instead of sampling one.
    pub fn with_catalog(mut self, catalog: StarCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_overlays(mut self, overlays: Overlays) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn set_overlays(&mut self, overlays: Overlays) {
        self.overlays = overlays;
    }

    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    /// Build the draw list for the current scene.
    pub fn render(&self, params: &SceneParams, viewport: &Viewport) -> Frame {
        let frames = params.frames();
        let sun = sun_horizontal(&frames, params.annual);
        let mut commands = Vec::new();
        let mut stats = FrameStats {
            stars_total: self.catalog.len(),
            ..FrameStats::default()
        };

        let background = sky_color(sun.z, self.palette.day_sky, self.palette.night_sky);

        // Curves
        let to_view_h = |v: Vector3<f64>| frames.horizontal_to_view(&v);
        let to_view_eq = |v: Vector3<f64>| frames.horizontal_to_view(&frames.equatorial_to_horizontal(&v));
        let to_view_ecl = |v: Vector3<f64>| frames.horizontal_to_view(&frames.ecliptic_to_horizontal(&v));

        if self.overlays.equatorial_grid {
            for curve in graticule(self.curve_samples) {
                self.push_curve(&mut commands, &curve, &to_view_eq, params.scale, viewport, self.palette.equatorial_grid, 1.0);
            }
        }
        if self.overlays.horizontal_grid {
            for curve in graticule(self.curve_samples) {
                self.push_curve(&mut commands, &curve, &to_view_h, params.scale, viewport, self.palette.horizontal_grid, 1.0);
            }
        }
        if self.overlays.horizon {
            let horizon = great_circle(self.curve_samples);
            self.push_curve(&mut commands, &horizon, &to_view_h, params.scale, viewport, self.palette.horizon, 2.0);
        }
        if self.overlays.ecliptic {
            let ecliptic = great_circle(self.curve_samples);
            self.push_curve(&mut commands, &ecliptic, &to_view_ecl, params.scale, viewport, self.palette.ecliptic, 1.5);
        }
        stats.polylines = commands.len();

        // Stars
        let star_color = self.palette.star;
        let stars: Vec<(DrawCommand, bool)> = self
            .catalog
            .stars()
            .par_iter()
            .filter_map(|star| project_star(star, &frames, params.scale, viewport, star_color))
            .collect();
        stats.stars_drawn = stars.len();
        stats.stars_above_horizon = stars.iter().filter(|(_, above)| *above).count();
        commands.extend(stars.into_iter().map(|(cmd, _)| cmd));

        // Sun
        let sun_screen = view_to_screen(&frames.horizontal_to_view(&sun), params.scale, viewport);
        if let Some(p) = sun_screen {
            stats.sun_visible = true;
            commands.push(DrawCommand::Circle {
                center: p,
                radius: SUN_RADIUS,
                fill: Some(self.palette.sun),
                stroke: None,
            });
        }

        // Labels
        if self.overlays.labels {
            for (name, azimuth) in CARDINALS {
                let v = frames.horizontal_to_view(&spherical_to_orthogonal(azimuth, 0.0));
                if let Some(p) = view_to_screen(&v, params.scale, viewport) {
                    commands.push(DrawCommand::Text {
                        position: ScreenPoint { x: p.x, y: p.y + LABEL_OFFSET },
                        text: name.to_string(),
                        color: self.palette.label,
                    });
                }
            }
            if let Some(p) = sun_screen {
                commands.push(DrawCommand::Text {
                    position: ScreenPoint { x: p.x, y: p.y - SUN_RADIUS - LABEL_OFFSET },
                    text: "Sun".to_string(),
                    color: self.palette.sun,
                });
            }
        }

        log::trace!(
            "[engine] {} commands, {}/{} stars",
            commands.len(),
            stats.stars_drawn,
            stats.stars_total
        );

        Frame {
            background,
            commands,
            stats,
            sun_altitude_z: sun.z,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_curve<F>(
        &self,
        commands: &mut Vec<DrawCommand>,
        curve: &[(f64, f64)],
        to_view: &F,
        scale: f64,
        viewport: &Viewport,
        color: Rgba,
        width: f32,
    ) where
        F: Fn(Vector3<f64>) -> Vector3<f64>,
    {
        let samples = curve
            .iter()
            .map(|&(lon, lat)| to_view(spherical_to_orthogonal(lon, lat)));
        for points in project_polyline(samples, scale, viewport) {
            commands.push(DrawCommand::Polyline { points, color, width });
        }
    }
}

/// Star → (circle, above horizon). Filled above the horizon, outlined below.
fn project_star(
    star: &Star,
    frames: &FrameStack,
    scale: f64,
    viewport: &Viewport,
    color: Rgba,
) -> Option<(DrawCommand, bool)> {
    let horizontal = frames.equatorial_to_horizontal(&spherical_to_orthogonal(star.azimuth, star.altitude));
    let center = view_to_screen(&frames.horizontal_to_view(&horizontal), scale, viewport)?;
    let above = horizontal.z >= 0.0;
    let color = color.with_opacity(star.draw_opacity);
    let (fill, stroke) = if above { (Some(color), None) } else { (None, Some(color)) };
    Some((
        DrawCommand::Circle {
            center,
            radius: star.draw_radius,
            fill,
            stroke,
        },
        above,
    ))
}

/// Parallels every 15° from −75° to +75° and meridians every 15°, as
/// (longitude, latitude) samples. `samples` subdivides each 15° step.
fn graticule(samples: usize) -> Vec<Vec<(f64, f64)>> {
    let step = GRID_STEP / samples as f64;
    let mut curves = Vec::new();
    for i in -5..=5 {
        let lat = i as f64 * GRID_STEP;
        curves.push((0..=24 * samples).map(|j| (j as f64 * step, lat)).collect());
    }
    for i in 0..24 {
        let lon = i as f64 * GRID_STEP;
        let half = 6 * samples as i64;
        curves.push((-half..=half).map(|j| (lon, j as f64 * step)).collect());
    }
    curves
}

/// Closed circle of latitude 0.
fn great_circle(samples: usize) -> Vec<(f64, f64)> {
    let step = GRID_STEP / samples as f64;
    (0..=24 * samples).map(|j| (j as f64 * step, 0.0)).collect()
}
