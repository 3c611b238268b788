//! Time- and place-dependent scene state.
//!
//! `SceneParams` is the single owned record of everything the projection
//! depends on. The sun is modelled on a circular orbit: it sits on the
//! ecliptic at longitude = annual angle.

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::SkyError;
use crate::render::color::Rgba;
use crate::sky::frames::{
    ecliptic_to_equatorial, equatorial_to_horizontal, horizontal_to_view,
    spherical_to_orthogonal, FrameStack,
};

/// Sun height at or above which the sky is fully "day".
pub const TWILIGHT_HALF_WIDTH: f64 = 0.1;

/// Wrap an angle into [0, 2π).
#[inline]
pub fn wrap_angle(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// The five angle controls exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleField {
    Diurnal,
    Annual,
    Obliquity,
    Longitude,
    Latitude,
}

impl AngleField {
    pub const ALL: [AngleField; 5] = [
        AngleField::Diurnal,
        AngleField::Annual,
        AngleField::Obliquity,
        AngleField::Longitude,
        AngleField::Latitude,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AngleField::Diurnal => "Diurnal",
            AngleField::Annual => "Annual",
            AngleField::Obliquity => "Obliquity",
            AngleField::Longitude => "Longitude",
            AngleField::Latitude => "Latitude",
        }
    }

    /// Range of the control value, in degrees.
    ///
    /// Latitude is entered as 0..180 and offset by −90° on conversion.
    pub fn control_range(self) -> std::ops::RangeInclusive<f64> {
        match self {
            AngleField::Diurnal | AngleField::Annual => 0.0..=360.0,
            AngleField::Obliquity => 0.0..=90.0,
            AngleField::Longitude => -180.0..=180.0,
            AngleField::Latitude => 0.0..=180.0,
        }
    }

    /// Control value (degrees) → parameter value (radians).
    pub fn to_radians(self, degrees: f64) -> f64 {
        let degrees = match self {
            AngleField::Latitude => degrees - 90.0,
            _ => degrees,
        };
        degrees / 180.0 * std::f64::consts::PI
    }

    /// Parameter value (radians) → control value (degrees).
    pub fn to_control(self, radians: f64) -> f64 {
        let degrees = radians.to_degrees();
        match self {
            AngleField::Latitude => degrees + 90.0,
            _ => degrees,
        }
    }

    /// Parse a typed control value. Non-numeric or non-finite text is rejected.
    pub fn parse(self, text: &str) -> Result<f64, SkyError> {
        let invalid = || SkyError::InvalidParameter {
            field: self,
            input: text.to_string(),
        };
        let degrees: f64 = text.trim().parse().map_err(|_| invalid())?;
        if !degrees.is_finite() {
            return Err(invalid());
        }
        Ok(self.to_radians(degrees))
    }
}

/// Camera and astronomical-time state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub look_azimuth: f64,
    /// Always in [-π/2, π/2]
    pub look_altitude: f64,
    /// tan(half field of view); smaller is more zoomed in
    pub scale: f64,
    /// Always in [0, 2π)
    pub diurnal: f64,
    /// Always in [0, 2π)
    pub annual: f64,
    pub obliquity: f64,
    pub longitude: f64,
    pub latitude: f64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            look_azimuth: 0.0,
            look_altitude: 0.0,
            scale: (std::f64::consts::PI / 8.0).tan(),
            diurnal: 0.0,
            annual: 0.0,
            obliquity: 23.44f64.to_radians(),
            longitude: 0.0,
            latitude: 35.0f64.to_radians(),
        }
    }
}

impl SceneParams {
    /// Read an angle parameter in radians.
    pub fn angle(&self, field: AngleField) -> f64 {
        match field {
            AngleField::Diurnal => self.diurnal,
            AngleField::Annual => self.annual,
            AngleField::Obliquity => self.obliquity,
            AngleField::Longitude => self.longitude,
            AngleField::Latitude => self.latitude,
        }
    }

    /// Write an angle parameter in radians, restoring the field's invariant.
    pub fn set_angle(&mut self, field: AngleField, radians: f64) {
        match field {
            AngleField::Diurnal => self.diurnal = wrap_angle(radians),
            AngleField::Annual => self.annual = wrap_angle(radians),
            AngleField::Obliquity => self.obliquity = radians,
            AngleField::Longitude => self.longitude = radians,
            AngleField::Latitude => self.latitude = radians.clamp(-FRAC_PI_2, FRAC_PI_2),
        }
    }

    /// Turn the camera by the given deltas, clamping altitude.
    pub fn look_by(&mut self, d_azimuth: f64, d_altitude: f64) {
        self.look_azimuth = wrap_angle(self.look_azimuth + d_azimuth);
        self.look_altitude = (self.look_altitude + d_altitude).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Whole-degree read-out of an angle, as shown next to its slider.
    pub fn display_degrees(&self, field: AngleField) -> i64 {
        let deg = field.to_control(self.angle(field)).round() as i64;
        match field {
            AngleField::Diurnal | AngleField::Annual => deg.rem_euclid(360),
            _ => deg,
        }
    }

    /// Rotations for the current state.
    pub fn frames(&self) -> FrameStack {
        FrameStack {
            ecliptic_to_equatorial: ecliptic_to_equatorial(self.obliquity),
            equatorial_to_horizontal: equatorial_to_horizontal(
                self.diurnal,
                self.longitude,
                self.latitude,
            ),
            horizontal_to_view: horizontal_to_view(self.look_azimuth, self.look_altitude),
        }
    }

    /// Sun direction in the horizontal frame.
    pub fn sun_horizontal(&self) -> Vector3<f64> {
        sun_horizontal(&self.frames(), self.annual)
    }
}

/// Sun direction in the horizontal frame for a precomputed frame stack.
pub fn sun_horizontal(frames: &FrameStack, annual: f64) -> Vector3<f64> {
    frames.ecliptic_to_horizontal(&spherical_to_orthogonal(annual, 0.0))
}

/// Day fraction of the sky colour for a sun at horizontal height `z`.
///
/// 0 at z ≤ −0.1, 1 at z ≥ 0.1, linear in between.
pub fn daylight_fraction(sun_z: f64) -> f64 {
    (sun_z * (0.5 / TWILIGHT_HALF_WIDTH) + 0.5).clamp(0.0, 1.0)
}

/// Background colour for the given sun height.
pub fn sky_color(sun_z: f64, day: Rgba, night: Rgba) -> Rgba {
    night.mix(day, daylight_fraction(sun_z))
}
