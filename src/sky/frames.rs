//! Reference-frame rotations for the celestial sphere.
//!
//! Frames, outermost first: ecliptic → equatorial → horizontal → view.
//! Every frame change is a `UnitQuaternion<f64>`.
//!
//! ## Composition order
//! `a * b` applied to `v` is `a * (b * v)`: the right-hand rotation is
//! applied first. All call sites in the crate build chains in that order,
//! e.g. a star in the view frame is `view * (horizontal * v)`.
//!
//! ## Axes
//! Unit vectors come from [`spherical_to_orthogonal`]. In the horizontal
//! frame +z is the zenith and +y is azimuth 0. In the view frame +y is the
//! look direction, +x is screen right and +z is screen up.

use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Rotation between two frames.
pub type Rotation = UnitQuaternion<f64>;

/// Spherical (longitude, latitude) → unit vector.
///
/// Longitude is negated before the conversion (east-positive).
#[inline]
pub fn spherical_to_orthogonal(longitude: f64, latitude: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = (-longitude).sin_cos();
    Vector3::new(cos_lat * sin_lon, cos_lat * cos_lon, sin_lat)
}

/// Tilt of the ecliptic against the equator: a turn about +y.
pub fn ecliptic_to_equatorial(obliquity: f64) -> Rotation {
    Rotation::from_axis_angle(&Vector3::y_axis(), obliquity)
}

/// Spin by the diurnal angle and observer longitude, then tilt to the
/// observer's latitude.
pub fn equatorial_to_horizontal(diurnal: f64, longitude: f64, latitude: f64) -> Rotation {
    let tilt = Rotation::from_axis_angle(&Vector3::x_axis(), latitude - FRAC_PI_2);
    let spin = Rotation::from_axis_angle(&Vector3::z_axis(), -diurnal - longitude);
    compose(tilt, spin)
}

/// Camera orientation: azimuth turn about the zenith, then pitch.
pub fn horizontal_to_view(look_azimuth: f64, look_altitude: f64) -> Rotation {
    let pitch = Rotation::from_axis_angle(&Vector3::x_axis(), -look_altitude);
    let turn = Rotation::from_axis_angle(&Vector3::z_axis(), look_azimuth);
    compose(pitch, turn)
}

/// `outer ∘ inner`: `inner` is applied first.
#[inline]
pub fn compose(outer: Rotation, inner: Rotation) -> Rotation {
    outer * inner
}

/// All rotations needed for one frame, derived once from the scene state.
#[derive(Debug, Clone, Copy)]
pub struct FrameStack {
    pub ecliptic_to_equatorial: Rotation,
    pub equatorial_to_horizontal: Rotation,
    pub horizontal_to_view: Rotation,
}

impl FrameStack {
    /// Equatorial vector → horizontal frame.
    pub fn equatorial_to_horizontal(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.equatorial_to_horizontal * v
    }

    /// Ecliptic vector → horizontal frame.
    pub fn ecliptic_to_horizontal(&self, v: &Vector3<f64>) -> Vector3<f64> {
        compose(self.equatorial_to_horizontal, self.ecliptic_to_equatorial) * v
    }

    /// Horizontal vector → view frame.
    pub fn horizontal_to_view(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.horizontal_to_view * v
    }
}
