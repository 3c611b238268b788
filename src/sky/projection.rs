//! Perspective projection from the view frame onto the viewport.
//!
//! Screen convention: origin at the top-left corner, y grows downward.
//! A view vector `(right, forward, up)` lands at
//! `center + (right/forward, -up/forward) / scale * resolution`.

use nalgebra::Vector3;

/// Minimum forward depth of a visible point (inclusive cull bound).
pub const NEAR_PLANE: f64 = 0.1;

/// Drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Sizes below one pixel are raised to one pixel.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Pixels per unit of tangent-plane offset at scale 1: half the smaller side.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.width.min(self.height) * 0.5
    }

    #[inline]
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint {
            x: self.width * 0.5,
            y: self.height * 0.5,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v >= 1.0 {
        v
    } else {
        1.0
    }
}

/// A projected point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Project a view-frame vector. `None` means the point is behind the camera
/// or inside the near plane.
pub fn view_to_screen(v: &Vector3<f64>, scale: f64, viewport: &Viewport) -> Option<ScreenPoint> {
    let forward = v.y;
    if forward <= NEAR_PLANE {
        return None;
    }
    let k = viewport.resolution() / (forward * scale);
    let center = viewport.center();
    Some(ScreenPoint {
        x: center.x + v.x * k,
        y: center.y - v.z * k,
    })
}

/// Project a sampled curve into visible runs.
///
/// A culled sample ends the current run; the next visible sample starts a
/// new one. Runs shorter than two points are dropped, so no segment ever
/// spans a culled sample.
pub fn project_polyline<I>(samples: I, scale: f64, viewport: &Viewport) -> Vec<Vec<ScreenPoint>>
where
    I: IntoIterator<Item = Vector3<f64>>,
{
    let mut runs = Vec::new();
    let mut current: Vec<ScreenPoint> = Vec::new();

    for v in samples {
        match view_to_screen(&v, scale, viewport) {
            Some(p) => current.push(p),
            None => flush_run(&mut runs, &mut current),
        }
    }
    flush_run(&mut runs, &mut current);
    runs
}

fn flush_run(runs: &mut Vec<Vec<ScreenPoint>>, current: &mut Vec<ScreenPoint>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky::frames::{horizontal_to_view, spherical_to_orthogonal};
    use std::f64::consts::PI;

    #[test]
    fn test_center_projection() {
        let vp = Viewport::new(800.0, 600.0);
        let scale = (PI / 8.0).tan();
        let v = horizontal_to_view(0.0, 0.0) * spherical_to_orthogonal(0.0, 0.0);
        let p = view_to_screen(&v, scale, &vp).unwrap();
        assert!((p.x - 400.0).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_plane_boundary_inclusive() {
        let sizes = [(800.0, 600.0), (1.0, 1.0), (3840.0, 2160.0)];
        let scales = [0.05, 0.414, 1.4];
        for &(w, h) in &sizes {
            let vp = Viewport::new(w, h);
            for &s in &scales {
                assert!(view_to_screen(&Vector3::new(0.0, 0.1, 0.0), s, &vp).is_none());
                assert!(view_to_screen(&Vector3::new(0.3, 0.05, 0.2), s, &vp).is_none());
                assert!(view_to_screen(&Vector3::new(0.0, -1.0, 0.0), s, &vp).is_none());
                assert!(view_to_screen(&Vector3::new(0.0, 0.1 + 1e-9, 0.0), s, &vp).is_some());
                assert!(view_to_screen(&Vector3::new(0.5, 0.5, -0.5), s, &vp).is_some());
            }
        }
    }

    #[test]
    fn test_up_is_screen_up() {
        let vp = Viewport::new(400.0, 400.0);
        let p = view_to_screen(&Vector3::new(0.1, 1.0, 0.2), 1.0, &vp).unwrap();
        assert!(p.x > 200.0);
        assert!(p.y < 200.0);
        // resolution = 200: offsets are 0.1*200 and 0.2*200
        assert!((p.x - 220.0).abs() < 1e-9);
        assert!((p.y - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_zooms() {
        let vp = Viewport::new(400.0, 400.0);
        let v = Vector3::new(0.1, 1.0, 0.0);
        let wide = view_to_screen(&v, 1.0, &vp).unwrap();
        let narrow = view_to_screen(&v, 0.5, &vp).unwrap();
        assert!((narrow.x - 200.0) > (wide.x - 200.0) * 1.99);
    }

    #[test]
    fn test_viewport_clamps_degenerate_size() {
        let vp = Viewport::new(0.0, f64::NAN);
        assert_eq!(vp.width, 1.0);
        assert_eq!(vp.height, 1.0);
        assert_eq!(Viewport::new(1000.0, 300.0).resolution(), 150.0);
    }

    #[test]
    fn test_polyline_breaks_on_cull() {
        let vp = Viewport::new(100.0, 100.0);
        let samples = vec![
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.1, 1.0, 0.0),
            Vector3::new(0.2, 1.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0), // culled
            Vector3::new(0.3, 1.0, 0.0),
            Vector3::new(0.0, 0.05, 0.0), // culled
            Vector3::new(0.4, 1.0, 0.0),
            Vector3::new(0.5, 1.0, 0.0),
        ];
        let runs = project_polyline(samples, 1.0, &vp);
        // [0,1,2] then a lone [4] (dropped) then [6,7]
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 3);
        assert_eq!(runs[1].len(), 2);
        assert!((runs[1][0].x - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_polyline_all_culled() {
        let vp = Viewport::default();
        let samples = (0..10).map(|_| Vector3::new(0.0, -1.0, 0.0));
        assert!(project_polyline(samples, 1.0, &vp).is_empty());
    }
}
