//! Synthetic star catalog.
//!
//! Positions are uniform over the sphere: azimuth uniform in [0, 2π),
//! altitude = asin(u) with u uniform in [-1, 1]. Apparent magnitudes follow
//! a skewed distribution (many faint stars, few bright ones) and are turned
//! into a draw radius and opacity once, at generation time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Faintest synthetic magnitude.
pub const MAGNITUDE_LIMIT: f64 = 6.0;

const MIN_RADIUS: f64 = 0.6;
const RADIUS_PER_MAGNITUDE: f64 = 0.35;
const MIN_OPACITY: f64 = 0.25;

/// A fixed point on the celestial sphere (equatorial frame).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Longitude-like angle in radians, [0, 2π)
    pub azimuth: f64,
    /// Latitude-like angle in radians, [-π/2, π/2]
    pub altitude: f64,
    /// Circle radius in pixels
    pub draw_radius: f64,
    /// Alpha in [0, 1]
    pub draw_opacity: f64,
}

impl Star {
    /// Build a star from its position and apparent magnitude.
    pub fn with_magnitude(azimuth: f64, altitude: f64, magnitude: f64) -> Self {
        let m = magnitude.clamp(0.0, MAGNITUDE_LIMIT);
        let brightness = MAGNITUDE_LIMIT - m;
        Self {
            azimuth,
            altitude,
            draw_radius: MIN_RADIUS + RADIUS_PER_MAGNITUDE * brightness,
            draw_opacity: MIN_OPACITY + (1.0 - MIN_OPACITY) * brightness / MAGNITUDE_LIMIT,
        }
    }
}

/// Immutable list of stars, generated once per process.
#[derive(Debug, Clone)]
pub struct StarCatalog {
    stars: Vec<Star>,
}

impl StarCatalog {
    /// Sample `count` stars. A `None` seed draws from OS entropy.
    pub fn generate(count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let stars = (0..count).map(|_| sample_star(&mut rng)).collect();
        log::info!("[catalog] generated {} stars (seed: {:?})", count, seed);
        Self { stars }
    }

    pub fn from_stars(stars: Vec<Star>) -> Self {
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

fn sample_star<R: Rng>(rng: &mut R) -> Star {
    let azimuth = rng.gen_range(0.0..TAU);
    let altitude = rng.gen_range(-1.0..=1.0f64).asin();
    // u^(1/4) piles magnitudes up near the faint limit
    let magnitude = MAGNITUDE_LIMIT * rng.gen::<f64>().powf(0.25);
    Star::with_magnitude(azimuth, altitude, magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_generate_count_and_ranges() {
        let catalog = StarCatalog::generate(2000, Some(7));
        assert_eq!(catalog.len(), 2000);
        for s in catalog.stars() {
            assert!(s.azimuth >= 0.0 && s.azimuth < TAU);
            assert!(s.altitude >= -FRAC_PI_2 && s.altitude <= FRAC_PI_2);
            assert!(s.draw_radius >= MIN_RADIUS);
            assert!(s.draw_opacity > 0.0 && s.draw_opacity <= 1.0);
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = StarCatalog::generate(50, Some(42));
        let b = StarCatalog::generate(50, Some(42));
        assert_eq!(a.stars(), b.stars());
        let c = StarCatalog::generate(50, Some(43));
        assert_ne!(a.stars(), c.stars());
    }

    #[test]
    fn test_uniform_over_sphere() {
        // Uniform on the sphere means sin(altitude) is uniform in [-1, 1]:
        // about half the stars lie in the band |sin(alt)| < 0.5.
        let catalog = StarCatalog::generate(20_000, Some(1));
        let band = catalog
            .stars()
            .iter()
            .filter(|s| s.altitude.sin().abs() < 0.5)
            .count() as f64
            / catalog.len() as f64;
        assert!((band - 0.5).abs() < 0.02, "band fraction = {}", band);
    }

    #[test]
    fn test_faint_stars_dominate() {
        let catalog = StarCatalog::generate(5000, Some(3));
        let bright = catalog.stars().iter().filter(|s| s.draw_opacity > 0.75).count();
        assert!(bright * 4 < catalog.len(), "bright = {}", bright);
    }

    #[test]
    fn test_magnitude_mapping() {
        let brightest = Star::with_magnitude(0.0, 0.0, 0.0);
        let faintest = Star::with_magnitude(0.0, 0.0, MAGNITUDE_LIMIT);
        assert!((brightest.draw_opacity - 1.0).abs() < 1e-12);
        assert!((faintest.draw_opacity - MIN_OPACITY).abs() < 1e-12);
        assert!(brightest.draw_radius > faintest.draw_radius);
        // out-of-range magnitudes clamp
        assert_eq!(Star::with_magnitude(0.0, 0.0, 99.0), faintest);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = StarCatalog::generate(0, Some(0));
        assert!(catalog.is_empty());
    }
}
