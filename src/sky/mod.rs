//! Celestial-sphere model: frames, projection, catalog and scene state.
//!
//! Pipeline for one point: (lon, lat) → unit vector → equatorial →
//! horizontal → view → screen, with the near-plane cull at the last step.

pub mod catalog;
pub mod frames;
pub mod projection;
pub mod scene;
