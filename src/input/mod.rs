//! Interaction handling.
//!
//! The platform layer turns its raw events into [`InputEvent`] values and
//! feeds them to [`SkyController::handle_input`]:
//! - Drag: pixel delta → look azimuth/altitude
//! - Scroll: wheel sign → zoom by a fixed factor, clamped
//! - SetAngle / EnterText: time and place controls, in degrees
//! - SetAuto: the two auto-advance checkboxes
//! - Resize: new viewport size
//!
//! The returned [`InputResponse`] tells the caller whether to re-render now
//! and whether to kick off the frame loop.

use std::time::Duration;

use crate::config::{DragSensitivity, SkyConfig};
use crate::error::SkyError;
use crate::render::animator::{Animator, AutoTarget, FrameControl};
use crate::sky::projection::Viewport;
use crate::sky::scene::{AngleField, SceneParams};

/// Platform-independent input event
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer dragged by (dx, dy) pixels
    Drag { dx: f64, dy: f64 },
    /// Wheel moved; only the sign matters (positive = zoom in)
    Scroll { delta: f64 },
    /// Control moved to a value in degrees
    SetAngle { field: AngleField, degrees: f64 },
    /// Control value typed as text, in degrees
    EnterText { field: AngleField, text: String },
    /// Auto-advance checkbox toggled
    SetAuto { target: AutoTarget, enabled: bool },
    /// Drawing surface resized
    Resize { width: f64, height: f64 },
}

/// What the caller must do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// Render immediately
    pub redraw: bool,
    /// Schedule the first animation frame
    pub start_loop: bool,
}

impl InputResponse {
    const NONE: Self = Self { redraw: false, start_loop: false };
    const REDRAW: Self = Self { redraw: true, start_loop: false };
}

/// Owns the scene state and applies input and animation to it.
pub struct SkyController {
    params: SceneParams,
    viewport: Viewport,
    animator: Animator,
    drag: DragSensitivity,
    zoom_factor: f64,
    min_scale: f64,
    max_scale: f64,
}

impl SkyController {
    pub fn new(config: &SkyConfig, viewport: Viewport) -> Result<Self, SkyError> {
        config.validate()?;
        Ok(Self {
            params: config.initial,
            viewport,
            animator: Animator::new(config.time_step),
            drag: config.drag,
            zoom_factor: config.zoom_factor,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
        })
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Single entry point for all user input.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<InputResponse, SkyError> {
        match event {
            InputEvent::Drag { dx, dy } => Ok(self.drag_by(dx, dy)),
            InputEvent::Scroll { delta } => Ok(self.zoom(delta)),
            InputEvent::SetAngle { field, degrees } => {
                if !degrees.is_finite() {
                    return Err(SkyError::InvalidParameter {
                        field,
                        input: degrees.to_string(),
                    });
                }
                Ok(self.set_angle(field, field.to_radians(degrees)))
            }
            InputEvent::EnterText { field, text } => {
                let radians = field.parse(&text).map_err(|e| {
                    log::warn!("[input] rejected {}", e);
                    e
                })?;
                Ok(self.set_angle(field, radians))
            }
            InputEvent::SetAuto { target, enabled } => {
                let start_loop = self.animator.set_auto(target, enabled);
                Ok(InputResponse { redraw: false, start_loop })
            }
            InputEvent::Resize { width, height } => {
                let viewport = Viewport::new(width, height);
                if viewport == self.viewport {
                    return Ok(InputResponse::NONE);
                }
                log::debug!("[input] resize {}x{}", viewport.width, viewport.height);
                self.viewport = viewport;
                Ok(self.redraw_if_idle())
            }
        }
    }

    /// Animation frame callback; see [`Animator::on_frame`].
    pub fn on_frame(&mut self, elapsed: Duration) -> FrameControl {
        self.animator.on_frame(&mut self.params, elapsed)
    }

    /// Radians of turn per dragged pixel at the current zoom.
    pub fn drag_sensitivity(&self) -> f64 {
        match self.drag {
            DragSensitivity::Fixed(k) => k,
            DragSensitivity::ZoomRelative => self.params.scale / self.viewport.resolution(),
        }
    }

    fn drag_by(&mut self, dx: f64, dy: f64) -> InputResponse {
        if !(dx.is_finite() && dy.is_finite()) || (dx == 0.0 && dy == 0.0) {
            return InputResponse::NONE;
        }
        let k = self.drag_sensitivity();
        self.params.look_by(-dx * k, dy * k);
        InputResponse::REDRAW
    }

    fn zoom(&mut self, delta: f64) -> InputResponse {
        if !delta.is_finite() || delta == 0.0 {
            return InputResponse::NONE;
        }
        let scale = if delta > 0.0 {
            self.params.scale / self.zoom_factor
        } else {
            self.params.scale * self.zoom_factor
        };
        self.params.scale = scale.clamp(self.min_scale, self.max_scale);
        InputResponse::REDRAW
    }

    fn set_angle(&mut self, field: AngleField, radians: f64) -> InputResponse {
        self.params.set_angle(field, radians);
        self.redraw_if_idle()
    }

    /// A pending animation frame will render anyway.
    fn redraw_if_idle(&self) -> InputResponse {
        if self.animator.is_animating() {
            InputResponse::NONE
        } else {
            InputResponse::REDRAW
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeStep;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn controller() -> SkyController {
        SkyController::new(&SkyConfig::default(), Viewport::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn test_drag_zoom_relative() {
        let mut c = controller();
        let k = c.params().scale / 300.0;
        let r = c.handle_input(InputEvent::Drag { dx: 10.0, dy: -20.0 }).unwrap();
        assert!(r.redraw);
        let expected_az = (-10.0 * k).rem_euclid(std::f64::consts::TAU);
        assert!((c.params().look_azimuth - expected_az).abs() < 1e-12);
        assert!((c.params().look_altitude + 20.0 * k).abs() < 1e-12);
    }

    #[test]
    fn test_drag_fixed_sensitivity() {
        let cfg = SkyConfig::default().with_drag(DragSensitivity::Fixed(0.002));
        let mut c = SkyController::new(&cfg, Viewport::default()).unwrap();
        c.handle_input(InputEvent::Drag { dx: 0.0, dy: 100.0 }).unwrap();
        assert!((c.params().look_altitude - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_drag_keeps_altitude_clamped() {
        let cfg = SkyConfig::default().with_drag(DragSensitivity::Fixed(0.01));
        let mut c = SkyController::new(&cfg, Viewport::default()).unwrap();
        let deltas = [400.0, 900.0, -50.0, -3000.0, 12.0, 7000.0, -1.0];
        for dy in deltas {
            c.handle_input(InputEvent::Drag { dx: 3.0, dy }).unwrap();
            let alt = c.params().look_altitude;
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&alt), "alt = {}", alt);
        }
    }

    #[test]
    fn test_zero_drag_is_ignored() {
        let mut c = controller();
        let r = c.handle_input(InputEvent::Drag { dx: 0.0, dy: 0.0 }).unwrap();
        assert_eq!(r, InputResponse::NONE);
    }

    #[test]
    fn test_scroll_zoom_and_limit() {
        let mut c = controller();
        let s0 = c.params().scale;
        c.handle_input(InputEvent::Scroll { delta: 3.0 }).unwrap();
        assert!((c.params().scale - s0 / 1.2).abs() < 1e-12);
        c.handle_input(InputEvent::Scroll { delta: -0.5 }).unwrap();
        assert!((c.params().scale - s0).abs() < 1e-12);
        for _ in 0..50 {
            c.handle_input(InputEvent::Scroll { delta: -1.0 }).unwrap();
        }
        assert_eq!(c.params().scale, 1.4);
        for _ in 0..100 {
            c.handle_input(InputEvent::Scroll { delta: 1.0 }).unwrap();
        }
        assert_eq!(c.params().scale, 0.01);
        assert_eq!(c.handle_input(InputEvent::Scroll { delta: 0.0 }).unwrap(), InputResponse::NONE);
    }

    #[test]
    fn test_set_angle_converts_degrees() {
        let mut c = controller();
        let r = c
            .handle_input(InputEvent::SetAngle { field: AngleField::Diurnal, degrees: 90.0 })
            .unwrap();
        assert!(r.redraw);
        assert!((c.params().diurnal - FRAC_PI_2).abs() < 1e-12);
        c.handle_input(InputEvent::SetAngle { field: AngleField::Latitude, degrees: 0.0 })
            .unwrap();
        assert!((c.params().latitude + FRAC_PI_2).abs() < 1e-12);
        c.handle_input(InputEvent::SetAngle { field: AngleField::Annual, degrees: 540.0 })
            .unwrap();
        assert!((c.params().annual - PI).abs() < 1e-9);
    }

    #[test]
    fn test_enter_text_invalid_leaves_state() {
        let mut c = controller();
        let before = *c.params();
        let err = c
            .handle_input(InputEvent::EnterText {
                field: AngleField::Obliquity,
                text: "23.4deg".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, SkyError::InvalidParameter { field: AngleField::Obliquity, .. }));
        assert_eq!(*c.params(), before);

        c.handle_input(InputEvent::EnterText {
            field: AngleField::Obliquity,
            text: "45".to_string(),
        })
        .unwrap();
        assert!((c.params().obliquity - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_slider_rejected() {
        let mut c = controller();
        assert!(c
            .handle_input(InputEvent::SetAngle { field: AngleField::Longitude, degrees: f64::NAN })
            .is_err());
    }

    #[test]
    fn test_manual_edit_redraws_only_when_idle() {
        let cfg = SkyConfig::default().with_time_step(TimeStep::Fixed { diurnal: 0.1, annual: 0.0 });
        let mut c = SkyController::new(&cfg, Viewport::default()).unwrap();
        let set = InputEvent::SetAngle { field: AngleField::Obliquity, degrees: 10.0 };

        assert!(c.handle_input(set.clone()).unwrap().redraw);
        let r = c
            .handle_input(InputEvent::SetAuto { target: AutoTarget::Diurnal, enabled: true })
            .unwrap();
        assert!(r.start_loop);
        let r = c.handle_input(set).unwrap();
        assert!(!r.redraw);
        // the edit still applied
        assert!((c.params().obliquity - 10f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_toggle_off_on_single_loop() {
        let mut c = controller();
        let on = InputEvent::SetAuto { target: AutoTarget::Diurnal, enabled: true };
        let off = InputEvent::SetAuto { target: AutoTarget::Diurnal, enabled: false };
        let mut starts = 0;
        for ev in [on.clone(), off.clone(), on.clone(), off, on] {
            if c.handle_input(ev).unwrap().start_loop {
                starts += 1;
            }
        }
        assert_eq!(starts, 1);
        assert_eq!(c.on_frame(Duration::from_millis(16)), FrameControl::Continue);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut c = controller();
        let r = c.handle_input(InputEvent::Resize { width: 1024.0, height: 768.0 }).unwrap();
        assert!(r.redraw);
        assert_eq!(c.viewport().resolution(), 384.0);
        let r = c.handle_input(InputEvent::Resize { width: 1024.0, height: 768.0 }).unwrap();
        assert!(!r.redraw);
        c.handle_input(InputEvent::Resize { width: -5.0, height: 0.0 }).unwrap();
        assert_eq!(c.viewport().width, 1.0);
    }
}
