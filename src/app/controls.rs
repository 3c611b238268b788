//! Side-panel controls for `SkyApp`.
//!
//! One row per time/place angle (slider, whole-degree read-out, exact-value
//! text box), the two auto-advance checkboxes, overlay toggles and the
//! optional statistics block.

use eframe::egui;
use skydome::input::InputEvent;
use skydome::render::animator::AutoTarget;
use skydome::sky::scene::AngleField;

use super::SkyApp;

impl SkyApp {
    /// Render the controls side panel.
    pub fn draw_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        // Collected first, dispatched after the widgets release `self`
        let mut events: Vec<InputEvent> = Vec::new();

        ui.heading("Sky");
        ui.add_space(4.0);

        let params = *self.controller.params();
        egui::Grid::new("angle_controls")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for field in AngleField::ALL {
                    ui.label(field.label());

                    let mut value = field.to_control(params.angle(field));
                    let slider = egui::Slider::new(&mut value, field.control_range())
                        .show_value(false);
                    if ui.add(slider).changed() {
                        events.push(InputEvent::SetAngle { field, degrees: value });
                    }
                    ui.monospace(format!("{:>4}°", params.display_degrees(field)));

                    let text = self.text_inputs.entry(field).or_default();
                    let response = ui.add_sized(
                        [56.0, 20.0],
                        egui::TextEdit::singleline(text).hint_text("deg"),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        events.push(InputEvent::EnterText {
                            field,
                            text: std::mem::take(text),
                        });
                    }
                    ui.end_row();
                }
            });

        if let Some(ref err) = self.error {
            ui.colored_label(egui::Color32::from_rgb(255, 80, 80), err);
        }

        ui.separator();

        // Auto-advance
        for (target, label) in [
            (AutoTarget::Diurnal, "Auto diurnal"),
            (AutoTarget::Annual, "Auto annual"),
        ] {
            let mut enabled = self.controller.animator().auto(target);
            if ui.checkbox(&mut enabled, label).changed() {
                events.push(InputEvent::SetAuto { target, enabled });
            }
        }

        ui.separator();

        // Overlays
        let mut overlays = self.engine.overlays();
        let before = overlays;
        ui.checkbox(&mut overlays.horizontal_grid, "Alt/az grid");
        ui.checkbox(&mut overlays.equatorial_grid, "Equatorial grid");
        ui.checkbox(&mut overlays.horizon, "Horizon");
        ui.checkbox(&mut overlays.ecliptic, "Ecliptic");
        ui.checkbox(&mut overlays.labels, "Labels");
        if overlays != before {
            self.engine.set_overlays(overlays);
            self.dirty = true;
        }

        ui.separator();
        ui.toggle_value(&mut self.show_stats, "Stats");
        if self.show_stats {
            self.draw_stats(ui);
        }

        for event in events {
            self.dispatch(ctx, event);
        }
    }

    fn draw_stats(&self, ui: &mut egui::Ui) {
        let params = self.controller.params();
        let viewport = self.controller.viewport();
        let fov = 2.0 * params.scale.atan().to_degrees();

        ui.label(format!("Look az: {:.1}°", params.look_azimuth.to_degrees()));
        ui.label(format!("Look alt: {:.1}°", params.look_altitude.to_degrees()));
        ui.label(format!("FOV: {:.1}° (scale {:.3})", fov, params.scale));
        ui.label(format!("Viewport: {:.0}x{:.0}", viewport.width, viewport.height));
        ui.label(format!(
            "Animating: {}",
            if self.controller.animator().is_animating() { "yes" } else { "no" }
        ));

        if let Some(ref frame) = self.frame {
            let s = frame.stats;
            ui.label(format!("Stars: {}/{} ({} up)", s.stars_drawn, s.stars_total, s.stars_above_horizon));
            ui.label(format!("Grid lines: {}", s.polylines));
            ui.label(format!(
                "Sun: {} (z {:+.2})",
                if s.sun_visible { "in view" } else { "out of view" },
                frame.sun_altitude_z
            ));
        }
    }
}
