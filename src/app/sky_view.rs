//! Central sky canvas for `SkyApp`.
//!
//! Translates egui pointer state into `InputEvent`s, then paints the cached
//! draw list into the allocated rectangle.

use eframe::egui;
use skydome::input::InputEvent;

use super::SkyApp;

impl SkyApp {
    pub fn draw_sky(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let response = ui.allocate_response(
            ui.available_size(),
            egui::Sense::click_and_drag().union(egui::Sense::hover()),
        );
        let rect = response.rect;

        // No-op unless the panel size changed
        self.dispatch(
            ctx,
            InputEvent::Resize {
                width: rect.width() as f64,
                height: rect.height() as f64,
            },
        );

        // Drag to look around
        if response.dragged() {
            let delta = response.drag_delta();
            self.dispatch(
                ctx,
                InputEvent::Drag {
                    dx: delta.x as f64,
                    dy: delta.y as f64,
                },
            );
        }

        // Scroll to zoom
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.dispatch(ctx, InputEvent::Scroll { delta: scroll as f64 });
            }
        }

        self.refresh_frame();
        if let Some(ref frame) = self.frame {
            self.painter.paint(&ui.painter_at(rect), rect, frame);
        }
    }
}
