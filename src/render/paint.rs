//! egui Painter backend for sky frames.
//!
//! Replays a [`Frame`] draw list onto an `egui::Painter`, offset to the
//! rectangle the sky view occupies.

use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Shape, Stroke};

use crate::engine::pipeline::{DrawCommand, Frame};
use crate::render::color::Rgba;
use crate::sky::projection::ScreenPoint;

const STAR_OUTLINE_WIDTH: f32 = 1.0;

#[inline]
pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

#[inline]
pub fn to_pos(origin: Pos2, p: ScreenPoint) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

/// Paints frames; holds text styling only.
pub struct SkyPainter {
    label_font: FontId,
}

impl Default for SkyPainter {
    fn default() -> Self {
        Self::new(14.0)
    }
}

impl SkyPainter {
    pub fn new(label_size: f32) -> Self {
        Self {
            label_font: FontId::proportional(label_size),
        }
    }

    /// Draw `frame` inside `rect`. Frame coordinates are relative to `rect.min`.
    pub fn paint(&self, painter: &egui::Painter, rect: Rect, frame: &Frame) {
        painter.rect_filled(rect, Rounding::ZERO, to_color32(frame.background));
        let origin = rect.min;

        for cmd in &frame.commands {
            match cmd {
                DrawCommand::Polyline { points, color, width } => {
                    let pts: Vec<Pos2> = points.iter().map(|p| to_pos(origin, *p)).collect();
                    painter.add(Shape::line(pts, Stroke::new(*width, to_color32(*color))));
                }
                DrawCommand::Circle { center, radius, fill, stroke } => {
                    let c = to_pos(origin, *center);
                    let r = *radius as f32;
                    if let Some(fill) = fill {
                        painter.circle_filled(c, r, to_color32(*fill));
                    }
                    if let Some(stroke) = stroke {
                        painter.circle_stroke(c, r, Stroke::new(STAR_OUTLINE_WIDTH, to_color32(*stroke)));
                    }
                }
                DrawCommand::Text { position, text, color } => {
                    painter.text(
                        to_pos(origin, *position),
                        Align2::CENTER_CENTER,
                        text,
                        self.label_font.clone(),
                        to_color32(*color),
                    );
                }
            }
        }
    }
}
