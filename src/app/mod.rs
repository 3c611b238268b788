//! `SkyApp`: the top-level egui application state.
//!
//! This module declares the `SkyApp` struct and the event plumbing shared by
//! its sub-modules:
//!
//! - `controls`: side panel: time/place controls, auto-advance, stats
//! - `sky_view`: central canvas: pointer input, frame loop, painting

pub mod controls;
pub mod sky_view;

use std::collections::HashMap;
use std::time::Instant;

use eframe::egui;

use skydome::engine::pipeline::{Frame, SkyEngine};
use skydome::input::{InputEvent, InputResponse, SkyController};
use skydome::render::animator::{FrameControl, FramePacer};
use skydome::render::paint::SkyPainter;
use skydome::sky::projection::Viewport;
use skydome::sky::scene::AngleField;
use skydome::{SkyConfig, SkyError};

// ─── Application state ───────────────────────────────────────────────────────

pub struct SkyApp {
    pub controller: SkyController,
    pub engine: SkyEngine,
    pub painter: SkyPainter,
    /// Last built draw list
    pub frame: Option<Frame>,
    /// Scene changed since `frame` was built
    pub dirty: bool,
    /// Time of the previous animation frame
    pub last_tick: Instant,
    /// Deadline of the next animation frame
    pub pacer: FramePacer,
    /// Last rejected control input, shown under the controls
    pub error: Option<String>,
    /// Text boxes next to each slider
    pub text_inputs: HashMap<AngleField, String>,
    pub show_stats: bool,
}

impl SkyApp {
    pub fn new(config: &SkyConfig) -> Result<Self, SkyError> {
        let engine = SkyEngine::new(config)?;
        let controller = SkyController::new(config, Viewport::default())?;
        Ok(Self {
            controller,
            engine,
            painter: SkyPainter::default(),
            frame: None,
            dirty: true,
            last_tick: Instant::now(),
            pacer: FramePacer::default(),
            error: None,
            text_inputs: HashMap::new(),
            show_stats: true,
        })
    }

    /// Feed one event to the controller and act on its response.
    pub fn dispatch(&mut self, ctx: &egui::Context, event: InputEvent) {
        let is_control = matches!(
            event,
            InputEvent::SetAngle { .. } | InputEvent::EnterText { .. }
        );
        match self.controller.handle_input(event) {
            Ok(response) => {
                if is_control {
                    self.error = None;
                }
                self.apply(ctx, response);
            }
            Err(e) => {
                log::warn!("[app] {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn apply(&mut self, ctx: &egui::Context, response: InputResponse) {
        if response.redraw {
            self.dirty = true;
        }
        if response.start_loop {
            let now = Instant::now();
            self.last_tick = now;
            self.pacer.schedule(now);
            ctx.request_repaint_after(self.pacer.period());
        }
    }

    /// Run the pending animation frame once its deadline has passed, and
    /// reschedule. Passes egui runs for input in between only re-arm the
    /// repaint.
    pub fn tick(&mut self, ctx: &egui::Context) {
        if !self.controller.animator().is_scheduled() {
            return;
        }
        let now = Instant::now();
        if !self.pacer.take_due(now) {
            if let Some(wait) = self.pacer.remaining(now) {
                ctx.request_repaint_after(wait);
            }
            return;
        }
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        match self.controller.on_frame(elapsed) {
            FrameControl::Continue => {
                self.dirty = true;
                self.pacer.schedule(now);
                ctx.request_repaint_after(self.pacer.period());
            }
            FrameControl::Stop => {}
        }
    }

    /// Rebuild the draw list if the scene changed.
    pub fn refresh_frame(&mut self) {
        if self.dirty || self.frame.is_none() {
            let controller = &self.controller;
            self.frame = Some(self.engine.render(controller.params(), controller.viewport()));
            self.dirty = false;
        }
    }
}

impl eframe::App for SkyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx);

        egui::SidePanel::right("controls")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.draw_controls(ui, ctx);
            });

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_sky(ui, &ctx_clone);
            });
    }
}
