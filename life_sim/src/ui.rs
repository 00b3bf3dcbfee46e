// ui.rs - eframe window: control bar, life view, status bar

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use eframe::egui;
use egui::Vec2;
use golife::patterns;
use tokio::runtime::Handle;

use crate::clock::SimulationClock;
use crate::config::{MAX_STEP_INTERVAL, MIN_STEP_INTERVAL, SimConfig};
use crate::driver::{StepDriver, StepObserver};
use crate::error::AdvanceError;
use crate::raster::Rasterizer;
use crate::snapshot::PopulationSnapshot;
use crate::status::{StatusPoller, StatusReport, StatusSink};
use crate::surface::{PainterSurface, render_snapshot};
use crate::viewport::ViewportController;

/// Hands background events to the UI thread and asks it to repaint.
struct UiBridge {
    ctx: egui::Context,
    status: Mutex<Option<StatusReport>>,
    notice: Mutex<Option<String>>,
}

impl UiBridge {
    fn status(&self) -> Option<StatusReport> {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notice(&self) -> Option<String> {
        self.notice.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_notice(&self, notice: Option<String>) {
        *self.notice.lock().unwrap_or_else(PoisonError::into_inner) = notice;
        self.ctx.request_repaint();
    }
}

impl StepObserver for UiBridge {
    fn stepped(&self, _snapshot: &Arc<PopulationSnapshot>) {
        self.ctx.request_repaint();
    }

    fn failed(&self, error: &AdvanceError) {
        self.set_notice(Some(format!("Simulation paused: {error}")));
    }

    fn run_state_changed(&self, _running: bool) {
        self.ctx.request_repaint();
    }
}

impl StatusSink for UiBridge {
    fn update(&self, report: &StatusReport) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        // Only wake the UI when something visible changed.
        if status.as_ref() != Some(report) {
            *status = Some(*report);
            self.ctx.request_repaint();
        }
    }
}

pub struct LifeApp {
    driver: StepDriver,
    viewport: ViewportController,
    raster: Rasterizer,
    bridge: Arc<UiBridge>,
    interval_ms: f32,
    pattern_names: Vec<&'static str>,
    selected_pattern: usize,
    loaded_pattern: String,
    min_surface: Vec2,
}

impl LifeApp {
    pub fn new(
        ctx: egui::Context,
        runtime: Handle,
        clock: Arc<SimulationClock>,
        config: SimConfig,
        loaded_pattern: String,
    ) -> Self {
        let bridge = Arc::new(UiBridge {
            ctx,
            status: Mutex::new(None),
            notice: Mutex::new(None),
        });

        let mut viewport = ViewportController::new(config.auto_zoom);
        viewport.reset_to_fit(clock.snapshot().bounds());

        StatusPoller::new(clock.clone(), viewport.gauge(), bridge.clone(), config.status_cadence).spawn(&runtime);

        let driver = StepDriver::new(clock, bridge.clone(), runtime, config.step_interval);

        Self {
            interval_ms: driver.step_interval().as_secs_f32() * 1000.0,
            driver,
            viewport,
            raster: Rasterizer::new(config.raster),
            bridge,
            pattern_names: patterns::builtin_names().collect(),
            selected_pattern: 0,
            loaded_pattern,
            min_surface: Vec2::from(config.min_surface),
        }
    }

    fn toggle_running(&self) {
        if self.driver.is_running() {
            self.driver.stop();
        } else {
            self.bridge.set_notice(None);
            self.driver.start();
        }
    }

    fn load_selected_pattern(&mut self) {
        let name = self.pattern_names[self.selected_pattern];
        self.driver.stop();
        match patterns::builtin(name) {
            Some(Ok(population)) => {
                let snapshot = self.driver.clock().reset(population);
                self.viewport.reset_to_fit(snapshot.bounds());
                self.loaded_pattern = name.to_string();
                self.bridge.set_notice(None);
                tracing::info!(pattern = name, cells = snapshot.cell_count(), "pattern loaded");
            }
            Some(Err(err)) => {
                tracing::warn!(pattern = name, error = %err, "built-in pattern failed to load");
                self.bridge.set_notice(Some(format!("Could not load {name}: {err}")));
            }
            None => tracing::warn!(pattern = name, "unknown built-in pattern"),
        }
    }

    fn control_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let running = self.driver.is_running();
            let button_text = if running { "⏸ Pause" } else { "▶ Run" };
            if ui.button(button_text).clicked() {
                self.toggle_running();
            }

            if ui.add_enabled(!running, egui::Button::new("⏭ Step")).clicked() {
                if let Err(err) = self.driver.step_once() {
                    tracing::debug!(error = %err, "step ignored");
                }
            }

            ui.separator();

            let mut auto_zoom = self.viewport.auto_zoom_enabled();
            if ui.checkbox(&mut auto_zoom, "Auto Zoom").changed() {
                self.viewport.set_auto_zoom(auto_zoom);
            }
            if ui.button("Fit").clicked() {
                self.viewport.reset_to_fit(self.driver.clock().snapshot().bounds());
            }

            ui.separator();

            // Speed control
            ui.label("faster");
            let range = MIN_STEP_INTERVAL.as_secs_f32() * 1000.0..=MAX_STEP_INTERVAL.as_secs_f32() * 1000.0;
            let slider = egui::Slider::new(&mut self.interval_ms, range)
                .logarithmic(true)
                .suffix(" ms");
            if ui.add(slider).changed() {
                self.driver.set_step_interval(Duration::from_secs_f32(self.interval_ms / 1000.0));
            }
            ui.label("slower");

            ui.separator();

            // Pattern dropdown
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(self.pattern_names[self.selected_pattern])
                .show_ui(ui, |ui| {
                    for (i, name) in self.pattern_names.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, *name);
                    }
                });
            if ui.button("Load").clicked() {
                self.load_selected_pattern();
            }
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        if let Some(notice) = self.bridge.notice() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), notice);
                if ui.small_button("✖").clicked() {
                    self.bridge.set_notice(None);
                }
            });
        }

        ui.horizontal(|ui| {
            match self.bridge.status() {
                Some(report) => ui.label(report.to_string()),
                None => ui.label("Generation: -  Live Cells: -  Scale: -"),
            };
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(self.loaded_pattern.as_str());
            });
        });
    }

    fn life_view(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size().max(self.min_surface);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());

        let config = self.raster.config();
        let color = if self.driver.is_running() { config.running_color } else { config.idle_color };
        self.raster.set_cell_color(color);

        let snapshot = self.driver.clock().snapshot();
        let mut surface = PainterSurface::new(&painter, response.rect);
        if !render_snapshot(&mut surface, &mut self.viewport, &self.raster, &snapshot) {
            tracing::trace!("skipping frame on zero-sized surface");
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.control_bar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.life_view(ui));
    }
}
