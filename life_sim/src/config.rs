// config.rs - Tunable defaults for the viewer

use std::time::Duration;

use egui::Color32;

pub const MIN_STEP_INTERVAL: Duration = Duration::from_micros(1_500);
pub const MAX_STEP_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_STATUS_CADENCE: Duration = Duration::from_millis(20);

/// Clamps a requested step interval to the supported range.
pub fn clamp_step_interval(interval: Duration) -> Duration {
    interval.clamp(MIN_STEP_INTERVAL, MAX_STEP_INTERVAL)
}

#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Scale (pixels per cell) at or above which cells are drawn as shapes.
    pub shape_threshold: f32,
    /// Edge length in pixels of an aggregated density block.
    pub bucket_size: f32,
    /// Lowest density an occupied pixel is drawn with.
    pub density_floor: f32,
    pub idle_color: Color32,
    pub running_color: Color32,
    pub background: Color32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            shape_threshold: 2.0,
            bucket_size: 2.0,
            density_floor: 0.25,
            idle_color: Color32::from_rgb(0, 0, 180),
            running_color: Color32::from_rgb(0, 180, 0),
            background: Color32::BLACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub step_interval: Duration,
    pub status_cadence: Duration,
    pub window_size: [f32; 2],
    pub min_surface: [f32; 2],
    pub auto_zoom: bool,
    pub raster: RasterConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_interval: DEFAULT_STEP_INTERVAL,
            status_cadence: DEFAULT_STATUS_CADENCE,
            window_size: [500.0, 500.0],
            min_surface: [150.0, 150.0],
            auto_zoom: true,
            raster: RasterConfig::default(),
        }
    }
}
