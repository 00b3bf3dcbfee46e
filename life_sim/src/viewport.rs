// viewport.rs - Visible cell box, auto-zoom and scale

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use egui::{Pos2, Vec2};
use golife::Cell;

use crate::error::ViewError;
use crate::snapshot::PopulationSnapshot;

/// Inclusive rectangle of cells to show. `min` never exceeds `max` on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBox {
    min: Cell,
    max: Cell,
}

impl ViewportBox {
    pub fn new(min: Cell, max: Cell) -> Result<Self, ViewError> {
        if min.x > max.x || min.y > max.y {
            return Err(ViewError::InvalidViewport { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Cell {
        self.min
    }

    pub fn max(&self) -> Cell {
        self.max
    }

    pub fn width_cells(&self) -> f64 {
        self.max.x as f64 - self.min.x as f64 + 1.0
    }

    pub fn height_cells(&self) -> f64 {
        self.max.y as f64 - self.min.y as f64 + 1.0
    }

    /// Centre in cell coordinates; may fall between cells.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.max.x as f64 + self.min.x as f64) / 2.0,
            (self.max.y as f64 + self.min.y as f64) / 2.0,
        )
    }
}

impl Default for ViewportBox {
    /// The 11x11 box (0,0)-(10,10).
    fn default() -> Self {
        Self { min: Cell::new(0, 0), max: Cell::new(10, 10) }
    }
}

/// Grows `bbox` just enough to contain `live`. Never shrinks.
pub fn auto_zoom(bbox: ViewportBox, live: (Cell, Cell)) -> ViewportBox {
    ViewportBox {
        min: bbox.min.min(live.0),
        max: bbox.max.max(live.1),
    }
}

/// Pixels per cell so the whole box fits the surface, limited by the
/// tighter dimension.
pub fn compute_scale(bbox: &ViewportBox, surface: Vec2) -> Result<f32, ViewError> {
    if !(surface.x > 0.0 && surface.y > 0.0) {
        return Err(ViewError::NotDrawable);
    }
    let scale_x = surface.x as f64 / bbox.width_cells();
    let scale_y = surface.y as f64 / bbox.height_cells();
    Ok(scale_x.min(scale_y) as f32)
}

/// Maps a cell to the top-left corner of its on-surface square.
pub fn cell_to_surface(cell: Cell, bbox: &ViewportBox, surface: Vec2, scale: f32) -> Pos2 {
    let (cx, cy) = bbox.center();
    let scale = scale as f64;
    let x = surface.x as f64 / 2.0 + scale * (cell.x as f64 - cx) - scale / 2.0;
    let y = surface.y as f64 / 2.0 + scale * (cell.y as f64 - cy) - scale / 2.0;
    Pos2::new(x as f32, y as f32)
}

/// Last computed scale, readable from any thread.
#[derive(Debug, Default)]
pub struct ScaleGauge(AtomicU32);

impl ScaleGauge {
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, scale: f32) {
        self.0.store(scale.to_bits(), Ordering::Relaxed);
    }
}

/// Owns the visible box. Only the render thread mutates it.
pub struct ViewportController {
    bbox: ViewportBox,
    auto_zoom: bool,
    gauge: Arc<ScaleGauge>,
}

impl ViewportController {
    pub fn new(auto_zoom: bool) -> Self {
        Self {
            bbox: ViewportBox::default(),
            auto_zoom,
            gauge: Arc::new(ScaleGauge::default()),
        }
    }

    pub fn viewport(&self) -> ViewportBox {
        self.bbox
    }

    pub fn gauge(&self) -> Arc<ScaleGauge> {
        self.gauge.clone()
    }

    pub fn scale(&self) -> f32 {
        self.gauge.get()
    }

    pub fn auto_zoom_enabled(&self) -> bool {
        self.auto_zoom
    }

    pub fn set_auto_zoom(&mut self, enabled: bool) {
        self.auto_zoom = enabled;
    }

    /// Expands the box to cover the snapshot's live cells, if auto-zoom is on.
    pub fn track(&mut self, snapshot: &PopulationSnapshot) {
        if !self.auto_zoom {
            return;
        }
        if let Some(live) = snapshot.bounds() {
            self.bbox = auto_zoom(self.bbox, live);
        }
    }

    /// Replaces the box; an inverted box falls back to the default.
    pub fn set_box(&mut self, min: Cell, max: Cell) {
        self.bbox = ViewportBox::new(min, max).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "resetting viewport to default");
            ViewportBox::default()
        });
    }

    /// Fits the box to `bounds`, or the default box when nothing is alive.
    pub fn reset_to_fit(&mut self, bounds: Option<(Cell, Cell)>) {
        match bounds {
            Some((min, max)) => self.set_box(min, max),
            None => self.bbox = ViewportBox::default(),
        }
    }

    /// Computes the scale for `surface` and records it for the status bar.
    pub fn update_scale(&self, surface: Vec2) -> Result<f32, ViewError> {
        let scale = compute_scale(&self.bbox, surface)?;
        self.gauge.set(scale);
        Ok(scale)
    }
}
