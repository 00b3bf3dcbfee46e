//! Live Game of Life viewer: a clock publishing immutable generation
//! snapshots, a background step driver, auto-zooming viewport, and a
//! density-aware rasterizer feeding an egui surface.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod raster;
pub mod snapshot;
pub mod status;
pub mod surface;
pub mod ui;
pub mod viewport;

pub use clock::SimulationClock;
pub use config::{RasterConfig, SimConfig};
pub use driver::{RunState, StepDriver, StepObserver};
pub use error::{AdvanceError, DriverError, ViewError};
pub use raster::{DrawPrimitive, Rasterizer};
pub use snapshot::PopulationSnapshot;
pub use status::{StatusPoller, StatusReport, StatusSink};
pub use surface::{PainterSurface, Surface, paint_frame, render_snapshot};
pub use ui::LifeApp;
pub use viewport::{ScaleGauge, ViewportBox, ViewportController, auto_zoom, compute_scale};
