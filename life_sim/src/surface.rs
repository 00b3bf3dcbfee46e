// surface.rs - Drawing surfaces and the per-frame render pass

use egui::{Color32, Painter, Rect, Shape, Vec2};

use crate::raster::{DrawPrimitive, Rasterizer};
use crate::snapshot::PopulationSnapshot;
use crate::viewport::ViewportController;

/// Something primitives can be painted onto. The size is re-read every frame.
pub trait Surface {
    fn size(&self) -> Vec2;
    fn begin_frame(&mut self, background: Color32);
    fn draw(&mut self, primitive: &DrawPrimitive);
    fn end_frame(&mut self);
}

/// Paints one complete frame.
pub fn paint_frame<S: Surface + ?Sized>(surface: &mut S, primitives: &[DrawPrimitive], background: Color32) {
    surface.begin_frame(background);
    for primitive in primitives {
        surface.draw(primitive);
    }
    surface.end_frame();
}

/// Auto-zooms to `snapshot`, rasterizes it and paints it.
///
/// Returns `false` and leaves the surface untouched when it has no area.
pub fn render_snapshot<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &mut ViewportController,
    raster: &Rasterizer,
    snapshot: &PopulationSnapshot,
) -> bool {
    viewport.track(snapshot);
    let size = surface.size();
    if viewport.update_scale(size).is_err() {
        return false;
    }
    let primitives = raster.render(snapshot, &viewport.viewport(), size);
    paint_frame(surface, &primitives, raster.config().background);
    true
}

/// Paints into a rectangle of an egui painter. Shapes become filled circles,
/// density blocks filled squares.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    shapes: Vec<Shape>,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect, shapes: Vec::new() }
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn begin_frame(&mut self, background: Color32) {
        self.shapes.clear();
        self.shapes.push(Shape::rect_filled(self.rect, 0.0, background));
    }

    fn draw(&mut self, primitive: &DrawPrimitive) {
        let origin = self.rect.min.to_vec2();
        let shape = match *primitive {
            DrawPrimitive::Shape { pos, size, color } => {
                let radius = size / 2.0;
                Shape::circle_filled(pos + origin + Vec2::splat(radius), radius, color)
            }
            DrawPrimitive::DensityBlock { pos, size, color, .. } => {
                Shape::rect_filled(Rect::from_min_size(pos + origin, Vec2::splat(size)), 0.0, color)
            }
        };
        self.shapes.push(shape);
    }

    fn end_frame(&mut self) {
        self.painter.extend(self.shapes.drain(..));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::RasterConfig;
    use golife::Population;

    /// Records what was drawn instead of painting it.
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub size: Vec2,
        pub background: Option<Color32>,
        pub drawn: Vec<DrawPrimitive>,
        pub frames: usize,
        pub open: bool,
    }

    impl RecordingSurface {
        pub fn sized(w: f32, h: f32) -> Self {
            Self { size: Vec2::new(w, h), ..Self::default() }
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            self.size
        }

        fn begin_frame(&mut self, background: Color32) {
            assert!(!self.open, "nested frame");
            self.open = true;
            self.background = Some(background);
            self.drawn.clear();
        }

        fn draw(&mut self, primitive: &DrawPrimitive) {
            assert!(self.open, "draw outside a frame");
            self.drawn.push(*primitive);
        }

        fn end_frame(&mut self) {
            assert!(self.open, "end without begin");
            self.open = false;
            self.frames += 1;
        }
    }

    #[test]
    fn frame_is_bracketed() {
        let mut surface = RecordingSurface::sized(10.0, 10.0);
        let prim = DrawPrimitive::Shape { pos: egui::Pos2::ZERO, size: 2.0, color: Color32::WHITE };
        paint_frame(&mut surface, &[prim, prim], Color32::BLACK);
        assert_eq!(surface.frames, 1);
        assert_eq!(surface.drawn.len(), 2);
        assert_eq!(surface.background, Some(Color32::BLACK));
    }

    #[test]
    fn zero_sized_surface_is_skipped() {
        let mut surface = RecordingSurface::sized(0.0, 0.0);
        let mut viewport = ViewportController::new(true);
        let raster = Rasterizer::new(RasterConfig::default());
        let snap = PopulationSnapshot::new(Population::from_cells([(0, 0)]), 0);
        assert!(!render_snapshot(&mut surface, &mut viewport, &raster, &snap));
        assert_eq!(surface.frames, 0);
    }

    #[test]
    fn render_tracks_then_draws() {
        let mut surface = RecordingSurface::sized(200.0, 200.0);
        let mut viewport = ViewportController::new(true);
        let raster = Rasterizer::new(RasterConfig::default());
        let snap = PopulationSnapshot::new(Population::from_cells([(0, 0), (19, 19)]), 0);

        assert!(render_snapshot(&mut surface, &mut viewport, &raster, &snap));
        assert_eq!(viewport.viewport().max(), golife::Cell::new(19, 19));
        assert_eq!(viewport.scale(), 10.0);
        assert_eq!(surface.drawn.len(), 2);
    }
}
