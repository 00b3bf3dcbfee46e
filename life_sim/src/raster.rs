// raster.rs - Snapshot to draw primitives, per-cell or density-aggregated

use std::collections::BTreeMap;

use egui::{Color32, Pos2, Vec2};

use crate::config::RasterConfig;
use crate::snapshot::PopulationSnapshot;
use crate::viewport::{ViewportBox, cell_to_surface, compute_scale};

/// One thing to draw, in surface coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawPrimitive {
    /// A single live cell, `size` x `size` pixels with its top-left at `pos`.
    Shape { pos: Pos2, size: f32, color: Color32 },
    /// A raster pixel covering one or more sub-pixel cells; alpha is scaled
    /// by `density` relative to the fullest pixel.
    DensityBlock { pos: Pos2, size: f32, color: Color32, density: f32 },
}

pub struct Rasterizer {
    config: RasterConfig,
    cell_color: Color32,
}

impl Rasterizer {
    pub fn new(config: RasterConfig) -> Self {
        let cell_color = config.idle_color;
        Self { config, cell_color }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    pub fn cell_color(&self) -> Color32 {
        self.cell_color
    }

    pub fn set_cell_color(&mut self, color: Color32) {
        self.cell_color = color;
    }

    /// Rasterizes `snapshot` as seen through `bbox` on a surface of `surface` pixels.
    ///
    /// Empty when the surface has no area. At or above the shape threshold every
    /// visible cell becomes a `Shape`; below it cells are bucketed per pixel.
    pub fn render(&self, snapshot: &PopulationSnapshot, bbox: &ViewportBox, surface: Vec2) -> Vec<DrawPrimitive> {
        let Ok(scale) = compute_scale(bbox, surface) else {
            return Vec::new();
        };

        let visible = snapshot
            .population()
            .iter()
            .map(|&cell| cell_to_surface(cell, bbox, surface, scale))
            .filter(|pos| on_surface(*pos, surface));

        if scale >= self.config.shape_threshold {
            visible
                .map(|pos| DrawPrimitive::Shape { pos, size: scale, color: self.cell_color })
                .collect()
        } else {
            self.density_blocks(visible)
        }
    }

    fn density_blocks(&self, visible: impl Iterator<Item = Pos2>) -> Vec<DrawPrimitive> {
        // Keyed (row, column) so blocks come out in row-major order.
        let mut buckets: BTreeMap<(i64, i64), u32> = BTreeMap::new();
        for pos in visible {
            *buckets.entry((nearest_pixel(pos.y), nearest_pixel(pos.x))).or_insert(0) += 1;
        }

        let Some(&max_count) = buckets.values().max() else {
            return Vec::new();
        };

        let [r, g, b, a] = self.cell_color.to_srgba_unmultiplied();
        buckets
            .into_iter()
            .map(|((row, col), count)| {
                let density = (count as f32 / max_count as f32).max(self.config.density_floor);
                let alpha = (a as f32 * density).ceil().min(255.0) as u8;
                DrawPrimitive::DensityBlock {
                    pos: Pos2::new(col as f32, row as f32),
                    size: self.config.bucket_size,
                    color: Color32::from_rgba_unmultiplied(r, g, b, alpha),
                    density,
                }
            })
            .collect()
    }
}

// Half-pixel slack on the leading edge absorbs rounding of cells flush with it.
fn on_surface(pos: Pos2, surface: Vec2) -> bool {
    pos.x >= -0.5 && pos.y >= -0.5 && pos.x < surface.x && pos.y < surface.y
}

fn nearest_pixel(v: f32) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use golife::{Cell, Population};

    fn snap(cells: impl IntoIterator<Item = (i64, i64)>) -> PopulationSnapshot {
        PopulationSnapshot::new(Population::from_cells(cells), 0)
    }

    fn vbox(min: (i64, i64), max: (i64, i64)) -> ViewportBox {
        ViewportBox::new(Cell::from(min), Cell::from(max)).unwrap()
    }

    #[test]
    fn zero_area_surface_renders_nothing() {
        let raster = Rasterizer::new(RasterConfig::default());
        let s = snap([(0, 0), (1, 1)]);
        assert!(raster.render(&s, &ViewportBox::default(), Vec2::ZERO).is_empty());
        assert!(raster.render(&s, &ViewportBox::default(), Vec2::new(0.0, 40.0)).is_empty());
    }

    #[test]
    fn threshold_is_inclusive_on_shape_side() {
        let raster = Rasterizer::new(RasterConfig::default());
        // 11 cells across 22 pixels is exactly 2.0 pixels per cell.
        let prims = raster.render(&snap([(0, 0), (5, 5)]), &ViewportBox::default(), Vec2::new(22.0, 22.0));
        assert_eq!(prims.len(), 2);
        for prim in prims {
            assert!(matches!(prim, DrawPrimitive::Shape { size, .. } if size == 2.0));
        }
    }

    #[test]
    fn shapes_are_placed_and_clipped() {
        let raster = Rasterizer::new(RasterConfig::default());
        let s = snap([(0, 0), (10, 10), (-1, 0), (11, 0)]);
        let prims = raster.render(&s, &ViewportBox::default(), Vec2::new(110.0, 110.0));

        let mut positions: Vec<(f32, f32)> = prims
            .iter()
            .map(|p| match p {
                DrawPrimitive::Shape { pos, size, color } => {
                    assert_eq!(*size, 10.0);
                    assert_eq!(*color, raster.cell_color());
                    (pos.x, pos.y)
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(positions, vec![(0.0, 0.0), (100.0, 100.0)]);
    }

    #[test]
    fn dense_cells_aggregate_into_buckets() {
        let raster = Rasterizer::new(RasterConfig::default());
        // 400 cells across 100 pixels: four cells per pixel edge.
        let bbox = vbox((0, 0), (399, 399));
        let mut cells: Vec<(i64, i64)> = (2..6).flat_map(|x| (2..6).map(move |y| (x, y))).collect();
        cells.push((200, 200));

        let prims = raster.render(&snap(cells), &bbox, Vec2::new(100.0, 100.0));
        assert_eq!(prims.len(), 2);

        match prims[0] {
            DrawPrimitive::DensityBlock { pos, size, color, density } => {
                assert_eq!(pos, Pos2::new(1.0, 1.0));
                assert_eq!(size, 2.0);
                assert_eq!(density, 1.0);
                assert_eq!(color.a(), 255);
            }
            other => panic!("unexpected {other:?}"),
        }
        match prims[1] {
            DrawPrimitive::DensityBlock { pos, density, color, .. } => {
                assert_eq!(pos, Pos2::new(50.0, 50.0));
                // 1/16 is lifted to the floor.
                assert_eq!(density, 0.25);
                assert_eq!(color.a(), 64);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn density_never_drops_below_floor() {
        let mut raster = Rasterizer::new(RasterConfig::default());
        raster.set_cell_color(Color32::from_rgba_unmultiplied(0, 0, 180, 200));
        let bbox = vbox((0, 0), (999, 999));
        let cells: Vec<(i64, i64)> = (0..300).map(|i| (i % 37, (i * 7) % 500)).collect();

        let prims = raster.render(&snap(cells), &bbox, Vec2::new(100.0, 100.0));
        assert!(!prims.is_empty());
        for prim in prims {
            let DrawPrimitive::DensityBlock { color, density, .. } = prim else {
                panic!("expected density blocks below the threshold");
            };
            assert!(density >= 0.25);
            assert!(color.a() as f32 >= 0.25 * 200.0);
        }
    }

    #[test]
    fn configurable_bucket_and_floor() {
        let config = RasterConfig { bucket_size: 3.0, density_floor: 0.5, ..RasterConfig::default() };
        let raster = Rasterizer::new(config);
        let bbox = vbox((0, 0), (399, 399));
        let cells: Vec<(i64, i64)> = (2..6).flat_map(|x| (2..6).map(move |y| (x, y))).chain([(200, 200)]).collect();
        let prims = raster.render(&snap(cells), &bbox, Vec2::new(100.0, 100.0));
        assert!(matches!(prims[1], DrawPrimitive::DensityBlock { size, density, .. } if size == 3.0 && density == 0.5));
    }
}
