// grid.rs - Cell and population types for an unbounded Life plane

use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;

pub type Coord = i64;

/// A cell position on the unbounded plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum of two cells.
    pub fn min(self, other: Cell) -> Cell {
        Cell::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum of two cells.
    pub fn max(self, other: Cell) -> Cell {
        Cell::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((x, y): (Coord, Coord)) -> Self {
        Cell::new(x, y)
    }
}

/// The set of live cells of one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    cells: HashSet<Cell>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (Coord, Coord)>,
    {
        cells.into_iter().map(Cell::from).collect()
    }

    /// Returns `true` if the cell was not already alive.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Smallest box (min corner, max corner) containing every live cell.
    /// `None` for an empty population.
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        let mut cells = self.cells.iter();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(lo, hi), &cell| (lo.min(cell), hi.max(cell))))
    }
}

impl FromIterator<Cell> for Population {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Cell;
    type IntoIter = hash_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_population_has_no_bounding_box() {
        assert_eq!(Population::new().bounding_box(), None);
    }

    #[test]
    fn bounding_box_spans_all_cells() {
        let pop = Population::from_cells([(3, -1), (-2, 4), (0, 0)]);
        assert_eq!(pop.bounding_box(), Some((Cell::new(-2, -1), Cell::new(3, 4))));
    }
}
