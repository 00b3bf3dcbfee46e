// patterns.rs - Built-in starting patterns

use crate::error::LoadError;
use crate::grid::{Coord, Population};
use crate::parse::parse_rle;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(Coord, Coord)], // (x, y), y grows downward
}

impl Pattern {
    pub fn population(&self) -> Population {
        Population::from_cells(self.cells.iter().copied())
    }
}

pub const DEFAULT_PATTERN_NAME: &str = "Gosper glider gun";

// Kept as RLE text so the default goes through the same reader as files do.
const GOSPER_GLIDER_GUN_RLE: &str = "\
#N Gosper glider gun
x = 36, y = 9, rule = B3/S23
24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4b
obo$10bo5bo7bo$11bo3bo$12b2o!
";

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Diagonal",
        cells: &[(0, 0), (1, 1), (2, 2)],
    },
];

/// Looks a pattern up by name. Case, spaces, dashes and underscores are ignored,
/// so `gosper-glider-gun` finds the default.
pub fn builtin(name: &str) -> Option<Result<Population, LoadError>> {
    let wanted = normalise(name);
    if wanted == normalise(DEFAULT_PATTERN_NAME) {
        return Some(default_population());
    }
    PATTERNS
        .iter()
        .find(|p| normalise(p.name) == wanted)
        .map(|p| Ok(p.population()))
}

/// Names of every built-in pattern, default first.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    std::iter::once(DEFAULT_PATTERN_NAME).chain(PATTERNS.iter().map(|p| p.name))
}

pub fn default_population() -> Result<Population, LoadError> {
    parse_rle(GOSPER_GLIDER_GUN_RLE)
}

fn normalise(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gun_parses() {
        let gun = default_population().unwrap();
        assert_eq!(gun.len(), 36);
        let (lo, hi) = gun.bounding_box().unwrap();
        assert_eq!((hi.x - lo.x + 1, hi.y - lo.y + 1), (36, 9));
    }

    #[test]
    fn lookup_ignores_case_and_separators() {
        assert_eq!(builtin("r_pentomino").unwrap().unwrap().len(), 5);
        assert_eq!(builtin("Gosper-Glider-Gun").unwrap().unwrap().len(), 36);
        assert!(builtin("spaceship").is_none());
    }

    #[test]
    fn pulsar_is_symmetric() {
        let pulsar = PATTERNS.iter().find(|p| p.name == "Pulsar").unwrap().population();
        assert_eq!(pulsar.len(), 48);
        for cell in &pulsar {
            assert!(pulsar.contains(&crate::Cell::new(12 - cell.x, cell.y)));
            assert!(pulsar.contains(&crate::Cell::new(cell.x, 12 - cell.y)));
        }
    }

    #[test]
    fn names_start_with_default() {
        assert_eq!(builtin_names().next(), Some(DEFAULT_PATTERN_NAME));
        assert_eq!(builtin_names().count(), PATTERNS.len() + 1);
    }
}
