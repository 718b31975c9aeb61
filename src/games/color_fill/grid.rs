//! Adjacency-constrained grid: cells, palette and the validity engine.
//!
//! ## Invariant
//!
//! Two cells sharing an edge never hold the same color once both are set.
//! `try_assign` enforces this at write time; nothing repairs it afterwards.
//! `assign` is the raw write for callers that already validated.
//!
//! Coordinates off the grid name no cell. Every query treats them as an
//! empty result rather than an error.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, Direction, Error};

/// Index into a `Palette`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    /// Create a new color index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the index as a `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({})", self.0)
    }
}

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One named palette entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub rgb: Rgb,
}

impl Swatch {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self { name: name.into(), rgb }
    }
}

const STANDARD_COLORS: [(&str, Rgb); 8] = [
    ("Red", Rgb(255, 0, 0)),
    ("Green", Rgb(0, 255, 0)),
    ("Blue", Rgb(0, 0, 255)),
    ("Yellow", Rgb(255, 255, 0)),
    ("Purple", Rgb(128, 0, 128)),
    ("Cyan", Rgb(0, 255, 255)),
    ("Orange", Rgb(255, 165, 0)),
    ("White", Rgb(255, 255, 255)),
];

/// Fixed, ordered set of selectable colors.
///
/// The default palette is Red, Green, Blue, Yellow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard(4)
    }
}

impl Palette {
    /// Create a palette from explicit swatches.
    ///
    /// At most 256 swatches are addressable by `ColorIndex`; extra entries are dropped.
    pub fn new(mut swatches: Vec<Swatch>) -> Self {
        swatches.truncate(usize::from(u8::MAX) + 1);
        Self { swatches }
    }

    /// The first `count` standard colors (at most 8).
    pub fn standard(count: usize) -> Self {
        Self::new(
            STANDARD_COLORS
                .iter()
                .take(count)
                .map(|(name, rgb)| Swatch::new(*name, *rgb))
                .collect(),
        )
    }

    /// Number of colors (K).
    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Check if `color` names an entry of this palette.
    #[must_use]
    pub fn contains(&self, color: ColorIndex) -> bool {
        color.index() < self.swatches.len()
    }

    #[must_use]
    pub fn get(&self, color: ColorIndex) -> Option<&Swatch> {
        self.swatches.get(color.index())
    }

    /// All indices, in palette order.
    pub fn indices(&self) -> impl Iterator<Item = ColorIndex> {
        (0..self.swatches.len()).map(|i| ColorIndex(i as u8))
    }

    /// The index after `color`, wrapping to 0.
    #[must_use]
    pub fn next(&self, color: ColorIndex) -> ColorIndex {
        if self.swatches.is_empty() {
            return ColorIndex(0);
        }
        ColorIndex(((color.index() + 1) % self.swatches.len()) as u8)
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }
}

/// One grid position with an optional color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub color: Option<ColorIndex>,
}

impl Cell {
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.color.is_some()
    }
}

/// Why a color could not be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// No cell exists at the coordinate.
    OutOfBounds(Coord),
    /// The color is not in the palette.
    UnknownColor(ColorIndex),
    /// An edge-adjacent cell already holds the color.
    Conflict { neighbor: Coord, color: ColorIndex },
    /// The puzzle is already solved; only a reset is accepted.
    Finished,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::OutOfBounds(at) => write!(f, "no cell at {}", at),
            Rejection::UnknownColor(color) => write!(f, "{} is not in the palette", color),
            Rejection::Conflict { neighbor, color } => write!(f, "neighbor {} already holds {}", neighbor, color),
            Rejection::Finished => write!(f, "puzzle already solved"),
        }
    }
}

/// Result of a validated write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    /// The color was written; `previous` is what the cell held before.
    Accepted { previous: Option<ColorIndex> },
    /// Nothing changed.
    Rejected(Rejection),
}

impl Assignment {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Assignment::Accepted { .. })
    }
}

/// Up to four neighbors, stack-allocated.
pub type Neighbors = SmallVec<[Coord; 4]>;

/// Valid colors for a cell, stack-allocated for the usual palette sizes.
pub type ColorSet = SmallVec<[ColorIndex; 8]>;

/// Fixed-size grid of cells plus the palette they draw from.
///
/// Decoding checks the same shape `Grid::new` builds: `rows x cols`
/// row-major cells, each at its own slot, and a non-empty palette.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major.
    cells: Vec<Cell>,
    palette: Palette,
}

/// Unchecked wire form of a `Grid`.
#[derive(Deserialize)]
struct GridRepr {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    palette: Palette,
}

impl TryFrom<GridRepr> for Grid {
    type Error = Error;

    fn try_from(repr: GridRepr) -> Result<Self, Error> {
        let GridRepr {
            rows,
            cols,
            cells,
            palette,
        } = repr;

        if rows == 0 || cols == 0 {
            return Err(Error::inconsistent("grid", "must have at least one cell"));
        }
        if palette.is_empty() {
            return Err(Error::inconsistent("grid", "palette is empty"));
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::inconsistent("grid", format!("{}x{} is too large", rows, cols)))?;
        if cells.len() != expected {
            return Err(Error::inconsistent(
                "grid",
                format!("{}x{} needs {} cells, found {}", rows, cols, expected, cells.len()),
            ));
        }
        for (i, cell) in cells.iter().enumerate() {
            let slot = Coord::new((i / cols) as i32, (i % cols) as i32);
            if cell.coord != slot {
                return Err(Error::inconsistent(
                    "grid",
                    format!("cell {} is at {}, expected {}", i, cell.coord, slot),
                ));
            }
        }

        Ok(Self {
            rows,
            cols,
            cells,
            palette,
        })
    }
}

impl Grid {
    /// Create an empty `rows x cols` grid.
    ///
    /// # Panics
    ///
    /// Panics on a zero dimension or an empty palette.
    #[must_use]
    pub fn new(rows: usize, cols: usize, palette: Palette) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one cell");
        assert!(!palette.is_empty(), "Palette must have at least one color");

        let cells = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| Cell {
                    coord: Coord::new(row as i32, col as i32),
                    color: None,
                })
            })
            .collect();

        Self {
            rows,
            cols,
            cells,
            palette,
        }
    }

    /// Create an empty `size x size` grid.
    #[must_use]
    pub fn square(size: usize, palette: Palette) -> Self {
        Self::new(size, size, palette)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index_of(&self, at: Coord) -> Option<usize> {
        at.within(self.rows, self.cols)
            .then(|| at.row as usize * self.cols + at.col as usize)
    }

    /// The cell at `at`, if it is on the grid.
    #[must_use]
    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.index_of(at).map(|i| &self.cells[i])
    }

    /// Color held at `at`; `None` for an unset or missing cell.
    #[must_use]
    pub fn color_at(&self, at: Coord) -> Option<ColorIndex> {
        self.cell(at).and_then(|c| c.color)
    }

    // === Adjacency ===

    /// Edge-adjacent coordinates that lie on the grid.
    ///
    /// Empty when `at` itself is off the grid.
    #[must_use]
    pub fn neighbors(&self, at: Coord) -> Neighbors {
        if self.index_of(at).is_none() {
            return Neighbors::new();
        }
        at.adjacent().filter(|n| n.within(self.rows, self.cols)).collect()
    }

    /// First neighbor of `at` already holding `color`.
    #[must_use]
    pub fn conflicting_neighbor(&self, at: Coord, color: ColorIndex) -> Option<Coord> {
        self.neighbors(at)
            .into_iter()
            .find(|&n| self.color_at(n) == Some(color))
    }

    /// True iff `at` is on the grid, `color` is in the palette and no
    /// neighbor currently holds `color`. Unset neighbors never conflict.
    #[must_use]
    pub fn is_valid_color(&self, at: Coord, color: ColorIndex) -> bool {
        self.index_of(at).is_some()
            && self.palette.contains(color)
            && self.conflicting_neighbor(at, color).is_none()
    }

    /// Every palette color `at` could take, in palette order.
    ///
    /// Empty for a colored cell, a fully blocked cell or an off-grid coordinate.
    #[must_use]
    pub fn valid_colors(&self, at: Coord) -> ColorSet {
        match self.cell(at) {
            Some(cell) if !cell.is_colored() => self
                .palette
                .indices()
                .filter(|&color| self.conflicting_neighbor(at, color).is_none())
                .collect(),
            _ => ColorSet::new(),
        }
    }

    // === Mutation ===

    /// Write `color` without validation.
    ///
    /// Callers check `is_valid_color` first. Returns false if `at` is off the grid.
    pub fn assign(&mut self, at: Coord, color: ColorIndex) -> bool {
        match self.index_of(at) {
            Some(i) => {
                self.cells[i].color = Some(color);
                true
            }
            None => false,
        }
    }

    /// Validate, then write.
    pub fn try_assign(&mut self, at: Coord, color: ColorIndex) -> Assignment {
        let Some(i) = self.index_of(at) else {
            return Assignment::Rejected(Rejection::OutOfBounds(at));
        };
        if !self.palette.contains(color) {
            return Assignment::Rejected(Rejection::UnknownColor(color));
        }
        if let Some(neighbor) = self.conflicting_neighbor(at, color) {
            return Assignment::Rejected(Rejection::Conflict { neighbor, color });
        }

        let previous = self.cells[i].color.replace(color);
        Assignment::Accepted { previous }
    }

    /// Unset every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.color = None;
        }
    }

    // === Queries ===

    /// True iff every cell has a color.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_colored)
    }

    /// Number of colored cells.
    #[must_use]
    pub fn colored_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_colored()).count()
    }

    /// Adjacent pairs holding the same color, each pair listed once.
    ///
    /// Only raw `assign` writes can produce any.
    #[must_use]
    pub fn conflicts(&self) -> Vec<(Coord, Coord)> {
        let mut pairs = Vec::new();
        for cell in &self.cells {
            let Some(color) = cell.color else { continue };
            for next in [cell.coord.step(Direction::Right), cell.coord.step(Direction::Down)] {
                if self.color_at(next) == Some(color) {
                    pairs.push((cell.coord, next));
                }
            }
        }
        pairs
    }

    /// Uncolored cells with no valid color left.
    #[must_use]
    pub fn blocked_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| !c.is_colored() && self.valid_colors(c.coord).is_empty())
            .map(|c| c.coord)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    const C0: ColorIndex = ColorIndex(0);
    const C1: ColorIndex = ColorIndex(1);
    const C2: ColorIndex = ColorIndex(2);
    const C3: ColorIndex = ColorIndex(3);

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::square(5, Palette::default());

        assert_eq!(grid.cells().len(), 25);
        assert_eq!(grid.colored_count(), 0);
        assert!(!grid.is_complete());
        assert_eq!(grid.palette().len(), 4);
    }

    #[test]
    fn test_cells_have_unique_coords() {
        let grid = Grid::new(3, 4, Palette::default());
        let mut coords: Vec<_> = grid.cells().iter().map(|c| c.coord).collect();
        coords.sort();
        coords.dedup();
        assert_eq!(coords.len(), 12);
        assert_eq!(grid.cell(c(2, 3)).map(|cell| cell.coord), Some(c(2, 3)));
    }

    #[test]
    #[should_panic(expected = "Grid must have at least one cell")]
    fn test_zero_size_grid() {
        let _ = Grid::square(0, Palette::default());
    }

    #[test]
    #[should_panic(expected = "Palette must have at least one color")]
    fn test_empty_palette() {
        let _ = Grid::square(2, Palette::standard(0));
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        let grid = Grid::square(5, Palette::default());

        assert_eq!(grid.neighbors(c(0, 0)).len(), 2);
        assert_eq!(grid.neighbors(c(0, 2)).len(), 3);
        assert_eq!(grid.neighbors(c(2, 2)).len(), 4);

        let around = grid.neighbors(c(2, 2));
        assert!(around.contains(&c(1, 2)));
        assert!(around.contains(&c(3, 2)));
        assert!(around.contains(&c(2, 1)));
        assert!(around.contains(&c(2, 3)));
        assert!(!around.contains(&c(1, 1)));
    }

    #[test]
    fn test_neighbors_out_of_bounds() {
        let grid = Grid::square(5, Palette::default());
        assert!(grid.neighbors(c(-1, 0)).is_empty());
        assert!(grid.neighbors(c(5, 5)).is_empty());
    }

    #[test]
    fn test_two_by_two_adjacency() {
        let mut grid = Grid::square(2, Palette::standard(2));
        grid.assign(c(0, 0), C0);

        assert!(!grid.is_valid_color(c(0, 1), C0));
        assert!(grid.is_valid_color(c(1, 1), C0));
        assert!(grid.is_valid_color(c(0, 1), C1));
    }

    #[test]
    fn test_is_valid_color_rejects_unknowns() {
        let grid = Grid::square(2, Palette::standard(2));
        assert!(!grid.is_valid_color(c(0, 0), C2));
        assert!(!grid.is_valid_color(c(9, 9), C0));
    }

    #[test]
    fn test_checkerboard_completes_on_last_write() {
        let mut grid = Grid::square(2, Palette::standard(2));
        let moves = [(c(0, 0), C0), (c(0, 1), C1), (c(1, 0), C1), (c(1, 1), C0)];

        for (i, (at, color)) in moves.iter().enumerate() {
            assert!(!grid.is_complete(), "complete before write {}", i);
            assert!(grid.try_assign(*at, *color).is_accepted());
        }

        assert!(grid.is_complete());
        assert!(grid.conflicts().is_empty());
    }

    #[test]
    fn test_fully_blocked_cell() {
        let mut grid = Grid::square(3, Palette::standard(4));
        grid.assign(c(0, 1), C0);
        grid.assign(c(1, 0), C1);
        grid.assign(c(1, 2), C2);
        grid.assign(c(2, 1), C3);

        assert!(grid.valid_colors(c(1, 1)).is_empty());
        assert_eq!(grid.blocked_cells(), vec![c(1, 1)]);
    }

    #[test]
    fn test_valid_colors_order_and_colored_cell() {
        let mut grid = Grid::square(3, Palette::standard(4));
        grid.assign(c(0, 1), C1);

        assert_eq!(grid.valid_colors(c(0, 0)).as_slice(), &[C0, C2, C3]);
        // Colored cells report nothing
        assert!(grid.valid_colors(c(0, 1)).is_empty());
        assert!(grid.valid_colors(c(-1, 0)).is_empty());
    }

    #[test]
    fn test_valid_colors_idempotent() {
        let mut grid = Grid::square(4, Palette::default());
        grid.assign(c(1, 1), C2);
        grid.assign(c(2, 2), C3);

        for cell in grid.cells() {
            assert_eq!(grid.valid_colors(cell.coord), grid.valid_colors(cell.coord));
        }
    }

    #[test]
    fn test_try_assign_rejections() {
        let mut grid = Grid::square(2, Palette::standard(2));
        grid.assign(c(0, 0), C0);

        assert_eq!(
            grid.try_assign(c(0, 1), C0),
            Assignment::Rejected(Rejection::Conflict { neighbor: c(0, 0), color: C0 })
        );
        assert_eq!(grid.try_assign(c(3, 0), C0), Assignment::Rejected(Rejection::OutOfBounds(c(3, 0))));
        assert_eq!(grid.try_assign(c(1, 1), C3), Assignment::Rejected(Rejection::UnknownColor(C3)));
        // Rejected writes change nothing
        assert_eq!(grid.colored_count(), 1);
    }

    #[test]
    fn test_try_assign_recolor_reports_previous() {
        let mut grid = Grid::square(2, Palette::standard(3));
        assert_eq!(grid.try_assign(c(0, 0), C0), Assignment::Accepted { previous: None });
        assert_eq!(grid.try_assign(c(0, 0), C2), Assignment::Accepted { previous: Some(C0) });
        assert_eq!(grid.color_at(c(0, 0)), Some(C2));
    }

    #[test]
    fn test_assign_off_grid() {
        let mut grid = Grid::square(2, Palette::standard(2));
        assert!(!grid.assign(c(2, 0), C0));
        assert!(grid.assign(c(1, 0), C0));
    }

    #[test]
    fn test_raw_assign_can_conflict() {
        let mut grid = Grid::square(2, Palette::standard(2));
        grid.assign(c(0, 0), C1);
        grid.assign(c(1, 0), C1);
        assert_eq!(grid.conflicts(), vec![(c(0, 0), c(1, 0))]);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::square(2, Palette::standard(2));
        grid.assign(c(0, 0), C0);
        grid.assign(c(1, 1), C0);
        grid.clear();
        assert_eq!(grid.colored_count(), 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut grid = Grid::new(2, 3, Palette::standard(3));
        grid.assign(c(1, 2), C2);

        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_deserialize_rejects_broken_shape() {
        let good = serde_json::to_value(Grid::square(3, Palette::standard(2))).unwrap();

        let mut no_cells = good.clone();
        no_cells["cells"] = serde_json::json!([]);
        let err = serde_json::from_value::<Grid>(no_cells).unwrap_err();
        assert!(err.to_string().contains("needs 9 cells, found 0"), "{}", err);

        let mut swapped = good.clone();
        let cells = swapped["cells"].as_array_mut().unwrap();
        cells.swap(0, 1);
        assert!(serde_json::from_value::<Grid>(swapped).is_err());

        let mut no_palette = good.clone();
        no_palette["palette"]["swatches"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Grid>(no_palette).is_err());

        let mut zero_rows = good;
        zero_rows["rows"] = serde_json::json!(0);
        zero_rows["cells"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Grid>(zero_rows).is_err());
    }

    #[test]
    fn test_palette_next_wraps() {
        let palette = Palette::default();
        assert_eq!(palette.next(C0), C1);
        assert_eq!(palette.next(C3), C0);
        assert_eq!(palette.get(C2).map(|s| s.name.as_str()), Some("Blue"));
        assert!(palette.get(ColorIndex(4)).is_none());
    }

    #[test]
    fn test_palette_standard_caps_at_eight() {
        assert_eq!(Palette::standard(20).len(), 8);
    }

    #[test]
    fn test_rejection_display() {
        let r = Rejection::Conflict { neighbor: c(0, 0), color: C1 };
        assert_eq!(r.to_string(), "neighbor (0, 0) already holds Color(1)");
    }
}
