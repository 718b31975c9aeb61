//! Color Fill: a grid tile-coloring puzzle.
//!
//! - The board is 5x5 by default, with a four-color palette
//! - Painting a cell is only allowed if no edge-adjacent cell holds that color
//! - The puzzle is won when every cell is colored
//!
//! `grid` is the adjacency engine; `game` drives it from player input.

mod game;
mod grid;
mod layout;

pub use game::{ColorFill, ColorFillConfig, ColorFillInput, ColorFillOutcome, ColorFillSnapshot};
pub use grid::{Assignment, Cell, ColorIndex, ColorSet, Grid, Neighbors, Palette, Rejection, Rgb, Swatch};
pub use layout::Layout;
