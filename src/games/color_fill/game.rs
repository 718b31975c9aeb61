//! Color Fill driver: turns player input into grid writes and tracks the win.
//!
//! State machine: `Playing -> Won`, one-way. A reset rebuilds a fresh
//! `Playing` round with every cell cleared and the selector back at 0.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::grid::{Assignment, ColorIndex, ColorSet, Grid, Palette, Rejection};
use super::layout::Layout;
use crate::core::{error, Coord, Error, Result};
use crate::rules::{Game, GameStatus};

/// Configuration for a Color Fill round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorFillConfig {
    /// Board is `grid_size x grid_size`.
    pub grid_size: usize,
    pub palette: Palette,
    pub layout: Layout,
}

impl Default for ColorFillConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            palette: Palette::default(),
            layout: Layout::default(),
        }
    }
}

impl ColorFillConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        error::ensure_positive("grid_size", self.grid_size)?;
        error::ensure_positive("layout.cell_size", self.layout.cell_size)?;
        if self.palette.is_empty() {
            return Err(Error::invalid("palette", "must contain at least one color"));
        }
        Ok(())
    }
}

/// Input events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorFillInput {
    /// Paint a cell with the selected color.
    Paint(Coord),
    /// Paint a cell with an explicit palette index.
    PaintWith(Coord, ColorIndex),
    /// Primary button at a pixel: paints while playing, Play Again once won.
    Click { x: i32, y: i32 },
    /// Secondary button at a pixel: cycles the color while playing, Play
    /// Again once won.
    SecondaryClick { x: i32, y: i32 },
    /// Pointer moved to a pixel.
    Hover { x: i32, y: i32 },
    /// Advance the selected color.
    CycleColor,
    Reset,
}

/// What an input did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorFillOutcome {
    /// A cell was painted. `won` is set when this write completed the board.
    Colored {
        at: Coord,
        color: ColorIndex,
        previous: Option<ColorIndex>,
        won: bool,
    },
    /// The paint attempt changed nothing.
    Rejected(Rejection),
    /// The selector moved.
    Selected(ColorIndex),
    /// The hovered cell changed (or was confirmed).
    Hovered(Option<Coord>),
    Reset,
    /// The input does not apply in the current state.
    Ignored,
}

impl ColorFillOutcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, ColorFillOutcome::Rejected(_))
    }
}

/// Read-only view for render sinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorFillSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cell colors.
    pub cells: Vec<Option<ColorIndex>>,
    pub palette: Palette,
    pub selected: ColorIndex,
    pub won: bool,
    pub hovered: Option<Coord>,
    /// Valid colors of the hovered cell, empty if it is colored.
    pub hover_preview: ColorSet,
}

impl ColorFillSnapshot {
    /// Color at a coordinate; `None` for unset or off-grid.
    #[must_use]
    pub fn color_at(&self, at: Coord) -> Option<ColorIndex> {
        if !at.within(self.rows, self.cols) {
            return None;
        }
        self.cells
            .get(at.row as usize * self.cols + at.col as usize)
            .copied()
            .flatten()
    }

    /// Check that the cell list matches the dimensions.
    pub fn validate(&self) -> Result<()> {
        let expected = self.rows.checked_mul(self.cols);
        if expected != Some(self.cells.len()) {
            return Err(Error::inconsistent(
                "snapshot",
                format!("{}x{} board with {} cells", self.rows, self.cols, self.cells.len()),
            ));
        }
        Ok(())
    }

    /// Encode as compact bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    ///
    /// Fails if the decoded cell list does not match the dimensions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// The Color Fill puzzle.
#[derive(Clone, Debug)]
pub struct ColorFill {
    config: ColorFillConfig,
    grid: Grid,
    selected: ColorIndex,
    status: GameStatus,
    hovered: Option<Coord>,
}

impl Default for ColorFill {
    fn default() -> Self {
        Self::new(ColorFillConfig::default())
    }
}

impl ColorFill {
    /// Create a new round.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails validation; use `try_new` to handle that.
    #[must_use]
    pub fn new(config: ColorFillConfig) -> Self {
        match Self::try_new(config) {
            Ok(game) => game,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a new round, validating `config` first.
    pub fn try_new(config: ColorFillConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::square(config.grid_size, config.palette.clone());
        Ok(Self {
            config,
            grid,
            selected: ColorIndex(0),
            status: GameStatus::Playing,
            hovered: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ColorFillConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Currently selected palette index.
    #[must_use]
    pub fn selected(&self) -> ColorIndex {
        self.selected
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    #[must_use]
    pub fn hovered(&self) -> Option<Coord> {
        self.hovered
    }

    /// Valid colors for the hovered cell.
    #[must_use]
    pub fn hover_preview(&self) -> ColorSet {
        self.hovered
            .map(|at| self.grid.valid_colors(at))
            .unwrap_or_default()
    }

    // === Actions ===

    /// Paint `at` with the selected color.
    pub fn paint(&mut self, at: Coord) -> ColorFillOutcome {
        self.paint_with(at, self.selected)
    }

    /// Paint `at` with `color`.
    pub fn paint_with(&mut self, at: Coord, color: ColorIndex) -> ColorFillOutcome {
        if self.is_won() {
            return ColorFillOutcome::Rejected(Rejection::Finished);
        }

        match self.grid.try_assign(at, color) {
            Assignment::Accepted { previous } => {
                let won = self.grid.is_complete();
                debug!("painted {} with {} ({}/{} cells)", at, color, self.grid.colored_count(), self.grid.cells().len());
                if won {
                    self.status = GameStatus::Won;
                    info!("board complete, puzzle solved");
                }
                ColorFillOutcome::Colored {
                    at,
                    color,
                    previous,
                    won,
                }
            }
            Assignment::Rejected(reason) => {
                debug!("rejected {} at {}: {}", color, at, reason);
                ColorFillOutcome::Rejected(reason)
            }
        }
    }

    /// Advance the selector modulo the palette size.
    pub fn cycle_color(&mut self) -> ColorFillOutcome {
        if self.is_won() {
            return ColorFillOutcome::Ignored;
        }
        self.selected = self.grid.palette().next(self.selected);
        debug!("selected {}", self.selected);
        ColorFillOutcome::Selected(self.selected)
    }

    /// Primary button at a pixel.
    pub fn click(&mut self, x: i32, y: i32) -> ColorFillOutcome {
        if self.is_won() {
            return self.play_again(x, y);
        }

        let layout = self.config.layout;
        match layout.cell_at(x, y, self.grid.rows(), self.grid.cols()) {
            Some(at) => self.paint(at),
            None => ColorFillOutcome::Ignored,
        }
    }

    /// Secondary button at a pixel.
    pub fn secondary_click(&mut self, x: i32, y: i32) -> ColorFillOutcome {
        if self.is_won() {
            return self.play_again(x, y);
        }
        self.cycle_color()
    }

    /// Any button on the win screen resets only over Play Again.
    fn play_again(&mut self, x: i32, y: i32) -> ColorFillOutcome {
        if self.config.layout.hits_play_again(x, y) {
            self.restart();
            ColorFillOutcome::Reset
        } else {
            ColorFillOutcome::Ignored
        }
    }

    /// Pointer moved to a pixel.
    pub fn hover(&mut self, x: i32, y: i32) -> ColorFillOutcome {
        if self.is_won() {
            return ColorFillOutcome::Ignored;
        }
        self.hovered = self.config.layout.cell_at(x, y, self.grid.rows(), self.grid.cols());
        ColorFillOutcome::Hovered(self.hovered)
    }

    fn restart(&mut self) {
        self.grid.clear();
        self.selected = ColorIndex(0);
        self.status = GameStatus::Playing;
        self.hovered = None;
        info!("color fill reset");
    }
}

impl Game for ColorFill {
    type Input = ColorFillInput;
    type Outcome = ColorFillOutcome;
    type Snapshot = ColorFillSnapshot;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn handle(&mut self, input: ColorFillInput) -> ColorFillOutcome {
        match input {
            ColorFillInput::Paint(at) => self.paint(at),
            ColorFillInput::PaintWith(at, color) => self.paint_with(at, color),
            ColorFillInput::Click { x, y } => self.click(x, y),
            ColorFillInput::SecondaryClick { x, y } => self.secondary_click(x, y),
            ColorFillInput::Hover { x, y } => self.hover(x, y),
            ColorFillInput::CycleColor => self.cycle_color(),
            ColorFillInput::Reset => {
                self.restart();
                ColorFillOutcome::Reset
            }
        }
    }

    fn snapshot(&self) -> ColorFillSnapshot {
        ColorFillSnapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells: self.grid.cells().iter().map(|c| c.color).collect(),
            palette: self.grid.palette().clone(),
            selected: self.selected,
            won: self.is_won(),
            hovered: self.hovered,
            hover_preview: self.hover_preview(),
        }
    }

    fn reset(&mut self) {
        self.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn two_by_two() -> ColorFill {
        ColorFill::new(ColorFillConfig::new().with_grid_size(2).with_palette(Palette::standard(2)))
    }

    /// Checkerboard solution for a 2x2, 2-color board.
    fn solve(game: &mut ColorFill) {
        game.paint_with(c(0, 0), ColorIndex(0));
        game.paint_with(c(0, 1), ColorIndex(1));
        game.paint_with(c(1, 0), ColorIndex(1));
        game.paint_with(c(1, 1), ColorIndex(0));
    }

    #[test]
    fn test_default_round() {
        let game = ColorFill::default();
        assert_eq!(game.grid().rows(), 5);
        assert_eq!(game.grid().palette().len(), 4);
        assert_eq!(game.selected(), ColorIndex(0));
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_config_validation() {
        assert!(ColorFillConfig::default().validate().is_ok());

        let err = ColorFillConfig::new().with_grid_size(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "grid_size", .. }));

        let err = ColorFillConfig::new().with_palette(Palette::standard(0)).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "palette", .. }));

        assert!(ColorFill::try_new(ColorFillConfig::new().with_grid_size(0)).is_err());
    }

    #[test]
    #[should_panic(expected = "grid_size")]
    fn test_new_panics_on_invalid_config() {
        let _ = ColorFill::new(ColorFillConfig::new().with_grid_size(0));
    }

    #[test]
    fn test_paint_uses_selected_color() {
        let mut game = ColorFill::default();
        game.cycle_color();

        let outcome = game.paint(c(0, 0));
        assert_eq!(
            outcome,
            ColorFillOutcome::Colored {
                at: c(0, 0),
                color: ColorIndex(1),
                previous: None,
                won: false
            }
        );
        assert_eq!(game.grid().color_at(c(0, 0)), Some(ColorIndex(1)));
    }

    #[test]
    fn test_invalid_paint_is_rejected_and_changes_nothing() {
        let mut game = two_by_two();
        game.paint(c(0, 0));
        let before = game.snapshot();

        let outcome = game.paint(c(0, 1));
        assert!(outcome.is_rejected());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_win_after_last_cell() {
        let mut game = two_by_two();
        game.paint_with(c(0, 0), ColorIndex(0));
        game.paint_with(c(0, 1), ColorIndex(1));
        game.paint_with(c(1, 0), ColorIndex(1));
        assert_eq!(game.status(), GameStatus::Playing);

        let outcome = game.paint_with(c(1, 1), ColorIndex(0));
        assert!(matches!(outcome, ColorFillOutcome::Colored { won: true, .. }));
        assert!(game.is_won());
        assert!(game.is_terminal());
    }

    #[test]
    fn test_won_ignores_everything_but_reset() {
        let mut game = two_by_two();
        solve(&mut game);

        assert_eq!(game.handle(ColorFillInput::Paint(c(0, 0))), ColorFillOutcome::Rejected(Rejection::Finished));
        assert_eq!(game.handle(ColorFillInput::CycleColor), ColorFillOutcome::Ignored);
        assert_eq!(game.handle(ColorFillInput::Hover { x: 60, y: 60 }), ColorFillOutcome::Ignored);
        assert_eq!(game.handle(ColorFillInput::Click { x: 60, y: 60 }), ColorFillOutcome::Ignored);
        assert!(game.is_won());
    }

    #[test]
    fn test_reset_restores_fresh_round() {
        let mut game = two_by_two();
        game.cycle_color();
        solve(&mut game);
        assert!(game.is_won());

        assert_eq!(game.handle(ColorFillInput::Reset), ColorFillOutcome::Reset);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.selected(), ColorIndex(0));
        assert!(game.grid().cells().iter().all(|cell| cell.color.is_none()));
    }

    #[test]
    fn test_click_play_again_resets() {
        let mut game = two_by_two();
        solve(&mut game);

        assert_eq!(game.click(300, 320), ColorFillOutcome::Reset);
        assert_eq!(game.grid().colored_count(), 0);
    }

    #[test]
    fn test_secondary_click_cycles_or_plays_again() {
        let mut game = two_by_two();
        assert_eq!(
            game.handle(ColorFillInput::SecondaryClick { x: 5, y: 5 }),
            ColorFillOutcome::Selected(ColorIndex(1))
        );

        solve(&mut game);
        assert_eq!(
            game.handle(ColorFillInput::SecondaryClick { x: 5, y: 5 }),
            ColorFillOutcome::Ignored
        );
        assert!(game.is_won());
        assert_eq!(
            game.handle(ColorFillInput::SecondaryClick { x: 300, y: 320 }),
            ColorFillOutcome::Reset
        );
        assert!(!game.is_won());
        assert_eq!(game.selected(), ColorIndex(0));
    }

    #[test]
    fn test_extreme_pointer_pixels_are_benign() {
        let mut game = ColorFill::default();

        assert_eq!(game.handle(ColorFillInput::Click { x: i32::MIN, y: 10 }), ColorFillOutcome::Ignored);
        assert_eq!(
            game.handle(ColorFillInput::Hover { x: 10, y: i32::MIN + 10 }),
            ColorFillOutcome::Hovered(None)
        );
        assert_eq!(
            game.handle(ColorFillInput::Click { x: i32::MAX, y: i32::MAX }),
            ColorFillOutcome::Ignored
        );
    }

    #[test]
    fn test_click_paints_cell_under_pointer() {
        let mut game = ColorFill::default();

        assert!(matches!(game.click(135, 55), ColorFillOutcome::Colored { at, .. } if at == c(0, 1)));
        assert_eq!(game.click(5, 5), ColorFillOutcome::Ignored);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut game = ColorFill::default();
        for expected in [1, 2, 3, 0] {
            assert_eq!(game.cycle_color(), ColorFillOutcome::Selected(ColorIndex(expected)));
        }
    }

    #[test]
    fn test_recolor_allowed_when_valid() {
        let mut game = ColorFill::default();
        game.paint_with(c(0, 0), ColorIndex(0));

        let outcome = game.paint_with(c(0, 0), ColorIndex(2));
        assert!(matches!(outcome, ColorFillOutcome::Colored { previous: Some(ColorIndex(0)), .. }));
    }

    #[test]
    fn test_hover_preview() {
        let mut game = ColorFill::default();
        game.paint_with(c(0, 1), ColorIndex(0));

        assert_eq!(game.hover(60, 60), ColorFillOutcome::Hovered(Some(c(0, 0))));
        let preview = game.hover_preview();
        assert_eq!(preview.as_slice(), &[ColorIndex(1), ColorIndex(2), ColorIndex(3)]);

        // Colored cell: no preview
        game.hover(140, 60);
        assert!(game.hover_preview().is_empty());

        assert_eq!(game.hover(0, 0), ColorFillOutcome::Hovered(None));
    }

    #[test]
    fn test_snapshot_contents() {
        let mut game = two_by_two();
        game.paint(c(1, 0));
        let snap = game.snapshot();

        assert_eq!(snap.rows, 2);
        assert_eq!(snap.cells, vec![None, None, Some(ColorIndex(0)), None]);
        assert_eq!(snap.color_at(c(1, 0)), Some(ColorIndex(0)));
        assert_eq!(snap.color_at(c(7, 0)), None);
        assert!(!snap.won);
    }

    #[test]
    fn test_snapshot_bytes() {
        let mut game = ColorFill::default();
        game.paint(c(2, 2));
        let snap = game.snapshot();

        let bytes = snap.to_bytes().unwrap();
        assert_eq!(ColorFillSnapshot::from_bytes(&bytes).unwrap(), snap);
        assert!(ColorFillSnapshot::from_bytes(&[1, 2]).is_err());
    }

    #[test]
    fn test_short_snapshot_is_rejected_and_never_panics() {
        let mut snap = ColorFill::default().snapshot();
        snap.cells.truncate(3);

        assert_eq!(snap.color_at(c(4, 4)), None);
        assert!(snap.validate().is_err());

        let bytes = snap.to_bytes().unwrap();
        let err = ColorFillSnapshot::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::Inconsistent { what: "snapshot", .. }), "{}", err);
    }
}
