//! Game bindings for Python.
//!
//! Boards come back as numpy arrays so agents can consume them directly.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::prelude::*;

use crate::core::{Coord, Rect};
use crate::games::color_fill::{ColorFill, ColorFillConfig, ColorFillOutcome, ColorIndex, Palette};
use crate::games::scavenger::{Controls, Scavenger, ScavengerConfig};
use crate::games::wormy::{Wormy, WormyConfig};
use crate::render::{render_color_fill, render_wormy};
use crate::rules::Game;

use super::py_core::{parse_direction, seconds, status_name, value_error};

/// Wormy board cell codes.
const EMPTY: u8 = 0;
const HEAD: u8 = 1;
const BODY: u8 = 2;
const RIVAL: u8 = 3;
const RED_APPLE: u8 = 4;
const YELLOW_APPLE: u8 = 5;
const BLUE_APPLE: u8 = 6;
const BONUS: u8 = 7;

fn rects_to_numpy<'py>(py: Python<'py>, rects: &[Rect]) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let flat: Vec<f32> = rects.iter().flat_map(|r| [r.x, r.y, r.w, r.h]).collect();
    PyArray1::from_vec_bound(py, flat)
        .reshape([rects.len(), 4])
        .map_err(value_error)
}

/// Python wrapper for the Color Fill puzzle.
#[pyclass(name = "ColorFill")]
pub struct PyColorFill {
    game: ColorFill,
}

#[pymethods]
impl PyColorFill {
    /// Create a new puzzle.
    ///
    /// # Arguments
    /// - grid_size: Board is grid_size x grid_size
    /// - colors: Palette size, taken from the standard colors (max 8)
    #[new]
    #[pyo3(signature = (grid_size = 5, colors = 4))]
    fn new(grid_size: usize, colors: usize) -> PyResult<Self> {
        let config = ColorFillConfig::new()
            .with_grid_size(grid_size)
            .with_palette(Palette::standard(colors));
        let game = ColorFill::try_new(config).map_err(value_error)?;
        Ok(Self { game })
    }

    /// Paint a cell. Uses the selected color unless `color` is given.
    ///
    /// Returns True if the cell was painted.
    #[pyo3(signature = (row, col, color = None))]
    fn paint(&mut self, row: i32, col: i32, color: Option<u8>) -> bool {
        let at = Coord::new(row, col);
        let outcome = match color {
            Some(color) => self.game.paint_with(at, ColorIndex(color)),
            None => self.game.paint(at),
        };
        matches!(outcome, ColorFillOutcome::Colored { .. })
    }

    /// Advance the selected color; returns the new index.
    fn cycle_color(&mut self) -> u8 {
        self.game.cycle_color();
        self.game.selected().0
    }

    /// Primary button at a pixel.
    fn click(&mut self, x: i32, y: i32) -> String {
        format!("{:?}", self.game.click(x, y))
    }

    fn secondary_click(&mut self, x: i32, y: i32) -> String {
        format!("{:?}", self.game.secondary_click(x, y))
    }

    /// Pointer moved; returns the hovered cell as (row, col).
    fn hover(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        self.game.hover(x, y);
        self.game.hovered().map(|c| (c.row, c.col))
    }

    fn reset(&mut self) {
        self.game.reset();
    }

    /// Palette indices that can legally be painted at (row, col).
    fn valid_colors(&self, row: i32, col: i32) -> Vec<u8> {
        self.game
            .grid()
            .valid_colors(Coord::new(row, col))
            .iter()
            .map(|c| c.0)
            .collect()
    }

    /// Uncolored cells with no legal color left.
    fn blocked_cells(&self) -> Vec<(i32, i32)> {
        self.game
            .grid()
            .blocked_cells()
            .into_iter()
            .map(|c| (c.row, c.col))
            .collect()
    }

    /// Board as an int8 array of palette indices, -1 for unset cells.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<i8>>> {
        let grid = self.game.grid();
        let flat: Vec<i8> = grid
            .cells()
            .iter()
            .map(|cell| cell.color.map_or(-1, |c| c.0 as i8))
            .collect();
        PyArray1::from_vec_bound(py, flat)
            .reshape([grid.rows(), grid.cols()])
            .map_err(value_error)
    }

    #[getter]
    fn selected(&self) -> u8 {
        self.game.selected().0
    }

    #[getter]
    fn is_won(&self) -> bool {
        self.game.is_won()
    }

    #[getter]
    fn status(&self) -> &'static str {
        status_name(self.game.status())
    }

    /// The board as text.
    fn render(&self) -> String {
        render_color_fill(&self.game.snapshot())
    }

    fn __repr__(&self) -> String {
        let grid = self.game.grid();
        format!(
            "ColorFill({}x{}, colored={}, status={})",
            grid.rows(),
            grid.cols(),
            grid.colored_count(),
            status_name(self.game.status())
        )
    }
}

/// Python wrapper for Wormy.
#[pyclass(name = "Wormy")]
pub struct PyWormy {
    game: Wormy,
}

#[pymethods]
impl PyWormy {
    #[new]
    #[pyo3(signature = (seed = 42, width = 32, height = 24))]
    fn new(seed: u64, width: u32, height: u32) -> PyResult<Self> {
        let config = WormyConfig::new().with_size(width, height);
        let game = Wormy::try_new(config, seed).map_err(value_error)?;
        Ok(Self { game })
    }

    /// Steer: "up", "down", "left", "right" (or w/s/a/d).
    ///
    /// Returns False if the turn was ignored.
    fn turn(&mut self, direction: &str) -> PyResult<bool> {
        let direction = parse_direction(direction)?;
        Ok(self.game.turn(direction).is_accepted())
    }

    /// Start over. Only allowed after game over.
    fn restart(&mut self) -> bool {
        self.game.restart().is_accepted()
    }

    /// Advance game time; returns the events that happened.
    fn advance(&mut self, seconds_elapsed: f64) -> PyResult<Vec<String>> {
        let dt = seconds(seconds_elapsed)?;
        Ok(self.game.tick(dt).iter().map(|e| format!("{:?}", e)).collect())
    }

    /// Move one step immediately.
    fn step(&mut self) -> Vec<String> {
        self.game.step().iter().map(|e| format!("{:?}", e)).collect()
    }

    /// Board as a (height, width) uint8 array.
    ///
    /// Codes: 0 empty, 1 head, 2 body, 3 rival, 4 red, 5 yellow, 6 blue, 7 bonus.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let config = self.game.config();
        let (width, height) = (config.width as usize, config.height as usize);
        let mut flat = vec![EMPTY; width * height];
        let mut put = |at: Coord, code: u8| {
            if at.within(height, width) {
                flat[at.row as usize * width + at.col as usize] = code;
            }
        };

        for bonus in self.game.bonuses() {
            put(bonus.at, BONUS);
        }
        put(self.game.red_apple(), RED_APPLE);
        put(self.game.yellow_apple(), YELLOW_APPLE);
        put(self.game.blue_apple(), BLUE_APPLE);
        if let Some(rival) = self.game.rival() {
            for &segment in rival.body() {
                put(segment, RIVAL);
            }
        }
        for &segment in self.game.player().body().iter().skip(1) {
            put(segment, BODY);
        }
        if let Some(head) = self.game.player().head() {
            put(head, HEAD);
        }

        PyArray1::from_vec_bound(py, flat)
            .reshape([height, width])
            .map_err(value_error)
    }

    /// (apples, bonus points, total)
    #[getter]
    fn score(&self) -> (u32, u32, u32) {
        let score = self.game.score();
        (score.apples, score.bonus_points, score.total)
    }

    #[getter]
    fn speed(&self) -> u32 {
        self.game.speed()
    }

    #[getter]
    fn length(&self) -> usize {
        self.game.player().len()
    }

    #[getter]
    fn status(&self) -> &'static str {
        status_name(self.game.status())
    }

    fn render(&self) -> String {
        render_wormy(&self.game.snapshot())
    }

    fn __repr__(&self) -> String {
        format!(
            "Wormy(length={}, speed={}, score={}, status={})",
            self.game.player().len(),
            self.game.speed(),
            self.game.score().total,
            status_name(self.game.status())
        )
    }
}

/// Python wrapper for Space Scavenger.
#[pyclass(name = "Scavenger")]
pub struct PyScavenger {
    game: Scavenger,
}

#[pymethods]
impl PyScavenger {
    /// Create a new round.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic games
    /// - spawning: Whether asteroids and power-ups spawn at random
    #[new]
    #[pyo3(signature = (seed = 42, spawning = true))]
    fn new(seed: u64, spawning: bool) -> PyResult<Self> {
        let config = ScavengerConfig::new().with_spawning(spawning, spawning);
        let game = Scavenger::try_new(config, seed).map_err(value_error)?;
        Ok(Self { game })
    }

    /// Set the held movement keys.
    #[pyo3(signature = (left = false, right = false, up = false, down = false))]
    fn steer(&mut self, left: bool, right: bool, up: bool, down: bool) -> bool {
        self.game.steer(Controls { left, right, up, down }).is_accepted()
    }

    fn restart(&mut self) {
        self.game.restart();
    }

    /// Advance game time; returns the events that happened.
    fn advance(&mut self, seconds_elapsed: f64) -> PyResult<Vec<String>> {
        let dt = seconds(seconds_elapsed)?;
        Ok(self.game.tick(dt).iter().map(|e| format!("{:?}", e)).collect())
    }

    /// Run exactly one frame.
    fn frame(&mut self) -> Vec<String> {
        self.game.frame().iter().map(|e| format!("{:?}", e)).collect()
    }

    /// Ship rectangle as (x, y, w, h).
    #[getter]
    fn ship(&self) -> (f32, f32, f32, f32) {
        let r = self.game.ship().rect;
        (r.x, r.y, r.w, r.h)
    }

    /// Asteroid rectangles as an (N, 4) float32 array of x, y, w, h.
    fn asteroids<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let size = self.game.config().asteroid_size;
        let rects: Vec<Rect> = self.game.asteroids().iter().map(|a| a.rect(size)).collect();
        rects_to_numpy(py, &rects)
    }

    /// Crystal rectangles as an (N, 4) float32 array.
    fn crystals<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let rects: Vec<Rect> = self.game.crystals().iter().map(|c| c.rect).collect();
        rects_to_numpy(py, &rects)
    }

    #[getter]
    fn lives(&self) -> u32 {
        self.game.ship().lives
    }

    #[getter]
    fn shielded(&self) -> bool {
        self.game.ship().has_shield()
    }

    #[getter]
    fn boosted(&self) -> bool {
        self.game.ship().is_boosted()
    }

    #[getter]
    fn score(&self) -> u32 {
        self.game.score()
    }

    #[getter]
    fn level(&self) -> u32 {
        self.game.level()
    }

    #[getter]
    fn status(&self) -> &'static str {
        status_name(self.game.status())
    }

    fn __repr__(&self) -> String {
        format!(
            "Scavenger(score={}, level={}, lives={}, status={})",
            self.game.score(),
            self.game.level(),
            self.game.ship().lives,
            status_name(self.game.status())
        )
    }
}
