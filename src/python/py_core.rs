//! Core type bindings for Python.

use std::time::Duration;

use pyo3::prelude::*;

use crate::core::{Coord, Direction};
use crate::rules::GameStatus;

/// Python wrapper for Coord.
#[pyclass(name = "Coord")]
#[derive(Clone, Debug)]
pub struct PyCoord(pub Coord);

#[pymethods]
impl PyCoord {
    #[new]
    fn new(row: i32, col: i32) -> Self {
        Self(Coord::new(row, col))
    }

    #[getter]
    fn row(&self) -> i32 {
        self.0.row
    }

    #[getter]
    fn col(&self) -> i32 {
        self.0.col
    }

    /// Edge-adjacent coordinates (no bounds applied).
    fn adjacent(&self) -> Vec<PyCoord> {
        self.0.adjacent().map(PyCoord).collect()
    }

    fn __repr__(&self) -> String {
        format!("Coord({}, {})", self.0.row, self.0.col)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        ((self.0.row as u32 as u64) << 32) | self.0.col as u32 as u64
    }
}

/// Map any displayable error to a Python `ValueError`.
pub(crate) fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", err))
}

/// Parse a direction name ("up", "w", "left", ...).
pub(crate) fn parse_direction(name: &str) -> PyResult<Direction> {
    name.parse().map_err(value_error)
}

/// Convert seconds from Python into game time.
pub(crate) fn seconds(value: f64) -> PyResult<Duration> {
    Duration::try_from_secs_f64(value).map_err(value_error)
}

pub(crate) fn status_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::GameOver => "game_over",
    }
}
