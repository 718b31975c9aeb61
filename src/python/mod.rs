//! Python bindings for the arcade engines.
//!
//! # Quick Start
//!
//! ```python
//! import arcade_lab
//!
//! game = arcade_lab.ColorFill(grid_size=5)
//! game.paint(0, 0)
//! print(game.board())        # numpy int8 array, -1 for unset
//!
//! wormy = arcade_lab.Wormy(seed=7)
//! wormy.turn("down")
//! events = wormy.advance(0.5)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// arcade_lab: headless engines for Color Fill, Wormy and Space Scavenger.
#[pymodule]
fn arcade_lab(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCoord>()?;

    m.add_class::<PyColorFill>()?;
    m.add_class::<PyWormy>()?;
    m.add_class::<PyScavenger>()?;

    Ok(())
}
