//! Core building blocks shared by every game: geometry, RNG, timers, errors.
//!
//! Nothing in here knows about a particular game.

pub mod error;
pub mod geometry;
pub mod rng;
pub mod timer;

pub use error::{Error, Result};
pub use geometry::{Coord, Direction, Rect, Vec2};
pub use rng::GameRng;
pub use timer::{Countdown, FixedStep, Interval};
