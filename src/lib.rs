//! # arcade-lab
//!
//! Headless, deterministic engines for three small 2D games.
//!
//! ## Design Principles
//!
//! 1. **No Drawing**: Engines expose read-only snapshots. Hosts render them
//!    through `RenderSink` and feed input through `InputSource`.
//!
//! 2. **Explicit Time**: Real-time games advance only through `advance(dt)`.
//!    Nothing reads a wall clock, so every round replays from its seed.
//!
//! 3. **Owned State**: Each game is one struct owned by its driver. There are
//!    no globals.
//!
//! ## Games
//!
//! - **Color Fill**: paint every cell of a grid so that edge-adjacent cells
//!   never share a color.
//! - **Wormy**: snake on a wraparound board with timed apples, a speed ramp,
//!   a random-walking rival and bonus items.
//! - **Space Scavenger**: collect crystals in an arena while dodging growing
//!   asteroids, with speed and shield power-ups.
//!
//! ## Modules
//!
//! - `core`: geometry, RNG, timers, errors
//! - `rules`: the `Game` trait and host contracts
//! - `games`: the three game implementations
//! - `render`: plain-text render sinks

pub mod core;
pub mod games;
pub mod render;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Coord, Direction, Rect, Vec2,
    GameRng,
    Countdown, FixedStep, Interval,
    Error, Result,
};

pub use crate::rules::{drive, run_frame, Game, GameStatus, InputSource, Recorder, RenderSink, Response};

pub use crate::games::color_fill::{
    ColorFill, ColorFillConfig, ColorFillInput, ColorFillOutcome, ColorFillSnapshot,
    Assignment, Cell, ColorIndex, Grid, Palette, Rejection,
};

pub use crate::games::wormy::{Wormy, WormyConfig, WormyEvent, WormyInput, WormySnapshot};

pub use crate::games::scavenger::{
    Controls, Scavenger, ScavengerConfig, ScavengerEvent, ScavengerInput, ScavengerSnapshot,
};

pub use crate::render::TextRenderer;
