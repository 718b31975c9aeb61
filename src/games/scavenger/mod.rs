//! Space Scavenger: arena survival.
//!
//! Steer a ship around an 800x600 arena collecting crystals while asteroids
//! drift in from the edges, growing as they go. Speed and shield power-ups
//! appear at random and wear off after a few seconds.

mod config;
mod entities;
mod game;

pub use config::ScavengerConfig;
pub use entities::{Asteroid, Controls, Crystal, PowerUp, PowerUpKind, Ship};
pub use game::{FrameEvents, Scavenger, ScavengerEvent, ScavengerInput, ScavengerSnapshot};
