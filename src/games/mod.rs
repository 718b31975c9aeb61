//! Game implementations.
//!
//! Each game owns its state exclusively and implements `rules::Game`.

pub mod color_fill;
pub mod scavenger;
pub mod wormy;
