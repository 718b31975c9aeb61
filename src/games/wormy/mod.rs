//! Wormy: a snake variant on a wraparound board.
//!
//! The player steers a worm toward red apples while yellow apples shrink it,
//! blue apples slow it down and a randomly walking rival shows up mid-round.

mod config;
mod game;
mod worm;

pub use config::WormyConfig;
pub use game::{
    Bonus, BonusKind, DeathCause, FinalScore, StepEvents, Wormy, WormyEvent, WormyInput, WormySnapshot,
};
pub use worm::Worm;
