//! The seam between games and their hosts.
//!
//! Games implement `Game`; hosts provide an `InputSource` and a `RenderSink`.
//! No game ever reaches for a window, a clock or a global.

pub mod engine;

pub use engine::{drive, run_frame, Game, GameStatus, InputSource, Recorder, RenderSink, Response};
