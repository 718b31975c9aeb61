//! The `Game` trait and the host-facing input/render contracts.
//!
//! Games implement `Game` to define:
//! - How a discrete input event changes state
//! - How state evolves with elapsed time (real-time games only)
//! - What a renderer may observe (`snapshot`)
//!
//! Hosts implement `InputSource` and `RenderSink` and hand them to `drive` or
//! `run_frame`. Every event is processed to completion before the next one
//! is pulled.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifecycle of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Accepting gameplay input.
    #[default]
    Playing,
    /// The puzzle was solved.
    Won,
    /// The player lost the round.
    GameOver,
}

impl GameStatus {
    /// Check if the round has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Whether an input event had any effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Accepted,
    /// The event does not apply in the current state.
    Ignored,
}

impl Response {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Response::Accepted)
    }
}

/// Game trait.
///
/// ## Implementation Notes
///
/// - `handle`: Must be deterministic given the game's seed
/// - `advance`: Turn-based games keep the default no-op
/// - `snapshot`: Read-only view; hosts never get `&mut` access through it
/// - `reset`: Returns to a freshly constructed round
pub trait Game {
    /// Discrete input event.
    type Input;

    /// What `handle` reports back to the caller.
    type Outcome;

    /// Read-only view handed to render sinks.
    type Snapshot;

    /// Current lifecycle state.
    fn status(&self) -> GameStatus;

    /// Apply one input event.
    fn handle(&mut self, input: Self::Input) -> Self::Outcome;

    /// Advance game time by `dt`.
    fn advance(&mut self, _dt: Duration) {}

    /// Capture what a renderer needs.
    fn snapshot(&self) -> Self::Snapshot;

    /// Start a fresh round.
    fn reset(&mut self);

    // === Convenience Methods ===

    /// Check if the round has ended.
    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}

/// Delivers discrete, already-debounced input events one at a time.
pub trait InputSource<I> {
    /// Next pending event, or `None` when nothing is queued.
    fn next_input(&mut self) -> Option<I>;
}

impl<I> InputSource<I> for VecDeque<I> {
    fn next_input(&mut self) -> Option<I> {
        self.pop_front()
    }
}

/// Consumes read-only snapshots.
pub trait RenderSink<S> {
    fn present(&mut self, snapshot: &S);
}

/// A sink that keeps every snapshot it is shown.
#[derive(Clone, Debug)]
pub struct Recorder<S> {
    frames: Vec<S>,
}

impl<S> Default for Recorder<S> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<S> Recorder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots in presentation order.
    #[must_use]
    pub fn frames(&self) -> &[S] {
        &self.frames
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&S> {
        self.frames.last()
    }
}

impl<S: Clone> RenderSink<S> for Recorder<S> {
    fn present(&mut self, snapshot: &S) {
        self.frames.push(snapshot.clone());
    }
}

/// Pull every pending event from `source`, presenting a snapshot after each.
///
/// Returns the outcomes in event order.
pub fn drive<G, I, R>(game: &mut G, source: &mut I, sink: &mut R) -> Vec<G::Outcome>
where
    G: Game,
    I: InputSource<G::Input>,
    R: RenderSink<G::Snapshot>,
{
    let mut outcomes = Vec::new();
    while let Some(input) = source.next_input() {
        outcomes.push(game.handle(input));
        sink.present(&game.snapshot());
    }
    outcomes
}

/// Run one real-time frame: apply `inputs`, advance by `dt`, present once.
pub fn run_frame<G, R>(
    game: &mut G,
    inputs: impl IntoIterator<Item = G::Input>,
    dt: Duration,
    sink: &mut R,
) -> Vec<G::Outcome>
where
    G: Game,
    R: RenderSink<G::Snapshot>,
{
    let outcomes = inputs.into_iter().map(|input| game.handle(input)).collect();
    game.advance(dt);
    sink.present(&game.snapshot());
    outcomes
}
