//! The Wormy driver.
//!
//! Game time arrives through `advance(dt)`. Timers relocate apples, ramp the
//! speed and schedule the rival and the bonus items; a `FixedStep` clock turns
//! the remaining time into worm moves at the current speed.

use std::time::Duration;

use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::WormyConfig;
use super::worm::Worm;
use crate::core::{Coord, Countdown, Direction, FixedStep, GameRng, Interval, Result};
use crate::rules::{Game, GameStatus, Response};

/// Attempts at finding an unoccupied cell before settling for any cell.
const SPAWN_ATTEMPTS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Appears on a fixed schedule for the whole round.
    Recurring,
    /// Appears once per round.
    OneShot,
}

/// A bonus item on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub at: Coord,
    pub kind: BonusKind,
    lifetime: Countdown,
}

impl Bonus {
    /// Time left before the bonus disappears.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.lifetime.remaining().unwrap_or(Duration::ZERO)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    BitSelf,
    /// A yellow apple took the last segment.
    Starved,
}

/// Something that happened during a step or a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WormyEvent {
    AteApple,
    Shrank,
    SlowedDown { speed: u32 },
    SpedUp { speed: u32 },
    AteBonus { kind: BonusKind, points: u32 },
    BonusAppeared { at: Coord, kind: BonusKind },
    RivalArrived,
    /// The player's head touched the rival.
    PlayerGrew,
    /// The rival's head touched the player.
    RivalGrew,
    Died(DeathCause),
}

pub type StepEvents = SmallVec<[WormyEvent; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WormyInput {
    Turn(Direction),
    Restart,
}

/// Score breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub apples: u32,
    pub bonus_points: u32,
    pub total: u32,
}

/// Read-only view of a Wormy round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WormySnapshot {
    pub width: u32,
    pub height: u32,
    /// Player segments, head first.
    pub player: im::Vector<Coord>,
    pub rival: Option<im::Vector<Coord>>,
    pub red: Coord,
    pub yellow: Coord,
    pub blue: Coord,
    pub bonuses: Vec<Bonus>,
    pub speed: u32,
    pub score: FinalScore,
    pub status: GameStatus,
    pub elapsed: Duration,
}

impl WormySnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A round of Wormy.
#[derive(Clone, Debug)]
pub struct Wormy {
    config: WormyConfig,
    rng: GameRng,
    spawn_rng: GameRng,
    rival_rng: GameRng,

    player: Worm,
    /// Direction the next move will take.
    heading: Direction,
    rival: Option<Worm>,

    red: Coord,
    yellow: Coord,
    blue: Coord,
    bonuses: Vec<Bonus>,

    speed: u32,
    apples: u32,
    bonus_points: u32,
    status: GameStatus,

    clock: FixedStep,
    yellow_timer: Interval,
    blue_timer: Interval,
    speed_timer: Interval,
    rival_timer: Countdown,
    bonus_timer: Interval,
    one_shot_timer: Countdown,

    elapsed: Duration,
    steps: u64,
}

impl Wormy {
    /// Start a round.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails validation; use `try_new` to handle that.
    #[must_use]
    pub fn new(config: WormyConfig, seed: u64) -> Self {
        match Self::try_new(config, seed) {
            Ok(game) => game,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new(config: WormyConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, GameRng::new(seed)))
    }

    fn start(config: WormyConfig, rng: GameRng) -> Self {
        let mut spawn_rng = rng.for_context("spawn");
        let rival_rng = rng.for_context("rival");

        let head = spawn_rng.gen_cell(config.height, config.width, config.spawn_margin);
        let player = Worm::new(head, config.start_length as usize, Direction::Right);

        let mut game = Self {
            rng,
            spawn_rng,
            rival_rng,
            player,
            heading: Direction::Right,
            rival: None,
            red: head,
            yellow: head,
            blue: head,
            bonuses: Vec::new(),
            speed: config.start_speed,
            apples: 0,
            bonus_points: 0,
            status: GameStatus::Playing,
            clock: FixedStep::per_second(config.start_speed),
            yellow_timer: Interval::new(config.yellow_apple_ttl),
            blue_timer: Interval::new(config.blue_apple_ttl),
            speed_timer: Interval::new(config.speed_up_every),
            rival_timer: Countdown::running(config.rival_delay),
            bonus_timer: Interval::new(config.bonus_every),
            one_shot_timer: Countdown::running(config.one_shot_bonus_at),
            elapsed: Duration::ZERO,
            steps: 0,
            config,
        };
        game.red = game.free_cell();
        game.yellow = game.free_cell();
        game.blue = game.free_cell();
        debug!("Wormy round started at {} with seed {}", head, game.rng.seed());
        game
    }

    // === Accessors ===

    pub fn config(&self) -> &WormyConfig {
        &self.config
    }

    pub fn player(&self) -> &Worm {
        &self.player
    }

    pub fn rival(&self) -> Option<&Worm> {
        self.rival.as_ref()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    #[must_use]
    pub fn red_apple(&self) -> Coord {
        self.red
    }

    #[must_use]
    pub fn yellow_apple(&self) -> Coord {
        self.yellow
    }

    #[must_use]
    pub fn blue_apple(&self) -> Coord {
        self.blue
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    #[must_use]
    pub fn score(&self) -> FinalScore {
        FinalScore {
            apples: self.apples,
            bonus_points: self.bonus_points,
            total: self.apples + self.bonus_points,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Moves taken this round.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // === Input ===

    /// Change heading, unless it would reverse the last move.
    pub fn turn(&mut self, direction: Direction) -> Response {
        if self.status.is_terminal() || direction == self.player.direction().opposite() {
            return Response::Ignored;
        }
        self.heading = direction;
        Response::Accepted
    }

    /// Start a fresh round. Only accepted after game over.
    pub fn restart(&mut self) -> Response {
        if self.status != GameStatus::GameOver {
            return Response::Ignored;
        }
        let next = self.rng.fork();
        *self = Self::start(self.config.clone(), next);
        Response::Accepted
    }

    // === Time ===

    /// Advance game time by `dt` and report everything that happened.
    pub fn tick(&mut self, dt: Duration) -> Vec<WormyEvent> {
        let mut events = Vec::new();
        if self.status.is_terminal() {
            return events;
        }
        self.elapsed += dt;

        if self.yellow_timer.tick(dt) {
            self.yellow = self.free_cell();
        }
        if self.blue_timer.tick(dt) {
            self.blue = self.free_cell();
        }
        if self.speed_timer.tick(dt) {
            self.set_speed(self.speed + self.config.speed_increment);
            events.push(WormyEvent::SpedUp { speed: self.speed });
        }
        if self.rival_timer.tick(dt) {
            self.spawn_rival();
            events.push(WormyEvent::RivalArrived);
        }

        self.bonuses.retain_mut(|bonus| !bonus.lifetime.tick(dt));
        if self.bonus_timer.tick(dt) {
            events.push(self.spawn_bonus(BonusKind::Recurring, self.config.bonus_lifetime));
        }
        if self.one_shot_timer.tick(dt) {
            events.push(self.spawn_bonus(BonusKind::OneShot, self.config.one_shot_bonus_lifetime));
        }

        for _ in 0..self.clock.tick(dt) {
            events.extend(self.step());
            if self.status.is_terminal() {
                break;
            }
        }
        events
    }

    /// Move both worms one cell and resolve what the player's head lands on.
    pub fn step(&mut self) -> StepEvents {
        let mut events = StepEvents::new();
        if self.status.is_terminal() {
            return events;
        }
        let Some(head) = self.player.head() else {
            return events;
        };

        let next = self.wrap(head.step(self.heading));
        let ate_red = next == self.red;
        self.player.advance(next, self.heading, ate_red);
        self.steps += 1;

        if ate_red {
            self.apples += 1;
            self.red = self.free_cell();
            events.push(WormyEvent::AteApple);
        }

        if self.player.bites_itself() {
            self.die(DeathCause::BitSelf, &mut events);
            return events;
        }

        if next == self.yellow {
            self.player.shrink();
            self.yellow = self.free_cell();
            self.yellow_timer.reset();
            events.push(WormyEvent::Shrank);
            if self.player.is_empty() {
                self.die(DeathCause::Starved, &mut events);
                return events;
            }
        }

        if next == self.blue {
            if self.speed > 2 * self.config.speed_increment {
                self.set_speed(self.speed - self.config.speed_increment);
            }
            self.blue = self.free_cell();
            self.blue_timer.reset();
            events.push(WormyEvent::SlowedDown { speed: self.speed });
        }

        if let Some(i) = self.bonuses.iter().position(|b| b.at == next) {
            let bonus = self.bonuses.remove(i);
            self.bonus_points += self.config.bonus_points;
            events.push(WormyEvent::AteBonus {
                kind: bonus.kind,
                points: self.config.bonus_points,
            });
        }

        self.move_rival(next, &mut events);
        events
    }

    // === Internals ===

    fn wrap(&self, at: Coord) -> Coord {
        at.wrapped(self.config.height as i32, self.config.width as i32)
    }

    fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
        self.clock.set_rate(speed);
    }

    fn die(&mut self, cause: DeathCause, events: &mut StepEvents) {
        self.status = GameStatus::GameOver;
        events.push(WormyEvent::Died(cause));
        let score = self.score();
        info!(
            "Wormy over ({:?}) after {} steps: {} apples + {} bonus = {}",
            cause, self.steps, score.apples, score.bonus_points, score.total
        );
    }

    fn spawn_rival(&mut self) {
        let head = self.spawn_rng.gen_cell(self.config.height, self.config.width, self.config.spawn_margin);
        self.rival = Some(Worm::new(head, self.config.rival_length as usize, Direction::Right));
        debug!("Rival arrived at {}", head);
    }

    fn spawn_bonus(&mut self, kind: BonusKind, lifetime: Duration) -> WormyEvent {
        let at = self.free_cell();
        self.bonuses.push(Bonus {
            at,
            kind,
            lifetime: Countdown::running(lifetime),
        });
        WormyEvent::BonusAppeared { at, kind }
    }

    /// Random walk; contact in either direction grows the worm that was touched with.
    fn move_rival(&mut self, player_head: Coord, events: &mut StepEvents) {
        let Some(rival) = self.rival.as_mut() else {
            return;
        };
        let Some(head) = rival.head() else {
            return;
        };
        let direction = self
            .rival_rng
            .choose(&Direction::ALL)
            .copied()
            .unwrap_or(rival.direction());
        let next = head
            .step(direction)
            .wrapped(self.config.height as i32, self.config.width as i32);
        rival.advance(next, direction, false);

        if rival.occupies(player_head) {
            self.player.grow();
            events.push(WormyEvent::PlayerGrew);
        }
        if self.player.occupies(next) {
            rival.grow();
            events.push(WormyEvent::RivalGrew);
        }
    }

    fn occupied(&self) -> FxHashSet<Coord> {
        let mut taken: FxHashSet<Coord> = self.player.body().iter().copied().collect();
        if let Some(rival) = &self.rival {
            taken.extend(rival.body().iter().copied());
        }
        taken
    }

    fn free_cell(&mut self) -> Coord {
        let taken = self.occupied();
        pick_free_cell(&mut self.spawn_rng, self.config.width, self.config.height, &taken)
    }
}

/// A random cell outside `taken`, or any random cell if none turns up.
fn pick_free_cell(rng: &mut GameRng, width: u32, height: u32, taken: &FxHashSet<Coord>) -> Coord {
    for _ in 0..SPAWN_ATTEMPTS {
        let at = rng.gen_cell(height, width, 0);
        if !taken.contains(&at) {
            return at;
        }
    }
    rng.gen_cell(height, width, 0)
}

impl Game for Wormy {
    type Input = WormyInput;
    type Outcome = Response;
    type Snapshot = WormySnapshot;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn handle(&mut self, input: WormyInput) -> Response {
        match input {
            WormyInput::Turn(direction) => self.turn(direction),
            WormyInput::Restart => self.restart(),
        }
    }

    fn advance(&mut self, dt: Duration) {
        let events = self.tick(dt);
        if !events.is_empty() {
            debug!("Wormy tick: {:?}", events);
        }
    }

    fn snapshot(&self) -> WormySnapshot {
        WormySnapshot {
            width: self.config.width,
            height: self.config.height,
            player: self.player.body().clone(),
            rival: self.rival.as_ref().map(|r| r.body().clone()),
            red: self.red,
            yellow: self.yellow,
            blue: self.blue,
            bonuses: self.bonuses.clone(),
            speed: self.speed,
            score: self.score(),
            status: self.status,
            elapsed: self.elapsed,
        }
    }

    fn reset(&mut self) {
        let next = self.rng.fork();
        *self = Self::start(self.config.clone(), next);
    }
}
