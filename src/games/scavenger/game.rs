//! The Space Scavenger driver.
//!
//! The simulation runs in whole frames at `frame_rate`. `advance(dt)` feeds a
//! `FixedStep` clock and runs as many frames as are due; `frame()` runs one.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::ScavengerConfig;
use super::entities::{place_item, Asteroid, Controls, Crystal, PowerUp, PowerUpKind, Ship};
use crate::core::{FixedStep, GameRng, Rect, Result, Vec2};
use crate::rules::{Game, GameStatus, Response};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScavengerInput {
    /// Replace the set of held movement keys.
    Steer(Controls),
    Restart,
}

/// Something that happened during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScavengerEvent {
    AsteroidSpawned,
    PowerUpSpawned(PowerUpKind),
    ShieldAbsorbed,
    LifeLost { lives: u32 },
    PowerUpCollected(PowerUpKind),
    ShieldExpired,
    BoostExpired,
    CrystalCollected { score: u32 },
    LevelUp { level: u32 },
    ShipDestroyed,
}

pub type FrameEvents = SmallVec<[ScavengerEvent; 4]>;

/// Read-only view of a Space Scavenger round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScavengerSnapshot {
    pub arena: Rect,
    pub ship: Rect,
    pub lives: u32,
    pub shielded: bool,
    pub boosted: bool,
    pub asteroids: Vec<Rect>,
    pub power_ups: Vec<PowerUp>,
    pub crystals: Vec<Rect>,
    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub frames: u64,
}

impl ScavengerSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// A round of Space Scavenger.
#[derive(Clone, Debug)]
pub struct Scavenger {
    config: ScavengerConfig,
    arena: Rect,
    rng: GameRng,
    spawn_rng: GameRng,
    item_rng: GameRng,

    ship: Ship,
    controls: Controls,
    asteroids: Vec<Asteroid>,
    power_ups: Vec<PowerUp>,
    crystals: Vec<Crystal>,

    score: u32,
    level: u32,
    status: GameStatus,

    clock: FixedStep,
    frames: u64,
}

impl Scavenger {
    /// # Panics
    ///
    /// Panics if `config` fails validation.
    #[must_use]
    pub fn new(config: ScavengerConfig, seed: u64) -> Self {
        match Self::try_new(config, seed) {
            Ok(game) => game,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new(config: ScavengerConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, GameRng::new(seed)))
    }

    fn start(config: ScavengerConfig, rng: GameRng) -> Self {
        let arena = Rect::new(0.0, 0.0, config.arena_width, config.arena_height);
        let spawn_rng = rng.for_context("asteroids");
        let mut item_rng = rng.for_context("items");

        let ship = Ship::new(arena.center(), config.ship_size, config.lives, config.ship_speed);
        let crystals = (0..config.crystal_count)
            .map(|_| Crystal {
                rect: place_item(
                    &mut item_rng,
                    config.arena_width,
                    config.arena_height,
                    config.item_margin,
                    config.crystal_size,
                ),
            })
            .collect();

        debug!("Scavenger round started with seed {}", rng.seed());
        Self {
            arena,
            rng,
            spawn_rng,
            item_rng,
            ship,
            controls: Controls::default(),
            asteroids: Vec::new(),
            power_ups: Vec::new(),
            crystals,
            score: 0,
            level: 1,
            status: GameStatus::Playing,
            clock: FixedStep::per_second(config.frame_rate),
            frames: 0,
            config,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &ScavengerConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn crystals(&self) -> &[Crystal] {
        &self.crystals
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    // === Input ===

    pub fn steer(&mut self, controls: Controls) -> Response {
        if self.status.is_terminal() {
            return Response::Ignored;
        }
        self.controls = controls;
        Response::Accepted
    }

    /// Start a fresh round. Accepted at any time.
    pub fn restart(&mut self) -> Response {
        let next = self.rng.fork();
        *self = Self::start(self.config.clone(), next);
        Response::Accepted
    }

    // === Time ===

    /// Advance game time by `dt`, running every frame that is due.
    pub fn tick(&mut self, dt: Duration) -> Vec<ScavengerEvent> {
        let mut events = Vec::new();
        if self.status.is_terminal() {
            return events;
        }
        for _ in 0..self.clock.tick(dt) {
            events.extend(self.frame());
            if self.status.is_terminal() {
                break;
            }
        }
        events
    }

    /// Run one simulation frame.
    pub fn frame(&mut self) -> FrameEvents {
        let mut events = FrameEvents::new();
        if self.status.is_terminal() {
            return events;
        }
        self.frames += 1;

        self.ship.steer(self.controls, &self.arena);
        self.spawn(&mut events);
        self.move_asteroids(&mut events);
        if self.status.is_terminal() {
            return events;
        }
        self.collect_power_ups(&mut events);
        self.expire_effects(&mut events);
        self.collect_crystals(&mut events);

        if self.score > self.level * self.config.points_per_level {
            self.level += 1;
            debug!("Level {} reached at score {}", self.level, self.score);
            events.push(ScavengerEvent::LevelUp { level: self.level });
        }
        events
    }

    // === Frame phases ===

    fn spawn(&mut self, events: &mut FrameEvents) {
        let config = &self.config;
        if config.spawn_asteroids && self.spawn_rng.one_in(config.asteroid_odds(self.level)) {
            self.asteroids
                .push(Asteroid::spawn(&mut self.spawn_rng, config.arena_width, config.arena_height));
            events.push(ScavengerEvent::AsteroidSpawned);
        }
        if config.spawn_power_ups && self.item_rng.one_in(config.power_up_odds) {
            let kind = if self.item_rng.gen_bool(0.5) {
                PowerUpKind::Speed
            } else {
                PowerUpKind::Shield
            };
            let rect = place_item(
                &mut self.item_rng,
                config.arena_width,
                config.arena_height,
                config.item_margin,
                config.power_up_size,
            );
            self.power_ups.push(PowerUp { kind, rect });
            events.push(ScavengerEvent::PowerUpSpawned(kind));
        }
    }

    fn move_asteroids(&mut self, events: &mut FrameEvents) {
        let speed = self.config.asteroid_speed_at(self.level);
        let size = self.config.asteroid_size;

        let mut i = 0;
        while i < self.asteroids.len() {
            let asteroid = &mut self.asteroids[i];
            asteroid.drift(speed, self.config.asteroid_growth);

            if asteroid.rect(size).intersects(&self.ship.rect) {
                self.asteroids.remove(i);
                if self.ship.has_shield() {
                    self.ship.shield.cancel();
                    events.push(ScavengerEvent::ShieldAbsorbed);
                } else {
                    self.ship.lives = self.ship.lives.saturating_sub(1);
                    events.push(ScavengerEvent::LifeLost { lives: self.ship.lives });
                    if self.ship.lives == 0 {
                        self.status = GameStatus::GameOver;
                        events.push(ScavengerEvent::ShipDestroyed);
                        info!(
                            "Scavenger over after {} frames: score {} on level {}",
                            self.frames, self.score, self.level
                        );
                        return;
                    }
                }
            } else if asteroid.is_off_screen(size, &self.arena) {
                self.asteroids.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn collect_power_ups(&mut self, events: &mut FrameEvents) {
        let ship = &mut self.ship;
        let config = &self.config;
        self.power_ups.retain(|power_up| {
            if !power_up.rect.intersects(&ship.rect) {
                return true;
            }
            match power_up.kind {
                PowerUpKind::Speed => {
                    ship.speed = config.boosted_speed;
                    ship.boost.start(config.boost_duration);
                }
                PowerUpKind::Shield => ship.shield.start(config.shield_duration),
            }
            events.push(ScavengerEvent::PowerUpCollected(power_up.kind));
            false
        });
    }

    fn expire_effects(&mut self, events: &mut FrameEvents) {
        let frame = self.clock.step();
        if self.ship.shield.tick(frame) {
            events.push(ScavengerEvent::ShieldExpired);
        }
        if self.ship.boost.tick(frame) {
            self.ship.speed = self.config.ship_speed;
            events.push(ScavengerEvent::BoostExpired);
        }
    }

    fn collect_crystals(&mut self, events: &mut FrameEvents) {
        let config = &self.config;
        for crystal in &mut self.crystals {
            if crystal.rect.intersects(&self.ship.rect) {
                self.score += 1;
                crystal.rect = place_item(
                    &mut self.item_rng,
                    config.arena_width,
                    config.arena_height,
                    config.item_margin,
                    config.crystal_size,
                );
                events.push(ScavengerEvent::CrystalCollected { score: self.score });
            }
        }
    }
}

impl Game for Scavenger {
    type Input = ScavengerInput;
    type Outcome = Response;
    type Snapshot = ScavengerSnapshot;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn handle(&mut self, input: ScavengerInput) -> Response {
        match input {
            ScavengerInput::Steer(controls) => self.steer(controls),
            ScavengerInput::Restart => self.restart(),
        }
    }

    fn advance(&mut self, dt: Duration) {
        let events = self.tick(dt);
        if !events.is_empty() {
            debug!("Scavenger tick: {:?}", events);
        }
    }

    fn snapshot(&self) -> ScavengerSnapshot {
        let size = self.config.asteroid_size;
        ScavengerSnapshot {
            arena: self.arena,
            ship: self.ship.rect,
            lives: self.ship.lives,
            shielded: self.ship.has_shield(),
            boosted: self.ship.is_boosted(),
            asteroids: self.asteroids.iter().map(|a| a.rect(size)).collect(),
            power_ups: self.power_ups.clone(),
            crystals: self.crystals.iter().map(|c| c.rect).collect(),
            score: self.score,
            level: self.level,
            status: self.status,
            frames: self.frames,
        }
    }

    fn reset(&mut self) {
        self.restart();
    }
}
