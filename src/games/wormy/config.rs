//! Wormy configuration.
//!
//! Defaults reproduce the classroom version: a 32x24 board, 10 steps per
//! second rising by 5 every 10 seconds, and a rival worm after 20 seconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{error, Error, Result};

/// Configuration for a Wormy round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WormyConfig {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Minimum distance between a spawned head and the board edge.
    pub spawn_margin: u32,

    pub start_length: u32,
    pub rival_length: u32,

    /// Steps per second at the start of a round.
    pub start_speed: u32,
    pub speed_increment: u32,
    pub speed_up_every: Duration,

    /// Yellow apples move on after this long.
    pub yellow_apple_ttl: Duration,
    /// Blue apples move on after this long.
    pub blue_apple_ttl: Duration,

    /// The rival worm appears this long into the round.
    pub rival_delay: Duration,

    /// A recurring bonus appears this often...
    pub bonus_every: Duration,
    /// ...and stays this long.
    pub bonus_lifetime: Duration,
    /// The one-shot bonus appears this long into the round...
    pub one_shot_bonus_at: Duration,
    /// ...and stays this long.
    pub one_shot_bonus_lifetime: Duration,
    /// Points per bonus item eaten.
    pub bonus_points: u32,
}

impl Default for WormyConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 24,
            spawn_margin: 5,
            start_length: 3,
            rival_length: 4,
            start_speed: 10,
            speed_increment: 5,
            speed_up_every: Duration::from_secs(10),
            yellow_apple_ttl: Duration::from_secs(2),
            blue_apple_ttl: Duration::from_secs(2),
            rival_delay: Duration::from_secs(20),
            bonus_every: Duration::from_secs(5),
            bonus_lifetime: Duration::from_secs(5),
            one_shot_bonus_at: Duration::from_secs(10),
            one_shot_bonus_lifetime: Duration::from_secs(7),
            bonus_points: 3,
        }
    }
}

impl WormyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_spawn_margin(mut self, margin: u32) -> Self {
        self.spawn_margin = margin;
        self
    }

    #[must_use]
    pub fn with_lengths(mut self, player: u32, rival: u32) -> Self {
        self.start_length = player;
        self.rival_length = rival;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, start: u32, increment: u32) -> Self {
        self.start_speed = start;
        self.speed_increment = increment;
        self
    }

    #[must_use]
    pub fn with_speed_up_every(mut self, period: Duration) -> Self {
        self.speed_up_every = period;
        self
    }

    #[must_use]
    pub fn with_apple_ttl(mut self, yellow: Duration, blue: Duration) -> Self {
        self.yellow_apple_ttl = yellow;
        self.blue_apple_ttl = blue;
        self
    }

    #[must_use]
    pub fn with_rival_delay(mut self, delay: Duration) -> Self {
        self.rival_delay = delay;
        self
    }

    #[must_use]
    pub fn with_bonus_schedule(mut self, every: Duration, lifetime: Duration) -> Self {
        self.bonus_every = every;
        self.bonus_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_one_shot_bonus(mut self, at: Duration, lifetime: Duration) -> Self {
        self.one_shot_bonus_at = at;
        self.one_shot_bonus_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_bonus_points(mut self, points: u32) -> Self {
        self.bonus_points = points;
        self
    }

    /// Check every field.
    ///
    /// Heads spawn at least `spawn_margin` cells from every edge, with the body
    /// trailing to the left, so the margin must fit the longer worm.
    pub fn validate(&self) -> Result<()> {
        error::ensure_positive("width", self.width)?;
        error::ensure_positive("height", self.height)?;
        error::ensure_positive("start_length", self.start_length)?;
        error::ensure_positive("rival_length", self.rival_length)?;
        error::ensure_positive("start_speed", self.start_speed)?;
        error::ensure_positive("speed_up_every", self.speed_up_every.as_nanos())?;
        error::ensure_positive("yellow_apple_ttl", self.yellow_apple_ttl.as_nanos())?;
        error::ensure_positive("blue_apple_ttl", self.blue_apple_ttl.as_nanos())?;
        error::ensure_positive("bonus_every", self.bonus_every.as_nanos())?;

        let longest = self.start_length.max(self.rival_length);
        if self.spawn_margin + 1 < longest {
            return Err(Error::invalid(
                "spawn_margin",
                format!("must be at least {} to fit a worm of length {}", longest - 1, longest),
            ));
        }
        for (field, extent) in [("width", self.width), ("height", self.height)] {
            if extent < 2 * self.spawn_margin + 1 {
                return Err(Error::invalid(
                    field,
                    format!("must be at least {} for spawn margin {}", 2 * self.spawn_margin + 1, self.spawn_margin),
                ));
            }
        }
        Ok(())
    }
}
