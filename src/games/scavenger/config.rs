use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{error, Error, Result};

/// Configuration for a Space Scavenger round.
///
/// Distances are pixels and speeds are pixels per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScavengerConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Simulation frames per second of game time.
    pub frame_rate: u32,

    pub ship_size: f32,
    pub ship_speed: f32,
    pub boosted_speed: f32,
    pub boost_duration: Duration,
    pub shield_duration: Duration,
    pub lives: u32,

    pub asteroid_size: f32,
    /// Asteroid speed on level 1.
    pub asteroid_speed: f32,
    pub asteroid_speed_per_level: f32,
    /// Scale added to every asteroid each frame.
    pub asteroid_growth: f32,
    /// Asteroid spawn odds are 1 in `max(base - per_level * level, floor)`.
    pub asteroid_odds_base: u32,
    pub asteroid_odds_per_level: u32,
    pub asteroid_odds_floor: u32,

    /// Power-up spawn odds are 1 in this, per frame.
    pub power_up_odds: u32,
    pub power_up_size: f32,
    pub crystal_count: usize,
    pub crystal_size: f32,
    /// Minimum distance from an item's center to the arena edge.
    pub item_margin: f32,

    /// Level N ends once the score exceeds `N * points_per_level`.
    pub points_per_level: u32,

    pub spawn_asteroids: bool,
    pub spawn_power_ups: bool,
}

impl Default for ScavengerConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            frame_rate: 60,
            ship_size: 50.0,
            ship_speed: 5.0,
            boosted_speed: 10.0,
            boost_duration: Duration::from_secs(5),
            shield_duration: Duration::from_secs(5),
            lives: 3,
            asteroid_size: 50.0,
            asteroid_speed: 2.0,
            asteroid_speed_per_level: 0.5,
            asteroid_growth: 0.002,
            asteroid_odds_base: 50,
            asteroid_odds_per_level: 2,
            asteroid_odds_floor: 10,
            power_up_odds: 500,
            power_up_size: 30.0,
            crystal_count: 5,
            crystal_size: 30.0,
            item_margin: 50.0,
            points_per_level: 10,
            spawn_asteroids: true,
            spawn_power_ups: true,
        }
    }
}

impl ScavengerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.arena_width = width;
        self.arena_height = height;
        self
    }

    #[must_use]
    pub fn with_frame_rate(mut self, rate: u32) -> Self {
        self.frame_rate = rate;
        self
    }

    #[must_use]
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    #[must_use]
    pub fn with_ship_speed(mut self, normal: f32, boosted: f32) -> Self {
        self.ship_speed = normal;
        self.boosted_speed = boosted;
        self
    }

    #[must_use]
    pub fn with_power_up_durations(mut self, boost: Duration, shield: Duration) -> Self {
        self.boost_duration = boost;
        self.shield_duration = shield;
        self
    }

    #[must_use]
    pub fn with_crystal_count(mut self, count: usize) -> Self {
        self.crystal_count = count;
        self
    }

    /// Turn random asteroid and power-up spawning on or off.
    #[must_use]
    pub fn with_spawning(mut self, asteroids: bool, power_ups: bool) -> Self {
        self.spawn_asteroids = asteroids;
        self.spawn_power_ups = power_ups;
        self
    }

    /// Per-frame asteroid spawn odds (1 in N) on `level`.
    #[must_use]
    pub fn asteroid_odds(&self, level: u32) -> u32 {
        self.asteroid_odds_base
            .saturating_sub(self.asteroid_odds_per_level.saturating_mul(level))
            .max(self.asteroid_odds_floor)
    }

    /// Asteroid speed on `level`, starting from level 1.
    #[must_use]
    pub fn asteroid_speed_at(&self, level: u32) -> f32 {
        self.asteroid_speed + self.asteroid_speed_per_level * level.saturating_sub(1) as f32
    }

    pub fn validate(&self) -> Result<()> {
        error::ensure_positive("arena_width", self.arena_width)?;
        error::ensure_positive("arena_height", self.arena_height)?;
        error::ensure_positive("frame_rate", self.frame_rate)?;
        error::ensure_positive("ship_size", self.ship_size)?;
        error::ensure_positive("lives", self.lives)?;
        error::ensure_positive("asteroid_size", self.asteroid_size)?;
        error::ensure_positive("points_per_level", self.points_per_level)?;

        if self.ship_size > self.arena_width || self.ship_size > self.arena_height {
            return Err(Error::invalid("ship_size", "must fit inside the arena"));
        }
        if 2.0 * self.item_margin > self.arena_width || 2.0 * self.item_margin > self.arena_height {
            return Err(Error::invalid(
                "item_margin",
                format!("{} leaves no room for items", self.item_margin),
            ));
        }
        if self.ship_speed < 0.0 || self.boosted_speed < 0.0 {
            return Err(Error::invalid("ship_speed", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ScavengerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_asteroid_odds_floor() {
        let config = ScavengerConfig::default();
        assert_eq!(config.asteroid_odds(1), 48);
        assert_eq!(config.asteroid_odds(10), 30);
        assert_eq!(config.asteroid_odds(20), 10);
        assert_eq!(config.asteroid_odds(100), 10);
    }

    #[test]
    fn test_asteroid_speed_per_level() {
        let config = ScavengerConfig::default();
        assert_eq!(config.asteroid_speed_at(1), 2.0);
        assert_eq!(config.asteroid_speed_at(3), 3.0);
    }

    #[test]
    fn test_invalid_configs() {
        let err = ScavengerConfig::new().with_lives(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "lives", .. }));

        let err = ScavengerConfig::new().with_arena(40.0, 600.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "ship_size", .. }));

        let err = ScavengerConfig::new().with_arena(90.0, 600.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "item_margin", .. }));
    }
}
