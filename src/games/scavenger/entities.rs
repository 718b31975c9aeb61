//! Arena entities: the ship, asteroids, power-ups and crystals.

use serde::{Deserialize, Serialize};

use crate::core::{Countdown, GameRng, Rect, Vec2};

/// Held movement keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Controls {
    /// Unit-per-axis movement; opposite keys cancel out.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// The player's ship.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub rect: Rect,
    pub lives: u32,
    pub speed: f32,
    pub(crate) shield: Countdown,
    pub(crate) boost: Countdown,
}

impl Ship {
    pub(crate) fn new(center: Vec2, size: f32, lives: u32, speed: f32) -> Self {
        Self {
            rect: Rect::centered(center, size, size),
            lives,
            speed,
            shield: Countdown::idle(),
            boost: Countdown::idle(),
        }
    }

    /// Move by `controls` at the current speed, staying inside `arena`.
    pub(crate) fn steer(&mut self, controls: Controls, arena: &Rect) {
        let offset = controls.heading().scaled(self.speed);
        self.rect = self.rect.translated(offset).clamped_to(arena);
    }

    #[must_use]
    pub fn has_shield(&self) -> bool {
        self.shield.is_running()
    }

    #[must_use]
    pub fn is_boosted(&self) -> bool {
        self.boost.is_running()
    }
}

/// An asteroid drifting in a straight line and slowly growing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub center: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub scale: f32,
}

impl Asteroid {
    /// Spawn on a random arena edge, aimed at a random point inside.
    pub(crate) fn spawn(rng: &mut GameRng, width: f32, height: f32) -> Self {
        let x = rng.gen_f32(0.0, width);
        let y = rng.gen_f32(0.0, height);
        let center = match rng.gen_range(0..4) {
            0 => Vec2::new(x, 0.0),
            1 => Vec2::new(x, height),
            2 => Vec2::new(0.0, y),
            _ => Vec2::new(width, y),
        };
        let target = rng.gen_point(width, height, 0.0);
        Self {
            center,
            direction: (target - center).normalized(),
            scale: 1.0,
        }
    }

    pub(crate) fn drift(&mut self, speed: f32, growth: f32) {
        self.center = self.center + self.direction.scaled(speed);
        self.scale += growth;
    }

    #[must_use]
    pub fn rect(&self, base_size: f32) -> Rect {
        let size = base_size * self.scale;
        Rect::centered(self.center, size, size)
    }

    /// Check whether the asteroid lies entirely outside `arena`.
    #[must_use]
    pub fn is_off_screen(&self, base_size: f32, arena: &Rect) -> bool {
        let rect = self.rect(base_size);
        rect.right() < arena.left()
            || rect.left() > arena.right()
            || rect.bottom() < arena.top()
            || rect.top() > arena.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Raises ship speed for a while.
    Speed,
    /// Absorbs the next asteroid hit.
    Shield,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crystal {
    pub rect: Rect,
}

/// A `size` square centered at least `margin` from every edge.
pub(crate) fn place_item(rng: &mut GameRng, width: f32, height: f32, margin: f32, size: f32) -> Rect {
    Rect::centered(rng.gen_point(width, height, margin), size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn test_controls_heading() {
        let none = Controls::default();
        assert_eq!(none.heading(), Vec2::ZERO);

        let up_left = Controls { left: true, up: true, ..Controls::default() };
        assert_eq!(up_left.heading(), Vec2::new(-1.0, -1.0));

        let both = Controls { left: true, right: true, ..Controls::default() };
        assert_eq!(both.heading().x, 0.0);
    }

    #[test]
    fn test_ship_stays_in_arena() {
        let mut ship = Ship::new(Vec2::new(30.0, 30.0), 50.0, 3, 5.0);
        let up_left = Controls { left: true, up: true, ..Controls::default() };

        for _ in 0..10 {
            ship.steer(up_left, &ARENA);
        }
        assert_eq!(ship.rect.x, 0.0);
        assert_eq!(ship.rect.y, 0.0);
    }

    #[test]
    fn test_asteroid_spawns_on_edge() {
        let mut rng = GameRng::new(11);
        for _ in 0..100 {
            let asteroid = Asteroid::spawn(&mut rng, 800.0, 600.0);
            let c = asteroid.center;
            assert!(c.x == 0.0 || c.x == 800.0 || c.y == 0.0 || c.y == 600.0);
            assert_eq!(asteroid.scale, 1.0);
            assert!(asteroid.direction.length() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_asteroid_drift_and_growth() {
        let mut asteroid = Asteroid {
            center: Vec2::new(100.0, 100.0),
            direction: Vec2::new(1.0, 0.0),
            scale: 1.0,
        };
        asteroid.drift(2.0, 0.5);
        assert_eq!(asteroid.center, Vec2::new(102.0, 100.0));
        assert_eq!(asteroid.rect(50.0).w, 75.0);
    }

    #[test]
    fn test_asteroid_off_screen() {
        let inside = Asteroid {
            center: Vec2::new(-20.0, 300.0),
            direction: Vec2::new(-1.0, 0.0),
            scale: 1.0,
        };
        assert!(!inside.is_off_screen(50.0, &ARENA));

        let gone = Asteroid { center: Vec2::new(-26.0, 300.0), ..inside };
        assert!(gone.is_off_screen(50.0, &ARENA));
    }

    #[test]
    fn test_place_item_respects_margin() {
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            let center = place_item(&mut rng, 800.0, 600.0, 50.0, 30.0).center();
            assert!((50.0..=750.0).contains(&center.x));
            assert!((50.0..=550.0).contains(&center.y));
        }
    }
}
