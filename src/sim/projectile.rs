//! Constant-velocity projectiles spawned by ranged enemies
//!
//! A projectile is owned and ticked by the enemy that fired it. It expires
//! after a fixed lifetime or on first player contact; contact damage is a
//! flat fraction of the player's max health, not the attacker's damage
//! stat.

use glam::Vec2;

use super::geometry::Aabb;

/// Projectile dimensions in pixels
pub const PROJECTILE_SIZE: Vec2 = Vec2::new(50.0, 30.0);
/// Horizontal speed in px per tick
pub const PROJECTILE_SPEED: f32 = 4.0;
/// Lifetime before expiry, in milliseconds
pub const PROJECTILE_LIFETIME_MS: f64 = 3000.0;
/// Contact damage as a fraction of the player's max health
pub const PROJECTILE_DAMAGE_FRACTION: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// +1 right, -1 left; fixed at spawn
    pub direction: f32,
    pub speed: f32,
    pub is_active: bool,
    spawn_time: f64,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: f32, now: f64) -> Self {
        Self {
            pos,
            size: PROJECTILE_SIZE,
            direction,
            speed: PROJECTILE_SPEED,
            is_active: true,
            spawn_time: now,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Advance one tick; returns whether the projectile is still live
    pub fn update(&mut self, now: f64) -> bool {
        self.pos.x += self.speed * self.direction;
        if now - self.spawn_time >= PROJECTILE_LIFETIME_MS {
            self.is_active = false;
        }
        self.is_active
    }
}
