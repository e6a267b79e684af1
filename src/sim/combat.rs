//! Combat bookkeeping shared by the player and every enemy profile
//!
//! `Vitals` owns health, the transient hit flag, and the two-stage death
//! sequence (`is_dying` during the death animation, `is_dead` once it has
//! played out). Both flags gate physics, AI and further combat; the caller
//! checks them at the top of its update. Timed windows are
//! (start-timestamp, duration) pairs compared against the host clock.

use glam::Vec2;

use crate::facing_sign;

use super::geometry::Aabb;
use super::physics::Body;

/// Health, hit-flash and death sequencing state
#[derive(Debug, Clone)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    /// Transient hit flag for flash rendering and re-hit suppression
    pub is_hit: bool,
    pub hit_start_time: f64,
    pub last_hit_time: f64,
    pub is_dying: bool,
    pub is_dead: bool,
    pub death_start_time: f64,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            is_hit: false,
            // Never-hit sentinel: every window test must fail until the
            // first real hit stamps these
            hit_start_time: f64::NEG_INFINITY,
            last_hit_time: f64::NEG_INFINITY,
            is_dying: false,
            is_dead: false,
            death_start_time: 0.0,
        }
    }

    /// Neither dead nor mid-death-animation
    pub fn alive(&self) -> bool {
        !self.is_dead && !self.is_dying
    }

    /// Inside the re-hit suppression window measured from the last hit
    pub fn invulnerable(&self, now: f64, window_ms: f64) -> bool {
        now - self.last_hit_time < window_ms
    }

    /// Apply damage, clamped at zero. Records the hit timestamps and
    /// returns true when this hit was lethal. Guards (death, windows,
    /// defending) belong to the caller.
    pub fn damage(&mut self, amount: f32, now: f64) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.is_hit = true;
        self.hit_start_time = now;
        self.last_hit_time = now;
        self.health <= 0.0
    }

    /// Heal up to `max_health`; returns the amount actually restored
    pub fn heal(&mut self, amount: f32) -> f32 {
        let restored = (self.max_health - self.health).min(amount);
        self.health += restored;
        restored
    }

    /// Clear the hit flag once the flash window has elapsed
    pub fn expire_hit_flash(&mut self, now: f64, flash_ms: f64) {
        if self.is_hit && now - self.hit_start_time > flash_ms {
            self.is_hit = false;
        }
    }

    /// Begin the death sequence. Idempotent: a second call while already
    /// dying or dead does not restart the timer.
    pub fn start_death(&mut self, now: f64) -> bool {
        if !self.alive() {
            return false;
        }
        self.is_dying = true;
        self.death_start_time = now;
        true
    }

    /// Whether the death animation window has fully elapsed
    pub fn death_elapsed(&self, now: f64, duration_ms: f64) -> bool {
        self.is_dying && now - self.death_start_time >= duration_ms
    }

    /// Finish dying: the entity is now removable
    pub fn complete_death(&mut self) {
        self.is_dead = true;
        self.is_dying = false;
    }

    /// Reset to full for respawn
    pub fn revive(&mut self) {
        self.health = self.max_health;
        self.is_hit = false;
        self.is_dying = false;
        self.is_dead = false;
    }
}

/// The player's melee attack hit-box, offset in the facing direction
#[derive(Debug, Clone, Copy)]
pub struct AttackBox {
    pub width: f32,
    pub height: f32,
    pub offset_y: f32,
}

impl AttackBox {
    /// World-space rectangle for the current facing: flush against the
    /// attacker's leading edge
    pub fn world_rect(&self, attacker: &Body, facing_right: bool) -> Aabb {
        let x = if facing_right {
            attacker.pos.x + attacker.size.x
        } else {
            attacker.pos.x - self.width
        };
        Aabb::new(
            Vec2::new(x, attacker.pos.y + self.offset_y),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Horizontal knockback displacement, opposite the victim's facing
#[inline]
pub fn knockback(direction_right: bool, force: f32) -> f32 {
    force * -facing_sign(direction_right)
}
