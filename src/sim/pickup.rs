//! Health pickups
//!
//! A pickup idles in place with a short looping animation and is collected
//! on the first overlapping contact that actually restores health. A
//! full-health player walks straight through without consuming it.

use glam::Vec2;

use super::geometry::Aabb;
use super::player::Player;

pub const PICKUP_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const PICKUP_HEAL_AMOUNT: f32 = 50.0;
pub const PICKUP_FRAME_COUNT: u32 = 4;
pub const PICKUP_FRAME_INTERVAL_MS: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct HealthPickup {
    pub pos: Vec2,
    pub is_active: bool,
    pub frame_index: u32,
    frame_timer: f64,
}

impl HealthPickup {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            is_active: true,
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, PICKUP_SIZE)
    }

    /// Animate and check for collection; returns the health restored when
    /// the pickup was consumed this tick.
    pub fn update(&mut self, player: &mut Player, now: f64) -> Option<f32> {
        if now - self.frame_timer > PICKUP_FRAME_INTERVAL_MS {
            self.frame_index = (self.frame_index + 1) % PICKUP_FRAME_COUNT;
            self.frame_timer = now;
        }

        if self.is_active && self.aabb().overlaps(&player.body.aabb()) {
            let restored = player.vitals.heal(PICKUP_HEAL_AMOUNT);
            if restored > 0.0 {
                self.is_active = false;
                return Some(restored);
            }
        }
        None
    }
}
