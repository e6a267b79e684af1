//! Shared actor physics: gravity integration and block resolution
//!
//! Every moving actor owns a `Body`. Integration is per-tick (constants are
//! px-per-tick), matching the fixed-rate external tick source.
//!
//! Two resolution policies exist and the difference is deliberate: enemies
//! resolve landings only, so level geometry can never push them sideways;
//! the player additionally collides with ceilings and walls.

use glam::Vec2;

use super::geometry::{Aabb, ResolveAxis};
use super::level::CollisionBlock;

/// Which overlap axes block resolution may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Top-overlap only: land on blocks, pass through everything else
    Grounding,
    /// All four axes: land, head-bump, and horizontal push-out
    Full,
}

/// Position, extent and vertical motion state shared by all actors
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub gravity: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, gravity: f32) -> Self {
        Self {
            pos,
            size,
            velocity_y: 0.0,
            gravity,
            on_ground: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Integrate vertical motion for one tick while airborne
    pub fn apply_gravity(&mut self) {
        if !self.on_ground {
            self.velocity_y += self.gravity;
            self.pos.y += self.velocity_y;
        }
    }

    /// Re-derive ground contact and resolve overlaps against every block.
    ///
    /// `on_ground` is cleared first; any landing resolution re-sets it and
    /// zeroes vertical velocity. Non-overlapping blocks never move the body.
    pub fn resolve_blocks(&mut self, blocks: &[CollisionBlock], policy: ResolvePolicy) {
        self.on_ground = false;
        for block in blocks {
            let block_box = block.aabb();
            if self.aabb().overlaps(&block_box) {
                self.resolve_one(&block_box, policy);
            }
        }
    }

    fn resolve_one(&mut self, block: &Aabb, policy: ResolvePolicy) {
        let depths = self.aabb().overlap_depths(block);
        match policy {
            ResolvePolicy::Grounding => {
                if depths.grounds() {
                    self.land_on(block.pos.y);
                }
            }
            ResolvePolicy::Full => match depths.min_axis() {
                Some(ResolveAxis::Top) => self.land_on(block.pos.y),
                Some(ResolveAxis::Bottom) => {
                    self.pos.y = block.bottom();
                    self.velocity_y = 0.0;
                }
                Some(ResolveAxis::Left) => self.pos.x = block.pos.x - self.size.x,
                Some(ResolveAxis::Right) => self.pos.x = block.right(),
                None => {}
            },
        }
    }

    fn land_on(&mut self, block_top: f32) {
        self.pos.y = block_top - self.size.y;
        self.velocity_y = 0.0;
        self.on_ground = true;
    }
}
