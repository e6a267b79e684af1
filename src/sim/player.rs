//! The player entity
//!
//! Input is resolved into a single priority-ordered state each tick
//! (defending > attacking > jumping > running > idle), then physics, the
//! melee hit-test and the animation timer run in that order. Death plays
//! the dead clip to completion before the lifecycle controller decides
//! between respawn and game over.

use glam::Vec2;

use super::animation::{ActionState, Animator, Clip, ClipSet};
use super::combat::{AttackBox, Vitals};
use super::enemy::Enemy;
use super::level::CollisionBlock;
use super::physics::{Body, ResolvePolicy};

pub const PLAYER_SIZE: Vec2 = Vec2::new(44.0, 80.0);
pub const PLAYER_SPEED: f32 = 3.0;
pub const PLAYER_GRAVITY: f32 = 0.3;
pub const PLAYER_JUMP_STRENGTH: f32 = -8.0;
pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_ATTACK_DAMAGE: f32 = 25.0;
/// Attack stays active (and re-triggerable no sooner than) this long
pub const PLAYER_ATTACK_COOLDOWN_MS: f64 = 500.0;
/// Post-hit invulnerability window, independent of any visual flash
pub const PLAYER_INVULNERABILITY_MS: f64 = 1000.0;

/// Polled snapshot of currently-held keys, supplied by the host each tick.
/// The core only reads it; input is ignored outright while the player is
/// dead or dying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub defend: bool,
    pub attack: bool,
}

impl InputState {
    pub fn any_horizontal(&self) -> bool {
        self.left || self.right
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub facing_right: bool,
    pub animator: Animator,
    pub clips: ClipSet,
    pub vitals: Vitals,
    pub lives: u32,
    pub attack_box: AttackBox,
    pub attack_damage: f32,
    pub last_attack_time: f64,
    invulnerable_until: f64,
    /// Set by `die`: dead-clip frames x frame interval
    death_duration_ms: f64,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        let clips = ClipSet::new()
            .with(ActionState::Idle, Clip::looping(6))
            .with(ActionState::Run, Clip::looping(11))
            .with(ActionState::Jump, Clip::once(14))
            .with(ActionState::Attack, Clip::once(7))
            .with(ActionState::Defend, Clip::once(3))
            .with(ActionState::Dead, Clip::once(6));
        Self {
            body: Body::new(position, PLAYER_SIZE, PLAYER_GRAVITY),
            facing_right: true,
            animator: Animator::new(ActionState::Idle),
            clips,
            vitals: Vitals::new(PLAYER_MAX_HEALTH),
            lives: PLAYER_LIVES,
            attack_box: AttackBox { width: 60.0, height: 50.0, offset_y: 15.0 },
            attack_damage: PLAYER_ATTACK_DAMAGE,
            last_attack_time: f64::NEG_INFINITY,
            invulnerable_until: f64::NEG_INFINITY,
            death_duration_ms: 0.0,
        }
    }

    /// Current behavior state (single source of truth; at most one state
    /// holds at a time)
    pub fn state(&self) -> ActionState {
        self.animator.state
    }

    fn is_attacking(&self) -> bool {
        self.state() == ActionState::Attack
    }

    fn is_defending(&self) -> bool {
        self.state() == ActionState::Defend
    }

    /// Advance the player one tick: input resolution, physics, melee
    /// hit-test, animation, then block resolution.
    pub fn update(
        &mut self,
        input: &InputState,
        enemies: &mut [Enemy],
        blocks: &[CollisionBlock],
        now: f64,
    ) -> Vec<f32> {
        // While the death clip plays, only the animation timer advances
        if !self.vitals.alive() {
            self.animator.advance(&self.clips, now);
            return Vec::new();
        }

        self.body.apply_gravity();

        if !self.is_attacking() {
            self.resolve_input_state(input, now);
        }

        // Attack segment is non-interruptible; revert once its window ends,
        // unless death superseded it in the meantime
        if self.is_attacking() && now - self.last_attack_time > PLAYER_ATTACK_COOLDOWN_MS {
            self.animator.set_state(ActionState::Idle, now);
        }

        let damage_dealt = self.check_attack_collisions(enemies, now);
        self.animator.advance(&self.clips, now);
        self.check_collisions(input, blocks, now);
        damage_dealt
    }

    /// Priority-ordered state resolution: defending > attacking > jumping >
    /// running > idle
    fn resolve_input_state(&mut self, input: &InputState, now: f64) {
        if input.defend {
            self.animator.set_state(ActionState::Defend, now);
        } else if self.is_defending() {
            self.animator.set_state(ActionState::Idle, now);
        }

        if !self.is_defending() {
            if input.right {
                self.body.pos.x += PLAYER_SPEED;
                self.facing_right = true;
                if self.body.on_ground && self.state() != ActionState::Jump {
                    self.animator.set_state(ActionState::Run, now);
                }
            } else if input.left {
                self.body.pos.x -= PLAYER_SPEED;
                self.facing_right = false;
                if self.body.on_ground && self.state() != ActionState::Jump {
                    self.animator.set_state(ActionState::Run, now);
                }
            } else if self.state() == ActionState::Run && self.body.on_ground {
                self.animator.set_state(ActionState::Idle, now);
            }

            if input.jump && self.body.on_ground {
                self.body.velocity_y = PLAYER_JUMP_STRENGTH;
                self.body.on_ground = false;
                self.animator.set_state(ActionState::Jump, now);
            }

            if input.attack && !self.is_attacking() {
                self.animator.set_state(ActionState::Attack, now);
                self.last_attack_time = now;
            }
        }
    }

    /// Test the melee hit-box against every live enemy. Damage lands once
    /// per attack activation: an enemy still inside its own hit window is
    /// skipped. Returns the damage amounts that landed.
    fn check_attack_collisions(&mut self, enemies: &mut [Enemy], now: f64) -> Vec<f32> {
        if !self.is_attacking() {
            return Vec::new();
        }
        let hit_box = self.attack_box.world_rect(&self.body, self.facing_right);
        let mut landed = Vec::new();
        for enemy in enemies.iter_mut() {
            if !enemy.vitals.is_hit
                && hit_box.overlaps(&enemy.body.aabb())
                && enemy.take_hit(self.attack_damage, now)
            {
                landed.push(self.attack_damage);
            }
        }
        landed
    }

    fn check_collisions(&mut self, input: &InputState, blocks: &[CollisionBlock], now: f64) {
        let was_on_ground = self.body.on_ground;
        self.body.resolve_blocks(blocks, ResolvePolicy::Full);

        // Landing ends the jump segment
        if !was_on_ground && self.body.on_ground && self.state() == ActionState::Jump {
            let next = if input.any_horizontal() {
                ActionState::Run
            } else {
                ActionState::Idle
            };
            self.animator.set_state(next, now);
        }
    }

    /// Incoming damage. Ignored while defending, dead/dying, or inside the
    /// invulnerability window. Returns whether damage applied.
    pub fn take_damage(&mut self, amount: f32, now: f64) -> bool {
        if self.is_defending() || !self.vitals.alive() || now < self.invulnerable_until {
            return false;
        }
        let lethal = self.vitals.damage(amount, now);
        self.invulnerable_until = now + PLAYER_INVULNERABILITY_MS;
        if lethal {
            self.die(now);
        }
        true
    }

    /// Begin the death sequence; re-entry while already dying is a no-op.
    pub fn die(&mut self, now: f64) {
        if !self.vitals.start_death(now) {
            return;
        }
        self.animator.set_state(ActionState::Dead, now);
        let dead_frames = self
            .clips
            .get(ActionState::Dead)
            .map(|clip| clip.frame_count)
            .unwrap_or(1);
        self.death_duration_ms = dead_frames as f64 * self.animator.frame_interval;
        log::info!("player died at {:?}, {} lives banked", self.body.pos, self.lives);
    }

    /// Whether the death animation has fully played out
    pub fn death_complete(&self, now: f64) -> bool {
        self.vitals.death_elapsed(now, self.death_duration_ms)
    }

    /// Full state reset at a level start position
    pub fn respawn(&mut self, start_position: Vec2, now: f64) {
        self.vitals.revive();
        self.body.pos = start_position;
        self.body.velocity_y = 0.0;
        self.body.on_ground = false;
        self.facing_right = true;
        self.animator.set_state(ActionState::Idle, now);
    }
}
