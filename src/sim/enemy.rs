//! Generic enemy entity driven by a data `BehaviorProfile`
//!
//! Every enemy variant shares one update path: physics -> distance-band AI
//! -> state machine -> animation timer. What differs between variants is
//! pure data (sizes, ranges, cooldowns, clip tables) plus the attack kind:
//! melee variants damage the player directly, ranged variants spawn a
//! projectile they own and tick themselves.
//!
//! AI is purely reactive. The vertical gate is literal: when the player is
//! too far above or below, the enemy's state is left exactly as it was, not
//! forced back to idle.

use glam::Vec2;

use super::animation::{ActionState, Animator, Clip, ClipSet};
use super::combat::{Vitals, knockback};
use super::level::CollisionBlock;
use super::physics::{Body, ResolvePolicy};
use super::player::Player;
use super::projectile::{PROJECTILE_DAMAGE_FRACTION, Projectile};
use super::world::GameEvent;

/// How a profile's attack lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    /// Apply `attack_damage` to the player directly
    Melee,
    /// Spawn a projectile from the enemy's center in its facing direction
    Ranged,
}

/// Data-driven description of one enemy variant.
///
/// Speeds and gravity are px per tick; durations are milliseconds.
#[derive(Debug, Clone)]
pub struct BehaviorProfile {
    pub name: &'static str,
    pub size: Vec2,
    pub speed: f32,
    pub gravity: f32,
    pub initial_direction: f32,
    pub max_health: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_cooldown_ms: f64,
    /// Detection range: chase inside it, idle beyond it
    pub boundary_radius: f32,
    /// Hit-flash window; also clears the transient hit flag
    pub hit_flash_ms: f64,
    /// Re-hit suppression window after taking damage
    pub hit_invulnerability_ms: f64,
    pub knockback_force: f32,
    pub death_animation_ms: f64,
    pub experience_reward: u32,
    pub attack_kind: AttackKind,
    /// State shown on a non-lethal hit (variants without a hurt sheet
    /// flinch into their attack clip instead)
    pub hurt_state: ActionState,
    /// Whether the hurt state auto-reverts to idle after the flash window
    pub hurt_reverts: bool,
    pub clips: ClipSet,
}

/// The built-in enemy variants
pub mod profiles {
    use super::*;

    pub fn dog() -> BehaviorProfile {
        BehaviorProfile {
            name: "dog",
            size: Vec2::new(48.0, 38.0),
            speed: 2.0,
            gravity: 0.3,
            initial_direction: 1.0,
            max_health: 100.0,
            attack_damage: 4.0,
            attack_range: 40.0,
            attack_cooldown_ms: 1000.0,
            boundary_radius: 200.0,
            hit_flash_ms: 200.0,
            hit_invulnerability_ms: 500.0,
            knockback_force: 5.0,
            death_animation_ms: 1000.0,
            experience_reward: 10,
            attack_kind: AttackKind::Melee,
            hurt_state: ActionState::Hurt,
            hurt_reverts: true,
            clips: ClipSet::new()
                .with(ActionState::Idle, Clip::looping(4))
                .with(ActionState::Walk, Clip::looping(6))
                .with(ActionState::Attack, Clip::looping(4))
                .with(ActionState::Hurt, Clip::once(2))
                .with(ActionState::Dead, Clip::once(4)),
        }
    }

    pub fn goblin() -> BehaviorProfile {
        BehaviorProfile {
            name: "goblin",
            size: Vec2::new(45.0, 60.0),
            speed: 2.0,
            gravity: 0.3,
            initial_direction: -1.0,
            max_health: 250.0,
            attack_damage: 8.0,
            attack_range: 45.0,
            attack_cooldown_ms: 2000.0,
            boundary_radius: 300.0,
            hit_flash_ms: 500.0,
            hit_invulnerability_ms: 500.0,
            knockback_force: 0.0,
            death_animation_ms: 1000.0,
            experience_reward: 10,
            attack_kind: AttackKind::Melee,
            hurt_state: ActionState::Attack,
            hurt_reverts: false,
            clips: ClipSet::new()
                .with(ActionState::Idle, Clip::looping(4))
                .with(ActionState::Walk, Clip::looping(8))
                .with(ActionState::Attack, Clip::looping(8))
                .with(ActionState::Dead, Clip::once(4)),
        }
    }

    pub fn flying_demon() -> BehaviorProfile {
        BehaviorProfile {
            name: "flying_demon",
            size: Vec2::new(48.0, 48.0),
            speed: 2.0,
            gravity: 0.3,
            initial_direction: -1.0,
            max_health: 80.0,
            // Unused by the ranged attack: projectile contact damage is a
            // flat fraction of the player's max health
            attack_damage: 8.0,
            attack_range: 200.0,
            attack_cooldown_ms: 3000.0,
            boundary_radius: 300.0,
            hit_flash_ms: 500.0,
            hit_invulnerability_ms: 500.0,
            knockback_force: 0.0,
            death_animation_ms: 100.0,
            experience_reward: 1,
            attack_kind: AttackKind::Ranged,
            hurt_state: ActionState::Attack,
            hurt_reverts: false,
            clips: ClipSet::new()
                .with(ActionState::Idle, Clip::looping(4))
                .with(ActionState::Walk, Clip::looping(4))
                .with(ActionState::Attack, Clip::looping(8))
                .with(ActionState::Dead, Clip::once(3)),
        }
    }

    /// Resolve a level-spec profile name; unknown names yield `None` and
    /// the spawn is skipped
    pub fn by_name(name: &str) -> Option<BehaviorProfile> {
        match name {
            "dog" => Some(dog()),
            "goblin" => Some(goblin()),
            "flying_demon" => Some(flying_demon()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub profile: BehaviorProfile,
    pub body: Body,
    /// +1 facing right, -1 facing left
    pub direction: f32,
    /// Current speed; zeroed when the death sequence starts
    pub speed: f32,
    pub vitals: Vitals,
    pub animator: Animator,
    pub last_attack_time: f64,
    /// Live projectiles owned by this enemy (ranged variants)
    pub projectiles: Vec<Projectile>,
}

impl Enemy {
    pub fn spawn(profile: BehaviorProfile, position: Vec2) -> Self {
        Self {
            body: Body::new(position, profile.size, profile.gravity),
            direction: profile.initial_direction,
            speed: profile.speed,
            vitals: Vitals::new(profile.max_health),
            animator: Animator::new(ActionState::Idle),
            last_attack_time: f64::NEG_INFINITY,
            projectiles: Vec::new(),
            profile,
        }
    }

    /// Advance one tick: hit-flash expiry, owned projectiles, then either
    /// the death animation or physics + AI + animation.
    pub fn update(
        &mut self,
        player: &mut Player,
        blocks: &[CollisionBlock],
        now: f64,
        events: &mut Vec<GameEvent>,
    ) {
        if self.vitals.is_dead {
            return;
        }

        self.vitals.expire_hit_flash(now, self.profile.hit_flash_ms);

        // In-flight projectiles keep going even while their owner dies
        self.update_projectiles(player, now, events);

        if self.vitals.is_dying {
            self.animator.advance(&self.profile.clips, now);
            if self.vitals.death_elapsed(now, self.profile.death_animation_ms) {
                self.vitals.complete_death();
                events.push(GameEvent::EnemyDied {
                    profile: self.profile.name,
                    experience: self.profile.experience_reward,
                });
            }
            return;
        }

        self.body.apply_gravity();
        self.body.resolve_blocks(blocks, ResolvePolicy::Grounding);

        self.run_policy(player, now, events);

        // Deferred hurt -> idle revert, skipped if death superseded it
        if self.profile.hurt_reverts
            && self.vitals.alive()
            && self.animator.state == self.profile.hurt_state
            && now - self.vitals.hit_start_time > self.profile.hit_flash_ms
        {
            self.animator.set_state(ActionState::Idle, now);
        }

        self.animator.advance(&self.profile.clips, now);
    }

    /// Distance-band policy: attack <= range < chase <= boundary < idle.
    /// Disengaged entirely (state untouched) when the player is more than
    /// two body-heights away vertically.
    fn run_policy(&mut self, player: &mut Player, now: f64, events: &mut Vec<GameEvent>) {
        let distance = (self.body.pos.x - player.body.pos.x).abs();
        let height_difference = (self.body.pos.y - player.body.pos.y).abs();

        if height_difference >= self.body.size.y * 2.0 {
            return;
        }

        if distance <= self.profile.attack_range {
            self.animator.set_state(ActionState::Attack, now);
            self.attempt_attack(player, now, events);
        } else if distance <= self.profile.boundary_radius {
            self.animator.set_state(ActionState::Walk, now);
            self.direction = if player.body.pos.x < self.body.pos.x { -1.0 } else { 1.0 };
            self.body.pos.x += self.speed * self.direction;
        } else {
            self.animator.set_state(ActionState::Idle, now);
        }
    }

    /// Fire the profile's attack if the cooldown has elapsed
    fn attempt_attack(&mut self, player: &mut Player, now: f64, events: &mut Vec<GameEvent>) {
        if now - self.last_attack_time <= self.profile.attack_cooldown_ms {
            return;
        }
        self.last_attack_time = now;

        match self.profile.attack_kind {
            AttackKind::Melee => {
                if player.take_damage(self.profile.attack_damage, now) {
                    events.push(GameEvent::PlayerHurt { damage: self.profile.attack_damage });
                }
            }
            AttackKind::Ranged => {
                let mouth = self.body.pos + self.body.size / 2.0;
                self.projectiles.push(Projectile::new(mouth, self.direction, now));
            }
        }
    }

    fn update_projectiles(&mut self, player: &mut Player, now: f64, events: &mut Vec<GameEvent>) {
        for fire in &mut self.projectiles {
            if fire.is_active && fire.aabb().overlaps(&player.body.aabb()) {
                let damage = player.vitals.max_health * PROJECTILE_DAMAGE_FRACTION;
                if player.take_damage(damage, now) {
                    events.push(GameEvent::PlayerHurt { damage });
                }
                // Spent on contact even if the player was invulnerable
                fire.is_active = false;
            }
        }
        self.projectiles.retain_mut(|fire| fire.update(now));
    }

    /// Incoming damage from the player's attack. No-op while dead, dying,
    /// or inside the re-hit suppression window. Returns whether it applied.
    pub fn take_hit(&mut self, damage: f32, now: f64) -> bool {
        if !self.vitals.alive()
            || self.vitals.invulnerable(now, self.profile.hit_invulnerability_ms)
        {
            return false;
        }

        let lethal = self.vitals.damage(damage, now);
        self.body.pos.x += knockback(self.direction > 0.0, self.profile.knockback_force);

        if lethal {
            self.start_death(now);
        } else {
            self.animator.set_state(self.profile.hurt_state, now);
        }
        true
    }

    /// Begin the death sequence: freeze movement, play the death clip.
    /// Idempotent while already dying or dead.
    pub fn start_death(&mut self, now: f64) {
        if !self.vitals.start_death(now) {
            return;
        }
        self.speed = 0.0;
        self.animator.set_state(ActionState::Dead, now);
        log::debug!("{} dying at {:?}", self.profile.name, self.body.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ground_at(y: f32) -> Vec<CollisionBlock> {
        (0..130)
            .map(|i| CollisionBlock::new(Vec2::new(i as f32 * 16.0, y)))
            .collect()
    }

    fn grounded_player(x: f32) -> Player {
        // Bottom flush with the y=300 ground row
        let mut player = Player::new(Vec2::new(x, 220.0));
        player.body.on_ground = true;
        player
    }

    fn grounded_dog(x: f32) -> Enemy {
        Enemy::spawn(profiles::dog(), Vec2::new(x, 262.0))
    }

    #[test]
    fn test_distance_bands() {
        let blocks = ground_at(300.0);
        let mut events = Vec::new();
        let mut enemy = grounded_dog(500.0);

        // Distance 400 > boundary 200: idle
        let mut player = grounded_player(100.0);
        enemy.update(&mut player, &blocks, 1000.0, &mut events);
        assert_eq!(enemy.animator.state, ActionState::Idle);

        // Distance 150: chase, stepping toward the player
        let mut player = grounded_player(350.0);
        let x_before = enemy.body.pos.x;
        enemy.update(&mut player, &blocks, 1016.0, &mut events);
        assert_eq!(enemy.animator.state, ActionState::Walk);
        assert_eq!(enemy.direction, -1.0);
        assert!(enemy.body.pos.x < x_before);

        // Distance <= 40: attack, and the first strike lands
        let mut player = grounded_player(470.0);
        let health_before = player.vitals.health;
        enemy.update(&mut player, &blocks, 1032.0, &mut events);
        assert_eq!(enemy.animator.state, ActionState::Attack);
        assert_eq!(player.vitals.health, health_before - enemy.profile.attack_damage);
        assert!(matches!(events.last(), Some(GameEvent::PlayerHurt { .. })));
    }

    #[test]
    fn test_attack_cooldown_gates_damage() {
        let blocks = ground_at(300.0);
        let mut events = Vec::new();
        let mut enemy = grounded_dog(500.0);
        let mut player = grounded_player(470.0);

        enemy.update(&mut player, &blocks, 1000.0, &mut events);
        let after_first = player.vitals.health;

        // Inside the 1000 ms cooldown: no second strike even after the
        // player's own invulnerability would have lapsed
        enemy.update(&mut player, &blocks, 1900.0, &mut events);
        assert_eq!(player.vitals.health, after_first);

        // Cooldown elapsed (player invulnerability from the first hit has
        // lapsed too at +2100 ms)
        enemy.update(&mut player, &blocks, 3100.0, &mut events);
        assert_eq!(player.vitals.health, after_first - enemy.profile.attack_damage);
    }

    #[test]
    fn test_vertical_gap_leaves_state_unchanged() {
        let blocks = ground_at(300.0);
        let mut events = Vec::new();
        let mut enemy = grounded_dog(500.0);

        let mut player = grounded_player(350.0);
        enemy.update(&mut player, &blocks, 1000.0, &mut events);
        assert_eq!(enemy.animator.state, ActionState::Walk);

        // Player far above: disengaged, previous state sticks
        player.body.pos.y = 50.0;
        enemy.update(&mut player, &blocks, 1016.0, &mut events);
        assert_eq!(enemy.animator.state, ActionState::Walk);
    }

    #[test]
    fn test_lethal_hit_starts_death_and_gates_further_hits() {
        let mut enemy = grounded_dog(500.0);
        assert!(enemy.take_hit(100.0, 1000.0));
        assert_eq!(enemy.vitals.health, 0.0);
        assert!(enemy.vitals.is_dying);
        assert_eq!(enemy.animator.state, ActionState::Dead);
        assert_eq!(enemy.speed, 0.0);

        // Hits during the death animation are no-ops
        assert!(!enemy.take_hit(50.0, 1600.0));
        assert_eq!(enemy.vitals.death_start_time, 1000.0);
    }

    #[test]
    fn test_death_completes_after_animation_and_reports_reward() {
        let blocks = ground_at(300.0);
        let mut events = Vec::new();
        let mut player = grounded_player(100.0);
        let mut enemy = grounded_dog(500.0);
        enemy.take_hit(100.0, 1000.0);

        enemy.update(&mut player, &blocks, 1500.0, &mut events);
        assert!(enemy.vitals.is_dying);
        assert!(!enemy.vitals.is_dead);

        enemy.update(&mut player, &blocks, 2000.0, &mut events);
        assert!(enemy.vitals.is_dead);
        assert!(!enemy.vitals.is_dying);
        assert!(events.iter().any(|event| matches!(
            event,
            GameEvent::EnemyDied { profile: "dog", experience: 10 }
        )));
    }

    #[test]
    fn test_nonlethal_hit_flinches_and_knocks_back() {
        let mut enemy = grounded_dog(500.0);
        // Facing right: knockback pushes left
        assert!(enemy.take_hit(25.0, 1000.0));
        assert_eq!(enemy.vitals.health, 75.0);
        assert_eq!(enemy.body.pos.x, 500.0 - enemy.profile.knockback_force);
        assert_eq!(enemy.animator.state, ActionState::Hurt);

        // Re-hit suppression window
        assert!(!enemy.take_hit(25.0, 1200.0));
        assert!(enemy.take_hit(25.0, 1501.0));
        assert_eq!(enemy.vitals.health, 50.0);
    }

    #[test]
    fn test_ranged_profile_spawns_projectile_instead_of_direct_damage() {
        let blocks = ground_at(300.0);
        let mut events = Vec::new();
        let mut enemy = Enemy::spawn(profiles::flying_demon(), Vec2::new(400.0, 252.0));
        let mut player = grounded_player(250.0);

        // Distance 150 <= range 200: fires
        enemy.update(&mut player, &blocks, 1000.0, &mut events);
        assert_eq!(enemy.animator.state, ActionState::Attack);
        assert_eq!(enemy.projectiles.len(), 1);
        assert_eq!(player.vitals.health, player.vitals.max_health);
        assert_eq!(enemy.projectiles[0].direction, -1.0);

        // Let the projectile fly into the player: flat 50% max-health hit
        let mut now = 1000.0;
        for _ in 0..60 {
            now += 16.0;
            enemy.update(&mut player, &blocks, now, &mut events);
            if player.vitals.health < player.vitals.max_health {
                break;
            }
        }
        assert_eq!(player.vitals.health, player.vitals.max_health * 0.5);
        assert!(enemy.projectiles.is_empty() || !enemy.projectiles[0].is_active);
    }

    #[test]
    fn test_unknown_profile_name() {
        assert!(profiles::by_name("nightborne").is_none());
        assert!(profiles::by_name("flying_demon").is_some());
    }

    proptest! {
        /// For a fixed height alignment, state follows distance bands
        /// monotonically: attack, then walk, then idle.
        #[test]
        fn prop_policy_is_distance_monotonic(distance in 0.0f32..600.0) {
            let blocks = ground_at(300.0);
            let mut events = Vec::new();
            let mut enemy = grounded_dog(700.0);
            let mut player = grounded_player(700.0 - distance);

            enemy.update(&mut player, &blocks, 1000.0, &mut events);

            let expected = if distance <= enemy.profile.attack_range {
                ActionState::Attack
            } else if distance <= enemy.profile.boundary_radius {
                ActionState::Walk
            } else {
                ActionState::Idle
            };
            prop_assert_eq!(enemy.animator.state, expected);
        }
    }
}
