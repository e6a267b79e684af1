//! Level/entity lifecycle controller
//!
//! Owns the level sequence, the player, the live enemy collection and the
//! pickups, and drives one simulation tick in a fixed order: camera ->
//! static blocks (inert) -> enemies -> player -> pickups -> level-complete
//! check. The player updates after every enemy so its attack hit-test sees
//! post-move enemy positions.
//!
//! Side effects the host cares about (audio cues, experience rewards, HUD
//! changes) surface as `GameEvent`s drained once per frame.

use glam::Vec2;

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

use super::animation::ActionState;
use super::enemy::{Enemy, profiles};
use super::level::{Level, LevelData};
use super::pickup::HealthPickup;
use super::player::{InputState, PLAYER_LIVES, Player};

/// Simulation-side occurrences for the audio/reward/HUD collaborators.
/// The core never consumes a return value from any of them.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelLoaded { index: usize, name: String },
    LevelAdvanced { index: usize },
    /// The player's melee attack connected
    AttackLanded { damage: f32 },
    PlayerHurt { damage: f32 },
    /// An enemy finished dying; `experience` is the kill reward
    EnemyDied { profile: &'static str, experience: u32 },
    PickupCollected { restored: f32 },
    PlayerRespawned { lives_left: u32 },
    GameOver,
}

/// Read-only drawable snapshot of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteView {
    pub pos: Vec2,
    pub size: Vec2,
    pub state: ActionState,
    pub frame_index: u32,
    pub facing_right: bool,
    /// Hit-flash tint is active
    pub hit_flash: bool,
    /// Remaining health as a 0..=1 fraction (1 for non-combat entities)
    pub health_ratio: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct WorldView {
    pub camera: Vec2,
    pub level_name: String,
    pub lives: u32,
    pub player: SpriteView,
    pub enemies: Vec<SpriteView>,
    pub projectiles: Vec<SpriteView>,
    pub pickups: Vec<SpriteView>,
}

/// The top-level orchestrator; created once at game start and re-seeded
/// (blocks, enemies, pickups) on every level load or respawn.
#[derive(Debug)]
pub struct World {
    levels: Vec<LevelData>,
    pub current_level_index: usize,
    pub level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<HealthPickup>,
    events: Vec<GameEvent>,
}

impl World {
    /// Build a world over an ordered level sequence and load the first
    /// level. An empty sequence gets a blank single-screen level.
    pub fn new(levels: Vec<LevelData>) -> Self {
        let levels = if levels.is_empty() {
            log::warn!("no levels supplied, using an empty map");
            vec![LevelData {
                name: "empty".to_string(),
                map_width: VIEWPORT_WIDTH,
                map_height: VIEWPORT_HEIGHT,
                start_position: Vec2::ZERO,
                collision_map: Vec::new(),
                enemies: Vec::new(),
                health_pickup_positions: Vec::new(),
            }]
        } else {
            levels
        };

        let mut world = Self {
            level: Level::new(&levels[0]),
            player: Player::new(levels[0].start_position),
            levels,
            current_level_index: 0,
            enemies: Vec::new(),
            pickups: Vec::new(),
            events: Vec::new(),
        };
        world.load_current_level();
        world
    }

    /// Rebuild the current level wholesale: fresh geometry and camera,
    /// player at the start position, enemies and pickups respawned from
    /// the level spec. Unknown enemy profile names spawn nothing.
    pub fn load_current_level(&mut self) {
        let data = self.levels[self.current_level_index].clone();

        self.level = Level::new(&data);
        self.player.body.pos = data.start_position;

        self.enemies.clear();
        for spawn in &data.enemies {
            let Some(profile) = profiles::by_name(&spawn.profile) else {
                log::warn!("unknown enemy profile '{}', skipping spawn", spawn.profile);
                continue;
            };
            for &position in &spawn.positions {
                self.enemies.push(Enemy::spawn(profile.clone(), position));
            }
        }

        self.pickups = data
            .health_pickup_positions
            .iter()
            .map(|&pos| HealthPickup::new(pos))
            .collect();

        log::info!(
            "loaded level {} '{}': {} blocks, {} enemies, {} pickups",
            self.current_level_index,
            data.name,
            self.level.blocks.len(),
            self.enemies.len(),
            self.pickups.len(),
        );
        self.events.push(GameEvent::LevelLoaded {
            index: self.current_level_index,
            name: data.name,
        });
    }

    /// Advance to the next level if there is one; returns whether the
    /// index moved. A no-op at the last level.
    pub fn next_level(&mut self) -> bool {
        if self.current_level_index < self.levels.len() - 1 {
            self.current_level_index += 1;
            self.load_current_level();
            self.events
                .push(GameEvent::LevelAdvanced { index: self.current_level_index });
            true
        } else {
            false
        }
    }

    /// One simulation tick
    pub fn update(&mut self, input: &InputState, now: f64) {
        // Camera follows the player; collision blocks are static and inert
        self.level.update_camera(&self.player.body);

        // Enemies: prune last tick's dead (preserving relative order),
        // then physics -> AI -> state machine -> animation each
        self.enemies.retain(|enemy| !enemy.vitals.is_dead);
        for enemy in &mut self.enemies {
            enemy.update(&mut self.player, &self.level.blocks, now, &mut self.events);
        }

        // Player runs after all enemies so the melee hit-test sees their
        // post-move positions
        let landed = self
            .player
            .update(input, &mut self.enemies, &self.level.blocks, now);
        for damage in landed {
            self.events.push(GameEvent::AttackLanded { damage });
        }

        // Death sequencing: once the dead clip has played out, either
        // burn a life and reload, or soft-restart the whole game
        if self.player.death_complete(now) {
            if self.player.lives > 0 {
                self.player.lives -= 1;
                let start = self.levels[self.current_level_index].start_position;
                self.player.respawn(start, now);
                self.load_current_level();
                self.events
                    .push(GameEvent::PlayerRespawned { lives_left: self.player.lives });
                log::info!("player respawned, {} lives left", self.player.lives);
            } else {
                self.game_over(now);
            }
        }

        // Pickups: animate, collect, prune
        for pickup in &mut self.pickups {
            if let Some(restored) = pickup.update(&mut self.player, now) {
                self.events.push(GameEvent::PickupCollected { restored });
            }
        }
        self.pickups.retain(|pickup| pickup.is_active);

        // Level completion is purely enemy-count-driven
        if self.enemies.is_empty() {
            self.next_level();
        }
    }

    /// Reset the run: first level, full lives and health, back to idle
    fn game_over(&mut self, now: f64) {
        log::info!("game over, soft restart");
        self.current_level_index = 0;
        self.player.lives = PLAYER_LIVES;
        self.player.respawn(self.levels[0].start_position, now);
        self.load_current_level();
        self.events.push(GameEvent::GameOver);
    }

    /// Take this frame's accumulated events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only snapshots for the rendering collaborator
    pub fn render_view(&self) -> WorldView {
        let player = SpriteView {
            pos: self.player.body.pos,
            size: self.player.body.size,
            state: self.player.state(),
            frame_index: self.player.animator.frame_index,
            facing_right: self.player.facing_right,
            hit_flash: self.player.vitals.is_hit,
            health_ratio: self.player.vitals.health / self.player.vitals.max_health,
        };

        let enemies = self
            .enemies
            .iter()
            .map(|enemy| SpriteView {
                pos: enemy.body.pos,
                size: enemy.body.size,
                state: enemy.animator.state,
                frame_index: enemy.animator.frame_index,
                facing_right: enemy.direction > 0.0,
                hit_flash: enemy.vitals.is_hit,
                health_ratio: enemy.vitals.health / enemy.vitals.max_health,
            })
            .collect();

        let projectiles = self
            .enemies
            .iter()
            .flat_map(|enemy| enemy.projectiles.iter())
            .filter(|fire| fire.is_active)
            .map(|fire| SpriteView {
                pos: fire.pos,
                size: fire.size,
                state: ActionState::Idle,
                frame_index: 0,
                facing_right: fire.direction > 0.0,
                hit_flash: false,
                health_ratio: 1.0,
            })
            .collect();

        let pickups = self
            .pickups
            .iter()
            .map(|pickup| SpriteView {
                pos: pickup.pos,
                size: super::pickup::PICKUP_SIZE,
                state: ActionState::Idle,
                frame_index: pickup.frame_index,
                facing_right: true,
                hit_flash: false,
                health_ratio: 1.0,
            })
            .collect();

        WorldView {
            camera: self.level.camera,
            level_name: self.level.name.clone(),
            lives: self.player.lives,
            player,
            enemies,
            projectiles,
            pickups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::builtin_levels;

    fn world() -> World {
        World::new(builtin_levels())
    }

    #[test]
    fn test_new_loads_first_level() {
        let mut world = world();
        assert_eq!(world.current_level_index, 0);
        assert!(!world.level.blocks.is_empty());
        // Two dogs and a goblin
        assert_eq!(world.enemies.len(), 3);
        assert_eq!(world.pickups.len(), 1);
        assert_eq!(world.player.body.pos, world.levels[0].start_position);
        assert!(matches!(
            world.drain_events().first(),
            Some(GameEvent::LevelLoaded { index: 0, .. })
        ));
    }

    #[test]
    fn test_next_level_advances_and_regenerates() {
        let mut world = world();
        assert!(world.next_level());
        assert_eq!(world.current_level_index, 1);
        // Level 2 spawns flying demons only
        assert_eq!(world.enemies.len(), 2);
        assert!(world.enemies.iter().all(|e| e.profile.name == "flying_demon"));

        // Last level: no-op
        assert!(!world.next_level());
        assert_eq!(world.current_level_index, 1);
    }

    #[test]
    fn test_unknown_profile_spawns_nothing() {
        let mut data = builtin_levels();
        data[0].enemies[0].profile = "nightborne".to_string();
        let world = World::new(data);
        // The two dog spawns are skipped; only the goblin remains
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].profile.name, "goblin");
    }

    #[test]
    fn test_prune_removes_exactly_the_dead_and_keeps_order() {
        let mut world = world();
        let survivors: Vec<Vec2> = world
            .enemies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, e)| e.body.pos)
            .collect();
        world.enemies[1].vitals.complete_death();

        world.update(&InputState::default(), 1000.0);

        assert_eq!(world.enemies.len(), 2);
        let remaining: Vec<Vec2> = world.enemies.iter().map(|e| e.body.pos).collect();
        // Relative order preserved (positions may have shifted by at most
        // one AI step horizontally; spawns are far apart so compare x order)
        assert!(remaining[0].x < remaining[1].x);
        assert_eq!(remaining.len(), survivors.len());
    }

    #[test]
    fn test_clearing_all_enemies_advances_the_level() {
        let mut world = world();
        for enemy in &mut world.enemies {
            enemy.vitals.complete_death();
        }

        world.update(&InputState::default(), 1000.0);

        assert_eq!(world.current_level_index, 1);
        let events = world.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::LevelAdvanced { index: 1 })));
        // Fresh population from the new level's spec
        assert_eq!(world.enemies.len(), 2);
    }

    #[test]
    fn test_player_death_burns_a_life_and_reloads() {
        let mut world = world();
        // Move the player off the start so the reload is observable
        world.player.body.pos.x += 300.0;
        world.player.die(1000.0);

        // Dead clip is 600 ms; before that, nothing resolves
        world.update(&InputState::default(), 1500.0);
        assert!(world.player.vitals.is_dying);

        world.update(&InputState::default(), 1700.0);
        assert_eq!(world.player.lives, 2);
        assert!(world.player.vitals.alive());
        assert_eq!(world.player.vitals.health, world.player.vitals.max_health);
        assert_eq!(world.player.body.pos, world.levels[0].start_position);
        assert!(world
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerRespawned { lives_left: 2 })));
    }

    #[test]
    fn test_game_over_soft_restarts() {
        let mut world = world();
        world.next_level();
        world.player.lives = 0;
        world.player.die(1000.0);

        world.update(&InputState::default(), 1700.0);

        assert_eq!(world.current_level_index, 0);
        assert_eq!(world.player.lives, PLAYER_LIVES);
        assert!(world.player.vitals.alive());
        assert_eq!(world.player.state(), ActionState::Idle);
        assert!(world.drain_events().iter().any(|e| matches!(e, GameEvent::GameOver)));
    }

    #[test]
    fn test_render_view_snapshots() {
        let mut world = world();
        world.update(&InputState::default(), 1000.0);
        let view = world.render_view();
        assert_eq!(view.enemies.len(), world.enemies.len());
        assert_eq!(view.lives, 3);
        assert_eq!(view.level_name, "Hollow Woods");
        assert_eq!(view.player.size, world.player.body.size);
        // Camera stays inside the map
        assert!(view.camera.x >= 0.0 && view.camera.y >= 0.0);
    }

    #[test]
    fn test_smoke_run() {
        let mut world = world();
        let input = InputState { right: true, ..Default::default() };
        let mut now = 0.0;
        for _ in 0..300 {
            now += 16.0;
            world.update(&input, now);
        }
        // Player walked right (or was just rehomed by a reload) and is on
        // or above the ground
        assert!(world.player.body.pos.x >= world.levels[0].start_position.x);
        assert!(world.player.body.pos.y <= world.level.height - world.player.body.size.y);
        world.drain_events();
    }
}
