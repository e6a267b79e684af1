//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure and headless:
//! - Driven by an external tick source (the host's animation callback)
//! - Timed behavior via (start-timestamp, duration) pairs, never waits
//! - Per entity, strictly sequential physics -> AI/state -> animation
//! - No rendering or platform dependencies

pub mod animation;
pub mod combat;
pub mod enemy;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod world;

pub use animation::{ActionState, Animator, Clip, ClipSet};
pub use combat::Vitals;
pub use enemy::{AttackKind, BehaviorProfile, Enemy};
pub use geometry::{Aabb, OverlapDepths, ResolveAxis};
pub use level::{CollisionBlock, EnemySpawn, Level, LevelData, builtin_levels};
pub use physics::{Body, ResolvePolicy};
pub use pickup::HealthPickup;
pub use player::{InputState, Player};
pub use projectile::Projectile;
pub use world::{GameEvent, SpriteView, World, WorldView};
