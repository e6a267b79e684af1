//! Emberknight headless driver
//!
//! Runs the simulation core for a few scripted seconds at 60 Hz and logs
//! the events it emits. The real game embeds the library behind a renderer
//! and an input source; this binary exists to exercise the core end to end.

use emberknight::{GameEvent, InputState, World, builtin_levels};

/// Milliseconds per tick at 60 Hz
const TICK_MS: f64 = 1000.0 / 60.0;

fn main() {
    env_logger::init();
    log::info!("emberknight core starting (headless demo)");

    let mut world = World::new(builtin_levels());
    let mut now = 0.0;

    // Scripted input: run right the whole time, swing every half second
    for tick in 0u64..1800 {
        now += TICK_MS;
        let input = InputState {
            right: true,
            attack: tick % 30 == 0,
            ..Default::default()
        };

        world.update(&input, now);

        for event in world.drain_events() {
            match event {
                GameEvent::AttackLanded { damage } => {
                    log::debug!("attack landed for {damage}")
                }
                GameEvent::PlayerHurt { damage } => log::info!("player hurt for {damage}"),
                GameEvent::EnemyDied { profile, experience } => {
                    log::info!("{profile} died, +{experience} xp")
                }
                GameEvent::PickupCollected { restored } => {
                    log::info!("picked up a health kit (+{restored})")
                }
                GameEvent::LevelLoaded { index, name } => {
                    log::info!("level {index} loaded: {name}")
                }
                GameEvent::LevelAdvanced { index } => log::info!("advanced to level {index}"),
                GameEvent::PlayerRespawned { lives_left } => {
                    log::info!("respawned with {lives_left} lives left")
                }
                GameEvent::GameOver => log::info!("game over"),
            }
        }
    }

    let view = world.render_view();
    log::info!(
        "demo finished on '{}': player at {:?} with {:.0}% health, {} enemies alive",
        view.level_name,
        view.player.pos,
        view.player.health_ratio * 100.0,
        view.enemies.len(),
    );
}
