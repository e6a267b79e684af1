//! Level data, collision-tile generation and the scrolling camera
//!
//! A level is described by a compact `LevelData` record: map dimensions, a
//! player start position, a flat row-major collision sequence, enemy spawn
//! specs and optional health pickup positions. The host may supply these as
//! JSON; two built-in levels are defined in code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{COLLISION_MAP_COLUMNS, TILE_SIZE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

use super::geometry::Aabb;
use super::physics::Body;

/// A static 16x16 solid tile. Immutable after level load; entities only
/// read it during collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBlock {
    pub pos: Vec2,
}

impl CollisionBlock {
    pub const SIZE: f32 = TILE_SIZE;

    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(Self::SIZE))
    }
}

/// One enemy spawn spec: a behavior profile name plus every position an
/// instance should appear at. Unknown profile names are skipped at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub profile: String,
    pub positions: Vec<Vec2>,
}

/// Complete static description of one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    /// Background/map dimensions in pixels
    pub map_width: f32,
    pub map_height: f32,
    /// Where the player is placed on load and respawn
    pub start_position: Vec2,
    /// Row-major tile values; > 1 marks a solid tile. Chunked into
    /// `COLLISION_MAP_COLUMNS`-wide rows before coordinates are derived.
    pub collision_map: Vec<u8>,
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub health_pickup_positions: Vec<Vec2>,
}

impl LevelData {
    /// Parse a host-supplied level record from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Expand a flat collision sequence into solid blocks.
///
/// The sequence is chunked into fixed-width rows; any value greater than 1
/// becomes a 16x16 block at `(col * 16, row * 16)`. A trailing partial row
/// is kept as-is.
pub fn generate_collision_blocks(collision_map: &[u8]) -> Vec<CollisionBlock> {
    let mut blocks = Vec::new();
    for (row, chunk) in collision_map.chunks(COLLISION_MAP_COLUMNS).enumerate() {
        for (col, &value) in chunk.iter().enumerate() {
            if value > 1 {
                blocks.push(CollisionBlock::new(Vec2::new(
                    col as f32 * TILE_SIZE,
                    row as f32 * TILE_SIZE,
                )));
            }
        }
    }
    blocks
}

/// A loaded level: static geometry plus the camera.
///
/// Replaced wholesale on every level transition or respawn; geometry is
/// never mutated at runtime.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub camera: Vec2,
    pub blocks: Vec<CollisionBlock>,
}

impl Level {
    pub fn new(data: &LevelData) -> Self {
        Self {
            name: data.name.clone(),
            width: data.map_width,
            height: data.map_height,
            camera: Vec2::ZERO,
            blocks: generate_collision_blocks(&data.collision_map),
        }
    }

    /// Center the camera on the player, clamped to the map bounds
    pub fn update_camera(&mut self, player: &Body) {
        let target = player.pos + player.size / 2.0
            - Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0);
        let max = Vec2::new(
            (self.width - VIEWPORT_WIDTH).max(0.0),
            (self.height - VIEWPORT_HEIGHT).max(0.0),
        );
        self.camera = target.clamp(Vec2::ZERO, max);
    }

    /// Whether a rectangle lies fully inside the map
    pub fn in_bounds(&self, rect: &Aabb) -> bool {
        rect.pos.x >= 0.0
            && rect.right() <= self.width
            && rect.pos.y >= 0.0
            && rect.bottom() <= self.height
    }
}

/// Build a collision map with solid ground from `ground_row` down, plus
/// free-standing platform strips given as `(row, col_start, col_end)`.
fn terrain(rows: usize, ground_row: usize, platforms: &[(usize, usize, usize)]) -> Vec<u8> {
    let mut map = vec![0u8; rows * COLLISION_MAP_COLUMNS];
    for row in ground_row..rows {
        for col in 0..COLLISION_MAP_COLUMNS {
            map[row * COLLISION_MAP_COLUMNS + col] = 2;
        }
    }
    for &(row, start, end) in platforms {
        for col in start..end.min(COLLISION_MAP_COLUMNS) {
            map[row * COLLISION_MAP_COLUMNS + col] = 2;
        }
    }
    map
}

/// The shipped level sequence
pub fn builtin_levels() -> Vec<LevelData> {
    vec![
        LevelData {
            name: "Hollow Woods".to_string(),
            map_width: COLLISION_MAP_COLUMNS as f32 * TILE_SIZE,
            map_height: 44.0 * TILE_SIZE,
            start_position: Vec2::new(100.0, 480.0),
            // Ground at y=640 with two hop-up ledges
            collision_map: terrain(44, 40, &[(36, 50, 60), (34, 90, 98)]),
            enemies: vec![
                EnemySpawn {
                    profile: "dog".to_string(),
                    positions: vec![Vec2::new(500.0, 560.0), Vec2::new(1100.0, 560.0)],
                },
                EnemySpawn {
                    profile: "goblin".to_string(),
                    positions: vec![Vec2::new(1800.0, 540.0)],
                },
            ],
            health_pickup_positions: vec![Vec2::new(850.0, 600.0)],
        },
        LevelData {
            name: "Ember Gate".to_string(),
            map_width: COLLISION_MAP_COLUMNS as f32 * TILE_SIZE,
            map_height: 44.0 * TILE_SIZE,
            start_position: Vec2::new(80.0, 480.0),
            collision_map: terrain(44, 40, &[(35, 70, 82)]),
            enemies: vec![EnemySpawn {
                profile: "flying_demon".to_string(),
                positions: vec![Vec2::new(700.0, 520.0), Vec2::new(1500.0, 500.0)],
            }],
            health_pickup_positions: vec![Vec2::new(1000.0, 600.0)],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_map_decoding() {
        // One solid tile at (col 3, row 1); values <= 1 never produce blocks
        let mut map = vec![0u8; COLLISION_MAP_COLUMNS * 2];
        map[COLLISION_MAP_COLUMNS + 3] = 2;
        map[5] = 1;

        let blocks = generate_collision_blocks(&map);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].pos, Vec2::new(48.0, 16.0));
    }

    #[test]
    fn test_partial_trailing_row() {
        let mut map = vec![0u8; COLLISION_MAP_COLUMNS + 10];
        map[COLLISION_MAP_COLUMNS + 9] = 3;
        let blocks = generate_collision_blocks(&map);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].pos, Vec2::new(144.0, 16.0));
    }

    #[test]
    fn test_camera_clamps_to_map() {
        let data = &builtin_levels()[0];
        let mut level = Level::new(data);
        let mut player = Body::new(Vec2::new(0.0, 0.0), Vec2::new(44.0, 80.0), 0.3);

        // Player at map origin: camera pinned to the top-left corner
        level.update_camera(&player);
        assert_eq!(level.camera, Vec2::ZERO);

        // Player at the far edge: camera pinned to the max scroll extent
        player.pos = Vec2::new(level.width - 50.0, level.height - 90.0);
        level.update_camera(&player);
        assert_eq!(level.camera.x, level.width - crate::consts::VIEWPORT_WIDTH);
        assert_eq!(level.camera.y, level.height - crate::consts::VIEWPORT_HEIGHT);
    }

    #[test]
    fn test_level_data_from_json() {
        let json = r#"{
            "name": "custom",
            "map_width": 3200.0,
            "map_height": 704.0,
            "start_position": [100.0, 480.0],
            "collision_map": [0, 0, 2, 3],
            "enemies": [{ "profile": "dog", "positions": [[500.0, 200.0]] }]
        }"#;
        let data = LevelData::from_json(json).expect("valid level json");
        assert_eq!(data.name, "custom");
        assert_eq!(data.enemies[0].profile, "dog");
        // health_pickup_positions defaults to empty when omitted
        assert!(data.health_pickup_positions.is_empty());
        assert_eq!(generate_collision_blocks(&data.collision_map).len(), 2);
    }

    #[test]
    fn test_builtin_levels_have_ground_under_spawns() {
        for data in builtin_levels() {
            let level = Level::new(&data);
            assert!(!level.blocks.is_empty());
            assert!(data.start_position.x >= 0.0 && data.start_position.x < data.map_width);
            for spawn in &data.enemies {
                assert!(!spawn.positions.is_empty());
            }
        }
    }
}
