//! # Terrain Module
//!
//! Deterministic procedural terrain. A column's surface height comes from
//! fractal value noise; each column is then layered:
//!
//! | world y                         | block                          |
//! |---------------------------------|--------------------------------|
//! | `y < height - 3`                | stone                          |
//! | `height - 3 <= y < height - 1`  | dirt                           |
//! | `y == height - 1`               | surface (stone / sand / grass) |
//! | `height <= y < sea_level`       | water                          |
//! | otherwise                       | air                            |
//!
//! The surface is stone above `mountain_height`, sand below `lowland_height`
//! and grass otherwise. Nothing is generated below world y = 0.

pub mod noise;

use log::trace;
use web_time::Instant;

use crate::config::TerrainConfig;
use crate::engine_state::voxels::block::{block_type::BlockType, BlockId, AIR};
use crate::engine_state::voxels::chunk::{
    Chunk, ChunkCoord, CHUNK_DIMENSION, CHUNK_DIMENSION_I32, CHUNK_PLANE_SIZE, CHUNK_SIZE,
};

use self::noise::FractalNoise;

/// Seeded terrain generator.
///
/// Generation is a pure function of the configuration and the chunk
/// coordinate: there is no cache and no hidden state, so generating the same
/// chunk twice yields byte-identical blocks.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: FractalNoise,
}

impl TerrainGenerator {
    /// Creates a generator for the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        let noise = FractalNoise {
            seed: config.seed,
            octaves: config.octaves,
            frequency: config.noise_scale,
            persistence: config.persistence,
            lacunarity: config.lacunarity,
        };
        TerrainGenerator { config, noise }
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height of the column at `(world_x, world_z)`.
    ///
    /// The topmost terrain block of the column sits at `height - 1`.
    pub fn height(&self, world_x: i32, world_z: i32) -> i32 {
        let n = self.noise.sample(world_x as f64, world_z as f64);
        self.config.base_height + (n * self.config.height_variation).round() as i32
    }

    /// Upper bound (exclusive) on the world y of any generated block, water included.
    pub fn max_height(&self) -> i32 {
        let terrain = self.config.base_height + self.config.height_variation.ceil() as i32;
        terrain.max(self.config.sea_level)
    }

    /// Highest vertical chunk layer that can contain generated blocks, limited
    /// by the world height. Returns `-1` when no layer can hold terrain.
    pub fn top_layer(&self, world_height: i32) -> i32 {
        let top_block = self.max_height().min(world_height) - 1;
        if top_block < 0 {
            -1
        } else {
            top_block.div_euclid(CHUNK_DIMENSION_I32)
        }
    }

    /// The block at `world_y` in a column whose surface height is `height`.
    pub fn block_for(&self, world_y: i32, height: i32) -> BlockId {
        if world_y < 0 {
            return AIR;
        }

        let block_type = if world_y < height - 3 {
            BlockType::STONE
        } else if world_y < height - 1 {
            BlockType::DIRT
        } else if world_y == height - 1 {
            self.surface_for(height)
        } else if world_y < self.config.sea_level {
            BlockType::WATER
        } else {
            BlockType::AIR
        };
        block_type.id()
    }

    /// Surface material chosen by height band.
    fn surface_for(&self, height: i32) -> BlockType {
        if height > self.config.mountain_height {
            BlockType::STONE
        } else if height < self.config.lowland_height {
            BlockType::SAND
        } else {
            BlockType::GRASS
        }
    }

    /// Generates a fresh chunk at `coord`.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let start = Instant::now();
        let mut blocks = vec![AIR; CHUNK_SIZE].into_boxed_slice();

        let origin_x = coord.x * CHUNK_DIMENSION_I32;
        let origin_y = coord.y * CHUNK_DIMENSION_I32;
        let origin_z = coord.z * CHUNK_DIMENSION_I32;

        if origin_y < self.max_height() && origin_y + CHUNK_DIMENSION_I32 > 0 {
            for k in 0..CHUNK_DIMENSION {
                for i in 0..CHUNK_DIMENSION {
                    let height = self.height(origin_x + i as i32, origin_z + k as i32);
                    for j in 0..CHUNK_DIMENSION {
                        let id = self.block_for(origin_y + j as i32, height);
                        blocks[i + j * CHUNK_DIMENSION + k * CHUNK_PLANE_SIZE] = id;
                    }
                }
            }
        }

        let chunk = Chunk::from_blocks(coord, blocks);
        trace!(
            "Generated chunk {:?} ({} blocks) in {:?}",
            coord,
            chunk.non_air_count(),
            start.elapsed()
        );
        chunk
    }

    /// Overwrites every block of an existing chunk with generated terrain.
    pub fn fill_chunk(&self, chunk: &mut Chunk) {
        let generated = self.generate_chunk(chunk.position());
        *chunk = generated;
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(TerrainConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn flat_config() -> TerrainConfig {
        TerrainConfig {
            height_variation: 0.0,
            base_height: 10,
            sea_level: 5,
            lowland_height: 4,
            mountain_height: 100,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn same_seed_same_blocks() {
        let config = TerrainConfig {
            seed: 4242,
            ..TerrainConfig::default()
        };
        let a = TerrainGenerator::new(config.clone()).generate_chunk(Point3::new(3, 3, -9));
        let b = TerrainGenerator::new(config).generate_chunk(Point3::new(3, 3, -9));
        assert_eq!(a.blocks(), b.blocks());
    }

    #[test]
    fn heights_stay_within_variation() {
        let generator = TerrainGenerator::default();
        let config = generator.config().clone();
        for x in (-500..500).step_by(37) {
            for z in (-500..500).step_by(41) {
                let height = generator.height(x, z);
                let deviation = (height - config.base_height).abs() as f64;
                assert!(deviation <= config.height_variation.ceil());
                assert!(height <= generator.max_height());
            }
        }
    }

    #[test]
    fn heights_never_exceed_max_height() {
        let config = TerrainConfig {
            octaves: 3,
            persistence: 0.9,
            lacunarity: 1.5,
            ..TerrainConfig::default()
        };
        assert!(config.validate().is_ok());
        let generator = TerrainGenerator::new(config);
        let mut rng = fastrand::Rng::with_seed(17);
        for _ in 0..4000 {
            let (x, z) = (rng.i32(-2000..2000), rng.i32(-2000..2000));
            assert!(generator.height(x, z) <= generator.max_height());
        }
    }

    #[test]
    fn fill_chunk_matches_generate_chunk() {
        let generator = TerrainGenerator::default();
        let coord = Point3::new(-4, 3, 11);
        let mut chunk = Chunk::new(coord);
        chunk.fill(BlockType::GLASS.id());
        generator.fill_chunk(&mut chunk);

        let generated = generator.generate_chunk(coord);
        assert_eq!(chunk.blocks(), generated.blocks());
        assert_eq!(chunk.non_air_count(), generated.non_air_count());
        assert_eq!(chunk.position(), coord);
    }

    #[test]
    fn flat_column_layers() {
        let generator = TerrainGenerator::new(flat_config());
        let chunk = generator.generate_chunk(Point3::new(0, 0, 0));
        let stone = BlockType::STONE.id();
        let dirt = BlockType::DIRT.id();
        let grass = BlockType::GRASS.id();

        assert_eq!(chunk.get_block(4, 0, 4), stone);
        assert_eq!(chunk.get_block(4, 6, 4), stone);
        assert_eq!(chunk.get_block(4, 7, 4), dirt);
        assert_eq!(chunk.get_block(4, 8, 4), dirt);
        assert_eq!(chunk.get_block(4, 9, 4), grass);
        assert_eq!(chunk.get_block(4, 10, 4), AIR);
        assert_eq!(chunk.non_air_count(), 10 * CHUNK_PLANE_SIZE);
    }

    #[test]
    fn water_fills_below_sea_level() {
        let generator = TerrainGenerator::new(TerrainConfig {
            height_variation: 0.0,
            base_height: 6,
            sea_level: 9,
            lowland_height: 8,
            ..TerrainConfig::default()
        });
        let chunk = generator.generate_chunk(Point3::new(2, 0, 2));
        assert_eq!(chunk.get_block(0, 5, 0), BlockType::SAND.id());
        for y in 6..9 {
            assert_eq!(chunk.get_block(0, y, 0), BlockType::WATER.id());
        }
        assert_eq!(chunk.get_block(0, 9, 0), AIR);
    }

    #[test]
    fn mountains_are_stone_topped() {
        let generator = TerrainGenerator::new(TerrainConfig {
            height_variation: 0.0,
            base_height: 90,
            mountain_height: 80,
            ..TerrainConfig::default()
        });
        assert_eq!(generator.block_for(89, 90), BlockType::STONE.id());
    }

    #[test]
    fn sky_chunks_are_empty() {
        let generator = TerrainGenerator::new(flat_config());
        assert!(generator.generate_chunk(Point3::new(0, 1, 0)).is_empty());
        assert!(generator.generate_chunk(Point3::new(0, -1, 0)).is_empty());
        assert_eq!(generator.top_layer(256), 0);
    }
}
