//! # Configuration Module
//!
//! Configuration consumed by the chunk manager and the terrain generator. Every
//! struct deserializes from JSON with per-field defaults, so a config file only
//! needs to name the values it changes.
//!
//! ```json
//! {
//!     "manager": { "render_distance": 6, "mesh_budget_per_frame": 8 },
//!     "terrain": { "seed": 1234, "octaves": 5 }
//! }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;
use crate::error::{Result, VoxelError};

/// Upper bound on `render_distance`, in chunks.
pub const MAX_RENDER_DISTANCE: i32 = 1024;

/// Streaming and meshing limits for the chunk manager.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ManagerConfig {
    /// Radius, in chunks, of the circular neighborhood kept loaded around the viewer.
    pub render_distance: i32,
    /// Edge length of a chunk in blocks. Must equal `CHUNK_DIMENSION`.
    pub chunk_size: usize,
    /// Height of the world in blocks; caps the vertical chunk layers that are loaded.
    pub world_height: i32,
    /// Budget for resident chunks (loaded plus retained edited chunks).
    pub max_chunks_in_memory: usize,
    /// Maximum number of mesh-queue entries drained per update.
    pub mesh_budget_per_frame: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig {
            render_distance: 8,
            chunk_size: CHUNK_DIMENSION,
            world_height: 256,
            max_chunks_in_memory: 4096,
            mesh_budget_per_frame: 4,
        }
    }
}

impl ManagerConfig {
    /// Checks the invariants the manager relies on.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_RENDER_DISTANCE).contains(&self.render_distance) {
            return Err(VoxelError::InvalidConfig(format!(
                "render_distance must be within 0..={}, got {}",
                MAX_RENDER_DISTANCE, self.render_distance
            )));
        }
        if self.chunk_size != CHUNK_DIMENSION {
            return Err(VoxelError::InvalidConfig(format!(
                "chunk_size must be {}, got {}",
                CHUNK_DIMENSION, self.chunk_size
            )));
        }
        if self.world_height <= 0 {
            return Err(VoxelError::InvalidConfig(format!(
                "world_height must be positive, got {}",
                self.world_height
            )));
        }
        if self.mesh_budget_per_frame == 0 {
            return Err(VoxelError::InvalidConfig(
                "mesh_budget_per_frame must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the procedural terrain generator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// World seed. Identical seeds produce identical terrain.
    pub seed: u32,
    /// Terrain height where the noise is zero.
    pub base_height: i32,
    /// Maximum deviation of the surface from `base_height`, in blocks.
    pub height_variation: f64,
    /// Frequency of the first octave, in cycles per block.
    pub noise_scale: f64,
    /// Number of noise octaves summed.
    pub octaves: u32,
    /// Amplitude multiplier applied per octave.
    pub persistence: f64,
    /// Frequency multiplier applied per octave.
    pub lacunarity: f64,
    /// Columns whose surface is below this height are topped up with water.
    pub sea_level: i32,
    /// Surfaces above this height are bare stone.
    pub mountain_height: i32,
    /// Surfaces below this height are sand.
    pub lowland_height: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            seed: 0,
            base_height: 64,
            height_variation: 24.0,
            noise_scale: 0.01,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            sea_level: 60,
            mountain_height: 80,
            lowland_height: 62,
        }
    }
}

impl TerrainConfig {
    /// Checks the invariants the generator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 {
            return Err(VoxelError::InvalidConfig(
                "octaves must be at least 1".to_string(),
            ));
        }
        if !(self.noise_scale > 0.0) {
            return Err(VoxelError::InvalidConfig(format!(
                "noise_scale must be positive, got {}",
                self.noise_scale
            )));
        }
        if !(self.persistence > 0.0) {
            return Err(VoxelError::InvalidConfig(format!(
                "persistence must be positive, got {}",
                self.persistence
            )));
        }
        if !(self.lacunarity > 0.0) {
            return Err(VoxelError::InvalidConfig(format!(
                "lacunarity must be positive, got {}",
                self.lacunarity
            )));
        }
        if !(self.height_variation >= 0.0) {
            return Err(VoxelError::InvalidConfig(format!(
                "height_variation must not be negative, got {}",
                self.height_variation
            )));
        }
        Ok(())
    }
}

/// Complete configuration of a [`crate::World`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk manager settings.
    pub manager: ManagerConfig,
    /// Terrain generator settings.
    pub terrain: TerrainConfig,
}

impl WorldConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded world configuration from {}", path.display());
        Ok(config)
    }

    /// Validates both halves of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.manager.validate()?;
        self.terrain.validate()
    }
}
