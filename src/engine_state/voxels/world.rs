//! # World Module
//!
//! This module provides the `World` struct, the top-level owner of the voxel
//! world. It builds the one [`ChunkManager`] from a [`WorldConfig`] and hands
//! out handles to it.
//!
//! ## Architecture
//!
//! Consumers (the renderer, collision queries, a player controller) receive a
//! clone of the manager handle at construction time. Nothing looks the manager
//! up through a global. The world drives the tick; consumers drain the mesh
//! outbox and run queries through their handles on their own schedule.

use log::info;

use crate::config::WorldConfig;
use crate::core::StResource;
use crate::engine_state::voxels::block::material::MaterialTable;
use crate::engine_state::voxels::chunk_manager::{ChunkManager, UpdateStats};
use crate::error::Result;

/// Represents a streamed voxel world around a single viewer.
///
/// # Examples
///
/// ```
/// use voxel_world::{World, WorldConfig};
///
/// let mut config = WorldConfig::default();
/// config.manager.render_distance = 1;
/// let world = World::new(config).unwrap();
///
/// let manager = world.manager_handle();
/// world.tick(0.0, 0.0);
/// assert!(manager.get().loaded_count() > 0);
/// ```
pub struct World {
    config: WorldConfig,
    manager: StResource<ChunkManager>,
}

impl World {
    /// Creates a world with the built-in materials.
    ///
    /// # Errors
    /// Returns [`crate::VoxelError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: WorldConfig) -> Result<Self> {
        Self::with_materials(config, MaterialTable::new())
    }

    /// Creates a world with a custom material table.
    pub fn with_materials(config: WorldConfig, materials: MaterialTable) -> Result<Self> {
        let manager = ChunkManager::new(config.manager.clone(), config.terrain.clone())?
            .with_materials(materials);
        info!("Created world with seed {}", config.terrain.seed);

        Ok(World {
            config,
            manager: StResource::new(manager),
        })
    }

    /// A handle to the world's chunk manager.
    ///
    /// Every handle refers to the same manager.
    pub fn manager_handle(&self) -> StResource<ChunkManager> {
        self.manager.clone()
    }

    /// Runs one streaming and meshing update for a viewer at `(viewer_x, viewer_z)`.
    pub fn tick(&self, viewer_x: f64, viewer_z: f64) -> UpdateStats {
        self.manager.get_mut().update(viewer_x, viewer_z)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_share_the_single_manager() {
        let mut config = WorldConfig::default();
        config.manager.render_distance = 1;
        let world = World::new(config).unwrap();

        let renderer_handle = world.manager_handle();
        let collision_handle = world.manager_handle();
        assert!(renderer_handle.ptr_eq(&collision_handle));

        let stats = world.tick(0.0, 0.0);
        assert_eq!(collision_handle.get().loaded_count(), stats.loaded);
        assert_eq!(renderer_handle.get_mut().drain_events().len(), stats.meshed);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = WorldConfig::default();
        config.manager.mesh_budget_per_frame = 0;
        assert!(World::new(config).is_err());
    }
}
