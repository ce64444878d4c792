#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! Streaming, procedural generation and greedy meshing for a chunked voxel world.
//!
//! ## Key Modules
//!
//! * `core` - The shared handle type used to hand one chunk manager to many consumers
//! * `config` - JSON-backed configuration for the manager and the terrain generator
//! * `engine_state` - Chunks, terrain, the chunk manager, and mesh generation
//!
//! ## Architecture
//!
//! A [`World`] owns one [`ChunkManager`]. Each tick the manager loads the chunks
//! around the viewer (generating them with the [`TerrainGenerator`]), drops the ones
//! that fell out of range, and meshes a bounded number of dirty chunks with the
//! [`GreedyMesher`]. Finished meshes are not pushed anywhere: they wait in an outbox
//! of [`MeshEvent`]s that the renderer drains through its own handle.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_world::{HeadlessRenderer, World, WorldConfig};
//!
//! let mut config = WorldConfig::default();
//! config.manager.render_distance = 2;
//! let world = World::new(config).unwrap();
//! let mut renderer = HeadlessRenderer::new(world.manager_handle());
//!
//! for step in 0..10 {
//!     world.tick(step as f64 * 4.0, 0.0);
//!     renderer.sync();
//! }
//! assert!(renderer.drawable_count() > 0);
//! ```

use log::info;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

pub use config::{ManagerConfig, TerrainConfig, WorldConfig};
pub use engine_state::rendering::meshing::{
    ChunkMesh, Drawable, Face, GreedyMesher, HeadlessRenderer, MeshQueue, Mesher, NeighborSampler,
    SimpleMesher,
};
pub use engine_state::voxels::{
    block::{
        block_side::BlockSide,
        block_type::BlockType,
        material::{Material, MaterialTable},
        BlockId, AIR,
    },
    chunk::{
        chunk_coord_of, chunk_serialization::SerializedChunk, Chunk, ChunkCoord, CHUNK_DIMENSION,
        CHUNK_SIZE,
    },
    chunk_manager::{ChunkManager, MeshEvent, UpdateStats},
    terrain::TerrainGenerator,
    world::World,
};
pub use error::{Result, VoxelError};

/// Installs the `env_logger` backend, writing to stdout.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`. Calling
/// this more than once is harmless.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    let initialized = log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if initialized {
        info!("Logger initialized");
    }
}
