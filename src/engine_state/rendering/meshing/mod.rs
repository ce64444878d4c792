//! Mesh generation and hand-off for voxel rendering.
//!
//! This module handles the conversion of voxel data into triangle meshes and
//! the bookkeeping around it:
//! - `mesh/`: the greedy and simple meshers and the [`ChunkMesh`] they produce
//! - [`MeshQueue`]: the FIFO of chunks waiting to be meshed
//! - [`HeadlessRenderer`]: a consumer of the chunk manager's mesh outbox
//!
//! # Performance Considerations
//! - Greedy meshing minimizes vertex count
//! - Meshing is bounded per update; excess work waits in the queue

pub mod mesh;
pub mod mesh_queue;
pub mod renderer;

pub use mesh::{ChunkMesh, Face, GreedyMesher, Mesher, NeighborSampler, SimpleMesher};
pub use mesh_queue::MeshQueue;
pub use renderer::{Drawable, HeadlessRenderer};
