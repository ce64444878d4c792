//! Mesh generation for voxel rendering.
//!
//! This module converts chunk contents into GPU-friendly triangle meshes. The greedy
//! mesher reduces the number of vertices by combining coplanar faces with the same
//! material; the simple mesher emits every exposed face on its own and is kept for
//! validation and benchmarking.
//!
//! # Architecture
//! - [`ChunkMesh`]: Flat position, normal, colour and index arrays for one chunk
//! - [`Face`]: A rectangular quad on one side of one or more blocks
//! - [`Mesher`]: The interface both meshers implement
//! - [`NeighborSampler`]: Supplies blocks from neighboring chunks so boundary faces can be culled
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_world::{Chunk, GreedyMesher, MaterialTable, Mesher};
//!
//! let mut chunk = Chunk::new(Point3::new(0, 0, 0));
//! chunk.set_block(8, 8, 8, 1);
//! let mesh = GreedyMesher.mesh(&chunk, &MaterialTable::new(), None);
//! assert_eq!(mesh.vertex_count, 24);
//! ```

mod face;
mod greedy;
mod mesh;
mod sampler;
mod simple;

pub use face::Face;
pub use greedy::GreedyMesher;
pub use mesh::ChunkMesh;
pub use sampler::{face_visible, NeighborSampler};
pub use simple::SimpleMesher;

use crate::engine_state::voxels::{block::material::MaterialTable, chunk::Chunk};

/// Converts one chunk into a [`ChunkMesh`].
pub trait Mesher {
    /// Meshes `chunk`. Blocks outside the chunk come from `sampler`; with no
    /// sampler they count as air, so the chunk's outer faces are emitted.
    fn mesh(
        &self,
        chunk: &Chunk,
        materials: &MaterialTable,
        sampler: Option<&dyn NeighborSampler>,
    ) -> ChunkMesh;
}
