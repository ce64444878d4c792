//! Naive meshing: one unit quad per exposed block face.
//!
//! Used to cross-check the greedy mesher. Both must cover the same surface
//! area; only the quad count differs.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, material::MaterialTable},
    chunk::Chunk,
};

use super::{
    face::Face,
    mesh::ChunkMesh,
    sampler::{face_visible, neighbor_block, NeighborSampler},
    Mesher,
};

/// Mesher that never merges faces.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleMesher;

impl Mesher for SimpleMesher {
    fn mesh(
        &self,
        chunk: &Chunk,
        materials: &MaterialTable,
        sampler: Option<&dyn NeighborSampler>,
    ) -> ChunkMesh {
        let mut mesh = ChunkMesh::empty(chunk.position());
        let origin = chunk.world_origin();

        for (position, block) in chunk.iter_blocks() {
            for side in BlockSide::all() {
                let neighbor = side.neighbor_of(position);
                let neighbor = neighbor_block(chunk, neighbor.x, neighbor.y, neighbor.z, sampler);
                if face_visible(materials, block, neighbor) {
                    let face = Face::unit(position, block, side);
                    mesh.push_face(&face, origin, materials.get(block));
                }
            }
        }

        mesh
    }
}
