//! Greedy meshing implementation for voxel rendering.
//!
//! This module implements the greedy meshing algorithm which combines adjacent coplanar
//! faces with the same material into larger quads, significantly reducing the number of
//! vertices needed to render a voxel world.
//!
//! For each of the six sides the chunk is swept one layer at a time. Each layer produces
//! an S x S mask of signed tokens (`±(block + 1)`, zero where no face is drawn), and the
//! mask is then consumed row by row: a run is grown along `u` while the token matches,
//! then along `v` while the whole run matches, and the rectangle becomes one quad.

use log::trace;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, is_air, material::MaterialTable, BlockId},
    chunk::{Chunk, CHUNK_DIMENSION, CHUNK_DIMENSION_I32, CHUNK_PLANE_SIZE},
};

use super::{
    face::Face,
    mesh::ChunkMesh,
    sampler::{face_visible, neighbor_block, NeighborSampler},
    Mesher,
};

/// Mesher that merges coplanar same-material faces into maximal rectangles.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyMesher;

impl GreedyMesher {
    /// Fills `mask` with the face tokens of one layer.
    fn build_mask(
        chunk: &Chunk,
        materials: &MaterialTable,
        sampler: Option<&dyn NeighborSampler>,
        side: BlockSide,
        layer: i32,
        mask: &mut [i32],
    ) {
        let axis = side.axis();
        let (u, v) = Face::plane_axes(side);
        let offset = side.offset();
        let offset = [offset.x, offset.y, offset.z];

        for j in 0..CHUNK_DIMENSION_I32 {
            for i in 0..CHUNK_DIMENSION_I32 {
                let mut p = [0; 3];
                p[axis] = layer;
                p[u] = i;
                p[v] = j;

                let block = chunk.get_block(p[0], p[1], p[2]);
                let token = if is_air(block) {
                    0
                } else {
                    let neighbor = neighbor_block(
                        chunk,
                        p[0] + offset[0],
                        p[1] + offset[1],
                        p[2] + offset[2],
                        sampler,
                    );
                    if face_visible(materials, block, neighbor) {
                        side.sign() * (block as i32 + 1)
                    } else {
                        0
                    }
                };
                mask[i as usize + j as usize * CHUNK_DIMENSION] = token;
            }
        }
    }

    /// Consumes a layer mask, emitting one quad per maximal rectangle.
    fn merge_mask(
        mask: &mut [i32],
        side: BlockSide,
        layer: i32,
        emit: &mut impl FnMut(Face),
    ) {
        let plane = if side.is_positive() { layer + 1 } else { layer };

        for j in 0..CHUNK_DIMENSION {
            let mut i = 0;
            while i < CHUNK_DIMENSION {
                let token = mask[i + j * CHUNK_DIMENSION];
                if token == 0 {
                    i += 1;
                    continue;
                }

                let mut width = 1;
                while i + width < CHUNK_DIMENSION && mask[i + width + j * CHUNK_DIMENSION] == token {
                    width += 1;
                }

                let mut height = 1;
                'grow: while j + height < CHUNK_DIMENSION {
                    let row = (j + height) * CHUNK_DIMENSION;
                    for k in 0..width {
                        if mask[i + k + row] != token {
                            break 'grow;
                        }
                    }
                    height += 1;
                }

                for dj in 0..height {
                    let row = (j + dj) * CHUNK_DIMENSION;
                    mask[i + row..i + width + row].fill(0);
                }

                emit(Face {
                    side,
                    block: (token.abs() - 1) as BlockId,
                    plane,
                    u: i as i32,
                    v: j as i32,
                    width: width as i32,
                    height: height as i32,
                });

                i += width;
            }
        }
    }
}

impl Mesher for GreedyMesher {
    /// Generates a mesh for the chunk with greedy face merging.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to generate the mesh for
    /// * `materials` - Material table giving colours and transparency
    /// * `sampler` - Source of blocks outside the chunk; without one, outer faces are emitted
    ///
    /// # Returns
    /// A new `ChunkMesh` in world space. An empty chunk yields an empty mesh.
    ///
    /// # Performance
    /// Every side visits every cell once while building masks, and every mask cell is
    /// consumed at most once, so a checkerboard chunk still finishes in `O(6 * S^3)`.
    fn mesh(
        &self,
        chunk: &Chunk,
        materials: &MaterialTable,
        sampler: Option<&dyn NeighborSampler>,
    ) -> ChunkMesh {
        let mut mesh = ChunkMesh::empty(chunk.position());
        if chunk.is_empty() {
            return mesh;
        }

        let start = Instant::now();
        let origin = chunk.world_origin();
        let mut mask = vec![0i32; CHUNK_PLANE_SIZE];

        for side in BlockSide::all() {
            for layer in 0..CHUNK_DIMENSION_I32 {
                Self::build_mask(chunk, materials, sampler, side, layer, &mut mask);
                Self::merge_mask(&mut mask, side, layer, &mut |face: Face| {
                    mesh.push_face(&face, origin, materials.get(face.block));
                });
            }
        }

        trace!(
            "Greedy meshed chunk {:?}: {} quads in {:?}",
            chunk.position(),
            mesh.quad_count(),
            start.elapsed()
        );
        mesh
    }
}
