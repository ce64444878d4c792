//! Neighbor lookups and the face visibility rule shared by every mesher.

use crate::engine_state::voxels::{
    block::{is_air, material::MaterialTable, BlockId, AIR},
    chunk::Chunk,
};

/// Answers "which block is at this world position" for cells outside the
/// chunk being meshed.
///
/// Any `Fn(i32, i32, i32) -> BlockId` closure is a sampler.
pub trait NeighborSampler {
    /// The block at a world position; `AIR` when unknown.
    fn sample(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockId;
}

impl<F> NeighborSampler for F
where
    F: Fn(i32, i32, i32) -> BlockId,
{
    #[inline]
    fn sample(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockId {
        self(world_x, world_y, world_z)
    }
}

/// The block at a chunk-local position that may lie outside the chunk.
///
/// In-chunk cells are read directly. Out-of-chunk cells go through the
/// sampler, or count as `AIR` without one, so outer faces are emitted.
#[inline]
pub(crate) fn neighbor_block(
    chunk: &Chunk,
    x: i32,
    y: i32,
    z: i32,
    sampler: Option<&dyn NeighborSampler>,
) -> BlockId {
    if Chunk::contains_local(x, y, z) {
        return chunk.get_block(x, y, z);
    }
    match sampler {
        Some(sampler) => {
            let world = chunk.local_to_world(cgmath::Point3::new(x, y, z));
            sampler.sample(world.x, world.y, world.z)
        }
        None => AIR,
    }
}

/// Whether the face between `block` and `neighbor` is drawn on `block`'s side.
///
/// A face is drawn when the block is not air and the neighbor is air, or the
/// neighbor is transparent and the block is opaque, or both are transparent
/// with different identifiers.
#[inline]
pub fn face_visible(materials: &MaterialTable, block: BlockId, neighbor: BlockId) -> bool {
    if is_air(block) {
        return false;
    }
    if is_air(neighbor) {
        return true;
    }
    if !materials.is_transparent(neighbor) {
        return false;
    }
    !materials.is_transparent(block) || block != neighbor
}
