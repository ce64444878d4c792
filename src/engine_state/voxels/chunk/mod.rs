//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one fixed-size 16x16x16 cube of
//! voxels, the unit of streaming and meshing.
//!
//! ## Storage
//!
//! Blocks are stored as a flat byte array of length `CHUNK_SIZE`, indexed as
//! `x + y * CHUNK_DIMENSION + z * CHUNK_PLANE_SIZE` (x fastest, z slowest).
//! Alongside the array the chunk keeps:
//! - `non_air_count`: updated incrementally on every empty/non-empty transition
//! - `is_dirty`: the chunk's mesh is stale and must be regenerated
//! - `last_accessed`: refreshed by edits and whenever the chunk manager loads it
//!
//! `is_empty()` is derived from `non_air_count`, so the two can never disagree.
//!
//! ## Coordinates
//!
//! Local coordinates are `i32` so callers can pass neighbors of edge blocks
//! (`-1`, `CHUNK_DIMENSION`) without casting. Any out-of-range read returns
//! [`AIR`]; any out-of-range write is a no-op.

use cgmath::{Point3, Vector3};
use web_time::Instant;

use super::block::{is_air, BlockId, AIR};

pub mod chunk_iteration;
pub mod chunk_serialization;

use chunk_iteration::ChunkBlockIterator;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: usize = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;
/// `CHUNK_DIMENSION` as a signed coordinate.
pub const CHUNK_DIMENSION_I32: i32 = CHUNK_DIMENSION as i32;
/// Largest chunk coordinate magnitude whose blocks, and the blocks one step
/// past its faces, all have world coordinates representable as `i32`.
pub const MAX_CHUNK_COORD: i32 = i32::MAX / CHUNK_DIMENSION_I32 - 1;

/// Location of a chunk in chunk-grid units.
///
/// Every key is three-dimensional. A 2D column grid is simply the set of
/// coordinates with `y == 0`.
pub type ChunkCoord = Point3<i32>;

/// Returns the chunk containing a world block position.
pub fn chunk_coord_of(world: Point3<i32>) -> ChunkCoord {
    Point3::new(
        world.x.div_euclid(CHUNK_DIMENSION_I32),
        world.y.div_euclid(CHUNK_DIMENSION_I32),
        world.z.div_euclid(CHUNK_DIMENSION_I32),
    )
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: ChunkCoord,

    /// Flat block storage, always exactly `CHUNK_SIZE` long.
    blocks: Box<[BlockId]>,

    /// Number of cells holding something other than `AIR`.
    non_air_count: usize,

    /// Set whenever the contents change; cleared once a mesh has been built.
    is_dirty: bool,

    /// Recency hint, refreshed on edits and loads.
    last_accessed: Instant,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// New chunks start dirty: they have never been meshed.
    pub fn new(position: ChunkCoord) -> Self {
        Chunk {
            position,
            blocks: vec![AIR; CHUNK_SIZE].into_boxed_slice(),
            non_air_count: 0,
            is_dirty: true,
            last_accessed: Instant::now(),
        }
    }

    /// Builds a chunk from a raw block array, recomputing every derived field.
    ///
    /// The caller guarantees `blocks.len() == CHUNK_SIZE`.
    pub(crate) fn from_blocks(position: ChunkCoord, blocks: Box<[BlockId]>) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_SIZE);
        let non_air_count = blocks.iter().filter(|&&id| !is_air(id)).count();
        Chunk {
            position,
            blocks,
            non_air_count,
            is_dirty: true,
            last_accessed: Instant::now(),
        }
    }

    /// The chunk-grid coordinate of this chunk.
    #[inline]
    pub fn position(&self) -> ChunkCoord {
        self.position
    }

    /// World block coordinate of local (0, 0, 0).
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_DIMENSION_I32,
            self.position.y * CHUNK_DIMENSION_I32,
            self.position.z * CHUNK_DIMENSION_I32,
        )
    }

    /// Flat index of a local coordinate, or `None` when it lies outside the chunk.
    #[inline]
    pub fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if Self::contains_local(x, y, z) {
            Some(x as usize + y as usize * CHUNK_DIMENSION + z as usize * CHUNK_PLANE_SIZE)
        } else {
            None
        }
    }

    /// Whether a local coordinate lies inside `[0, CHUNK_DIMENSION)` on every axis.
    #[inline]
    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_DIMENSION_I32).contains(&x)
            && (0..CHUNK_DIMENSION_I32).contains(&y)
            && (0..CHUNK_DIMENSION_I32).contains(&z)
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// The stored block, or `AIR` if the coordinates are outside the chunk.
    #[inline]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        match Self::index(x, y, z) {
            Some(index) => self.blocks[index],
            None => AIR,
        }
    }

    /// Sets the block at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `false` (and nothing changes) if the coordinates are outside the chunk or
    /// the block already holds `id`. Otherwise the block is written, the
    /// non-air count is adjusted on an empty/non-empty transition, the chunk is
    /// marked dirty and its access time refreshed, and `true` is returned.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> bool {
        let Some(index) = Self::index(x, y, z) else {
            return false;
        };
        let previous = self.blocks[index];
        if previous == id {
            return false;
        }

        match (is_air(previous), is_air(id)) {
            (true, false) => self.non_air_count += 1,
            (false, true) => self.non_air_count -= 1,
            _ => {}
        }

        self.blocks[index] = id;
        self.is_dirty = true;
        self.touch();
        true
    }

    /// Assigns `id` to every block of the chunk.
    pub fn fill(&mut self, id: BlockId) {
        self.blocks.fill(id);
        self.non_air_count = if is_air(id) { 0 } else { CHUNK_SIZE };
        self.is_dirty = true;
        self.touch();
    }

    /// Assigns `id` to every block in the box spanned by two corners.
    ///
    /// Corners are clamped into the chunk and may be given in any order; both
    /// are inclusive.
    ///
    /// # Returns
    /// The number of blocks that actually changed.
    pub fn fill_region(&mut self, corner1: Point3<i32>, corner2: Point3<i32>, id: BlockId) -> usize {
        let clamp = |v: i32| v.clamp(0, CHUNK_DIMENSION_I32 - 1);
        let (min_x, max_x) = (clamp(corner1.x.min(corner2.x)), clamp(corner1.x.max(corner2.x)));
        let (min_y, max_y) = (clamp(corner1.y.min(corner2.y)), clamp(corner1.y.max(corner2.y)));
        let (min_z, max_z) = (clamp(corner1.z.min(corner2.z)), clamp(corner1.z.max(corner2.z)));

        let mut changed = 0;
        for z in min_z..=max_z {
            for y in min_y..=max_y {
                for x in min_x..=max_x {
                    if self.set_block(x, y, z, id) {
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    /// Converts a chunk-local position into a world block position.
    #[inline]
    pub fn local_to_world(&self, local: Point3<i32>) -> Point3<i32> {
        self.world_origin() + Vector3::new(local.x, local.y, local.z)
    }

    /// Converts a world block position into a chunk-local position.
    ///
    /// # Returns
    /// `None` if the world position belongs to a different chunk.
    pub fn world_to_local(&self, world: Point3<i32>) -> Option<Point3<i32>> {
        let origin = self.world_origin();
        let local = Point3::new(world.x - origin.x, world.y - origin.y, world.z - origin.z);
        Self::contains_local(local.x, local.y, local.z).then_some(local)
    }

    /// Calls `visit` for every non-air block, in storage order (x fastest, z slowest).
    pub fn for_each_block<F>(&self, mut visit: F)
    where
        F: FnMut(Point3<i32>, BlockId),
    {
        for (position, id) in self.iter_blocks() {
            visit(position, id);
        }
    }

    /// An iterator over all non-air blocks and their local positions.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Raw block storage in flat index order.
    #[inline]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Number of non-air blocks.
    #[inline]
    pub fn non_air_count(&self) -> usize {
        self.non_air_count
    }

    /// Whether every block is air.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_air_count == 0
    }

    /// Whether the chunk's mesh is stale.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Flags the mesh as stale without changing any block.
    ///
    /// Used when a neighbor's boundary edit changes which of this chunk's faces
    /// are visible.
    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// Flags the mesh as current.
    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    /// When the chunk was last edited or loaded.
    #[inline]
    pub fn last_accessed(&self) -> Instant {
        self.last_accessed
    }

    /// Refreshes the access time.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}
