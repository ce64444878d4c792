//! # Block Type Module
//!
//! This module names the block identifiers the engine knows about. Chunks store
//! plain [`BlockId`] bytes; `BlockType` is the readable view used by terrain
//! generation, the built-in material table, and tests.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockId;

/// Enumerates the built-in block types.
///
/// The discriminant of each variant is its [`BlockId`]. The `FromPrimitive`
/// derive allows going back from a stored identifier to the named type.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// The empty block. Never meshed.
    AIR = 0,

    /// Bulk underground material, also used for mountain surfaces.
    STONE = 1,

    /// The layer between stone and the surface.
    DIRT = 2,

    /// Default surface material.
    GRASS = 3,

    /// Surface material of lowlands near the water line.
    SAND = 4,

    /// Transparent, non-solid fill below sea level.
    WATER = 5,

    /// Opaque building material.
    WOOD = 6,

    /// Transparent foliage.
    LEAVES = 7,

    /// Transparent building material.
    GLASS = 8,

    /// Opaque white material.
    SNOW = 9,
}

impl BlockType {
    /// Looks up the named type for a stored identifier.
    ///
    /// # Returns
    /// `Some(BlockType)` for built-in identifiers, `None` for custom ones.
    pub fn from_id(id: BlockId) -> Option<Self> {
        FromPrimitive::from_u8(id)
    }

    /// The identifier stored in chunks for this type.
    #[inline]
    pub const fn id(self) -> BlockId {
        self as BlockId
    }
}

impl From<BlockType> for BlockId {
    fn from(block_type: BlockType) -> Self {
        block_type.id()
    }
}
