//! # Block Module
//!
//! This module provides the block vocabulary of the voxel world: the compact
//! block identifier stored in chunks, the named block types used by terrain
//! generation, the six face directions used by meshing, and the material table
//! that gives every identifier a colour and its solidity/transparency flags.

pub mod block_side;
pub mod block_type;
pub mod material;

/// The underlying integer type used to store a block in a chunk.
///
/// Identifiers range over 0–255. `AIR` (0) is the reserved empty sentinel: it
/// is what every out-of-range or unloaded lookup returns.
pub type BlockId = u8;

/// The empty block.
pub const AIR: BlockId = 0;

/// Returns `true` if the identifier denotes the empty block.
#[inline]
pub const fn is_air(id: BlockId) -> bool {
    id == AIR
}
