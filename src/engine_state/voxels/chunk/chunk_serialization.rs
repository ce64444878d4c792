//! # Chunk Serialization Module
//!
//! Persistence shape of a chunk: its coordinate plus the full block array.
//! Derived state (`non_air_count`, emptiness) is never stored; it is recomputed
//! on load, and a loaded chunk always starts dirty.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::BlockId;
use crate::error::{Result, VoxelError};

use super::{Chunk, CHUNK_SIZE};

/// Serialized form of a [`Chunk`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerializedChunk {
    /// Chunk-grid coordinate `[x, y, z]`.
    pub coord: [i32; 3],
    /// Flat block array in storage order; must hold exactly `CHUNK_SIZE` entries.
    pub blocks: Vec<BlockId>,
}

impl Chunk {
    /// Captures the chunk's coordinate and full block array.
    pub fn serialize(&self) -> SerializedChunk {
        let position = self.position();
        SerializedChunk {
            coord: [position.x, position.y, position.z],
            blocks: self.blocks().to_vec(),
        }
    }

    /// Rebuilds a chunk from its serialized form.
    ///
    /// Counts are recomputed from the block array and the result is marked
    /// dirty.
    ///
    /// # Errors
    /// [`VoxelError::InvalidBlockCount`] if the array is not exactly
    /// `CHUNK_SIZE` long. Short or long arrays are rejected rather than padded
    /// or truncated.
    pub fn deserialize(data: SerializedChunk) -> Result<Chunk> {
        if data.blocks.len() != CHUNK_SIZE {
            return Err(VoxelError::InvalidBlockCount {
                expected: CHUNK_SIZE,
                actual: data.blocks.len(),
            });
        }
        let [x, y, z] = data.coord;
        Ok(Chunk::from_blocks(
            Point3::new(x, y, z),
            data.blocks.into_boxed_slice(),
        ))
    }

    /// Serializes the chunk to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    /// Parses a chunk from a JSON string produced by [`Chunk::to_json`].
    pub fn from_json(json: &str) -> Result<Chunk> {
        let data: SerializedChunk = serde_json::from_str(json)?;
        Chunk::deserialize(data)
    }
}
