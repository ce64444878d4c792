//! # Chunk Iteration Module
//!
//! This module provides an iterator that walks only the non-air blocks of a
//! chunk, in storage order (x fastest, then y, then z).
//!
//! The iterator stops as soon as it has yielded `non_air_count` blocks, so a
//! sparse chunk whose last solid block sits near the start of the array is not
//! scanned to the end.

use cgmath::Point3;

use crate::engine_state::voxels::block::{is_air, BlockId};

use super::{Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next flat index to examine
    current_offset: usize,
    /// Non-air blocks still to be yielded
    remaining: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
            remaining: chunk_ref.non_air_count(),
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let blocks = self.chunk_ref.blocks();
        while self.current_offset < CHUNK_SIZE {
            let offset = self.current_offset;
            self.current_offset += 1;

            let id = blocks[offset];
            if !is_air(id) {
                self.remaining -= 1;
                let position = Point3::new(
                    (offset % CHUNK_DIMENSION) as i32,
                    ((offset / CHUNK_DIMENSION) % CHUNK_DIMENSION) as i32,
                    (offset / CHUNK_PLANE_SIZE) as i32,
                );
                return Some((position, id));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_exactly_the_non_air_blocks() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0));
        chunk.set_block(15, 15, 15, 3);
        chunk.set_block(0, 0, 0, 1);
        chunk.set_block(7, 8, 9, 2);

        let blocks: Vec<_> = chunk.iter_blocks().collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], (Point3::new(0, 0, 0), 1));
        assert_eq!(blocks[1], (Point3::new(7, 8, 9), 2));
        assert_eq!(blocks[2], (Point3::new(15, 15, 15), 3));
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::new(Point3::new(0, 0, 0));
        assert_eq!(chunk.iter_blocks().count(), 0);
    }
}
