//! # Mesh Queue
//!
//! FIFO of chunk coordinates waiting to be meshed. A coordinate is held at
//! most once: pushing one that is already queued keeps its original place.
//!
//! The queue only stores keys. Whether a chunk still exists, and whether it
//! is still dirty, is decided by the consumer at the moment it pops the key.

use std::collections::{HashSet, VecDeque};

use crate::engine_state::voxels::chunk::ChunkCoord;

#[derive(Debug, Default)]
pub struct MeshQueue {
    order: VecDeque<ChunkCoord>,
    queued: HashSet<ChunkCoord>,
}

impl MeshQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coord` unless it is already waiting.
    ///
    /// # Returns
    /// `true` if the coordinate was added.
    pub fn push(&mut self, coord: ChunkCoord) -> bool {
        if self.queued.insert(coord) {
            self.order.push_back(coord);
            true
        } else {
            false
        }
    }

    /// Takes the oldest waiting coordinate.
    pub fn pop(&mut self) -> Option<ChunkCoord> {
        let coord = self.order.pop_front()?;
        self.queued.remove(&coord);
        Some(coord)
    }

    /// Drops `coord` from the queue, wherever it is.
    pub fn remove(&mut self, coord: ChunkCoord) -> bool {
        if self.queued.remove(&coord) {
            self.order.retain(|queued| *queued != coord);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    #[test]
    fn duplicates_keep_their_place() {
        let mut queue = MeshQueue::new();
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(1, 0, 0);

        assert!(queue.push(a));
        assert!(queue.push(b));
        assert!(!queue.push(a));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(a));
        assert_eq!(queue.pop(), Some(b));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn removed_entries_are_skipped() {
        let mut queue = MeshQueue::new();
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(0, 1, 0);
        queue.push(a);
        queue.push(b);

        assert!(queue.remove(a));
        assert!(!queue.remove(a));
        assert_eq!(queue.pop(), Some(b));
        assert!(queue.is_empty());

        // A removed key can be queued again.
        assert!(queue.push(a));
    }
}
