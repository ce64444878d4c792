//! # Block Side Module
//!
//! This module defines the six faces of a voxel block. Meshing sweeps the chunk
//! once per side, and edit propagation uses the same offsets to find the
//! neighboring chunk behind a boundary face.

use cgmath::{Point3, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// Each side is an axis (0 = x, 1 = y, 2 = z) plus a direction along it.
/// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// Facing positive X
    RIGHT = 0,

    /// Facing negative X
    LEFT = 1,

    /// Facing positive Y
    TOP = 2,

    /// Facing negative Y
    BOTTOM = 3,

    /// Facing positive Z
    FRONT = 4,

    /// Facing negative Z
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// The axis this face is perpendicular to (0 = x, 1 = y, 2 = z).
    #[inline]
    pub const fn axis(self) -> usize {
        match self {
            BlockSide::RIGHT | BlockSide::LEFT => 0,
            BlockSide::TOP | BlockSide::BOTTOM => 1,
            BlockSide::FRONT | BlockSide::BACK => 2,
        }
    }

    /// Whether the face points along the positive direction of its axis.
    ///
    /// Negative faces are the back-facing directions of a sweep: their mask
    /// tokens are negated and their triangle winding is flipped.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, BlockSide::RIGHT | BlockSide::TOP | BlockSide::FRONT)
    }

    /// `+1` for positive faces, `-1` for negative ones.
    #[inline]
    pub const fn sign(self) -> i32 {
        if self.is_positive() {
            1
        } else {
            -1
        }
    }

    /// The integer step from a block to the neighbor behind this face.
    pub fn offset(self) -> Vector3<i32> {
        let mut offset = [0; 3];
        offset[self.axis()] = self.sign();
        Vector3::new(offset[0], offset[1], offset[2])
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }

    /// The position of the neighbor behind this face.
    #[inline]
    pub fn neighbor_of(self, position: Point3<i32>) -> Point3<i32> {
        position + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_sides_share_an_axis_with_opposite_signs() {
        for pair in BlockSide::all().chunks(2) {
            assert_eq!(pair[0].axis(), pair[1].axis());
            assert_eq!(pair[0].sign(), -pair[1].sign());
        }
    }

    #[test]
    fn normals_are_unit_axis_vectors() {
        assert_eq!(BlockSide::TOP.normal(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(BlockSide::LEFT.normal(), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(
            BlockSide::BACK.neighbor_of(Point3::new(3, 4, 5)),
            Point3::new(3, 4, 4)
        );
    }
}
