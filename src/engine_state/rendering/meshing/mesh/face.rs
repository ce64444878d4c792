use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, BlockId};

/// A rectangular, axis-aligned quad on one side of one or more blocks.
///
/// A face lives on the plane `plane` along its side's axis and spans
/// `width` cells along the `u` axis and `height` cells along the `v` axis,
/// where `u = (axis + 1) % 3` and `v = (axis + 2) % 3`. All coordinates are
/// chunk-local. A single block face is the `1 x 1` case; the greedy mesher
/// produces larger ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Which side of the block this face represents
    pub side: BlockSide,
    /// The block identifier, used to look up the material colour
    pub block: BlockId,
    /// Coordinate of the face plane along the side's axis
    pub plane: i32,
    /// Lowest `u` coordinate covered
    pub u: i32,
    /// Lowest `v` coordinate covered
    pub v: i32,
    /// Extent along `u`, in blocks
    pub width: i32,
    /// Extent along `v`, in blocks
    pub height: i32,
}

impl Face {
    /// The `(u, v)` axes spanning faces of the given side.
    #[inline]
    pub const fn plane_axes(side: BlockSide) -> (usize, usize) {
        let axis = side.axis();
        ((axis + 1) % 3, (axis + 2) % 3)
    }

    /// Creates the unit face on `side` of the block at `position`.
    ///
    /// # Arguments
    /// * `position` - Chunk-local block position
    /// * `block` - Identifier of the block owning the face
    /// * `side` - Which side of the block the face covers
    pub fn unit(position: Point3<i32>, block: BlockId, side: BlockSide) -> Self {
        let coords = [position.x, position.y, position.z];
        let (u, v) = Self::plane_axes(side);
        let layer = coords[side.axis()];
        Face {
            side,
            block,
            plane: if side.is_positive() { layer + 1 } else { layer },
            u: coords[u],
            v: coords[v],
            width: 1,
            height: 1,
        }
    }

    /// Number of unit block faces covered.
    #[inline]
    pub fn area(&self) -> u32 {
        (self.width * self.height) as u32
    }

    /// The four corners in chunk-local coordinates.
    ///
    /// Corners go `origin`, `+u`, `+u+v`, `+v`. For positive sides that
    /// order is counter-clockwise seen from outside the block.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        let (u, v) = Self::plane_axes(self.side);
        let corner = |du: i32, dv: i32| {
            let mut c = [0; 3];
            c[self.side.axis()] = self.plane;
            c[u] = self.u + du;
            c[v] = self.v + dv;
            Point3::new(c[0], c[1], c[2])
        };
        [
            corner(0, 0),
            corner(self.width, 0),
            corner(self.width, self.height),
            corner(0, self.height),
        ]
    }
}
