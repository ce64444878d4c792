//! Mesh data structures for voxel rendering.
//!
//! A [`ChunkMesh`] is the hand-off between the mesher and the external
//! renderer: flat, GPU-ready arrays for a single chunk. Meshes are never
//! patched. When a chunk changes, a new mesh replaces the old one wholesale.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{block::material::Material, chunk::ChunkCoord};

use super::face::Face;

/// Indices of the two triangles of a quad on a positive side.
const FRONT_FACING_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];
/// Same quad with flipped winding, used for negative sides.
const BACK_FACING_INDICES: [u32; 6] = [0, 2, 1, 0, 3, 2];

/// Triangle geometry for one chunk.
///
/// Positions are in world space. Every vertex has a position, a normal and an
/// RGB colour, each stored as three consecutive floats.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    /// The chunk this mesh was built from
    pub coord: ChunkCoord,
    /// `x, y, z` per vertex
    pub positions: Vec<f32>,
    /// Flat face normal per vertex
    pub normals: Vec<f32>,
    /// `r, g, b` per vertex, each in `0..=1`
    pub colors: Vec<f32>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
    /// Number of vertices
    pub vertex_count: usize,
    /// Total area of all quads, in unit block faces
    pub surface_area: u32,
}

impl ChunkMesh {
    /// Creates a mesh with no geometry.
    pub fn empty(coord: ChunkCoord) -> Self {
        ChunkMesh {
            coord,
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            vertex_count: 0,
            surface_area: 0,
        }
    }

    /// Appends one quad: four vertices and six indices.
    ///
    /// # Arguments
    /// * `face` - The quad, in chunk-local coordinates
    /// * `origin` - World position of the chunk's local origin
    /// * `material` - Material providing the vertex colour
    pub fn push_face(&mut self, face: &Face, origin: Point3<i32>, material: &Material) {
        let base = self.vertex_count as u32;
        let normal: Vector3<f32> = face.side.normal();
        let color = material.rgb();

        for corner in face.corners() {
            self.positions.extend_from_slice(&[
                (origin.x + corner.x) as f32,
                (origin.y + corner.y) as f32,
                (origin.z + corner.z) as f32,
            ]);
            self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
            self.colors.extend_from_slice(&color);
        }

        let pattern = if face.side.is_positive() {
            &FRONT_FACING_INDICES
        } else {
            &BACK_FACING_INDICES
        };
        self.indices.extend(pattern.iter().map(|i| base + i));

        self.vertex_count += 4;
        self.surface_area += face.area();
    }

    /// Whether the mesh has no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Number of quads in the mesh.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertex_count / 4
    }

    /// Number of triangles in the mesh.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The position array as raw bytes, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// The normal array as raw bytes.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// The colour array as raw bytes.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// The index array as raw bytes, ready for an index buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn push_face_appends_one_quad() {
        let mut mesh = ChunkMesh::empty(Point3::new(1, 0, 0));
        let face = Face::unit(Point3::new(0, 0, 0), 1, BlockSide::LEFT);
        mesh.push_face(&face, Point3::new(16, 0, 0), &Material::opaque(0xFF0000));

        assert_eq!(mesh.vertex_count, 4);
        assert_eq!(mesh.indices, vec![0, 2, 1, 0, 3, 2]);
        assert_eq!(&mesh.positions[0..3], &[16.0_f32, 0.0, 0.0]);
        assert_eq!(&mesh.normals[0..3], &[-1.0_f32, 0.0, 0.0]);
        assert_eq!(&mesh.colors[0..3], &[1.0_f32, 0.0, 0.0]);
        assert_eq!(mesh.position_bytes().len(), 12 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn indices_are_offset_by_existing_vertices() {
        let mut mesh = ChunkMesh::empty(Point3::new(0, 0, 0));
        let material = Material::opaque(0x808080);
        mesh.push_face(&Face::unit(Point3::new(0, 0, 0), 1, BlockSide::TOP), Point3::new(0, 0, 0), &material);
        mesh.push_face(&Face::unit(Point3::new(0, 0, 0), 1, BlockSide::RIGHT), Point3::new(0, 0, 0), &material);

        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.surface_area, 2);
    }
}
