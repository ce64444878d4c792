//! # Engine State Module
//!
//! The voxel world's data and the work done on it every tick.
//!
//! ## Key Components
//!
//! * `voxels` - Blocks, chunks, terrain generation, the chunk manager and the world
//! * `rendering` - Mesh generation, the mesh queue and the mesh consumer
//!
//! ## Architecture
//!
//! `voxels` owns the state; `rendering` turns chunk contents into geometry.
//! The chunk manager sits between them: it decides which chunks exist and
//! which need meshing, calls into `rendering::meshing` for the geometry, and
//! publishes the results as events.

pub mod rendering;
pub mod voxels;
