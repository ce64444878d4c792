//! # Voxel Module
//!
//! This module contains the voxel data of the world and the machinery that
//! keeps the right part of it in memory.
//!
//! ## Architecture
//!
//! * **Block**: Block identifiers, named block types, face directions and materials
//! * **Chunk**: Fixed-size 16x16x16 arrays of blocks, the unit of streaming and meshing
//! * **Terrain**: Seeded, deterministic generation of chunk contents
//! * **Chunk manager**: Loads, unloads, edits and meshes chunks around the viewer
//! * **World**: Owns the chunk manager and shares it through handles
//!
//! ## Data Flow
//!
//! 1. The world ticks the chunk manager with the viewer position
//! 2. Missing chunks are generated and queued; out-of-range chunks are dropped
//! 3. A bounded number of queued chunks are meshed
//! 4. Finished meshes wait in the manager's outbox for the renderer

pub mod block;
pub mod chunk;
pub mod chunk_manager;
pub mod terrain;
pub mod world;
