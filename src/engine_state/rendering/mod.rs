//! Rendering side of the voxel world.
//!
//! Drawing pixels is left to an external renderer. This module produces the
//! geometry it consumes and a headless consumer that tracks it.

pub mod meshing;
