//! Headless mesh consumer.
//!
//! This module stands in for a GPU renderer: it drains the chunk manager's
//! mesh outbox, keeps one drawable per chunk coordinate and assigns each
//! drawable a stable buffer slot, reusing freed slots first.
//!
//! # Architecture
//!
//! The renderer is handed a clone of the manager handle when it is created.
//! `sync` pulls whatever events have accumulated since the last call, so
//! the manager never calls back into the renderer.

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};

use crate::{
    core::StResource,
    engine_state::voxels::{
        chunk::ChunkCoord,
        chunk_manager::{ChunkManager, MeshEvent},
    },
};

/// What a GPU renderer would keep per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawable {
    /// Buffer slot assigned to the chunk
    pub slot: u32,
    pub vertex_count: usize,
    pub index_count: usize,
    /// Bytes uploaded for positions, normals, colours and indices
    pub byte_size: usize,
}

/// Tracks drawables for the meshes the chunk manager produces.
pub struct HeadlessRenderer {
    manager: StResource<ChunkManager>,
    drawables: HashMap<ChunkCoord, Drawable>,
    available_slots: VecDeque<u32>,
    next_slot: u32,
    uploaded_bytes: u64,
}

impl HeadlessRenderer {
    pub fn new(manager: StResource<ChunkManager>) -> Self {
        HeadlessRenderer {
            manager,
            drawables: HashMap::new(),
            available_slots: VecDeque::new(),
            next_slot: 0,
            uploaded_bytes: 0,
        }
    }

    /// Drains the manager's outbox and applies every event.
    ///
    /// # Returns
    /// The number of events applied.
    pub fn sync(&mut self) -> usize {
        if self.manager.get().pending_events() == 0 {
            return 0;
        }
        let events = self.manager.get_mut().drain_events();
        let count = events.len();
        for event in events {
            self.apply(event);
        }
        debug!(
            "Renderer applied {} events: {} drawables, {} vertices",
            count,
            self.drawables.len(),
            self.total_vertices()
        );
        count
    }

    /// Applies a single mesh event.
    pub fn apply(&mut self, event: MeshEvent) {
        match event {
            MeshEvent::Added { coord, mesh } | MeshEvent::Updated { coord, mesh } => {
                let slot = match self.drawables.get(&coord) {
                    Some(drawable) => drawable.slot,
                    None => self.allocate_slot(),
                };
                let byte_size = mesh.position_bytes().len()
                    + mesh.normal_bytes().len()
                    + mesh.color_bytes().len()
                    + mesh.index_bytes().len();
                self.uploaded_bytes += byte_size as u64;
                trace!("Uploading {} bytes for chunk {:?} into slot {}", byte_size, coord, slot);

                self.drawables.insert(
                    coord,
                    Drawable {
                        slot,
                        vertex_count: mesh.vertex_count,
                        index_count: mesh.indices.len(),
                        byte_size,
                    },
                );
            }
            MeshEvent::Removed { coord } => {
                if let Some(drawable) = self.drawables.remove(&coord) {
                    self.available_slots.push_back(drawable.slot);
                }
            }
        }
    }

    fn allocate_slot(&mut self) -> u32 {
        self.available_slots.pop_front().unwrap_or_else(|| {
            let slot = self.next_slot;
            self.next_slot += 1;
            slot
        })
    }

    pub fn drawable(&self, coord: ChunkCoord) -> Option<&Drawable> {
        self.drawables.get(&coord)
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Vertices across every drawable.
    pub fn total_vertices(&self) -> usize {
        self.drawables.values().map(|d| d.vertex_count).sum()
    }

    /// Bytes uploaded since creation, replacements included.
    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }

    /// Number of slots ever allocated.
    pub fn slot_capacity(&self) -> u32 {
        self.next_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cgmath::Point3;

    use crate::config::{ManagerConfig, TerrainConfig};
    use crate::engine_state::rendering::meshing::mesh::ChunkMesh;

    fn renderer() -> HeadlessRenderer {
        let manager = ChunkManager::new(ManagerConfig::default(), TerrainConfig::default()).unwrap();
        HeadlessRenderer::new(StResource::new(manager))
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut renderer = renderer();
        let a = Point3::new(0, 0, 0);
        let b = Point3::new(1, 0, 0);
        let c = Point3::new(2, 0, 0);
        let mesh = |coord| Arc::new(ChunkMesh::empty(coord));

        renderer.apply(MeshEvent::Added { coord: a, mesh: mesh(a) });
        renderer.apply(MeshEvent::Added { coord: b, mesh: mesh(b) });
        renderer.apply(MeshEvent::Removed { coord: a });
        renderer.apply(MeshEvent::Added { coord: c, mesh: mesh(c) });

        assert_eq!(renderer.drawable(c).map(|d| d.slot), Some(0));
        assert_eq!(renderer.drawable(b).map(|d| d.slot), Some(1));
        assert_eq!(renderer.slot_capacity(), 2);
    }

    #[test]
    fn sync_applies_only_pending_events() {
        let config = ManagerConfig {
            render_distance: 1,
            mesh_budget_per_frame: 2,
            ..ManagerConfig::default()
        };
        let manager = StResource::new(ChunkManager::new(config, TerrainConfig::default()).unwrap());
        let mut renderer = HeadlessRenderer::new(manager.clone());
        assert_eq!(renderer.sync(), 0);

        manager.get_mut().update(0.0, 0.0);
        assert_eq!(manager.get().pending_events(), 2);
        assert_eq!(renderer.sync(), 2);
        assert_eq!(manager.get().pending_events(), 0);
        assert_eq!(renderer.sync(), 0);
        assert_eq!(renderer.drawable_count(), 2);
    }

    #[test]
    fn updates_keep_their_slot() {
        let mut renderer = renderer();
        let a = Point3::new(0, 0, 0);
        renderer.apply(MeshEvent::Added { coord: a, mesh: Arc::new(ChunkMesh::empty(a)) });
        renderer.apply(MeshEvent::Updated { coord: a, mesh: Arc::new(ChunkMesh::empty(a)) });
        assert_eq!(renderer.drawable_count(), 1);
        assert_eq!(renderer.drawable(a).map(|d| d.slot), Some(0));
    }
}
