//! # Chunk Manager Module
//!
//! The `ChunkManager` owns every loaded chunk and drives its lifecycle:
//!
//! ```text
//! unloaded -> loaded (dirty) -> queued -> meshed (clean) -> edited -> dirty -> ... -> unloaded
//! ```
//!
//! ## Streaming
//!
//! Each [`ChunkManager::update`] takes the viewer's horizontal position. The
//! chunks kept loaded are every column within a circle of `render_distance`
//! chunks around the viewer's chunk, across only the vertical layers the
//! terrain generator can reach. Sky layers above the highest possible
//! terrain are never loaded. Missing chunks are generated and queued for
//! meshing; chunks that left the circle are dropped.
//!
//! ## Meshing
//!
//! Meshing work is bounded: every update drains at most
//! `mesh_budget_per_frame` queue entries. Whether a chunk still exists and is
//! still dirty is checked when its entry is drained, not when it was queued,
//! so unloads and repeated edits between the two are handled. Boundary faces
//! are culled against the loaded neighbors.
//!
//! ## Outbox
//!
//! The manager never calls into the renderer. It appends [`MeshEvent`]s to an
//! outbox which the consumer drains with [`ChunkManager::drain_events`] on its
//! own schedule.
//!
//! ## Memory
//!
//! Chunks that were edited are not discarded when they leave the render
//! distance. They move into a least-recently-used retention cache and are
//! restored, edits intact, when they come back into range. Unedited chunks
//! are simply regenerated. The cache is trimmed so that loaded plus retained
//! chunks stay within `max_chunks_in_memory`.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info, warn};
use lru::LruCache;

use crate::config::{ManagerConfig, TerrainConfig};
use crate::engine_state::rendering::meshing::{
    mesh::{ChunkMesh, GreedyMesher, Mesher},
    mesh_queue::MeshQueue,
};
use crate::error::Result;

use super::block::{block_side::BlockSide, is_air, material::MaterialTable, BlockId, AIR};
use super::chunk::{chunk_coord_of, Chunk, ChunkCoord, CHUNK_DIMENSION_I32, MAX_CHUNK_COORD};
use super::terrain::TerrainGenerator;

/// A change the renderer has to apply.
#[derive(Debug, Clone)]
pub enum MeshEvent {
    /// First mesh of a chunk since it was loaded.
    Added {
        coord: ChunkCoord,
        mesh: Arc<ChunkMesh>,
    },
    /// Replacement mesh for a chunk that already had one.
    Updated {
        coord: ChunkCoord,
        mesh: Arc<ChunkMesh>,
    },
    /// The chunk was unloaded; its drawable must be dropped.
    Removed { coord: ChunkCoord },
}

impl MeshEvent {
    /// The chunk the event refers to.
    pub fn coord(&self) -> ChunkCoord {
        match self {
            MeshEvent::Added { coord, .. }
            | MeshEvent::Updated { coord, .. }
            | MeshEvent::Removed { coord } => *coord,
        }
    }
}

/// What one call to [`ChunkManager::update`] did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStats {
    /// Chunks loaded (generated or restored from the retention cache)
    pub loaded: usize,
    /// Chunks dropped because they left the render distance
    pub unloaded: usize,
    /// Meshes produced
    pub meshed: usize,
    /// Entries still waiting in the mesh queue
    pub queued: usize,
}

/// Streams, edits and meshes the chunks around a viewer.
pub struct ChunkManager {
    config: ManagerConfig,
    generator: TerrainGenerator,
    materials: MaterialTable,
    mesher: Box<dyn Mesher>,

    chunks: HashMap<ChunkCoord, Chunk>,
    meshes: HashMap<ChunkCoord, Arc<ChunkMesh>>,
    queue: MeshQueue,
    events: Vec<MeshEvent>,

    /// Chunks holding edits, loaded or retained.
    edited: HashSet<ChunkCoord>,
    /// Unloaded edited chunks, least recently used first out.
    retained: LruCache<ChunkCoord, Chunk>,

    /// Viewer chunk `(x, z)` of the last update.
    viewer_chunk: Option<(i32, i32)>,
}

impl ChunkManager {
    /// Creates a manager with the built-in materials and the greedy mesher.
    ///
    /// # Errors
    /// [`crate::VoxelError::InvalidConfig`] if either configuration is invalid.
    pub fn new(config: ManagerConfig, terrain: TerrainConfig) -> Result<Self> {
        config.validate()?;
        terrain.validate()?;

        let generator = TerrainGenerator::new(terrain);
        info!(
            "Chunk manager: render distance {}, vertical layers {:?}, mesh budget {}",
            config.render_distance,
            Self::layers_for(&generator, config.world_height),
            config.mesh_budget_per_frame
        );

        Ok(ChunkManager {
            config,
            generator,
            materials: MaterialTable::new(),
            mesher: Box::new(GreedyMesher),
            chunks: HashMap::new(),
            meshes: HashMap::new(),
            queue: MeshQueue::new(),
            events: Vec::new(),
            edited: HashSet::new(),
            retained: LruCache::unbounded(),
            viewer_chunk: None,
        })
    }

    /// Replaces the material table used for culling and vertex colours.
    pub fn with_materials(mut self, materials: MaterialTable) -> Self {
        self.materials = materials;
        self
    }

    /// Replaces the mesher.
    pub fn with_mesher(mut self, mesher: Box<dyn Mesher>) -> Self {
        self.mesher = mesher;
        self
    }

    fn layers_for(generator: &TerrainGenerator, world_height: i32) -> Range<i32> {
        0..generator.top_layer(world_height) + 1
    }

    /// The chunk column containing a horizontal world position.
    ///
    /// Positions beyond the addressable world clamp to its outermost column.
    pub fn viewer_chunk_of(viewer_x: f64, viewer_z: f64) -> (i32, i32) {
        let size = CHUNK_DIMENSION_I32 as f64;
        let limit = MAX_CHUNK_COORD as f64;
        let column = |position: f64| (position / size).floor().clamp(-limit, limit) as i32;
        (column(viewer_x), column(viewer_z))
    }

    /// Pulls `center` in far enough that its whole neighborhood is addressable.
    fn clamp_center(&self, center: (i32, i32)) -> (i32, i32) {
        let limit = MAX_CHUNK_COORD - self.config.render_distance;
        (center.0.clamp(-limit, limit), center.1.clamp(-limit, limit))
    }

    /// The vertical chunk layers that are ever loaded.
    pub fn vertical_layers(&self) -> Range<i32> {
        Self::layers_for(&self.generator, self.config.world_height)
    }

    /// Every chunk coordinate that should be loaded for a viewer in `center`.
    ///
    /// # Returns
    /// All `(x, y, z)` with `dx² + dz² <= render_distance²` around `center`
    /// and `y` in [`Self::vertical_layers`]. A center near the edge of the
    /// addressable world is first pulled inward so no coordinate overflows.
    pub fn needed_coords(&self, center: (i32, i32)) -> HashSet<ChunkCoord> {
        let center = self.clamp_center(center);
        let radius = self.config.render_distance;
        let layers = self.vertical_layers();
        let mut needed = HashSet::new();

        for dz in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dz * dz > radius * radius {
                    continue;
                }
                for y in layers.clone() {
                    needed.insert(Point3::new(center.0 + dx, y, center.1 + dz));
                }
            }
        }
        needed
    }

    /// Advances streaming and meshing by one tick.
    ///
    /// Loads and unloads are only recomputed when the viewer has moved into a
    /// different chunk; meshing work is drained every call.
    pub fn update(&mut self, viewer_x: f64, viewer_z: f64) -> UpdateStats {
        let mut stats = UpdateStats::default();
        let center = self.clamp_center(Self::viewer_chunk_of(viewer_x, viewer_z));

        if self.viewer_chunk != Some(center) {
            self.viewer_chunk = Some(center);
            let needed = self.needed_coords(center);

            let mut stale: Vec<ChunkCoord> = self
                .chunks
                .keys()
                .filter(|coord| !needed.contains(*coord))
                .copied()
                .collect();
            // Least recently accessed first, so they are first out of the retention cache.
            stale.sort_by_key(|coord| self.chunks.get(coord).map(Chunk::last_accessed));
            for coord in stale {
                self.unload_chunk(coord);
                stats.unloaded += 1;
            }

            let mut missing: Vec<ChunkCoord> = needed
                .into_iter()
                .filter(|coord| !self.chunks.contains_key(coord))
                .collect();
            // Nearest columns first, bottom up, so they reach the mesh queue first.
            missing.sort_by_key(|coord| {
                let (dx, dz) = (coord.x - center.0, coord.z - center.1);
                (dx * dx + dz * dz, coord.y, coord.x, coord.z)
            });
            for coord in missing {
                self.load_chunk(coord);
                stats.loaded += 1;
            }

            self.enforce_memory_budget();
        }

        stats.meshed = self.drain_mesh_queue();
        stats.queued = self.queue.len();

        if stats.loaded > 0 || stats.unloaded > 0 {
            debug!(
                "Viewer chunk {:?}: loaded {}, unloaded {}, {} resident, {} queued",
                center,
                stats.loaded,
                stats.unloaded,
                self.chunks.len(),
                stats.queued
            );
        }
        stats
    }

    /// Generates (or restores) a chunk and queues it and its meshed neighbors.
    fn load_chunk(&mut self, coord: ChunkCoord) {
        let mut chunk = match self.retained.pop(&coord) {
            Some(chunk) => {
                debug!("Restored edited chunk {:?} from retention", coord);
                chunk
            }
            None => self.generator.generate_chunk(coord),
        };
        chunk.mark_dirty();
        chunk.touch();
        let has_blocks = !chunk.is_empty();

        self.chunks.insert(coord, chunk);
        self.queue.push(coord);

        // Neighbors meshed earlier treated this chunk as air.
        if has_blocks {
            self.invalidate_meshed_neighbors(coord);
        }
    }

    /// Drops a chunk, its mesh and its queue entry.
    fn unload_chunk(&mut self, coord: ChunkCoord) {
        let Some(chunk) = self.chunks.remove(&coord) else {
            return;
        };
        self.queue.remove(coord);
        if self.meshes.remove(&coord).is_some() {
            self.events.push(MeshEvent::Removed { coord });
        }

        // Neighbors culled their boundary faces against this chunk's blocks.
        if !chunk.is_empty() {
            self.invalidate_meshed_neighbors(coord);
        }
        if self.edited.contains(&coord) {
            self.retained.put(coord, chunk);
        }
    }

    /// Re-queues every meshed chunk sharing a face with `coord`.
    fn invalidate_meshed_neighbors(&mut self, coord: ChunkCoord) {
        for side in BlockSide::all() {
            let neighbor = side.neighbor_of(coord);
            if self.meshes.contains_key(&neighbor) {
                self.invalidate(neighbor);
            }
        }
    }

    /// Trims the retention cache until resident chunks fit the memory budget.
    fn enforce_memory_budget(&mut self) {
        let budget = self.config.max_chunks_in_memory;
        if self.chunks.len() > budget {
            warn!(
                "{} chunks loaded exceeds max_chunks_in_memory ({}); reduce render_distance",
                self.chunks.len(),
                budget
            );
        }

        while self.chunks.len() + self.retained.len() > budget {
            let Some((coord, _)) = self.retained.pop_lru() else {
                break;
            };
            self.edited.remove(&coord);
            debug!("Evicted retained chunk {:?}; its edits are discarded", coord);
        }
    }

    /// Marks a loaded chunk dirty and queues it.
    fn invalidate(&mut self, coord: ChunkCoord) {
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.mark_dirty();
            self.queue.push(coord);
        }
    }

    /// Meshes up to `mesh_budget_per_frame` queued chunks.
    ///
    /// # Returns
    /// The number of meshes produced.
    fn drain_mesh_queue(&mut self) -> usize {
        let mut drained = 0;
        let mut meshed = 0;

        while drained < self.config.mesh_budget_per_frame {
            let Some(coord) = self.queue.pop() else {
                break;
            };
            drained += 1;

            let Some(chunk) = self.chunks.get(&coord) else {
                continue;
            };
            if !chunk.is_dirty() {
                continue;
            }

            let chunks = &self.chunks;
            let sampler = |x: i32, y: i32, z: i32| Self::block_in(chunks, x, y, z);
            let mesh = Arc::new(self.mesher.mesh(chunk, &self.materials, Some(&sampler)));

            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.mark_clean();
            }
            let event = match self.meshes.insert(coord, mesh.clone()) {
                Some(_) => MeshEvent::Updated { coord, mesh },
                None => MeshEvent::Added { coord, mesh },
            };
            self.events.push(event);
            meshed += 1;
        }

        meshed
    }

    #[inline]
    fn block_in(chunks: &HashMap<ChunkCoord, Chunk>, x: i32, y: i32, z: i32) -> BlockId {
        let world = Point3::new(x, y, z);
        chunks
            .get(&chunk_coord_of(world))
            .and_then(|chunk| {
                let local = chunk.world_to_local(world)?;
                Some(chunk.get_block(local.x, local.y, local.z))
            })
            .unwrap_or(AIR)
    }

    /// The block at a world position; `AIR` when its chunk is not loaded.
    pub fn get_block_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        Self::block_in(&self.chunks, x, y, z)
    }

    /// Whether the block at a world position is solid. Unloaded space is not.
    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.materials.is_solid(self.get_block_at(x, y, z))
    }

    /// World y of the highest non-air block in the loaded column at `(x, z)`.
    pub fn surface_height_at(&self, x: i32, z: i32) -> Option<i32> {
        let column = chunk_coord_of(Point3::new(x, 0, z));
        for layer in self.vertical_layers().rev() {
            let Some(chunk) = self.chunks.get(&Point3::new(column.x, layer, column.z)) else {
                continue;
            };
            if chunk.is_empty() {
                continue;
            }
            let local_x = x.rem_euclid(CHUNK_DIMENSION_I32);
            let local_z = z.rem_euclid(CHUNK_DIMENSION_I32);
            for local_y in (0..CHUNK_DIMENSION_I32).rev() {
                if !is_air(chunk.get_block(local_x, local_y, local_z)) {
                    return Some(layer * CHUNK_DIMENSION_I32 + local_y);
                }
            }
        }
        None
    }

    /// Writes a block at a world position.
    ///
    /// # Returns
    /// `false` if the chunk is not loaded or the block already holds `id`.
    /// Otherwise the owning chunk is queued for meshing, along with every
    /// loaded neighbor sharing a face with the edited block.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> bool {
        let world = Point3::new(x, y, z);
        let coord = chunk_coord_of(world);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return false;
        };
        let Some(local) = chunk.world_to_local(world) else {
            return false;
        };
        if !chunk.set_block(local.x, local.y, local.z, id) {
            return false;
        }

        self.edited.insert(coord);
        self.queue.push(coord);

        let local = [local.x, local.y, local.z];
        for side in BlockSide::all() {
            let edge = if side.is_positive() {
                CHUNK_DIMENSION_I32 - 1
            } else {
                0
            };
            if local[side.axis()] == edge {
                self.invalidate(side.neighbor_of(coord));
            }
        }
        true
    }

    /// Takes every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<MeshEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of events waiting in the outbox.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// The current mesh of a chunk, if it has been meshed since loading.
    pub fn mesh(&self, coord: ChunkCoord) -> Option<Arc<ChunkMesh>> {
        self.meshes.get(&coord).cloned()
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of unloaded edited chunks kept in memory.
    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }
}
