//! # Voxel World Demo
//!
//! Walks a viewer through a generated world without a window. Every tick the
//! world streams and meshes chunks and a headless renderer picks up the
//! results. Now and then a glass block is placed on the ground under the
//! viewer to exercise edits.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- [config.json]
//! ```

use std::process::ExitCode;

use log::{error, info};
use web_time::Instant;

use voxel_world::{BlockType, HeadlessRenderer, UpdateStats, World, WorldConfig};

const TICKS: usize = 240;
const WALK_SPEED: f64 = 4.0;
const EDIT_INTERVAL: usize = 30;

fn main() -> ExitCode {
    voxel_world::init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("Could not load {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => WorldConfig::default(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: WorldConfig) -> voxel_world::Result<()> {
    let world = World::new(config)?;
    let manager = world.manager_handle();
    let mut renderer = HeadlessRenderer::new(world.manager_handle());
    let mut rng = fastrand::Rng::with_seed(u64::from(world.config().terrain.seed));

    let start = Instant::now();
    let mut totals = UpdateStats::default();
    let (mut x, mut z, mut heading) = (0.0_f64, 0.0_f64, 0.0_f64);
    let mut edits = 0;

    for tick in 0..TICKS {
        heading += (rng.f64() - 0.5) * 0.6;
        x += heading.cos() * WALK_SPEED;
        z += heading.sin() * WALK_SPEED;

        let stats = world.tick(x, z);
        totals.loaded += stats.loaded;
        totals.unloaded += stats.unloaded;
        totals.meshed += stats.meshed;
        renderer.sync();

        if tick % EDIT_INTERVAL == 0 {
            let (block_x, block_z) = (x.floor() as i32, z.floor() as i32);
            let mut chunks = manager.get_mut();
            let placed = chunks
                .surface_height_at(block_x, block_z)
                .is_some_and(|y| chunks.set_block_at(block_x, y + 1, block_z, BlockType::GLASS.id()));
            if placed {
                edits += 1;
            }
        }
    }

    loop {
        let pending = manager.get().queue_len();
        if pending == 0 {
            break;
        }
        totals.meshed += world.tick(x, z).meshed;
        renderer.sync();
    }

    let manager = manager.get();
    info!(
        "{} ticks in {:?}: loaded {}, unloaded {}, meshed {}, {} edits",
        TICKS,
        start.elapsed(),
        totals.loaded,
        totals.unloaded,
        totals.meshed,
        edits
    );
    info!(
        "{} chunks resident, {} retained, {} drawables, {} vertices, {} bytes uploaded",
        manager.loaded_count(),
        manager.retained_count(),
        renderer.drawable_count(),
        renderer.total_vertices(),
        renderer.uploaded_bytes()
    );
    Ok(())
}
