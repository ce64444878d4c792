use cgmath::Point3;
use voxel_world::{
    BlockId, BlockType, Chunk, GreedyMesher, MaterialTable, Mesher, SimpleMesher, AIR,
};

const STONE: BlockId = BlockType::STONE as BlockId;

fn greedy(chunk: &Chunk) -> voxel_world::ChunkMesh {
    GreedyMesher.mesh(chunk, &MaterialTable::new(), None)
}

// ---------------------------------------------------------------------------
// Fixed geometry
// ---------------------------------------------------------------------------

#[test]
fn single_stone_voxel_is_six_quads() {
    let mut chunk = Chunk::new(Point3::new(0, 0, 0));
    chunk.set_block(8, 8, 8, STONE);

    let mesh = greedy(&chunk);
    assert_eq!(mesh.vertex_count, 24);
    assert_eq!(mesh.positions.len(), 72);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(mesh.normals.len(), 72);
    assert_eq!(mesh.colors.len(), 72);

    for coordinate in mesh.positions.chunks(3) {
        for value in coordinate {
            assert!(*value == 8.0 || *value == 9.0);
        }
    }
}

#[test]
fn full_chunk_is_six_quads_for_any_material() {
    for block in [BlockType::STONE, BlockType::WATER, BlockType::GLASS, BlockType::SNOW] {
        let mut chunk = Chunk::new(Point3::new(2, 1, -3));
        chunk.fill(block.id());
        let mesh = greedy(&chunk);
        assert_eq!(mesh.vertex_count, 24, "{block:?}");
        assert_eq!(mesh.surface_area, 6 * 256, "{block:?}");
    }
}

#[test]
fn positions_are_in_world_space() {
    let mut chunk = Chunk::new(Point3::new(-1, 2, 3));
    chunk.set_block(0, 0, 0, STONE);
    let mesh = greedy(&chunk);

    let xs: Vec<f32> = mesh.positions.chunks(3).map(|p| p[0]).collect();
    let ys: Vec<f32> = mesh.positions.chunks(3).map(|p| p[1]).collect();
    let zs: Vec<f32> = mesh.positions.chunks(3).map(|p| p[2]).collect();
    assert!(xs.iter().all(|x| *x == -16.0 || *x == -15.0));
    assert!(ys.iter().all(|y| *y == 32.0 || *y == 33.0));
    assert!(zs.iter().all(|z| *z == 48.0 || *z == 49.0));
}

// ---------------------------------------------------------------------------
// Culling and merging
// ---------------------------------------------------------------------------

#[test]
fn adjacent_blocks_share_a_hidden_face() {
    let mut single = Chunk::new(Point3::new(0, 0, 0));
    single.set_block(4, 4, 4, STONE);
    let independent = greedy(&single).vertex_count * 2;
    assert_eq!(independent, 48);

    let mut pair = Chunk::new(Point3::new(0, 0, 0));
    pair.set_block(4, 4, 4, STONE);
    pair.set_block(5, 4, 4, STONE);
    assert!(greedy(&pair).vertex_count < 48);
}

#[test]
fn flat_slab_stays_constant_under_greedy_meshing() {
    let materials = MaterialTable::new();
    let mut previous_simple = 0;

    for (n, m) in [(2, 2), (4, 8), (10, 10), (16, 16)] {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0));
        chunk.fill_region(Point3::new(0, 5, 0), Point3::new(n - 1, 5, m - 1), STONE);

        let greedy = GreedyMesher.mesh(&chunk, &materials, None);
        let simple = SimpleMesher.mesh(&chunk, &materials, None);

        assert_eq!(greedy.vertex_count, 24, "{n}x{m}");
        let expected_faces = (2 * n * m + 2 * n + 2 * m) as usize;
        assert_eq!(simple.quad_count(), expected_faces, "{n}x{m}");
        assert!(simple.vertex_count > previous_simple);
        previous_simple = simple.vertex_count;
    }
}

#[test]
fn greedy_and_simple_cover_the_same_area() {
    let materials = MaterialTable::new();
    let palette = [
        AIR,
        AIR,
        BlockType::STONE.id(),
        BlockType::DIRT.id(),
        BlockType::WATER.id(),
        BlockType::GLASS.id(),
    ];

    for seed in 0..8 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut chunk = Chunk::new(Point3::new(0, 0, 0));
        for z in 0..16 {
            for y in 0..16 {
                for x in 0..16 {
                    chunk.set_block(x, y, z, palette[rng.usize(..palette.len())]);
                }
            }
        }

        let greedy = GreedyMesher.mesh(&chunk, &materials, None);
        let simple = SimpleMesher.mesh(&chunk, &materials, None);
        assert_eq!(greedy.surface_area, simple.surface_area, "seed {seed}");
        assert!(greedy.quad_count() <= simple.quad_count());
        assert_eq!(greedy.indices.len(), greedy.quad_count() * 6);
    }
}

#[test]
fn water_against_stone_draws_only_the_stone_face() {
    let mut chunk = Chunk::new(Point3::new(0, 0, 0));
    chunk.set_block(4, 4, 4, STONE);
    chunk.set_block(5, 4, 4, BlockType::WATER.id());
    let mesh = greedy(&chunk);
    // Stone: 6 faces. Water: 5, its face toward the stone is hidden.
    assert_eq!(mesh.surface_area, 11);
}

// ---------------------------------------------------------------------------
// Neighbor sampling
// ---------------------------------------------------------------------------

#[test]
fn sampler_suppresses_boundary_faces() {
    let materials = MaterialTable::new();
    let mut chunk = Chunk::new(Point3::new(0, 0, 0));
    chunk.set_block(15, 3, 3, STONE);

    let unsampled = GreedyMesher.mesh(&chunk, &materials, None);
    assert_eq!(unsampled.quad_count(), 6);

    // Solid everywhere outside this chunk.
    let solid_outside = |x: i32, y: i32, z: i32| {
        if (0..16).contains(&x) && (0..16).contains(&y) && (0..16).contains(&z) {
            AIR
        } else {
            STONE
        }
    };
    let sampled = GreedyMesher.mesh(&chunk, &materials, Some(&solid_outside));
    assert_eq!(sampled.quad_count(), 5);
    assert!(sampled
        .normals
        .chunks(3)
        .all(|normal| normal != [1.0_f32, 0.0, 0.0]));
}

#[test]
fn full_chunk_with_solid_neighbors_has_no_faces() {
    let mut chunk = Chunk::new(Point3::new(0, 0, 0));
    chunk.fill(STONE);
    let all_stone = |_: i32, _: i32, _: i32| STONE;
    let mesh = GreedyMesher.mesh(&chunk, &MaterialTable::new(), Some(&all_stone));
    assert!(mesh.is_empty());
}
