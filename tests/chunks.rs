use cgmath::Point3;
use voxel_world::{
    BlockType, Chunk, SerializedChunk, TerrainConfig, TerrainGenerator, VoxelError, CHUNK_SIZE,
};

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn round_trip_empty_partial_and_full() {
    let empty = Chunk::new(Point3::new(0, 0, 0));

    let mut partial = Chunk::new(Point3::new(-3, 1, 9));
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..500 {
        partial.set_block(rng.i32(0..16), rng.i32(0..16), rng.i32(0..16), rng.u8(1..10));
    }

    let mut full = Chunk::new(Point3::new(5, 5, 5));
    full.fill(BlockType::SAND.id());

    for chunk in [empty, partial, full] {
        let json = serde_json::to_string(&chunk.serialize()).unwrap();
        let data: SerializedChunk = serde_json::from_str(&json).unwrap();
        let restored = Chunk::deserialize(data).unwrap();

        assert_eq!(restored.position(), chunk.position());
        assert_eq!(restored.blocks(), chunk.blocks());
        assert_eq!(restored.non_air_count(), chunk.non_air_count());
        assert_eq!(restored.is_empty(), chunk.is_empty());
        assert!(restored.is_dirty());
    }
}

#[test]
fn truncated_block_arrays_fail() {
    let mut data = Chunk::new(Point3::new(0, 0, 0)).serialize();
    data.blocks.truncate(100);
    assert!(matches!(
        Chunk::deserialize(data),
        Err(VoxelError::InvalidBlockCount { expected, actual: 100 }) if expected == CHUNK_SIZE
    ));

    let malformed = r#"{ "coord": [0, 0, 0], "blocks": [1, 2, 3] }"#;
    assert!(Chunk::from_json(malformed).is_err());
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

#[test]
fn generation_is_deterministic_per_seed() {
    let mut rng = fastrand::Rng::with_seed(3);
    for seed in [0, 1, 0xDEAD_BEEF] {
        let config = TerrainConfig {
            seed,
            ..TerrainConfig::default()
        };
        let first = TerrainGenerator::new(config.clone());
        let second = TerrainGenerator::new(config);

        for _ in 0..4 {
            let coord = Point3::new(rng.i32(-500..500), rng.i32(0..6), rng.i32(-500..500));
            assert_eq!(
                first.generate_chunk(coord).blocks(),
                second.generate_chunk(coord).blocks(),
                "seed {seed} at {coord:?}"
            );
        }
    }
}

#[test]
fn different_seeds_give_different_terrain() {
    let a = TerrainGenerator::new(TerrainConfig {
        seed: 1,
        ..TerrainConfig::default()
    });
    let b = TerrainGenerator::new(TerrainConfig {
        seed: 2,
        ..TerrainConfig::default()
    });
    let differs = (0..64).any(|i| a.height(i * 7, i * 13) != b.height(i * 7, i * 13));
    assert!(differs);
}

#[test]
fn columns_are_layered_bottom_up() {
    let generator = TerrainGenerator::default();
    let stone = BlockType::STONE.id();
    let dirt = BlockType::DIRT.id();

    for (x, z) in [(0, 0), (123, -45), (-900, 900)] {
        let height = generator.height(x, z);
        assert_eq!(generator.block_for(height - 4, height), stone);
        assert_eq!(generator.block_for(height - 3, height), dirt);
        assert_eq!(generator.block_for(height - 2, height), dirt);
        let surface = generator.block_for(height - 1, height);
        assert!([
            BlockType::STONE.id(),
            BlockType::SAND.id(),
            BlockType::GRASS.id()
        ]
        .contains(&surface));
        assert_eq!(generator.block_for(-1, height), voxel_world::AIR);
    }
}
