//! # Engine Integration Tests
//!
//! Store edits, synchronous and background generation, eviction and the
//! dirty-set driven remesh loop, through the public facade only.

use blockworld::procedural::GenerationError;
use blockworld::{
    BlockId, ChunkCoord, ColumnCoord, ConfigError, Engine, EngineConfig, EngineError, MeshAlgorithm,
};

fn engine(seed: &str) -> Engine {
    Engine::new(EngineConfig::with_seed(seed)).unwrap()
}

/// Test: A generated column is marked dirty and meshes to something.
#[test]
fn test_generate_then_mesh() {
    let mut engine = engine("42");
    let column = ColumnCoord::new(0, 0);
    let report = engine.generate_column(column).unwrap();
    assert_eq!(engine.get_voxel(0, 0, 0), BlockId::BEDROCK);

    let meshes = engine.rebuild_dirty_meshes();
    let loaded = engine.store().column_chunks(column);
    for coord in &loaded {
        assert!(meshes.iter().any(|(c, _)| c == coord), "{coord:?} not rebuilt");
    }
    assert!(meshes.iter().map(|(_, m)| m.quad_count()).sum::<usize>() > 0);
    assert_eq!(engine.store().dirty_count(), 0);

    // The surface chunk has a visible top.
    let top = report.height_at(0, 0);
    let surface = ChunkCoord::new(0, top / 32, 0);
    assert!(!engine.build_mesh(surface).is_empty());
}

/// Test: Background generation of a lone column matches generating it on
/// the calling thread.
#[test]
fn test_background_matches_direct() {
    let column = ColumnCoord::new(2, -3);

    let mut direct = engine("background");
    let report = direct.generate_column(column).unwrap();

    let mut background = engine("background");
    background.request_column(column).unwrap();
    assert!(background.is_pending(column));
    let installed = background.wait_for_columns().unwrap();
    assert_eq!(installed, vec![column]);
    assert_eq!(background.pending_count(), 0);

    let top = report.heights.iter().copied().max().unwrap() + 24;
    for lx in 0..32 {
        for lz in 0..32 {
            let (x, z) = (column.x * 32 + lx, column.z * 32 + lz);
            for y in 0..top {
                assert_eq!(background.get_voxel(x, y, z), direct.get_voxel(x, y, z), "({x}, {y}, {z})");
            }
        }
    }

    // Installed chunks are queued for meshing.
    let dirty = background.take_dirty_set();
    for coord in background.store().column_chunks(column) {
        assert!(dirty.contains(&coord));
    }
}

/// Test: Evicting a column unloads it and abandons its pending request.
#[test]
fn test_evict_column() {
    let mut engine = engine("evict");
    let column = ColumnCoord::new(0, 0);
    engine.generate_column(column).unwrap();
    assert!(engine.evict_column(column) > 0);
    assert_eq!(engine.get_voxel(5, 0, 5), BlockId::AIR);
    assert!(engine.store().column_chunks(column).is_empty());
    assert!(engine.take_dirty_set().iter().all(|c| c.column() != column));

    engine.request_column(column).unwrap();
    engine.evict_column(column);
    assert!(!engine.is_pending(column));

    let other = ColumnCoord::new(5, 5);
    engine.request_column(other).unwrap();
    let installed = engine.wait_for_columns().unwrap();
    assert_eq!(installed, vec![other]);
    assert!(!engine.pump().contains(&column));
}

/// Test: Edits on a chunk border mark the neighbouring chunk dirty.
#[test]
fn test_border_edit_marks_neighbour() {
    let mut engine = engine("edits");
    assert!(engine.set_voxel(31, 5, 5, BlockId::STONE));
    assert!(engine.set_voxel(32, 5, 5, BlockId::STONE));
    engine.take_dirty_set();

    assert!(engine.set_voxel(31, 5, 5, BlockId::AIR));
    assert_eq!(
        engine.take_dirty_set(),
        vec![ChunkCoord::new(0, 0, 0), ChunkCoord::new(1, 0, 0)]
    );

    // Writes below the world are dropped.
    assert!(!engine.set_voxel(0, -1, 0, BlockId::STONE));
    assert!(engine.take_dirty_set().is_empty());
}

/// Test: The configured algorithm drives dirty rebuilds.
#[test]
fn test_mesh_algorithm_from_config() {
    let text = "seed = \"1\"\n[mesh]\nalgorithm = \"naive\"\n";
    let mut naive = Engine::new(EngineConfig::from_toml_str(text).unwrap()).unwrap();
    let mut greedy = engine("1");

    for engine in [&mut naive, &mut greedy] {
        for x in 0..4 {
            for y in 0..4 {
                for z in 0..4 {
                    engine.set_voxel(x, y, z, BlockId::STONE);
                }
            }
        }
    }

    let quads = |meshes: Vec<(ChunkCoord, blockworld::ChunkMesh)>| meshes.iter().map(|(_, m)| m.quad_count()).sum::<usize>();
    assert_eq!(quads(naive.rebuild_dirty_meshes()), 6 * 16);
    assert_eq!(quads(greedy.rebuild_dirty_meshes()), 6);
    assert_eq!(
        greedy.build_mesh_with(ChunkCoord::new(0, 0, 0), MeshAlgorithm::Naive).quad_count(),
        6 * 16
    );
}

/// Test: Invalid configuration is rejected before any thread starts.
#[test]
fn test_invalid_config() {
    let mut config = EngineConfig::default();
    config.workers.threads = 0;
    assert!(matches!(Engine::new(config), Err(EngineError::Config(ConfigError::Invalid(_)))));
}

/// Test: Same seed, same world; text seeds are hashed.
#[test]
fn test_seed_determinism() {
    let mut a = engine("hello world");
    let mut b = engine("hello world");
    let mut c = engine("hello worle");
    let column = ColumnCoord::new(-1, 4);
    let ra = a.generate_column(column).unwrap();
    let rb = b.generate_column(column).unwrap();
    let rc = c.generate_column(column).unwrap();
    assert_eq!(ra.heights, rb.heights);
    assert_ne!(ra.heights, rc.heights);
    assert_eq!(a.seed(), b.seed());
}

/// Test: A full request queue surfaces as an engine error, and the rejected
/// column is not left pending.
#[test]
fn test_full_queue_is_reported() {
    let mut config = EngineConfig::with_seed("queue");
    config.workers.threads = 1;
    config.workers.queue_capacity = 1;
    let mut engine = Engine::new(config).unwrap();

    let mut rejected = None;
    for x in 0..64 {
        let column = ColumnCoord::new(x, 0);
        if let Err(err) = engine.request_column(column) {
            rejected = Some((column, err));
            break;
        }
    }
    match rejected {
        Some((column, EngineError::Generation(GenerationError::QueueFull { capacity }))) => {
            assert_eq!(capacity, 1);
            assert!(!engine.is_pending(column));
        }
        other => panic!("expected a full queue, got {other:?}"),
    }

    let installed = engine.wait_for_columns().unwrap();
    assert!(!installed.is_empty());
    assert_eq!(engine.pending_count(), 0);
}

/// Test: Direct generation of a neighbouring grid gives the same world in
/// either order.
#[test]
fn test_grid_generation_order_does_not_matter() {
    let mut columns = Vec::new();
    for x in 0..4 {
        for z in 0..4 {
            columns.push(ColumnCoord::new(x, z));
        }
    }

    let mut forward = engine("7");
    for &column in &columns {
        forward.generate_column(column).unwrap();
    }
    let mut reverse = engine("7");
    for &column in columns.iter().rev() {
        reverse.generate_column(column).unwrap();
    }

    let mut coords: Vec<ChunkCoord> = forward.store().chunk_coords().collect();
    coords.sort_unstable_by_key(|c| (c.x, c.y, c.z));
    let mut other: Vec<ChunkCoord> = reverse.store().chunk_coords().collect();
    other.sort_unstable_by_key(|c| (c.x, c.y, c.z));
    assert_eq!(coords, other);
    for coord in coords {
        assert_eq!(
            forward.store().export_chunk(coord),
            reverse.store().export_chunk(coord),
            "{coord:?}"
        );
    }
}
