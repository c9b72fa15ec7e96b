//! # Worker Pool Tests
//!
//! Background generation must produce the same world as generating on the
//! calling thread, and abandoned results must never reach the store.

use std::collections::BTreeMap;
use std::sync::Arc;

use blockworld_core::{BlockId, ChunkShape, ColumnCoord, VoxelStore};
use blockworld_procedural::{
    GenerationError, GenerationWorkers, TerrainConfig, TerrainGenerator, WorkerPoolConfig, WorldSeed,
};

fn grid() -> Vec<ColumnCoord> {
    let mut columns = Vec::new();
    for x in -1..=1 {
        for z in -1..=1 {
            columns.push(ColumnCoord::new(x, z));
        }
    }
    columns
}

/// Test: A 3x3 grid generated by four workers matches per-column direct
/// generation for every column's own chunks below the tree line.
#[test]
fn test_pool_generates_grid() {
    let generator = Arc::new(TerrainGenerator::new(WorldSeed::new(5), TerrainConfig::default()));
    let pool = GenerationWorkers::spawn(
        Arc::clone(&generator),
        ChunkShape::default(),
        WorkerPoolConfig {
            threads: 4,
            queue_capacity: 16,
        },
    )
    .unwrap();

    let mut store = VoxelStore::default();
    for column in grid() {
        pool.request(column).unwrap();
    }
    let mut installed = pool.wait_all(&mut store).unwrap();
    installed.sort();
    let mut expected = grid();
    expected.sort();
    assert_eq!(installed, expected);
    assert_eq!(pool.pending_count(), 0);

    for column in grid() {
        let mut direct = VoxelStore::default();
        let report = generator.generate_column(&mut direct, column).unwrap();
        for lz in 0..32 {
            for lx in 0..32 {
                let (x, z) = (column.x * 32 + lx as i32, column.z * 32 + lz as i32);
                assert_eq!(store.get_voxel(x, 0, z), BlockId::BEDROCK);
                // Terrain below the surface is untouched by any tree.
                let height = report.height_at(lx, lz);
                for y in 1..height {
                    assert_eq!(store.get_voxel(x, y, z), direct.get_voxel(x, y, z), "({x}, {y}, {z})");
                }
            }
        }
    }
}

/// Test: A full queue is reported, not blocked on.
#[test]
fn test_queue_full() {
    let generator = Arc::new(TerrainGenerator::new(WorldSeed::new(5), TerrainConfig::default()));
    let pool = GenerationWorkers::spawn(
        generator,
        ChunkShape::default(),
        WorkerPoolConfig {
            threads: 1,
            queue_capacity: 1,
        },
    )
    .unwrap();

    let mut full = false;
    for x in 0..64 {
        match pool.request(ColumnCoord::new(x, 0)) {
            Ok(()) => {}
            Err(GenerationError::QueueFull { capacity }) => {
                assert_eq!(capacity, 1);
                full = true;
                break;
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert!(full);
}

/// Test: A cancelled neighbour's result is dropped and the store keeps the
/// exact bytes it had before the request.
#[test]
fn test_cancelled_neighbour_leaves_store_identical() {
    let generator = Arc::new(TerrainGenerator::new(WorldSeed::new(7), TerrainConfig::default()));
    let pool = GenerationWorkers::spawn(
        Arc::clone(&generator),
        ChunkShape::default(),
        WorkerPoolConfig::default(),
    )
    .unwrap();

    let mut store = VoxelStore::default();
    pool.request(ColumnCoord::new(0, 0)).unwrap();
    pool.wait_all(&mut store).unwrap();
    store.take_dirty_set();
    let snapshot = |store: &VoxelStore| -> BTreeMap<(i32, i32, i32), Vec<u8>> {
        store
            .chunk_coords()
            .map(|c| ((c.x, c.y, c.z), store.export_chunk(c).unwrap()))
            .collect()
    };
    let before = snapshot(&store);

    pool.request(ColumnCoord::new(1, 0)).unwrap();
    assert!(pool.cancel(ColumnCoord::new(1, 0)));
    // Give the worker time to report; the result must be discarded.
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(pool.drain_completed(&mut store).is_empty());

    assert_eq!(snapshot(&store), before);
    assert_eq!(store.dirty_count(), 0);
}
