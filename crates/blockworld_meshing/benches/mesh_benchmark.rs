//! Benchmark for naive vs greedy chunk meshing.
//!
//! Run with: cargo bench --package blockworld_meshing --bench mesh_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockworld_core::{BlockId, ChunkCoord, VoxelStore};
use blockworld_meshing::{ChunkMesher, MeshAlgorithm, MeshConfig};

/// Rolling terrain: stone below a sine-shaped grass surface.
fn hills() -> VoxelStore {
    let mut store = VoxelStore::default();
    for x in 0..32 {
        for z in 0..32 {
            let height = 12 + ((x as f32 * 0.3).sin() * 4.0 + (z as f32 * 0.2).cos() * 4.0) as i32;
            for y in 0..height {
                store.set_voxel(x, y, z, BlockId::STONE);
            }
            store.set_voxel(x, height, z, BlockId::GRASS);
            if (x * 7 + z * 13) % 11 == 0 {
                store.set_voxel(x, height + 1, z, BlockId::TALL_GRASS);
            }
        }
    }
    store
}

fn checkerboard() -> VoxelStore {
    let mut store = VoxelStore::default();
    for x in 0..32 {
        for y in 0..32 {
            for z in 0..32 {
                if (x + y + z) % 2 == 0 {
                    store.set_voxel(x, y, z, BlockId::STONE);
                }
            }
        }
    }
    store
}

fn benchmark_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_chunk");
    group.sample_size(20);

    for (name, store) in [("hills", hills()), ("checkerboard", checkerboard())] {
        for algorithm in [MeshAlgorithm::Naive, MeshAlgorithm::Greedy] {
            let mut mesher = ChunkMesher::new(MeshConfig::default().with_algorithm(algorithm));
            group.bench_function(format!("{name}/{algorithm:?}"), |b| {
                b.iter(|| black_box(mesher.mesh(&store, black_box(ChunkCoord::new(0, 0, 0))).quad_count()));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_mesh);
criterion_main!(benches);
