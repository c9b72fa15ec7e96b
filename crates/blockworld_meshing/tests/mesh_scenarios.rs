//! # Meshing Scenario Tests
//!
//! Whole-chunk quad counts and the equivalence between the naive and
//! greedy meshers.

use blockworld_core::{BlockId, ChunkCoord, Face, VoxelStore};
use blockworld_meshing::{build_mesh, ChunkMesh, ChunkMesher, MeshAlgorithm, MeshConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ORIGIN: ChunkCoord = ChunkCoord::new(0, 0, 0);

fn fill(store: &mut VoxelStore, size: i32, block: impl Fn(i32, i32, i32) -> BlockId) {
    for x in 0..size {
        for y in 0..size {
            for z in 0..size {
                store.set_voxel(x, y, z, block(x, y, z));
            }
        }
    }
}

/// Unit face cells covered by a mesh: `(face, x, y, z)` where the position
/// is the cell the face belongs to in the sweep plane.
fn covered_cells(mesh: &ChunkMesh) -> Vec<(usize, i32, i32, i32)> {
    let mut cells = Vec::new();
    for quad in 0..mesh.quad_count() {
        let first = quad * 4;
        let normal = [mesh.normals[first * 3], mesh.normals[first * 3 + 1], mesh.normals[first * 3 + 2]];
        let face = Face::ALL
            .into_iter()
            .find(|f| f.normal() == normal)
            .expect("cube quads have axis normals");

        let mut min = [i32::MAX; 3];
        let mut max = [i32::MIN; 3];
        for vertex in first..first + 4 {
            for axis in 0..3 {
                let c = mesh.positions[vertex * 3 + axis].round() as i32;
                min[axis] = min[axis].min(c);
                max[axis] = max[axis].max(c);
            }
        }

        let axis = face.axis();
        max[axis] = min[axis] + 1;
        for x in min[0]..max[0] {
            for y in min[1]..max[1] {
                for z in min[2]..max[2] {
                    cells.push((face.index(), x, y, z));
                }
            }
        }
    }
    cells.sort_unstable();
    cells
}

/// Test: A chunk full of stone shows only its 32x32 boundary faces.
#[test]
fn test_homogeneous_stone_chunk() {
    let mut store = VoxelStore::default();
    fill(&mut store, 32, |_, _, _| BlockId::STONE);

    let naive = build_mesh(&store, ORIGIN, MeshAlgorithm::Naive);
    assert_eq!(naive.quad_count(), 6 * 32 * 32);

    let greedy = build_mesh(&store, ORIGIN, MeshAlgorithm::Greedy);
    assert_eq!(greedy.quad_count(), 6);
    assert_eq!(greedy.vertex_count(), 24);
    let extent = greedy.positions.iter().copied().fold(f32::MIN, f32::max);
    assert_eq!(extent, 32.0);
}

/// Test: Air chunks, allocated or not, mesh to nothing.
#[test]
fn test_air_chunk() {
    let mut store = VoxelStore::default();
    assert!(build_mesh(&store, ORIGIN, MeshAlgorithm::Naive).is_empty());

    store.set_voxel(4, 4, 4, BlockId::STONE);
    store.set_voxel(4, 4, 4, BlockId::AIR);
    for algorithm in [MeshAlgorithm::Naive, MeshAlgorithm::Greedy] {
        let mesh = build_mesh(&store, ORIGIN, algorithm);
        assert!(mesh.is_empty());
        assert!(mesh.positions.is_empty());
    }
}

/// Test: On a 3D checkerboard nothing merges; both meshers emit every face.
#[test]
fn test_checkerboard() {
    let mut store = VoxelStore::default();
    fill(&mut store, 32, |x, y, z| {
        if (x + y + z) % 2 == 0 {
            BlockId::STONE
        } else {
            BlockId::AIR
        }
    });

    let expected = 6 * 32 * 32 * 32 / 2;
    let naive = build_mesh(&store, ORIGIN, MeshAlgorithm::Naive);
    let greedy = build_mesh(&store, ORIGIN, MeshAlgorithm::Greedy);
    assert_eq!(naive.quad_count(), expected);
    assert_eq!(greedy.quad_count(), expected);
    assert_eq!(naive.vertex_count(), greedy.vertex_count());
}

/// Test: Two chests side by side along X draw one double-width box.
#[test]
fn test_double_chest() {
    let mut store = VoxelStore::default();
    store.set_voxel(0, 80, 0, BlockId::CHEST);
    store.set_voxel(1, 80, 0, BlockId::CHEST);

    let coord = ChunkCoord::new(0, 2, 0);
    for algorithm in [MeshAlgorithm::Naive, MeshAlgorithm::Greedy] {
        let mesh = build_mesh(&store, coord, algorithm);
        assert_eq!(mesh.quad_count(), 6, "{algorithm:?}");

        let xs = mesh.positions.iter().step_by(3).copied();
        let (min, max) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        assert!((min - 1.0 / 16.0).abs() < 1e-6);
        assert!((max - 31.0 / 16.0).abs() < 1e-6);
    }
}

/// Test: A water cube hides its internal faces.
#[test]
fn test_water_cube() {
    let mut store = VoxelStore::default();
    for x in 10..13 {
        for y in 10..13 {
            for z in 10..13 {
                store.set_voxel(x, y, z, BlockId::WATER);
            }
        }
    }
    assert_eq!(build_mesh(&store, ORIGIN, MeshAlgorithm::Naive).quad_count(), 54);
    assert_eq!(build_mesh(&store, ORIGIN, MeshAlgorithm::Greedy).quad_count(), 6);
}

/// Test: Border faces are culled against the neighbouring chunk.
#[test]
fn test_border_faces_see_neighbours() {
    let mut store = VoxelStore::default();
    store.set_voxel(31, 0, 0, BlockId::STONE);
    assert_eq!(build_mesh(&store, ORIGIN, MeshAlgorithm::Naive).quad_count(), 6);

    store.set_voxel(32, 0, 0, BlockId::STONE);
    assert_eq!(build_mesh(&store, ORIGIN, MeshAlgorithm::Naive).quad_count(), 5);
    assert_eq!(build_mesh(&store, ChunkCoord::new(1, 0, 0), MeshAlgorithm::Greedy).quad_count(), 5);
}

/// Test: Greedy rectangles cover exactly the faces the naive mesher emits,
/// over randomly filled chunks.
#[test]
fn test_greedy_covers_naive_faces() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let palette = [BlockId::STONE, BlockId::DIRT, BlockId::GLASS, BlockId::WATER, BlockId::LEAVES];

    for _ in 0..8 {
        let density = rng.gen_range(0.1..0.9);
        let mut store = VoxelStore::default();
        for x in -1..17 {
            for y in 0..17 {
                for z in -1..17 {
                    if rng.gen_bool(density) {
                        store.set_voxel(x, y, z, palette[rng.gen_range(0..palette.len())]);
                    }
                }
            }
        }

        let naive = build_mesh(&store, ORIGIN, MeshAlgorithm::Naive);
        let greedy = build_mesh(&store, ORIGIN, MeshAlgorithm::Greedy);
        assert!(greedy.quad_count() <= naive.quad_count());
        assert_eq!(covered_cells(&greedy), covered_cells(&naive));
    }
}

/// Test: Index buffers only reference emitted vertices.
#[test]
fn test_indices_in_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut store = VoxelStore::default();
    let blocks = [
        BlockId::STONE,
        BlockId::TALL_GRASS,
        BlockId::FENCE,
        BlockId::CHEST,
        BlockId::TORCH,
        BlockId::STAIRS,
        BlockId::WATER,
    ];
    for _ in 0..2_000 {
        let (x, y, z) = (rng.gen_range(0..32), rng.gen_range(0..32), rng.gen_range(0..32));
        store.set_voxel(x, y, z, blocks[rng.gen_range(0..blocks.len())]);
    }

    let mut mesher = ChunkMesher::new(MeshConfig::default());
    for algorithm in [MeshAlgorithm::Naive, MeshAlgorithm::Greedy] {
        mesher = ChunkMesher::new(mesher.config().with_algorithm(algorithm));
        let mesh = mesher.mesh(&store, ORIGIN);
        let vertices = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < vertices));
        assert_eq!(mesh.uvs.len(), mesh.vertex_count() * 2);
        assert_eq!(mesh.colors.len(), mesh.positions.len());
        assert_eq!(mesh.interleaved().len(), mesh.vertex_count());
    }
}
