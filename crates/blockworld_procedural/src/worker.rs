//! # Background Generation Workers
//!
//! A fixed pool of threads that generate chunk columns off the host thread.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐ request  ┌───────────┐ generate ┌──────────────┐
//! │   Host   │ ───────▶ │  Bounded  │ ───────▶ │  Worker N    │
//! │          │          │  Channel  │          │ (own store)  │
//! │          │ ◀─────── │  Results  │ ◀─────── │              │
//! └──────────┘  drain   └───────────┘  chunks  └──────────────┘
//! ```
//!
//! Workers never touch the host's store. Each task generates into a private
//! [`VoxelStore`] and hands every chunk buffer it produced back to the host,
//! which installs them in [`GenerationWorkers::drain_completed`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use blockworld_core::{Chunk, ChunkShape, ColumnCoord, VoxelStore};

use crate::error::{GenerationError, GenerationResult};
use crate::terrain::{ColumnReport, TerrainGenerator};

/// Worker pool settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerPoolConfig {
    /// Number of generation threads.
    pub threads: usize,
    /// Requests that may wait in the queue.
    pub queue_capacity: usize,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            threads: 2,
            queue_capacity: 256,
        }
    }
}

/// A finished column: the generator's report plus every chunk it wrote.
#[derive(Debug)]
pub struct GeneratedColumn {
    report: ColumnReport,
    chunks: Vec<Chunk>,
}

impl GeneratedColumn {
    /// Generates `column` into a fresh private store.
    ///
    /// The caller's store is only touched by [`Self::install`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Store`] if a chunk buffer cannot be
    /// allocated; the partial output is dropped.
    pub fn generate(generator: &TerrainGenerator, shape: ChunkShape, column: ColumnCoord) -> GenerationResult<Self> {
        Self::build(shape, |store| generator.generate_column(store, column))
    }

    /// [`Self::generate`] with cave carving switched off.
    ///
    /// # Errors
    ///
    /// As [`Self::generate`].
    pub fn generate_without_caves(
        generator: &TerrainGenerator,
        shape: ChunkShape,
        column: ColumnCoord,
    ) -> GenerationResult<Self> {
        Self::build(shape, |store| generator.generate_column_without_caves(store, column))
    }

    fn build(
        shape: ChunkShape,
        fill: impl FnOnce(&mut VoxelStore) -> GenerationResult<ColumnReport>,
    ) -> GenerationResult<Self> {
        let mut store = VoxelStore::new(shape);
        let report = fill(&mut store)?;
        Ok(Self {
            report,
            chunks: store.into_chunks().collect(),
        })
    }

    /// The generated column.
    #[must_use]
    pub const fn column(&self) -> ColumnCoord {
        self.report.column
    }

    /// Generator report.
    #[must_use]
    pub const fn report(&self) -> &ColumnReport {
        &self.report
    }

    /// Chunk buffers, including neighbour chunks reached by trees.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Moves the chunks into `store` and marks each one dirty.
    ///
    /// Chunks of this column win over existing content, except that
    /// generated air never erases a block already there (a neighbour's tree
    /// may have reached in first). Chunks of other columns only fill air.
    ///
    /// Returns the number of chunks installed.
    pub fn install(self, store: &mut VoxelStore) -> usize {
        let column = self.column();
        let installed = self.chunks.len();

        for chunk in self.chunks {
            let coord = chunk.coord();
            let own = coord.column() == column;
            match store.chunk_mut(coord) {
                None => {
                    store.insert_chunk(chunk);
                }
                Some(existing) => merge(existing, &chunk, own),
            }
            store.mark_dirty(coord);
        }
        installed
    }
}

/// Copies `generated` into `existing`.
fn merge(existing: &mut Chunk, generated: &Chunk, overwrite: bool) {
    let n = existing.shape().size();
    for y in 0..n {
        for z in 0..n {
            for x in 0..n {
                let block = generated.get(x, y, z);
                if block.is_air() {
                    continue;
                }
                if overwrite || existing.get(x, y, z).is_air() {
                    existing.set(x, y, z, block);
                }
            }
        }
    }
}

/// Worker pool counters.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Columns generated.
    pub generated: AtomicU64,
    /// Results dropped because the column was cancelled.
    pub discarded: AtomicU64,
    /// Tasks that failed.
    pub failed: AtomicU64,
}

/// A queued request. `ticket` identifies the latest request for a column.
struct Task {
    column: ColumnCoord,
    ticket: u64,
}

struct Outcome {
    column: ColumnCoord,
    ticket: u64,
    result: GenerationResult<GeneratedColumn>,
}

/// Columns requested and not yet installed, by latest ticket.
#[derive(Default)]
struct Pending {
    tickets: HashMap<ColumnCoord, u64>,
    next_ticket: u64,
}

impl Pending {
    fn is_current(&self, column: ColumnCoord, ticket: u64) -> bool {
        self.tickets.get(&column) == Some(&ticket)
    }
}

/// Background terrain generation pool.
pub struct GenerationWorkers {
    requests: Option<Sender<Task>>,
    results: Receiver<Outcome>,
    handles: Vec<JoinHandle<()>>,
    pending: Arc<Mutex<Pending>>,
    stats: Arc<WorkerStats>,
    capacity: usize,
}

impl GenerationWorkers {
    /// Spawns `config.threads` workers sharing `generator`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::WorkersShutDown`] if a thread cannot be
    /// spawned.
    pub fn spawn(
        generator: Arc<TerrainGenerator>,
        shape: ChunkShape,
        config: WorkerPoolConfig,
    ) -> GenerationResult<Self> {
        let capacity = config.queue_capacity.max(1);
        let (request_tx, request_rx) = bounded::<Task>(capacity);
        let (result_tx, result_rx) = unbounded::<Outcome>();
        let pending = Arc::new(Mutex::new(Pending::default()));
        let stats = Arc::new(WorkerStats::default());

        let mut handles = Vec::with_capacity(config.threads);
        for index in 0..config.threads.max(1) {
            let requests = request_rx.clone();
            let results = result_tx.clone();
            let generator = Arc::clone(&generator);
            let pending = Arc::clone(&pending);
            let handle = thread::Builder::new()
                .name(format!("terrain-worker-{index}"))
                .spawn(move || run_worker(&generator, shape, &requests, &results, &pending))
                .map_err(|err| {
                    warn!("failed to spawn terrain worker {index}: {err}");
                    GenerationError::WorkersShutDown
                })?;
            handles.push(handle);
        }
        info!("started {} terrain workers (queue capacity {capacity})", handles.len());

        Ok(Self {
            requests: Some(request_tx),
            results: result_rx,
            handles,
            pending,
            stats,
            capacity,
        })
    }

    /// Queues `column` for generation.
    ///
    /// Requesting a column that is already pending supersedes the earlier
    /// request.
    ///
    /// # Errors
    ///
    /// [`GenerationError::QueueFull`] if the queue is at capacity,
    /// [`GenerationError::WorkersShutDown`] after [`Self::shutdown`].
    pub fn request(&self, column: ColumnCoord) -> GenerationResult<()> {
        let requests = self.requests.as_ref().ok_or(GenerationError::WorkersShutDown)?;

        let mut pending = self.pending.lock();
        let ticket = pending.next_ticket;
        match requests.try_send(Task { column, ticket }) {
            Ok(()) => {
                pending.next_ticket += 1;
                pending.tickets.insert(column, ticket);
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(GenerationError::QueueFull { capacity: self.capacity }),
            Err(TrySendError::Disconnected(_)) => Err(GenerationError::WorkersShutDown),
        }
    }

    /// Abandons any pending request for `column`. A result that arrives
    /// later is discarded.
    ///
    /// Returns true if a request was pending.
    pub fn cancel(&self, column: ColumnCoord) -> bool {
        self.pending.lock().tickets.remove(&column).is_some()
    }

    /// True if `column` has been requested and not yet installed.
    #[must_use]
    pub fn is_pending(&self, column: ColumnCoord) -> bool {
        self.pending.lock().tickets.contains_key(&column)
    }

    /// Number of columns requested and not yet installed.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().tickets.len()
    }

    /// Pool counters.
    #[must_use]
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Installs every finished column into `store` without blocking.
    ///
    /// Results for cancelled columns are dropped. Returns the installed
    /// columns; failures are logged and the column is no longer pending.
    pub fn drain_completed(&self, store: &mut VoxelStore) -> Vec<ColumnCoord> {
        let mut installed = Vec::new();
        while let Ok(outcome) = self.results.try_recv() {
            if let Some(column) = self.accept(outcome, store) {
                installed.push(column);
            }
        }
        installed
    }

    /// Blocks until no column is pending, installing results as they arrive.
    ///
    /// Returns the installed columns.
    ///
    /// # Errors
    ///
    /// [`GenerationError::WorkersShutDown`] if the workers exit first.
    pub fn wait_all(&self, store: &mut VoxelStore) -> GenerationResult<Vec<ColumnCoord>> {
        let mut installed = Vec::new();
        while self.pending_count() > 0 {
            let outcome = self.results.recv().map_err(|_| GenerationError::WorkersShutDown)?;
            if let Some(column) = self.accept(outcome, store) {
                installed.push(column);
            }
        }
        Ok(installed)
    }

    fn accept(&self, outcome: Outcome, store: &mut VoxelStore) -> Option<ColumnCoord> {
        let Outcome { column, ticket, result } = outcome;
        {
            let mut pending = self.pending.lock();
            if !pending.is_current(column, ticket) {
                self.stats.discarded.fetch_add(1, Ordering::Relaxed);
                debug!("discarding stale result for column [{},{}]", column.x, column.z);
                return None;
            }
            pending.tickets.remove(&column);
        }

        match result {
            Ok(generated) => {
                let chunks = generated.install(store);
                self.stats.generated.fetch_add(1, Ordering::Relaxed);
                debug!("installed column [{},{}] ({chunks} chunks)", column.x, column.z);
                Some(column)
            }
            Err(err) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                warn!("generation of column [{},{}] failed: {err}", column.x, column.z);
                None
            }
        }
    }

    /// Stops accepting requests and joins every worker. Queued requests
    /// are still processed; their results stay undrained.
    pub fn shutdown(&mut self) {
        if self.requests.take().is_none() {
            return;
        }
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("terrain worker panicked");
            }
        }
        info!("terrain workers stopped");
    }
}

impl Drop for GenerationWorkers {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    generator: &TerrainGenerator,
    shape: ChunkShape,
    requests: &Receiver<Task>,
    results: &Sender<Outcome>,
    pending: &Mutex<Pending>,
) {
    while let Ok(Task { column, ticket }) = requests.recv() {
        let result = if pending.lock().is_current(column, ticket) {
            GeneratedColumn::generate(generator, shape, column)
        } else {
            Err(GenerationError::Cancelled { column })
        };
        if results.send(Outcome { column, ticket, result }).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::noise::WorldSeed;
    use blockworld_core::{BlockId, ChunkCoord};

    fn workers(seed: i32) -> (GenerationWorkers, Arc<TerrainGenerator>) {
        let generator = Arc::new(TerrainGenerator::new(WorldSeed::new(seed), TerrainConfig::default()));
        let pool = GenerationWorkers::spawn(Arc::clone(&generator), ChunkShape::default(), WorkerPoolConfig::default())
            .unwrap();
        (pool, generator)
    }

    #[test]
    fn test_worker_output_matches_direct_generation() {
        let (pool, generator) = workers(42);
        let mut store = VoxelStore::default();
        pool.request(ColumnCoord::new(0, 0)).unwrap();
        let installed = pool.wait_all(&mut store).unwrap();
        assert_eq!(installed, vec![ColumnCoord::new(0, 0)]);

        let mut direct = VoxelStore::default();
        generator.generate_column(&mut direct, ColumnCoord::new(0, 0)).unwrap();
        for coord in direct.column_chunks(ColumnCoord::new(0, 0)) {
            assert_eq!(store.export_chunk(coord), direct.export_chunk(coord));
        }
        assert!(store.dirty_count() > 0);
    }

    #[test]
    fn test_cancelled_result_is_discarded() {
        let (pool, _) = workers(1);
        let mut store = VoxelStore::default();
        pool.request(ColumnCoord::new(3, 3)).unwrap();
        assert!(pool.cancel(ColumnCoord::new(3, 3)));
        assert!(!pool.is_pending(ColumnCoord::new(3, 3)));

        let installed = pool.wait_all(&mut store).unwrap();
        assert!(installed.is_empty());
        // The worker may not have reported yet; once it does, nothing lands.
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert!(pool.drain_completed(&mut store).is_empty());
        assert!(store.column_chunks(ColumnCoord::new(3, 3)).is_empty());
    }

    #[test]
    fn test_request_after_shutdown_fails() {
        let (mut pool, _) = workers(1);
        pool.shutdown();
        assert!(matches!(
            pool.request(ColumnCoord::new(0, 0)),
            Err(GenerationError::WorkersShutDown)
        ));
    }

    #[test]
    fn test_install_keeps_existing_blocks_under_generated_air() {
        let shape = ChunkShape::default();
        let mut generated = VoxelStore::new(shape);
        generated.set_voxel(0, 40, 0, BlockId::STONE);
        generated.set_voxel(40, 40, 0, BlockId::LEAVES);
        generated.set_voxel(41, 40, 0, BlockId::LEAVES);
        let column = GeneratedColumn {
            report: ColumnReport {
                column: ColumnCoord::new(0, 0),
                size: 32,
                heights: Vec::new(),
                biomes: Vec::new(),
                trees: 0,
            },
            chunks: generated.into_chunks().collect(),
        };

        let mut store = VoxelStore::new(shape);
        store.set_voxel(1, 40, 0, BlockId::LOG);
        store.set_voxel(40, 40, 0, BlockId::STONE);
        assert_eq!(column.install(&mut store), 2);

        assert_eq!(store.get_voxel(0, 40, 0), BlockId::STONE);
        assert_eq!(store.get_voxel(1, 40, 0), BlockId::LOG);
        // Neighbour chunk: only air is filled.
        assert_eq!(store.get_voxel(40, 40, 0), BlockId::STONE);
        assert_eq!(store.get_voxel(41, 40, 0), BlockId::LEAVES);
        assert!(store.is_dirty(ChunkCoord::new(0, 1, 0)));
        assert!(store.is_dirty(ChunkCoord::new(1, 1, 0)));
    }
}
