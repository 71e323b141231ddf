use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info};

use crate::config::Density;
use crate::scene::objects::{SceneSet, build_scene};

pub enum SceneCommand {
    Rebuild { generation: u64, density: Density },
    Stop,
}

#[derive(Default)]
pub struct BuildStats {
    pub builds: AtomicU64,
    pub last_build_ms: Mutex<f32>,
    pub vertices: AtomicUsize,
    pub triangles: AtomicUsize,
    pub fps: Mutex<f32>,
}

/// Rebuilds scene sets off the render thread.
///
/// Each request gets a fresh generation number; [`SceneEngine::accept`] only
/// lets through the set for the newest request.
pub struct SceneEngine {
    tx_cmd: Sender<SceneCommand>,
    rx_set: Receiver<SceneSet>,
    stats: Arc<BuildStats>,
    latest_generation: u64,
    thread_handle: Option<JoinHandle<()>>,
}

impl SceneEngine {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<SceneCommand>();
        let (tx_set, rx_set) = channel::bounded::<SceneSet>(2);
        let stats = Arc::new(BuildStats::default());
        let stats_clone = Arc::clone(&stats);

        let thread_handle = thread::spawn(move || {
            builder_thread(rx_cmd, tx_set, stats_clone);
        });

        Self {
            tx_cmd,
            rx_set,
            stats,
            latest_generation: 0,
            thread_handle: Some(thread_handle),
        }
    }

    /// Queues a full rebuild and returns its generation.
    pub fn rebuild(&mut self, density: Density) -> u64 {
        self.latest_generation += 1;
        let generation = self.latest_generation;
        let _ = self.tx_cmd.send(SceneCommand::Rebuild {
            generation,
            density,
        });
        generation
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Next finished set that is still current, dropping any stale ones.
    pub fn try_recv_set(&self) -> Option<SceneSet> {
        let mut current = None;
        while let Ok(set) = self.rx_set.try_recv() {
            if let Some(set) = self.accept(set) {
                current = Some(set);
            }
        }
        current
    }

    pub fn accept(&self, set: SceneSet) -> Option<SceneSet> {
        if set.generation == self.latest_generation {
            Some(set)
        } else {
            debug!(
                generation = set.generation,
                latest = self.latest_generation,
                "dropping stale scene set"
            );
            None
        }
    }

    pub fn stats(&self) -> &Arc<BuildStats> {
        &self.stats
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(SceneCommand::Stop);
    }
}

impl Drop for SceneEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(SceneCommand::Stop);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn builder_thread(rx_cmd: Receiver<SceneCommand>, tx_set: Sender<SceneSet>, stats: Arc<BuildStats>) {
    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        let (mut generation, mut density) = match cmd {
            SceneCommand::Rebuild {
                generation,
                density,
            } => (generation, density),
            SceneCommand::Stop => return,
        };

        // Slider drags queue many requests; only the newest is worth building.
        while let Ok(next) = rx_cmd.try_recv() {
            match next {
                SceneCommand::Rebuild {
                    generation: g,
                    density: d,
                } => {
                    generation = g;
                    density = d;
                }
                SceneCommand::Stop => return,
            }
        }

        let start = Instant::now();
        let set = build_scene(generation, density);
        let elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;

        stats.builds.fetch_add(1, Ordering::Relaxed);
        stats.vertices.store(set.vertex_count(), Ordering::Relaxed);
        stats.triangles.store(set.triangle_count(), Ordering::Relaxed);
        *stats.last_build_ms.lock() = elapsed_ms;

        info!(
            generation,
            density = density.get(),
            vertices = set.vertex_count(),
            ms = elapsed_ms as f64,
            "scene rebuilt"
        );

        if tx_set.send(set).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for_set(engine: &SceneEngine) -> SceneSet {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(set) = engine.try_recv_set() {
                return set;
            }
            assert!(Instant::now() < deadline, "scene builder timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_rebuild_delivers_current_set() {
        let mut engine = SceneEngine::new();
        let generation = engine.rebuild(Density::new(8).unwrap());
        let set = wait_for_set(&engine);
        assert_eq!(set.generation, generation);
        assert_eq!(set.objects.len(), 9);
        assert_eq!(engine.stats().builds.load(Ordering::Relaxed), 1);
        assert_eq!(engine.stats().vertices.load(Ordering::Relaxed), set.vertex_count());
    }

    #[test]
    fn test_stale_generation_rejected() {
        let mut engine = SceneEngine::new();
        engine.rebuild(Density::new(8).unwrap());
        engine.rebuild(Density::new(16).unwrap());
        let old = build_scene(1, Density::new(8).unwrap());
        assert!(engine.accept(old).is_none());
        let fresh = build_scene(2, Density::new(16).unwrap());
        assert!(engine.accept(fresh).is_some());
    }

    #[test]
    fn test_latest_density_wins() {
        let mut engine = SceneEngine::new();
        for d in [8, 12, 16, 20] {
            engine.rebuild(Density::new(d).unwrap());
        }
        let set = wait_for_set(&engine);
        assert_eq!(set.generation, engine.latest_generation());
        assert_eq!(set.density.get(), 20);
    }
}
