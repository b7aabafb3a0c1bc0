//! Face rendering, either inline or across a fixed pool of worker threads.
//!
//! The six faces of one panorama are independent. With more than one worker
//! they are rendered in parallel, collected, and handed back in emission order,
//! so the bytes written never depend on the worker count.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded};
use equicube_cubemap::{EquirectangularImage, FaceImage, SkyboxFace, render_face};

use crate::PipelineError;

const FACE_COUNT: usize = SkyboxFace::ALL.len();

/// A request to render one face of one panorama.
struct FaceJob {
    source: Arc<EquirectangularImage>,
    face: SkyboxFace,
    face_size: u32,
}

/// A finished (or failed) face coming back from a worker.
struct RenderedFace {
    face: SkyboxFace,
    result: Result<FaceImage, PipelineError>,
    render_time: Duration,
}

/// A fixed set of named worker threads rendering faces.
pub struct FaceWorkerPool {
    /// Sender for submitting jobs. `None` once the pool is shutting down.
    job_sender: Option<Sender<FaceJob>>,
    /// Receiver for finished faces.
    result_receiver: Receiver<RenderedFace>,
    workers: Vec<JoinHandle<()>>,
}

impl FaceWorkerPool {
    /// Spawn `thread_count` workers (at least one).
    pub fn new(thread_count: usize) -> Result<Self, PipelineError> {
        let thread_count = thread_count.max(1);
        // Both channels hold a whole cubemap, so submitting six jobs never
        // waits on the collector.
        let (job_sender, job_receiver) = bounded::<FaceJob>(FACE_COUNT);
        let (result_sender, result_receiver) = bounded::<RenderedFace>(FACE_COUNT);

        let mut workers = Vec::with_capacity(thread_count);
        for index in 0..thread_count {
            let receiver = job_receiver.clone();
            let sender = result_sender.clone();

            let handle = std::thread::Builder::new()
                .name(format!("face-worker-{index}"))
                .spawn(move || worker_loop(&receiver, &sender))
                .map_err(|e| PipelineError::WorkerPool(format!("failed to spawn worker: {e}")))?;
            workers.push(handle);
        }

        tracing::debug!(threads = thread_count, "face worker pool started");
        Ok(Self {
            job_sender: Some(job_sender),
            result_receiver,
            workers,
        })
    }

    /// A pool with one worker per logical CPU.
    pub fn with_cpu_count() -> Result<Self, PipelineError> {
        Self::new(num_cpus::get())
    }

    /// Number of worker threads.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Render all six faces of `source`, returned in emission order.
    fn render_all(
        &self,
        source: &Arc<EquirectangularImage>,
        face_size: u32,
    ) -> Result<Vec<RenderedFace>, PipelineError> {
        let sender = self
            .job_sender
            .as_ref()
            .ok_or_else(|| PipelineError::WorkerPool("pool is shut down".to_string()))?;

        for face in SkyboxFace::ALL {
            let job = FaceJob {
                source: Arc::clone(source),
                face,
                face_size,
            };
            sender
                .send(job)
                .map_err(|_| PipelineError::WorkerPool("all workers have exited".to_string()))?;
        }

        let mut slots: [Option<RenderedFace>; FACE_COUNT] = Default::default();
        for _ in 0..FACE_COUNT {
            let rendered = self
                .result_receiver
                .recv()
                .map_err(|_| PipelineError::WorkerPool("all workers have exited".to_string()))?;
            let index = rendered.face as usize;
            slots[index] = Some(rendered);
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| PipelineError::WorkerPool("a face was never rendered".into()))
            })
            .collect()
    }
}

impl Drop for FaceWorkerPool {
    fn drop(&mut self) {
        // Closing the job channel ends every worker loop.
        self.job_sender.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("face worker exited with a panic");
            }
        }
    }
}

fn worker_loop(receiver: &Receiver<FaceJob>, sender: &Sender<RenderedFace>) {
    while let Ok(job) = receiver.recv() {
        let start = Instant::now();
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            render_face(&job.source, job.face.spec(), job.face_size)
        }));
        let result = match outcome {
            Ok(rendered) => rendered.map_err(PipelineError::from),
            Err(_) => Err(PipelineError::WorkerPool(format!(
                "worker panicked while rendering {}",
                job.face
            ))),
        };

        let rendered = RenderedFace {
            face: job.face,
            result,
            render_time: start.elapsed(),
        };
        if sender.send(rendered).is_err() {
            break;
        }
    }
}

/// Renders the six faces of a panorama, inline or on a worker pool.
pub enum FaceRenderer {
    /// Render on the calling thread, one face at a time.
    Inline,
    /// Render all faces in parallel on a worker pool.
    Pool(FaceWorkerPool),
}

impl FaceRenderer {
    /// Pick a renderer for a worker count: 1 is inline, 0 is one worker per CPU.
    pub fn for_workers(workers: usize) -> Result<Self, PipelineError> {
        match workers {
            1 => Ok(FaceRenderer::Inline),
            0 => FaceWorkerPool::with_cpu_count().map(FaceRenderer::Pool),
            n => FaceWorkerPool::new(n).map(FaceRenderer::Pool),
        }
    }

    /// Number of threads rendering faces.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        match self {
            FaceRenderer::Inline => 1,
            FaceRenderer::Pool(pool) => pool.thread_count(),
        }
    }

    /// Render each face of `source` and pass it to `emit` in emission order.
    ///
    /// The first error, from rendering or from `emit`, stops the remaining faces.
    pub fn render_each<F>(
        &self,
        source: &Arc<EquirectangularImage>,
        face_size: u32,
        mut emit: F,
    ) -> Result<(), PipelineError>
    where
        F: FnMut(SkyboxFace, FaceImage, Duration) -> Result<(), PipelineError>,
    {
        match self {
            FaceRenderer::Inline => {
                for face in SkyboxFace::ALL {
                    let start = Instant::now();
                    let image = render_face(source, face.spec(), face_size)?;
                    emit(face, image, start.elapsed())?;
                }
            }
            FaceRenderer::Pool(pool) => {
                for rendered in pool.render_all(source, face_size)? {
                    emit(rendered.face, rendered.result?, rendered.render_time)?;
                }
            }
        }
        Ok(())
    }
}
