//! # Worker Pool
//!
//! A fixed pool of worker threads pulling jobs from a shared queue. Each
//! submission gets its own response channel, so responses for concurrent
//! jobs never interleave on the caller side.

use crate::error::WorkerError;
use crate::exec::run_request;
use crate::protocol::{WorkerRequest, WorkerResponse};
use config::constants::DEFAULT_WORKER_COUNT;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{Builder, JoinHandle};
use tracing::debug;

/// The seam between job producers and the boolean engine.
///
/// `submit` hands off a job and returns the channel its responses arrive
/// on. Implementations decide where the work actually runs.
pub trait CsgBackend: Send + Sync {
    fn submit(&self, request: WorkerRequest) -> Receiver<WorkerResponse>;
}

struct Job {
    request: WorkerRequest,
    respond: Sender<WorkerResponse>,
}

/// A pool of worker threads executing subtraction jobs.
pub struct WorkerPool {
    job_tx: Option<Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns a pool with the given number of worker threads.
    pub fn new(workers: usize) -> Result<Self, WorkerError> {
        if workers == 0 {
            return Err(WorkerError::InvalidWorkerCount { count: workers });
        }

        let (job_tx, job_rx) = channel::<Job>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let job_rx = Arc::clone(&job_rx);
            let handle = Builder::new()
                .name(format!("csg-worker-{index}"))
                .spawn(move || worker_loop(&job_rx))?;
            handles.push(handle);
        }

        Ok(Self {
            job_tx: Some(job_tx),
            handles,
        })
    }

    /// Spawns a pool with the default worker count.
    pub fn with_default_size() -> Result<Self, WorkerError> {
        Self::new(DEFAULT_WORKER_COUNT)
    }

    /// Closes the queue and waits for the workers to finish.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        // Dropping the sender ends every worker's recv loop
        self.job_tx = None;
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close();
    }
}

impl CsgBackend for WorkerPool {
    fn submit(&self, request: WorkerRequest) -> Receiver<WorkerResponse> {
        let (respond, responses) = channel();

        if let Some(job_tx) = &self.job_tx {
            debug!(job_id = request.job_id(), "submitting job to pool");
            let _ = job_tx.send(Job { request, respond });
        }
        // A closed pool drops the sender, so the receiver reports
        // disconnection instead of hanging.
        responses
    }
}

fn worker_loop(jobs: &Mutex<Receiver<Job>>) {
    loop {
        let job = {
            let guard = match jobs.lock() {
                Ok(guard) => guard,
                Err(_) => return,
            };
            guard.recv()
        };

        match job {
            Ok(job) => {
                let mut respond = |response| {
                    // A caller that dropped its receiver no longer wants
                    // the responses
                    let _ = job.respond.send(response);
                };
                run_request(job.request, &mut respond);
            }
            Err(_) => return,
        }
    }
}
