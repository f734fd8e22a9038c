//! # Recompute Orchestrator
//!
//! Owns the hole set and the recompute lifecycle. A recompute runs in
//! phases: wait out the settle delay, wait a few render frames, capture the
//! source mesh (with bounded retries), merge the cutters, submit the
//! subtraction, and publish the result.
//!
//! Every submission is tagged with the orchestrator's current epoch. A drag
//! gesture bumps the epoch, so a result arriving for an older epoch is
//! discarded instead of clobbering the geometry the user is still moving.

use crate::state::OrchestratorState;
use config::constants::{
    CutterConfig, RENDER_SETTLE_FRAMES, SETTLE_DELAY, SOURCE_RETRY_DELAY, SOURCE_RETRY_LIMIT,
};
use jigforge_holes::{merge_hole_set, PlacedHole, PlacementContext};
use jigforge_mesh::MeshBuffers;
use jigforge_worker::{CsgBackend, WorkerRequest, WorkerResponse};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Timing knobs for the pending-recompute phases.
#[derive(Debug, Clone, Copy)]
pub struct RecomputeTiming {
    /// Delay between scheduling and the frame-wait phase.
    pub settle_delay: Duration,
    /// Render frames to wait before capturing the source mesh.
    pub settle_frames: u32,
    /// Delay between source-capture retries.
    pub source_retry_delay: Duration,
    /// Retries before an unavailable source aborts the recompute.
    pub source_retry_limit: u32,
}

impl Default for RecomputeTiming {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            settle_frames: RENDER_SETTLE_FRAMES,
            source_retry_delay: SOURCE_RETRY_DELAY,
            source_retry_limit: SOURCE_RETRY_LIMIT,
        }
    }
}

impl RecomputeTiming {
    /// All delays zeroed; every phase resolves on the next update.
    pub fn immediate() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            settle_frames: 0,
            source_retry_delay: Duration::ZERO,
            source_retry_limit: SOURCE_RETRY_LIMIT,
        }
    }
}

/// Provides the current source (uncut) mesh, or `None` while the host has
/// no geometry ready.
pub type SourceFn = Box<dyn Fn() -> Option<MeshBuffers>>;

#[derive(Debug, Clone, Copy)]
enum PendingPhase {
    SettleDelay { deadline: Instant },
    FrameWait { frames_left: u32 },
    SourceRetry { deadline: Instant, attempts: u32 },
}

struct InFlight {
    epoch: u64,
    responses: Receiver<WorkerResponse>,
}

/// The recompute state machine.
///
/// Single-threaded and cooperative: the host calls [`update`] once per
/// frame and all phases advance from there.
///
/// [`update`]: CsgOrchestrator::update
pub struct CsgOrchestrator {
    backend: Arc<dyn CsgBackend>,
    source: SourceFn,
    timing: RecomputeTiming,
    cutter: CutterConfig,
    placement: PlacementContext,
    holes: Vec<PlacedHole>,
    state: OrchestratorState,
    epoch: u64,
    next_job_id: u64,
    pending: Option<PendingPhase>,
    in_flight: Option<InFlight>,
    recompute_queued: bool,
    published: Option<MeshBuffers>,
    progress: Option<(usize, usize)>,
    listeners: Vec<Box<dyn Fn(Option<&MeshBuffers>)>>,
}

impl CsgOrchestrator {
    pub fn new(backend: Arc<dyn CsgBackend>, source: SourceFn, placement: PlacementContext) -> Self {
        Self {
            backend,
            source,
            timing: RecomputeTiming::default(),
            cutter: CutterConfig::default(),
            placement,
            holes: Vec::new(),
            state: OrchestratorState::Idle,
            epoch: 0,
            next_job_id: 0,
            pending: None,
            in_flight: None,
            recompute_queued: false,
            published: None,
            progress: None,
            listeners: Vec::new(),
        }
    }

    pub fn with_timing(mut self, timing: RecomputeTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_cutter_config(mut self, cutter: CutterConfig) -> Self {
        self.cutter = cutter;
        self
    }

    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    pub fn is_computing(&self) -> bool {
        self.state == OrchestratorState::Computing
    }

    /// Progress of the in-flight job as (current, total), when the backend
    /// reports it.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.progress
    }

    /// Registers a listener called whenever the published result changes,
    /// including when it is cleared.
    pub fn subscribe(&mut self, listener: impl Fn(Option<&MeshBuffers>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Drops the published result and notifies listeners.
    pub fn clear_result(&mut self) {
        self.published = None;
        self.notify();
    }

    /// The most recently published cut result. `None` while dragging, when
    /// there are no holes, or before the first recompute finishes.
    pub fn result(&self) -> Option<&MeshBuffers> {
        self.published.as_ref()
    }

    /// Replaces the hole set. Does not schedule a recompute by itself;
    /// callers follow up with [`trigger_recompute`].
    ///
    /// [`trigger_recompute`]: CsgOrchestrator::trigger_recompute
    pub fn set_holes(&mut self, holes: Vec<PlacedHole>) {
        self.holes = holes;
    }

    pub fn set_placement(&mut self, placement: PlacementContext) {
        self.placement = placement;
    }

    /// A drag gesture started. Invalidates any in-flight job and clears the
    /// published result, which is stale while geometry moves.
    pub fn start_drag(&mut self) {
        debug!(epoch = self.epoch + 1, "drag started, invalidating recompute");
        self.state = OrchestratorState::Dragging;
        self.epoch += 1;
        self.pending = None;
        self.recompute_queued = false;
        self.published = None;
        self.notify();
    }

    /// The drag gesture ended; schedules a recompute after the settle delay.
    pub fn end_drag(&mut self) {
        if self.state != OrchestratorState::Dragging {
            return;
        }
        self.schedule();
    }

    /// Requests a recompute.
    ///
    /// Ignored while dragging (drag end schedules one), coalesced to a
    /// single follow-up while a job is in flight, and (re)starts the settle
    /// phase otherwise.
    pub fn trigger_recompute(&mut self) {
        match self.state {
            OrchestratorState::Dragging => {}
            OrchestratorState::Computing => self.recompute_queued = true,
            OrchestratorState::Idle | OrchestratorState::PendingRecompute => self.schedule(),
        }
    }

    /// Per-frame pump: collects worker responses and advances the pending
    /// phases.
    pub fn update(&mut self) {
        self.poll_in_flight();
        if self.state == OrchestratorState::PendingRecompute {
            self.drive_pending();
        }
    }

    fn schedule(&mut self) {
        self.state = OrchestratorState::PendingRecompute;
        self.pending = Some(PendingPhase::SettleDelay {
            deadline: Instant::now() + self.timing.settle_delay,
        });
    }

    fn poll_in_flight(&mut self) {
        loop {
            let (response, job_epoch) = match &self.in_flight {
                Some(flight) => match flight.responses.try_recv() {
                    Ok(response) => (Some(response), flight.epoch),
                    Err(TryRecvError::Empty) => return,
                    Err(TryRecvError::Disconnected) => (None, flight.epoch),
                },
                None => return,
            };

            let current =
                self.state == OrchestratorState::Computing && job_epoch == self.epoch;

            let response = match response {
                Some(response) => response,
                None => {
                    warn!("worker channel closed without a terminal response");
                    self.in_flight = None;
                    if current {
                        self.state = OrchestratorState::Idle;
                        self.finish();
                    }
                    return;
                }
            };

            if !current {
                debug!(job_epoch, epoch = self.epoch, "discarding stale worker response");
                self.in_flight = None;
                return;
            }

            match response {
                WorkerResponse::Progress { current, total, .. } => {
                    self.progress = Some((current, total));
                    continue;
                }
                WorkerResponse::Result { job_id, mesh } => {
                    debug!(job_id, triangles = mesh.triangle_count(), "publishing cut result");
                    self.published = Some(mesh);
                    self.notify();
                }
                WorkerResponse::BatchResult { job_id, .. } => {
                    // The orchestrator only submits single subtractions
                    warn!(job_id, "unexpected batch result, ignoring");
                }
                WorkerResponse::Error { job_id, message } => {
                    warn!(job_id, %message, "subtraction failed, keeping previous result");
                }
            }

            self.in_flight = None;
            self.state = OrchestratorState::Idle;
            self.finish();
            return;
        }
    }

    /// After a terminal response, honor a trigger that arrived mid-flight.
    fn finish(&mut self) {
        self.progress = None;
        if self.recompute_queued {
            self.recompute_queued = false;
            self.schedule();
        }
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self.published.as_ref());
        }
    }

    fn drive_pending(&mut self) {
        loop {
            let phase = match self.pending {
                Some(phase) => phase,
                None => return,
            };

            match phase {
                PendingPhase::SettleDelay { deadline } => {
                    if Instant::now() < deadline {
                        return;
                    }
                    self.pending = Some(PendingPhase::FrameWait {
                        frames_left: self.timing.settle_frames,
                    });
                    if self.timing.settle_frames > 0 {
                        // Frame boundaries are counted one per update
                        return;
                    }
                }
                PendingPhase::FrameWait { frames_left } => {
                    if frames_left > 0 {
                        self.pending = Some(PendingPhase::FrameWait {
                            frames_left: frames_left - 1,
                        });
                        return;
                    }
                    self.capture_and_submit(0);
                    return;
                }
                PendingPhase::SourceRetry { deadline, attempts } => {
                    if Instant::now() < deadline {
                        return;
                    }
                    self.capture_and_submit(attempts);
                    return;
                }
            }
        }
    }

    fn capture_and_submit(&mut self, attempts: u32) {
        if self.holes.is_empty() {
            debug!("no holes placed, clearing cut result");
            self.published = None;
            self.pending = None;
            self.state = OrchestratorState::Idle;
            self.notify();
            return;
        }

        let target = match (self.source)() {
            Some(target) => target,
            None => {
                if attempts >= self.timing.source_retry_limit {
                    warn!(attempts, "source mesh unavailable, abandoning recompute");
                    self.pending = None;
                    self.state = OrchestratorState::Idle;
                } else {
                    self.pending = Some(PendingPhase::SourceRetry {
                        deadline: Instant::now() + self.timing.source_retry_delay,
                        attempts: attempts + 1,
                    });
                }
                return;
            }
        };

        let cutter = match merge_hole_set(&self.holes, &self.placement, &self.cutter) {
            Some(cutter) => cutter,
            None => {
                // Every cutter solid failed to build; nothing to cut
                warn!("cutter merge produced no geometry, abandoning recompute");
                self.pending = None;
                self.state = OrchestratorState::Idle;
                return;
            }
        };

        self.next_job_id += 1;
        let job_id = self.next_job_id;
        debug!(job_id, holes = self.holes.len(), "submitting subtraction");

        let responses = self.backend.submit(WorkerRequest::SubtractSingle {
            job_id,
            target,
            cutter,
        });

        self.in_flight = Some(InFlight {
            epoch: self.epoch,
            responses,
        });
        self.pending = None;
        self.state = OrchestratorState::Computing;
    }
}
