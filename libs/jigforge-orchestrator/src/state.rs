//! # Orchestrator States

/// Lifecycle state of the recompute orchestrator.
///
/// Transitions:
/// - `Idle -> Dragging` on drag start, from any state
/// - `Dragging -> PendingRecompute` on drag end
/// - `PendingRecompute -> Computing` once the source mesh is captured and
///   the job is submitted
/// - `Computing -> Idle` when the result is published or discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    /// Nothing in progress; the published result, if any, is current.
    Idle,
    /// A drag gesture is active; recomputes are suppressed.
    Dragging,
    /// A recompute is scheduled and waiting out its settle phases.
    PendingRecompute,
    /// A subtraction job is in flight on the worker backend.
    Computing,
}
