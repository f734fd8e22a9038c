//! # Request Execution
//!
//! Runs one worker request to completion, emitting responses through a
//! callback. Execution is transport-independent so the same code path
//! serves the thread pool and direct in-process tests.
//!
//! Batch semantics: the cutter is prepared once, each target is evaluated
//! independently, and an item failure is recorded in that item only. A
//! panic inside the boolean kernel is caught and converted to an error
//! response so a worker thread never dies mid-job.

use crate::protocol::{BatchItem, WorkerRequest, WorkerResponse};
use jigforge_csg::{BooleanEvaluator, BooleanOp, Brush, BspEvaluator, CsgError};
use jigforge_mesh::MeshBuffers;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

/// Executes a request, emitting every response through `respond`.
pub fn run_request(request: WorkerRequest, respond: &mut dyn FnMut(WorkerResponse)) {
    match request {
        WorkerRequest::SubtractSingle {
            job_id,
            target,
            cutter,
        } => {
            debug!(job_id, "running single subtraction");
            let evaluator = BspEvaluator;
            let outcome = guarded(|| {
                let cutter = evaluator.prepare(&cutter.to_mesh())?;
                subtract_one(&evaluator, &target, &cutter)
            });

            match outcome {
                Ok(mesh) => respond(WorkerResponse::Result { job_id, mesh }),
                Err(message) => {
                    warn!(job_id, %message, "subtraction failed");
                    respond(WorkerResponse::Error { job_id, message });
                }
            }
        }
        WorkerRequest::SubtractBatch {
            job_id,
            targets,
            cutter,
        } => {
            debug!(job_id, targets = targets.len(), "running batch subtraction");
            let evaluator = BspEvaluator;

            // The shared cutter is prepared once for the whole batch
            let cutter = match guarded(|| evaluator.prepare(&cutter.to_mesh())) {
                Ok(brush) => brush,
                Err(message) => {
                    warn!(job_id, %message, "batch cutter preparation failed");
                    respond(WorkerResponse::Error { job_id, message });
                    return;
                }
            };

            let total = targets.len();
            let mut items = Vec::with_capacity(total);

            for (index, target) in targets.into_iter().enumerate() {
                let outcome = guarded(|| subtract_one(&evaluator, &target.mesh, &cutter));

                let item = match outcome {
                    Ok(mesh) => BatchItem::ok(target.id.clone(), mesh),
                    Err(message) => {
                        warn!(job_id, target_id = %target.id, %message, "batch item failed");
                        BatchItem::failed(target.id.clone(), message)
                    }
                };

                respond(WorkerResponse::Progress {
                    job_id,
                    current: index + 1,
                    total,
                    target_id: target.id,
                });
                items.push(item);
            }

            respond(WorkerResponse::BatchResult { job_id, items });
        }
    }
}

fn subtract_one(
    evaluator: &BspEvaluator,
    target: &MeshBuffers,
    cutter: &Brush,
) -> Result<MeshBuffers, CsgError> {
    let prepared = evaluator.prepare(&target.to_mesh())?;
    let result = evaluator.evaluate(&prepared, cutter, BooleanOp::Subtraction)?;
    Ok(MeshBuffers::from_mesh(&result))
}

/// Runs an evaluation, converting both errors and panics to a message.
fn guarded<T>(op: impl FnOnce() -> Result<T, CsgError>) -> Result<T, String> {
    match catch_unwind(AssertUnwindSafe(op)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.to_string()),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "boolean evaluation panicked".to_string());
            Err(format!("panic during boolean evaluation: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::BatchTarget;
    use glam::DVec3;
    use jigforge_mesh::Mesh;

    fn cube_buffers(size: f64, center: DVec3) -> MeshBuffers {
        let s = size;
        let mut mesh = Mesh::new();
        let corners = [
            DVec3::new(-s, -s, -s),
            DVec3::new(s, -s, -s),
            DVec3::new(s, s, -s),
            DVec3::new(-s, s, -s),
            DVec3::new(-s, -s, s),
            DVec3::new(s, -s, s),
            DVec3::new(s, s, s),
            DVec3::new(-s, s, s),
        ];
        for corner in corners {
            mesh.add_vertex(corner + center);
        }
        let faces: [[u32; 3]; 12] = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
        ];
        for [v0, v1, v2] in faces {
            mesh.add_triangle(v0, v1, v2);
        }
        MeshBuffers::from_mesh(&mesh)
    }

    fn empty_buffers() -> MeshBuffers {
        MeshBuffers {
            positions: Vec::new(),
            normals: None,
            indices: None,
        }
    }

    fn collect(request: WorkerRequest) -> Vec<WorkerResponse> {
        let mut responses = Vec::new();
        run_request(request, &mut |response| responses.push(response));
        responses
    }

    #[test]
    fn test_single_subtraction_result() {
        let responses = collect(WorkerRequest::SubtractSingle {
            job_id: 1,
            target: cube_buffers(2.0, DVec3::ZERO),
            cutter: cube_buffers(1.0, DVec3::new(2.0, 0.0, 0.0)),
        });

        assert_eq!(responses.len(), 1);
        match &responses[0] {
            WorkerResponse::Result { job_id, mesh } => {
                assert_eq!(*job_id, 1);
                assert!(mesh.triangle_count() > 12);
            }
            other => panic!("expected Result, got {other:?}"),
        }
    }

    #[test]
    fn test_single_subtraction_degenerate_target_errors() {
        let responses = collect(WorkerRequest::SubtractSingle {
            job_id: 2,
            target: empty_buffers(),
            cutter: cube_buffers(1.0, DVec3::ZERO),
        });

        assert!(matches!(
            &responses[0],
            WorkerResponse::Error { job_id: 2, .. }
        ));
    }

    #[test]
    fn test_batch_item_failure_does_not_abort() {
        let responses = collect(WorkerRequest::SubtractBatch {
            job_id: 3,
            targets: vec![
                BatchTarget {
                    id: "a".into(),
                    mesh: cube_buffers(2.0, DVec3::ZERO),
                },
                BatchTarget {
                    id: "b".into(),
                    mesh: empty_buffers(),
                },
                BatchTarget {
                    id: "c".into(),
                    mesh: cube_buffers(2.0, DVec3::new(10.0, 0.0, 0.0)),
                },
            ],
            cutter: cube_buffers(1.0, DVec3::new(2.0, 0.0, 0.0)),
        });

        // Three progress messages then the terminal batch result
        assert_eq!(responses.len(), 4);
        for (index, response) in responses[..3].iter().enumerate() {
            match response {
                WorkerResponse::Progress {
                    current, total, ..
                } => {
                    assert_eq!(*current, index + 1);
                    assert_eq!(*total, 3);
                }
                other => panic!("expected Progress, got {other:?}"),
            }
        }

        match &responses[3] {
            WorkerResponse::BatchResult { items, .. } => {
                let flags: Vec<bool> = items.iter().map(|i| i.success).collect();
                assert_eq!(flags, vec![true, false, true]);
                assert!(items[1].error.is_some());
                assert!(items[2].mesh.is_some());
            }
            other => panic!("expected BatchResult, got {other:?}"),
        }
    }

    #[test]
    fn test_batch_degenerate_cutter_fails_whole_job() {
        let responses = collect(WorkerRequest::SubtractBatch {
            job_id: 4,
            targets: vec![BatchTarget {
                id: "a".into(),
                mesh: cube_buffers(1.0, DVec3::ZERO),
            }],
            cutter: empty_buffers(),
        });

        assert_eq!(responses.len(), 1);
        assert!(matches!(
            &responses[0],
            WorkerResponse::Error { job_id: 4, .. }
        ));
    }
}
