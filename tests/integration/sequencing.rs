//! Property tests for step sequencing and state machine soundness
//!
//! Drives the store with arbitrary step interleavings against a tiny model
//! and checks that admissions match the model, step ids stay dense, and
//! replay ordering holds.

use std::collections::HashMap;

use flowtrace::{StepStatus, TraceError, TraceRecord, TraceStore};
use proptest::prelude::*;
use serde_json::json;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ModelNode {
    Idle,
    Entered,
    Exited,
    Errored,
}

fn model_admits(current: ModelNode, status: StepStatus) -> bool {
    match (current, status) {
        (ModelNode::Entered, StepStatus::Enter) => false,
        (_, StepStatus::Enter) => true,
        (ModelNode::Entered, StepStatus::Exit) => true,
        (_, StepStatus::Exit) => false,
        (ModelNode::Entered, StepStatus::Error) => true,
        (_, StepStatus::Error) => false,
    }
}

fn model_next(status: StepStatus) -> ModelNode {
    match status {
        StepStatus::Enter => ModelNode::Entered,
        StepStatus::Exit => ModelNode::Exited,
        StepStatus::Error => ModelNode::Errored,
    }
}

fn status_strategy() -> impl Strategy<Value = StepStatus> {
    prop_oneof![
        Just(StepStatus::Enter),
        Just(StepStatus::Exit),
        Just(StepStatus::Error),
    ]
}

proptest! {
    /// Arbitrary interleavings: every admission matches the model, admitted
    /// step ids are exactly 1..=n, and replay is env-first in order.
    #[test]
    fn admitted_steps_form_a_dense_sequence(
        ops in proptest::collection::vec((0usize..3, status_strategy()), 1..60)
    ) {
        let nodes = ["alpha", "beta", "gamma"];
        let mut store = TraceStore::new();
        let mut ctx = store.create_env(json!({}), None).unwrap();

        let mut model: HashMap<&str, ModelNode> = HashMap::new();
        let mut terminated = false;
        let mut admitted = 0u64;

        for (n, status) in ops {
            let node = nodes[n];
            let current = *model.get(node).unwrap_or(&ModelNode::Idle);
            let expect_ok = !terminated && model_admits(current, status);

            match store.record_step(&ctx, node, status, None) {
                Ok(next) => {
                    prop_assert!(expect_ok, "store admitted a step the model rejects");
                    admitted += 1;
                    prop_assert_eq!(next.step_id, admitted);
                    model.insert(node, model_next(status));
                    if status == StepStatus::Error {
                        terminated = true;
                    }
                    ctx = next;
                }
                Err(_) => {
                    prop_assert!(!expect_ok, "store rejected a step the model admits");
                }
            }
        }

        let records = store.replay(&ctx.trace_id).unwrap();
        prop_assert_eq!(records.len() as u64, admitted + 1);
        prop_assert!(matches!(records[0], TraceRecord::Env { .. }), "first record must be Env");

        let ids: Vec<u64> = records.iter().filter_map(|r| r.step_id()).collect();
        prop_assert_eq!(ids, (1..=admitted).collect::<Vec<u64>>());
    }

    /// After any run of admitted enter/exit cycles, every previously consumed
    /// context is rejected as out of sequence.
    #[test]
    fn consumed_contexts_stay_dead(cycles in 1usize..10) {
        let mut store = TraceStore::new();
        let mut ctx = store.create_env(json!({}), None).unwrap();
        let mut consumed = Vec::new();

        for _ in 0..cycles {
            consumed.push(ctx.clone());
            ctx = store.record_step(&ctx, "work", StepStatus::Enter, None).unwrap();
            consumed.push(ctx.clone());
            ctx = store.record_step(&ctx, "work", StepStatus::Exit, None).unwrap();
        }

        for stale in consumed {
            let result = store.record_step(&stale, "work", StepStatus::Enter, None);
            prop_assert!(matches!(result, Err(TraceError::OutOfSequence { .. })), "stale context must be rejected as out of sequence");
        }

        prop_assert_eq!(store.replay(&ctx.trace_id).unwrap().len(), 2 * cycles + 1);
    }
}
