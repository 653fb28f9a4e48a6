//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify that the
//! forest agrees with a simple model and passes a full audit after every
//! single operation.

use proptest::prelude::*;
use priority_forest::audit::{audit, audit_structure};
use priority_forest::experiment::{DecreasePolicy, Experiment};
use priority_forest::{NodeKey, PriorityForest};

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Extract,
    Decrease(usize, i32),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-1000i32..1000).prop_map(Op::Insert),
        2 => Just(Op::Extract),
        3 => (any::<usize>(), 0i32..500).prop_map(|(i, d)| Op::Decrease(i, d)),
        1 => any::<usize>().prop_map(Op::Delete),
    ]
}

/// Live nodes with the priority the model expects them to have.
#[derive(Default)]
struct Model {
    live: Vec<(NodeKey, i32, u32)>,
}

impl Model {
    fn min(&self) -> Option<i32> {
        self.live.iter().map(|&(_, p, _)| p).min()
    }

    fn take(&mut self, payload: u32) -> Option<(NodeKey, i32, u32)> {
        let pos = self.live.iter().position(|&(_, _, t)| t == payload)?;
        Some(self.live.swap_remove(pos))
    }
}

fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut forest = PriorityForest::new();
    let mut model = Model::default();
    let mut next_payload = 0u32;
    let mut last_extracted = i32::MIN;

    for op in ops {
        match op {
            Op::Insert(priority) => {
                let handle = forest.insert(priority, next_payload);
                model.live.push((handle, priority, next_payload));
                next_payload += 1;
                last_extracted = i32::MIN;
            }
            Op::Extract => {
                let expected = model.min();
                match forest.extract_min() {
                    Ok((payload, priority)) => {
                        prop_assert_eq!(Some(priority), expected);
                        let (handle, model_priority, _) = model.take(payload).unwrap();
                        prop_assert_eq!(priority, model_priority);
                        prop_assert!(!forest.contains(handle));
                        prop_assert!(last_extracted <= priority);
                        last_extracted = priority;
                    }
                    Err(_) => prop_assert!(expected.is_none()),
                }
            }
            Op::Decrease(index, delta) => {
                if model.live.is_empty() {
                    continue;
                }
                let index = index % model.live.len();
                let (handle, priority, _) = model.live[index];
                forest.decrease(handle, priority - delta).unwrap();
                model.live[index].1 = priority - delta;
                prop_assert_eq!(forest.priority(handle), Some(&(priority - delta)));
                last_extracted = i32::MIN;
            }
            Op::Delete(index) => {
                if model.live.is_empty() {
                    continue;
                }
                let index = index % model.live.len();
                let (handle, priority, payload) = model.live.swap_remove(index);
                prop_assert_eq!(forest.delete(handle), Ok((payload, priority)));
                last_extracted = i32::MIN;
            }
        }

        let report = audit(&forest).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(report.nodes, model.live.len());
        prop_assert_eq!(forest.len(), model.live.len());
        prop_assert_eq!(forest.peek().map(|(p, _)| *p), model.min());
    }

    Ok(())
}

fn run_naive_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut experiment = Experiment::new(DecreasePolicy::Naive);
    let mut model = Model::default();
    let mut next_payload = 0u32;

    for op in ops {
        match op {
            Op::Insert(priority) => {
                let handle = experiment.insert(priority, next_payload);
                model.live.push((handle, priority, next_payload));
                next_payload += 1;
            }
            Op::Extract | Op::Delete(_) => {
                let expected = model.min();
                if let Ok((payload, priority)) = experiment.extract_min() {
                    prop_assert_eq!(Some(priority), expected);
                    prop_assert!(model.take(payload).is_some());
                }
            }
            Op::Decrease(index, delta) => {
                if model.live.is_empty() {
                    continue;
                }
                let index = index % model.live.len();
                let (handle, priority, _) = model.live[index];
                experiment.decrease(handle, priority - delta).unwrap();
                model.live[index].1 = priority - delta;
            }
        }

        audit_structure(experiment.forest()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(experiment.len(), model.live.len());
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_random_sequences_keep_invariants(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(ops)?;
    }

    #[test]
    fn test_naive_sequences_keep_structure(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_naive_ops(ops)?;
    }

    #[test]
    fn test_drain_is_sorted(priorities in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut forest = PriorityForest::new();
        for &p in &priorities {
            forest.insert(p, ());
        }
        let mut expected = priorities.clone();
        expected.sort_unstable();

        let drained: Vec<_> = std::iter::from_fn(|| forest.extract_min().ok()).map(|(_, p)| p).collect();
        prop_assert_eq!(drained, expected);
    }
}
