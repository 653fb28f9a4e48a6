//! Concrete scenarios and error cases for the priority forest

use priority_forest::audit::audit;
use priority_forest::{ForestError, PriorityForest};

fn drain<T, P: Ord>(forest: &mut PriorityForest<T, P>) -> Vec<(T, P)> {
    std::iter::from_fn(|| forest.extract_min().ok()).collect()
}

#[test]
fn test_extracts_in_priority_order() {
    let mut forest = PriorityForest::new();
    for (priority, payload) in [(5, 'a'), (3, 'b'), (8, 'c'), (1, 'd'), (9, 'e')] {
        forest.insert(priority, payload);
    }

    assert_eq!(
        drain(&mut forest),
        vec![('d', 1), ('b', 3), ('a', 5), ('c', 8), ('e', 9)]
    );
    assert!(forest.is_empty());
}

#[test]
fn test_consolidated_forest_drains_in_order() {
    let mut forest = PriorityForest::new();
    for i in 0..10 {
        forest.insert(i, Some(i));
    }
    forest.insert(0, None);
    let (_, first) = forest.extract_min().unwrap();
    assert_eq!(first, 0);
    audit(&forest).unwrap();

    let priorities: Vec<_> = drain(&mut forest).into_iter().map(|(_, p)| p).collect();
    assert_eq!(priorities, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_parent_is_cut_on_second_child_loss() {
    let mut forest = PriorityForest::new();
    for i in 0..9 {
        forest.insert(i, ());
    }
    forest.extract_min().unwrap();

    // a single tree of rank 3; take its child of rank 2
    let root = forest.roots().next().unwrap();
    assert_eq!(root.rank(), 3);
    let root_priority = *root.priority().unwrap();
    let parent = root.children().find(|child| child.rank() == 2).unwrap().key();
    let grandchildren: Vec<_> = forest.node(parent).unwrap().children().map(|c| c.key()).collect();
    assert_eq!(grandchildren.len(), 2);

    forest.decrease(grandchildren[0], root_priority - 1).unwrap();
    let view = forest.node(parent).unwrap();
    assert!(forest.node(grandchildren[0]).unwrap().is_root());
    assert!(!view.is_root());
    assert!(view.is_marked());
    audit(&forest).unwrap();

    forest.decrease(grandchildren[1], root_priority - 2).unwrap();
    let view = forest.node(parent).unwrap();
    assert!(view.is_root());
    assert!(!view.is_marked());
    assert_eq!(view.rank(), 0);
    assert!(!forest.roots().next().unwrap().is_marked());
    audit(&forest).unwrap();

    assert_eq!(forest.peek(), Some((&(root_priority - 2), &())));
}

#[test]
fn test_decrease_of_root_keeps_root_set() {
    let mut forest = PriorityForest::new();
    let handles: Vec<_> = (0..5).map(|i| forest.insert(i * 10, i)).collect();
    let before: Vec<_> = forest.roots().map(|r| r.key()).collect();

    forest.decrease(handles[3], -5).unwrap();

    let after: Vec<_> = forest.roots().map(|r| r.key()).collect();
    assert_eq!(before, after);
    assert_eq!(forest.priority(handles[3]), Some(&-5));
    assert_eq!(forest.peek(), Some((&-5, &3)));
}

#[test]
fn test_decrease_without_violation_keeps_tree() {
    let mut forest = PriorityForest::new();
    for i in 0..5 {
        forest.insert(i * 10, i);
    }
    forest.extract_min().unwrap();
    let root = forest.roots().next().unwrap().key();
    let child = forest.node(root).unwrap().children().next().unwrap().key();

    forest.decrease(child, 11).unwrap();

    let view = forest.node(child).unwrap();
    assert_eq!(view.priority(), Some(&11));
    assert_eq!(view.parent().map(|p| p.key()), Some(root));
}

#[test]
fn test_every_payload_returned_once() {
    let mut forest = PriorityForest::new();
    let handles: Vec<_> = (0..200usize).map(|i| forest.insert(((i * 37) % 101) as i32, i)).collect();
    forest.extract_min().unwrap();
    for (i, &h) in handles.iter().enumerate().step_by(3) {
        if let Some(&p) = forest.priority(h) {
            forest.decrease(h, p - (i as i32 % 13)).unwrap();
        }
    }

    let mut seen = vec![false; 200];
    let mut last = i32::MIN;
    let mut count = 1;
    for (payload, priority) in drain(&mut forest) {
        assert!(last <= priority);
        assert!(!seen[payload]);
        seen[payload] = true;
        last = priority;
        count += 1;
    }

    assert_eq!(count, 200);
    assert_eq!(forest.len(), 0);
    assert_eq!(forest.roots().count(), 0);
    assert!(handles.iter().all(|&h| !forest.contains(h)));
}

#[test]
fn test_delete_any_node() {
    let mut forest = PriorityForest::new();
    let handles: Vec<_> = (0..20).map(|i| forest.insert(i, i)).collect();
    forest.extract_min().unwrap();

    for &i in &[7, 1, 19, 12] {
        assert_eq!(forest.delete(handles[i]), Ok((i as i32, i as i32)));
        audit(&forest).unwrap();
    }
    assert_eq!(forest.delete(handles[7]), Err(ForestError::InvalidTarget));

    let payloads: Vec<_> = drain(&mut forest).into_iter().map(|(t, _)| t).collect();
    let expected: Vec<_> = (2..19).filter(|i| ![7, 12].contains(i)).collect();
    assert_eq!(payloads, expected);
}

#[test]
fn test_dump_lists_every_node() {
    let mut forest = PriorityForest::new();
    for i in 0..6 {
        forest.insert(i, i * 2);
    }
    forest.extract_min().unwrap();

    let dump = forest.dump().to_string();
    let mut lines = dump.lines();
    assert_eq!(lines.next(), Some("forest of size 5"));
    assert_eq!(lines.clone().count(), 5);
    assert!(lines.all(|line| line.trim_start().starts_with("- ")));
}

#[test]
fn test_extract_from_empty_forest() {
    let mut forest: PriorityForest<(), i32> = PriorityForest::new();
    assert_eq!(forest.extract_min(), Err(ForestError::EmptyStructure));

    forest.insert(1, ());
    forest.extract_min().unwrap();
    assert_eq!(forest.extract_min(), Err(ForestError::EmptyStructure));
}

#[test]
fn test_increase_is_rejected() {
    let mut forest = PriorityForest::new();
    let h = forest.insert(4, ());
    forest.insert(2, ());

    assert_eq!(forest.decrease(h, 5), Err(ForestError::PriorityOrderViolation));
    assert_eq!(forest.priority(h), Some(&4));
    assert_eq!(forest.decrease(h, 4), Ok(()));
    assert_eq!(forest.len(), 2);
}

#[test]
fn test_stale_handle_is_rejected() {
    let mut forest = PriorityForest::new();
    let h = forest.insert(1, ());
    assert_eq!(forest.delete(h), Ok(((), 1)));

    // a new node may reuse the slot, the old handle must stay dead
    let fresh = forest.insert(2, ());
    assert_ne!(fresh, h);
    assert_eq!(forest.decrease(h, 0), Err(ForestError::InvalidTarget));
    assert_eq!(forest.priority(fresh), Some(&2));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ForestError::PriorityOrderViolation.to_string(),
        "new priority is larger than the current one"
    );
    let err: Box<dyn std::error::Error> = Box::new(ForestError::InvalidTarget);
    assert_eq!(err.to_string(), "handle does not refer to a live node of this forest");
}
