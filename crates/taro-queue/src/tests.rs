use crate::error::QueueError;
use crate::heap::SearchQueue;
use crate::visited::VisitedSet;

#[test]
fn extracts_in_ascending_cost_order() {
    let mut q = SearchQueue::new(10, 10);
    q.insert(3, 0, 5.0, None).unwrap();
    q.insert(1, 0, 1.0, None).unwrap();
    q.insert(2, 0, 3.0, None).unwrap();

    let a = q.extract_min().unwrap();
    assert_eq!(a.edge_id, 1);
    q.recycle(a);
    let b = q.extract_min().unwrap();
    assert_eq!(b.edge_id, 2);
    q.recycle(b);
    let c = q.extract_min().unwrap();
    assert_eq!(c.edge_id, 3);
    q.recycle(c);
}

#[test]
fn ties_break_on_arrival_tick_then_edge_id() {
    let mut q = SearchQueue::new(10, 10);
    q.insert(5, 100, 1.0, None).unwrap();
    q.insert(4, 50, 1.0, None).unwrap();
    q.insert(6, 50, 1.0, None).unwrap();

    let a = q.extract_min().unwrap();
    assert_eq!(a.edge_id, 4); // earliest arrival_tick, then lowest edge_id
    q.recycle(a);
    let b = q.extract_min().unwrap();
    assert_eq!(b.edge_id, 6);
    q.recycle(b);
    let c = q.extract_min().unwrap();
    assert_eq!(c.edge_id, 5);
    q.recycle(c);
}

#[test]
fn decrease_key_only_applies_when_strictly_better() {
    let mut q = SearchQueue::new(10, 10);
    q.insert(1, 0, 10.0, None).unwrap();
    q.insert(1, 0, 20.0, Some(9)).unwrap(); // worse: ignored
    q.insert(1, 0, 5.0, Some(7)).unwrap(); // better: applied

    let state = q.extract_min().unwrap();
    assert_eq!(state.cost, 5.0);
    assert_eq!(state.pred, Some(7));
    assert_eq!(q.len(), 0);
}

#[test]
fn rejects_out_of_range_edge_id() {
    let mut q = SearchQueue::new(4, 10);
    let err = q.insert(4, 0, 1.0, None).unwrap_err();
    assert!(matches!(err, QueueError::InvalidEdgeId { edge: 4, .. }));
}

#[test]
fn extract_from_empty_fails_loudly() {
    let mut q = SearchQueue::new(10, 10);
    let err = q.extract_min().unwrap_err();
    assert!(matches!(err, QueueError::ExtractFromEmpty));
}

#[test]
fn pool_exhaustion_fails_loudly_and_clear_recovers_even_after_leaks() {
    let mut q = SearchQueue::new(10, 2);
    q.insert(0, 0, 1.0, None).unwrap();
    q.insert(1, 0, 1.0, None).unwrap();
    let err = q.insert(2, 0, 1.0, None).unwrap_err();
    assert!(matches!(err, QueueError::PoolExhausted { capacity: 2 }));

    // Leak both extracted states (never call recycle) ...
    let _leaked_a = q.extract_min().unwrap();
    let _leaked_b = q.extract_min().unwrap();
    assert!(q.is_empty());

    // ... clear() still recovers the full pool.
    q.clear();
    q.insert(5, 0, 1.0, None).unwrap();
    q.insert(6, 0, 1.0, None).unwrap();
    assert_eq!(q.len(), 2);
}

#[test]
fn peek_min_cost_does_not_remove_the_entry() {
    let mut q = SearchQueue::new(10, 10);
    assert_eq!(q.peek_min_cost(), None);
    q.insert(3, 0, 5.0, None).unwrap();
    q.insert(1, 0, 1.0, None).unwrap();
    assert_eq!(q.peek_min_cost(), Some(1.0));
    assert_eq!(q.len(), 2);
}

#[test]
fn visited_set_marks_once_and_clears() {
    let mut v = VisitedSet::new(16);
    assert!(v.mark_visited(3));
    assert!(!v.mark_visited(3));
    assert!(v.is_visited(3));
    assert!(!v.is_visited(4));
    v.clear();
    assert!(!v.is_visited(3));
    assert!(v.mark_visited(3));
}
