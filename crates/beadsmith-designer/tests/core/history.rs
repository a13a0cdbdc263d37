use beadsmith_designer::history::HistoryManager;

#[test]
fn test_history_creation() {
    let history: HistoryManager<Vec<u32>> = HistoryManager::default();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.max_depth(), 20);
}

#[test]
fn test_undo_then_redo_restores_state() {
    let mut history = HistoryManager::new(20);
    let mut state = vec![1];

    history.snapshot(&state);
    state.push(2);

    let current = state.clone();
    state = history.undo(&state).unwrap();
    assert_eq!(state, vec![1]);

    state = history.redo(&state).unwrap();
    assert_eq!(state, current);
}

#[test]
fn test_snapshot_clears_redo() {
    let mut history = HistoryManager::new(20);
    history.snapshot(&"a");
    history.undo(&"b");
    assert!(history.can_redo());

    history.snapshot(&"a");
    assert!(!history.can_redo());
    assert_eq!(history.redo_depth(), 0);
}

#[test]
fn test_empty_undo_is_noop() {
    let mut history: HistoryManager<u8> = HistoryManager::new(20);
    assert_eq!(history.undo(&0), None);
    assert_eq!(history.redo(&0), None);
}

#[test]
fn test_history_bound_drops_oldest() {
    let mut history = HistoryManager::new(20);
    let mut state = 0u32;
    for _ in 0..25 {
        history.snapshot(&state);
        state += 1;
    }
    assert_eq!(history.undo_depth(), 20);

    let mut reached = Vec::new();
    while let Some(previous) = history.undo(&state) {
        state = previous;
        reached.push(state);
    }
    assert_eq!(reached.len(), 20);
    assert_eq!(state, 5);
    assert!(!reached.contains(&0));
}

#[test]
fn test_snapshots_are_value_copies() {
    let mut history = HistoryManager::new(5);
    let mut state = vec![String::from("blue")];
    history.snapshot(&state);
    state[0].push_str("-changed");

    let previous = history.undo(&state).unwrap();
    assert_eq!(previous, vec![String::from("blue")]);
}

#[test]
fn test_clear() {
    let mut history = HistoryManager::new(5);
    history.snapshot(&1);
    history.snapshot(&2);
    history.undo(&3);
    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}
