use eastwing::memory::analysis::analysis_prompt;
use eastwing::memory::{MemoryManager, SUMMARY_HISTORY_CAPACITY};

#[test]
fn starts_empty() {
    let memory = MemoryManager::new();
    assert_eq!(memory.current_summary(), "");
    assert_eq!(memory.history_len(), 0);
    assert_eq!(memory.capacity(), SUMMARY_HISTORY_CAPACITY);
}

#[test]
fn record_replaces_current_summary() {
    let mut memory = MemoryManager::new();
    memory.record(1, "first".into());
    memory.record(2, "second".into());
    assert_eq!(memory.current_summary(), "second");
    assert_eq!(memory.history_len(), 2);
}

#[test]
fn history_evicts_oldest_beyond_capacity() {
    let mut memory = MemoryManager::new();
    for turn in 1..=6 {
        memory.record(turn, format!("summary {turn}"));
    }
    let turns: Vec<u32> = memory.history().map(|r| r.turn).collect();
    assert_eq!(turns, vec![2, 3, 4, 5, 6]);
    assert_eq!(memory.current_summary(), "summary 6");
}

#[test]
fn history_never_exceeds_capacity() {
    let mut memory = MemoryManager::with_capacity(3);
    for turn in 1..=50 {
        memory.record(turn, format!("s{turn}"));
        assert!(memory.history_len() <= 3);
    }
    let texts: Vec<&str> = memory.history().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["s48", "s49", "s50"]);
}

#[test]
fn timestamps_are_non_decreasing() {
    let mut memory = MemoryManager::new();
    for turn in 1..=4 {
        memory.record(turn, String::new());
    }
    let stamps: Vec<_> = memory.history().map(|r| r.recorded_at).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn analysis_prompt_needs_two_summaries() {
    let mut memory = MemoryManager::new();
    assert!(analysis_prompt(&memory).is_none());
    memory.record(1, "only one".into());
    assert!(analysis_prompt(&memory).is_none());
}

#[test]
fn analysis_prompt_lists_summaries_oldest_first() {
    let mut memory = MemoryManager::new();
    memory.record(1, "alpha".into());
    memory.record(2, "beta".into());
    memory.record(3, "gamma".into());

    let prompt = analysis_prompt(&memory).unwrap();
    assert!(prompt.contains("last 3 summaries"));
    let a = prompt.find("--- SUMMARY 1 ---\nalpha").unwrap();
    let b = prompt.find("--- SUMMARY 2 ---\nbeta").unwrap();
    let c = prompt.find("--- SUMMARY 3 ---\ngamma").unwrap();
    assert!(a < b && b < c);
    for heading in ["STABLE ELEMENTS", "CHANGES & ADDITIONS", "CONVERSATION TRAJECTORY"] {
        assert!(prompt.contains(heading));
    }
}
