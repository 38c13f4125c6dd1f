//! Integration tests for the roster and the bounded history log.

use badminton_draw::{HistoryEntry, HistoryLog, Pair, Roster, HISTORY_DEPTH};

#[test]
fn add_trims_and_ignores_empty_or_duplicate_names() {
    let mut roster = Roster::new();
    assert!(roster.add("  Aiko "));
    assert!(!roster.add("Aiko"));
    assert!(!roster.add("   "));
    assert!(!roster.add(""));
    // Exact, case-sensitive match.
    assert!(roster.add("aiko"));
    assert_eq!(roster.names(), ["Aiko", "aiko"]);
    assert_eq!(roster.count(), 2);
}

#[test]
fn remove_deletes_only_matching_player() {
    let mut roster = Roster::from_names(["A", "B", "C"]);
    assert!(roster.remove("B"));
    assert!(!roster.remove("B"));
    assert!(!roster.remove("Z"));
    assert_eq!(roster.names(), ["A", "C"]);
}

#[test]
fn replace_all_keeps_order() {
    let mut roster = Roster::from_names(["X"]);
    let names = ["Mei", "Ken", "Sora", "Yui"];
    roster.replace_all(names);
    assert_eq!(roster.names(), names);
}

#[test]
fn replace_all_drops_blank_and_repeated_names() {
    let mut roster = Roster::new();
    roster.replace_all(["A", "", "B", "A", " C "]);
    assert_eq!(roster.names(), ["A", "B", "C"]);
}

#[test]
fn history_keeps_only_last_two_rounds() {
    let mut history = HistoryLog::new();
    for i in 0..5 {
        history.record_round(vec![format!("W{i}")], vec![Pair::new(format!("A{i}"), format!("B{i}"))]);
        assert!(history.len() <= HISTORY_DEPTH);
    }
    assert_eq!(history.len(), 2);
    assert_eq!(history.last_waiting(), ["W4"]);
    assert_eq!(history.second_last_waiting(), ["W3"]);
    let pairs: Vec<&Pair> = history.all_pairs().collect();
    assert_eq!(pairs, [&Pair::new("A4", "B4"), &Pair::new("A3", "B3")]);
}

#[test]
fn empty_history_has_empty_waiting_lists() {
    let mut history = HistoryLog::new();
    assert!(history.last_waiting().is_empty());
    assert!(history.second_last_waiting().is_empty());
    history.record_round(vec!["A".to_string()], vec![]);
    assert!(history.second_last_waiting().is_empty());
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.all_pairs().count(), 0);
}

#[test]
fn stored_history_is_cut_to_depth_on_load() {
    let entries = vec![
        HistoryEntry { waiting: vec!["A".into()], pairs: vec![] },
        HistoryEntry { waiting: vec!["B".into()], pairs: vec![] },
        HistoryEntry { waiting: vec!["C".into()], pairs: vec![] },
    ];
    let json = serde_json::to_string(&entries).unwrap();
    let history: HistoryLog = serde_json::from_str(&json).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.last_waiting(), ["A"]);
}

#[test]
fn pairs_are_unordered() {
    assert_eq!(Pair::new("Ren", "Aoi"), Pair::new("Aoi", "Ren"));
    assert!(Pair::new("Ren", "Aoi").contains("Aoi"));
    let json = serde_json::to_string(&Pair::new("Ren", "Aoi")).unwrap();
    assert_eq!(json, r#"["Aoi","Ren"]"#);
    let back: Pair = serde_json::from_str(r#"["Ren","Aoi"]"#).unwrap();
    assert_eq!(back, Pair::new("Aoi", "Ren"));
}
