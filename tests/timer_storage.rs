//! Integration tests for the round timer, the key-value stores and roster CSV.

use badminton_draw::models::format_mm_ss;
use badminton_draw::storage::{load_json, save_json};
use badminton_draw::{
    parse_roster_csv, roster_to_csv, FileStore, KeyValueStore, MemoryStore, RoundTimer,
    SessionError, TimerEvent, TimerSetting, DEFAULT_ROUND_SECS,
};
use uuid::Uuid;

#[test]
fn timer_label_is_minutes_and_seconds() {
    assert_eq!(format_mm_ss(0), "00:00");
    assert_eq!(format_mm_ss(59), "00:59");
    assert_eq!(format_mm_ss(600), "10:00");
    assert_eq!(RoundTimer::default().label(), "01:00");
    assert_eq!(RoundTimer::default().remaining_secs(), DEFAULT_ROUND_SECS);
}

#[test]
fn timer_stops_at_zero() {
    let mut timer = RoundTimer::new(TimerSetting::Preset(2));
    timer.toggle();
    assert!(timer.is_running());
    assert_eq!(timer.tick(), TimerEvent::Tick { remaining: 1 });
    assert_eq!(timer.tick(), TimerEvent::Finished);
    assert!(!timer.is_running());
    assert_eq!(timer.tick(), TimerEvent::Idle);

    // Nothing left to count: starting again is a no-op until reset.
    timer.toggle();
    assert!(!timer.is_running());
    timer.reset();
    assert_eq!(timer.remaining_secs(), 2);
}

#[test]
fn changing_setting_stops_and_reloads() {
    let mut timer = RoundTimer::default();
    timer.toggle();
    timer.tick();
    timer.apply_setting(TimerSetting::CustomMinutes(5));
    assert!(!timer.is_running());
    assert_eq!(timer.remaining_secs(), 300);
    assert_eq!(timer.setting(), TimerSetting::CustomMinutes(5));
}

#[test]
fn memory_store_round_trips_values() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("members"), None);
    store.set("members", "[\"A\"]").unwrap();
    assert_eq!(store.get("members").as_deref(), Some("[\"A\"]"));
}

#[test]
fn file_store_survives_reopening() {
    let dir = std::env::temp_dir().join(format!("badminton-draw-test-{}", Uuid::new_v4()));
    let mut store = FileStore::new(&dir);
    assert!(!store.exists());
    assert_eq!(store.get("members"), None);
    save_json(&mut store, "members", &vec!["Aoi", "Ren"]).unwrap();

    let reopened = FileStore::new(&dir);
    assert!(reopened.exists());
    let names: Vec<String> = load_json(&reopened, "members").unwrap();
    assert_eq!(names, ["Aoi", "Ren"]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_blob_reads_as_missing() {
    let mut store = MemoryStore::new();
    store.set("match_history", "{not json").unwrap();
    assert_eq!(load_json::<Vec<String>>(&store, "match_history"), None);
}

#[test]
fn csv_import_skips_header_and_blank_names() {
    let names = parse_roster_csv(b"Name,Level\n Aoi ,3\n,2\nRen\n").unwrap();
    assert_eq!(names, ["Aoi", "Ren"]);
    // No header row: first line is a player.
    let names = parse_roster_csv(b"Yui\nSota\n").unwrap();
    assert_eq!(names, ["Yui", "Sota"]);
}

#[test]
fn csv_import_rejects_invalid_utf8() {
    let err = parse_roster_csv(b"Aoi\n\xff\xfe\n").unwrap_err();
    assert!(matches!(err, SessionError::Import(_)));
}

#[test]
fn csv_export_reads_back() {
    let names = vec!["Aoi".to_string(), "Ren, Jr.".to_string(), "Mio".to_string()];
    let csv = roster_to_csv(&names).unwrap();
    assert!(csv.starts_with("name"));
    assert_eq!(parse_roster_csv(csv.as_bytes()).unwrap(), names);
}
