use chrono::NaiveDate;
use ipltrack_core::db::migrations::latest_version;
use ipltrack_core::db::open_db_in_memory;
use ipltrack_core::{
    Availability, CalendarEngine, ConfigRepository, EventKind, EventRepository, Phase, RepoError,
    SqliteConfigRepository, SqliteEventRepository, TreatmentEvent, Zone,
};

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn sample_event(day: &str) -> TreatmentEvent {
    TreatmentEvent::session(
        date(day),
        EventKind::Legs,
        vec![Zone::Legs, Zone::Glutes],
        Phase::Attack,
        1,
        "Remember to shave the night before",
    )
}

#[test]
fn migrations_reach_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn upsert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let event = sample_event("2024-01-06");
    assert_eq!(repo.upsert_events(std::slice::from_ref(&event)).unwrap(), 1);

    let loaded = repo.get_event(date("2024-01-06")).unwrap().unwrap();
    assert_eq!(loaded, event);
    assert!(repo.get_event(date("2024-01-07")).unwrap().is_none());
}

#[test]
fn upsert_replaces_the_row_for_an_existing_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    repo.upsert_events(&[sample_event("2024-01-06")]).unwrap();

    let mut replacement = sample_event("2024-01-06");
    replacement.notes = "rescheduled".to_string();
    replacement.completed = true;
    repo.upsert_events(std::slice::from_ref(&replacement)).unwrap();

    let loaded = repo.get_event(date("2024-01-06")).unwrap().unwrap();
    assert_eq!(loaded.notes, "rescheduled");
    assert!(loaded.completed);

    let all = repo.list_events().unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn full_generated_sequence_survives_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let engine = CalendarEngine::new(date("2024-01-06"), Availability::Weekend);
    repo.upsert_events(engine.events()).unwrap();

    let loaded = repo.list_events().unwrap();
    assert_eq!(loaded.len(), engine.events().len());
    assert_eq!(loaded, engine.events());
}

#[test]
fn set_completed_requires_an_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    repo.upsert_events(&[sample_event("2024-01-06")]).unwrap();
    repo.set_completed(date("2024-01-06"), true).unwrap();
    assert_eq!(repo.completed_dates().unwrap(), vec![date("2024-01-06")]);

    let err = repo.set_completed(date("2024-01-05"), true).unwrap_err();
    assert!(matches!(err, RepoError::EventNotFound(d) if d == date("2024-01-05")));
}

#[test]
fn clear_events_wipes_the_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let engine = CalendarEngine::new(date("2024-01-06"), Availability::Weekend);
    repo.upsert_events(engine.events()).unwrap();
    repo.clear_events().unwrap();

    assert!(repo.list_events().unwrap().is_empty());
    assert!(repo.completed_dates().unwrap().is_empty());
}

#[test]
fn read_paths_reject_invalid_persisted_state() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO calendar_events (date, kind, title, zones, phase, week_in_phase, completed, notes)
         VALUES ('2024-01-06', 'massage', 'Bogus', 'legs', 'attack', 1, 0, '');",
        [],
    )
    .unwrap();

    let repo = SqliteEventRepository::new(&conn);
    let err = repo.get_event(date("2024-01-06")).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("massage")));
}

#[test]
fn config_roundtrip_and_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConfigRepository::new(&conn);

    assert!(repo.get("start_date").unwrap().is_none());

    repo.set("start_date", "2024-01-06").unwrap();
    repo.set("availability", "weekend").unwrap();
    assert_eq!(repo.get("start_date").unwrap().as_deref(), Some("2024-01-06"));

    repo.set("start_date", "2024-02-03").unwrap();
    assert_eq!(repo.get("start_date").unwrap().as_deref(), Some("2024-02-03"));

    let all = repo.get_all().unwrap();
    assert_eq!(
        all,
        vec![
            ("availability".to_string(), "weekend".to_string()),
            ("start_date".to_string(), "2024-02-03".to_string()),
        ]
    );
}
