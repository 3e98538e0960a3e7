use chrono::{NaiveDate, NaiveDateTime};
use ipltrack_core::db::{open_db, open_db_in_memory};
use ipltrack_core::{
    CalendarError, CompleteSessionRequest, ConfigRepository, EventKind, EventRepository,
    ScheduleError, ScheduleService, SessionError, SessionRepository, SessionService,
    SqliteConfigRepository, SqliteEventRepository, SqliteSessionRepository, Zone,
};

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn datetime(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").unwrap()
}

#[test]
fn start_plan_persists_config_and_full_sequence() {
    let conn = open_db_in_memory().unwrap();
    let service = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );

    let engine = service.start_plan("2024-01-06", "weekend").unwrap();
    assert_eq!(engine.events().len(), 50);

    let config = SqliteConfigRepository::new(&conn);
    assert_eq!(config.get("start_date").unwrap().as_deref(), Some("2024-01-06"));
    assert_eq!(config.get("availability").unwrap().as_deref(), Some("weekend"));
    assert_eq!(config.get("first_time").unwrap().as_deref(), Some("false"));

    let stored = SqliteEventRepository::new(&conn).list_events().unwrap();
    assert_eq!(stored, engine.events());
}

#[test]
fn start_plan_rejects_invalid_start_date_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );

    let err = service.start_plan("soon", "weekend").unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::Calendar(CalendarError::InvalidStartDate(input)) if input == "soon"
    ));

    let config = SqliteConfigRepository::new(&conn);
    assert!(config.get("start_date").unwrap().is_none());
    assert!(SqliteEventRepository::new(&conn).list_events().unwrap().is_empty());
}

#[test]
fn restarting_a_plan_discards_the_old_sequence_wholesale() {
    let conn = open_db_in_memory().unwrap();
    let service = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );

    service.start_plan("2024-01-06", "weekend").unwrap();
    let second = service.start_plan("2024-02-03", "weekend").unwrap();

    let stored = SqliteEventRepository::new(&conn).list_events().unwrap();
    assert_eq!(stored, second.events());
    // Nothing from the January schedule survives.
    assert!(stored.iter().all(|event| event.date >= date("2024-02-03")));
}

#[test]
fn load_plan_returns_none_before_onboarding() {
    let conn = open_db_in_memory().unwrap();
    let service = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );

    assert!(service.load_plan().unwrap().is_none());
}

#[test]
fn load_plan_reconciles_persisted_completion_flags() {
    let conn = open_db_in_memory().unwrap();
    let service = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );

    service.start_plan("2024-01-06", "weekend").unwrap();

    let events = SqliteEventRepository::new(&conn);
    events.set_completed(date("2024-01-06"), true).unwrap();
    events.set_completed(date("2024-01-07"), true).unwrap();

    let engine = service.load_plan().unwrap().unwrap();
    assert!(engine.event_on_date(date("2024-01-06")).unwrap().completed);
    assert!(engine.event_on_date(date("2024-01-07")).unwrap().completed);

    let next = engine.next_pending_event(date("2024-01-01")).unwrap();
    assert_eq!(next.date, date("2024-01-13"));
}

#[test]
fn complete_session_logs_and_flips_both_copies() {
    let conn = open_db_in_memory().unwrap();
    let schedule = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );
    let sessions = SessionService::new(
        SqliteEventRepository::new(&conn),
        SqliteSessionRepository::new(&conn),
    );

    let mut engine = schedule.start_plan("2024-01-06", "weekend").unwrap();

    let request = CompleteSessionRequest {
        date: date("2024-01-06"),
        performed_at: datetime("2024-01-06T19:05:00"),
        treated_zones: vec![Zone::Legs, Zone::Glutes],
        duration_secs: 1500,
        notes: "no redness".to_string(),
    };
    let session_id = sessions.complete_session(&mut engine, &request).unwrap();
    assert!(session_id > 0);

    // In-memory copy.
    assert!(engine.event_on_date(date("2024-01-06")).unwrap().completed);
    // Durable copy.
    let stored = SqliteEventRepository::new(&conn)
        .get_event(date("2024-01-06"))
        .unwrap()
        .unwrap();
    assert!(stored.completed);

    // Log record carries the derived kind and the shot estimate.
    let log = SqliteSessionRepository::new(&conn).list_sessions().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, EventKind::Legs);
    assert_eq!(log[0].shots, 190);
    assert_eq!(log[0].notes, "no redness");
}

#[test]
fn complete_session_rejects_rest_days_and_unknown_dates() {
    let conn = open_db_in_memory().unwrap();
    let schedule = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );
    let sessions = SessionService::new(
        SqliteEventRepository::new(&conn),
        SqliteSessionRepository::new(&conn),
    );

    let mut engine = schedule.start_plan("2024-01-06", "weekend").unwrap();

    let rest_request = CompleteSessionRequest {
        date: date("2024-03-30"),
        performed_at: datetime("2024-03-30T10:00:00"),
        treated_zones: Vec::new(),
        duration_secs: 0,
        notes: String::new(),
    };
    let err = sessions.complete_session(&mut engine, &rest_request).unwrap_err();
    assert!(matches!(err, SessionError::RestDay(d) if d == date("2024-03-30")));

    let missing_request = CompleteSessionRequest {
        date: date("2024-01-05"),
        ..rest_request
    };
    let err = sessions
        .complete_session(&mut engine, &missing_request)
        .unwrap_err();
    assert!(matches!(err, SessionError::NoEventOnDate(d) if d == date("2024-01-05")));

    // Neither failure appended to the log.
    assert!(SqliteSessionRepository::new(&conn).list_sessions().unwrap().is_empty());
}

#[test]
fn session_stats_accumulate_totals() {
    let conn = open_db_in_memory().unwrap();
    let schedule = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );
    let sessions = SessionService::new(
        SqliteEventRepository::new(&conn),
        SqliteSessionRepository::new(&conn),
    );

    let mut engine = schedule.start_plan("2024-01-06", "weekend").unwrap();

    for (day, time, zones) in [
        ("2024-01-06", "2024-01-06T18:00:00", vec![Zone::Legs, Zone::Glutes]),
        ("2024-01-07", "2024-01-07T18:00:00", vec![Zone::Chest, Zone::Abdomen]),
    ] {
        let request = CompleteSessionRequest {
            date: date(day),
            performed_at: datetime(time),
            treated_zones: zones,
            duration_secs: 2700,
            notes: String::new(),
        };
        sessions.complete_session(&mut engine, &request).unwrap();
    }

    let stats = sessions.stats().unwrap();
    assert_eq!(stats.total_sessions, 2);
    // 2 x 2700s = 5400s, floored to a single whole hour.
    assert_eq!(stats.total_hours, 1);
    assert_eq!(stats.total_shots, 190 + 110);

    let repo = SqliteSessionRepository::new(&conn);
    let january = repo
        .sessions_in_range(date("2024-01-06"), date("2024-01-06"))
        .unwrap();
    assert_eq!(january.len(), 1);
    assert_eq!(january[0].kind, EventKind::Legs);
}

#[test]
fn plan_survives_reopening_a_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ipltrack.sqlite3");

    {
        let conn = open_db(&db_path).unwrap();
        let service = ScheduleService::new(
            SqliteEventRepository::new(&conn),
            SqliteConfigRepository::new(&conn),
        );
        service.start_plan("2024-01-06", "weekend").unwrap();
        SqliteEventRepository::new(&conn)
            .set_completed(date("2024-01-06"), true)
            .unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    let service = ScheduleService::new(
        SqliteEventRepository::new(&conn),
        SqliteConfigRepository::new(&conn),
    );
    let engine = service.load_plan().unwrap().unwrap();
    assert_eq!(engine.start_date(), date("2024-01-06"));
    assert!(engine.event_on_date(date("2024-01-06")).unwrap().completed);
}
