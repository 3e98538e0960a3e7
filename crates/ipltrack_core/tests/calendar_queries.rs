use chrono::NaiveDate;
use ipltrack_core::{Availability, CalendarEngine, EventKind, Phase};

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn engine() -> CalendarEngine {
    CalendarEngine::new(date("2024-01-06"), Availability::Weekend)
}

#[test]
fn event_on_date_is_exact_match_only() {
    let engine = engine();

    let hit = engine.event_on_date(date("2024-01-06")).unwrap();
    assert_eq!(hit.kind, EventKind::Legs);
    assert_eq!(hit.week_in_phase, 1);

    // The Friday before a session has no event; no nearest matching.
    assert!(engine.event_on_date(date("2024-01-05")).is_none());
}

#[test]
fn next_pending_skips_completed_events() {
    let mut engine = engine();
    let first_three: Vec<NaiveDate> = engine.events()[..3].iter().map(|e| e.date).collect();
    engine.apply_completed(first_three);

    let next = engine.next_pending_event(date("2024-01-01")).unwrap();
    assert_eq!(next.date, engine.events()[3].date);
    assert_eq!(next.date, date("2024-01-14"));
}

#[test]
fn next_pending_is_none_past_the_horizon() {
    let mut engine = engine();
    assert!(engine.next_pending_event(date("2030-01-01")).is_none());

    let all_dates: Vec<NaiveDate> = engine.events().iter().map(|e| e.date).collect();
    engine.apply_completed(all_dates);
    assert!(engine.next_pending_event(date("2024-01-01")).is_none());
}

#[test]
fn events_in_month_filters_by_calendar_month() {
    let engine = engine();

    let january = engine.events_in_month(2024, 1);
    assert_eq!(january.len(), 8);
    assert!(january.iter().all(|e| e.date >= date("2024-01-06")));
    assert!(january.iter().all(|e| e.date <= date("2024-01-28")));

    assert!(engine.events_in_month(2023, 12).is_empty());
}

#[test]
fn current_phase_walks_attack_weeks() {
    let engine = engine();

    let opening = engine.current_phase(date("2024-01-06"));
    assert_eq!(opening.phase, Phase::Attack);
    assert_eq!(opening.week_in_phase, 1);
    assert_eq!(opening.total_weeks, 12);

    let late = engine.current_phase(date("2024-03-29"));
    assert_eq!(late.phase, Phase::Attack);
    assert_eq!(late.week_in_phase, 12);
}

#[test]
fn current_phase_crosses_into_transition_after_twelve_weeks() {
    let engine = engine();

    // 90 days elapsed is 12 whole weeks: first transition week.
    let at_90 = engine.current_phase(date("2024-01-06") + chrono::Duration::days(90));
    assert_eq!(at_90.phase, Phase::Transition);
    assert_eq!(at_90.week_in_phase, 1);
    assert_eq!(at_90.total_weeks, 8);

    // 13 whole weeks elapsed: second transition week.
    let at_91 = engine.current_phase(date("2024-01-06") + chrono::Duration::days(91));
    assert_eq!(at_91.phase, Phase::Transition);
    assert_eq!(at_91.week_in_phase, 2);
}

#[test]
fn current_phase_reports_open_ended_maintenance() {
    let engine = engine();

    let status = engine.current_phase(date("2024-01-06") + chrono::Duration::days(20 * 7));
    assert_eq!(status.phase, Phase::Maintenance);
    assert_eq!(status.week_in_phase, 0);
    assert_eq!(status.total_weeks, 0);

    // Years later it still reports maintenance; the projection never ends.
    let far = engine.current_phase(date("2030-01-01"));
    assert_eq!(far.phase, Phase::Maintenance);
}

#[test]
fn current_phase_ignores_completion_state() {
    let mut engine = engine();
    let all_dates: Vec<NaiveDate> = engine.events().iter().map(|e| e.date).collect();
    engine.apply_completed(all_dates);

    // Everything is done, yet elapsed time still says attack week 2.
    let status = engine.current_phase(date("2024-01-14"));
    assert_eq!(status.phase, Phase::Attack);
    assert_eq!(status.week_in_phase, 2);
}

#[test]
fn saturday_sunday_pairs_share_their_week_counter() {
    let engine = engine();
    let events = engine.events();

    for pair in events.windows(2) {
        let same_weekend = pair[1].date - pair[0].date == chrono::Duration::days(1);
        if same_weekend && pair[0].phase == pair[1].phase {
            assert_eq!(
                pair[0].week_in_phase, pair[1].week_in_phase,
                "pair {} / {}",
                pair[0].date, pair[1].date
            );
        }
    }
}

#[test]
fn mark_completed_reports_unknown_dates() {
    let mut engine = engine();
    assert!(engine.mark_completed(date("2024-01-06")));
    assert!(!engine.mark_completed(date("2024-01-05")));

    let event = engine.event_on_date(date("2024-01-06")).unwrap();
    assert!(event.completed);
}
