//! Pure per-phase event generators.
//!
//! # Responsibility
//! - Produce the ordered event run for each phase from its anchor date.
//!
//! # Invariants
//! - Saturday carries the lower-body session, Sunday the upper-body one.
//! - Attack includes shoulders exactly every 4th week; transition on even
//!   cycle indexes; maintenance always.
//! - Maintenance anchors advance in fixed 30-day steps, not calendar
//!   months, so they drift slowly. Kept as-is on purpose.

use super::dates::{add_days, nearest_saturday_on_or_after};
use super::{ATTACK_WEEKS, MAINTENANCE_MONTHS, TRANSITION_WEEKS};
use crate::model::event::{EventKind, Phase, TreatmentEvent, Zone};
use chrono::NaiveDate;

const SHAVE_NOTE: &str = "Remember to shave the night before";
const TRIM_SHOULDERS_NOTE: &str = "Trim shoulders to 1-2mm before flashing";
const POST_ATTACK_REST_NOTE: &str = "End of attack phase. The skin rests this week.";
const FREE_WEEK_NOTE: &str = "Free week";
const SHOULDER_TOUCH_UP_NOTE: &str = "Shoulder touch-up";
const MAINTENANCE_LEGS_NOTE: &str = "Monthly maintenance session";
const MAINTENANCE_TORSO_NOTE: &str = "Includes shoulder touch-up";

fn lower_body_zones() -> Vec<Zone> {
    vec![Zone::Legs, Zone::Glutes]
}

fn torso_zones() -> Vec<Zone> {
    vec![Zone::Chest, Zone::Abdomen]
}

/// Attack phase: 12 weekly Saturday/Sunday session pairs.
///
/// Each week's Saturday is computed independently from the phase anchor
/// (`anchor + week*7`, snapped forward to Saturday), not from the
/// previous event.
pub fn attack_events(anchor: NaiveDate) -> Vec<TreatmentEvent> {
    let mut events = Vec::with_capacity(ATTACK_WEEKS as usize * 2);

    for week in 0..ATTACK_WEEKS {
        let saturday = nearest_saturday_on_or_after(add_days(anchor, i64::from(week) * 7));
        events.push(TreatmentEvent::session(
            saturday,
            EventKind::Legs,
            lower_body_zones(),
            Phase::Attack,
            week + 1,
            SHAVE_NOTE,
        ));

        let sunday = add_days(saturday, 1);
        let include_shoulders = (week + 1) % 4 == 0;
        if include_shoulders {
            let mut zones = torso_zones();
            zones.push(Zone::ShouldersGraded);
            events.push(TreatmentEvent::session(
                sunday,
                EventKind::TorsoShoulders,
                zones,
                Phase::Attack,
                week + 1,
                TRIM_SHOULDERS_NOTE,
            ));
        } else {
            events.push(TreatmentEvent::session(
                sunday,
                EventKind::Torso,
                torso_zones(),
                Phase::Attack,
                week + 1,
                "",
            ));
        }
    }

    events
}

/// Transition phase: a post-attack rest pair, then 4 fortnightly cycles.
///
/// Anchored at the attack-phase end (`start + 84` days). Each cycle is a
/// rest pair (`week = cycle*2 + 1`) followed one week later by a session
/// pair (`week = cycle*2 + 2`); Sunday includes shoulders on even cycles.
pub fn transition_events(start: NaiveDate) -> Vec<TreatmentEvent> {
    let attack_end = add_days(start, i64::from(ATTACK_WEEKS) * 7);
    let mut events = Vec::with_capacity(2 + TRANSITION_WEEKS as usize * 2);

    // Mandatory rest week right after attack ends, week marker 0.
    let rest_saturday = nearest_saturday_on_or_after(attack_end);
    events.push(TreatmentEvent::rest(
        rest_saturday,
        Phase::Transition,
        0,
        POST_ATTACK_REST_NOTE,
    ));
    events.push(TreatmentEvent::rest(
        add_days(rest_saturday, 1),
        Phase::Transition,
        0,
        "",
    ));

    let mut cursor = add_days(rest_saturday, 7);
    for cycle in 0..TRANSITION_WEEKS / 2 {
        let cycle_rest = nearest_saturday_on_or_after(cursor);
        events.push(TreatmentEvent::rest(
            cycle_rest,
            Phase::Transition,
            cycle * 2 + 1,
            FREE_WEEK_NOTE,
        ));
        events.push(TreatmentEvent::rest(
            add_days(cycle_rest, 1),
            Phase::Transition,
            cycle * 2 + 1,
            "",
        ));

        let session_saturday = add_days(cycle_rest, 7);
        events.push(TreatmentEvent::session(
            session_saturday,
            EventKind::Legs,
            lower_body_zones(),
            Phase::Transition,
            cycle * 2 + 2,
            "",
        ));

        let sunday = add_days(session_saturday, 1);
        if cycle % 2 == 0 {
            let mut zones = torso_zones();
            zones.push(Zone::Shoulders);
            events.push(TreatmentEvent::session(
                sunday,
                EventKind::TorsoShoulders,
                zones,
                Phase::Transition,
                cycle * 2 + 2,
                SHOULDER_TOUCH_UP_NOTE,
            ));
        } else {
            events.push(TreatmentEvent::session(
                sunday,
                EventKind::Torso,
                torso_zones(),
                Phase::Transition,
                cycle * 2 + 2,
                "",
            ));
        }

        cursor = add_days(session_saturday, 7);
    }

    events
}

/// Maintenance phase: 4 monthly session pairs, then nothing.
///
/// Anchored at the transition-phase end (`start + 84 + 56 + 7` days);
/// month anchors step by fixed 30-day increments snapped to Saturday.
/// Continuation beyond the generated horizon is the caller's problem.
pub fn maintenance_events(start: NaiveDate) -> Vec<TreatmentEvent> {
    let transition_end = add_days(
        start,
        i64::from(ATTACK_WEEKS) * 7 + i64::from(TRANSITION_WEEKS) * 7 + 7,
    );
    let mut events = Vec::with_capacity(MAINTENANCE_MONTHS as usize * 2);

    for month in 0..MAINTENANCE_MONTHS {
        let saturday =
            nearest_saturday_on_or_after(add_days(transition_end, i64::from(month) * 30));
        events.push(TreatmentEvent::session(
            saturday,
            EventKind::Legs,
            lower_body_zones(),
            Phase::Maintenance,
            0,
            MAINTENANCE_LEGS_NOTE,
        ));

        let mut zones = torso_zones();
        zones.push(Zone::Shoulders);
        events.push(TreatmentEvent::session(
            add_days(saturday, 1),
            EventKind::TorsoShoulders,
            zones,
            Phase::Maintenance,
            0,
            MAINTENANCE_TORSO_NOTE,
        ));
    }

    events
}
