//! End-to-end workflow tests for the accountability engine.
//!
//! Drives the full load-modify-save cycle against a journal in a temp
//! directory: plan, report, gate transitions, analytics, day-off scoring.

use chrono::NaiveDate;
use daykeeper_core::{
    DocumentStore, Engine, PlanInput, PlanTask, Readiness, ReportAck, ReportInput,
    RestRecommendation, SemesterPhase,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn engine(dir: &tempfile::TempDir) -> Engine {
    Engine::with_store(DocumentStore::at(dir.path().join("journal.json")))
}

fn plan_input(day: &str, tasks: &[(&str, f64)], context: &str) -> PlanInput {
    PlanInput {
        date: date(day),
        tasks: tasks
            .iter()
            .map(|(name, hours)| PlanTask::new(*name, *hours))
            .collect(),
        context: context.to_string(),
        energy_level: "medium".to_string(),
    }
}

fn completed_report(day: &str, names: &[&str]) -> ReportInput {
    ReportInput {
        date: date(day),
        completed: names.iter().map(|n| n.to_string()).collect(),
        ..ReportInput::default()
    }
}

#[test]
fn full_accountability_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(&dir);

    // Day 1: nothing on file, planning may proceed.
    match engine.check_readiness(date("2025-01-01")).unwrap() {
        Readiness::Ready {
            rest_or_light_day, ..
        } => assert_eq!(
            rest_or_light_day.recommendation,
            RestRecommendation::ProceedNormally
        ),
        other => panic!("expected READY on a fresh journal, got {other:?}"),
    }

    engine
        .set_daily_plan(
            plan_input(
                "2025-01-01",
                &[("Math problem set", 2.0), ("Essay outline", 1.0)],
                "steady",
            ),
            date("2025-01-01"),
        )
        .unwrap();

    // Same day again: the plan exists, do not overwrite.
    assert!(matches!(
        engine.check_readiness(date("2025-01-01")).unwrap(),
        Readiness::PlanExists { .. }
    ));

    // Two days later without a report: blocked on the old date.
    match engine.check_readiness(date("2025-01-03")).unwrap() {
        Readiness::Blocked {
            unreported_date,
            tasks,
            ..
        } => {
            assert_eq!(unreported_date, date("2025-01-01"));
            assert_eq!(tasks.len(), 2);
        }
        other => panic!("expected BLOCKED, got {other:?}"),
    }

    // Resolve the backlog, then planning opens up again.
    let ack = engine
        .report(
            &completed_report("2025-01-01", &["Math problem set"]),
            date("2025-01-03"),
        )
        .unwrap();
    let ReportAck::Recorded {
        completion_rate, ..
    } = ack
    else {
        panic!("expected a recorded report");
    };
    assert_eq!(completion_rate, 0.5);

    assert!(matches!(
        engine.check_readiness(date("2025-01-03")).unwrap(),
        Readiness::Ready { .. }
    ));
}

#[test]
fn intensity_streak_drives_rest_advice() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(&dir);

    for day in ["2025-03-01", "2025-03-02", "2025-03-03"] {
        engine
            .set_daily_plan(plan_input(day, &[("Deep work", 6.5)], "hectic"), date(day))
            .unwrap();
        engine
            .report(&completed_report(day, &["Deep work"]), date(day))
            .unwrap();
    }

    // Three demanding days in a row: the gate recommends a light day.
    match engine.check_readiness(date("2025-03-04")).unwrap() {
        Readiness::Ready {
            rest_or_light_day, ..
        } => assert_eq!(
            rest_or_light_day.recommendation,
            RestRecommendation::RecommendedLightDay
        ),
        other => panic!("expected READY, got {other:?}"),
    }

    let analytics = engine.analytics_snapshot(date("2025-03-04")).unwrap();
    assert_eq!(analytics.consecutive_high_intensity_days, 3);
}

#[test]
fn skip_patterns_accumulate_across_days() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(&dir);

    let mut last_alerts = Vec::new();
    for day in ["2025-04-01", "2025-04-02", "2025-04-03"] {
        engine
            .set_daily_plan(
                plan_input(day, &[("Math revision", 1.0), ("Reading", 1.0)], "steady"),
                date(day),
            )
            .unwrap();
        let input = ReportInput {
            date: date(day),
            completed: vec!["Reading".to_string()],
            skipped: vec![daykeeper_core::TaskOutcome {
                name: "Math revision".to_string(),
                reason: Some("ran out of time".to_string()),
            }],
            ..ReportInput::default()
        };
        let ReportAck::Recorded { pattern_alerts, .. } =
            engine.report(&input, date(day)).unwrap()
        else {
            panic!("expected Recorded");
        };
        last_alerts = pattern_alerts;
    }

    assert_eq!(last_alerts.len(), 1);
    assert!(last_alerts[0].contains("Math"));

    let analytics = engine.analytics_snapshot(date("2025-04-03")).unwrap();
    assert_eq!(analytics.problem_tasks["Math"].skip_count, 3);
}

#[test]
fn day_off_scoring_tracks_phase_changes() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(&dir);
    let day = date("2025-05-01");

    engine
        .set_daily_plan(plan_input("2025-05-01", &[("a", 1.0)], "steady"), day)
        .unwrap();
    engine.report(&completed_report("2025-05-01", &["a"]), day).unwrap();

    engine
        .set_semester_phase(SemesterPhase::EarlySemester, day)
        .unwrap();
    let early = engine.assess_day_off(day).unwrap();

    engine
        .set_semester_phase(SemesterPhase::SemesterBreak, day)
        .unwrap();
    let on_break = engine.assess_day_off(day).unwrap();

    assert!(on_break.permissibility_score > early.permissibility_score);
    assert!(!on_break.rules.is_empty());
}

#[test]
fn journal_survives_process_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let day = date("2025-06-01");

    {
        let engine = engine(&dir);
        engine
            .set_daily_plan(plan_input("2025-06-01", &[("a", 1.0)], "steady"), day)
            .unwrap();
    }

    // A second engine over the same path sees the same state.
    let engine = engine(&dir);
    assert!(matches!(
        engine.check_readiness(day).unwrap(),
        Readiness::PlanExists { .. }
    ));
}
