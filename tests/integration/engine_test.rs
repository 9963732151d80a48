//! Reminder scheduling and milestone processing integration tests.

use std::sync::atomic::Ordering;

use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use serde_json::json;

use beacon_entity::completion::ExerciseCompletion;

use crate::helpers::TestApp;

/// Next Monday strictly after today, so every computed instant is in
/// the future.
fn next_monday() -> NaiveDate {
    let mut day = Utc::now().date_naive() + Days::new(1);
    while day.weekday() != Weekday::Mon {
        day = day + Days::new(1);
    }
    day
}

fn completion(patient_id: &str, pain_level: Option<u8>) -> serde_json::Value {
    json!({
        "id": "c-1",
        "prescription_id": "p-1",
        "patient_id": patient_id,
        "therapist_id": "th-1",
        "completed_at": Utc::now().to_rfc3339(),
        "pain_level": pain_level,
    })
}

#[tokio::test]
async fn test_schedule_three_per_week_prescription() {
    let app = TestApp::new().await;
    let start = next_monday();

    let prescription = json!({
        "id": "p-1",
        "patient_id": "pt-1",
        "therapist_id": "th-1",
        "exercise_id": "ex-1",
        "exercise_name": "Knee raises",
        "frequency_per_day": 1,
        "frequency_per_week": 3,
        "duration_weeks": 1,
        "start_date": start.to_string(),
        "reminder_times": ["09:00"],
    });
    let response = app
        .request("POST", "/prescriptions/schedule", Some(prescription))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["scheduled"], 3);
    assert_eq!(response.body["data"]["failed"], 0);

    let scheduled = app.backend.scheduled.lock().unwrap();
    assert_eq!(scheduled.len(), 3);
    let weekdays: Vec<Weekday> = scheduled
        .iter()
        .map(|r| r.schedule_at.date_naive().weekday())
        .collect();
    assert_eq!(weekdays, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
    for request in scheduled.iter() {
        assert_eq!(request.user_id, "pt-1");
        assert_eq!(request.kind, "exercise_reminder");
        assert_eq!(request.schedule_at.time().to_string(), "09:00:00");
        assert_eq!(request.data["prescriptionId"], "p-1");
        assert_eq!(request.data["url"], "/exercises");
    }
}

#[tokio::test]
async fn test_schedule_daily_prescription_uses_default_times() {
    let app = TestApp::new().await;
    let start = next_monday();

    let prescription = json!({
        "id": "p-2",
        "patient_id": "pt-1",
        "therapist_id": "th-1",
        "exercise_id": "ex-2",
        "frequency_per_day": 2,
        "frequency_per_week": 7,
        "duration_weeks": 1,
        "start_date": start.to_string(),
    });
    let response = app
        .request("POST", "/prescriptions/schedule", Some(prescription))
        .await;

    // Seven days, first two of the built-in times each.
    assert_eq!(response.body["data"]["scheduled"], 14);

    let scheduled = app.backend.scheduled.lock().unwrap();
    assert_eq!(scheduled[0].schedule_at.time().to_string(), "09:00:00");
    assert_eq!(scheduled[1].schedule_at.time().to_string(), "15:00:00");
}

#[tokio::test]
async fn test_schedule_failures_are_counted_not_fatal() {
    let app = TestApp::new().await;
    app.backend.set_offline(true);

    let prescription = json!({
        "id": "p-3",
        "patient_id": "pt-1",
        "therapist_id": "th-1",
        "exercise_id": "ex-1",
        "frequency_per_day": 1,
        "frequency_per_week": 1,
        "duration_weeks": 1,
        "start_date": next_monday().to_string(),
        "reminder_times": ["09:00"],
    });
    let response = app
        .request("POST", "/prescriptions/schedule", Some(prescription))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["scheduled"], 0);
    assert_eq!(response.body["data"]["failed"], 1);
}

#[tokio::test]
async fn test_completion_at_total_checkpoint_celebrates() {
    let app = TestApp::new().await;
    app.backend.total_count.store(25, Ordering::SeqCst);

    let response = app
        .request("POST", "/completions", Some(completion("pt-1", None)))
        .await;

    assert_eq!(response.status, 200);
    let milestones = response.body["data"].as_array().unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["type"], "total_count");
    assert_eq!(milestones[0]["value"], 25);

    let sent = app.backend.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, "pt-1");
    assert_eq!(sent[0].kind, "exercise_milestone");
    assert_eq!(sent[0].data["milestoneType"], "total_count");
}

#[tokio::test]
async fn test_completion_off_checkpoint_is_quiet() {
    let app = TestApp::new().await;
    app.backend.total_count.store(26, Ordering::SeqCst);

    let response = app
        .request("POST", "/completions", Some(completion("pt-1", None)))
        .await;

    assert!(response.body["data"].as_array().unwrap().is_empty());
    assert!(app.backend.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_weekly_goal_detected_at_exactly_seven() {
    let app = TestApp::new().await;
    app.backend.weekly_count.store(7, Ordering::SeqCst);

    let response = app
        .request("POST", "/completions", Some(completion("pt-1", None)))
        .await;

    let milestones = response.body["data"].as_array().unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["type"], "weekly_goal");
    assert_eq!(milestones[0]["value"], 7);
}

#[tokio::test]
async fn test_streak_checkpoint_detected_from_history() {
    let app = TestApp::new().await;

    let now = Utc::now();
    {
        let mut completions = app.backend.completions.lock().unwrap();
        for days_back in 0..3u64 {
            completions.push(ExerciseCompletion {
                id: format!("c-{days_back}"),
                prescription_id: "p-1".into(),
                patient_id: "pt-1".into(),
                therapist_id: None,
                completed_at: now - chrono::Duration::days(days_back as i64),
                pain_level: None,
                difficulty_rating: None,
            });
        }
    }

    let response = app
        .request("POST", "/completions", Some(completion("pt-1", None)))
        .await;

    let milestones = response.body["data"].as_array().unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["type"], "streak");
    assert_eq!(milestones[0]["value"], 3);
}

#[tokio::test]
async fn test_high_pain_alerts_clinician() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/completions", Some(completion("pt-1", Some(8))))
        .await;

    assert_eq!(response.status, 200);
    assert!(response.body["data"].as_array().unwrap().is_empty());

    let sent = app.backend.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, "th-1");
    assert_eq!(sent[0].kind, "high_pain_alert");
    assert_eq!(sent[0].data["patientId"], "pt-1");
    assert_eq!(sent[0].data["painLevel"], 8);
    assert_eq!(sent[0].data["url"], "/patients/pt-1");
}

#[tokio::test]
async fn test_offline_completion_processing_degrades_quietly() {
    let app = TestApp::new().await;
    app.backend.set_offline(true);
    app.backend.total_count.store(25, Ordering::SeqCst);

    let response = app
        .request("POST", "/completions", Some(completion("pt-1", None)))
        .await;

    // History lookups fail, milestones are skipped, no error surfaces.
    assert_eq!(response.status, 200);
    assert!(response.body["data"].as_array().unwrap().is_empty());
}
