//! Push delivery and interaction routing integration tests.

use serde_json::json;

use beacon_entity::notification::DeliveryStatus;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_push_displays_and_acks_delivery() {
    let app = TestApp::new().await;
    let mut display_rx = app.displayer.subscribe();

    let frame = json!({
        "title": "Appointment tomorrow",
        "body": "Dr. Patel at 10:00",
        "data": {
            "notificationId": "n-1",
            "type": "appointment_reminder",
            "url": "/schedule"
        }
    });
    let response = app.request("POST", "/push", Some(frame)).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["title"], "Appointment tomorrow");

    let displayed = display_rx.recv().await.unwrap();
    assert_eq!(displayed.title, "Appointment tomorrow");

    let statuses = app.backend.statuses.lock().unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].notification_id, "n-1");
    assert_eq!(statuses[0].status, DeliveryStatus::Delivered);
}

#[tokio::test]
async fn test_malformed_push_falls_back_to_defaults() {
    let app = TestApp::new().await;

    let response = app.request_raw("POST", "/push", b"not json at all").await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["title"], "Beacon");
    assert_eq!(response.body["data"]["body"], "You have a new notification");

    // No notification id means no status report and nothing queued.
    assert!(app.backend.statuses.lock().unwrap().is_empty());
    let queues = app.request("GET", "/queues", None).await;
    assert_eq!(queues.body["data"]["status_updates"], 0);
}

#[tokio::test]
async fn test_offline_push_queues_status_update() {
    let app = TestApp::new().await;
    app.backend.set_offline(true);

    let frame = json!({
        "title": "Exercise time",
        "data": { "notificationId": "n-2", "type": "exercise_reminder" }
    });
    let response = app.request("POST", "/push", Some(frame)).await;
    assert_eq!(response.status, 200);

    assert!(app.backend.statuses.lock().unwrap().is_empty());

    let queues = app.request("GET", "/queues", None).await;
    assert_eq!(queues.body["data"]["status_updates"], 1);
}

#[tokio::test]
async fn test_interaction_focuses_session_and_logs_click() {
    let app = TestApp::new().await;
    let (_id, mut session_rx) = app.sessions.register();

    let interaction = json!({
        "action": "view",
        "data": { "notificationId": "n-3", "type": "exercise_reminder" }
    });
    let response = app.request("POST", "/interactions", Some(interaction)).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["dismissed"], false);
    assert_eq!(response.body["data"]["url"], "/exercises");

    let message = session_rx.recv().await.unwrap();
    let message = serde_json::to_value(&message).unwrap();
    assert_eq!(message["type"], "NOTIFICATION_CLICKED");
    assert_eq!(message["url"], "/exercises");

    let statuses = app.backend.statuses.lock().unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].notification_id, "n-3");
    assert_eq!(statuses[0].status, DeliveryStatus::Clicked);
}

#[tokio::test]
async fn test_interaction_without_session_opens_new_one() {
    let app = TestApp::new().await;
    let mut launch_rx = app.sessions.subscribe_launches();

    let interaction = json!({
        "data": { "notificationId": "n-4", "url": "/patients/p-9" }
    });
    let response = app.request("POST", "/interactions", Some(interaction)).await;

    assert_eq!(response.body["data"]["url"], "/patients/p-9");
    assert_eq!(launch_rx.recv().await.unwrap(), "/patients/p-9");
}

#[tokio::test]
async fn test_dismiss_closes_without_click_report() {
    let app = TestApp::new().await;

    for action in ["dismiss", "later", "remind-later"] {
        let interaction = json!({
            "action": action,
            "data": { "notificationId": "n-5" }
        });
        let response = app.request("POST", "/interactions", Some(interaction)).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["data"]["dismissed"], true);
    }

    assert!(app.backend.statuses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_confirm_writes_through_before_navigating() {
    let app = TestApp::new().await;

    let interaction = json!({
        "action": "confirm",
        "data": {
            "notificationId": "n-6",
            "type": "appointment_reminder",
            "appointmentId": "apt-42"
        }
    });
    let response = app.request("POST", "/interactions", Some(interaction)).await;

    assert_eq!(
        response.body["data"]["url"],
        "/appointments/apt-42?confirmed=true"
    );
    assert_eq!(*app.backend.confirmed.lock().unwrap(), vec!["apt-42"]);
}

#[tokio::test]
async fn test_confirm_still_navigates_when_backend_is_down() {
    let app = TestApp::new().await;
    app.backend.set_offline(true);

    let interaction = json!({
        "action": "confirm",
        "data": { "appointmentId": "apt-7" }
    });
    let response = app.request("POST", "/interactions", Some(interaction)).await;

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body["data"]["url"],
        "/appointments/apt-7?confirmed=true"
    );
    assert!(app.backend.confirmed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_reports_store_and_backend() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], true);
    assert_eq!(response.body["data"]["backend"], true);

    app.backend.set_offline(true);
    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["backend"], false);
}
