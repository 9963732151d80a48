//! Queue reconciliation integration tests.

use serde_json::json;

use beacon_store::QueueName;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_exercise_sync_drains_queue_and_confirms() {
    let app = TestApp::new().await;
    let mut display_rx = app.displayer.subscribe();

    app.store
        .enqueue(QueueName::PendingExercises, &json!({"exerciseId": "e-1"}))
        .await
        .unwrap();
    app.store
        .enqueue(QueueName::PendingExercises, &json!({"exerciseId": "e-2"}))
        .await
        .unwrap();

    let response = app.request("POST", "/sync/exercise-sync", None).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["replayed"], 2);
    assert_eq!(response.body["data"]["failed"], 0);

    let synced = app.backend.synced.lock().unwrap();
    assert_eq!(synced.len(), 2);
    assert_eq!(synced[0]["exerciseId"], "e-1");
    assert_eq!(synced[1]["exerciseId"], "e-2");
    drop(synced);

    // Draining the exercise queue shows a confirmation notification.
    let confirmation = display_rx.recv().await.unwrap();
    assert_eq!(confirmation.tag.as_deref(), Some("exercise-sync-complete"));
    assert_eq!(confirmation.body, "2 exercises synced successfully");

    assert_eq!(app.store.len(QueueName::PendingExercises).await.unwrap(), 0);
}

#[tokio::test]
async fn test_offline_sync_leaves_entries_queued() {
    let app = TestApp::new().await;
    app.backend.set_offline(true);

    app.store
        .enqueue(QueueName::PendingExercises, &json!({"exerciseId": "e-3"}))
        .await
        .unwrap();

    let response = app.request("POST", "/sync/exercise-sync", None).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"]["replayed"], 0);
    assert_eq!(response.body["data"]["failed"], 1);

    // Entry is untouched and replays once connectivity returns.
    let entries = app.store.list_all(QueueName::PendingExercises).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].payload["exerciseId"], "e-3");

    app.backend.set_offline(false);
    let response = app.request("POST", "/sync/exercise-sync", None).await;
    assert_eq!(response.body["data"]["replayed"], 1);
    assert_eq!(app.store.len(QueueName::PendingExercises).await.unwrap(), 0);
}

#[tokio::test]
async fn test_notification_sync_redisplays_queued_payloads() {
    let app = TestApp::new().await;
    let mut display_rx = app.displayer.subscribe();

    app.store
        .enqueue(
            QueueName::PendingNotifications,
            &json!({
                "title": "Missed you earlier",
                "body": "Time for your exercises",
                "icon": "/icons/icon-192.png",
                "badge": "/icons/badge-72.png",
                "data": { "type": "exercise_reminder" }
            }),
        )
        .await
        .unwrap();

    let response = app.request("POST", "/sync/notification-sync", None).await;

    assert_eq!(response.body["data"]["replayed"], 1);
    let shown = display_rx.recv().await.unwrap();
    assert_eq!(shown.title, "Missed you earlier");
    assert_eq!(app.store.len(QueueName::PendingNotifications).await.unwrap(), 0);
}

#[tokio::test]
async fn test_status_sync_posts_queued_updates() {
    let app = TestApp::new().await;

    app.store
        .enqueue(
            QueueName::StatusUpdates,
            &json!({
                "notificationId": "n-9",
                "status": "clicked",
                "timestamp": "2026-03-02T09:00:00Z"
            }),
        )
        .await
        .unwrap();

    let response = app
        .request("POST", "/sync/notification-status-sync", None)
        .await;

    assert_eq!(response.body["data"]["replayed"], 1);
    let statuses = app.backend.statuses.lock().unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].notification_id, "n-9");
}

#[tokio::test]
async fn test_unreadable_entry_is_dropped() {
    let app = TestApp::new().await;

    // A status entry that does not decode will never replay.
    app.store
        .enqueue(QueueName::StatusUpdates, &json!({"garbage": true}))
        .await
        .unwrap();

    let response = app
        .request("POST", "/sync/notification-status-sync", None)
        .await;

    assert_eq!(response.body["data"]["replayed"], 0);
    assert_eq!(response.body["data"]["dropped"], 1);
    assert_eq!(app.store.len(QueueName::StatusUpdates).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_tag_is_rejected() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/sync/bogus-sync", None).await;
    assert_eq!(response.status, 400);
}

#[tokio::test]
async fn test_run_all_covers_every_queue() {
    let app = TestApp::new().await;

    app.store
        .enqueue(QueueName::PendingExercises, &json!({"exerciseId": "e-4"}))
        .await
        .unwrap();
    app.store
        .enqueue(
            QueueName::StatusUpdates,
            &json!({
                "notificationId": "n-10",
                "status": "delivered",
                "timestamp": "2026-03-02T09:00:00Z"
            }),
        )
        .await
        .unwrap();

    let response = app.request("POST", "/sync", None).await;

    assert_eq!(response.status, 200);
    let reports = response.body["data"].as_array().unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0]["tag"], "exercise-sync");
    assert_eq!(reports[0]["replayed"], 1);
    assert_eq!(reports[1]["tag"], "notification-sync");
    assert_eq!(reports[1]["replayed"], 0);
    assert_eq!(reports[2]["tag"], "notification-status-sync");
    assert_eq!(reports[2]["replayed"], 1);

    let queues = app.request("GET", "/queues", None).await;
    assert_eq!(queues.body["data"]["pending_exercises"], 0);
    assert_eq!(queues.body["data"]["pending_notifications"], 0);
    assert_eq!(queues.body["data"]["status_updates"], 0);
}
