//! End-to-end console flows through the store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use callcenter_dashboard::{
    Command, CompletionPolicy, DashboardAction, DashboardEnvironment, DashboardState,
    DashboardStats, DashboardStore, RequestId, RequestStatus, dashboard_store, execute, view,
};
use callcenter_core::environment::Clock;
use callcenter_runtime::StoreError;
use callcenter_testing::{SteppingClock, init_test_tracing, test_clock};
use chrono::Duration;
use std::sync::Arc;

fn store_with(policy: CompletionPolicy) -> DashboardStore {
    init_test_tracing();
    let state = DashboardState::seeded();
    let env = DashboardEnvironment::for_state(&state, Arc::new(test_clock())).with_policy(policy);
    dashboard_store(state, env)
}

async fn run(store: &DashboardStore, line: &str) -> String {
    let command = Command::parse(line).unwrap();
    execute(store, command, 10).await.unwrap().output
}

#[tokio::test]
async fn completing_processing_request_prepends_audit_entry() {
    let store = store_with(CompletionPolicy::Permissive);

    let output = run(&store, "complete 2 Карта отправлена курьером").await;
    assert!(output.starts_with("✅ Заявка #2 успешно завершена!"));
    assert!(output.contains("Запись аудита #4"));

    let state = store.snapshot().await;
    assert_eq!(state.requests[1].status, RequestStatus::Completed);
    assert_eq!(state.audit_log.len(), 4);
    assert_eq!(state.audit_log[0].id.as_str(), "4");
    assert_eq!(state.audit_log[0].action, "Перевыпуск карты");
    assert_eq!(state.audit_log[0].client_name, "Петрова Мария Сергеевна");
    assert_eq!(state.audit_log[0].timestamp, "17.01.2026, 14:50");
}

#[tokio::test]
async fn take_then_complete_full_lifecycle() {
    let store = store_with(CompletionPolicy::Strict);

    assert_eq!(run(&store, "take 1").await, "🔄 Заявка #1 взята в работу");
    assert!(run(&store, "/complete 1").await.starts_with("✅ Заявка #1"));

    let stats = store.state(DashboardStats::from_state).await;
    assert_eq!(stats.pending_requests, 1);
    assert_eq!(stats.processing_requests, 1);
    assert_eq!(stats.completed_today, 4);

    // Completed requests leave the active queue but stay in the full listing
    let active = run(&store, "requests active").await;
    assert!(!active.contains("#1 "));
    assert!(active.contains("(2)"));
    assert!(run(&store, "requests").await.contains("✅ #1 "));
}

#[tokio::test]
async fn console_refuses_completing_pending_request() {
    let store = store_with(CompletionPolicy::Permissive);

    let output = run(&store, "complete 1").await;
    assert_eq!(output, "⚠️ Заявка #1 ещё не в работе. Сначала: take 1");
    assert_eq!(store.snapshot().await, DashboardState::seeded());

    run(&store, "complete 2").await;
    assert_eq!(run(&store, "complete 2").await, "⚠️ Заявка #2 уже завершена");
    assert_eq!(run(&store, "take 2").await, "⚠️ Заявка #2 уже завершена");
    assert_eq!(store.state(|s| s.audit_log.len()).await, 4);
}

#[tokio::test]
async fn default_listing_shows_every_request_in_seed_order() {
    let store = store_with(CompletionPolicy::Permissive);
    run(&store, "complete 2").await;

    let listing = run(&store, "/requests").await;
    assert!(listing.starts_with("📋 Все заявки (3)"));
    let first = listing.find("#1 ").unwrap();
    let second = listing.find("#2 ").unwrap();
    let third = listing.find("#3 ").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn strict_policy_reports_rejection() {
    let store = store_with(CompletionPolicy::Strict);

    // Sent straight to the store, bypassing the console's status check
    store.send(DashboardAction::complete("2")).await.unwrap();
    store.send(DashboardAction::complete("2")).await.unwrap();

    let state = store.snapshot().await;
    assert_eq!(
        state.last_error.as_deref(),
        Some("Заявка #2: переход Завершено → Завершено запрещён")
    );
    assert_eq!(state.audit_log.len(), 4);
    assert!(state.last_error.is_some());

    // A later successful transition clears the error
    assert!(run(&store, "take 3").await.starts_with("🔄"));
    assert!(store.state(|s| s.last_error.is_none()).await);
}

#[tokio::test]
async fn permissive_policy_logs_every_completion() {
    let store = store_with(CompletionPolicy::Permissive);
    for _ in 0..3 {
        store.send(DashboardAction::complete("3")).await.unwrap();
    }
    let ids: Vec<String> = store
        .state(|s| s.audit_log.iter().take(3).map(|e| e.id.to_string()).collect())
        .await;
    assert_eq!(ids, vec!["6", "5", "4"]);
}

#[tokio::test]
async fn unknown_request_changes_nothing() {
    let store = store_with(CompletionPolicy::Permissive);

    assert_eq!(run(&store, "complete 77").await, view::NOT_FOUND);
    assert_eq!(run(&store, "show 77").await, view::NOT_FOUND);

    // Sent straight to the store it is a silent no-op too
    store.send(DashboardAction::take("77")).await.unwrap();
    assert_eq!(store.snapshot().await, DashboardState::seeded());
}

#[tokio::test]
async fn operation_forms_do_not_touch_state() {
    let store = store_with(CompletionPolicy::Permissive);

    let output = run(&store, "block-card 4276123412341234 +79991234567 lost").await;
    assert!(output.contains("Блокировка карты"));
    assert!(output.contains("Причина: Утеря карты"));
    run(&store, "lookup +7 999 123-45-67").await;

    assert_eq!(store.snapshot().await, DashboardState::seeded());
}

#[tokio::test]
async fn audit_timestamps_follow_the_clock() {
    let state = DashboardState::seeded();
    let clock = SteppingClock::new(test_clock().now(), Duration::minutes(7));
    let env = DashboardEnvironment::for_state(&state, Arc::new(clock));
    let store = dashboard_store(state, env);

    store.send(DashboardAction::complete("1")).await.unwrap();
    store.send(DashboardAction::complete("3")).await.unwrap();

    let stamps: Vec<String> = store
        .state(|s| s.audit_log.iter().take(2).map(|e| e.timestamp.clone()).collect())
        .await;
    assert_eq!(stamps, vec!["17.01.2026, 14:57", "17.01.2026, 14:50"]);
}

#[tokio::test]
async fn confirm_completion_runs_dispatched_transition() {
    let store = store_with(CompletionPolicy::Permissive);

    store
        .send(DashboardAction::ConfirmCompletion {
            id: RequestId::from("3"),
            comment: String::new(),
        })
        .await
        .unwrap();

    let state = store.snapshot().await;
    assert_eq!(state.requests[2].status, RequestStatus::Completed);
    assert_eq!(state.audit_log[0].action, "Блокировка приложения");
}

#[tokio::test]
async fn shutdown_rejects_commands() {
    let store = store_with(CompletionPolicy::Permissive);
    store.shutdown();

    let result = execute(&store, Command::Take(RequestId::from("1")), 10).await;
    assert_eq!(result, Err(StoreError::ShutdownInProgress));

    // Read-only views still work
    assert!(execute(&store, Command::Audit, 10).await.is_ok());
}
