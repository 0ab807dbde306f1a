//! Tests for PollingController
//!
//! Timer tests run on a paused clock so interval ticks are deterministic.

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::common::{abc, counting_fetch_api, xyz};
use crate::config::RefreshOrdering;
use crate::error::DashboardError;
use crate::services::polling::{PollingController, RefreshOutcome};
use crate::state::SharedState;
use crate::traits::MockEvaluationApi;

const INTERVAL: Duration = Duration::from_secs(30);

fn controller(api: MockEvaluationApi, state: &SharedState) -> PollingController<MockEvaluationApi> {
    PollingController::new(Arc::new(api), state.clone(), RefreshOrdering::default())
}

#[tokio::test]
async fn test_refresh_applies_results() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc(), xyz()]);
    let poller = controller(api, &state);
    let started = Utc::now();

    // Act
    let outcome = poller.refresh_now().await;

    // Assert
    assert_eq!(outcome, RefreshOutcome::Applied { count: 2 });
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let snapshot = state.snapshot();
    assert_eq!(snapshot.contracts.len(), 2);
    assert!(snapshot.last_update.is_some_and(|at| at >= started));
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn test_refresh_failure_sets_error_and_keeps_store() {
    // Arrange
    let state = SharedState::new();
    state.with(|s| {
        s.store.replace_all(vec![abc()]);
    });
    let before = state.snapshot().last_update;

    let mut api = MockEvaluationApi::new();
    api.expect_fetch_evaluations()
        .returning(|| Err(DashboardError::fetch("HTTP 503 Service Unavailable")));
    let poller = controller(api, &state);

    // Act
    let outcome = poller.refresh_now().await;

    // Assert
    let expected = "Failed to fetch evaluations: HTTP 503 Service Unavailable".to_string();
    assert_eq!(outcome, RefreshOutcome::Failed(expected.clone()));

    let snapshot = state.snapshot();
    assert_eq!(snapshot.error, Some(expected));
    assert_eq!(snapshot.contracts.len(), 1);
    assert_eq!(snapshot.last_update, before);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_refresh_clears_previous_error() {
    // Arrange
    let state = SharedState::new();
    state.with(|s| s.error = Some("Failed to fetch evaluations: timeout".to_string()));
    let (api, _) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);

    // Act
    poller.refresh_now().await;

    // Assert
    assert_eq!(state.snapshot().error, None);
}

#[tokio::test]
async fn test_empty_results_clear_store() {
    // Arrange
    let state = SharedState::new();
    state.with(|s| {
        s.store.replace_all(vec![abc(), xyz()]);
    });
    let (api, _) = counting_fetch_api(vec![]);
    let poller = controller(api, &state);

    // Act
    let outcome = poller.refresh_now().await;

    // Assert
    assert_eq!(outcome, RefreshOutcome::Applied { count: 0 });
    assert!(state.snapshot().contracts.is_empty());
}

#[tokio::test]
async fn test_manual_refresh_ignores_suppression() {
    // Arrange
    let state = SharedState::new();
    state.with(|s| s.selection.analyzing_id = Some("C1".to_string()));
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);

    // Act
    let outcome = poller.refresh_now().await;

    // Assert
    assert_eq!(outcome, RefreshOutcome::Applied { count: 1 });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refresh_after_deactivate_is_inactive() {
    // Arrange
    let state = SharedState::new();
    let mut api = MockEvaluationApi::new();
    api.expect_fetch_evaluations().never();
    let poller = controller(api, &state);
    state.deactivate();

    // Act
    let outcome = poller.refresh_now().await;

    // Assert
    assert_eq!(outcome, RefreshOutcome::Inactive);
    assert!(!state.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_interval() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);

    // Act
    let handle = poller.start_auto_refresh(INTERVAL);
    tokio::time::sleep(INTERVAL - Duration::from_millis(10)).await;
    let before_first_tick = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Assert
    assert_eq!(before_first_tick, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.snapshot().contracts.len(), 1);
    assert!(handle.is_running());

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_ticks_repeat_every_interval() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);

    // Act
    let handle = poller.start_auto_refresh(INTERVAL);
    tokio::time::sleep(INTERVAL * 3 + Duration::from_millis(10)).await;

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_ticks_skipped_while_analysis_in_flight() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);
    state.with(|s| s.selection.analyzing_id = Some("C1".to_string()));

    // Act
    let handle = poller.start_auto_refresh(INTERVAL);
    tokio::time::sleep(INTERVAL * 2 + Duration::from_millis(10)).await;
    let while_suppressed = calls.load(Ordering::SeqCst);

    state.with(|s| s.selection.analyzing_id = None);
    tokio::time::sleep(INTERVAL).await;

    // Assert
    assert_eq!(while_suppressed, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(handle.is_running(), "Suppression skips ticks without stopping the timer");

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_prevents_further_ticks() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);
    let handle = poller.start_auto_refresh(INTERVAL);
    tokio::time::sleep(INTERVAL + Duration::from_millis(10)).await;

    // Act
    handle.stop().await;
    tokio::time::sleep(INTERVAL * 3).await;

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timer_exits_after_deactivate() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);
    let handle = poller.start_auto_refresh(INTERVAL);

    // Act
    state.deactivate();
    tokio::time::sleep(INTERVAL * 2).await;

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!handle.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_timer() {
    // Arrange
    let state = SharedState::new();
    let (api, calls) = counting_fetch_api(vec![abc()]);
    let poller = controller(api, &state);

    // Act
    drop(poller.start_auto_refresh(INTERVAL));
    tokio::time::sleep(INTERVAL * 2).await;

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
