//! Tests for the forecast coordinator
//!
//! Time is paused, so debounce intervals elapse only when every task is idle
//! and jobs complete exactly when the test releases them.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{sleep, timeout};

use domain_billing::PaymentStatus;
use domain_forecast::{
    simulate, BlockingExecutor, CoordinatorConfig, CoordinatorState, ForecastCoordinator,
    ForecastError, ForecastEvent, InlineExecutor, Percentage, ProbabilityConfig, RngSource,
    SimulationOptions, DEFAULT_DEBOUNCE,
};
use test_utils::{ClaimFixtures, GatedExecutor, PanickingExecutor, PendingJob};

fn config() -> CoordinatorConfig {
    CoordinatorConfig {
        options: SimulationOptions::new(200, 10),
        seed: Some(7),
        ..CoordinatorConfig::default()
    }
}

async fn next_event(events: &mut broadcast::Receiver<ForecastEvent>) -> ForecastEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

async fn next_job(jobs: &mut tokio::sync::mpsc::UnboundedReceiver<PendingJob>) -> PendingJob {
    timeout(Duration::from_secs(5), jobs.recv())
        .await
        .expect("timed out waiting for job")
        .expect("executor dropped")
}

async fn assert_no_job(jobs: &mut tokio::sync::mpsc::UnboundedReceiver<PendingJob>) {
    let outcome = timeout(DEFAULT_DEBOUNCE * 10, jobs.recv()).await;
    assert!(outcome.is_err(), "unexpected job dispatched");
}

// ============================================================================
// Debounce Tests
// ============================================================================

mod debounce_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_changes_runs_once_with_final_values() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        for value in [10, 20, 30, 40, 50] {
            sleep(Duration::from_millis(20)).await;
            handle.set_probability(PaymentStatus::Pending, value).unwrap();
            assert_eq!(handle.snapshot().state, CoordinatorState::Scheduled);
        }

        let job = next_job(&mut jobs).await;
        assert_eq!(job.generation(), 1);
        assert_eq!(job.job.probabilities.get(PaymentStatus::Pending), Some(Percentage::new(50).unwrap()));
        assert_eq!(handle.snapshot().state, CoordinatorState::Running);
        job.complete();

        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        assert!(matches!(next_event(&mut events).await, ForecastEvent::Published { generation: 1, .. }));
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(false));

        assert_no_job(&mut jobs).await;
        assert_eq!(handle.snapshot().state, CoordinatorState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_for_quiet_period() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        sleep(DEFAULT_DEBOUNCE / 2).await;
        assert!(jobs.try_recv().is_err());

        let job = next_job(&mut jobs).await;
        assert_eq!(job.generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_does_not_reschedule() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        next_job(&mut jobs).await.complete();

        handle.set_probability(PaymentStatus::Pending, 70).unwrap();
        handle.request_simulation(ProbabilityConfig::default()).unwrap();
        assert_no_job(&mut jobs).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_changes_before_claims_load_are_kept() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);

        handle.set_probability(PaymentStatus::Denied, 25).unwrap();
        assert_no_job(&mut jobs).await;
        assert!(!handle.snapshot().claims_loaded);
        assert_eq!(handle.snapshot().state, CoordinatorState::Idle);

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        let job = next_job(&mut jobs).await;
        assert_eq!(job.job.probabilities.get(PaymentStatus::Denied), Some(Percentage::new(25).unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_value_is_rejected_without_scheduling() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        next_job(&mut jobs).await.complete();

        let err = handle.set_probability(PaymentStatus::Pending, 101).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidArgument(_)));
        assert!(handle.set_probability(PaymentStatus::Pending, -1).is_err());

        assert_no_job(&mut jobs).await;
        assert_eq!(
            handle.snapshot().probabilities.get(PaymentStatus::Pending),
            Some(Percentage::new(70).unwrap())
        );
    }
}

// ============================================================================
// Generation Tests
// ============================================================================

mod generation_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_superseded_result_is_discarded() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        let first = next_job(&mut jobs).await;

        handle.set_probability(PaymentStatus::Pending, 10).unwrap();
        let second = next_job(&mut jobs).await;
        assert_eq!(second.generation(), 2);

        first.complete();
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        assert_eq!(next_event(&mut events).await, ForecastEvent::Discarded { generation: 1 });
        assert!(handle.is_busy());
        assert!(handle.snapshot().result.is_none());

        second.complete();
        match next_event(&mut events).await {
            ForecastEvent::Published { generation, result } => {
                assert_eq!(generation, 2);
                assert_eq!(handle.snapshot().result, Some(result));
            }
            other => panic!("expected publication, got {other:?}"),
        }
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(false));
        assert_eq!(handle.snapshot().generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_arriving_during_debounce_is_discarded() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        let first = next_job(&mut jobs).await;
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));

        handle.set_probability(PaymentStatus::Approved, 90).unwrap();
        first.complete();

        assert_eq!(next_event(&mut events).await, ForecastEvent::Discarded { generation: 1 });
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.state, CoordinatorState::Scheduled);
        assert!(snapshot.busy);

        next_job(&mut jobs).await.complete();
        assert!(matches!(next_event(&mut events).await, ForecastEvent::Published { generation: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_result_overtaken_by_earlier_completion() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        let first = next_job(&mut jobs).await;
        handle.set_probability(PaymentStatus::Pending, 40).unwrap();
        let second = next_job(&mut jobs).await;

        second.complete();
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        assert!(matches!(next_event(&mut events).await, ForecastEvent::Published { generation: 2, .. }));
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(false));

        first.complete();
        assert_eq!(next_event(&mut events).await, ForecastEvent::Discarded { generation: 1 });
        assert_eq!(handle.snapshot().generation, 2);
        assert!(!handle.is_busy());
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

mod failure_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_result() {
        let (executor, mut jobs) = GatedExecutor::new();
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), executor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();
        next_job(&mut jobs).await.complete();
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        assert!(matches!(next_event(&mut events).await, ForecastEvent::Published { .. }));
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(false));
        let published = handle.snapshot().result;

        handle.set_probability(PaymentStatus::Pending, 20).unwrap();
        next_job(&mut jobs)
            .await
            .respond(Err(ForecastError::execution_failure("worker lost")));

        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        assert_eq!(
            next_event(&mut events).await,
            ForecastEvent::Failed {
                generation: 2,
                error: ForecastError::execution_failure("worker lost"),
            }
        );
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(false));

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.result, published);
        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.state, CoordinatorState::Idle);
        assert!(snapshot.last_error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_probability_surfaces_as_configuration_error() {
        let partial = ProbabilityConfig::empty().with(PaymentStatus::Pending, Percentage::FULL);
        let handle = ForecastCoordinator::spawn(config(), partial, InlineExecutor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();

        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        match next_event(&mut events).await {
            ForecastEvent::Failed { error, .. } => assert!(error.is_configuration()),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!handle.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_worker_becomes_execution_failure() {
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), PanickingExecutor);
        let mut events = handle.subscribe();

        handle.load_claims(ClaimFixtures::mixed_set()).unwrap();

        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(true));
        match next_event(&mut events).await {
            ForecastEvent::Failed { generation, error } => {
                assert_eq!(generation, 1);
                assert!(matches!(error, ForecastError::ExecutionFailure(_)));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(next_event(&mut events).await, ForecastEvent::BusyChanged(false));
        assert!(handle.snapshot().result.is_none());
    }

    #[tokio::test]
    async fn test_commands_fail_after_coordinator_stops() {
        let (coordinator, handle) =
            ForecastCoordinator::new(config(), ProbabilityConfig::default(), InlineExecutor);
        drop(coordinator);

        let err = handle.load_claims(ClaimFixtures::mixed_set()).unwrap_err();
        assert!(matches!(err, ForecastError::ExecutionFailure(_)));
    }
}

// ============================================================================
// End-to-End Tests
// ============================================================================

mod end_to_end_tests {
    use super::*;

    #[tokio::test]
    async fn test_blocking_executor_publishes_seeded_result() {
        let claims = ClaimFixtures::sample_set(50, 3);
        let handle = ForecastCoordinator::spawn(config(), ProbabilityConfig::default(), BlockingExecutor);
        let mut snapshots = handle.watch();

        handle.load_claims(claims.clone()).unwrap();

        let snapshot = timeout(Duration::from_secs(10), snapshots.wait_for(|s| s.result.is_some()))
            .await
            .expect("timed out waiting for forecast")
            .expect("coordinator stopped")
            .clone();

        let expected = simulate(
            &claims,
            &ProbabilityConfig::default(),
            SimulationOptions::new(200, 10),
            &mut RngSource::seeded(7),
        )
        .unwrap();

        assert_eq!(snapshot.result, Some(expected));
        assert_eq!(snapshot.generation, 1);
    }
}
