//! Expiry sweep tests

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use core_kernel::CarId;
use domain_motor::seed::ensure_seeded;
use domain_motor::{
    ExpiredPolicySweep, ExpiryConfig, ExpiryWorker, InMemoryMotorStore, MotorStorePort, NewPolicy,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

async fn seeded_store() -> InMemoryMotorStore {
    let store = InMemoryMotorStore::new();
    ensure_seeded(&store).await.unwrap();
    store
}

#[tokio::test]
async fn test_reports_policy_within_lookback() {
    let store = seeded_store().await;
    let mut sweep = ExpiredPolicySweep::new(Duration::from_secs(3600));

    // Policy A's last day is 2024-12-31; it is reported from midnight for an hour.
    let expired = sweep.sweep(&store, at(2024, 12, 31, 0, 30)).await.unwrap();

    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].provider, "Allianz");
    assert_eq!(expired[0].end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
}

#[tokio::test]
async fn test_each_policy_reported_once() {
    let store = seeded_store().await;
    let mut sweep = ExpiredPolicySweep::new(Duration::from_secs(3600));

    let first = sweep.sweep(&store, at(2024, 12, 31, 0, 10)).await.unwrap();
    let second = sweep.sweep(&store, at(2024, 12, 31, 0, 20)).await.unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(sweep.reported_count(), 1);
}

#[tokio::test]
async fn test_ignores_expiries_outside_lookback() {
    let store = seeded_store().await;
    let mut sweep = ExpiredPolicySweep::new(Duration::from_secs(3600));

    assert!(sweep.sweep(&store, at(2024, 12, 30, 23, 59)).await.unwrap().is_empty());
    assert!(sweep.sweep(&store, at(2024, 12, 31, 1, 1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lookback_across_midnight() {
    let store = seeded_store().await;
    store
        .create_policy(
            NewPolicy::new(
                CarId::new(2),
                "Generali",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            )
            .unwrap(),
        )
        .await
        .unwrap();
    let mut sweep = ExpiredPolicySweep::new(Duration::from_secs(2 * 3600));

    let expired = sweep.sweep(&store, at(2024, 12, 31, 1, 0)).await.unwrap();

    assert_eq!(expired.len(), 2);
}

#[tokio::test]
async fn test_store_failure_propagates_from_sweep() {
    let store = seeded_store().await;
    store.set_offline(true);
    let mut sweep = ExpiredPolicySweep::new(Duration::from_secs(3600));

    let result = sweep.sweep(&store, at(2024, 12, 31, 0, 30)).await;
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_worker_survives_store_failures() {
    let store = seeded_store().await;
    store.set_offline(true);
    let worker = ExpiryWorker::new(ExpiryConfig {
        interval: Duration::from_millis(5),
        lookback: Duration::from_secs(3600),
    });
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(worker.run(Arc::new(store.clone()), async move {
        let _ = rx.await;
    }));
    // Several failing sweeps run in this window.
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(!handle.is_finished());

    store.set_offline(false);
    tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker did not stop")
        .unwrap();
}

#[tokio::test]
async fn test_worker_stops_on_shutdown() {
    let store: Arc<dyn MotorStorePort> = Arc::new(seeded_store().await);
    let worker = ExpiryWorker::new(ExpiryConfig {
        interval: Duration::from_millis(5),
        lookback: Duration::from_secs(3600),
    });
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(worker.run(store, async move {
        let _ = rx.await;
    }));
    tokio::time::sleep(Duration::from_millis(20)).await;
    tx.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker did not stop")
        .unwrap();
}
