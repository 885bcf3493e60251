//! Integration tests for the Store runtime
//!
//! Covers effect feedback, slot cancellation, observation and the scoped
//! lifecycle that aborts in-flight work.

#![allow(clippy::unwrap_used)]

use futures::stream;
use gatepass_core::{
    SmallVec,
    effect::{Effect, EffectId},
    reducer::Reducer,
    smallvec,
};
use gatepass_runtime::{ScopedStore, Store, StoreError};
use std::time::Duration;

const SLOW: EffectId = EffectId::new("slow");
const FAST: EffectId = EffectId::new("fast");

#[derive(Clone, Debug, Default, PartialEq)]
struct SlotState {
    received: Vec<String>,
    slow: Option<String>,
    fast: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
enum SlotAction {
    StartStream { items: Vec<String> },
    Item { text: String },
    LoadSlow { label: String, delay_ms: u64 },
    SlowLoaded { label: String },
    LoadFast,
    FastLoaded,
    CancelSlow,
    CancelSlowAfterBlocking { busy_ms: u64 },
}

struct SlotReducer;

impl Reducer for SlotReducer {
    type State = SlotState;
    type Action = SlotAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut SlotState,
        action: SlotAction,
        _env: &(),
    ) -> SmallVec<[Effect<SlotAction>; 4]> {
        match action {
            SlotAction::StartStream { items } => smallvec![Effect::Stream(Box::pin(stream::iter(
                items.into_iter().map(|text| SlotAction::Item { text }),
            )))],
            SlotAction::Item { text } => {
                state.received.push(text);
                smallvec![Effect::None]
            },
            SlotAction::LoadSlow { label, delay_ms } => {
                let effect = Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Some(SlotAction::SlowLoaded { label })
                }));
                smallvec![effect.cancellable(SLOW)]
            },
            SlotAction::SlowLoaded { label } => {
                state.slow = Some(label);
                smallvec![Effect::None]
            },
            SlotAction::LoadFast => {
                let effect = Effect::Future(Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Some(SlotAction::FastLoaded)
                }));
                smallvec![effect.cancellable(FAST)]
            },
            SlotAction::FastLoaded => {
                state.fast = Some("done".to_string());
                smallvec![Effect::None]
            },
            SlotAction::CancelSlow => smallvec![Effect::Cancel(SLOW)],
            SlotAction::CancelSlowAfterBlocking { busy_ms } => {
                // Holds the state lock so the slot's result queues behind it
                std::thread::sleep(Duration::from_millis(busy_ms));
                smallvec![Effect::Cancel(SLOW)]
            },
        }
    }
}

fn new_store() -> Store<SlotState, SlotAction, (), SlotReducer> {
    Store::new(SlotState::default(), SlotReducer, ())
}

#[tokio::test]
async fn stream_items_are_reduced_in_order() {
    let store = new_store();

    let mut handle = store
        .send(SlotAction::StartStream {
            items: vec!["a".into(), "b".into(), "c".into()],
        })
        .await
        .unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();

    let received = store.state(|s| s.received.clone()).await;
    assert_eq!(received, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn reissuing_a_slot_cancels_only_that_slot() {
    let store = new_store();

    let mut first = store
        .send(SlotAction::LoadSlow {
            label: "first".into(),
            delay_ms: 200,
        })
        .await
        .unwrap();
    let mut fast = store.send(SlotAction::LoadFast).await.unwrap();
    let mut second = store
        .send(SlotAction::LoadSlow {
            label: "second".into(),
            delay_ms: 20,
        })
        .await
        .unwrap();

    second.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    fast.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    first.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    // Give the superseded future time to fire if it had not been aborted
    tokio::time::sleep(Duration::from_millis(250)).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.slow.as_deref(), Some("second"));
    assert_eq!(state.fast.as_deref(), Some("done"));
}

#[tokio::test]
async fn cancel_effect_aborts_the_slot() {
    let store = new_store();

    store
        .send(SlotAction::LoadSlow {
            label: "never".into(),
            delay_ms: 100,
        })
        .await
        .unwrap();
    store.send(SlotAction::CancelSlow).await.unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(store.state(|s| s.slow.clone()).await, None);
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn result_queued_behind_a_cancel_is_never_reduced() {
    let store = new_store();

    store
        .send(SlotAction::LoadSlow {
            label: "stale".into(),
            delay_ms: 10,
        })
        .await
        .unwrap();
    store
        .send(SlotAction::CancelSlowAfterBlocking { busy_ms: 80 })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.state(|s| s.slow.clone()).await, None);
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test]
async fn dropping_scoped_store_aborts_in_flight_work() {
    let scoped = ScopedStore::new(new_store());
    let handle = scoped.handle();

    scoped
        .send(SlotAction::LoadSlow {
            label: "late".into(),
            delay_ms: 100,
        })
        .await
        .unwrap();
    assert_eq!(handle.pending_effects(), 1);

    drop(scoped);
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(!handle.is_open());
    assert_eq!(handle.state(|s| s.slow.clone()).await, None);
    assert_eq!(handle.pending_effects(), 0);
    assert_eq!(
        handle.send(SlotAction::LoadFast).await.unwrap_err(),
        StoreError::ShutdownInProgress
    );
}

#[tokio::test]
async fn observers_see_latest_snapshot() {
    let store = new_store();
    let mut observer = store.observe();

    store
        .send(SlotAction::Item { text: "x".into() })
        .await
        .unwrap();

    observer.changed().await.unwrap();
    assert_eq!(observer.borrow_and_update().received, vec!["x"]);
}

#[tokio::test]
async fn send_and_wait_for_returns_effect_action() {
    let store = new_store();

    let action = store
        .send_and_wait_for(
            SlotAction::LoadFast,
            |a| matches!(a, SlotAction::FastLoaded),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(action, SlotAction::FastLoaded);
    assert_eq!(
        store.state(|s| s.fast.clone()).await.as_deref(),
        Some("done")
    );
}

#[tokio::test]
async fn send_and_wait_for_times_out_without_match() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            SlotAction::Item { text: "no effect".into() },
            |_| true,
            Duration::from_millis(50),
        )
        .await;

    assert_eq!(result, Err(StoreError::Timeout));
}

#[tokio::test]
async fn shutdown_waits_for_pending_effects() {
    let store = new_store();

    store.send(SlotAction::LoadFast).await.unwrap();
    store.shutdown(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.pending_effects(), 0);
    assert!(!store.is_open());
}

#[tokio::test]
async fn wait_for_state_sees_effect_results() {
    let store = new_store();

    store
        .send(SlotAction::LoadSlow {
            label: "loaded".into(),
            delay_ms: 20,
        })
        .await
        .unwrap();

    let state = store
        .wait_for_state(|s| s.slow.is_some(), Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(state.slow.as_deref(), Some("loaded"));
}

#[tokio::test]
async fn wait_for_state_times_out_when_predicate_never_holds() {
    let store = new_store();

    let result = store
        .wait_for_state(|s| s.fast.is_some(), Duration::from_millis(50))
        .await;

    assert_eq!(result, Err(StoreError::Timeout));
}
