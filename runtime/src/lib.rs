//! # Gatepass Runtime
//!
//! Runtime for Gatepass features.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling. A store is the view-state holder of one screen: it
//! owns the state slots, runs the reducer for every action and executes the
//! returned effects on tokio tasks, feeding their actions back in.
//!
//! ## Core Components
//!
//! - **Store**: Manages state and executes effects
//! - **`ScopedStore`**: Owner that cancels in-flight work when dropped
//! - **`EffectHandle`**: Awaits the effects started by one action
//! - **`RetryPolicy` / `poll_until`**: Bounded polling with backoff
//!
//! ## Example
//!
//! ```ignore
//! use gatepass_runtime::{ScopedStore, Store};
//!
//! let store = ScopedStore::new(Store::new(BrowseState::default(), BrowseReducer, env));
//!
//! // Send an action and wait for the fetch it started
//! store.send(BrowseAction::LoadCategories).await?.wait().await;
//!
//! // Read state
//! let categories = store.state(|s| s.categories.clone()).await;
//! ```

use gatepass_core::{
    effect::{Effect, EffectId},
    reducer::Reducer,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::AbortHandle;

/// Retry policies and the bounded polling loop
pub mod retry;

pub use retry::{Backoff, PollOutcome, RetryPolicy, RetryPolicyBuilder, poll_until};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned by `send()` after shutdown started or after the owning
        /// [`ScopedStore`](crate::ScopedStore) was dropped.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for an action or for effects to finish
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects started by
/// that action. Actions fed back by those effects are reduced before the
/// effect counts as finished, so after `wait()` the state reflects them.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(CheckInAction::Scan { payload }).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a handle plus the tracking context used during execution
    fn new(cancel_id: Option<EffectId>) -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
            cancel_id,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (_tx, rx) = watch::channel(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, nothing can still be running
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Internal: Effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
    cancel_id: Option<EffectId>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }

    /// Same counter, tasks registered under `id`
    fn with_cancel_id(&self, id: EffectId) -> Self {
        Self {
            cancel_id: Some(id),
            ..self.clone()
        }
    }
}

/// Internal: RAII guard that decrements effect counter on drop
///
/// Runs when a task finishes, panics, or is aborted.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-flight effect tasks, keyed so finished tasks can deregister themselves
#[derive(Default)]
struct TaskRegistry {
    next_key: u64,
    tasks: HashMap<u64, (Option<EffectId>, AbortHandle)>,
}

impl TaskRegistry {
    fn reserve(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);
        key
    }

    fn take_matching(&mut self, id: Option<EffectId>) -> Vec<AbortHandle> {
        let keys: Vec<u64> = self
            .tasks
            .iter()
            .filter(|(_, (task_id, _))| id.is_none() || *task_id == id)
            .map(|(key, _)| *key)
            .collect();

        keys.into_iter()
            .filter_map(|key| self.tasks.remove(&key))
            .map(|(_, handle)| handle)
            .collect()
    }
}

/// Removes a task from the registry when the task ends
struct Registration {
    registry: Arc<Mutex<TaskRegistry>>,
    key: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        lock(&self.registry).tasks.remove(&self.key);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectId, EffectTracking, Mutex, Ordering, Reducer, Registration, RwLock,
        StoreError, TaskRegistry, lock,
    };
    use futures::StreamExt;
    use std::future::Future;
    use tokio::sync::{broadcast, watch};

    /// The Store - view-state holder for one feature
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; only the reducer writes it)
    /// 2. Reducer (feature logic)
    /// 3. Environment (repositories and policies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// Cloning a store yields another handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        tasks: Arc<Mutex<TaskRegistry>>,
        /// Snapshot published after every reduction, for UI observers.
        state_watch: Arc<watch::Sender<S>>,
        /// Actions produced by effects, broadcast once they have been reduced.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Stop accepting new actions
        pub fn close(&self) {
            self.shutdown.store(true, Ordering::Release);
        }

        /// Whether the store still accepts actions
        #[must_use]
        pub fn is_open(&self) -> bool {
            !self.shutdown.load(Ordering::Acquire)
        }

        /// Number of effect tasks currently running
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Abort every in-flight effect registered under `id`
        ///
        /// Returns the number of tasks aborted.
        pub fn cancel(&self, id: EffectId) -> usize {
            let handles = lock(&self.tasks).take_matching(Some(id));
            let count = handles.len();
            for handle in handles {
                handle.abort();
            }
            if count > 0 {
                tracing::debug!(effect_id = %id, count, "Cancelled in-flight effects");
                metrics::counter!("store.effects.cancelled").increment(count as u64);
            }
            count
        }

        /// Abort every in-flight effect
        ///
        /// Returns the number of tasks aborted.
        pub fn cancel_all(&self) -> usize {
            let handles = lock(&self.tasks).take_matching(None);
            let count = handles.len();
            for handle in handles {
                handle.abort();
            }
            if count > 0 {
                tracing::debug!(count, "Cancelled all in-flight effects");
                metrics::counter!("store.effects.cancelled").increment(count as u64);
            }
            count
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + Clone + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast buffers 64 actions; slow observers skip
        /// older ones.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(64);
            let (state_watch, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                tasks: Arc::new(Mutex::new(TaskRegistry::default())),
                state_watch: Arc::new(state_watch),
                action_broadcast,
            }
        }

        /// The injected environment
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Rejects new actions, then waits for pending effects to complete.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            self.close();

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(25);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::warn!(pending_effects = pending, "Shutdown timed out");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Publishes the new state snapshot to observers
        /// 4. Starts the returned effects on tokio tasks
        ///
        /// `send()` returns after starting effect execution, not completion.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            self.send_internal(action).await
        }

        /// Send an action and wait for a matching action produced by its effects
        ///
        /// Subscribes to the action broadcast BEFORE sending, so a fast effect
        /// cannot slip past.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before matching action received
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Wait until the state satisfies `predicate`, returning that snapshot
        ///
        /// Checks the current state first, so a condition that already holds
        /// returns immediately.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: the condition did not hold in time
        /// - [`StoreError::ChannelClosed`]: the store was dropped while waiting
        pub async fn wait_for_state<F>(
            &self,
            predicate: F,
            timeout: Duration,
        ) -> Result<S, StoreError>
        where
            F: Fn(&S) -> bool,
        {
            let mut rx = self.state_watch.subscribe();

            tokio::time::timeout(timeout, async {
                rx.wait_for(|state| predicate(state))
                    .await
                    .map(|state| state.clone())
                    .map_err(|_| StoreError::ChannelClosed)
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects
        ///
        /// Only actions produced by effects are broadcast (not the ones passed
        /// to `send`), and only after the reducer has processed them.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Observe state snapshots
        ///
        /// The receiver always holds the latest state; intermediate snapshots
        /// may be skipped by slow observers.
        #[must_use]
        pub fn observe(&self) -> watch::Receiver<S> {
            self.state_watch.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let unread = store.state(|s| s.unread_count.clone()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        #[tracing::instrument(skip(self, action), name = "store_send_internal")]
        async fn send_internal(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::debug!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new(None);

            let effects = {
                let mut state = self.state.write().await;

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                self.state_watch.send_replace(state.clone());

                // Abort superseded tasks before the lock is released: one
                // already queued on it must not reduce its stale action.
                for id in effects.iter().filter_map(superseded_id) {
                    self.cancel(id);
                }

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Spawn an effect task, registering it for tracking and cancellation
        fn spawn_tracked<F>(&self, tracking: &EffectTracking, task: F)
        where
            F: Future<Output = ()> + Send + 'static,
        {
            tracking.increment();
            self.pending_effects.fetch_add(1, Ordering::SeqCst);

            let decrement = DecrementGuard(tracking.clone());
            let pending = AtomicCounterGuard(Arc::clone(&self.pending_effects));

            // Hold the registry lock across spawn so the task cannot
            // deregister before it has been registered.
            let mut registry = lock(&self.tasks);
            let key = registry.reserve();
            let registration = Registration {
                registry: Arc::clone(&self.tasks),
                key,
            };

            let join = tokio::spawn(async move {
                let _decrement = decrement;
                let _pending = pending;
                let _registration = registration;
                task.await;
            });

            registry
                .tasks
                .insert(key, (tracking.cancel_id, join.abort_handle()));
        }

        /// Execute an effect with tracking
        ///
        /// - `None`: No-op
        /// - `Future`: Executes async computation, sends resulting action if `Some`
        /// - `Stream`: Sends every item in order
        /// - `Cancellable`: Executes under the id; earlier effects with the id
        ///   were already aborted under the state lock
        /// - `Cancel`: Nothing left to do, the abort happened under the state lock
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let store = self.clone();

                    self.spawn_tracked(tracking, async move {
                        if let Some(action) = fut.await {
                            store.feed_back(action).await;
                        }
                    });
                },
                Effect::Stream(mut stream) => {
                    metrics::counter!("store.effects.executed", "type" => "stream").increment(1);
                    let store = self.clone();

                    self.spawn_tracked(tracking, async move {
                        while let Some(action) = stream.next().await {
                            store.feed_back(action).await;
                        }
                    });
                },
                Effect::Cancellable { id, effect } => {
                    self.execute_effect(*effect, &tracking.with_cancel_id(id));
                },
                Effect::Cancel(_) => {},
            }
        }

        /// Reduce an action produced by an effect, then broadcast it
        async fn feed_back(&self, action: A) {
            match self.send(action.clone()).await {
                Ok(_) => {
                    let _ = self.action_broadcast.send(action);
                },
                Err(error) => {
                    tracing::debug!(%error, "Dropped effect action");
                },
            }
        }
    }

    /// The id whose in-flight tasks an effect replaces or cancels
    fn superseded_id<A>(effect: &Effect<A>) -> Option<EffectId> {
        match effect {
            Effect::Cancellable { id, .. } | Effect::Cancel(id) => Some(*id),
            Effect::None | Effect::Future(_) | Effect::Stream(_) => None,
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                tasks: Arc::clone(&self.tasks),
                state_watch: Arc::clone(&self.state_watch),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;

/// Lifecycle-scoped owner of a [`Store`]
///
/// The screen that creates a feature keeps its `ScopedStore`. Dropping it
/// closes the store and aborts every in-flight effect, so abandoned requests
/// never write into a torn-down screen.
pub struct ScopedStore<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    store: Store<S, A, E, R>,
}

impl<S, A, E, R> ScopedStore<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Take ownership of a store's lifecycle
    #[must_use]
    pub fn new(store: Store<S, A, E, R>) -> Self {
        Self { store }
    }

    /// Another handle to the underlying store
    ///
    /// The handle does not extend the lifecycle; once this owner is dropped
    /// the handle rejects new actions.
    #[must_use]
    pub fn handle(&self) -> Store<S, A, E, R> {
        self.store.clone()
    }
}

impl<S, A, E, R> std::ops::Deref for ScopedStore<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    type Target = Store<S, A, E, R>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl<S, A, E, R> Drop for ScopedStore<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn drop(&mut self) {
        self.store.close();
        let cancelled = self.store.cancel_all();
        tracing::debug!(cancelled, "Scoped store dropped");
    }
}
