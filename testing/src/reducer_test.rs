//! Given-When-Then harness for feature reducers
//!
//! Reducers are pure, so a feature's slot transitions and the effects it
//! issues can be checked without a store or a network.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use gatepass_core::{effect::Effect, reducer::Reducer};

type StateAssertion<S> = Box<dyn FnOnce(&S)>;

type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent reducer test
///
/// `when_action` may be called several times: the actions are reduced in
/// order, and effect assertions see the effects of the last one.
///
/// # Example
///
/// ```ignore
/// use gatepass_testing::{ReducerTest, assertions};
///
/// let effects = ReducerTest::new(BrowseReducer)
///     .with_env(test_environment())
///     .given_state(BrowseState::default())
///     .when_action(BrowseAction::LoadCategories)
///     .then_state(|state| assert!(state.categories.is_none()))
///     .then_effects(|effects| assertions::assert_has_stream_effect(effects))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the final state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Reduce every queued action, run the assertions and return the
    /// effects of the last action so a test can drive them further
    ///
    /// # Panics
    ///
    /// Panics if initial state, actions, or environment are not set,
    /// or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) -> Vec<Effect<A>> {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }

        effects
    }
}

/// Helper assertions for effects
pub mod assertions {
    use gatepass_core::effect::{Effect, EffectId};

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Assert that effects contain at least one Stream effect, looking
    /// through `Cancellable` wrappers
    ///
    /// # Panics
    ///
    /// Panics if no Stream effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_stream_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(is_stream),
            "Expected at least one Stream effect, but none found"
        );
    }

    /// Assert that one of the effects is cancellable under `id`
    ///
    /// # Panics
    ///
    /// Panics if no effect is registered under `id`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_cancellable_effect<A: std::fmt::Debug>(effects: &[Effect<A>], id: EffectId) {
        assert!(
            effects.iter().any(|e| cancellable_ids(e).contains(&id)),
            "Expected an effect cancellable as {id}, but found {effects:?}"
        );
    }

    /// Assert that the effects cancel `id`
    ///
    /// # Panics
    ///
    /// Panics if no `Cancel(id)` effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_cancels<A: std::fmt::Debug>(effects: &[Effect<A>], id: EffectId) {
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, Effect::Cancel(cancelled) if *cancelled == id)),
            "Expected Cancel({id}), but found {effects:?}"
        );
    }

    fn is_stream<A>(effect: &Effect<A>) -> bool {
        match effect {
            Effect::Stream(_) => true,
            Effect::Cancellable { effect, .. } => is_stream(effect),
            Effect::None | Effect::Future(_) | Effect::Cancel(_) => false,
        }
    }

    /// Every id an effect is cancellable under
    #[must_use]
    pub fn cancellable_ids<A>(effect: &Effect<A>) -> Vec<EffectId> {
        match effect {
            Effect::Cancellable { id, effect } => {
                let mut ids = vec![*id];
                ids.extend(cancellable_ids(effect));
                ids
            },
            Effect::None | Effect::Future(_) | Effect::Stream(_) | Effect::Cancel(_) => Vec::new(),
        }
    }
}

/// Run an effect to completion without a store and collect the actions it
/// produces, in order
///
/// Cancellation wrappers are ignored.
pub fn drain_effect<A>(effect: Effect<A>) -> futures::future::BoxFuture<'static, Vec<A>>
where
    A: Send + 'static,
{
    use futures::{FutureExt, StreamExt};

    async move {
        match effect {
            Effect::None | Effect::Cancel(_) => Vec::new(),
            Effect::Future(fut) => fut.await.into_iter().collect(),
            Effect::Stream(stream) => stream.collect().await,
            Effect::Cancellable { effect, .. } => drain_effect(*effect).await,
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatepass_core::{effect::EffectId, resource::Resource};
    use smallvec::{SmallVec, smallvec};

    const NAMES: EffectId = EffectId::new("names");

    #[derive(Clone, Debug, Default)]
    struct NamesState {
        names: Option<Resource<Vec<String>>>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum NamesAction {
        Load,
        NamesUpdated(Resource<Vec<String>>),
        Abandon,
    }

    struct NamesReducer;

    impl Reducer for NamesReducer {
        type State = NamesState;
        type Action = NamesAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut NamesState,
            action: NamesAction,
            _env: &(),
        ) -> SmallVec<[Effect<NamesAction>; 4]> {
            match action {
                NamesAction::Load => {
                    let stream = futures::stream::iter(vec![
                        NamesAction::NamesUpdated(Resource::Loading),
                        NamesAction::NamesUpdated(Resource::Success(vec!["Ada".to_string()])),
                    ]);
                    smallvec![Effect::Stream(Box::pin(stream)).cancellable(NAMES)]
                },
                NamesAction::NamesUpdated(resource) => {
                    state.names = Some(resource);
                    smallvec![Effect::None]
                },
                NamesAction::Abandon => smallvec![Effect::Cancel(NAMES)],
            }
        }
    }

    #[test]
    fn load_issues_cancellable_stream() {
        let effects = ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::Load)
            .then_state(|state| assert!(state.names.is_none()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_stream_effect(effects);
                assertions::assert_has_cancellable_effect(effects, NAMES);
            })
            .run();

        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn actions_are_reduced_in_order() {
        ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::NamesUpdated(Resource::Loading))
            .when_action(NamesAction::NamesUpdated(Resource::Error("boom".to_string())))
            .then_state(|state| {
                assert_eq!(state.names, Some(Resource::Error("boom".to_string())));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn abandon_cancels_slot() {
        ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::Abandon)
            .then_effects(|effects| assertions::assert_cancels(effects, NAMES))
            .run();
    }

    #[tokio::test]
    async fn drain_effect_yields_stream_items() {
        let mut effects = ReducerTest::new(NamesReducer)
            .with_env(())
            .given_state(NamesState::default())
            .when_action(NamesAction::Load)
            .run();

        let actions = drain_effect(effects.remove(0)).await;
        assert_eq!(
            actions,
            vec![
                NamesAction::NamesUpdated(Resource::Loading),
                NamesAction::NamesUpdated(Resource::Success(vec!["Ada".to_string()])),
            ]
        );
    }
}
