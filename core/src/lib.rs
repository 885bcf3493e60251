//! # Gatepass Core
//!
//! Core traits and types for the Gatepass event-ticketing client.
//!
//! Every screen of the client is modelled as a *feature*: a state value, an
//! action enum and a reducer. Reducers are pure; anything that touches the
//! network is returned as an [`Effect`](effect::Effect) description and run by
//! the store in `gatepass-runtime`.
//!
//! ## Core Concepts
//!
//! - **State**: Independent observable slots for one screen
//! - **Action**: User requests plus the results fed back by effects
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Resource**: `Loading | Success | Error` outcome of one fetch
//!
//! ## Example
//!
//! ```
//! use gatepass_core::{effect::Effect, reducer::Reducer, resource::Resource, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CategoriesState {
//!     categories: Option<Resource<Vec<String>>>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CategoriesAction {
//!     CategoriesUpdated(Resource<Vec<String>>),
//! }
//!
//! struct CategoriesReducer;
//!
//! impl Reducer for CategoriesReducer {
//!     type State = CategoriesState;
//!     type Action = CategoriesAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CategoriesState,
//!         action: CategoriesAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CategoriesAction>; 4]> {
//!         match action {
//!             CategoriesAction::CategoriesUpdated(resource) => {
//!                 state.categories = Some(resource);
//!                 smallvec![Effect::None]
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// `Loading | Success | Error` wrapper for the outcome of one fetch
pub mod resource;

pub use resource::Resource;

/// Reducer module - The core trait for view-state logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They decide which slot goes to which state and which requests to issue,
/// and are deterministic and testable without a network.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for feature logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The view state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for BrowseReducer {
    ///     type State = BrowseState;
    ///     type Action = BrowseAction;
    ///     type Environment = ClientEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut BrowseState,
    ///         action: BrowseAction,
    ///         env: &ClientEnvironment,
    ///     ) -> SmallVec<[Effect<BrowseAction>; 4]> {
    ///         match action {
    ///             BrowseAction::LoadCatalog => smallvec![fetch(
    ///                 CATEGORIES,
    ///                 env.catalog.categories(),
    ///                 BrowseAction::CategoriesUpdated,
    ///             )],
    ///             BrowseAction::CategoriesUpdated(resource) => {
    ///                 state.categories = Some(resource);
    ///                 smallvec![Effect::None]
    ///             }
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce zero or one effect, so the result is a
        /// `SmallVec` that stays on the stack for up to four effects.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and can be keyed for cancellation.
pub mod effect {
    use futures::Stream;
    use std::fmt;
    use std::future::Future;
    use std::pin::Pin;

    /// Identifier used to cancel in-flight effects
    ///
    /// Features key their fetches by slot name, so issuing a new fetch for a
    /// slot replaces the one still running for that slot.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EffectId(&'static str);

    impl EffectId {
        /// Create an effect id from a static name
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self(name)
        }

        /// The name this id was created with
        #[must_use]
        pub const fn as_str(&self) -> &'static str {
            self.0
        }
    }

    impl fmt::Display for EffectId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Stream of actions
        ///
        /// Every item is fed back into the reducer in order. Repository calls
        /// use this to deliver `Loading` followed by the terminal state.
        Stream(Pin<Box<dyn Stream<Item = Action> + Send>>),

        /// Effect that can be cancelled by id
        ///
        /// Starting a cancellable effect first cancels every in-flight effect
        /// registered under the same id.
        Cancellable {
            /// Cancellation key
            id: EffectId,
            /// The wrapped effect
            effect: Box<Effect<Action>>,
        },

        /// Cancel every in-flight effect registered under `id`
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future and Stream don't implement Debug
    impl<Action> fmt::Debug for Effect<Action>
    where
        Action: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Stream(_) => write!(f, "Effect::Stream(<stream>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap this effect so it can be cancelled by `id`
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Whether this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
