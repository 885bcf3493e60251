//! Home screen: event list, featured carousel and filter reference data

use super::fetch;
use crate::environment::ClientEnvironment;
use gatepass_api::types::{Category, Event, EventFilter, Location};
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_core::Resource;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the filtered event list
pub const EVENTS: EffectId = EffectId::new("browse.events");
/// Slot of the featured carousel
pub const FEATURED: EffectId = EffectId::new("browse.featured");
/// Slot of the category list
pub const CATEGORIES: EffectId = EffectId::new("browse.categories");
/// Slot of the location list
pub const LOCATIONS: EffectId = EffectId::new("browse.locations");

/// What the home screen shows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrowseState {
    /// Filter the event list was last requested with
    pub filter: EventFilter,
    /// Events matching `filter`
    pub events: Option<Resource<Vec<Event>>>,
    /// Featured carousel
    pub featured: Option<Resource<Vec<Event>>>,
    /// Categories for the filter sheet
    pub categories: Option<Resource<Vec<Category>>>,
    /// Locations for the filter sheet
    pub locations: Option<Resource<Vec<Location>>>,
}

/// Home screen actions
#[derive(Clone, Debug, PartialEq)]
pub enum BrowseAction {
    /// Load events matching a filter, replacing any list request in flight
    Search(EventFilter),
    /// Load the featured carousel
    LoadFeatured,
    /// Load categories and locations
    LoadCatalog,
    /// Reload the list with the current filter, and the carousel
    Refresh,
    /// Event list state changed
    EventsUpdated(Resource<Vec<Event>>),
    /// Featured carousel state changed
    FeaturedUpdated(Resource<Vec<Event>>),
    /// Category list state changed
    CategoriesUpdated(Resource<Vec<Category>>),
    /// Location list state changed
    LocationsUpdated(Resource<Vec<Location>>),
}

/// Reducer for the home screen
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowseReducer;

impl BrowseReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for BrowseReducer {
    type State = BrowseState;
    type Action = BrowseAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut BrowseState,
        action: BrowseAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<BrowseAction>; 4]> {
        match action {
            BrowseAction::Search(filter) => {
                state.filter = filter.clone();
                smallvec![fetch(EVENTS, env.events.events(filter), BrowseAction::EventsUpdated)]
            },
            BrowseAction::LoadFeatured => smallvec![fetch(
                FEATURED,
                env.events.featured_events(),
                BrowseAction::FeaturedUpdated
            )],
            BrowseAction::LoadCatalog => smallvec![
                fetch(CATEGORIES, env.catalog.categories(), BrowseAction::CategoriesUpdated),
                fetch(LOCATIONS, env.catalog.locations(), BrowseAction::LocationsUpdated),
            ],
            BrowseAction::Refresh => smallvec![
                fetch(
                    EVENTS,
                    env.events.events(state.filter.clone()),
                    BrowseAction::EventsUpdated
                ),
                fetch(FEATURED, env.events.featured_events(), BrowseAction::FeaturedUpdated),
            ],
            BrowseAction::EventsUpdated(resource) => {
                state.events = Some(resource);
                smallvec![Effect::None]
            },
            BrowseAction::FeaturedUpdated(resource) => {
                state.featured = Some(resource);
                smallvec![Effect::None]
            },
            BrowseAction::CategoriesUpdated(resource) => {
                state.categories = Some(resource);
                smallvec![Effect::None]
            },
            BrowseAction::LocationsUpdated(resource) => {
                state.locations = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the home screen
pub type BrowseStore = Store<BrowseState, BrowseAction, ClientEnvironment, BrowseReducer>;

/// Create a home screen store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<BrowseState, BrowseAction, ClientEnvironment, BrowseReducer> {
    ScopedStore::new(Store::new(BrowseState::default(), BrowseReducer::new(), env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support;
    use gatepass_api::types::CategoryId;
    use gatepass_testing::{ReducerTest, assertions};

    #[test]
    fn search_remembers_filter_and_keys_the_list_slot() {
        let (_, env) = test_support::environment();
        let filter = EventFilter {
            search: Some("jazz".to_string()),
            category_id: Some(CategoryId::new("music")),
            ..EventFilter::default()
        };

        ReducerTest::new(BrowseReducer::new())
            .with_env(env)
            .given_state(BrowseState::default())
            .when_action(BrowseAction::Search(filter.clone()))
            .then_state(move |state| {
                assert_eq!(state.filter, filter);
                assert!(state.events.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_cancellable_effect(effects, EVENTS);
            })
            .run();
    }

    #[test]
    fn catalog_loads_two_independent_slots() {
        let (_, env) = test_support::environment();

        ReducerTest::new(BrowseReducer::new())
            .with_env(env)
            .given_state(BrowseState::default())
            .when_action(BrowseAction::LoadCatalog)
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 2);
                assertions::assert_has_cancellable_effect(effects, CATEGORIES);
                assertions::assert_has_cancellable_effect(effects, LOCATIONS);
            })
            .run();
    }

    #[test]
    fn updates_write_only_their_slot() {
        let (_, env) = test_support::environment();

        ReducerTest::new(BrowseReducer::new())
            .with_env(env)
            .given_state(BrowseState::default())
            .when_action(BrowseAction::FeaturedUpdated(Resource::Loading))
            .when_action(BrowseAction::EventsUpdated(Resource::Error(
                "Failed to load events".to_string(),
            )))
            .then_state(|state| {
                assert_eq!(state.featured, Some(Resource::Loading));
                assert_eq!(
                    state.events,
                    Some(Resource::Error("Failed to load events".to_string()))
                );
                assert!(state.categories.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
