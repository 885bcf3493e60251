//! Notification inbox and unread badge

use super::{fetch, perform};
use crate::environment::ClientEnvironment;
use gatepass_api::Acknowledgement;
use gatepass_api::types::{Notification, NotificationId, UnreadCount};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the inbox
pub const NOTIFICATIONS: EffectId = EffectId::new("notifications.list");
/// Slot of the unread badge
pub const UNREAD_COUNT: EffectId = EffectId::new("notifications.unread_count");

/// Inbox screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationsState {
    /// Notifications, newest first
    pub notifications: Option<Resource<Vec<Notification>>>,
    /// Badge count
    pub unread_count: Option<Resource<UnreadCount>>,
    /// Outcome of the last mark-read request
    pub mark_read: Option<Resource<Acknowledgement>>,
}

/// Inbox actions
#[derive(Clone, Debug, PartialEq)]
pub enum NotificationsAction {
    /// Load the inbox and the badge
    Load,
    /// Load only the badge
    LoadUnreadCount,
    /// Mark one notification read
    MarkRead(NotificationId),
    /// Mark everything read
    MarkAllRead,
    /// Inbox state changed
    NotificationsUpdated(Resource<Vec<Notification>>),
    /// Badge state changed
    UnreadCountUpdated(Resource<UnreadCount>),
    /// Mark-read state changed; success reloads inbox and badge
    MarkReadUpdated(Resource<Acknowledgement>),
}

/// Reducer for the inbox
#[derive(Clone, Copy, Debug, Default)]
pub struct NotificationsReducer;

impl NotificationsReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn reload(env: &ClientEnvironment) -> SmallVec<[Effect<NotificationsAction>; 4]> {
    smallvec![
        fetch(
            NOTIFICATIONS,
            env.notifications.notifications(),
            NotificationsAction::NotificationsUpdated
        ),
        fetch(
            UNREAD_COUNT,
            env.notifications.unread_count(),
            NotificationsAction::UnreadCountUpdated
        ),
    ]
}

impl Reducer for NotificationsReducer {
    type State = NotificationsState;
    type Action = NotificationsAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut NotificationsState,
        action: NotificationsAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<NotificationsAction>; 4]> {
        match action {
            NotificationsAction::Load => reload(env),
            NotificationsAction::LoadUnreadCount => smallvec![fetch(
                UNREAD_COUNT,
                env.notifications.unread_count(),
                NotificationsAction::UnreadCountUpdated
            )],
            NotificationsAction::MarkRead(id) => smallvec![perform(
                env.notifications.mark_read(id),
                NotificationsAction::MarkReadUpdated
            )],
            NotificationsAction::MarkAllRead => smallvec![perform(
                env.notifications.mark_all_read(),
                NotificationsAction::MarkReadUpdated
            )],
            NotificationsAction::NotificationsUpdated(resource) => {
                state.notifications = Some(resource);
                smallvec![Effect::None]
            },
            NotificationsAction::UnreadCountUpdated(resource) => {
                state.unread_count = Some(resource);
                smallvec![Effect::None]
            },
            NotificationsAction::MarkReadUpdated(resource) => {
                let refresh = resource.is_success();
                state.mark_read = Some(resource);
                if refresh {
                    reload(env)
                } else {
                    smallvec![Effect::None]
                }
            },
        }
    }
}

/// Store for the inbox
pub type NotificationsStore =
    Store<NotificationsState, NotificationsAction, ClientEnvironment, NotificationsReducer>;

/// Create an inbox store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<NotificationsState, NotificationsAction, ClientEnvironment, NotificationsReducer>
{
    ScopedStore::new(Store::new(NotificationsState::default(), NotificationsReducer::new(), env))
}
