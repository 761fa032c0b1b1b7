use std::rc::Rc;

use shared::domain::SortMode;
use tracing::{debug, warn};

use crate::{
    bus::{DirectoryEvent, Notification, NotificationBus},
    components::{RenderScope, SEARCH_INPUT_ATTR, SORT_STATE_ATTR, USER_ID_ATTR},
    dom::NodeId,
    store::UserStore,
};

/// Turns delegated activation and input events into store operations and bus notifications.
///
/// No `RefCell` borrow is held while publishing: subscribed components borrow the
/// document and the store mutably when they re-render.
pub struct InteractionDispatcher {
    scope: RenderScope,
    bus: Rc<NotificationBus>,
}

impl InteractionDispatcher {
    pub fn new(scope: RenderScope, bus: Rc<NotificationBus>) -> Self {
        Self { scope, bus }
    }

    /// Row selection and sort toggling are checked independently; a target nested in
    /// both triggers both.
    pub fn on_activate(&self, target: NodeId) {
        let (row_token, toggle) = {
            let document = self.scope.document.borrow();
            let row_token = document
                .closest_with_attribute(target, USER_ID_ATTR)
                .and_then(|row| document.attribute(row, USER_ID_ATTR))
                .map(str::to_owned);
            let toggle = document.closest_with_attribute(target, SORT_STATE_ATTR);
            (row_token, toggle)
        };

        if let Some(token) = row_token {
            self.select_user(&token);
        }
        if let Some(toggle) = toggle {
            self.toggle_sort(toggle);
        }
    }

    pub fn on_input(&self, target: NodeId) {
        let phrase = {
            let document = self.scope.document.borrow();
            document
                .closest_with_attribute(target, SEARCH_INPUT_ATTR)
                .map(|_| document.value(target).to_owned())
        };
        let Some(phrase) = phrase else {
            return;
        };

        let users = self.scope.store.borrow_mut().search_by_name(&phrase).to_vec();
        debug!(%phrase, matches = users.len(), "search input");
        self.bus
            .publish(DirectoryEvent::SearchResultsChanged, &Notification::Users(users));
    }

    fn select_user(&self, token: &str) {
        let user = self.scope.store.borrow().find_by_token(token);
        let Some(user) = user else {
            warn!(user_id = token, "activated row has no matching user");
            return;
        };
        self.bus
            .publish(DirectoryEvent::SelectedUserChanged, &Notification::User(user));
    }

    fn toggle_sort(&self, toggle: NodeId) {
        let token = self
            .scope
            .document
            .borrow()
            .attribute(toggle, SORT_STATE_ATTR)
            .map(str::to_owned);
        let Some(current) = token.as_deref().and_then(SortMode::from_token) else {
            warn!(token = ?token, "sort toggle carries an unknown state");
            return;
        };

        let next = UserStore::next_sort_mode(current);
        let users = self.scope.store.borrow_mut().apply_sort_mode(next).to_vec();
        debug!(mode = next.token(), "sort toggled");
        self.bus
            .publish(DirectoryEvent::SearchResultsChanged, &Notification::Users(users));
        self.scope
            .document
            .borrow_mut()
            .set_attribute(toggle, SORT_STATE_ATTR, next.token());
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
