//! Named-event publish/subscribe used by components to patch themselves in place.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use shared::domain::UserRecord;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryEvent {
    SearchResultsChanged,
    SelectedUserChanged,
}

impl DirectoryEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::SearchResultsChanged => "search-results-changed",
            Self::SelectedUserChanged => "selected-user-changed",
        }
    }
}

impl fmt::Display for DirectoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum Notification {
    Users(Vec<Rc<UserRecord>>),
    User(Rc<UserRecord>),
}

/// How a second `subscribe` for an already-registered event is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionPolicy {
    /// The first handler keeps the event; later registrations are ignored.
    #[default]
    FirstOnly,
    /// Every handler is kept and invoked in registration order.
    FanOut,
}

type Handler = Rc<dyn Fn(&Notification)>;

#[derive(Default)]
pub struct NotificationBus {
    policy: SubscriptionPolicy,
    subscribers: RefCell<HashMap<DirectoryEvent, Vec<Handler>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SubscriptionPolicy) -> Self {
        Self {
            policy,
            subscribers: RefCell::default(),
        }
    }

    pub fn policy(&self) -> SubscriptionPolicy {
        self.policy
    }

    pub fn subscribe(&self, event: DirectoryEvent, handler: impl Fn(&Notification) + 'static) {
        let mut subscribers = self.subscribers.borrow_mut();
        let handlers = subscribers.entry(event).or_default();
        if self.policy == SubscriptionPolicy::FirstOnly && !handlers.is_empty() {
            debug!(%event, "event already has a subscriber; ignoring registration");
            return;
        }
        handlers.push(Rc::new(handler));
    }

    /// Invokes the handlers for `event` synchronously. Publishing to an event
    /// nobody subscribed to is a no-op.
    pub fn publish(&self, event: DirectoryEvent, notification: &Notification) {
        // Handlers may re-enter the bus, so the table is not borrowed while they run.
        let handlers = self
            .subscribers
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default();
        debug!(%event, handlers = handlers.len(), "publishing");
        for handler in handlers {
            handler(notification);
        }
    }

    pub fn subscriber_count(&self, event: DirectoryEvent) -> usize {
        self.subscribers
            .borrow()
            .get(&event)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
#[path = "tests/bus_tests.rs"]
mod tests;
