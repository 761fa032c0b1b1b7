use std::{cell::Ref, rc::Rc};

use shared::domain::{SortKey, UserId, UserRecord};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    bus::{NotificationBus, SubscriptionPolicy},
    components::{Component, Container, RenderScope, SortToggle, USER_ID_ATTR},
    dom::{Document, DomEvent, Fragment, NodeId},
    source::{FetchError, UserDataSource},
    store::UserStore,
};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load user data: {0}")]
    Fetch(#[from] FetchError),
}

/// Owned document, store and bus for one directory session.
#[derive(Clone, Default)]
pub struct DirectoryContext {
    pub scope: RenderScope,
    pub bus: Rc<NotificationBus>,
}

impl DirectoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SubscriptionPolicy) -> Self {
        Self {
            scope: RenderScope::default(),
            bus: Rc::new(NotificationBus::with_policy(policy)),
        }
    }
}

/// Fetches the initial records and mounts the directory. A failed fetch is logged and
/// leaves the document untouched.
pub async fn bootstrap<S>(
    source: &S,
    context: DirectoryContext,
) -> Result<MountedDirectory, BootstrapError>
where
    S: UserDataSource + ?Sized,
{
    let users = source.fetch_users().await.map_err(|error| {
        error!(%error, "failed to load user data; directory not mounted");
        error
    })?;
    Ok(mount_directory(context, users))
}

pub fn mount_directory(context: DirectoryContext, users: Vec<UserRecord>) -> MountedDirectory {
    let users: Vec<Rc<UserRecord>> = users.into_iter().map(Rc::new).collect();
    let count = users.len();
    let mut container = Container::new(context.scope.clone(), context.bus.clone(), users);
    let root = container.render(&context.scope);
    {
        let mut document = context.scope.document.borrow_mut();
        let body = document.root();
        document.append(body, root);
    }
    info!(users = count, "directory mounted");
    MountedDirectory {
        context,
        container,
        root,
    }
}

pub struct MountedDirectory {
    context: DirectoryContext,
    container: Container,
    root: Fragment,
}

impl MountedDirectory {
    pub fn context(&self) -> &DirectoryContext {
        &self.context
    }

    pub fn root(&self) -> Fragment {
        self.root
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.context.scope.document.borrow()
    }

    pub fn store(&self) -> Ref<'_, UserStore> {
        self.context.scope.store.borrow()
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.context.bus
    }

    pub fn dispatch(&self, event: DomEvent) {
        self.container.handle_event(event);
    }

    pub fn activate(&self, target: NodeId) {
        self.dispatch(DomEvent::activate(target));
    }

    /// Sets the control's value as typing would, then fires the input event.
    pub fn input(&self, target: NodeId, value: &str) {
        self.context
            .scope
            .document
            .borrow_mut()
            .set_value(target, value);
        self.dispatch(DomEvent::input(target));
    }

    pub fn search_field(&self) -> Option<NodeId> {
        self.document().first_by_class(self.root, "search-input")
    }

    pub fn sort_toggle(&self, key: SortKey) -> Option<NodeId> {
        let document = self.document();
        let item = document.first_by_class(self.root, SortToggle::item_class(key))?;
        document.first_by_class(item, "tool__label")
    }

    pub fn row(&self, id: &UserId) -> Option<NodeId> {
        let document = self.document();
        document
            .find_by_class(self.root, "user")
            .into_iter()
            .find(|row| {
                document
                    .attribute(*row, USER_ID_ATTR)
                    .is_some_and(|token| id.matches_token(token))
            })
    }

    pub fn list_fragment(&self) -> Option<Fragment> {
        self.document().first_by_class(self.root, "user-list")
    }

    pub fn sidebar_fragment(&self) -> Option<Fragment> {
        self.document().first_by_class(self.root, "user-bar")
    }

    /// Names shown in the list, top to bottom.
    pub fn listed_names(&self) -> Vec<String> {
        let document = self.document();
        document
            .find_by_class(self.root, "user__name")
            .into_iter()
            .map(|cell| document.text_content(cell))
            .collect()
    }

    pub fn html(&self) -> String {
        self.document().to_html(self.root)
    }
}

#[cfg(test)]
#[path = "tests/bootstrap_tests.rs"]
mod tests;
