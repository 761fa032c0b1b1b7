//! Render units of the directory UI.
//!
//! Every component builds its initial fragment in [`Component::render`]. Components that
//! react to bus notifications name their event in [`Component::subscription`] and keep a
//! handle to their own fragment so [`Component::on_notify`] can rebuild just that subtree.

use std::{cell::RefCell, rc::Rc};

use shared::domain::{SortKey, UserRecord};
use tracing::debug;

use crate::{
    bus::{DirectoryEvent, Notification, NotificationBus},
    dispatcher::InteractionDispatcher,
    dom::{Document, DomEvent, EventKind, Fragment, NodeId},
    store::UserStore,
};

pub const USER_ID_ATTR: &str = "data-user-id";
pub const SORT_STATE_ATTR: &str = "data-sort-state";
pub const SORT_ROLE_ATTR: &str = "data-sort-role";
pub const SEARCH_INPUT_ATTR: &str = "data-search-input";
pub const CONTAINER_ID: &str = "appContainer";

/// Shared handles every component renders through.
#[derive(Clone, Default)]
pub struct RenderScope {
    pub document: Rc<RefCell<Document>>,
    pub store: Rc<RefCell<UserStore>>,
}

impl RenderScope {
    pub fn new(document: Document, store: UserStore) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
            store: Rc::new(RefCell::new(store)),
        }
    }
}

pub trait Component {
    fn render(&mut self, scope: &RenderScope) -> Fragment;

    fn subscription(&self) -> Option<DirectoryEvent> {
        None
    }

    fn on_notify(&mut self, _scope: &RenderScope, _notification: &Notification) {}
}

/// Renders `component` once and, if it listens for an event, hands it to the bus.
pub fn mount<C>(mut component: C, scope: &RenderScope, bus: &NotificationBus) -> Fragment
where
    C: Component + 'static,
{
    let fragment = component.render(scope);
    if let Some(event) = component.subscription() {
        let component = Rc::new(RefCell::new(component));
        let scope = scope.clone();
        bus.subscribe(event, move |notification| {
            component.borrow_mut().on_notify(&scope, notification);
        });
    }
    fragment
}

pub struct Row {
    user: Rc<UserRecord>,
}

impl Row {
    pub fn new(user: Rc<UserRecord>) -> Self {
        Self { user }
    }
}

impl Component for Row {
    fn render(&mut self, scope: &RenderScope) -> Fragment {
        scope.store.borrow_mut().ingest(self.user.clone());

        let mut document = scope.document.borrow_mut();
        let row = document.elt("div", "", &["user-list__item", "user"]);
        document.set_attribute(row, USER_ID_ATTR, self.user.id.to_string());

        let image = document.elt("div", "", &["user__image"]);
        let img = document.create_element("img");
        document.set_attribute(img, "src", self.user.image.as_str());
        document.set_attribute(img, "alt", self.user.name.as_str());
        document.append(image, img);
        document.append(row, image);

        let age = self.user.age.to_string();
        for (class, text) in [
            ("user__name", self.user.name.as_str()),
            ("user__age", age.as_str()),
            ("user__phone", self.user.phone.as_str()),
        ] {
            let cell = document.elt("div", text, &[class]);
            document.append(row, cell);
        }
        row
    }
}

pub struct List {
    users: Vec<Rc<UserRecord>>,
    fragment: Option<Fragment>,
}

impl List {
    pub fn new(users: Vec<Rc<UserRecord>>) -> Self {
        Self {
            users,
            fragment: None,
        }
    }

    fn render_rows(scope: &RenderScope, users: &[Rc<UserRecord>]) -> NodeId {
        let list = scope
            .document
            .borrow_mut()
            .elt("ul", "", &["user-list__list"]);
        for user in users {
            let row = Row::new(user.clone()).render(scope);
            scope.document.borrow_mut().append(list, row);
        }
        list
    }
}

impl Component for List {
    fn render(&mut self, scope: &RenderScope) -> Fragment {
        let root = scope
            .document
            .borrow_mut()
            .elt("div", "", &["user-list", "component"]);
        let rows = Self::render_rows(scope, &self.users);
        scope.document.borrow_mut().append(root, rows);
        self.fragment = Some(root);
        debug!(rows = self.users.len(), "user list rendered");
        root
    }

    fn subscription(&self) -> Option<DirectoryEvent> {
        Some(DirectoryEvent::SearchResultsChanged)
    }

    fn on_notify(&mut self, scope: &RenderScope, notification: &Notification) {
        let (Some(root), Notification::Users(users)) = (self.fragment, notification) else {
            return;
        };
        let rows = Self::render_rows(scope, users);
        let mut document = scope.document.borrow_mut();
        document.clear_children(root);
        document.append(root, rows);
        self.users = users.clone();
        debug!(rows = users.len(), "user list patched");
    }
}

pub struct Sidebar {
    user: Option<Rc<UserRecord>>,
    fragment: Option<Fragment>,
}

impl Sidebar {
    pub fn new(user: Option<Rc<UserRecord>>) -> Self {
        Self {
            user,
            fragment: None,
        }
    }

    fn fill(document: &mut Document, root: NodeId, user: Option<&UserRecord>) {
        let image = document.elt("div", "", &["user-bar__image"]);
        if let Some(user) = user {
            let img = document.create_element("img");
            document.set_attribute(img, "src", user.image.as_str());
            document.set_attribute(img, "alt", user.name.as_str());
            document.append(image, img);
        }
        document.append(root, image);

        let list = document.elt("ul", "", &["user-bar__list"]);
        for (field, title, value) in [
            ("name", "Name", user.map(|user| user.name.as_str())),
            ("phone", "Phone", user.map(|user| user.phone.as_str())),
            ("animal", "Animal", user.map(|user| user.animal.as_str())),
        ] {
            let block = format!("user-{field}");
            let title_class = format!("{block}__title");
            let value_class = format!("{block}__value");
            let item = document.elt("li", "", &["user-bar__item", block.as_str()]);
            let title = document.elt("div", title, &[title_class.as_str()]);
            let value = document.elt("div", value.unwrap_or_default(), &[value_class.as_str()]);
            document.append_all(item, [title, value]);
            document.append(list, item);
        }
        document.append(root, list);

        let phrase = document.elt(
            "div",
            user.map(|user| user.phrase.as_str()).unwrap_or_default(),
            &["user-bar__phrase"],
        );
        document.append(root, phrase);
    }
}

impl Component for Sidebar {
    fn render(&mut self, scope: &RenderScope) -> Fragment {
        let mut document = scope.document.borrow_mut();
        let root = document.elt("div", "", &["user-bar", "component"]);
        Self::fill(&mut document, root, self.user.as_deref());
        self.fragment = Some(root);
        debug!(selected = self.user.is_some(), "user bar rendered");
        root
    }

    fn subscription(&self) -> Option<DirectoryEvent> {
        Some(DirectoryEvent::SelectedUserChanged)
    }

    fn on_notify(&mut self, scope: &RenderScope, notification: &Notification) {
        let (Some(root), Notification::User(user)) = (self.fragment, notification) else {
            return;
        };
        let mut document = scope.document.borrow_mut();
        document.clear_children(root);
        Self::fill(&mut document, root, Some(user.as_ref()));
        self.user = Some(user.clone());
    }
}

pub struct SearchInput;

impl Component for SearchInput {
    fn render(&mut self, scope: &RenderScope) -> Fragment {
        let mut document = scope.document.borrow_mut();
        let root = document.elt("div", "", &["search-bar", "component"]);
        let input = document.elt("input", "", &["search-input"]);
        for (name, value) in [
            ("type", "text"),
            (SEARCH_INPUT_ATTR, "true"),
            ("placeholder", "John Snow"),
            ("autocomplete", "off"),
            ("tabindex", "1"),
        ] {
            document.set_attribute(input, name, value);
        }
        document.append(root, input);
        root
    }
}

pub struct SortToggle {
    key: SortKey,
}

impl SortToggle {
    pub fn new(key: SortKey) -> Self {
        Self { key }
    }

    /// Class of the wrapper element rendered for `key`.
    pub fn item_class(key: SortKey) -> &'static str {
        match key {
            SortKey::Alphabetical => "alphabet-sort__item",
            SortKey::Age => "age-sort__item",
        }
    }

    fn input_id(&self) -> &'static str {
        match self.key {
            SortKey::Alphabetical => "alphabet-sort-input",
            SortKey::Age => "age-sort-input",
        }
    }

    fn title(&self) -> &'static str {
        match self.key {
            SortKey::Alphabetical => "Sort in alphabetical order",
            SortKey::Age => "Sort in age order",
        }
    }
}

impl Component for SortToggle {
    fn render(&mut self, scope: &RenderScope) -> Fragment {
        let mut document = scope.document.borrow_mut();
        let root = document.elt("div", "", &[Self::item_class(self.key), "tool"]);

        let checkbox = document.elt("input", "", &["tool__input", "hide"]);
        document.set_attribute(checkbox, "type", "checkbox");
        document.set_attribute(checkbox, "id", self.input_id());

        let label = document.elt("label", "", &["tool__label"]);
        document.set_attribute(label, SORT_STATE_ATTR, self.key.initial_mode().token());
        document.set_attribute(label, SORT_ROLE_ATTR, "true");
        document.set_attribute(label, "for", self.input_id());

        let title = document.elt("div", self.title(), &["tool__title"]);
        document.append_all(root, [checkbox, label, title]);
        root
    }
}

/// Root of the directory UI. Owns the delegated activation and input listeners.
pub struct Container {
    scope: RenderScope,
    bus: Rc<NotificationBus>,
    users: Vec<Rc<UserRecord>>,
    dispatcher: InteractionDispatcher,
    fragment: Option<Fragment>,
}

impl Container {
    pub fn new(scope: RenderScope, bus: Rc<NotificationBus>, users: Vec<Rc<UserRecord>>) -> Self {
        let dispatcher = InteractionDispatcher::new(scope.clone(), bus.clone());
        Self {
            scope,
            bus,
            users,
            dispatcher,
            fragment: None,
        }
    }

    pub fn fragment(&self) -> Option<Fragment> {
        self.fragment
    }

    /// Routes an event whose target lies inside the mounted container.
    pub fn handle_event(&self, event: DomEvent) {
        let Some(root) = self.fragment else {
            return;
        };
        if !self.scope.document.borrow().contains(root, event.target) {
            return;
        }
        match event.kind {
            EventKind::Activate => self.dispatcher.on_activate(event.target),
            EventKind::Input => self.dispatcher.on_input(event.target),
        }
    }
}

impl Component for Container {
    fn render(&mut self, scope: &RenderScope) -> Fragment {
        let search = mount(SearchInput, scope, &self.bus);
        let alphabetical = mount(SortToggle::new(SortKey::Alphabetical), scope, &self.bus);
        let age = mount(SortToggle::new(SortKey::Age), scope, &self.bus);
        let list = mount(List::new(self.users.clone()), scope, &self.bus);
        let sidebar = mount(Sidebar::new(self.users.first().cloned()), scope, &self.bus);

        let mut document = scope.document.borrow_mut();
        let root = document.elt("div", "", &["app-container"]);
        document.set_attribute(root, "id", CONTAINER_ID);
        let toolbar = document.elt("div", "", &["user-tool", "component"]);
        document.append_all(toolbar, [alphabetical, age]);
        let user_data = document.elt("div", "", &["user-data", "component"]);
        document.append_all(user_data, [list, sidebar]);
        document.append_all(root, [search, toolbar, user_data]);

        self.fragment = Some(root);
        debug!(users = self.users.len(), "container rendered");
        root
    }
}

#[cfg(test)]
#[path = "tests/components_tests.rs"]
mod tests;
