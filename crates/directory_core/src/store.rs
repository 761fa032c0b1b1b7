use std::{cmp::Ordering, rc::Rc};

use shared::domain::{SortMode, UserId, UserRecord};
use tracing::debug;

/// Canonical set of ingested users plus the filtered/sorted projection on display.
///
/// Both sequences share the same `Rc<UserRecord>` allocations; the working view never
/// holds copies.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<Rc<UserRecord>>,
    working_view: Vec<Rc<UserRecord>>,
    sort_mode: SortMode,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `user` to both sequences unless a user with a loosely-equal id is
    /// already present. Returns whether the user was added.
    pub fn ingest(&mut self, user: Rc<UserRecord>) -> bool {
        if self.find_by_id(&user.id).is_some() {
            return false;
        }
        debug!(user_id = %user.id, "ingesting user");
        self.working_view.push(user.clone());
        self.users.push(user);
        true
    }

    pub fn find_by_id(&self, id: &UserId) -> Option<Rc<UserRecord>> {
        self.users
            .iter()
            .find(|user| user.id.loosely_eq(id))
            .cloned()
    }

    /// Lookup by the textual id carried on a row element.
    pub fn find_by_token(&self, token: &str) -> Option<Rc<UserRecord>> {
        self.users
            .iter()
            .find(|user| user.id.matches_token(token))
            .cloned()
    }

    /// Rebuilds the working view from the canonical store, keeping users whose name
    /// contains `phrase` (case-sensitive). An empty phrase keeps everyone.
    pub fn search_by_name(&mut self, phrase: &str) -> &[Rc<UserRecord>] {
        self.working_view = self
            .users
            .iter()
            .filter(|user| user.name.contains(phrase))
            .cloned()
            .collect();
        &self.working_view
    }

    pub fn apply_sort_mode(&mut self, mode: SortMode) -> &[Rc<UserRecord>] {
        self.sort_mode = mode;
        self.working_view.sort_by(|a, b| compare(mode, a, b));
        &self.working_view
    }

    pub fn next_sort_mode(current: SortMode) -> SortMode {
        current.next()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn users(&self) -> &[Rc<UserRecord>] {
        &self.users
    }

    pub fn working_view(&self) -> &[Rc<UserRecord>] {
        &self.working_view
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Names compare ordinally (by code point); ages numerically.
pub fn compare(mode: SortMode, a: &UserRecord, b: &UserRecord) -> Ordering {
    match mode {
        SortMode::AlphabeticalAscending => a.name.cmp(&b.name),
        SortMode::AlphabeticalDescending => b.name.cmp(&a.name),
        SortMode::AgeAscending => a.age.cmp(&b.age),
        SortMode::AgeDescending => b.age.cmp(&a.age),
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
