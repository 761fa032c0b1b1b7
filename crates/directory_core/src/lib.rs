//! Client-side core of the user directory: notification bus, user store, component
//! tree and the interaction dispatcher, rendered into an in-memory [`dom::Document`].

pub mod bootstrap;
pub mod bus;
pub mod components;
pub mod dispatcher;
pub mod dom;
pub mod source;
pub mod store;

pub use bootstrap::{bootstrap, mount_directory, BootstrapError, DirectoryContext, MountedDirectory};
pub use bus::{DirectoryEvent, Notification, NotificationBus, SubscriptionPolicy};
pub use source::{FetchError, HttpUserDataSource, StaticUserDataSource, UserDataSource};
pub use store::UserStore;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
