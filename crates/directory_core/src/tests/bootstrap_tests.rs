use async_trait::async_trait;
use axum::{http::StatusCode as HttpStatus, routing::get, Router};
use shared::protocol::USER_DATA_ROUTE;
use tokio::net::TcpListener;

use super::*;
use crate::{
    components::CONTAINER_ID,
    source::{HttpUserDataSource, StaticUserDataSource},
    test_support::user,
};

struct FailingSource(u16);

#[async_trait]
impl UserDataSource for FailingSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        Err(FetchError::Status(self.0))
    }
}

#[tokio::test]
async fn bootstrap_mounts_container_under_document_root() {
    let source = StaticUserDataSource::new(vec![user(1, "Bob", 30), user(2, "Ann", 25)]);
    let directory = bootstrap(&source, DirectoryContext::new())
        .await
        .expect("mounted");

    let document = directory.document();
    assert_eq!(document.children(document.root()), &[directory.root()]);
    assert_eq!(document.attribute(directory.root(), "id"), Some(CONTAINER_ID));
    drop(document);
    assert_eq!(directory.listed_names(), vec!["Bob", "Ann"]);
    assert_eq!(directory.store().len(), 2);
}

#[tokio::test]
async fn failed_fetch_leaves_document_unmounted() {
    let context = DirectoryContext::new();
    let err = bootstrap(&FailingSource(503), context.clone())
        .await
        .err()
        .expect("should fail");

    assert!(matches!(err, BootstrapError::Fetch(FetchError::Status(503))));
    let document = context.scope.document.borrow();
    assert!(document.children(document.root()).is_empty());
    assert!(context.scope.store.borrow().is_empty());
    assert_eq!(context.bus.subscriber_count(crate::bus::DirectoryEvent::SearchResultsChanged), 0);
}

#[tokio::test]
async fn non_ok_http_response_mounts_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        USER_DATA_ROUTE,
        get(|| async { (HttpStatus::NOT_FOUND, "missing") }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let source = HttpUserDataSource::new(&format!("http://{addr}")).expect("source");
    let context = DirectoryContext::new();
    let result = bootstrap(&source, context.clone()).await;

    assert!(matches!(
        result,
        Err(BootstrapError::Fetch(FetchError::Status(404)))
    ));
    let document = context.scope.document.borrow();
    assert!(document.children(document.root()).is_empty());
}

#[tokio::test]
async fn empty_payload_mounts_empty_list_and_blank_sidebar() {
    let directory = bootstrap(&StaticUserDataSource::default(), DirectoryContext::new())
        .await
        .expect("mounted");
    assert!(directory.listed_names().is_empty());
    let sidebar = directory.sidebar_fragment().expect("sidebar");
    let document = directory.document();
    let value = document
        .first_by_class(sidebar, "user-name__value")
        .expect("value");
    assert_eq!(document.text_content(value), "");
}

#[test]
fn fan_out_context_lets_extra_listeners_observe_selection() {
    let context = DirectoryContext::with_policy(SubscriptionPolicy::FanOut);
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let directory = mount_directory(context, vec![user(1, "Bob", 30), user(2, "Ann", 25)]);
    let sink = seen.clone();
    directory
        .bus()
        .subscribe(crate::bus::DirectoryEvent::SelectedUserChanged, move |notification| {
            if let crate::bus::Notification::User(user) = notification {
                sink.borrow_mut().push(user.name.clone());
            }
        });

    let row = directory.row(&UserId::from(2)).expect("row");
    directory.activate(row);

    assert_eq!(*seen.borrow(), vec!["Ann".to_string()]);
    let sidebar = directory.sidebar_fragment().expect("sidebar");
    let document = directory.document();
    let value = document
        .first_by_class(sidebar, "user-name__value")
        .expect("value");
    assert_eq!(document.text_content(value), "Ann");
}

#[test]
fn html_snapshot_contains_expected_structure() {
    let directory = mount_directory(DirectoryContext::new(), vec![user(7, "Eve", 33)]);
    let html = directory.html();
    assert!(html.starts_with("<div class=\"app-container\" id=\"appContainer\">"));
    assert!(html.contains("data-user-id=\"7\""));
    assert!(html.contains("data-sort-state=\"alphabet\""));
    assert!(html.contains("data-sort-state=\"age-grow\""));
    assert!(html.contains("<div class=\"user-name__value\">Eve</div>"));
}
