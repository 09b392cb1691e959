use mockall::predicate::eq;

use notion_sync::config::{PropertyNames, SyncConfig, WriteFailurePolicy};
use notion_sync::contract::{MockPageStore, PageRef, StoreError};
use notion_sync::event::{IssueAction, IssueEvent, IssueState};
use notion_sync::reconcile::SyncOutcome;
use notion_sync::status::StatusLabel;
use notion_sync::synchronise::{synchronise, SyncError};

fn test_config() -> SyncConfig {
    SyncConfig {
        notion_token: "secret-test-token".to_string(),
        database_id: "db-test".to_string(),
        api_base: "https://api.notion.invalid".to_string(),
        properties: PropertyNames::default(),
        on_write_failure: WriteFailurePolicy::Ignore,
    }
}

fn event(action: IssueAction, number: u64, state: Option<IssueState>) -> IssueEvent {
    IssueEvent {
        action,
        number,
        title: "Fix the flaky login test".to_string(),
        url: format!("https://github.com/acme/app/issues/{number}"),
        state,
        assignees: vec!["alice".to_string()],
    }
}

fn page() -> PageRef {
    PageRef {
        id: "page-1".to_string(),
    }
}

fn api_error() -> StoreError {
    StoreError::Api {
        status: 500,
        message: "internal server error".to_string(),
    }
}

/// Scenario: an opened issue with no existing page results in exactly
/// one create call and nothing else.
#[tokio::test]
async fn opened_issue_without_page_creates_one_page() {
    let mut store = MockPageStore::new();
    store
        .expect_find_page()
        .with(eq(42u64))
        .times(1)
        .returning(|_| Ok(None));
    store
        .expect_create_page()
        .withf(|event: &IssueEvent| event.number == 42)
        .times(1)
        .returning(|_| Ok(page()));
    store.expect_update_page().never();
    store.expect_update_status().never();

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Opened, 42, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect("synchronise should succeed");

    assert_eq!(outcome, SyncOutcome::Created);
}

/// Scenario: closing a tracked issue rewrites only the status.
#[tokio::test]
async fn closed_issue_with_page_gets_a_status_only_update() {
    let mut store = MockPageStore::new();
    store
        .expect_find_page()
        .with(eq(42u64))
        .times(1)
        .returning(|_| Ok(Some(page())));
    store
        .expect_update_status()
        .withf(|page: &PageRef, status: &StatusLabel| {
            page.id == "page-1" && *status == StatusLabel::Done
        })
        .times(1)
        .returning(|_, _| Ok(()));
    store.expect_create_page().never();
    store.expect_update_page().never();

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Closed, 42, Some(IssueState::Closed)),
        &store,
    )
    .await
    .expect("synchronise should succeed");

    assert_eq!(outcome, SyncOutcome::StatusUpdated);
}

/// Scenario: closing an untracked issue writes nothing at all.
#[tokio::test]
async fn closed_issue_without_page_writes_nothing() {
    let mut store = MockPageStore::new();
    store
        .expect_find_page()
        .with(eq(99u64))
        .times(1)
        .returning(|_| Ok(None));
    store.expect_create_page().never();
    store.expect_update_page().never();
    store.expect_update_status().never();

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Closed, 99, Some(IssueState::Closed)),
        &store,
    )
    .await
    .expect("synchronise should succeed");

    assert_eq!(outcome, SyncOutcome::Skipped);
}

/// A duplicate opened event is skipped rather than converted into an
/// update.
#[tokio::test]
async fn opened_issue_with_existing_page_is_skipped() {
    let mut store = MockPageStore::new();
    store
        .expect_find_page()
        .times(1)
        .returning(|_| Ok(Some(page())));
    store.expect_create_page().never();
    store.expect_update_page().never();
    store.expect_update_status().never();

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Opened, 42, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect("synchronise should succeed");

    assert_eq!(outcome, SyncOutcome::Skipped);
}

/// An edit to a tracked issue rewrites the full property set.
#[tokio::test]
async fn edited_issue_with_page_gets_a_full_update() {
    let mut store = MockPageStore::new();
    store
        .expect_find_page()
        .times(1)
        .returning(|_| Ok(Some(page())));
    store
        .expect_update_page()
        .withf(|page: &PageRef, event: &IssueEvent| {
            page.id == "page-1" && event.title == "Fix the flaky login test"
        })
        .times(1)
        .returning(|_, _| Ok(()));
    store.expect_create_page().never();
    store.expect_update_status().never();

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Edited, 42, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect("synchronise should succeed");

    assert_eq!(outcome, SyncOutcome::Updated);
}

/// An edit to an untracked issue backfills the page.
#[tokio::test]
async fn edited_issue_without_page_creates_the_page() {
    let mut store = MockPageStore::new();
    store.expect_find_page().times(1).returning(|_| Ok(None));
    store
        .expect_create_page()
        .times(1)
        .returning(|_| Ok(page()));
    store.expect_update_page().never();
    store.expect_update_status().never();

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Edited, 7, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect("synchronise should succeed");

    assert_eq!(outcome, SyncOutcome::Created);
}

/// A failed lookup aborts the run before any write is attempted.
#[tokio::test]
async fn lookup_failure_is_fatal_and_prevents_writes() {
    let mut store = MockPageStore::new();
    store
        .expect_find_page()
        .times(1)
        .returning(|_| Err(api_error()));
    store.expect_create_page().never();
    store.expect_update_page().never();
    store.expect_update_status().never();

    let err = synchronise(
        &test_config(),
        &event(IssueAction::Opened, 42, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect_err("synchronise should fail");

    assert!(matches!(err, SyncError::Lookup(_)), "{err}");
}

/// Under the default policy a write failure is absorbed: the run
/// reports Failed but does not error.
#[tokio::test]
async fn write_failure_is_absorbed_under_the_ignore_policy() {
    let mut store = MockPageStore::new();
    store.expect_find_page().times(1).returning(|_| Ok(None));
    store
        .expect_create_page()
        .times(1)
        .returning(|_| Err(api_error()));

    let outcome = synchronise(
        &test_config(),
        &event(IssueAction::Opened, 42, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect("synchronise should absorb the write failure");

    assert_eq!(outcome, SyncOutcome::Failed);
}

/// Under the fail policy the same write failure propagates.
#[tokio::test]
async fn write_failure_propagates_under_the_fail_policy() {
    let mut store = MockPageStore::new();
    store.expect_find_page().times(1).returning(|_| Ok(None));
    store
        .expect_create_page()
        .times(1)
        .returning(|_| Err(api_error()));

    let mut config = test_config();
    config.on_write_failure = WriteFailurePolicy::Fail;

    let err = synchronise(
        &config,
        &event(IssueAction::Opened, 42, Some(IssueState::Open)),
        &store,
    )
    .await
    .expect_err("synchronise should propagate the write failure");

    assert!(matches!(err, SyncError::Write(_)), "{err}");
}
