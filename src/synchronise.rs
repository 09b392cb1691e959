//! Coordinating module for the lookup-decide-write pipeline.
//!
//! One invocation handles exactly one issue event end-to-end: look up
//! the correlated page, run the decision table, perform the single
//! resulting write. A lookup failure aborts the run; a write failure is
//! absorbed or propagated per the configured [`WriteFailurePolicy`].

use tracing::{error, info, warn};

use crate::config::{SyncConfig, WriteFailurePolicy};
use crate::contract::{PageStore, StoreError};
use crate::event::IssueEvent;
use crate::reconcile::{decide, Decision, SkipReason, SyncOutcome};
use crate::status::map_status;

/// Failure of a synchronisation run, split by phase. A failed lookup
/// never reaches a write; a failed write only surfaces here under the
/// `fail` policy.
#[derive(Debug)]
pub enum SyncError {
    Lookup(StoreError),
    Write(StoreError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Lookup(e) => write!(f, "page lookup failed: {e}"),
            SyncError::Write(e) => write!(f, "page write failed: {e}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Lookup(e) | SyncError::Write(e) => Some(e),
        }
    }
}

pub async fn synchronise<S>(
    config: &SyncConfig,
    event: &IssueEvent,
    store: &S,
) -> Result<SyncOutcome, SyncError>
where
    S: PageStore,
{
    info!(
        action = event.action.as_str(),
        number = event.number,
        "[SYNC] Starting issue synchronisation"
    );

    // A lookup failure is fatal: without knowing whether a page exists,
    // no safe decision can be made.
    let existing = match store.find_page(event.number).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, number = event.number, "[SYNC][ERROR] Page lookup failed");
            return Err(SyncError::Lookup(e));
        }
    };

    let decision = decide(&event.action, existing.is_some());

    let write_result: Result<SyncOutcome, StoreError> = match (decision, existing) {
        (Decision::Skip(SkipReason::DuplicateCreate), _) => {
            warn!(
                number = event.number,
                "[SYNC] A page for this issue already exists, skipping create"
            );
            Ok(SyncOutcome::Skipped)
        }
        (Decision::Skip(SkipReason::UntrackedClose), _) => {
            warn!(
                number = event.number,
                "[SYNC] No page found for this closed issue, nothing to update"
            );
            Ok(SyncOutcome::Skipped)
        }
        (Decision::Create, _) => store.create_page(event).await.map(|page| {
            info!(page_id = %page.id, number = event.number, "[SYNC] Created page");
            SyncOutcome::Created
        }),
        (Decision::UpdateFull, Some(page)) => store.update_page(&page, event).await.map(|_| {
            info!(page_id = %page.id, number = event.number, "[SYNC] Updated page");
            SyncOutcome::Updated
        }),
        (Decision::UpdateStatusOnly, Some(page)) => {
            let status = map_status(event.state);
            store.update_status(&page, status).await.map(|_| {
                info!(
                    page_id = %page.id,
                    number = event.number,
                    status = status.as_str(),
                    "[SYNC] Updated page status"
                );
                SyncOutcome::StatusUpdated
            })
        }
        (Decision::UpdateFull | Decision::UpdateStatusOnly, None) => {
            // decide() only yields update decisions when a page exists.
            error!(
                number = event.number,
                "[SYNC][ERROR] Update decided without an existing page"
            );
            Ok(SyncOutcome::Failed)
        }
    };

    match write_result {
        Ok(outcome) => {
            info!(outcome = ?outcome, number = event.number, "[SYNC] Synchronisation finished");
            Ok(outcome)
        }
        Err(e) => {
            error!(error = %e, number = event.number, "[SYNC][ERROR] Page write failed");
            match config.on_write_failure {
                WriteFailurePolicy::Fail => Err(SyncError::Write(e)),
                WriteFailurePolicy::Ignore => Ok(SyncOutcome::Failed),
            }
        }
    }
}
