//! The reconciliation policy: maps an incoming event plus the lookup
//! result onto exactly one write action.

use crate::event::IssueAction;

/// Outcome of one synchronisation run. Observability and testing only,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    StatusUpdated,
    Skipped,
    Failed,
}

/// Why a run decided to write nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// An `opened` event for an issue that already has a page. A
    /// duplicate create attempt is neither repeated nor converted into
    /// an update.
    DuplicateCreate,
    /// A `closed` event for an issue that was never tracked.
    UntrackedClose,
}

/// The single write action chosen for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Create the page with the full property set, correlation key included.
    Create,
    /// Rewrite title, status, URL and assignees; never the correlation key.
    UpdateFull,
    /// Rewrite only the status, leaving any manual edits on the other
    /// properties in place.
    UpdateStatusOnly,
    /// Write nothing.
    Skip(SkipReason),
}

/// The decision table, first match wins:
///
/// | action   | page   | decision           |
/// |----------|--------|--------------------|
/// | opened   | exists | skip (duplicate)   |
/// | opened   | absent | create             |
/// | closed   | absent | skip (untracked)   |
/// | other    | absent | create             |
/// | closed   | exists | status-only update |
/// | other    | exists | full update        |
pub fn decide(action: &IssueAction, page_exists: bool) -> Decision {
    match (action, page_exists) {
        (IssueAction::Opened, true) => Decision::Skip(SkipReason::DuplicateCreate),
        (IssueAction::Opened, false) => Decision::Create,
        (IssueAction::Closed, false) => Decision::Skip(SkipReason::UntrackedClose),
        (_, false) => Decision::Create,
        (IssueAction::Closed, true) => Decision::UpdateStatusOnly,
        (_, true) => Decision::UpdateFull,
    }
}
