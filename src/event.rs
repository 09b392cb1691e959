use anyhow::{anyhow, Result};
use tracing::warn;

/// Default title when the event carries none.
pub const DEFAULT_TITLE: &str = "No Title";
/// Default URL when the event carries none.
pub const DEFAULT_URL: &str = "No URL.";

/// The action that produced the issue event. The set GitHub delivers is
/// open ended; anything unrecognised is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueAction {
    Opened,
    Edited,
    Closed,
    Reopened,
    Labeled,
    Unlabeled,
    Assigned,
    Unassigned,
    Other(String),
}

impl IssueAction {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "opened" => IssueAction::Opened,
            "edited" => IssueAction::Edited,
            "closed" => IssueAction::Closed,
            "reopened" => IssueAction::Reopened,
            "labeled" => IssueAction::Labeled,
            "unlabeled" => IssueAction::Unlabeled,
            "assigned" => IssueAction::Assigned,
            "unassigned" => IssueAction::Unassigned,
            other => IssueAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IssueAction::Opened => "opened",
            IssueAction::Edited => "edited",
            IssueAction::Closed => "closed",
            IssueAction::Reopened => "reopened",
            IssueAction::Labeled => "labeled",
            IssueAction::Unlabeled => "unlabeled",
            IssueAction::Assigned => "assigned",
            IssueAction::Unassigned => "unassigned",
            IssueAction::Other(raw) => raw,
        }
    }
}

/// Current state of the issue itself, as opposed to the action that
/// fired the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Anything other than the two documented values is treated as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(IssueState::Open),
            "closed" => Some(IssueState::Closed),
            _ => None,
        }
    }
}

/// A single issue event, parsed once per invocation and never mutated.
#[derive(Debug, Clone)]
pub struct IssueEvent {
    pub action: IssueAction,
    /// Immutable issue number, the correlation key into the external store.
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: Option<IssueState>,
    pub assignees: Vec<String>,
}

impl IssueEvent {
    /// Reads the event from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the event through an arbitrary variable lookup, so tests can
    /// supply variables without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let action = lookup("ISSUE_ACTION")
            .ok_or_else(|| anyhow!("ISSUE_ACTION environment variable not set"))?;
        let number_raw = lookup("ISSUE_NUMBER")
            .ok_or_else(|| anyhow!("ISSUE_NUMBER environment variable not set"))?;
        let number = number_raw
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("ISSUE_NUMBER must be an integer, got {number_raw:?}: {e}"))?;

        // Empty strings fall back to the defaults, matching `VAR || default`
        // semantics of the workflow that sets these variables.
        let title = lookup("ISSUE_TITLE")
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let url = lookup("ISSUE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let state = lookup("ISSUE_STATE").as_deref().and_then(IssueState::parse);
        let assignees = parse_assignees(lookup("ISSUE_ASSIGNEES").as_deref());

        Ok(IssueEvent {
            action: IssueAction::parse(&action),
            number,
            title,
            url,
            state,
            assignees,
        })
    }
}

/// Assignees arrive as a JSON array of login names. Malformed input
/// degrades to an empty list so a bad payload cannot fail the run.
pub fn parse_assignees(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(assignees) => assignees,
        Err(e) => {
            warn!(
                error = %e,
                raw,
                "Failed to parse ISSUE_ASSIGNEES as a JSON string array, continuing with none"
            );
            Vec::new()
        }
    }
}
