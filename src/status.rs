use crate::event::IssueState;

/// Destination status labels in the Notion database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    InProgress,
    Done,
    NotStarted,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::InProgress => "In progress",
            StatusLabel::Done => "Done",
            StatusLabel::NotStarted => "Not started",
        }
    }
}

/// Maps the issue state onto the destination status label. Total over
/// its domain: unknown or absent states land on `NotStarted`.
pub fn map_status(state: Option<IssueState>) -> StatusLabel {
    match state {
        Some(IssueState::Open) => StatusLabel::InProgress,
        Some(IssueState::Closed) => StatusLabel::Done,
        None => StatusLabel::NotStarted,
    }
}
