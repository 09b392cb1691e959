//! Builders for the Notion property payloads.
//!
//! The property names come from [`PropertyNames`] so the payload shape
//! stays correct against renamed database schemas.

use serde_json::{json, Map, Value};

use crate::config::PropertyNames;
use crate::event::IssueEvent;
use crate::status::{map_status, StatusLabel};

/// Full property set for create and update calls. The correlation key
/// is attached only when `include_issue_id` is set: it is written once
/// at creation and never rewritten afterwards.
pub fn full_properties(
    names: &PropertyNames,
    event: &IssueEvent,
    include_issue_id: bool,
) -> Value {
    let mut properties = Map::new();
    properties.insert(
        names.title.clone(),
        json!({ "title": [{ "text": { "content": event.title.as_str() } }] }),
    );
    properties.insert(
        names.status.clone(),
        json!({ "status": { "name": map_status(event.state).as_str() } }),
    );
    properties.insert(names.url.clone(), json!({ "url": event.url.as_str() }));
    properties.insert(
        names.assignee.clone(),
        json!({
            "multi_select": event
                .assignees
                .iter()
                .map(|name| json!({ "name": name.as_str() }))
                .collect::<Vec<_>>()
        }),
    );
    if include_issue_id {
        properties.insert(
            names.issue_id.clone(),
            json!({ "rich_text": [{ "text": { "content": event.number.to_string() } }] }),
        );
    }
    Value::Object(properties)
}

/// Payload that touches exactly the status property.
pub fn status_only(names: &PropertyNames, status: StatusLabel) -> Value {
    let mut properties = Map::new();
    properties.insert(
        names.status.clone(),
        json!({ "status": { "name": status.as_str() } }),
    );
    Value::Object(properties)
}
