//! Story document parsing.
//!
//! A story document is a JSON object of the form
//! `{"title": ..., "start": ..., "nodes": [...]}`. Every node field is
//! optional; missing values fall back to the defaults documented on
//! [`Node`], [`Choice`], and [`RollCheck`].

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{StoryError, StoryResult};
use crate::graph::StoryGraph;
use crate::node::{Choice, DEFAULT_DICE, DEFAULT_TARGET, Node, NodeId, NodeKind, RollCheck};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    start: Option<String>,
    nodes: Vec<RawNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNode {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    text: Option<String>,
    next: Option<String>,
    choices: Option<Vec<RawChoice>>,
    dice: Option<String>,
    target: Option<i64>,
    success_text: Option<String>,
    fail_text: Option<String>,
    next_success: Option<String>,
    next_fail: Option<String>,
    ending_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawChoice {
    key: Option<String>,
    text: Option<String>,
    result_text: Option<String>,
    next: Option<String>,
}

/// Parse a story document from raw bytes.
pub fn load(bytes: &[u8]) -> StoryResult<StoryGraph> {
    let value: Value = serde_json::from_slice(bytes)?;
    from_value(value)
}

/// Parse a story document from a string.
pub fn load_str(source: &str) -> StoryResult<StoryGraph> {
    load(source.as_bytes())
}

fn from_value(value: Value) -> StoryResult<StoryGraph> {
    match &value {
        Value::Array(_) => return Err(StoryError::UnsupportedShape),
        Value::Object(map) => {
            if map.get("nodes").is_none_or(Value::is_null) {
                return Err(StoryError::MissingNodesField);
            }
        }
        _ => return Err(StoryError::MissingNodesField),
    }

    let doc: RawDocument = serde_json::from_value(value)?;

    let start = match non_empty(doc.start) {
        Some(start) => start,
        None => doc
            .nodes
            .first()
            .and_then(|n| non_empty(n.id.clone()))
            .ok_or(StoryError::MissingStartId)?,
    };

    let mut graph = StoryGraph::new(start);
    if let Some(title) = doc.title {
        graph = graph.with_title(title);
    }

    for (index, raw) in doc.nodes.into_iter().enumerate() {
        let Some(node) = convert_node(raw) else {
            debug!(index, "skipping node without an id");
            continue;
        };
        let id = node.id.clone();
        if graph.insert(node).is_some() {
            debug!(node = %id, "duplicate node id, keeping the later definition");
        }
    }

    info!(start = graph.start(), nodes = graph.len(), "story loaded");
    Ok(graph)
}

fn convert_node(raw: RawNode) -> Option<Node> {
    let id = non_empty(raw.id)?;

    let kind = match raw.kind {
        None => NodeKind::Narrative,
        Some(tag) => match tag.trim().to_lowercase().as_str() {
            "narrative" => NodeKind::Narrative,
            "choice" => NodeKind::Choice {
                choices: raw
                    .choices
                    .unwrap_or_default()
                    .into_iter()
                    .map(convert_choice)
                    .collect(),
            },
            "roll" => NodeKind::Roll(RollCheck {
                dice: raw.dice.unwrap_or_else(|| DEFAULT_DICE.to_string()),
                target: raw.target.unwrap_or(DEFAULT_TARGET),
                success_text: raw.success_text,
                fail_text: raw.fail_text,
                next_success: non_empty(raw.next_success),
                next_fail: non_empty(raw.next_fail),
            }),
            "end" => NodeKind::End {
                ending_key: raw.ending_key,
            },
            _ => NodeKind::Unknown(tag),
        },
    };

    Some(Node {
        id,
        title: raw.title,
        text: raw.text.unwrap_or_default(),
        next: non_empty(raw.next),
        kind,
    })
}

fn convert_choice(raw: RawChoice) -> Choice {
    Choice {
        key: raw.key.unwrap_or_default(),
        text: raw.text.unwrap_or_default(),
        result_text: raw.result_text,
        next: non_empty(raw.next),
    }
}

/// An empty identifier can never address a node, so it counts as absent.
fn non_empty(id: Option<String>) -> Option<NodeId> {
    id.filter(|s| !s.is_empty())
}
