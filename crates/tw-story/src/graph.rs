//! The immutable story graph produced by the loader.

use std::collections::HashMap;

use crate::node::{Node, NodeId, NodeKind};

/// A loaded story: a start node plus every addressable node.
///
/// Nothing mutates a graph once it is loaded; traversal only moves a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGraph {
    title: Option<String>,
    start: NodeId,
    nodes: HashMap<NodeId, Node>,
}

impl StoryGraph {
    /// Create an empty graph that starts at `start`.
    pub fn new(start: impl Into<NodeId>) -> Self {
        Self {
            title: None,
            start: start.into(),
            nodes: HashMap::new(),
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a node, replacing any earlier node with the same id.
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert(node);
        self
    }

    pub(crate) fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// The story's display title, if the document names one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Identifier of the node where traversal begins.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of addressable nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Count nodes by kind.
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary::default();
        for node in self.nodes.values() {
            match node.kind {
                NodeKind::Narrative => summary.narrative += 1,
                NodeKind::Choice { .. } => summary.choice += 1,
                NodeKind::Roll(_) => summary.roll += 1,
                NodeKind::End { .. } => summary.end += 1,
                NodeKind::Unknown(_) => summary.unknown += 1,
            }
        }
        summary
    }
}

/// Node counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphSummary {
    /// Narrative nodes.
    pub narrative: usize,
    /// Choice nodes.
    pub choice: usize,
    /// Roll nodes.
    pub roll: usize,
    /// End nodes.
    pub end: usize,
    /// Nodes with an unrecognized type.
    pub unknown: usize,
}

impl GraphSummary {
    /// Total number of nodes counted.
    pub fn total(&self) -> usize {
        self.narrative + self.choice + self.roll + self.end + self.unknown
    }
}

impl std::fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} narrative, {} choice, {} roll, {} end",
            self.narrative, self.choice, self.roll, self.end
        )?;
        if self.unknown > 0 {
            write!(f, ", {} unknown", self.unknown)?;
        }
        Ok(())
    }
}
