//! Nodes of a story graph and the choices they offer.

/// The identifier addressing a node within a graph.
pub type NodeId = String;

/// Dice rolled when a roll node leaves `dice` unset.
pub const DEFAULT_DICE: &str = "d6";

/// Target used when a roll node leaves `target` unset.
pub const DEFAULT_TARGET: i64 = 4;

/// One addressable unit of a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique identifier within the graph.
    pub id: NodeId,
    /// Heading shown when the node is entered.
    pub title: Option<String>,
    /// Body text shown under the heading.
    pub text: String,
    /// Default successor, used whenever a more specific one is absent.
    pub next: Option<NodeId>,
    /// Type-specific behavior.
    pub kind: NodeKind,
}

impl Node {
    /// Create a narrative node with the given id.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            text: String::new(),
            next: None,
            kind: NodeKind::Narrative,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the default successor.
    pub fn with_next(mut self, next: impl Into<NodeId>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Set the node kind.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// The title, falling back to the id.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// What a node does when it is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Show text and continue to `next`.
    Narrative,
    /// Ask the player to pick one of several keyed options.
    Choice {
        /// Options in display order.
        choices: Vec<Choice>,
    },
    /// Branch on a dice check.
    Roll(RollCheck),
    /// Stop the session.
    End {
        /// Display-only name of the ending reached.
        ending_key: Option<String>,
    },
    /// A type tag this player does not understand.
    Unknown(String),
}

impl NodeKind {
    /// The document tag for this kind.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Narrative => "narrative",
            Self::Choice { .. } => "choice",
            Self::Roll(_) => "roll",
            Self::End { .. } => "end",
            Self::Unknown(tag) => tag,
        }
    }
}

/// A single option offered by a choice node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Selector typed by the player, compared case-insensitively.
    pub key: String,
    /// Label shown next to the key.
    pub text: String,
    /// Shown once the choice has been picked.
    pub result_text: Option<String>,
    /// Successor when picked; falls back to the node's `next`.
    pub next: Option<NodeId>,
}

impl Choice {
    /// Create a choice with the given key and label.
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            result_text: None,
            next: None,
        }
    }

    /// Set the result text.
    pub fn with_result(mut self, result_text: impl Into<String>) -> Self {
        self.result_text = Some(result_text.into());
        self
    }

    /// Set the successor.
    pub fn with_next(mut self, next: impl Into<NodeId>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Whether `answer` selects this choice. Both sides are uppercased.
    pub fn matches(&self, answer: &str) -> bool {
        self.key.to_uppercase() == answer.to_uppercase()
    }
}

/// The dice check carried by a roll node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollCheck {
    /// Dice specification, e.g. `d6` or `2d6`.
    pub dice: String,
    /// The roll succeeds when it is at least this value.
    pub target: i64,
    /// Shown after a success.
    pub success_text: Option<String>,
    /// Shown after a failure.
    pub fail_text: Option<String>,
    /// Successor after a success.
    pub next_success: Option<NodeId>,
    /// Successor after a failure.
    pub next_fail: Option<NodeId>,
}

impl Default for RollCheck {
    fn default() -> Self {
        Self {
            dice: DEFAULT_DICE.to_string(),
            target: DEFAULT_TARGET,
            success_text: None,
            fail_text: None,
            next_success: None,
            next_fail: None,
        }
    }
}

impl RollCheck {
    /// Whether `roll` meets the target.
    pub fn succeeds(&self, roll: i64) -> bool {
        roll >= self.target
    }

    /// The branch taken for an outcome, falling back to `fallback`.
    pub fn successor<'a>(
        &'a self,
        success: bool,
        fallback: Option<&'a NodeId>,
    ) -> Option<&'a NodeId> {
        let branch = if success {
            self.next_success.as_ref()
        } else {
            self.next_fail.as_ref()
        };
        branch.or(fallback)
    }
}
