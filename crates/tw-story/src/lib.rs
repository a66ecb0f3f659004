//! Branching story graphs for the Taleweaver player.
//!
//! Loads a story document into an immutable [`StoryGraph`] and walks it node
//! by node with a [`Traversal`]. Narrative nodes advance on acknowledgment,
//! choice nodes branch on the player's answer, roll nodes branch on a dice
//! check, and end nodes stop the session. All console interaction happens
//! through the [`Interaction`] trait so sessions can be scripted in tests.

/// Play configuration.
pub mod config;
/// The traversal engine.
pub mod engine;
/// Error types for loading and playing stories.
pub mod error;
/// The loaded story graph.
pub mod graph;
/// Blocking line-oriented interaction with the player.
pub mod interaction;
/// Story document parsing.
pub mod loader;
/// Node and choice records.
pub mod node;
/// Where story documents come from.
pub mod source;

pub use config::PlayConfig;
pub use engine::{Playthrough, Traversal};
pub use error::{StoryError, StoryResult};
pub use graph::{GraphSummary, StoryGraph};
pub use interaction::{Interaction, ScriptedInteraction, Transcript};
pub use loader::{load, load_str};
pub use node::{Choice, Node, NodeId, NodeKind, RollCheck};
pub use source::{DirectorySource, StorySource};
