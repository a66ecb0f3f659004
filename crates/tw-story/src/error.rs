//! Error types for the story engine.

use std::path::PathBuf;

use thiserror::Error;
use tw_dice::DiceError;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading or playing a story.
///
/// Structural problems found during traversal (unknown node ids, unknown
/// node types, empty choice lists) are not errors: they are reported to the
/// player and end the session.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The document is not valid JSON, or a field has the wrong type.
    #[error("malformed story document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// The document is a bare list of steps.
    #[error(
        "unsupported story shape: a top-level list of steps is no longer supported; \
         migrate to an object of the form {{\"start\": ..., \"nodes\": [...]}}"
    )]
    UnsupportedShape,

    /// The document has no `nodes` field.
    #[error("story document has no \"nodes\" field")]
    MissingNodesField,

    /// No `start` was given and there is no first node to fall back to.
    #[error("story document has no start node")]
    MissingStartId,

    /// The story directory contains no candidate documents.
    #[error("no story files found in {}", .0.display())]
    NoCandidatesFound(PathBuf),

    /// A roll node carries an invalid dice specification.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
