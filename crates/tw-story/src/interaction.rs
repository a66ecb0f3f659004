//! Blocking line-oriented interaction with the player.

use std::collections::VecDeque;
use std::io;

/// Label used when waiting for the player to continue.
pub const CONTINUE_LABEL: &str = "Press Enter to continue...";

/// The console operations the traversal engine depends on.
///
/// Every call blocks until the player (or a scripted stand-in) responds.
pub trait Interaction {
    /// Show one line of output.
    fn render_line(&mut self, text: &str) -> io::Result<()>;

    /// Show `label` and read one line of input, without the line terminator.
    ///
    /// Implementations return [`io::ErrorKind::UnexpectedEof`] once no more
    /// input can arrive.
    fn prompt_line(&mut self, label: &str) -> io::Result<String>;

    /// Show `label` and wait until the player acknowledges it.
    fn await_acknowledge(&mut self, label: &str) -> io::Result<()>;
}

/// One recorded interaction event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    /// A rendered line.
    Line(String),
    /// A prompt and the answer given to it.
    Prompt {
        /// The prompt label.
        label: String,
        /// The scripted answer.
        answer: String,
    },
    /// An acknowledgment wait.
    Acknowledge(String),
}

/// An [`Interaction`] that answers prompts from a fixed script and records
/// everything the engine does.
///
/// Acknowledgments never consume scripted answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    transcript: Vec<Transcript>,
}

impl ScriptedInteraction {
    /// Create a script that answers prompts with `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Every recorded event, in order.
    pub fn transcript(&self) -> &[Transcript] {
        &self.transcript
    }

    /// Only the rendered lines.
    pub fn lines(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|event| match event {
                Transcript::Line(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any rendered line contains `needle`.
    pub fn rendered(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// Number of prompts answered.
    pub fn prompts(&self) -> usize {
        self.transcript
            .iter()
            .filter(|event| matches!(event, Transcript::Prompt { .. }))
            .count()
    }

    /// Number of acknowledgment waits.
    pub fn acknowledgments(&self) -> usize {
        self.transcript
            .iter()
            .filter(|event| matches!(event, Transcript::Acknowledge(_)))
            .count()
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Interaction for ScriptedInteraction {
    fn render_line(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(Transcript::Line(text.to_string()));
        Ok(())
    }

    fn prompt_line(&mut self, label: &str) -> io::Result<String> {
        let answer = self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "script has no more answers")
        })?;
        self.transcript.push(Transcript::Prompt {
            label: label.to_string(),
            answer: answer.clone(),
        });
        Ok(answer)
    }

    fn await_acknowledge(&mut self, label: &str) -> io::Result<()> {
        self.transcript.push(Transcript::Acknowledge(label.to_string()));
        Ok(())
    }
}
