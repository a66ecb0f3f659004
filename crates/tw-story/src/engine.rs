//! The traversal engine.
//!
//! A [`Traversal`] walks a [`StoryGraph`] one node at a time. Each call to
//! [`Traversal::step`] renders the current node, runs its type-specific
//! behavior, and returns the id of the node to visit next, or `None` when
//! the session is over.

use tracing::{debug, info, warn};
use tw_dice::{DiceSpec, RandomSource};

use crate::error::StoryResult;
use crate::graph::StoryGraph;
use crate::interaction::{CONTINUE_LABEL, Interaction};
use crate::node::{Choice, Node, NodeId, NodeKind, RollCheck};

/// Label shown when the session is about to end.
pub const EXIT_LABEL: &str = "Press Enter to exit...";

/// Label shown on an end node.
pub const END_LABEL: &str = "You reached the end of the scenario. Press Enter to exit...";

/// Prompt shown on a choice node.
pub const CHOICE_LABEL: &str = "Your choice (e.g. A): ";

/// Prompt shown on a roll node.
pub const ROLL_LABEL: &str =
    "If you have a real die, roll it and type the result, or press Enter and I'll roll for you: ";

const SEPARATOR_WIDTH: usize = 60;

/// The record of one complete session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playthrough {
    /// Every node rendered, in visiting order. Revisits appear again.
    pub visited: Vec<NodeId>,
    /// Whether the session stopped at an end node.
    pub reached_end: bool,
    /// The ending key of that end node, if it has one.
    pub ending: Option<String>,
}

/// Walks a story graph, rolling dice through an injected [`RandomSource`].
#[derive(Debug)]
pub struct Traversal<'g, R> {
    graph: &'g StoryGraph,
    rng: R,
}

impl<'g, R: RandomSource> Traversal<'g, R> {
    /// Prepare to walk `graph`.
    pub fn new(graph: &'g StoryGraph, rng: R) -> Self {
        Self { graph, rng }
    }

    /// The randomness source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Play from the graph's start node until a step returns `None`.
    ///
    /// There is no limit on revisits: a cyclic story keeps going until the
    /// player's choices or rolls lead out of the cycle.
    pub fn run(&mut self, io: &mut dyn Interaction) -> StoryResult<Playthrough> {
        let graph = self.graph;
        let mut playthrough = Playthrough::default();
        let mut current = Some(graph.start().to_string());

        info!(start = graph.start(), "starting story");
        while let Some(id) = current {
            if let Some(node) = graph.node(&id) {
                playthrough.visited.push(id.clone());
                if let NodeKind::End { ending_key } = &node.kind {
                    playthrough.reached_end = true;
                    playthrough.ending = ending_key.clone();
                }
            }
            current = self.step(&id, io)?;
        }
        info!(
            steps = playthrough.visited.len(),
            reached_end = playthrough.reached_end,
            "story finished"
        );

        Ok(playthrough)
    }

    /// Play the node `current` and return the id of its successor.
    ///
    /// An id missing from the graph, an unrecognized node type, and a
    /// successor left unset all end the session with `None`. Only I/O
    /// failures and malformed dice specifications are errors.
    pub fn step(
        &mut self,
        current: &str,
        io: &mut dyn Interaction,
    ) -> StoryResult<Option<NodeId>> {
        let graph = self.graph;
        let Some(node) = graph.node(current) else {
            warn!(node = current, "node id not found in story");
            io.render_line(&format!("Invalid node id: {current}"))?;
            io.await_acknowledge(EXIT_LABEL)?;
            return Ok(None);
        };

        debug!(node = current, kind = node.kind.type_name(), "entering node");
        render_header(node, io)?;

        match &node.kind {
            NodeKind::Narrative => {
                io.await_acknowledge(CONTINUE_LABEL)?;
                Ok(node.next.clone())
            }
            NodeKind::Choice { choices } => play_choice(node, choices, io),
            NodeKind::Roll(check) => self.play_roll(node, check, io),
            NodeKind::End { ending_key } => {
                if let Some(key) = ending_key.as_deref().filter(|k| !k.is_empty()) {
                    io.render_line(&format!("Ending: {key}"))?;
                }
                io.await_acknowledge(END_LABEL)?;
                Ok(None)
            }
            NodeKind::Unknown(tag) => {
                warn!(node = current, kind = %tag, "unrecognized node type");
                io.render_line(&format!("Unrecognized node type: {tag}"))?;
                io.await_acknowledge(CONTINUE_LABEL)?;
                Ok(None)
            }
        }
    }

    fn play_roll(
        &mut self,
        node: &Node,
        check: &RollCheck,
        io: &mut dyn Interaction,
    ) -> StoryResult<Option<NodeId>> {
        io.render_line(&format!(
            "This step requires a dice roll. ({}, target: >= {})",
            check.dice, check.target
        ))?;

        let answer = io.prompt_line(ROLL_LABEL)?;
        let roll = match parse_manual_roll(&answer) {
            Some(value) => {
                io.render_line(&format!("You entered: {value}"))?;
                value
            }
            None => {
                let spec: DiceSpec = check.dice.parse()?;
                let result = spec.roll(&mut self.rng);
                if result.count() == 1 {
                    io.render_line(&format!("I rolled for you: {}", result.total()))?;
                } else {
                    io.render_line(&format!("I rolled for you: {result}"))?;
                }
                i64::try_from(result.total()).unwrap_or(i64::MAX)
            }
        };

        let success = check.succeeds(roll);
        debug!(node = %node.id, roll, target = check.target, success, "roll resolved");

        io.render_line("")?;
        let text = if success {
            io.render_line("✅ SUCCESS!")?;
            check.success_text.as_deref()
        } else {
            io.render_line("❌ FAILURE!")?;
            check.fail_text.as_deref()
        };
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            io.render_line(text)?;
        }
        io.await_acknowledge(CONTINUE_LABEL)?;

        Ok(check.successor(success, node.next.as_ref()).cloned())
    }
}

fn render_header(node: &Node, io: &mut dyn Interaction) -> StoryResult<()> {
    io.render_line("")?;
    io.render_line(&"-".repeat(SEPARATOR_WIDTH))?;
    io.render_line("")?;
    io.render_line(node.display_title())?;
    io.render_line("")?;
    io.render_line(&node.text)?;
    io.render_line("")?;
    Ok(())
}

fn play_choice(
    node: &Node,
    choices: &[Choice],
    io: &mut dyn Interaction,
) -> StoryResult<Option<NodeId>> {
    if choices.is_empty() {
        warn!(node = %node.id, "choice node has no choices");
        io.render_line("This choice node has no choices defined.")?;
        io.await_acknowledge(CONTINUE_LABEL)?;
        return Ok(node.next.clone());
    }

    for choice in choices {
        let key = if choice.key.is_empty() {
            "?"
        } else {
            choice.key.as_str()
        };
        io.render_line(&format!("  {key}) {}", choice.text))?;
    }

    let chosen = loop {
        let answer = io.prompt_line(CHOICE_LABEL)?;
        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }
        match choices.iter().find(|c| c.matches(answer)) {
            Some(choice) => break choice,
            None => io.render_line("Invalid choice, try again.")?,
        }
    };
    debug!(node = %node.id, key = %chosen.key, "choice selected");

    if let Some(result) = chosen.result_text.as_deref().filter(|t| !t.is_empty()) {
        io.render_line("")?;
        io.render_line(result)?;
    }
    io.await_acknowledge(CONTINUE_LABEL)?;

    Ok(chosen.next.clone().or_else(|| node.next.clone()))
}

/// A player-entered roll: a non-negative integer literal, taken verbatim.
fn parse_manual_roll(answer: &str) -> Option<i64> {
    let answer = answer.trim();
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    answer.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoryError;
    use crate::interaction::ScriptedInteraction;
    use crate::loader::load_str;
    use tw_dice::ScriptedRolls;

    fn separators(io: &ScriptedInteraction) -> usize {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        io.lines().iter().filter(|l| **l == separator).count()
    }

    fn choice_graph() -> StoryGraph {
        StoryGraph::new("pick")
            .with_node(
                Node::new("pick")
                    .with_next("fallback")
                    .with_kind(NodeKind::Choice {
                        choices: vec![
                            Choice::new("A", "Climb")
                                .with_result("You climb the ridge.")
                                .with_next("ridge"),
                            Choice::new("B", "Wait"),
                        ],
                    }),
            )
            .with_node(Node::new("ridge"))
            .with_node(Node::new("fallback"))
    }

    fn roll_graph(check: RollCheck) -> StoryGraph {
        StoryGraph::new("roll").with_node(
            Node::new("roll")
                .with_next("after")
                .with_kind(NodeKind::Roll(check)),
        )
    }

    #[test]
    fn missing_start_terminates_without_rendering() {
        let graph = load_str(
            r#"{"start":"x","nodes":[{"id":"a","next":"b"},{"id":"b","type":"end"}]}"#,
        )
        .unwrap();
        let mut io = ScriptedInteraction::default();
        let playthrough = Traversal::new(&graph, ScriptedRolls::default())
            .run(&mut io)
            .unwrap();

        assert!(playthrough.visited.is_empty());
        assert!(!playthrough.reached_end);
        assert_eq!(io.lines(), vec!["Invalid node id: x"]);
        assert_eq!(io.acknowledgments(), 1);
        assert_eq!(separators(&io), 0);
    }

    #[test]
    fn narrative_then_end_visits_two_nodes() {
        let graph = load_str(
            r#"{"start":"a","nodes":[{"id":"a","type":"narrative","next":"b"},{"id":"b","type":"end"}]}"#,
        )
        .unwrap();
        let mut io = ScriptedInteraction::default();
        let playthrough = Traversal::new(&graph, ScriptedRolls::default())
            .run(&mut io)
            .unwrap();

        assert_eq!(playthrough.visited, vec!["a", "b"]);
        assert!(playthrough.reached_end);
        assert_eq!(separators(&io), 2);
        assert_eq!(io.acknowledgments(), 2);
        assert_eq!(io.prompts(), 0);
    }

    #[test]
    fn narrative_without_next_terminates() {
        let graph = StoryGraph::new("a").with_node(Node::new("a"));
        let mut io = ScriptedInteraction::default();
        let mut traversal = Traversal::new(&graph, ScriptedRolls::default());
        assert_eq!(traversal.step("a", &mut io).unwrap(), None);
    }

    #[test]
    fn header_shows_title_and_text() {
        let graph = StoryGraph::new("a").with_node(
            Node::new("a")
                .with_title("Landing Zone")
                .with_text("Dust everywhere."),
        );
        let mut io = ScriptedInteraction::default();
        Traversal::new(&graph, ScriptedRolls::default())
            .step("a", &mut io)
            .unwrap();
        assert!(io.rendered("Landing Zone"));
        assert!(io.rendered("Dust everywhere."));
    }

    #[test]
    fn choice_matches_lowercase_answer() {
        let graph = choice_graph();
        let mut io = ScriptedInteraction::new(["a"]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("pick", &mut io)
            .unwrap();

        assert_eq!(next.as_deref(), Some("ridge"));
        assert!(io.rendered("  A) Climb"));
        assert!(io.rendered("  B) Wait"));
        assert!(io.rendered("You climb the ridge."));
    }

    #[test]
    fn choice_without_next_uses_node_next() {
        let graph = choice_graph();
        let mut io = ScriptedInteraction::new(["B"]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("pick", &mut io)
            .unwrap();
        assert_eq!(next.as_deref(), Some("fallback"));
    }

    #[test]
    fn choice_reprompts_until_valid() {
        let graph = choice_graph();
        let mut io = ScriptedInteraction::new(["", "z", "  b  "]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("pick", &mut io)
            .unwrap();

        assert_eq!(next.as_deref(), Some("fallback"));
        assert_eq!(io.prompts(), 3);
        let errors = io
            .lines()
            .iter()
            .filter(|l| **l == "Invalid choice, try again.")
            .count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn choice_with_no_successor_terminates() {
        let graph = StoryGraph::new("pick").with_node(Node::new("pick").with_kind(
            NodeKind::Choice {
                choices: vec![Choice::new("A", "Leave")],
            },
        ));
        let mut io = ScriptedInteraction::new(["A"]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("pick", &mut io)
            .unwrap();
        assert_eq!(next, None);
    }

    #[test]
    fn empty_choice_list_falls_through_to_next() {
        let graph = StoryGraph::new("pick").with_node(
            Node::new("pick")
                .with_next("after")
                .with_kind(NodeKind::Choice {
                    choices: Vec::new(),
                }),
        );
        let mut io = ScriptedInteraction::default();
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("pick", &mut io)
            .unwrap();

        assert_eq!(next.as_deref(), Some("after"));
        assert!(io.rendered("no choices defined"));
        assert_eq!(io.prompts(), 0);
    }

    #[test]
    fn choice_fails_when_input_closes() {
        let graph = choice_graph();
        let mut io = ScriptedInteraction::new(["z"]);
        let err = Traversal::new(&graph, ScriptedRolls::default())
            .step("pick", &mut io)
            .unwrap_err();
        assert!(matches!(err, StoryError::Io(_)));
    }

    #[test]
    fn manual_roll_is_taken_verbatim() {
        let graph = roll_graph(RollCheck {
            next_success: Some("win".to_string()),
            success_text: Some("The lock clicks.".to_string()),
            ..RollCheck::default()
        });
        let mut io = ScriptedInteraction::new(["7"]);
        let mut traversal = Traversal::new(&graph, ScriptedRolls::new([1]));
        let next = traversal.step("roll", &mut io).unwrap();

        assert_eq!(next.as_deref(), Some("win"));
        assert_eq!(traversal.rng().rolls_made(), 0);
        assert!(io.rendered("You entered: 7"));
        assert!(io.rendered("SUCCESS!"));
        assert!(io.rendered("The lock clicks."));
    }

    #[test]
    fn manual_roll_out_of_range_is_not_clamped() {
        let graph = roll_graph(RollCheck {
            target: 50,
            ..RollCheck::default()
        });
        let mut io = ScriptedInteraction::new(["99"]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("roll", &mut io)
            .unwrap();
        assert_eq!(next.as_deref(), Some("after"));
        assert!(io.rendered("You entered: 99"));
        assert!(io.rendered("SUCCESS!"));
    }

    #[test]
    fn manual_roll_below_target_fails() {
        let graph = roll_graph(RollCheck {
            next_fail: Some("lose".to_string()),
            fail_text: Some("The lock holds.".to_string()),
            ..RollCheck::default()
        });
        let mut io = ScriptedInteraction::new(["2"]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("roll", &mut io)
            .unwrap();
        assert_eq!(next.as_deref(), Some("lose"));
        assert!(io.rendered("FAILURE!"));
        assert!(io.rendered("The lock holds."));
    }

    #[test]
    fn automatic_roll_uses_random_source() {
        let graph = roll_graph(RollCheck {
            dice: "2d6".to_string(),
            target: 8,
            next_success: Some("win".to_string()),
            ..RollCheck::default()
        });

        let mut io = ScriptedInteraction::new([""]);
        let mut traversal = Traversal::new(&graph, ScriptedRolls::new([4, 5]));
        let next = traversal.step("roll", &mut io).unwrap();
        assert_eq!(next.as_deref(), Some("win"));
        assert_eq!(traversal.rng().rolls_made(), 2);
        assert!(io.rendered("I rolled for you: [4, 5] = 9"));

        let mut io = ScriptedInteraction::new(["not a number"]);
        let next = Traversal::new(&graph, ScriptedRolls::new([1, 2]))
            .step("roll", &mut io)
            .unwrap();
        assert_eq!(next.as_deref(), Some("after"));
    }

    #[test]
    fn automatic_roll_with_largest_sides() {
        let graph = roll_graph(RollCheck {
            dice: "2d4294967295".to_string(),
            target: 5_000_000_000,
            next_success: Some("win".to_string()),
            ..RollCheck::default()
        });
        let mut io = ScriptedInteraction::new([""]);
        let next = Traversal::new(&graph, ScriptedRolls::new([4_000_000_000]))
            .step("roll", &mut io)
            .unwrap();

        assert_eq!(next.as_deref(), Some("win"));
        assert!(io.rendered("= 8000000000"));
    }

    #[test]
    fn too_many_dice_is_invalid() {
        let graph = roll_graph(RollCheck {
            dice: "4294967295d6".to_string(),
            ..RollCheck::default()
        });
        let mut io = ScriptedInteraction::new([""]);
        let mut traversal = Traversal::new(&graph, ScriptedRolls::default());
        let err = traversal.step("roll", &mut io).unwrap_err();
        assert!(matches!(err, StoryError::Dice(_)));
        assert_eq!(traversal.rng().rolls_made(), 0);
    }

    #[test]
    fn negative_answer_is_not_a_manual_roll() {
        let graph = roll_graph(RollCheck::default());
        let mut io = ScriptedInteraction::new(["-3"]);
        let mut traversal = Traversal::new(&graph, ScriptedRolls::new([6]));
        traversal.step("roll", &mut io).unwrap();
        assert_eq!(traversal.rng().rolls_made(), 1);
        assert!(io.rendered("I rolled for you: 6"));
    }

    #[test]
    fn invalid_dice_propagates() {
        let graph = roll_graph(RollCheck {
            dice: "d0".to_string(),
            ..RollCheck::default()
        });
        let mut io = ScriptedInteraction::new([""]);
        let err = Traversal::new(&graph, ScriptedRolls::default())
            .step("roll", &mut io)
            .unwrap_err();
        assert!(matches!(err, StoryError::Dice(_)));

        let mut io = ScriptedInteraction::new(["5"]);
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("roll", &mut io)
            .unwrap();
        assert_eq!(next.as_deref(), Some("after"));
    }

    #[test]
    fn end_overrides_next() {
        let graph = StoryGraph::new("end").with_node(
            Node::new("end")
                .with_next("elsewhere")
                .with_kind(NodeKind::End {
                    ending_key: Some("hero".to_string()),
                }),
        );
        let mut io = ScriptedInteraction::default();
        let playthrough = Traversal::new(&graph, ScriptedRolls::default())
            .run(&mut io)
            .unwrap();

        assert_eq!(playthrough.visited, vec!["end"]);
        assert_eq!(playthrough.ending.as_deref(), Some("hero"));
        assert!(io.rendered("Ending: hero"));
        assert_eq!(
            io.transcript().last(),
            Some(&crate::interaction::Transcript::Acknowledge(
                END_LABEL.to_string()
            ))
        );
    }

    #[test]
    fn unknown_type_terminates() {
        let graph = StoryGraph::new("shop").with_node(
            Node::new("shop")
                .with_next("street")
                .with_kind(NodeKind::Unknown("shop".to_string())),
        );
        let mut io = ScriptedInteraction::default();
        let next = Traversal::new(&graph, ScriptedRolls::default())
            .step("shop", &mut io)
            .unwrap();
        assert_eq!(next, None);
        assert!(io.rendered("Unrecognized node type: shop"));
    }

    #[test]
    fn cycles_are_followed_until_broken() {
        let graph = StoryGraph::new("hall")
            .with_node(
                Node::new("hall").with_kind(NodeKind::Choice {
                    choices: vec![
                        Choice::new("L", "Loop").with_next("corridor"),
                        Choice::new("X", "Exit").with_next("out"),
                    ],
                }),
            )
            .with_node(Node::new("corridor").with_next("hall"))
            .with_node(Node::new("out").with_kind(NodeKind::End { ending_key: None }));

        let mut io = ScriptedInteraction::new(["l", "l", "x"]);
        let playthrough = Traversal::new(&graph, ScriptedRolls::default())
            .run(&mut io)
            .unwrap();

        assert_eq!(
            playthrough.visited,
            vec!["hall", "corridor", "hall", "corridor", "hall", "out"]
        );
        assert!(playthrough.reached_end);
    }

    #[test]
    fn manual_roll_parsing() {
        assert_eq!(parse_manual_roll("7"), Some(7));
        assert_eq!(parse_manual_roll(" 12 "), Some(12));
        assert_eq!(parse_manual_roll("0"), Some(0));
        assert_eq!(parse_manual_roll(""), None);
        assert_eq!(parse_manual_roll("+3"), None);
        assert_eq!(parse_manual_roll("3.5"), None);
        assert_eq!(parse_manual_roll("99999999999999999999999"), None);
    }
}
