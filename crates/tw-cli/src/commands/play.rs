use std::path::Path;

use colored::Colorize;
use tracing::info;
use tw_story::{DirectorySource, Interaction, PlayConfig, StorySource, Traversal};

use crate::console::ConsoleInteraction;

pub fn run(file: Option<&Path>, dir: &Path, seed: Option<u64>) -> Result<(), String> {
    let mut console = ConsoleInteraction::stdio();

    let (name, graph) = match file {
        Some(path) => (path.display().to_string(), super::load_file(path)?),
        None => {
            let source = DirectorySource::new(dir);
            let name = select_story(&source, &mut console)?;
            let bytes = source
                .read_source(&name)
                .map_err(|e| format!("cannot read {name}: {e}"))?;
            let graph = tw_story::load(&bytes).map_err(|e| format!("{name}: {e}"))?;
            (name, graph)
        }
    };

    let mut config = PlayConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    info!(story = %name, seed = ?config.seed, "starting session");

    println!();
    println!(
        "  {}",
        format!("=== {} ===", super::display_title(&graph, &name)).bold()
    );
    if let Some(seed) = config.seed {
        println!("  Seed: {seed}");
    }
    console
        .await_acknowledge("\nPress Enter to begin...")
        .map_err(|e| e.to_string())?;

    let playthrough = Traversal::new(&graph, config.random_source())
        .run(&mut console)
        .map_err(|e| e.to_string())?;

    println!();
    println!("{}", "-".repeat(60));
    match playthrough.ending {
        Some(ending) => println!("  {} ({ending})", "The story is over.".bold()),
        None => println!("  {}", "The story is over.".bold()),
    }
    println!("  Run the player again to start a new adventure.");

    Ok(())
}

/// Show a numbered menu of the stories in `source` and read a selection.
fn select_story(
    source: &DirectorySource,
    console: &mut impl Interaction,
) -> Result<String, String> {
    let mut names = source.require_candidates().map_err(|e| e.to_string())?;
    if names.len() == 1 {
        let name = names.remove(0);
        println!("  Found one story: {name}");
        return Ok(name);
    }

    println!("  {}", "Stories:".bold());
    for (i, name) in names.iter().enumerate() {
        println!("  {}) {name}", i + 1);
    }

    let label = format!("Select a story (1-{}): ", names.len());
    loop {
        let answer = console.prompt_line(&label).map_err(|e| e.to_string())?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=names.len()).contains(&n) => return Ok(names.swap_remove(n - 1)),
            _ => println!("  {}", "Invalid selection, try again.".yellow()),
        }
    }
}
