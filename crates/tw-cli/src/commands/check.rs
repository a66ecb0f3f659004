use std::path::Path;

use colored::Colorize;
use tw_story::NodeKind;

pub fn run(file: &Path) -> Result<(), String> {
    let graph = super::load_file(file)?;
    let name = file.display().to_string();
    let summary = graph.summary();

    println!(
        "  {} {}",
        "Loaded".green().bold(),
        super::display_title(&graph, &name)
    );
    println!("  Start: {}", graph.start());
    println!("  Nodes: {} ({summary})", summary.total());

    if !graph.contains(graph.start()) {
        println!(
            "  {}",
            format!("warning: start node '{}' is not defined", graph.start()).yellow()
        );
    }

    let mut unknown: Vec<_> = graph
        .nodes()
        .filter(|node| matches!(node.kind, NodeKind::Unknown(_)))
        .collect();
    unknown.sort_by(|a, b| a.id.cmp(&b.id));
    for node in unknown {
        println!(
            "  {}",
            format!(
                "warning: node '{}' has unrecognized type '{}'",
                node.id,
                node.kind.type_name()
            )
            .yellow()
        );
    }

    Ok(())
}
