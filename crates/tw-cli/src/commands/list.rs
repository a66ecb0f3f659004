use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tw_story::{DirectorySource, StorySource};

pub fn run(dir: &Path) -> Result<(), String> {
    let source = DirectorySource::new(dir);
    let names = source
        .list_candidates()
        .map_err(|e| format!("cannot list {}: {e}", dir.display()))?;

    if names.is_empty() {
        println!("  No stories found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Title", "Start", "Nodes"]);

    for name in &names {
        let loaded = source
            .read_source(name)
            .map_err(tw_story::StoryError::from)
            .and_then(|bytes| tw_story::load(&bytes));

        match loaded {
            Ok(graph) => {
                let title = super::display_title(&graph, name);
                let nodes = graph.len().to_string();
                table.add_row(vec![name.as_str(), title, graph.start(), nodes.as_str()]);
            }
            Err(e) => {
                let error = e.to_string();
                table.add_row(vec![name.as_str(), error.as_str(), "—", "—"]);
            }
        }
    }

    println!("{table}");
    println!();
    println!("  {} stories", names.len());

    Ok(())
}
