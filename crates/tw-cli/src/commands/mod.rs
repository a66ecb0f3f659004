pub mod check;
pub mod list;
pub mod play;

use std::path::Path;

use tw_story::StoryGraph;

/// Read and load a story file, describing any failure for the user.
fn load_file(path: &Path) -> Result<StoryGraph, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    tw_story::load(&bytes).map_err(|e| format!("{}: {e}", path.display()))
}

/// The story's title, falling back to its file name.
fn display_title<'a>(graph: &'a StoryGraph, name: &'a str) -> &'a str {
    graph.title().unwrap_or(name)
}
