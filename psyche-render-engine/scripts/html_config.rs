use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

// Trunk post-build hook: make the staged page load its bundle relative to
// wherever it is hosted.
fn main() {
    let Ok(staging_dir) = env::var("TRUNK_STAGING_DIR") else {
        eprintln!("TRUNK_STAGING_DIR is not set");
        process::exit(1);
    };

    //  Using the configured html output name (set in Trunk.toml)
    let staged_html_path = PathBuf::from(staging_dir).join("PsycheViewer.html");

    let html = match fs::read_to_string(&staged_html_path) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", staged_html_path.display());
            process::exit(1);
        }
    };

    let html = html
        .replace("/psyche-render-engine.js", "./psyche-render-engine.js")
        .replace("/psyche-render-engine_bg.wasm", "./psyche-render-engine_bg.wasm");

    if let Err(e) = fs::write(&staged_html_path, html) {
        eprintln!("Failed to write {}: {e}", staged_html_path.display());
        process::exit(1);
    }
}
