use anyhow::Result;
use mdpress_config::Config;
use mdpress_player::{Pacing, Request, TranscriptSurface, dispatch};
use std::time::Duration;
use std::{env, fs, path::Path, path::PathBuf, process};

const VALID_EXTENSIONS: [&str; 3] = ["md", "markdown", "txt"];

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <file.md>", args[0]);
        eprintln!("Converts a Markdown file into typed blocks and replays them as editor input.");
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    // Upload contract: bad type or size blocks the run before any parsing.
    if let Err(message) = validate_upload(&path, config.max_upload_bytes) {
        eprintln!("Error: {message}");
        process::exit(1);
    }

    let name = path.display().to_string();
    println!("Loading {name}...");
    let content = match read_markdown(&path) {
        Ok(content) => content,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };
    println!("{}", loaded_message(&name, &content));

    let pacing = pacing_from(&config);
    log::debug!(
        "pacing: {}ms/char, {}ms settle",
        config.pacing_char_ms,
        config.pacing_settle_ms
    );

    let mut surface = TranscriptSurface::new();
    let request = Request::insert_content(content);
    let response = dispatch(&request, &mut surface, pacing);

    for action in surface.actions() {
        println!("{action}");
    }

    if response.success {
        println!("✅ {}", response.message);
        Ok(())
    } else {
        eprintln!("Error: {}", response.message);
        process::exit(1);
    }
}

/// Rejects files the upload contract does not accept: wrong extension or
/// larger than the configured limit.
fn validate_upload(path: &Path, max_bytes: u64) -> Result<(), String> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !VALID_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "'{}' is not a markdown file (.md, .markdown, .txt)",
            path.display()
        ));
    }

    let metadata = fs::metadata(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    if metadata.len() > max_bytes {
        return Err(format!(
            "File too large ({} bytes). The limit is {max_bytes} bytes",
            metadata.len()
        ));
    }

    Ok(())
}

/// Reads the file as UTF-8 text; anything else is a validation failure.
fn read_markdown(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    String::from_utf8(bytes).map_err(|_| format!("'{}' is not valid UTF-8 text", path.display()))
}

/// Playback timing from the loaded config; the settle-wait applies between
/// transcript blocks the same as it would against a live editor.
fn pacing_from(config: &Config) -> Pacing {
    Pacing::new(
        Duration::from_millis(config.pacing_char_ms),
        Duration::from_millis(config.pacing_settle_ms),
    )
}

fn loaded_message(name: &str, content: &str) -> String {
    format!(
        "✅ {name} loaded successfully ({} characters)",
        content.chars().count()
    )
}
