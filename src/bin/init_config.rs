//! Scaffold a default translation configuration file.
//!
//! Usage:
//!   cargo run --bin lite-translate-init
//!
//! Writes `lite-translate.config.json` into the current directory when no such
//! file exists, and leaves an existing one untouched. Exits 0 either way.

use std::path::Path;

use anyhow::{Context, Result};
use lite_translate::TranslationConfig;

const CONFIG_FILE: &str = "lite-translate.config.json";

#[derive(Debug, PartialEq, Eq)]
enum ScaffoldOutcome {
    Created,
    AlreadyExists,
}

fn scaffold(path: &Path) -> Result<ScaffoldOutcome> {
    if path.exists() {
        return Ok(ScaffoldOutcome::AlreadyExists);
    }

    let config = TranslationConfig::default();
    let contents = serde_json::to_string_pretty(&config).context("Failed to render config")?;
    std::fs::write(path, contents + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ScaffoldOutcome::Created)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = Path::new(CONFIG_FILE);
    match scaffold(path)? {
        ScaffoldOutcome::Created => println!("✅ {CONFIG_FILE} created successfully!"),
        ScaffoldOutcome::AlreadyExists => println!("✅ {CONFIG_FILE} already exists."),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold_creates_valid_config() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);

        let outcome = scaffold(&path).expect("scaffold");
        assert_eq!(outcome, ScaffoldOutcome::Created);

        let contents = std::fs::read_to_string(&path).expect("read back");
        let config: TranslationConfig = serde_json::from_str(&contents).expect("parse");
        assert!(config.validate().is_ok());
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn test_scaffold_leaves_existing_file_untouched() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{\"custom\": true}").expect("seed");

        let outcome = scaffold(&path).expect("scaffold");
        assert_eq!(outcome, ScaffoldOutcome::AlreadyExists);

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "{\"custom\": true}");
    }
}
