use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("dictionary file not found: {0}")]
    NotFound(String),
    #[error("failed to read dictionary {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where a category's terms came from, reported at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSource {
    File,
    BuiltIn,
}

/// Reads one newline-delimited term per line, skipping blank lines.
pub fn load_terms(path: &Path) -> Result<HashSet<String>, LexiconError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LexiconError::NotFound(path.display().to_string()),
        _ => LexiconError::Read {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Loads a category file, falling back to `defaults` when the file is missing,
/// unreadable or holds no terms.
pub fn load_or_default(
    category: &str,
    path: &Path,
    defaults: &[&str],
) -> (HashSet<String>, TermSource) {
    match load_terms(path) {
        Ok(terms) if !terms.is_empty() => {
            info!("Loaded {} {} terms from {}", terms.len(), category, path.display());
            (terms, TermSource::File)
        }
        Ok(_) => {
            warn!("Dictionary {} is empty, using built-in {} terms", path.display(), category);
            (builtin(defaults), TermSource::BuiltIn)
        }
        Err(LexiconError::NotFound(p)) => {
            warn!("Dictionary {} not found, using built-in {} terms", p, category);
            (builtin(defaults), TermSource::BuiltIn)
        }
        Err(e) => {
            warn!("{}, using built-in {} terms", e, category);
            (builtin(defaults), TermSource::BuiltIn)
        }
    }
}

fn builtin(defaults: &[&str]) -> HashSet<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}
