//! Loading the joke list from disk

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::Joke;

/// Errors that can occur while loading jokes
#[derive(Debug, thiserror::Error)]
pub enum JokeError {
    #[error("failed to read joke file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse joke file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("joke file {0} is empty")]
    Empty(PathBuf),

    #[error("joke file {0} has no setup lines")]
    NoSetups(PathBuf),
}

/// Read and validate a JSON array of `{"joke": ..., "punchline": ...}`
pub fn load_jokes(path: &Path) -> Result<Vec<Joke>, JokeError> {
    let raw = std::fs::read_to_string(path).map_err(|source| JokeError::Io {
        path: path.to_owned(),
        source,
    })?;

    let jokes: Vec<Joke> = serde_json::from_str(&raw).map_err(|source| JokeError::Parse {
        path: path.to_owned(),
        source,
    })?;

    if jokes.is_empty() {
        return Err(JokeError::Empty(path.to_owned()));
    }
    if jokes.iter().all(|j| j.is_punchline) {
        return Err(JokeError::NoSetups(path.to_owned()));
    }

    Ok(jokes)
}

/// Load jokes, substituting the built-in list on any failure
pub fn load_or_fallback(path: &Path) -> Vec<Joke> {
    match load_jokes(path) {
        Ok(jokes) => {
            info!(count = jokes.len(), ?path, "jokes loaded");
            jokes
        }
        Err(e) => {
            warn!(error = %e, "using built-in jokes");
            fallback_jokes()
        }
    }
}

/// Two jokes that are always available
pub fn fallback_jokes() -> Vec<Joke> {
    vec![
        Joke::setup("Why don't scientists trust atoms?"),
        Joke::punchline("Because they make up everything!"),
        Joke::setup("I'm reading a book on anti-gravity."),
        Joke::punchline("It's impossible to put down!"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "comedy-stage-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp(
            "valid",
            r#"[
                {"joke": "What do you call a cow with no legs?", "punchline": false},
                {"joke": "Ground beef!", "punchline": true}
            ]"#,
        );
        let jokes = load_jokes(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(jokes.len(), 2);
        assert_eq!(jokes[1], Joke::punchline("Ground beef!"));
    }

    #[test]
    fn test_bundled_jokes_are_paired() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join("dad_jokes.json");
        let jokes = load_jokes(&path).unwrap();

        assert_eq!(jokes.len() % 2, 0);
        for pair in jokes.chunks(2) {
            assert!(!pair[0].is_punchline);
            assert!(pair[1].is_punchline);
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_jokes(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, JokeError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = write_temp("malformed", r#"[{"text": "wrong schema"}]"#);
        let err = load_jokes(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, JokeError::Parse { .. }));
    }

    #[test]
    fn test_degenerate_lists_rejected() {
        let empty = write_temp("empty", "[]");
        let punchlines = write_temp("punchlines", r#"[{"joke": "Ha!", "punchline": true}]"#);

        assert!(matches!(load_jokes(&empty), Err(JokeError::Empty(_))));
        assert!(matches!(load_jokes(&punchlines), Err(JokeError::NoSetups(_))));

        std::fs::remove_file(&empty).ok();
        std::fs::remove_file(&punchlines).ok();
    }

    #[test]
    fn test_fallback_on_failure() {
        let jokes = load_or_fallback(Path::new("/definitely/not/here.json"));
        assert_eq!(jokes, fallback_jokes());
        assert_eq!(jokes.len(), 4);
        assert!(!jokes[0].is_punchline);
        assert!(jokes[1].is_punchline);
    }
}
