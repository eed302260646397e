//! Joke data: model, loading and the cursor the comedian reads from
//!
//! Jokes come in pairs: a setup line immediately followed by its punchline.
//! The list is loaded from JSON at startup; when that fails a short built-in
//! list is used instead.

mod loader;
mod reel;

use serde::{Deserialize, Serialize};

pub use loader::{fallback_jokes, load_jokes, load_or_fallback, JokeError};
pub use reel::JokeReel;

/// One line of a two-part joke
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    #[serde(rename = "joke")]
    pub text: String,
    #[serde(rename = "punchline")]
    pub is_punchline: bool,
}

impl Joke {
    pub fn setup(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_punchline: false,
        }
    }

    pub fn punchline(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_punchline: true,
        }
    }
}
