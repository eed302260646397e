//! Cursor over the joke list

use super::Joke;

/// Walks the joke list in order, wrapping at the end.
///
/// After a setup is taken the cursor points at the entry that follows it,
/// which is where its punchline is expected.
#[derive(Debug, Clone)]
pub struct JokeReel {
    jokes: Vec<Joke>,
    cursor: usize,
}

impl JokeReel {
    pub fn new(jokes: Vec<Joke>) -> Self {
        Self { jokes, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    /// Scan forward from the cursor to the next setup line.
    ///
    /// The scan visits each entry at most once, so an empty or
    /// all-punchline list yields `None` instead of looping.
    pub fn next_setup(&mut self) -> Option<&Joke> {
        let len = self.jokes.len();
        let index = (0..len)
            .map(|offset| (self.cursor + offset) % len)
            .find(|&i| !self.jokes[i].is_punchline)?;

        self.cursor = (index + 1) % len;
        Some(&self.jokes[index])
    }

    /// Take the punchline under the cursor, if that entry is one
    pub fn take_punchline(&mut self) -> Option<&Joke> {
        let len = self.jokes.len();
        let index = self.cursor;
        if !self.jokes.get(index)?.is_punchline {
            return None;
        }

        self.cursor = (index + 1) % len;
        Some(&self.jokes[index])
    }
}
