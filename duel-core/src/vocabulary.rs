use anyhow::{Context, Result, anyhow};
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_WORDS: &str = include_str!("../words/hebrew.txt");

/// The fixed set of words a round's target is drawn from.
///
/// Never empty once constructed.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Parse a word list: one word per line, blank lines and `#` comments skipped.
    pub fn from_word_list(word_list: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let words: Vec<String> = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter(|word| seen.insert(*word))
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            return Err(anyhow!("word list contains no words"));
        }

        Ok(Self { words })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        Self::from_word_list(&contents)
            .with_context(|| format!("invalid word list {}", path.display()))
    }

    pub fn builtin() -> Result<Self> {
        Self::from_word_list(BUILTIN_WORDS)
    }

    /// Load from `path` if given, otherwise the built-in list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Uniformly random word from the list.
    pub fn random_word(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.words.len());
        &self.words[index]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
