use crate::error::LoadError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Directed adjacency built from ordered `[source, target]` word pairs.
///
/// Every word that appears in any pair is a key, even if it only ever shows up
/// as a target. Targets keep the order they were listed in, duplicates included.
#[derive(Debug, Default)]
pub struct WordGraph {
    edges: HashMap<String, Vec<String>>,
    words: Vec<String>,
}

impl WordGraph {
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut graph = WordGraph::default();
        for (source, target) in pairs {
            let source = source.into();
            let target = target.into();
            graph.insert_word(&source);
            graph.insert_word(&target);
            if let Some(targets) = graph.edges.get_mut(&source) {
                targets.push(target);
            }
        }
        graph
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        let pairs: Vec<[String; 2]> =
            serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
                path: display.clone(),
                source,
            })?;

        if pairs.is_empty() {
            return Err(LoadError::Empty(display));
        }

        Ok(Self::new(pairs.into_iter().map(|[source, target]| {
            (
                source.trim().to_lowercase(),
                target.trim().to_lowercase(),
            )
        })))
    }

    fn insert_word(&mut self, word: &str) {
        if !self.edges.contains_key(word) {
            self.edges.insert(word.to_string(), Vec::new());
            self.words.push(word.to_string());
        }
    }

    pub fn targets(&self, word: &str) -> &[String] {
        self.edges.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.edges.contains_key(word)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.targets(source).iter().any(|t| t == target)
    }

    /// All known words in first-appearance order.
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
