use super::WordGraph;
use rand::{seq::SliceRandom, Rng};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

const MAX_ATTEMPTS: usize = 100;

/// Builds puzzle chains by breadth-first search over the word graph,
/// restarting from a random word until a path of the wanted length turns up.
#[derive(Debug, Clone)]
pub struct ChainGenerator {
    graph: Arc<WordGraph>,
}

impl ChainGenerator {
    pub fn new(graph: Arc<WordGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    pub fn generate(&self, length: usize) -> Vec<String> {
        self.generate_with(length, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Vec<String> {
        let words = self.graph.words();

        for attempt in 0..MAX_ATTEMPTS {
            let Some(start) = words.choose(rng) else {
                break;
            };
            if let Some(chain) = self.search_from(start, length) {
                debug!(attempt, start = %start, length, "Generated chain");
                return chain;
            }
        }

        // Degraded mode: these words are not guaranteed to be adjacent.
        warn!(length, "No chain found, falling back to word list prefix");
        words.iter().take(length).cloned().collect()
    }

    /// One BFS attempt from `start`. Returns the first path of exactly `length`
    /// words in edge-insertion order, never repeating a word within a path.
    pub fn search_from(&self, start: &str, length: usize) -> Option<Vec<String>> {
        if length == 0 || !self.graph.contains(start) {
            return None;
        }

        let mut queue: VecDeque<(Vec<String>, HashSet<String>)> = VecDeque::new();
        queue.push_back((vec![start.to_string()], HashSet::from([start.to_string()])));

        while let Some((path, visited)) = queue.pop_front() {
            if path.len() == length {
                return Some(path);
            }

            let Some(last) = path.last() else {
                continue;
            };
            for next in self.graph.targets(last) {
                if visited.contains(next) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(next.clone());
                let mut next_visited = visited.clone();
                next_visited.insert(next.clone());
                queue.push_back((next_path, next_visited));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ROUND_WORD_COUNTS;
    use rand::{rngs::StdRng, SeedableRng};

    fn generator(pairs: &[(&str, &str)]) -> ChainGenerator {
        ChainGenerator::new(Arc::new(WordGraph::new(pairs.iter().copied())))
    }

    fn ring_generator(size: usize) -> ChainGenerator {
        let words: Vec<String> = (0..size).map(|i| format!("w{i}")).collect();
        let pairs = (0..size).map(|i| (words[i].clone(), words[(i + 1) % size].clone()));
        ChainGenerator::new(Arc::new(WordGraph::new(pairs)))
    }

    #[test]
    fn search_follows_directed_edges() {
        let generator = generator(&[("foot", "ball"), ("ball", "game"), ("game", "point")]);

        assert_eq!(
            generator.search_from("foot", 4),
            Some(vec![
                "foot".to_string(),
                "ball".to_string(),
                "game".to_string(),
                "point".to_string()
            ])
        );
        assert_eq!(generator.search_from("point", 2), None);
    }

    #[test]
    fn search_prefers_first_inserted_edge() {
        let generator = generator(&[
            ("sun", "light"),
            ("sun", "flower"),
            ("light", "house"),
            ("flower", "pot"),
        ]);

        assert_eq!(
            generator.search_from("sun", 3),
            Some(vec!["sun".into(), "light".into(), "house".into()])
        );
    }

    #[test]
    fn search_never_repeats_a_word() {
        let generator = generator(&[("a", "b"), ("b", "a"), ("b", "c")]);

        assert_eq!(
            generator.search_from("a", 3),
            Some(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(generator.search_from("a", 4), None);
    }

    #[test]
    fn every_round_gets_its_configured_length() {
        let generator = ring_generator(12);
        let mut rng = StdRng::seed_from_u64(7);

        for count in ROUND_WORD_COUNTS {
            let chain = generator.generate_with(count, &mut rng);
            assert_eq!(chain.len(), count);
            for pair in chain.windows(2) {
                assert!(generator.graph().has_edge(&pair[0], &pair[1]));
            }
        }
    }

    #[test]
    fn falls_back_to_word_prefix_when_no_path_exists() {
        let generator = generator(&[("foot", "ball"), ("rain", "bow")]);
        let mut rng = StdRng::seed_from_u64(1);

        let chain = generator.generate_with(3, &mut rng);

        assert_eq!(chain, ["foot", "ball", "rain"]);
    }

    #[test]
    fn empty_graph_yields_empty_chain() {
        let generator = ChainGenerator::new(Arc::new(WordGraph::default()));
        assert!(generator.generate(5).is_empty());
    }
}
