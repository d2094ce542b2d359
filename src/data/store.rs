use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::models::QuestionRecord;

use super::loader::{LoadError, load_questions};

/// Read-only pool of questions, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    records: Vec<QuestionRecord>,
}

impl QuestionStore {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    /// Load the pool from a `.xlsx`, `.csv`, `.tsv` or `.json` source.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let store = Self::new(load_questions(path)?);
        info!(path = %path.display(), questions = store.len(), "question store loaded");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in source order.
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Number of records whose category matches exactly.
    pub fn count_in(&self, category: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .count()
    }

    /// Pick a question of `category` uniformly at random.
    ///
    /// Returns `None` when no record has that category.
    pub fn pick_random(&self, category: &str) -> Option<&QuestionRecord> {
        self.pick_random_with(category, &mut rand::rng())
    }

    /// Same as [`QuestionStore::pick_random`], drawing from the given generator.
    ///
    /// The choice is uniform over the records of `category` only, not over
    /// the whole pool.
    pub fn pick_random_with<R: Rng + ?Sized>(
        &self,
        category: &str,
        rng: &mut R,
    ) -> Option<&QuestionRecord> {
        let candidates: Vec<&QuestionRecord> = self
            .records
            .iter()
            .filter(|record| record.category == category)
            .collect();
        candidates.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn sample_store() -> QuestionStore {
        QuestionStore::new(vec![
            QuestionRecord::new(1, "A", "q1", "a1"),
            QuestionRecord::new(2, "B", "q2", "a2"),
            QuestionRecord::new(3, "A", "q3", "a3"),
            QuestionRecord::new(4, "C", "q4", "a4"),
            QuestionRecord::new(5, "A", "q5", "a5"),
        ])
    }

    #[test]
    fn test_pick_only_returns_requested_category() {
        let store = sample_store();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let picked = store.pick_random_with("A", &mut rng).unwrap();
            assert_eq!(picked.category, "A");
        }
    }

    #[test]
    fn test_pick_is_uniform_over_filtered_subset() {
        let store = sample_store();
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 9_000;

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for _ in 0..trials {
            let picked = store.pick_random_with("A", &mut rng).unwrap();
            *counts.entry(picked.number).or_default() += 1;
        }

        assert_eq!(counts.len(), 3);
        let expected = trials / 3;
        for (number, count) in counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 10,
                "question {number} drawn {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_pick_without_matches_is_none() {
        let store = sample_store();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            assert!(store.pick_random_with("D", &mut rng).is_none());
        }
        assert!(store.pick_random("D").is_none());
    }

    #[test]
    fn test_category_match_is_exact() {
        let store = QuestionStore::new(vec![QuestionRecord::new(1, "简答题10分", "q", "a")]);

        assert!(store.pick_random("简答题").is_none());
        assert!(store.pick_random("简答题10分 ").is_none());
        assert!(store.pick_random("简答题10分").is_some());
    }

    #[test]
    fn test_single_match_is_always_returned() {
        let store = sample_store();
        assert_eq!(store.pick_random("B").map(|q| q.number), Some(2));
        assert_eq!(store.pick_random("C").map(|q| q.number), Some(4));
    }

    #[test]
    fn test_pick_does_not_mutate_store() {
        let store = sample_store();
        let before = store.records().to_vec();

        for _ in 0..20 {
            store.pick_random("A");
        }

        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.count_in("A"), 3);
    }

    #[test]
    fn test_picked_question_outlives_category_argument() {
        let store = sample_store();

        let picked = {
            let category = String::from("B");
            store.pick_random(&category)
        };

        assert_eq!(picked.map(|q| q.answer.as_str()), Some("a2"));
    }

    #[test]
    fn test_empty_store_never_matches() {
        let store = QuestionStore::default();
        assert!(store.is_empty());
        assert!(store.pick_random("A").is_none());
    }
}
