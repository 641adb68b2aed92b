//! Perpendicular-line facts.

use crate::line::LineKey;

/// An unordered pair of perpendicular lines.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PerpPair(LineKey, LineKey);

impl PerpPair {
    fn matches(&self, a: &LineKey, b: &LineKey) -> bool {
        (&self.0 == a && &self.1 == b) || (&self.0 == b && &self.1 == a)
    }
}

/// A list of distinct perpendicular-line pairs.
///
/// Unlike `para`, perpendicularity is not transitive, so there is no
/// equivalence-class merging here: each pair stands alone (§4.5).
#[derive(Debug, Default)]
pub struct PerpStore {
    pairs: Vec<PerpPair>,
}

impl PerpStore {
    pub fn new() -> Self {
        PerpStore { pairs: vec![] }
    }

    pub fn insert(&mut self, lk1: LineKey, lk2: LineKey) {
        if !self.pairs.iter().any(|p| p.matches(&lk1, &lk2)) {
            self.pairs.push(PerpPair(lk1, lk2));
        }
    }

    pub fn contains(&self, lk1: &LineKey, lk2: &LineKey) -> bool {
        self.pairs.iter().any(|p| p.matches(lk1, lk2))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LineKey, &LineKey)> {
        self.pairs.iter().map(|p| (&p.0, &p.1))
    }

    /// Rewrites every reference to `from` into `to`, as required when the
    /// line store retires a merged-away key.
    pub fn rewrite(&mut self, from: &LineKey, to: &LineKey) {
        for pair in &mut self.pairs {
            if &pair.0 == from {
                pair.0 = to.clone();
            }
            if &pair.1 == from {
                pair.1 = to.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineStore;
    use crate::point::Point;

    fn lk(store: &mut LineStore, name: &str) -> LineKey {
        store.match_line(&Point::new(name), &Point::new(format!("{name}2")))
    }

    #[test]
    fn insert_is_symmetric_and_idempotent() {
        let mut lines = LineStore::new();
        let a = lk(&mut lines, "a");
        let b = lk(&mut lines, "b");

        let mut store = PerpStore::new();
        store.insert(a.clone(), b.clone());
        store.insert(b.clone(), a.clone());

        assert_eq!(store.len(), 1);
        assert!(store.contains(&a, &b));
        assert!(store.contains(&b, &a));
    }

    #[test]
    fn distinct_pairs_do_not_merge_transitively() {
        let mut lines = LineStore::new();
        let a = lk(&mut lines, "a");
        let b = lk(&mut lines, "b");
        let c = lk(&mut lines, "c");

        let mut store = PerpStore::new();
        store.insert(a.clone(), b.clone());
        store.insert(b.clone(), c.clone());

        assert_eq!(store.len(), 2);
        assert!(!store.contains(&a, &c));
    }
}
