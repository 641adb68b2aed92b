//! Parallel-line fact classes.

use crate::line::LineKey;
use std::collections::HashSet;

/// A list of sets of mutually parallel lines.
///
/// Per §9 Open Question 1: the first class found to contain either incoming
/// key absorbs the pair and the scan stops there; other classes that happen
/// to also contain one of the keys are left untouched rather than merged in.
#[derive(Debug, Default)]
pub struct ParaStore {
    classes: Vec<HashSet<LineKey>>,
}

impl ParaStore {
    pub fn new() -> Self {
        ParaStore { classes: vec![] }
    }

    pub fn classes(&self) -> &[HashSet<LineKey>] {
        &self.classes
    }

    pub fn insert(&mut self, lk1: LineKey, lk2: LineKey) {
        for cls in &mut self.classes {
            if cls.contains(&lk1) || cls.contains(&lk2) {
                cls.insert(lk1);
                cls.insert(lk2);
                return;
            }
        }
        self.classes.push(HashSet::from([lk1, lk2]));
    }

    pub fn contains(&self, lk1: &LineKey, lk2: &LineKey) -> bool {
        self.classes
            .iter()
            .any(|cls| cls.contains(lk1) && cls.contains(lk2))
    }

    /// Rewrites every reference to `from` into `to`, as required when the
    /// line store retires a merged-away key.
    pub fn rewrite(&mut self, from: &LineKey, to: &LineKey) {
        for cls in &mut self.classes {
            if cls.remove(from) {
                cls.insert(to.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lk(store: &mut crate::line::LineStore, name: &str) -> LineKey {
        use crate::point::Point;
        store.match_line(&Point::new(name), &Point::new(format!("{name}2")))
    }

    #[test]
    fn first_match_wins_and_fuses_only_that_class() {
        use crate::line::LineStore;
        let mut lines = LineStore::new();
        let a = lk(&mut lines, "a");
        let b = lk(&mut lines, "b");
        let c = lk(&mut lines, "c");

        let mut store = ParaStore::new();
        store.insert(a.clone(), b.clone());
        store.insert(b.clone(), c.clone());

        assert_eq!(store.classes().len(), 1);
        assert!(store.contains(&a, &c));
    }

    #[test]
    fn rewrite_moves_references_after_line_merge() {
        use crate::line::LineStore;
        let mut lines = LineStore::new();
        let a = lk(&mut lines, "a");
        let b = lk(&mut lines, "b");

        let mut store = ParaStore::new();
        store.insert(a.clone(), b.clone());
        store.rewrite(&a, &b);

        assert!(store.classes()[0].contains(&b));
        assert!(!store.classes()[0].contains(&a));
    }
}
