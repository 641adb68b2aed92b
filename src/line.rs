//! The line equivalence store: collinear points grouped under a `LineKey`.

use crate::key_pool::KeyPool;
use crate::point::Point;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An opaque identifier for a line equivalence class.
///
/// Not stable across merges: when two classes merge, one key is retained and
/// the other is freed (see [`LineStore::insert_coll`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineKey(String);

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of inserting a `coll` fact: which key was kept, and which keys
/// (if any) were retired and must be rewritten wherever they are referenced
/// (`Angle`, `paraFacts`, `perpFacts`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMerge {
    pub keep: LineKey,
    pub dropped: Vec<LineKey>,
}

/// Maps `LineKey -> set of mutually collinear points`, merging classes that
/// come to share two or more points.
#[derive(Debug)]
pub struct LineStore {
    classes: HashMap<LineKey, HashSet<Point>>,
    pool: KeyPool,
}

impl LineStore {
    pub fn new() -> Self {
        LineStore {
            classes: HashMap::new(),
            pool: KeyPool::new("line"),
        }
    }

    /// The points known to be collinear under `key`.
    pub fn points_of(&self, key: &LineKey) -> &HashSet<Point> {
        self.classes
            .get(key)
            .expect("LineKey must be live: invariant 1")
    }

    pub fn contains_key(&self, key: &LineKey) -> bool {
        self.classes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &LineKey> {
        self.classes.keys()
    }

    pub fn classes(&self) -> impl Iterator<Item = (&LineKey, &HashSet<Point>)> {
        self.classes.iter()
    }

    /// True iff some line's point set is a superset of `points` (§4.6 `coll`).
    pub fn contains_superset(&self, points: &[Point]) -> bool {
        self.classes
            .values()
            .any(|pts| points.iter().all(|p| pts.contains(p)))
    }

    /// Returns the key of the unique line containing both `a` and `b`, or
    /// mints a fresh key naming the two-point line `{a, b}`.
    pub fn match_line(&mut self, a: &Point, b: &Point) -> LineKey {
        for (key, points) in &self.classes {
            if points.contains(a) && points.contains(b) {
                return key.clone();
            }
        }
        let key = LineKey(self.pool.fresh());
        self.classes
            .insert(key.clone(), HashSet::from([a.clone(), b.clone()]));
        key
    }

    /// Inserts `coll(points)`: the 0/1/≥2-overlap cascade of §4.2.
    ///
    /// Two distinct lines in the Euclidean plane share at most one point, so
    /// any two classes sharing ≥2 points with the incoming fact must in fact
    /// be the same line and are merged.
    pub fn insert_coll(&mut self, points: &[Point]) -> LineMerge {
        let incoming: HashSet<Point> = points.iter().cloned().collect();

        let mut overlapping: Vec<LineKey> = self
            .classes
            .iter()
            .filter(|(_, pts)| pts.intersection(&incoming).count() >= 2)
            .map(|(k, _)| k.clone())
            .collect();
        overlapping.sort();

        match overlapping.len() {
            0 => {
                let key = LineKey(self.pool.fresh());
                self.classes.insert(key.clone(), incoming);
                LineMerge {
                    keep: key,
                    dropped: vec![],
                }
            }
            1 => {
                let keep = overlapping.remove(0);
                self.classes.get_mut(&keep).unwrap().extend(incoming);
                LineMerge {
                    keep,
                    dropped: vec![],
                }
            }
            _ => {
                let keep = overlapping.remove(0);
                let mut merged = self.classes.remove(&keep).unwrap();
                merged.extend(incoming);
                for drop in &overlapping {
                    let dropped_points = self.classes.remove(drop).unwrap();
                    merged.extend(dropped_points);
                }
                self.classes.insert(keep.clone(), merged);
                LineMerge {
                    keep,
                    dropped: overlapping,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        Point::new(s)
    }

    #[test]
    fn fresh_line_created_when_nothing_overlaps() {
        let mut store = LineStore::new();
        let merge = store.insert_coll(&[pt("A"), pt("B"), pt("C")]);
        assert!(merge.dropped.is_empty());
        assert_eq!(
            store.points_of(&merge.keep).clone(),
            HashSet::from([pt("A"), pt("B"), pt("C")])
        );
    }

    #[test]
    fn single_overlap_extends_in_place() {
        let mut store = LineStore::new();
        let first = store.insert_coll(&[pt("A"), pt("B"), pt("C")]);
        let second = store.insert_coll(&[pt("B"), pt("C"), pt("D")]);
        assert_eq!(second.keep, first.keep);
        assert!(second.dropped.is_empty());
        assert_eq!(
            store.points_of(&first.keep).clone(),
            HashSet::from([pt("A"), pt("B"), pt("C"), pt("D")])
        );
    }

    #[test]
    fn two_overlaps_merge_and_report_dropped_key() {
        let mut store = LineStore::new();
        let l1 = store.insert_coll(&[pt("A"), pt("B"), pt("X")]);
        let l2 = store.insert_coll(&[pt("C"), pt("D"), pt("X")]);
        assert_ne!(l1.keep, l2.keep);

        let merge = store.insert_coll(&[pt("A"), pt("B"), pt("C"), pt("D")]);
        assert_eq!(merge.dropped.len(), 1);
        let survivor = &merge.keep;
        let retired = &merge.dropped[0];
        assert!(!store.contains_key(retired));
        assert_eq!(
            store.points_of(survivor).clone(),
            HashSet::from([pt("A"), pt("B"), pt("C"), pt("D"), pt("X")])
        );
    }

    #[test]
    fn match_line_reuses_existing_class() {
        let mut store = LineStore::new();
        let merge = store.insert_coll(&[pt("A"), pt("B"), pt("C")]);
        assert_eq!(store.match_line(&pt("A"), &pt("C")), merge.keep);
    }

    #[test]
    fn match_line_mints_fresh_two_point_line() {
        let mut store = LineStore::new();
        let key = store.match_line(&pt("X"), &pt("Y"));
        assert_eq!(
            store.points_of(&key).clone(),
            HashSet::from([pt("X"), pt("Y")])
        );
    }
}
