//! The congruence equivalence store: mutually congruent segments grouped
//! under a `CongKey`.

use crate::key_pool::KeyPool;
use crate::point::Point;
use crate::segment::Segment;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An opaque identifier for a congruence equivalence class over segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CongKey(String);

impl fmt::Display for CongKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of inserting a `cong` fact: which key survived, and which (if
/// any) was retired and must be rewritten wherever it is referenced
/// (`Ratio`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CongMerge {
    pub keep: CongKey,
    pub dropped: Vec<CongKey>,
}

/// Maps `CongKey -> set of mutually congruent segments`, merging classes that
/// come to share a segment.
#[derive(Debug)]
pub struct CongStore {
    classes: HashMap<CongKey, HashSet<Segment>>,
    pool: KeyPool,
}

impl CongStore {
    pub fn new() -> Self {
        CongStore {
            classes: HashMap::new(),
            pool: KeyPool::new("cong"),
        }
    }

    pub fn segments_of(&self, key: &CongKey) -> &HashSet<Segment> {
        self.classes
            .get(key)
            .expect("CongKey must be live: invariant 2")
    }

    pub fn contains_key(&self, key: &CongKey) -> bool {
        self.classes.contains_key(key)
    }

    pub fn classes(&self) -> impl Iterator<Item = (&CongKey, &HashSet<Segment>)> {
        self.classes.iter()
    }

    /// True iff both segments appear together in the same congruence class
    /// (§4.6 `cong`).
    pub fn contains_pair(&self, s1: &Segment, s2: &Segment) -> bool {
        self.classes
            .values()
            .any(|segs| segs.contains(s1) && segs.contains(s2))
    }

    /// Returns the key of the class already containing the segment `{a, b}`,
    /// or mints a fresh key naming a brand-new singleton class.
    pub fn match_cong(&mut self, a: &Point, b: &Point) -> CongKey {
        let segment = Segment::new(a.clone(), b.clone());
        for (key, segments) in &self.classes {
            if segments.contains(&segment) {
                return key.clone();
            }
        }
        let key = CongKey(self.pool.fresh());
        self.classes.insert(key.clone(), HashSet::from([segment]));
        key
    }

    /// Inserts `cong(s1, s2)`: the 0/1/≥2-overlap cascade of §4.3, threshold
    /// ≥1 shared segment (as opposed to the line store's ≥2 shared points).
    pub fn insert_cong(&mut self, s1: Segment, s2: Segment) -> CongMerge {
        let incoming: HashSet<Segment> = HashSet::from([s1, s2]);

        let mut overlapping: Vec<CongKey> = self
            .classes
            .iter()
            .filter(|(_, segs)| segs.intersection(&incoming).next().is_some())
            .map(|(k, _)| k.clone())
            .collect();
        overlapping.sort();

        match overlapping.len() {
            0 => {
                let key = CongKey(self.pool.fresh());
                self.classes.insert(key.clone(), incoming);
                CongMerge {
                    keep: key,
                    dropped: vec![],
                }
            }
            1 => {
                let keep = overlapping.remove(0);
                self.classes.get_mut(&keep).unwrap().extend(incoming);
                CongMerge {
                    keep,
                    dropped: vec![],
                }
            }
            _ => {
                let keep = overlapping.remove(0);
                let mut merged = self.classes.remove(&keep).unwrap();
                merged.extend(incoming);
                for drop in &overlapping {
                    let dropped_segments = self.classes.remove(drop).unwrap();
                    merged.extend(dropped_segments);
                }
                self.classes.insert(keep.clone(), merged);
                CongMerge {
                    keep,
                    dropped: overlapping,
                }
            }
        }
    }
}
