//! Equal-ratio fact classes.

use crate::cong::CongKey;
use crate::ratio::Ratio;
use std::collections::HashSet;

/// The four symmetric representatives of `eqratio(c1,c2,c3,c4)`, the same
/// symmetry group as `eqangle` (§4.1) but over congruence classes.
fn representatives(c1: &CongKey, c2: &CongKey, c3: &CongKey, c4: &CongKey) -> [(Ratio, Ratio); 4] {
    [
        (Ratio::new(c1.clone(), c2.clone()), Ratio::new(c3.clone(), c4.clone())),
        (Ratio::new(c2.clone(), c1.clone()), Ratio::new(c4.clone(), c3.clone())),
        (Ratio::new(c1.clone(), c3.clone()), Ratio::new(c2.clone(), c4.clone())),
        (Ratio::new(c3.clone(), c1.clone()), Ratio::new(c4.clone(), c2.clone())),
    ]
}

/// A list of sets of mutually equal ratios, structured identically to
/// [`crate::eqangle::EqAngleStore`] over `Ratio` instead of `Angle`.
#[derive(Debug, Default)]
pub struct EqRatioStore {
    classes: Vec<HashSet<Ratio>>,
}

impl EqRatioStore {
    pub fn new() -> Self {
        EqRatioStore { classes: vec![] }
    }

    pub fn classes(&self) -> &[HashSet<Ratio>] {
        &self.classes
    }

    pub fn insert(&mut self, c1: CongKey, c2: CongKey, c3: CongKey, c4: CongKey) {
        let reps = representatives(&c1, &c2, &c3, &c4);
        let base = (Ratio::new(c1, c2), Ratio::new(c3, c4));

        for cls in &mut self.classes {
            let overlaps = reps
                .iter()
                .any(|(a, b)| cls.contains(a) || cls.contains(b));
            if overlaps {
                cls.insert(base.0);
                cls.insert(base.1);
                return;
            }
        }
        self.classes.push(HashSet::from([base.0, base.1]));
    }

    pub fn contains(&self, c1: &CongKey, c2: &CongKey, c3: &CongKey, c4: &CongKey) -> bool {
        let reps = representatives(c1, c2, c3, c4);
        self.classes
            .iter()
            .any(|cls| reps.iter().any(|(a, b)| cls.contains(a) && cls.contains(b)))
    }

    /// Rewrites every ratio referencing `from` into one referencing `to`, as
    /// required when the congruence store retires a merged-away key.
    pub fn rewrite(&mut self, from: &CongKey, to: &CongKey) {
        for cls in &mut self.classes {
            let rewritten: Vec<Ratio> = cls
                .iter()
                .filter(|r| &r.c1 == from || &r.c2 == from)
                .cloned()
                .map(|mut r| {
                    r.rewrite(from, to);
                    r
                })
                .collect();
            if !rewritten.is_empty() {
                cls.retain(|r| &r.c1 != from && &r.c2 != from);
                cls.extend(rewritten);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cong::CongStore;
    use crate::point::Point;

    fn ck(store: &mut CongStore, name: &str) -> CongKey {
        store.match_cong(&Point::new(name), &Point::new(format!("{name}2")))
    }

    #[test]
    fn diagonal_symmetry_is_recognised() {
        let mut congs = CongStore::new();
        let c1 = ck(&mut congs, "c1");
        let c2 = ck(&mut congs, "c2");
        let c3 = ck(&mut congs, "c3");
        let c4 = ck(&mut congs, "c4");

        let mut store = EqRatioStore::new();
        store.insert(c1.clone(), c2.clone(), c3.clone(), c4.clone());

        assert!(store.contains(&c3, &c4, &c1, &c2));
    }

    #[test]
    fn second_insertion_fuses_with_first_class() {
        let mut congs = CongStore::new();
        let c1 = ck(&mut congs, "c1");
        let c2 = ck(&mut congs, "c2");
        let c3 = ck(&mut congs, "c3");
        let c4 = ck(&mut congs, "c4");
        let c5 = ck(&mut congs, "c5");
        let c6 = ck(&mut congs, "c6");

        let mut store = EqRatioStore::new();
        store.insert(c1.clone(), c2.clone(), c3.clone(), c4.clone());
        store.insert(c3.clone(), c4.clone(), c5.clone(), c6.clone());

        assert_eq!(store.classes().len(), 1);
        assert!(store.contains(&c1, &c2, &c5, &c6));
    }
}
