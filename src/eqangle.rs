//! Equal-angle fact classes.

use crate::angle::Angle;
use crate::line::LineKey;
use std::collections::HashSet;

/// The four symmetric representatives of `eqangle(lk1,lk2,lk3,lk4)` (§4.1):
/// simultaneous swap within each pair, and the diagonal swap `lk2 <-> lk3`.
fn representatives(lk1: &LineKey, lk2: &LineKey, lk3: &LineKey, lk4: &LineKey) -> [(Angle, Angle); 4] {
    [
        (Angle::new(lk1.clone(), lk2.clone()), Angle::new(lk3.clone(), lk4.clone())),
        (Angle::new(lk2.clone(), lk1.clone()), Angle::new(lk4.clone(), lk3.clone())),
        (Angle::new(lk1.clone(), lk3.clone()), Angle::new(lk2.clone(), lk4.clone())),
        (Angle::new(lk3.clone(), lk1.clone()), Angle::new(lk4.clone(), lk2.clone())),
    ]
}

/// A list of sets of mutually equal directed angles.
///
/// As with `para` (§9 Open Question 1), the first class whose members
/// overlap any symmetric representative absorbs the pair; the scan stops
/// there rather than cascading into a multi-class merge.
#[derive(Debug, Default)]
pub struct EqAngleStore {
    classes: Vec<HashSet<Angle>>,
}

impl EqAngleStore {
    pub fn new() -> Self {
        EqAngleStore { classes: vec![] }
    }

    pub fn classes(&self) -> &[HashSet<Angle>] {
        &self.classes
    }

    pub fn insert(&mut self, lk1: LineKey, lk2: LineKey, lk3: LineKey, lk4: LineKey) {
        let reps = representatives(&lk1, &lk2, &lk3, &lk4);
        let base = (Angle::new(lk1, lk2), Angle::new(lk3, lk4));

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

    /// True iff any of the four symmetric representatives has both of its
    /// angles present together in a single class (§4.6).
    pub fn contains(&self, lk1: &LineKey, lk2: &LineKey, lk3: &LineKey, lk4: &LineKey) -> bool {
        let reps = representatives(lk1, lk2, lk3, lk4);
        self.classes
            .iter()
            .any(|cls| reps.iter().any(|(a, b)| cls.contains(a) && cls.contains(b)))
    }

    /// Rewrites every angle referencing `from` into one referencing `to`, as
    /// required when the line store retires a merged-away key.
    pub fn rewrite(&mut self, from: &LineKey, to: &LineKey) {
        for cls in &mut self.classes {
            let rewritten: Vec<Angle> = cls
                .iter()
                .filter(|a| &a.lk1 == from || &a.lk2 == from)
                .cloned()
                .map(|mut a| {
                    a.rewrite(from, to);
                    a
                })
                .collect();
            if !rewritten.is_empty() {
                cls.retain(|a| &a.lk1 != from && &a.lk2 != from);
                cls.extend(rewritten);
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
    fn diagonal_symmetry_is_recognised() {
        let mut lines = LineStore::new();
        let ab = lk(&mut lines, "ab");
        let cd = lk(&mut lines, "cd");
        let ef = lk(&mut lines, "ef");
        let gh = lk(&mut lines, "gh");

        let mut store = EqAngleStore::new();
        store.insert(ab.clone(), cd.clone(), ef.clone(), gh.clone());

        assert!(store.contains(&ef, &gh, &ab, &cd));
    }

    #[test]
    fn second_insertion_fuses_with_first_class() {
        let mut lines = LineStore::new();
        let ab = lk(&mut lines, "ab");
        let cd = lk(&mut lines, "cd");
        let ef = lk(&mut lines, "ef");
        let gh = lk(&mut lines, "gh");
        let ij = lk(&mut lines, "ij");
        let kl = lk(&mut lines, "kl");

        let mut store = EqAngleStore::new();
        store.insert(ab.clone(), cd.clone(), ef.clone(), gh.clone());
        store.insert(ef.clone(), gh.clone(), ij.clone(), kl.clone());

        assert_eq!(store.classes().len(), 1);
        assert!(store.contains(&ab, &cd, &ij, &kl));
    }

    #[test]
    fn rewrite_moves_angles_into_new_key() {
        let mut lines = LineStore::new();
        let ab = lk(&mut lines, "ab");
        let cd = lk(&mut lines, "cd");

        let mut store = EqAngleStore::new();
        store.insert(ab.clone(), cd.clone(), ab.clone(), cd.clone());
        store.rewrite(&ab, &cd);

        assert!(store.classes()[0].iter().all(|a| a.lk1 != ab && a.lk2 != ab));
    }
}
