//! Ordered triangles and the equivalence-class store shared by `simtri` and
//! `contri` facts.
//!
//! Vertex order is semantically significant: it encodes the correspondence
//! between two similar/congruent triangles. Unlike lines and angles,
//! triangle correspondence is not a symmetry group over an unordered triple,
//! so alignment between two differently-ordered mentions of "the same"
//! triangle is expressed as an explicit permutation of `S3` rather than
//! computed inline (§9).

use crate::point::Point;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::fmt;

/// An ordered triple of points, the correspondence unit for `simtri`/`contri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triangle(pub Point, pub Point, pub Point);

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Triangle(p1, p2, p3)
    }

    fn vertices(&self) -> [&Point; 3] {
        [&self.0, &self.1, &self.2]
    }

    /// The unordered set of this triangle's three vertices, used to decide
    /// whether two differently-ordered triangles name "the same" triangle.
    pub fn point_set(&self) -> BTreeSet<Point> {
        BTreeSet::from([self.0.clone(), self.1.clone(), self.2.clone()])
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0, self.1, self.2)
    }
}

/// One of the six permutations of three vertex slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation3([usize; 3]);

impl Permutation3 {
    pub const IDENTITY: Permutation3 = Permutation3([0, 1, 2]);

    /// The permutation `σ` such that `σ.apply(from) == to`, given that `from`
    /// and `to` share the same vertex set.
    pub fn aligning(from: &Triangle, to: &Triangle) -> Self {
        debug_assert_eq!(from.point_set(), to.point_set());
        let from_v = from.vertices();
        let to_v = to.vertices();
        let mut idx = [0usize; 3];
        for (slot, to_point) in to_v.iter().enumerate() {
            idx[slot] = from_v
                .iter()
                .position(|p| p == to_point)
                .expect("from and to share a vertex set");
        }
        Permutation3(idx)
    }

    /// Reorders `t`'s vertices through this permutation.
    pub fn apply(&self, t: &Triangle) -> Triangle {
        let v = t.vertices();
        Triangle(
            v[self.0[0]].clone(),
            v[self.0[1]].clone(),
            v[self.0[2]].clone(),
        )
    }
}

/// A list of equivalence classes of triangles under a "mutually
/// similar"/"mutually congruent" relation, shared logic for `simtriFacts`
/// and `contriFacts` (§4.5).
///
/// Each class accumulates the literal ordered triangles it has been told
/// about, rather than collapsing them to one canonical order: containment
/// (§4.6) is a flat membership test with no symmetry logic of its own, so
/// every observed correspondence-preserving relabelling must be present as
/// its own element for containment to find it later.
#[derive(Debug, Default)]
pub struct TriangleClassStore {
    classes: Vec<HashSet<Triangle>>,
}

impl TriangleClassStore {
    pub fn new() -> Self {
        TriangleClassStore { classes: vec![] }
    }

    pub fn classes(&self) -> &[HashSet<Triangle>] {
        &self.classes
    }

    pub fn contains_pair(&self, t1: &Triangle, t2: &Triangle) -> bool {
        self.classes.iter().any(|cls| cls.contains(t1) && cls.contains(t2))
    }

    fn classes_matching_point_set(&self, t: &Triangle) -> Vec<usize> {
        let set = t.point_set();
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, cls)| cls.iter().any(|m| m.point_set() == set))
            .map(|(i, _)| i)
            .collect()
    }

    /// Inserts the pair `(t1, t2)` as mutually related under whichever of
    /// `simtri`/`contri` this store represents.
    ///
    /// A class is found by vertex-*set* overlap (a triangle is "the same
    /// triangle" under any relabelling of its three vertices); the incoming
    /// pair is inserted verbatim, since its own relative order already
    /// carries the new correspondence information. When an anchor triangle
    /// with the same vertex set as one side already exists, the aligning
    /// permutation is computed as a consistency check: applying it to the
    /// other incoming triangle must reproduce whatever anchor already
    /// exists for that side, or the class's "one consistent correspondence"
    /// invariant would be violated.
    pub fn insert_pair(&mut self, t1: Triangle, t2: Triangle) {
        let mut matches = self.classes_matching_point_set(&t1);
        matches.extend(self.classes_matching_point_set(&t2));
        matches.sort_unstable();
        matches.dedup();

        if matches.is_empty() {
            self.classes.push(HashSet::from([t1, t2]));
            return;
        }

        let keep = matches[0];
        for &drop in &matches[1..] {
            let sigma = self.aligning_permutation_into(drop, &t1, &t2);
            let realigned: Vec<Triangle> = self.classes[drop].iter().map(|m| sigma.apply(m)).collect();
            self.classes[keep].extend(realigned);
        }
        // Merging happens before this check so a dropped class's elements
        // (now realigned into `keep`'s frame) are visible as anchors too,
        // not just whatever `keep` already held.
        self.assert_consistent_correspondence(keep, &t1, &t2);
        self.classes[keep].insert(t1);
        self.classes[keep].insert(t2);
        for &drop in matches[1..].iter().rev() {
            self.classes.remove(drop);
        }
    }

    /// The permutation that reinterprets `classes[drop]`'s triangles in the
    /// vertex-labelling frame `t1`/`t2` are about to introduce into `keep`,
    /// anchored on whichever of the two shares its point set with an element
    /// already in `drop` (spec §4.5 step 4: "merge the extra classes into
    /// the first after applying the same permutation").
    fn aligning_permutation_into(&self, drop: usize, t1: &Triangle, t2: &Triangle) -> Permutation3 {
        let t1_set = t1.point_set();
        let t2_set = t2.point_set();
        let (anchor, incoming) = self.classes[drop]
            .iter()
            .find_map(|m| {
                if m.point_set() == t1_set {
                    Some((m.clone(), t1.clone()))
                } else if m.point_set() == t2_set {
                    Some((m.clone(), t2.clone()))
                } else {
                    None
                }
            })
            .expect("drop class was matched via t1 or t2's point set");
        Permutation3::aligning(&anchor, &incoming)
    }

    fn assert_consistent_correspondence(&self, cls_idx: usize, t1: &Triangle, t2: &Triangle) {
        let cls = &self.classes[cls_idx];
        let t1_set = t1.point_set();
        let t2_set = t2.point_set();
        let anchor1 = cls.iter().find(|m| m.point_set() == t1_set);
        let anchor2 = cls.iter().find(|m| m.point_set() == t2_set);
        if let (Some(anchor1), Some(anchor2)) = (anchor1, anchor2) {
            let sigma = Permutation3::aligning(t1, anchor1);
            debug_assert_eq!(
                &sigma.apply(t2),
                anchor2,
                "simtri/contri class would hold two inconsistent vertex correspondences"
            );
        }
    }
}
