//! The fact database: the composed store plus the predicate/fact bridge,
//! containment, and insertion logic that ties every equivalence store
//! together (§2, §4, §6).

use std::fmt;

use itertools::{iproduct, Itertools};
use tracing::{debug, instrument, trace};

use crate::angle::Angle;
use crate::circle::CircleStore;
use crate::cong::{CongKey, CongStore};
use crate::eqangle::EqAngleStore;
use crate::eqratio::EqRatioStore;
use crate::error::DatabaseError;
use crate::fact::Fact;
use crate::line::{LineKey, LineStore};
use crate::midp::MidpStore;
use crate::para::ParaStore;
use crate::perp::PerpStore;
use crate::point::Point;
use crate::predicate::Predicate;
use crate::ratio::Ratio;
use crate::segment::Segment;
use crate::triangle::{Triangle, TriangleClassStore};

/// The fact database. Owns every equivalence store and mediates all
/// cross-store rewriting triggered by line and congruence merges.
#[derive(Debug)]
pub struct Database {
    lines: LineStore,
    congs: CongStore,
    circles: CircleStore,
    midp: MidpStore,
    para: ParaStore,
    perp: PerpStore,
    eqangle: EqAngleStore,
    eqratio: EqRatioStore,
    simtri: TriangleClassStore,
    contri: TriangleClassStore,
}

impl Database {
    pub fn new() -> Self {
        Database {
            lines: LineStore::new(),
            congs: CongStore::new(),
            circles: CircleStore::new(),
            midp: MidpStore::new(),
            para: ParaStore::new(),
            perp: PerpStore::new(),
            eqangle: EqAngleStore::new(),
            eqratio: EqRatioStore::new(),
            simtri: TriangleClassStore::new(),
            contri: TriangleClassStore::new(),
        }
    }

    // ---- §4.1 predicate/fact bridge -----------------------------------

    /// Normalises a point-level predicate into a key-level fact, interning
    /// lines and congruence classes on the fly where the predicate names
    /// one (§4.1).
    #[instrument(level = "trace", skip(self))]
    pub fn predicate_to_fact(&mut self, predicate: &Predicate) -> Fact {
        match predicate {
            Predicate::Coll(points) => Fact::Coll(points.clone()),
            Predicate::Midp(m, a, b) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                Fact::Midp(m.clone(), lo.clone(), hi.clone())
            }
            Predicate::Para(a, b, c, d) => Fact::Para(
                self.lines.match_line(a, b),
                self.lines.match_line(c, d),
            ),
            Predicate::Perp(a, b, c, d) => Fact::Perp(
                self.lines.match_line(a, b),
                self.lines.match_line(c, d),
            ),
            Predicate::Cong(a, b, c, d) => Fact::Cong(
                Segment::new(a.clone(), b.clone()),
                Segment::new(c.clone(), d.clone()),
            ),
            Predicate::EqAngle(a, b, c, d, p, q, u, v) => Fact::EqAngle(
                self.lines.match_line(a, b),
                self.lines.match_line(c, d),
                self.lines.match_line(p, q),
                self.lines.match_line(u, v),
            ),
            Predicate::EqRatio(a, b, c, d, p, q, u, v) => Fact::EqRatio(
                self.congs.match_cong(a, b),
                self.congs.match_cong(c, d),
                self.congs.match_cong(p, q),
                self.congs.match_cong(u, v),
            ),
            Predicate::Cyclic(points) => Fact::Cyclic(points.clone()),
            Predicate::Circle(centre, points) => Fact::Circle(centre.clone(), points.clone()),
            Predicate::SimTri(a, b, c, p, q, r) => Fact::SimTri(
                Triangle::new(a.clone(), b.clone(), c.clone()),
                Triangle::new(p.clone(), q.clone(), r.clone()),
            ),
            Predicate::ContTri(a, b, c, p, q, r) => Fact::ContTri(
                Triangle::new(a.clone(), b.clone(), c.clone()),
                Triangle::new(p.clone(), q.clone(), r.clone()),
            ),
        }
    }

    /// Expands a fact back into every syntactically distinct predicate that
    /// would normalise to it (§4.1), the symmetry-expansion the deduction
    /// engine uses for pattern matching.
    pub fn fact_to_all_predicates(&self, fact: &Fact) -> Vec<Predicate> {
        match fact {
            Fact::Coll(points) => vec![Predicate::Coll(points.clone())],

            Fact::Midp(m, a, b) => vec![
                Predicate::Midp(m.clone(), a.clone(), b.clone()),
                Predicate::Midp(m.clone(), b.clone(), a.clone()),
            ],

            Fact::Para(lk1, lk2) => self
                .line_pair_combinations(lk1, lk2)
                .map(|(a, b, c, d)| Predicate::Para(a, b, c, d))
                .collect(),

            Fact::Perp(lk1, lk2) => self
                .line_pair_combinations(lk1, lk2)
                .map(|(a, b, c, d)| Predicate::Perp(a, b, c, d))
                .collect(),

            Fact::Cong(s1, s2) => vec![
                Predicate::Cong(s1.p1.clone(), s1.p2.clone(), s2.p1.clone(), s2.p2.clone()),
                Predicate::Cong(s1.p1.clone(), s1.p2.clone(), s2.p2.clone(), s2.p1.clone()),
                Predicate::Cong(s1.p2.clone(), s1.p1.clone(), s2.p1.clone(), s2.p2.clone()),
                Predicate::Cong(s1.p2.clone(), s1.p1.clone(), s2.p2.clone(), s2.p1.clone()),
            ],

            Fact::EqAngle(lk1, lk2, lk3, lk4) => {
                let mut out = Vec::new();
                for (a, b, c, d) in self.eqangle_representatives(lk1, lk2, lk3, lk4) {
                    let first_half: Vec<_> = self.line_pair_combinations(&a, &b).collect();
                    let second_half: Vec<_> = self.line_pair_combinations(&c, &d).collect();
                    for (p1, p2, p3, p4) in &first_half {
                        for (p5, p6, p7, p8) in &second_half {
                            out.push(Predicate::EqAngle(
                                p1.clone(),
                                p2.clone(),
                                p3.clone(),
                                p4.clone(),
                                p5.clone(),
                                p6.clone(),
                                p7.clone(),
                                p8.clone(),
                            ));
                        }
                    }
                }
                out
            }

            Fact::EqRatio(c1, c2, c3, c4) => {
                let mut out = Vec::new();
                for (a, b, c, d) in self.eqratio_representatives(c1, c2, c3, c4) {
                    let first_half: Vec<_> = self.cong_pair_combinations(&a, &b).collect();
                    let second_half: Vec<_> = self.cong_pair_combinations(&c, &d).collect();
                    for (p1, p2, p3, p4) in &first_half {
                        for (p5, p6, p7, p8) in &second_half {
                            out.push(Predicate::EqRatio(
                                p1.clone(),
                                p2.clone(),
                                p3.clone(),
                                p4.clone(),
                                p5.clone(),
                                p6.clone(),
                                p7.clone(),
                                p8.clone(),
                            ));
                        }
                    }
                }
                out
            }

            Fact::Cyclic(points) => vec![Predicate::Cyclic(points.clone())],
            Fact::Circle(centre, points) => {
                vec![Predicate::Circle(centre.clone(), points.clone())]
            }

            Fact::SimTri(t1, t2) => vec![Predicate::SimTri(
                t1.0.clone(),
                t1.1.clone(),
                t1.2.clone(),
                t2.0.clone(),
                t2.1.clone(),
                t2.2.clone(),
            )],
            Fact::ContTri(t1, t2) => vec![Predicate::ContTri(
                t1.0.clone(),
                t1.1.clone(),
                t1.2.clone(),
                t2.0.clone(),
                t2.1.clone(),
                t2.2.clone(),
            )],
        }
    }

    /// All `(A,B,C,D)` point tuples obtained by choosing 2 points from
    /// `lk1`'s class and 2 from `lk2`'s (§4.1 `para`/`perp` expansion).
    fn line_pair_combinations<'a>(
        &'a self,
        lk1: &LineKey,
        lk2: &LineKey,
    ) -> impl Iterator<Item = (Point, Point, Point, Point)> + 'a {
        let left = sorted_points(self.lines.points_of(lk1));
        let right = sorted_points(self.lines.points_of(lk2));
        iproduct!(
            left.into_iter().tuple_combinations::<(Point, Point)>(),
            right.into_iter().tuple_combinations::<(Point, Point)>()
        )
        .map(|((a, b), (c, d))| (a, b, c, d))
    }

    /// All `(A,B,C,D)` point tuples obtained by reading off the stored
    /// segments of `ck1` and `ck2` directly (§4.1 `eqratio` expansion).
    fn cong_pair_combinations<'a>(
        &'a self,
        ck1: &CongKey,
        ck2: &CongKey,
    ) -> impl Iterator<Item = (Point, Point, Point, Point)> + 'a {
        let left = sorted_segments(self.congs.segments_of(ck1));
        let right = sorted_segments(self.congs.segments_of(ck2));
        iproduct!(left, right).map(|(s1, s2)| (s1.p1, s1.p2, s2.p1, s2.p2))
    }

    fn eqangle_representatives(
        &self,
        lk1: &LineKey,
        lk2: &LineKey,
        lk3: &LineKey,
        lk4: &LineKey,
    ) -> impl Iterator<
        Item = (
            LineKey,
            LineKey,
            LineKey,
            LineKey,
        ),
    > {
        [
            (lk1.clone(), lk2.clone(), lk3.clone(), lk4.clone()),
            (lk2.clone(), lk1.clone(), lk4.clone(), lk3.clone()),
            (lk1.clone(), lk3.clone(), lk2.clone(), lk4.clone()),
            (lk3.clone(), lk1.clone(), lk4.clone(), lk2.clone()),
        ]
        .into_iter()
    }

    fn eqratio_representatives(
        &self,
        c1: &CongKey,
        c2: &CongKey,
        c3: &CongKey,
        c4: &CongKey,
    ) -> impl Iterator<
        Item = (
            CongKey,
            CongKey,
            CongKey,
            CongKey,
        ),
    > {
        [
            (c1.clone(), c2.clone(), c3.clone(), c4.clone()),
            (c2.clone(), c1.clone(), c4.clone(), c3.clone()),
            (c1.clone(), c3.clone(), c2.clone(), c4.clone()),
            (c3.clone(), c1.clone(), c4.clone(), c2.clone()),
        ]
        .into_iter()
    }

    // ---- §4.6 containment ----------------------------------------------

    /// Whether a semantically equivalent fact already exists, respecting
    /// each kind's symmetry group (§4.6).
    pub fn contains_fact(&self, fact: &Fact) -> bool {
        match fact {
            Fact::Coll(points) => self.lines.contains_superset(points),
            Fact::Midp(m, a, b) => self.midp.contains(m, a, b),
            Fact::Para(lk1, lk2) => self.para.contains(lk1, lk2),
            Fact::Perp(lk1, lk2) => self.perp.contains(lk1, lk2),
            Fact::Cong(s1, s2) => self.congs.contains_pair(s1, s2),
            Fact::EqAngle(lk1, lk2, lk3, lk4) => self.eqangle.contains(lk1, lk2, lk3, lk4),
            Fact::EqRatio(c1, c2, c3, c4) => self.eqratio.contains(c1, c2, c3, c4),
            Fact::Cyclic(points) => self.circles.contains_cyclic(points),
            Fact::Circle(centre, points) => self.circles.contains_circle(centre, points),
            Fact::SimTri(t1, t2) => self.simtri.contains_pair(t1, t2),
            Fact::ContTri(t1, t2) => self.contri.contains_pair(t1, t2),
        }
    }

    // ---- insertion -------------------------------------------------------

    /// Normalises and inserts a raw predicate, used during initial
    /// hypothesis loading (§6).
    pub fn add_predicate(&mut self, kind: &str, points: &[Point]) -> Result<(), DatabaseError> {
        let predicate = Predicate::from_kind(kind, points)?;
        let fact = self.predicate_to_fact(&predicate);
        self.add_fact(fact);
        Ok(())
    }

    /// Inserts a canonical fact, used by the rule engine (§6). A no-op if an
    /// equivalent fact is already present (§7, §8 invariant 3).
    #[instrument(level = "debug", skip(self))]
    pub fn add_fact(&mut self, fact: Fact) {
        if self.contains_fact(&fact) {
            trace!("fact already present, skipping");
            return;
        }
        match fact {
            Fact::Coll(points) => {
                let merge = self.lines.insert_coll(&points);
                for dropped in &merge.dropped {
                    debug!(%dropped, keep = %merge.keep, "line classes merged");
                    self.eqangle.rewrite(dropped, &merge.keep);
                    self.para.rewrite(dropped, &merge.keep);
                    self.perp.rewrite(dropped, &merge.keep);
                }
            }
            Fact::Midp(m, a, b) => self.midp.insert(m, a, b),
            Fact::Para(lk1, lk2) => self.para.insert(lk1, lk2),
            Fact::Perp(lk1, lk2) => self.perp.insert(lk1, lk2),
            Fact::Cong(s1, s2) => {
                let merge = self.congs.insert_cong(s1, s2);
                for dropped in &merge.dropped {
                    debug!(%dropped, keep = %merge.keep, "congruence classes merged");
                    self.eqratio.rewrite(dropped, &merge.keep);
                }
            }
            Fact::EqAngle(lk1, lk2, lk3, lk4) => self.eqangle.insert(lk1, lk2, lk3, lk4),
            Fact::EqRatio(c1, c2, c3, c4) => self.eqratio.insert(c1, c2, c3, c4),
            Fact::Cyclic(points) => self.circles.insert_cyclic(&points),
            Fact::Circle(centre, points) => self.circles.insert_circle(centre, &points),
            Fact::SimTri(t1, t2) => self.simtri.insert_pair(t1, t2),
            Fact::ContTri(t1, t2) => self.contri.insert_pair(t1, t2),
        }
        self.debug_assert_invariants();
    }

    /// Internal-logic consistency checks (§8 invariants 1-2). These guard
    /// against bugs in this crate, not malformed external input, so they
    /// assert rather than return a `DatabaseError`.
    fn debug_assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let keys: Vec<_> = self.lines.keys().collect();
            for (i, a) in keys.iter().enumerate() {
                for b in &keys[i + 1..] {
                    let shared = self
                        .lines
                        .points_of(a)
                        .intersection(self.lines.points_of(b))
                        .count();
                    debug_assert!(shared <= 1, "two line classes share >= 2 points");
                }
            }

            let cong_classes: Vec<_> = self.congs.classes().collect();
            for (i, (_, a)) in cong_classes.iter().enumerate() {
                for (_, b) in &cong_classes[i + 1..] {
                    let shared = a.intersection(b).count();
                    debug_assert!(shared == 0, "two cong classes share a segment");
                }
            }

            let circles = self.circles.circles();
            for (i, a) in circles.iter().enumerate() {
                for b in &circles[i + 1..] {
                    let shared = a.points.intersection(&b.points).count();
                    debug_assert!(shared <= 2, "two distinct circles share >= 3 points");
                }
            }
        }
    }

    // ---- snapshot ----------------------------------------------------

    /// A stable, human-readable rendering for debugging and tests (§6),
    /// with the original's fixed section order: coll, para, perp, eqangle,
    /// cong, eqratio, simtri, contri, circle.
    pub fn snapshot(&self) -> String {
        self.to_string()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_points(points: &std::collections::HashSet<Point>) -> Vec<Point> {
    let mut v: Vec<Point> = points.iter().cloned().collect();
    v.sort();
    v
}

fn sorted_segments(segments: &std::collections::HashSet<Segment>) -> Vec<Segment> {
    let mut v: Vec<Segment> = segments.iter().cloned().collect();
    v.sort();
    v
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "coll:")?;
        let mut lines: Vec<Vec<&Point>> = self
            .lines
            .classes()
            .map(|(_, pts)| {
                let mut v: Vec<&Point> = pts.iter().collect();
                v.sort();
                v
            })
            .collect();
        lines.sort();
        for pts in &lines {
            writeln!(f, "  coll({})", pts.iter().map(|p| p.name()).join(","))?;
        }

        writeln!(f, "para:")?;
        let mut para_classes: Vec<Vec<String>> = self
            .para
            .classes()
            .iter()
            .map(|cls| {
                let mut v: Vec<String> = cls.iter().map(|k| k.to_string()).collect();
                v.sort();
                v
            })
            .collect();
        para_classes.sort();
        for cls in &para_classes {
            writeln!(f, "  para({})", cls.join(","))?;
        }

        writeln!(f, "perp:")?;
        let mut perp_pairs: Vec<String> = self
            .perp
            .iter()
            .map(|(a, b)| {
                let mut names = [a.to_string(), b.to_string()];
                names.sort();
                format!("{},{}", names[0], names[1])
            })
            .collect();
        perp_pairs.sort();
        for pair in &perp_pairs {
            writeln!(f, "  perp({})", pair)?;
        }

        writeln!(f, "eqangle:")?;
        let mut eqangle_classes: Vec<Vec<String>> = self
            .eqangle
            .classes()
            .iter()
            .map(|cls| {
                let mut v: Vec<String> = cls
                    .iter()
                    .map(|a: &Angle| format!("{}->{}", a.lk1, a.lk2))
                    .collect();
                v.sort();
                v
            })
            .collect();
        eqangle_classes.sort();
        for cls in &eqangle_classes {
            writeln!(f, "  eqangle({})", cls.join(","))?;
        }

        writeln!(f, "cong:")?;
        let mut cong_classes: Vec<Vec<String>> = self
            .congs
            .classes()
            .map(|(_, segs)| {
                let mut v: Vec<String> = segs.iter().map(|s| s.to_string()).collect();
                v.sort();
                v
            })
            .collect();
        cong_classes.sort();
        for cls in &cong_classes {
            writeln!(f, "  cong({})", cls.join(","))?;
        }

        writeln!(f, "eqratio:")?;
        let mut eqratio_classes: Vec<Vec<String>> = self
            .eqratio
            .classes()
            .iter()
            .map(|cls| {
                let mut v: Vec<String> = cls
                    .iter()
                    .map(|r: &Ratio| format!("{}->{}", r.c1, r.c2))
                    .collect();
                v.sort();
                v
            })
            .collect();
        eqratio_classes.sort();
        for cls in &eqratio_classes {
            writeln!(f, "  eqratio({})", cls.join(","))?;
        }

        writeln!(f, "simtri:")?;
        let mut simtri_classes: Vec<Vec<String>> = self
            .simtri
            .classes()
            .iter()
            .map(|cls| {
                let mut v: Vec<String> = cls.iter().map(|t: &Triangle| t.to_string()).collect();
                v.sort();
                v
            })
            .collect();
        simtri_classes.sort();
        for cls in &simtri_classes {
            writeln!(f, "  simtri({})", cls.join(","))?;
        }

        writeln!(f, "contri:")?;
        let mut contri_classes: Vec<Vec<String>> = self
            .contri
            .classes()
            .iter()
            .map(|cls| {
                let mut v: Vec<String> = cls.iter().map(|t: &Triangle| t.to_string()).collect();
                v.sort();
                v
            })
            .collect();
        contri_classes.sort();
        for cls in &contri_classes {
            writeln!(f, "  contri({})", cls.join(","))?;
        }

        writeln!(f, "circle:")?;
        for circle in self.circles.circles() {
            writeln!(f, "  {}", circle)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pt(s: &str) -> Point {
        Point::new(s)
    }

    fn pred(kind: &str, names: &[&str]) -> Predicate {
        let points: Vec<Point> = names.iter().map(|n| pt(n)).collect();
        Predicate::from_kind(kind, &points).unwrap()
    }

    fn insert(db: &mut Database, kind: &str, names: &[&str]) {
        let p = pred(kind, names);
        let f = db.predicate_to_fact(&p);
        db.add_fact(f);
    }

    fn contains(db: &mut Database, kind: &str, names: &[&str]) -> bool {
        let p = pred(kind, names);
        let f = db.predicate_to_fact(&p);
        db.contains_fact(&f)
    }

    #[test]
    fn scenario_1_coll_merges_and_trivial_containment() {
        let mut db = Database::new();
        insert(&mut db, "coll", &["A", "B", "C"]);
        insert(&mut db, "coll", &["B", "C", "D"]);

        assert_eq!(db.lines.classes().count(), 1);
        assert!(contains(&mut db, "coll", &["A", "D"]));
        assert!(contains(&mut db, "coll", &["A", "C", "D"]));
    }

    #[test]
    fn scenario_2_para_transitivity_across_lines() {
        let mut db = Database::new();
        insert(&mut db, "para", &["A", "B", "C", "D"]);
        insert(&mut db, "para", &["C", "D", "E", "F"]);

        assert_eq!(db.para.classes().len(), 1);
        assert!(contains(&mut db, "para", &["A", "B", "E", "F"]));
    }

    #[test]
    fn scenario_3_coll_merge_rewrites_angles_without_loss() {
        let mut db = Database::new();
        insert(&mut db, "coll", &["A", "B", "X"]);
        insert(&mut db, "coll", &["C", "D", "X"]);
        insert(&mut db, "eqangle", &["A", "B", "C", "D", "P", "Q", "U", "V"]);

        insert(&mut db, "coll", &["A", "B", "C", "D"]);

        assert_eq!(db.lines.classes().count(), 1);
        assert!(contains(
            &mut db,
            "eqangle",
            &["A", "B", "C", "D", "P", "Q", "U", "V"]
        ));
    }

    #[test]
    fn scenario_4_eqangle_diagonal_symmetry() {
        let mut db = Database::new();
        insert(&mut db, "eqangle", &["A", "B", "C", "D", "E", "F", "G", "H"]);
        assert!(contains(
            &mut db,
            "eqangle",
            &["E", "F", "G", "H", "A", "B", "C", "D"]
        ));
    }

    #[test]
    fn scenario_5_cyclic_merge_keeps_first_centre_name() {
        let mut db = Database::new();
        insert(&mut db, "cyclic", &["A", "B", "C", "D"]);
        let first_centre = db.circles.circles()[0].centre.clone();

        insert(&mut db, "cyclic", &["B", "C", "D", "E"]);

        assert_eq!(db.circles.circles().len(), 1);
        assert_eq!(db.circles.circles()[0].centre, first_centre);
        assert!(contains(&mut db, "cyclic", &["A", "E"]));
    }

    #[test]
    fn scenario_6_simtri_correspondence_consistency() {
        let mut db = Database::new();
        insert(&mut db, "simtri", &["A", "B", "C", "P", "Q", "R"]);
        insert(&mut db, "simtri", &["Q", "P", "R", "B", "A", "C"]);

        assert_eq!(db.simtri.classes().len(), 1);
        let cls = &db.simtri.classes()[0];
        assert_eq!(cls.len(), 4);
    }

    #[test]
    fn add_fact_runs_under_a_tracing_subscriber() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut db = Database::new();
        insert(&mut db, "coll", &["A", "B", "C"]);
        assert_eq!(db.lines.classes().count(), 1);
    }

    #[test]
    fn idempotent_insertion_is_a_no_op() {
        let mut db = Database::new();
        insert(&mut db, "coll", &["A", "B", "C"]);
        let before = db.snapshot();
        insert(&mut db, "coll", &["A", "B", "C"]);
        assert_eq!(db.snapshot(), before);
    }

    #[test]
    fn unknown_kind_rejected_without_mutating_state() {
        let mut db = Database::new();
        let err = db.add_predicate("bogus", &[pt("A"), pt("B")]);
        assert!(err.is_err());
        assert_eq!(db.snapshot(), Database::new().snapshot());
    }

    #[test]
    fn fact_round_trip_through_predicate_expansion() {
        let mut db = Database::new();
        insert(&mut db, "para", &["A", "B", "C", "D"]);
        let fact = Fact::Para(db.lines.match_line(&pt("A"), &pt("B")), db.lines.match_line(&pt("C"), &pt("D")));
        let predicates = db.fact_to_all_predicates(&fact);
        for p in &predicates {
            assert_eq!(&db.predicate_to_fact(p), &fact);
        }
    }
}
