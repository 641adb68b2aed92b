//! The point-level, user-facing predicate form (§3, §6).

use crate::error::{ArityRequirement, DatabaseError};
use crate::point::Point;

/// A geometric claim expressed over raw point names, as received from the
/// external parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Coll(Vec<Point>),
    Midp(Point, Point, Point),
    Para(Point, Point, Point, Point),
    Perp(Point, Point, Point, Point),
    Cong(Point, Point, Point, Point),
    EqAngle(Point, Point, Point, Point, Point, Point, Point, Point),
    EqRatio(Point, Point, Point, Point, Point, Point, Point, Point),
    Cyclic(Vec<Point>),
    Circle(Point, Vec<Point>),
    SimTri(Point, Point, Point, Point, Point, Point),
    ContTri(Point, Point, Point, Point, Point, Point),
}

impl Predicate {
    /// Builds a predicate from its textual kind and point list, validating
    /// arity against §6's table. This is the boundary at which malformed
    /// input is rejected; once a `Predicate` exists it is well-formed.
    pub fn from_kind(kind: &str, points: &[Point]) -> Result<Self, DatabaseError> {
        let n = points.len();
        let exact = |k: usize| -> Result<(), DatabaseError> {
            if n == k {
                Ok(())
            } else {
                Err(DatabaseError::WrongArity {
                    kind: kind_static(kind),
                    requirement: ArityRequirement::Exactly(k),
                    got: n,
                })
            }
        };
        let at_least = |k: usize| -> Result<(), DatabaseError> {
            if n >= k {
                Ok(())
            } else {
                Err(DatabaseError::WrongArity {
                    kind: kind_static(kind),
                    requirement: ArityRequirement::AtLeast(k),
                    got: n,
                })
            }
        };

        match kind {
            "coll" => {
                at_least(3)?;
                Ok(Predicate::Coll(points.to_vec()))
            }
            "midp" => {
                exact(3)?;
                Ok(Predicate::Midp(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                ))
            }
            "para" => {
                exact(4)?;
                Ok(Predicate::Para(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                ))
            }
            "perp" => {
                exact(4)?;
                Ok(Predicate::Perp(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                ))
            }
            "cong" => {
                exact(4)?;
                Ok(Predicate::Cong(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                ))
            }
            "eqangle" => {
                exact(8)?;
                Ok(Predicate::EqAngle(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                    points[4].clone(),
                    points[5].clone(),
                    points[6].clone(),
                    points[7].clone(),
                ))
            }
            "eqratio" => {
                exact(8)?;
                Ok(Predicate::EqRatio(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                    points[4].clone(),
                    points[5].clone(),
                    points[6].clone(),
                    points[7].clone(),
                ))
            }
            "cyclic" => {
                at_least(4)?;
                Ok(Predicate::Cyclic(points.to_vec()))
            }
            "circle" => {
                at_least(4)?;
                Ok(Predicate::Circle(points[0].clone(), points[1..].to_vec()))
            }
            "simtri" => {
                exact(6)?;
                Ok(Predicate::SimTri(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                    points[4].clone(),
                    points[5].clone(),
                ))
            }
            "contri" => {
                exact(6)?;
                Ok(Predicate::ContTri(
                    points[0].clone(),
                    points[1].clone(),
                    points[2].clone(),
                    points[3].clone(),
                    points[4].clone(),
                    points[5].clone(),
                ))
            }
            other => Err(DatabaseError::UnknownPredicateKind(other.to_string())),
        }
    }
}

fn kind_static(kind: &str) -> &'static str {
    match kind {
        "coll" => "coll",
        "midp" => "midp",
        "para" => "para",
        "perp" => "perp",
        "cong" => "cong",
        "eqangle" => "eqangle",
        "eqratio" => "eqratio",
        "cyclic" => "cyclic",
        "circle" => "circle",
        "simtri" => "simtri",
        "contri" => "contri",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pts(names: &[&str]) -> Vec<Point> {
        names.iter().map(|n| Point::new(*n)).collect()
    }

    #[test_case("coll", 2, false; "coll rejects two points")]
    #[test_case("coll", 3, true; "coll accepts three points")]
    #[test_case("cyclic", 3, false; "cyclic rejects three points")]
    #[test_case("cyclic", 4, true; "cyclic accepts four points")]
    #[test_case("simtri", 5, false; "simtri rejects five points")]
    #[test_case("simtri", 6, true; "simtri accepts six points")]
    fn arity_boundaries_are_enforced(kind: &str, n: usize, should_succeed: bool) {
        let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
        let points: Vec<Point> = names.iter().map(|n| Point::new(n.as_str())).collect();
        assert_eq!(Predicate::from_kind(kind, &points).is_ok(), should_succeed);
    }

    #[test]
    fn coll_requires_at_least_three_points() {
        let err = Predicate::from_kind("coll", &pts(&["A", "B"])).unwrap_err();
        assert_eq!(
            err,
            DatabaseError::WrongArity {
                kind: "coll",
                requirement: ArityRequirement::AtLeast(3),
                got: 2,
            }
        );
    }

    #[test]
    fn midp_requires_exactly_three_points() {
        let pred = Predicate::from_kind("midp", &pts(&["M", "A", "B"])).unwrap();
        assert_eq!(
            pred,
            Predicate::Midp(Point::new("M"), Point::new("A"), Point::new("B"))
        );
    }

    #[test]
    fn circle_splits_centre_from_remaining_points() {
        let pred = Predicate::from_kind("circle", &pts(&["O", "A", "B", "C"])).unwrap();
        assert_eq!(
            pred,
            Predicate::Circle(Point::new("O"), pts(&["A", "B", "C"]))
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Predicate::from_kind("bogus", &pts(&["A", "B", "C"])).unwrap_err();
        assert_eq!(err, DatabaseError::UnknownPredicateKind("bogus".to_string()));
    }
}
