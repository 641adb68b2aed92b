//! The key-level, canonical fact form (§3, §6).

use crate::cong::CongKey;
use crate::line::LineKey;
use crate::point::Point;
use crate::segment::Segment;
use crate::triangle::Triangle;

/// A canonical geometric claim, normalised from a [`crate::predicate::Predicate`]
/// by [`crate::database::Database::predicate_to_fact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    Coll(Vec<Point>),
    Midp(Point, Point, Point),
    Para(LineKey, LineKey),
    Perp(LineKey, LineKey),
    Cong(Segment, Segment),
    EqAngle(LineKey, LineKey, LineKey, LineKey),
    EqRatio(CongKey, CongKey, CongKey, CongKey),
    Cyclic(Vec<Point>),
    Circle(Point, Vec<Point>),
    SimTri(Triangle, Triangle),
    ContTri(Triangle, Triangle),
}
