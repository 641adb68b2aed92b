//! Named circles: a centre point plus the set of points known to lie on it.

use crate::key_pool::KeyPool;
use crate::point::Point;
use std::collections::HashSet;
use std::fmt;

/// A circle: its centre and the points known to lie on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub centre: Point,
    pub points: HashSet<Point>,
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.points.iter().map(Point::name).collect();
        names.sort_unstable();
        write!(f, "circle({}; {})", self.centre, names.join(","))
    }
}

/// Maintains named circles, merging `cyclic` facts by ≥3 shared points and
/// `circle` facts by matching centre plus ≥1 shared non-centre point (§4.4).
#[derive(Debug)]
pub struct CircleStore {
    circles: Vec<Circle>,
    centre_pool: KeyPool,
}

impl CircleStore {
    pub fn new() -> Self {
        CircleStore {
            circles: vec![],
            centre_pool: KeyPool::new("O"),
        }
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Inserts `cyclic(points)`: three points determine a circle, so any
    /// stored circle sharing ≥3 points with the incoming set must be it; the
    /// usual 0/1/≥2-overlap cascade follows, with a freshly named centre
    /// (`O1`, `O2`, …) minted only in the no-overlap case.
    pub fn insert_cyclic(&mut self, points: &[Point]) {
        let incoming: HashSet<Point> = points.iter().cloned().collect();

        let mut overlapping: Vec<usize> = self
            .circles
            .iter()
            .enumerate()
            .filter(|(_, c)| c.points.intersection(&incoming).count() >= 3)
            .map(|(i, _)| i)
            .collect();

        match overlapping.len() {
            0 => {
                let centre = Point::new(self.centre_pool.fresh());
                self.circles.push(Circle {
                    centre,
                    points: incoming,
                });
            }
            1 => {
                let idx = overlapping[0];
                self.circles[idx].points.extend(incoming);
            }
            _ => {
                overlapping.sort_unstable();
                let keep = overlapping[0];
                let mut merged_points = incoming;
                for &drop in &overlapping[1..] {
                    merged_points.extend(self.circles[drop].points.iter().cloned());
                }
                self.circles[keep].points.extend(merged_points);
                for &drop in overlapping[1..].iter().rev() {
                    self.circles.remove(drop);
                }
            }
        }
    }

    /// Inserts `circle(centre, points)`: scans every stored circle once (the
    /// REDESIGN-flagged fix to the original's non-advancing loop, §9 Open
    /// Question 3) for the first one with a matching centre and ≥1 shared
    /// non-centre point, extending it in place; otherwise appends a fresh
    /// circle named by the given centre.
    pub fn insert_circle(&mut self, centre: Point, points: &[Point]) {
        let incoming: HashSet<Point> = points.iter().cloned().collect();

        let found = self.circles.iter_mut().find(|c| {
            c.centre == centre && c.points.intersection(&incoming).next().is_some()
        });

        match found {
            Some(circle) => circle.points.extend(incoming),
            None => self.circles.push(Circle {
                centre,
                points: incoming,
            }),
        }
    }

    pub fn contains_cyclic(&self, points: &[Point]) -> bool {
        self.circles
            .iter()
            .any(|c| points.iter().all(|p| c.points.contains(p)))
    }

    pub fn contains_circle(&self, centre: &Point, points: &[Point]) -> bool {
        self.circles
            .iter()
            .any(|c| &c.centre == centre && points.iter().all(|p| c.points.contains(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        Point::new(s)
    }

    #[test]
    fn cyclic_merges_on_three_shared_points() {
        let mut store = CircleStore::new();
        store.insert_cyclic(&[pt("A"), pt("B"), pt("C"), pt("D")]);
        store.insert_cyclic(&[pt("B"), pt("C"), pt("D"), pt("E")]);

        assert_eq!(store.circles().len(), 1);
        assert!(store.contains_cyclic(&[pt("A"), pt("E")]));
    }

    #[test]
    fn cyclic_does_not_merge_on_two_shared_points() {
        let mut store = CircleStore::new();
        store.insert_cyclic(&[pt("A"), pt("B"), pt("C"), pt("D")]);
        store.insert_cyclic(&[pt("C"), pt("D"), pt("E"), pt("F")]);
        assert_eq!(store.circles().len(), 2);
    }

    #[test]
    fn circle_extends_on_matching_centre_and_overlap() {
        let mut store = CircleStore::new();
        store.insert_circle(pt("O"), &[pt("A"), pt("B"), pt("C")]);
        store.insert_circle(pt("O"), &[pt("C"), pt("D")]);

        assert_eq!(store.circles().len(), 1);
        assert!(store.contains_circle(&pt("O"), &[pt("A"), pt("D")]));
    }

    #[test]
    fn circle_appends_fresh_when_no_overlap() {
        let mut store = CircleStore::new();
        store.insert_circle(pt("O"), &[pt("A"), pt("B"), pt("C")]);
        store.insert_circle(pt("O2"), &[pt("X"), pt("Y"), pt("Z")]);
        assert_eq!(store.circles().len(), 2);
    }
}
