//! Point identifiers and the total order used to normalise them.

use std::fmt;

/// An opaque point identifier.
///
/// Points are never merged and never renamed; their identity is the name
/// itself. Ordering is lexicographic on the name, which is the only total
/// order the crate needs (`midp` normalisation, pretty-printing).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point(String);

impl Point {
    /// Builds a point from any stringlike name.
    pub fn new(name: impl Into<String>) -> Self {
        Point(name.into())
    }

    /// The point's underlying name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Point {
    fn from(name: &str) -> Self {
        Point(name.to_string())
    }
}

impl From<String> for Point {
    fn from(name: String) -> Self {
        Point(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_lexicographically() {
        let mut pts = vec![Point::new("C"), Point::new("A"), Point::new("B")];
        pts.sort();
        assert_eq!(pts, vec![Point::new("A"), Point::new("B"), Point::new("C")]);
    }

    #[test]
    fn display_is_the_name() {
        assert_eq!(Point::new("Foo").to_string(), "Foo");
    }
}
