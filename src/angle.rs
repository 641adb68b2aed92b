//! Directed angles between two lines.

use crate::line::LineKey;

/// The directed angle from line `lk1` to line `lk2`.
///
/// `Angle(a, b)` and `Angle(b, a)` are distinct values: the symmetric case is
/// handled by the `eqangle` symmetry group (§4.2 in the spec), not by
/// collapsing the two at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Angle {
    pub lk1: LineKey,
    pub lk2: LineKey,
}

impl Angle {
    pub fn new(lk1: LineKey, lk2: LineKey) -> Self {
        Angle { lk1, lk2 }
    }

    /// Rewrites any reference to `from` into `to`, as happens when `from` is
    /// retired by a line merge.
    pub fn rewrite(&mut self, from: &LineKey, to: &LineKey) {
        if &self.lk1 == from {
            self.lk1 = to.clone();
        }
        if &self.lk2 == from {
            self.lk2 = to.clone();
        }
    }
}
