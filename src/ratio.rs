//! Equal-ratio pairs between two congruence classes.

use crate::cong::CongKey;

/// The ratio of the segment lengths of congruence classes `c1` and `c2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub c1: CongKey,
    pub c2: CongKey,
}

impl Ratio {
    pub fn new(c1: CongKey, c2: CongKey) -> Self {
        Ratio { c1, c2 }
    }

    /// Rewrites any reference to `from` into `to`, as happens when `from` is
    /// retired by a congruence-class merge.
    pub fn rewrite(&mut self, from: &CongKey, to: &CongKey) {
        if &self.c1 == from {
            self.c1 = to.clone();
        }
        if &self.c2 == from {
            self.c2 = to.clone();
        }
    }
}
