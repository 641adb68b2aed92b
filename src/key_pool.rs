//! Fresh-name allocation for `LineKey`/`CongKey`/circle-centre pools.
//!
//! The original source scans `name1, name2, …` for the first unused name,
//! capped at 50 — a latent bug per the fresh-key allocation note. Since keys
//! are retired (never reused) on merge rather than recycled, a monotonically
//! increasing counter produces the same naming scheme (`line1`, `line2`, …)
//! without ever needing to probe for collisions, and has no upper bound.

#[derive(Debug, Clone)]
pub struct KeyPool {
    prefix: &'static str,
    next: u64,
}

impl KeyPool {
    /// Builds a pool that mints `"{prefix}1"`, `"{prefix}2"`, …
    pub fn new(prefix: &'static str) -> Self {
        KeyPool { prefix, next: 1 }
    }

    /// Mints a fresh, never-before-seen name.
    pub fn fresh(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }
}
