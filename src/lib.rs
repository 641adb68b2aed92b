//! The fact database of a synthetic Euclidean-geometry deductive prover:
//! canonical, deduplicated storage for collinearity, parallelism,
//! perpendicularity, congruence, midpoint, concyclicity, equal-angle,
//! equal-ratio, similar- and congruent-triangle facts, plus the
//! predicate/fact bridge and symmetry-aware containment a saturation loop
//! needs to reach a fixed point.

pub mod angle;
pub mod circle;
pub mod cong;
pub mod database;
pub mod eqangle;
pub mod eqratio;
pub mod error;
pub mod fact;
pub mod key_pool;
pub mod line;
pub mod midp;
pub mod para;
pub mod perp;
pub mod point;
pub mod predicate;
pub mod ratio;
pub mod segment;
pub mod triangle;

pub use database::Database;
pub use error::DatabaseError;
pub use fact::Fact;
pub use point::Point;
pub use predicate::Predicate;
