//! Text extraction — turns raw document text into structured profile
//! fields via ordered, independently testable heuristic strategies.
//!
//! Every extractor here is best-effort: a pattern that fails to match
//! yields a default (empty, 0, "Unknown", or the education sentinel),
//! never an error. Adversarial or garbage input produces a low-confidence
//! empty result, not a fault.

pub mod education;
pub mod experience;
pub mod fields;
pub mod linkedin;
pub mod resume;
