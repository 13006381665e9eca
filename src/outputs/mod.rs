//! Report rendering.
//!
//! A run produces exactly one artifact: the monthly markdown digest, written
//! to `nature_<label>.md`. [`markdown`] groups the enriched articles by
//! category and renders the document; the actual file write stays with the
//! caller.

pub mod markdown;
