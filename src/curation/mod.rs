//! Curation stages applied to the in-memory catalog, in run order:
//! enrichment, normalization, validation.

pub mod enrich;
pub mod normalize;
pub mod validate;
