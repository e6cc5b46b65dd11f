//! Audit log records: normalization, ordering, and the fetch boundary.
//! Used by: renderer, state.

pub mod record;
pub mod sort;
pub mod source;
