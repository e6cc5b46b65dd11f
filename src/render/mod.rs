//! HTML output for audit log entries.
//! Used by: renderer, view.

pub mod escape;
pub mod list;
