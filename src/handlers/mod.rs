//! HTTP handler modules.
//! Used by: server.

pub mod health;
pub mod load;
pub mod metrics;
pub mod page;
