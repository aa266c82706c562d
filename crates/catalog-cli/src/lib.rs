//! Library components of the catalog validator CLI.

pub mod logging;
pub mod pipeline;
