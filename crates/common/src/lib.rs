//! Shared helpers for the workspace binaries: graph file IO and named graph
//! instances.

pub mod instances;
pub mod io;
