//! `reviewgraph-assembler`: turns a flat batch of DTOs into an owned entity
//! graph.
//!
//! The batch may arrive in any order and may reference entities it does not
//! carry; those references are dropped. See [`assemble`].

pub mod graph;
pub mod resolve;

pub use graph::ResolvedGraph;
pub use resolve::{ShellMap, assemble, materialize_shells, resolve_references};
