//! Location graph module: weighted directed store, file loader and DFS route search.
//!
//! The store keeps vertices and their outgoing edges in insertion order, so
//! neighbour enumeration (and therefore the route a search discovers) is
//! deterministic for a given sequence of insertions.

mod loader;
mod store;
mod traversal;

pub use loader::{LoadReport, MalformedLinePolicy, SkippedLine};
pub use store::Graph;
pub use traversal::{find_path, find_path_within, Route};

use indexmap::IndexMap;

/// Non-negative distance carried by an edge.
pub type Weight = u32;

/// Outgoing edges of one vertex: destination name -> weight.
pub type EdgeMap = IndexMap<String, Weight>;

/// Full adjacency view: vertex name -> outgoing edges.
pub type Adjacency = IndexMap<String, EdgeMap>;
