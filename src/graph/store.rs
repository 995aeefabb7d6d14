//! In-memory weighted directed graph keyed by location name.

use serde::Serialize;

use super::{Adjacency, EdgeMap, Weight};
use crate::{PathfinderError, Result};

/// Weighted directed graph of named locations.
///
/// Every vertex named as an edge destination also owns an entry, so
/// [`Graph::vertices`] enumerates leaf locations too. The structure is only
/// mutated through [`Graph::add_vertex`], [`Graph::add_edge`] and
/// [`Graph::connect`]; consumers get read-only views.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Graph {
    adjacency: Adjacency,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex with no outgoing edges.
    ///
    /// Re-adding an existing name clears its outgoing edges. Edges pointing
    /// into it from other vertices are kept, as is its enumeration position.
    pub fn add_vertex(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.adjacency.insert(name.clone(), EdgeMap::new()).is_some() {
            log::debug!("Vertex {} re-added, outgoing edges cleared", name);
        } else {
            log::debug!("Vertex {} added", name);
        }
    }

    /// Insert or overwrite the directed edge `src -> dest`.
    ///
    /// `src` must already be a vertex. `dest` gets an empty entry of its own
    /// when it is not one yet; an existing `dest` keeps its edges.
    pub fn add_edge(&mut self, src: &str, dest: &str, weight: Weight) -> Result<()> {
        let edges = self
            .adjacency
            .get_mut(src)
            .ok_or_else(|| PathfinderError::UnknownVertex(src.to_string()))?;
        if let Some(previous) = edges.insert(dest.to_string(), weight) {
            log::debug!("Edge {} -> {} reweighted {} -> {}", src, dest, previous, weight);
        } else {
            log::debug!("Edge {} -> {} added ({})", src, dest, weight);
        }

        if !self.adjacency.contains_key(dest) {
            self.adjacency.insert(dest.to_string(), EdgeMap::new());
        }
        Ok(())
    }

    /// Join two existing vertices in both directions with the same weight.
    pub fn connect(&mut self, a: &str, b: &str, weight: Weight) -> Result<()> {
        if a == b {
            return Err(PathfinderError::InvalidInput(
                "Source and destination cannot be the same".to_string(),
            ));
        }
        for name in [a, b] {
            if !self.contains_vertex(name) {
                return Err(PathfinderError::UnknownVertex(name.to_string()));
            }
        }
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Weight of `src -> dest`, or `None` when there is no such edge
    /// (including when `src` was never added).
    pub fn weight(&self, src: &str, dest: &str) -> Option<Weight> {
        self.adjacency.get(src)?.get(dest).copied()
    }

    /// Destinations one edge away from `src`, in insertion order.
    /// Unknown vertices have no neighbours.
    pub fn neighbours<'a>(&'a self, src: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.adjacency
            .get(src)
            .into_iter()
            .flat_map(|edges| edges.keys().map(String::as_str))
    }

    /// Outgoing edges of `src`, if it is a vertex
    pub fn edges(&self, src: &str) -> Option<&EdgeMap> {
        self.adjacency.get(src)
    }

    /// Read-only view of the whole structure
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Vertex names in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(EdgeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
