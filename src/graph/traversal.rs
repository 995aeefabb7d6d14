//! Backtracking depth-first route search.
//!
//! The search returns the first route it reaches, trying neighbours in the
//! store's insertion order. It is not a shortest-path solver: a vertex is
//! only blocked while it sits on the current path, and is released again
//! when the search backtracks past it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use super::Graph;

/// A route discovered between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Source to destination inclusive, no vertex repeated.
    pub vertices: Vec<String>,
    /// Sum of edge weights along `vertices`.
    pub total_distance: u64,
}

impl Route {
    fn from_vertices(graph: &Graph, vertices: Vec<String>) -> Self {
        let total_distance = vertices
            .windows(2)
            .filter_map(|pair| graph.weight(&pair[0], &pair[1]))
            .map(u64::from)
            .sum();
        Self {
            vertices,
            total_distance,
        }
    }

    pub fn source(&self) -> &str {
        &self.vertices[0]
    }

    pub fn destination(&self) -> &str {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges travelled
    pub fn hops(&self) -> usize {
        self.vertices.len() - 1
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices.join(" -> "))
    }
}

/// One vertex on the current path and the index of the next neighbour to try.
struct Frame<'g> {
    vertex: &'g str,
    next: usize,
}

/// Find the first depth-first route from `source` to `destination`.
///
/// Returns `None` when either endpoint is not a vertex or the destination
/// is unreachable. `source == destination` yields the one-vertex route.
pub fn find_path(graph: &Graph, source: &str, destination: &str) -> Option<Route> {
    find_path_within(graph, source, destination, None)
}

/// Like [`find_path`], but never expands a path beyond `max_depth` edges.
pub fn find_path_within(
    graph: &Graph,
    source: &str,
    destination: &str,
    max_depth: Option<usize>,
) -> Option<Route> {
    let (source, _) = graph.adjacency().get_key_value(source)?;
    let (destination, _) = graph.adjacency().get_key_value(destination)?;
    let source = source.as_str();
    let destination = destination.as_str();

    let mut on_path: HashSet<&str> = HashSet::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut stack = vec![Frame {
        vertex: source,
        next: 0,
    }];
    on_path.insert(source);

    let mut found = false;
    loop {
        let depth = stack.len();
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let current = frame.vertex;
        if current == destination {
            found = true;
            break;
        }

        let depth_exhausted = max_depth.map_or(false, |max| depth > max);
        let next = if depth_exhausted {
            None
        } else {
            graph
                .edges(current)
                .and_then(|edges| edges.get_index(frame.next))
                .map(|(name, _)| name.as_str())
        };

        match next {
            Some(neighbour) => {
                frame.next += 1;
                if on_path.insert(neighbour) {
                    parents.insert(neighbour, current);
                    stack.push(Frame {
                        vertex: neighbour,
                        next: 0,
                    });
                }
            }
            None => {
                // Subtree exhausted: release the vertex and forget how we got here.
                stack.pop();
                on_path.remove(current);
                parents.remove(current);
            }
        }
    }

    if !found {
        log::debug!("No route from {} to {}", source, destination);
        return None;
    }

    let mut vertices = vec![destination.to_string()];
    let mut current = destination;
    while current != source {
        current = *parents.get(current)?;
        vertices.push(current.to_string());
    }
    vertices.reverse();

    let route = Route::from_vertices(graph, vertices);
    log::debug!("Route {} ({} hops, distance {})", route, route.hops(), route.total_distance);
    Some(route)
}
