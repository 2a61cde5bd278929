use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use neuronet_core::{EdgePair, GraphBackend, NodeId};
use serde::Serialize;

use crate::util::{depth_from_signed, node_from_signed};

/// Edges explored by a bounded BFS.
#[derive(Debug, Serialize)]
pub struct BfsReport {
    pub start: i64,
    pub max_depth: i64,
    pub edges: Vec<EdgePair>,
    /// Distinct nodes visited, the start node included when it exists.
    pub nodes_reached: usize,
    pub elapsed_ms: f64,
}

impl BfsReport {
    /// Run the traversal. Negative or out-of-range starts give an empty
    /// edge list, a negative depth behaves like depth 0.
    pub fn compute<G: GraphBackend>(graph: &G, start: i64, max_depth: i64) -> Self {
        let start_node = node_from_signed(start).filter(|&n| (n as usize) < graph.node_count());

        let t = Instant::now();
        let edges = match start_node {
            Some(node) => graph.bounded_bfs(node, depth_from_signed(max_depth)),
            None => Vec::new(),
        };
        let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;

        let nodes_reached = start_node
            .into_iter()
            .chain(edges.iter().flat_map(|&(u, v)| [u, v]))
            .collect::<HashSet<NodeId>>()
            .len();

        Self {
            start,
            max_depth,
            edges,
            nodes_reached,
            elapsed_ms,
        }
    }
}

impl fmt::Display for BfsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bfs from {} (depth {}): {} edges, {} nodes in {:.3}ms",
            self.start,
            self.max_depth,
            self.edges.len(),
            self.nodes_reached,
            self.elapsed_ms
        )?;
        for (u, v) in &self.edges {
            write!(f, "\n{} -> {}", u, v)?;
        }
        Ok(())
    }
}

/// Sorted out-neighbors of one node.
#[derive(Debug, Serialize)]
pub struct NeighborsReport {
    pub node: i64,
    pub neighbors: Vec<NodeId>,
}

impl NeighborsReport {
    pub fn compute<G: GraphBackend>(graph: &G, node: i64) -> Self {
        let neighbors = node_from_signed(node)
            .map(|n| graph.neighbors_of(n).to_vec())
            .unwrap_or_default();
        Self { node, neighbors }
    }
}

impl fmt::Display for NeighborsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.neighbors.iter().map(|n| n.to_string()).collect();
        write!(
            f,
            "node {} ({} out-neighbors): [{}]",
            self.node,
            self.neighbors.len(),
            ids.join(", ")
        )
    }
}
