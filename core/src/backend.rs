use std::path::Path;

use crate::graph::{CsrGraph, EdgePair, LoadStats, NodeId};
use crate::traversal::{self, DegreeResult};
use crate::Result;

/// Capabilities every graph storage backend provides.
///
/// Callers written against this trait are independent of the storage layout.
/// `CsrGraph` is the only implementation; use it through generics
/// (`fn f<G: GraphBackend>(g: &G)`) rather than trait objects.
pub trait GraphBackend {
    /// Replace the graph with the contents of an edge-list file.
    ///
    /// On error the backend is left empty.
    fn load(&mut self, path: &Path) -> Result<LoadStats>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Node with the largest out-degree, lowest id on ties. `None` when the
    /// graph has no nodes.
    fn max_degree_node(&self) -> Option<DegreeResult>;

    /// Every edge explored by a BFS from `start` that expands nodes closer
    /// than `max_depth` hops, in discovery order.
    fn bounded_bfs(&self, start: NodeId, max_depth: u32) -> Vec<EdgePair>;

    /// Sorted out-neighbors of `node`, duplicates kept. Empty when out of range.
    fn neighbors_of(&self, node: NodeId) -> &[NodeId];

    /// Nodes by descending out-degree, ascending id on ties. `top_n == 0`
    /// returns every node.
    fn degree_ranking(&self, top_n: usize) -> Vec<DegreeResult>;

    /// Approximate heap bytes held by the loaded structure.
    fn memory_usage(&self) -> usize;
}

impl GraphBackend for CsrGraph {
    fn load(&mut self, path: &Path) -> Result<LoadStats> {
        CsrGraph::load(self, path)
    }

    fn node_count(&self) -> usize {
        CsrGraph::node_count(self)
    }

    fn edge_count(&self) -> usize {
        CsrGraph::edge_count(self)
    }

    fn max_degree_node(&self) -> Option<DegreeResult> {
        traversal::max_degree_node(self)
    }

    fn bounded_bfs(&self, start: NodeId, max_depth: u32) -> Vec<EdgePair> {
        traversal::bounded_bfs(self, start, max_depth)
    }

    fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        CsrGraph::neighbors(self, node)
    }

    fn degree_ranking(&self, top_n: usize) -> Vec<DegreeResult> {
        traversal::degree_ranking(self, top_n)
    }

    fn memory_usage(&self) -> usize {
        CsrGraph::memory_usage(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    /// Exercise a backend purely through the trait.
    fn summarize<G: GraphBackend>(graph: &G) -> (usize, usize, Option<DegreeResult>) {
        (graph.node_count(), graph.edge_count(), graph.max_degree_node())
    }

    #[test]
    fn test_contract_over_csr() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1\n0 2\n1 3").unwrap();

        let mut g = CsrGraph::new();
        let stats = GraphBackend::load(&mut g, file.path()).unwrap();
        assert_eq!(stats.edge_count, 3);

        let (nodes, edges, max) = summarize(&g);
        assert_eq!(nodes, 4);
        assert_eq!(edges, 3);
        assert_eq!(max, Some(DegreeResult { node_id: 0, degree: 2 }));

        assert_eq!(
            GraphBackend::bounded_bfs(&g, 0, 1),
            vec![(0, 1), (0, 2)]
        );
    }

    #[test]
    fn test_contract_empty_backend() {
        let g = CsrGraph::default();
        assert_eq!(summarize(&g), (0, 0, None));
        assert!(GraphBackend::bounded_bfs(&g, 0, 5).is_empty());
        assert!(g.neighbors_of(0).is_empty());
        assert!(GraphBackend::degree_ranking(&g, 0).is_empty());
    }

    #[test]
    fn test_contract_neighbors_and_ranking() {
        let g = CsrGraph::from_edges(vec![(2, 0), (0, 3), (0, 1), (0, 3)]);
        assert_eq!(g.neighbors_of(0), &[1, 3, 3]);
        assert!(g.neighbors_of(9).is_empty());

        let top = GraphBackend::degree_ranking(&g, 2);
        assert_eq!(
            top,
            vec![
                DegreeResult { node_id: 0, degree: 3 },
                DegreeResult { node_id: 2, degree: 1 },
            ]
        );
        assert_eq!(GraphBackend::memory_usage(&g), CsrGraph::memory_usage(&g));
    }

    #[test]
    fn test_contract_failed_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut g = CsrGraph::from_edges(vec![(0, 1)]);
        assert!(GraphBackend::load(&mut g, &dir.path().join("nope")).is_err());
        assert_eq!(summarize(&g), (0, 0, None));
    }
}
