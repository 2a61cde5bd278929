use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::parse::{classify_bytes, Record};
use crate::{GraphError, Result};

/// Dense node identifier in `[0, node_count)`. u32 halves the neighbor array
/// compared to u64 and covers any edge list that fits in memory.
pub type NodeId = u32;

/// A directed `(source, destination)` edge.
pub type EdgePair = (NodeId, NodeId);

/// Summary of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Lines that were neither an edge nor a comment/blank.
    pub skipped_records: usize,
}

/// Directed graph in Compressed Sparse Row layout.
///
/// Node `i`'s out-neighbors are `neighbors[row_offsets[i]..row_offsets[i + 1]]`,
/// sorted ascending, duplicates retained. Node ids are not remapped: the
/// graph holds every id up to the largest one seen, so unreferenced ids are
/// isolated nodes with an empty slice.
///
/// Immutable between loads. `load` replaces the whole structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    node_count: usize,
    edge_count: usize,
    row_offsets: Vec<usize>,
    neighbors: Vec<NodeId>,
}

impl CsrGraph {
    /// Empty graph: no nodes, no edges, `row_offsets == [0]`.
    pub fn new() -> Self {
        Self {
            node_count: 0,
            edge_count: 0,
            row_offsets: vec![0],
            neighbors: Vec::new(),
        }
    }

    /// Build directly from in-memory edge pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = EdgePair>,
    {
        let mut builder = CsrBuilder::default();
        for edge in edges {
            builder.push(edge);
        }
        builder.build()
    }

    /// Load an edge-list file, replacing any previous contents.
    ///
    /// If the file cannot be opened the graph is left empty and
    /// `GraphError::Open` is returned. Malformed lines are skipped.
    pub fn load(&mut self, path: &Path) -> Result<LoadStats> {
        *self = Self::new();

        let file = match File::open(path) {
            Ok(f) => f,
            Err(source) => {
                warn!(path = %path.display(), error = %source, "cannot open edge list");
                return Err(GraphError::Open {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        info!(path = %path.display(), "loading edge list");
        self.load_reader(BufReader::new(file))
    }

    /// Load from any buffered reader. Same semantics as [`CsrGraph::load`];
    /// an I/O failure mid-stream leaves the graph empty.
    pub fn load_reader<R: BufRead>(&mut self, mut reader: R) -> Result<LoadStats> {
        *self = Self::new();

        let mut builder = CsrBuilder::default();
        let mut skipped_records = 0usize;
        let mut line = Vec::new();
        let mut line_no = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_no += 1;

            match classify_bytes(&line) {
                Record::Edge(edge) => builder.push(edge),
                Record::Blank => {}
                Record::Malformed => {
                    skipped_records += 1;
                    trace!(line = line_no, "skipping malformed record");
                }
            }
        }

        *self = builder.build();

        info!(
            nodes = self.node_count,
            edges = self.edge_count,
            skipped = skipped_records,
            "load complete"
        );

        Ok(LoadStats {
            node_count: self.node_count,
            edge_count: self.edge_count,
            skipped_records,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Sorted out-neighbors of `node`. Out-of-range ids yield an empty slice.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let i = node as usize;
        if i >= self.node_count {
            return &[];
        }
        &self.neighbors[self.row_offsets[i]..self.row_offsets[i + 1]]
    }

    /// Out-degree of `node` (0 when out of range).
    pub fn degree(&self, node: NodeId) -> usize {
        let i = node as usize;
        if i >= self.node_count {
            return 0;
        }
        self.row_offsets[i + 1] - self.row_offsets[i]
    }

    /// Check if at least one edge `source -> target` exists.
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.neighbors(source).binary_search(&target).is_ok()
    }

    /// Row offset array (`node_count + 1` entries).
    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    /// Flattened neighbor array (`edge_count` entries).
    pub fn neighbor_array(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        size_of::<Self>()
            + self.row_offsets.capacity() * size_of::<usize>()
            + self.neighbors.capacity() * size_of::<NodeId>()
    }

    /// Check every CSR layout invariant.
    pub fn validate(&self) -> Result<()> {
        if self.row_offsets.len() != self.node_count + 1 {
            return Err(GraphError::InvalidCsr(format!(
                "row_offsets length {} != node_count + 1 = {}",
                self.row_offsets.len(),
                self.node_count + 1
            )));
        }

        if self.row_offsets[0] != 0 {
            return Err(GraphError::InvalidCsr(format!(
                "row_offsets[0] = {}, expected 0",
                self.row_offsets[0]
            )));
        }

        if let Some(i) = self.row_offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::InvalidCsr(format!(
                "row_offsets not monotonic at index {}",
                i
            )));
        }

        let last = self.row_offsets[self.node_count];
        if last != self.edge_count || self.neighbors.len() != self.edge_count {
            return Err(GraphError::InvalidCsr(format!(
                "row_offsets[{}] = {}, neighbors.len() = {}, edge_count = {}",
                self.node_count,
                last,
                self.neighbors.len(),
                self.edge_count
            )));
        }

        if let Some(&v) = self
            .neighbors
            .iter()
            .find(|&&v| v as usize >= self.node_count)
        {
            return Err(GraphError::InvalidCsr(format!(
                "neighbor {} >= node_count {}",
                v, self.node_count
            )));
        }

        for node in 0..self.node_count {
            let slice = self.neighbors(node as NodeId);
            if slice.windows(2).any(|w| w[0] > w[1]) {
                return Err(GraphError::InvalidCsr(format!(
                    "neighbors of node {} are not sorted",
                    node
                )));
            }
        }

        Ok(())
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient per-node adjacency lists, flattened into CSR by `build`.
#[derive(Default)]
struct CsrBuilder {
    adjacency: Vec<Vec<NodeId>>,
    max_id: Option<NodeId>,
    edge_count: usize,
}

impl CsrBuilder {
    fn push(&mut self, (source, target): EdgePair) {
        let hi = source.max(target);
        self.max_id = Some(self.max_id.map_or(hi, |m| m.max(hi)));

        let row = source as usize;
        if self.adjacency.len() <= row {
            self.adjacency.resize_with(row + 1, Vec::new);
        }
        self.adjacency[row].push(target);
        self.edge_count += 1;
    }

    fn build(self) -> CsrGraph {
        let node_count = self.max_id.map_or(0, |m| m as usize + 1);
        let mut adjacency = self.adjacency;

        let mut row_offsets = Vec::with_capacity(node_count + 1);
        let mut neighbors = Vec::with_capacity(self.edge_count);

        // Rows past the last source node are isolated: empty slices.
        for row in 0..node_count {
            row_offsets.push(neighbors.len());
            if let Some(list) = adjacency.get_mut(row) {
                list.sort_unstable();
                neighbors.extend_from_slice(list);
            }
        }
        row_offsets.push(neighbors.len());
        drop(adjacency);

        debug!(
            nodes = node_count,
            edges = neighbors.len(),
            "CSR arrays built"
        );

        CsrGraph {
            node_count,
            edge_count: self.edge_count,
            row_offsets,
            neighbors,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    fn load_str(text: &str) -> (CsrGraph, LoadStats) {
        let mut g = CsrGraph::new();
        let stats = g.load_reader(Cursor::new(text.as_bytes())).unwrap();
        (g, stats)
    }

    fn write_edge_list(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_new_graph_is_empty() {
        let g = CsrGraph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.row_offsets(), &[0]);
        assert!(g.neighbor_array().is_empty());
        assert!(g.is_empty());
        g.validate().unwrap();
    }

    #[test]
    fn test_csr_layout() {
        let (g, stats) = load_str("0 2\n0 1\n1 2\n2 0\n");
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(g.row_offsets(), &[0, 2, 3, 4]);
        assert_eq!(g.neighbor_array(), &[1, 2, 2, 0]);
        g.validate().unwrap();
    }

    #[test]
    fn test_neighbors_sorted_with_duplicates() {
        let (g, _) = load_str("5 3\n5 1\n5 3\n5 0\n");
        assert_eq!(g.neighbors(5), &[0, 1, 3, 3]);
        assert_eq!(g.degree(5), 4);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_self_loop_preserved() {
        let (g, _) = load_str("2 2\n");
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.neighbors(2), &[2]);
        assert!(g.has_edge(2, 2));
    }

    #[test]
    fn test_isolated_nodes_allocated() {
        let (g, _) = load_str("1000 3\n");
        assert_eq!(g.node_count(), 1001);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(0), 0);
        assert_eq!(g.degree(1000), 1);
        g.validate().unwrap();
    }

    #[test]
    fn test_trailing_isolated_max_node_gets_offset() {
        // Node 9 is only ever a destination: it must still have a row.
        let (g, _) = load_str("0 9\n");
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.row_offsets().len(), 11);
        assert_eq!(g.row_offsets()[9], g.edge_count());
        assert_eq!(g.row_offsets()[10], g.edge_count());
        assert!(g.neighbors(9).is_empty());
    }

    #[test]
    fn test_neighbors_out_of_range() {
        let (g, _) = load_str("0 1\n");
        assert!(g.neighbors(2).is_empty());
        assert!(g.neighbors(NodeId::MAX).is_empty());
        assert_eq!(g.degree(NodeId::MAX), 0);
        assert!(!g.has_edge(NodeId::MAX, 0));
    }

    #[test]
    fn test_has_edge() {
        let (g, _) = load_str("0 4\n0 2\n0 7\n");
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(0, 7));
        assert!(!g.has_edge(0, 3));
        assert!(!g.has_edge(2, 0));
    }

    #[test]
    fn test_degree_sum_equals_edge_count() {
        let (g, _) = load_str("0 1\n0 2\n3 1\n3 3\n7 0\n");
        let total: usize = (0..g.node_count() as NodeId).map(|i| g.degree(i)).sum();
        assert_eq!(total, g.edge_count());
    }

    #[test]
    fn test_skip_malformed_matches_clean_source() {
        let noisy = "# comment\n0 1\n\nabc def\n1 2\n-3 4\n7\n2 0 extra\n";
        let clean = "0 1\n1 2\n2 0\n";
        let (a, stats) = load_str(noisy);
        let (b, _) = load_str(clean);
        assert_eq!(a, b);
        assert_eq!(stats.skipped_records, 3);
        assert_eq!(stats.edge_count, 3);
    }

    #[test]
    fn test_empty_source() {
        let (g, stats) = load_str("");
        assert_eq!(stats, LoadStats::default());
        assert_eq!(g, CsrGraph::new());

        let (g, stats) = load_str("# only comments\n\n");
        assert_eq!(g.node_count(), 0);
        assert_eq!(stats.skipped_records, 0);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let (g, _) = load_str("0 1\n1 2");
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(1), &[2]);
    }

    #[test]
    fn test_from_edges_matches_load() {
        let (loaded, _) = load_str("3 1\n0 2\n3 0\n");
        let built = CsrGraph::from_edges(vec![(3, 1), (0, 2), (3, 0)]);
        assert_eq!(loaded, built);
    }

    #[test]
    fn test_load_file() {
        let file = write_edge_list("# SNAP style header\n0\t1\n1\t2\n");
        let mut g = CsrGraph::new();
        let stats = g.load(file.path()).unwrap();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        g.validate().unwrap();
    }

    #[test]
    fn test_reload_is_idempotent() {
        let file = write_edge_list("0 3\n0 1\n2 1\n1 0\n");
        let mut once = CsrGraph::new();
        once.load(file.path()).unwrap();

        let mut twice = CsrGraph::new();
        twice.load(file.path()).unwrap();
        twice.load(file.path()).unwrap();

        assert_eq!(once.node_count(), twice.node_count());
        assert_eq!(once.edge_count(), twice.edge_count());
        assert_eq!(once.row_offsets(), twice.row_offsets());
        assert_eq!(once.neighbor_array(), twice.neighbor_array());
    }

    #[test]
    fn test_reload_replaces_previous_graph() {
        let big = write_edge_list("0 1\n5 6\n");
        let small = write_edge_list("0 1\n");
        let mut g = CsrGraph::new();
        g.load(big.path()).unwrap();
        g.load(small.path()).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_unreadable_source_leaves_graph_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let mut g = CsrGraph::from_edges(vec![(0, 1), (1, 2)]);
        let err = g.load(&missing).unwrap_err();
        assert!(matches!(err, GraphError::Open { .. }));
        assert_eq!(g, CsrGraph::new());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_read_error_leaves_graph_empty() {
        struct FailingReader;
        impl std::io::Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        let mut g = CsrGraph::from_edges(vec![(0, 1)]);
        let err = g.load_reader(BufReader::new(FailingReader)).unwrap_err();
        assert!(matches!(err, GraphError::Read(_)));
        assert_eq!(g, CsrGraph::new());
    }

    #[test]
    fn test_validate_detects_corruption() {
        let mut g = CsrGraph::from_edges(vec![(0, 1), (0, 2)]);
        g.neighbors.swap(0, 1);
        assert!(matches!(g.validate(), Err(GraphError::InvalidCsr(_))));

        let mut g = CsrGraph::from_edges(vec![(0, 1)]);
        g.row_offsets[2] = 5;
        assert!(g.validate().is_err());

        let mut g = CsrGraph::from_edges(vec![(0, 1)]);
        g.neighbors[0] = 9;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = CsrGraph::from_edges((0..100).map(|i| (i, (i + 1) % 100)));
        assert!(g.memory_usage() >= 100 * std::mem::size_of::<NodeId>());
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CsrGraph>();
    }
}
