//! neuronet-core: Compressed sparse row graph engine.
//!
//! Loads a directed graph from a plain edge-list file into a CSR layout
//! (`row_offsets` + flattened, per-node sorted `neighbors`) and answers
//! read-only queries over it: maximum out-degree and bounded-depth BFS
//! edge enumeration.
//!
//! The structure is built once per load and never mutated by queries, so a
//! loaded graph can be shared across threads for concurrent reads.

use std::path::PathBuf;

mod backend;
mod graph;
mod parse;
mod traversal;

pub use backend::GraphBackend;
pub use graph::{CsrGraph, EdgePair, LoadStats, NodeId};
pub use parse::parse_edge_line;
pub use traversal::{bounded_bfs, degree_ranking, max_degree_node, DegreeResult};

/// Graph engine error types.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The edge-list source could not be opened.
    #[error("cannot open edge list {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source failed part-way through reading.
    #[error("error reading edge list: {0}")]
    Read(#[from] std::io::Error),

    /// CSR arrays violate a layout invariant.
    #[error("invalid CSR layout: {0}")]
    InvalidCsr(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
