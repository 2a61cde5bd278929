use std::path::Path;
use std::time::Instant;

use neuronet_core::{CsrGraph, GraphBackend};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{CliError, CliResult};
use crate::state::GraphState;

/// Load an edge list and enforce the configured memory cap.
pub fn load_graph(path: &Path, settings: &Settings) -> CliResult<GraphState> {
    let start = Instant::now();

    let mut graph = CsrGraph::new();
    let stats = GraphBackend::load(&mut graph, path)?;

    let used_mb = GraphBackend::memory_usage(&graph) / (1024 * 1024);
    debug!(used_mb, max_mb = settings.max_memory_mb, "checking memory cap");
    if used_mb > settings.max_memory_mb {
        return Err(CliError::MemoryLimit {
            used_mb,
            max_mb: settings.max_memory_mb,
        });
    }

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        path = %path.display(),
        nodes = stats.node_count,
        edges = stats.edge_count,
        load_time_ms,
        "graph ready"
    );

    Ok(GraphState {
        graph,
        source: path.to_path_buf(),
        stats,
        load_time_ms,
    })
}
