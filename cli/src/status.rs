use std::fmt;

use serde::Serialize;

use crate::state::GraphState;

/// Size and load summary of a graph.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub source: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub skipped_records: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
}

impl StatsReport {
    pub fn from_state(gs: &GraphState) -> Self {
        Self {
            source: gs.source.display().to_string(),
            node_count: gs.graph.node_count(),
            edge_count: gs.graph.edge_count(),
            skipped_records: gs.stats.skipped_records,
            memory_bytes: gs.graph.memory_usage(),
            load_time_ms: gs.load_time_ms,
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source: {}", self.source)?;
        write!(
            f,
            "nodes: {} | edges: {} | skipped: {} | memory: {:.1}MB | load: {:.1}ms",
            self.node_count,
            self.edge_count,
            self.skipped_records,
            self.memory_bytes as f64 / 1_048_576.0,
            self.load_time_ms
        )
    }
}
