use std::fmt;
use std::time::Instant;

use neuronet_core::{GraphBackend, NodeId};
use serde::Serialize;

/// The max-degree node, or nulls for an empty graph.
#[derive(Debug, Serialize)]
pub struct MaxDegreeReport {
    pub node_id: Option<NodeId>,
    pub degree: Option<usize>,
    pub elapsed_ms: f64,
}

impl MaxDegreeReport {
    pub fn compute<G: GraphBackend>(graph: &G) -> Self {
        let t = Instant::now();
        let best = graph.max_degree_node();
        let elapsed_ms = t.elapsed().as_secs_f64() * 1000.0;
        Self {
            node_id: best.map(|b| b.node_id),
            degree: best.map(|b| b.degree),
            elapsed_ms,
        }
    }
}

impl fmt::Display for MaxDegreeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.node_id, self.degree) {
            (Some(node), Some(degree)) => write!(f, "node {} (degree {})", node, degree)?,
            _ => write!(f, "no nodes (empty graph)")?,
        }
        write!(f, " in {:.3}ms", self.elapsed_ms)
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DegreeEntry {
    pub node_id: NodeId,
    pub out_degree: usize,
}

/// Nodes ranked by out-degree.
#[derive(Debug, Serialize)]
pub struct DegreeRankingReport {
    pub nodes: Vec<DegreeEntry>,
}

impl DegreeRankingReport {
    pub fn compute<G: GraphBackend>(graph: &G, top_n: usize) -> Self {
        let nodes = graph
            .degree_ranking(top_n)
            .into_iter()
            .map(|dr| DegreeEntry {
                node_id: dr.node_id,
                out_degree: dr.degree,
            })
            .collect();
        Self { nodes }
    }
}

impl fmt::Display for DegreeRankingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10} {:>10}", "node", "degree")?;
        for entry in &self.nodes {
            write!(f, "\n{:>10} {:>10}", entry.node_id, entry.out_degree)?;
        }
        Ok(())
    }
}
