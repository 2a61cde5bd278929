use std::collections::VecDeque;

use crate::graph::{CsrGraph, EdgePair, NodeId};

/// Out-degree of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub degree: usize,
}

const UNVISITED: u32 = u32::MAX;

/// Node with the highest out-degree.
///
/// Scans ids in ascending order and only replaces the best on a strictly
/// greater degree, so the lowest id wins ties. Returns `None` for a graph
/// with no nodes.
pub fn max_degree_node(graph: &CsrGraph) -> Option<DegreeResult> {
    let offsets = graph.row_offsets();
    let mut best: Option<DegreeResult> = None;

    for (i, w) in offsets.windows(2).enumerate() {
        let degree = w[1] - w[0];
        if best.map_or(true, |b| degree > b.degree) {
            best = Some(DegreeResult {
                node_id: i as NodeId,
                degree,
            });
        }
    }

    best
}

/// Bounded-depth BFS returning every edge it explores.
///
/// A node at distance `d` has its out-edges explored only when
/// `d < max_depth`. Every explored edge is emitted, including edges into
/// nodes that were already visited; only first visits enqueue. Output is in
/// discovery order: grouped by dequeue order, then ascending target id
/// within a node.
///
/// An out-of-range `start` or `max_depth == 0` yields an empty result.
pub fn bounded_bfs(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Vec<EdgePair> {
    let mut edges = Vec::new();
    if start as usize >= graph.node_count() {
        return edges;
    }

    // Keep depth + 1 below the UNVISITED marker.
    let max_depth = max_depth.min(UNVISITED - 1);

    let mut distance = vec![UNVISITED; graph.node_count()];
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    distance[start as usize] = 0;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let depth = distance[current as usize];
        if depth >= max_depth {
            continue;
        }

        for &next in graph.neighbors(current) {
            edges.push((current, next));

            let seen = &mut distance[next as usize];
            if *seen == UNVISITED {
                *seen = depth + 1;
                queue.push_back(next);
            }
        }
    }

    edges
}

/// Return nodes ranked by out-degree.
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
/// degree (descending). Ties are broken by node ID (ascending).
pub fn degree_ranking(graph: &CsrGraph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = (0..graph.node_count())
        .map(|i| DegreeResult {
            node_id: i as NodeId,
            degree: graph.degree(i as NodeId),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.node_id.cmp(&b.node_id)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
