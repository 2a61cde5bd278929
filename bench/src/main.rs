use neuronet_core::{CsrGraph, EdgePair, GraphBackend, NodeId};
use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    if mode == "help" || mode == "--help" {
        println!("Usage: neuronet-bench [mode] [node_count]");
        println!("       neuronet-bench file <edge_list> [start_node]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Ring lattice + random shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!("  file        Load a real edge-list file and benchmark it");
        println!();
        println!("Default node_count: 5000000");
        return;
    }

    println!("neuronet-bench");
    println!("==============");
    println!();

    if mode == "file" {
        let Some(path) = args.get(2) else {
            eprintln!("file mode needs a path. Use --help for options.");
            return;
        };
        let start: NodeId = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);
        run_file_benchmark(Path::new(path), start);
        return;
    }

    let node_count: NodeId = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5_000_000);

    let generators: Vec<(&str, fn(NodeId) -> Vec<EdgePair>)> = match mode {
        "tree" => vec![("Branching tree", gen_tree)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world ring", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Branching tree", gen_tree as fn(NodeId) -> Vec<EdgePair>),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world ring", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        println!("--- {} ---", name);
        println!("Target: {} nodes", node_count);

        let t = Instant::now();
        let edges = generator(node_count);
        println!(
            "Generated {} edges in {:.2}s",
            edges.len(),
            t.elapsed().as_secs_f64()
        );

        let t = Instant::now();
        let graph = CsrGraph::from_edges(edges);
        report_build(&graph, t.elapsed().as_secs_f64());
        run_queries(&graph, 0);
    }
}

fn run_file_benchmark(path: &Path, start: NodeId) {
    println!("--- {} ---", path.display());

    let mut graph = CsrGraph::new();
    let t = Instant::now();
    match GraphBackend::load(&mut graph, path) {
        Ok(stats) => {
            report_build(&graph, t.elapsed().as_secs_f64());
            if stats.skipped_records > 0 {
                println!("Skipped {} malformed records", stats.skipped_records);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    }

    run_queries(&graph, start);
}

fn report_build<G: GraphBackend>(graph: &G, secs: f64) {
    println!(
        "CSR built in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        secs,
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
}

fn run_queries<G: GraphBackend>(graph: &G, start: NodeId) {
    let t = Instant::now();
    let best = graph.max_degree_node();
    let elapsed = t.elapsed();
    match best {
        Some(b) => println!(
            "Max degree: node {} (degree {}) in {:.1}ms",
            b.node_id,
            b.degree,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!("Max degree: empty graph"),
    }

    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "edges", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    let mut previous = usize::MAX;
    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let edges = graph.bounded_bfs(start, depth);
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>8.1}ms",
            depth,
            edges.len(),
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop once another hop adds nothing
        if edges.len() == previous {
            println!("{:>8} (reachable set exhausted)", "");
            break;
        }
        previous = edges.len();
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Branching tree: every node gets `branching` children, level by level.
///
/// Deep BFS frontiers that grow geometrically per hop.
fn gen_tree(node_count: NodeId) -> Vec<EdgePair> {
    let branching = 3;
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut next_id: NodeId = 1;
    let mut frontier: Vec<NodeId> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint.
/// Nodes with more edges are more likely to be picked, so a few hubs
/// dominate the max-degree query.
fn gen_scale_free(node_count: NodeId) -> Vec<EdgePair> {
    let edges_per_node: NodeId = 10;
    let mut edges: Vec<EdgePair> = Vec::with_capacity(node_count as usize * edges_per_node as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<NodeId> = Vec::with_capacity(edges.capacity() * 2);

    // Seed: small clique
    let seed: NodeId = node_count.min(5);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                edges.push((target, new_node));
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Ring lattice with each node linked to K successors, rewired with probability p.
fn gen_small_world(node_count: NodeId) -> Vec<EdgePair> {
    let k: NodeId = 10;
    let p = 0.05f64;
    let mut edges = Vec::with_capacity(node_count as usize * k as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = ((i as u64 + j as u64) % node_count as u64) as NodeId;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count as u64) as NodeId;
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: ~10 uniform random edges per node.
fn gen_random(node_count: NodeId) -> Vec<EdgePair> {
    let target_edges = node_count as usize * 10;
    let mut edges = Vec::with_capacity(target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count as u64) as NodeId;
        let to = rng.next(node_count as u64) as NodeId;
        edges.push((from, to));
    }

    edges
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a random recent "surface" node, with occasional
/// long-range jumps. Edges point from the surface outward so BFS from the
/// seed reaches the whole structure.
fn gen_dla(node_count: NodeId) -> Vec<EdgePair> {
    let mut edges = Vec::with_capacity(node_count as usize * 2);
    let mut rng = FastRng::new(77777);

    let surface_max = 10000usize;
    let mut surface: VecDeque<NodeId> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push((attach_to, new_node));

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node as u64) as NodeId;
            if other != attach_to {
                edges.push((other, new_node));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
