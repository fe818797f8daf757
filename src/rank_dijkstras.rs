//dijkstra shortest path over the rank graph
use crate::priority_queue::MinQueue;
use crate::rank_graph::RankGraph;
use log::debug;
use std::collections::HashMap;

/// Result of a shortest path search.
///
/// `path` runs from start to end inclusive. An unreachable end leaves
/// `total_cost` infinite and `path` empty; start == end is the single-node
/// path at cost zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub total_cost: f64,
    pub path: Vec<String>,
}

impl ShortestPath {
    fn unreachable() -> Self {
        Self {
            total_cost: f64::INFINITY,
            path: Vec::new(),
        }
    }
}

/// Minimum-fare path between two rank ids.
///
/// Plain dijkstra with early exit: edge weights are fares and never
/// negative, so the search can stop as soon as the end rank is settled, or
/// as soon as the cheapest queued rank is still at infinity (nothing further
/// is reachable). Relaxation re-keys the queue entry so each rank keeps a
/// single live entry at its best known cost.
pub fn shortest_path(graph: &RankGraph, start: &str, end: &str) -> ShortestPath {
    let mut dist: HashMap<String, f64> = HashMap::new();
    let mut prev: HashMap<String, Option<String>> = HashMap::new();
    let mut queue = MinQueue::new();

    for node in graph.nodes() {
        let initial = if node == start { 0.0 } else { f64::INFINITY };
        dist.insert(node.clone(), initial);
        prev.insert(node.clone(), None);
        queue.push(node.clone(), initial);
    }

    while let Some((current, cost)) = queue.pop() {
        if cost.is_infinite() {
            //cheapest unsettled rank is unreachable, so is everything behind it
            break;
        }
        if current == end {
            break;
        }

        if let Some(neighbors) = graph.neighbors(&current) {
            for (next, weight) in neighbors {
                let candidate = cost + weight;
                let known = *dist.get(next).unwrap_or(&f64::INFINITY);
                if candidate < known {
                    dist.insert(next.clone(), candidate);
                    prev.insert(next.clone(), Some(current.clone()));
                    queue.push(next.clone(), candidate);
                }
            }
        }
    }

    let total_cost = *dist.get(end).unwrap_or(&f64::INFINITY);
    if total_cost.is_infinite() {
        debug!("no path from rank {start} to rank {end}");
        return ShortestPath::unreachable();
    }

    //walk predecessors back from the end, then flip
    let mut path = vec![end.to_owned()];
    let mut walk = prev.get(end).and_then(|p| p.clone());
    while let Some(node) = walk {
        walk = prev.get(&node).and_then(|p| p.clone());
        path.push(node);
    }
    path.reverse();

    ShortestPath { total_cost, path }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str, f64)]) -> RankGraph {
        let mut graph = RankGraph::new();
        for (a, b, w) in edges {
            graph.add_edge(a, b, *w);
        }
        graph
    }

    #[test]
    fn trivial_path_is_single_node_at_zero() {
        let mut graph = RankGraph::new();
        graph.add_node("3");
        let found = shortest_path(&graph, "3", "3");
        assert_eq!(found.total_cost, 0.0);
        assert_eq!(found.path, ["3".to_string()]);
    }

    #[test]
    fn disconnected_end_is_unreachable() {
        let graph = graph(&[("1", "2", 4.0), ("3", "4", 6.0)]);
        let found = shortest_path(&graph, "1", "4");
        assert!(found.total_cost.is_infinite());
        assert!(found.path.is_empty());
    }

    #[test]
    fn unknown_endpoints_are_unreachable() {
        let graph = graph(&[("1", "2", 4.0)]);
        assert!(shortest_path(&graph, "1", "99").path.is_empty());
        assert!(shortest_path(&graph, "99", "1").path.is_empty());
    }

    #[test]
    fn path_cost_matches_summed_edges() {
        let graph = graph(&[("1", "2", 4.0), ("2", "3", 6.5), ("1", "3", 100.0)]);
        let found = shortest_path(&graph, "1", "3");
        assert_eq!(found.path, ["1", "2", "3"]);
        assert_eq!(found.total_cost, 10.5);
    }
}
