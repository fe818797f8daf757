//undirected weighted graph over taxi rank ids, built fresh per request
use std::collections::HashMap;

/// Graph of taxi ranks where edge weights are route fares.
///
/// Nodes are rank ids as strings (ids are canonicalized to strings at the
/// corpus boundary and never mixed with numeric keys in here). Every edge is
/// mirrored in both directions, and repeated inserts of the same pair
/// overwrite the prior weight.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RankGraph {
    edges: HashMap<String, HashMap<String, f64>>, // tail id, <head id, fare>
}

impl RankGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if absent; a no-op for known ids.
    pub fn add_node(&mut self, id: &str) {
        self.edges.entry(id.to_owned()).or_default();
    }

    /// Insert the undirected edge (a, b) at `weight`, creating both nodes
    /// as needed. Last write wins for a repeated pair.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) {
        self.edges
            .entry(a.to_owned())
            .or_default()
            .insert(b.to_owned(), weight);
        self.edges
            .entry(b.to_owned())
            .or_default()
            .insert(a.to_owned(), weight);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &String> {
        self.edges.keys()
    }

    pub fn neighbors(&self, id: &str) -> Option<&HashMap<String, f64>> {
        self.edges.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_mirrored() {
        let mut graph = RankGraph::new();
        graph.add_edge("1", "2", 14.5);
        assert_eq!(graph.neighbors("1").unwrap().get("2"), Some(&14.5));
        assert_eq!(graph.neighbors("2").unwrap().get("1"), Some(&14.5));
    }

    #[test]
    fn repeated_edge_overwrites_weight() {
        let mut graph = RankGraph::new();
        graph.add_edge("1", "2", 10.0);
        graph.add_edge("1", "2", 25.0);
        assert_eq!(graph.neighbors("1").unwrap().get("2"), Some(&25.0));
        assert_eq!(graph.neighbors("2").unwrap().get("1"), Some(&25.0));
        assert_eq!(graph.neighbors("1").unwrap().len(), 1);
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = RankGraph::new();
        graph.add_node("7");
        graph.add_edge("7", "8", 5.0);
        graph.add_node("7");
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.neighbors("7").unwrap().get("8"), Some(&5.0));
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let graph = RankGraph::new();
        assert!(graph.neighbors("9").is_none());
        assert!(!graph.contains("9"));
    }
}
