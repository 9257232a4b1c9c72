//! In-memory undirected PPI graph backed by petgraph::StableUnGraph.
//!
//! Stable indices keep the id index valid across the removal-heavy pruning
//! phases; nodes and edges are only ever removed after construction, never
//! re-added.

use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::config::AttrValue;
use crate::graph::edge_table::EdgeRecord;

/// Node payload: gene identifier plus labelled attributes.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: String,
    pub attributes: BTreeMap<String, AttrValue>,
}

/// Edge payload: interaction-source attributes plus the derived
/// database-support count.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub support: u32,
    pub attributes: BTreeMap<String, AttrValue>,
}

impl EdgeData {
    pub fn from_record(record: &EdgeRecord) -> Self {
        Self {
            support: record.support,
            attributes: record.attributes.clone(),
        }
    }
}

/// Wrapper around petgraph::StableUnGraph with string-id node access.
pub struct PpiNetwork {
    graph: StableUnGraph<NodeData, EdgeData>,
    /// O(1) gene id → NodeIndex lookup.
    id_index: HashMap<String, NodeIndex>,
}

impl PpiNetwork {
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            id_index: HashMap::new(),
        }
    }

    /// Build a network from edge-table rows. Nodes enter the graph only as
    /// edge endpoints.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a EdgeRecord>,
    {
        let mut net = Self::new();
        for row in rows {
            net.add_interaction(&row.source, &row.target, EdgeData::from_record(row));
        }
        net
    }

    /// Get or create a node by gene id.
    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(NodeData {
                id: id.to_string(),
                attributes: BTreeMap::new(),
            });
            self.id_index.insert(id.to_string(), idx);
            idx
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add an undirected interaction, creating endpoints as needed. A second
    /// row for the same pair replaces the stored edge data.
    pub fn add_interaction(&mut self, a: &str, b: &str, data: EdgeData) {
        let a_idx = self.ensure_node(a);
        let b_idx = self.ensure_node(b);
        if let Some(edge) = self.graph.find_edge(a_idx, b_idx) {
            self.graph[edge] = data;
        } else {
            self.graph.add_edge(a_idx, b_idx, data);
        }
    }

    /// Set a labelled attribute on a node. Returns false when the gene is not
    /// part of the network (callers skip unknown genes silently).
    pub fn set_attr(&mut self, id: &str, label: &str, value: AttrValue) -> bool {
        debug_assert!(!label.is_empty());
        match self.id_index.get(id) {
            Some(&idx) => {
                self.graph[idx].attributes.insert(label.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn get_attr(&self, id: &str, label: &str) -> Option<&AttrValue> {
        let idx = self.id_index.get(id)?;
        self.graph[*idx].attributes.get(label)
    }

    pub fn node_attributes(&self, id: &str) -> Option<&BTreeMap<String, AttrValue>> {
        let idx = self.id_index.get(id)?;
        Some(&self.graph[*idx].attributes)
    }

    /// All gene ids carrying the given label, in arbitrary order.
    pub fn nodes_with_label(&self, label: &str) -> Vec<String> {
        self.graph
            .node_weights()
            .filter(|n| n.attributes.contains_key(label))
            .map(|n| n.id.clone())
            .collect()
    }

    /// All gene ids, sorted for deterministic iteration.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.graph.node_weights().map(|n| n.id.clone()).collect();
        ids.sort();
        ids
    }

    pub fn degree(&self, id: &str) -> usize {
        match self.id_index.get(id) {
            Some(&idx) => self.graph.edges(idx).count(),
            None => 0,
        }
    }

    pub fn neighbors(&self, id: &str) -> Vec<String> {
        match self.id_index.get(id) {
            Some(&idx) => self
                .graph
                .neighbors(idx)
                .map(|n| self.graph[n].id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        match self.id_index.remove(id) {
            Some(idx) => {
                self.graph.remove_node(idx);
                true
            }
            None => false,
        }
    }

    pub fn remove_edge_between(&mut self, a: &str, b: &str) -> bool {
        let (Some(&a_idx), Some(&b_idx)) = (self.id_index.get(a), self.id_index.get(b)) else {
            return false;
        };
        match self.graph.find_edge(a_idx, b_idx) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Gene ids with zero incident edges.
    pub fn isolates(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.edges(idx).next().is_none())
            .map(|idx| self.graph[idx].id.clone())
            .collect()
    }

    /// Remove every isolated node; returns how many were dropped.
    pub fn remove_isolates(&mut self) -> usize {
        let isolates = self.isolates();
        for id in &isolates {
            self.remove_node(id);
        }
        isolates.len()
    }

    /// Every edge as (source id, target id, data), in arbitrary order.
    pub fn edges(&self) -> Vec<(String, String, &EdgeData)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].id.clone(),
                    self.graph[e.target()].id.clone(),
                    e.weight(),
                )
            })
            .collect()
    }
}

impl Default for PpiNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_edge() -> EdgeData {
        EdgeData {
            support: 1,
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn add_interaction_creates_endpoints() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        assert!(net.has_node("A"));
        assert!(net.has_node("B"));
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn duplicate_interaction_replaces_edge() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        net.add_interaction(
            "B",
            "A",
            EdgeData {
                support: 3,
                attributes: BTreeMap::new(),
            },
        );
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.edges()[0].2.support, 3);
    }

    #[test]
    fn attrs_skip_unknown_genes() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        assert!(net.set_attr("A", "candidate", AttrValue::Int(1)));
        assert!(!net.set_attr("Z", "candidate", AttrValue::Int(1)));
        assert_eq!(net.nodes_with_label("candidate"), vec!["A".to_string()]);
    }

    #[test]
    fn node_carries_multiple_labels() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        net.set_attr("A", "candidate", AttrValue::Int(1));
        net.set_attr("A", "utr", AttrValue::Text("3p".into()));
        assert!(net.get_attr("A", "candidate").is_some());
        assert_eq!(
            net.get_attr("A", "utr"),
            Some(&AttrValue::Text("3p".into()))
        );
    }

    #[test]
    fn degree_and_neighbors() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        net.add_interaction("A", "C", plain_edge());
        assert_eq!(net.degree("A"), 2);
        assert_eq!(net.degree("B"), 1);
        assert_eq!(net.degree("missing"), 0);
        let mut nbrs = net.neighbors("A");
        nbrs.sort();
        assert_eq!(nbrs, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        net.add_interaction("A", "C", plain_edge());
        assert!(net.remove_node("A"));
        assert_eq!(net.edge_count(), 0);
        assert!(!net.has_node("A"));
        // B and C are now isolates but still present
        assert_eq!(net.node_count(), 2);
    }

    #[test]
    fn isolate_removal() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        net.add_interaction("C", "D", plain_edge());
        net.remove_edge_between("C", "D");
        let mut isolates = net.isolates();
        isolates.sort();
        assert_eq!(isolates, vec!["C".to_string(), "D".to_string()]);
        assert_eq!(net.remove_isolates(), 2);
        assert_eq!(net.node_count(), 2);
    }

    #[test]
    fn id_index_survives_removals() {
        // StableGraph: indices of surviving nodes stay valid after removals.
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", plain_edge());
        net.add_interaction("C", "D", plain_edge());
        net.add_interaction("E", "F", plain_edge());
        net.remove_node("A");
        net.remove_node("C");
        assert_eq!(net.degree("E"), 1);
        assert_eq!(net.neighbors("F"), vec!["E".to_string()]);
    }
}
