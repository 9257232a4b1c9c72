//! Node selection: label application, set resolution and edge-restricted
//! subgraph extraction.

use std::collections::BTreeSet;

use crate::graph::edge_table::EdgeTable;
use crate::graph::network::{EdgeData, PpiNetwork};
use crate::phases::gene_sets::GeneSet;

/// Attach each gene set to the network as a node attribute under the set's
/// label. Genes absent from the network are skipped silently; returns how
/// many assignments landed.
pub fn apply_labels(net: &mut PpiNetwork, sets: &[GeneSet]) -> usize {
    let mut applied = 0;
    for set in sets {
        for (gene, value) in &set.members {
            if net.set_attr(gene, &set.label, value.clone()) {
                applied += 1;
            }
        }
    }
    applied
}

/// Union of all nodes carrying any of the given labels. Pure lookup over the
/// network's attributes; no shared scratch state between calls.
pub fn resolve(net: &PpiNetwork, labels: &[String]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for label in labels {
        out.extend(net.nodes_with_label(label));
    }
    out
}

/// Build the initial working subgraph: exactly those table rows where both
/// endpoints are members of the node set. Selected genes with no qualifying
/// edge never enter the graph.
pub fn extract_subgraph(table: &EdgeTable, node_set: &BTreeSet<String>) -> PpiNetwork {
    let mut net = PpiNetwork::new();
    for row in table.rows() {
        if node_set.contains(&row.source) && node_set.contains(&row.target) {
            net.add_interaction(&row.source, &row.target, EdgeData::from_record(row));
        }
    }
    net
}
