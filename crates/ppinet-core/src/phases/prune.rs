//! Threshold pruning: edge support, maximum degree, minimum degree.
//!
//! Filters run in that fixed order, each against the graph state the
//! previous filter left behind, and each ends with isolate removal. The
//! minimum-degree filter repeats until no remaining node is below the
//! threshold.

use crate::graph::network::PpiNetwork;

/// Optional pruning thresholds; an absent threshold skips its step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneThresholds {
    pub min_edge_support: Option<u32>,
    pub min_degree: Option<usize>,
    pub max_degree: Option<usize>,
}

/// Apply all configured filters in place.
pub fn prune(net: &mut PpiNetwork, thresholds: &PruneThresholds) {
    if let Some(min_support) = thresholds.min_edge_support {
        drop_weak_edges(net, min_support);
        net.remove_isolates();
    }
    if let Some(max_degree) = thresholds.max_degree {
        // removing the node drops its incident edges implicitly; no
        // separate edge pass
        drop_hub_nodes(net, max_degree);
        net.remove_isolates();
    }
    if let Some(min_degree) = thresholds.min_degree {
        // removing a sparse node can push a neighbour below the threshold,
        // so this step sweeps until the graph is stable
        loop {
            let removed = drop_sparse_nodes(net, min_degree);
            net.remove_isolates();
            if removed == 0 {
                break;
            }
        }
    }
}

/// Remove every edge whose support count is strictly below the threshold.
fn drop_weak_edges(net: &mut PpiNetwork, min_support: u32) {
    let weak: Vec<(String, String)> = net
        .edges()
        .into_iter()
        .filter(|(_, _, data)| data.support < min_support)
        .map(|(a, b, _)| (a, b))
        .collect();
    for (a, b) in weak {
        net.remove_edge_between(&a, &b);
    }
}

/// Remove every node whose degree is strictly above the threshold,
/// evaluated against a snapshot of current degrees.
fn drop_hub_nodes(net: &mut PpiNetwork, max_degree: usize) {
    let hubs: Vec<String> = net
        .node_ids()
        .into_iter()
        .filter(|id| net.degree(id) > max_degree)
        .collect();
    for id in hubs {
        net.remove_node(&id);
    }
}

/// Remove every node whose degree is strictly below the threshold,
/// evaluated against a snapshot of current degrees. Returns the number of
/// nodes removed so the caller can detect a cascade.
fn drop_sparse_nodes(net: &mut PpiNetwork, min_degree: usize) -> usize {
    let sparse: Vec<String> = net
        .node_ids()
        .into_iter()
        .filter(|id| net.degree(id) < min_degree)
        .collect();
    let removed = sparse.len();
    for id in sparse {
        net.remove_node(&id);
    }
    removed
}
