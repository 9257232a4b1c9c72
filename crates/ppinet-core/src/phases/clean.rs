//! Post-hoc intermediate cleanup: connectors must bridge at least two
//! candidate genes, and never each other.

use std::collections::BTreeSet;

use crate::graph::network::PpiNetwork;
use crate::phases::select::resolve;

/// Remove intermediates with fewer than two candidate neighbours, then
/// remove every remaining connector-to-connector edge. Isolates are dropped
/// after each removal wave.
pub fn clean(net: &mut PpiNetwork, candidate_labels: &[String], annotation_labels: &[String]) {
    let candidates = resolve(net, candidate_labels);
    let intermediates = intermediate_set(net, &candidates, annotation_labels);

    let weak: Vec<String> = intermediates
        .iter()
        .filter(|id| !bridges_candidates(net, id, &candidates))
        .cloned()
        .collect();
    for id in weak {
        net.remove_node(&id);
    }
    net.remove_isolates();

    // recompute on the reduced graph before the edge pass
    let candidates = resolve(net, candidate_labels);
    let intermediates = intermediate_set(net, &candidates, annotation_labels);
    let mut between: Vec<(String, String)> = Vec::new();
    for (a, b, _) in net.edges() {
        if intermediates.contains(&a) && intermediates.contains(&b) {
            between.push((a, b));
        }
    }
    for (a, b) in between {
        net.remove_edge_between(&a, &b);
    }
    net.remove_isolates();
}

/// Intermediates = annotation-labelled nodes that are not candidates.
fn intermediate_set(
    net: &PpiNetwork,
    candidates: &BTreeSet<String>,
    annotation_labels: &[String],
) -> BTreeSet<String> {
    resolve(net, annotation_labels)
        .into_iter()
        .filter(|id| !candidates.contains(id))
        .collect()
}

/// True once two candidate neighbours are found; stops counting early.
fn bridges_candidates(net: &PpiNetwork, id: &str, candidates: &BTreeSet<String>) -> bool {
    let mut count = 0;
    for neighbour in net.neighbors(id) {
        if candidates.contains(&neighbour) {
            count += 1;
            if count >= 2 {
                return true;
            }
        }
    }
    false
}
