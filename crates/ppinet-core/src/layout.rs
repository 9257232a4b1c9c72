//! Deterministic spring layout (Fruchterman-Reingold).
//!
//! Nodes start on a circle in sorted-id order, so a given graph always
//! yields the same coordinates. Treated as a black box by the pipeline: the
//! only contract is one finite 2D coordinate per node.

use std::collections::BTreeMap;

use crate::graph::network::PpiNetwork;

const EPSILON: f64 = 1e-9;

/// Compute 2D positions for every node, roughly within the unit square.
pub fn spring_layout(net: &PpiNetwork, iterations: usize) -> BTreeMap<String, (f64, f64)> {
    let ids = net.node_ids();
    let n = ids.len();
    if n == 0 {
        return BTreeMap::new();
    }
    if n == 1 {
        return BTreeMap::from([(ids[0].clone(), (0.0, 0.0))]);
    }

    let index: BTreeMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    let edges: Vec<(usize, usize)> = net
        .edges()
        .into_iter()
        .filter_map(|(a, b, _)| Some((*index.get(a.as_str())?, *index.get(b.as_str())?)))
        .collect();

    // circle initialisation
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
            (0.5 * angle.cos(), 0.5 * angle.sin())
        })
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        // pairwise repulsion
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(EPSILON);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        // attraction along edges
        for &(i, j) in &edges {
            if i == j {
                continue;
            }
            let dx = pos[i].0 - pos[j].0;
            let dy = pos[i].1 - pos[j].1;
            let dist = (dx * dx + dy * dy).sqrt().max(EPSILON);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[i].0 -= fx;
            disp[i].1 -= fy;
            disp[j].0 += fx;
            disp[j].1 += fy;
        }

        // move, capped by the current temperature
        for i in 0..n {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(EPSILON);
            let step = len.min(temperature);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }
        temperature = (temperature - cooling).max(0.0);
    }

    ids.into_iter().zip(pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::network::EdgeData;
    use std::collections::BTreeMap as Map;

    fn edge() -> EdgeData {
        EdgeData {
            support: 1,
            attributes: Map::new(),
        }
    }

    #[test]
    fn every_node_gets_finite_coordinates() {
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", edge());
        net.add_interaction("B", "C", edge());
        let pos = spring_layout(&net, 50);
        assert_eq!(pos.len(), 3);
        for (x, y) in pos.values() {
            assert!(x.is_finite() && y.is_finite());
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let build = || {
            let mut net = PpiNetwork::new();
            net.add_interaction("A", "B", edge());
            net.add_interaction("B", "C", edge());
            net.add_interaction("C", "A", edge());
            spring_layout(&net, 25)
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn empty_and_singleton_graphs() {
        let net = PpiNetwork::new();
        assert!(spring_layout(&net, 10).is_empty());

        let mut net = PpiNetwork::new();
        net.add_interaction("A", "A", edge());
        let pos = spring_layout(&net, 10);
        assert_eq!(pos.get("A"), Some(&(0.0, 0.0)));
    }

    #[test]
    fn connected_nodes_sit_closer_than_strangers() {
        // path A-B plus far-flung D: attraction should pull A and B
        // together more than A and the unconnected D
        let mut net = PpiNetwork::new();
        net.add_interaction("A", "B", edge());
        net.add_interaction("C", "D", edge());
        let pos = spring_layout(&net, 100);
        let d = |p: &str, q: &str| {
            let (x1, y1) = pos[p];
            let (x2, y2) = pos[q];
            ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
        };
        assert!(d("A", "B") < d("A", "D"));
    }
}
