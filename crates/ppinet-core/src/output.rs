//! Cytoscape JSON assembly and file output.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::Utc;

use crate::config::{
    AttrValue, EdgeElement, EdgeElementData, Elements, GraphData, NetworkResult, NodeElement,
    NodeElementData, PipelineConfig, Position, INTERMEDIATE_LABEL, LAYOUT_SCALE,
};
use crate::graph::network::PpiNetwork;
use crate::phases::select::resolve;

/// Edge colour derived from database-support count.
fn support_color(support: u32) -> Option<&'static str> {
    match support {
        1 => Some("red"),
        2 => Some("green"),
        3 => Some("blue"),
        _ => None,
    }
}

/// Assemble the output document from the final graph and layout coordinates.
#[allow(clippy::too_many_arguments)]
pub fn build_result(
    config: &PipelineConfig,
    net: &PpiNetwork,
    positions: &BTreeMap<String, (f64, f64)>,
    candidate_labels: &[String],
    annotation_labels: &[String],
    timings: &HashMap<String, f64>,
    total_ms: f64,
    warnings: Vec<String>,
) -> NetworkResult {
    let network_name = Path::new(&config.network_path)
        .file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "network".to_string());

    let candidates = resolve(net, candidate_labels);
    let annotations = resolve(net, annotation_labels);
    // expansion connectors count as intermediates alongside non-candidate
    // annotation nodes
    let mut connectorish = annotations.clone();
    connectorish.extend(net.nodes_with_label(INTERMEDIATE_LABEL));
    let intermediates = connectorish.difference(&candidates).count();

    let mut metadata = HashMap::new();
    metadata.insert(
        "network_path".to_string(),
        serde_json::Value::String(config.network_path.clone()),
    );
    metadata.insert(
        "candidate_path".to_string(),
        serde_json::Value::String(config.candidate_path.clone()),
    );
    metadata.insert(
        "annotation_path".to_string(),
        match &config.annotation_path {
            Some(p) => serde_json::Value::String(p.clone()),
            None => serde_json::Value::Null,
        },
    );
    metadata.insert(
        "generated_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "ppinet_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    metadata.insert(
        "duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    let mut stats = HashMap::new();
    stats.insert("nodes".to_string(), serde_json::json!(net.node_count()));
    stats.insert("edges".to_string(), serde_json::json!(net.edge_count()));
    stats.insert("candidates".to_string(), serde_json::json!(candidates.len()));
    stats.insert(
        "annotations".to_string(),
        serde_json::json!(annotations.len()),
    );
    stats.insert(
        "intermediates".to_string(),
        serde_json::json!(intermediates),
    );

    let nodes: Vec<NodeElement> = net
        .node_ids()
        .into_iter()
        .map(|id| {
            let attributes = net.node_attributes(&id).cloned().unwrap_or_default();
            let (x, y) = positions.get(&id).copied().unwrap_or((0.0, 0.0));
            NodeElement {
                data: NodeElementData {
                    id: id.clone(),
                    value: id.clone(),
                    name: id,
                    attributes,
                },
                position: Position {
                    x: LAYOUT_SCALE * x,
                    y: LAYOUT_SCALE * y,
                },
            }
        })
        .collect();

    let mut edges: Vec<EdgeElement> = net
        .edges()
        .into_iter()
        .map(|(source, target, data)| {
            let mut attributes = data.attributes.clone();
            if let Some(color) = support_color(data.support) {
                attributes.insert("color".to_string(), AttrValue::Text(color.to_string()));
            }
            EdgeElement {
                data: EdgeElementData {
                    source,
                    target,
                    attributes,
                },
            }
        })
        .collect();
    edges.sort_by(|a, b| {
        (&a.data.source, &a.data.target).cmp(&(&b.data.source, &b.data.target))
    });

    NetworkResult {
        format_version: "1.0".to_string(),
        generated_by: format!("ppinet-{}", env!("CARGO_PKG_VERSION")),
        target_cytoscapejs_version: "~2.1".to_string(),
        metadata,
        stats,
        warnings,
        data: GraphData { name: network_name },
        elements: Elements { nodes, edges },
    }
}

/// Write the result to a JSON file, creating parent directories as needed.
pub fn write_output(result: &NetworkResult, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
