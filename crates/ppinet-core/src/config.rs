//! Core data types and configuration for a pipeline run.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Sentinel label used for gene-list files that carry no annotation column.
pub const CANDIDATE_LABEL: &str = "candidate";

/// Label attached to connector nodes added by intermediate expansion.
pub const INTERMEDIATE_LABEL: &str = "intermediate";

/// Fixed multiplier applied to layout coordinates before serialization.
pub const LAYOUT_SCALE: f64 = 2000.0;

/// A single node or edge attribute value.
///
/// Presence flags are stored as `Int(1)`; boolean interaction-source columns
/// as `Flag`; free-form annotation values as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Int(i64),
    Text(String),
}

/// Declared type of one edge-attribute column in the network file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrKind {
    Bool,
    Int,
    Text,
}

impl AttrKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Text => "text",
        }
    }

    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "text" | "str" => Some(Self::Text),
            _ => None,
        }
    }
}

/// One edge-attribute column: name plus declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrSpec {
    pub name: String,
    pub kind: AttrKind,
}

impl EdgeAttrSpec {
    pub fn new(name: &str, kind: AttrKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Parse a schema string of the form `name:kind,name:kind,...`.
pub fn parse_edge_schema(s: &str) -> Result<Vec<EdgeAttrSpec>, String> {
    let mut specs = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, kind) = part
            .split_once(':')
            .ok_or_else(|| format!("expected name:kind, got '{part}'"))?;
        if name.is_empty() {
            return Err(format!("empty attribute name in '{part}'"));
        }
        let kind = AttrKind::from_str_value(kind.trim())
            .ok_or_else(|| format!("unknown attribute kind '{kind}'"))?;
        specs.push(EdgeAttrSpec::new(name.trim(), kind));
    }
    Ok(specs)
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Base interaction network file (delimited edge list).
    pub network_path: String,
    /// Candidate gene list: single file or directory of files.
    pub candidate_path: String,
    /// Annotation gene lists: single file or directory of files.
    #[serde(default)]
    pub annotation_path: Option<String>,
    pub output_path: Option<String>,
    /// Restrict the working set to these annotation labels; empty = all.
    #[serde(default)]
    pub annotation_select: Vec<String>,
    #[serde(default)]
    pub min_edge_support: Option<u32>,
    #[serde(default)]
    pub min_degree: Option<usize>,
    #[serde(default)]
    pub max_degree: Option<usize>,
    /// Presence enables intermediate expansion; a connector must have
    /// strictly more than this many edges into the selected set.
    #[serde(default)]
    pub min_connections: Option<usize>,
    #[serde(default)]
    pub dedup_intermediates: bool,
    #[serde(default)]
    pub clean_intermediates: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_edge_schema")]
    pub edge_schema: Vec<EdgeAttrSpec>,
    /// Name of the edge column holding the database-support count.
    #[serde(default = "default_support_attribute")]
    pub support_attribute: String,
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: usize,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

fn default_delimiter() -> char {
    '\t'
}

/// Default schema matching the consensus PPI edge list format.
fn default_edge_schema() -> Vec<EdgeAttrSpec> {
    vec![
        EdgeAttrSpec::new("consensus", AttrKind::Bool),
        EdgeAttrSpec::new("STRING", AttrKind::Bool),
        EdgeAttrSpec::new("GIANT", AttrKind::Bool),
        EdgeAttrSpec::new("DBCount", AttrKind::Int),
    ]
}

fn default_support_attribute() -> String {
    "DBCount".to_string()
}

fn default_layout_iterations() -> usize {
    50
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            network_path: String::new(),
            candidate_path: String::new(),
            annotation_path: None,
            output_path: None,
            annotation_select: Vec::new(),
            min_edge_support: None,
            min_degree: None,
            max_degree: None,
            min_connections: None,
            dedup_intermediates: false,
            clean_intermediates: false,
            delimiter: default_delimiter(),
            edge_schema: default_edge_schema(),
            support_attribute: default_support_attribute(),
            layout_iterations: default_layout_iterations(),
            verbose: false,
            quiet: false,
        }
    }
}

/// Final output document — Cytoscape JSON plus run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkResult {
    pub format_version: String,
    pub generated_by: String,
    pub target_cytoscapejs_version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub data: GraphData,
    #[serde(default)]
    pub elements: Elements,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Elements {
    #[serde(default)]
    pub nodes: Vec<NodeElement>,
    #[serde(default)]
    pub edges: Vec<EdgeElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeElement {
    pub data: NodeElementData,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeElementData {
    pub id: String,
    pub value: String,
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttrValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeElement {
    pub data: EdgeElementData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeElementData {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttrValue>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_kind_roundtrip() {
        for kind in [AttrKind::Bool, AttrKind::Int, AttrKind::Text] {
            assert_eq!(AttrKind::from_str_value(kind.as_str()), Some(kind));
        }
        assert_eq!(AttrKind::from_str_value("str"), Some(AttrKind::Text));
        assert_eq!(AttrKind::from_str_value("float"), None);
    }

    #[test]
    fn schema_string_parses() {
        let schema = parse_edge_schema("weight:int, source:text,verified:bool").unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema[0].name, "weight");
        assert_eq!(schema[0].kind, AttrKind::Int);
        assert_eq!(schema[2].kind, AttrKind::Bool);
    }

    #[test]
    fn schema_string_rejects_bad_input() {
        assert!(parse_edge_schema("weight").is_err());
        assert!(parse_edge_schema(":int").is_err());
        assert!(parse_edge_schema("w:complex").is_err());
    }

    #[test]
    fn config_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.delimiter, '\t');
        assert_eq!(cfg.support_attribute, "DBCount");
        assert_eq!(cfg.edge_schema.len(), 4);
        assert_eq!(cfg.layout_iterations, 50);
        assert!(cfg.min_connections.is_none());
        assert!(!cfg.dedup_intermediates);
    }

    #[test]
    fn attr_value_serializes_untagged() {
        assert_eq!(
            serde_json::to_string(&AttrValue::Flag(true)).unwrap(),
            "true"
        );
        assert_eq!(serde_json::to_string(&AttrValue::Int(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&AttrValue::Text("utr".into())).unwrap(),
            "\"utr\""
        );
    }
}
