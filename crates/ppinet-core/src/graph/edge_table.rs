//! Delimited edge-list parsing into typed records.
//!
//! The table keeps every row with its original left/right orientation; the
//! expansion phase reorients rows itself and never consults the live graph.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use std::collections::BTreeMap;

use crate::config::{AttrKind, AttrValue, EdgeAttrSpec, PipelineConfig};
use crate::error::PipelineError;

/// One network-file row: endpoint pair plus typed attributes and the
/// extracted database-support count.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub attributes: BTreeMap<String, AttrValue>,
    pub support: u32,
}

/// The full base-network edge list, held in memory.
#[derive(Debug, Default)]
pub struct EdgeTable {
    rows: Vec<EdgeRecord>,
}

impl EdgeTable {
    /// Build a table from already-typed rows. Used for programmatic
    /// construction; file input goes through [`EdgeTable::read_path`].
    pub fn from_rows(rows: Vec<EdgeRecord>) -> Self {
        Self { rows }
    }

    /// Read the network file named by the configuration. Blank lines and
    /// `#` comment lines are skipped; every other row must match the
    /// configured attribute schema exactly.
    pub fn read_path(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let path = Path::new(&config.network_path);
        if !path.exists() {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            rows.push(parse_row(
                path,
                i + 1,
                trimmed,
                config.delimiter,
                &config.edge_schema,
                &config.support_attribute,
            )?);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[EdgeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_row(
    path: &Path,
    line: usize,
    row: &str,
    delimiter: char,
    schema: &[EdgeAttrSpec],
    support_attribute: &str,
) -> Result<EdgeRecord, PipelineError> {
    let parse_err = |message: String| PipelineError::Parse {
        path: PathBuf::from(path),
        line,
        message,
    };

    let fields: Vec<&str> = row.split(delimiter).collect();
    if fields.len() != 2 + schema.len() {
        return Err(parse_err(format!(
            "expected {} fields, found {}",
            2 + schema.len(),
            fields.len()
        )));
    }
    let source = fields[0].to_string();
    let target = fields[1].to_string();
    if source.is_empty() || target.is_empty() {
        return Err(parse_err("empty node identifier".to_string()));
    }

    let mut attributes = BTreeMap::new();
    for (spec, raw) in schema.iter().zip(&fields[2..]) {
        let value = parse_value(raw, spec.kind)
            .ok_or_else(|| parse_err(format!("invalid {} value '{raw}'", spec.kind.as_str())))?;
        attributes.insert(spec.name.clone(), value);
    }

    let support = match attributes.get(support_attribute) {
        Some(AttrValue::Int(n)) => u32::try_from(*n)
            .map_err(|_| parse_err(format!("negative support count {n}")))?,
        Some(_) => {
            return Err(parse_err(format!(
                "support attribute '{support_attribute}' is not an integer column"
            )))
        }
        // no support column configured: every edge counts as unsupported
        None => 0,
    };

    Ok(EdgeRecord {
        source,
        target,
        attributes,
        support,
    })
}

fn parse_value(raw: &str, kind: AttrKind) -> Option<AttrValue> {
    match kind {
        AttrKind::Bool => match raw {
            "true" | "True" | "1" => Some(AttrValue::Flag(true)),
            "false" | "False" | "0" => Some(AttrValue::Flag(false)),
            _ => None,
        },
        AttrKind::Int => raw.parse::<i64>().ok().map(AttrValue::Int),
        AttrKind::Text => Some(AttrValue::Text(raw.to_string())),
    }
}
