//! Gene-set loading from tab-delimited files or directories of files.
//!
//! File format: row 0 is the header; column 0 of each following row is a
//! gene identifier. Single-column rows mark presence (`Int(1)`); two-column
//! rows carry the raw annotation value. The label is the header's second
//! column when present, otherwise the fixed `candidate` sentinel.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use walkdir::WalkDir;

use crate::config::{AttrValue, CANDIDATE_LABEL};
use crate::error::PipelineError;

/// One named gene set produced from a single file.
#[derive(Debug, Clone)]
pub struct GeneSet {
    pub label: String,
    pub members: Vec<(String, AttrValue)>,
}

impl GeneSet {
    /// Gene ids without their values.
    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(g, _)| g.as_str())
    }
}

/// Load gene sets from a single file or every file in a directory.
///
/// Directory mode yields one set per file in directory-listing order; the
/// order is not guaranteed stable across platforms and callers must rely on
/// membership only.
pub fn load_gene_sets(path: &Path) -> Result<Vec<GeneSet>, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        let mut sets = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                PipelineError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("unreadable directory entry")
                }))
            })?;
            if entry.file_type().is_file() {
                sets.push(load_one(entry.path())?);
            }
        }
        Ok(sets)
    } else {
        Ok(vec![load_one(path)?])
    }
}

fn load_one(path: &Path) -> Result<GeneSet, PipelineError> {
    let reader = BufReader::new(File::open(path)?);
    let mut label = None;
    let mut members = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let row = line.trim_end_matches(['\r', '\n']);
        if row.trim().is_empty() {
            continue;
        }
        let mut cols = row.split('\t');
        let first = cols.next().unwrap_or_default().trim().to_string();
        let second = cols.next().map(|c| c.trim().to_string());

        if label.is_none() {
            // header row: second column names the annotation; a one-column
            // header means a bare candidate list
            label = Some(match &second {
                Some(name) if !name.is_empty() => name.clone(),
                _ => CANDIDATE_LABEL.to_string(),
            });
            continue;
        }
        if first.is_empty() {
            continue;
        }
        let value = match second {
            Some(v) if !v.is_empty() => AttrValue::Text(v),
            _ => AttrValue::Int(1),
        };
        members.push((first, value));
    }
    Ok(GeneSet {
        label: label.unwrap_or_else(|| CANDIDATE_LABEL.to_string()),
        members,
    })
}
