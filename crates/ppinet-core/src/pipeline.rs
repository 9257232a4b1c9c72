//! Sequential phase orchestrator with timing.
//!
//! One linear pass: network → gene sets → selection → optional expansion →
//! pruning → optional cleanup → layout → result assembly. Fully synchronous,
//! in-memory, removal-only graph mutation.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::Instant;

use crate::config::{AttrValue, NetworkResult, PipelineConfig, INTERMEDIATE_LABEL};
use crate::error::PipelineError;
use crate::graph::edge_table::EdgeTable;
use crate::graph::network::{EdgeData, PpiNetwork};
use crate::layout::spring_layout;
use crate::output::build_result;
use crate::phases::clean::clean;
use crate::phases::expand::expand;
use crate::phases::gene_sets::{load_gene_sets, GeneSet};
use crate::phases::prune::{prune, PruneThresholds};
use crate::phases::select::{apply_labels, extract_subgraph, resolve};

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("network", "Loading interaction network"),
    ("gene_sets", "Loading gene lists"),
    ("select", "Selecting working subgraph"),
    ("expand", "Expanding through intermediates"),
    ("prune", "Applying thresholds"),
    ("clean", "Cleaning weak intermediates"),
    ("layout", "Computing layout"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Execute the pipeline and return the assembled output document.
pub fn run_pipeline(
    config: &PipelineConfig,
    mut progress: Option<ProgressCallback>,
) -> Result<NetworkResult, PipelineError> {
    let mut timings: HashMap<String, f64> = HashMap::new();
    let mut warnings: Vec<String> = Vec::new();
    let total_start = Instant::now();

    let mut enter = |name: &str| -> Instant {
        if let Some(cb) = progress.as_mut() {
            let label = PHASE_LABELS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l)
                .unwrap_or(name);
            cb(name, label);
        }
        Instant::now()
    };

    // --- network ---
    let start = enter("network");
    let table = EdgeTable::read_path(config)?;
    timings.insert("network".to_string(), start.elapsed().as_secs_f64());

    // --- gene_sets ---
    let start = enter("gene_sets");
    let candidate_sets = load_gene_sets(Path::new(&config.candidate_path))?;
    let annotation_sets = match &config.annotation_path {
        Some(path) => load_gene_sets(Path::new(path))?,
        None => Vec::new(),
    };
    let candidate_labels = set_labels(&candidate_sets);
    let mut annotation_labels = set_labels(&annotation_sets);
    if !config.annotation_select.is_empty() {
        annotation_labels.retain(|l| config.annotation_select.contains(l));
    }
    timings.insert("gene_sets".to_string(), start.elapsed().as_secs_f64());

    // --- select ---
    let start = enter("select");
    let mut full = PpiNetwork::from_rows(table.rows());
    apply_labels(&mut full, &candidate_sets);
    apply_labels(&mut full, &annotation_sets);
    let candidates = resolve(&full, &candidate_labels);
    let annotations = resolve(&full, &annotation_labels);
    if candidates.is_empty() && annotations.is_empty() {
        return Err(PipelineError::NoInputGenes);
    }
    let node_set: BTreeSet<String> = candidates.union(&annotations).cloned().collect();
    let mut working = extract_subgraph(&table, &node_set);
    apply_labels(&mut working, &candidate_sets);
    apply_labels(&mut working, &annotation_sets);
    if working.edge_count() == 0 {
        push_warning(
            &mut warnings,
            "no edges among the selected genes; consider intermediate expansion \
             (--min-connections)",
        );
    }
    timings.insert("select".to_string(), start.elapsed().as_secs_f64());

    // --- expand (optional) ---
    if let Some(min_connections) = config.min_connections {
        let start = enter("expand");
        let expansion = expand(
            &table,
            &node_set,
            min_connections,
            config.dedup_intermediates,
        );
        if expansion.is_empty() {
            push_warning(
                &mut warnings,
                "no intermediate connectors passed the connection threshold",
            );
        } else {
            for row in &expansion.rows {
                working.add_interaction(&row.source, &row.target, EdgeData::from_record(row));
            }
            for id in &expansion.connectors {
                working.set_attr(id, INTERMEDIATE_LABEL, AttrValue::Int(1));
            }
            // set members that only reach the graph through connector edges
            // appear now; give them their labels too
            apply_labels(&mut working, &candidate_sets);
            apply_labels(&mut working, &annotation_sets);
        }
        timings.insert("expand".to_string(), start.elapsed().as_secs_f64());
    }

    if working.edge_count() == 0 {
        return Err(PipelineError::EmptyNetwork {
            stage: "selection and expansion",
        });
    }

    // --- prune ---
    let start = enter("prune");
    prune(
        &mut working,
        &PruneThresholds {
            min_edge_support: config.min_edge_support,
            min_degree: config.min_degree,
            max_degree: config.max_degree,
        },
    );
    timings.insert("prune".to_string(), start.elapsed().as_secs_f64());

    // --- clean (optional) ---
    if config.clean_intermediates {
        let start = enter("clean");
        let mut connector_labels = annotation_labels.clone();
        connector_labels.push(INTERMEDIATE_LABEL.to_string());
        clean(&mut working, &candidate_labels, &connector_labels);
        timings.insert("clean".to_string(), start.elapsed().as_secs_f64());
    }

    // --- layout ---
    let start = enter("layout");
    let positions = spring_layout(&working, config.layout_iterations);
    timings.insert("layout".to_string(), start.elapsed().as_secs_f64());

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    Ok(build_result(
        config,
        &working,
        &positions,
        &candidate_labels,
        &annotation_labels,
        &timings,
        total_ms,
        warnings,
    ))
}

fn set_labels(sets: &[GeneSet]) -> Vec<String> {
    sets.iter().map(|s| s.label.clone()).collect()
}

fn push_warning(warnings: &mut Vec<String>, message: &str) {
    log::warn!("{message}");
    warnings.push(message.to_string());
}
