//! PPInet Core — pipeline for building filtered, annotated PPI subgraphs.
//!
//! This crate contains all selection logic: network loading, gene-set
//! resolution, intermediate-node expansion, threshold pruning, layout and
//! Cytoscape JSON output.

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod output;
pub mod phases;
pub mod pipeline;
