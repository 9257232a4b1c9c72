pub mod clean;
pub mod expand;
pub mod gene_sets;
pub mod prune;
pub mod select;
