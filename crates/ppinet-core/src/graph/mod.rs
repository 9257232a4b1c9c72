pub mod edge_table;
pub mod network;
