pub mod concept_table;
pub mod force_graph;
pub mod header;
pub mod notice;
pub mod selection_panel;
pub mod stats;
pub mod synthesizer;
