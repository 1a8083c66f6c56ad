//! Knowledge-graph data: concepts, the append-only store, the selection set
//! and the table projection.

pub mod concept;
pub mod filter;
pub mod seed;
pub mod selection;
pub mod store;

pub use concept::{Category, Concept};
pub use filter::{CategoryFilter, SortKey, SortOrder, TableFilter};
pub use selection::SelectionSet;
pub use store::ConceptStore;
