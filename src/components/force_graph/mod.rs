mod component;
mod layout;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::ConceptNetwork;
