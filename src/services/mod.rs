//! Calls to the hosted generative model.

pub mod error;
pub mod expansion;
pub mod gemini;
pub mod synthesis;

#[cfg(test)]
mod testing;

pub use gemini::GeminiClient;
pub use synthesis::{SynthesisRequest, SynthesisResult};
