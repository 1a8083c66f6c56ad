//! Project-idea synthesis from selected concepts plus free text.

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ServiceError;
use super::gemini::{GenerateRequest, GenerativeBackend, parse_structured};
use crate::model::Concept;

const DEFAULT_CONTEXT: &str = "Surprise me with a cutting-edge aesthetic.";

/// A generated project proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
	pub title: String,
	pub concept: String,
	pub visuals: String,
	pub audio: String,
	pub tech_stack: Vec<String>,
	pub rationale: String,
}

/// Inputs of one synthesis call: concepts in selection order and the
/// user's extra constraints.
#[derive(Clone, Debug, Default)]
pub struct SynthesisRequest {
	pub concepts: Vec<Concept>,
	pub context: String,
}

impl SynthesisRequest {
	pub fn new(concepts: Vec<Concept>, context: impl Into<String>) -> Self {
		Self {
			concepts,
			context: context.into(),
		}
	}

	pub fn validate(&self) -> Result<(), ServiceError> {
		if self.concepts.is_empty() && self.context.trim().is_empty() {
			return Err(ServiceError::EmptyRequest);
		}
		Ok(())
	}

	pub fn build_prompt(&self) -> String {
		let concepts = self
			.concepts
			.iter()
			.map(|c| format!("{} ({})", c.name, c.category))
			.collect::<Vec<_>>()
			.join(", ");
		let context = match self.context.trim() {
			"" => DEFAULT_CONTEXT,
			context => context,
		};
		format!(
			"Act as a world-class curator and technologist in Digital Art and Creative Computing.\n\
			\n\
			I want to create a new digital art or electronic music project.\n\
			\n\
			My Constraints/Inspirations:\n\
			- Concepts/Tools to include: {concepts}\n\
			- Additional Context: {context}\n\
			\n\
			Task:\n\
			Extend these concepts into a cohesive project proposal. Recombine them in a novel way.\n\
			The output must be structured JSON."
		)
	}
}

pub fn synthesis_schema() -> Value {
	json!({
		"type": "OBJECT",
		"properties": {
			"title": { "type": "STRING", "description": "A creative title for the project" },
			"concept": { "type": "STRING", "description": "The core conceptual definition (2-3 sentences)" },
			"visuals": { "type": "STRING", "description": "Description of the visual aesthetic and behavior" },
			"audio": { "type": "STRING", "description": "Description of the sonic landscape and generative audio rules" },
			"techStack": {
				"type": "ARRAY",
				"items": { "type": "STRING" },
				"description": "Specific libraries, languages, or hardware recommended"
			},
			"rationale": { "type": "STRING", "description": "Why this combination works historically or aesthetically" }
		},
		"required": ["title", "concept", "visuals", "audio", "techStack", "rationale"]
	})
}

/// Validates locally, then asks `backend` for a proposal. Never retries and
/// never caches.
pub async fn synthesize<B: GenerativeBackend>(
	backend: &B,
	request: &SynthesisRequest,
) -> Result<SynthesisResult, ServiceError> {
	request.validate()?;
	info!("synthesizing from {} concepts", request.concepts.len());
	let text = backend
		.generate(GenerateRequest::new(request.build_prompt(), synthesis_schema()))
		.await?;
	parse_structured(&text)
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::model::Category;
	use crate::services::testing::ScriptedBackend;

	const PROPOSAL: &str = r#"{
		"title": "Signal Bloom",
		"concept": "A reaction-diffusion garden driven by live audio.",
		"visuals": "Turing patterns in neon.",
		"audio": "FFT bands seed the feed rate.",
		"techStack": ["GLSL", "Web Audio"],
		"rationale": "Biology meets spectrum analysis."
	}"#;

	#[test]
	fn empty_request_never_reaches_backend() {
		let backend = ScriptedBackend::replying(PROPOSAL);
		let request = SynthesisRequest::new(Vec::new(), "   ");
		let err = block_on(synthesize(&backend, &request)).unwrap_err();
		assert!(matches!(err, ServiceError::EmptyRequest));
		assert_eq!(backend.calls(), 0);
	}

	#[test]
	fn context_alone_is_enough() {
		let backend = ScriptedBackend::replying(PROPOSAL);
		let request = SynthesisRequest::new(Vec::new(), "use a webcam");
		let result = block_on(synthesize(&backend, &request)).unwrap();
		assert_eq!(result.title, "Signal Bloom");
		assert_eq!(result.tech_stack, ["GLSL", "Web Audio"]);
		assert_eq!(backend.calls(), 1);
	}

	#[test]
	fn prompt_lists_concepts_and_context() {
		let request = SynthesisRequest::new(
			vec![
				Concept::new("fft", "FFT", Category::Concept),
				Concept::new("glsl", "GLSL", Category::Technology),
			],
			"",
		);
		let prompt = request.build_prompt();
		assert!(prompt.contains("Concepts/Tools to include: FFT (Concept), GLSL (Technology)"));
		assert!(prompt.contains(DEFAULT_CONTEXT));
	}

	#[test]
	fn sends_schema_with_every_field_required() {
		let backend = ScriptedBackend::replying(PROPOSAL);
		let request = SynthesisRequest::new(vec![Concept::new("a", "A", Category::Tool)], "");
		block_on(synthesize(&backend, &request)).unwrap();
		let sent = backend.last_request().unwrap();
		assert_eq!(sent.schema["required"].as_array().map(Vec::len), Some(6));
		assert_eq!(sent.schema["properties"]["techStack"]["type"], "ARRAY");
	}

	#[test]
	fn identical_requests_are_sent_again() {
		let backend = ScriptedBackend::replying(PROPOSAL);
		let request = SynthesisRequest::new(Vec::new(), "brutalism");
		block_on(synthesize(&backend, &request)).unwrap();
		block_on(synthesize(&backend, &request)).unwrap();
		assert_eq!(backend.calls(), 2);
	}

	#[test]
	fn malformed_output_is_a_failure() {
		let backend = ScriptedBackend::replying(r#"{"title": "only a title"}"#);
		let request = SynthesisRequest::new(Vec::new(), "anything");
		let err = block_on(synthesize(&backend, &request)).unwrap_err();
		assert!(matches!(err, ServiceError::Malformed(_)));
	}

	#[test]
	fn backend_failures_pass_through() {
		let backend = ScriptedBackend::failing(|| ServiceError::MissingCredential);
		let request = SynthesisRequest::new(Vec::new(), "anything");
		let err = block_on(synthesize(&backend, &request)).unwrap_err();
		assert!(matches!(err, ServiceError::MissingCredential));
	}
}
