//! Request/response contract with the hosted generative model.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ServiceError;
use crate::config::{CredentialSource, GeneratorConfig};

const JSON_MIME: &str = "application/json";

/// One structured-output call: a prompt and the JSON schema the answer must
/// follow.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateRequest {
	pub prompt: String,
	pub schema: Value,
}

impl GenerateRequest {
	pub fn new(prompt: impl Into<String>, schema: Value) -> Self {
		Self {
			prompt: prompt.into(),
			schema,
		}
	}
}

/// Something that turns a [`GenerateRequest`] into the model's raw JSON text.
#[allow(async_fn_in_trait)]
pub trait GenerativeBackend {
	async fn generate(&self, request: GenerateRequest) -> Result<String, ServiceError>;
}

/// `generateContent` over HTTP. Clones share the underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient<C = crate::config::HostEnvironment> {
	http: reqwest::Client,
	config: GeneratorConfig,
	credentials: C,
}

impl<C: CredentialSource> GeminiClient<C> {
	pub fn new(config: GeneratorConfig, credentials: C) -> Self {
		Self {
			http: reqwest::Client::new(),
			config,
			credentials,
		}
	}
}

impl<C: CredentialSource> GenerativeBackend for GeminiClient<C> {
	async fn generate(&self, request: GenerateRequest) -> Result<String, ServiceError> {
		let Some(api_key) = self.credentials.api_key() else {
			warn!("generative call skipped: no API key");
			return Err(ServiceError::MissingCredential);
		};

		let body = GenerateContentBody::new(&request);
		debug!(
			"POST {} ({} prompt chars)",
			self.config.generate_url(),
			request.prompt.len()
		);
		let response = self
			.http
			.post(self.config.generate_url())
			.header("x-goog-api-key", api_key)
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		let text = response.text().await?;
		if !status.is_success() {
			return Err(remote_error(status.as_u16(), &text));
		}

		let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
		parsed.into_text()
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
	contents: [OutgoingContent<'a>; 1],
	generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct OutgoingContent<'a> {
	parts: [OutgoingPart<'a>; 1],
}

#[derive(Serialize)]
struct OutgoingPart<'a> {
	text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
	response_mime_type: &'static str,
	response_schema: &'a Value,
}

impl<'a> GenerateContentBody<'a> {
	fn new(request: &'a GenerateRequest) -> Self {
		Self {
			contents: [OutgoingContent {
				parts: [OutgoingPart {
					text: &request.prompt,
				}],
			}],
			generation_config: GenerationConfig {
				response_mime_type: JSON_MIME,
				response_schema: &request.schema,
			},
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
	content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
	text: Option<String>,
}

impl GenerateContentResponse {
	/// Concatenated text parts of the first candidate.
	fn into_text(self) -> Result<String, ServiceError> {
		let text: String = self
			.candidates
			.into_iter()
			.next()
			.and_then(|c| c.content)
			.map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
			.unwrap_or_default();
		if text.trim().is_empty() {
			return Err(ServiceError::EmptyResponse);
		}
		Ok(text)
	}
}

#[derive(Deserialize)]
struct ApiErrorBody {
	error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
	message: String,
}

fn remote_error(status: u16, body: &str) -> ServiceError {
	let message = serde_json::from_str::<ApiErrorBody>(body)
		.map(|b| b.error.message)
		.unwrap_or_else(|_| body.trim().chars().take(200).collect());
	warn!("generative API returned {status}: {message}");
	ServiceError::Remote { status, message }
}

/// Parses model output as `T`. Tolerates surrounding whitespace and a
/// markdown code fence.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, ServiceError> {
	let mut body = text.trim();
	if let Some(rest) = body.strip_prefix("```") {
		body = rest.strip_prefix("json").unwrap_or(rest);
		body = body.strip_suffix("```").unwrap_or(body).trim();
	}
	if body.is_empty() {
		return Err(ServiceError::EmptyResponse);
	}
	Ok(serde_json::from_str(body)?)
}
