//! Researching a new concept from a bare term.

use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

use super::error::ServiceError;
use super::gemini::{GenerateRequest, GenerativeBackend, parse_structured};
use crate::model::concept::slugify;
use crate::model::{Category, Concept, ConceptStore};

/// Id base for a record whose name has no slug-able characters.
const FALLBACK_ID: &str = "concept";

pub fn concept_schema() -> Value {
	let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
	json!({
		"type": "OBJECT",
		"properties": {
			"id": { "type": "STRING" },
			"name": { "type": "STRING" },
			"category": { "type": "STRING", "enum": categories },
			"description": { "type": "STRING" },
			"relatedIds": { "type": "ARRAY", "items": { "type": "STRING" } },
			"tags": { "type": "ARRAY", "items": { "type": "STRING" } }
		},
		"required": ["name", "category", "description"]
	})
}

fn build_prompt(term: &str) -> String {
	format!(
		"Provide a detailed definition for the term \"{term}\" in the context of Creative Coding and Digital Art.\n\
		Return a JSON object matching the Concept interface."
	)
}

/// Concept as the model returns it; everything but the category is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConceptRecord {
	id: Option<String>,
	name: Option<String>,
	category: Category,
	#[serde(default)]
	description: String,
	#[serde(default)]
	related_ids: Vec<String>,
	#[serde(default)]
	tags: Vec<String>,
}

impl ConceptRecord {
	fn into_concept(self, term: &str) -> Concept {
		let name = self
			.name
			.map(|n| n.trim().to_string())
			.filter(|n| !n.is_empty())
			.unwrap_or_else(|| term.to_string());
		let id = self
			.id
			.map(|id| id.trim().to_string())
			.filter(|id| !id.is_empty())
			.or_else(|| Some(slugify(&name)).filter(|slug| !slug.is_empty()))
			.unwrap_or_else(|| FALLBACK_ID.to_string());
		Concept {
			id,
			name,
			category: self.category,
			description: self.description,
			related_ids: self.related_ids,
			tags: self.tags,
		}
	}
}

/// The trimmed term, or [`ServiceError::EmptyTerm`] when nothing is left.
pub fn normalize_term(term: &str) -> Result<&str, ServiceError> {
	let term = term.trim();
	if term.is_empty() {
		return Err(ServiceError::EmptyTerm);
	}
	Ok(term)
}

/// Asks `backend` to describe `term`.
///
/// Rejects an empty term or a name already in `store` without calling out.
/// The returned concept still carries the model's id; insert it with
/// [`ConceptStore::admit`] so a colliding id gets a suffix.
pub async fn expand<B: GenerativeBackend>(
	backend: &B,
	store: &ConceptStore,
	term: &str,
) -> Result<Concept, ServiceError> {
	let term = normalize_term(term)?;
	if let Some(existing) = store.find_by_name(term) {
		return Err(ServiceError::DuplicateName {
			name: existing.name.clone(),
		});
	}

	info!("expanding term {term:?}");
	let text = backend
		.generate(GenerateRequest::new(build_prompt(term), concept_schema()))
		.await?;
	let record: ConceptRecord = parse_structured(&text)?;
	Ok(record.into_concept(term))
}
