use std::fmt;

use serde::{Deserialize, Serialize};

/// The five kinds of knowledge-graph entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
	Technology,
	Aesthetic,
	Movement,
	Concept,
	Tool,
}

impl Category {
	pub const ALL: [Category; 5] = [
		Category::Technology,
		Category::Aesthetic,
		Category::Movement,
		Category::Concept,
		Category::Tool,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Category::Technology => "Technology",
			Category::Aesthetic => "Aesthetic",
			Category::Movement => "Movement",
			Category::Concept => "Concept",
			Category::Tool => "Tool",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|c| c.as_str() == s)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A named node of the knowledge graph.
///
/// `related_ids` may point at ids that are not in the store; those links are
/// dropped when the network is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
	pub id: String,
	pub name: String,
	pub category: Category,
	pub description: String,
	pub related_ids: Vec<String>,
	pub tags: Vec<String>,
}

impl Concept {
	pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			category,
			description: String::new(),
			related_ids: Vec::new(),
			tags: Vec::new(),
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn related_to<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.related_ids = ids.into_iter().map(Into::into).collect();
		self
	}

	pub fn tagged<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = tags.into_iter().map(Into::into).collect();
		self
	}
}

/// Lowercase, dash-separated id derived from a display name.
pub fn slugify(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	for ch in name.chars() {
		if ch.is_alphanumeric() {
			slug.extend(ch.to_lowercase());
		} else if !slug.is_empty() && !slug.ends_with('-') {
			slug.push('-');
		}
	}
	while slug.ends_with('-') {
		slug.pop();
	}
	slug
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn concept_uses_camel_case_on_the_wire() {
		let concept = Concept::new("fft", "FFT", Category::Concept).related_to(["audio-reactive"]);
		let json = serde_json::to_value(&concept).unwrap();
		assert_eq!(json["relatedIds"][0], "audio-reactive");
		assert_eq!(json["category"], "Concept");
	}

	#[test]
	fn unknown_category_is_rejected() {
		let raw = concat!(
			r#"{"id":"x","name":"X","category":"Vibe","#,
			r#""description":"","relatedIds":[],"tags":[]}"#,
		);
		assert!(serde_json::from_str::<Concept>(raw).is_err());
	}

	#[test]
	fn category_parse_matches_display() {
		for category in Category::ALL {
			assert_eq!(Category::parse(&category.to_string()), Some(category));
		}
		assert_eq!(Category::parse("tool"), None);
	}

	#[test]
	fn slugify_collapses_punctuation() {
		assert_eq!(slugify("FFT (Fast Fourier Transform)"), "fft-fast-fourier-transform");
		assert_eq!(slugify("  Max/MSP "), "max-msp");
		assert_eq!(slugify("p5.js"), "p5-js");
	}
}
