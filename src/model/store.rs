use std::collections::HashSet;

use log::debug;

use super::concept::{Category, Concept};

/// Append-only, insertion-ordered collection of concepts keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConceptStore {
	concepts: Vec<Concept>,
	ids: HashSet<String>,
}

impl ConceptStore {
	/// Builds a store from `concepts`, skipping any id seen earlier in the list.
	pub fn from_concepts(concepts: impl IntoIterator<Item = Concept>) -> Self {
		let mut store = Self::default();
		for concept in concepts {
			store.add(concept);
		}
		store
	}

	/// Appends `concept` unless its id is already present.
	///
	/// Returns `false` on collision; the store never renames ids, callers
	/// disambiguate first (see [`ConceptStore::unique_id`]).
	pub fn add(&mut self, concept: Concept) -> bool {
		if self.ids.contains(&concept.id) {
			debug!("rejected duplicate concept id {}", concept.id);
			return false;
		}
		self.ids.insert(concept.id.clone());
		self.concepts.push(concept);
		true
	}

	/// Returns `base` when free, otherwise `base-token`, `base-token-2`, ...
	pub fn unique_id(&self, base: &str, token: u64) -> String {
		if !self.contains_id(base) {
			return base.to_string();
		}
		let stamped = format!("{base}-{token}");
		if !self.contains_id(&stamped) {
			return stamped;
		}
		(2u64..)
			.map(|n| format!("{stamped}-{n}"))
			.find(|candidate| !self.contains_id(candidate))
			.unwrap_or(stamped)
	}

	/// Disambiguates the id of `concept` against the store and appends it.
	/// Returns the id it was stored under.
	pub fn admit(&mut self, mut concept: Concept, token: u64) -> String {
		let id = self.unique_id(&concept.id, token);
		if id != concept.id {
			debug!("concept id {} taken, storing as {}", concept.id, id);
		}
		concept.id = id.clone();
		self.add(concept);
		id
	}

	pub fn find(&self, mut predicate: impl FnMut(&Concept) -> bool) -> Option<&Concept> {
		self.concepts.iter().find(|c| predicate(c))
	}

	pub fn get(&self, id: &str) -> Option<&Concept> {
		if !self.contains_id(id) {
			return None;
		}
		self.find(|c| c.id == id)
	}

	pub fn contains_id(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	/// Case-insensitive lookup by display name.
	pub fn find_by_name(&self, name: &str) -> Option<&Concept> {
		let needle = name.to_lowercase();
		self.find(|c| c.name.to_lowercase() == needle)
	}

	pub fn count_by_category(&self, category: Category) -> usize {
		self.concepts.iter().filter(|c| c.category == category).count()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Concept> {
		self.concepts.iter()
	}

	pub fn len(&self) -> usize {
		self.concepts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.concepts.is_empty()
	}
}
