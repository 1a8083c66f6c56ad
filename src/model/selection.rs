use std::collections::HashSet;

use super::concept::Concept;
use super::store::ConceptStore;

/// Ids the user has picked as synthesis inputs.
///
/// Membership is a hash lookup; `order` keeps the add order for the
/// "active inputs" lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
	order: Vec<String>,
	members: HashSet<String>,
}

impl SelectionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `id` if absent, removes it otherwise. Returns whether it is
	/// selected afterwards.
	pub fn toggle(&mut self, id: &str) -> bool {
		if self.members.remove(id) {
			self.order.retain(|existing| existing != id);
			false
		} else {
			self.members.insert(id.to_string());
			self.order.push(id.to_string());
			true
		}
	}

	pub fn clear(&mut self) {
		self.order.clear();
		self.members.clear();
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.members.contains(id)
	}

	#[cfg(test)]
	pub fn ids(&self) -> &[String] {
		&self.order
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Selected concepts in add order. Ids unknown to `store` are skipped.
	pub fn resolve<'a>(&self, store: &'a ConceptStore) -> Vec<&'a Concept> {
		self.order.iter().filter_map(|id| store.get(id)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::concept::Category;

	#[test]
	fn toggle_twice_restores_prior_state() {
		let mut selection = SelectionSet::new();
		selection.toggle("a");
		selection.toggle("b");
		let before = selection.clone();

		assert!(selection.toggle("c"));
		assert!(!selection.toggle("c"));
		assert_eq!(selection, before);

		assert!(!selection.toggle("a"));
		assert!(selection.toggle("a"));
		assert!(selection.is_selected("a"));
		assert_eq!(selection.len(), before.len());
	}

	#[test]
	fn keeps_add_order_for_display() {
		let mut selection = SelectionSet::new();
		for id in ["c", "a", "b"] {
			selection.toggle(id);
		}
		selection.toggle("a");
		selection.toggle("a");
		assert_eq!(selection.ids(), ["c", "b", "a"]);
	}

	#[test]
	fn clear_empties_everything() {
		let mut selection = SelectionSet::new();
		selection.toggle("a");
		selection.clear();
		assert!(selection.is_empty());
		assert!(!selection.is_selected("a"));
	}

	#[test]
	fn resolve_follows_selection_order() {
		let store = ConceptStore::from_concepts([
			Concept::new("a", "A", Category::Tool),
			Concept::new("b", "B", Category::Tool),
		]);
		let mut selection = SelectionSet::new();
		selection.toggle("b");
		selection.toggle("ghost");
		selection.toggle("a");
		let names: Vec<_> = selection.resolve(&store).iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, ["B", "A"]);
	}
}
