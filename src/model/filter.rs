use super::concept::{Category, Concept};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
	#[default]
	All,
	Only(Category),
}

impl CategoryFilter {
	pub fn matches(self, category: Category) -> bool {
		match self {
			CategoryFilter::All => true,
			CategoryFilter::Only(wanted) => wanted == category,
		}
	}

	/// Value used by the `<select>` element.
	pub fn as_value(self) -> &'static str {
		match self {
			CategoryFilter::All => "All",
			CategoryFilter::Only(category) => category.as_str(),
		}
	}

	pub fn from_value(value: &str) -> Self {
		Category::parse(value).map_or(CategoryFilter::All, CategoryFilter::Only)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
	#[default]
	Insertion,
	Name,
	Category,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
	#[default]
	Ascending,
	Descending,
}

impl SortOrder {
	pub fn flipped(self) -> Self {
		match self {
			SortOrder::Ascending => SortOrder::Descending,
			SortOrder::Descending => SortOrder::Ascending,
		}
	}
}

/// Table projection: text + category filter, then an optional sort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableFilter {
	pub text: String,
	pub category: CategoryFilter,
	pub sort: SortKey,
	pub order: SortOrder,
}

impl TableFilter {
	/// Case-insensitive substring match on the name or any tag.
	pub fn matches_text(&self, concept: &Concept) -> bool {
		let needle = self.text.to_lowercase();
		if needle.is_empty() {
			return true;
		}
		concept.name.to_lowercase().contains(&needle)
			|| concept.tags.iter().any(|t| t.to_lowercase().contains(&needle))
	}

	pub fn matches(&self, concept: &Concept) -> bool {
		self.category.matches(concept.category) && self.matches_text(concept)
	}

	pub fn apply<'a>(&self, concepts: impl IntoIterator<Item = &'a Concept>) -> Vec<&'a Concept> {
		let mut rows: Vec<&Concept> = concepts.into_iter().filter(|c| self.matches(c)).collect();
		// stable sorts, so ties keep insertion order
		match self.sort {
			SortKey::Insertion => {}
			SortKey::Name => rows.sort_by_key(|c| c.name.to_lowercase()),
			SortKey::Category => rows.sort_by_key(|c| c.category.as_str()),
		}
		if self.order == SortOrder::Descending {
			rows.reverse();
		}
		rows
	}

	/// Clicking the active column flips the order; a new column starts ascending.
	pub fn sort_by(&mut self, key: SortKey) {
		if self.sort == key {
			self.order = self.order.flipped();
		} else {
			self.sort = key;
			self.order = SortOrder::Ascending;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::seed::initial_concepts;

	fn ids<'a>(rows: &[&'a Concept]) -> Vec<&'a str> {
		rows.iter().map(|c| c.id.as_str()).collect()
	}

	#[test]
	fn text_matches_name_or_tag_ignoring_case() {
		let concepts = initial_concepts();
		let filter = TableFilter {
			text: "AUDIO".into(),
			..Default::default()
		};
		assert_eq!(ids(&filter.apply(&concepts)), ["fft", "supercollider"]);

		let filter = TableFilter {
			text: "shader".into(),
			..Default::default()
		};
		assert_eq!(ids(&filter.apply(&concepts)), ["glsl"]);
	}

	#[test]
	fn category_filter_is_exact() {
		let concepts = initial_concepts();
		let filter = TableFilter {
			category: CategoryFilter::Only(Category::Technology),
			..Default::default()
		};
		assert_eq!(ids(&filter.apply(&concepts)), ["glsl"]);
	}

	#[test]
	fn text_and_category_commute() {
		let concepts = initial_concepts();
		for text in ["", "a", "code", "math", "zzz"] {
			for category in Category::ALL {
				let by_text = TableFilter {
					text: text.into(),
					..Default::default()
				};
				let by_category = TableFilter {
					category: CategoryFilter::Only(category),
					..Default::default()
				};
				let text_then_category = by_category.apply(by_text.apply(&concepts));
				let category_then_text = by_text.apply(by_category.apply(&concepts));
				assert_eq!(ids(&text_then_category), ids(&category_then_text));
			}
		}
	}

	#[test]
	fn sort_by_name_and_flip() {
		let concepts = initial_concepts();
		let mut filter = TableFilter {
			category: CategoryFilter::Only(Category::Aesthetic),
			..Default::default()
		};
		filter.sort_by(SortKey::Name);
		assert_eq!(ids(&filter.apply(&concepts)), ["biomorphism", "cyberpunk", "minimalism"]);
		filter.sort_by(SortKey::Name);
		assert_eq!(ids(&filter.apply(&concepts)), ["minimalism", "cyberpunk", "biomorphism"]);
	}

	#[test]
	fn category_select_value_round_trip() {
		assert_eq!(CategoryFilter::from_value("All"), CategoryFilter::All);
		assert_eq!(
			CategoryFilter::from_value("Tool"),
			CategoryFilter::Only(Category::Tool)
		);
		assert_eq!(CategoryFilter::Only(Category::Movement).as_value(), "Movement");
	}
}
