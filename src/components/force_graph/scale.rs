//! Category colors shared by the canvas and the table badges.

use crate::model::Category;

/// Ordinal palette, one entry per category in [`Category::ALL`] order.
const PALETTE: [&str; 5] = ["#80b1d3", "#bebada", "#fdb462", "#8dd3c7", "#fb8072"];

pub fn category_color(category: Category) -> &'static str {
	let idx = Category::ALL
		.iter()
		.position(|c| *c == category)
		.unwrap_or_default();
	PALETTE[idx % PALETTE.len()]
}

/// CSS class for the table badge of `category`.
pub fn category_badge_class(category: Category) -> &'static str {
	match category {
		Category::Technology => "badge badge-technology",
		Category::Aesthetic => "badge badge-aesthetic",
		Category::Movement => "badge badge-movement",
		Category::Concept | Category::Tool => "badge badge-neutral",
	}
}
