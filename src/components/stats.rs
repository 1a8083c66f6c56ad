use leptos::prelude::*;

use crate::model::{Category, ConceptStore, SelectionSet};

#[component]
pub fn Stats(
	#[prop(into)] store: Signal<ConceptStore>,
	#[prop(into)] selection: Signal<SelectionSet>,
) -> impl IntoView {
	let total = move || store.with(ConceptStore::len);
	let selected = move || selection.with(SelectionSet::len);
	let technology = move || store.with(|s| s.count_by_category(Category::Technology));
	let aesthetic = move || store.with(|s| s.count_by_category(Category::Aesthetic));

	view! {
		<section class="panel stats">
			<div class="stat">
				<span class="stat-value">{total}</span>
				<span class="stat-label">"Total Concepts"</span>
			</div>
			<div class="stat">
				<span class="stat-value stat-selected">{selected}</span>
				<span class="stat-label">"Selected"</span>
			</div>
			<div class="stat">
				<span class="stat-value">{technology}</span>
				<span class="stat-label">"Tech Nodes"</span>
			</div>
			<div class="stat">
				<span class="stat-value">{aesthetic}</span>
				<span class="stat-label">"Aesthetics"</span>
			</div>
		</section>
	}
}
