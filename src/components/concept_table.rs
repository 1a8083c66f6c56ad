use leptos::prelude::*;

use crate::components::force_graph::scale::category_badge_class;
use crate::model::{
	Category, CategoryFilter, Concept, ConceptStore, SelectionSet, SortKey, SortOrder, TableFilter,
};

const VISIBLE_TAGS: usize = 3;

/// Filterable, sortable listing of the store.
#[component]
pub fn ConceptTable(
	#[prop(into)] store: Signal<ConceptStore>,
	#[prop(into)] selection: Signal<SelectionSet>,
	on_toggle: Callback<String>,
) -> impl IntoView {
	let filter = RwSignal::new(TableFilter::default());
	let rows = Memo::new(move |_| {
		filter.with(|f| {
			store.with(|s| f.apply(s.iter()).into_iter().cloned().collect::<Vec<Concept>>())
		})
	});

	let on_search = move |ev: leptos::ev::Event| {
		let text = event_target_value(&ev);
		filter.update(|f| f.text = text);
	};
	let on_category = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		filter.update(|f| f.category = CategoryFilter::from_value(&value));
	};

	view! {
		<section class="table-panel">
			<div class="table-controls">
				<input
					type="search"
					class="search"
					placeholder="Search concepts or tags..."
					prop:value=move || filter.with(|f| f.text.clone())
					on:input=on_search
				/>
				<select
					class="category-filter"
					prop:value=move || filter.with(|f| f.category.as_value())
					on:change=on_category
				>
					<option value={CategoryFilter::All.as_value()}>"All Categories"</option>
					{Category::ALL
						.into_iter()
						.map(|c| view! { <option value={c.as_str()}>{c.as_str()}</option> })
						.collect_view()}
				</select>
				<span class="row-count">{move || format!("{} shown", rows.with(Vec::len))}</span>
			</div>
			<table class="concept-table">
				<thead>
					<tr>
						<SortHeader label="Name" column=SortKey::Name filter />
						<SortHeader label="Category" column=SortKey::Category filter />
						<th>"Description"</th>
						<th>"Tags"</th>
						<th></th>
					</tr>
				</thead>
				<tbody>
					<For
						each=move || rows.get()
						key=|concept| concept.id.clone()
						children=move |concept: Concept| {
							view! { <ConceptRow concept selection on_toggle /> }
						}
					/>
				</tbody>
			</table>
			<Show when=move || rows.with(Vec::is_empty)>
				<p class="muted empty-table">"No concepts match the current filters."</p>
			</Show>
		</section>
	}
}

#[component]
fn SortHeader(
	label: &'static str,
	column: SortKey,
	filter: RwSignal<TableFilter>,
) -> impl IntoView {
	let indicator = move || {
		filter.with(|f| match (f.sort == column, f.order) {
			(false, _) => "",
			(true, SortOrder::Ascending) => " ▲",
			(true, SortOrder::Descending) => " ▼",
		})
	};
	view! {
		<th class="sortable" on:click=move |_| filter.update(|f| f.sort_by(column))>
			{label}
			{indicator}
		</th>
	}
}

#[component]
fn ConceptRow(
	concept: Concept,
	selection: Signal<SelectionSet>,
	on_toggle: Callback<String>,
) -> impl IntoView {
	let id = concept.id.clone();
	let is_selected = Memo::new({
		let id = id.clone();
		move |_| selection.with(|s| s.is_selected(&id))
	});
	let tags = concept
		.tags
		.iter()
		.take(VISIBLE_TAGS)
		.map(|tag| view! { <span class="tag">{tag.clone()}</span> })
		.collect_view();

	view! {
		<tr class:selected=move || is_selected.get()>
			<td class="name">{concept.name.clone()}</td>
			<td>
				<span class=category_badge_class(concept.category)>
					{concept.category.as_str()}
				</span>
			</td>
			<td class="description">{concept.description.clone()}</td>
			<td class="tags">{tags}</td>
			<td>
				<button
					class="select-toggle"
					class:active=move || is_selected.get()
					on:click=move |_| on_toggle.run(id.clone())
				>
					{move || if is_selected.get() { "Remove" } else { "Select" }}
				</button>
			</td>
		</tr>
	}
}
