use leptos::prelude::*;

use crate::components::force_graph::scale::category_color;
use crate::model::{Concept, ConceptStore, SelectionSet};

/// The selected concepts in the order they were picked, each removable.
#[component]
pub fn SelectionPanel(
	#[prop(into)] store: Signal<ConceptStore>,
	#[prop(into)] selection: Signal<SelectionSet>,
	on_toggle: Callback<String>,
) -> impl IntoView {
	let selected = Memo::new(move |_| {
		selection.with(|sel| {
			store.with(|s| sel.resolve(s).into_iter().cloned().collect::<Vec<Concept>>())
		})
	});

	view! {
		<section class="panel selection-panel">
			<h2>"Selected Context"</h2>
			<Show
				when=move || selected.with(|list| !list.is_empty())
				fallback=|| {
					view! {
						<p class="muted">"No concepts selected. Click nodes or rows to add them."</p>
					}
				}
			>
				<ul class="selection-list">
					<For
						each=move || selected.get()
						key=|concept| concept.id.clone()
						children=move |concept: Concept| {
							let id = concept.id.clone();
							view! {
								<li class="selection-item">
									<span
										class="dot"
										style:background-color=category_color(concept.category)
									></span>
									<span class="selection-name">{concept.name}</span>
									<button
										class="remove"
										title="Remove"
										on:click=move |_| on_toggle.run(id.clone())
									>
										"×"
									</button>
								</li>
							}
						}
					/>
				</ul>
			</Show>
		</section>
	}
}
