use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::components::concept_table::ConceptTable;
use crate::components::force_graph::ConceptNetwork;
use crate::components::header::{Header, ViewMode};
use crate::components::notice::Notice;
use crate::components::selection_panel::SelectionPanel;
use crate::components::stats::Stats;
use crate::components::synthesizer::Synthesizer;
use crate::config::{GeneratorConfig, HostEnvironment};
use crate::model::seed::initial_concepts;
use crate::model::{ConceptStore, SelectionSet};
use crate::services::GeminiClient;
use crate::services::expansion::{expand, normalize_term};

const ADD_TERM_PROMPT: &str = "Enter a new concept, technology or aesthetic to research:";

/// Root controller: owns the store, the selection and the view mode, and
/// hands snapshots and callbacks to the panels.
#[component]
pub fn Home() -> impl IntoView {
	let store = RwSignal::new(ConceptStore::from_concepts(initial_concepts()));
	let selection = RwSignal::new(SelectionSet::new());
	let view_mode = RwSignal::new(ViewMode::default());
	let researching = RwSignal::new(false);
	let notice = RwSignal::new(None::<String>);
	let client = StoredValue::new_local(GeminiClient::new(
		GeneratorConfig::from_build_env(),
		HostEnvironment,
	));
	info!("seeded {} concepts", store.with_untracked(ConceptStore::len));

	let on_toggle = Callback::new(move |id: String| {
		selection.update(|s| {
			s.toggle(&id);
		});
	});
	let on_clear = Callback::new(move |_: ()| selection.update(SelectionSet::clear));

	let on_add_term = Callback::new(move |_: ()| {
		if researching.get_untracked() {
			return;
		}
		let entry = match window().prompt_with_message(ADD_TERM_PROMPT) {
			Ok(Some(entry)) => entry,
			Ok(None) => return,
			Err(err) => {
				warn!("add-term prompt unavailable: {err:?}");
				return;
			}
		};
		let term = match normalize_term(&entry) {
			Ok(term) => term.to_string(),
			Err(err) => {
				notice.set(Some(err.to_string()));
				return;
			}
		};

		researching.set(true);
		notice.set(None);
		let client = client.get_value();
		spawn_local(async move {
			let snapshot = store.get_untracked();
			match expand(&client, &snapshot, &term).await {
				Ok(concept) => {
					let name = concept.name.clone();
					let token = js_sys::Date::now() as u64;
					if let Some(id) = store.try_update(|s| s.admit(concept, token)) {
						info!("added {name:?} as {id}");
						notice.set(Some(format!("Added \"{name}\" to the graph.")));
					}
				}
				Err(err) if err.is_local() => {
					info!("expansion of {term:?} declined: {err}");
					notice.set(Some(err.to_string()));
				}
				Err(err) => {
					warn!("expansion of {term:?} failed: {err}");
					notice.set(Some(err.to_string()));
				}
			}
			researching.set(false);
		});
	});

	view! {
		<div class="app">
			<Header view_mode researching on_add_term />
			<Notice message=notice class="notice-banner" />
			<main class="layout">
				<div class="main-view">
					<Show
						when=move || view_mode.get() == ViewMode::Network
						fallback=move || view! { <ConceptTable store selection on_toggle /> }
					>
						<ConceptNetwork concepts=store selection on_toggle />
					</Show>
				</div>
				<aside class="sidebar">
					<Stats store selection />
					<Synthesizer store selection client on_clear />
					<SelectionPanel store selection on_toggle />
				</aside>
			</main>
		</div>
	}
}
