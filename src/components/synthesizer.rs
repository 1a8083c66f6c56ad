use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::components::notice::Notice;
use crate::model::{Concept, ConceptStore, SelectionSet};
use crate::services::synthesis::synthesize;
use crate::services::{GeminiClient, SynthesisRequest, SynthesisResult};

/// Turns the current selection plus free-text context into a project idea.
#[component]
pub fn Synthesizer(
	#[prop(into)] store: Signal<ConceptStore>,
	#[prop(into)] selection: Signal<SelectionSet>,
	client: StoredValue<GeminiClient, LocalStorage>,
	on_clear: Callback<()>,
) -> impl IntoView {
	let context = RwSignal::new(String::new());
	let loading = RwSignal::new(false);
	let result = RwSignal::new(None::<SynthesisResult>);
	let error = RwSignal::new(None::<String>);

	let on_generate = move |_: leptos::ev::MouseEvent| {
		if loading.get_untracked() {
			return;
		}
		let concepts: Vec<Concept> = selection.with_untracked(|sel| {
			store.with_untracked(|s| sel.resolve(s).into_iter().cloned().collect())
		});
		let request = SynthesisRequest::new(concepts, context.get_untracked());
		if let Err(err) = request.validate() {
			error.set(Some(err.to_string()));
			return;
		}

		loading.set(true);
		error.set(None);
		result.set(None);
		let client = client.get_value();
		spawn_local(async move {
			match synthesize(&client, &request).await {
				Ok(proposal) => {
					info!("synthesized {:?}", proposal.title);
					result.set(Some(proposal));
				}
				Err(err) => {
					warn!("synthesis failed: {err}");
					error.set(Some(err.to_string()));
				}
			}
			loading.set(false);
		});
	};

	view! {
		<section class="panel synthesizer">
			<div class="panel-heading">
				<h2>"Idea Synthesizer"</h2>
				<button
					class="link-button"
					disabled=move || selection.with(SelectionSet::is_empty)
					on:click=move |_| on_clear.run(())
				>
					"Clear Selections"
				</button>
			</div>
			<p class="muted">
				{move || format!("{} concepts selected", selection.with(SelectionSet::len))}
			</p>
			<textarea
				class="context"
				rows="3"
				placeholder="Add context, e.g. a live club visual set or an interactive museum piece"
				prop:value=move || context.get()
				on:input=move |ev| context.set(event_target_value(&ev))
			></textarea>
			<button class="generate" disabled=move || loading.get() on:click=on_generate>
				{move || if loading.get() { "Synthesizing..." } else { "Generate Project Idea" }}
			</button>
			<Notice message=error class="notice-error" />
			{move || result.get().map(|proposal| view! { <ResultCard proposal /> })}
		</section>
	}
}

#[component]
fn ResultCard(proposal: SynthesisResult) -> impl IntoView {
	let stack = proposal
		.tech_stack
		.into_iter()
		.map(|item| view! { <span class="tag">{item}</span> })
		.collect_view();

	view! {
		<article class="result-card">
			<h3>{proposal.title}</h3>
			<p class="result-concept">{proposal.concept}</p>
			<h4>"Visuals"</h4>
			<p>{proposal.visuals}</p>
			<h4>"Audio"</h4>
			<p>{proposal.audio}</p>
			<h4>"Tech Stack"</h4>
			<div class="tags">{stack}</div>
			<h4>"Why it works"</h4>
			<p class="rationale">{proposal.rationale}</p>
		</article>
	}
}
