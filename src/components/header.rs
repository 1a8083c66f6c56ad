use leptos::prelude::*;

/// Which main view is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	#[default]
	Network,
	Table,
}

impl ViewMode {
	pub const ALL: [ViewMode; 2] = [ViewMode::Network, ViewMode::Table];

	pub fn label(self) -> &'static str {
		match self {
			ViewMode::Network => "Network Map",
			ViewMode::Table => "Data Table",
		}
	}
}

#[component]
pub fn Header(
	view_mode: RwSignal<ViewMode>,
	#[prop(into)] researching: Signal<bool>,
	on_add_term: Callback<()>,
) -> impl IntoView {
	view! {
		<header class="app-header">
			<div class="brand">
				<h1>"Concept Nexus"</h1>
				<p class="subtitle">"Digital art & creative coding knowledge graph"</p>
			</div>
			<div class="header-actions">
				<nav class="view-toggle">
					{ViewMode::ALL
						.into_iter()
						.map(|mode| {
							view! {
								<button
									class:active=move || view_mode.get() == mode
									on:click=move |_| view_mode.set(mode)
								>
									{mode.label()}
								</button>
							}
						})
						.collect_view()}
				</nav>
				<button
					class="add-term"
					disabled=move || researching.get()
					on:click=move |_| on_add_term.run(())
				>
					{move || if researching.get() { "Researching..." } else { "+ Add Term (AI)" }}
				</button>
			</div>
		</header>
	}
}
