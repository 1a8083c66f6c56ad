use leptos::prelude::*;

/// Dismissible message bar. Renders nothing while `message` is `None`.
#[component]
pub fn Notice(
	message: RwSignal<Option<String>>,
	#[prop(optional)] class: &'static str,
) -> impl IntoView {
	move || {
		message.get().map(|text| {
			view! {
				<div class=format!("notice {class}") role="alert">
					<span>{text}</span>
					<button
						class="notice-dismiss"
						title="Dismiss"
						on:click=move |_| message.set(None)
					>
						"×"
					</button>
				</div>
			}
		})
	}
}
