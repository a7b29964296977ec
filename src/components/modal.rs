use leptos::prelude::*;
use web_sys::MouseEvent;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop closes it.
#[component]
pub fn Modal(
	#[prop(into)] title: String,
	#[prop(optional, into)] description: Option<String>,
	#[prop(into)] on_close: Callback<()>,
	children: Children,
) -> impl IntoView {
	view! {
		<div class="modal-backdrop" on:click=move |_| on_close.run(())>
			<div class="modal" role="dialog" on:click=|ev: MouseEvent| ev.stop_propagation()>
				<header class="modal-header">
					<h3 class="modal-title">{title}</h3>
					{description.map(|text| view! { <p class="modal-description">{text}</p> })}
				</header>
				<div class="modal-body">{children()}</div>
			</div>
		</div>
	}
}
