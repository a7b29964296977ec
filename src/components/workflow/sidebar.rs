use leptos::prelude::*;
use log::warn;
use web_sys::DragEvent;

use super::palette::{DragPayload, KIND_FORMAT, NodeTemplate, TEMPLATE_FORMAT, default_palette};
use super::state::WorkflowEditor;
use super::types::NodeKind;

fn start_drag(ev: &DragEvent, template: &NodeTemplate) {
	let Some(transfer) = ev.data_transfer() else {
		return;
	};
	let payload = match DragPayload::encode(NodeKind::Microapplication, template) {
		Ok(payload) => payload,
		Err(err) => {
			warn!("failed to encode template '{}': {err}", template.title());
			return;
		}
	};
	for (format, value) in [(KIND_FORMAT, &payload.kind), (TEMPLATE_FORMAT, &payload.template)] {
		if let Err(err) = transfer.set_data(format, value) {
			warn!("failed to set {format} on drag: {err:?}");
		}
	}
	transfer.set_effect_allowed("move");
}

/// Component library plus an outline of what is already on the canvas.
#[component]
pub(super) fn WorkflowSidebar(editor: RwSignal<WorkflowEditor>) -> impl IntoView {
	let outline = Memo::new(move |_| {
		editor.with(|e| {
			e.store
				.nodes()
				.iter()
				.map(|n| (n.id.clone(), n.data.label.clone(), n.data.status))
				.collect::<Vec<_>>()
		})
	});

	let palette = default_palette()
		.into_iter()
		.map(|template| {
			let title = template.title();
			let counts = format!("{} In • {} Out", template.inputs.len(), template.outputs.len());
			view! {
				<div
					class="palette-item"
					draggable="true"
					on:dragstart=move |ev: DragEvent| start_drag(&ev, &template)
				>
					<span class="palette-grip">"⋮⋮"</span>
					<div class="palette-icon">"▢"</div>
					<div>
						<p class="palette-title">{title}</p>
						<p class="palette-counts">{counts}</p>
					</div>
				</div>
			}
		})
		.collect_view();

	view! {
		<aside class="workflow-sidebar">
			<h3 class="sidebar-heading">"Component Library"</h3>
			<div class="palette">{palette}</div>
			<h3 class="sidebar-heading">"On Canvas"</h3>
			<ul class="outline">
				<For
					each=move || outline.get()
					key=|entry| entry.clone()
					children=move |(id, label, status)| {
						let remove = move |_| {
							editor.update(|e| {
								e.delete_node(&id);
							});
						};
						view! {
							<li class="outline-item">
								<span class=format!("outline-status status-{}", status.as_str())></span>
								<span class="outline-label">{label}</span>
								<button class="btn-icon" title="Remove node" on:click=remove>
									"✕"
								</button>
							</li>
						}
					}
				/>
			</ul>
		</aside>
	}
}
