use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::dialogs::{ActiveDialog, DialogCommit};
use super::menu::MenuAction;
use super::state::WorkflowEditor;
use crate::browser::alert;
use crate::components::modal::Modal;

#[component]
pub(super) fn ContextMenuView(editor: RwSignal<WorkflowEditor>) -> impl IntoView {
	let menu = Memo::new(move |_| editor.with(|e| e.menu.clone()));
	let menu_ref = NodeRef::<Div>::new();

	// Any click outside the menu dismisses it, toolbar and sidebar included.
	let outside_click = window_event_listener(ev::click, move |ev: MouseEvent| {
		if editor.with_untracked(|e| e.menu.is_none()) {
			return;
		}
		let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
		let inside = menu_ref
			.get_untracked()
			.is_some_and(|el| el.contains(target.as_ref()));
		editor.update(|e| {
			e.dismiss_menu(inside);
		});
	});
	on_cleanup(move || outside_click.remove());

	move || {
		menu.get().map(|menu| {
			view! {
				<div
					node_ref=menu_ref
					class="context-menu"
					style:top=format!("{}px", menu.top)
					style:left=format!("{}px", menu.left)
					on:click=|ev: MouseEvent| ev.stop_propagation()
					on:mousedown=|ev: MouseEvent| ev.stop_propagation()
				>
					{MenuAction::ALL
						.into_iter()
						.map(|action| {
							view! {
								{action.is_destructive().then(|| view! { <div class="context-menu-separator"></div> })}
								<div
									class="context-menu-item"
									class:destructive=action.is_destructive()
									on:click=move |_| editor.update(|e| e.apply_menu_action(action))
								>
									{action.label()}
								</div>
							}
						})
						.collect_view()}
				</div>
			}
		})
	}
}

/// Archive, mount and description dialogs. At most one is open.
#[component]
pub(super) fn WorkflowDialogs(editor: RwSignal<WorkflowEditor>) -> impl IntoView {
	let dialog = Memo::new(move |_| editor.with(|e| e.dialog.clone()));
	let can_confirm = Memo::new(move |_| editor.with(|e| e.can_confirm_dialog()));
	let candidates = StoredValue::new(editor.with_untracked(|e| e.mount_candidates().to_vec()));

	let cancel = Callback::new(move |_: ()| editor.update(|e| e.cancel_dialog()));
	let confirm = move |_: MouseEvent| {
		let mut commit = None;
		editor.update(|e| commit = e.confirm_dialog());
		if let Some(DialogCommit::Archived(record)) = commit {
			alert(&format!("Workflow \"{}\" archived successfully!", record.name));
		}
	};

	let archive_name = move || {
		dialog.with(|d| match d {
			Some(ActiveDialog::Archive(draft)) => draft.name.clone(),
			_ => String::new(),
		})
	};
	let description_text = move || {
		dialog.with(|d| match d {
			Some(ActiveDialog::Description(draft)) => draft.text.clone(),
			_ => String::new(),
		})
	};
	let mount_label = move || {
		dialog.with(|d| match d {
			Some(ActiveDialog::Mount(draft)) => draft.node_label.clone(),
			_ => String::new(),
		})
	};

	view! {
		<Show when=move || matches!(dialog.get(), Some(ActiveDialog::Archive(_)))>
			<Modal
				title="Archive Workflow"
				description="Save the current workflow state to history archives."
				on_close=cancel
			>
				<label class="field-label" for="archive-name">
					"Archive Name"
				</label>
				<input
					id="archive-name"
					class="input"
					placeholder="e.g., v1.0-stable"
					prop:value=archive_name
					on:input=move |ev| editor.update(|e| e.set_archive_name(event_target_value(&ev)))
				/>
				<div class="modal-footer">
					<button class="btn btn-outline" on:click=move |_| cancel.run(())>
						"Cancel"
					</button>
					<button class="btn btn-primary" disabled=move || !can_confirm.get() on:click=confirm>
						"Archive"
					</button>
				</div>
			</Modal>
		</Show>

		<Show when=move || matches!(dialog.get(), Some(ActiveDialog::Mount(_)))>
			<Modal
				title="Mount Database"
				description="Associate a database resource with this microapplication node."
				on_close=cancel
			>
				<div class="mount-target">"Selected Node: " {mount_label}</div>
				<p class="field-label">"Select Databases (Multi-select)"</p>
				<div class="mount-grid">
					{candidates
						.get_value()
						.into_iter()
						.map(|db| {
							let name = db.clone();
							let selected = move || {
								dialog.with(|d| {
									matches!(d, Some(ActiveDialog::Mount(draft)) if draft.selection.contains(&name))
								})
							};
							view! {
								<div
									class="mount-option"
									class:selected=selected
									on:click=move |_| editor.update(|e| e.toggle_mount(&db))
								>
									<span class="mount-check"></span>
									<span>"⛁ " {db.clone()}</span>
								</div>
							}
						})
						.collect_view()}
					<div class="mount-option destructive" on:click=move |_| editor.update(|e| e.clear_mounts())>
						"✕ Clear All"
					</div>
				</div>
				<div class="modal-footer">
					<button class="btn btn-outline" on:click=move |_| cancel.run(())>
						"Cancel"
					</button>
					<button class="btn btn-primary" on:click=confirm>
						"Save Configuration"
					</button>
				</div>
			</Modal>
		</Show>

		<Show when=move || matches!(dialog.get(), Some(ActiveDialog::Description(_)))>
			<Modal
				title="Edit Node Description"
				description="Add a brief description for this microapplication node."
				on_close=cancel
			>
				<label class="field-label" for="node-description">
					"Description"
				</label>
				<textarea
					id="node-description"
					class="input textarea"
					placeholder="e.g., Handles user authentication"
					prop:value=description_text
					on:input=move |ev| editor.update(|e| e.set_description_text(event_target_value(&ev)))
				></textarea>
				<div class="modal-footer">
					<button class="btn btn-outline" on:click=move |_| cancel.run(())>
						"Cancel"
					</button>
					<button class="btn btn-primary" on:click=confirm>
						"Save"
					</button>
				</div>
			</Modal>
		</Show>
	}
}
