use leptos::html::Div;
use leptos::prelude::*;
use log::{debug, info, warn};
use web_sys::{DragEvent, MouseEvent, WheelEvent};

use super::node::WorkflowNode;
use super::overlays::{ContextMenuView, WorkflowDialogs};
use super::palette::{DragPayload, KIND_FORMAT, TEMPLATE_FORMAT};
use super::render;
use super::sidebar::WorkflowSidebar;
use super::simulator::{BrowserRoll, StoreCell, start_run};
use super::state::WorkflowEditor;
use super::store::WorkflowStore;
use super::types::{Edge, Node, NodeId, PortSide};
use crate::browser::relative_point;
use crate::config::use_config;
use crate::error::DropError;
use crate::timer::{BrowserScheduler, BrowserTask, TaskGroup};

pub const DEFAULT_NAME: &str = "New Workflow 01";

impl StoreCell for RwSignal<WorkflowEditor> {
	fn try_with_store(&self, f: impl FnOnce(&mut WorkflowStore)) -> bool {
		self.try_update(|editor| f(&mut editor.store)).is_some()
	}
}

/// The editor signal and the pane that pointer positions are measured
/// against.
#[derive(Clone, Copy)]
pub(super) struct Canvas {
	pub editor: RwSignal<WorkflowEditor>,
	pub pane: NodeRef<Div>,
}

impl Canvas {
	pub fn point(&self, ev: &MouseEvent) -> Option<(f64, f64)> {
		let pane = self.pane.get_untracked()?;
		Some(relative_point(&pane, ev))
	}
}

fn log_snapshot(editor: RwSignal<WorkflowEditor>, action: &str) {
	editor.with_untracked(|e| match e.store.to_json() {
		Ok(json) => {
			info!(
				"{action} '{}': {} nodes, {} edges",
				e.name,
				e.store.nodes().len(),
				e.store.edges().len()
			);
			debug!("{json}");
		}
		Err(err) => warn!("failed to serialize workflow '{}': {err}", e.name),
	});
}

/// The workflow canvas with its toolbar, palette and outline.
#[component]
pub fn WorkflowEditorView(
	/// Workflow title shown in the toolbar.
	#[prop(optional, into)]
	name: Option<String>,
) -> impl IntoView {
	let config = use_config();
	let name = name.unwrap_or_else(|| DEFAULT_NAME.to_string());
	let editor = RwSignal::new(WorkflowEditor::new(&name, &config));
	let pane = NodeRef::<Div>::new();
	let canvas = Canvas { editor, pane };

	let run_tasks = StoredValue::new_local(TaskGroup::<BrowserTask>::default());
	on_cleanup(move || {
		run_tasks.try_update_value(|tasks| tasks.cancel_all());
	});

	let run_step = config.run_step;
	let on_run = move |_| {
		let tasks = start_run(&BrowserScheduler, &editor, BrowserRoll, run_step);
		run_tasks.update_value(|current| current.replace(tasks));
	};

	let node_ids = Memo::new(move |_| {
		editor.with(|e| e.store.nodes().iter().map(|n| n.id.clone()).collect::<Vec<_>>())
	});
	let nodes = Memo::new(move |_| editor.with(|e| e.store.nodes().to_vec()));
	let edges = Memo::new(move |_| editor.with(|e| e.store.edges().to_vec()));
	let transform = Memo::new(move |_| editor.with(|e| e.transform.clone()));
	let link = Memo::new(move |_| {
		editor.with(|e| e.link.as_ref().map(|l| (l.anchor, l.cursor, l.from.side)))
	});

	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		if let Some(transfer) = ev.data_transfer() {
			transfer.set_drop_effect("move");
		}
	};

	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		let Some(transfer) = ev.data_transfer() else {
			return;
		};
		let payload = DragPayload {
			kind: transfer.get_data(KIND_FORMAT).unwrap_or_default(),
			template: transfer.get_data(TEMPLATE_FORMAT).unwrap_or_default(),
		};
		let Some((sx, sy)) = canvas.point(&ev) else {
			return;
		};
		editor.update(|e| match e.drop_payload(&payload, sx, sy) {
			Ok(_) => {}
			Err(DropError::MissingKind) => debug!("ignored drop without a node kind"),
			Err(err) => warn!("rejected drop: {err}"),
		});
	};

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some((sx, sy)) = canvas.point(&ev) {
			editor.update(|e| e.begin_pan(sx, sy));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let active = editor.with_untracked(|e| e.drag.is_some() || e.pan.is_some() || e.link.is_some());
		if !active {
			return;
		}
		if let Some((sx, sy)) = canvas.point(&ev) {
			editor.update(|e| e.pointer_moved(sx, sy));
		}
	};

	let release = move |_: MouseEvent| {
		let active = editor.with_untracked(|e| e.drag.is_some() || e.pan.is_some() || e.link.is_some());
		if active {
			editor.update(|e| e.pointer_released());
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((sx, sy)) = canvas.point(&ev) {
			editor.update(|e| e.zoom_at(sx, sy, ev.delta_y()));
		}
	};

	let layer_transform = move || {
		let t = transform.get();
		format!("translate({}px, {}px) scale({})", t.x, t.y, t.k)
	};

	let pending_path = move || {
		link.get()
			.map(|(anchor, cursor, side)| match side {
				PortSide::Output => render::edge_path(anchor, cursor),
				PortSide::Input => render::edge_path(cursor, anchor),
			})
			.unwrap_or_default()
	};

	view! {
		<div class="workflow">
			<div class="workflow-toolbar">
				<span class="workflow-name">
					"Workflow: " <strong>{move || editor.with(|e| e.name.clone())}</strong>
				</span>
				<div class="toolbar-actions">
					<button class="btn btn-primary" on:click=on_run>
						"▶ Run"
					</button>
					<button class="btn btn-secondary" on:click=move |_| log_snapshot(editor, "saved")>
						"Save"
					</button>
					<button class="btn btn-secondary" on:click=move |_| log_snapshot(editor, "exported")>
						"Export"
					</button>
					<button
						class="btn btn-secondary"
						on:click=move |_| editor.update(|e| e.open_archive_dialog())
					>
						"Archive"
					</button>
				</div>
			</div>
			<div class="workflow-body">
				<WorkflowSidebar editor=editor />
				<div
					node_ref=pane
					class="workflow-pane"
					on:dragover=on_dragover
					on:drop=on_drop
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=release
					on:mouseleave=release
					on:wheel=on_wheel
				>
					<div class="workflow-layer" style:transform=layer_transform>
						<svg class="edge-layer">
							<For
								each=move || edges.get()
								key=|edge| edge.id.clone()
								children=move |edge: Edge| view! { <EdgePath editor=editor nodes=nodes edge=edge /> }
							/>
							<path class="edge-pending" d=pending_path />
						</svg>
						<For
							each=move || node_ids.get()
							key=|id| id.clone()
							children=move |id: NodeId| view! { <WorkflowNode canvas=canvas id=id /> }
						/>
					</div>
					<ContextMenuView editor=editor />
				</div>
			</div>
			<WorkflowDialogs editor=editor />
		</div>
	}
}

/// One committed edge. Clicking it removes it.
#[component]
fn EdgePath(editor: RwSignal<WorkflowEditor>, nodes: Memo<Vec<Node>>, edge: Edge) -> impl IntoView {
	let Edge {
		id,
		source,
		source_handle,
		target,
		target_handle,
	} = edge;
	let d = move || {
		nodes.with(|nodes| {
			let from = nodes.iter().find(|n| n.id == source)?;
			let to = nodes.iter().find(|n| n.id == target)?;
			Some(render::edge_path(
				render::port_anchor(from, PortSide::Output, &source_handle)?,
				render::port_anchor(to, PortSide::Input, &target_handle)?,
			))
		})
		.unwrap_or_default()
	};
	let on_click = move |ev: MouseEvent| {
		ev.stop_propagation();
		editor.update(|e| {
			if e.store.remove_edge(&id) {
				info!("removed edge {id}");
			}
		});
	};

	view! { <path class="edge" d=d on:click=on_click on:mousedown=|ev: MouseEvent| ev.stop_propagation() /> }
}
