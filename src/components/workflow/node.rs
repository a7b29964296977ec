use leptos::prelude::*;
use log::warn;
use web_sys::MouseEvent;

use super::component::Canvas;
use super::render::{self, BODY_PADDING, DB_BLOCK_GAP, DB_ROW_HEIGHT, HEADER_HEIGHT, NODE_WIDTH, PORT_ROW_HEIGHT};
use super::state::PortRef;
use super::types::{NodeId, Port, PortSide};

fn px(value: f64) -> String {
	format!("{value}px")
}

/// Node card. Rows are laid out with the same constants `render` uses for
/// port anchors, so edges meet the handles.
#[component]
pub(super) fn WorkflowNode(canvas: Canvas, id: NodeId) -> impl IntoView {
	let editor = canvas.editor;
	let node = {
		let id = id.clone();
		Memo::new(move |_| editor.with(|e| e.store.node(&id).cloned()))
	};
	let position = Memo::new(move |_| node.with(|n| n.as_ref().map(|n| n.position)).unwrap_or_default());
	let data = Memo::new(move |_| node.with(|n| n.as_ref().map(|n| n.data.clone())).unwrap_or_default());

	let on_mousedown = {
		let id = id.clone();
		move |ev: MouseEvent| {
			ev.stop_propagation();
			if ev.button() != 0 {
				return;
			}
			if let Some((sx, sy)) = canvas.point(&ev) {
				editor.update(|e| e.begin_node_drag(&id, sx, sy));
			}
		}
	};

	let on_dblclick = {
		let id = id.clone();
		move |_: MouseEvent| editor.update(|e| e.open_mount_dialog(&id))
	};

	let on_contextmenu = {
		let id = id.clone();
		move |ev: MouseEvent| {
			ev.prevent_default();
			ev.stop_propagation();
			if let Some((left, top)) = canvas.point(&ev) {
				editor.update(|e| e.open_context_menu(&id, top, left));
			}
		}
	};

	let description = move || {
		data.with(|d| d.description.clone())
			.filter(|text| !text.is_empty())
			.map(|text| view! { <span class="node-description">{text}</span> })
	};

	let databases = move || {
		let names = data.with(|d| d.db.names().to_vec());
		let height = names.len() as f64 * DB_ROW_HEIGHT;
		(!names.is_empty()).then(|| {
			view! {
				<div
					class="node-dbs"
					style:height=px(height)
					style:margin-bottom=px(DB_BLOCK_GAP)
				>
					{names
						.into_iter()
						.map(|db| view! { <div class="node-db" style:height=px(DB_ROW_HEIGHT)>"⛁ " {db}</div> })
						.collect_view()}
				</div>
			}
		})
	};

	let inputs = {
		let id = id.clone();
		move || port_rows(canvas, id.clone(), PortSide::Input, data.with(|d| d.inputs.clone()))
	};
	let outputs = move || port_rows(canvas, id.clone(), PortSide::Output, data.with(|d| d.outputs.clone()));

	view! {
		<div
			class=move || render::status_class(data.with(|d| d.status))
			style:left=move || px(position.get().x)
			style:top=move || px(position.get().y)
			style:width=px(NODE_WIDTH)
			on:mousedown=on_mousedown
			on:dblclick=on_dblclick
			on:contextmenu=on_contextmenu
		>
			<div class="node-header" style:height=px(HEADER_HEIGHT)>
				<span class="node-dot"></span>
				<div class="node-titles">
					<span class="node-label">{move || data.with(|d| d.label.clone())}</span>
					{description}
				</div>
				<span class="node-status-icon">{move || render::status_icon(data.with(|d| d.status))}</span>
			</div>
			<div class="node-body" style:padding=px(BODY_PADDING)>
				{databases}
				<div class="node-ports">
					<div class="port-column inputs">{inputs}</div>
					<div class="port-column outputs">{outputs}</div>
				</div>
			</div>
		</div>
	}
}

fn port_rows(canvas: Canvas, node: NodeId, side: PortSide, ports: Vec<Port>) -> impl IntoView {
	let row_class = match side {
		PortSide::Input => "port-row input",
		PortSide::Output => "port-row output",
	};
	ports
		.into_iter()
		.map(|port| {
			let target = PortRef::new(node.clone(), side, &port.id);
			let source = target.clone();
			let on_mousedown = move |ev: MouseEvent| {
				ev.stop_propagation();
				if ev.button() != 0 {
					return;
				}
				if let Some((sx, sy)) = canvas.point(&ev) {
					canvas.editor.update(|e| e.begin_link(source.clone(), sx, sy));
				}
			};
			let on_mouseup = move |ev: MouseEvent| {
				ev.stop_propagation();
				canvas.editor.update(|e| {
					if let Some(Err(err)) = e.finish_link(&target) {
						warn!("connection rejected: {err}");
					}
					e.pointer_released();
				});
			};
			view! {
				<div class=row_class style:height=px(PORT_ROW_HEIGHT)>
					<span
						class="port-handle"
						title=port.kind
						on:mousedown=on_mousedown
						on:mouseup=on_mouseup
					></span>
					<span class="port-name">{port.name}</span>
				</div>
			}
		})
		.collect_view()
}
