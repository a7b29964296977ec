use log::{debug, info};

use super::dialogs::{
	ActiveDialog, ArchiveDraft, ArchiveRecord, DescriptionDraft, DialogCommit, MountDraft,
};
use super::menu::{ContextMenu, MenuAction};
use super::palette::DragPayload;
use super::render;
use super::store::WorkflowStore;
use super::types::{ConnectionPolicy, Edge, NodeId, NodePatch, PortSide, Position};
use crate::config::DashboardConfig;
use crate::error::{ConnectError, DropError};

pub const ZOOM_IN: f64 = 1.1;
pub const ZOOM_OUT: f64 = 0.9;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDrag {
	pub node_id: NodeId,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanState {
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// One end of a connection gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct PortRef {
	/// Node owning the port.
	pub node: NodeId,
	/// Whether the port is an input or an output.
	pub side: PortSide,
	/// Port id within the node.
	pub port: String,
}

impl PortRef {
	/// Refer to `port` on `side` of `node`.
	pub fn new(node: NodeId, side: PortSide, port: &str) -> Self {
		Self {
			node,
			side,
			port: port.to_string(),
		}
	}
}

/// A connection being dragged out of a port, in canvas space.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingLink {
	pub from: PortRef,
	pub anchor: Position,
	pub cursor: Position,
}

#[derive(Clone, Debug, PartialEq)]
struct EditorSettings {
	policy: ConnectionPolicy,
	copy_offset: f64,
	mount_candidates: Vec<String>,
	min_zoom: f64,
	max_zoom: f64,
}

/// Everything the workflow canvas owns: the committed graph plus the
/// transient gesture, menu and dialog state layered over it.
///
/// Pointer coordinates passed in are relative to the canvas pane; they are
/// mapped into canvas space through the current [`ViewTransform`].
#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowEditor {
	/// Workflow title shown in the toolbar.
	pub name: String,
	/// The committed graph.
	pub store: WorkflowStore,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node being moved, if any.
	pub drag: Option<NodeDrag>,
	/// Pane drag in progress, if any.
	pub pan: Option<PanState>,
	/// Connection being drawn, if any.
	pub link: Option<PendingLink>,
	/// Open node context menu.
	pub menu: Option<ContextMenu>,
	/// Open node or archive dialog.
	pub dialog: Option<ActiveDialog>,
	/// Archived versions, oldest first.
	pub archives: Vec<ArchiveRecord>,
	settings: EditorSettings,
}

impl WorkflowEditor {
	/// An empty workflow named `name`, tuned by `config`.
	pub fn new(name: &str, config: &DashboardConfig) -> Self {
		Self {
			name: name.to_string(),
			store: WorkflowStore::new(),
			transform: ViewTransform::default(),
			drag: None,
			pan: None,
			link: None,
			menu: None,
			dialog: None,
			archives: Vec::new(),
			settings: EditorSettings {
				policy: config.connection_policy,
				copy_offset: config.copy_offset,
				mount_candidates: config.mount_candidates.clone(),
				min_zoom: config.min_zoom,
				max_zoom: config.max_zoom,
			},
		}
	}

	/// Databases the mount dialog offers.
	pub fn mount_candidates(&self) -> &[String] {
		&self.settings.mount_candidates
	}

	/// Map a pane point into canvas space.
	pub fn screen_to_canvas(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Insert a node from a palette drag dropped at pane point (`sx`, `sy`).
	pub fn drop_payload(
		&mut self,
		payload: &DragPayload,
		sx: f64,
		sy: f64,
	) -> Result<NodeId, DropError> {
		let (kind, template) = payload.decode()?;
		let position = self.screen_to_canvas(sx, sy);
		let node = template.instantiate(kind, position);
		let id = node.id.clone();
		info!("dropped '{}' at ({:.0}, {:.0})", template.title(), position.x, position.y);
		self.store.add_node(node);
		Ok(id)
	}

	/// Turn a port-to-port gesture into an edge. The pair is normalized so
	/// the edge always runs from an output to an input.
	pub fn connect(&mut self, a: &PortRef, b: &PortRef) -> Result<String, ConnectError> {
		let (source, target) = match (a.side, b.side) {
			(PortSide::Output, PortSide::Input) => (a, b),
			(PortSide::Input, PortSide::Output) => (b, a),
			_ => return Err(ConnectError::SameDirection),
		};
		let source_type = self.port_type(source)?;
		let target_type = self.port_type(target)?;
		if self.settings.policy == ConnectionPolicy::MatchingTypes && source_type != target_type {
			return Err(ConnectError::TypeMismatch {
				source_type,
				target_type,
			});
		}

		let edge = Edge::new(
			source.node.clone(),
			&source.port,
			target.node.clone(),
			&target.port,
		);
		let id = match self.store.edges().iter().find(|e| e.same_endpoints(&edge)) {
			Some(existing) => existing.id.clone(),
			None => {
				let id = edge.id.clone();
				self.store.add_edge(edge);
				info!("connected {}:{} -> {}:{}", source.node, source.port, target.node, target.port);
				id
			}
		};
		Ok(id)
	}

	fn port_type(&self, port: &PortRef) -> Result<String, ConnectError> {
		let node = self
			.store
			.node(&port.node)
			.ok_or_else(|| ConnectError::UnknownNode(port.node.clone()))?;
		node.data
			.port(port.side, &port.port)
			.map(|p| p.kind.clone())
			.ok_or_else(|| ConnectError::UnknownPort {
				node: port.node.clone(),
				port: port.port.clone(),
				side: port.side,
			})
	}

	/// Start drawing a connection out of `from`.
	pub fn begin_link(&mut self, from: PortRef, sx: f64, sy: f64) {
		let Some(node) = self.store.node(&from.node) else {
			return;
		};
		let Some(anchor) = render::port_anchor(node, from.side, &from.port) else {
			return;
		};
		self.link = Some(PendingLink {
			from,
			anchor,
			cursor: self.screen_to_canvas(sx, sy),
		});
	}

	/// Complete a pending link on `target`. `None` when no link was pending.
	pub fn finish_link(&mut self, target: &PortRef) -> Option<Result<String, ConnectError>> {
		let link = self.link.take()?;
		Some(self.connect(&link.from, target))
	}

	/// Grab a node at pane point (`sx`, `sy`).
	pub fn begin_node_drag(&mut self, id: &NodeId, sx: f64, sy: f64) {
		if let Some(node) = self.store.node(id) {
			self.drag = Some(NodeDrag {
				node_id: id.clone(),
				start_x: sx,
				start_y: sy,
				node_start: node.position,
			});
		}
	}

	/// Grab the empty pane.
	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = Some(PanState {
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		});
	}

	/// Advance whichever gesture is active.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		if let Some(drag) = &self.drag {
			let (dx, dy) = (
				(sx - drag.start_x) / self.transform.k,
				(sy - drag.start_y) / self.transform.k,
			);
			let id = drag.node_id.clone();
			let position = drag.node_start.offset(dx, dy);
			self.store.update_node(&id, NodePatch::position(position));
		} else if let Some(pan) = &self.pan {
			self.transform.x = pan.transform_start_x + (sx - pan.start_x);
			self.transform.y = pan.transform_start_y + (sy - pan.start_y);
		}
		if self.link.is_some() {
			let cursor = self.screen_to_canvas(sx, sy);
			if let Some(link) = self.link.as_mut() {
				link.cursor = cursor;
			}
		}
	}

	/// End every pointer gesture; a link released off a port is dropped.
	pub fn pointer_released(&mut self) {
		self.drag = None;
		self.pan = None;
		if self.link.take().is_some() {
			debug!("connection released off a port");
		}
	}

	/// Zoom around pane point (`sx`, `sy`), keeping it fixed on screen.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { ZOOM_OUT } else { ZOOM_IN };
		let new_k =
			(self.transform.k * factor).clamp(self.settings.min_zoom, self.settings.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Open the menu for `id` at pane offset (`top`, `left`).
	pub fn open_context_menu(&mut self, id: &NodeId, top: f64, left: f64) {
		if self.store.contains(id) {
			self.menu = Some(ContextMenu {
				node_id: id.clone(),
				top,
				left,
			});
		}
	}

	/// Close the context menu.
	pub fn close_menu(&mut self) {
		self.menu = None;
	}

	/// Handle a click anywhere on the page. The menu stays open only when
	/// the click landed inside it. Returns whether the menu was closed.
	pub fn dismiss_menu(&mut self, inside_menu: bool) -> bool {
		if inside_menu || self.menu.is_none() {
			return false;
		}
		self.menu = None;
		true
	}

	/// Run a menu action against the menu's node. The menu closes either way.
	pub fn apply_menu_action(&mut self, action: MenuAction) {
		let Some(menu) = self.menu.take() else {
			return;
		};
		match action {
			MenuAction::Copy => {
				self.copy_node(&menu.node_id);
			}
			MenuAction::EditDescription => self.open_description_dialog(&menu.node_id),
			MenuAction::Delete => {
				self.delete_node(&menu.node_id);
			}
		}
	}

	/// Duplicate a node beside itself. Returns the copy's id.
	pub fn copy_node(&mut self, id: &NodeId) -> Option<NodeId> {
		let original = self.store.node(id)?;
		let offset = self.settings.copy_offset;
		let mut copy = original.clone();
		copy.id = NodeId::generate();
		copy.position = original.position.offset(offset, offset);
		copy.data.label = format!("{} (Copy)", original.data.label);
		let new_id = copy.id.clone();
		self.store.add_node(copy);
		Some(new_id)
	}

	/// Remove a node with its edges, closing any menu or dialog bound to it.
	pub fn delete_node(&mut self, id: &NodeId) -> bool {
		if !self.store.remove_node(id) {
			return false;
		}
		info!("deleted node {id}");
		if self.menu.as_ref().is_some_and(|m| &m.node_id == id) {
			self.menu = None;
		}
		if self.dialog.as_ref().and_then(ActiveDialog::target) == Some(id) {
			self.dialog = None;
		}
		if self.drag.as_ref().is_some_and(|d| &d.node_id == id) {
			self.drag = None;
		}
		if self.link.as_ref().is_some_and(|l| &l.from.node == id) {
			self.link = None;
		}
		true
	}

	/// Start naming a new archive.
	pub fn open_archive_dialog(&mut self) {
		self.menu = None;
		self.dialog = Some(ActiveDialog::Archive(ArchiveDraft::default()));
	}

	/// Edit the databases mounted on `id`.
	pub fn open_mount_dialog(&mut self, id: &NodeId) {
		if let Some(node) = self.store.node(id) {
			self.menu = None;
			self.dialog = Some(ActiveDialog::Mount(MountDraft {
				node_id: id.clone(),
				node_label: node.data.label.clone(),
				selection: node.data.db.clone(),
			}));
		}
	}

	/// Edit the description of `id`.
	pub fn open_description_dialog(&mut self, id: &NodeId) {
		if let Some(node) = self.store.node(id) {
			self.menu = None;
			self.dialog = Some(ActiveDialog::Description(DescriptionDraft {
				node_id: id.clone(),
				text: node.data.description.clone().unwrap_or_default(),
			}));
		}
	}

	/// Update the archive name draft.
	pub fn set_archive_name(&mut self, name: String) {
		if let Some(ActiveDialog::Archive(draft)) = &mut self.dialog {
			draft.name = name;
		}
	}

	/// Update the description draft.
	pub fn set_description_text(&mut self, text: String) {
		if let Some(ActiveDialog::Description(draft)) = &mut self.dialog {
			draft.text = text;
		}
	}

	/// Flip `db` in the mount draft.
	pub fn toggle_mount(&mut self, db: &str) {
		if let Some(ActiveDialog::Mount(draft)) = &mut self.dialog {
			draft.toggle(db);
		}
	}

	/// Empty the mount draft.
	pub fn clear_mounts(&mut self) {
		if let Some(ActiveDialog::Mount(draft)) = &mut self.dialog {
			draft.clear_all();
		}
	}

	/// Whether the open draft may be committed.
	pub fn can_confirm_dialog(&self) -> bool {
		match &self.dialog {
			Some(ActiveDialog::Archive(draft)) => draft.can_confirm(),
			Some(_) => true,
			None => false,
		}
	}

	/// Commit the open dialog's draft. Leaves the dialog open if the draft
	/// is not confirmable.
	pub fn confirm_dialog(&mut self) -> Option<DialogCommit> {
		if !self.can_confirm_dialog() {
			return None;
		}
		match self.dialog.take()? {
			ActiveDialog::Archive(draft) => {
				let record = ArchiveRecord {
					name: draft.name.trim().to_string(),
					nodes: self.store.nodes().len(),
					edges: self.store.edges().len(),
				};
				info!("archiving workflow as '{}'", record.name);
				self.archives.push(record.clone());
				Some(DialogCommit::Archived(record))
			}
			ActiveDialog::Mount(draft) => {
				let patch = NodePatch {
					db: Some(draft.selection.clone()),
					..NodePatch::default()
				};
				self.store.update_node(&draft.node_id, patch).then(|| {
					DialogCommit::Mounted {
						node_id: draft.node_id,
						db: draft.selection,
					}
				})
			}
			ActiveDialog::Description(draft) => {
				let patch = NodePatch {
					description: Some(draft.text),
					..NodePatch::default()
				};
				self.store
					.update_node(&draft.node_id, patch)
					.then(|| DialogCommit::Described {
						node_id: draft.node_id,
					})
			}
		}
	}

	/// Close the dialog, discarding its draft.
	pub fn cancel_dialog(&mut self) {
		self.dialog = None;
	}
}
