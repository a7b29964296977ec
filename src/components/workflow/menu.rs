use super::types::NodeId;

/// Right-click menu anchored to a node, in pane-relative pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
	pub node_id: NodeId,
	pub top: f64,
	pub left: f64,
}

/// Entries of the node context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
	/// Duplicate the node, offset down and to the right.
	Copy,
	/// Open the description dialog.
	EditDescription,
	/// Remove the node and its edges.
	Delete,
}

impl MenuAction {
	/// Menu order.
	pub const ALL: [MenuAction; 3] = [Self::Copy, Self::EditDescription, Self::Delete];

	/// Text of the menu entry.
	pub fn label(self) -> &'static str {
		match self {
			Self::Copy => "Copy Node",
			Self::EditDescription => "Edit Description",
			Self::Delete => "Delete Node",
		}
	}

	/// Destructive entries are set apart and styled as such.
	pub fn is_destructive(self) -> bool {
		matches!(self, Self::Delete)
	}
}
