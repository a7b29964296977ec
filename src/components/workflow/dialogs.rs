//! Draft state for the workflow dialogs. A draft is seeded when its dialog
//! opens and only reaches the store when confirmed.

use super::types::{MountSet, NodeId};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchiveDraft {
	pub name: String,
}

impl ArchiveDraft {
	pub fn can_confirm(&self) -> bool {
		!self.name.trim().is_empty()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct MountDraft {
	pub node_id: NodeId,
	pub node_label: String,
	pub selection: MountSet,
}

impl MountDraft {
	pub fn toggle(&mut self, db: &str) {
		self.selection.toggle(db);
	}

	/// Empty the selection; the dialog stays open.
	pub fn clear_all(&mut self) {
		self.selection.clear();
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DescriptionDraft {
	pub node_id: NodeId,
	pub text: String,
}

/// The single dialog that may be open over the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveDialog {
	Archive(ArchiveDraft),
	Mount(MountDraft),
	Description(DescriptionDraft),
}

impl ActiveDialog {
	pub fn target(&self) -> Option<&NodeId> {
		match self {
			Self::Archive(_) => None,
			Self::Mount(draft) => Some(&draft.node_id),
			Self::Description(draft) => Some(&draft.node_id),
		}
	}
}

/// What a confirmed dialog did.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogCommit {
	/// The workflow was archived under a name.
	Archived(ArchiveRecord),
	/// A node's mounted databases were replaced.
	Mounted {
		/// Node the dialog was opened on.
		node_id: NodeId,
		/// The saved selection.
		db: MountSet,
	},
	/// A node's description was saved.
	Described {
		/// Node the dialog was opened on.
		node_id: NodeId,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveRecord {
	pub name: String,
	pub nodes: usize,
	pub edges: usize,
}
