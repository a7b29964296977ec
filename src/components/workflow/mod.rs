//! Workflow canvas: a node/edge editor with a component palette, context
//! menu, node dialogs and a mock run.

mod component;
mod dialogs;
mod menu;
mod node;
mod overlays;
mod palette;
mod render;
mod sidebar;
mod simulator;
mod state;
mod store;
mod types;

pub use component::WorkflowEditorView;
pub use dialogs::DialogCommit;
pub use menu::MenuAction;
pub use palette::{DragPayload, default_palette};
pub use simulator::{ScriptedRoll, start_run};
pub use state::{PortRef, WorkflowEditor};
pub use store::WorkflowStore;
pub use types::{ConnectionPolicy, NodeId, NodeKind, NodeStatus, Port, PortSide};
