//! End-to-end editing sessions against the workflow editor state, driven
//! the way the canvas view drives it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use conductor::components::workflow::{
	DialogCommit, DragPayload, MenuAction, NodeId, NodeKind, NodeStatus, PortRef, PortSide, ScriptedRoll,
	WorkflowEditor, WorkflowStore, default_palette, start_run,
};
use conductor::config::DashboardConfig;
use conductor::timer::ManualScheduler;

fn editor() -> WorkflowEditor {
	WorkflowEditor::new("Integration", &DashboardConfig::default())
}

fn drop_template(editor: &mut WorkflowEditor, label: &str, sx: f64, sy: f64) -> NodeId {
	let template = default_palette()
		.into_iter()
		.find(|t| t.label == label)
		.expect("template in palette");
	let payload = DragPayload::encode(NodeKind::Microapplication, &template).expect("encodes");
	editor.drop_payload(&payload, sx, sy).expect("drop accepted")
}

#[test]
fn login_dropped_then_deleted_from_its_menu() {
	let mut editor = editor();
	let login = drop_template(&mut editor, "Login", 100.0, 100.0);

	let node = editor.store.node(&login).expect("login node");
	let names = |ports: &[conductor::components::workflow::Port]| -> Vec<String> {
		ports.iter().map(|p| p.name.clone()).collect()
	};
	assert_eq!(names(&node.data.inputs), ["Username", "Password"]);
	assert_eq!(names(&node.data.outputs), ["Auth Token"]);
	assert_eq!(node.data.status, NodeStatus::Idle);

	editor.open_context_menu(&login, 130.0, 170.0);
	let menu = editor.menu.clone().expect("menu open");
	assert_eq!((menu.top, menu.left), (130.0, 170.0));
	editor.apply_menu_action(MenuAction::Delete);

	assert!(editor.store.is_empty());
	assert!(editor.menu.is_none());
}

#[test]
fn drop_connect_and_delete_through_the_menu() {
	let mut editor = editor();
	let login = drop_template(&mut editor, "Login", 100.0, 100.0);
	let profile = drop_template(&mut editor, "User Microapplication", 400.0, 100.0);

	let node = editor.store.node(&login).expect("login node");
	assert_eq!(node.position.x, 100.0);
	assert_eq!(node.data.inputs.len(), 2);
	assert_eq!(node.data.outputs.len(), 1);

	editor.begin_link(PortRef::new(login.clone(), PortSide::Output, "out-1"), 300.0, 120.0);
	let edge = editor
		.finish_link(&PortRef::new(profile.clone(), PortSide::Input, "in-1"))
		.expect("link was pending")
		.expect("ports connect");
	assert!(editor.store.edges().iter().any(|e| e.id == edge));
	assert!(editor.link.is_none());

	editor.open_context_menu(&login, 120.0, 140.0);
	assert!(editor.menu.is_some());
	editor.apply_menu_action(MenuAction::Delete);

	assert!(editor.menu.is_none());
	assert!(!editor.store.contains(&login));
	assert!(editor.store.edges().is_empty());
	assert!(editor.store.contains(&profile));
}

#[test]
fn copy_then_describe_and_mount() {
	let mut editor = editor();
	let login = drop_template(&mut editor, "Login", 0.0, 0.0);

	editor.open_context_menu(&login, 0.0, 0.0);
	editor.apply_menu_action(MenuAction::Copy);
	assert_eq!(editor.store.nodes().len(), 2);
	let copy = &editor.store.nodes()[1];
	assert_eq!(copy.data.label, "Login (Copy)");
	assert_eq!((copy.position.x, copy.position.y), (50.0, 50.0));

	editor.open_context_menu(&login, 0.0, 0.0);
	editor.apply_menu_action(MenuAction::EditDescription);
	editor.set_description_text("Handles user authentication".into());
	assert!(matches!(editor.confirm_dialog(), Some(DialogCommit::Described { .. })));
	assert_eq!(
		editor.store.node(&login).and_then(|n| n.data.description.clone()).as_deref(),
		Some("Handles user authentication")
	);

	editor.open_mount_dialog(&login);
	editor.toggle_mount("users_db");
	editor.toggle_mount("minio_storage");
	assert!(matches!(editor.confirm_dialog(), Some(DialogCommit::Mounted { .. })));
	let db = &editor.store.node(&login).expect("login node").data.db;
	assert_eq!(db.len(), 2);
	assert!(db.contains("users_db"));
}

#[test]
fn archive_requires_a_name() {
	let mut editor = editor();
	drop_template(&mut editor, "Login", 0.0, 0.0);
	editor.open_archive_dialog();
	assert!(editor.confirm_dialog().is_none());
	editor.set_archive_name("  v1.0-stable ".into());
	match editor.confirm_dialog() {
		Some(DialogCommit::Archived(record)) => {
			assert_eq!(record.name, "v1.0-stable");
			assert_eq!(record.nodes, 1);
		}
		other => panic!("unexpected commit: {other:?}"),
	}
	assert!(editor.dialog.is_none());
}

#[test]
fn mock_run_settles_every_node_in_order() {
	let mut editor = editor();
	for (i, label) in ["Login", "User Microapplication", "Order Microapplication"].iter().enumerate() {
		drop_template(&mut editor, label, i as f64 * 300.0, 0.0);
	}
	let cell = Rc::new(RefCell::new(editor.store.clone()));
	let scheduler = ManualScheduler::new();
	let step = Duration::from_millis(1500);

	let run = start_run(&scheduler, &cell, ScriptedRoll::new(vec![0.1, 0.85, 0.95]), step);
	assert_eq!(run.len(), 3);
	let statuses = |cell: &Rc<RefCell<WorkflowStore>>| -> Vec<NodeStatus> {
		cell.borrow().nodes().iter().map(|n| n.data.status).collect()
	};
	assert!(statuses(&cell).iter().all(|s| *s == NodeStatus::Running));

	scheduler.advance(step);
	assert_eq!(statuses(&cell)[0], NodeStatus::Success);
	assert_eq!(statuses(&cell)[1], NodeStatus::Running);

	scheduler.advance(step * 2);
	assert_eq!(
		statuses(&cell),
		vec![NodeStatus::Success, NodeStatus::Warning, NodeStatus::Error]
	);
	assert_eq!(scheduler.pending(), 0);
}
