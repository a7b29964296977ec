//! Node card geometry and edge paths. The node view lays its rows out with
//! these same constants so edges meet the port handles.

use super::types::{Node, NodeStatus, PortSide, Position};

pub const NODE_WIDTH: f64 = 220.0;
pub const HEADER_HEIGHT: f64 = 52.0;
pub const BODY_PADDING: f64 = 12.0;
pub const DB_ROW_HEIGHT: f64 = 20.0;
pub const DB_BLOCK_GAP: f64 = 12.0;
pub const PORT_ROW_HEIGHT: f64 = 24.0;
const MIN_CURVE: f64 = 40.0;

/// Height of the mounted-database block, zero when nothing is mounted.
pub fn db_block_height(node: &Node) -> f64 {
	match node.data.db.len() {
		0 => 0.0,
		n => n as f64 * DB_ROW_HEIGHT + DB_BLOCK_GAP,
	}
}

/// Canvas-space point where a port's handle sits.
pub fn port_anchor(node: &Node, side: PortSide, port_id: &str) -> Option<Position> {
	let ports = match side {
		PortSide::Input => &node.data.inputs,
		PortSide::Output => &node.data.outputs,
	};
	let index = ports.iter().position(|p| p.id == port_id)?;
	let x = match side {
		PortSide::Input => node.position.x,
		PortSide::Output => node.position.x + NODE_WIDTH,
	};
	let y = node.position.y
		+ HEADER_HEIGHT
		+ BODY_PADDING
		+ db_block_height(node)
		+ index as f64 * PORT_ROW_HEIGHT
		+ PORT_ROW_HEIGHT / 2.0;
	Some(Position::new(x, y))
}

/// SVG path for a horizontal bezier from `from` to `to`.
pub fn edge_path(from: Position, to: Position) -> String {
	let dx = ((to.x - from.x).abs() / 2.0).max(MIN_CURVE);
	format!(
		"M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}",
		from.x,
		from.y,
		from.x + dx,
		from.y,
		to.x - dx,
		to.y,
		to.x,
		to.y
	)
}

pub fn status_class(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Idle => "node-card status-idle",
		NodeStatus::Running => "node-card status-running",
		NodeStatus::Success => "node-card status-success",
		NodeStatus::Error => "node-card status-error",
		NodeStatus::Warning => "node-card status-warning",
	}
}

pub fn status_icon(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Idle => "",
		NodeStatus::Running => "⟳",
		NodeStatus::Success => "✔",
		NodeStatus::Error => "✖",
		NodeStatus::Warning => "⚠",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow::types::{MountSet, NodeData, NodeId, NodeKind, Port};

	fn node() -> Node {
		Node {
			id: NodeId::from("n"),
			kind: NodeKind::Microapplication,
			position: Position::new(100.0, 50.0),
			data: NodeData {
				label: "Login".into(),
				inputs: vec![Port::new("in-1", "Username", "String"), Port::new("in-2", "Password", "String")],
				outputs: vec![Port::new("out-1", "Auth Token", "String")],
				..NodeData::default()
			},
		}
	}

	#[test]
	fn anchors_sit_on_card_edges() {
		let node = node();
		let first = port_anchor(&node, PortSide::Input, "in-1").unwrap();
		let second = port_anchor(&node, PortSide::Input, "in-2").unwrap();
		let out = port_anchor(&node, PortSide::Output, "out-1").unwrap();

		assert_eq!(first.x, 100.0);
		assert_eq!(out.x, 100.0 + NODE_WIDTH);
		assert_eq!(second.y - first.y, PORT_ROW_HEIGHT);
		assert_eq!(first.y, out.y);
		assert!(port_anchor(&node, PortSide::Output, "in-1").is_none());
	}

	#[test]
	fn mounted_databases_push_ports_down() {
		let mut node = node();
		let bare = port_anchor(&node, PortSide::Input, "in-1").unwrap();
		let bare_block = db_block_height(&node);
		node.data.db = MountSet::new(vec!["users_db".into(), "orders_db".into()]);
		let mounted = port_anchor(&node, PortSide::Input, "in-1").unwrap();

		assert_eq!(mounted.y - bare.y, 2.0 * DB_ROW_HEIGHT + DB_BLOCK_GAP);
		assert_eq!(db_block_height(&node) - bare_block, 2.0 * DB_ROW_HEIGHT + DB_BLOCK_GAP);
	}

	#[test]
	fn edge_path_starts_and_ends_on_anchors() {
		let path = edge_path(Position::new(0.0, 10.0), Position::new(200.0, 30.0));
		assert!(path.starts_with("M 0.0 10.0 C 100.0 10.0"));
		assert!(path.ends_with("200.0 30.0"));
	}
}
