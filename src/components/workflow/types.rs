use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier of a node on the canvas.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// A fresh random id.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	/// The id as written in snapshots.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

/// A named, typed connection point on a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
	/// Unique within its node and side.
	pub id: String,
	/// Label shown next to the handle.
	pub name: String,
	#[serde(rename = "type")]
	/// Data type name, e.g. `String` or `JSON`.
	pub kind: String,
}

impl Port {
	/// Build a port from its id, label and type name.
	pub fn new(id: &str, name: &str, kind: &str) -> Self {
		Self {
			id: id.to_string(),
			name: name.to_string(),
			kind: kind.to_string(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Which column of a node a port sits in.
pub enum PortSide {
	/// Left column, receives edges.
	Input,
	/// Right column, edges start here.
	Output,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Run state of a node, as shown on its card.
pub enum NodeStatus {
	#[default]
	/// Never run, or reset.
	Idle,
	/// Part of an in-flight run.
	Running,
	/// Settled fine.
	Success,
	/// Settled with a failure.
	Error,
	/// Settled with warnings.
	Warning,
}

impl NodeStatus {
	/// Whether a run has settled this node.
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Success | Self::Error | Self::Warning)
	}

	/// Lowercase name, also used as a CSS class suffix.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Running => "running",
			Self::Success => "success",
			Self::Error => "error",
			Self::Warning => "warning",
		}
	}
}

/// Node kind tag carried by the drag payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	#[default]
	/// A deployable microapplication.
	Microapplication,
}

impl NodeKind {
	/// Value written to the drag payload.
	pub fn tag(self) -> &'static str {
		match self {
			Self::Microapplication => "microapplication",
		}
	}

	/// Parse a tag written by [`NodeKind::tag`].
	pub fn from_tag(tag: &str) -> Option<Self> {
		match tag {
			"microapplication" => Some(Self::Microapplication),
			_ => None,
		}
	}
}

/// Databases mounted on a node. Always a list in memory; older payloads
/// stored a single name, which reads back as a one-element list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MountSet(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMounts {
	Absent(()),
	Single(String),
	Many(Vec<String>),
}

impl<'de> Deserialize<'de> for MountSet {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(match RawMounts::deserialize(deserializer)? {
			RawMounts::Absent(()) => Self::default(),
			RawMounts::Single(name) if name.is_empty() => Self::default(),
			RawMounts::Single(name) => Self(vec![name]),
			RawMounts::Many(names) => Self(names),
		})
	}
}

impl MountSet {
	pub fn new(names: Vec<String>) -> Self {
		Self(names)
	}

	pub fn names(&self) -> &[String] {
		&self.0
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.iter().any(|n| n == name)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Add `name` if missing, remove it otherwise.
	pub fn toggle(&mut self, name: &str) {
		if self.contains(name) {
			self.0.retain(|n| n != name);
		} else {
			self.0.push(name.to_string());
		}
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub service_name: Option<String>,
	#[serde(default)]
	pub inputs: Vec<Port>,
	#[serde(default)]
	pub outputs: Vec<Port>,
	#[serde(default)]
	pub status: NodeStatus,
	#[serde(default, skip_serializing_if = "MountSet::is_empty")]
	pub db: MountSet,
}

impl NodeData {
	pub fn port(&self, side: PortSide, port_id: &str) -> Option<&Port> {
		let ports = match side {
			PortSide::Input => &self.inputs,
			PortSide::Output => &self.outputs,
		};
		ports.iter().find(|p| p.id == port_id)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	pub position: Position,
	pub data: NodeData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	pub id: String,
	pub source: NodeId,
	pub source_handle: String,
	pub target: NodeId,
	pub target_handle: String,
}

impl Edge {
	pub fn new(source: NodeId, source_handle: &str, target: NodeId, target_handle: &str) -> Self {
		Self {
			id: format!("edge-{source}:{source_handle}-{target}:{target_handle}"),
			source,
			source_handle: source_handle.to_string(),
			target,
			target_handle: target_handle.to_string(),
		}
	}

	pub fn touches(&self, node: &NodeId) -> bool {
		&self.source == node || &self.target == node
	}

	pub fn same_endpoints(&self, other: &Edge) -> bool {
		self.source == other.source
			&& self.source_handle == other.source_handle
			&& self.target == other.target
			&& self.target_handle == other.target_handle
	}
}

/// Partial update for a node. Unset fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	pub position: Option<Position>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub status: Option<NodeStatus>,
	pub db: Option<MountSet>,
}

impl NodePatch {
	pub fn status(status: NodeStatus) -> Self {
		Self {
			status: Some(status),
			..Self::default()
		}
	}

	pub fn position(position: Position) -> Self {
		Self {
			position: Some(position),
			..Self::default()
		}
	}

	pub fn apply(self, node: &Node) -> Node {
		let mut next = node.clone();
		if let Some(position) = self.position {
			next.position = position;
		}
		if let Some(label) = self.label {
			next.data.label = label;
		}
		if let Some(description) = self.description {
			next.data.description = Some(description);
		}
		if let Some(status) = self.status {
			next.data.status = status;
		}
		if let Some(db) = self.db {
			next.data.db = db;
		}
		next
	}
}

/// How strictly a connection gesture is checked before becoming an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionPolicy {
	/// Any output may feed any input.
	#[default]
	Permissive,
	/// Port types must be equal.
	MatchingTypes,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn legacy_single_db_reads_as_list() {
		let data: NodeData = serde_json::from_str(
			r#"{"label":"Orders","inputs":[],"outputs":[],"status":"idle","db":"orders_db"}"#,
		)
		.unwrap();
		assert_eq!(data.db.names(), ["orders_db".to_string()]);

		let written = serde_json::to_value(&data).unwrap();
		assert_eq!(written["db"], serde_json::json!(["orders_db"]));
	}

	#[test]
	fn empty_or_null_db_reads_as_empty() {
		for raw in [r#""""#, "null", "[]"] {
			let json = format!(r#"{{"label":"A","db":{raw}}}"#);
			let data: NodeData = serde_json::from_str(&json).unwrap();
			assert!(data.db.is_empty(), "{raw}");
		}
		let data: NodeData = serde_json::from_str(r#"{"label":"A"}"#).unwrap();
		assert!(data.db.is_empty());
		assert_eq!(data.status, NodeStatus::Idle);
	}

	#[test]
	fn mount_toggle_twice_restores() {
		let mut mounts = MountSet::new(vec!["users_db".into()]);
		mounts.toggle("orders_db");
		assert!(mounts.contains("orders_db"));
		mounts.toggle("orders_db");
		assert_eq!(mounts, MountSet::new(vec!["users_db".into()]));
	}

	#[test]
	fn patch_only_touches_set_fields() {
		let node = Node {
			id: NodeId::from("n1"),
			kind: NodeKind::Microapplication,
			position: Position::new(1.0, 2.0),
			data: NodeData {
				label: "Login".into(),
				description: Some("auth".into()),
				..NodeData::default()
			},
		};
		let patched = NodePatch::status(NodeStatus::Running).apply(&node);
		assert_eq!(patched.data.status, NodeStatus::Running);
		assert_eq!(patched.data.description.as_deref(), Some("auth"));
		assert_eq!(patched.position, node.position);
	}

	#[test]
	fn status_serializes_lowercase() {
		assert_eq!(serde_json::to_string(&NodeStatus::Warning).unwrap(), r#""warning""#);
		assert_eq!(NodeKind::from_tag("microapplication"), Some(NodeKind::Microapplication));
		assert_eq!(NodeKind::from_tag("widget"), None);
	}
}
