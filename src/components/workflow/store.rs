use serde::{Deserialize, Serialize};

use super::types::{Edge, Node, NodeId, NodePatch, NodeStatus, PortSide};

/// Nodes and edges of one workflow.
///
/// Mutations report whether anything changed; unknown ids are ignored.
/// Edges always point at live nodes and ports.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl WorkflowStore {
	/// An empty workflow.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a saved snapshot, dropping any edge whose endpoints are missing.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let raw: WorkflowStore = serde_json::from_str(json)?;
		let mut store = Self::new();
		for node in raw.nodes {
			store.add_node(node);
		}
		for edge in raw.edges {
			store.add_edge(edge);
		}
		Ok(store)
	}

	/// Pretty-printed snapshot, readable by [`WorkflowStore::from_json`].
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string_pretty(self)
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Look up a node by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| &n.id == id)
	}

	/// Whether a node with `id` exists.
	pub fn contains(&self, id: &NodeId) -> bool {
		self.node(id).is_some()
	}

	/// Whether the workflow has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Append a node. Rejected when its id is taken.
	pub fn add_node(&mut self, node: Node) -> bool {
		if self.contains(&node.id) {
			return false;
		}
		self.nodes.push(node);
		true
	}

	/// Remove a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &NodeId) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| &n.id != id);
		if self.nodes.len() == before {
			return false;
		}
		self.remove_edges_for_node(id);
		true
	}

	/// Apply `patch` to the node's data.
	pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> bool {
		match self.nodes.iter_mut().find(|n| &n.id == id) {
			Some(slot) => {
				*slot = patch.apply(slot);
				true
			}
			None => false,
		}
	}

	/// Insert an edge if both endpoints resolve and it is not a duplicate.
	pub fn add_edge(&mut self, edge: Edge) -> bool {
		if !self.endpoint_exists(&edge.source, PortSide::Output, &edge.source_handle)
			|| !self.endpoint_exists(&edge.target, PortSide::Input, &edge.target_handle)
		{
			return false;
		}
		if self.edges.iter().any(|e| e.id == edge.id || e.same_endpoints(&edge)) {
			return false;
		}
		self.edges.push(edge);
		true
	}

	/// Remove one edge by id.
	pub fn remove_edge(&mut self, edge_id: &str) -> bool {
		let before = self.edges.len();
		self.edges.retain(|e| e.id != edge_id);
		self.edges.len() != before
	}

	/// Drop every edge touching `id`, returning how many went.
	pub fn remove_edges_for_node(&mut self, id: &NodeId) -> usize {
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		before - self.edges.len()
	}

	/// Mark every node as running and return their ids in canvas order.
	pub fn begin_run(&mut self) -> Vec<NodeId> {
		self.nodes
			.iter_mut()
			.map(|node| {
				node.data.status = NodeStatus::Running;
				node.id.clone()
			})
			.collect()
	}

	fn endpoint_exists(&self, node: &NodeId, side: PortSide, port: &str) -> bool {
		self.node(node)
			.is_some_and(|n| n.data.port(side, port).is_some())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow::types::{NodeData, NodeKind, Port, Position};

	fn node(id: &str) -> Node {
		Node {
			id: NodeId::from(id),
			kind: NodeKind::Microapplication,
			position: Position::default(),
			data: NodeData {
				label: id.to_uppercase(),
				inputs: vec![Port::new("in-1", "In", "String")],
				outputs: vec![Port::new("out-1", "Out", "String")],
				..NodeData::default()
			},
		}
	}

	fn chain() -> WorkflowStore {
		let mut store = WorkflowStore::new();
		for id in ["a", "b", "c"] {
			assert!(store.add_node(node(id)));
		}
		assert!(store.add_edge(Edge::new("a".into(), "out-1", "b".into(), "in-1")));
		assert!(store.add_edge(Edge::new("b".into(), "out-1", "c".into(), "in-1")));
		assert!(store.add_edge(Edge::new("a".into(), "out-1", "c".into(), "in-1")));
		store
	}

	#[test]
	fn duplicate_node_id_is_rejected() {
		let mut store = WorkflowStore::new();
		assert!(store.add_node(node("a")));
		assert!(!store.add_node(node("a")));
		assert_eq!(store.nodes().len(), 1);
	}

	#[test]
	fn remove_node_cascades_edges() {
		let mut store = chain();
		assert!(store.remove_node(&"b".into()));

		assert!(!store.contains(&"b".into()));
		assert_eq!(store.edges().len(), 1);
		for edge in store.edges() {
			assert!(store.contains(&edge.source));
			assert!(store.contains(&edge.target));
		}
	}

	#[test]
	fn unknown_ids_are_noops() {
		let mut store = chain();
		let before = store.clone();
		assert!(!store.remove_node(&"zzz".into()));
		assert!(!store.update_node(&"zzz".into(), NodePatch::status(NodeStatus::Error)));
		assert!(!store.remove_edge("nope"));
		assert_eq!(store.remove_edges_for_node(&"zzz".into()), 0);
		assert_eq!(store, before);
	}

	#[test]
	fn dangling_or_duplicate_edges_are_rejected() {
		let mut store = chain();
		assert!(!store.add_edge(Edge::new("a".into(), "out-1", "ghost".into(), "in-1")));
		assert!(!store.add_edge(Edge::new("a".into(), "out-9", "b".into(), "in-1")));
		// input used as a source
		assert!(!store.add_edge(Edge::new("a".into(), "in-1", "b".into(), "in-1")));
		assert!(!store.add_edge(Edge::new("a".into(), "out-1", "b".into(), "in-1")));
		assert_eq!(store.edges().len(), 3);
	}

	#[test]
	fn update_replaces_node() {
		let mut store = chain();
		assert!(store.update_node(
			&"a".into(),
			NodePatch {
				description: Some("entry".into()),
				..NodePatch::default()
			}
		));
		assert_eq!(
			store.node(&"a".into()).and_then(|n| n.data.description.clone()),
			Some("entry".into())
		);
	}

	#[test]
	fn begin_run_marks_everything_running() {
		let mut store = chain();
		let ids = store.begin_run();
		assert_eq!(ids, vec![NodeId::from("a"), "b".into(), "c".into()]);
		assert!(store.nodes().iter().all(|n| n.data.status == NodeStatus::Running));
	}

	#[test]
	fn snapshot_round_trip_drops_dangling_edges() {
		let json = r#"{
			"nodes": [{"id":"a","type":"microapplication","position":{"x":0,"y":0},
				"data":{"label":"A","outputs":[{"id":"out-1","name":"Out","type":"JSON"}],"status":"idle","db":"users_db"}}],
			"edges": [{"id":"e1","source":"a","sourceHandle":"out-1","target":"gone","targetHandle":"in-1"}]
		}"#;
		let store = WorkflowStore::from_json(json).unwrap();
		assert_eq!(store.nodes().len(), 1);
		assert!(store.edges().is_empty());
		assert!(store.nodes()[0].data.db.contains("users_db"));

		let again = WorkflowStore::from_json(&store.to_json().unwrap()).unwrap();
		assert_eq!(again, store);
	}
}
