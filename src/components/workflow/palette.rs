//! Node templates offered in the component library, and the drag payload
//! that carries one onto the canvas.

use serde::{Deserialize, Serialize};

use super::types::{MountSet, Node, NodeData, NodeId, NodeKind, NodeStatus, Port, Position};
use crate::error::DropError;

/// Data-transfer format holding the node kind tag.
pub const KIND_FORMAT: &str = "application/x-conductor-kind";
/// Data-transfer format holding the JSON template.
pub const TEMPLATE_FORMAT: &str = "application/x-conductor-template";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub service_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub inputs: Vec<Port>,
	#[serde(default)]
	pub outputs: Vec<Port>,
	#[serde(default, skip_serializing_if = "MountSet::is_empty")]
	pub db: MountSet,
}

impl NodeTemplate {
	/// Title shown in the palette, e.g. "User Service / Login".
	pub fn title(&self) -> String {
		match &self.service_name {
			Some(service) => format!("{service} / {}", self.label),
			None => self.label.clone(),
		}
	}

	pub fn instantiate(&self, kind: NodeKind, position: Position) -> Node {
		Node {
			id: NodeId::generate(),
			kind,
			position,
			data: NodeData {
				label: self.label.clone(),
				description: self.description.clone(),
				service_name: self.service_name.clone(),
				inputs: self.inputs.clone(),
				outputs: self.outputs.clone(),
				status: NodeStatus::Idle,
				db: self.db.clone(),
			},
		}
	}
}

/// The two strings a palette entry puts on the drag operation.
#[derive(Clone, Debug, PartialEq)]
pub struct DragPayload {
	/// Node kind tag.
	pub kind: String,
	/// The template as JSON.
	pub template: String,
}

impl DragPayload {
	/// Payload for dragging `template` off the palette.
	pub fn encode(kind: NodeKind, template: &NodeTemplate) -> Result<Self, serde_json::Error> {
		Ok(Self {
			kind: kind.tag().to_string(),
			template: serde_json::to_string(template)?,
		})
	}

	/// Parse a dropped payload. A drop without a kind is not a palette drag.
	pub fn decode(&self) -> Result<(NodeKind, NodeTemplate), DropError> {
		if self.kind.is_empty() {
			return Err(DropError::MissingKind);
		}
		let kind =
			NodeKind::from_tag(&self.kind).ok_or_else(|| DropError::UnknownKind(self.kind.clone()))?;
		let template = serde_json::from_str(&self.template)?;
		Ok((kind, template))
	}
}

type PortSpec<'a> = (&'a str, &'a str, &'a str);

fn ports(list: &[PortSpec<'_>]) -> Vec<Port> {
	list.iter()
		.map(|(id, name, kind)| Port::new(id, name, kind))
		.collect()
}

fn template(
	service: Option<&str>,
	label: &str,
	inputs: &[PortSpec<'_>],
	outputs: &[PortSpec<'_>],
) -> NodeTemplate {
	NodeTemplate {
		label: label.to_string(),
		service_name: service.map(str::to_string),
		description: None,
		inputs: ports(inputs),
		outputs: ports(outputs),
		db: MountSet::default(),
	}
}

/// Templates available in the component library.
pub fn default_palette() -> Vec<NodeTemplate> {
	vec![
		template(
			Some("User Service"),
			"Login",
			&[("in-1", "Username", "String"), ("in-2", "Password", "String")],
			&[("out-1", "Auth Token", "String")],
		),
		template(
			None,
			"User Microapplication",
			&[("in-1", "Auth Token", "String")],
			&[("out-1", "User Profile", "JSON")],
		),
		template(
			None,
			"Order Microapplication",
			&[("in-2", "User ID", "String"), ("in-3", "Cart ID", "String")],
			&[("out-2", "Order Details", "JSON")],
		),
		template(
			None,
			"Payment Microapplication",
			&[("in-4", "Order ID", "String"), ("in-5", "Amount", "Number")],
			&[("out-3", "Transaction ID", "String")],
		),
		template(
			None,
			"Notification Microapplication",
			&[("in-6", "User ID", "String"), ("in-7", "Message", "String")],
			&[("out-4", "Status", "Boolean")],
		),
	]
}
