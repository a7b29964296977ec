use thiserror::Error;

use crate::components::workflow::{NodeId, PortSide};

/// Errors raised while turning a drag payload into a canvas node.
#[derive(Error, Debug)]
pub enum DropError {
	#[error("Drag payload carries no node kind")]
	MissingKind,

	#[error("Unknown node kind '{0}'")]
	UnknownKind(String),

	#[error("Failed to parse node template: {0}")]
	MalformedTemplate(#[from] serde_json::Error),
}

/// Errors raised by a connection gesture between two ports.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectError {
	#[error("Node '{0}' is not on the canvas")]
	UnknownNode(NodeId),

	#[error("Node '{node}' has no {side:?} port '{port}'")]
	UnknownPort {
		node: NodeId,
		port: String,
		side: PortSide,
	},

	#[error("A connection needs one output and one input port")]
	SameDirection,

	#[error("Port type '{source_type}' cannot feed '{target_type}'")]
	TypeMismatch {
		source_type: String,
		target_type: String,
	},
}

/// Errors raised when a picked or dropped file is not accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
	#[error("'{name}' is not one of the accepted types ({accepted})")]
	UnsupportedExtension { name: String, accepted: String },
}
