mod component;
mod state;

pub use component::DeliveryPanel;
pub use state::{DbBinding, DeliveryBoard, DeployDraft, DeployTarget, MicroApp};
