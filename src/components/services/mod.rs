mod component;
mod state;

pub use component::ServicesPanel;
pub use state::{EnvVar, Service, ServiceDetail, ServiceEdit, ServiceRegistry, ServiceStatus};
