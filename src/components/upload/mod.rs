mod component;
mod state;

pub use component::UploadWizardView;
pub use state::{ACCEPTED_EXTENSIONS, ArtifactKind, FileMeta, UploadWizard, WizardStep, accept_attr};
