mod component;
mod state;

pub use component::DatabasePanel;
pub use state::{
	ConnectionMode, DUMP_EXTENSIONS, DatabaseCatalog, DatabaseItem, DbKind, MinioConfig, Preview,
	PreviewField, PreviewRow, RemoteConfig, SourceForm,
};
