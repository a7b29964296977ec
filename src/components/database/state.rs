use log::info;
use uuid::Uuid;

use crate::components::pagination::Pager;
use crate::components::upload::FileMeta;

pub const DUMP_EXTENSIONS: &[&str] = &["sql", "dump"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DbKind {
	#[default]
	PostgreSql,
	MySql,
	Sqlite,
	MinIo,
}

impl DbKind {
	pub const ALL: [DbKind; 4] = [Self::PostgreSql, Self::MySql, Self::Sqlite, Self::MinIo];

	pub fn label(self) -> &'static str {
		match self {
			Self::PostgreSql => "PostgreSQL",
			Self::MySql => "MySQL",
			Self::Sqlite => "SQLite",
			Self::MinIo => "MinIO",
		}
	}

	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.label() == label)
	}

	pub fn is_object_store(self) -> bool {
		self == Self::MinIo
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseItem {
	pub id: String,
	pub name: String,
	pub kind: DbKind,
	pub size: String,
	pub records: u64,
	pub last_modified: String,
}

impl DatabaseItem {
	/// "1.2 GB • 15,000 records"
	pub fn summary(&self) -> String {
		format!("{} • {} records", self.size, group_thousands(self.records))
	}
}

fn group_thousands(n: u64) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionMode {
	#[default]
	File,
	Remote,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteConfig {
	pub ip: String,
	pub port: String,
	pub db_name: String,
	pub username: String,
	pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinioConfig {
	pub ip: String,
	pub port: String,
	pub bucket: String,
}

fn filled(value: &str) -> bool {
	!value.trim().is_empty()
}

/// The upload / connect card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceForm {
	pub kind: DbKind,
	pub mode: ConnectionMode,
	pub file: Option<FileMeta>,
	pub remote: RemoteConfig,
	pub minio: MinioConfig,
}

impl SourceForm {
	pub fn can_submit(&self) -> bool {
		if self.kind.is_object_store() {
			return filled(&self.minio.ip) && filled(&self.minio.port) && filled(&self.minio.bucket);
		}
		match self.mode {
			ConnectionMode::File => self.file.is_some(),
			ConnectionMode::Remote => {
				filled(&self.remote.ip) && filled(&self.remote.port) && filled(&self.remote.db_name)
			}
		}
	}

	/// "Connect" for live sources, "Upload" for dump files.
	pub fn submit_label(&self) -> &'static str {
		if self.kind.is_object_store() || self.mode == ConnectionMode::Remote {
			"Connect"
		} else {
			"Upload"
		}
	}

	/// Build the catalog entry and reset the part of the form that was used.
	pub fn submit(&mut self, today: &str) -> Option<DatabaseItem> {
		if !self.can_submit() {
			return None;
		}
		let (name, size) = if self.kind.is_object_store() {
			let bucket = std::mem::take(&mut self.minio).bucket;
			(bucket, "0 MB".to_string())
		} else {
			match self.mode {
				ConnectionMode::File => {
					let file = self.file.take()?;
					(file.stem().to_string(), file.size_label())
				}
				ConnectionMode::Remote => {
					let db_name = std::mem::take(&mut self.remote).db_name;
					(db_name, "Remote".to_string())
				}
			}
		};
		Some(DatabaseItem {
			id: Uuid::new_v4().to_string(),
			name: name.trim().to_string(),
			kind: self.kind,
			size,
			records: 0,
			last_modified: today.to_string(),
		})
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewRow {
	pub id: u32,
	pub name: String,
	pub email: String,
	pub role: String,
}

impl PreviewRow {
	pub fn get(&self, field: PreviewField) -> &str {
		match field {
			PreviewField::Name => &self.name,
			PreviewField::Email => &self.email,
			PreviewField::Role => &self.role,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewField {
	Name,
	Email,
	Role,
}

/// Data preview dialog. Edits land in `draft` until saved.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
	pub db_id: String,
	pub db_name: String,
	pub rows: Vec<PreviewRow>,
	pub draft: Vec<PreviewRow>,
	pub editing: bool,
}

impl Preview {
	pub fn shown(&self) -> &[PreviewRow] {
		if self.editing { &self.draft } else { &self.rows }
	}

	pub fn toggle_editing(&mut self) {
		self.editing = !self.editing;
		if self.editing {
			self.draft = self.rows.clone();
		}
	}

	pub fn set_cell(&mut self, row_id: u32, field: PreviewField, value: String) {
		if let Some(row) = self.draft.iter_mut().find(|r| r.id == row_id) {
			match field {
				PreviewField::Name => row.name = value,
				PreviewField::Email => row.email = value,
				PreviewField::Role => row.role = value,
			}
		}
	}

	pub fn save(&mut self) -> bool {
		if !self.editing {
			return false;
		}
		self.rows = std::mem::take(&mut self.draft);
		self.editing = false;
		info!("saved {} preview rows for {}", self.rows.len(), self.db_name);
		true
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseCatalog {
	pub databases: Vec<DatabaseItem>,
	pub form: SourceForm,
	pub pager: Pager,
	pub preview: Option<Preview>,
	sample_rows: Vec<PreviewRow>,
}

impl DatabaseCatalog {
	pub fn new(databases: Vec<DatabaseItem>, sample_rows: Vec<PreviewRow>, page_size: usize) -> Self {
		Self {
			databases,
			form: SourceForm::default(),
			pager: Pager::new(page_size),
			preview: None,
			sample_rows,
		}
	}

	pub fn visible(&self) -> Vec<DatabaseItem> {
		self.pager.window(&self.databases).to_vec()
	}

	pub fn total_pages(&self) -> usize {
		self.pager.total(self.databases.len())
	}

	pub fn go_to_page(&mut self, page: usize) -> bool {
		self.pager.go_to(page, self.databases.len())
	}

	pub fn submit_form(&mut self, today: &str) -> Option<String> {
		let item = self.form.submit(today)?;
		info!("added {} database '{}'", item.kind.label(), item.name);
		let id = item.id.clone();
		self.databases.push(item);
		Some(id)
	}

	/// Remove a database. The caller has already confirmed with the user.
	pub fn delete(&mut self, id: &str) -> bool {
		let before = self.databases.len();
		self.databases.retain(|d| d.id != id);
		if self.databases.len() == before {
			return false;
		}
		if self.preview.as_ref().is_some_and(|p| p.db_id == id) {
			self.preview = None;
		}
		self.pager.clamp(self.databases.len());
		true
	}

	/// Open the preview with fresh sample rows, editing off.
	pub fn open_preview(&mut self, id: &str) {
		if let Some(db) = self.databases.iter().find(|d| d.id == id) {
			self.preview = Some(Preview {
				db_id: db.id.clone(),
				db_name: db.name.clone(),
				rows: self.sample_rows.clone(),
				draft: Vec::new(),
				editing: false,
			});
		}
	}

	pub fn close_preview(&mut self) {
		self.preview = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pages::database::{sample_rows, seed_databases};

	fn catalog() -> DatabaseCatalog {
		DatabaseCatalog::new(seed_databases(), sample_rows(), 6)
	}

	#[test]
	fn summary_groups_thousands() {
		let db = &seed_databases()[0];
		assert_eq!(db.summary(), "1.2 GB • 15,000 records");
		assert_eq!(group_thousands(0), "0");
		assert_eq!(group_thousands(1234567), "1,234,567");
	}

	#[test]
	fn file_upload_uses_stem_and_size() {
		let mut catalog = catalog();
		assert!(!catalog.form.can_submit());
		assert_eq!(catalog.form.submit_label(), "Upload");
		catalog.form.kind = DbKind::MySql;
		catalog.form.file = Some(FileMeta::new("inventory.sql", 2 * 1024 * 1024));
		let id = catalog.submit_form("2025-01-09").unwrap();

		let added = catalog.databases.iter().find(|d| d.id == id).unwrap();
		assert_eq!(added.name, "inventory");
		assert_eq!(added.kind, DbKind::MySql);
		assert_eq!(added.size, "2.00 MB");
		assert_eq!(added.last_modified, "2025-01-09");
		assert!(catalog.form.file.is_none());
	}

	#[test]
	fn remote_needs_ip_port_and_name() {
		let mut form = SourceForm {
			mode: ConnectionMode::Remote,
			..SourceForm::default()
		};
		assert_eq!(form.submit_label(), "Connect");
		form.remote.ip = "10.0.0.5".into();
		form.remote.port = "5432".into();
		assert!(!form.can_submit());
		form.remote.db_name = "analytics".into();
		let item = form.submit("2025-01-09").unwrap();
		assert_eq!(item.size, "Remote");
		assert_eq!(item.name, "analytics");
		assert_eq!(form.remote, RemoteConfig::default());
	}

	#[test]
	fn minio_needs_bucket() {
		let mut form = SourceForm {
			kind: DbKind::MinIo,
			..SourceForm::default()
		};
		form.minio.ip = "127.0.0.1".into();
		form.minio.port = "9000".into();
		assert!(!form.can_submit());
		form.minio.bucket = "my-bucket".into();
		let item = form.submit("2025-01-09").unwrap();
		assert_eq!((item.name.as_str(), item.size.as_str()), ("my-bucket", "0 MB"));
		assert_eq!(item.kind, DbKind::MinIo);
	}

	#[test]
	fn preview_edits_stay_in_draft_until_saved() {
		let mut catalog = catalog();
		let id = catalog.databases[0].id.clone();
		catalog.open_preview(&id);
		let preview = catalog.preview.as_mut().unwrap();

		preview.set_cell(1, PreviewField::Name, "ignored".into());
		assert_eq!(preview.shown()[0].name, "John Doe");

		preview.toggle_editing();
		preview.set_cell(1, PreviewField::Role, "Owner".into());
		assert_eq!(preview.shown()[0].get(PreviewField::Role), "Owner");
		assert_eq!(preview.rows[0].role, "Admin");

		assert!(preview.save());
		assert!(!preview.editing);
		assert_eq!(preview.shown()[0].role, "Owner");
		assert!(!preview.save());
	}

	#[test]
	fn delete_closes_its_preview() {
		let mut catalog = catalog();
		let id = catalog.databases[1].id.clone();
		catalog.open_preview(&id);
		assert!(catalog.delete(&id));
		assert!(catalog.preview.is_none());
		assert_eq!(catalog.databases.len(), 2);
		assert!(!catalog.delete(&id));
	}

	#[test]
	fn kind_labels_round_trip() {
		for kind in DbKind::ALL {
			assert_eq!(DbKind::from_label(kind.label()), Some(kind));
		}
		assert_eq!(DbKind::from_label("Oracle"), None);
	}
}
