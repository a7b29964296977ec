use leptos::prelude::*;

use crate::components::database::{DatabaseItem, DatabasePanel, DbKind, PreviewRow};

fn database(id: &str, name: &str, kind: DbKind, size: &str, records: u64, last_modified: &str) -> DatabaseItem {
	DatabaseItem {
		id: id.into(),
		name: name.into(),
		kind,
		size: size.into(),
		records,
		last_modified: last_modified.into(),
	}
}

fn row(id: u32, name: &str, email: &str, role: &str) -> PreviewRow {
	PreviewRow {
		id,
		name: name.into(),
		email: email.into(),
		role: role.into(),
	}
}

pub fn seed_databases() -> Vec<DatabaseItem> {
	vec![
		database("1", "users_db", DbKind::PostgreSql, "1.2 GB", 15_000, "2025-01-08"),
		database("2", "orders_db", DbKind::MySql, "850 MB", 4_500, "2025-01-07"),
		database("3", "local_store", DbKind::Sqlite, "256 MB", 0, "2025-01-08"),
	]
}

/// Rows every preview starts from. The preview is a mock and does not read
/// the database itself.
pub fn sample_rows() -> Vec<PreviewRow> {
	vec![
		row(1, "John Doe", "john@example.com", "Admin"),
		row(2, "Jane Smith", "jane@example.com", "User"),
		row(3, "Bob Johnson", "bob@example.com", "User"),
	]
}

/// Database governance
#[component]
pub fn DatabasePage() -> impl IntoView {
	view! { <DatabasePanel databases=seed_databases() sample_rows=sample_rows() /> }
}
