use leptos::prelude::*;

use crate::components::apps::{DbBinding, DeliveryPanel, MicroApp};
use crate::components::database::DbKind;

fn names(items: &[&str]) -> Vec<String> {
	items.iter().map(|item| item.to_string()).collect()
}

pub fn seed_apps() -> Vec<MicroApp> {
	vec![
		MicroApp {
			id: "1".into(),
			name: "E-commerce Core".into(),
			version: "1.2.0".into(),
			description: "Core order processing and user management system.".into(),
			services: names(&[
				"User Microapplication",
				"Order Microapplication",
				"Payment Microapplication",
				"Notification Microapplication",
			]),
			created_at: "2025-01-05".into(),
		},
		MicroApp {
			id: "2".into(),
			name: "Analytics Dashboard".into(),
			version: "0.8.5".into(),
			description: "Real-time data visualization and reporting app.".into(),
			services: names(&["User Microapplication", "Order Microapplication"]),
			created_at: "2025-01-08".into(),
		},
	]
}

/// Databases the exported packages reference.
pub fn detected_bindings() -> Vec<DbBinding> {
	vec![
		DbBinding {
			name: "users_db".into(),
			kind: DbKind::PostgreSql,
			configured: true,
		},
		DbBinding {
			name: "orders_db".into(),
			kind: DbKind::MySql,
			configured: false,
		},
	]
}

/// Application delivery
#[component]
pub fn AppsPage() -> impl IntoView {
	view! { <DeliveryPanel apps=seed_apps() bindings=detected_bindings() /> }
}
