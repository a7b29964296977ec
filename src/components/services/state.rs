use std::collections::HashSet;

use log::info;

use crate::components::pagination::Pager;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
	Active,
	Inactive,
}

impl ServiceStatus {
	pub fn toggled(self) -> Self {
		match self {
			Self::Active => Self::Inactive,
			Self::Inactive => Self::Active,
		}
	}

	/// Container state shown on the card.
	pub fn label(self) -> &'static str {
		match self {
			Self::Active => "Running",
			Self::Inactive => "Stopped",
		}
	}

	pub fn value(self) -> &'static str {
		match self {
			Self::Active => "active",
			Self::Inactive => "inactive",
		}
	}

	pub fn from_value(value: &str) -> Option<Self> {
		match value {
			"active" => Some(Self::Active),
			"inactive" => Some(Self::Inactive),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVar {
	pub key: String,
	pub value: String,
}

impl EnvVar {
	pub fn new(key: &str, value: &str) -> Self {
		Self {
			key: key.to_string(),
			value: value.to_string(),
		}
	}
}

/// An uploaded microapplication and its (mock) container.
#[derive(Clone, Debug, PartialEq)]
pub struct Service {
	pub id: String,
	pub name: String,
	pub version: String,
	pub runtime: String,
	pub db: Option<String>,
	pub status: ServiceStatus,
	pub last_updated: String,
	pub env_vars: Vec<EnvVar>,
	pub logs: Vec<String>,
}

impl Service {
	fn matches(&self, needle: &str) -> bool {
		self.name.to_lowercase().contains(needle) || self.runtime.to_lowercase().contains(needle)
	}
}

/// Edit dialog draft: the fields the quick editor can change.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceEdit {
	pub id: String,
	pub name: String,
	pub db: String,
	pub status: ServiceStatus,
}

/// Detail dialog draft: env vars being edited, restart in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceDetail {
	pub id: String,
	pub env_vars: Vec<EnvVar>,
	pub restarting: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceRegistry {
	pub services: Vec<Service>,
	pub search: String,
	pub pager: Pager,
	pub pending_toggles: HashSet<String>,
	pub edit: Option<ServiceEdit>,
	pub detail: Option<ServiceDetail>,
}

impl ServiceRegistry {
	pub fn new(services: Vec<Service>, page_size: usize) -> Self {
		Self {
			services,
			search: String::new(),
			pager: Pager::new(page_size),
			pending_toggles: HashSet::new(),
			edit: None,
			detail: None,
		}
	}

	pub fn service(&self, id: &str) -> Option<&Service> {
		self.services.iter().find(|s| s.id == id)
	}

	fn service_mut(&mut self, id: &str) -> Option<&mut Service> {
		self.services.iter_mut().find(|s| s.id == id)
	}

	/// Services whose name or runtime contains the search term, any case.
	pub fn filtered(&self) -> Vec<&Service> {
		let needle = self.search.trim().to_lowercase();
		self.services.iter().filter(|s| s.matches(&needle)).collect()
	}

	pub fn visible(&self) -> Vec<Service> {
		let filtered = self.filtered();
		self.pager.window(&filtered).iter().map(|s| (*s).clone()).collect()
	}

	pub fn total_pages(&self) -> usize {
		self.pager.total(self.filtered().len())
	}

	pub fn set_search(&mut self, term: String) {
		self.search = term;
		let len = self.filtered().len();
		self.pager.clamp(len);
	}

	pub fn go_to_page(&mut self, page: usize) -> bool {
		let len = self.filtered().len();
		self.pager.go_to(page, len)
	}

	/// Remove a service. The caller has already confirmed with the user.
	pub fn delete(&mut self, id: &str) -> bool {
		let before = self.services.len();
		self.services.retain(|s| s.id != id);
		if self.services.len() == before {
			return false;
		}
		info!("deleted service {id}");
		self.pending_toggles.remove(id);
		if self.edit.as_ref().is_some_and(|e| e.id == id) {
			self.edit = None;
		}
		if self.detail.as_ref().is_some_and(|d| d.id == id) {
			self.detail = None;
		}
		let len = self.filtered().len();
		self.pager.clamp(len);
		true
	}

	pub fn open_edit(&mut self, id: &str) {
		if let Some(service) = self.service(id) {
			self.edit = Some(ServiceEdit {
				id: service.id.clone(),
				name: service.name.clone(),
				db: service.db.clone().unwrap_or_default(),
				status: service.status,
			});
		}
	}

	pub fn save_edit(&mut self) -> bool {
		let Some(edit) = self.edit.take() else {
			return false;
		};
		let Some(service) = self.service_mut(&edit.id) else {
			return false;
		};
		service.name = edit.name;
		service.db = Some(edit.db.trim().to_string()).filter(|db| !db.is_empty());
		service.status = edit.status;
		true
	}

	/// Start a simulated status toggle. `false` if one is already running.
	pub fn begin_toggle(&mut self, id: &str) -> bool {
		if self.service(id).is_none() {
			return false;
		}
		self.pending_toggles.insert(id.to_string())
	}

	pub fn is_toggling(&self, id: &str) -> bool {
		self.pending_toggles.contains(id)
	}

	pub fn finish_toggle(&mut self, id: &str) {
		if !self.pending_toggles.remove(id) {
			return;
		}
		if let Some(service) = self.service_mut(id) {
			service.status = service.status.toggled();
			info!("service {} is now {}", service.name, service.status.value());
		}
	}

	pub fn open_detail(&mut self, id: &str) {
		if let Some(service) = self.service(id) {
			self.detail = Some(ServiceDetail {
				id: service.id.clone(),
				env_vars: service.env_vars.clone(),
				restarting: false,
			});
		}
	}

	pub fn close_detail(&mut self) {
		self.detail = None;
	}

	pub fn set_env_var(&mut self, key: &str, value: String) {
		if let Some(detail) = &mut self.detail {
			if let Some(var) = detail.env_vars.iter_mut().find(|v| v.key == key) {
				var.value = value;
			}
		}
	}

	pub fn save_env_vars(&mut self) -> bool {
		let Some(detail) = &self.detail else {
			return false;
		};
		let (id, vars) = (detail.id.clone(), detail.env_vars.clone());
		match self.service_mut(&id) {
			Some(service) => {
				service.env_vars = vars;
				true
			}
			None => false,
		}
	}

	/// Restart is only offered for running containers, one at a time.
	pub fn can_restart(&self) -> bool {
		self.detail.as_ref().is_some_and(|detail| {
			!detail.restarting
				&& self.service(&detail.id).is_some_and(|s| s.status == ServiceStatus::Active)
		})
	}

	pub fn begin_restart(&mut self) -> Option<String> {
		if !self.can_restart() {
			return None;
		}
		let detail = self.detail.as_mut()?;
		detail.restarting = true;
		Some(detail.id.clone())
	}

	pub fn finish_restart(&mut self, id: &str, timestamp: &str) {
		if let Some(detail) = self.detail.as_mut().filter(|d| d.id == id) {
			detail.restarting = false;
		}
		if let Some(service) = self.service_mut(id) {
			service
				.logs
				.push(format!("[INFO] {timestamp} Container restarted by user"));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pages::services::seed_services;

	fn registry() -> ServiceRegistry {
		ServiceRegistry::new(seed_services(), 6)
	}

	#[test]
	fn search_matches_name_or_runtime_any_case() {
		let mut registry = registry();
		registry.set_search("ORDER".into());
		assert_eq!(registry.filtered().len(), 1);
		registry.set_search("go".into());
		let names: Vec<_> = registry.filtered().iter().map(|s| s.name.clone()).collect();
		assert_eq!(names, vec!["Payment Microapplication".to_string()]);
		registry.set_search(String::new());
		assert_eq!(registry.filtered().len(), 4);
	}

	#[test]
	fn search_clamps_current_page() {
		let mut services = seed_services();
		for i in 0..10 {
			let mut extra = services[0].clone();
			extra.id = format!("extra-{i}");
			services.push(extra);
		}
		let mut registry = ServiceRegistry::new(services, 6);
		assert_eq!(registry.total_pages(), 3);
		assert!(registry.go_to_page(3));
		assert!(!registry.go_to_page(4));
		registry.set_search("payment".into());
		assert_eq!(registry.pager.current, 1);
		assert_eq!(registry.visible().len(), 1);
	}

	#[test]
	fn toggle_is_pending_until_finished() {
		let mut registry = registry();
		assert!(registry.begin_toggle("1"));
		assert!(!registry.begin_toggle("1"));
		assert!(registry.is_toggling("1"));
		assert_eq!(registry.service("1").unwrap().status, ServiceStatus::Active);

		registry.finish_toggle("1");
		assert!(!registry.is_toggling("1"));
		assert_eq!(registry.service("1").unwrap().status, ServiceStatus::Inactive);
		// stray completion does nothing
		registry.finish_toggle("1");
		assert_eq!(registry.service("1").unwrap().status, ServiceStatus::Inactive);
	}

	#[test]
	fn edit_draft_commits_on_save() {
		let mut registry = registry();
		registry.open_edit("3");
		if let Some(edit) = registry.edit.as_mut() {
			edit.name = "Payments".into();
			edit.db = "payments_db".into();
			edit.status = ServiceStatus::Active;
		}
		assert!(registry.save_edit());
		let service = registry.service("3").unwrap();
		assert_eq!(service.name, "Payments");
		assert_eq!(service.db.as_deref(), Some("payments_db"));
		assert_eq!(service.status, ServiceStatus::Active);
		assert!(registry.edit.is_none());
	}

	#[test]
	fn env_vars_save_from_detail_draft() {
		let mut registry = registry();
		registry.open_detail("1");
		registry.set_env_var("LOG_LEVEL", "DEBUG".into());
		assert_ne!(
			registry.service("1").unwrap().env_vars.iter().find(|v| v.key == "LOG_LEVEL").unwrap().value,
			"DEBUG"
		);
		assert!(registry.save_env_vars());
		assert_eq!(
			registry.service("1").unwrap().env_vars.iter().find(|v| v.key == "LOG_LEVEL").unwrap().value,
			"DEBUG"
		);
	}

	#[test]
	fn restart_appends_log_and_needs_running_container() {
		let mut registry = registry();
		registry.open_detail("3");
		assert!(registry.begin_restart().is_none());

		registry.open_detail("1");
		let id = registry.begin_restart().unwrap();
		assert!(registry.begin_restart().is_none());
		let logs_before = registry.service("1").unwrap().logs.len();
		registry.finish_restart(&id, "2025-01-08 12:00:00");

		let logs = &registry.service("1").unwrap().logs;
		assert_eq!(logs.len(), logs_before + 1);
		assert_eq!(logs.last().unwrap(), "[INFO] 2025-01-08 12:00:00 Container restarted by user");
		assert!(registry.can_restart());
	}

	#[test]
	fn delete_drops_drafts_for_that_service() {
		let mut registry = registry();
		registry.open_detail("2");
		registry.begin_toggle("2");
		assert!(registry.delete("2"));
		assert!(registry.detail.is_none());
		assert!(!registry.is_toggling("2"));
		assert!(!registry.delete("2"));
	}
}
