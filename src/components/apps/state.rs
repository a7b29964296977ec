use log::info;

use crate::components::database::DbKind;
use crate::components::pagination::Pager;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployTarget {
	DockerCompose,
	Kubernetes,
}

impl DeployTarget {
	pub const ALL: [DeployTarget; 2] = [Self::DockerCompose, Self::Kubernetes];

	/// Short tag used in package file names.
	pub fn tag(self) -> &'static str {
		match self {
			Self::DockerCompose => "docker",
			Self::Kubernetes => "k8s",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::DockerCompose => "Docker Compose",
			Self::Kubernetes => "Kubernetes",
		}
	}
}

/// A composed application: a named bundle of services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MicroApp {
	pub id: String,
	pub name: String,
	pub version: String,
	pub description: String,
	pub services: Vec<String>,
	pub created_at: String,
}

impl MicroApp {
	pub fn package_file_name(&self, target: DeployTarget) -> String {
		let slug = self.name.split_whitespace().collect::<Vec<_>>().join("_");
		format!("{slug}_{}.zip", target.tag())
	}

	pub fn download_message(&self, target: DeployTarget) -> String {
		format!("Downloading {} for {}...", self.name, target.label())
	}
}

/// A database the package expects, as auto-detected from its services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbBinding {
	pub name: String,
	pub kind: DbKind,
	pub configured: bool,
}

impl DbBinding {
	pub fn status_label(&self) -> &'static str {
		if self.configured { "Connected" } else { "Pending Config" }
	}
}

/// Deploy dialog draft for one app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployDraft {
	pub app_id: String,
	pub target: DeployTarget,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryBoard {
	pub apps: Vec<MicroApp>,
	pub bindings: Vec<DbBinding>,
	pub pager: Pager,
	pub deploy: Option<DeployDraft>,
}

impl DeliveryBoard {
	pub fn new(apps: Vec<MicroApp>, bindings: Vec<DbBinding>, page_size: usize) -> Self {
		Self {
			apps,
			bindings,
			pager: Pager::new(page_size),
			deploy: None,
		}
	}

	pub fn app(&self, id: &str) -> Option<&MicroApp> {
		self.apps.iter().find(|a| a.id == id)
	}

	pub fn visible(&self) -> Vec<MicroApp> {
		self.pager.window(&self.apps).to_vec()
	}

	pub fn total_pages(&self) -> usize {
		self.pager.total(self.apps.len())
	}

	pub fn go_to_page(&mut self, page: usize) -> bool {
		self.pager.go_to(page, self.apps.len())
	}

	/// Open the deploy dialog, Docker Compose preselected.
	pub fn open_deploy(&mut self, id: &str) {
		if self.app(id).is_some() {
			self.deploy = Some(DeployDraft {
				app_id: id.to_string(),
				target: DeployTarget::DockerCompose,
			});
		}
	}

	pub fn choose_target(&mut self, target: DeployTarget) {
		if let Some(draft) = &mut self.deploy {
			draft.target = target;
		}
	}

	pub fn cancel_deploy(&mut self) {
		self.deploy = None;
	}

	/// Close the dialog and return the message announcing the download.
	pub fn confirm_deploy(&mut self) -> Option<String> {
		let draft = self.deploy.take()?;
		let app = self.app(&draft.app_id)?;
		info!("packaging {}", app.package_file_name(draft.target));
		Some(app.download_message(draft.target))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pages::apps::{detected_bindings, seed_apps};

	#[test]
	fn package_names_collapse_whitespace() {
		let app = &seed_apps()[0];
		assert_eq!(app.package_file_name(DeployTarget::DockerCompose), "E-commerce_Core_docker.zip");
		let spaced = MicroApp {
			name: "  Spaced   Out App ".into(),
			..app.clone()
		};
		assert_eq!(spaced.package_file_name(DeployTarget::Kubernetes), "Spaced_Out_App_k8s.zip");
	}

	#[test]
	fn download_message_names_target() {
		let app = &seed_apps()[1];
		assert_eq!(
			app.download_message(DeployTarget::Kubernetes),
			"Downloading Analytics Dashboard for Kubernetes..."
		);
	}

	#[test]
	fn deploy_dialog_defaults_to_compose() {
		let mut board = DeliveryBoard::new(seed_apps(), detected_bindings(), 6);
		board.open_deploy("1");
		assert_eq!(board.deploy.as_ref().map(|d| d.target), Some(DeployTarget::DockerCompose));
		board.choose_target(DeployTarget::Kubernetes);
		assert_eq!(
			board.confirm_deploy().as_deref(),
			Some("Downloading E-commerce Core for Kubernetes...")
		);
		assert!(board.deploy.is_none());
		assert!(board.confirm_deploy().is_none());
	}

	#[test]
	fn unknown_app_opens_nothing() {
		let mut board = DeliveryBoard::new(seed_apps(), detected_bindings(), 6);
		board.open_deploy("missing");
		assert!(board.deploy.is_none());
		assert_eq!(board.total_pages(), 1);
		assert!(!board.go_to_page(2));
	}

	#[test]
	fn binding_labels() {
		let bindings = detected_bindings();
		assert_eq!(bindings[0].status_label(), "Connected");
		assert_eq!(bindings[1].status_label(), "Pending Config");
	}

	#[test]
	fn seeds_carry_their_services() {
		let apps = seed_apps();
		assert_eq!(apps.len(), 2);
		assert_eq!(apps[0].services.len(), 4);
		assert_eq!(apps[1].services.len(), 2);
	}
}
