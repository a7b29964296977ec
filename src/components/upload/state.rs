use log::info;

use crate::error::UploadError;

/// Extensions the microapplication picker accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jar", "yml", "yaml"];

/// Name and size of a picked file. Contents are never read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
	pub name: String,
	pub size_bytes: u64,
}

impl FileMeta {
	pub fn new(name: &str, size_bytes: u64) -> Self {
		Self {
			name: name.to_string(),
			size_bytes,
		}
	}

	pub fn extension(&self) -> Option<String> {
		let (_, ext) = self.name.rsplit_once('.')?;
		Some(ext.to_ascii_lowercase())
	}

	/// File name up to the first dot.
	pub fn stem(&self) -> &str {
		self.name.split('.').next().unwrap_or(&self.name)
	}

	pub fn size_label(&self) -> String {
		format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
	}

	pub fn check_extension(&self, accepted: &[&str]) -> Result<(), UploadError> {
		match self.extension() {
			Some(ext) if accepted.contains(&ext.as_str()) => Ok(()),
			_ => Err(UploadError::UnsupportedExtension {
				name: self.name.clone(),
				accepted: accept_attr(accepted),
			}),
		}
	}
}

/// `accept` attribute value for a list of extensions, e.g. `.jar,.yml`.
pub fn accept_attr(extensions: &[&str]) -> String {
	extensions
		.iter()
		.map(|ext| format!(".{ext}"))
		.collect::<Vec<_>>()
		.join(",")
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
	#[default]
	Select,
	Review,
	Uploading,
	Done,
}

impl WizardStep {
	pub const ALL: [WizardStep; 4] = [Self::Select, Self::Review, Self::Uploading, Self::Done];

	pub fn label(self) -> &'static str {
		match self {
			Self::Select => "Select",
			Self::Review => "Review",
			Self::Uploading => "Upload",
			Self::Done => "Done",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
	Jar,
	Config,
}

impl ArtifactKind {
	pub fn of(file: &FileMeta) -> Option<Self> {
		match file.extension()?.as_str() {
			"jar" => Some(Self::Jar),
			"yml" | "yaml" => Some(Self::Config),
			_ => None,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Jar => "Compiled JAR",
			Self::Config => "YAML configuration",
		}
	}
}

/// The microapplication upload wizard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadWizard {
	pub step: WizardStep,
	pub file: Option<FileMeta>,
	pub drag_active: bool,
	pub last_error: Option<UploadError>,
}

impl UploadWizard {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn select(&mut self, file: FileMeta) -> Result<(), UploadError> {
		if let Err(err) = file.check_extension(ACCEPTED_EXTENSIONS) {
			self.last_error = Some(err.clone());
			return Err(err);
		}
		self.file = Some(file);
		self.last_error = None;
		self.step = WizardStep::Review;
		Ok(())
	}

	/// Remove / Cancel: back to an empty first step.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn can_submit(&self) -> bool {
		self.step == WizardStep::Review && self.file.is_some()
	}

	pub fn begin_upload(&mut self) -> bool {
		if !self.can_submit() {
			return false;
		}
		if let Some(file) = &self.file {
			info!("uploading {} ({})", file.name, file.size_label());
		}
		self.step = WizardStep::Uploading;
		true
	}

	pub fn finish_upload(&mut self) -> Option<&FileMeta> {
		if self.step != WizardStep::Uploading {
			return None;
		}
		self.step = WizardStep::Done;
		self.file.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_meta_helpers() {
		let file = FileMeta::new("orders.service.JAR", 3 * 1024 * 1024 + 512 * 1024);
		assert_eq!(file.extension().as_deref(), Some("jar"));
		assert_eq!(file.stem(), "orders");
		assert_eq!(file.size_label(), "3.50 MB");
		assert_eq!(FileMeta::new("Makefile", 1).extension(), None);
		assert_eq!(accept_attr(ACCEPTED_EXTENSIONS), ".jar,.yml,.yaml");
	}

	#[test]
	fn wizard_walks_through_steps() {
		let mut wizard = UploadWizard::new();
		assert!(!wizard.can_submit());
		assert!(!wizard.begin_upload());

		wizard.select(FileMeta::new("user-service.jar", 2048)).unwrap();
		assert_eq!(wizard.step, WizardStep::Review);
		assert!(wizard.can_submit());
		assert_eq!(ArtifactKind::of(wizard.file.as_ref().unwrap()), Some(ArtifactKind::Jar));

		assert!(wizard.begin_upload());
		assert!(!wizard.can_submit());
		assert_eq!(wizard.finish_upload().map(|f| f.name.clone()), Some("user-service.jar".into()));
		assert_eq!(wizard.step, WizardStep::Done);
		assert!(wizard.finish_upload().is_none());

		wizard.clear();
		assert_eq!(wizard, UploadWizard::default());
	}

	#[test]
	fn unsupported_files_are_refused() {
		let mut wizard = UploadWizard::new();
		let err = wizard.select(FileMeta::new("dump.sql", 10)).unwrap_err();
		assert!(matches!(err, UploadError::UnsupportedExtension { .. }));
		assert_eq!(wizard.step, WizardStep::Select);
		assert!(wizard.file.is_none());
		assert!(wizard.last_error.is_some());

		wizard.select(FileMeta::new("application.yaml", 10)).unwrap();
		assert!(wizard.last_error.is_none());
	}
}
