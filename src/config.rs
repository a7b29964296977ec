//! Dashboard-wide settings, provided to every panel through context.

use std::time::Duration;

use leptos::prelude::*;
use log::Level;

use crate::components::workflow::ConnectionPolicy;

/// Candidate databases offered by the mount dialog.
pub const MOUNT_CANDIDATES: &[&str] = &["users_db", "orders_db", "local_store", "minio_storage"];

/// Tunables shared by the panels. Seeded with the values the mock backend
/// has always used.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
	/// Maximum level passed to the console logger.
	pub log_level: Level,
	/// Stagger between consecutive node results of a mock run.
	pub run_step: Duration,
	/// Offset applied to both axes when copying a node.
	pub copy_offset: f64,
	/// Cards per page in the paged panels.
	pub page_size: usize,
	/// Databases the mount dialog offers.
	pub mount_candidates: Vec<String>,
	/// Which port pairs may be connected.
	pub connection_policy: ConnectionPolicy,
	/// Simulated upload time.
	pub upload_delay: Duration,
	/// Simulated start or stop time for a service.
	pub status_toggle_delay: Duration,
	/// Simulated restart time for a service.
	pub restart_delay: Duration,
	/// Lower zoom bound of the canvas.
	pub min_zoom: f64,
	/// Upper zoom bound of the canvas.
	pub max_zoom: f64,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			log_level: Level::Debug,
			run_step: Duration::from_millis(1500),
			copy_offset: 50.0,
			page_size: 6,
			mount_candidates: MOUNT_CANDIDATES.iter().map(|db| db.to_string()).collect(),
			connection_policy: ConnectionPolicy::Permissive,
			upload_delay: Duration::from_millis(1200),
			status_toggle_delay: Duration::from_millis(1500),
			restart_delay: Duration::from_millis(2000),
			min_zoom: 0.25,
			max_zoom: 2.5,
		}
	}
}

/// Config from context, or the defaults when rendered outside the app shell.
pub fn use_config() -> DashboardConfig {
	use_context::<DashboardConfig>().unwrap_or_default()
}
