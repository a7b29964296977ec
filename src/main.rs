use conductor::App;
use conductor::config::DashboardConfig;
use leptos::prelude::*;

fn main() {
	conductor::init_logging(DashboardConfig::default().log_level);
	mount_to_body(App)
}
