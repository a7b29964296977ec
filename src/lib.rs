//! Conductor: admin dashboard for composing, deploying and operating
//! microapplications. Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod browser;
pub mod components;
pub mod config;
mod error;
mod pages;
pub mod timer;

use crate::components::layout::MainLayout;
use crate::config::DashboardConfig;
// Top-Level pages
use crate::pages::apps::AppsPage;
use crate::pages::database::DatabasePage;
use crate::pages::not_found::NotFound;
use crate::pages::services::ServicesPage;
use crate::pages::upload::UploadPage;
use crate::pages::workflow::WorkflowPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {level}");
}

/// The dashboard shell: sidebar layout around one page per route, with the
/// root redirecting to the workflow canvas.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(DashboardConfig::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Conductor" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<ParentRoute path=path!("") view=MainLayout>
					<Route path=path!("") view=|| view! { <Redirect path="/workflow" /> } />
					<Route path=path!("workflow") view=WorkflowPage />
					<Route path=path!("upload") view=UploadPage />
					<Route path=path!("services") view=ServicesPage />
					<Route path=path!("database") view=DatabasePage />
					<Route path=path!("apps") view=AppsPage />
				</ParentRoute>
			</Routes>
		</Router>
	}
}
