use leptos::prelude::*;
use leptos_router::components::{A, Outlet};
use leptos_router::hooks::use_location;

struct NavItem {
	path: &'static str,
	label: &'static str,
	icon: &'static str,
}

const NAV_ITEMS: &[NavItem] = &[
	NavItem {
		path: "/workflow",
		label: "Workflow Orchestration",
		icon: "⇄",
	},
	NavItem {
		path: "/upload",
		label: "Microapp Upload",
		icon: "⇪",
	},
	NavItem {
		path: "/services",
		label: "Microapp Management",
		icon: "▤",
	},
	NavItem {
		path: "/database",
		label: "Database Governance",
		icon: "⛁",
	},
	NavItem {
		path: "/apps",
		label: "Application Delivery",
		icon: "▣",
	},
];

/// Header title for the current path.
pub fn page_title(pathname: &str) -> &'static str {
	NAV_ITEMS
		.iter()
		.find(|item| item.path == pathname.trim_end_matches('/'))
		.map(|item| item.label)
		.unwrap_or("Dashboard")
}

/// App shell: collapsible navigation on the left, page header and the
/// routed panel on the right.
#[component]
pub fn MainLayout() -> impl IntoView {
	let (sidebar_open, set_sidebar_open) = signal(true);
	let location = use_location();
	let title = move || page_title(&location.pathname.get());

	view! {
		<div class="app-shell">
			<aside class="sidebar" class:collapsed=move || !sidebar_open.get()>
				<div class="brand">
					<span class="brand-mark">"◉"</span>
					<Show when=move || sidebar_open.get()>
						<span class="brand-name">"CONDUCTOR"</span>
					</Show>
				</div>
				<nav class="nav">
					{NAV_ITEMS
						.iter()
						.map(|item| {
							view! {
								<A href=item.path attr:class="nav-link">
									<span class="nav-icon">{item.icon}</span>
									<Show when=move || sidebar_open.get()>
										<span class="nav-label">{item.label}</span>
									</Show>
								</A>
							}
						})
						.collect_view()}
				</nav>
				<button
					class="sidebar-toggle"
					on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
				>
					{move || if sidebar_open.get() { "✕" } else { "☰" }}
				</button>
			</aside>
			<main class="main">
				<header class="header">
					<div>
						<h2 class="header-title">{title}</h2>
						<p class="header-status">
							"System Status: " <span class="status-ok">"Operational"</span>
						</p>
					</div>
					<div class="avatar">"A"</div>
				</header>
				<div class="page">
					<Outlet />
				</div>
			</main>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn title_follows_path() {
		assert_eq!(page_title("/services"), "Microapp Management");
		assert_eq!(page_title("/apps/"), "Application Delivery");
		assert_eq!(page_title("/nowhere"), "Dashboard");
	}
}
