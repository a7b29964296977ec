use leptos::prelude::*;
use web_sys::MouseEvent;

use super::state::{DbBinding, DeliveryBoard, DeployTarget, MicroApp};
use crate::browser::alert;
use crate::components::modal::Modal;
use crate::components::pagination::Pagination;
use crate::config::use_config;

#[component]
pub fn DeliveryPanel(apps: Vec<MicroApp>, bindings: Vec<DbBinding>) -> impl IntoView {
	let config = use_config();
	let board = RwSignal::new(DeliveryBoard::new(apps, bindings, config.page_size));

	let visible = Memo::new(move |_| board.with(DeliveryBoard::visible));
	let current_page = Signal::derive(move || board.with(|b| b.pager.current));
	let total_pages = Signal::derive(move || board.with(DeliveryBoard::total_pages));

	view! {
		<div class="delivery">
			<div class="panel-header">
				<div>
					<h2 class="panel-title">"Application Delivery Management"</h2>
					<p class="muted">"Manage and deploy your exported microapplications."</p>
				</div>
			</div>
			<div class="card-grid">
				<For
					each=move || visible.get()
					key=|app| app.id.clone()
					children=move |app: MicroApp| view! { <AppCard app=app board=board /> }
				/>
			</div>
			<Pagination
				current=current_page
				total=total_pages
				on_change=move |page: usize| {
					board.update(|b| {
						b.go_to_page(page);
					})
				}
			/>
			<DeployDialog board=board />
		</div>
	}
}

#[component]
fn AppCard(app: MicroApp, board: RwSignal<DeliveryBoard>) -> impl IntoView {
	let id = app.id.clone();
	let service_count = format!("{} Microservices", app.services.len());

	view! {
		<div class="card app-card">
			<header class="card-header">
				<div>
					<h3 class="card-title">{app.name}</h3>
					<p class="muted">"v" {app.version}</p>
				</div>
				<span class="badge ready">"Ready to Deploy"</span>
			</header>
			<div class="card-body">
				<p>{app.description}</p>
				<div class="row muted">
					<span>{service_count}</span>
					<span>"Created " {app.created_at}</span>
				</div>
				<ul class="tag-list">
					{app.services.into_iter().map(|s| view! { <li class="tag">{s}</li> }).collect_view()}
				</ul>
			</div>
			<footer class="card-footer">
				<button
					class="btn btn-primary"
					on:click=move |_| board.update(|b| b.open_deploy(&id))
				>
					"Deploy Application"
				</button>
			</footer>
		</div>
	}
}

#[component]
fn DeployDialog(board: RwSignal<DeliveryBoard>) -> impl IntoView {
	let target = Memo::new(move |_| board.with(|b| b.deploy.as_ref().map(|d| d.target)));
	let close = Callback::new(move |_: ()| board.update(|b| b.cancel_deploy()));
	let download = move |_: MouseEvent| {
		let mut message = None;
		board.update(|b| message = b.confirm_deploy());
		if let Some(message) = message {
			alert(&message);
		}
	};

	view! {
		<Show when=move || target.with(Option::is_some)>
			<Modal
				title="Configure Deployment"
				description="Prepare your microapplication package for download."
				on_close=close
			>
				<p class="field-label">"Target Environment"</p>
				<div class="segmented">
					{DeployTarget::ALL
						.into_iter()
						.map(|option| {
							view! {
								<button
									class="segment"
									class:selected=move || target.get() == Some(option)
									on:click=move |_| board.update(|b| b.choose_target(option))
								>
									{option.label()}
								</button>
							}
						})
						.collect_view()}
				</div>
				<p class="field-label">"Database Configuration (Auto-detected)"</p>
				<ul class="binding-list">
					{board
						.with_untracked(|b| b.bindings.clone())
						.into_iter()
						.map(|binding| {
							view! {
								<li class="binding" class:pending=!binding.configured>
									<span>"⛁ " {binding.name.clone()}</span>
									<span class="muted">{binding.kind.label()}</span>
									<span class="status-badge" class:running=binding.configured>
										{binding.status_label()}
									</span>
								</li>
							}
						})
						.collect_view()}
				</ul>
				<div class="modal-footer">
					<button class="btn btn-outline" on:click=move |_| close.run(())>
						"Cancel"
					</button>
					<button class="btn btn-primary" on:click=download>
						"Download Package"
					</button>
				</div>
			</Modal>
		</Show>
	}
}
