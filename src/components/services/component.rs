use leptos::prelude::*;
use web_sys::MouseEvent;

use super::state::{EnvVar, Service, ServiceEdit, ServiceRegistry, ServiceStatus};
use crate::browser::{alert, confirm, timestamp};
use crate::components::modal::Modal;
use crate::components::pagination::Pagination;
use crate::config::use_config;
use crate::timer::{BrowserScheduler, BrowserTask, KeyedTasks, Scheduler};

#[component]
pub fn ServicesPanel(services: Vec<Service>) -> impl IntoView {
	let config = use_config();
	let registry = RwSignal::new(ServiceRegistry::new(services, config.page_size));
	let tasks = StoredValue::new_local(KeyedTasks::<(&'static str, String), BrowserTask>::default());
	on_cleanup(move || {
		tasks.try_update_value(|tasks| tasks.cancel_all());
	});

	let (toggle_delay, restart_delay) = (config.status_toggle_delay, config.restart_delay);

	let toggle = move |id: String| {
		let mut started = false;
		registry.update(|r| started = r.begin_toggle(&id));
		if !started {
			return;
		}
		let key = ("toggle", id.clone());
		let handle = BrowserScheduler.schedule(
			toggle_delay,
			Box::new(move || {
				registry.try_update(|r| r.finish_toggle(&id));
			}),
		);
		tasks.update_value(|tasks| tasks.set(key, handle));
	};

	let restart = move |_: MouseEvent| {
		let mut started = None;
		registry.update(|r| started = r.begin_restart());
		let Some(id) = started else {
			return;
		};
		let key = ("restart", id.clone());
		let handle = BrowserScheduler.schedule(
			restart_delay,
			Box::new(move || {
				registry.try_update(|r| r.finish_restart(&id, &timestamp()));
			}),
		);
		tasks.update_value(|tasks| tasks.set(key, handle));
	};

	let visible = Memo::new(move |_| registry.with(ServiceRegistry::visible));
	let current_page = Signal::derive(move || registry.with(|r| r.pager.current));
	let total_pages = Signal::derive(move || registry.with(ServiceRegistry::total_pages));

	view! {
		<div class="services">
			<div class="panel-header">
				<div>
					<h2 class="panel-title">"Microapplication Management"</h2>
					<p class="muted">"Manage your uploaded microapplications and their configurations."</p>
				</div>
				<input
					class="input search"
					placeholder="Search microapplications..."
					prop:value=move || registry.with(|r| r.search.clone())
					on:input=move |ev| registry.update(|r| r.set_search(event_target_value(&ev)))
				/>
			</div>
			<div class="card-grid">
				<For
					each=move || visible.get()
					key=|service| {
						(service.id.clone(), service.name.clone(), service.status, service.db.clone())
					}
					children=move |service: Service| {
						view! { <ServiceCard service=service registry=registry on_toggle=toggle /> }
					}
				/>
			</div>
			<Pagination
				current=current_page
				total=total_pages
				on_change=move |page: usize| {
					registry.update(|r| {
						r.go_to_page(page);
					})
				}
			/>
			<EditDialog registry=registry />
			<DetailDialog registry=registry on_restart=restart />
		</div>
	}
}

#[component]
fn ServiceCard(
	service: Service,
	registry: RwSignal<ServiceRegistry>,
	on_toggle: impl Fn(String) + Copy + Send + Sync + 'static,
) -> impl IntoView {
	let id = service.id.clone();
	let toggling = {
		let id = id.clone();
		Signal::derive(move || registry.with(|r| r.is_toggling(&id)))
	};
	let on_open = {
		let id = id.clone();
		move |_: MouseEvent| registry.update(|r| r.open_detail(&id))
	};
	let on_edit = {
		let id = id.clone();
		move |ev: MouseEvent| {
			ev.stop_propagation();
			registry.update(|r| r.open_edit(&id));
		}
	};
	let on_delete = {
		let id = id.clone();
		move |ev: MouseEvent| {
			ev.stop_propagation();
			if confirm("Are you sure you want to delete this service?") {
				registry.update(|r| {
					r.delete(&id);
				});
			}
		}
	};
	let on_switch = move |ev: MouseEvent| {
		ev.stop_propagation();
		on_toggle(id.clone());
	};
	let active = service.status == ServiceStatus::Active;

	view! {
		<div class="card service-card" on:click=on_open>
			<div class="card-header">
				<div>
					<h3 class="card-title">{service.name.clone()}</h3>
					<p class="muted">"v" {service.version.clone()} " • " {service.runtime.clone()}</p>
				</div>
				<div class="card-actions">
					<button class="btn-icon" title="Edit" on:click=on_edit>
						"✎"
					</button>
					<button class="btn-icon destructive" title="Delete" on:click=on_delete>
						"🗑"
					</button>
				</div>
			</div>
			<div class="card-body">
				<div class="row">
					<span class="muted">"Database"</span>
					<span>{service.db.clone().unwrap_or_else(|| "None".to_string())}</span>
				</div>
				<div class="row">
					<span class="muted">"Status"</span>
					<span class="status-badge" class:running=active>
						{service.status.label()}
					</span>
					<button
						class="switch"
						class:on=active
						disabled=move || toggling.get()
						on:click=on_switch
					>
						{move || if toggling.get() { "…" } else { "" }}
					</button>
				</div>
				<div class="row muted">
					<span>"Last updated"</span>
					<span>{service.last_updated.clone()}</span>
				</div>
			</div>
		</div>
	}
}

#[component]
fn EditDialog(registry: RwSignal<ServiceRegistry>) -> impl IntoView {
	let edit = Memo::new(move |_| registry.with(|r| r.edit.clone()));
	let close = Callback::new(move |_: ()| registry.update(|r| r.edit = None));
	let field = move |f: fn(&mut ServiceEdit, String)| {
		move |ev: web_sys::Event| {
			let value = event_target_value(&ev);
			registry.update(|r| {
				if let Some(edit) = r.edit.as_mut() {
					f(edit, value);
				}
			});
		}
	};

	view! {
		<Show when=move || edit.with(Option::is_some)>
			<Modal
				title="Edit Microapplication"
				description="Make changes to the microapplication configuration here."
				on_close=close
			>
				<label class="field-label" for="service-name">
					"Name"
				</label>
				<input
					id="service-name"
					class="input"
					prop:value=move || edit.with(|e| e.as_ref().map(|e| e.name.clone()).unwrap_or_default())
					on:input=field(|edit, value| edit.name = value)
				/>
				<label class="field-label" for="service-db">
					"Database"
				</label>
				<input
					id="service-db"
					class="input"
					prop:value=move || edit.with(|e| e.as_ref().map(|e| e.db.clone()).unwrap_or_default())
					on:input=field(|edit, value| edit.db = value)
				/>
				<label class="field-label" for="service-status">
					"Status"
				</label>
				<select
					id="service-status"
					class="input"
					prop:value=move || {
						edit.with(|e| e.as_ref().map(|e| e.status.value()).unwrap_or("active"))
					}
					on:change=field(|edit, value| {
						if let Some(status) = ServiceStatus::from_value(&value) {
							edit.status = status;
						}
					})
				>
					<option value="active">"Active"</option>
					<option value="inactive">"Inactive"</option>
				</select>
				<div class="modal-footer">
					<button
						class="btn btn-primary"
						on:click=move |_| {
							registry.update(|r| {
								r.save_edit();
							})
						}
					>
						"Save changes"
					</button>
				</div>
			</Modal>
		</Show>
	}
}

#[component]
fn DetailDialog(
	registry: RwSignal<ServiceRegistry>,
	on_restart: impl Fn(MouseEvent) + Copy + Send + Sync + 'static,
) -> impl IntoView {
	let detail_id = Memo::new(move |_| registry.with(|r| r.detail.as_ref().map(|d| d.id.clone())));
	let service = Memo::new(move |_| {
		registry.with(|r| r.detail.as_ref().and_then(|d| r.service(&d.id)).cloned())
	});
	let env_vars = Memo::new(move |_| {
		registry.with(|r| r.detail.as_ref().map(|d| d.env_vars.clone()).unwrap_or_default())
	});
	let restarting = move || registry.with(|r| r.detail.as_ref().is_some_and(|d| d.restarting));
	let close = Callback::new(move |_: ()| registry.update(|r| r.close_detail()));
	let save_env = move |_: MouseEvent| {
		let mut saved = false;
		registry.update(|r| saved = r.save_env_vars());
		if saved {
			alert("Environment variables saved successfully!");
		}
	};
	let text = move |f: fn(&Service) -> String| move || service.with(|s| s.as_ref().map(f).unwrap_or_default());

	view! {
		<Show when=move || detail_id.with(Option::is_some)>
			<Modal title="Microapplication Details" on_close=close>
				<div class="detail-summary">
					<h3>{text(|s| s.name.clone())}</h3>
					<p class="muted">
						{text(|s| format!("v{} • {} • {}", s.version, s.runtime, s.status.label()))}
					</p>
				</div>
				<section class="detail-section">
					<div class="section-header">
						<h4>"Environment Variables"</h4>
						<button class="btn btn-outline btn-sm" on:click=save_env>
							"Save"
						</button>
					</div>
					<For
						each=move || env_vars.get()
						key=|var| var.key.clone()
						children=move |var: EnvVar| {
							let key = var.key.clone();
							let value_key = var.key.clone();
							view! {
								<div class="env-row">
									<label class="env-key">{var.key}</label>
									<input
										class="input mono"
										prop:value=move || {
											env_vars
												.with(|vars| {
													vars.iter().find(|v| v.key == value_key).map(|v| v.value.clone())
												})
												.unwrap_or_default()
										}
										on:input=move |ev| {
											registry.update(|r| r.set_env_var(&key, event_target_value(&ev)))
										}
									/>
								</div>
							}
						}
					/>
				</section>
				<section class="detail-section">
					<div class="section-header">
						<h4>"Container Logs"</h4>
						<button
							class="btn btn-outline btn-sm"
							disabled=move || !registry.with(ServiceRegistry::can_restart)
							on:click=on_restart
						>
							{move || if restarting() { "Restarting..." } else { "Restart Container" }}
						</button>
					</div>
					<pre class="logs">
						{move || service.with(|s| s.as_ref().map(|s| s.logs.join("\n")).unwrap_or_default())}
					</pre>
				</section>
			</Modal>
		</Show>
	}
}
