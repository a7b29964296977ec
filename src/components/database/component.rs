use leptos::prelude::*;
use log::warn;
use web_sys::{Event, MouseEvent};

use super::state::{
	ConnectionMode, DUMP_EXTENSIONS, DatabaseCatalog, DatabaseItem, DbKind, PreviewField, PreviewRow,
	SourceForm,
};
use crate::browser::{alert, confirm, picked_file, today};
use crate::components::modal::Modal;
use crate::components::pagination::Pagination;
use crate::components::upload::accept_attr;
use crate::config::use_config;

#[component]
pub fn DatabasePanel(databases: Vec<DatabaseItem>, sample_rows: Vec<PreviewRow>) -> impl IntoView {
	let config = use_config();
	let catalog = RwSignal::new(DatabaseCatalog::new(databases, sample_rows, config.page_size));

	let visible = Memo::new(move |_| catalog.with(DatabaseCatalog::visible));
	let current_page = Signal::derive(move || catalog.with(|c| c.pager.current));
	let total_pages = Signal::derive(move || catalog.with(DatabaseCatalog::total_pages));

	view! {
		<div class="database">
			<div class="panel-header">
				<div>
					<h2 class="panel-title">"Database Governance"</h2>
					<p class="muted">"Manage, inspect, and modify database resources."</p>
				</div>
			</div>
			<div class="database-layout">
				<SourceCard catalog=catalog />
				<div class="database-list">
					<div class="card-grid">
						<For
							each=move || visible.get()
							key=|db| db.id.clone()
							children=move |db: DatabaseItem| view! { <DatabaseCard db=db catalog=catalog /> }
						/>
					</div>
					<Pagination
						current=current_page
						total=total_pages
						on_change=move |page: usize| {
							catalog.update(|c| {
								c.go_to_page(page);
							})
						}
					/>
				</div>
			</div>
			<PreviewDialog catalog=catalog />
		</div>
	}
}

/// Text input bound to one field of the source form.
#[component]
fn FormField(
	catalog: RwSignal<DatabaseCatalog>,
	id: &'static str,
	label: &'static str,
	placeholder: &'static str,
	read: fn(&SourceForm) -> String,
	write: fn(&mut SourceForm, String),
	#[prop(optional)] password: bool,
) -> impl IntoView {
	let input_type = if password { "password" } else { "text" };
	view! {
		<div class="field">
			<label class="field-label" for=id>
				{label}
			</label>
			<input
				id=id
				class="input"
				type=input_type
				placeholder=placeholder
				prop:value=move || catalog.with(|c| read(&c.form))
				on:input=move |ev| {
					let value = event_target_value(&ev);
					catalog.update(|c| write(&mut c.form, value));
				}
			/>
		</div>
	}
}

#[component]
fn SourceCard(catalog: RwSignal<DatabaseCatalog>) -> impl IntoView {
	let kind = Memo::new(move |_| catalog.with(|c| c.form.kind));
	let mode = Memo::new(move |_| catalog.with(|c| c.form.mode));
	let file = Memo::new(move |_| catalog.with(|c| c.form.file.clone()));

	let on_kind = move |ev: Event| {
		if let Some(kind) = DbKind::from_label(&event_target_value(&ev)) {
			catalog.update(|c| c.form.kind = kind);
		}
	};
	let set_mode = move |mode: ConnectionMode| catalog.update(|c| c.form.mode = mode);
	let on_file = move |ev: Event| {
		let Some(file) = picked_file(&ev) else {
			return;
		};
		match file.check_extension(DUMP_EXTENSIONS) {
			Ok(()) => catalog.update(|c| c.form.file = Some(file)),
			Err(err) => warn!("{err}"),
		}
	};
	let on_submit = move |_: MouseEvent| {
		let today = today();
		catalog.update(|c| {
			c.submit_form(&today);
		});
	};

	view! {
		<div class="card source-card">
			<header class="card-header">
				<h3 class="card-title">"Add Database"</h3>
				<p class="card-description">"Upload a dump file or connect to a running instance."</p>
			</header>
			<div class="card-body">
				<label class="field-label" for="db-kind">
					"Type"
				</label>
				<select
					id="db-kind"
					class="input"
					prop:value=move || kind.get().label()
					on:change=on_kind
				>
					{DbKind::ALL
						.into_iter()
						.map(|k| view! { <option value=k.label()>{k.label()}</option> })
						.collect_view()}
				</select>
				<Show
					when=move || kind.get().is_object_store()
					fallback=move || {
						view! {
							<div class="segmented">
								<button
									class="segment"
									class:selected=move || mode.get() == ConnectionMode::File
									on:click=move |_| set_mode(ConnectionMode::File)
								>
									"File Upload"
								</button>
								<button
									class="segment"
									class:selected=move || mode.get() == ConnectionMode::Remote
									on:click=move |_| set_mode(ConnectionMode::Remote)
								>
									"Remote Connect"
								</button>
							</div>
							<Show
								when=move || mode.get() == ConnectionMode::Remote
								fallback=move || {
									view! {
										<label class="file-picker">
											<input
												type="file"
												class="hidden"
												accept=accept_attr(DUMP_EXTENSIONS)
												on:change=on_file
											/>
											{move || match file.get() {
												Some(file) => format!("{} ({}) • Change file", file.name, file.size_label()),
												None => "Click to upload a .sql or .dump file".to_string(),
											}}
										</label>
									}
								}
							>
								<FormField
									catalog=catalog
									id="remote-ip"
									label="IP Address"
									placeholder="127.0.0.1"
									read=|f| f.remote.ip.clone()
									write=|f, v| f.remote.ip = v
								/>
								<FormField
									catalog=catalog
									id="remote-port"
									label="Port"
									placeholder="5432"
									read=|f| f.remote.port.clone()
									write=|f, v| f.remote.port = v
								/>
								<FormField
									catalog=catalog
									id="remote-dbname"
									label="Database Name"
									placeholder="my_database"
									read=|f| f.remote.db_name.clone()
									write=|f, v| f.remote.db_name = v
								/>
								<FormField
									catalog=catalog
									id="remote-username"
									label="Username"
									placeholder="admin"
									read=|f| f.remote.username.clone()
									write=|f, v| f.remote.username = v
								/>
								<FormField
									catalog=catalog
									id="remote-password"
									label="Password"
									placeholder="••••••"
									read=|f| f.remote.password.clone()
									write=|f, v| f.remote.password = v
									password=true
								/>
							</Show>
						}
					}
				>
					<FormField
						catalog=catalog
						id="minio-ip"
						label="IP Address"
						placeholder="127.0.0.1"
						read=|f| f.minio.ip.clone()
						write=|f, v| f.minio.ip = v
					/>
					<FormField
						catalog=catalog
						id="minio-port"
						label="Port"
						placeholder="9000"
						read=|f| f.minio.port.clone()
						write=|f, v| f.minio.port = v
					/>
					<FormField
						catalog=catalog
						id="minio-bucket"
						label="Bucket"
						placeholder="my-bucket"
						read=|f| f.minio.bucket.clone()
						write=|f, v| f.minio.bucket = v
					/>
				</Show>
			</div>
			<footer class="card-footer">
				<button
					class="btn btn-primary"
					disabled=move || !catalog.with(|c| c.form.can_submit())
					on:click=on_submit
				>
					{move || catalog.with(|c| c.form.submit_label())}
				</button>
			</footer>
		</div>
	}
}

#[component]
fn DatabaseCard(db: DatabaseItem, catalog: RwSignal<DatabaseCatalog>) -> impl IntoView {
	let summary = db.summary();
	let on_preview = {
		let id = db.id.clone();
		move |_: MouseEvent| catalog.update(|c| c.open_preview(&id))
	};
	let on_delete = {
		let id = db.id.clone();
		move |_: MouseEvent| {
			if confirm("Are you sure you want to delete this database?") {
				catalog.update(|c| {
					c.delete(&id);
				});
			}
		}
	};

	view! {
		<div class="card database-card">
			<header class="card-header">
				<h3 class="card-title">{db.name}</h3>
				<span class="badge">{db.kind.label()}</span>
			</header>
			<div class="card-body">
				<p class="muted">{summary}</p>
				<p class="muted">"Modified " {db.last_modified}</p>
				<div class="card-actions">
					<button class="btn btn-outline btn-sm" on:click=on_preview>
						"Preview"
					</button>
					<button class="btn-icon destructive" title="Delete" on:click=on_delete>
						"🗑"
					</button>
				</div>
			</div>
		</div>
	}
}

#[component]
fn PreviewDialog(catalog: RwSignal<DatabaseCatalog>) -> impl IntoView {
	let preview = Memo::new(move |_| catalog.with(|c| c.preview.clone()));
	let editing = Memo::new(move |_| preview.with(|p| p.as_ref().is_some_and(|p| p.editing)));
	let row_ids = Memo::new(move |_| {
		preview.with(|p| {
			p.as_ref()
				.map(|p| p.rows.iter().map(|row| row.id).collect::<Vec<_>>())
				.unwrap_or_default()
		})
	});
	let value_of = move |row_id: u32, field: PreviewField| {
		preview.with(|p| {
			p.as_ref()
				.and_then(|p| p.shown().iter().find(|row| row.id == row_id))
				.map(|row| row.get(field).to_string())
				.unwrap_or_default()
		})
	};
	let title = move || {
		preview.with(|p| p.as_ref().map(|p| format!("Data Preview: {}", p.db_name)).unwrap_or_default())
	};
	let close = Callback::new(move |_: ()| catalog.update(|c| c.close_preview()));
	let toggle = move |_: MouseEvent| {
		catalog.update(|c| {
			if let Some(p) = c.preview.as_mut() {
				p.toggle_editing();
			}
		})
	};
	let save = move |_: MouseEvent| {
		let mut saved = false;
		catalog.update(|c| saved = c.preview.as_mut().is_some_and(|p| p.save()));
		if saved {
			alert("Database changes saved successfully (Mock)");
		}
	};

	// Swaps between text and input only when edit mode flips, so typing
	// keeps focus.
	let cell = move |row_id: u32, field: PreviewField| {
		view! {
			<td>
				{move || {
					if editing.get() {
						view! {
							<input
								class="input input-sm"
								prop:value=move || value_of(row_id, field)
								on:input=move |ev| {
									let value = event_target_value(&ev);
									catalog.update(|c| {
										if let Some(p) = c.preview.as_mut() {
											p.set_cell(row_id, field, value);
										}
									});
								}
							/>
						}
							.into_any()
					} else {
						view! { <span>{move || value_of(row_id, field)}</span> }.into_any()
					}
				}}
			</td>
		}
	};

	view! {
		<Show when=move || preview.with(Option::is_some)>
			<Modal
				title=title()
				description="View and edit data records. Changes are saved automatically (Mock)."
				on_close=close
			>
				<table class="table">
					<thead>
						<tr>
							<th>"Name"</th>
							<th>"Email"</th>
							<th>"Role"</th>
						</tr>
					</thead>
					<tbody>
						<For
							each=move || row_ids.get()
							key=|id| *id
							children=move |row_id: u32| {
								view! {
									<tr>
										{cell(row_id, PreviewField::Name)}
										{cell(row_id, PreviewField::Email)}
										{cell(row_id, PreviewField::Role)}
									</tr>
								}
							}
						/>
					</tbody>
				</table>
				<div class="modal-footer">
					<button class="btn btn-outline" on:click=toggle>
						{move || if editing.get() { "Exit Edit Mode" } else { "Edit Mode" }}
					</button>
					<Show when=move || editing.get()>
						<button class="btn btn-primary" on:click=save>
							"Save"
						</button>
					</Show>
					<button class="btn btn-ghost" on:click=move |_| close.run(())>
						"Close"
					</button>
				</div>
			</Modal>
		</Show>
	}
}
