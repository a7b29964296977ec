use leptos::prelude::*;
use log::warn;
use web_sys::{DragEvent, Event, MouseEvent};

use super::state::{ACCEPTED_EXTENSIONS, ArtifactKind, FileMeta, UploadWizard, WizardStep, accept_attr};
use crate::browser::{alert, dropped_file, picked_file};
use crate::config::use_config;
use crate::timer::{BrowserScheduler, BrowserTask, KeyedTasks, Scheduler};

fn select(wizard: RwSignal<UploadWizard>, file: Option<FileMeta>) {
	let Some(file) = file else {
		return;
	};
	wizard.update(|w| {
		if let Err(err) = w.select(file) {
			warn!("{err}");
		}
	});
}

#[component]
pub fn UploadWizardView() -> impl IntoView {
	let config = use_config();
	let wizard = RwSignal::new(UploadWizard::new());
	let tasks = StoredValue::new_local(KeyedTasks::<&'static str, BrowserTask>::default());
	on_cleanup(move || {
		tasks.try_update_value(|tasks| tasks.cancel_all());
	});

	let step = Memo::new(move |_| wizard.with(|w| w.step));
	let file = Memo::new(move |_| wizard.with(|w| w.file.clone()));
	let error = Memo::new(move |_| wizard.with(|w| w.last_error.as_ref().map(ToString::to_string)));

	let on_drag = move |ev: DragEvent| {
		ev.prevent_default();
		ev.stop_propagation();
		let active = ev.type_() != "dragleave";
		if wizard.with_untracked(|w| w.drag_active) != active {
			wizard.update(|w| w.drag_active = active);
		}
	};
	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		ev.stop_propagation();
		wizard.update(|w| w.drag_active = false);
		select(wizard, dropped_file(&ev));
	};
	let on_change = move |ev: Event| select(wizard, picked_file(&ev));
	let clear = move |_: MouseEvent| wizard.update(|w| w.clear());

	let upload_delay = config.upload_delay;
	let on_submit = move |_: MouseEvent| {
		let mut started = false;
		wizard.update(|w| started = w.begin_upload());
		if !started {
			return;
		}
		let handle = BrowserScheduler.schedule(
			upload_delay,
			Box::new(move || {
				let mut done = false;
				wizard.try_update(|w| done = w.finish_upload().is_some());
				if done {
					alert("Microapplication uploaded successfully (Mock)");
				}
			}),
		);
		tasks.update_value(|tasks| tasks.set("upload", handle));
	};

	let zone_class = move || {
		let mut class = String::from("drop-zone");
		if wizard.with(|w| w.drag_active) {
			class.push_str(" active");
		}
		if file.with(Option::is_some) {
			class.push_str(" has-file");
		}
		class
	};

	let steps = WizardStep::ALL
		.into_iter()
		.enumerate()
		.map(|(index, s)| {
			let class = move || {
				let current = WizardStep::ALL.iter().position(|x| *x == step.get()).unwrap_or(0);
				match index.cmp(&current) {
					std::cmp::Ordering::Less => "wizard-step complete",
					std::cmp::Ordering::Equal => "wizard-step current",
					std::cmp::Ordering::Greater => "wizard-step",
				}
			};
			view! {
				<li class=class>
					<span class="wizard-step-index">{index + 1}</span>
					{s.label()}
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="upload">
			<div class="card">
				<header class="card-header">
					<h3 class="card-title">"Upload Microapplication"</h3>
					<p class="card-description">"Upload your compiled JAR and configuration YML files."</p>
				</header>
				<ol class="wizard-steps">{steps}</ol>
				<div
					class=zone_class
					on:dragenter=on_drag
					on:dragover=on_drag
					on:dragleave=on_drag
					on:drop=on_drop
				>
					<input
						type="file"
						id="file-upload"
						class="hidden"
						accept=accept_attr(ACCEPTED_EXTENSIONS)
						on:change=on_change
					/>
					{move || match file.get() {
						Some(file) => {
							let kind = ArtifactKind::of(&file).map(ArtifactKind::label).unwrap_or("File");
							view! {
								<div class="selected-file">
									<p class="file-name">"✔ " {file.name.clone()}</p>
									<p class="file-meta">{kind} " • " {file.size_label()}</p>
									<Show when=move || step.get() == WizardStep::Review>
										<button class="btn btn-ghost btn-sm" on:click=clear>
											"Remove"
										</button>
									</Show>
								</div>
							}
								.into_any()
						}
						None => {
							view! {
								<label for="file-upload" class="drop-label">
									<span class="drop-icon">"⇪"</span>
									<p>"Drag & drop or click to upload"</p>
									<p class="muted">"Supports .jar and .yml files"</p>
								</label>
							}
								.into_any()
						}
					}}
				</div>
				{move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
				<footer class="card-footer">
					<button class="btn btn-ghost" on:click=clear>
						"Cancel"
					</button>
					<button
						class="btn btn-primary"
						disabled=move || !wizard.with(UploadWizard::can_submit)
						on:click=on_submit
					>
						{move || if step.get() == WizardStep::Uploading { "Uploading..." } else { "Upload" }}
					</button>
				</footer>
			</div>
		</div>
	}
}
