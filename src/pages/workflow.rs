use leptos::prelude::*;

use crate::components::workflow::WorkflowEditorView;

/// Workflow orchestration canvas
#[component]
pub fn WorkflowPage() -> impl IntoView {
	view! { <WorkflowEditorView /> }
}
