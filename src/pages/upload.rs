use leptos::prelude::*;

use crate::components::upload::UploadWizardView;

/// Microapplication upload wizard
#[component]
pub fn UploadPage() -> impl IntoView {
	view! { <UploadWizardView /> }
}
