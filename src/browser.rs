//! Thin wrappers over the host page: blocking dialogs, clock, pointer math.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, File, HtmlInputElement, MouseEvent};

use crate::components::upload::FileMeta;

pub fn alert(message: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Err(err) = window.alert_with_message(message) {
		warn!("alert failed: {err:?}");
	}
}

/// Ask before a destructive action. Anything but an explicit OK is a no.
pub fn confirm(message: &str) -> bool {
	web_sys::window()
		.and_then(|window| window.confirm_with_message(message).ok())
		.unwrap_or(false)
}

/// `YYYY-MM-DDTHH:MM:SS` in UTC.
fn iso_now() -> String {
	let iso: String = js_sys::Date::new_0().to_iso_string().into();
	iso.chars().take(19).collect()
}

/// Today's date as `YYYY-MM-DD`.
pub fn today() -> String {
	iso_now().chars().take(10).collect()
}

/// Current time as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp() -> String {
	iso_now().replacen('T', " ", 1)
}

/// Pointer position relative to `element`'s top-left corner.
pub fn relative_point(element: &Element, ev: &MouseEvent) -> (f64, f64) {
	let rect = element.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn file_meta(file: &File) -> FileMeta {
	FileMeta::new(&file.name(), file.size() as u64)
}

/// Metadata of the first file chosen in an `<input type="file">`.
pub fn picked_file(ev: &Event) -> Option<FileMeta> {
	let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
	let file = input.files()?.get(0)?;
	Some(file_meta(&file))
}

/// Metadata of the first file dropped in a drag-and-drop.
pub fn dropped_file(ev: &DragEvent) -> Option<FileMeta> {
	let file = ev.data_transfer()?.files()?.get(0)?;
	Some(file_meta(&file))
}
