use leptos::prelude::*;

/// 1-based page cursor over a list whose length may change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
	pub current: usize,
	pub page_size: usize,
}

impl Pager {
	pub fn new(page_size: usize) -> Self {
		Self {
			current: 1,
			page_size: page_size.max(1),
		}
	}

	pub fn total(&self, len: usize) -> usize {
		len.div_ceil(self.page_size)
	}

	pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
		let start = ((self.current - 1) * self.page_size).min(items.len());
		let end = (start + self.page_size).min(items.len());
		&items[start..end]
	}

	/// Move to `page` if it exists for a list of `len` items.
	pub fn go_to(&mut self, page: usize, len: usize) -> bool {
		if page >= 1 && page <= self.total(len) {
			self.current = page;
			true
		} else {
			false
		}
	}

	pub fn clamp(&mut self, len: usize) {
		self.current = self.current.min(self.total(len)).max(1);
	}
}

#[component]
pub fn Pagination(
	#[prop(into)] current: Signal<usize>,
	#[prop(into)] total: Signal<usize>,
	#[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
	view! {
		<Show when=move || { total.get() > 1 }>
			<div class="pagination">
				<button
					class="btn btn-outline btn-sm"
					disabled=move || current.get() <= 1
					on:click=move |_| on_change.run(current.get().saturating_sub(1))
				>
					"‹ Previous"
				</button>
				<span class="pagination-label">
					{move || format!("Page {} of {}", current.get(), total.get())}
				</span>
				<button
					class="btn btn-outline btn-sm"
					disabled=move || current.get() >= total.get()
					on:click=move |_| on_change.run(current.get() + 1)
				>
					"Next ›"
				</button>
			</div>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pages_round_up() {
		let pager = Pager::new(6);
		assert_eq!(pager.total(0), 0);
		assert_eq!(pager.total(6), 1);
		assert_eq!(pager.total(7), 2);
	}

	#[test]
	fn window_slices_current_page() {
		let items: Vec<u32> = (1..=8).collect();
		let mut pager = Pager::new(6);
		assert_eq!(pager.window(&items), &[1, 2, 3, 4, 5, 6]);
		assert!(pager.go_to(2, items.len()));
		assert_eq!(pager.window(&items), &[7, 8]);
	}

	#[test]
	fn out_of_range_navigation_is_ignored() {
		let mut pager = Pager::new(6);
		assert!(!pager.go_to(0, 10));
		assert!(!pager.go_to(3, 10));
		assert_eq!(pager.current, 1);
	}

	#[test]
	fn clamp_follows_shrinking_list() {
		let mut pager = Pager::new(2);
		assert!(pager.go_to(3, 6));
		pager.clamp(3);
		assert_eq!(pager.current, 2);
		pager.clamp(0);
		assert_eq!(pager.current, 1);
	}
}
