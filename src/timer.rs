//! Deferred callbacks with explicit ownership.
//!
//! Every simulated backend delay goes through a [`Scheduler`]. The handles it
//! returns are collected in a [`TaskGroup`], which clears whatever is still
//! pending when the owning view goes away.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::{TimeoutHandle, set_timeout_with_handle};
use log::warn;

/// A scheduled callback that may still be pending.
pub trait TaskHandle {
	/// Prevent the callback from running. No-op once it has fired.
	fn cancel(&self);
}

/// Runs boxed callbacks after a delay.
pub trait Scheduler {
	/// Handle returned for each scheduled callback.
	type Handle: TaskHandle;

	/// Run `task` once `delay` has elapsed.
	fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + 'static>) -> Self::Handle;
}

/// Schedules on the browser event loop via `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

/// A browser timeout. `None` when scheduling failed.
#[derive(Clone, Copy)]
pub struct BrowserTask(Option<TimeoutHandle>);

impl TaskHandle for BrowserTask {
	fn cancel(&self) {
		if let Some(handle) = self.0 {
			handle.clear();
		}
	}
}

impl Scheduler for BrowserScheduler {
	type Handle = BrowserTask;

	fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + 'static>) -> BrowserTask {
		match set_timeout_with_handle(task, delay) {
			Ok(handle) => BrowserTask(Some(handle)),
			Err(err) => {
				warn!("failed to schedule timer: {err:?}");
				BrowserTask(None)
			}
		}
	}
}

/// Owns a set of pending callbacks and cancels them on drop.
#[derive(Debug)]
pub struct TaskGroup<H: TaskHandle> {
	handles: Vec<H>,
}

impl<H: TaskHandle> Default for TaskGroup<H> {
	fn default() -> Self {
		Self {
			handles: Vec::new(),
		}
	}
}

impl<H: TaskHandle> TaskGroup<H> {
	/// Take ownership of a pending callback.
	pub fn push(&mut self, handle: H) {
		self.handles.push(handle);
	}

	/// Number of handles held, fired or not.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Whether no handles are held.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Cancel and forget every handle.
	pub fn cancel_all(&mut self) {
		for handle in self.handles.drain(..) {
			handle.cancel();
		}
	}

	/// Cancel what this group holds and take over `other`'s handles.
	pub fn replace(&mut self, mut other: TaskGroup<H>) {
		self.cancel_all();
		self.handles = std::mem::take(&mut other.handles);
	}
}

impl<H: TaskHandle> Drop for TaskGroup<H> {
	fn drop(&mut self) {
		self.cancel_all();
	}
}

/// One pending callback per key. Setting a key again cancels what it held,
/// so a long session keeps at most one handle per key.
#[derive(Debug)]
pub struct KeyedTasks<K: Eq + Hash, H: TaskHandle> {
	handles: HashMap<K, H>,
}

impl<K: Eq + Hash, H: TaskHandle> Default for KeyedTasks<K, H> {
	fn default() -> Self {
		Self {
			handles: HashMap::new(),
		}
	}
}

impl<K: Eq + Hash, H: TaskHandle> KeyedTasks<K, H> {
	/// Hold `handle` under `key`, cancelling the handle it replaces.
	pub fn set(&mut self, key: K, handle: H) {
		if let Some(previous) = self.handles.insert(key, handle) {
			previous.cancel();
		}
	}

	/// Number of keys with a handle.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Whether no key holds a handle.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Cancel and forget every handle.
	pub fn cancel_all(&mut self) {
		for (_, handle) in self.handles.drain() {
			handle.cancel();
		}
	}
}

impl<K: Eq + Hash, H: TaskHandle> Drop for KeyedTasks<K, H> {
	fn drop(&mut self) {
		self.cancel_all();
	}
}

type ManualTask = (Duration, u64, Box<dyn FnOnce()>);

#[derive(Default)]
struct ManualQueue {
	now: Duration,
	next_id: u64,
	tasks: Vec<ManualTask>,
}

/// Scheduler driven by an explicit virtual clock. Nothing runs until
/// [`ManualScheduler::advance`] moves time past a task's deadline.
#[derive(Clone, Default)]
pub struct ManualScheduler {
	queue: Rc<RefCell<ManualQueue>>,
}

/// Handle into a [`ManualScheduler`] queue.
pub struct ManualHandle {
	id: u64,
	queue: Rc<RefCell<ManualQueue>>,
}

impl TaskHandle for ManualHandle {
	fn cancel(&self) {
		self.queue.borrow_mut().tasks.retain(|(_, id, _)| *id != self.id);
	}
}

impl Scheduler for ManualScheduler {
	type Handle = ManualHandle;

	fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + 'static>) -> ManualHandle {
		let mut queue = self.queue.borrow_mut();
		let id = queue.next_id;
		queue.next_id += 1;
		let deadline = queue.now + delay;
		queue.tasks.push((deadline, id, task));
		ManualHandle {
			id,
			queue: self.queue.clone(),
		}
	}
}

impl ManualScheduler {
	/// A scheduler at time zero with nothing queued.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current virtual time.
	pub fn now(&self) -> Duration {
		self.queue.borrow().now
	}

	/// Callbacks still waiting to run.
	pub fn pending(&self) -> usize {
		self.queue.borrow().tasks.len()
	}

	/// Move the clock forward, running due tasks in deadline order.
	pub fn advance(&self, by: Duration) {
		let target = self.queue.borrow().now + by;
		loop {
			let next = {
				let mut queue = self.queue.borrow_mut();
				let due = queue
					.tasks
					.iter()
					.enumerate()
					.filter(|(_, (deadline, _, _))| *deadline <= target)
					.min_by_key(|(_, (deadline, id, _))| (*deadline, *id))
					.map(|(index, _)| index);
				due.map(|index| {
					let (deadline, _, task) = queue.tasks.remove(index);
					queue.now = deadline;
					task
				})
			};
			// borrow released: tasks may schedule more work
			match next {
				Some(task) => task(),
				None => break,
			}
		}
		self.queue.borrow_mut().now = target;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn manual_scheduler_runs_in_deadline_order() {
		let scheduler = ManualScheduler::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		for (name, ms) in [("late", 300), ("early", 100), ("mid", 200)] {
			let log = log.clone();
			let _ = scheduler.schedule(
				Duration::from_millis(ms),
				Box::new(move || log.borrow_mut().push(name)),
			);
		}

		scheduler.advance(Duration::from_millis(150));
		assert_eq!(*log.borrow(), vec!["early"]);
		scheduler.advance(Duration::from_millis(1000));
		assert_eq!(*log.borrow(), vec!["early", "mid", "late"]);
		assert_eq!(scheduler.now(), Duration::from_millis(1150));
	}

	#[test]
	fn dropping_group_cancels_pending_tasks() {
		let scheduler = ManualScheduler::new();
		let fired = Rc::new(Cell::new(0));
		{
			let mut group = TaskGroup::default();
			for _ in 0..3 {
				let fired = fired.clone();
				group.push(scheduler.schedule(
					Duration::from_millis(10),
					Box::new(move || fired.set(fired.get() + 1)),
				));
			}
			assert_eq!(group.len(), 3);
			assert_eq!(scheduler.pending(), 3);
		}

		assert_eq!(scheduler.pending(), 0);
		scheduler.advance(Duration::from_secs(1));
		assert_eq!(fired.get(), 0);
	}

	#[test]
	fn replace_cancels_previous_handles() {
		let scheduler = ManualScheduler::new();
		let fired = Rc::new(Cell::new(0));
		let mut group = TaskGroup::default();
		let counter = fired.clone();
		group.push(scheduler.schedule(
			Duration::from_millis(10),
			Box::new(move || counter.set(counter.get() + 1)),
		));

		let mut next = TaskGroup::default();
		let counter = fired.clone();
		next.push(scheduler.schedule(
			Duration::from_millis(20),
			Box::new(move || counter.set(counter.get() + 10)),
		));
		group.replace(next);

		scheduler.advance(Duration::from_millis(50));
		assert_eq!(fired.get(), 10);
	}

	#[test]
	fn keyed_tasks_hold_one_handle_per_key() {
		let scheduler = ManualScheduler::new();
		let fired = Rc::new(RefCell::new(Vec::new()));
		let mut tasks = KeyedTasks::default();
		for (key, ms) in [("toggle:1", 10), ("toggle:2", 10), ("toggle:1", 30)] {
			let fired = fired.clone();
			tasks.set(
				key,
				scheduler.schedule(Duration::from_millis(ms), Box::new(move || fired.borrow_mut().push((key, ms)))),
			);
		}
		assert_eq!(tasks.len(), 2);
		assert_eq!(scheduler.pending(), 2);

		scheduler.advance(Duration::from_millis(50));
		assert_eq!(*fired.borrow(), vec![("toggle:2", 10), ("toggle:1", 30)]);

		// later rounds reuse the same slots
		for _ in 0..5 {
			tasks.set("toggle:1", scheduler.schedule(Duration::from_millis(10), Box::new(|| {})));
			scheduler.advance(Duration::from_millis(20));
		}
		assert_eq!(tasks.len(), 2);
	}

	#[test]
	fn dropping_keyed_tasks_cancels_pending() {
		let scheduler = ManualScheduler::new();
		let fired = Rc::new(Cell::new(false));
		{
			let mut tasks = KeyedTasks::default();
			let flag = fired.clone();
			tasks.set("upload", scheduler.schedule(Duration::from_millis(10), Box::new(move || flag.set(true))));
		}
		scheduler.advance(Duration::from_secs(1));
		assert!(!fired.get());
	}
}
