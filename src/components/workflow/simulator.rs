//! Mock workflow run: every node goes `running`, then settles one by one on
//! a random outcome.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};

use super::store::WorkflowStore;
use super::types::{NodeId, NodePatch, NodeStatus};
use crate::timer::{Scheduler, TaskGroup};

/// Source of uniform values in `[0, 1)`.
pub trait Roll {
	fn roll(&self) -> f64;
}

/// `Math.random()` from the host page.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRoll;

impl Roll for BrowserRoll {
	fn roll(&self) -> f64 {
		js_sys::Math::random()
	}
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRoll {
	values: Rc<Vec<f64>>,
	next: Rc<RefCell<usize>>,
}

impl ScriptedRoll {
	/// Start at the first of `values`.
	pub fn new(values: Vec<f64>) -> Self {
		Self {
			values: Rc::new(values),
			next: Rc::new(RefCell::new(0)),
		}
	}
}

impl Roll for ScriptedRoll {
	fn roll(&self) -> f64 {
		if self.values.is_empty() {
			return 0.0;
		}
		let mut next = self.next.borrow_mut();
		let value = self.values[*next % self.values.len()];
		*next += 1;
		value
	}
}

/// Somewhere a run can write statuses back to. Writes report `false` once
/// the owner is gone, and are then dropped.
pub trait StoreCell: Clone + 'static {
	fn try_with_store(&self, f: impl FnOnce(&mut WorkflowStore)) -> bool;
}

impl StoreCell for Rc<RefCell<WorkflowStore>> {
	fn try_with_store(&self, f: impl FnOnce(&mut WorkflowStore)) -> bool {
		match self.try_borrow_mut() {
			Ok(mut store) => {
				f(&mut store);
				true
			}
			Err(_) => false,
		}
	}
}

/// `> 0.9` errors, `> 0.8` warns, anything else succeeds.
pub fn outcome_for(roll: f64) -> NodeStatus {
	if roll > 0.9 {
		NodeStatus::Error
	} else if roll > 0.8 {
		NodeStatus::Warning
	} else {
		NodeStatus::Success
	}
}

/// Start a mock run. All nodes are `running` when this returns; node `i`
/// settles after `(i + 1) * step`. Dropping the returned group cancels
/// whatever has not settled yet.
pub fn start_run<S, C, R>(scheduler: &S, cell: &C, roll: R, step: Duration) -> TaskGroup<S::Handle>
where
	S: Scheduler,
	C: StoreCell,
	R: Roll + Clone + 'static,
{
	let mut ids: Vec<NodeId> = Vec::new();
	cell.try_with_store(|store| ids = store.begin_run());
	info!("mock run started for {} nodes", ids.len());

	let mut tasks = TaskGroup::default();
	for (index, id) in ids.into_iter().enumerate() {
		let (cell, roll) = (cell.clone(), roll.clone());
		let delay = step * (index as u32 + 1);
		tasks.push(scheduler.schedule(
			delay,
			Box::new(move || {
				let status = outcome_for(roll.roll());
				let written = cell.try_with_store(|store| {
					// node may have been deleted mid-run
					store.update_node(&id, NodePatch::status(status));
				});
				debug!("node {id} settled as {} (applied: {written})", status.as_str());
			}),
		));
	}
	tasks
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::workflow::palette::default_palette;
	use crate::components::workflow::types::{NodeKind, Position};
	use crate::timer::ManualScheduler;

	const STEP: Duration = Duration::from_millis(1500);

	fn store_with(count: usize) -> Rc<RefCell<WorkflowStore>> {
		let mut store = WorkflowStore::new();
		let palette = default_palette();
		for i in 0..count {
			let template = &palette[i % palette.len()];
			store.add_node(template.instantiate(NodeKind::Microapplication, Position::new(i as f64 * 10.0, 0.0)));
		}
		Rc::new(RefCell::new(store))
	}

	fn statuses(cell: &Rc<RefCell<WorkflowStore>>) -> Vec<NodeStatus> {
		cell.borrow().nodes().iter().map(|n| n.data.status).collect()
	}

	#[test]
	fn outcome_thresholds() {
		assert_eq!(outcome_for(0.0), NodeStatus::Success);
		assert_eq!(outcome_for(0.8), NodeStatus::Success);
		assert_eq!(outcome_for(0.85), NodeStatus::Warning);
		assert_eq!(outcome_for(0.9), NodeStatus::Warning);
		assert_eq!(outcome_for(0.95), NodeStatus::Error);
	}

	#[test]
	fn nodes_settle_one_step_apart() {
		let cell = store_with(3);
		let scheduler = ManualScheduler::new();
		let _run = start_run(&scheduler, &cell, ScriptedRoll::new(vec![0.1, 0.95, 0.85]), STEP);
		assert_eq!(statuses(&cell), vec![NodeStatus::Running; 3]);

		scheduler.advance(STEP);
		assert_eq!(
			statuses(&cell),
			vec![NodeStatus::Success, NodeStatus::Running, NodeStatus::Running]
		);
		scheduler.advance(STEP);
		assert_eq!(statuses(&cell)[1], NodeStatus::Error);
		scheduler.advance(STEP);
		assert_eq!(statuses(&cell)[2], NodeStatus::Warning);
		assert_eq!(scheduler.pending(), 0);
	}

	#[test]
	fn dropping_the_run_stops_pending_updates() {
		let cell = store_with(4);
		let scheduler = ManualScheduler::new();
		let run = start_run(&scheduler, &cell, ScriptedRoll::new(vec![0.0]), STEP);
		scheduler.advance(STEP);
		drop(run);
		scheduler.advance(STEP * 10);

		let settled = statuses(&cell);
		assert_eq!(settled[0], NodeStatus::Success);
		assert!(settled[1..].iter().all(|s| *s == NodeStatus::Running));
	}

	#[test]
	fn deleted_node_update_is_ignored() {
		let cell = store_with(2);
		let first = cell.borrow().nodes()[0].id.clone();
		let scheduler = ManualScheduler::new();
		let _run = start_run(&scheduler, &cell, ScriptedRoll::new(vec![0.5]), STEP);
		cell.borrow_mut().remove_node(&first);

		scheduler.advance(STEP * 2);
		assert_eq!(statuses(&cell), vec![NodeStatus::Success]);
	}

	#[test]
	fn empty_store_schedules_nothing() {
		let cell = store_with(0);
		let scheduler = ManualScheduler::new();
		let run = start_run(&scheduler, &cell, BrowserRoll, STEP);
		assert!(run.is_empty());
		assert_eq!(scheduler.pending(), 0);
	}
}
