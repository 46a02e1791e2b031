//! Owned view state for one rendered topology.
//!
//! Constructed when a graph arrives, disposed on replacement or unmount.
//! Pointer handlers mutate this state between ticks only; the frame loop is
//! the single consumer. While a device is being dragged, the interaction
//! layer is the only writer of its position — the simulation sees it as a
//! pinned anchor.

use super::simulation::Simulation;
use super::types::TopologyGraph;

/// Pointer-to-device hit distance, in world units.
pub const HIT_RADIUS: f64 = 30.0;

/// Pan/zoom applied on top of the world coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Copy, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

/// Simulation, viewport transform and interaction state for one graph.
pub struct TopologyState {
	pub graph: TopologyGraph,
	pub sim: Simulation,
	pub transform: ViewTransform,
	/// `Some(device)` while that device is in the `dragging` state.
	drag: Option<usize>,
	pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl TopologyState {
	pub fn new(graph: TopologyGraph, width: f64, height: f64) -> Self {
		let sim = Simulation::new(graph.devices.len(), &graph.link_pairs(), width, height);
		Self {
			graph,
			sim,
			transform: ViewTransform::default(),
			drag: None,
			pan: PanState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The device under the pointer, if any. Linear scan; last hit wins.
	pub fn device_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		let mut found = None;
		for (i, node) in self.sim.nodes().iter().enumerate() {
			let (dx, dy) = (node.x - wx, node.y - wy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(i);
			}
		}
		found
	}

	pub fn dragged_device(&self) -> Option<usize> {
		self.drag
	}

	/// Pointer-down: a hit device enters `dragging` (pinned to the pointer,
	/// simulation reheated so neighbors keep moving); otherwise the gesture
	/// pans the viewport.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some(device) = self.device_at(sx, sy) {
			let (wx, wy) = self.screen_to_world(sx, sy);
			self.drag = Some(device);
			self.sim.pin(device, wx, wy);
			self.sim.set_alpha_target(0.3);
			self.sim.reheat(0.3);
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(device) = self.drag {
			let (wx, wy) = self.screen_to_world(sx, sy);
			self.sim.pin(device, wx, wy);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Pointer-up: the dragged device returns to free dynamics; residual
	/// alpha keeps decaying rather than forcing a full re-settle.
	pub fn pointer_up(&mut self) {
		if let Some(device) = self.drag.take() {
			self.sim.unpin(device);
			self.sim.set_alpha_target(0.0);
		}
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sim.set_center(width / 2.0, height / 2.0);
		self.sim.reheat(0.3);
	}

	/// One frame: advance the solver unless it has settled. Interaction and
	/// resize reheat it, so a settled view stays responsive.
	pub fn tick(&mut self) {
		if !self.sim.converged() {
			self.sim.tick();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::types::{EdgePayload, GraphPayload, NodePayload};

	fn two_device_state() -> TopologyState {
		let payload = GraphPayload {
			nodes: vec![
				NodePayload {
					id: "R1".into(),
					label: "R1".into(),
					kind: "router".into(),
					ip: None,
					parent: None,
				},
				NodePayload {
					id: "SW1".into(),
					label: "SW1".into(),
					kind: "switch".into(),
					ip: None,
					parent: None,
				},
			],
			edges: vec![EdgePayload {
				id: "R1-SW1".into(),
				source: "R1".into(),
				target: "SW1".into(),
				source_label: "G0/0".into(),
				target_label: "G0/1".into(),
				source_ip: None,
				target_ip: None,
				label: None,
			}],
		};
		TopologyState::new(TopologyGraph::from_payload(&payload), 800.0, 600.0)
	}

	#[test]
	fn hit_test_finds_seeded_device() {
		let state = two_device_state();
		// Device 0 seeds at (center + 100, center) with the identity transform.
		assert_eq!(state.device_at(500.0, 300.0), Some(0));
		assert_eq!(state.device_at(300.0, 300.0), Some(1));
		assert_eq!(state.device_at(50.0, 50.0), None);
	}

	#[test]
	fn drag_pins_to_pointer_until_release() {
		let mut state = two_device_state();
		state.pointer_down(500.0, 300.0);
		assert_eq!(state.dragged_device(), Some(0));
		state.pointer_move(240.0, 180.0);
		for _ in 0..30 {
			state.tick();
			let (x, y) = state.sim.nodes()[0].position();
			assert_eq!((x, y), state.screen_to_world(240.0, 180.0));
		}
		state.pointer_up();
		assert_eq!(state.dragged_device(), None);
		assert!(!state.sim.nodes()[0].is_pinned());
	}

	#[test]
	fn background_drag_pans_the_viewport() {
		let mut state = two_device_state();
		state.pointer_down(50.0, 50.0);
		assert_eq!(state.dragged_device(), None);
		state.pointer_move(80.0, 40.0);
		assert_eq!(state.transform.x, 30.0);
		assert_eq!(state.transform.y, -10.0);
		state.pointer_up();
		state.pointer_move(200.0, 200.0);
		assert_eq!(state.transform.x, 30.0);
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut state = two_device_state();
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, -1.0);
		}
		assert!(state.transform.k <= 10.0);
		let (wx, wy) = state.screen_to_world(400.0, 300.0);
		// The anchor point keeps mapping to the same world coordinate.
		assert!((wx - 400.0).abs() < 1e-6);
		assert!((wy - 300.0).abs() < 1e-6);
	}

	#[test]
	fn resize_revives_a_settled_simulation() {
		let mut state = two_device_state();
		for _ in 0..800 {
			state.tick();
		}
		assert!(state.sim.converged());
		state.resize(1200.0, 900.0);
		assert!(!state.sim.converged());
	}
}
