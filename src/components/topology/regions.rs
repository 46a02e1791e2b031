//! Subnet containment boxes derived from live member positions.
//!
//! Recomputed every tick. One linear sweep over the devices per pass, cheap
//! at the graph sizes this tool draws.

use super::simulation::Simulation;
use super::types::TopologyGraph;

/// Fixed margin added around the members' bounding box, all four sides.
pub const REGION_PADDING: f64 = 40.0;

/// Axis-aligned rectangle in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn contains(&self, px: f64, py: f64) -> bool {
		px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
	}
}

/// Minimal axis-aligned box covering `points`, expanded by `padding` on all
/// sides. `None` when there are no points — the zero-size "render nothing"
/// case. A single point yields the padding-only box.
pub fn bounding_rect(points: impl IntoIterator<Item = (f64, f64)>, padding: f64) -> Option<Rect> {
	let mut bounds: Option<(f64, f64, f64, f64)> = None;
	for (x, y) in points {
		bounds = Some(match bounds {
			None => (x, y, x, y),
			Some((min_x, min_y, max_x, max_y)) => {
				(min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
			}
		});
	}
	bounds.map(|(min_x, min_y, max_x, max_y)| Rect {
		x: min_x - padding,
		y: min_y - padding,
		width: max_x - min_x + 2.0 * padding,
		height: max_y - min_y + 2.0 * padding,
	})
}

/// One box per subnet, index-aligned with `graph.subnets`. Membership is the
/// device's resolved subnet index; subnets themselves carry no position.
pub fn subnet_regions(graph: &TopologyGraph, sim: &Simulation) -> Vec<Option<Rect>> {
	(0..graph.subnets.len())
		.map(|subnet| {
			let members = graph
				.devices
				.iter()
				.enumerate()
				.filter(|(_, d)| d.subnet == Some(subnet))
				.map(|(i, _)| sim.nodes()[i].position());
			bounding_rect(members, REGION_PADDING)
		})
		.collect()
}
