//! Force-directed placement for device nodes.
//!
//! The solver runs one tick per animation frame and cools through a decaying
//! alpha value. Four forces compose additively: springs along links, pairwise
//! inverse-square repulsion, a centering pull toward the viewport middle, and
//! a positional collision pass that keeps icon centers apart. A node pinned
//! by the interaction layer keeps its exact coordinates but still anchors its
//! neighbors' link and repulsion forces.

use std::f64::consts::PI;

/// Tuning knobs for the solver.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
	/// Rest length of the link spring.
	pub link_distance: f64,
	/// Spring coefficient, shared across both endpoints by degree bias.
	pub link_strength: f64,
	/// Negative for repulsion, applied as `strength * alpha / d^2`.
	pub charge_strength: f64,
	/// Per-node radius for the collision pass; centers stay at least two
	/// radii apart.
	pub collide_radius: f64,
	/// Below this alpha the simulation counts as settled.
	pub alpha_min: f64,
	/// Per-tick interpolation factor of alpha toward its target.
	pub alpha_decay: f64,
	/// Velocity carry-over per tick.
	pub damping: f64,
}

impl Default for SimParams {
	fn default() -> Self {
		Self {
			link_distance: 120.0,
			link_strength: 0.5,
			charge_strength: -500.0,
			collide_radius: 45.0,
			alpha_min: 0.001,
			// Reaches alpha_min from 1.0 in roughly 300 ticks.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			damping: 0.6,
		}
	}
}

/// One dynamics-bearing body.
#[derive(Clone, Copy, Debug)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	vx: f64,
	vy: f64,
	pinned: Option<(f64, f64)>,
}

impl SimNode {
	pub fn position(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	pub fn is_pinned(&self) -> bool {
		self.pinned.is_some()
	}
}

struct SimLink {
	source: usize,
	target: usize,
	/// Share of the correction taken by the target, per endpoint degree.
	bias: f64,
}

/// Iterative solver over the device node set of one rendered graph.
pub struct Simulation {
	params: SimParams,
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	alpha: f64,
	alpha_target: f64,
	center: (f64, f64),
}

impl Simulation {
	/// Seeds `count` nodes on a circle around the viewport center, the same
	/// deterministic initial arrangement for the same graph.
	pub fn new(count: usize, links: &[(usize, usize)], width: f64, height: f64) -> Self {
		Self::with_params(count, links, width, height, SimParams::default())
	}

	pub fn with_params(
		count: usize,
		links: &[(usize, usize)],
		width: f64,
		height: f64,
		params: SimParams,
	) -> Self {
		let center = (width / 2.0, height / 2.0);
		let nodes = (0..count)
			.map(|i| {
				let angle = (i as f64) * 2.0 * PI / count.max(1) as f64;
				SimNode {
					x: center.0 + 100.0 * angle.cos(),
					y: center.1 + 100.0 * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					pinned: None,
				}
			})
			.collect();

		let mut degree = vec![0usize; count];
		for &(s, t) in links {
			degree[s] += 1;
			degree[t] += 1;
		}
		let links = links
			.iter()
			.map(|&(source, target)| SimLink {
				source,
				target,
				bias: degree[source] as f64 / (degree[source] + degree[target]).max(1) as f64,
			})
			.collect();

		Self {
			params,
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			center,
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Settled: alpha has cooled below threshold and nothing is holding it up.
	pub fn converged(&self) -> bool {
		self.alpha < self.params.alpha_min && self.alpha_target < self.params.alpha_min
	}

	/// Bumps alpha back up so motion resumes; never lowers it.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
	}

	/// Sustained heat level, e.g. 0.3 while a drag is in progress.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	/// Pins a node to exact coordinates; it no longer moves under forces.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pinned = Some((x, y));
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	/// Releases a pinned node back to free dynamics.
	pub fn unpin(&mut self, index: usize) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pinned = None;
		}
	}

	/// Advances the solver one frame.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.integrate();
		self.resolve_collisions();
	}

	fn apply_links(&mut self) {
		let SimParams {
			link_distance,
			link_strength,
			..
		} = self.params;
		for link in &self.links {
			let (s, t) = (link.source, link.target);
			let mut dx = (self.nodes[t].x + self.nodes[t].vx)
				- (self.nodes[s].x + self.nodes[s].vx);
			let mut dy = (self.nodes[t].y + self.nodes[t].vy)
				- (self.nodes[s].y + self.nodes[s].vy);
			if dx == 0.0 && dy == 0.0 {
				dx = 1e-6;
				dy = 1e-6;
			}
			let dist = (dx * dx + dy * dy).sqrt();
			let scale = (dist - link_distance) / dist * self.alpha * link_strength;
			let (fx, fy) = (dx * scale, dy * scale);
			self.nodes[t].vx -= fx * link.bias;
			self.nodes[t].vy -= fy * link.bias;
			self.nodes[s].vx += fx * (1.0 - link.bias);
			self.nodes[s].vy += fy * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.params.charge_strength;
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = 1e-6;
					dy = 1e-6;
				}
				// Clamp so near-coincident pairs do not explode; the
				// collision pass separates them instead.
				let d2 = (dx * dx + dy * dy).max(1.0);
				let w = strength * self.alpha / d2;
				self.nodes[i].vx += dx * w;
				self.nodes[i].vy += dy * w;
				self.nodes[j].vx -= dx * w;
				self.nodes[j].vy -= dy * w;
			}
		}
	}

	/// Translates the free node set so its centroid sits on the viewport
	/// center. Pinned nodes contribute to the centroid but do not move.
	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (mut mx, mut my) = (0.0, 0.0);
		for node in &self.nodes {
			mx += node.x;
			my += node.y;
		}
		let (sx, sy) = (mx / n - self.center.0, my / n - self.center.1);
		for node in self.nodes.iter_mut().filter(|n| !n.is_pinned()) {
			node.x -= sx;
			node.y -= sy;
		}
	}

	fn integrate(&mut self) {
		let damping = self.params.damping;
		for node in &mut self.nodes {
			if let Some((px, py)) = node.pinned {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= damping;
			node.vy *= damping;
			node.x += node.vx;
			node.y += node.vy;
		}
	}

	/// Positional pass after integration: overlapping pairs are pushed apart
	/// along their separation axis. A pinned node absorbs none of the
	/// correction; its partner takes all of it.
	fn resolve_collisions(&mut self) {
		let min_dist = 2.0 * self.params.collide_radius;
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = 1e-6;
					dy = 1e-6;
				}
				let dist = (dx * dx + dy * dy).sqrt();
				if dist >= min_dist {
					continue;
				}
				let overlap = (min_dist - dist) / dist;
				let (i_pinned, j_pinned) =
					(self.nodes[i].is_pinned(), self.nodes[j].is_pinned());
				let (wi, wj) = match (i_pinned, j_pinned) {
					(true, true) => continue,
					(true, false) => (0.0, 1.0),
					(false, true) => (1.0, 0.0),
					(false, false) => (0.5, 0.5),
				};
				self.nodes[i].x -= dx * overlap * wi;
				self.nodes[i].y -= dy * overlap * wi;
				self.nodes[j].x += dx * overlap * wj;
				self.nodes[j].y += dy * overlap * wj;
			}
		}
	}
}
