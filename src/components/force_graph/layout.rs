//! Force-directed placement behind the network canvas.
//!
//! [`LayoutEngine`] is what the view state talks to. [`ForceGraphLayout`]
//! is the production engine: `force_graph` integrates charge repulsion and
//! node velocities, and each tick then applies rest-length springs, collision
//! separation and a centering shift on top.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{NetworkGraph, NetworkLink};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Positions graph nodes over time. Indices are node positions in the
/// [`NetworkGraph`] passed to the last `rebuild`.
pub trait LayoutEngine {
	/// Drops the previous simulation and starts a hot one for `graph`.
	fn rebuild(&mut self, graph: &NetworkGraph, viewport: Viewport);
	/// Advances one frame. Returns whether the simulation is still moving.
	fn tick(&mut self, dt: f32) -> bool;
	fn is_active(&self) -> bool;
	fn positions(&self) -> Vec<Point>;
	/// Fixes `idx` at `at` until [`LayoutEngine::release`].
	fn pin(&mut self, idx: usize, at: Point);
	fn release(&mut self, idx: usize);
	/// Level the cooling schedule settles at; non-zero keeps it running.
	fn set_alpha_target(&mut self, target: f32);
	fn reheat(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	pub charge: f32,
	pub node_mass: f32,
	pub node_speed: f32,
	pub damping: f32,
	pub force_max: f32,
	pub link_distance: f64,
	pub link_strength: f64,
	pub collide_radius: f64,
	pub collide_strength: f64,
	pub seed_radius: f64,
	pub alpha_min: f32,
	pub alpha_decay: f32,
	pub energy_floor: f64,
	pub reheat_alpha: f32,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			charge: 300.0,
			node_mass: 10.0,
			node_speed: 3000.0,
			damping: 0.9,
			force_max: 100.0,
			link_distance: 100.0,
			link_strength: 0.3,
			collide_radius: 30.0,
			collide_strength: 0.7,
			seed_radius: 100.0,
			alpha_min: 0.001,
			// reaches alpha_min from 1.0 in ~300 ticks
			alpha_decay: 1.0 - 0.001f32.powf(1.0 / 300.0),
			energy_floor: 1e-4,
			reheat_alpha: 0.3,
		}
	}
}

pub struct ForceGraphLayout {
	params: LayoutParams,
	graph: ForceGraph<usize, ()>,
	handles: Vec<DefaultNodeIdx>,
	links: Vec<NetworkLink>,
	center: Point,
	alpha: f32,
	alpha_target: f32,
	energy: f64,
}

impl Default for ForceGraphLayout {
	fn default() -> Self {
		Self::new(LayoutParams::default())
	}
}

impl ForceGraphLayout {
	pub fn new(params: LayoutParams) -> Self {
		let graph = ForceGraph::new(Self::simulation_parameters(&params));
		Self {
			params,
			graph,
			handles: Vec::new(),
			links: Vec::new(),
			center: Point::default(),
			alpha: 0.0,
			alpha_target: 0.0,
			energy: 0.0,
		}
	}

	fn simulation_parameters(params: &LayoutParams) -> SimulationParameters {
		SimulationParameters {
			force_charge: params.charge,
			// springs are applied with a rest length in `apply_links`
			force_spring: 0.0,
			force_max: params.force_max,
			node_speed: params.node_speed,
			damping_factor: params.damping,
		}
	}

	fn anchors(&self) -> Vec<bool> {
		let mut anchored = vec![false; self.handles.len()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = anchored.get_mut(node.data.user_data) {
				*slot = node.data.is_anchor;
			}
		});
		anchored
	}

	fn write_back(&mut self, positions: &[Point]) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(p) = positions.get(node.data.user_data) {
				if p.x.is_finite() && p.y.is_finite() {
					node.data.x = p.x as f32;
					node.data.y = p.y as f32;
				}
			}
		});
	}

	fn with_node(&mut self, idx: usize, f: impl FnOnce(&mut NodeData<usize>)) {
		let Some(&handle) = self.handles.get(idx) else {
			return;
		};
		let mut f = Some(f);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				if let Some(f) = f.take() {
					f(&mut node.data);
				}
			}
		});
	}

	fn apply_links(&self, positions: &mut [Point], anchored: &[bool]) {
		let alpha = f64::from(self.alpha);
		for link in &self.links {
			let (s, t) = (link.source, link.target);
			if s == t || (anchored[s] && anchored[t]) {
				continue;
			}
			let (dx, dy) = (positions[t].x - positions[s].x, positions[t].y - positions[s].y);
			let len = (dx * dx + dy * dy).sqrt().max(1e-3);
			let k = (len - self.params.link_distance) / len * alpha * self.params.link_strength;
			let (mx, my) = (dx * k, dy * k);
			let target_share = share(anchored[t], anchored[s]);
			positions[t].x -= mx * target_share;
			positions[t].y -= my * target_share;
			positions[s].x += mx * (1.0 - target_share);
			positions[s].y += my * (1.0 - target_share);
		}
	}

	fn apply_collisions(&self, positions: &mut [Point], anchored: &[bool]) {
		let min = self.params.collide_radius * 2.0;
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				if anchored[i] && anchored[j] {
					continue;
				}
				let mut dx = positions[j].x - positions[i].x;
				let mut dy = positions[j].y - positions[i].y;
				let mut dist = (dx * dx + dy * dy).sqrt();
				if dist >= min {
					continue;
				}
				if dist < 1e-6 {
					// coincident nodes: separate along a fixed per-pair direction
					let angle = (i * 31 + j * 17) as f64;
					(dx, dy) = (angle.cos() * 1e-3, angle.sin() * 1e-3);
					dist = 1e-3;
				}
				let push = (min - dist) / dist * self.params.collide_strength;
				let j_share = share(anchored[j], anchored[i]);
				positions[i].x -= dx * push * (1.0 - j_share);
				positions[i].y -= dy * push * (1.0 - j_share);
				positions[j].x += dx * push * j_share;
				positions[j].y += dy * push * j_share;
			}
		}
	}

	fn apply_centering(&self, positions: &mut [Point], anchored: &[bool]) {
		let free: Vec<usize> = (0..positions.len()).filter(|&i| !anchored[i]).collect();
		if free.is_empty() {
			return;
		}
		let n = free.len() as f64;
		let mean_x = free.iter().map(|&i| positions[i].x).sum::<f64>() / n;
		let mean_y = free.iter().map(|&i| positions[i].y).sum::<f64>() / n;
		let (sx, sy) = (self.center.x - mean_x, self.center.y - mean_y);
		for i in free {
			positions[i].x += sx;
			positions[i].y += sy;
		}
	}
}

/// Fraction of a pairwise correction taken by the first node.
fn share(first_anchored: bool, other_anchored: bool) -> f64 {
	match (first_anchored, other_anchored) {
		(true, _) => 0.0,
		(false, true) => 1.0,
		(false, false) => 0.5,
	}
}

impl LayoutEngine for ForceGraphLayout {
	fn rebuild(&mut self, graph: &NetworkGraph, viewport: Viewport) {
		self.graph = ForceGraph::new(Self::simulation_parameters(&self.params));
		self.handles.clear();
		self.links = graph.links.clone();
		self.center = viewport.center();

		let n = graph.len().max(1) as f64;
		for idx in 0..graph.len() {
			let angle = idx as f64 * 2.0 * PI / n;
			let handle = self.graph.add_node(NodeData {
				x: (self.center.x + self.params.seed_radius * angle.cos()) as f32,
				y: (self.center.y + self.params.seed_radius * angle.sin()) as f32,
				mass: self.params.node_mass,
				is_anchor: false,
				user_data: idx,
			});
			self.handles.push(handle);
		}
		for link in &graph.links {
			if link.source != link.target {
				self.graph.add_edge(
					self.handles[link.source],
					self.handles[link.target],
					EdgeData::default(),
				);
			}
		}

		self.alpha = 1.0;
		self.alpha_target = 0.0;
		self.energy = f64::INFINITY;
	}

	fn tick(&mut self, dt: f32) -> bool {
		if !self.is_active() {
			return false;
		}
		let before = self.positions();

		self.graph.update(dt * self.alpha);

		let anchored = self.anchors();
		let mut positions = self.positions();
		self.apply_links(&mut positions, &anchored);
		self.apply_collisions(&mut positions, &anchored);
		self.apply_centering(&mut positions, &anchored);
		self.write_back(&positions);

		let after = self.positions();
		self.energy = before
			.iter()
			.zip(&after)
			.map(|(a, b)| (a.x - b.x).powi(2) + (a.y - b.y).powi(2))
			.sum::<f64>()
			/ after.len().max(1) as f64;
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.is_active()
	}

	fn is_active(&self) -> bool {
		if self.handles.is_empty() {
			return false;
		}
		self.alpha_target > 0.0
			|| (self.alpha >= self.params.alpha_min && self.energy >= self.params.energy_floor)
	}

	fn positions(&self) -> Vec<Point> {
		let mut out = vec![Point::default(); self.handles.len()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = out.get_mut(node.data.user_data) {
				*slot = Point::new(f64::from(node.x()), f64::from(node.y()));
			}
		});
		out
	}

	fn pin(&mut self, idx: usize, at: Point) {
		self.with_node(idx, |data| {
			data.x = at.x as f32;
			data.y = at.y as f32;
			data.is_anchor = true;
		});
	}

	fn release(&mut self, idx: usize) {
		self.with_node(idx, |data| data.is_anchor = false);
	}

	fn set_alpha_target(&mut self, target: f32) {
		self.alpha_target = target.max(0.0);
	}

	fn reheat(&mut self) {
		self.alpha = self.alpha.max(self.params.reheat_alpha);
		self.energy = f64::INFINITY;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Category, Concept};

	fn graph(specs: &[(&str, &[&str])]) -> NetworkGraph {
		let concepts: Vec<Concept> = specs
			.iter()
			.map(|(id, related)| {
				Concept::new(*id, *id, Category::Concept).related_to(related.iter().copied())
			})
			.collect();
		NetworkGraph::build(&concepts)
	}

	fn run(layout: &mut ForceGraphLayout, ticks: usize) {
		for _ in 0..ticks {
			layout.tick(0.016);
		}
	}

	#[test]
	fn empty_graph_is_idle() {
		let mut layout = ForceGraphLayout::default();
		layout.rebuild(&NetworkGraph::default(), Viewport::new(800.0, 600.0));
		assert!(!layout.is_active());
		assert!(!layout.tick(0.016));
		assert!(layout.positions().is_empty());
	}

	#[test]
	fn layout_stays_centered() {
		let mut layout = ForceGraphLayout::default();
		let viewport = Viewport::new(800.0, 600.0);
		layout.rebuild(&graph(&[("a", &["b"]), ("b", &[]), ("c", &[]), ("d", &["a"])]), viewport);
		run(&mut layout, 50);
		let positions = layout.positions();
		let n = positions.len() as f64;
		let mean = Point::new(
			positions.iter().map(|p| p.x).sum::<f64>() / n,
			positions.iter().map(|p| p.y).sum::<f64>() / n,
		);
		assert!(mean.distance(viewport.center()) < 0.5, "mean drifted to {mean:?}");
	}

	#[test]
	fn cools_down_and_reheats() {
		let mut layout = ForceGraphLayout::default();
		let chain = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
		layout.rebuild(&chain, Viewport::new(400.0, 400.0));
		assert!(layout.is_active());
		run(&mut layout, 400);
		assert!(!layout.is_active());
		assert!(!layout.tick(0.016));

		layout.reheat();
		assert!(layout.is_active());
	}

	#[test]
	fn alpha_target_keeps_running_until_cleared() {
		let mut layout = ForceGraphLayout::default();
		layout.rebuild(&graph(&[("a", &[]), ("b", &[])]), Viewport::new(400.0, 400.0));
		layout.set_alpha_target(0.3);
		run(&mut layout, 600);
		assert!(layout.is_active());
		assert!((layout.alpha - 0.3).abs() < 0.01);

		layout.set_alpha_target(0.0);
		run(&mut layout, 600);
		assert!(!layout.is_active());
	}

	#[test]
	fn pinned_node_does_not_move() {
		let mut layout = ForceGraphLayout::default();
		let star = graph(&[("a", &["b"]), ("b", &["a"]), ("c", &["a"])]);
		layout.rebuild(&star, Viewport::new(600.0, 600.0));
		let spot = Point::new(42.0, 58.0);
		layout.pin(0, spot);
		run(&mut layout, 30);
		let pinned = layout.positions()[0];
		assert!(pinned.distance(spot) < 1e-3, "pinned node moved to {pinned:?}");

		layout.release(0);
		layout.reheat();
		run(&mut layout, 30);
		assert!(layout.positions()[0].distance(spot) > 1e-3);
	}

	#[test]
	fn collision_separates_overlapping_nodes() {
		let layout = ForceGraphLayout::default();
		let mut positions = vec![Point::new(100.0, 100.0), Point::new(100.0, 100.0)];
		layout.apply_collisions(&mut positions, &[false, false]);
		assert!(positions[0].distance(positions[1]) > 1.0);

		let mut positions = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
		layout.apply_collisions(&mut positions, &[true, false]);
		assert_eq!(positions[0], Point::new(0.0, 0.0));
		assert!(positions[1].x > 10.0);
	}

	#[test]
	fn springs_pull_toward_rest_length() {
		let mut layout = ForceGraphLayout::default();
		layout.rebuild(&graph(&[("a", &["b"]), ("b", &[])]), Viewport::new(400.0, 400.0));
		let mut far = vec![Point::new(0.0, 0.0), Point::new(400.0, 0.0)];
		layout.apply_links(&mut far, &[false, false]);
		assert!(far[0].distance(far[1]) < 400.0);

		let mut near = vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)];
		layout.apply_links(&mut near, &[false, false]);
		assert!(near[0].distance(near[1]) > 20.0);
	}

	#[test]
	fn rebuild_recenters_for_new_viewport() {
		let mut layout = ForceGraphLayout::default();
		let g = graph(&[("a", &["b"]), ("b", &[])]);
		layout.rebuild(&g, Viewport::new(200.0, 200.0));
		run(&mut layout, 20);
		layout.rebuild(&g, Viewport::new(1000.0, 800.0));
		assert_eq!(layout.positions().len(), 2);
		run(&mut layout, 20);
		let p = layout.positions();
		let mid = Point::new((p[0].x + p[1].x) / 2.0, (p[0].y + p[1].y) / 2.0);
		assert!(mid.distance(Point::new(500.0, 400.0)) < 0.5);
	}
}
