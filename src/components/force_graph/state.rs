use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use super::layout::{ForceGraphLayout, LayoutEngine, Point, Viewport};
use super::types::NetworkGraph;

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
/// Screen pixels a press may travel before it counts as a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;
/// Alpha the layout is held at while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f32 = 0.3;

/// Pan/zoom applied to the whole scene, independent of simulation space.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Scales by `factor` around the screen point `(sx, sy)`, clamped to
	/// `[MIN_ZOOM, MAX_ZOOM]`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// A press on a node. It turns into a drag once the pointer travels past
/// [`DRAG_THRESHOLD`]; released before that it is a click.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub dragging: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	/// 0..1 fade of the highlight.
	pub highlight_t: f64,
}

/// What a pointer release amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerUp {
	Click(usize),
	DragEnd(usize),
	PanEnd,
	Nothing,
}

/// Shared run counter. A frame loop started for one generation stops
/// touching the view as soon as a newer one exists.
#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
	pub fn advance(&self) -> u64 {
		let next = self.0.get() + 1;
		self.0.set(next);
		next
	}

	pub fn is_current(&self, generation: u64) -> bool {
		self.0.get() == generation
	}
}

pub struct ForceGraphState<L = ForceGraphLayout> {
	pub graph: NetworkGraph,
	pub layout: L,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub viewport: Viewport,
	pub generation: u64,
	positions: Vec<Point>,
}

impl<L: LayoutEngine> ForceGraphState<L> {
	pub fn new(graph: NetworkGraph, viewport: Viewport, mut layout: L, generation: u64) -> Self {
		layout.rebuild(&graph, viewport);
		let positions = layout.positions();
		Self {
			graph,
			layout,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			viewport,
			generation,
			positions,
		}
	}

	pub fn positions(&self) -> &[Point] {
		&self.positions
	}

	/// Closest node within [`HIT_RADIUS`] (world space) of the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let p = self.transform.screen_to_graph(sx, sy);
		self.positions
			.iter()
			.enumerate()
			.map(|(idx, node)| (idx, node.distance(p)))
			.filter(|&(_, d)| d < HIT_RADIUS)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// Returns whether the press landed on a node.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> bool {
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag = DragState {
				node: Some(idx),
				dragging: false,
				start_x: sx,
				start_y: sy,
				node_start: self.positions[idx],
			};
			true
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			false
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if !self.drag.dragging {
				if (dx * dx + dy * dy).sqrt() <= DRAG_THRESHOLD {
					return;
				}
				self.drag.dragging = true;
				self.layout.set_alpha_target(DRAG_ALPHA_TARGET);
				self.layout.reheat();
			}
			let at = Point::new(
				self.drag.node_start.x + dx / self.transform.k,
				self.drag.node_start.y + dy / self.transform.k,
			);
			self.layout.pin(idx, at);
			if let Some(slot) = self.positions.get_mut(idx) {
				*slot = at;
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		} else {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}
	}

	pub fn pointer_up(&mut self) -> PointerUp {
		let drag = std::mem::take(&mut self.drag);
		let was_panning = std::mem::take(&mut self.pan).active;
		match drag.node {
			Some(idx) if drag.dragging => {
				self.layout.release(idx);
				self.layout.set_alpha_target(0.0);
				PointerUp::DragEnd(idx)
			}
			Some(idx) => PointerUp::Click(idx),
			None if was_panning => PointerUp::PanEnd,
			None => PointerUp::Nothing,
		}
	}

	/// Pointer left the canvas: abandon any gesture without clicking.
	pub fn pointer_leave(&mut self) {
		if let Some(idx) = self.drag.node {
			if self.drag.dragging {
				self.layout.release(idx);
				self.layout.set_alpha_target(0.0);
			}
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.set_hover(None);
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.transform.zoom_at(sx, sy, factor);
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors = node
			.map(|idx| self.graph.neighbors(idx).collect())
			.unwrap_or_default();
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
	}

	/// Advances the layout (while it is hot) and the hover fade.
	pub fn tick(&mut self, dt: f32) {
		if self.layout.is_active() {
			self.layout.tick(dt);
			self.positions = self.layout.positions();
		}
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 6.0 * f64::from(dt);
		self.hover.highlight_t = self.hover.highlight_t.clamp(0.0, 1.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Category, Concept};

	/// Layout that never moves anything on its own.
	#[derive(Default)]
	struct FixedLayout {
		points: Vec<Point>,
		pinned: Vec<bool>,
		alpha_target: f32,
		heat: u32,
	}

	impl LayoutEngine for FixedLayout {
		fn rebuild(&mut self, graph: &NetworkGraph, _viewport: Viewport) {
			self.points = (0..graph.len()).map(|i| Point::new(i as f64 * 100.0, 0.0)).collect();
			self.pinned = vec![false; graph.len()];
		}
		fn tick(&mut self, _dt: f32) -> bool {
			false
		}
		fn is_active(&self) -> bool {
			false
		}
		fn positions(&self) -> Vec<Point> {
			self.points.clone()
		}
		fn pin(&mut self, idx: usize, at: Point) {
			self.points[idx] = at;
			self.pinned[idx] = true;
		}
		fn release(&mut self, idx: usize) {
			self.pinned[idx] = false;
		}
		fn set_alpha_target(&mut self, target: f32) {
			self.alpha_target = target;
		}
		fn reheat(&mut self) {
			self.heat += 1;
		}
	}

	fn state() -> ForceGraphState<FixedLayout> {
		let concepts = [
			Concept::new("a", "A", Category::Tool).related_to(["b"]),
			Concept::new("b", "B", Category::Tool),
			Concept::new("c", "C", Category::Tool),
		];
		ForceGraphState::new(
			NetworkGraph::build(&concepts),
			Viewport::new(400.0, 300.0),
			FixedLayout::default(),
			1,
		)
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let mut s = state();
		assert!(s.pointer_down(100.0, 0.0));
		s.pointer_move(101.0, 1.0);
		assert_eq!(s.pointer_up(), PointerUp::Click(1));
		assert_eq!(s.layout.heat, 0);
		assert!(!s.layout.pinned[1]);
		assert_eq!(s.positions()[1], Point::new(100.0, 0.0));
	}

	#[test]
	fn drag_pins_reheats_and_releases() {
		let mut s = state();
		s.pointer_down(200.0, 0.0);
		s.pointer_move(220.0, 30.0);
		assert!(s.drag.dragging);
		assert!(s.layout.pinned[2]);
		assert_eq!(s.layout.heat, 1);
		assert_eq!(s.layout.alpha_target, DRAG_ALPHA_TARGET);
		assert_eq!(s.positions()[2], Point::new(220.0, 30.0));

		assert_eq!(s.pointer_up(), PointerUp::DragEnd(2));
		assert!(!s.layout.pinned[2]);
		assert_eq!(s.layout.alpha_target, 0.0);
	}

	#[test]
	fn drag_distance_follows_zoom() {
		let mut s = state();
		s.transform.k = 2.0;
		s.pointer_down(200.0, 0.0);
		s.pointer_move(240.0, 0.0);
		assert_eq!(s.positions()[1], Point::new(120.0, 0.0));
	}

	#[test]
	fn background_press_pans() {
		let mut s = state();
		assert!(!s.pointer_down(50.0, 200.0));
		s.pointer_move(80.0, 190.0);
		assert_eq!((s.transform.x, s.transform.y), (30.0, -10.0));
		assert_eq!(s.pointer_up(), PointerUp::PanEnd);
		assert_eq!(s.pointer_up(), PointerUp::Nothing);
	}

	#[test]
	fn leaving_mid_drag_does_not_click() {
		let mut s = state();
		s.pointer_down(0.0, 0.0);
		s.pointer_move(50.0, 50.0);
		s.pointer_leave();
		assert!(!s.layout.pinned[0]);
		assert_eq!(s.pointer_up(), PointerUp::Nothing);
	}

	#[test]
	fn zoom_is_clamped_and_keeps_cursor_fixed() {
		let mut t = ViewTransform::default();
		let before = t.screen_to_graph(120.0, 80.0);
		t.zoom_at(120.0, 80.0, 1.5);
		let after = t.screen_to_graph(120.0, 80.0);
		assert!(before.distance(after) < 1e-9);

		for _ in 0..100 {
			t.zoom_at(0.0, 0.0, 1.1);
		}
		assert_eq!(t.k, MAX_ZOOM);
		for _ in 0..200 {
			t.zoom_at(0.0, 0.0, 0.9);
		}
		assert_eq!(t.k, MIN_ZOOM);
	}

	#[test]
	fn hover_marks_neighbors() {
		let mut s = state();
		s.pointer_move(0.0, 5.0);
		assert!(s.is_hovered(0));
		assert!(s.is_highlighted(1));
		assert!(!s.is_highlighted(2));
		s.pointer_move(300.0, 300.0);
		assert!(s.hover.node.is_none());
	}

	#[test]
	fn hit_test_respects_pan() {
		let mut s = state();
		s.transform.x = 50.0;
		assert_eq!(s.node_at_position(150.0, 0.0), Some(1));
		assert_eq!(s.node_at_position(100.0, 0.0), None);
	}

	#[test]
	fn superseded_generation_is_not_current() {
		let generation = Generation::default();
		let first = generation.advance();
		assert!(generation.is_current(first));
		let second = generation.clone().advance();
		assert!(!generation.is_current(first));
		assert!(generation.is_current(second));
	}
}
