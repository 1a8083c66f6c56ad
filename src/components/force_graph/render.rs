use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::LayoutEngine;
use super::scale::category_color;
use super::state::{ForceGraphState, NODE_RADIUS};
use crate::model::SelectionSet;

const BACKGROUND: &str = "#0f172a";
const SELECTED_RING: &str = "#22d3ee";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render<L: LayoutEngine>(
	state: &ForceGraphState<L>,
	selected: &SelectionSet,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.viewport.width, state.viewport.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, selected, ctx);
	ctx.restore();
}

fn draw_links<L: LayoutEngine>(state: &ForceGraphState<L>, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let arrow_size = 6.0 / k.max(0.5);
	let t = ease_out_cubic(state.hover.highlight_t);
	let positions = state.positions();

	for link in &state.graph.links {
		let (Some(from), Some(to)) = (positions.get(link.source), positions.get(link.target)) else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < NODE_RADIUS * 2.0 {
			continue;
		}

		let lit = state.is_highlighted(link.source) && state.is_highlighted(link.target);
		let alpha = if lit { 0.6 + 0.35 * t } else { 0.6 - 0.45 * t };
		let color = format!("rgba(71, 85, 105, {alpha})");
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(1.0 / k.max(0.5));
		ctx.begin_path();
		ctx.move_to(from.x + ux * NODE_RADIUS, from.y + uy * NODE_RADIUS);
		ctx.line_to(
			to.x - ux * (NODE_RADIUS + arrow_size),
			to.y - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		let (tip_x, tip_y) = (to.x - ux * NODE_RADIUS, to.y - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.set_fill_style_str(&color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes<L: LayoutEngine>(
	state: &ForceGraphState<L>,
	selected: &SelectionSet,
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_highlight = state.hover.node.is_some();
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));

	for (idx, (node, p)) in state.graph.nodes.iter().zip(state.positions()).enumerate() {
		let dimmed = has_highlight && !state.is_highlighted(idx);
		let alpha = if dimmed { 1.0 - 0.7 * t } else { 1.0 };
		let radius = if state.is_hovered(idx) {
			NODE_RADIUS * (1.0 + 0.35 * t)
		} else {
			NODE_RADIUS
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(category_color(node.concept.category));
		ctx.fill();
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(1.5 / k.max(0.5));
		ctx.stroke();

		if selected.is_selected(&node.concept.id) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 4.0 / k.max(0.5), 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(SELECTED_RING);
			ctx.set_line_width(2.0 / k.max(0.5));
			ctx.stroke();
		}

		ctx.set_fill_style_str("#e2e8f0");
		ctx.set_font(&font);
		let _ = ctx.fill_text(&node.concept.name, p.x + radius + 4.0, p.y + 4.0);
		ctx.set_global_alpha(1.0);
	}
}
