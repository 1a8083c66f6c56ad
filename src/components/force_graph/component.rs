use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::layout::{ForceGraphLayout, Viewport};
use super::render;
use super::state::{ForceGraphState, Generation, PointerUp};
use super::types::NetworkGraph;
use crate::model::{ConceptStore, SelectionSet};

const FRAME_DT: f32 = 0.016;
const FALLBACK_WIDTH: f64 = 800.0;
const MIN_HEIGHT: f64 = 500.0;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

/// Interactive force-directed map of the concept store.
///
/// Click a node to toggle its selection, drag to move it, drag the background
/// to pan and scroll to zoom. The layout is rebuilt whenever the concepts or
/// the canvas size change.
#[component]
pub fn ConceptNetwork(
	#[prop(into)] concepts: Signal<ConceptStore>,
	#[prop(into)] selection: Signal<SelectionSet>,
	on_toggle: Callback<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let generation = Generation::default();
	let viewport = RwSignal::new(None::<Viewport>);
	// disposed with this component; frame loops stop once it is gone
	let mounted = StoredValue::new(());

	Effect::new(move |_| {
		if let Some(canvas) = canvas_ref.get() {
			viewport.set(Some(measure(&canvas)));
		}
	});

	let resize = window_event_listener(leptos::ev::resize, move |_| {
		if let Some(canvas) = canvas_ref.get_untracked() {
			let next = measure(&canvas);
			if viewport.get_untracked() != Some(next) {
				viewport.set(Some(next));
			}
		}
	});
	on_cleanup(move || resize.remove());

	let (state_build, generation_build) = (state.clone(), generation.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(viewport) = viewport.get() else {
			return;
		};
		let graph = concepts.with(|store| NetworkGraph::build(store.iter()));

		canvas.set_width(viewport.width as u32);
		canvas.set_height(viewport.height as u32);
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable");
			return;
		};

		let run = generation_build.advance();
		info!(
			"network rebuild #{run}: {} nodes, {} links, {}x{}",
			graph.len(),
			graph.links.len(),
			viewport.width,
			viewport.height
		);
		let mut next = ForceGraphState::new(graph, viewport, ForceGraphLayout::default(), run);
		if let Some(previous) = state_build.borrow_mut().take() {
			next.transform = previous.transform;
		}
		*state_build.borrow_mut() = Some(next);

		schedule_frame(FrameLoop {
			state: state_build.clone(),
			generation: generation_build.clone(),
			mounted,
			run,
			ctx,
			selection,
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *state_mu.borrow_mut() {
			Some(ref mut s) => match s.pointer_up() {
				PointerUp::Click(idx) => s.graph.node_id(idx).map(str::to_string),
				PointerUp::DragEnd(idx) => {
					debug!("released node {idx}");
					None
				}
				PointerUp::PanEnd | PointerUp::Nothing => None,
			},
			None => None,
		};
		if let Some(id) = clicked {
			on_toggle.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<div class="network-panel">
			<div class="network-hint">
				<p>"Interactive Map"</p>
				<p>"Scroll to zoom, drag to move, click to select"</p>
			</div>
			<Show when=move || concepts.with(ConceptStore::is_empty)>
				<p class="network-empty">"No concepts yet."</p>
			</Show>
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
			/>
		</div>
	}
}

struct FrameLoop {
	state: SharedState,
	generation: Generation,
	mounted: StoredValue<()>,
	run: u64,
	ctx: CanvasRenderingContext2d,
	selection: Signal<SelectionSet>,
}

/// Ticks and draws once per animation frame until a newer run supersedes
/// this one or the component unmounts.
fn schedule_frame(frame: FrameLoop) {
	request_animation_frame(move || {
		if frame.mounted.try_with_value(|_| ()).is_none() {
			debug!("frame loop #{} stopped: unmounted", frame.run);
			return;
		}
		if !frame.generation.is_current(frame.run) {
			debug!("frame loop #{} superseded", frame.run);
			return;
		}
		if let Some(ref mut s) = *frame.state.borrow_mut() {
			if s.generation != frame.run {
				return;
			}
			s.tick(FRAME_DT);
			frame
				.selection
				.with_untracked(|selected| render::render(s, selected, &frame.ctx));
		}
		schedule_frame(frame);
	});
}

fn measure(canvas: &HtmlCanvasElement) -> Viewport {
	let (width, height) = canvas
		.parent_element()
		.map(|p| (f64::from(p.client_width()), f64::from(p.client_height())))
		.unwrap_or((FALLBACK_WIDTH, MIN_HEIGHT));
	let width = if width > 0.0 { width } else { FALLBACK_WIDTH };
	Viewport::new(width, height.max(MIN_HEIGHT))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		f64::from(ev.client_x()) - rect.left(),
		f64::from(ev.client_y()) - rect.top(),
	))
}
