use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::TopologyState;
use super::types::TopologyGraph;

/// Interactive topology viewport.
///
/// Owns one [`TopologyState`] per rendered graph: a new value on the `graph`
/// signal tears the previous simulation down and rebuilds from scratch,
/// applied between ticks. One animation-frame loop drives tick-then-draw;
/// when the canvas leaves the document the loop stops scheduling itself,
/// drops the simulation and unregisters the window resize listener.
#[component]
pub fn TopologyCanvas(#[prop(into)] graph: Signal<Option<TopologyGraph>>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TopologyState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let loop_started: Rc<Cell<bool>> = Rc::new(Cell::new(false));

	let (state_init, animate_init, resize_cb_init, loop_started_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		loop_started.clone(),
	);

	Effect::new(move |_| {
		let new_graph = graph.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		// Atomic replacement: the previous simulation is dropped here, never
		// ticked again. Effects run between animation frames, so this cannot
		// interleave with a tick.
		*state_init.borrow_mut() = match new_graph {
			Some(graph) => {
				info!(
					"topology replaced: {} devices, {} links, {} subnets",
					graph.devices.len(),
					graph.links.len(),
					graph.subnets.len()
				);
				Some(TopologyState::new(graph, w, h))
			}
			None => None,
		};

		if loop_started_init.get() {
			return;
		}
		loop_started_init.set(true);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, resize_anim, canvas_anim) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			canvas.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !canvas_anim.is_connected() {
				// Unmounted: stop the simulation and drop the observers. The
				// loop ends here because no further frame is requested.
				*state_anim.borrow_mut() = None;
				if let Some(window) = web_sys::window() {
					if let Some(ref cb) = *resize_anim.borrow() {
						let _ = window.remove_event_listener_with_callback(
							"resize",
							cb.as_ref().unchecked_ref(),
						);
					}
				}
				*resize_anim.borrow_mut() = None;
				info!("topology view unmounted, simulation stopped");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&canvas_ref, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&canvas_ref, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = pointer_position(&canvas_ref, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topology-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn pointer_position(canvas_ref: &NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> (f64, f64) {
	let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}
