use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::NodeMapConfig;
use super::render;
use super::search_panel::SearchRequest;
use super::state::NodeMapState;
use super::types::Deck;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas that lays out `decks` as a node graph, lets the user drag decks
/// (cards follow) and cards, and focuses the viewport on search results.
#[component]
pub fn NodeMapCanvas(
	#[prop(into)] decks: Signal<Vec<Deck>>,
	#[prop(into)] search: Signal<SearchRequest>,
	/// Receives the match count after every search.
	results: WriteSignal<usize>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = None)] config: Option<NodeMapConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NodeMapState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("No window; node map stays blank");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("Canvas 2d context unavailable; node map stays blank");
			return;
		};
		*state_init.borrow_mut() = Some(NodeMapState::new(
			&decks.get_untracked(),
			config.clone().unwrap_or_default(),
			w,
			h,
		));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_relayout = state.clone();
	Effect::new(move |_| {
		let decks = decks.get();
		if let Some(ref mut s) = *state_relayout.borrow_mut() {
			s.relayout(&decks);
			results.set(s.search.match_count());
		}
	});

	let state_search = state.clone();
	Effect::new(move |_| {
		let request = search.get();
		if request.seq == 0 {
			return;
		}
		let count = match *state_search.borrow_mut() {
			Some(ref mut s) => {
				s.run_search(&request.query);
				s.search.match_count()
			}
			None => {
				warn!("Search before the node map was ready: {:?}", request.query);
				0
			}
		};
		results.set(count);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
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
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.release();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.release();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="node-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
