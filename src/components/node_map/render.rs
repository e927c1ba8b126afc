use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CARD_RADIUS, DECK_RADIUS, NodeMapState};
use super::types::{GraphNode, NodeKind};

const BACKGROUND: &str = "#F8F7F6";
const ACCENT: &str = "#637FBF";
const CARD_FILL: &str = "#FFFFFF";
const FOCUS_RING: &str = "#F2A541";
const LABEL_MAX_CHARS: usize = 28;

fn truncate(text: &str) -> String {
	if text.chars().count() <= LABEL_MAX_CHARS {
		return text.to_owned();
	}
	let mut out: String = text.chars().take(LABEL_MAX_CHARS - 1).collect();
	out.push('…');
	out
}

pub fn render(state: &NodeMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	for node in state.graph.nodes() {
		draw_node(state, node, ctx);
	}
	ctx.restore();
}

fn draw_edges(state: &NodeMapState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap) = (8.0 / k, 4.0 / k);
	ctx.set_stroke_style_str(ACCENT);
	ctx.set_line_width(2.0 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(-(state.flow_time * 30.0) % (dash + gap));

	for edge in state.graph.edges() {
		let (Some(from), Some(to)) = (
			state.graph.position(&edge.source),
			state.graph.position(&edge.target),
		) else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = dx.hypot(dy);
		if dist < DECK_RADIUS + CARD_RADIUS {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(from.x + ux * DECK_RADIUS, from.y + uy * DECK_RADIUS);
		ctx.line_to(to.x - ux * CARD_RADIUS, to.y - uy * CARD_RADIUS);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_node(state: &NodeMapState, node: &GraphNode, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (x, y) = (node.position.x, node.position.y);
	let focused = state.search.current() == Some(node.id.as_str());

	let (radius, fill, text_fill, text, font_px) = match &node.kind {
		NodeKind::Deck { label } => (DECK_RADIUS, ACCENT, "white", label.as_str(), 14.0),
		NodeKind::Card(card) => (CARD_RADIUS, CARD_FILL, "black", card.face(), 11.0),
	};

	if focused {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 6.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(FOCUS_RING);
		ctx.set_line_width(3.0 / k);
		ctx.stroke();
	}

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_stroke_style_str(if node.is_deck() { "white" } else { ACCENT });
	ctx.set_line_width(2.0 / k);
	ctx.stroke();

	ctx.set_fill_style_str(text_fill);
	ctx.set_font(&format!("{}px sans-serif", font_px / k.max(0.5)));
	ctx.set_text_align("center");
	let label = truncate(text);
	match node.kind {
		// Deck labels fit inside; card text sits below the card.
		NodeKind::Deck { .. } => {
			let _ = ctx.fill_text(&label, x, y + 4.0);
		}
		NodeKind::Card(_) => {
			let _ = ctx.fill_text(&label, x, y + radius + 14.0 / k.max(0.5));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::truncate;

	#[test]
	fn long_labels_are_truncated() {
		assert_eq!(truncate("short"), "short");
		let long = "a".repeat(40);
		let out = truncate(&long);
		assert_eq!(out.chars().count(), 28);
		assert!(out.ends_with('…'));
	}
}
