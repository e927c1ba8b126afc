use log::{debug, info};

use super::config::NodeMapConfig;
use super::drag::{DragController, DragEvent, DragOutcome};
use super::layout::layout;
use super::search::{GraphCanvas, SearchNavigator, SearchOutcome};
use super::types::{Deck, NodeGraph, NodeKind, Position};

pub const DECK_RADIUS: f64 = 40.0;
pub const CARD_RADIUS: f64 = 28.0;
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 1.5;

/// Screen-space translation plus uniform zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
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

/// An in-flight pan towards a focused node. Both ends are graph-space
/// points for the viewport centre, so zooming mid-flight keeps the target
/// centred.
#[derive(Clone, Copy, Debug)]
pub struct FocusAnimation {
	from: Position,
	to: Position,
	elapsed: f64,
	duration: f64,
}

/// Pointer bookkeeping for the node under the primary button.
#[derive(Clone, Debug, Default)]
pub struct PointerDrag {
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	/// Pointer travelled far enough to count as a drag rather than a click.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pixels of pointer travel before a press on a card stops being a click.
const CLICK_SLOP: f64 = 3.0;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Everything the node map canvas needs for one session: the laid-out
/// graph, drag and search controllers, and the viewport.
pub struct NodeMapState {
	pub config: NodeMapConfig,
	pub graph: NodeGraph,
	pub drag: DragController,
	pub search: SearchNavigator,
	pub transform: ViewTransform,
	pub pointer: PointerDrag,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	focus: Option<FocusAnimation>,
}

impl NodeMapState {
	pub fn new(decks: &[Deck], config: NodeMapConfig, width: f64, height: f64) -> Self {
		let config = config.sanitized();
		let graph = layout(decks, &config);
		// Start centred on the first deck so the row is visible.
		let anchor = graph
			.nodes()
			.first()
			.map(|n| n.position)
			.unwrap_or_default();
		Self {
			drag: DragController::new(config.max_delta),
			search: SearchNavigator::new(),
			transform: ViewTransform {
				x: width / 2.0 - anchor.x,
				y: height / 2.0 - anchor.y,
				k: 1.0,
			},
			pointer: PointerDrag::default(),
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
			focus: None,
			graph,
			config,
		}
	}

	/// Replaces the node set wholesale. Dragged positions and drags in
	/// progress are discarded.
	pub fn relayout(&mut self, decks: &[Deck]) {
		self.graph = layout(decks, &self.config);
		self.drag.reset();
		self.search.refresh(&self.graph);
		self.pointer = PointerDrag::default();
		info!(
			"Node map rebuilt: {} nodes, {} edges",
			self.graph.nodes().len(),
			self.graph.edges().len()
		);
	}

	pub fn apply_drag(&mut self, event: &DragEvent) -> DragOutcome {
		self.drag.handle(&mut self.graph, event)
	}

	pub fn run_search(&mut self, query: &str) -> SearchOutcome {
		// Split borrow: the navigator reads the graph while `self` acts as
		// the canvas for its focus request.
		let mut navigator = std::mem::take(&mut self.search);
		let graph = std::mem::take(&mut self.graph);
		let outcome = navigator.search(&graph, query, self);
		self.graph = graph;
		self.search = navigator;
		outcome
	}

	/// Flips a card between question and answer. Returns false for decks
	/// and unknown ids.
	pub fn toggle_card(&mut self, node_id: &str) -> bool {
		match self.graph.get_mut(node_id).map(|n| &mut n.kind) {
			Some(NodeKind::Card(card)) => {
				card.flipped = !card.flipped;
				true
			}
			Some(NodeKind::Deck { .. }) | None => false,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen point. Later nodes draw over earlier
	/// ones, so the last hit wins.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.graph
			.nodes()
			.iter()
			.rev()
			.find(|node| {
				let radius = match node.kind {
					NodeKind::Deck { .. } => DECK_RADIUS,
					NodeKind::Card(_) => CARD_RADIUS,
				};
				let (dx, dy) = (node.position.x - gx, node.position.y - gy);
				(dx * dx + dy * dy).sqrt() < radius
			})
			.map(|node| node.id.clone())
	}

	/// Presses on a node, or starts panning when the press hits empty space.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.focus = None;
		match self.node_at_position(sx, sy) {
			Some(id) => {
				let node_start = self.graph.position(&id).unwrap_or_default();
				self.pointer = PointerDrag {
					node_id: Some(id),
					start_x: sx,
					start_y: sy,
					node_start,
					moved: false,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Pointer moved to a screen point while pressed.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(id) = self.pointer.node_id.clone() {
			let (dx, dy) = (sx - self.pointer.start_x, sy - self.pointer.start_y);
			if !self.pointer.moved && dx.hypot(dy) < CLICK_SLOP {
				return;
			}
			self.pointer.moved = true;
			let proposed = self.pointer.node_start
				+ Position::new(dx / self.transform.k, dy / self.transform.k);
			self.apply_drag(&DragEvent {
				node_id: id,
				proposed,
				is_dragging: true,
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Button released. A press on a card that never moved flips it.
	pub fn release(&mut self) {
		if let Some(id) = self.pointer.node_id.take() {
			if self.pointer.moved {
				self.apply_drag(&DragEvent {
					node_id: id,
					proposed: self.pointer.node_start,
					is_dragging: false,
				});
			} else {
				self.toggle_card(&id);
			}
		}
		self.pointer = PointerDrag::default();
		self.pan.active = false;
	}

	/// Zooms about a screen point.
	pub fn zoom(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn is_focusing(&self) -> bool {
		self.focus.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		let Some(anim) = self.focus.as_mut() else {
			return;
		};
		anim.elapsed += dt;
		let t = if anim.duration > 0.0 {
			(anim.elapsed / anim.duration).min(1.0)
		} else {
			1.0
		};
		let e = ease_out_cubic(t);
		let centre = Position::new(
			anim.from.x + (anim.to.x - anim.from.x) * e,
			anim.from.y + (anim.to.y - anim.from.y) * e,
		);
		self.transform.x = self.width / 2.0 - centre.x * self.transform.k;
		self.transform.y = self.height / 2.0 - centre.y * self.transform.k;
		if t >= 1.0 {
			self.focus = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl GraphCanvas for NodeMapState {
	fn focus_viewport(&mut self, position: Position) {
		let (cx, cy) = self.screen_to_graph(self.width / 2.0, self.height / 2.0);
		debug!("Focusing viewport on ({:.1}, {:.1})", position.x, position.y);
		self.focus = Some(FocusAnimation {
			from: Position::new(cx, cy),
			to: position,
			elapsed: 0.0,
			duration: self.config.focus_duration,
		});
	}
}
