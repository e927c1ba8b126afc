use std::collections::HashMap;

use log::{debug, trace, warn};

use super::config::MAX_DELTA;
use super::types::{NodeGraph, NodeKind, Position};

/// One pointer-move (or release) reported by the canvas for a node.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent {
	pub node_id: String,
	pub proposed: Position,
	pub is_dragging: bool,
}

/// Per-node bookkeeping that exists only while that node is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
	/// Anchor for the next delta. Advanced only by clamped deltas, never
	/// snapped to the raw pointer position.
	pub last_validated: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
	/// The node is gone, usually after a relayout.
	UnknownNode,
	/// A release for a node that was not being dragged.
	NotDragging,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
	/// The node moved by `applied`; `cascaded` cards moved with it.
	Moved { applied: Position, cascaded: usize },
	Released,
	Ignored(IgnoreReason),
}

/// Clamps one axis of a delta. Non-finite input counts as no movement.
fn clamp_axis(delta: f64, max: f64) -> f64 {
	if delta.is_finite() { delta.clamp(-max, max) } else { 0.0 }
}

pub fn clamp_delta(delta: Position, max_delta: f64) -> Position {
	Position::new(clamp_axis(delta.x, max_delta), clamp_axis(delta.y, max_delta))
}

/// Applies drag events to a [`NodeGraph`], keeping cards glued to a deck
/// being dragged.
#[derive(Clone, Debug)]
pub struct DragController {
	max_delta: f64,
	states: HashMap<String, DragState>,
}

impl DragController {
	/// A bound that is not a positive number falls back to [`MAX_DELTA`].
	pub fn new(max_delta: f64) -> Self {
		let max_delta = if max_delta.is_finite() && max_delta > 0.0 {
			max_delta
		} else {
			warn!("Invalid max drag delta {max_delta}, using {MAX_DELTA}");
			MAX_DELTA
		};
		Self {
			max_delta,
			states: HashMap::new(),
		}
	}

	pub fn max_delta(&self) -> f64 {
		self.max_delta
	}

	pub fn is_dragging(&self, node_id: &str) -> bool {
		self.states.contains_key(node_id)
	}

	pub fn state(&self, node_id: &str) -> Option<&DragState> {
		self.states.get(node_id)
	}

	pub fn active_count(&self) -> usize {
		self.states.len()
	}

	/// Drops every drag in progress. Called when the graph is rebuilt.
	pub fn reset(&mut self) {
		if !self.states.is_empty() {
			debug!("Cancelling {} drag(s) on relayout", self.states.len());
		}
		self.states.clear();
	}

	pub fn handle(&mut self, graph: &mut NodeGraph, event: &DragEvent) -> DragOutcome {
		if !event.is_dragging {
			return match self.states.remove(&event.node_id) {
				Some(_) => DragOutcome::Released,
				None => DragOutcome::Ignored(IgnoreReason::NotDragging),
			};
		}

		let Some(node) = graph.get_mut(&event.node_id) else {
			trace!("Ignoring drag for unknown node {}", event.node_id);
			self.states.remove(&event.node_id);
			return DragOutcome::Ignored(IgnoreReason::UnknownNode);
		};

		let state = self
			.states
			.entry(event.node_id.clone())
			.or_insert(DragState {
				last_validated: node.position,
			});
		let applied = clamp_delta(event.proposed - state.last_validated, self.max_delta);
		state.last_validated += applied;
		node.position = state.last_validated;

		let cascades = match node.kind {
			NodeKind::Deck { .. } => true,
			NodeKind::Card(_) => false,
		};
		let cascaded = if cascades {
			self.cascade(graph, &event.node_id, applied)
		} else {
			0
		};
		DragOutcome::Moved { applied, cascaded }
	}

	fn cascade(&mut self, graph: &mut NodeGraph, deck_id: &str, delta: Position) -> usize {
		// A card held by another pointer must keep its anchor equal to its
		// stored position, or its next event would snap it back unclamped.
		for card_id in graph.children_of(deck_id) {
			if let Some(state) = self.states.get_mut(card_id) {
				state.last_validated += delta;
			}
		}
		graph.shift_children(deck_id, delta)
	}
}
