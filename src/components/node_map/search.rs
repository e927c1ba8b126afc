use log::debug;

use super::types::{GraphNode, NodeGraph, NodeKind, Position};

/// Viewport control offered by whatever draws the graph.
pub trait GraphCanvas {
	/// Centres the viewport on `position`.
	fn focus_viewport(&mut self, position: Position);
}

/// Case-insensitive substring match. `needle` must already be lowercase.
fn node_matches(node: &GraphNode, needle: &str) -> bool {
	let hit = |text: &str| text.to_lowercase().contains(needle);
	match &node.kind {
		NodeKind::Deck { label } => hit(label),
		NodeKind::Card(card) => hit(&card.question) || hit(&card.answer),
	}
}

/// Ids of the nodes matching `query`, in node order. Blank queries match
/// nothing.
pub fn find_matches(graph: &NodeGraph, query: &str) -> Vec<String> {
	let needle = query.trim().to_lowercase();
	if needle.is_empty() {
		return Vec::new();
	}
	graph
		.nodes()
		.iter()
		.filter(|node| node_matches(node, &needle))
		.map(|node| node.id.clone())
		.collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
	/// Blank query.
	Idle,
	NoMatches,
	Focused {
		node_id: String,
		position: Position,
		/// Zero-based index of the focused match.
		index: usize,
		total: usize,
	},
}

/// Finds nodes by text and steps the viewport through them on repeated
/// searches of the same query.
#[derive(Clone, Debug, Default)]
pub struct SearchNavigator {
	query: String,
	cursor: usize,
	matches: Vec<String>,
	current: Option<String>,
}

impl SearchNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn match_count(&self) -> usize {
		self.matches.len()
	}

	/// Node focused by the last search, if any.
	pub fn current(&self) -> Option<&str> {
		self.current.as_deref()
	}

	pub fn clear(&mut self) {
		self.query.clear();
		self.cursor = 0;
		self.matches.clear();
		self.current = None;
	}

	/// Recounts matches for the current query against a rebuilt graph
	/// without moving the viewport.
	pub fn refresh(&mut self, graph: &NodeGraph) {
		self.matches = find_matches(graph, &self.query);
		if self.matches.is_empty() {
			self.cursor = 0;
		} else {
			self.cursor %= self.matches.len();
		}
		if self
			.current
			.as_deref()
			.is_some_and(|id| !self.matches.iter().any(|m| m == id))
		{
			self.current = None;
		}
	}

	/// Runs one search. A changed query restarts at the first match; an
	/// unchanged one advances to the next, wrapping around.
	pub fn search<C: GraphCanvas + ?Sized>(
		&mut self,
		graph: &NodeGraph,
		query: &str,
		canvas: &mut C,
	) -> SearchOutcome {
		let query = query.trim();
		if query.is_empty() {
			self.clear();
			return SearchOutcome::Idle;
		}
		if query != self.query {
			self.query = query.to_owned();
			self.cursor = 0;
		}

		self.matches = find_matches(graph, query);
		if self.matches.is_empty() {
			self.cursor = 0;
			self.current = None;
			debug!("No nodes match {:?}", query);
			return SearchOutcome::NoMatches;
		}

		let total = self.matches.len();
		let index = self.cursor % total;
		let node_id = self.matches[index].clone();
		let Some(position) = graph.position(&node_id) else {
			return SearchOutcome::NoMatches;
		};
		canvas.focus_viewport(position);
		self.cursor = index + 1;
		self.current = Some(node_id.clone());
		debug!("Focused match {}/{} for {:?}: {}", index + 1, total, query, node_id);

		SearchOutcome::Focused {
			node_id,
			position,
			index,
			total,
		}
	}
}

/// Keeps only the newest of a burst of values. Each `schedule` hands out a
/// ticket; when the host's timer for a ticket fires, `fire` yields the value
/// only if no newer value was scheduled since.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
	generation: u64,
	pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
	fn default() -> Self {
		Self {
			generation: 0,
			pending: None,
		}
	}
}

impl<T> Debouncer<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn schedule(&mut self, value: T) -> u64 {
		self.generation = self.generation.wrapping_add(1);
		self.pending = Some(value);
		self.generation
	}

	pub fn fire(&mut self, ticket: u64) -> Option<T> {
		if ticket == self.generation {
			self.pending.take()
		} else {
			None
		}
	}

	/// Drops the pending value so no outstanding ticket fires.
	pub fn cancel(&mut self) {
		self.generation = self.generation.wrapping_add(1);
		self.pending = None;
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}
