use std::collections::HashMap;
use std::ops::{Add, AddAssign, Sub};

use serde::Deserialize;

/// A flashcard as delivered by the deck store.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
	pub id: String,
	pub question: String,
	pub answer: String,
	#[serde(default)]
	pub order: i64,
	#[serde(default)]
	pub confidence: Option<f32>,
	#[serde(default)]
	pub last_reviewed: Option<String>,
}

/// A deck with its ordered cards. The hosted table nests cards under
/// `flashcards`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Deck {
	pub id: String,
	pub name: String,
	#[serde(default, alias = "flashcards")]
	pub cards: Vec<Flashcard>,
}

/// A point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Position {
	type Output = Position;

	fn add(self, rhs: Position) -> Position {
		Position::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Position {
	type Output = Position;

	fn sub(self, rhs: Position) -> Position {
		Position::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl AddAssign for Position {
	fn add_assign(&mut self, rhs: Position) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardPayload {
	pub question: String,
	pub answer: String,
	pub confidence: Option<f32>,
	pub last_reviewed: Option<String>,
	/// Showing the answer side.
	pub flipped: bool,
}

impl CardPayload {
	/// Text currently facing the user.
	pub fn face(&self) -> &str {
		if self.flipped { &self.answer } else { &self.question }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	Deck { label: String },
	Card(CardPayload),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub kind: NodeKind,
	pub position: Position,
}

impl GraphNode {
	pub fn is_deck(&self) -> bool {
		matches!(self.kind, NodeKind::Deck { .. })
	}
}

/// Ownership connector, always deck to card.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
}

/// The node and edge set of one layout pass, plus the lookups the drag
/// controller needs. Rebuilt wholesale on every relayout; only positions
/// change in between.
#[derive(Clone, Debug, Default)]
pub struct NodeGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
	children: HashMap<String, Vec<usize>>,
}

impl NodeGraph {
	/// Builds the id index and the `source -> [target]` cascade index. Edges
	/// whose endpoints are missing are dropped.
	pub fn new(nodes: Vec<GraphNode>, edges: Vec<Edge>) -> Self {
		let index: HashMap<String, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.clone(), i))
			.collect();

		let edges: Vec<Edge> = edges
			.into_iter()
			.filter(|e| index.contains_key(&e.source) && index.contains_key(&e.target))
			.collect();

		let mut children: HashMap<String, Vec<usize>> = HashMap::new();
		for edge in &edges {
			children
				.entry(edge.source.clone())
				.or_default()
				.push(index[&edge.target]);
		}

		Self {
			nodes,
			edges,
			index,
			children,
		}
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: &str) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn get_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
		self.index.get(id).map(|&i| &mut self.nodes[i])
	}

	pub fn position(&self, id: &str) -> Option<Position> {
		self.get(id).map(|n| n.position)
	}

	/// Ids of the cards owned by `deck_id`, in layout order.
	pub fn children_of(&self, deck_id: &str) -> impl Iterator<Item = &str> {
		self.children
			.get(deck_id)
			.into_iter()
			.flatten()
			.map(|&i| self.nodes[i].id.as_str())
	}

	/// Moves every card owned by `deck_id` by `delta`. Returns how many moved.
	pub(crate) fn shift_children(&mut self, deck_id: &str, delta: Position) -> usize {
		let Some(targets) = self.children.get(deck_id) else {
			return 0;
		};
		for &i in targets {
			self.nodes[i].position += delta;
		}
		targets.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn deck(id: &str, x: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			kind: NodeKind::Deck { label: id.into() },
			position: Position::new(x, 0.0),
		}
	}

	fn card(id: &str, x: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			kind: NodeKind::Card(CardPayload::default()),
			position: Position::new(x, 10.0),
		}
	}

	fn edge(source: &str, target: &str) -> Edge {
		Edge {
			id: format!("edge-{source}-{target}"),
			source: source.into(),
			target: target.into(),
		}
	}

	#[test]
	fn cascade_index_follows_edges() {
		let graph = NodeGraph::new(
			vec![deck("a", 0.0), card("c1", 1.0), card("c2", 2.0), deck("b", 5.0)],
			vec![edge("a", "c1"), edge("a", "c2")],
		);
		assert_eq!(graph.children_of("a").collect::<Vec<_>>(), ["c1", "c2"]);
		assert_eq!(graph.children_of("b").count(), 0);
		assert_eq!(graph.children_of("missing").count(), 0);
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let graph = NodeGraph::new(vec![deck("a", 0.0)], vec![edge("a", "gone")]);
		assert!(graph.edges().is_empty());
		assert_eq!(graph.children_of("a").count(), 0);
	}

	#[test]
	fn shift_children_moves_only_owned_cards() {
		let mut graph = NodeGraph::new(
			vec![deck("a", 0.0), card("c1", 1.0), card("c2", 2.0)],
			vec![edge("a", "c1")],
		);
		assert_eq!(graph.shift_children("a", Position::new(3.0, 4.0)), 1);
		assert_eq!(graph.position("c1"), Some(Position::new(4.0, 14.0)));
		assert_eq!(graph.position("c2"), Some(Position::new(2.0, 10.0)));
		assert_eq!(graph.position("a"), Some(Position::new(0.0, 0.0)));
	}

	#[test]
	fn deck_snapshot_accepts_table_shape() {
		let json = r#"{
			"id": "d1",
			"name": "Math",
			"description": "ignored",
			"flashcards": [
				{ "id": "f1", "question": "2+2", "answer": "4", "order": 0, "lastReviewed": "2024-01-01" }
			]
		}"#;
		let deck: Deck = serde_json::from_str(json).unwrap();
		assert_eq!(deck.cards.len(), 1);
		assert_eq!(deck.cards[0].last_reviewed.as_deref(), Some("2024-01-01"));
		assert_eq!(deck.cards[0].confidence, None);

		let bare: Deck = serde_json::from_str(r#"{ "id": "d2", "name": "Empty" }"#).unwrap();
		assert!(bare.cards.is_empty());
	}

	#[test]
	fn card_face_follows_flip() {
		let mut payload = CardPayload {
			question: "q".into(),
			answer: "a".into(),
			..Default::default()
		};
		assert_eq!(payload.face(), "q");
		payload.flipped = true;
		assert_eq!(payload.face(), "a");
	}
}
