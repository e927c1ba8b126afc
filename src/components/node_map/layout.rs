use std::collections::HashSet;
use std::f64::consts::PI;

use log::{debug, warn};

use super::config::NodeMapConfig;
use super::types::{CardPayload, Deck, Edge, GraphNode, NodeGraph, NodeKind, Position};

/// Node id of a card. Prefixed so card ids never collide with deck ids.
pub fn card_node_id(card_id: &str) -> String {
	format!("flashcard-{card_id}")
}

fn edge_id(deck_id: &str, card_node_id: &str) -> String {
	format!("edge-{deck_id}-{card_node_id}")
}

/// Places decks along one row and each deck's cards evenly on a ring around
/// it. Pure: the same decks and config always give the same graph.
pub fn layout(decks: &[Deck], config: &NodeMapConfig) -> NodeGraph {
	let card_total: usize = decks.iter().map(|d| d.cards.len()).sum();
	let mut nodes = Vec::with_capacity(decks.len() + card_total);
	let mut edges = Vec::with_capacity(card_total);
	let mut seen: HashSet<String> = HashSet::with_capacity(decks.len() + card_total);

	for (deck_index, deck) in decks.iter().enumerate() {
		if !seen.insert(deck.id.clone()) {
			warn!("Skipping deck with duplicate id {}", deck.id);
			continue;
		}
		let center = Position::new(deck_index as f64 * config.deck_spacing, config.deck_y);
		nodes.push(GraphNode {
			id: deck.id.clone(),
			kind: NodeKind::Deck {
				label: deck.name.clone(),
			},
			position: center,
		});

		// Ring order follows the cards' stored order; ties keep input order.
		let mut cards: Vec<_> = deck.cards.iter().collect();
		cards.sort_by_key(|card| card.order);
		let n = cards.len();
		for (card_index, card) in cards.into_iter().enumerate() {
			let node_id = card_node_id(&card.id);
			if !seen.insert(node_id.clone()) {
				warn!("Skipping card with duplicate id {} in deck {}", card.id, deck.id);
				continue;
			}
			let angle = 2.0 * PI * card_index as f64 / n as f64;
			nodes.push(GraphNode {
				id: node_id.clone(),
				kind: NodeKind::Card(CardPayload {
					question: card.question.clone(),
					answer: card.answer.clone(),
					confidence: card.confidence,
					last_reviewed: card.last_reviewed.clone(),
					flipped: false,
				}),
				position: Position::new(
					center.x + config.radius * angle.cos(),
					center.y + config.radius * angle.sin(),
				),
			});
			edges.push(Edge {
				id: edge_id(&deck.id, &node_id),
				source: deck.id.clone(),
				target: node_id,
			});
		}
	}

	debug!("Laid out {} nodes and {} edges from {} decks", nodes.len(), edges.len(), decks.len());
	NodeGraph::new(nodes, edges)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::node_map::types::Flashcard;

	fn card(id: &str) -> Flashcard {
		Flashcard {
			id: id.into(),
			question: format!("q{id}"),
			answer: format!("a{id}"),
			order: 0,
			confidence: None,
			last_reviewed: None,
		}
	}

	fn deck(id: &str, cards: &[&str]) -> Deck {
		Deck {
			id: id.into(),
			name: id.to_uppercase(),
			cards: cards.iter().map(|c| card(c)).collect(),
		}
	}

	fn close(a: Position, b: Position) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn decks_sit_on_one_row() {
		let config = NodeMapConfig::default();
		let graph = layout(&[deck("a", &[]), deck("b", &[]), deck("c", &[])], &config);
		for (i, id) in ["a", "b", "c"].iter().enumerate() {
			assert_eq!(
				graph.position(id),
				Some(Position::new(i as f64 * config.deck_spacing, config.deck_y))
			);
		}
	}

	#[test]
	fn cards_ring_their_deck() {
		let config = NodeMapConfig::default();
		let graph = layout(&[deck("x", &[]), deck("d", &["1", "2", "3", "4"])], &config);
		let center = graph.position("d").unwrap();
		let r = config.radius;
		assert!(close(graph.position("flashcard-1").unwrap(), center + Position::new(r, 0.0)));
		assert!(close(graph.position("flashcard-2").unwrap(), center + Position::new(0.0, r)));
		assert!(close(graph.position("flashcard-3").unwrap(), center + Position::new(-r, 0.0)));
		assert!(close(graph.position("flashcard-4").unwrap(), center + Position::new(0.0, -r)));
	}

	#[test]
	fn ring_follows_card_order() {
		let config = NodeMapConfig::default();
		let mut d = deck("d", &["x", "y", "z"]);
		for (card, order) in d.cards.iter_mut().zip([2, 0, 1]) {
			card.order = order;
		}
		let graph = layout(&[d], &config);
		let center = graph.position("d").unwrap();
		assert!(close(
			graph.position("flashcard-y").unwrap(),
			center + Position::new(config.radius, 0.0)
		));
		let ids: Vec<_> = graph.children_of("d").collect();
		assert_eq!(ids, ["flashcard-y", "flashcard-z", "flashcard-x"]);
	}

	#[test]
	fn one_edge_per_card() {
		let graph = layout(&[deck("d", &["1", "2"])], &NodeMapConfig::default());
		let edges = graph.edges();
		assert_eq!(edges.len(), 2);
		assert_eq!(edges[0].id, "edge-d-flashcard-1");
		assert!(edges.iter().all(|e| e.source == "d"));
	}

	#[test]
	fn node_order_is_deck_then_its_cards() {
		let graph = layout(&[deck("a", &["1"]), deck("b", &["2"])], &NodeMapConfig::default());
		let ids: Vec<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "flashcard-1", "b", "flashcard-2"]);
	}

	#[test]
	fn empty_input_gives_empty_graph() {
		let graph = layout(&[], &NodeMapConfig::default());
		assert!(graph.is_empty());
		assert!(graph.edges().is_empty());
	}

	#[test]
	fn duplicate_ids_keep_first_and_slot() {
		let config = NodeMapConfig::default();
		let graph = layout(
			&[deck("a", &["1", "1"]), deck("a", &["2"]), deck("c", &[])],
			&config,
		);
		assert_eq!(graph.nodes().len(), 3);
		assert_eq!(graph.edges().len(), 1);
		assert!(graph.get("flashcard-2").is_none());
		assert_eq!(graph.position("c").unwrap().x, 2.0 * config.deck_spacing);
	}
}
