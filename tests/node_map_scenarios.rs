//! End-to-end node map scenarios: layout, deck drag with card cascade, and
//! search cycling against a recording canvas.

use flashcard_node_map::components::node_map::{
	Deck, DragController, DragEvent, DragOutcome, Flashcard, GraphCanvas, NodeMapConfig,
	Position, SearchNavigator, SearchOutcome, layout,
};

#[derive(Default)]
struct RecordingCanvas {
	focused: Vec<Position>,
}

impl GraphCanvas for RecordingCanvas {
	fn focus_viewport(&mut self, position: Position) {
		self.focused.push(position);
	}
}

fn card(id: &str, question: &str, answer: &str) -> Flashcard {
	Flashcard {
		id: id.into(),
		question: question.into(),
		answer: answer.into(),
		order: 0,
		confidence: None,
		last_reviewed: None,
	}
}

fn math_and_history() -> Vec<Deck> {
	vec![
		Deck {
			id: "math".into(),
			name: "Math".into(),
			cards: vec![
				card("m1", "7 x 8", "56"),
				card("m2", "9 x 9", "81"),
				card("m3", "12 / 4", "3"),
			],
		},
		Deck {
			id: "history".into(),
			name: "History".into(),
			cards: vec![],
		},
	]
}

fn drag(id: &str, proposed: Position) -> DragEvent {
	DragEvent {
		node_id: id.into(),
		proposed,
		is_dragging: true,
	}
}

fn math_cards() -> [&'static str; 3] {
	["flashcard-m1", "flashcard-m2", "flashcard-m3"]
}

#[test]
fn layout_of_two_decks() {
	let graph = layout(&math_and_history(), &NodeMapConfig::default());
	let decks = graph.nodes().iter().filter(|n| n.is_deck()).count();
	assert_eq!(decks, 2);
	assert_eq!(graph.nodes().len() - decks, 3);
	assert_eq!(graph.edges().len(), 3);
	assert!(graph.edges().iter().all(|e| e.source == "math"));
	assert_eq!(graph.children_of("history").count(), 0);
}

#[test]
fn oversized_drag_is_clamped_for_deck_and_cards() {
	let config = NodeMapConfig::default();
	assert_eq!(config.max_delta, 50.0);
	let mut graph = layout(&math_and_history(), &config);
	let mut controller = DragController::new(config.max_delta);

	let deck = graph.position("math").unwrap();
	let cards: Vec<_> = math_cards().iter().map(|id| graph.position(id).unwrap()).collect();

	let outcome = controller.handle(&mut graph, &drag("math", deck + Position::new(1000.0, 0.0)));
	assert_eq!(
		outcome,
		DragOutcome::Moved {
			applied: Position::new(50.0, 0.0),
			cascaded: 3
		}
	);
	assert_eq!(graph.position("math"), Some(deck + Position::new(50.0, 0.0)));
	for (id, before) in math_cards().iter().zip(cards) {
		assert_eq!(graph.position(id), Some(before + Position::new(50.0, 0.0)));
	}
}

#[test]
fn consecutive_drags_accumulate_on_cards() {
	let mut graph = layout(&math_and_history(), &NodeMapConfig::default());
	let mut controller = DragController::new(50.0);
	let deck = graph.position("math").unwrap();
	let cards: Vec<_> = math_cards().iter().map(|id| graph.position(id).unwrap()).collect();

	controller.handle(&mut graph, &drag("math", deck + Position::new(10.0, 10.0)));
	controller.handle(&mut graph, &drag("math", deck + Position::new(20.0, 20.0)));

	for (id, before) in math_cards().iter().zip(cards) {
		assert_eq!(graph.position(id), Some(before + Position::new(20.0, 20.0)));
	}
}

#[test]
fn single_match_wraps_onto_itself() {
	let mut decks = math_and_history();
	decks[1].cards.push(card("h1", "What was the capital of Rome's empire?", "Rome"));
	let graph = layout(&decks, &NodeMapConfig::default());
	let mut navigator = SearchNavigator::new();
	let mut canvas = RecordingCanvas::default();

	let first = navigator.search(&graph, "capital", &mut canvas);
	let second = navigator.search(&graph, "capital", &mut canvas);
	let target = graph.position("flashcard-h1").unwrap();
	for outcome in [first, second] {
		assert_eq!(
			outcome,
			SearchOutcome::Focused {
				node_id: "flashcard-h1".into(),
				position: target,
				index: 0,
				total: 1,
			}
		);
	}
	assert_eq!(canvas.focused, [target, target]);
}

#[test]
fn empty_search_after_query_issues_no_focus() {
	let mut decks = math_and_history();
	decks[1].cards.push(card("h1", "Capital of Egypt?", "Cairo"));
	let graph = layout(&decks, &NodeMapConfig::default());
	let mut navigator = SearchNavigator::new();
	let mut canvas = RecordingCanvas::default();

	navigator.search(&graph, "capital", &mut canvas);
	assert_eq!(canvas.focused.len(), 1);

	assert_eq!(navigator.search(&graph, "", &mut canvas), SearchOutcome::Idle);
	assert_eq!(canvas.focused.len(), 1);
	assert_eq!(navigator.cursor(), 0);
}

#[test]
fn search_never_moves_nodes() {
	let graph = layout(&math_and_history(), &NodeMapConfig::default());
	let before = graph.nodes().to_vec();
	let mut navigator = SearchNavigator::new();
	let mut canvas = RecordingCanvas::default();
	for query in ["x", "x", "math", "", "56"] {
		navigator.search(&graph, query, &mut canvas);
	}
	assert_eq!(graph.nodes(), before.as_slice());
}
