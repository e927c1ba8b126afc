use leptos::prelude::*;
use log::error;

use crate::components::node_map::{Deck, NodeMapCanvas, NodeMapConfig, SearchPanel, SearchRequest};

/// Decks shown until the deck store pushes a real snapshot. Same shape as
/// the hosted `decks` table joined with its `flashcards`.
const SAMPLE_DECKS: &str = r#"[
	{
		"id": "deck-math",
		"name": "Math",
		"flashcards": [
			{ "id": "m1", "question": "What is 7 x 8?", "answer": "56", "order": 0 },
			{ "id": "m2", "question": "Derivative of x^2?", "answer": "2x", "order": 1 },
			{ "id": "m3", "question": "Value of pi to two places?", "answer": "3.14", "order": 2 }
		]
	},
	{
		"id": "deck-geo",
		"name": "Geography",
		"flashcards": [
			{ "id": "g1", "question": "What is the capital of France?", "answer": "Paris", "order": 0, "confidence": 0.9 },
			{ "id": "g2", "question": "Longest river in Africa?", "answer": "The Nile", "order": 1 },
			{ "id": "g3", "question": "Largest ocean?", "answer": "Pacific", "order": 2 },
			{ "id": "g4", "question": "What is the capital of Japan?", "answer": "Tokyo", "order": 3 }
		]
	},
	{ "id": "deck-history", "name": "History", "flashcards": [] }
]"#;

fn sample_decks() -> Vec<Deck> {
	serde_json::from_str(SAMPLE_DECKS).unwrap_or_else(|e| {
		error!("Sample decks failed to decode: {e}");
		Vec::new()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (decks, _set_decks) = signal(sample_decks());
	let (request, set_request) = signal(SearchRequest::default());
	let (results, set_results) = signal(0usize);
	let config = NodeMapConfig::default();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<NodeMapCanvas
					decks=decks
					search=request
					results=set_results
					fullscreen=true
					config=Some(config.clone())
				/>
				<div class="graph-overlay">
					<SearchPanel set_request=set_request results=results config=Some(config.clone()) />
					<p class="subtitle">
						"Click cards to flip. Drag decks to move them with their cards. Scroll to zoom."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
