use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use web_sys::KeyboardEvent;

use super::config::NodeMapConfig;
use super::search::Debouncer;

/// A search invocation. `seq` changes on every invocation so repeating the
/// same query still reaches the navigator and cycles to the next match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchRequest {
	pub query: String,
	pub seq: u64,
}

/// Quiet period after the last keystroke before the query is searched.
fn debounce_delay(config: &NodeMapConfig) -> Duration {
	Duration::from_millis(config.search_debounce_ms)
}

fn submit(set_request: WriteSignal<SearchRequest>, query: String) {
	set_request.update(|r| {
		r.query = query;
		r.seq += 1;
	});
}

/// Debounced search box with a match counter. Enter searches immediately,
/// which steps to the next match when the text is unchanged.
#[component]
pub fn SearchPanel(
	set_request: WriteSignal<SearchRequest>,
	#[prop(into)] results: Signal<usize>,
	#[prop(default = None)] config: Option<NodeMapConfig>,
) -> impl IntoView {
	let delay = debounce_delay(&config.unwrap_or_default());
	let (text, set_text) = signal(String::new());
	let debouncer: Rc<RefCell<Debouncer<String>>> = Rc::new(RefCell::new(Debouncer::new()));

	let debouncer_input = debouncer.clone();
	let on_input = move |ev: web_sys::Event| {
		let value = event_target_value(&ev);
		set_text.set(value.clone());
		let ticket = debouncer_input.borrow_mut().schedule(value);
		let pending = debouncer_input.clone();
		set_timeout(
			move || {
				let ready = pending.borrow_mut().fire(ticket);
				if let Some(query) = ready {
					submit(set_request, query);
				}
			},
			delay,
		);
	};

	let debouncer_key = debouncer.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			debouncer_key.borrow_mut().cancel();
			submit(set_request, text.get_untracked());
		}
	};

	let label = move || {
		if text.with(|t| t.trim().is_empty()) {
			return String::new();
		}
		match results.get() {
			1 => "1 match".to_owned(),
			n => format!("{n} matches"),
		}
	};

	view! {
		<div class="node-map-search">
			<input
				type="text"
				placeholder="Search cards or decks..."
				prop:value=move || text.get()
				on:input=on_input
				on:keydown=on_keydown
			/>
			<span class="node-map-search-count">{label}</span>
		</div>
	}
}
