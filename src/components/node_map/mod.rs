//! Deck/card node map: layout, drag synchronisation and search, plus the
//! canvas and search panel that host them in the page.

mod component;
pub mod config;
pub mod drag;
pub mod layout;
mod render;
pub mod search;
mod search_panel;
pub mod state;
pub mod types;

pub use component::NodeMapCanvas;
pub use config::NodeMapConfig;
pub use drag::{DragController, DragEvent, DragOutcome, IgnoreReason};
pub use layout::layout;
pub use search::{Debouncer, GraphCanvas, SearchNavigator, SearchOutcome};
pub use search_panel::{SearchPanel, SearchRequest};
pub use state::NodeMapState;
pub use types::{Deck, Edge, Flashcard, GraphNode, NodeGraph, NodeKind, Position};
