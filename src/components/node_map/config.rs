use log::warn;

pub const DECK_SPACING: f64 = 800.0;
pub const RADIUS: f64 = 250.0;
pub const DECK_Y: f64 = 300.0;
pub const MAX_DELTA: f64 = 50.0;
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
pub const FOCUS_DURATION: f64 = 0.6;

/// Gap kept between neighbouring card rings when spacing has to be widened.
const RING_GAP: f64 = 50.0;

/// Tunables for layout, drag clamping and search.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMapConfig {
	/// Horizontal distance between deck centres.
	pub deck_spacing: f64,
	/// Radius of each deck's card ring.
	pub radius: f64,
	/// Row on which decks sit.
	pub deck_y: f64,
	/// Largest movement accepted per axis from a single drag event.
	pub max_delta: f64,
	pub search_debounce_ms: u64,
	/// Seconds a viewport focus animation takes.
	pub focus_duration: f64,
}

impl Default for NodeMapConfig {
	fn default() -> Self {
		Self {
			deck_spacing: DECK_SPACING,
			radius: RADIUS,
			deck_y: DECK_Y,
			max_delta: MAX_DELTA,
			search_debounce_ms: SEARCH_DEBOUNCE_MS,
			focus_duration: FOCUS_DURATION,
		}
	}
}

impl NodeMapConfig {
	/// Corrects values that would break layout or drag invariants: rings
	/// must not overlap and the clamp bound must be a positive number.
	pub fn sanitized(mut self) -> Self {
		if !self.radius.is_finite() || self.radius < 0.0 {
			warn!("Invalid card ring radius {}, using {}", self.radius, RADIUS);
			self.radius = RADIUS;
		}
		if !self.deck_spacing.is_finite() || self.deck_spacing <= 2.0 * self.radius {
			let widened = 2.0 * self.radius + RING_GAP;
			warn!(
				"Deck spacing {} lets card rings overlap, widening to {}",
				self.deck_spacing, widened
			);
			self.deck_spacing = widened;
		}
		if !self.deck_y.is_finite() {
			self.deck_y = DECK_Y;
		}
		if !self.max_delta.is_finite() || self.max_delta <= 0.0 {
			warn!("Invalid max drag delta {}, using {}", self.max_delta, MAX_DELTA);
			self.max_delta = MAX_DELTA;
		}
		if !self.focus_duration.is_finite() || self.focus_duration < 0.0 {
			self.focus_duration = FOCUS_DURATION;
		}
		self
	}
}
