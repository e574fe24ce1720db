//! Canvas settings read from the spec's rendering options.
//!
//! The options object may be shared with `vis-network`, so its shapes are
//! accepted too: `physics: false` freezes the layout and `"400px"` sizes are
//! read as pixels. Keys the canvas does not know are ignored.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::super::error::HookError;

/// Force simulation parameters, passed to `force_graph`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsOptions {
	/// When false nodes stay at their initial positions.
	pub enabled: bool,
	/// Repulsion between nodes.
	pub charge: f32,
	/// Edge spring strength.
	pub spring: f32,
	/// Upper bound on the force applied to one node per step.
	pub max_force: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity retained per step, in `0..=1`.
	pub damping: f32,
}

impl Default for PhysicsOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
		}
	}
}

/// Canvas appearance and size.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptions {
	/// Fixed width in pixels; otherwise the container's width.
	#[serde(deserialize_with = "pixels")]
	pub width: Option<f64>,
	/// Fixed height in pixels; otherwise the container's height.
	#[serde(deserialize_with = "pixels")]
	pub height: Option<f64>,
	/// CSS color filling the canvas.
	pub background: String,
	/// CSS color for edges and arrowheads.
	pub edge_color: String,
	/// CSS color for node labels.
	pub label_color: String,
	/// Node radius in pixels.
	pub node_radius: f64,
	/// Layout simulation, or a plain bool toggling it.
	#[serde(deserialize_with = "physics")]
	pub physics: PhysicsOptions,
}

impl Default for CanvasOptions {
	fn default() -> Self {
		Self {
			width: None,
			height: None,
			background: "#1a1a2e".into(),
			edge_color: "rgba(100, 180, 255, 0.6)".into(),
			label_color: "rgba(255, 255, 255, 0.8)".into(),
			node_radius: 5.0,
			physics: PhysicsOptions::default(),
		}
	}
}

/// A number, or a CSS length. Anything but plain pixels (`"100%"`) means
/// "use the container".
fn pixels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Size {
		Pixels(f64),
		Css(String),
	}

	Ok(match Option::<Size>::deserialize(deserializer)? {
		Some(Size::Pixels(px)) => Some(px),
		Some(Size::Css(css)) => {
			let css = css.trim();
			css.strip_suffix("px").unwrap_or(css).trim().parse().ok()
		}
		None => None,
	})
}

fn physics<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PhysicsOptions, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Physics {
		Flag(bool),
		Options(PhysicsOptions),
	}

	Ok(match Physics::deserialize(deserializer)? {
		Physics::Flag(enabled) => PhysicsOptions {
			enabled,
			..PhysicsOptions::default()
		},
		Physics::Options(options) => options,
	})
}

impl CanvasOptions {
	/// Reads the canvas settings out of a spec's options object.
	pub fn from_settings(settings: &Map<String, Value>) -> Result<Self, HookError> {
		serde_json::from_value(Value::Object(settings.clone()))
			.map_err(|e| HookError::Render(format!("invalid canvas options: {e}")))
	}
}
