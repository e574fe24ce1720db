//! Spec payload types pushed by the host page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, referenced by edges.
	pub id: Value,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Optional CSS color override.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Cluster used to pick a palette color.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<Value>,
	/// Library-specific keys, passed through untouched.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Source node id.
	#[serde(alias = "source")]
	pub from: Value,
	/// Target node id.
	#[serde(alias = "target")]
	pub to: Value,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Library-specific keys, passed through untouched.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Graph contents handed to the rendering surface.
///
/// The default value is the empty dataset used when a spec carries no data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes, in the order given.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges; `links` is accepted as well.
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// No nodes and no edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

/// Rendering options. Only `autostart` is read by the adapter, the rest is
/// forwarded to the surface as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
	/// Start without waiting for the control. Never forwarded.
	#[serde(default, skip_serializing)]
	pub autostart: bool,
	/// Everything else.
	#[serde(flatten)]
	pub settings: Map<String, Value>,
}

/// Declarative graph definition: data plus options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
	/// Graph contents; absent means empty.
	#[serde(default)]
	pub data: Option<GraphData>,
	/// Rendering options.
	#[serde(default)]
	pub options: RenderOptions,
}

impl Spec {
	/// Fills in the empty dataset when `data` is absent.
	pub fn with_default_data(mut self) -> Self {
		if self.data.is_none() {
			self.data = Some(GraphData::default());
		}
		self
	}

	/// The dataset to render. Never absent.
	pub fn data(&self) -> &GraphData {
		static EMPTY: GraphData = GraphData {
			nodes: Vec::new(),
			edges: Vec::new(),
		};
		self.data.as_ref().unwrap_or(&EMPTY)
	}
}

/// Payload of the `init` event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InitPayload {
	/// The graph to render.
	pub spec: Spec,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn missing_data_is_none_until_defaulted() {
		let payload: InitPayload =
			serde_json::from_value(json!({ "spec": { "options": {} } })).unwrap();
		assert!(payload.spec.data.is_none());
		assert!(payload.spec.data().is_empty());

		let spec = payload.spec.with_default_data();
		assert_eq!(spec.data, Some(GraphData::default()));
	}

	#[test]
	fn autostart_defaults_to_false() {
		let spec: Spec = serde_json::from_value(json!({ "options": { "physics": false } })).unwrap();
		assert!(!spec.options.autostart);
		assert_eq!(spec.options.settings.get("physics"), Some(&json!(false)));

		let spec: Spec = serde_json::from_value(json!({})).unwrap();
		assert!(!spec.options.autostart);
	}

	#[test]
	fn autostart_is_not_forwarded() {
		let options: RenderOptions =
			serde_json::from_value(json!({ "autostart": true, "height": "400px" })).unwrap();
		assert!(options.autostart);
		assert_eq!(
			serde_json::to_value(&options).unwrap(),
			json!({ "height": "400px" })
		);
	}

	#[test]
	fn edges_accept_source_target_and_keep_extra_keys() {
		let data: GraphData = serde_json::from_value(json!({
			"nodes": [
				{ "id": 1, "label": "a", "shape": "box" },
				{ "id": "two" }
			],
			"links": [
				{ "source": 1, "target": "two", "arrows": "to" }
			]
		}))
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].extra.get("shape"), Some(&json!("box")));
		assert_eq!(data.edges[0].from, json!(1));
		assert_eq!(data.edges[0].to, json!("two"));
		assert_eq!(data.edges[0].extra.get("arrows"), Some(&json!("to")));

		let out = serde_json::to_value(&data.edges[0]).unwrap();
		assert_eq!(out, json!({ "from": 1, "to": "two", "arrows": "to" }));
	}
}
