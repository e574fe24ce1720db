use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use serde_json::Value;

use super::super::types::{GraphData, GraphNode};
use super::options::CanvasOptions;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
}

/// Simulation plus everything the renderer needs for one canvas.
pub struct CanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub options: CanvasOptions,
	pub width: f64,
	pub height: f64,
	edge_count: usize,
}

/// Ids compare by their JSON text so `1` and `"1"` stay distinct.
fn node_key(id: &Value) -> String {
	id.to_string()
}

fn node_color(node: &GraphNode) -> String {
	if let Some(color) = &node.color {
		return color.clone();
	}
	let slot = match &node.group {
		Some(Value::Number(n)) => n.as_u64().unwrap_or(0) as usize,
		Some(Value::String(s)) => s.bytes().fold(0usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize)),
		_ => 0,
	};
	COLORS[slot % COLORS.len()].into()
}

impl CanvasState {
	pub fn new(data: &GraphData, width: f64, height: f64, options: CanvasOptions) -> Self {
		let physics = &options.physics;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: physics.charge,
			force_spring: physics.spring,
			force_max: physics.max_force,
			node_speed: physics.node_speed,
			damping_factor: physics.damping,
		});
		let mut id_to_idx: HashMap<String, DefaultNodeIdx> = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: node_color(node),
				},
			});
			id_to_idx.insert(node_key(&node.id), idx);
		}

		let mut edge_count = 0;
		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(&node_key(&edge.from)),
				id_to_idx.get(&node_key(&edge.to)),
			) {
				graph.add_edge(src, tgt, EdgeData::default());
				edge_count += 1;
			}
		}

		Self {
			graph,
			options,
			width,
			height,
			edge_count,
		}
	}

	pub fn node_count(&self) -> usize {
		let mut n = 0;
		self.graph.visit_nodes(|_| n += 1);
		n
	}

	/// Edges whose endpoints both exist.
	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	pub fn tick(&mut self, dt: f32) {
		if self.options.physics.enabled {
			self.graph.update(dt);
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn data(value: Value) -> GraphData {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn builds_nodes_and_skips_dangling_edges() {
		let state = CanvasState::new(
			&data(json!({
				"nodes": [{ "id": 1 }, { "id": 2 }, { "id": "1" }],
				"edges": [
					{ "from": 1, "to": 2 },
					{ "from": 2, "to": "1" },
					{ "from": 1, "to": 99 }
				]
			})),
			800.0,
			600.0,
			CanvasOptions::default(),
		);
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edge_count(), 2);
	}

	#[test]
	fn empty_dataset() {
		let state = CanvasState::new(&GraphData::default(), 10.0, 10.0, CanvasOptions::default());
		assert_eq!(state.node_count(), 0);
		assert_eq!(state.edge_count(), 0);
	}

	#[test]
	fn colors_prefer_override_then_group() {
		let nodes = data(json!({
			"nodes": [
				{ "id": "a", "color": "red", "group": 3 },
				{ "id": "b", "group": 3 },
				{ "id": "c", "group": 13 },
				{ "id": "d" }
			]
		}))
		.nodes;
		assert_eq!(node_color(&nodes[0]), "red");
		assert_eq!(node_color(&nodes[1]), COLORS[3]);
		assert_eq!(node_color(&nodes[2]), COLORS[3]);
		assert_eq!(node_color(&nodes[3]), COLORS[0]);
	}

	#[test]
	fn frozen_physics_keeps_positions() {
		let mut options = CanvasOptions::default();
		options.physics.enabled = false;
		let mut state = CanvasState::new(
			&data(json!({ "nodes": [{ "id": 1 }, { "id": 2 }] })),
			100.0,
			100.0,
			options,
		);
		let before: Vec<(f32, f32)> = {
			let mut v = Vec::new();
			state.graph.visit_nodes(|n| v.push((n.x(), n.y())));
			v
		};
		state.tick(0.016);
		let mut after = Vec::new();
		state.graph.visit_nodes(|n| after.push((n.x(), n.y())));
		assert_eq!(before, after);
	}
}
