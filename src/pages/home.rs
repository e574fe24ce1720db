use leptos::prelude::*;
use log::error;
use serde_json::{Map, Value, json};

use crate::components::graph_widget::{
	EventBus, GraphData, GraphEdge, GraphNode, GraphWidget, HookConfig, InitPayload, Mode,
	RenderOptions, Spec,
};

/// Generate sample graph data (random tree).
fn generate_sample_data(n: usize) -> GraphData {
	let nodes = (0..n)
		.map(|i| GraphNode {
			id: json!(i),
			label: (i < 10).then(|| format!("Node {}", i)),
			color: None,
			group: Some(json!(i % 10)),
			extra: Map::new(),
		})
		.collect();

	let edges = (1..n)
		.map(|i| GraphEdge {
			from: json!(i),
			to: json!((rand_simple(i) * (i as f64)) as usize),
			label: None,
			extra: Map::new(),
		})
		.collect();

	GraphData { nodes, edges }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn sample_spec(n: usize, autostart: bool) -> Spec {
	let mut settings = Map::new();
	settings.insert("height".into(), Value::from(360.0));
	Spec {
		data: Some(generate_sample_data(n)),
		options: RenderOptions {
			autostart,
			settings,
		},
	}
}

/// Demo page: one always-on widget and one with a start/stop control, both
/// fed from the same bus.
#[component]
pub fn Home() -> impl IntoView {
	let bus = EventBus::new();
	let config = HookConfig::default();
	let size = RwSignal::new(60usize);

	let push = {
		let bus = bus.clone();
		move |autostart: bool| {
			let n = size.get_untracked();
			for id in ["always-on", "toggle"] {
				let payload = InitPayload {
					spec: sample_spec(n, autostart),
				};
				if let Err(err) = bus.publish(&config.init_topic(id), payload) {
					error!("graph-widget: init for {} failed: {}", id, err);
				}
			}
			size.set(n + 20);
		}
	};
	let push_autostart = push.clone();

	view! {
		<div class="graph-demo">
			<div class="graph-overlay">
				<h1>"Graph widget"</h1>
				<p class="subtitle">"Push a spec to both widgets. The second one waits for its button unless autostart is set."</p>
				<button on:click=move |_| push(false)>"Push spec"</button>
				<button on:click=move |_| push_autostart(true)>"Push spec (autostart)"</button>
			</div>
			<GraphWidget id="always-on" bus=bus.clone() mode=Mode::AlwaysOn />
			<GraphWidget id="toggle" bus=bus mode=Mode::Toggleable />
		</div>
	}
}
