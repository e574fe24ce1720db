//! Graph widget adapter.
//!
//! Mounts a graph-rendering widget on a host element and drives it from a
//! single `init` event carrying a [`Spec`]:
//! - `adapter`: lifecycle (`mount`, `on_init`, `on_click`, `on_destroy`)
//!   over injected host, surface and event capabilities
//! - `machine`: the pure start/stop transition table
//! - `dom`, `vis`, `canvas`: browser implementations of those capabilities
//! - `bus` and `component`: in-app event channel and Leptos wrapper
//!
//! # Example
//!
//! ```ignore
//! let bus = EventBus::new();
//! view! { <GraphWidget id="deps" bus=bus.clone() mode=Mode::Toggleable /> };
//!
//! let spec: Spec = serde_json::from_str(r#"{ "options": { "autostart": true } }"#)?;
//! bus.publish("graphwidget:deps:init", InitPayload { spec })?;
//! ```

pub mod adapter;
mod bus;
pub mod canvas;
mod component;
mod dom;
mod error;
pub mod machine;
mod types;
pub mod vis;

pub use adapter::{
	Control, EventSource, GraphWidgetAdapter, Host, HookConfig, Mounted, Props, RenderingSurface,
	WidgetHandle, mount,
};
pub use bus::{EventBus, Subscription};
pub use component::GraphWidget;
pub use dom::{DomControl, DomHost};
pub use error::HookError;
pub use machine::{Mode, Phase};
pub use types::{GraphData, GraphEdge, GraphNode, InitPayload, RenderOptions, Spec};
