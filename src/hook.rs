//! Hook object for server-driven pages.
//!
//! The page's JS hook forwards its lifecycle callbacks:
//!
//! ```js
//! import init, { GraphWidgetHook, initLogging } from "graph_widget";
//!
//! const GraphWidget = {
//!   mounted() {
//!     this.rs = new GraphWidgetHook(this.el, (topic, cb) => this.handleEvent(topic, cb));
//!   },
//!   updated() { this.rs.updated(); },
//!   destroyed() {
//!     this.rs.destroyed();
//!     this.rs = null;
//!   },
//! };
//! ```
//!
//! `data-id` is required; `data-controls="toggle"` adds a start/stop button.
//! `destroyed()` consumes the hook: the JS object is freed along with its
//! button and event callbacks, and must not be used afterwards.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::components::graph_widget::adapter::{EventSource, InitHandler};
use crate::components::graph_widget::vis::VisNetworkSurface;
use crate::components::graph_widget::{DomHost, HookConfig, HookError, InitPayload, Mounted, mount};

/// The host's `handleEvent(topic, callback)` function.
struct JsEventSource {
	handle_event: js_sys::Function,
}

/// Keeps the JS callback alive for as long as the hook.
pub struct JsSubscription {
	_callback: Closure<dyn FnMut(JsValue) -> Result<(), JsValue>>,
}

fn read_payload(value: &JsValue) -> Result<InitPayload, HookError> {
	let text: String = js_sys::JSON::stringify(value)?.into();
	Ok(serde_json::from_str(&text)?)
}

impl EventSource for JsEventSource {
	type Subscription = JsSubscription;

	fn subscribe(&mut self, topic: &str, mut handler: InitHandler) -> Result<JsSubscription, HookError> {
		let callback = Closure::<dyn FnMut(JsValue) -> Result<(), JsValue>>::new(
			move |payload: JsValue| -> Result<(), JsValue> {
				let payload = read_payload(&payload)?;
				Ok(handler(payload)?)
			},
		);
		self.handle_event
			.call2(&JsValue::NULL, &JsValue::from_str(topic), callback.as_ref())?;
		debug!("graph-widget: subscribed to {}", topic);
		Ok(JsSubscription {
			_callback: callback,
		})
	}
}

/// A graph widget mounted on a server-rendered element, drawn with
/// `vis-network`.
#[wasm_bindgen]
pub struct GraphWidgetHook {
	host: DomHost,
	mounted: Mounted<DomHost, VisNetworkSurface, JsSubscription>,
}

#[wasm_bindgen]
impl GraphWidgetHook {
	/// Mounts on `el`. Throws when `data-id` is missing.
	#[wasm_bindgen(constructor)]
	pub fn new(el: HtmlElement, handle_event: js_sys::Function) -> Result<GraphWidgetHook, JsValue> {
		let mut host = DomHost::new(el);
		let config = HookConfig::from_host(&host);
		let mut events = JsEventSource { handle_event };
		let mounted = mount(&mut host, VisNetworkSurface, &mut events, config)?;
		Ok(Self { host, mounted })
	}

	/// Re-reads `data-id`. Throws when it was removed.
	pub fn updated(&self) -> Result<(), JsValue> {
		self.mounted
			.adapter
			.borrow_mut()
			.on_host_update(&self.host)?;
		Ok(())
	}

	/// Destroys the network, if any, and frees the hook.
	pub fn destroyed(self) {
		self.mounted.adapter.borrow_mut().on_destroy();
	}

	/// Whether a network is currently rendered.
	#[wasm_bindgen(getter)]
	pub fn running(&self) -> bool {
		self.mounted.adapter.borrow().is_running()
	}
}
