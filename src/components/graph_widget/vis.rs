//! Rendering surface backed by the `vis-network` browser library.
//!
//! Expects the standalone build to be loaded on the page so that
//! `window.vis.Network` exists.

use log::error;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::adapter::{RenderingSurface, WidgetHandle};
use super::error::HookError;
use super::types::{GraphData, RenderOptions};

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = vis)]
	type Network;

	#[wasm_bindgen(constructor, catch, js_namespace = vis)]
	fn new(container: &HtmlElement, data: &JsValue, options: &JsValue) -> Result<Network, JsValue>;

	#[wasm_bindgen(method, catch)]
	fn destroy(this: &Network) -> Result<(), JsValue>;
}

/// Converts through JSON so that maps become plain JS objects.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, HookError> {
	let text = serde_json::to_string(value)?;
	Ok(js_sys::JSON::parse(&text)?)
}

/// Builds a `vis.Network` in the container.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisNetworkSurface;

/// A live `vis.Network`.
pub struct VisNetworkHandle {
	network: Network,
}

impl WidgetHandle for VisNetworkHandle {
	fn destroy(self) {
		if let Err(err) = self.network.destroy() {
			error!("graph-widget: vis network destroy failed: {:?}", err);
		}
	}
}

impl RenderingSurface for VisNetworkSurface {
	type Container = HtmlElement;
	type Handle = VisNetworkHandle;

	fn construct(
		&mut self,
		container: &HtmlElement,
		data: &GraphData,
		options: &RenderOptions,
	) -> Result<VisNetworkHandle, HookError> {
		let network = Network::new(container, &to_js(data)?, &to_js(options)?)?;
		Ok(VisNetworkHandle { network })
	}
}
