use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced by the graph widget adapter.
#[derive(Debug, Error)]
pub enum HookError {
	/// The host element is missing a required attribute.
	#[error("missing required attribute `{attribute}` on host element")]
	MissingAttribute {
		/// Attribute name.
		attribute: String,
	},

	/// The init payload could not be read.
	#[error("malformed init payload: {0}")]
	Payload(#[from] serde_json::Error),

	/// A rendering surface failed on the Rust side.
	#[error("render: {0}")]
	Render(String),

	/// A value thrown by JS (the rendering library or the DOM). Rethrown
	/// unchanged at the wasm boundary.
	#[error("{}", js_message(.0))]
	Js(JsValue),
}

impl HookError {
	/// Configuration error for a missing host attribute.
	pub fn missing_attribute(attribute: impl Into<String>) -> Self {
		Self::MissingAttribute {
			attribute: attribute.into(),
		}
	}
}

impl From<JsValue> for HookError {
	fn from(err: JsValue) -> Self {
		Self::Js(err)
	}
}

impl From<HookError> for JsValue {
	fn from(err: HookError) -> Self {
		match err {
			HookError::Js(value) => value,
			other => js_sys::Error::new(&other.to_string()).into(),
		}
	}
}

fn js_message(err: &JsValue) -> String {
	err.as_string()
		.or_else(|| {
			js_sys::Reflect::get(err, &JsValue::from_str("message"))
				.ok()
				.and_then(|m| m.as_string())
		})
		.unwrap_or_else(|| format!("{err:?}"))
}
