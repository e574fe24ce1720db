//! `Host` over a real DOM element.

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement, MouseEvent};

use super::adapter::{ClickHandler, Control, Host};
use super::error::HookError;

/// The element a hook or component is mounted on.
#[derive(Clone)]
pub struct DomHost {
	element: HtmlElement,
}

impl DomHost {
	/// Wraps the element the widget mounts on.
	pub fn new(element: HtmlElement) -> Self {
		Self { element }
	}

	/// The wrapped element.
	pub fn element(&self) -> &HtmlElement {
		&self.element
	}

	fn document(&self) -> Result<Document, HookError> {
		self.element
			.owner_document()
			.ok_or_else(|| JsValue::from_str("host element has no document").into())
	}
}

/// Start/stop button. Removes its click listener when dropped.
pub struct DomControl {
	button: HtmlButtonElement,
	on_click: Closure<dyn FnMut(MouseEvent) -> Result<(), JsValue>>,
}

impl Control for DomControl {
	fn set_label(&self, label: &str) {
		self.button.set_text_content(Some(label));
	}
}

impl Drop for DomControl {
	fn drop(&mut self) {
		let _ = self
			.button
			.remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
	}
}

impl Host for DomHost {
	type Container = HtmlElement;
	type Control = DomControl;

	fn attribute(&self, name: &str) -> Option<String> {
		self.element.get_attribute(name)
	}

	fn append_control(
		&mut self,
		label: &str,
		mut on_click: ClickHandler,
	) -> Result<DomControl, HookError> {
		let button: HtmlButtonElement = self
			.document()?
			.create_element("button")?
			.dyn_into()
			.map_err(JsValue::from)?;
		button.set_type("button");
		button.set_class_name("graph-widget-toggle");
		button.set_text_content(Some(label));

		let on_click = Closure::<dyn FnMut(MouseEvent) -> Result<(), JsValue>>::new(
			move |_: MouseEvent| on_click().map_err(JsValue::from),
		);
		button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
		self.element.append_child(&button)?;
		Ok(DomControl { button, on_click })
	}

	fn append_container(&mut self) -> Result<HtmlElement, HookError> {
		let container: HtmlElement = self
			.document()?
			.create_element("div")?
			.dyn_into()
			.map_err(JsValue::from)?;
		container.set_class_name("graph-widget-container");
		self.element.append_child(&container)?;
		Ok(container)
	}
}
