//! Self-contained rendering surface: a `<canvas>` driven by the
//! `force_graph` simulation.

mod options;
mod render;
mod state;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use super::adapter::{RenderingSurface, WidgetHandle};
use super::error::HookError;
use super::types::{GraphData, RenderOptions};

pub use options::{CanvasOptions, PhysicsOptions};
use state::CanvasState;

const FRAME_DT: f32 = 0.016;
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Draws the spec on a `<canvas>` appended to the container.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForceGraphSurface;

/// A running canvas. Destroying it stops the animation loop and removes the
/// canvas from its container.
pub struct ForceGraphHandle {
	canvas: HtmlCanvasElement,
	animate: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl WidgetHandle for ForceGraphHandle {
	fn destroy(self) {
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// Dropping the closure breaks the closure -> FrameCallback cycle.
		self.animate.borrow_mut().take();
		self.canvas.remove();
		debug!("graph-widget: canvas destroyed");
	}
}

fn request_frame(animate: &FrameCallback, frame_id: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *animate.borrow() {
		frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
	}
}

/// Explicit `width`/`height` win; otherwise the container's client size,
/// falling back to 800x600 for a zero-sized container.
fn canvas_size(options: &CanvasOptions, (cw, ch): (f64, f64)) -> (f64, f64) {
	(
		options
			.width
			.unwrap_or(if cw > 0.0 { cw } else { FALLBACK_SIZE.0 }),
		options
			.height
			.unwrap_or(if ch > 0.0 { ch } else { FALLBACK_SIZE.1 }),
	)
}

impl RenderingSurface for ForceGraphSurface {
	type Container = HtmlElement;
	type Handle = ForceGraphHandle;

	fn construct(
		&mut self,
		container: &HtmlElement,
		data: &GraphData,
		options: &RenderOptions,
	) -> Result<ForceGraphHandle, HookError> {
		let options = CanvasOptions::from_settings(&options.settings)?;
		let document = container
			.owner_document()
			.ok_or_else(|| HookError::Render("container has no document".into()))?;
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(JsValue::from)?;
		canvas.set_class_name("force-graph-canvas");

		let (w, h) = canvas_size(
			&options,
			(container.client_width() as f64, container.client_height() as f64),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Only attach once drawing is possible, so a failed construct leaves
		// the container untouched.
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or_else(|| HookError::Render("2d context unavailable".into()))?
			.dyn_into()
			.map_err(JsValue::from)?;
		container.append_child(&canvas)?;

		let state = CanvasState::new(data, w, h, options);
		debug!(
			"graph-widget: canvas {}x{}, {} nodes, {} edges",
			w,
			h,
			state.node_count(),
			state.edge_count()
		);

		let state = Rc::new(RefCell::new(state));
		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let frame_id = Rc::new(Cell::new(None));
		let (animate_inner, frame_id_inner) = (animate.clone(), frame_id.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state.borrow_mut();
				s.tick(FRAME_DT);
				render::render(&s, &ctx);
			}
			request_frame(&animate_inner, &frame_id_inner);
		}));
		request_frame(&animate, &frame_id);

		Ok(ForceGraphHandle {
			canvas,
			animate,
			frame_id,
		})
	}
}
