//! Graph widget for server-driven pages.
//!
//! A host element receives one `init` event carrying a graph spec and gets a
//! rendered graph; removing the host destroys it. See
//! [`components::graph_widget`] for the adapter and [`hook`] for the JS-facing
//! entry point. The Leptos app below is a demo of both widget profiles.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};
use wasm_bindgen::prelude::*;

// Modules
pub mod components;
pub mod hook;
mod pages;

pub use components::graph_widget::{
	EventBus, GraphData, GraphWidget, HookConfig, HookError, InitPayload, Mode, Spec,
};
pub use hook::GraphWidgetHook;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the demo page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Graph widget" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
