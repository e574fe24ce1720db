//! Leptos wrapper that mounts the adapter on a `<div>` it renders.

use leptos::prelude::*;
use log::error;
use web_sys::HtmlElement;

use super::adapter::{HookConfig, Mounted, mount};
use super::bus::{EventBus, Subscription};
use super::canvas::ForceGraphSurface;
use super::dom::DomHost;
use super::machine::Mode;

type CanvasMount = Mounted<DomHost, ForceGraphSurface, Subscription>;

/// A graph widget fed by `init` events published on `bus`.
///
/// Listens on `graphwidget:<id>:init`. The widget is destroyed when the
/// component is unmounted.
#[component]
pub fn GraphWidget(
	/// Widget id, written to `data-id`.
	#[prop(into)]
	id: String,
	/// Channel the page publishes `init` events on.
	bus: EventBus,
	/// Lifecycle profile.
	#[prop(default = Mode::AlwaysOn)]
	mode: Mode,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	let mounted = StoredValue::new_local(None::<CanvasMount>);
	let config = HookConfig::default().with_mode(mode);

	Effect::new(move |_| {
		let Some(el) = host_ref.get() else {
			return;
		};
		if mounted.with_value(Option::is_some) {
			return;
		}
		let el: HtmlElement = el.into();
		let mut host = DomHost::new(el);
		let mut bus = bus.clone();
		match mount(&mut host, ForceGraphSurface, &mut bus, config.clone()) {
			Ok(m) => mounted.set_value(Some(m)),
			Err(err) => error!("graph-widget: mount failed: {}", err),
		}
	});

	on_cleanup(move || {
		mounted.try_update_value(|m| {
			if let Some(m) = m.take() {
				m.adapter.borrow_mut().on_destroy();
			}
		});
	});

	view! { <div node_ref=host_ref class="graph-widget" data-id=id /> }
}
