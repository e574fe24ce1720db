//! In-process event channel for embedding the widget in a Leptos app.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::adapter::{EventSource, InitHandler};
use super::error::HookError;
use super::types::InitPayload;

type SharedHandler = Rc<RefCell<InitHandler>>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	handlers: Vec<(u64, String, SharedHandler)>,
}

/// Topic-keyed pub/sub delivering `init` payloads to subscribed adapters.
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
	registry: Rc<RefCell<Registry>>,
}

impl EventBus {
	/// An empty bus.
	pub fn new() -> Self {
		Self::default()
	}

	/// Delivers `payload` to every handler on `topic`, in subscription order.
	///
	/// Stops at the first handler error. Returns how many handlers ran.
	pub fn publish(&self, topic: &str, payload: InitPayload) -> Result<usize, HookError> {
		// Collect first so handlers may subscribe or unsubscribe while running.
		let targets: Vec<SharedHandler> = self
			.registry
			.borrow()
			.handlers
			.iter()
			.filter(|(_, t, _)| t == topic)
			.map(|(_, _, h)| h.clone())
			.collect();

		debug!("graph-widget: publish {} to {} handler(s)", topic, targets.len());
		for handler in &targets {
			let mut handler = handler.borrow_mut();
			(*handler)(payload.clone())?;
		}
		Ok(targets.len())
	}

	/// Handlers currently registered on `topic`.
	pub fn subscriber_count(&self, topic: &str) -> usize {
		self.registry
			.borrow()
			.handlers
			.iter()
			.filter(|(_, t, _)| t == topic)
			.count()
	}
}

/// Keeps a bus handler registered. Dropping it unsubscribes.
pub struct Subscription {
	registry: Weak<RefCell<Registry>>,
	id: u64,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry
				.borrow_mut()
				.handlers
				.retain(|(id, _, _)| *id != self.id);
		}
	}
}

impl EventSource for EventBus {
	type Subscription = Subscription;

	fn subscribe(&mut self, topic: &str, handler: InitHandler) -> Result<Subscription, HookError> {
		let mut registry = self.registry.borrow_mut();
		let id = registry.next_id;
		registry.next_id += 1;
		registry
			.handlers
			.push((id, topic.to_owned(), Rc::new(RefCell::new(handler))));
		Ok(Subscription {
			registry: Rc::downgrade(&self.registry),
			id,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	fn counter(hits: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> InitHandler {
		let hits = hits.clone();
		Box::new(move |_| {
			hits.borrow_mut().push(name);
			Ok(())
		})
	}

	#[test]
	fn delivers_by_topic_in_order() {
		let mut bus = EventBus::new();
		let hits = Rc::new(RefCell::new(Vec::new()));
		let _a = bus.subscribe("graphwidget:a:init", counter(&hits, "a1")).unwrap();
		let _b = bus.subscribe("graphwidget:b:init", counter(&hits, "b")).unwrap();
		let _c = bus.subscribe("graphwidget:a:init", counter(&hits, "a2")).unwrap();

		let n = bus
			.publish("graphwidget:a:init", InitPayload::default())
			.unwrap();
		assert_eq!(n, 2);
		assert_eq!(*hits.borrow(), ["a1", "a2"]);
		assert_eq!(bus.publish("graphwidget:zzz:init", InitPayload::default()).unwrap(), 0);
	}

	#[test]
	fn dropping_subscription_unsubscribes() {
		let mut bus = EventBus::new();
		let hits = Rc::new(RefCell::new(Vec::new()));
		let sub = bus.subscribe("t", counter(&hits, "x")).unwrap();
		assert_eq!(bus.subscriber_count("t"), 1);

		drop(sub);
		assert_eq!(bus.subscriber_count("t"), 0);
		assert_eq!(bus.publish("t", InitPayload::default()).unwrap(), 0);
		assert!(hits.borrow().is_empty());
	}

	#[test]
	fn handler_errors_propagate() {
		let mut bus = EventBus::new();
		let ran = Rc::new(Cell::new(false));
		let _fail = bus
			.subscribe("t", Box::new(|_| Err(HookError::Render("boom".into()))))
			.unwrap();
		let ran_after = ran.clone();
		let _next = bus
			.subscribe(
				"t",
				Box::new(move |_| {
					ran_after.set(true);
					Ok(())
				}),
			)
			.unwrap();

		let err = bus.publish("t", InitPayload::default()).unwrap_err();
		assert_eq!(err.to_string(), "render: boom");
		assert!(!ran.get());
	}

	#[test]
	fn subscription_outliving_bus_is_harmless() {
		let mut bus = EventBus::new();
		let sub = bus.subscribe("t", Box::new(|_| Ok(()))).unwrap();
		drop(bus);
		drop(sub);
	}
}
