//! Binds a host element to a single rendered graph.
//!
//! The adapter never touches the browser directly. It talks to three
//! injected capabilities:
//!
//! - [`Host`]: the element it is mounted on (attributes, child elements)
//! - [`RenderingSurface`]: the graph library (`construct`, then
//!   [`WidgetHandle::destroy`])
//! - [`EventSource`]: the host's topic-scoped push channel
//!
//! Lifecycle decisions come from [`machine::transition`]; the adapter only
//! carries out the resulting effects.

use std::cell::{OnceCell, RefCell};
use std::mem;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};

use super::error::HookError;
use super::machine::{self, Effect, Event, Mode, Phase, Transition};
use super::types::{GraphData, InitPayload, RenderOptions, Spec};

/// Called when the control is clicked.
pub type ClickHandler = Box<dyn FnMut() -> Result<(), HookError>>;
/// Called with each `init` payload.
pub type InitHandler = Box<dyn FnMut(InitPayload) -> Result<(), HookError>>;

/// The element the adapter is mounted on.
pub trait Host {
	/// Element the widget renders into.
	type Container;
	/// The start/stop control.
	type Control: Control;

	/// Value of attribute `name`, if set.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Appends a clickable control labelled `label`.
	fn append_control(
		&mut self,
		label: &str,
		on_click: ClickHandler,
	) -> Result<Self::Control, HookError>;

	/// Appends the element the widget renders into.
	fn append_container(&mut self) -> Result<Self::Container, HookError>;
}

/// A clickable start/stop control.
pub trait Control {
	/// Replaces the visible label.
	fn set_label(&self, label: &str);
}

/// A graph rendering library.
pub trait RenderingSurface {
	/// Element the graph is drawn in.
	type Container;
	/// The live graph.
	type Handle: WidgetHandle;

	/// Renders `data` into `container`. Library errors are returned as-is.
	fn construct(
		&mut self,
		container: &Self::Container,
		data: &GraphData,
		options: &RenderOptions,
	) -> Result<Self::Handle, HookError>;
}

/// A live rendered graph.
pub trait WidgetHandle {
	/// Tears the graph down.
	fn destroy(self);
}

/// Host-pushed events, subscribed by topic.
pub trait EventSource {
	/// Keeps the handler registered while alive.
	type Subscription;

	/// Calls `handler` for every event pushed on `topic`.
	fn subscribe(
		&mut self,
		topic: &str,
		handler: InitHandler,
	) -> Result<Self::Subscription, HookError>;
}

/// Adapter configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookConfig {
	/// Lifecycle profile.
	pub mode: Mode,
	/// Attribute holding the widget id.
	pub id_attribute: String,
	/// First segment of the `<prefix>:<id>:init` topic.
	pub topic_prefix: String,
}

impl Default for HookConfig {
	fn default() -> Self {
		Self {
			mode: Mode::AlwaysOn,
			id_attribute: "data-id".into(),
			topic_prefix: "graphwidget".into(),
		}
	}
}

impl HookConfig {
	/// Attribute selecting the toggleable profile (`"toggle"` or `"true"`).
	pub const CONTROLS_ATTRIBUTE: &'static str = "data-controls";

	/// Default config, with the mode taken from the host's `data-controls`.
	pub fn from_host<H: Host>(host: &H) -> Self {
		let mode = match host.attribute(Self::CONTROLS_ATTRIBUTE).as_deref() {
			Some("toggle" | "true") => Mode::Toggleable,
			_ => Mode::AlwaysOn,
		};
		Self::default().with_mode(mode)
	}

	/// Sets the lifecycle profile.
	pub fn with_mode(mut self, mode: Mode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the attribute the widget id is read from.
	pub fn with_id_attribute(mut self, attribute: impl Into<String>) -> Self {
		self.id_attribute = attribute.into();
		self
	}

	/// Sets the topic prefix.
	pub fn with_topic_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.topic_prefix = prefix.into();
		self
	}

	/// Topic carrying `init` events for widget `id`.
	pub fn init_topic(&self, id: &str) -> String {
		format!("{}:{}:init", self.topic_prefix, id)
	}
}

/// Values read from the host element's attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Props {
	/// Widget id, namespacing the event topic.
	pub id: String,
}

impl Props {
	/// Fails when the id attribute is missing.
	pub fn read<H: Host>(host: &H, config: &HookConfig) -> Result<Self, HookError> {
		let id = host
			.attribute(&config.id_attribute)
			.ok_or_else(|| HookError::missing_attribute(&config.id_attribute))?;
		Ok(Self { id })
	}
}

enum Widget<T> {
	Stopped,
	Running(T),
	Destroyed,
}

/// Owns at most one live widget for one host element.
pub struct GraphWidgetAdapter<H, R>
where
	H: Host,
	R: RenderingSurface<Container = H::Container>,
{
	config: HookConfig,
	props: Props,
	container: H::Container,
	control: Option<H::Control>,
	surface: R,
	spec: Option<Spec>,
	widget: Widget<R::Handle>,
}

/// A mounted adapter together with its event subscription.
pub struct Mounted<H, R, S>
where
	H: Host,
	R: RenderingSurface<Container = H::Container>,
{
	/// The adapter, shared with its event and click handlers.
	pub adapter: Rc<RefCell<GraphWidgetAdapter<H, R>>>,
	/// Keeps the `init` handler registered.
	pub subscription: S,
}

/// Mounts an adapter on `host`.
///
/// Fails before touching the host when the id attribute is missing. In
/// [`Mode::Toggleable`] the control is appended ahead of the container.
pub fn mount<H, R, E>(
	host: &mut H,
	surface: R,
	events: &mut E,
	config: HookConfig,
) -> Result<Mounted<H, R, E::Subscription>, HookError>
where
	H: Host + 'static,
	R: RenderingSurface<Container = H::Container> + 'static,
	E: EventSource,
{
	let props = Props::read(host, &config)?;
	let slot: Rc<OnceCell<Weak<RefCell<GraphWidgetAdapter<H, R>>>>> = Rc::new(OnceCell::new());

	let control = match config.mode {
		Mode::AlwaysOn => None,
		Mode::Toggleable => {
			let slot = slot.clone();
			let on_click: ClickHandler = Box::new(move || match slot.get().and_then(Weak::upgrade) {
				Some(adapter) => adapter.borrow_mut().on_click(),
				None => Ok(()),
			});
			Some(host.append_control(Phase::Stopped.label(), on_click)?)
		}
	};
	let container = host.append_container()?;
	let topic = config.init_topic(&props.id);

	let adapter = Rc::new(RefCell::new(GraphWidgetAdapter {
		config,
		props,
		container,
		control,
		surface,
		spec: None,
		widget: Widget::Stopped,
	}));
	let _ = slot.set(Rc::downgrade(&adapter));

	let weak = Rc::downgrade(&adapter);
	let subscription = events.subscribe(
		&topic,
		Box::new(move |payload| match weak.upgrade() {
			Some(adapter) => adapter.borrow_mut().on_init(payload),
			None => {
				debug!("graph-widget: init after unmount ignored");
				Ok(())
			}
		}),
	)?;

	info!("graph-widget: mounted, listening on {}", topic);
	Ok(Mounted {
		adapter,
		subscription,
	})
}

impl<H, R> GraphWidgetAdapter<H, R>
where
	H: Host,
	R: RenderingSurface<Container = H::Container>,
{
	/// Props as last read from the host.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// Lifecycle profile this adapter was mounted with.
	pub fn mode(&self) -> Mode {
		self.config.mode
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		match self.widget {
			Widget::Stopped => Phase::Stopped,
			Widget::Running(_) => Phase::Running,
			Widget::Destroyed => Phase::Destroyed,
		}
	}

	/// Whether a widget is currently rendered.
	pub fn is_running(&self) -> bool {
		matches!(self.widget, Widget::Running(_))
	}

	/// Last spec received, with `data` filled in.
	pub fn spec(&self) -> Option<&Spec> {
		self.spec.as_ref()
	}

	/// Current control label; `None` without a control.
	pub fn label(&self) -> Option<&'static str> {
		self.control.as_ref().map(|_| self.phase().label())
	}

	/// Re-reads props. The live widget is left alone.
	pub fn on_host_update(&mut self, host: &H) -> Result<(), HookError> {
		self.props = Props::read(host, &self.config)?;
		Ok(())
	}

	/// Stores the spec, filling in empty data, then starts or rebuilds
	/// the widget as the mode dictates.
	pub fn on_init(&mut self, payload: InitPayload) -> Result<(), HookError> {
		if matches!(self.widget, Widget::Destroyed) {
			return Ok(());
		}
		let spec = payload.spec.with_default_data();
		let autostart = spec.options.autostart;
		debug!(
			"graph-widget[{}]: init, {} nodes, {} edges",
			self.props.id,
			spec.data().nodes.len(),
			spec.data().edges.len()
		);
		self.spec = Some(spec);
		self.dispatch(Event::Init { autostart })
	}

	/// Toggles the widget. Does nothing before the first spec.
	pub fn on_click(&mut self) -> Result<(), HookError> {
		let spec_ready = self.spec.is_some();
		if !spec_ready {
			debug!("graph-widget[{}]: click before init", self.props.id);
		}
		self.dispatch(Event::Click { spec_ready })
	}

	/// Destroys the live widget, if any. Safe to call repeatedly.
	pub fn on_destroy(&mut self) {
		if let Err(err) = self.dispatch(Event::Teardown) {
			warn!("graph-widget[{}]: teardown: {}", self.props.id, err);
		}
	}

	fn dispatch(&mut self, event: Event) -> Result<(), HookError> {
		let Transition { next, effects } = machine::transition(self.config.mode, self.phase(), event);
		let result = effects.iter().try_for_each(|effect| match effect {
			Effect::Destroy => {
				self.destroy_widget();
				Ok(())
			}
			Effect::Construct => self.construct_widget(),
		});
		if next == Phase::Destroyed {
			self.widget = Widget::Destroyed;
		}
		if let Some(control) = &self.control {
			control.set_label(self.phase().label());
		}
		result
	}

	fn construct_widget(&mut self) -> Result<(), HookError> {
		let Some(spec) = &self.spec else {
			return Ok(());
		};
		debug_assert!(!self.is_running());
		let handle = self
			.surface
			.construct(&self.container, spec.data(), &spec.options)?;
		self.widget = Widget::Running(handle);
		info!("graph-widget[{}]: started", self.props.id);
		Ok(())
	}

	fn destroy_widget(&mut self) {
		if let Widget::Running(handle) = mem::replace(&mut self.widget, Widget::Stopped) {
			handle.destroy();
			info!("graph-widget[{}]: stopped", self.props.id);
		}
	}
}

impl<H, R> Drop for GraphWidgetAdapter<H, R>
where
	H: Host,
	R: RenderingSurface<Container = H::Container>,
{
	fn drop(&mut self) {
		self.on_destroy();
	}
}
