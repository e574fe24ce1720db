//! Widget lifecycle as an explicit state machine.
//!
//! `transition` is pure: it maps the current phase and an incoming event to
//! the next phase and the effects the adapter must carry out, in order.
//! The adapter owns the handle and the stored spec; this module only decides.

/// Which lifecycle profile the adapter follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	/// Construct as soon as a spec arrives. No control is shown.
	#[default]
	AlwaysOn,
	/// A start/stop control; `autostart` decides what happens on init.
	Toggleable,
}

/// Where the widget is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	/// No widget exists.
	#[default]
	Stopped,
	/// A widget is rendered.
	Running,
	/// The adapter was torn down. Terminal.
	Destroyed,
}

impl Phase {
	/// Control label shown in this phase.
	pub fn label(self) -> &'static str {
		match self {
			Phase::Running => "stop",
			Phase::Stopped | Phase::Destroyed => "start",
		}
	}
}

/// Something that happened to the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
	/// A spec arrived.
	Init {
		/// The spec's `options.autostart`.
		autostart: bool,
	},
	/// The control was clicked.
	Click {
		/// False until a spec arrived.
		spec_ready: bool,
	},
	/// The host element went away.
	Teardown,
}

/// Work the adapter carries out for a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
	/// Build a widget from the stored spec.
	Construct,
	/// Destroy the live widget.
	Destroy,
}

const NONE: &[Effect] = &[];
const CONSTRUCT: &[Effect] = &[Effect::Construct];
const DESTROY: &[Effect] = &[Effect::Destroy];
const REBUILD: &[Effect] = &[Effect::Destroy, Effect::Construct];

/// Outcome of [`transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	/// Phase after the effects ran.
	pub next: Phase,
	/// Effects, in order.
	pub effects: &'static [Effect],
}

impl Transition {
	const fn to(next: Phase, effects: &'static [Effect]) -> Self {
		Self { next, effects }
	}
}

/// Decides the next phase and effects for `event`.
pub fn transition(mode: Mode, phase: Phase, event: Event) -> Transition {
	use Phase::*;

	match (phase, event) {
		(Destroyed, _) => Transition::to(Destroyed, NONE),
		(Stopped, Event::Teardown) => Transition::to(Destroyed, NONE),
		(Running, Event::Teardown) => Transition::to(Destroyed, DESTROY),

		// A new spec replaces the old one; never leave two handles alive.
		(Running, Event::Init { .. }) => Transition::to(Running, REBUILD),
		(Stopped, Event::Init { autostart }) => {
			if mode == Mode::AlwaysOn || autostart {
				Transition::to(Running, CONSTRUCT)
			} else {
				Transition::to(Stopped, NONE)
			}
		}

		(_, Event::Click { .. }) if mode == Mode::AlwaysOn => Transition::to(phase, NONE),
		(Running, Event::Click { .. }) => Transition::to(Stopped, DESTROY),
		(Stopped, Event::Click { spec_ready: true }) => Transition::to(Running, CONSTRUCT),
		(Stopped, Event::Click { spec_ready: false }) => Transition::to(Stopped, NONE),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn always_on_constructs_on_any_init() {
		for autostart in [false, true] {
			let t = transition(Mode::AlwaysOn, Phase::Stopped, Event::Init { autostart });
			assert_eq!(t, Transition::to(Phase::Running, CONSTRUCT));
		}
	}

	#[test]
	fn always_on_ignores_clicks() {
		let t = transition(
			Mode::AlwaysOn,
			Phase::Running,
			Event::Click { spec_ready: true },
		);
		assert_eq!(t, Transition::to(Phase::Running, NONE));
	}

	#[test]
	fn toggleable_defers_to_autostart() {
		let t = transition(
			Mode::Toggleable,
			Phase::Stopped,
			Event::Init { autostart: false },
		);
		assert_eq!(t, Transition::to(Phase::Stopped, NONE));

		let t = transition(
			Mode::Toggleable,
			Phase::Stopped,
			Event::Init { autostart: true },
		);
		assert_eq!(t, Transition::to(Phase::Running, CONSTRUCT));
		assert_eq!(t.next.label(), "stop");
	}

	#[test]
	fn click_toggles_only_with_a_spec() {
		let m = Mode::Toggleable;
		assert_eq!(
			transition(m, Phase::Stopped, Event::Click { spec_ready: false }),
			Transition::to(Phase::Stopped, NONE)
		);
		assert_eq!(
			transition(m, Phase::Stopped, Event::Click { spec_ready: true }),
			Transition::to(Phase::Running, CONSTRUCT)
		);
		assert_eq!(
			transition(m, Phase::Running, Event::Click { spec_ready: true }),
			Transition::to(Phase::Stopped, DESTROY)
		);
	}

	#[test]
	fn init_while_running_rebuilds() {
		for mode in [Mode::AlwaysOn, Mode::Toggleable] {
			let t = transition(mode, Phase::Running, Event::Init { autostart: false });
			assert_eq!(t.next, Phase::Running);
			assert_eq!(t.effects, [Effect::Destroy, Effect::Construct]);
		}
	}

	#[test]
	fn teardown_is_terminal() {
		let t = transition(Mode::Toggleable, Phase::Running, Event::Teardown);
		assert_eq!(t, Transition::to(Phase::Destroyed, DESTROY));

		let t = transition(Mode::Toggleable, Phase::Stopped, Event::Teardown);
		assert_eq!(t, Transition::to(Phase::Destroyed, NONE));

		for event in [
			Event::Teardown,
			Event::Init { autostart: true },
			Event::Click { spec_ready: true },
		] {
			let t = transition(Mode::AlwaysOn, Phase::Destroyed, event);
			assert_eq!(t, Transition::to(Phase::Destroyed, NONE));
		}
	}
}
