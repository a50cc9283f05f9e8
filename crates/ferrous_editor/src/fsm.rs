//! Generic signal-driven finite state machine.
//!
//! A state is a variant of a small `Copy` enum implementing [`State`].  Data
//! that travels between states (mouse anchors, pick results, ...) does not
//! live in the states themselves but in one `Payload` owned by the machine,
//! so transitions only hand the payload from one hook to the next.
//!
//! # Dispatch
//!
//! `signal(id)` asks the current state what to do.  When it names a next
//! state the machine runs, in order:
//!
//! 1. `current.transition_out(next)`
//! 2. swap the current state
//! 3. `next.transition_in(previous)`
//! 4. queue a [`Transition`] event
//!
//! Owners poll the queue with [`StateMachine::take_transitions`] to react to
//! the *edge* of entering a state exactly once.

use std::fmt;

use crate::context::EditorContext;
use crate::error::EditorError;
use crate::signal::SignalId;

/// One node of a [`StateMachine`].
#[allow(unused_variables)]
pub trait State: Copy + Eq + fmt::Debug + 'static {
    /// Data shared by every state of the machine.
    type Payload;

    /// Unique name within the owning machine, used in logs and errors.
    fn name(&self) -> &'static str;

    /// React to `signal`.  Returning `Some(next)` requests a transition.
    fn signaled(
        &self,
        signal: SignalId,
        payload: &mut Self::Payload,
        cx: &mut EditorContext<'_>,
    ) -> Option<Self>;

    /// Called once per frame while this state is current.
    fn update(&self, dt: f32, payload: &mut Self::Payload, cx: &mut EditorContext<'_>) {}

    /// Leaving this state for `next`.
    fn transition_out(&self, next: Self, payload: &mut Self::Payload) {}

    /// Entering this state from `prev`.
    fn transition_in(&self, prev: Self, payload: &mut Self::Payload) {}
}

/// Record of one completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: S,
    pub to: S,
}

pub struct StateMachine<S: State> {
    states: Vec<S>,
    current: Option<S>,
    payload: S::Payload,
    transitions: Vec<Transition<S>>,
}

impl<S: State> StateMachine<S> {
    pub fn new(payload: S::Payload) -> Self {
        Self {
            states: Vec::new(),
            current: None,
            payload,
            transitions: Vec::new(),
        }
    }

    /// Adds `state` to the registry.  The first registered state becomes
    /// the current one.
    pub fn register_state(&mut self, state: S) {
        if self.states.contains(&state) {
            log::warn!("state {} registered twice", state.name());
            return;
        }
        self.states.push(state);
        if self.current.is_none() {
            self.current = Some(state);
        }
    }

    pub fn is_registered(&self, state: S) -> bool {
        self.states.contains(&state)
    }

    /// `None` only until the first state is registered.
    pub fn current(&self) -> Option<S> {
        self.current
    }

    pub fn payload(&self) -> &S::Payload {
        &self.payload
    }

    /// Forwards `signal` to the current state and performs the requested
    /// transition.  Returns the state entered, if any.
    ///
    /// A transition to an unregistered state is a wiring bug: it is logged
    /// and panics in debug builds.  Release builds report
    /// [`EditorError::UnregisteredState`] and the machine stays where it was.
    pub fn signal(
        &mut self,
        signal: SignalId,
        cx: &mut EditorContext<'_>,
    ) -> Result<Option<S>, EditorError> {
        let Some(current) = self.current else {
            return Ok(None);
        };
        let Some(next) = current.signaled(signal, &mut self.payload, cx) else {
            return Ok(None);
        };

        if !self.is_registered(next) {
            log::error!(
                "{} requested unregistered state {} on {}",
                current.name(),
                next.name(),
                signal
            );
            let err = EditorError::UnregisteredState {
                from: current.name(),
                to: next.name(),
            };
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
            return Err(err);
        }

        current.transition_out(next, &mut self.payload);
        self.current = Some(next);
        next.transition_in(current, &mut self.payload);
        self.transitions.push(Transition {
            from: current,
            to: next,
        });
        log::trace!("{} -> {} on {}", current.name(), next.name(), signal);
        Ok(Some(next))
    }

    /// Forwards the frame update to the current state only.
    pub fn update(&mut self, dt: f32, cx: &mut EditorContext<'_>) {
        if let Some(current) = self.current {
            current.update(dt, &mut self.payload, cx);
        }
    }

    /// Drains the transitions performed since the last call.
    pub fn take_transitions(&mut self) -> Vec<Transition<S>> {
        std::mem::take(&mut self.transitions)
    }

    /// `true` if `state` was entered since the last call.  Drains the queue.
    pub fn take_entered(&mut self, state: S) -> bool {
        self.take_transitions().iter().any(|t| t.to == state)
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    /// Toggle switch: down turns it on, up turns it off, drag asks for a
    /// state nobody registered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Switch {
        Off,
        On,
        Broken,
    }

    #[derive(Default)]
    struct Log {
        hooks: Vec<String>,
        updates: u32,
    }

    impl State for Switch {
        type Payload = Log;

        fn name(&self) -> &'static str {
            match self {
                Switch::Off => "Off",
                Switch::On => "On",
                Switch::Broken => "Broken",
            }
        }

        fn signaled(
            &self,
            signal: SignalId,
            _: &mut Log,
            _: &mut EditorContext<'_>,
        ) -> Option<Self> {
            match (self, signal) {
                (Switch::Off, SignalId::LEFT_MOUSE_BTN_DOWN) => Some(Switch::On),
                (Switch::On, SignalId::LEFT_MOUSE_BTN_UP) => Some(Switch::Off),
                (_, SignalId::LEFT_MOUSE_BTN_DRAG) => Some(Switch::Broken),
                _ => None,
            }
        }

        fn update(&self, _dt: f32, payload: &mut Log, _: &mut EditorContext<'_>) {
            if *self == Switch::On {
                payload.updates += 1;
            }
        }

        fn transition_out(&self, next: Self, payload: &mut Log) {
            payload.hooks.push(format!("out {}->{}", self.name(), next.name()));
        }

        fn transition_in(&self, prev: Self, payload: &mut Log) {
            payload.hooks.push(format!("in {}<-{}", self.name(), prev.name()));
        }
    }

    fn switch() -> StateMachine<Switch> {
        let mut fsm = StateMachine::new(Log::default());
        fsm.register_state(Switch::Off);
        fsm.register_state(Switch::On);
        fsm
    }

    #[test]
    fn first_registered_state_is_current() {
        let mut fsm = StateMachine::<Switch>::new(Log::default());
        assert_eq!(fsm.current(), None);
        fsm.register_state(Switch::On);
        fsm.register_state(Switch::Off);
        fsm.register_state(Switch::On);
        assert_eq!(fsm.current(), Some(Switch::On));
        assert!(fsm.is_registered(Switch::Off));
    }

    #[test]
    fn transition_runs_hooks_in_order() {
        let mut fx = Fixture::new();
        let mut cx = fx.cx();
        let mut fsm = switch();

        let entered = fsm.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut cx).unwrap();
        assert_eq!(entered, Some(Switch::On));
        assert_eq!(fsm.current(), Some(Switch::On));
        assert_eq!(fsm.payload().hooks, vec!["out Off->On", "in On<-Off"]);

        // no transition for an unhandled signal
        assert_eq!(fsm.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut cx).unwrap(), None);
        assert_eq!(fsm.payload().hooks.len(), 2);
    }

    #[test]
    fn update_reaches_current_state_only() {
        let mut fx = Fixture::new();
        let mut cx = fx.cx();
        let mut fsm = switch();
        fsm.update(0.016, &mut cx);
        assert_eq!(fsm.payload().updates, 0);
        fsm.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut cx).unwrap();
        fsm.update(0.016, &mut cx);
        fsm.update(0.016, &mut cx);
        assert_eq!(fsm.payload().updates, 2);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "target state is not registered"))]
    fn unregistered_target_fails_loudly_and_keeps_state() {
        let mut fx = Fixture::new();
        let mut cx = fx.cx();
        let mut fsm = switch();
        let err = fsm.signal(SignalId::LEFT_MOUSE_BTN_DRAG, &mut cx).unwrap_err();
        assert!(matches!(
            err,
            EditorError::UnregisteredState { from: "Off", to: "Broken" }
        ));
        assert_eq!(fsm.current(), Some(Switch::Off));
        assert!(fsm.payload().hooks.is_empty());
        assert!(fsm.take_transitions().is_empty());
    }

    #[test]
    fn entered_edge_fires_once() {
        let mut fx = Fixture::new();
        let mut cx = fx.cx();
        let mut fsm = switch();
        fsm.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut cx).unwrap();
        assert!(fsm.take_entered(Switch::On));
        assert!(!fsm.take_entered(Switch::On));

        fsm.signal(SignalId::LEFT_MOUSE_BTN_UP, &mut cx).unwrap();
        fsm.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut cx).unwrap();
        assert_eq!(
            fsm.take_transitions(),
            vec![
                Transition { from: Switch::On, to: Switch::Off },
                Transition { from: Switch::Off, to: Switch::On },
            ]
        );
    }
}
