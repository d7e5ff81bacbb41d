//! The hierarchical state machine driving suspendable transitions.

use std::collections::HashMap;

use crate::core::{assert_delta, BoxRoutine, Routine, Step};
use crate::machine::error::ConfigError;
use crate::machine::state::State;
use crate::machine::table::{TransitionTable, WILDCARD};

const VALIDATED: &str = "state id was validated at machine construction";

enum Phase {
    Leaving { next: String },
    Entering,
}

struct InFlight<D> {
    routine: BoxRoutine,
    phase: Phase,
    data: D,
}

/// Owns a set of named states and routes actions between them through a
/// [`TransitionTable`], driving each transition's suspendable `leave` and
/// `enter` procedures one frame delta at a time.
///
/// An external driver calls [`update`] once per frame; anything else (a
/// button callback, a key binding) requests transitions through
/// [`push_action`] between frames. At most one transition is ever in flight:
/// actions arriving while one is are dropped, not queued.
///
/// A machine is itself a [`State`], so a state set may contain further
/// machines; the owning machine `start`s and `stop`s them around their own
/// enter/leave without ever inspecting their type.
///
/// [`update`]: StateMachine::update
/// [`push_action`]: StateMachine::push_action
///
/// # Example
///
/// ```rust
/// use curtain::core::{noop, BoxRoutine};
/// use curtain::machine::{State, StateMachine, TransitionTable};
///
/// struct Stub;
///
/// impl State for Stub {
///     fn enter(&mut self, _data: &()) -> BoxRoutine {
///         noop()
///     }
///     fn leave(&mut self, _data: &()) -> BoxRoutine {
///         noop()
///     }
///     fn update(&mut self, _delta_ms: f64) {}
/// }
///
/// let table = TransitionTable::new("menu").route("menu", "play", "game");
/// let mut machine = StateMachine::builder(table)
///     .state("menu", Stub)
///     .state("game", Stub)
///     .build()
///     .unwrap();
///
/// machine.start(());
/// assert_eq!(machine.current_state_id(), Some("menu"));
///
/// assert!(machine.push_action("play"));
/// machine.update(16.0);
/// assert_eq!(machine.current_state_id(), Some("game"));
/// ```
pub struct StateMachine<D = ()> {
    states: HashMap<String, Box<dyn State<D>>>,
    table: TransitionTable,
    current: Option<String>,
    running: bool,
    in_flight: Option<InFlight<D>>,
}

impl<D> StateMachine<D> {
    /// Build a machine from a complete state set and its transition table.
    ///
    /// Fails fatally if the table's initial state, any route source other
    /// than the wildcard, or any route destination is not in the state set.
    pub fn new(
        states: HashMap<String, Box<dyn State<D>>>,
        table: TransitionTable,
    ) -> Result<Self, ConfigError> {
        if !states.contains_key(table.initial_state()) {
            return Err(ConfigError::UnknownInitialState(
                table.initial_state().to_string(),
            ));
        }
        for (from, action, to) in table.iter_routes() {
            if from != WILDCARD && !states.contains_key(from) {
                return Err(ConfigError::UnknownSourceState(from.to_string()));
            }
            if !states.contains_key(to) {
                return Err(ConfigError::UnknownTargetState {
                    from: from.to_string(),
                    action: action.to_string(),
                    to: to.to_string(),
                });
            }
        }
        Ok(Self {
            states,
            table,
            current: None,
            running: false,
            in_flight: None,
        })
    }

    /// Fluent construction; see [`StateMachineBuilder`].
    pub fn builder(table: TransitionTable) -> StateMachineBuilder<D> {
        StateMachineBuilder::new(table)
    }

    /// Begin a session: enter the table's initial state, with no prior leave.
    ///
    /// The initial state's `enter` routine is advanced one step immediately;
    /// if it suspends, the machine stays transitioning until later `update`
    /// calls complete it.
    ///
    /// # Panics
    ///
    /// Panics if the machine is already running.
    pub fn start(&mut self, data: D) {
        assert!(
            !self.running,
            "start() called on a state machine that is already running"
        );
        self.running = true;
        let initial = self.table.initial_state().to_string();
        tracing::debug!(state = %initial, "state machine starting");
        self.current = Some(initial.clone());
        self.begin_enter(&initial, data);
    }

    /// End the session, discarding any in-flight transition.
    ///
    /// A composite current state is recursively stopped first. The machine
    /// has no current state afterwards and may be started again. Stopping a
    /// stopped machine does nothing.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        if let Some(id) = self.current.clone() {
            let state = self.states.get_mut(&id).expect(VALIDATED);
            if state.is_composite() {
                state.stop();
            }
        }
        self.current = None;
        self.in_flight = None;
        self.running = false;
        tracing::debug!("state machine stopped");
    }

    /// Advance the machine by one frame's time delta.
    ///
    /// No-op unless running. A transition in flight is resumed with exactly
    /// this delta; the current state's own `update` runs only on frames where
    /// no transition remains in flight afterwards, so the old and new state
    /// never both update within one frame.
    pub fn update(&mut self, delta_ms: f64) {
        assert_delta(delta_ms);
        if !self.running {
            return;
        }

        if let Some(mut flight) = self.in_flight.take() {
            match flight.routine.advance(delta_ms) {
                Step::Yield(()) => {
                    self.in_flight = Some(flight);
                    return;
                }
                Step::Done(()) => match flight.phase {
                    Phase::Leaving { next } => {
                        self.current = Some(next.clone());
                        if !self.begin_enter(&next, flight.data) {
                            return;
                        }
                    }
                    Phase::Entering => {
                        let id = self
                            .current
                            .clone()
                            .expect("transitioning machine always has a current state");
                        self.finish_enter(&id, &flight.data);
                    }
                },
            }
        }

        let id = self
            .current
            .clone()
            .expect("running machine always has a current state");
        self.states.get_mut(&id).expect(VALIDATED).update(delta_ms);
    }

    /// Request a transition, carrying a payload to the states involved.
    ///
    /// Returns whether a transition began. Actions arriving while a
    /// transition is in flight are dropped (never queued) and return false.
    /// Resolution order: the current state's routes, then the wildcard
    /// routes, then the current state's own [`State::handle_action`] (which
    /// is how nested machines receive actions their owner has no route for).
    ///
    /// On a hit, a composite current state is stopped, its `leave(data)`
    /// routine begins, and the transition plays out over subsequent `update`
    /// calls.
    ///
    /// # Panics
    ///
    /// Panics if the machine is not running.
    pub fn push_action_with(&mut self, action: &str, data: D) -> bool {
        assert!(
            self.running,
            "push_action() called on a state machine that is not running"
        );
        if self.in_flight.is_some() {
            tracing::trace!(action, "action dropped, transition in flight");
            return false;
        }

        let current_id = self
            .current
            .clone()
            .expect("running machine always has a current state");
        let Some(next) = self.table.resolve(&current_id, action) else {
            let state = self.states.get_mut(&current_id).expect(VALIDATED);
            return state.handle_action(action, &data);
        };
        let next = next.to_string();

        tracing::debug!(from = %current_id, action, to = %next, "transition begins");
        let state = self.states.get_mut(&current_id).expect(VALIDATED);
        if state.is_composite() {
            state.stop();
        }
        let routine = state.leave(&data);
        self.in_flight = Some(InFlight {
            routine,
            phase: Phase::Leaving { next },
            data,
        });
        true
    }

    /// [`push_action_with`] for actions that carry no payload.
    ///
    /// [`push_action_with`]: StateMachine::push_action_with
    pub fn push_action(&mut self, action: &str) -> bool
    where
        D: Default,
    {
        self.push_action_with(action, D::default())
    }

    /// Id of the current state. `None` before `start` and after `stop`.
    pub fn current_state_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether a session is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a leave/enter routine is currently in flight.
    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Borrow a state by id.
    pub fn state(&self, id: &str) -> Option<&dyn State<D>> {
        self.states.get(id).map(|boxed| &**boxed)
    }

    /// Mutably borrow a state by id.
    pub fn state_mut(&mut self, id: &str) -> Option<&mut (dyn State<D> + 'static)> {
        self.states.get_mut(id).map(move |boxed| &mut **boxed)
    }

    /// The routing table this machine was built with.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Invoke `enter` on `id` and advance the routine one step immediately,
    /// so setup before its first suspension lands before the next render.
    /// Returns whether the transition settled on that first step.
    fn begin_enter(&mut self, id: &str, data: D) -> bool {
        let state = self.states.get_mut(id).expect(VALIDATED);
        let mut routine = state.enter(&data);
        match routine.advance(0.0) {
            Step::Yield(()) => {
                self.in_flight = Some(InFlight {
                    routine,
                    phase: Phase::Entering,
                    data,
                });
                false
            }
            Step::Done(()) => {
                if state.is_composite() {
                    state.start(&data);
                }
                tracing::debug!(state = %id, "transition settled");
                true
            }
        }
    }

    /// Settle a transition whose `enter` routine just completed.
    fn finish_enter(&mut self, id: &str, data: &D) {
        let state = self.states.get_mut(id).expect(VALIDATED);
        if state.is_composite() {
            state.start(data);
        }
        tracing::debug!(state = %id, "transition settled");
    }
}

/// A machine is itself a state, which is what makes nesting work: the owning
/// machine stops it before its `leave` and starts it after its `enter`, and
/// forwards actions it has no route for into the nested table.
impl<D: Clone> State<D> for StateMachine<D> {
    fn enter(&mut self, _data: &D) -> BoxRoutine {
        crate::core::noop()
    }

    fn leave(&mut self, _data: &D) -> BoxRoutine {
        crate::core::noop()
    }

    fn update(&mut self, delta_ms: f64) {
        StateMachine::update(self, delta_ms);
    }

    fn is_composite(&self) -> bool {
        true
    }

    fn start(&mut self, data: &D) {
        StateMachine::start(self, data.clone());
    }

    fn stop(&mut self) {
        StateMachine::stop(self);
    }

    fn handle_action(&mut self, action: &str, data: &D) -> bool {
        self.push_action_with(action, data.clone())
    }
}

/// Fluent construction for [`StateMachine`].
///
/// ```rust
/// # use curtain::core::{noop, BoxRoutine};
/// # use curtain::machine::{State, StateMachine, TransitionTable};
/// # struct Stub;
/// # impl State for Stub {
/// #     fn enter(&mut self, _data: &()) -> BoxRoutine { noop() }
/// #     fn leave(&mut self, _data: &()) -> BoxRoutine { noop() }
/// #     fn update(&mut self, _delta_ms: f64) {}
/// # }
/// let machine = StateMachine::builder(TransitionTable::new("a").route("a", "go", "b"))
///     .state("a", Stub)
///     .state("b", Stub)
///     .build()
///     .unwrap();
/// ```
pub struct StateMachineBuilder<D = ()> {
    states: HashMap<String, Box<dyn State<D>>>,
    table: TransitionTable,
}

impl<D> StateMachineBuilder<D> {
    /// Builder routing through `table`, with an empty state set.
    pub fn new(table: TransitionTable) -> Self {
        Self {
            states: HashMap::new(),
            table,
        }
    }

    /// Register a state under `id`. Registering the same id again replaces
    /// the earlier state.
    pub fn state(mut self, id: impl Into<String>, state: impl State<D> + 'static) -> Self {
        self.states.insert(id.into(), Box::new(state));
        self
    }

    /// Register an already-boxed state under `id`.
    pub fn boxed_state(mut self, id: impl Into<String>, state: Box<dyn State<D>>) -> Self {
        self.states.insert(id.into(), state);
        self
    }

    /// Validate and build the machine.
    pub fn build(self) -> Result<StateMachine<D>, ConfigError> {
        StateMachine::new(self.states, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::wait;
    use crate::core::noop;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Leaf state logging its lifecycle; transitions take `transition_ms`
    /// of frame time (zero means instant).
    struct Screen {
        name: &'static str,
        log: Log,
        transition_ms: f64,
    }

    impl Screen {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                transition_ms: 0.0,
            }
        }

        fn with_fade(name: &'static str, log: &Log, transition_ms: f64) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                transition_ms,
            }
        }

        fn routine(&self) -> BoxRoutine {
            if self.transition_ms > 0.0 {
                Box::new(wait(self.transition_ms))
            } else {
                noop()
            }
        }
    }

    impl State for Screen {
        fn enter(&mut self, _data: &()) -> BoxRoutine {
            self.log.borrow_mut().push(format!("{}:enter", self.name));
            self.routine()
        }

        fn leave(&mut self, _data: &()) -> BoxRoutine {
            self.log.borrow_mut().push(format!("{}:leave", self.name));
            self.routine()
        }

        fn update(&mut self, _delta_ms: f64) {
            self.log.borrow_mut().push(format!("{}:update", self.name));
        }
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    fn two_screen_machine(log: &Log) -> StateMachine {
        StateMachine::builder(
            TransitionTable::new("a")
                .route("a", "go", "b")
                .route("b", "back", "a"),
        )
        .state("a", Screen::new("a", log))
        .state("b", Screen::new("b", log))
        .build()
        .unwrap()
    }

    #[test]
    fn unknown_initial_state_fails_construction() {
        let result = StateMachine::<()>::builder(TransitionTable::new("missing")).build();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownInitialState(id)) if id == "missing"
        ));
    }

    #[test]
    fn unknown_target_state_fails_construction() {
        let log = log();
        let result = StateMachine::builder(TransitionTable::new("a").route("a", "go", "nowhere"))
            .state("a", Screen::new("a", &log))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownTargetState { to, .. }) if to == "nowhere"
        ));
    }

    #[test]
    fn unknown_wildcard_target_fails_construction() {
        let log = log();
        let result = StateMachine::builder(TransitionTable::new("a").route_from_any("quit", "exit"))
            .state("a", Screen::new("a", &log))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownTargetState { from, to, .. }) if from == "*" && to == "exit"
        ));
    }

    #[test]
    fn unknown_source_state_fails_construction() {
        let log = log();
        let result = StateMachine::builder(TransitionTable::new("a").route("ghost", "go", "a"))
            .state("a", Screen::new("a", &log))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownSourceState(id)) if id == "ghost"
        ));
    }

    #[test]
    fn no_current_state_before_start() {
        let log = log();
        let machine = two_screen_machine(&log);
        assert_eq!(machine.current_state_id(), None);
        assert!(!machine.is_running());
    }

    #[test]
    fn start_enters_the_initial_state() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.start(());
        assert_eq!(machine.current_state_id(), Some("a"));
        assert!(machine.is_running());
        assert!(!machine.is_transitioning());
        assert_eq!(entries(&log), vec!["a:enter"]);
    }

    #[test]
    fn update_before_start_is_a_noop() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.update(16.0);
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn instant_transition_settles_on_the_next_update() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.start(());
        assert!(machine.push_action("go"));
        assert!(machine.is_transitioning());

        machine.update(16.0);
        assert_eq!(machine.current_state_id(), Some("b"));
        assert!(!machine.is_transitioning());
        assert_eq!(
            entries(&log),
            vec!["a:enter", "a:leave", "b:enter", "b:update"]
        );
    }

    #[test]
    fn unknown_action_is_a_noop_returning_false() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.start(());
        assert!(!machine.push_action("unknown"));
        assert_eq!(machine.current_state_id(), Some("a"));
        assert!(!machine.is_transitioning());
    }

    #[test]
    fn two_screen_round_trip() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.start(());
        assert_eq!(machine.current_state_id(), Some("a"));

        assert!(machine.push_action("go"));
        machine.update(16.0);
        assert_eq!(machine.current_state_id(), Some("b"));

        assert!(!machine.push_action("unknown"));
        assert_eq!(machine.current_state_id(), Some("b"));

        assert!(machine.push_action("back"));
        machine.update(16.0);
        assert_eq!(machine.current_state_id(), Some("a"));
    }

    #[test]
    fn no_state_updates_while_a_transition_is_in_flight() {
        let log = log();
        let mut machine = StateMachine::builder(TransitionTable::new("a").route("a", "go", "b"))
            .state("a", Screen::with_fade("a", &log, 50.0))
            .state("b", Screen::with_fade("b", &log, 50.0))
            .build()
            .unwrap();

        machine.start(());
        // Initial enter suspends for 50ms: two 30ms frames to finish it.
        assert!(machine.is_transitioning());
        machine.update(30.0);
        machine.update(30.0);
        assert!(!machine.is_transitioning());

        machine.push_action("go");
        machine.update(30.0); // leave in flight
        machine.update(30.0); // leave done, enter begins and suspends
        assert_eq!(machine.current_state_id(), Some("b"));
        assert!(machine.is_transitioning());
        machine.update(30.0); // enter in flight
        machine.update(30.0); // enter done, b updates
        assert!(!machine.is_transitioning());

        let no_updates_mid_flight = entries(&log);
        assert_eq!(
            no_updates_mid_flight,
            vec!["a:enter", "a:update", "a:leave", "b:enter", "b:update"]
        );
    }

    #[test]
    fn actions_during_a_transition_are_dropped() {
        let log = log();
        let mut machine = StateMachine::builder(
            TransitionTable::new("a")
                .route("a", "go", "b")
                .route("a", "jump", "a")
                .route("b", "back", "a"),
        )
        .state("a", Screen::with_fade("a", &log, 40.0))
        .state("b", Screen::new("b", &log))
        .build()
        .unwrap();

        machine.start(());
        machine.update(40.0);
        assert!(machine.push_action("go"));

        // Mid-flight pushes are dropped and report false.
        assert!(!machine.push_action("jump"));
        machine.update(20.0);
        assert!(!machine.push_action("back"));
        machine.update(20.0);

        // The dropped actions had zero effect on where we settled.
        assert_eq!(machine.current_state_id(), Some("b"));
        assert!(!machine.is_transitioning());
    }

    #[test]
    fn wildcard_routes_apply_from_any_state() {
        let log = log();
        let mut machine = StateMachine::builder(
            TransitionTable::new("a")
                .route("a", "go", "b")
                .route_from_any("reset", "a"),
        )
        .state("a", Screen::new("a", &log))
        .state("b", Screen::new("b", &log))
        .build()
        .unwrap();

        machine.start(());
        machine.push_action("go");
        machine.update(16.0);
        assert_eq!(machine.current_state_id(), Some("b"));

        assert!(machine.push_action("reset"));
        machine.update(16.0);
        assert_eq!(machine.current_state_id(), Some("a"));
    }

    #[test]
    fn stop_clears_current_state_and_allows_restart() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.start(());
        machine.push_action("go");
        machine.update(16.0);

        machine.stop();
        assert_eq!(machine.current_state_id(), None);
        assert!(!machine.is_running());

        machine.start(());
        assert_eq!(machine.current_state_id(), Some("a"));
    }

    #[test]
    fn stop_discards_an_in_flight_transition() {
        let log = log();
        let mut machine = StateMachine::builder(TransitionTable::new("a").route("a", "go", "b"))
            .state("a", Screen::with_fade("a", &log, 100.0))
            .state("b", Screen::new("b", &log))
            .build()
            .unwrap();

        machine.start(());
        machine.update(100.0);
        machine.push_action("go");
        machine.update(10.0);
        assert!(machine.is_transitioning());

        machine.stop();
        assert!(!machine.is_transitioning());
        assert_eq!(machine.current_state_id(), None);
    }

    #[test]
    fn stop_on_a_stopped_machine_is_a_noop() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.stop();
        assert!(!machine.is_running());
    }

    #[test]
    #[should_panic(expected = "already running")]
    fn double_start_panics() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.start(());
        machine.start(());
    }

    #[test]
    #[should_panic(expected = "not running")]
    fn push_action_before_start_panics() {
        let log = log();
        let mut machine = two_screen_machine(&log);
        machine.push_action("go");
    }

    /// Composite leaf recording `start`/`stop` calls, for observing the
    /// nesting protocol from outside.
    struct CompositeProbe {
        name: &'static str,
        log: Log,
    }

    impl State for CompositeProbe {
        fn enter(&mut self, _data: &()) -> BoxRoutine {
            self.log.borrow_mut().push(format!("{}:enter", self.name));
            noop()
        }

        fn leave(&mut self, _data: &()) -> BoxRoutine {
            self.log.borrow_mut().push(format!("{}:leave", self.name));
            noop()
        }

        fn update(&mut self, _delta_ms: f64) {}

        fn is_composite(&self) -> bool {
            true
        }

        fn start(&mut self, _data: &()) {
            self.log.borrow_mut().push(format!("{}:start", self.name));
        }

        fn stop(&mut self) {
            self.log.borrow_mut().push(format!("{}:stop", self.name));
        }
    }

    fn nested_machine(log: &Log) -> StateMachine {
        let inner = StateMachine::builder(
            TransitionTable::new("inner_a").route("inner_a", "advance", "inner_b"),
        )
        .state(
            "inner_a",
            CompositeProbe {
                name: "inner_a",
                log: Rc::clone(log),
            },
        )
        .state("inner_b", Screen::new("inner_b", log))
        .build()
        .unwrap();

        StateMachine::builder(TransitionTable::new("lobby").route("lobby", "play", "game"))
            .state("lobby", Screen::new("lobby", log))
            .state("game", inner)
            .build()
            .unwrap()
    }

    #[test]
    fn entering_a_nested_machine_starts_it() {
        let log = log();
        let mut machine = nested_machine(&log);
        machine.start(());
        machine.push_action("play");
        machine.update(16.0);

        assert_eq!(machine.current_state_id(), Some("game"));
        // The inner machine was started after its enter completed, which in
        // turn entered and started its own initial composite state.
        assert!(entries(&log).contains(&"inner_a:enter".to_string()));
        assert!(entries(&log).contains(&"inner_a:start".to_string()));
    }

    #[test]
    fn stopping_the_outer_machine_recursively_stops_the_inner() {
        let log = log();
        let mut machine = nested_machine(&log);
        machine.start(());
        machine.push_action("play");
        machine.update(16.0);

        machine.stop();
        assert!(entries(&log).contains(&"inner_a:stop".to_string()));
        assert_eq!(machine.current_state_id(), None);
    }

    #[test]
    fn unrouted_actions_are_forwarded_to_a_nested_machine() {
        let log = log();
        let mut machine = nested_machine(&log);
        machine.start(());
        machine.push_action("play");
        machine.update(16.0);

        // The outer table has no `advance` route; the inner one does.
        assert!(machine.push_action("advance"));
        machine.update(16.0);
        assert!(entries(&log).contains(&"inner_b:enter".to_string()));

        // Neither table knows this one.
        assert!(!machine.push_action("nonsense"));
    }

    /// State recording the payload its transitions receive.
    struct PayloadProbe {
        seen: Rc<RefCell<Vec<u32>>>,
    }

    impl State<u32> for PayloadProbe {
        fn enter(&mut self, data: &u32) -> BoxRoutine {
            self.seen.borrow_mut().push(*data);
            noop()
        }

        fn leave(&mut self, data: &u32) -> BoxRoutine {
            self.seen.borrow_mut().push(*data);
            noop()
        }

        fn update(&mut self, _delta_ms: f64) {}
    }

    #[test]
    fn payload_reaches_both_sides_of_a_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut machine = StateMachine::builder(TransitionTable::new("a").route("a", "go", "b"))
            .state(
                "a",
                PayloadProbe {
                    seen: Rc::clone(&seen),
                },
            )
            .state(
                "b",
                PayloadProbe {
                    seen: Rc::clone(&seen),
                },
            )
            .build()
            .unwrap();

        machine.start(7);
        machine.push_action_with("go", 42);
        machine.update(16.0);

        // 7 entered the initial state; 42 left `a` and entered `b`.
        assert_eq!(*seen.borrow(), vec![7, 42, 42]);
    }

    #[test]
    fn enter_setup_runs_before_the_routine_suspends() {
        struct SetsFlag {
            flag: Rc<Cell<bool>>,
        }

        impl State for SetsFlag {
            fn enter(&mut self, _data: &()) -> BoxRoutine {
                self.flag.set(true);
                Box::new(wait(100.0))
            }

            fn leave(&mut self, _data: &()) -> BoxRoutine {
                noop()
            }

            fn update(&mut self, _delta_ms: f64) {}
        }

        let flag = Rc::new(Cell::new(false));
        let mut machine = StateMachine::builder(TransitionTable::new("s"))
            .state(
                "s",
                SetsFlag {
                    flag: Rc::clone(&flag),
                },
            )
            .build()
            .unwrap();

        machine.start(());
        // Still transitioning, but the synchronous setup already happened.
        assert!(machine.is_transitioning());
        assert!(flag.get());
    }
}
