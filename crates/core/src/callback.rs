//! The two-slot callback chain.
//!
//! A dispatch round runs the pre hook, then the main routine. Either slot
//! may be empty; an empty main slot never suppresses the pre hook. Modal
//! overlays are asked first and the first active one takes the whole round.
//!
//! Replacing the main routine zeroes [`FrameState::cycle`]. A
//! [`ControlRoutine`] also gets `on_activate` right before its first tick,
//! so it does not need to infer activation from the counter.
//!
//! Routines can swap slots from inside a tick through [`FrameContext`]; the
//! swap lands as soon as the running callback returns, so a pre hook that
//! installs a new main routine sees it run in the same round.

use crate::frame::FrameState;
use crate::peripherals::{ModalOverlay, SoundEngine};

/// Plain function callback
pub type RoutineFn = fn(&mut FrameContext<'_>);

/// Stateful callback with an explicit activation step.
pub trait ControlRoutine {
    fn on_activate(&mut self, _ctx: &mut FrameContext<'_>) {}
    fn on_tick(&mut self, ctx: &mut FrameContext<'_>);

    fn name(&self) -> &'static str {
        "routine"
    }
}

pub enum Callback {
    Fn(RoutineFn),
    Routine(Box<dyn ControlRoutine>),
}

impl Callback {
    pub fn routine<R: ControlRoutine + 'static>(r: R) -> Self {
        Callback::Routine(Box::new(r))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Callback::Fn(_) => "fn",
            Callback::Routine(r) => r.name(),
        }
    }

    fn activate(&mut self, ctx: &mut FrameContext<'_>) {
        if let Callback::Routine(r) = self {
            r.on_activate(ctx);
        }
    }

    fn tick(&mut self, ctx: &mut FrameContext<'_>) {
        match self {
            Callback::Fn(f) => f(ctx),
            Callback::Routine(r) => r.on_tick(ctx),
        }
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Callback({})", self.name())
    }
}

/// Slot changes requested from inside a tick
#[derive(Default)]
struct Requests {
    main: Option<Option<Callback>>,
    pre_hook: Option<Option<Callback>>,
}

/// What a running callback can reach.
pub struct FrameContext<'a> {
    pub state: &'a mut FrameState,
    pub sound: &'a mut dyn SoundEngine,
    requests: &'a mut Requests,
}

impl<'a> FrameContext<'a> {
    /// Replace the main routine once the current callback returns.
    pub fn set_main_callback(&mut self, cb: Option<Callback>) {
        self.requests.main = Some(cb);
    }

    /// Replace the pre hook once the current callback returns.
    pub fn set_pre_hook(&mut self, cb: Option<Callback>) {
        self.requests.pre_hook = Some(cb);
    }
}

/// Who handled a dispatch round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A modal overlay took the round
    Overlay,
    /// Pre hook and main routine ran (where set)
    Callbacks,
}

#[derive(Default)]
pub struct CallbackChain {
    pre_hook: Option<Callback>,
    main: Option<Callback>,
    /// Main routine has not ticked since it was installed
    main_fresh: bool,
    requests: Requests,
    overlays: Vec<Box<dyn ModalOverlay>>,
}

impl CallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_main_callback(&mut self, state: &mut FrameState, cb: Option<Callback>) {
        log::debug!("main callback -> {}", cb.as_ref().map_or("none", |c| c.name()));
        self.main = cb;
        self.main_fresh = true;
        state.cycle = 0;
    }

    pub fn set_pre_hook(&mut self, cb: Option<Callback>) {
        self.pre_hook = cb;
    }

    pub fn add_overlay(&mut self, overlay: Box<dyn ModalOverlay>) {
        self.overlays.push(overlay);
    }

    pub fn has_main(&self) -> bool {
        self.main.is_some()
    }

    pub fn has_pre_hook(&self) -> bool {
        self.pre_hook.is_some()
    }

    pub fn main_name(&self) -> Option<&'static str> {
        self.main.as_ref().map(|c| c.name())
    }

    /// Run one dispatch round.
    pub fn dispatch(&mut self, state: &mut FrameState, sound: &mut dyn SoundEngine) -> Dispatch {
        for overlay in self.overlays.iter_mut() {
            if overlay.is_active(state) {
                return Dispatch::Overlay;
            }
        }

        if let Some(hook) = self.pre_hook.as_mut() {
            let mut ctx = FrameContext { state: &mut *state, sound: &mut *sound, requests: &mut self.requests };
            hook.tick(&mut ctx);
        }
        self.apply_requests(state);

        if let Some(main) = self.main.as_mut() {
            let mut ctx = FrameContext { state: &mut *state, sound: &mut *sound, requests: &mut self.requests };
            if self.main_fresh {
                self.main_fresh = false;
                main.activate(&mut ctx);
            }
            main.tick(&mut ctx);
        }
        self.apply_requests(state);

        Dispatch::Callbacks
    }

    fn apply_requests(&mut self, state: &mut FrameState) {
        if let Some(hook) = self.requests.pre_hook.take() {
            self.set_pre_hook(hook);
        }
        if let Some(main) = self.requests.main.take() {
            self.set_main_callback(state, main);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripherals::Silence;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        tag: &'static str,
        trace: Trace,
    }

    impl ControlRoutine for Recorder {
        fn on_activate(&mut self, ctx: &mut FrameContext<'_>) {
            self.trace.borrow_mut().push(format!("{}:activate@{}", self.tag, ctx.state.cycle));
        }
        fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
            self.trace.borrow_mut().push(format!("{}:tick@{}", self.tag, ctx.state.cycle));
            ctx.state.cycle += 1;
        }
    }

    struct Swapper {
        next: Option<Callback>,
    }

    impl ControlRoutine for Swapper {
        fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
            ctx.state.cycle += 7;
            if let Some(next) = self.next.take() {
                ctx.set_main_callback(Some(next));
            }
        }
    }

    struct Overlay {
        active: bool,
    }

    impl ModalOverlay for Overlay {
        fn is_active(&mut self, state: &mut FrameState) -> bool {
            if self.active {
                state.scratch += 1;
            }
            self.active
        }
    }

    fn pre_hook_fn(ctx: &mut FrameContext<'_>) {
        ctx.state.scratch += 10;
    }

    fn recorder(tag: &'static str, trace: &Trace) -> Callback {
        Callback::routine(Recorder { tag, trace: trace.clone() })
    }

    #[test]
    fn test_pre_hook_runs_before_main() {
        let trace: Trace = Rc::default();
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        chain.set_pre_hook(Some(recorder("pre", &trace)));
        chain.set_main_callback(&mut state, Some(recorder("main", &trace)));

        assert_eq!(chain.dispatch(&mut state, &mut Silence), Dispatch::Callbacks);
        assert_eq!(*trace.borrow(), vec!["pre:tick@0", "main:activate@1", "main:tick@1"]);
    }

    #[test]
    fn test_missing_main_still_runs_pre_hook() {
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        chain.set_pre_hook(Some(Callback::Fn(pre_hook_fn)));
        chain.dispatch(&mut state, &mut Silence);
        assert_eq!(state.scratch, 10);
        assert!(!chain.has_main());
    }

    #[test]
    fn test_activate_only_once() {
        let trace: Trace = Rc::default();
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        chain.set_main_callback(&mut state, Some(recorder("m", &trace)));
        for _ in 0..3 {
            chain.dispatch(&mut state, &mut Silence);
        }
        assert_eq!(*trace.borrow(), vec!["m:activate@0", "m:tick@0", "m:tick@1", "m:tick@2"]);
    }

    #[test]
    fn test_set_main_mid_run_resets_cycle() {
        let trace: Trace = Rc::default();
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        chain.set_main_callback(&mut state, Some(recorder("a", &trace)));
        for _ in 0..5 {
            chain.dispatch(&mut state, &mut Silence);
        }
        assert_eq!(state.cycle, 5);

        chain.set_main_callback(&mut state, Some(recorder("b", &trace)));
        chain.dispatch(&mut state, &mut Silence);
        let t = trace.borrow();
        assert_eq!(&t[t.len() - 2..], &["b:activate@0".to_string(), "b:tick@0".to_string()]);
    }

    #[test]
    fn test_swap_from_inside_tick() {
        let trace: Trace = Rc::default();
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        let next = recorder("next", &trace);
        chain.set_main_callback(&mut state, Some(Callback::routine(Swapper { next: Some(next) })));

        chain.dispatch(&mut state, &mut Silence);
        assert_eq!(state.cycle, 0);
        assert!(trace.borrow().is_empty());

        chain.dispatch(&mut state, &mut Silence);
        assert_eq!(*trace.borrow(), vec!["next:activate@0", "next:tick@0"]);
    }

    #[test]
    fn test_pre_hook_swap_runs_same_round() {
        struct Installer(Trace);
        impl ControlRoutine for Installer {
            fn on_tick(&mut self, ctx: &mut FrameContext<'_>) {
                ctx.set_main_callback(Some(recorder("new", &self.0)));
                ctx.set_pre_hook(None);
            }
        }
        let trace: Trace = Rc::default();
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        state.cycle = 33;
        chain.set_pre_hook(Some(Callback::routine(Installer(trace.clone()))));
        chain.dispatch(&mut state, &mut Silence);
        assert_eq!(*trace.borrow(), vec!["new:activate@0", "new:tick@0"]);
        assert!(!chain.has_pre_hook());
    }

    #[test]
    fn test_overlay_replaces_round() {
        let trace: Trace = Rc::default();
        let mut chain = CallbackChain::new();
        let mut state = FrameState::new();
        chain.set_pre_hook(Some(Callback::Fn(pre_hook_fn)));
        chain.set_main_callback(&mut state, Some(recorder("m", &trace)));
        chain.add_overlay(Box::new(Overlay { active: false }));
        chain.add_overlay(Box::new(Overlay { active: true }));

        assert_eq!(chain.dispatch(&mut state, &mut Silence), Dispatch::Overlay);
        assert_eq!(state.scratch, 1);
        assert!(trace.borrow().is_empty());
    }
}
